use console::style;
use dialoguer::theme::ColorfulTheme;

/// Theme for the overwrite confirmation, matching the glyphs the scaffold
/// report prints.
pub fn dialoguer_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).cyan().bold(),
        prompt_style: console::Style::new().bold(),
        success_prefix: style("✓".to_string()).green().bold(),
        hint_style: console::Style::new().dim(),
        values_style: console::Style::new().cyan(),
        ..Default::default()
    }
}
