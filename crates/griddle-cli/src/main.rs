use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = griddle_cli::parse_and_run() {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
        std::process::exit(1);
    }
}
