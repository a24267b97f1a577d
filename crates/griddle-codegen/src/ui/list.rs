//! List page generator: a table over the model's collection, one column
//! per visible field, with links into the detail/create screens.

use super::{cell_expr, label_text};
use crate::{relative_import, GENERATED_HEADER};
use griddle_core::{ident, ModelDescriptor, TargetConfig};

pub fn generate(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let kebab = model.kebab_name();
    let proxy_import = relative_import(
        &config.ui_dir(pascal),
        &config.routes_dir.join(&kebab).join("routes.ts"),
    );

    let mut headers = String::new();
    let mut cells = String::new();
    for field in model.form_fields() {
        headers.push_str(&format!(
            "            <th>{}</th>\n",
            label_text(&field.name)
        ));
        cells.push_str(&format!(
            "              <td>{}</td>\n",
            cell_expr(field)
        ));
    }

    let title = label_text(&ident::camel_case(pascal));
    let body = format!(
        r#"import {{ useEffect, useState }} from "react";
import {{ Link }} from "react-router-dom";
import {{ list{pascal} }} from "{proxy_import}";

export function {pascal}List() {{
  const [rows, setRows] = useState<Record<string, unknown>[]>([]);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {{
    list{pascal}().then((result) => {{
      if (result.status === 200) {{
        setRows(result.body as Record<string, unknown>[]);
      }} else {{
        setError((result.body as {{ error: string }}).error);
      }}
    }});
  }}, []);

  return (
    <section>
      <h1>{title}</h1>
      <Link to="/{kebab}/new">New</Link>
      {{error !== null && <p role="alert">{{error}}</p>}}
      <table>
        <thead>
          <tr>
{headers}            <th />
          </tr>
        </thead>
        <tbody>
          {{rows.map((row) => (
            <tr key={{String(row.id)}}>
{cells}              <td>
                <Link to={{`/{kebab}/${{row.id}}`}}>View</Link>
              </td>
            </tr>
          ))}}
        </tbody>
      </table>
    </section>
  );
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}
