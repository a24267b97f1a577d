//! Detail page generator: read-only rendering of every field (timestamps
//! included), with edit and delete actions.

use super::{cell_expr, label_text};
use crate::{relative_import, GENERATED_HEADER};
use griddle_core::{ModelDescriptor, TargetConfig};

pub fn generate(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let kebab = model.kebab_name();
    let proxy_import = relative_import(
        &config.ui_dir(pascal),
        &config.routes_dir.join(&kebab).join("routes.ts"),
    );

    let mut fields = String::new();
    for field in &model.fields {
        fields.push_str(&format!(
            "          <div>\n            <dt>{}</dt>\n            <dd>{}</dd>\n          </div>\n",
            label_text(&field.name),
            cell_expr(field)
        ));
    }

    let body = format!(
        r#"import {{ useEffect, useState }} from "react";
import {{ Link, useNavigate, useParams }} from "react-router-dom";
import {{ delete{pascal}, get{pascal} }} from "{proxy_import}";

export function {pascal}Detail() {{
  const {{ id }} = useParams<{{ id: string }}>();
  const navigate = useNavigate();
  const [row, setRow] = useState<Record<string, unknown> | null>(null);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {{
    if (id === undefined) {{
      return;
    }}
    get{pascal}(id).then((result) => {{
      if (result.status === 200) {{
        setRow(result.body as Record<string, unknown>);
      }} else {{
        setError((result.body as {{ error: string }}).error);
      }}
    }});
  }}, [id]);

  const handleDelete = async () => {{
    if (id === undefined) {{
      return;
    }}
    const result = await delete{pascal}(id);
    if (result.status === 204) {{
      navigate("/{kebab}");
    }} else {{
      setError((result.body as {{ error: string }}).error);
    }}
  }};

  if (error !== null) {{
    return <p role="alert">{{error}}</p>;
  }}
  if (row === null) {{
    return <p>Loading…</p>;
  }}

  return (
    <section>
      <h1>{pascal}</h1>
      <dl>
{fields}      </dl>
      <Link to={{`/{kebab}/${{id}}/edit`}}>Edit</Link>
      <button type="button" onClick={{handleDelete}}>
        Delete
      </button>
    </section>
  );
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}
