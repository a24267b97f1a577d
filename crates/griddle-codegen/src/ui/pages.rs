//! Create/edit page generators: thin wrappers binding the shared form
//! component to the create and update proxy operations.

use crate::{relative_import, GENERATED_HEADER};
use griddle_core::{ModelDescriptor, TargetConfig};

pub fn create_page(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let kebab = model.kebab_name();
    let proxy_import = relative_import(
        &config.ui_dir(pascal),
        &config.routes_dir.join(&kebab).join("routes.ts"),
    );

    let body = format!(
        r#"import {{ useState }} from "react";
import {{ useNavigate }} from "react-router-dom";
import {{ create{pascal} }} from "{proxy_import}";
import {{ {pascal}Form }} from "./form";

export function {pascal}CreatePage() {{
  const navigate = useNavigate();
  const [error, setError] = useState<string | null>(null);

  const handleSubmit = async (values: Record<string, unknown>) => {{
    const result = await create{pascal}(values);
    if (result.status === 201) {{
      navigate("/{kebab}");
    }} else {{
      setError((result.body as {{ error: string }}).error);
    }}
  }};

  return (
    <section>
      <h1>New {pascal}</h1>
      {{error !== null && <p role="alert">{{error}}</p>}}
      <{pascal}Form onSubmit={{handleSubmit}} submitLabel="Create" />
    </section>
  );
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}

pub fn edit_page(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let kebab = model.kebab_name();
    let proxy_import = relative_import(
        &config.ui_dir(pascal),
        &config.routes_dir.join(&kebab).join("routes.ts"),
    );

    let body = format!(
        r#"import {{ useEffect, useState }} from "react";
import {{ useNavigate, useParams }} from "react-router-dom";
import {{ get{pascal}, update{pascal} }} from "{proxy_import}";
import {{ {pascal}Form }} from "./form";

export function {pascal}EditPage() {{
  const {{ id }} = useParams<{{ id: string }}>();
  const navigate = useNavigate();
  const [initial, setInitial] = useState<Record<string, unknown> | null>(null);
  const [error, setError] = useState<string | null>(null);

  useEffect(() => {{
    if (id === undefined) {{
      return;
    }}
    get{pascal}(id).then((result) => {{
      if (result.status === 200) {{
        setInitial(result.body as Record<string, unknown>);
      }} else {{
        setError((result.body as {{ error: string }}).error);
      }}
    }});
  }}, [id]);

  const handleSubmit = async (values: Record<string, unknown>) => {{
    if (id === undefined) {{
      return;
    }}
    const result = await update{pascal}(id, values);
    if (result.status === 200) {{
      navigate(`/{kebab}/${{id}}`);
    }} else {{
      setError((result.body as {{ error: string }}).error);
    }}
  }};

  if (error !== null) {{
    return <p role="alert">{{error}}</p>;
  }}
  if (initial === null) {{
    return <p>Loading…</p>;
  }}

  return (
    <section>
      <h1>Edit {pascal}</h1>
      <{pascal}Form initial={{initial}} onSubmit={{handleSubmit}} submitLabel="Save" />
    </section>
  );
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}
