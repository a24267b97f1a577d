//! Proxy (backend-for-frontend) generator: a thin pass-through module
//! duplicating the five CRUD operations. Input is validated before
//! forwarding, output is validated after receiving, backend error payloads
//! are normalized into one shape, and HTTP status codes are forwarded
//! unchanged.

use crate::{schema_import, GENERATED_HEADER};
use griddle_core::{ident, ModelDescriptor, TargetConfig};

pub fn generate(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let pascal = &model.model_name;
    let camel = model.camel_name();
    let schema = &model.schema_ident;
    let api_base = &config.api_base;
    let from_dir = config.routes_dir.join(ident::kebab_case(pascal));
    let import = schema_import(&from_dir, &config.schemas_dir, pascal);

    // Platform-managed fields are accepted but optional on input; the
    // backend overwrites them anyway.
    let reserved: Vec<&str> = model
        .fields
        .iter()
        .filter(|f| f.is_reserved())
        .map(|f| f.name.as_str())
        .collect();
    let input_schema = if reserved.is_empty() {
        schema.clone()
    } else {
        let mask = reserved
            .iter()
            .map(|name| format!("{name}: true"))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{schema}.partial({{ {mask} }})")
    };

    let body = format!(
        r#"import {{ z }} from "zod";
import {{ {schema} }} from "{import}";

const BASE = "{api_base}/{camel}";

const inputSchema = {input_schema};

export interface ProxyResult<T> {{
  status: number;
  body: T | {{ error: string; detail?: unknown }};
}}

const normalizeError = async (res: Response): Promise<ProxyResult<never>> => {{
  let payload: unknown = null;
  try {{
    payload = await res.json();
  }} catch {{
    payload = null;
  }}
  const error =
    typeof payload === "object" && payload !== null && "error" in payload
      ? String((payload as {{ error: unknown }}).error)
      : res.statusText;
  return {{ status: res.status, body: {{ error, detail: payload }} }};
}};

const echoValidated = async (res: Response, shape: z.ZodTypeAny): Promise<ProxyResult<unknown>> => {{
  if (res.status === 204) {{
    return {{ status: 204, body: null as never }};
  }}
  const payload = await res.json();
  const parsed = shape.safeParse(payload);
  if (!parsed.success) {{
    return {{ status: 502, body: {{ error: "InvalidUpstreamPayload", detail: parsed.error.issues }} }};
  }}
  return {{ status: res.status, body: parsed.data }};
}};

export async function list{pascal}(): Promise<ProxyResult<unknown>> {{
  const res = await fetch(BASE);
  if (!res.ok) {{
    return normalizeError(res);
  }}
  return echoValidated(res, z.array({schema}));
}}

export async function get{pascal}(id: string): Promise<ProxyResult<unknown>> {{
  const res = await fetch(`${{BASE}}/${{id}}`);
  if (!res.ok) {{
    return normalizeError(res);
  }}
  return echoValidated(res, {schema});
}}

export async function create{pascal}(input: unknown): Promise<ProxyResult<unknown>> {{
  const parsed = inputSchema.safeParse(input);
  if (!parsed.success) {{
    return {{ status: 400, body: {{ error: "ValidationFailed", detail: parsed.error.issues }} }};
  }}
  const res = await fetch(BASE, {{
    method: "POST",
    headers: {{ "content-type": "application/json" }},
    body: JSON.stringify(parsed.data),
  }});
  if (!res.ok) {{
    return normalizeError(res);
  }}
  return echoValidated(res, {schema});
}}

export async function update{pascal}(id: string, input: unknown): Promise<ProxyResult<unknown>> {{
  const parsed = inputSchema.safeParse(input);
  if (!parsed.success) {{
    return {{ status: 400, body: {{ error: "ValidationFailed", detail: parsed.error.issues }} }};
  }}
  const res = await fetch(`${{BASE}}/${{id}}`, {{
    method: "PUT",
    headers: {{ "content-type": "application/json" }},
    body: JSON.stringify(parsed.data),
  }});
  if (!res.ok) {{
    return normalizeError(res);
  }}
  return echoValidated(res, {schema});
}}

export async function delete{pascal}(id: string): Promise<ProxyResult<null>> {{
  const res = await fetch(`${{BASE}}/${{id}}`, {{ method: "DELETE" }});
  if (!res.ok) {{
    return normalizeError(res);
  }}
  return {{ status: res.status, body: null }};
}}
"#
    );
    format!("{GENERATED_HEADER}{body}")
}
