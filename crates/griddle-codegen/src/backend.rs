//! Backend CRUD generator: one serverless-handler file per model with five
//! routed operations over the document store.
//!
//! Semantics baked into the emitted handlers:
//! - create auto-populates `id` (when absent) and both timestamps; client
//!   supplied `createdAt` / `updatedAt` are overwritten, not rejected
//! - update re-reads the target first (missing id is a 404, distinct from
//!   a validation 400), carries the original `createdAt` forward, and
//!   refreshes `updatedAt`
//! - every operation validates its effective payload against the model's
//!   schema before persisting; validation failure, not-found, and internal
//!   failure are three distinct structured results

use crate::{schema_import, GENERATED_HEADER};
use griddle_core::{ModelDescriptor, TargetConfig};

pub fn generate(model: &ModelDescriptor, config: &TargetConfig) -> String {
    let camel = model.camel_name();
    let schema = &model.schema_ident;
    let import = schema_import(&config.functions_dir, &config.schemas_dir, &model.model_name);
    let collection = model.collection_route();
    let item = format!("/{camel}/:id");

    let body = format!(
        r#"import {{ registerRoute }} from "../lib/router";
import {{ getContainer }} from "../lib/store";
import {{ {schema} }} from "{import}";

const container = getContainer("{camel}");

const validationFailed = (issues: unknown) => ({{
  status: 400,
  body: {{ error: "ValidationFailed", issues }},
}});

const notFound = (id: string) => ({{
  status: 404,
  body: {{ error: "NotFound", id }},
}});

const internalError = (detail: string) => ({{
  status: 500,
  body: {{ error: "Internal", detail }},
}});

// GET {collection}
registerRoute("GET", "{collection}", async () => {{
  try {{
    const items = await container.list();
    return {{ status: 200, body: items }};
  }} catch (err) {{
    return internalError(String(err));
  }}
}});

// GET {collection}/:id
registerRoute("GET", "{item}", async ({{ params }}) => {{
  try {{
    const record = await container.read(params.id);
    if (record === undefined) {{
      return notFound(params.id);
    }}
    return {{ status: 200, body: record }};
  }} catch (err) {{
    return internalError(String(err));
  }}
}});

// POST {collection}
registerRoute("POST", "{collection}", async ({{ body }}) => {{
  try {{
    const now = new Date().toISOString();
    const record = {{
      ...(body as Record<string, unknown>),
      id: (body as Record<string, unknown>)?.id ?? crypto.randomUUID(),
      createdAt: now,
      updatedAt: now,
    }};
    const parsed = {schema}.safeParse(record);
    if (!parsed.success) {{
      return validationFailed(parsed.error.issues);
    }}
    await container.upsert(parsed.data);
    return {{ status: 201, body: parsed.data }};
  }} catch (err) {{
    return internalError(String(err));
  }}
}});

// PUT {collection}/:id
registerRoute("PUT", "{item}", async ({{ params, body }}) => {{
  try {{
    const existing = await container.read(params.id);
    if (existing === undefined) {{
      return notFound(params.id);
    }}
    const record = {{
      ...existing,
      ...(body as Record<string, unknown>),
      id: params.id,
      createdAt: existing.createdAt,
      updatedAt: new Date().toISOString(),
    }};
    const parsed = {schema}.safeParse(record);
    if (!parsed.success) {{
      return validationFailed(parsed.error.issues);
    }}
    await container.upsert(parsed.data);
    return {{ status: 200, body: parsed.data }};
  }} catch (err) {{
    return internalError(String(err));
  }}
}});

// DELETE {collection}/:id
registerRoute("DELETE", "{item}", async ({{ params }}) => {{
  try {{
    const existing = await container.read(params.id);
    if (existing === undefined) {{
      return notFound(params.id);
    }}
    await container.remove(params.id);
    return {{ status: 204, body: null }};
  }} catch (err) {{
    return internalError(String(err));
  }}
}});
"#
    );
    format!("{GENERATED_HEADER}{body}")
}
