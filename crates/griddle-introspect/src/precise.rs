//! Precise recovery tier: evaluates a self-contained copy of the schema
//! file under an external TypeScript runtime and introspects the resulting
//! runtime type tree.
//!
//! The evaluation unit is the target schema with every locally-imported
//! dependency inlined ahead of it (import/export syntax stripped), plus a
//! footer that walks the schema value's internal type tree and prints a
//! JSON field list to stdout. Textual pattern matching cannot correctly
//! handle arbitrary composition of wrapper combinators; evaluating the
//! value can.

use crate::locate::SchemaSource;
use crate::raw::RawField;
use crate::resolve;
use crate::SchemaIntrospector;
use griddle_core::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sentinel prefixing the descriptor line, so stray output from evaluated
/// schema files cannot corrupt the parse.
const DESCRIPTOR_MARKER: &str = "__GRIDDLE_DESCRIPTOR__";

/// TypeScript runtimes probed in order. The first one answering
/// `--version` wins.
const RUNTIME_CANDIDATES: &[&str] = &["tsx", "bun", "ts-node"];

pub struct PreciseIntrospector {
    runtime: String,
    timeout: Duration,
}

impl PreciseIntrospector {
    /// Capability detection: returns an introspector only when a
    /// TypeScript runtime is present on the host.
    pub fn detect(timeout: Duration) -> Option<Self> {
        for candidate in RUNTIME_CANDIDATES {
            let probe = Command::new(candidate)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            if matches!(probe, Ok(status) if status.success()) {
                debug!(runtime = candidate, "TypeScript runtime found");
                return Some(Self {
                    runtime: (*candidate).to_string(),
                    timeout,
                });
            }
        }
        None
    }

    pub fn runtime_name(&self) -> &str {
        &self.runtime
    }

    fn command_for(&self, unit_path: &Path) -> Command {
        let mut cmd = Command::new(&self.runtime);
        if self.runtime == "bun" {
            cmd.arg("run");
        }
        cmd.arg(unit_path);
        cmd
    }
}

impl SchemaIntrospector for PreciseIntrospector {
    fn recover_fields(&self, source: &SchemaSource) -> Result<Vec<RawField>> {
        let unit = build_eval_unit(source);

        // The unit lives next to the schema file so the project's own
        // module resolution (node_modules lookup) applies to the `zod`
        // import.
        let dir = source.path.parent().unwrap_or(Path::new("."));
        let file = tempfile::Builder::new()
            .prefix(".griddle-eval-")
            .suffix(".ts")
            .tempfile_in(dir)?;
        std::fs::write(file.path(), &unit)?;

        let stdout = run_bounded(self.command_for(file.path()), self.timeout)?;
        parse_descriptor_output(&stdout)
    }
}

/// Run a command, killing it when the wall-clock bound expires. A hang in
/// the evaluated unit must not block the whole invocation.
///
/// Both pipes are drained on background threads while the poll loop runs;
/// a child that fills the OS pipe buffer would otherwise block on write
/// and sit there until the deadline kills it.
fn run_bounded(mut cmd: Command, timeout: Duration) -> Result<String> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| Error::EvalFailed {
            reason: format!("failed to spawn runtime: {err}"),
        })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = stdout.join();
                let _ = stderr.join();
                return Err(Error::EvalFailed {
                    reason: format!("evaluation timed out after {}s", timeout.as_secs()),
                });
            }
            None => std::thread::sleep(Duration::from_millis(25)),
        }
    };

    // The child has exited, so both pipes hit EOF and the drains finish.
    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();
    if !status.success() {
        return Err(Error::EvalFailed {
            reason: format!(
                "runtime exited with {status}: {}",
                stderr.lines().last().unwrap_or("")
            ),
        });
    }
    Ok(stdout)
}

/// Read a pipe to completion on its own thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> std::thread::JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

#[derive(Deserialize)]
struct DescriptorOutput {
    fields: Vec<RawField>,
}

fn parse_descriptor_output(stdout: &str) -> Result<Vec<RawField>> {
    let line = stdout
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix(DESCRIPTOR_MARKER))
        .ok_or_else(|| Error::EvalFailed {
            reason: "evaluator produced no descriptor line".to_string(),
        })?;
    let output: DescriptorOutput = serde_json::from_str(line)?;
    Ok(output.fields)
}

/// Build the isolated evaluation unit: inlined dependencies, stripped
/// target, introspection footer.
pub fn build_eval_unit(source: &SchemaSource) -> String {
    let mut visited = HashSet::new();
    visited.insert(canonical(&source.path));

    let mut unit = String::from("import { z } from \"zod\";\n\n");
    for import in resolve::scan_local_imports(source) {
        inline_dependency(&import.source_path, &mut visited, &mut unit);
    }
    unit.push_str(&strip_module_syntax(&source.text));
    unit.push('\n');
    unit.push_str(&introspection_footer(&source.schema_ident));
    unit
}

/// Inline one dependency file (dependencies-first), at most once per file.
/// The visited set guards self-referential and mutually-recursive schema
/// graphs against infinite recursion.
fn inline_dependency(path: &Path, visited: &mut HashSet<PathBuf>, unit: &mut String) {
    if !visited.insert(canonical(path)) {
        return;
    }
    let Ok(dep) = SchemaSource::load(path) else {
        return;
    };
    for import in resolve::scan_local_imports(&dep) {
        inline_dependency(&import.source_path, visited, unit);
    }
    unit.push_str(&strip_module_syntax(&dep.text));
    unit.push('\n');
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn type_export_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*export\s+(type|interface)\b").unwrap())
}

/// Strip import/export module syntax so concatenated files form one
/// evaluation unit. Type-level exports are dropped entirely; value
/// exports keep their declarations with the `export` keyword removed.
fn strip_module_syntax(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("import ") || trimmed.starts_with("import{") {
            continue;
        }
        if type_export_pattern().is_match(line) {
            continue;
        }
        if trimmed.starts_with("export default") {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("export ") {
            out.push_str(rest);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// JavaScript footer that unwraps the type tree of each field and prints
/// the JSON field list. Wrapper layers (optional / default / nullable /
/// effects / readonly) are stripped iteratively in whatever order they
/// were composed; enum values are read from whichever internal
/// representation the installed library version exposes.
fn introspection_footer(schema_ident: &str) -> String {
    format!(
        r#"
const __griddleUnwrap = (ty) => {{
  let optional = false;
  let array = false;
  for (;;) {{
    const def = ty._def ?? {{}};
    const name = def.typeName ?? ty.constructor?.name ?? "";
    if (name === "ZodOptional" || name === "ZodDefault" || name === "ZodNullable") {{
      if (name !== "ZodNullable") optional = true;
      ty = def.innerType;
    }} else if (name === "ZodEffects") {{
      ty = def.schema;
    }} else if (name === "ZodReadonly" || name === "ZodBranded") {{
      ty = def.innerType ?? def.type;
    }} else if (name === "ZodArray") {{
      array = true;
      ty = def.type ?? def.element;
    }} else {{
      return {{ ty, optional, array }};
    }}
  }}
}};

const __griddleEnumValues = (ty) => {{
  const def = ty._def ?? {{}};
  if (Array.isArray(def.values)) return def.values;
  if (def.entries && typeof def.entries === "object") return Object.keys(def.entries);
  if (Array.isArray(ty.options)) return ty.options;
  return null;
}};

const __griddleShape =
  typeof {ident}.shape === "object" && {ident}.shape !== null
    ? {ident}.shape
    : {ident}._def.shape();

const __griddleFields = Object.entries(__griddleShape).map(([name, ty]) => {{
  const {{ ty: base, optional, array }} = __griddleUnwrap(ty);
  const def = base._def ?? {{}};
  const typeName = def.typeName ?? base.constructor?.name ?? "ZodString";
  const isEnum = typeName === "ZodEnum" || typeName === "ZodNativeEnum";
  return {{
    name,
    type: isEnum ? "ZodString" : typeName,
    optional,
    array,
    enumValues: isEnum ? __griddleEnumValues(base) : null,
  }};
}});

console.log("{marker}" + JSON.stringify({{ fields: __griddleFields }}));
"#,
        ident = schema_ident,
        marker = DESCRIPTOR_MARKER,
    )
}
