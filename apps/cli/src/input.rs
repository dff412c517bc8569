//! Reading definition and input files.

use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use paramcast_schema::{Module, ModuleDefinition, Params};

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load a module definition, choosing the parser by file extension.
pub fn load_module(path: &Path) -> Result<Module> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading schema {}", path.display()))?;
    let definition = if is_json(path) {
        ModuleDefinition::from_json_str(&source)
    } else {
        ModuleDefinition::from_yaml_str(&source)
    }
    .with_context(|| format!("loading schema {}", path.display()))?;

    tracing::debug!(module = %definition.name, actions = definition.schemas.len(), "schema loaded");
    Ok(definition.into_module())
}

/// Read input params from a file, or from stdin when `path` is `-` or
/// absent and `stdin_fallback` is set.
pub fn read_params(path: Option<&Path>, stdin_fallback: bool) -> Result<Params> {
    let (source, name) = match path {
        Some(p) if p != Path::new("-") => (
            std::fs::read_to_string(p).with_context(|| format!("reading input {}", p.display()))?,
            p.display().to_string(),
        ),
        Some(_) => (read_stdin()?, "stdin".to_owned()),
        None if stdin_fallback => (read_stdin()?, "stdin".to_owned()),
        None => return Ok(Params::new()),
    };

    let value = parse_input(&source, path.filter(|p| *p != Path::new("-")))
        .with_context(|| format!("parsing input from {name}"))?;
    match Params::from_json(value) {
        Some(params) => Ok(params),
        None => bail!("input from {name} is not an object"),
    }
}

fn parse_input(source: &str, path: Option<&Path>) -> Result<Value> {
    if path.is_none_or(is_json) {
        Ok(serde_json::from_str(source)?)
    } else {
        Ok(serde_yaml::from_str(source)?)
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}
