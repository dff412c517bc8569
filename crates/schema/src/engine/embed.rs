use paramcast_validator::{Changeset, FieldError, FieldType, Params};
use serde_json::Value;

use super::{Context, run};
use crate::error::Error;
use crate::field::Cardinality;
use crate::spec::{CastSpec, EmbedBinding};

/// Run the pipeline for every embed present in the input.
pub(super) fn resolve(
    cx: &Context<'_>,
    spec: &CastSpec<'_>,
    input: &Params,
    changeset: &mut Changeset,
) -> Result<(), Error> {
    for (name, binding) in &spec.embeds {
        let Some(raw) = input.get(name) else {
            continue;
        };
        let raw = cx.config.normalize(raw);
        match binding.cardinality {
            Cardinality::One => resolve_one(cx, name, *binding, &raw, changeset)?,
            Cardinality::Many => resolve_many(cx, name, *binding, &raw, changeset)?,
        }
    }
    Ok(())
}

fn resolve_one(
    cx: &Context<'_>,
    name: &str,
    binding: EmbedBinding<'_>,
    raw: &Value,
    changeset: &mut Changeset,
) -> Result<(), Error> {
    if raw.is_null() {
        return Ok(());
    }
    match Params::from_json_ref(raw) {
        Some(child_input) => {
            let child = run(cx, binding.schema, &child_input)?;
            if !child.is_valid() {
                tracing::debug!(embed = name, "embedded record is invalid");
            }
            changeset.put_embed(name, child);
        }
        None => changeset.push_error(FieldError::cast(name, &FieldType::Map)),
    }
    Ok(())
}

fn resolve_many(
    cx: &Context<'_>,
    name: &str,
    binding: EmbedBinding<'_>,
    raw: &Value,
    changeset: &mut Changeset,
) -> Result<(), Error> {
    let Value::Array(items) = raw else {
        return Ok(());
    };

    let mut children = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let child = match Params::from_json_ref(item) {
            Some(child_input) => run(cx, binding.schema, &child_input)?,
            None => {
                let mut child = Changeset::default();
                child.push_error(FieldError::cast(name, &FieldType::Map));
                child
            }
        };
        if !child.is_valid() {
            tracing::debug!(embed = name, index, "embedded record is invalid");
        }
        children.push(child);
    }
    changeset.put_embeds(name, children);
    Ok(())
}
