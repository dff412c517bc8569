use paramcast_validator::{Changeset, Params};

use super::Context;
use crate::error::Error;
use crate::schema::Schema;

/// Hand the changeset to the schema's callback, if it names one.
pub(super) fn invoke(
    cx: &Context<'_>,
    schema: &Schema,
    changeset: Changeset,
    input: &Params,
) -> Result<Changeset, Error> {
    let Some(name) = schema.callback_name() else {
        return Ok(changeset);
    };
    let Some(callback) = cx.functions.callback(name) else {
        tracing::warn!(module = cx.module, name, "unresolved callback");
        return Err(Error::UnknownCallback {
            module: cx.module.to_owned(),
            name: name.to_owned(),
        });
    };
    callback(changeset, input).map_err(|source| {
        tracing::warn!(module = cx.module, name, %source, "callback failed");
        Error::Function {
            module: cx.module.to_owned(),
            function: name.to_owned(),
            source,
        }
    })
}
