//! The validation pipeline for one schema level.
//!
//! cast → embeds → required → validators → callback
//!
//! Each embed instance re-enters [`run`] with its own spec and changeset.
//! Ordinary failures accumulate on the changeset; only defects return `Err`.

mod apply;
mod callback;
mod cast;
mod dispatch;
mod embed;
mod required;

use paramcast_validator::{Changeset, Params, ValidatorLibrary};

use crate::config::EngineConfig;
use crate::error::Error;
use crate::module::FunctionTable;
use crate::schema::Schema;
use crate::spec::CastSpec;

pub(crate) use apply::apply;

/// Everything a pipeline run reads besides the schema and input.
pub(crate) struct Context<'m> {
    pub module: &'m str,
    pub library: &'m dyn ValidatorLibrary,
    pub functions: &'m FunctionTable,
    pub config: &'m EngineConfig,
}

pub(crate) fn run(cx: &Context<'_>, schema: &Schema, input: &Params) -> Result<Changeset, Error> {
    let spec = CastSpec::compile(schema, input);

    let mut changeset = cast::cast_input(cx, &spec, input);
    embed::resolve(cx, &spec, input, &mut changeset)?;
    required::check(&spec, &mut changeset);
    let changeset = dispatch::run_validators(cx, &spec, changeset)?;
    callback::invoke(cx, schema, changeset, input)
}
