use paramcast_validator::Changeset;

use super::Context;
use crate::error::Error;
use crate::spec::CastSpec;

/// Run each field's bound validator in declaration order.
///
/// Resolution is library first, then the module's own functions, by name and
/// arity.
pub(super) fn run_validators(
    cx: &Context<'_>,
    spec: &CastSpec<'_>,
    mut changeset: Changeset,
) -> Result<Changeset, Error> {
    for (field, validator) in &spec.validators {
        let arity = validator.arity();
        let function = cx
            .library
            .lookup(&validator.name, arity)
            .or_else(|| cx.functions.validator(&validator.name, arity))
            .ok_or_else(|| {
                tracing::warn!(
                    module = cx.module,
                    name = %validator.name,
                    arity,
                    "unresolved validator"
                );
                Error::UnknownValidator {
                    module: cx.module.to_owned(),
                    name: validator.name.clone(),
                    arity,
                }
            })?;

        let args = validator.args();
        changeset = function(changeset, field.as_str(), args.as_slice()).map_err(|source| {
            tracing::warn!(
                module = cx.module,
                name = %validator.name,
                %field,
                %source,
                "validator failed"
            );
            Error::Function {
                module: cx.module.to_owned(),
                function: validator.name.clone(),
                source,
            }
        })?;
    }
    Ok(changeset)
}
