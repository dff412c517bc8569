use std::borrow::Cow;

use paramcast_validator::{Changeset, ErrorKind, FieldError, Params};

use super::Context;
use crate::config::UnknownKeys;
use crate::spec::CastSpec;

/// Record permitted raw input and cast every plain field present in it.
pub(super) fn cast_input(cx: &Context<'_>, spec: &CastSpec<'_>, input: &Params) -> Changeset {
    let mut changeset = Changeset::new(spec.defaults.clone(), spec.types.clone());

    for name in &spec.permitted {
        let Some(raw) = input.get(name) else {
            continue;
        };
        changeset.put_param(name.as_str(), raw.clone());

        if spec.embeds.contains_key(name) {
            continue;
        }
        let ty = &spec.types[name];

        let value = cx.config.normalize(raw);
        match cx.library.cast(ty, &value) {
            Ok(cast) => {
                tracing::trace!(field = %name, %ty, "cast");
                changeset.put_change(name.as_str(), cast);
            }
            Err(error) => {
                tracing::trace!(field = %name, %error, "cast failed");
                changeset.push_error(FieldError::cast(name.as_str(), ty));
            }
        }
    }

    if cx.config.unknown_keys == UnknownKeys::Reject {
        reject_unknown(spec, input, &mut changeset);
    }
    changeset
}

fn reject_unknown(spec: &CastSpec<'_>, input: &Params, changeset: &mut Changeset) {
    let mut seen: Vec<&str> = Vec::new();
    for key in input.keys() {
        let name = key.name();
        if spec.permits(name) || seen.contains(&name) {
            continue;
        }
        seen.push(name);
        changeset.push_error(FieldError::new(
            name,
            "is unknown",
            ErrorKind::Validation {
                validator: Cow::Borrowed("unknown_key"),
            },
        ));
    }
}
