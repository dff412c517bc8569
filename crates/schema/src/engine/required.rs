use paramcast_validator::library::is_blank;
use paramcast_validator::{Change, Changeset, ErrorKind, FieldError};

use crate::spec::CastSpec;

/// Flag every required name whose effective value is absent or blank.
///
/// Runs after casting and embed resolution. A field whose raw value was
/// non-blank but failed to cast keeps only its cast error; a blank raw value
/// that also failed to cast carries both.
pub(super) fn check(spec: &CastSpec<'_>, changeset: &mut Changeset) {
    for name in &spec.required {
        let blank = match changeset.get_change(name) {
            Some(Change::One(_)) => false,
            Some(Change::Many(children)) => children.is_empty(),
            _ => changeset.get_field(name).is_none_or(is_blank),
        };
        if !blank || uncastable(changeset, name) {
            continue;
        }
        let error = if changeset.has_param(name) {
            FieldError::blank(name.as_str())
        } else {
            FieldError::missing(name.as_str())
        };
        changeset.push_error(error);
    }
}

fn uncastable(changeset: &Changeset, name: &str) -> bool {
    let raw_present = changeset
        .params()
        .get(name)
        .is_some_and(|raw| !is_blank(raw));
    raw_present && changeset.errors_on(name).any(|e| e.kind == ErrorKind::Cast)
}
