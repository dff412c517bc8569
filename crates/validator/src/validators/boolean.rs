//! Boolean validators

use serde_json::Value;

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a value is `true`, e.g. a terms-of-service checkbox.
    ///
    /// Runs after casting, so a `boolean` field declared as `"true"` in the
    /// input already arrives here as `true`.
    pub Acceptance for Value;
    rule(input) { *input == Value::Bool(true) }
    error(input) { ValidationError::acceptance() }
    fn acceptance();
}
