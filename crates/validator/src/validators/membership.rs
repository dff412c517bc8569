//! Membership validators: inclusion, exclusion and subset.
//!
//! Values are compared after casting, so `json!(1)` and `json!(1.0)` are
//! different members; declare the allowed list in the field's cast type.

use serde_json::Value;

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a value is one of an allowed list.
    ///
    /// # Examples
    ///
    /// ```
    /// use paramcast_validator::validators::inclusion;
    /// use paramcast_validator::foundation::Validate;
    /// use serde_json::json;
    ///
    /// let validator = inclusion(vec![json!("mobile"), json!("laptop")]);
    /// assert!(validator.validate(&json!("laptop")).is_ok());
    /// assert!(validator.validate(&json!("desktop")).is_err());
    /// ```
    #[derive(PartialEq)]
    pub Inclusion { allowed: Vec<Value> } for Value;
    rule(self, input) { self.allowed.contains(input) }
    error(self, input) { ValidationError::inclusion(&self.allowed) }
    fn inclusion(allowed: Vec<Value>);
}

crate::validator! {
    /// Validates that a value is not one of a reserved list.
    #[derive(PartialEq)]
    pub Exclusion { reserved: Vec<Value> } for Value;
    rule(self, input) { !self.reserved.contains(input) }
    error(self, input) { ValidationError::exclusion(&self.reserved) }
    fn exclusion(reserved: Vec<Value>);
}

crate::validator! {
    /// Validates that every element of a list is in an allowed list.
    ///
    /// A non-list value is never a subset.
    #[derive(PartialEq)]
    pub Subset { allowed: Vec<Value> } for Value;
    rule(self, input) {
        input
            .as_array()
            .is_some_and(|items| items.iter().all(|item| self.allowed.contains(item)))
    }
    error(self, input) { ValidationError::subset(&self.allowed) }
    fn subset(allowed: Vec<Value>);
}
