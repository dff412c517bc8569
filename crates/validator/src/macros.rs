//! The `validator!` macro: one declaration produces the struct, its
//! `Validate` impl and a factory function.
//!
//! ```rust,ignore
//! validator! {
//!     pub Accepted for serde_json::Value;
//!     rule(input) { input == &serde_json::Value::Bool(true) }
//!     error(input) { ValidationError::acceptance() }
//!     fn accepted();
//! }
//!
//! validator! {
//!     pub OneOf { allowed: Vec<serde_json::Value> } for serde_json::Value;
//!     rule(self, input) { self.allowed.contains(input) }
//!     error(self, input) { ValidationError::inclusion(&self.allowed) }
//!     fn one_of(allowed: Vec<serde_json::Value>);
//! }
//! ```

/// Declares a value-level validator.
///
/// Three shapes are accepted: a unit struct, a struct whose `new` takes
/// every field, and a struct with a fallible hand-written `new`. Each
/// ends with the factory function to generate.
#[macro_export]
macro_rules! validator {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name;

        $crate::validator!(@impl $name, $input, (&self, $inp) $rule, $einp $err);

        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        $crate::validator!(@impl $name, $input, (&$self_, $inp) $rule, $einp $err);

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) -> $ety:ty $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?) -> $efty:ty;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            pub fn new($($narg: $naty),*) -> ::std::result::Result<Self, $ety> $new_body
        }

        $crate::validator!(@impl $name, $input, (&$self_, $inp) $rule, $einp $err);

        $vis fn $factory($($farg: $faty),*) -> ::std::result::Result<$name, $efty> {
            $name::new($($farg),*)
        }
    };

    (@impl $name:ident, $input:ty, (&$recv:ident, $inp:ident) $rule:block, $einp:ident $err:block) => {
        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(
                &$recv,
                $inp: &Self::Input,
            ) -> ::std::result::Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    Ok(())
                } else {
                    let $einp = $inp;
                    Err($err)
                }
            }
        }
    };
}
