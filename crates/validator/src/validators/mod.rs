//! Built-in value-level validators
//!
//! Each validator checks one already-cast value. The named, changeset-level
//! versions used by schemas live in [`library`](crate::library).
//!
//! | validator        | input            | message                 |
//! |------------------|------------------|-------------------------|
//! | [`Inclusion`]    | any value        | `is invalid`            |
//! | [`Exclusion`]    | any value        | `is reserved`           |
//! | [`Subset`]       | list             | `has an invalid entry`  |
//! | [`Length`]       | string or list   | `should be at least ..` |
//! | [`Format`]       | string           | `has invalid format`    |
//! | [`NumberBounds`] | number           | `must be greater ..`    |
//! | [`Acceptance`]   | boolean          | `must be accepted`      |

pub mod boolean;
pub mod content;
pub mod length;
pub mod membership;
pub mod number;

pub use boolean::{Acceptance, acceptance};
pub use content::{Format, format};
pub use length::Length;
pub use membership::{Exclusion, Inclusion, Subset, exclusion, inclusion, subset};
pub use number::{Bound, NumberBounds};
