//! Integration tests for paramcast-validator.

mod changesets;
mod properties;
