//! Shared types used across layers.

mod field_update;

pub use field_update::{double_option, FieldUpdate};
