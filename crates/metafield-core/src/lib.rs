//! metafield-core: Value normalization and canonical ordering for metadata records.
//!
//! This crate provides:
//! - `FieldValue`: Typed scalar-or-list values produced from raw command-line text
//! - `CANONICAL_ORDER`: The fixed field order every written record follows
//! - `Record`: An ordered field map with update, renormalize and reorder operations

pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use error::{CoreError, Result};
pub use record::{FieldUpdate, Record};
pub use schema::{
    canonical_key_order, canonical_position, is_canonical, validate_field, CANONICAL_ORDER,
};
pub use value::{coerce_scalar, normalize, renormalize, FieldValue, RawContent, Scalar};
