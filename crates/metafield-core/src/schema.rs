//! Canonical metadata field list.
//!
//! Every record written by metafield lists the recognized fields first, in the
//! order below, followed by any other fields in their original order.

use crate::error::{CoreError, Result};

/// Recognized metadata fields, in output order.
pub const CANONICAL_ORDER: [&str; 42] = [
    "Identifier",
    "Slug",
    "Status",
    "Title",
    "Description",
    "Deployment",
    "Source",
    "Source Type",
    "Task",
    "Subtask",
    "Input",
    "Input Dimension",
    "Output",
    "Output Dimension",
    "Output Consistency",
    "Interpretation",
    "Tag",
    "Biomedical Area",
    "Target Organism",
    "GitHub",
    "Publication Type",
    "Publication Year",
    "Publication",
    "Source Code",
    "License",
    "Contributor",
    "Contributor Profile",
    "Incorporation Date",
    "Incorporation Quarter",
    "Incorporation Year",
    "Last Packaging Date",
    "S3",
    "DockerHub",
    "Docker Architecture",
    "Model Size",
    "Environment Size",
    "Image Size",
    "Computational Performance 1",
    "Computational Performance 2",
    "Computational Performance 3",
    "Computational Performance 4",
    "Computational Performance 5",
];

/// Position of a field in the canonical order, if it is recognized.
#[must_use]
pub fn canonical_position(field: &str) -> Option<usize> {
    CANONICAL_ORDER.iter().position(|known| *known == field)
}

/// Whether a field name is recognized (exact, case-sensitive match).
#[must_use]
pub fn is_canonical(field: &str) -> bool {
    canonical_position(field).is_some()
}

/// Check that a field may be updated.
///
/// # Errors
/// Returns `CoreError::UnsupportedField` if the name is not in `CANONICAL_ORDER`.
pub fn validate_field(field: &str) -> Result<()> {
    if is_canonical(field) {
        Ok(())
    } else {
        Err(CoreError::UnsupportedField(field.to_string()))
    }
}

/// Order keys canonically: recognized keys by canonical position, then the
/// remaining keys in the order they were given.
pub fn canonical_key_order<'a, I>(keys: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let keys: Vec<&str> = keys.into_iter().collect();

    let mut ordered: Vec<&str> = CANONICAL_ORDER
        .iter()
        .filter_map(|known| keys.iter().copied().find(|k| k == known))
        .collect();
    ordered.extend(keys.iter().copied().filter(|k| !is_canonical(k)));
    ordered
}
