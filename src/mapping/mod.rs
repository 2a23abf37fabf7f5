// src/mapping/mod.rs
//! Property mapping between Notion pages and flat records.
//!
//! Reading flattens typed property values into optional strings; writing
//! turns a partial record into a property payload that only mentions the
//! fields the caller sent.

pub mod fields;
mod patch;
mod reader;

pub use fields::{FieldKind, FieldSpec, LEAD_FIELDS, SALE_FIELDS};
pub use patch::{lead_creation_payload, property_json, PropertyPatch};
pub use reader::{property_text, PropertyReader};

/// Separator between values of a multi-select carried as one string.
pub const MULTI_VALUE_SEPARATOR: &str = ", ";

/// Splits a multi-select string on `", "`, trimming each token and
/// dropping empty ones.
pub fn split_multi(value: &str) -> Vec<String> {
    value
        .split(MULTI_VALUE_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins option names into the single-string form.
pub fn join_multi<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(MULTI_VALUE_SEPARATOR)
}
