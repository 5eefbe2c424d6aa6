#![warn(missing_docs)]

//! Procedural macros for splunk-values.
//!
//! The encoder and the selective projector in `splunk_values` walk structs
//! through a field table instead of runtime reflection. This crate generates
//! that table. Macros are re-exported through `splunk_values` so callers never
//! depend on this crate directly.

use proc_macro::TokenStream;

mod helpers;
mod values;

/// Derive `splunk_values::Fields` and `splunk_values::Value` for a struct with
/// named fields.
///
/// Two field attributes are recognised, both taking a single string literal:
///
/// - `#[values("name,option,...")]` is the encoding tag. It is carried through
///   verbatim and parsed by `splunk_values::FieldConfig` when the struct is
///   first encoded, so a malformed tag is reported with the field name and the
///   raw tag string.
/// - `#[selective("view,...")]` lists the views (for example `create` or
///   `update`) a field belongs to. Fields without it belong to every view.
///   The list is split at commas and whitespace around each view is ignored,
///   so `"create, update"` names both; each view must then match exactly
///   (`"created"` is not `create`).
///
/// ```rust,ignore
/// use splunk_values::{Explicit, Values};
///
/// #[derive(Values)]
/// pub struct IndexContent {
///     #[values("datatype,omitempty")]
///     #[selective("create")]
///     pub data_type: Explicit<String>,
///
///     #[values("maxTotalDataSizeMB,omitempty")]
///     pub max_total_data_size_mb: Explicit<i64>,
/// }
/// ```
///
/// Only `pub` fields are encoded or individually selectable. Private fields
/// stay in the table so that a struct passed through a projection whole keeps
/// them.
#[proc_macro_derive(Values, attributes(values, selective))]
pub fn derive_values(input: TokenStream) -> TokenStream {
    values::derive(input)
}
