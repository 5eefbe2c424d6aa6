//! Splunk Values - Explicit Values and Form Encoding for REST Entries
//!
//! A REST management API of the Splunk kind accepts writes as
//! `application/x-www-form-urlencoded` pairs and treats an absent key as
//! "leave unchanged". Sending the right keys therefore depends on knowing,
//! per field, whether it was never set, set to zero on purpose, or set to a
//! real value. This crate carries that distinction from typed Rust structs to
//! wire pairs.
//!
//! # Architecture
//!
//! 1. **[`Explicit<T>`]**: a value that remembers whether it was set, so
//!    `false`, `0` or `""` can be sent deliberately while untouched fields are
//!    left out.
//! 2. **[`encode`]**: walks a struct through the field table generated by
//!    `#[derive(Values)]` and flattens it into ordered [`FormValues`], nesting
//!    structs under dotted keys and honoring each field's
//!    `#[values("name,option,...")]` tag.
//! 3. **[`project`]**: reduces a struct to the fields of one view (`create`,
//!    `update`) as declared by `#[selective("...")]`, before encoding.
//! 4. **[`NamedParameterGroups`]**: the dotted codec for toggleable named
//!    sub-objects such as saved-search actions.
//!
//! # Basic Usage
//!
//! ```rust
//! use splunk_values::{Explicit, Strings, Values, encode, project};
//!
//! #[derive(Values, Default)]
//! struct User {
//!     #[values("name")]
//!     #[selective("create")]
//!     pub title: String,
//!     #[values("realname,omitempty")]
//!     pub real_name: Explicit<String>,
//!     #[values(",omitempty")]
//!     pub roles: Strings,
//! }
//!
//! let mut user = User {
//!     title: "alice".into(),
//!     ..Default::default()
//! };
//! user.real_name.set(String::new());
//!
//! // The title is create-only; the cleared real name is sent, the untouched
//! // roles are not.
//! let values = encode(&project(&user, "update")).unwrap();
//! assert_eq!(values.to_query_string(), "realname=");
//! ```
#![warn(missing_docs)]

// Generated code names this crate by its absolute path.
extern crate self as splunk_values;

mod clearable;
mod content;
mod encode;
mod error;
mod explicit;
mod form;
mod params;
mod selective;
mod tag;
mod value;

pub use clearable::{ClearableList, Strings};
pub use content::content_of;
pub use encode::{encode, encode_fields, encode_value};
pub use error::ValuesError;
pub use explicit::{Explicit, Zero};
pub use form::FormValues;
pub use params::{
    NamedParameterGroup, NamedParameterGroups, ParameterMap, decompose, parameter_map_from_json,
    status_bool,
};
pub use selective::{ProjectedField, Projection, project, project_value};
pub use tag::FieldConfig;
pub use value::{EncodeValues, Field, Fields, Kind, KeyPolicy, Value, join_key};

pub use splunk_values_macros::Values;
