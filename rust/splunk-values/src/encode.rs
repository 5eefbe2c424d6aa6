//! The struct-to-form encoder.
//!
//! [`encode`] walks a value and flattens it into [`FormValues`]:
//!
//! - struct fields become `parent.name` keys, in declaration order, with the
//!   options of their `#[values("...")]` tag applied;
//! - anonymized fields add no key segment;
//! - lists repeat their key once per item;
//! - maps become `key.entry` keys, unless they bring a [`KeyPolicy`];
//! - values implementing [`EncodeValues`] write their own pairs.
//!
//! ```rust
//! use splunk_values::{Explicit, Strings, Values, encode};
//!
//! #[derive(Values)]
//! struct Role {
//!     #[values(",omitempty")]
//!     pub capabilities: Strings,
//!     #[values("srchJobsQuota,omitempty")]
//!     pub search_jobs_quota: Explicit<i64>,
//! }
//!
//! let role = Role {
//!     capabilities: Strings::cleared(),
//!     search_jobs_quota: Explicit::new(0),
//! };
//!
//! let values = encode(&role).unwrap();
//! assert_eq!(values.get("capabilities"), Some(""));
//! assert_eq!(values.get("srchJobsQuota"), Some("0"));
//! ```

use tracing::{debug, trace};

use crate::{FieldConfig, Fields, FormValues, Kind, Value, ValuesError, join_key};

/// Encode a struct, map or self-encoding value into form pairs.
///
/// A list is accepted at the top level only when every item is a struct or
/// encodes itself; scalars have no key to live under and are rejected with
/// [`ValuesError::InvalidInput`].
pub fn encode<V: Value + ?Sized>(value: &V) -> Result<FormValues, ValuesError> {
    let mut values = FormValues::new();

    match value.kind() {
        Kind::Struct(fields) => {
            debug!(type_name = fields.type_name(), "Encoding struct");
            encode_fields("", fields, &mut values)?;
        }
        Kind::Map(_) | Kind::Custom(_) | Kind::Nothing => encode_value("", value, &mut values)?,
        Kind::List(items) => {
            for (index, item) in items.into_iter().enumerate() {
                match item.kind() {
                    Kind::Struct(fields) => encode_fields("", fields, &mut values)?,
                    Kind::Custom(custom) => custom.encode_values("", &mut values)?,
                    _ => {
                        return Err(ValuesError::InvalidInput(format!(
                            "list item {index} is neither a struct nor self-encoding; \
                             it has no key at the top level"
                        )));
                    }
                }
            }
        }
        Kind::Scalar(scalar) => {
            return Err(ValuesError::InvalidInput(format!(
                "cannot encode the scalar \"{scalar}\" without a key"
            )));
        }
        Kind::Unsupported(type_name) => {
            return Err(ValuesError::UnsupportedFieldType {
                field: String::new(),
                type_name,
            });
        }
    }

    trace!(keys = values.len(), "Encoded form values");
    Ok(values)
}

/// Encode `value` at `key`, appending to `values`.
///
/// This is the entry point for [`EncodeValues`](crate::EncodeValues)
/// implementations that wrap another value.
pub fn encode_value<V: Value + ?Sized>(
    key: &str,
    value: &V,
    values: &mut FormValues,
) -> Result<(), ValuesError> {
    match value.kind() {
        Kind::Nothing => Ok(()),
        Kind::Scalar(scalar) => {
            values.add(key, scalar);
            Ok(())
        }
        Kind::Custom(custom) => custom.encode_values(key, values),
        Kind::Struct(fields) => encode_fields(key, fields, values),
        Kind::Map(entries) => {
            let policy = value.key_policy();
            for (entry, item) in entries {
                let entry_key = match policy {
                    Some(policy) => policy.entry_key(key, &entry),
                    None => join_key(key, &entry),
                };
                encode_value(&entry_key, item, values)?;
            }
            Ok(())
        }
        Kind::List(items) => {
            for item in items {
                match item.kind() {
                    Kind::Nothing => {}
                    Kind::Scalar(scalar) => values.add(key, scalar),
                    Kind::Custom(custom) => custom.encode_values(key, values)?,
                    Kind::Struct(_) => return Err(unsupported(key, "a list of structs")),
                    Kind::List(_) => return Err(unsupported(key, "a list of lists")),
                    Kind::Map(_) => return Err(unsupported(key, "a list of maps")),
                    Kind::Unsupported(type_name) => return Err(unsupported(key, type_name)),
                }
            }
            Ok(())
        }
        Kind::Unsupported(type_name) => Err(unsupported(key, type_name)),
    }
}

/// Encode the exported fields of a struct under `parent`.
pub fn encode_fields(
    parent: &str,
    fields: &dyn Fields,
    values: &mut FormValues,
) -> Result<(), ValuesError> {
    for field in fields.fields() {
        if !field.exported {
            continue;
        }

        let config = FieldConfig::parse(field.name, field.tag)?;

        if config.omit_always {
            continue;
        }

        if config.omit_empty && field.value.is_empty() {
            trace!(field = field.name, "Omitting empty field");
            continue;
        }

        if config.anonymize {
            encode_anonymized(parent, field.name, field.value, values)?;
            continue;
        }

        let key = match field.value.key_policy() {
            Some(policy) => policy.field_key(parent, &config.name),
            None => join_key(parent, &config.name),
        };

        encode_value(&key, field.value, values)?;
    }

    Ok(())
}

// Anonymized members land at the parent's level, so only values that have
// members of their own can be anonymized.
fn encode_anonymized(
    parent: &str,
    field: &str,
    value: &dyn Value,
    values: &mut FormValues,
) -> Result<(), ValuesError> {
    match value.kind() {
        Kind::Struct(_) | Kind::Map(_) | Kind::Custom(_) | Kind::Nothing => {
            encode_value(parent, value, values)
        }
        Kind::Scalar(_) | Kind::List(_) => Err(ValuesError::InvalidInput(format!(
            "field '{field}' is anonymized but is not a struct, map or self-encoding value"
        ))),
        Kind::Unsupported(type_name) => Err(unsupported(&join_key(parent, field), type_name)),
    }
}

fn unsupported(key: &str, type_name: &'static str) -> ValuesError {
    ValuesError::UnsupportedFieldType {
        field: key.to_string(),
        type_name,
    }
}
