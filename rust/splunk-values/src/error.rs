use thiserror::Error;

/// Errors raised while encoding, projecting or decoding entry values.
///
/// Every variant names the field or key it concerns so that a misconfigured
/// struct can be diagnosed from the message alone. Errors caused by a struct's
/// declaration (a malformed tag, an ambiguous content marker) are reported the
/// first time the struct is walked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuesError {
    /// The value has a shape the operation cannot accept, such as a scalar at
    /// the top level of an encode or a non-struct passed to a projection.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// More than one field of a struct is marked as its content.
    #[error("Ambiguous content in '{type_name}': fields {fields:?} are all marked as content")]
    AmbiguousContentSelection {
        /// The struct that was searched.
        type_name: &'static str,
        /// Every field carrying the `content` option.
        fields: Vec<String>,
    },

    /// A field's `#[values("...")]` tag holds an option the parser does not
    /// know.
    #[error("Malformed tag on field '{field}': unknown option '{option}' in \"{tag}\"")]
    MalformedTagConfiguration {
        /// The field carrying the tag.
        field: String,
        /// The raw tag string.
        tag: String,
        /// The offending option token.
        option: String,
    },

    /// A value's kind has no form encoding.
    #[error("Field '{field}' has no form encoding for {type_name}")]
    UnsupportedFieldType {
        /// The key the value was being encoded at.
        field: String,
        /// A description of the offending type.
        type_name: &'static str,
    },

    /// A decoded value is present but does not have the expected shape.
    #[error("Key '{key}' expected {expected}, found {found}")]
    DecodeTypeMismatch {
        /// The key being decoded.
        key: String,
        /// The expected shape.
        expected: &'static str,
        /// The shape that was found.
        found: String,
    },
}
