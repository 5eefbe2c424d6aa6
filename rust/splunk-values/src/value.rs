use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use indexmap::IndexMap;

use crate::{FormValues, ValuesError, Zero};

/// The shape of a value as seen by the encoder.
///
/// This is what runtime reflection would discover about a value; here each
/// type states it through [`Value::kind`].
pub enum Kind<'a> {
    /// A single textual value.
    Scalar(Cow<'a, str>),
    /// An ordered sequence of values, each encoded at the same key.
    List(Vec<&'a dyn Value>),
    /// Named entries, each encoded under its own key.
    Map(Vec<(Cow<'a, str>, &'a dyn Value)>),
    /// A struct with a field table.
    Struct(&'a dyn Fields),
    /// A value that writes its own form pairs.
    Custom(&'a dyn EncodeValues),
    /// No value at all (`None`, markers); encodes nothing.
    Nothing,
    /// A value with no form encoding.
    Unsupported(&'static str),
}

/// A value the encoder and the selective projector can walk.
pub trait Value {
    /// Describe the value's shape.
    fn kind(&self) -> Kind<'_>;

    /// Whether an `omitempty` field holding this value is skipped.
    fn is_empty(&self) -> bool;

    /// The key policy of this value, when it derives keys its own way.
    fn key_policy(&self) -> Option<&dyn KeyPolicy> {
        None
    }
}

/// The field table of a struct, usually generated by `#[derive(Values)]`.
pub trait Fields {
    /// The struct's name, used in error messages.
    fn type_name(&self) -> &'static str;

    /// Every named field in declaration order.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// One entry of a [`Fields`] table.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    /// The field's identifier.
    pub name: &'static str,
    /// The raw `#[values("...")]` tag.
    pub tag: Option<&'static str>,
    /// The raw `#[selective("...")]` view list.
    pub selective: Option<&'static str>,
    /// Whether the field is `pub`.
    pub exported: bool,
    /// The field's value.
    pub value: &'a dyn Value,
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .field("selective", &self.selective)
            .field("exported", &self.exported)
            .finish_non_exhaustive()
    }
}

/// A value that adds itself to a [`FormValues`] instead of being walked
/// structurally.
pub trait EncodeValues {
    /// Add this value's pairs under `key`.
    fn encode_values(&self, key: &str, values: &mut FormValues) -> Result<(), ValuesError>;
}

/// Key derivation for values whose keys do not follow `parent.name`.
pub trait KeyPolicy {
    /// The key of a field holding this value.
    fn field_key(&self, parent: &str, name: &str) -> String {
        join_key(parent, name)
    }

    /// The key of one entry of this (map-shaped) value.
    fn entry_key(&self, key: &str, entry: &str) -> String {
        join_key(key, entry)
    }
}

/// Join a parent key and a child name with a `.`; the top level has no
/// parent.
pub fn join_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        parent.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

macro_rules! scalar_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Value for $ty {
                fn kind(&self) -> Kind<'_> {
                    Kind::Scalar(Cow::Owned(self.to_string()))
                }

                fn is_empty(&self) -> bool {
                    self.is_zero()
                }
            }
        )*
    };
}

scalar_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl Value for String {
    fn kind(&self) -> Kind<'_> {
        Kind::Scalar(Cow::Borrowed(self.as_str()))
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl Value for str {
    fn kind(&self) -> Kind<'_> {
        Kind::Scalar(Cow::Borrowed(self))
    }

    fn is_empty(&self) -> bool {
        str::is_empty(self)
    }
}

impl<T: Value + ?Sized> Value for &T {
    fn kind(&self) -> Kind<'_> {
        (**self).kind()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn key_policy(&self) -> Option<&dyn KeyPolicy> {
        (**self).key_policy()
    }
}

impl<T: Value + ?Sized> Value for Box<T> {
    fn kind(&self) -> Kind<'_> {
        (**self).kind()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn key_policy(&self) -> Option<&dyn KeyPolicy> {
        (**self).key_policy()
    }
}

impl<T: Value> Value for Option<T> {
    fn kind(&self) -> Kind<'_> {
        match self {
            Some(value) => value.kind(),
            None => Kind::Nothing,
        }
    }

    fn is_empty(&self) -> bool {
        self.as_ref().is_none_or(Value::is_empty)
    }

    fn key_policy(&self) -> Option<&dyn KeyPolicy> {
        self.as_ref().and_then(Value::key_policy)
    }
}

impl<T: ?Sized> Value for PhantomData<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::Nothing
    }

    fn is_empty(&self) -> bool {
        true
    }
}

impl<T: Value> Value for Vec<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::List(self.iter().map(|item| item as &dyn Value).collect())
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T: Value> Value for [T] {
    fn kind(&self) -> Kind<'_> {
        Kind::List(self.iter().map(|item| item as &dyn Value).collect())
    }

    fn is_empty(&self) -> bool {
        <[T]>::is_empty(self)
    }
}

impl<K: AsRef<str>, V: Value> Value for BTreeMap<K, V> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(
            self.iter()
                .map(|(key, value)| (Cow::Borrowed(key.as_ref()), value as &dyn Value))
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        BTreeMap::is_empty(self)
    }
}

impl<K: AsRef<str>, V: Value> Value for IndexMap<K, V> {
    fn kind(&self) -> Kind<'_> {
        Kind::Map(
            self.iter()
                .map(|(key, value)| (Cow::Borrowed(key.as_ref()), value as &dyn Value))
                .collect(),
        )
    }

    fn is_empty(&self) -> bool {
        IndexMap::is_empty(self)
    }
}

// Entries are sorted so the encoded order does not depend on hashing.
impl<K: AsRef<str>, V: Value, S> Value for HashMap<K, V, S> {
    fn kind(&self) -> Kind<'_> {
        let mut entries: Vec<(Cow<'_, str>, &dyn Value)> = self
            .iter()
            .map(|(key, value)| (Cow::Borrowed(key.as_ref()), value as &dyn Value))
            .collect();
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Kind::Map(entries)
    }

    fn is_empty(&self) -> bool {
        HashMap::is_empty(self)
    }
}

impl Value for serde_json::Value {
    fn kind(&self) -> Kind<'_> {
        match self {
            serde_json::Value::Null => Kind::Nothing,
            serde_json::Value::Bool(value) => Kind::Scalar(Cow::Owned(value.to_string())),
            serde_json::Value::Number(value) => Kind::Scalar(Cow::Owned(value.to_string())),
            serde_json::Value::String(value) => Kind::Scalar(Cow::Borrowed(value.as_str())),
            serde_json::Value::Array(items) => {
                Kind::List(items.iter().map(|item| item as &dyn Value).collect())
            }
            serde_json::Value::Object(entries) => Kind::Map(
                entries
                    .iter()
                    .map(|(key, value)| (Cow::Borrowed(key.as_str()), value as &dyn Value))
                    .collect(),
            ),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            serde_json::Value::Null => true,
            serde_json::Value::Bool(value) => !value,
            serde_json::Value::Number(value) => value.as_f64() == Some(0.0),
            serde_json::Value::String(value) => value.is_empty(),
            serde_json::Value::Array(items) => items.is_empty(),
            serde_json::Value::Object(entries) => entries.is_empty(),
        }
    }
}

impl Value for () {
    fn kind(&self) -> Kind<'_> {
        Kind::Unsupported("()")
    }

    fn is_empty(&self) -> bool {
        true
    }
}
