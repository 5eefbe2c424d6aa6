use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EncodeValues, Explicit, FormValues, Kind, Value, ValuesError, encode_value};

/// A list field whose explicit emptiness is sent to the server.
///
/// A plain `Vec<T>` encodes nothing when empty, which leaves the server's list
/// untouched. A `ClearableList<T>` distinguishes three cases:
///
/// - unset: no key is emitted;
/// - explicitly empty: a single `key=""` pair, which clears the list;
/// - non-empty: one `key=item` pair per item.
///
/// Pick this type for a field only when the endpoint accepts the empty
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClearableList<T>(Explicit<Vec<T>>);

/// A clearable list of strings (roles, capabilities, index names).
pub type Strings = ClearableList<String>;

impl<T> Default for ClearableList<T> {
    fn default() -> Self {
        Self(Explicit::default())
    }
}

impl<T> ClearableList<T> {
    /// An explicitly set list.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self(Explicit::new(items.into_iter().collect()))
    }

    /// An explicitly empty list; encodes as the clearing sentinel.
    pub fn cleared() -> Self {
        Self(Explicit::new(Vec::new()))
    }

    /// Replace the items. The list is explicit from now on.
    pub fn set(&mut self, items: impl IntoIterator<Item = T>) {
        self.0.set(items.into_iter().collect());
    }

    /// Clear the list explicitly.
    pub fn clear(&mut self) {
        self.0.set(Vec::new());
    }

    /// The current items; empty when unset.
    pub fn items(&self) -> &[T] {
        self.0.value()
    }

    /// Whether the list is set, or holds items.
    pub fn ok(&self) -> bool {
        self.0.ok()
    }

    /// Whether the list was explicitly set to nothing.
    pub fn is_cleared(&self) -> bool {
        self.0.is_explicit() && self.items().is_empty()
    }
}

impl<T> FromIterator<T> for ClearableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Serialize> Serialize for ClearableList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ClearableList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Explicit::<Vec<T>>::deserialize(deserializer).map(Self)
    }
}

impl<T: Value> Value for ClearableList<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::Custom(self)
    }

    fn is_empty(&self) -> bool {
        !self.ok()
    }
}

impl<T: Value> EncodeValues for ClearableList<T> {
    fn encode_values(&self, key: &str, values: &mut FormValues) -> Result<(), ValuesError> {
        if !self.ok() {
            return Ok(());
        }

        if self.items().is_empty() {
            values.add(key, "");
            return Ok(());
        }

        for item in self.items() {
            encode_value(key, item, values)?;
        }

        Ok(())
    }
}
