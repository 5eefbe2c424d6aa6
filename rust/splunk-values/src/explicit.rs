use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EncodeValues, FormValues, Kind, Value, ValuesError, encode_value};

/// Types with a distinguished zero value.
///
/// Zero is what a field holds before anything sets it: `0`, `""`, `false`,
/// an empty collection, `None`.
pub trait Zero {
    /// Whether this is the zero value.
    fn is_zero(&self) -> bool;
}

macro_rules! numeric_zero {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Zero for $ty {
                fn is_zero(&self) -> bool {
                    *self == 0 as $ty
                }
            }
        )*
    };
}

numeric_zero!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Zero for bool {
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl Zero for char {
    fn is_zero(&self) -> bool {
        *self == '\0'
    }
}

impl Zero for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zero for Vec<T> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Zero for BTreeMap<K, V> {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Zero for Option<T> {
    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

/// A value that remembers whether it was set.
///
/// An `Explicit<T>` is in one of three states:
///
/// | State | `explicit` | value |
/// |-------|------------|-------|
/// | unset | `false` | zero |
/// | explicit zero | `true` | zero |
/// | explicit non-zero | `true` | non-zero |
///
/// [`Explicit::ok`] tells whether the value is worth sending: an update omits
/// an unset field (the server keeps its value) but sends an explicit zero, so
/// `false` or `""` can be written deliberately.
///
/// Decoding from JSON marks the wrapper explicit for any present key,
/// including `null`. Owning structs derive `Deserialize` with
/// `#[serde(default)]` so an absent key leaves the wrapper unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Explicit<T> {
    value: T,
    explicit: bool,
}

impl<T> Explicit<T> {
    /// An explicitly set value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            explicit: true,
        }
    }

    /// Set the value. The wrapper is explicit from now on.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.explicit = true;
    }

    /// The stored value; zero when unset.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether the value was set explicitly.
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Consume the wrapper, returning the stored value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Zero> Explicit<T> {
    /// Whether the value is worth encoding: set explicitly, or non-zero.
    pub fn ok(&self) -> bool {
        self.explicit || !self.value.is_zero()
    }

    /// The stored value paired with [`Explicit::ok`].
    pub fn value_ok(&self) -> (&T, bool) {
        (&self.value, self.ok())
    }

    /// Neither set nor holding a non-zero value. Suited to
    /// `#[serde(skip_serializing_if = "Explicit::is_unset")]`.
    pub fn is_unset(&self) -> bool {
        !self.ok()
    }
}

impl<T> From<T> for Explicit<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Serialize> Serialize for Explicit<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Explicit<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<T>::deserialize(deserializer)?;
        Ok(Self::new(value.unwrap_or_default()))
    }
}

impl<T: Value + Zero> Value for Explicit<T> {
    fn kind(&self) -> Kind<'_> {
        Kind::Custom(self)
    }

    fn is_empty(&self) -> bool {
        !self.ok()
    }
}

impl<T: Value + Zero> EncodeValues for Explicit<T> {
    fn encode_values(&self, key: &str, values: &mut FormValues) -> Result<(), ValuesError> {
        if !self.ok() {
            return Ok(());
        }

        encode_value(key, &self.value, values)
    }
}
