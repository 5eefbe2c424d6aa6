use indexmap::IndexMap;
use indexmap::map::Entry;

/// An ordered multi-map of form keys to values.
///
/// Keys keep the order in which they were first added; values under a key
/// keep the order in which they were added. This is the wire form of an
/// encoded entry, ready to be percent-encoded as a request body or query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(IndexMap<String, Vec<String>>);

impl FormValues {
    /// An empty multi-map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.0.entry(key.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().push(value.into()),
            Entry::Vacant(entry) => {
                entry.insert(vec![value.into()]);
            }
        }
    }

    /// Replace every value under `key` with `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// The first value under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value under `key`.
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Every `(key, value)` pair, keys in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Percent-encode as `application/x-www-form-urlencoded`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::default();
        for (key, value) in iter {
            values.add(key, value);
        }
        values
    }
}
