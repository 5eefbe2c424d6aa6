//! Dotted named-parameter groups.
//!
//! Some entries expose toggleable, named sub-objects as flat dotted keys.
//! Saved-search actions are the typical case:
//!
//! ```text
//! action.email          = 1
//! action.email.to       = joe@x.com
//! action.email.subject  = Alert
//! action.script         = 0
//! ```
//!
//! With the `action.` prefix removed, the first key segment names a group,
//! the value at the bare group name is its status token and everything below
//! it is the group's parameters. [`NamedParameterGroups`] converts between the
//! flat map and that structure.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{EncodeValues, FormValues, Kind, Value, ValuesError, join_key};

/// A flat map of dotted keys to textual values.
pub type ParameterMap = BTreeMap<String, String>;

/// Split a dotted key at its first `.`.
///
/// The remainder is empty when the key has a single segment.
pub fn decompose(key: &str) -> (&str, &str) {
    key.split_once('.').unwrap_or((key, ""))
}

/// Parse a status token.
///
/// Accepts exactly `1 t T TRUE true True` and `0 f F FALSE false False`.
/// Any other token, the empty one included, is unknown and yields `None`.
pub fn status_bool(token: &str) -> Option<bool> {
    match token {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Convert a JSON object's scalar values to their textual form.
///
/// Strings are kept verbatim, booleans become `true`/`false`, numbers their
/// decimal form and `null` the empty string. Arrays and objects have no flat
/// form and fail with [`ValuesError::DecodeTypeMismatch`].
pub fn parameter_map_from_json(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<ParameterMap, ValuesError> {
    object
        .iter()
        .map(|(key, value)| Ok((key.clone(), json_scalar(key, value)?)))
        .collect()
}

fn json_scalar(key: &str, value: &serde_json::Value) -> Result<String, ValuesError> {
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Bool(value) => Ok(value.to_string()),
        serde_json::Value::Number(value) => Ok(value.to_string()),
        serde_json::Value::String(value) => Ok(value.clone()),
        serde_json::Value::Array(_) => Err(ValuesError::DecodeTypeMismatch {
            key: key.to_string(),
            expected: "a scalar",
            found: "an array".into(),
        }),
        serde_json::Value::Object(_) => Err(ValuesError::DecodeTypeMismatch {
            key: key.to_string(),
            expected: "a scalar",
            found: "an object".into(),
        }),
    }
}

/// One named group: its status token and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedParameterGroup {
    /// The group's name, the first segment of its keys.
    pub name: String,
    /// The raw status token found at the bare group name; empty if absent.
    pub status: String,
    /// Parameters with the group name stripped from their keys.
    pub parameters: ParameterMap,
}

impl NamedParameterGroup {
    /// A group with no status and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the raw status token.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the status to `1` or `0`.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.with_status(if enabled { "1" } else { "0" })
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// The parsed status; `None` when absent or unrecognised.
    pub fn enabled(&self) -> Option<bool> {
        status_bool(&self.status)
    }
}

/// Named parameter groups, ordered by name when built from a flat map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedParameterGroups(Vec<NamedParameterGroup>);

impl NamedParameterGroups {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat dotted map.
    ///
    /// Every distinct first segment becomes a group, in sorted order, even
    /// when it only appears as a prefix of longer keys.
    pub fn from_flat_map(map: &ParameterMap) -> Self {
        let mut groups: BTreeMap<&str, NamedParameterGroup> = BTreeMap::new();

        for (key, value) in map {
            let (name, remainder) = decompose(key);
            let group = groups
                .entry(name)
                .or_insert_with(|| NamedParameterGroup::new(name));

            if remainder.is_empty() {
                group.status = value.clone();
            } else {
                group
                    .parameters
                    .insert(remainder.to_string(), value.clone());
            }
        }

        Self(groups.into_values().collect())
    }

    /// Group the keys of `map` that start with `prefix.`, prefix removed.
    pub fn from_prefixed_map(map: &ParameterMap, prefix: &str) -> Self {
        let prefix = format!("{prefix}.");
        let stripped: ParameterMap = map
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&prefix)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest.to_string(), value.clone()))
            })
            .collect();

        Self::from_flat_map(&stripped)
    }

    /// Flatten back into dotted keys: `G` holds the status when there is one
    /// and `G.key` holds each parameter.
    pub fn to_flat_map(&self) -> ParameterMap {
        let mut map = ParameterMap::new();

        for group in &self.0 {
            if !group.status.is_empty() {
                map.insert(group.name.clone(), group.status.clone());
            }
            for (key, value) in &group.parameters {
                map.insert(join_key(&group.name, key), value.clone());
            }
        }

        map
    }

    /// Names of the groups whose status parses as true, in collection order.
    pub fn enabled_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|group| group.enabled() == Some(true))
            .map(|group| group.name.as_str())
            .collect()
    }

    /// The group called `name`.
    pub fn get(&self, name: &str) -> Option<&NamedParameterGroup> {
        self.0.iter().find(|group| group.name == name)
    }

    /// Insert a group, replacing one of the same name in place.
    ///
    /// A new group goes before the first group whose name sorts after it.
    pub fn insert(&mut self, group: NamedParameterGroup) {
        if let Some(existing) = self.0.iter_mut().find(|existing| existing.name == group.name) {
            *existing = group;
            return;
        }

        let index = self
            .0
            .iter()
            .position(|existing| existing.name > group.name)
            .unwrap_or(self.0.len());
        self.0.insert(index, group);
    }

    /// Remove the group called `name`.
    pub fn remove(&mut self, name: &str) -> Option<NamedParameterGroup> {
        let index = self.0.iter().position(|group| group.name == name)?;
        Some(self.0.remove(index))
    }

    /// Iterate over the groups.
    pub fn iter(&self) -> std::slice::Iter<'_, NamedParameterGroup> {
        self.0.iter()
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<NamedParameterGroup>> for NamedParameterGroups {
    fn from(groups: Vec<NamedParameterGroup>) -> Self {
        Self(groups)
    }
}

impl FromIterator<NamedParameterGroup> for NamedParameterGroups {
    fn from_iter<I: IntoIterator<Item = NamedParameterGroup>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a NamedParameterGroups {
    type Item = &'a NamedParameterGroup;
    type IntoIter = std::slice::Iter<'a, NamedParameterGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for NamedParameterGroups {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_flat_map().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NamedParameterGroups {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let map = parameter_map_from_json(&object).map_err(serde::de::Error::custom)?;
        Ok(Self::from_flat_map(&map))
    }
}

impl Value for NamedParameterGroups {
    fn kind(&self) -> Kind<'_> {
        Kind::Custom(self)
    }

    fn is_empty(&self) -> bool {
        NamedParameterGroups::is_empty(self)
    }
}

/// Named groups encode the way the server expects named actions: the
/// enabled names as a comma-separated list under the pluralized key, then
/// the flat map of each group under `key.`.
///
/// For `key = "action"`: `actions=email`, `action.email=1` and
/// `action.email.to=joe@x.com`. A group without a status token sends only
/// its parameters. An empty collection encodes nothing.
impl EncodeValues for NamedParameterGroups {
    fn encode_values(&self, key: &str, values: &mut FormValues) -> Result<(), ValuesError> {
        if self.0.is_empty() {
            return Ok(());
        }

        if key.is_empty() {
            return Err(ValuesError::InvalidInput(
                "named parameter groups need a key to pluralize".into(),
            ));
        }

        values.add(format!("{key}s"), self.enabled_names().join(","));

        for group in &self.0 {
            let prefix = join_key(key, &group.name);

            if !group.status.is_empty() {
                values.add(prefix.clone(), group.status.clone());
            }
            for (parameter, value) in &group.parameters {
                values.add(join_key(&prefix, parameter), value.clone());
            }
        }

        Ok(())
    }
}
