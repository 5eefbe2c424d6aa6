use std::borrow::Cow;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer};
use splunk_values::{Kind, KeyPolicy, Value, Values, parameter_map_from_json};

use crate::{Entry, EntryId};

/// A configuration file exposed under `configs/conf-{NAME}`.
pub trait ConfFile: Send + Sync + 'static {
    /// The file name without its `.conf` extension.
    const NAME: &'static str;
}

/// `props.conf`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Props;

impl ConfFile for Props {
    const NAME: &'static str = "props";
}

/// `transforms.conf`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transforms;

impl ConfFile for Transforms {
    const NAME: &'static str = "transforms";
}

/// One stanza of the configuration file `F`.
#[derive(Debug, Clone, Default, Values)]
pub struct ConfStanza<F: ConfFile> {
    /// The stanza's id; its title is the stanza name
    #[values(",anonymize")]
    pub id: EntryId,
    /// The stanza's attributes
    #[values(",content")]
    pub values: StanzaValues,
    file: PhantomData<F>,
}

impl<F: ConfFile> ConfStanza<F> {
    /// A stanza with no attributes
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            values: StanzaValues::default(),
            file: PhantomData,
        }
    }

    /// Set an attribute
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl<F: ConfFile> Entry for ConfStanza<F> {
    type Content = StanzaValues;

    fn endpoint() -> Cow<'static, str> {
        Cow::Owned(format!("configs/conf-{}", F::NAME))
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn from_parts(id: EntryId, values: Self::Content) -> Self {
        Self {
            id,
            values,
            file: PhantomData,
        }
    }
}

/// The attributes of a stanza, keyed by their raw names.
///
/// Attribute names are sent as they are (`SHOULD_LINEMERGE`,
/// `TRANSFORMS-mask`), never below a field key. Reads drop the server's
/// `eai:*` bookkeeping keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StanzaValues(pub BTreeMap<String, String>);

impl Deref for StanzaValues {
    type Target = BTreeMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for StanzaValues {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'de> Deserialize<'de> for StanzaValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let attributes: serde_json::Map<String, serde_json::Value> = object
            .into_iter()
            .filter(|(key, _)| !key.starts_with("eai:"))
            .collect();

        parameter_map_from_json(&attributes)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

impl KeyPolicy for StanzaValues {
    fn field_key(&self, parent: &str, _name: &str) -> String {
        parent.to_string()
    }

    fn entry_key(&self, _key: &str, entry: &str) -> String {
        entry.to_string()
    }
}

impl Value for StanzaValues {
    fn kind(&self) -> Kind<'_> {
        self.0.kind()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn key_policy(&self) -> Option<&dyn KeyPolicy> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Namespace;
    use pretty_assertions::assert_eq;
    use splunk_values::{encode, project};

    #[test]
    fn it_names_the_endpoint_after_the_file() {
        assert_eq!(ConfStanza::<Props>::endpoint(), "configs/conf-props");
        assert_eq!(ConfStanza::<Transforms>::endpoint(), "configs/conf-transforms");
    }

    #[test]
    fn it_sends_attributes_under_their_raw_names() -> anyhow::Result<()> {
        let stanza = ConfStanza::<Props>::new(EntryId::new(
            Namespace::new("nobody", "search"),
            "source::/var/log/app.log",
        ))
        .with_value("SHOULD_LINEMERGE", "false")
        .with_value("TRANSFORMS-mask", "mask-card-numbers");

        let values = encode(&project(&stanza, "create"))?;
        assert_eq!(
            values.pairs().collect::<Vec<_>>(),
            vec![
                ("name", "source::/var/log/app.log"),
                ("SHOULD_LINEMERGE", "false"),
                ("TRANSFORMS-mask", "mask-card-numbers"),
            ]
        );
        Ok(())
    }

    #[test]
    fn it_drops_bookkeeping_keys_on_read() -> anyhow::Result<()> {
        let values: StanzaValues = serde_json::from_str(
            r#"{"SHOULD_LINEMERGE": false, "TRUNCATE": 10000, "eai:acl": {"app": "search"}, "eai:appName": "search"}"#,
        )?;

        assert_eq!(values.get("SHOULD_LINEMERGE").map(String::as_str), Some("false"));
        assert_eq!(values.get("TRUNCATE").map(String::as_str), Some("10000"));
        assert_eq!(values.len(), 2);
        Ok(())
    }
}
