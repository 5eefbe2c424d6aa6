use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Deserializer};
use splunk_values::{
    Explicit, Kind, NamedParameterGroups, Value, Values, parameter_map_from_json,
};

use crate::{Entry, EntryId};

/// A saved search under `saved/searches`.
#[derive(Debug, Clone, Default, Values)]
pub struct SavedSearch {
    #[values(",anonymize")]
    pub id: EntryId,
    #[values(",anonymize,content")]
    pub content: SavedSearchContent,
}

/// Attributes of a [`SavedSearch`].
///
/// The server returns dispatch and alert settings as flat dotted keys
/// (`dispatch.earliest_time`); they decode into nested structs and encode back
/// under the same keys.
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct SavedSearchContent {
    #[values(",omitempty")]
    pub search: Explicit<String>,

    #[values(",omitempty")]
    pub description: Explicit<String>,

    #[values(",omitempty")]
    pub disabled: Explicit<bool>,

    #[values(",omitempty")]
    pub is_scheduled: Explicit<bool>,

    #[values(",omitempty")]
    pub is_visible: Explicit<bool>,

    #[values(",omitempty")]
    pub cron_schedule: Explicit<String>,

    #[values(",omitempty")]
    pub alert_type: Explicit<String>,

    #[values(",omitempty")]
    pub alert_comparator: Explicit<String>,

    #[values(",omitempty")]
    pub alert_threshold: Explicit<String>,

    #[values(",omitempty")]
    #[serde(flatten)]
    pub dispatch: Dispatch,

    #[values(",omitempty")]
    #[serde(flatten)]
    pub alert: AlertSettings,

    #[values("action,omitempty")]
    #[serde(flatten)]
    pub actions: Actions,
}

/// `dispatch.*` settings of a saved search.
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct Dispatch {
    #[values(",omitempty")]
    #[serde(rename = "dispatch.earliest_time")]
    pub earliest_time: Explicit<String>,

    #[values(",omitempty")]
    #[serde(rename = "dispatch.latest_time")]
    pub latest_time: Explicit<String>,

    #[values(",omitempty")]
    #[serde(rename = "dispatch.max_count")]
    pub max_count: Explicit<i64>,

    /// Lifetime of the dispatched job, in seconds or with a `p` suffix for
    /// scheduled periods
    #[values(",omitempty")]
    #[serde(rename = "dispatch.ttl")]
    pub ttl: Explicit<String>,
}

/// `alert.*` settings of a saved search.
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct AlertSettings {
    #[values(",omitempty")]
    #[serde(rename = "alert.digest_mode")]
    pub digest_mode: Explicit<bool>,

    #[values(",omitempty")]
    #[serde(rename = "alert.severity")]
    pub severity: Explicit<i64>,

    #[values(",omitempty")]
    #[serde(rename = "alert.suppress")]
    pub suppress: Explicit<bool>,

    #[values("suppress.period,omitempty")]
    #[serde(rename = "alert.suppress.period")]
    pub suppress_period: Explicit<String>,
}

/// The named actions of a saved search (`email`, `script`, `webhook`...).
///
/// Reads keep the `action.*` keys of the content. Writes send the enabled
/// action names as `actions`, each status as `action.{name}` and each
/// parameter as `action.{name}.{key}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actions(pub NamedParameterGroups);

impl Actions {
    const PREFIX: &'static str = "action";
}

impl Deref for Actions {
    type Target = NamedParameterGroups;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Actions {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'de> Deserialize<'de> for Actions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let prefix = format!("{}.", Self::PREFIX);
        let actions: serde_json::Map<String, serde_json::Value> = object
            .into_iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .collect();

        let map = parameter_map_from_json(&actions).map_err(serde::de::Error::custom)?;
        Ok(Self(NamedParameterGroups::from_prefixed_map(&map, Self::PREFIX)))
    }
}

impl Value for Actions {
    fn kind(&self) -> Kind<'_> {
        self.0.kind()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Entry for SavedSearch {
    type Content = SavedSearchContent;

    fn endpoint() -> Cow<'static, str> {
        Cow::Borrowed("saved/searches")
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn from_parts(id: EntryId, content: Self::Content) -> Self {
        Self { id, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Namespace;
    use pretty_assertions::assert_eq;
    use splunk_values::{NamedParameterGroup, encode, project};

    #[test]
    fn it_encodes_enabled_actions() -> anyhow::Result<()> {
        let mut search = SavedSearch {
            id: EntryId::new(Namespace::new("nobody", "search"), "errors"),
            ..Default::default()
        };
        search.content.search.set("index=main error".into());
        search.content.actions.insert(
            NamedParameterGroup::new("email")
                .with_enabled(true)
                .with_parameter("to", "joe@x.com"),
        );

        let values = encode(&project(&search, "create"))?;
        assert_eq!(
            values.pairs().collect::<Vec<_>>(),
            vec![
                ("name", "errors"),
                ("search", "index=main error"),
                ("actions", "email"),
                ("action.email", "1"),
                ("action.email.to", "joe@x.com"),
            ]
        );
        Ok(())
    }

    #[test]
    fn it_decodes_flat_dotted_content() -> anyhow::Result<()> {
        let content: SavedSearchContent = serde_json::from_str(
            r#"{
                "search": "index=main error",
                "is_scheduled": true,
                "cron_schedule": "*/5 * * * *",
                "dispatch.earliest_time": "-5m",
                "dispatch.max_count": 500,
                "alert.suppress": false,
                "actions": "email",
                "action.email": "1",
                "action.email.to": "joe@x.com",
                "action.script": "0",
                "action.script.filename": "notify.sh",
                "eai:acl": {"app": "search"},
                "request.ui_dispatch_view": "search"
            }"#,
        )?;

        assert_eq!(content.dispatch.earliest_time.value(), "-5m");
        assert_eq!(content.dispatch.max_count.value(), &500);
        assert!(!content.dispatch.latest_time.ok());
        assert!(content.alert.suppress.is_explicit());
        assert_eq!(content.actions.enabled_names(), vec!["email"]);
        assert_eq!(
            content
                .actions
                .get("script")
                .and_then(|script| script.parameters.get("filename"))
                .map(String::as_str),
            Some("notify.sh")
        );

        let values = encode(&content)?;
        assert_eq!(
            values.pairs().collect::<Vec<_>>(),
            vec![
                ("search", "index=main error"),
                ("is_scheduled", "true"),
                ("cron_schedule", "*/5 * * * *"),
                ("dispatch.earliest_time", "-5m"),
                ("dispatch.max_count", "500"),
                ("alert.suppress", "false"),
                ("actions", "email"),
                ("action.email", "1"),
                ("action.email.to", "joe@x.com"),
                ("action.script", "0"),
                ("action.script.filename", "notify.sh"),
            ]
        );
        Ok(())
    }
}
