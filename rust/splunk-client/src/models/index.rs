use std::borrow::Cow;

use serde::Deserialize;
use splunk_values::{Explicit, Values};

use crate::{Entry, EntryId};

/// An index under `data/indexes`.
#[derive(Debug, Clone, Default, Values)]
pub struct Index {
    #[values(",anonymize")]
    pub id: EntryId,
    #[values(",anonymize,content")]
    pub content: IndexContent,
}

/// Attributes of an [`Index`].
///
/// Storage paths and the data type are fixed when the index is created and
/// are left out of updates.
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct IndexContent {
    /// `event` or `metric`
    #[values("datatype,omitempty")]
    #[selective("create")]
    #[serde(rename = "datatype")]
    pub data_type: Explicit<String>,

    #[values("homePath,omitempty")]
    #[selective("create")]
    #[serde(rename = "homePath")]
    pub home_path: Explicit<String>,

    #[values("coldPath,omitempty")]
    #[selective("create")]
    #[serde(rename = "coldPath")]
    pub cold_path: Explicit<String>,

    #[values("thawedPath,omitempty")]
    #[selective("create")]
    #[serde(rename = "thawedPath")]
    pub thawed_path: Explicit<String>,

    #[values("maxTotalDataSizeMB,omitempty")]
    #[serde(rename = "maxTotalDataSizeMB")]
    pub max_total_data_size_mb: Explicit<i64>,

    #[values("frozenTimePeriodInSecs,omitempty")]
    #[serde(rename = "frozenTimePeriodInSecs")]
    pub frozen_time_period_in_secs: Explicit<i64>,

    #[values("maxDataSize,omitempty")]
    #[serde(rename = "maxDataSize")]
    pub max_data_size: Explicit<String>,

    #[values(",omitempty")]
    pub disabled: Explicit<bool>,
}

impl Entry for Index {
    type Content = IndexContent;

    fn endpoint() -> Cow<'static, str> {
        Cow::Borrowed("data/indexes")
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
    use pretty_assertions::assert_eq;
    use splunk_values::{content_of, encode, project_value};

    #[test]
    fn it_leaves_creation_attributes_out_of_updates() -> anyhow::Result<()> {
        let mut index = Index::default();
        index.content.data_type.set("metric".into());
        index.content.home_path.set("$SPLUNK_DB/metrics/db".into());
        index.content.frozen_time_period_in_secs.set(86_400);
        index.content.disabled.set(false);

        let content = content_of(&index)?;

        let create = encode(&project_value(content.value, "create")?)?;
        assert_eq!(create.get("datatype"), Some("metric"));
        assert_eq!(create.get("homePath"), Some("$SPLUNK_DB/metrics/db"));

        let update = encode(&project_value(content.value, "update")?)?;
        assert_eq!(
            update.pairs().collect::<Vec<_>>(),
            vec![("frozenTimePeriodInSecs", "86400"), ("disabled", "false")]
        );
        Ok(())
    }
}
