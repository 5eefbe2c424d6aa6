use std::borrow::Cow;

use serde::Deserialize;
use splunk_values::{Explicit, Strings, Values};

use crate::{Entry, EntryId};

/// A role under `authorization/roles`.
#[derive(Debug, Clone, Default, Values)]
pub struct Role {
    #[values(",anonymize")]
    pub id: EntryId,
    #[values(",anonymize,content")]
    pub content: RoleContent,
}

/// Attributes of a [`Role`].
///
/// The list attributes are [`Strings`]: clearing one sends the empty
/// sentinel, which removes every item on the server.
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct RoleContent {
    #[values(",omitempty")]
    pub capabilities: Strings,

    #[values(",omitempty")]
    pub imported_roles: Strings,

    #[values("defaultApp,omitempty")]
    #[serde(rename = "defaultApp")]
    pub default_app: Explicit<String>,

    #[values("srchFilter,omitempty")]
    #[serde(rename = "srchFilter")]
    pub search_filter: Explicit<String>,

    #[values("srchIndexesAllowed,omitempty")]
    #[serde(rename = "srchIndexesAllowed")]
    pub search_indexes_allowed: Strings,

    #[values("srchIndexesDefault,omitempty")]
    #[serde(rename = "srchIndexesDefault")]
    pub search_indexes_default: Strings,

    #[values("srchJobsQuota,omitempty")]
    #[serde(rename = "srchJobsQuota")]
    pub search_jobs_quota: Explicit<i64>,

    #[values("rtSrchJobsQuota,omitempty")]
    #[serde(rename = "rtSrchJobsQuota")]
    pub rt_search_jobs_quota: Explicit<i64>,

    #[values("cumulativeSrchJobsQuota,omitempty")]
    #[serde(rename = "cumulativeSrchJobsQuota")]
    pub cumulative_search_jobs_quota: Explicit<i64>,

    #[values("srchDiskQuota,omitempty")]
    #[serde(rename = "srchDiskQuota")]
    pub search_disk_quota: Explicit<i64>,

    #[values("srchTimeWin,omitempty")]
    #[serde(rename = "srchTimeWin")]
    pub search_time_window: Explicit<i64>,
}

impl Entry for Role {
    type Content = RoleContent;

    fn endpoint() -> Cow<'static, str> {
        Cow::Borrowed("authorization/roles")
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn from_parts(id: EntryId, content: Self::Content) -> Self {
        Self { id, content }
    }
}
