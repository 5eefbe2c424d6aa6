use std::borrow::Cow;

use serde::Deserialize;
use splunk_values::{Explicit, Strings, Values};

use crate::{Entry, EntryId};

/// A user account under `authentication/users`.
#[derive(Debug, Clone, Default, Values)]
pub struct User {
    /// The account's id; its title is the login name
    #[values(",anonymize")]
    pub id: EntryId,
    /// The account's attributes
    #[values(",anonymize,content")]
    pub content: UserContent,
}

/// Attributes of a [`User`].
#[derive(Debug, Clone, Default, Deserialize, Values)]
#[serde(default)]
pub struct UserContent {
    /// Write-only; never returned by reads
    #[values(",omitempty")]
    pub password: Explicit<String>,

    #[values("realname,omitempty")]
    #[serde(rename = "realname")]
    pub real_name: Explicit<String>,

    #[values(",omitempty")]
    pub email: Explicit<String>,

    #[values("defaultApp,omitempty")]
    #[serde(rename = "defaultApp")]
    pub default_app: Explicit<String>,

    #[values(",omitempty")]
    pub roles: Strings,

    #[values(",omitempty")]
    pub tz: Explicit<String>,

    #[values("force-change-pass,omitempty")]
    #[serde(rename = "force-change-pass")]
    pub force_change_pass: Explicit<bool>,

    /// Only honoured when the account is created
    #[values("createrole,omitempty")]
    #[selective("create")]
    #[serde(skip)]
    pub create_role: Explicit<bool>,
}

impl Entry for User {
    type Content = UserContent;

    fn endpoint() -> Cow<'static, str> {
        Cow::Borrowed("authentication/users")
    }

    fn id(&self) -> &EntryId {
        &self.id
    }

    fn from_parts(id: EntryId, content: Self::Content) -> Self {
        Self { id, content }
    }
}
