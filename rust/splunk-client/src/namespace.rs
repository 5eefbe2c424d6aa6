//! Namespaces and entry paths

use serde::{Deserialize, Serialize};
use splunk_values::Values;

use crate::ClientError;

/// The user/app context an entry lives in.
///
/// Both parts empty addresses the global `services` tree; both set addresses
/// `servicesNS/{user}/{app}`. Either part may be the wildcard `-`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Values)]
pub struct Namespace {
    /// The owning user
    pub user: String,
    /// The owning app
    pub app: String,
}

impl Namespace {
    /// A namespace owned by `user` within `app`
    pub fn new(user: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            app: app.into(),
        }
    }

    /// The global namespace
    pub fn global() -> Self {
        Self::default()
    }

    /// The path segments this namespace maps to
    pub fn segments(&self) -> Result<Vec<String>, ClientError> {
        match (self.user.is_empty(), self.app.is_empty()) {
            (true, true) => Ok(vec!["services".to_string()]),
            (false, false) => Ok(vec![
                "servicesNS".to_string(),
                self.user.clone(),
                self.app.clone(),
            ]),
            _ => Err(ClientError::InvalidNamespace {
                user: self.user.clone(),
                app: self.app.clone(),
            }),
        }
    }
}

/// Identifies an entry: its namespace and its title.
///
/// When an entry is encoded the namespace is never sent and the title is sent
/// as `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Values)]
pub struct EntryId {
    /// Where the entry lives
    #[values("-")]
    pub namespace: Namespace,
    /// The entry's name
    #[values("name")]
    pub title: String,
}

impl EntryId {
    /// Identify `title` within `namespace`
    pub fn new(namespace: Namespace, title: impl Into<String>) -> Self {
        Self {
            namespace,
            title: title.into(),
        }
    }

    /// The segments of the collection holding this entry
    pub fn collection_path(&self, endpoint: &str) -> Result<Vec<String>, ClientError> {
        collection_path(&self.namespace, endpoint)
    }

    /// The segments of this entry; the title stays a single segment
    pub fn entry_path(&self, endpoint: &str) -> Result<Vec<String>, ClientError> {
        let mut path = self.collection_path(endpoint)?;
        path.push(self.title.clone());
        Ok(path)
    }
}

/// The segments of the collection `endpoint` within `namespace`
pub fn collection_path(namespace: &Namespace, endpoint: &str) -> Result<Vec<String>, ClientError> {
    let mut path = namespace.segments()?;
    path.extend(
        endpoint
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string),
    );
    Ok(path)
}
