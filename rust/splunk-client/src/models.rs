//! Typed resource models
//!
//! A representative set of entries. Each pairs an [`EntryId`](crate::EntryId)
//! with a content struct whose attributes are [`Explicit`](splunk_values::Explicit)
//! values, so reads and partial updates round-trip without touching attributes
//! the caller never set.

mod conf;
mod index;
mod role;
mod saved_search;
mod user;

pub use conf::{ConfFile, ConfStanza, Props, StanzaValues, Transforms};
pub use index::{Index, IndexContent};
pub use role::{Role, RoleContent};
pub use saved_search::{Actions, AlertSettings, Dispatch, SavedSearch, SavedSearchContent};
pub use user::{User, UserContent};
