//! Splunk Client - Typed CRUD over a Splunk-style REST management API
//!
//! Entries (users, roles, indexes, saved searches, configuration stanzas) are
//! typed structs deriving `Values`. The client turns them into form-encoded
//! writes through `splunk_values` and decodes reads straight back into them:
//!
//! - `create` posts the entry's `create` view to its collection;
//! - `read` and `list` decode the server's JSON feed;
//! - `update` posts only the `update` view of the entry's content, so
//!   attributes the caller never set are left untouched on the server;
//! - `delete` removes the entry.
//!
//! # Example
//!
//! ```no_run
//! use splunk_client::{Client, ClientConfig, EntryId, Namespace, models::Role};
//!
//! # async fn example() -> Result<(), splunk_client::ClientError> {
//! let config = ClientConfig::new("https://localhost:8089")
//!     .with_password("admin", "changeme")
//!     .with_insecure_skip_verify(true);
//! let client = Client::new(config)?;
//!
//! let id = EntryId::new(Namespace::global(), "analyst");
//! let mut role: Role = client.read(&id).await?;
//!
//! role.content.capabilities.clear();
//! role.content.search_jobs_quota.set(0);
//! client.update(&role).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod namespace;
mod response;
mod session;
mod transport;

pub mod models;

pub use client::{Client, Entry};
pub use config::{ClientConfig, Credentials};
pub use error::ClientError;
pub use namespace::{EntryId, Namespace, collection_path};
pub use session::SessionCache;
pub use transport::{HttpTransport, MemoryTransport, Method, Request, Response, Transport};
