//! CRUD orchestration

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use splunk_values::{Fields, FormValues, Kind, Value, content_of, encode, project};
use tracing::debug;

use crate::response::{entries, error_for, single_entry};
use crate::{
    ClientConfig, ClientError, EntryId, HttpTransport, Namespace, Request, Response, SessionCache,
    Transport, namespace::collection_path,
};

/// A typed resource entry.
///
/// Entries are structs deriving `Values` that hold their [`EntryId`] in an
/// anonymized field and their attributes in a field tagged `content`:
///
/// ```rust,ignore
/// #[derive(Values)]
/// pub struct Role {
///     #[values(",anonymize")]
///     pub id: EntryId,
///     #[values(",anonymize,content")]
///     pub content: RoleContent,
/// }
/// ```
pub trait Entry: Fields + Sized + Send + Sync {
    /// The entry's attributes as returned by the server.
    type Content: DeserializeOwned + Default + Send;

    /// The collection endpoint, relative to a namespace (for example
    /// `authentication/users`).
    fn endpoint() -> Cow<'static, str>;

    /// The entry's id.
    fn id(&self) -> &EntryId;

    /// Assemble an entry from a decoded id and content.
    fn from_parts(id: EntryId, content: Self::Content) -> Self;
}

/// A client for one server.
pub struct Client<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
    session: SessionCache,
}

impl Client<HttpTransport> {
    /// Create a client sending requests over HTTP
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Client<T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: SessionCache::new(),
        }
    }

    /// The client's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The client's transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Create `entry` in its collection.
    ///
    /// The body is the entry's `create` view: its name plus every attribute
    /// that is set or marked for creation.
    pub async fn create<E: Entry>(&self, entry: &E) -> Result<(), ClientError> {
        let form = encode(&project(entry, "create"))?;
        let path = entry.id().collection_path(&E::endpoint())?;

        self.send(Request::post(path, form)).await?;
        Ok(())
    }

    /// Read the entry identified by `id`
    pub async fn read<E: Entry>(&self, id: &EntryId) -> Result<E, ClientError> {
        let path = id.entry_path(&E::endpoint())?;
        let response = self.send(Request::get(path)).await?;

        let (id, content) = single_entry::<E::Content>(&response.body)?;
        Ok(E::from_parts(id, content))
    }

    /// Update `entry` with the `update` view of its content.
    ///
    /// Unset attributes are not sent, so the server keeps their values.
    pub async fn update<E: Entry>(&self, entry: &E) -> Result<(), ClientError> {
        let form = update_form(entry)?;
        let path = entry.id().entry_path(&E::endpoint())?;

        self.send(Request::post(path, form)).await?;
        Ok(())
    }

    /// Delete the entry identified by `id`
    pub async fn delete<E: Entry>(&self, id: &EntryId) -> Result<(), ClientError> {
        let path = id.entry_path(&E::endpoint())?;

        self.send(Request::delete(path)).await?;
        Ok(())
    }

    /// List every entry of the collection within `namespace`
    pub async fn list<E: Entry>(&self, namespace: &Namespace) -> Result<Vec<E>, ClientError> {
        let path = collection_path(namespace, &E::endpoint())?;
        let response = self
            .send(Request::get(path).with_query("count", "0"))
            .await?;

        Ok(entries::<E::Content>(&response.body)?
            .into_iter()
            .map(|(id, content)| E::from_parts(id, content))
            .collect())
    }

    async fn send(&self, request: Request) -> Result<Response, ClientError> {
        let mut request = request.with_query("output_mode", "json");

        for (key, value) in &self.config.headers {
            request = request.with_header(key, value);
        }

        if let Some(key) = self
            .session
            .session_key(&self.transport, &self.config.credentials)
            .await?
        {
            request = request.with_header("Authorization", format!("Splunk {key}"));
        }

        let path = request.display_path();
        debug!(method = ?request.method, path, "Sending request");

        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(error_for(&path, &response));
        }

        Ok(response)
    }
}

// Struct content is reduced to its update view. Map-shaped content (stanza
// attributes) has no views and is sent as it is.
fn update_form<E: Entry>(entry: &E) -> Result<FormValues, ClientError> {
    let content = content_of(entry)?;

    let form = match content.value.kind() {
        Kind::Struct(fields) => encode(&project(fields, "update"))?,
        _ => encode(content.value)?,
    };

    Ok(form)
}
