//! Response bodies
//!
//! Successful reads answer with an Atom-style feed rendered as JSON:
//!
//! ```json
//! {"entry": [{"name": "errors", "acl": {"app": "search", "owner": "nobody"}, "content": {...}}]}
//! ```
//!
//! Failures carry a `messages` array whose texts end up in the error.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{ClientError, EntryId, Namespace, Response};

#[derive(Deserialize)]
#[serde(bound = "C: DeserializeOwned + Default")]
struct Feed<C> {
    #[serde(default)]
    entry: Vec<FeedEntry<C>>,
}

#[derive(Deserialize)]
#[serde(bound = "C: DeserializeOwned + Default")]
struct FeedEntry<C> {
    name: String,
    #[serde(default)]
    acl: Acl,
    #[serde(default)]
    content: C,
}

#[derive(Deserialize, Default)]
struct Acl {
    #[serde(default)]
    app: String,
    #[serde(default)]
    owner: String,
}

#[derive(Deserialize, Default)]
struct Messages {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    text: String,
}

/// Decode every entry of a feed into its id and content
pub fn entries<C>(body: &str) -> Result<Vec<(EntryId, C)>, ClientError>
where
    C: DeserializeOwned + Default,
{
    let feed: Feed<C> = serde_json::from_str(body)?;

    Ok(feed
        .entry
        .into_iter()
        .map(|entry| {
            let namespace = Namespace::new(entry.acl.owner, entry.acl.app);
            (EntryId::new(namespace, entry.name), entry.content)
        })
        .collect())
}

/// Decode a feed that must hold exactly one entry
pub fn single_entry<C>(body: &str) -> Result<(EntryId, C), ClientError>
where
    C: DeserializeOwned + Default,
{
    let mut found = entries(body)?;

    match found.len() {
        1 => Ok(found.remove(0)),
        count => Err(ClientError::UnexpectedResponse(format!(
            "expected a single entry, found {count}"
        ))),
    }
}

/// The texts of a response's `messages` array; empty when it has none
pub fn messages(body: &str) -> Vec<String> {
    serde_json::from_str::<Messages>(body)
        .unwrap_or_default()
        .messages
        .into_iter()
        .map(|message| message.text)
        .collect()
}

/// The error for a failed `response` to a request of `path`
pub fn error_for(path: &str, response: &Response) -> ClientError {
    let messages = messages(&response.body);

    match response.status {
        404 => ClientError::NotFound {
            path: path.to_string(),
        },
        401 => ClientError::Authentication(messages.join("; ")),
        code => ClientError::Status { code, messages },
    }
}
