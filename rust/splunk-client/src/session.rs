//! Session key cache

use serde::Deserialize;
use splunk_values::FormValues;
use tokio::sync::Mutex;
use tracing::debug;

use crate::response::error_for;
use crate::{ClientError, Credentials, Request, Transport};

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "sessionKey")]
    session_key: String,
}

/// Holds the session key of one client.
///
/// The first request that needs a key logs in; requests racing it wait on the
/// same lock and reuse its key, so a client logs in at most once until the
/// cache is cleared.
#[derive(Debug, Default)]
pub struct SessionCache {
    key: Mutex<Option<String>>,
}

impl SessionCache {
    /// An empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached session key, logging in first if needed.
    ///
    /// Returns `None` when `credentials` carry no authentication.
    pub async fn session_key<T>(
        &self,
        transport: &T,
        credentials: &Credentials,
    ) -> Result<Option<String>, ClientError>
    where
        T: Transport + ?Sized,
    {
        let mut key = self.key.lock().await;

        if let Some(key) = key.as_ref() {
            return Ok(Some(key.clone()));
        }

        let fresh = match credentials {
            Credentials::None => return Ok(None),
            Credentials::SessionKey(session_key) => session_key.clone(),
            Credentials::Password { username, password } => {
                login(transport, username, password).await?
            }
        };

        *key = Some(fresh.clone());
        Ok(Some(fresh))
    }

    /// Forget the cached key; the next request logs in again
    pub async fn clear(&self) {
        self.key.lock().await.take();
    }
}

async fn login<T>(transport: &T, username: &str, password: &str) -> Result<String, ClientError>
where
    T: Transport + ?Sized,
{
    debug!(username, "Logging in");

    let mut form = FormValues::new();
    form.add("username", username);
    form.add("password", password);
    form.add("output_mode", "json");

    let request = Request::post(
        vec!["services".into(), "auth".into(), "login".into()],
        form,
    );
    let path = request.display_path();
    let response = transport.send(request).await?;

    if !response.is_success() {
        return Err(match error_for(&path, &response) {
            ClientError::Status { messages, .. } => {
                ClientError::Authentication(messages.join("; "))
            }
            other => other,
        });
    }

    let login: LoginResponse = serde_json::from_str(&response.body)?;

    if login.session_key.is_empty() {
        return Err(ClientError::Authentication(
            "login response carried an empty session key".into(),
        ));
    }

    Ok(login.session_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTransport;
    use pretty_assertions::assert_eq;

    fn password() -> Credentials {
        Credentials::Password {
            username: "admin".into(),
            password: "changeme".into(),
        }
    }

    #[tokio::test]
    async fn it_logs_in_once() -> anyhow::Result<()> {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"sessionKey": "abc123"}"#).await;

        let cache = SessionCache::new();
        assert_eq!(cache.session_key(&transport, &password()).await?, Some("abc123".into()));
        assert_eq!(cache.session_key(&transport, &password()).await?, Some("abc123".into()));

        let requests = transport.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].display_path(), "services/auth/login");

        let form = requests[0].form.clone().unwrap_or_default();
        assert_eq!(form.get("username"), Some("admin"));
        assert_eq!(form.get("password"), Some("changeme"));
        assert_eq!(form.get("output_mode"), Some("json"));
        Ok(())
    }

    #[tokio::test]
    async fn it_shares_one_login_between_concurrent_callers() -> anyhow::Result<()> {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"sessionKey": "shared"}"#).await;

        let cache = SessionCache::new();
        let credentials = password();
        let (first, second, third) = tokio::join!(
            cache.session_key(&transport, &credentials),
            cache.session_key(&transport, &credentials),
            cache.session_key(&transport, &credentials),
        );

        assert_eq!(first?, Some("shared".into()));
        assert_eq!(second?, Some("shared".into()));
        assert_eq!(third?, Some("shared".into()));
        assert_eq!(transport.requests().await.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn it_uses_session_keys_as_given() -> anyhow::Result<()> {
        let transport = MemoryTransport::new();
        let cache = SessionCache::new();

        let key = cache
            .session_key(&transport, &Credentials::SessionKey("given".into()))
            .await?;
        assert_eq!(key, Some("given".into()));
        assert!(transport.requests().await.is_empty());

        let none = SessionCache::new()
            .session_key(&transport, &Credentials::None)
            .await?;
        assert_eq!(none, None);
        Ok(())
    }

    #[tokio::test]
    async fn it_reports_rejected_logins() {
        let transport = MemoryTransport::new();
        transport
            .respond(
                401,
                r#"{"messages": [{"type": "WARN", "text": "Login failed"}]}"#,
            )
            .await;

        let error = SessionCache::new()
            .session_key(&transport, &password())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            ClientError::Authentication(ref message) if message == "Login failed"
        ));
    }

    #[tokio::test]
    async fn it_logs_in_again_after_clearing() -> anyhow::Result<()> {
        let transport = MemoryTransport::new();
        transport.respond(200, r#"{"sessionKey": "first"}"#).await;
        transport.respond(200, r#"{"sessionKey": "second"}"#).await;

        let cache = SessionCache::new();
        assert_eq!(cache.session_key(&transport, &password()).await?, Some("first".into()));
        cache.clear().await;
        assert_eq!(cache.session_key(&transport, &password()).await?, Some("second".into()));
        Ok(())
    }
}
