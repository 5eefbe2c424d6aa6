//! Client configuration

/// How the client authenticates its requests
#[derive(Clone, Default)]
pub enum Credentials {
    /// No authentication; requests are sent without an `Authorization` header
    #[default]
    None,

    /// Log in once with a username and password
    ///
    /// The session key returned by `POST services/auth/login` is cached and
    /// sent as `Authorization: Splunk {key}` on every later request.
    Password {
        /// The account name
        username: String,
        /// The account password
        password: String,
    },

    /// Use an existing session key as-is
    SessionKey(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::None => f.write_str("None"),
            Credentials::Password { username, .. } => f
                .debug_struct("Password")
                .field("username", username)
                .finish_non_exhaustive(),
            Credentials::SessionKey(_) => f.write_str("SessionKey(..)"),
        }
    }
}

/// Configuration for a [`Client`](crate::Client)
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the management port (e.g., "https://localhost:8089")
    pub url: String,

    /// Authentication method
    pub credentials: Credentials,

    /// Optional timeout for requests in seconds (default: 30)
    pub timeout_seconds: Option<u64>,

    /// Optional custom headers to send with each request
    pub headers: Vec<(String, String)>,

    /// Accept any TLS certificate. Management ports commonly serve
    /// self-signed certificates.
    pub insecure_skip_verify: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "https://localhost:8089".to_string(),
            credentials: Credentials::None,
            timeout_seconds: Some(30),
            headers: Vec::new(),
            insecure_skip_verify: false,
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Log in with a username and password
    pub fn with_password(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_credentials(Credentials::Password {
            username: username.into(),
            password: password.into(),
        })
    }

    /// Authenticate with an existing session key
    pub fn with_session_key(self, key: impl Into<String>) -> Self {
        self.with_credentials(Credentials::SessionKey(key.into()))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Accept invalid TLS certificates
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }
}
