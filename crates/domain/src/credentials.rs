use serde::{Deserialize, Serialize};
use xdrvault_core::{AppError, AppResult, NonEmptyString};

/// Authentication scheme selector for the alert source API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    /// Literal key passed as the `Authorization` header.
    Standard,
    /// Per-request nonce, millisecond timestamp, and SHA-256 signature.
    Advanced,
}

impl KeyType {
    /// Parses the wire spelling used by the config store.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "advanced" => Ok(Self::Advanced),
            other => Err(AppError::Validation(format!(
                "unknown key type '{other}', expected 'standard' or 'advanced'"
            ))),
        }
    }

    /// Returns the stable string value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Advanced => "advanced",
        }
    }
}

/// API key material and endpoint location for one retrieval run.
///
/// Resolved once at run start, owned by that run, and never persisted.
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    key_id: i64,
    key: NonEmptyString,
    key_type: KeyType,
    host: NonEmptyString,
    path: NonEmptyString,
}

impl ApiCredentials {
    /// Creates validated credentials.
    pub fn new(
        key_id: i64,
        key: impl Into<String>,
        key_type: KeyType,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            key_id,
            key: NonEmptyString::new(key)?,
            key_type,
            host: NonEmptyString::new(host)?,
            path: NonEmptyString::new(path)?,
        })
    }

    /// Returns the numeric key identifier.
    #[must_use]
    pub fn key_id(&self) -> i64 {
        self.key_id
    }

    /// Returns the raw key material.
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// Returns the authentication scheme for this key.
    #[must_use]
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Returns the endpoint location, detached from key material.
    #[must_use]
    pub fn target(&self) -> ApiTarget {
        ApiTarget {
            host: self.host.as_str().to_owned(),
            path: self.path.as_str().to_owned(),
        }
    }
}

/// Endpoint location of the alert source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    host: String,
    path: String,
}

impl ApiTarget {
    /// Returns the host portion of the endpoint.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Returns the request path of the alerts endpoint.
    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Composes the full endpoint URL.
    ///
    /// Hosts default to `https`; a host carrying an explicit scheme is used
    /// as-is so local stubs can be reached over plain HTTP.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.host.contains("://") {
            format!("{}{}", self.host, self.path)
        } else {
            format!("https://{}{}", self.host, self.path)
        }
    }
}

/// Computed authentication headers for exactly one API request.
///
/// The advanced scheme binds a single-use nonce and timestamp into the
/// signature, so a value must never be reused across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthHeaders {
    pairs: Vec<(String, String)>,
}

impl AuthHeaders {
    /// Creates an empty header set.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends one header.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns the value of a header by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(stored, _)| stored == name)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over header name/value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true when no header has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
