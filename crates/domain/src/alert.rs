use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque alert payload as returned by the alert source.
///
/// The client never interprets alert fields; records pass through to
/// storage exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertRecord(Value);

impl AlertRecord {
    /// Wraps a raw JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw JSON value.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwraps into the raw JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for AlertRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Response envelope of the alerts endpoint.
///
/// The source may legitimately answer `{"reply": {}}` or omit `reply`
/// entirely at end of data, so a missing `reply.alerts` path resolves to an
/// empty page rather than an error. A body that fails to parse at all is a
/// malformed response and is rejected at the fetch seam.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlertEnvelope {
    #[serde(default)]
    reply: Option<ReplyBody>,
}

/// Inner `reply` object of the response envelope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplyBody {
    #[serde(default)]
    alerts: Option<Vec<AlertRecord>>,
}

impl AlertEnvelope {
    /// Extracts the alerts page, treating an absent path as end of data.
    #[must_use]
    pub fn into_alerts(self) -> Vec<AlertRecord> {
        self.reply
            .and_then(|reply| reply.alerts)
            .unwrap_or_default()
    }
}
