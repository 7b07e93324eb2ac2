// Agent Credential Document
// Field names follow the backing agent's auth.json schema, which is the
// only consumer of this file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API token injected by the container runtime.
///
/// Newtype so the secret never leaks through `Debug` formatting of
/// configuration structs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Access the raw secret. Call sites are the credential document and
    /// the downstream env exports, nothing else.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ApiToken(<redacted>)")
    }
}

/// Contents of `auth.json` inside the credential home.
///
/// Exactly three fields. `tokens` and `last_refresh` are serialized as
/// explicit nulls, never omitted: their nullness tells the agent that no
/// cached token state exists and none should be trusted, so it must not
/// attempt silent token rotation against a store it does not own. There is
/// deliberately no constructor that populates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCredentials {
    #[serde(rename = "OPENAI_API_KEY")]
    pub openai_api_key: String,
    pub tokens: Option<serde_json::Value>,
    pub last_refresh: Option<DateTime<Utc>>,
}

impl AgentCredentials {
    /// Build the document from the provisioning token, the only permitted
    /// credential source.
    pub fn from_token(token: &ApiToken) -> Self {
        Self {
            openai_api_key: token.expose().to_string(),
            tokens: None,
            last_refresh: None,
        }
    }
}
