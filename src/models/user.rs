//! Dashboard users and their per-server configuration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dashboard user, keyed by Discord id.
#[derive(Debug, Clone)]
pub struct User {
    pub discord_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub joined_since: Option<String>,
    pub servers: Vec<ServerConfig>,
}

impl User {
    /// Find the configuration of one server by its id.
    pub fn server(&self, server_id: &str) -> Option<&ServerConfig> {
        self.servers
            .iter()
            .find(|s| s.server_id() == Some(server_id))
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            name: self.name.clone(),
            email: self.email.clone(),
            joined_since: self.joined_since.clone(),
        }
    }
}

/// The public part of a user returned next to a server configuration.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_since: Option<String>,
}

/// Configuration of one Discord server. The payload has no fixed schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerConfig(pub Map<String, Value>);

impl ServerConfig {
    pub fn server_id(&self) -> Option<&str> {
        self.0.get("server_id").and_then(Value::as_str)
    }

    pub fn is_bot_added(&self) -> Option<&Value> {
        self.0.get("is_bot_added")
    }

    /// Build the element that replaces the stored one.
    ///
    /// The payload is taken as is; `server_id` is pinned to the addressed server and
    /// `last_updated` is stamped.
    pub fn replacement(mut payload: Map<String, Value>, server_id: &str, now: String) -> Self {
        payload.insert("server_id".to_string(), Value::String(server_id.to_string()));
        payload.insert("last_updated".to_string(), Value::String(now));
        Self(payload)
    }
}

/// Response body for `GET /user-config/{serverId}`.
#[derive(Debug, Serialize)]
pub struct UserConfigResponse {
    pub user: UserSummary,
    pub server: ServerConfig,
    #[serde(rename = "isBotAdded", skip_serializing_if = "Option::is_none")]
    pub is_bot_added: Option<Value>,
}

/// Request body for `PUT /user-config/{serverId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserConfigRequest {
    #[serde(default)]
    pub server: Option<Map<String, Value>>,
}
