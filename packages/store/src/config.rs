//! # Client configuration (`notes-client.toml`)
//!
//! Where the backend lives and how to talk to it.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080/api/v1"
//! group_segment = "groups"     # or "teams" for the older backend
//!
//! [live]
//! url = "ws://localhost:8080/ws"   # omit to disable live updates
//! ```
//!
//! Every section is defaulted, so an empty file is the default configuration.
//! On native targets [`ClientConfig::from_env`] builds the same structure from
//! environment variables (after loading a `.env` file).

use serde::{Deserialize, Serialize};

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub live: LiveConfig,
}

/// Path family used for shared notes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupSegment {
    #[default]
    Groups,
    Teams,
}

impl GroupSegment {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupSegment::Groups => "groups",
            GroupSegment::Teams => "teams",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groups" => Some(GroupSegment::Groups),
            "teams" => Some(GroupSegment::Teams),
            _ => None,
        }
    }
}

/// REST API settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub group_segment: GroupSegment,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            group_segment: GroupSegment::default(),
        }
    }
}

/// Live update channel settings. No URL means live updates are off.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveConfig {
    #[serde(default)]
    pub url: Option<String>,
}

impl ClientConfig {
    /// Create a config pointing at the given API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            live: LiveConfig::default(),
        }
    }

    pub fn with_group_segment(mut self, segment: GroupSegment) -> Self {
        self.api.group_segment = segment;
        self
    }

    pub fn with_live_url(mut self, url: impl Into<String>) -> Self {
        self.live.url = Some(url.into());
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "notes-client.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Build from `NOTES_API_URL`, `NOTES_GROUP_SEGMENT` and `NOTES_LIVE_URL`.
    /// Unset or unparsable variables keep their defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source, using the same names as
    /// [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup("NOTES_API_URL") {
            config.api.base_url = url;
        }
        if let Some(segment) = lookup("NOTES_GROUP_SEGMENT") {
            match GroupSegment::parse(&segment) {
                Some(segment) => config.api.group_segment = segment,
                None => tracing::warn!(%segment, "ignoring unknown NOTES_GROUP_SEGMENT"),
            }
        }
        config.live.url = lookup("NOTES_LIVE_URL").filter(|url| !url.is_empty());
        config
    }
}
