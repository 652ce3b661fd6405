use roster_store::ArtifactPaths;
use roster_store::artifacts::{DEFAULT_INDEX_PATH, DEFAULT_METADATA_PATH};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    pub index_path: PathBuf,
    pub metadata_path: PathBuf,
    pub llm_model: String,
    pub llm_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            index_path: DEFAULT_INDEX_PATH.into(),
            metadata_path: DEFAULT_METADATA_PATH.into(),
            llm_model: DEFAULT_LLM_MODEL.into(),
            llm_timeout: Duration::from_secs(60),
        }
    }
}

impl ServerConfig {
    /// Create config from `HR_CHAT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("HR_CHAT_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let llm_timeout = lookup("HR_CHAT_LLM_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.llm_timeout);

        Self {
            host: lookup("HR_CHAT_HOST").unwrap_or(defaults.host),
            port,
            index_path: lookup("HR_CHAT_INDEX_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.index_path),
            metadata_path: lookup("HR_CHAT_METADATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.metadata_path),
            llm_model: lookup("HR_CHAT_LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_timeout,
        }
    }

    /// Get bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            index: self.index_path.clone(),
            metadata: self.metadata_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.llm_model, "gemini-2.5-flash");
        assert_eq!(config.index_path, PathBuf::from("data/employee_index.bin"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("HR_CHAT_HOST", "127.0.0.1"),
            ("HR_CHAT_PORT", "9100"),
            ("HR_CHAT_INDEX_PATH", "/srv/idx.bin"),
            ("HR_CHAT_METADATA_PATH", "/srv/meta.json"),
            ("HR_CHAT_LLM_MODEL", "gemini-2.5-pro"),
            ("HR_CHAT_LLM_TIMEOUT_SECS", "15"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
        assert_eq!(config.llm_model, "gemini-2.5-pro");
        assert_eq!(config.llm_timeout, Duration::from_secs(15));

        let paths = config.artifact_paths();
        assert_eq!(paths.index, PathBuf::from("/srv/idx.bin"));
        assert_eq!(paths.metadata, PathBuf::from("/srv/meta.json"));
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = ServerConfig::from_lookup(|k| match k {
            "HR_CHAT_PORT" => Some("eighty".into()),
            "HR_CHAT_LLM_TIMEOUT_SECS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.port, 8000);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
    }
}
