//! Configuration management for the MCP server.
//!
//! Server, logging and transport settings come from `MCP_*` environment
//! variables. The Swagger document location is discovered per project:
//!
//! 1. `.swagger-mcp.json` / `swagger-mcp.config.json` in the working directory
//! 2. `SWAGGER_URL_<PROJECT>` where `<PROJECT>` is derived from `package.json`
//! 3. `SWAGGER_URL`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use super::transport::TransportConfig;

/// Project config files, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = [".swagger-mcp.json", "swagger-mcp.config.json"];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Where to find the API document.
    pub swagger: SwaggerConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Where a [`SwaggerConfig`] was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ConfigOrigin {
    /// A project config file.
    File(PathBuf),
    /// `SWAGGER_URL_<SUFFIX>` for the named project.
    Project(String),
    /// `SWAGGER_URL`.
    Environment,
    /// Nothing configured.
    #[default]
    None,
}

/// API document location and credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct SwaggerConfig {
    /// Document URL (`http(s)://`), `file://` URL or local path.
    pub url: Option<String>,

    /// Sent verbatim as the `Authorization` header.
    pub token: Option<String>,

    /// Fetch timeout in seconds.
    pub timeout_secs: u64,

    pub origin: ConfigOrigin,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for SwaggerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwaggerConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("origin", &self.origin)
            .finish()
    }
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            origin: ConfigOrigin::None,
        }
    }
}

/// Shape of a project config file. Both camelCase and env-style keys are
/// accepted.
#[derive(Debug, Default, Deserialize)]
#[allow(non_snake_case)]
struct ProjectFile {
    #[serde(rename = "swaggerUrl")]
    swagger_url: Option<String>,
    SWAGGER_URL: Option<String>,
    token: Option<String>,
    SWAGGER_TOKEN: Option<String>,
    TOKEN: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    name: Option<String>,
    #[serde(rename = "moduleAlias")]
    module_alias: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SwaggerConfig {
    /// Discover the configuration for the current working directory.
    pub fn from_env() -> Self {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::discover(&root, |key| std::env::var(key).ok())
    }

    /// Discover the configuration for `project_root`, reading environment
    /// variables through `env`.
    pub fn discover(project_root: &Path, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::from_config_files(project_root)
            .or_else(|| Self::from_project_env(project_root, &env))
            .unwrap_or_else(|| Self::from_default_env(&env));

        if let Some(timeout) = env("SWAGGER_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid SWAGGER_TIMEOUT_SECS: {}", timeout),
            }
        }

        config
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn from_config_files(project_root: &Path) -> Option<Self> {
        CONFIG_FILE_NAMES.iter().find_map(|name| {
            let path = project_root.join(name);
            if !path.is_file() {
                return None;
            }

            let file: ProjectFile = match std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
            {
                Ok(file) => file,
                Err(e) => {
                    warn!("Failed to read config file {}: {}", path.display(), e);
                    return None;
                }
            };

            let url = non_empty(file.swagger_url).or(non_empty(file.SWAGGER_URL))?;
            Some(Self {
                url: Some(url),
                token: non_empty(file.token)
                    .or(non_empty(file.SWAGGER_TOKEN))
                    .or(non_empty(file.TOKEN)),
                origin: ConfigOrigin::File(path),
                ..Self::default()
            })
        })
    }

    fn from_project_env(project_root: &Path, env: &impl Fn(&str) -> Option<String>) -> Option<Self> {
        let path = project_root.join("package.json");
        let contents = std::fs::read_to_string(&path).ok()?;
        let package: PackageJson = match serde_json::from_str(&contents) {
            Ok(package) => package,
            Err(e) => {
                warn!("Failed to read project config {}: {}", path.display(), e);
                return None;
            }
        };

        let project = non_empty(package.name).or(non_empty(package.module_alias))?;
        let suffix = env_suffix(&project);

        let url = non_empty(env(&format!("SWAGGER_URL_{suffix}")))?;
        Some(Self {
            url: Some(url),
            token: non_empty(env(&format!("SWAGGER_TOKEN_{suffix}")))
                .or_else(|| non_empty(env(&format!("TOKEN_{suffix}")))),
            origin: ConfigOrigin::Project(project),
            ..Self::default()
        })
    }

    fn from_default_env(env: &impl Fn(&str) -> Option<String>) -> Self {
        let url = non_empty(env("SWAGGER_URL"));
        Self {
            origin: if url.is_some() {
                ConfigOrigin::Environment
            } else {
                ConfigOrigin::None
            },
            url,
            token: non_empty(env("SWAGGER_TOKEN")).or_else(|| non_empty(env("TOKEN"))),
            ..Self::default()
        }
    }
}

/// Turn a project name into an environment variable suffix:
/// `skechers-front-portal` -> `SKECHERS_FRONT_PORTAL`.
pub fn env_suffix(project: &str) -> String {
    project
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "swagger-mcp-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables and project files.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`, ...).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();
        config.transport = TransportConfig::from_env();
        config.swagger = SwaggerConfig::from_env();

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_of(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_env_suffix() {
        assert_eq!(env_suffix("skechers-front-portal"), "SKECHERS_FRONT_PORTAL");
        assert_eq!(env_suffix("@scope/app.v2"), "_SCOPE_APP_V2");
    }

    #[test]
    fn test_config_file_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".swagger-mcp.json"),
            r#"{"swaggerUrl": "http://file/v2/api-docs", "TOKEN": "file-token"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "demo"}"#).unwrap();

        let env = env_of(&[
            ("SWAGGER_URL_DEMO", "http://project"),
            ("SWAGGER_URL", "http://default"),
        ]);
        let config = SwaggerConfig::discover(dir.path(), env);

        assert_eq!(config.url.as_deref(), Some("http://file/v2/api-docs"));
        assert_eq!(config.token.as_deref(), Some("file-token"));
        assert_eq!(
            config.origin,
            ConfigOrigin::File(dir.path().join(".swagger-mcp.json"))
        );
    }

    #[test]
    fn test_second_config_file_and_env_style_keys() {
        let dir = TempDir::new().unwrap();
        // No URL here, so the next file is tried.
        fs::write(dir.path().join(".swagger-mcp.json"), r#"{"token": "unused"}"#).unwrap();
        fs::write(
            dir.path().join("swagger-mcp.config.json"),
            r#"{"SWAGGER_URL": "http://second", "SWAGGER_TOKEN": "t2"}"#,
        )
        .unwrap();

        let config = SwaggerConfig::discover(dir.path(), env_of(&[]));
        assert_eq!(config.url.as_deref(), Some("http://second"));
        assert_eq!(config.token.as_deref(), Some("t2"));
    }

    #[test]
    fn test_invalid_config_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".swagger-mcp.json"), "{ nope").unwrap();

        let config =
            SwaggerConfig::discover(dir.path(), env_of(&[("SWAGGER_URL", "http://default")]));
        assert_eq!(config.url.as_deref(), Some("http://default"));
        assert_eq!(config.origin, ConfigOrigin::Environment);
    }

    #[test]
    fn test_project_env() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "skechers-front-portal"}"#,
        )
        .unwrap();

        let env = env_of(&[
            ("SWAGGER_URL_SKECHERS_FRONT_PORTAL", "http://project"),
            ("TOKEN_SKECHERS_FRONT_PORTAL", "project-token"),
            ("SWAGGER_URL", "http://default"),
        ]);
        let config = SwaggerConfig::discover(dir.path(), env);

        assert_eq!(config.url.as_deref(), Some("http://project"));
        assert_eq!(config.token.as_deref(), Some("project-token"));
        assert_eq!(
            config.origin,
            ConfigOrigin::Project("skechers-front-portal".to_string())
        );
    }

    #[test]
    fn test_module_alias_used_without_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"moduleAlias": "portal"}"#).unwrap();

        let config =
            SwaggerConfig::discover(dir.path(), env_of(&[("SWAGGER_URL_PORTAL", "http://alias")]));
        assert_eq!(config.url.as_deref(), Some("http://alias"));
    }

    #[test]
    fn test_default_env() {
        let dir = TempDir::new().unwrap();
        let env = env_of(&[
            ("SWAGGER_URL", "http://default"),
            ("TOKEN", "fallback"),
            ("SWAGGER_TIMEOUT_SECS", "5"),
        ]);
        let config = SwaggerConfig::discover(dir.path(), env);

        assert_eq!(config.url.as_deref(), Some("http://default"));
        assert_eq!(config.token.as_deref(), Some("fallback"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.origin, ConfigOrigin::Environment);
    }

    #[test]
    fn test_nothing_configured() {
        let dir = TempDir::new().unwrap();
        let config = SwaggerConfig::discover(dir.path(), env_of(&[("SWAGGER_TIMEOUT_SECS", "x")]));
        assert!(config.url.is_none());
        assert_eq!(config.origin, ConfigOrigin::None);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_token_redacted_in_debug() {
        let config = SwaggerConfig {
            url: Some("http://example".to_string()),
            token: Some("super_secret_token".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }
}
