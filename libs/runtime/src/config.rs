use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration with strongly-typed sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Backend-as-a-service connection (store, auth, object storage).
    pub backend: BackendConfig,
    /// Public REST APIs (trivia, encyclopedia search).
    #[serde(default)]
    pub apis: ApisConfig,
    /// Logging configuration (optional, uses defaults if None).
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the backend project (e.g. "https://xyz.supabase.co").
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// Object-storage bucket for avatar images.
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String,
    /// Local state directory; empty => platform default (~/.coursecorrect).
    #[serde(default)]
    pub home_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ApisConfig {
    /// Trivia question endpoint.
    pub trivia_url: String,
    /// Encyclopedia search API endpoint.
    pub wiki_url: String,
}

impl Default for ApisConfig {
    fn default() -> Self {
        Self {
            trivia_url: "https://opentdb.com/api.php".to_string(),
            wiki_url: "https://en.wikipedia.org/w/api.php".to_string(),
        }
    }
}

fn default_avatar_bucket() -> String {
    "avatars".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub console_level: String, // "trace", "debug", "info", "warn", "error", "off"
    #[serde(default)]
    pub file: Option<String>, // "logs/coursecorrect.log", relative to home_dir
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_backups: Option<usize>,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: "warn".to_string(),
            file: Some("logs/coursecorrect.log".to_string()),
            file_level: "debug".to_string(),
            max_backups: Some(3),
            max_size_mb: Some(20),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            avatar_bucket: default_avatar_bucket(),
            home_dir: String::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            apis: ApisConfig::default(),
            logging: Some(LoggingConfig::default()),
        }
    }
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    /// Also normalizes `backend.home_dir` into an absolute path and creates the directory.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Yaml},
            Figment,
        };

        if !config_path.as_ref().is_file() {
            anyhow::bail!(
                "Config file not found: {}",
                config_path.as_ref().display()
            );
        }

        // Start from a base where optional sections are None so they stay
        // None unless explicitly provided by YAML/ENV.
        let base = AppConfig {
            backend: BackendConfig::default(),
            apis: ApisConfig::default(),
            logging: None,
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(base))
            .merge(Yaml::file(config_path.as_ref()))
            // Example: COURSECORRECT__BACKEND__URL=... maps to backend.url
            .merge(Env::prefixed("COURSECORRECT__").split("__"));

        let mut config: AppConfig = figment
            .extract()
            .with_context(|| "Failed to extract config from figment".to_string())?;

        normalize_home_dir_inplace(&mut config.backend)
            .context("Failed to resolve backend.home_dir")?;

        Ok(config)
    }

    /// Load configuration from file or fall back to defaults plus env overrides.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        use figment::{
            providers::{Env, Serialized},
            Figment,
        };

        match config_path {
            Some(path) => Self::load_layered(path),
            None => {
                let mut c: AppConfig = Figment::new()
                    .merge(Serialized::defaults(Self::default()))
                    .merge(Env::prefixed("COURSECORRECT__").split("__"))
                    .extract()
                    .context("Failed to extract config from figment (defaults)")?;
                normalize_home_dir_inplace(&mut c.backend)
                    .context("Failed to resolve backend.home_dir (defaults)")?;
                Ok(c)
            }
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let logging = self.logging.get_or_insert_with(LoggingConfig::default);
        logging.console_level = match args.verbose {
            0 => logging.console_level.clone(), // keep
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        };
    }

    /// Absolute path of a file inside the state directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        Path::new(&self.backend.home_dir).join(rel)
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<String>,
    pub verbose: u8,
}

const fn default_subdir() -> &'static str {
    ".coursecorrect"
}

/// Normalize `backend.home_dir` to an absolute path and create the directory.
fn normalize_home_dir_inplace(backend: &mut BackendConfig) -> Result<()> {
    let resolved: PathBuf = if backend.home_dir.trim().is_empty() {
        let base = dirs::home_dir().context("Cannot determine user home directory")?;
        base.join(default_subdir())
    } else {
        let p = PathBuf::from(&backend.home_dir);
        if p.is_relative() {
            std::env::current_dir()?.join(p)
        } else {
            p
        }
    };

    std::fs::create_dir_all(&resolved)
        .with_context(|| format!("Failed to create home dir {}", resolved.display()))?;

    backend.home_dir = resolved.to_string_lossy().to_string();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_point_at_public_apis() {
        let apis = ApisConfig::default();
        assert!(apis.trivia_url.contains("opentdb.com"));
        assert!(apis.wiki_url.contains("wikipedia.org"));
    }

    #[test]
    fn load_layered_reads_yaml_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            format!(
                "backend:\n  url: https://proj.example.co\n  anon_key: key123\n  home_dir: {}\nlogging:\n  console_level: debug\n",
                dir.path().join("state").display()
            ),
        )
        .unwrap();

        let config = AppConfig::load_layered(&path).unwrap();
        assert_eq!(config.backend.url, "https://proj.example.co");
        assert_eq!(config.backend.anon_key, "key123");
        assert_eq!(config.backend.avatar_bucket, "avatars");
        assert_eq!(config.logging.as_ref().unwrap().console_level, "debug");
        // home_dir was created
        assert!(Path::new(&config.backend.home_dir).is_dir());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = AppConfig::load_layered("/nonexistent/config.yaml").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn verbosity_override_wins_over_config() {
        let mut config = AppConfig::default();
        config.logging.as_mut().unwrap().console_level = "warn".to_string();
        config.apply_cli_overrides(&CliArgs {
            config: None,
            verbose: 2,
        });
        assert_eq!(config.logging.unwrap().console_level, "debug");
    }

    #[test]
    fn yaml_round_trip() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("backend:"));
        assert!(yaml.contains("trivia_url:"));
    }
}
