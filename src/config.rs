use serde::{Deserialize, Serialize};

use std::{collections::HashMap, env, fs, path::Path};

const DEFAULT_API_URL: &str = "/api/notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Notes API base URL, absolute or relative to `api_origin`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Origin a relative `api_url` is resolved against
    #[serde(default = "default_api_origin")]
    pub api_origin: String,
    /// Path the main view is served at
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_origin() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_base_path() -> String {
    "/".to_string()
}

const fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_origin: default_api_origin(),
            base_path: default_base_path(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Absolute base URL every notes API path is appended to.
    pub fn api_base_url(&self) -> String {
        let api_url = self.api_url.trim_end_matches('/');
        if api_url.starts_with("http://") || api_url.starts_with("https://") {
            return api_url.to_string();
        }

        let origin = self.api_origin.trim_end_matches('/');
        if api_url.starts_with('/') {
            format!("{origin}{api_url}")
        } else {
            format!("{origin}/{api_url}")
        }
    }

    fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url.filter(|url| !url.is_empty()) {
            self.api_url = api_url;
        }
        self
    }
}

fn read_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

fn load_file_or_env(
    dir: &Path,
    config_path: &Path,
    vars: &HashMap<String, String>,
) -> Result<Config, Box<dyn std::error::Error>> {
    // Try env path
    if config_path.exists() {
        return read_file(config_path);
    }

    // Fallback to config.yaml
    let default_path = dir.join("config.yaml");
    if default_path.exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path.display()
        );
        return read_file(&default_path);
    }

    // Fallback to config.example.yaml
    let example_path = dir.join("config.example.yaml");
    if example_path.exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'",
            config_path.display()
        );
        return read_file(&example_path);
    }

    // Fallback to environment variables
    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    envy::from_iter::<_, Config>(vars.clone()).map_err(|e| {
        format!(
            "Config file not found and environment variables are invalid. \
             Tried: '{}', 'config.yaml', 'config.example.yaml', and environment variables. \
             Error: {e}",
            config_path.display()
        )
        .into()
    })
}

/// Resolves config files relative to `dir` and reads variables from `vars`.
fn load_config_in(
    dir: &Path,
    vars: impl IntoIterator<Item = (String, String)>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let vars: HashMap<String, String> = vars.into_iter().collect();

    // Retrieve env variable
    let config_path = dir.join(
        vars.get("NOTES_FRONTEND_CONFIG")
            .map_or("config.yaml", String::as_str),
    );

    let config = load_file_or_env(dir, &config_path, &vars)?;

    // API_URL wins over whatever the file says
    Ok(config.with_api_url_override(vars.get("API_URL").cloned()))
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    load_config_in(Path::new("."), env::vars())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_relative_notes_path() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url, "/api/notes");
        assert_eq!(cfg.base_path, "/");
        assert_eq!(cfg.api_base_url(), "http://127.0.0.1:8000/api/notes");
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg: Config = serde_yaml::from_str("port: 8080\napi_origin: http://notes:8000/\n").unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.api_url, "/api/notes");
        assert_eq!(cfg.api_base_url(), "http://notes:8000/api/notes");
    }

    #[test]
    fn absolute_api_url_ignores_origin() {
        let cfg = Config {
            api_url: "https://notes.example.com/v1/notes/".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.api_base_url(), "https://notes.example.com/v1/notes");
    }

    #[test]
    fn relative_api_url_without_slash_is_joined() {
        let cfg = Config {
            api_url: "rest/notes".to_string(),
            api_origin: "http://localhost:8000".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.api_base_url(), "http://localhost:8000/rest/notes");
    }

    #[test]
    fn api_url_override_replaces_file_value() {
        let cfg = Config::default().with_api_url_override(Some("/rest/notes".to_string()));
        assert_eq!(cfg.api_url, "/rest/notes");

        let cfg = Config::default().with_api_url_override(Some(String::new()));
        assert_eq!(cfg.api_url, "/api/notes");

        let cfg = Config::default().with_api_url_override(None);
        assert_eq!(cfg.api_url, "/api/notes");
    }

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn named_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("frontend.yaml"),
            "api_url: https://notes.example.com/api/notes\nport: 8081\n",
        )
        .unwrap();

        let cfg = load_config_in(
            dir.path(),
            vars(&[("NOTES_FRONTEND_CONFIG", "frontend.yaml")]),
        )
        .unwrap();

        assert_eq!(cfg.port, 8081);
        assert_eq!(cfg.api_base_url(), "https://notes.example.com/api/notes");
    }

    #[test]
    fn api_url_variable_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontend.yaml");
        fs::write(&path, "api_url: /from/file\n").unwrap();

        let cfg = load_config_in(
            dir.path(),
            vars(&[
                ("NOTES_FRONTEND_CONFIG", path.to_str().unwrap()),
                ("API_URL", "/from/env"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.api_url, "/from/env");
    }

    #[test]
    fn missing_named_file_falls_back_to_config_yaml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "port: 9000\n").unwrap();
        fs::write(dir.path().join("config.example.yaml"), "port: 9999\n").unwrap();

        let cfg = load_config_in(
            dir.path(),
            vars(&[("NOTES_FRONTEND_CONFIG", "missing.yaml")]),
        )
        .unwrap();

        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn example_file_is_the_last_file_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.example.yaml"), "port: 9999\n").unwrap();

        let cfg = load_config_in(dir.path(), vars(&[])).unwrap();

        assert_eq!(cfg.port, 9999);
    }

    #[test]
    fn environment_is_used_without_any_file() {
        let dir = tempfile::tempdir().unwrap();

        let cfg = load_config_in(
            dir.path(),
            vars(&[
                ("API_ORIGIN", "http://notes:9000"),
                ("BASE_PATH", "/app"),
                ("PORT", "8082"),
                ("API_URL", "/rest/notes"),
            ]),
        )
        .unwrap();

        assert_eq!(cfg.port, 8082);
        assert_eq!(cfg.base_path, "/app");
        assert_eq!(cfg.api_base_url(), "http://notes:9000/rest/notes");
    }

    #[test]
    fn invalid_environment_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let error = load_config_in(dir.path(), vars(&[("PORT", "not-a-port")])).unwrap_err();

        assert!(error.to_string().contains("environment variables are invalid"));
    }

    #[test]
    fn shipped_example_config_matches_defaults() {
        let cfg = load_config_in(Path::new(env!("CARGO_MANIFEST_DIR")), vars(&[])).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
