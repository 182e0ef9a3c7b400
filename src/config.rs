//! Configuration constants and profile loading for texmark
//!
//! Settings live in an INI profile file where every section is a named
//! profile. A missing file or section falls back to the built-in defaults.

use anyhow::{Context, Result};
use ini::Ini;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default profile file path for texmark
pub const DEFAULT_PROFILE_PATH: &str = "~/.texmark/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "TEXMARK_PROFILE_PATH";

/// Environment variable name for the assistant API key
pub const AI_API_KEY_ENV_VAR: &str = "TEXMARK_AI_API_KEY";

/// Profile used when none is given on the command line
pub const DEFAULT_PROFILE_NAME: &str = "default";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STORAGE_PATH: &str = "~/.texmark/storage.json";
pub const DEFAULT_WKHTMLTOPDF: &str = "wkhtmltopdf";
pub const DEFAULT_AI_API_URL: &str = "https://api.deepinfra.com/v1/openai/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.1";

/// Quiet period between the last edit and the preview/save it triggers
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Period of the background save to server and local storage
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(30);

/// How long a transient save-status message stays visible
pub const STATUS_REVERT_DELAY: Duration = Duration::from_secs(2);

/// Maximum number of assistant exchanges kept in the conversation history
pub const HISTORY_LIMIT: usize = 10;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Upstream chat-completions settings for the assistant
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantSettings {
    pub api_url: String,
    pub model: String,
    /// Without a key the assistant answers from its offline fallback only
    pub api_key: Option<String>,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_AI_API_URL.to_string(),
            model: DEFAULT_AI_MODEL.to_string(),
            api_key: None,
        }
    }
}

/// A resolved configuration profile
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    name: String,
    server_url: String,
    host: String,
    port: u16,
    storage_path: PathBuf,
    wkhtmltopdf: PathBuf,
    assistant: AssistantSettings,
}

impl Profile {
    /// Built-in defaults under the given profile name
    pub fn defaults(name: &str) -> Self {
        Self {
            name: name.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            storage_path: expand_path(DEFAULT_STORAGE_PATH),
            wkhtmltopdf: PathBuf::from(DEFAULT_WKHTMLTOPDF),
            assistant: AssistantSettings::default(),
        }
    }

    /// Load profile `name` from the INI file at `path`
    ///
    /// A missing file is not an error. The API key from the environment
    /// takes precedence over the file.
    pub fn load(path: &str, name: &str) -> Result<Self> {
        let expanded = expand_path(path);
        let mut profile = if expanded.exists() {
            tracing::debug!("Loading profile '{}' from '{}'", name, expanded.display());
            let ini = Ini::load_from_file(&expanded)
                .with_context(|| format!("Failed to read profile file {}", expanded.display()))?;
            Self::from_ini(&ini, name)?
        } else {
            tracing::debug!(
                "Profile file '{}' not found, using defaults",
                expanded.display()
            );
            Self::defaults(name)
        };

        if let Some(key) = std::env::var_os(AI_API_KEY_ENV_VAR).and_then(|v| v.into_string().ok()) {
            if !key.is_empty() {
                profile.assistant.api_key = Some(key);
            }
        }

        Ok(profile)
    }

    /// Build a profile from an already parsed INI document
    pub fn from_ini(ini: &Ini, name: &str) -> Result<Self> {
        let mut profile = Self::defaults(name);

        let Some(section) = ini.section(Some(name)) else {
            tracing::debug!("Profile '{}' not found, using defaults", name);
            return Ok(profile);
        };

        if let Some(server) = section.get("server") {
            profile.server_url = server.trim_end_matches('/').to_string();
        }
        if let Some(host) = section.get("host") {
            profile.host = host.to_string();
        }
        if let Some(port) = section.get("port") {
            profile.port = port
                .parse()
                .with_context(|| format!("Invalid port '{port}' in profile '{name}'"))?;
        }
        if let Some(storage) = section.get("storage") {
            profile.storage_path = expand_path(storage);
        }
        if let Some(binary) = section.get("wkhtmltopdf") {
            profile.wkhtmltopdf = expand_path(binary);
        }
        if let Some(url) = section.get("ai_api_url") {
            profile.assistant.api_url = url.to_string();
        }
        if let Some(model) = section.get("ai_model") {
            profile.assistant.model = model.to_string();
        }
        if let Some(key) = section.get("ai_api_key") {
            profile.assistant.api_key = Some(key.to_string()).filter(|k| !k.is_empty());
        }

        Ok(profile)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL of the server the editor controller talks to
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn set_server_url(&mut self, url: impl Into<String>) {
        self.server_url = url.into().trim_end_matches('/').to_string();
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_bind(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn wkhtmltopdf(&self) -> &Path {
        &self.wkhtmltopdf
    }

    pub fn assistant(&self) -> &AssistantSettings {
        &self.assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_path() {
        assert_eq!(DEFAULT_PROFILE_PATH, "~/.texmark/profile");
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(PROFILE_PATH_ENV_VAR, "TEXMARK_PROFILE_PATH");
    }

    #[test]
    fn test_get_profile_path_env_override() {
        // Save current env var state
        let original = std::env::var_os(PROFILE_PATH_ENV_VAR);

        let test_path = "/custom/profile/path";
        std::env::set_var(PROFILE_PATH_ENV_VAR, test_path);
        assert_eq!(get_profile_path(), test_path);

        std::env::remove_var(PROFILE_PATH_ENV_VAR);
        assert_eq!(get_profile_path(), DEFAULT_PROFILE_PATH);

        // Restore original state
        if let Some(val) = original {
            std::env::set_var(PROFILE_PATH_ENV_VAR, val);
        }
    }

    #[test]
    fn profile_should_fall_back_to_defaults_for_missing_section() {
        let ini = Ini::load_from_str("[other]\nport = 9000\n").unwrap();
        let profile = Profile::from_ini(&ini, "default").unwrap();

        assert_eq!(profile.name(), "default");
        assert_eq!(profile.port(), DEFAULT_PORT);
        assert_eq!(profile.server_url(), DEFAULT_SERVER_URL);
        assert_eq!(profile.assistant(), &AssistantSettings::default());
    }

    #[test]
    fn profile_should_read_section_values() {
        let text = "[work]\n\
                    server = http://docs.internal:8080/\n\
                    host = 0.0.0.0\n\
                    port = 8080\n\
                    wkhtmltopdf = /opt/wk/bin/wkhtmltopdf\n\
                    ai_model = tiny\n\
                    ai_api_key = secret\n";
        let ini = Ini::load_from_str(text).unwrap();
        let profile = Profile::from_ini(&ini, "work").unwrap();

        assert_eq!(profile.server_url(), "http://docs.internal:8080");
        assert_eq!(profile.host(), "0.0.0.0");
        assert_eq!(profile.port(), 8080);
        assert_eq!(profile.wkhtmltopdf(), Path::new("/opt/wk/bin/wkhtmltopdf"));
        assert_eq!(profile.assistant().model, "tiny");
        assert_eq!(profile.assistant().api_key.as_deref(), Some("secret"));
        assert_eq!(profile.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn profile_should_reject_invalid_port() {
        let ini = Ini::load_from_str("[default]\nport = many\n").unwrap();
        let result = Profile::from_ini(&ini, "default");

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid port"));
    }

    #[test]
    fn profile_should_load_defaults_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-profile");
        let profile = Profile::load(path.to_str().unwrap(), "default").unwrap();

        assert_eq!(profile.port(), DEFAULT_PORT);
        assert_eq!(profile.host(), DEFAULT_HOST);
    }

    #[test]
    fn set_bind_should_override_only_given_values() {
        let mut profile = Profile::defaults("default");
        profile.set_bind(None, Some(7000));

        assert_eq!(profile.host(), DEFAULT_HOST);
        assert_eq!(profile.port(), 7000);
    }
}
