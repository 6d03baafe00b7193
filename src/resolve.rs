//! Path and identifier resolution.
//!
//! Everything the flow reads or writes is a fixed location; each one can be
//! overridden through an environment variable:
//!   GMAIL_SETUP_PROJECT    cloud project id
//!   GMAIL_SETUP_CONFIG     destination config directory
//!   GMAIL_SETUP_DOWNLOADS  browser downloads directory

use std::path::PathBuf;

use directories::UserDirs;

/// Cloud project the OAuth client is created under.
pub const DEFAULT_PROJECT_ID: &str = "tm012-git-tracking";

/// Display name typed into the client-creation form.
pub const CLIENT_NAME: &str = "sashi-cli";

/// Return the cloud project id.
pub fn project_id() -> String {
    match std::env::var("GMAIL_SETUP_PROJECT") {
        Ok(v) if !v.is_empty() => v,
        _ => DEFAULT_PROJECT_ID.to_string(),
    }
}

/// OAuth-client-creation URL for the resolved project.
pub fn oauth_client_url() -> String {
    format!(
        "https://console.cloud.google.com/apis/credentials/oauthclient?project={}",
        project_id()
    )
}

/// Return the config directory the credentials file is installed into.
pub fn config_dir() -> PathBuf {
    if let Ok(env) = std::env::var("GMAIL_SETUP_CONFIG") {
        if !env.is_empty() {
            return expand_tilde(&env);
        }
    }
    home_dir().join("ollama-local/mcp/gmail/config")
}

/// Final destination for the downloaded client secret.
pub fn credentials_json() -> PathBuf {
    config_dir().join("credentials.json")
}

/// Return the directory the browser deposits downloads into.
pub fn downloads_dir() -> PathBuf {
    if let Ok(env) = std::env::var("GMAIL_SETUP_DOWNLOADS") {
        if !env.is_empty() {
            return expand_tilde(&env);
        }
    }
    if let Some(dirs) = UserDirs::new() {
        if let Some(dl) = dirs.download_dir() {
            return dl.to_path_buf();
        }
    }
    home_dir().join("Downloads")
}

/// Chrome user-data directory reused for session continuity.
pub fn chrome_profile_dir() -> PathBuf {
    home_dir().join(".config/google-chrome")
}

/// Where the click-helper writes its diagnostic screenshots.
pub fn screenshot_path() -> PathBuf {
    std::env::temp_dir().join("oauth-screen.png")
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}
