//! Integration tests for path and identifier resolution.

use std::path::PathBuf;

use gmail_oauth_setup::resolve;

// Environment mutation in one test body so parallel tests in this binary
// never race on the same variables.
#[test]
fn test_env_overrides_and_defaults() {
    unsafe {
        std::env::set_var("GMAIL_SETUP_PROJECT", "other-project");
        std::env::set_var("GMAIL_SETUP_CONFIG", "/srv/gmail/config");
        std::env::set_var("GMAIL_SETUP_DOWNLOADS", "/srv/downloads");
    }

    assert_eq!(resolve::project_id(), "other-project");
    assert_eq!(
        resolve::oauth_client_url(),
        "https://console.cloud.google.com/apis/credentials/oauthclient?project=other-project"
    );
    assert_eq!(resolve::config_dir(), PathBuf::from("/srv/gmail/config"));
    assert_eq!(
        resolve::credentials_json(),
        PathBuf::from("/srv/gmail/config/credentials.json")
    );
    assert_eq!(resolve::downloads_dir(), PathBuf::from("/srv/downloads"));

    unsafe {
        std::env::remove_var("GMAIL_SETUP_PROJECT");
        std::env::remove_var("GMAIL_SETUP_CONFIG");
        std::env::remove_var("GMAIL_SETUP_DOWNLOADS");
    }

    assert_eq!(resolve::project_id(), resolve::DEFAULT_PROJECT_ID);
    assert!(
        resolve::config_dir().ends_with("ollama-local/mcp/gmail/config"),
        "unexpected default config dir: {}",
        resolve::config_dir().display()
    );
}

#[test]
fn test_expand_tilde() {
    let home = resolve::home_dir();
    assert_eq!(resolve::expand_tilde("~/Downloads"), home.join("Downloads"));
    assert_eq!(resolve::expand_tilde("~"), home);
    assert_eq!(
        resolve::expand_tilde("/absolute/path"),
        PathBuf::from("/absolute/path")
    );
}

#[test]
fn test_screenshot_path_is_in_temp() {
    let path = resolve::screenshot_path();
    assert!(path.starts_with(std::env::temp_dir()));
    assert_eq!(path.file_name().unwrap().to_str().unwrap(), "oauth-screen.png");
}

#[test]
fn test_client_name_constant() {
    assert_eq!(resolve::CLIENT_NAME, "sashi-cli");
}
