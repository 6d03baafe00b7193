//! Integration tests for download relocation.

mod common;

use common::{temp_downloads, write_download};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use gmail_oauth_setup::relocate::{install_credentials, move_file, newest_download};

#[test]
fn test_newest_download_picks_latest_created() {
    let (_tmp, downloads) = temp_downloads();
    write_download(&downloads, "client_secret_111.json", "first");
    write_download(&downloads, "client_secret_222.json", "second");
    write_download(&downloads, "client_secret_333.json", "third");

    let found = newest_download(&downloads).unwrap().unwrap();
    assert_eq!(
        found.file_name().unwrap().to_str().unwrap(),
        "client_secret_333.json"
    );
}

#[test]
fn test_newest_download_ignores_non_matching_names() {
    let (_tmp, downloads) = temp_downloads();
    write_download(&downloads, "client_secret_old.json", "real");
    write_download(&downloads, "invoice.json", "decoy");
    write_download(&downloads, "client_secret_notes.txt", "decoy");
    write_download(&downloads, "secret_client.json", "decoy");

    let found = newest_download(&downloads).unwrap().unwrap();
    assert_eq!(
        found.file_name().unwrap().to_str().unwrap(),
        "client_secret_old.json"
    );
}

#[test]
fn test_newest_download_empty_dir() {
    let (_tmp, downloads) = temp_downloads();
    assert!(newest_download(&downloads).unwrap().is_none());
}

#[test]
fn test_install_moves_newest_and_preserves_content() {
    let (_tmp, downloads) = temp_downloads();
    write_download(&downloads, "client_secret_stale.json", r#"{"installed": {}}"#);
    let body = r#"{"installed": {"client_id": "abc"}}"#;
    write_download(&downloads, "client_secret_fresh.json", body);

    let config = TempDir::new().unwrap();
    let dest = config.path().join("config").join("credentials.json");

    let moved = install_credentials(&downloads, &dest).unwrap().unwrap();
    assert_eq!(
        moved.file_name().unwrap().to_str().unwrap(),
        "client_secret_fresh.json"
    );
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), body);
    // Source is gone; the stale sibling stays put.
    assert!(!downloads.join("client_secret_fresh.json").exists());
    assert!(downloads.join("client_secret_stale.json").exists());
}

#[test]
fn test_install_overwrites_existing_destination() {
    let (_tmp, downloads) = temp_downloads();
    let body = r#"{"installed": {"client_id": "new"}}"#;
    write_download(&downloads, "client_secret_1.json", body);

    let config = TempDir::new().unwrap();
    let dest = config.path().join("credentials.json");
    std::fs::write(&dest, "stale contents").unwrap();

    install_credentials(&downloads, &dest).unwrap().unwrap();
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), body);
}

#[test]
fn test_install_without_match_leaves_destination_untouched() {
    let (_tmp, downloads) = temp_downloads();
    write_download(&downloads, "unrelated.json", "decoy");

    let config = TempDir::new().unwrap();
    let dest = config.path().join("credentials.json");
    std::fs::write(&dest, "previous run").unwrap();

    assert!(install_credentials(&downloads, &dest).unwrap().is_none());
    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "previous run");
    assert!(downloads.join("unrelated.json").exists());
}

#[test]
fn test_move_file_creates_parent_dirs() {
    let (_tmp, downloads) = temp_downloads();
    let src = downloads.join("client_secret_x.json");
    std::fs::write(&src, "payload").unwrap();

    let config = TempDir::new().unwrap();
    let dest = config.path().join("a").join("b").join("credentials.json");
    move_file(&src, &dest).unwrap();

    assert_eq!(std::fs::read_to_string(&dest).unwrap(), "payload");
    assert!(!src.exists());
}
