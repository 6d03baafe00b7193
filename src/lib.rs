//! Automates the one-time Google Cloud Console chore of creating an OAuth
//! "Desktop app" client for the Gmail API: drives a browser through the
//! creation form, downloads the client-secret JSON, and installs it as
//! `credentials.json` in the local config directory.
//!
//! Two binaries share this library: `gmail-oauth-setup` runs the full flow,
//! `click-helper` is a weaker diagnostic assist for when the flow stalls.

pub mod assist;
pub mod creds;
pub mod driver;
pub mod login;
pub mod relocate;
pub mod resolve;
pub mod setup;
pub mod util;
