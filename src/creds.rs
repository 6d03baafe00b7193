//! Post-install inspection of the downloaded credentials file.
//!
//! The console exports Desktop-app clients under an `installed` key and web
//! clients under `web`. The form-fill sequence continues past failed steps,
//! so a wrong application type can slip through silently; this check reports
//! it after the fact.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<ClientInfo>,
    web: Option<ClientInfo>,
}

/// Identifiers of an exported OAuth client.
#[derive(Debug, Deserialize)]
pub struct ClientInfo {
    pub client_id: String,
    pub project_id: Option<String>,
}

/// Which application type the file describes.
#[derive(Debug, PartialEq, Eq)]
pub enum ClientKind {
    Desktop,
    Web,
}

/// Parse a credentials JSON and return its client kind and identifiers.
pub fn inspect(path: &Path) -> Result<(ClientKind, ClientInfo)> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    inspect_str(&data)
}

fn inspect_str(data: &str) -> Result<(ClientKind, ClientInfo)> {
    let parsed: CredentialsFile =
        serde_json::from_str(data).context("credentials file is not valid JSON")?;
    if let Some(info) = parsed.installed {
        return Ok((ClientKind::Desktop, info));
    }
    if let Some(info) = parsed.web {
        return Ok((ClientKind::Web, info));
    }
    anyhow::bail!("credentials file has neither an 'installed' nor a 'web' client")
}

/// Print a one-line summary of the installed file; warn when it is not a
/// Desktop-app client.
pub fn report(path: &Path) {
    match inspect(path) {
        Ok((ClientKind::Desktop, info)) => {
            println!("    Client id: {}", info.client_id);
            if let Some(project) = info.project_id {
                println!("    Project:   {project}");
            }
        }
        Ok((ClientKind::Web, info)) => {
            println!("[!] {} holds a *web* client ({})", path.display(), info.client_id);
            println!("    Expected a Desktop app -- the application type step may have failed.");
            println!("    Re-run after deleting the client in the console if Gmail auth fails.");
        }
        Err(e) => {
            println!("[!] Could not inspect {}: {e}", path.display());
        }
    }
}
