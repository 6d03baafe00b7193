//! Login-redirect detection and the bounded wait for the operator to finish
//! interactive authentication.
//!
//! The console bounces unauthenticated sessions to accounts.google.com.
//! There is no event to subscribe to, so the wait polls the current URL
//! until the console host reappears.

use std::time::Duration;

use anyhow::Result;
use url::Url;

/// Host of the target console.
pub const CONSOLE_HOST: &str = "console.cloud.google.com";

/// Host of the identity provider the console redirects to.
pub const LOGIN_HOST: &str = "accounts.google.com";

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
}

/// True when the URL points at the identity provider.
pub fn is_login_url(url: &str) -> bool {
    host_of(url).as_deref() == Some(LOGIN_HOST)
}

/// True when the URL points back at the cloud console.
pub fn is_console_url(url: &str) -> bool {
    host_of(url).as_deref() == Some(CONSOLE_HOST)
}

/// Poll `current_url` every `poll` until it reports a console URL.
///
/// Resolves the first time the console host appears. A poller returning
/// `None` (location unreadable) counts as "not there yet". Errors once
/// `timeout` has elapsed without the console host appearing.
pub async fn wait_for_console<F, Fut>(
    mut current_url: F,
    timeout: Duration,
    poll: Duration,
) -> Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<String>>,
{
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if let Some(url) = current_url().await {
            if is_console_url(&url) {
                return Ok(());
            }
        }
        if tokio::time::Instant::now() >= deadline {
            anyhow::bail!(
                "login was not completed within {}s",
                timeout.as_secs()
            );
        }
        tokio::time::sleep(poll).await;
    }
}
