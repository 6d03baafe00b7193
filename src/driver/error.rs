use thiserror::Error;

/// Failures raised while driving the browser.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("no {0} executable found in PATH")]
    NoExecutable(&'static str),

    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("timed out after {seconds}s waiting for {what}")]
    WaitTimeout { what: String, seconds: u64 },

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error(transparent)]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
