//! The six-step client-creation flow.
//!
//! Every form step is best-effort: the console's DOM shifts between
//! releases, so a failed step is logged and the sequence moves on, leaving
//! the operator to patch up in the open browser window. Only an
//! unrecoverable browser launch aborts the run.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::driver::{Session, Strategy, Target};
use crate::{creds, login, relocate, resolve, util};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);
const LOGIN_POLL: Duration = Duration::from_secs(1);
const DROPDOWN_TIMEOUT: Duration = Duration::from_secs(15);
const OPTION_TIMEOUT: Duration = Duration::from_secs(10);
const FIELD_TIMEOUT: Duration = Duration::from_secs(10);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

const APPLICATION_TYPE_DROPDOWN: Target = Target {
    what: "application type dropdown",
    primary: Strategy::Css(
        "mat-select[formcontrolname='applicationType'], [aria-label*='Application type']",
    ),
    fallback: None,
};

const DESKTOP_APP_OPTION: Target = Target {
    what: "'Desktop app' option",
    primary: Strategy::Text {
        tag: "mat-option",
        needle: "Desktop app",
    },
    fallback: Some(Strategy::Text {
        tag: "span",
        needle: "Desktop app",
    }),
};

const NAME_FIELD: Target = Target {
    what: "client name field",
    primary: Strategy::Css(
        "input[formcontrolname='displayName'], input[aria-label*='Name']",
    ),
    fallback: Some(Strategy::Css("input[type='text']")),
};

const CREATE_BUTTON: Target = Target {
    what: "CREATE button",
    primary: Strategy::Text {
        tag: "button",
        needle: "create",
    },
    fallback: Some(Strategy::Css("button[type='submit']")),
};

const DOWNLOAD_BUTTON: Target = Target {
    what: "DOWNLOAD JSON button",
    primary: Strategy::Text {
        tag: "button",
        needle: "download",
    },
    fallback: None,
};

async fn sleep_secs(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

/// gmail-oauth-setup
#[tokio::main]
pub async fn run() -> Result<()> {
    println!("{}", "=".repeat(50));
    println!("Gmail OAuth Browser Automation");
    println!("{}", "=".repeat(50));
    println!();

    println!("Starting browser...");
    let session = Session::launch()
        .await
        .context("could not start any browser")?;

    // No `?` below this line: the browser is released on every path.
    let outcome = create_oauth_client(&session).await;

    match &outcome {
        Ok(true) => {
            println!();
            println!("{}", "=".repeat(50));
            println!("SETUP COMPLETE!");
            println!(
                "Now run the Gmail API setup step against {}",
                resolve::credentials_json().display()
            );
            println!("{}", "=".repeat(50));
        }
        Ok(false) => {
            println!();
            println!("Manual step needed - check browser window");
            if util::prompt_enter("Press Enter when done downloading...").is_ok() {
                retry_install();
            }
        }
        Err(e) => {
            eprintln!("Error: {e:?}");
        }
    }

    let _ = util::prompt_enter("Press Enter to close browser...");
    session.close().await;
    Ok(())
}

/// One more downloads scan after the operator finished manually.
fn retry_install() {
    let downloads = resolve::downloads_dir();
    let dest = resolve::credentials_json();
    match relocate::install_credentials(&downloads, &dest) {
        Ok(Some(_)) => {
            println!("Credentials saved to: {}", dest.display());
            creds::report(&dest);
        }
        Ok(None) => {
            println!("Still no credentials file in {}", downloads.display());
        }
        Err(e) => {
            eprintln!("Could not install credentials: {e:#}");
        }
    }
}

/// Drive the creation form end to end. `Ok(true)` means the credentials
/// file was found and installed.
async fn create_oauth_client(session: &Session) -> Result<bool> {
    let url = resolve::oauth_client_url();
    let downloads = resolve::downloads_dir();

    session.allow_downloads_to(&downloads).await?;
    if let Err(e) = session.maximize().await {
        println!("    Could not maximize window: {e}");
    }

    println!("[1/6] Opening: {url}");
    session.goto(&url).await?;
    sleep_secs(3).await;

    if let Some(current) = session.current_url().await {
        if login::is_login_url(&current) {
            println!("[!] Please log in to Google in the browser window...");
            println!("    Waiting for login to complete...");
            login::wait_for_console(|| session.current_url(), LOGIN_TIMEOUT, LOGIN_POLL)
                .await?;
            println!("[OK] Login detected, continuing...");
            sleep_secs(2).await;
        }
    }

    println!("[2/6] Selecting 'Desktop app'...");
    if let Err(e) = select_application_type(session).await {
        println!("    Could not select application type: {e}");
        println!("    Continuing -- check the browser window");
    }

    println!("[3/6] Entering name '{}'...", resolve::CLIENT_NAME);
    if let Err(e) = session
        .fill(&NAME_FIELD, resolve::CLIENT_NAME, FIELD_TIMEOUT)
        .await
    {
        println!("    Could not fill the name field: {e}");
    }
    sleep_secs(1).await;

    println!("[4/6] Clicking CREATE...");
    if let Err(e) = session.click(&CREATE_BUTTON, FIELD_TIMEOUT).await {
        println!("    Could not click CREATE: {e}");
    }
    sleep_secs(3).await;

    println!("[5/6] Waiting for popup and clicking DOWNLOAD JSON...");
    match session.click(&DOWNLOAD_BUTTON, DOWNLOAD_TIMEOUT).await {
        Ok(()) => println!("[OK] Download initiated!"),
        Err(e) => {
            println!("    Could not find download button: {e}");
            println!("    Check browser for manual download...");
        }
    }
    sleep_secs(3).await;

    println!("[6/6] Moving credentials file...");
    let dest = resolve::credentials_json();
    match relocate::install_credentials(&downloads, &dest)? {
        Some(_) => {
            println!("[SUCCESS] Credentials saved to: {}", dest.display());
            creds::report(&dest);
            Ok(true)
        }
        None => {
            println!("[!] No credentials file found in {}", downloads.display());
            println!("    Check browser and manually download if needed");
            Ok(false)
        }
    }
}

async fn select_application_type(session: &Session) -> Result<()> {
    session
        .click(&APPLICATION_TYPE_DROPDOWN, DROPDOWN_TIMEOUT)
        .await?;
    sleep_secs(1).await;
    session.click(&DESKTOP_APP_OPTION, OPTION_TIMEOUT).await?;
    sleep_secs(1).await;
    Ok(())
}
