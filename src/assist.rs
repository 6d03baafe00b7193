//! The click-helper: a weaker, diagnostic fallback for when the main flow
//! stalls mid-form.
//!
//! Attaches to an already-running debuggable browser, screenshots the page,
//! probes for the known form controls by their text, and otherwise just
//! parks the pointer near where the form usually sits before handing back
//! to the operator. No state machine, no retries.

use std::time::Duration;

use anyhow::Result;

use crate::driver::{Session, Strategy, Target};
use crate::resolve;

/// Short per-probe wait; the page is already in front of the operator.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// The form controls worth probing for, in the order the flow clicks them.
const PROBES: [Target; 3] = [
    Target {
        what: "'Desktop app' option",
        primary: Strategy::Text {
            tag: "mat-option",
            needle: "Desktop app",
        },
        fallback: Some(Strategy::Text {
            tag: "span",
            needle: "Desktop app",
        }),
    },
    Target {
        what: "CREATE button",
        primary: Strategy::Text {
            tag: "button",
            needle: "create",
        },
        fallback: None,
    },
    Target {
        what: "DOWNLOAD JSON button",
        primary: Strategy::Text {
            tag: "button",
            needle: "download",
        },
        fallback: None,
    },
];

/// click-helper
#[tokio::main]
pub async fn run() -> Result<()> {
    println!("OAuth Click Helper");
    println!("{}", "=".repeat(40));

    let Some(session) = Session::connect_existing().await else {
        println!();
        println!("Could not reach a running browser.");
        println!("Start Chrome with --remote-debugging-port=9222, or finish the");
        println!("three clicks (Desktop app / CREATE / DOWNLOAD JSON) by hand.");
        return Ok(());
    };

    let shot = resolve::screenshot_path();
    println!("\n[1] Taking screenshot to analyze...");
    match session.screenshot_to(&shot).await {
        Ok(()) => println!("Screenshot saved: {}", shot.display()),
        Err(e) => println!("Could not capture screenshot: {e}"),
    }

    println!("\n[2] Looking for form elements...");
    let mut clicked = false;
    for target in &PROBES {
        match session.click(target, PROBE_TIMEOUT).await {
            Ok(()) => {
                println!("    Clicked {}", target.what);
                clicked = true;
                break;
            }
            Err(_) => println!("    {} not visible", target.what),
        }
    }

    if !clicked {
        println!("\n[3] Attempting to interact with form...");
        println!("    If this doesn't work, please complete manually");
        match session.viewport().await {
            Ok((width, height)) => {
                println!("Viewport size: {width}x{height}");
                // The console centres the form; aim a little up and left.
                let x = (width / 2 - 200) as f64;
                let y = (height / 2 - 100) as f64;
                println!("    Moving to approximate form area: ({x}, {y})");
                if let Err(e) = session.move_mouse(x, y).await {
                    println!("    Could not move pointer: {e}");
                }
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            Err(e) => println!("    Could not read viewport size: {e}"),
        }
    }

    // Second capture so the operator sees the end state.
    if session.screenshot_to(&shot).await.is_ok() {
        println!("\nScreenshot saved to {}", shot.display());
    }
    println!("Please check the browser window and complete the clicks manually.");

    // The browser belongs to the operator; leave it running.
    session.detach();
    Ok(())
}
