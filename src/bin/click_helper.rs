use anyhow::Result;
use clap::Parser;

/// Screenshot-and-nudge assist for when the main OAuth setup flow stalls.
#[derive(Parser)]
#[command(
    name = "click-helper",
    version,
    about = "Attach to a running browser, screenshot the OAuth form, and click or point at its controls"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    gmail_oauth_setup::assist::run()
}
