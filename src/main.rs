use anyhow::Result;
use clap::Parser;

/// Create a Gmail API OAuth Desktop-app client in Google Cloud Console and
/// install the downloaded credentials.json.
#[derive(Parser)]
#[command(
    name = "gmail-oauth-setup",
    version,
    about = "Drive a browser through Google Cloud Console to create an OAuth Desktop-app client and install its credentials"
)]
struct Cli {}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    gmail_oauth_setup::setup::run()
}
