use anyhow::Result;

use lametric_notify::cli::CliApp;

#[tokio::main]
async fn main() -> Result<()> {
    CliApp::run().await
}
