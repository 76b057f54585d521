mod api;
mod config;
mod dashboard;
mod error;
mod export;
mod filter;
mod models;
mod selection;
mod session;
mod ui;
mod updates;

use anyhow::Result;
use config::Config;
use ui::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostic traces go to stderr so the alternate screen stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = Config::load();
    tracing::info!("using portal at {}", config.portal_url);

    // Initialize API clients
    let student_client = api::StudentClient::new(config.portal_url.clone());
    let faculty_client = api::FacultyClient::new(config.portal_url);

    // Start TUI application
    let mut app = App::new(student_client, faculty_client);
    app.run().await?;

    Ok(())
}
