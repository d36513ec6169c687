#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;

use actix_web::{
    middleware::{Compress, Logger},
    web, App, HttpServer,
};
use anyhow::Context;
use siteauth::{
    configure_services, GoogleOAuthClient, IdentityProvider, SessionManager, SiteSettings,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from Settings.toml and environment variables
    // This also loads .env file and initializes the logger
    let settings = SiteSettings::load().context("Failed to load settings")?;

    let google_client = GoogleOAuthClient::from_settings(&settings.google)
        .context("Failed to initialize Google OAuth client")?;
    if !google_client.is_configured() {
        log::warn!("GOOGLE_CLIENT_ID or GOOGLE_CLIENT_SECRET is not set; sign-in will fail");
    }

    let session_manager = SessionManager::from_settings(&settings);
    if !session_manager.is_configured() {
        log::warn!("SESSION_SECRET is missing or too short; session requests will fail with 500");
    }

    let provider: Arc<dyn IdentityProvider> = Arc::new(google_client);
    start_server(
        &settings,
        web::Data::from(provider),
        web::Data::new(session_manager),
    )
    .await
}

/// Start the HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Server binding fails
/// - Server fails to start
async fn start_server(
    settings: &SiteSettings,
    provider: web::Data<dyn IdentityProvider>,
    session_manager: web::Data<SessionManager>,
) -> anyhow::Result<()> {
    let bind_address = settings.get_bind_address();
    print_startup_info(&bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(provider.clone())
            .app_data(session_manager.clone())
            .wrap(Compress::default())
            .wrap(Logger::default())
            .configure(configure_services)
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {bind_address}"))?
    .run()
    .await
    .context("Server terminated with an error")
}

fn print_startup_info(bind_address: &str) {
    println!("Starting siteauth {} on http://{bind_address}", siteauth::VERSION);
    println!();
    println!("Sign-in endpoints:");
    println!("  GET  /auth/google      - Redirect to Google sign-in");
    println!("  GET  /auth/callback    - OAuth callback (register <origin>/auth/callback with Google)");
    println!("  GET|POST /auth/logout  - Clear session");
    println!();
    println!("Session endpoints:");
    println!("  GET  /                 - Home page");
    println!("  GET  /auth/me          - Current user as JSON");
    println!();
    println!("System endpoints:");
    println!("  GET  /ping             - Health check");
}
