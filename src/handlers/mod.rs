// HTTP request handlers for Google sign-in
pub mod auth;
pub mod callback;
pub mod helpers;
pub mod home;

use actix_web::web;

// Re-export the main handler functions
pub use auth::{google_sign_in, sign_out};
pub use callback::oauth_callback;
pub use home::{current_user, health, home};

/// Where every auth flow lands when it finishes
pub const HOME_PATH: &str = "/";

/// Register every route on an actix service config
pub fn configure_services(cfg: &mut web::ServiceConfig) {
    cfg
        // Google sign-in flow
        .route("/auth/google", web::get().to(google_sign_in))
        .route("/auth/callback", web::get().to(oauth_callback))
        .route("/auth/logout", web::get().to(sign_out))
        .route("/auth/logout", web::post().to(sign_out))
        // Session readers
        .route("/auth/me", web::get().to(current_user))
        .route(HOME_PATH, web::get().to(home))
        // Health endpoint
        .route("/ping", web::get().to(health));
}
