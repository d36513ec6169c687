#![warn(clippy::pedantic)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Version of the siteauth application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod errors;
pub mod handlers;
pub mod models;
pub mod oauth;
pub mod session;
pub mod settings;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Re-export commonly used items
pub use errors::ConfigError;
pub use handlers::{
    configure_services, current_user, google_sign_in, health, home, oauth_callback, sign_out,
};
pub use models::SessionUser;
pub use oauth::{GoogleOAuthClient, IdentityProvider};
pub use session::{SessionManager, StateTokenManager};
pub use settings::SiteSettings;
