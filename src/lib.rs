//! Client for the StockScope learning platform.
//!
//! [`client::ApiClient`] talks JSON to the backend with the bearer token kept
//! by [`services::token::TokenManager`]. The `services` modules map each
//! backend resource to async functions, and the `controllers` modules are the
//! view models behind each page.

pub mod client;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod search;
pub mod state;

pub mod models {
    pub(crate) mod record;

    pub mod blog;
    pub mod course;
    pub mod dictionary;
    pub mod session;
    pub mod subscription;
    pub mod user;
}

pub mod repositories {
    pub mod session;
}

pub mod services {
    pub mod blogs;
    pub mod courses;
    pub mod dictionary;
    pub mod subscriptions;
    pub mod token;
    pub mod users;
}

pub mod controllers {
    pub mod auth;
    pub mod blogs;
    pub mod catalog;
    pub mod courses;
    pub mod dashboard;
    pub mod dictionary;
    pub mod subscription;
}

pub mod validation {
    pub mod auth;
}

pub use client::ApiClient;
pub use config::Config;
pub use error::{ApiError, Result};
pub use state::AppState;
