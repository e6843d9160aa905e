pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod database;
pub mod error;
pub mod filter;
pub mod guard;
pub mod handlers;
pub mod i18n;
pub mod invoice;
pub mod json;
pub mod middleware;
pub mod qr;
pub mod state;
pub mod templates;
pub mod testing;
pub mod types;

pub use app::app;
pub use state::AppState;
