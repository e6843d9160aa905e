pub mod config;
pub mod health;
pub mod qr;
pub mod template;
pub mod token;
