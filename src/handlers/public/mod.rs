// Routes that need no tenant or agent context.
pub mod i18n;
pub mod qr;
pub mod system;
pub mod templates;
