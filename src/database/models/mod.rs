pub mod agent;
pub mod module;
pub mod tenant;

pub use agent::Agent;
pub use module::ModuleRow;
pub use tenant::Tenant;
