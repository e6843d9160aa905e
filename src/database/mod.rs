pub mod accessor;
pub mod error;
pub mod identity;
pub mod manager;
pub mod models;
pub mod null;
pub mod query_builder;
pub mod resource;
pub mod scope;

pub use accessor::{DataAccessor, PgAccessor};
pub use error::DatabaseError;
pub use identity::{IdentityStore, PgIdentityStore};
pub use manager::{DatabaseManager, Stores};
pub use resource::Resource;
pub use scope::{Scope, ScopedInsert, ScopedQuery, ScopedUpdate};
