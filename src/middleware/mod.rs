pub mod resolve_context;
pub mod response;

pub use resolve_context::{resolve_agent_middleware, resolve_tenant_middleware};
pub use response::{ApiResponse, ApiResult};
