use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Agent {
    pub id: String,
    pub tenant_id: String,
    pub full_name: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
}
