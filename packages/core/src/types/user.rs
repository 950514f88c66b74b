use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account as exposed on the wire. The password hash never leaves storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
