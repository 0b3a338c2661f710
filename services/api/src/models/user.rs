//! User model and identity mapping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deriving internal user ids from identity-provider subjects
const USER_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b8e_4d7a_4f52_9c3e_a1b0_d5e8_7f24);

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub external_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Caller identity as vouched for by the identity provider
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalIdentity {
    /// Stable subject identifier issued by the provider
    pub subject: String,
    pub name: String,
    pub email: String,
}

impl ExternalIdentity {
    /// Internal user id for this identity; the same subject always maps to the same id
    pub fn user_id(&self) -> Uuid {
        Uuid::new_v5(&USER_ID_NAMESPACE, self.subject.as_bytes())
    }
}
