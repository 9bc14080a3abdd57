//! API key records.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered tenant. The `api_key` field is the opaque bearer token
/// clients present; it is generated once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyRecord {
    pub id: Uuid,
    pub name: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

impl ApiKeyRecord {
    /// Register a new tenant under `name`, generating a fresh opaque token.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            api_key: generate_api_key(),
            created_at: Utc::now(),
        }
    }
}

/// Generate an opaque, URL-safe bearer token.
fn generate_api_key() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    format!("rlk_{suffix}")
}
