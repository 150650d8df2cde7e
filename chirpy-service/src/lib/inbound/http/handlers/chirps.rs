use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::chirp::models::Chirp;

pub mod create_chirp;
pub mod get_chirp;
pub mod list_chirps;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChirpData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: String,
}

impl From<&Chirp> for ChirpData {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.to_string(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body.as_str().to_string(),
            user_id: chirp.user_id.to_string(),
        }
    }
}
