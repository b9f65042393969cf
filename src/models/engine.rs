use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the `engine` table.
///
/// Also travels embedded inside a [`Car`](super::Car), where only the fields
/// the client supplied are populated; missing JSON fields default to zero /
/// nil so that validation, not deserialization, reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Engine {
    pub id: Uuid,
    pub displacement: i64,
    pub no_of_cylinders: i64,
    pub car_range: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Engine {
    pub fn new(request: &EngineRequest) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            displacement: request.displacement,
            no_of_cylinders: request.no_of_cylinders,
            car_range: request.car_range,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Engine reference carrying only the identifier.
    pub fn reference(id: Uuid) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineRequest {
    pub displacement: i64,
    pub no_of_cylinders: i64,
    pub car_range: i64,
}
