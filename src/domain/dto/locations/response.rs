use serde::Serialize;

use crate::domain::dto::format_timestamp;
use crate::domain::entities::Location;

#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub state: String,
    pub created_at: String,
}

impl From<&Location> for LocationResponse {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_hex(),
            user_id: location.user_id.to_hex(),
            name: location.name.clone(),
            address: location.address.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            city: location.city.clone(),
            state: location.state.clone(),
            created_at: format_timestamp(&location.created_at),
        }
    }
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self::from(&location)
    }
}
