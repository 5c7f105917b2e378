// API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Line, Station};

// Station creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStationRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

// Station response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StationResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            id: station.id,
            name: station.name,
            created_at: station.created_at,
            updated_at: station.updated_at,
        }
    }
}

// Line creation request, carrying the line's first section
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLineRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub color: String,
    pub up_station_id: Uuid,
    pub down_station_id: Uuid,
    #[validate(range(min = 1))]
    pub distance: u32,
}

// Line update request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLineRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub color: String,
}

// Section append request
#[derive(Debug, Deserialize, Validate)]
pub struct SectionRequest {
    pub up_station_id: Uuid,
    pub down_station_id: Uuid,
    #[validate(range(min = 1))]
    pub distance: u32,
}

// Line response, with stations in travel order
#[derive(Debug, Serialize, Deserialize)]
pub struct LineResponse {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LineResponse {
    pub fn new(line: Line, stations: Vec<Station>) -> Self {
        Self {
            id: line.id,
            name: line.name,
            color: line.color,
            stations: stations.into_iter().map(StationResponse::from).collect(),
            created_at: line.created_at,
            updated_at: line.updated_at,
        }
    }
}

// Generic API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: Some(message),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_name_length_is_validated() {
        assert!(CreateStationRequest { name: "Gangnam".to_string() }.validate().is_ok());
        assert!(CreateStationRequest { name: String::new() }.validate().is_err());
        assert!(CreateStationRequest { name: "x".repeat(51) }.validate().is_err());
    }

    #[test]
    fn test_zero_distance_is_rejected() {
        let request = SectionRequest {
            up_station_id: Uuid::new_v4(),
            down_station_id: Uuid::new_v4(),
            distance: 0,
        };
        assert!(request.validate().is_err());
    }
}
