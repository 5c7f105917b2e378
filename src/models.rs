// Domain models for the subway service
// Stored in memory by `repository::SubwayRepository`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Station {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A directed segment of a line between two adjacent stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub up_station_id: Uuid,
    pub down_station_id: Uuid,
    pub distance: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: Uuid,
    pub name: String,
    pub color: String,
    pub sections: Vec<Section>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Line {
    pub fn new(name: String, color: String, first: Section) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            color,
            sections: vec![first],
            created_at: now,
            updated_at: now,
        }
    }

    /// Station ids from the first up station to the terminal down station.
    pub fn station_ids(&self) -> Vec<Uuid> {
        let mut ids = Vec::with_capacity(self.sections.len() + 1);
        if let Some(first) = self.sections.first() {
            ids.push(first.up_station_id);
        }
        ids.extend(self.sections.iter().map(|s| s.down_station_id));
        ids
    }

    pub fn contains_station(&self, station_id: Uuid) -> bool {
        self.sections
            .iter()
            .any(|s| s.up_station_id == station_id || s.down_station_id == station_id)
    }

    pub fn terminal_station_id(&self) -> Option<Uuid> {
        self.sections.last().map(|s| s.down_station_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_ids_follow_sections() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let mut line = Line::new(
            "Line 2".to_string(),
            "green".to_string(),
            Section { up_station_id: a, down_station_id: b, distance: 10 },
        );
        line.sections.push(Section { up_station_id: b, down_station_id: c, distance: 5 });

        assert_eq!(line.station_ids(), vec![a, b, c]);
        assert_eq!(line.terminal_station_id(), Some(c));
        assert!(line.contains_station(b));
        assert!(!line.contains_station(Uuid::new_v4()));
    }
}
