// src/repository.rs
use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Line, Section, Station};

/// In-memory store for stations and lines.
///
/// Locks are always taken stations first, then lines.
#[derive(Clone, Default)]
pub struct SubwayRepository {
    stations: Arc<RwLock<HashMap<Uuid, Station>>>,
    lines: Arc<RwLock<HashMap<Uuid, Line>>>,
}

impl SubwayRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_station(&self, name: String) -> Result<Station> {
        let mut stations = self.stations.write().await;
        if stations.values().any(|s| s.name == name) {
            return Err(AppError::Conflict(format!("station {} already exists", name)));
        }

        let station = Station::new(name);
        debug!(station_id = %station.id, "station created");
        stations.insert(station.id, station.clone());
        Ok(station)
    }

    pub async fn list_stations(&self) -> Vec<Station> {
        let stations = self.stations.read().await;
        let mut all: Vec<Station> = stations.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        all
    }

    pub async fn delete_station(&self, id: Uuid) -> Result<()> {
        let mut stations = self.stations.write().await;
        if !stations.contains_key(&id) {
            return Err(AppError::NotFound { entity: "Station", id });
        }

        let lines = self.lines.read().await;
        if let Some(line) = lines.values().find(|l| l.contains_station(id)) {
            return Err(AppError::Conflict(format!(
                "station {} is used by line {}",
                id, line.name
            )));
        }

        stations.remove(&id);
        debug!(station_id = %id, "station deleted");
        Ok(())
    }

    pub async fn create_line(&self, name: String, color: String, first: Section) -> Result<Line> {
        let stations = self.stations.read().await;
        check_section_stations(&stations, &first)?;

        let mut lines = self.lines.write().await;
        if lines.values().any(|l| l.name == name) {
            return Err(AppError::Conflict(format!("line {} already exists", name)));
        }

        let line = Line::new(name, color, first);
        debug!(line_id = %line.id, "line created");
        lines.insert(line.id, line.clone());
        Ok(line)
    }

    pub async fn list_lines(&self) -> Vec<Line> {
        let lines = self.lines.read().await;
        let mut all: Vec<Line> = lines.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        all
    }

    pub async fn get_line(&self, id: Uuid) -> Result<Line> {
        let lines = self.lines.read().await;
        lines
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound { entity: "Line", id })
    }

    pub async fn update_line(&self, id: Uuid, name: String, color: String) -> Result<Line> {
        let mut lines = self.lines.write().await;
        if lines.values().any(|l| l.id != id && l.name == name) {
            return Err(AppError::Conflict(format!("line {} already exists", name)));
        }

        let line = lines
            .get_mut(&id)
            .ok_or(AppError::NotFound { entity: "Line", id })?;
        line.name = name;
        line.color = color;
        line.updated_at = Utc::now();
        Ok(line.clone())
    }

    pub async fn delete_line(&self, id: Uuid) -> Result<()> {
        let mut lines = self.lines.write().await;
        lines
            .remove(&id)
            .map(|_| debug!(line_id = %id, "line deleted"))
            .ok_or(AppError::NotFound { entity: "Line", id })
    }

    /// Extend a line at its terminal station.
    pub async fn add_section(&self, line_id: Uuid, section: Section) -> Result<Line> {
        let stations = self.stations.read().await;
        check_section_stations(&stations, &section)?;

        let mut lines = self.lines.write().await;
        let line = lines
            .get_mut(&line_id)
            .ok_or(AppError::NotFound { entity: "Line", id: line_id })?;

        if line.terminal_station_id() != Some(section.up_station_id) {
            return Err(AppError::InvalidSection(
                "up station must be the line's terminal station".to_string(),
            ));
        }
        if line.contains_station(section.down_station_id) {
            return Err(AppError::InvalidSection(
                "down station is already on the line".to_string(),
            ));
        }

        line.sections.push(section);
        line.updated_at = Utc::now();
        Ok(line.clone())
    }

    /// Resolve a line's stations in travel order.
    pub async fn line_stations(&self, line: &Line) -> Vec<Station> {
        let stations = self.stations.read().await;
        line.station_ids()
            .iter()
            .filter_map(|id| stations.get(id).cloned())
            .collect()
    }
}

fn check_section_stations(stations: &HashMap<Uuid, Station>, section: &Section) -> Result<()> {
    if section.up_station_id == section.down_station_id {
        return Err(AppError::InvalidSection(
            "up and down stations must differ".to_string(),
        ));
    }
    for id in [section.up_station_id, section.down_station_id] {
        if !stations.contains_key(&id) {
            return Err(AppError::NotFound { entity: "Station", id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn stations(repo: &SubwayRepository, names: &[&str]) -> Vec<Uuid> {
        let mut ids = Vec::new();
        for name in names {
            ids.push(repo.create_station(name.to_string()).await.unwrap().id);
        }
        ids
    }

    fn section(up: Uuid, down: Uuid) -> Section {
        Section { up_station_id: up, down_station_id: down, distance: 10 }
    }

    #[tokio::test]
    async fn test_duplicate_station_name_conflicts() {
        let repo = SubwayRepository::new();
        repo.create_station("Gangnam".to_string()).await.unwrap();

        let err = repo.create_station("Gangnam".to_string()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_station_on_a_line_cannot_be_deleted() {
        let repo = SubwayRepository::new();
        let ids = stations(&repo, &["Gangnam", "Yeoksam", "Seolleung"]).await;
        repo.create_line("Line 2".to_string(), "green".to_string(), section(ids[0], ids[1]))
            .await
            .unwrap();

        assert!(matches!(repo.delete_station(ids[0]).await, Err(AppError::Conflict(_))));
        assert!(repo.delete_station(ids[2]).await.is_ok());
        assert_eq!(repo.list_stations().await.len(), 2);
    }

    #[tokio::test]
    async fn test_line_with_unknown_station_is_rejected() {
        let repo = SubwayRepository::new();
        let ids = stations(&repo, &["Gangnam"]).await;

        let err = repo
            .create_line("Line 2".to_string(), "green".to_string(), section(ids[0], Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { entity: "Station", .. }));
    }

    #[tokio::test]
    async fn test_sections_extend_from_terminal_station() {
        let repo = SubwayRepository::new();
        let ids = stations(&repo, &["Gangnam", "Yeoksam", "Seolleung"]).await;
        let line = repo
            .create_line("Line 2".to_string(), "green".to_string(), section(ids[0], ids[1]))
            .await
            .unwrap();

        let err = repo.add_section(line.id, section(ids[0], ids[2])).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSection(_)));

        let err = repo.add_section(line.id, section(ids[1], ids[0])).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSection(_)));

        let line = repo.add_section(line.id, section(ids[1], ids[2])).await.unwrap();
        let names: Vec<String> = repo
            .line_stations(&line)
            .await
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Gangnam", "Yeoksam", "Seolleung"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_line() {
        let repo = SubwayRepository::new();
        let ids = stations(&repo, &["Gangnam", "Yeoksam"]).await;
        let line = repo
            .create_line("Line 2".to_string(), "green".to_string(), section(ids[0], ids[1]))
            .await
            .unwrap();

        let updated = repo
            .update_line(line.id, "Line 2 Loop".to_string(), "lime".to_string())
            .await
            .unwrap();
        assert_eq!(updated.name, "Line 2 Loop");
        assert_eq!(updated.color, "lime");

        repo.delete_line(line.id).await.unwrap();
        assert!(matches!(
            repo.get_line(line.id).await,
            Err(AppError::NotFound { entity: "Line", .. })
        ));
    }
}
