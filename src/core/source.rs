//! Data access seam for pursue-withdraw detection
//!
//! A [`DataSource`] is passed into every detection call; nothing is held
//! globally. [`InMemoryDataSource`] backs tests and the CLI fixture mode.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataSourceError;
use crate::types::{DailyLogRecord, DateRange, RawActivity, Relationship};

/// Read-only access to relationships and per-user activity records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Relationship by id; `Ok(None)` when it does not exist
    async fn find_relationship(&self, id: &str) -> Result<Option<Relationship>, DataSourceError>;

    /// Daily logs (mood + journal) for a user within `range`
    async fn daily_logs(&self, user_id: &str, range: &DateRange) -> Result<Vec<DailyLogRecord>, DataSourceError>;

    /// Dates of gratitude entries
    async fn gratitude_entries(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError>;

    /// Dates of completed media items
    async fn media_completions(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError>;

    /// Dates of completed assessments
    async fn assessment_completions(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError>;
}

/// Fixture-backed data source
///
/// JSON shape:
/// `{"relationships": [...], "activity": {"<user id>": {"daily_logs": [...], ...}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryDataSource {
    pub relationships: Vec<Relationship>,
    pub activity: HashMap<String, RawActivity>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationships.push(relationship);
        self
    }

    pub fn with_activity(mut self, user_id: impl Into<String>, activity: RawActivity) -> Self {
        self.activity.insert(user_id.into(), activity);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, DataSourceError> {
        serde_json::from_str(json).map_err(|e| DataSourceError::Unavailable(format!("invalid fixture: {}", e)))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DataSourceError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DataSourceError::Unavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    fn activity_in(&self, user_id: &str, range: &DateRange) -> RawActivity {
        self.activity
            .get(user_id)
            .map(|a| a.within(range))
            .unwrap_or_default()
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn find_relationship(&self, id: &str) -> Result<Option<Relationship>, DataSourceError> {
        Ok(self.relationships.iter().find(|r| r.id == id).cloned())
    }

    async fn daily_logs(&self, user_id: &str, range: &DateRange) -> Result<Vec<DailyLogRecord>, DataSourceError> {
        Ok(self.activity_in(user_id, range).daily_logs)
    }

    async fn gratitude_entries(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError> {
        Ok(self.activity_in(user_id, range).gratitude_dates)
    }

    async fn media_completions(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError> {
        Ok(self.activity_in(user_id, range).media_dates)
    }

    async fn assessment_completions(&self, user_id: &str, range: &DateRange) -> Result<Vec<NaiveDate>, DataSourceError> {
        Ok(self.activity_in(user_id, range).assessment_dates)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_and_range_filter() {
        let source = InMemoryDataSource::new()
            .with_relationship(Relationship::couple("c1", "u1", "u2"))
            .with_activity(
                "u1",
                RawActivity {
                    gratitude_dates: vec![day(1), day(10), day(20)],
                    ..RawActivity::default()
                },
            );

        assert!(source.find_relationship("c1").await.unwrap().is_some());
        assert!(source.find_relationship("nope").await.unwrap().is_none());

        let range = DateRange { start: day(5), end: day(15) };
        assert_eq!(source.gratitude_entries("u1", &range).await.unwrap(), vec![day(10)]);
        assert!(source.daily_logs("unknown", &range).await.unwrap().is_empty());
    }

    #[test]
    fn test_fixture_json() {
        let json = r#"{
            "relationships": [{"id": "c1", "user1_id": "u1", "user2_id": null, "status": "active"}],
            "activity": {"u1": {"daily_logs": [{"date": "2026-03-02", "mood": 7}]}}
        }"#;
        let source = InMemoryDataSource::from_json_str(json).unwrap();
        assert_eq!(source.relationships[0].user2_id, None);
        assert_eq!(source.activity["u1"].daily_logs[0].mood, Some(7));
        assert!(InMemoryDataSource::from_json_str("[]").is_err());
    }
}
