//! Relationship record as exposed by the data source

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    Active,
    Inactive,
}

/// A couple (or a single user awaiting a partner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub user1_id: String,
    #[serde(default)]
    pub user2_id: Option<String>,
    pub status: RelationshipStatus,
}

impl Relationship {
    /// Active couple with both participants
    pub fn couple(id: impl Into<String>, user1: impl Into<String>, user2: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user1_id: user1.into(),
            user2_id: Some(user2.into()),
            status: RelationshipStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RelationshipStatus::Active
    }
}
