//! Core types for bondsignal

mod level;
mod crisis;
mod engagement;
mod pattern;
mod reason;
mod relationship;
mod signal;
mod output;

pub use level::{CrisisLevel, InvalidCrisisLevel};
pub use crisis::{CrisisType, CrisisDetectionResult, CategoryScore, SafetyResource, ResourceKind};
pub use engagement::{
    days_before, DateRange, DailyLogRecord, RawActivity, DailyActivitySample, DailyScore,
    EngagementSeries, ActivityTotals, PartnerActivity,
};
pub use pattern::{
    Alignment, PatternType, Intensity, Trend, PartnerRole, PartnerProfile, DataQuality,
    PatternMetadata, ClinicalNotes, PursueWithdrawResult,
};
pub use reason::ReasonCode;
pub use relationship::{Relationship, RelationshipStatus};
pub use signal::{AlertSeverity, RiskKind, RiskSignal};
