//! Signal Aggregator: raw per-day activity → composite engagement score
//!
//! Additive weights, clamped to 100:
//! - any daily log: 25
//! - mood: up to 10 (its own value)
//! - journal: up to 20 (1 point per 25 chars)
//! - gratitude, media, assessment: 15 each

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::stats::{mean, round_to};
use crate::types::{
    ActivityTotals, DailyActivitySample, DailyScore, EngagementSeries, PartnerActivity, RawActivity,
};
use crate::{
    ENGAGEMENT_JOURNAL_CAP, ENGAGEMENT_MAX, ENGAGEMENT_MOOD_CAP, ENGAGEMENT_WEIGHT_ASSESSMENT,
    ENGAGEMENT_WEIGHT_GRATITUDE, ENGAGEMENT_WEIGHT_LOG, ENGAGEMENT_WEIGHT_MEDIA,
    JOURNAL_CHARS_PER_POINT,
};

/// Composite engagement score for one day, 0-100
pub fn compute_daily_engagement(day: &DailyActivitySample) -> u8 {
    let mut score = 0.0;

    if day.has_log {
        score += ENGAGEMENT_WEIGHT_LOG;
    }
    if let Some(mood) = day.mood.filter(|m| *m > 0) {
        score += f64::from(mood).min(ENGAGEMENT_MOOD_CAP);
    }
    if day.journal_length > 0 {
        score += (day.journal_length as f64 / JOURNAL_CHARS_PER_POINT).min(ENGAGEMENT_JOURNAL_CAP);
    }
    if day.gratitude_count > 0 {
        score += ENGAGEMENT_WEIGHT_GRATITUDE;
    }
    if day.media_count > 0 {
        score += ENGAGEMENT_WEIGHT_MEDIA;
    }
    if day.assessment_count > 0 {
        score += ENGAGEMENT_WEIGHT_ASSESSMENT;
    }

    score.round().clamp(0.0, ENGAGEMENT_MAX) as u8
}

/// Bucket raw records into one sample per calendar day with any signal
///
/// When several logs share a day the later record wins for mood and journal.
pub fn fold_activity(raw: &RawActivity) -> Vec<DailyActivitySample> {
    let mut days: BTreeMap<NaiveDate, DailyActivitySample> = BTreeMap::new();

    for log in &raw.daily_logs {
        let day = days.entry(log.date).or_insert_with(|| DailyActivitySample::empty(log.date));
        day.has_log = true;
        day.mood = log.mood;
        day.journal_length = log.journal_entry.as_deref().map(|j| j.chars().count()).unwrap_or(0);
    }
    for date in &raw.gratitude_dates {
        days.entry(*date).or_insert_with(|| DailyActivitySample::empty(*date)).gratitude_count += 1;
    }
    for date in &raw.media_dates {
        days.entry(*date).or_insert_with(|| DailyActivitySample::empty(*date)).media_count += 1;
    }
    for date in &raw.assessment_dates {
        days.entry(*date).or_insert_with(|| DailyActivitySample::empty(*date)).assessment_count += 1;
    }

    days.into_values().filter(|d| d.has_signal()).collect()
}

/// Score each sample into a chronological series
pub fn build_series(samples: &[DailyActivitySample]) -> EngagementSeries {
    EngagementSeries::new(
        samples
            .iter()
            .filter(|d| d.has_signal())
            .map(|d| DailyScore {
                date: d.date,
                score: compute_daily_engagement(d),
            })
            .collect(),
    )
}

/// Aggregate counts used by the partner profile
pub fn activity_totals(raw: &RawActivity) -> ActivityTotals {
    let moods: Vec<f64> = raw
        .daily_logs
        .iter()
        .filter_map(|l| l.mood.filter(|m| *m > 0))
        .map(f64::from)
        .collect();
    let journal_lengths: Vec<f64> = raw
        .daily_logs
        .iter()
        .filter_map(|l| l.journal_entry.as_deref())
        .filter(|j| !j.is_empty())
        .map(|j| j.chars().count() as f64)
        .collect();

    ActivityTotals {
        activity_count: raw.record_count(),
        log_count: raw.daily_logs.len(),
        avg_mood: round_to(mean(&moods), 1),
        avg_journal_length: mean(&journal_lengths).round(),
    }
}

/// Raw activity → everything the pattern classifier needs for one partner
pub fn partner_activity(user_id: &str, label: &str, raw: &RawActivity) -> PartnerActivity {
    let samples = fold_activity(raw);
    PartnerActivity {
        user_id: user_id.to_string(),
        label: label.to_string(),
        series: build_series(&samples),
        totals: activity_totals(raw),
    }
}

// =============================================================================
// TESTS
// =============================================================================
