//! Engagement data: raw per-user activity, per-day samples, score series

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `days` back from `end` (start = end - days), saturating at the
    /// earliest representable date
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        Self {
            start: days_before(end, days),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// `date` minus `days`, saturating at `NaiveDate::MIN`
pub fn days_before(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_sub_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MIN)
}

/// One daily log entry as stored upstream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyLogRecord {
    pub date: NaiveDate,
    /// 0-10; 0 or absent means no mood recorded
    #[serde(default)]
    pub mood: Option<u8>,
    #[serde(default)]
    pub journal_entry: Option<String>,
}

/// Everything a data source returns for one user within a window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawActivity {
    pub daily_logs: Vec<DailyLogRecord>,
    pub gratitude_dates: Vec<NaiveDate>,
    pub media_dates: Vec<NaiveDate>,
    pub assessment_dates: Vec<NaiveDate>,
}

impl RawActivity {
    /// Total records of every kind
    pub fn record_count(&self) -> usize {
        self.daily_logs.len()
            + self.gratitude_dates.len()
            + self.media_dates.len()
            + self.assessment_dates.len()
    }

    /// Keep only records inside `range`
    pub fn within(&self, range: &DateRange) -> RawActivity {
        RawActivity {
            daily_logs: self
                .daily_logs
                .iter()
                .filter(|l| range.contains(l.date))
                .cloned()
                .collect(),
            gratitude_dates: filter_dates(&self.gratitude_dates, range),
            media_dates: filter_dates(&self.media_dates, range),
            assessment_dates: filter_dates(&self.assessment_dates, range),
        }
    }
}

fn filter_dates(dates: &[NaiveDate], range: &DateRange) -> Vec<NaiveDate> {
    dates.iter().copied().filter(|d| range.contains(*d)).collect()
}

/// One partner, one calendar day of activity signals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivitySample {
    pub date: NaiveDate,
    pub has_log: bool,
    pub mood: Option<u8>,
    /// Journal text length in characters
    pub journal_length: usize,
    pub gratitude_count: u32,
    pub media_count: u32,
    pub assessment_count: u32,
}

impl DailyActivitySample {
    /// A day with nothing recorded yet
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            has_log: false,
            mood: None,
            journal_length: 0,
            gratitude_count: 0,
            media_count: 0,
            assessment_count: 0,
        }
    }

    /// Whether any signal was recorded
    pub fn has_signal(&self) -> bool {
        self.has_log || self.gratitude_count > 0 || self.media_count > 0 || self.assessment_count > 0
    }
}

/// Composite engagement for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyScore {
    pub date: NaiveDate,
    /// 0-100
    pub score: u8,
}

/// Chronological daily scores for one partner; only active days appear
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSeries {
    points: Vec<DailyScore>,
}

impl EngagementSeries {
    /// Build from points; sorts by date and clamps scores to 100
    pub fn new(mut points: Vec<DailyScore>) -> Self {
        points.sort_by_key(|p| p.date);
        for p in points.iter_mut() {
            p.score = p.score.min(100);
        }
        Self { points }
    }

    pub fn points(&self) -> &[DailyScore] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| f64::from(p.score)).collect()
    }

    /// Days before `mid`, and on or after it
    pub fn split_at_date(&self, mid: NaiveDate) -> (EngagementSeries, EngagementSeries) {
        let (first, second): (Vec<DailyScore>, Vec<DailyScore>) =
            self.points.iter().partition(|p| p.date < mid);
        (Self { points: first }, Self { points: second })
    }

    /// Score on a given day, if the day is present
    pub fn score_on(&self, date: NaiveDate) -> Option<u8> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].score)
    }
}

/// Aggregate counts behind a partner profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTotals {
    /// Records of every kind in the window
    pub activity_count: usize,
    pub log_count: usize,
    /// Mean of recorded (non-zero) moods, 0 if none
    pub avg_mood: f64,
    /// Mean journal length over logs that have one, 0 if none
    pub avg_journal_length: f64,
}

/// One partner's identity, series and totals, ready for classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerActivity {
    pub user_id: String,
    pub label: String,
    pub series: EngagementSeries,
    pub totals: ActivityTotals,
}
