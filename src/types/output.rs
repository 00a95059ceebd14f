//! Output formatting for terminal display

use colored::{ColoredString, Colorize};

use crate::types::{CrisisDetectionResult, CrisisLevel, Intensity, PursueWithdrawResult, Trend};

impl CrisisLevel {
    /// Paint text in this level's color
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            CrisisLevel::None => text.bright_black(),
            CrisisLevel::Elevated => text.yellow(),
            CrisisLevel::Acute => text.truecolor(255, 140, 0),
            CrisisLevel::Emergency => text.red().bold(),
        }
    }
}

impl Intensity {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            Intensity::None => text.green(),
            Intensity::Mild => text.yellow(),
            Intensity::Moderate => text.truecolor(255, 140, 0),
            Intensity::Severe => text.red().bold(),
        }
    }
}

impl CrisisDetectionResult {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = self.to_parseable_string();
        let mut out = self.level.paint(&line).to_string();
        if self.safety_risk {
            out.push_str(&format!("\n  {}", "SAFETY RISK - share crisis resources now".red().bold()));
        }
        for resource in &self.safety_resources {
            out.push_str(&format!(
                "\n  {} {} ({})",
                "→".cyan(),
                resource.name,
                resource.contact
            ));
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        let primary = self
            .primary_type
            .map(|t| t.code().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!(
            "level={} ({}) | type={} | types={} | safety_risk={} | confidence={:.2}",
            self.level.as_u8(),
            self.level,
            primary,
            self.all_types.len(),
            self.safety_risk,
            self.confidence
        )
    }
}

impl PursueWithdrawResult {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let line = self.to_parseable_string();
        let mut out = self.intensity.paint(&line).to_string();
        if self.trend == Trend::Intensifying {
            out.push_str(&format!("\n  {}", "pattern is intensifying".red()));
        }
        out.push_str(&format!("\n  {}", self.reason_text().bright_black()));
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "pattern={} | detected={} | intensity={} | trend={} | r={:.3} | disparity={:.2} | reason={}",
            self.pattern_type,
            self.pattern_detected,
            self.intensity,
            self.trend,
            self.correlation,
            self.engagement_disparity,
            self.reason.code()
        )
    }
}
