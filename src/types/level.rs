//! Crisis severity levels
//!
//! NONE → ELEVATED → ACUTE → EMERGENCY. Within one classification the level
//! only ever moves up, through [`CrisisLevel::raise`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four crisis severity levels, ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CrisisLevel {
    /// No crisis indicators
    #[default]
    None = 0,
    /// Heightened distress, functional but struggling
    Elevated = 1,
    /// Severe distress, decision-making impaired
    Acute = 2,
    /// Safety concerns, self-harm ideation, complete overwhelm
    Emergency = 3,
}

/// Integer outside 0..=3
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("crisis level out of range: {0}")]
pub struct InvalidCrisisLevel(pub u8);

impl CrisisLevel {
    /// Raise to `other` if it is higher; never lowers.
    #[must_use]
    pub fn raise(self, other: CrisisLevel) -> CrisisLevel {
        self.max(other)
    }

    /// One level up, capped at EMERGENCY.
    #[must_use]
    pub fn step_up(self) -> CrisisLevel {
        let next = match self {
            CrisisLevel::None => CrisisLevel::Elevated,
            CrisisLevel::Elevated => CrisisLevel::Acute,
            CrisisLevel::Acute | CrisisLevel::Emergency => CrisisLevel::Emergency,
        };
        self.raise(next)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Short label used in alert titles
    pub fn label(&self) -> &'static str {
        match self {
            CrisisLevel::None => "None",
            CrisisLevel::Elevated => "Elevated",
            CrisisLevel::Acute => "Acute",
            CrisisLevel::Emergency => "Emergency",
        }
    }
}

impl From<CrisisLevel> for u8 {
    fn from(level: CrisisLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for CrisisLevel {
    type Error = InvalidCrisisLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CrisisLevel::None),
            1 => Ok(CrisisLevel::Elevated),
            2 => Ok(CrisisLevel::Acute),
            3 => Ok(CrisisLevel::Emergency),
            other => Err(InvalidCrisisLevel(other)),
        }
    }
}

impl std::fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CrisisLevel::None => "NONE",
            CrisisLevel::Elevated => "ELEVATED",
            CrisisLevel::Acute => "ACUTE",
            CrisisLevel::Emergency => "EMERGENCY",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [CrisisLevel; 4] = [
        CrisisLevel::None,
        CrisisLevel::Elevated,
        CrisisLevel::Acute,
        CrisisLevel::Emergency,
    ];

    #[test]
    fn test_raise_never_lowers() {
        for a in ALL {
            for b in ALL {
                let raised = a.raise(b);
                assert!(raised >= a);
                assert!(raised >= b);
            }
        }
    }

    #[test]
    fn test_step_up_caps_at_emergency() {
        assert_eq!(CrisisLevel::None.step_up(), CrisisLevel::Elevated);
        assert_eq!(CrisisLevel::Elevated.step_up(), CrisisLevel::Acute);
        assert_eq!(CrisisLevel::Acute.step_up(), CrisisLevel::Emergency);
        assert_eq!(CrisisLevel::Emergency.step_up(), CrisisLevel::Emergency);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&CrisisLevel::Acute).unwrap(), "2");
        let level: CrisisLevel = serde_json::from_str("3").unwrap();
        assert_eq!(level, CrisisLevel::Emergency);
        assert!(serde_json::from_str::<CrisisLevel>("4").is_err());
    }
}
