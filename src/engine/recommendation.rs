//! UV index classification and sunscreen reapplication intervals

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// UV severity bands, ordered from harmless to extreme
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl Severity {
    /// Classify a validated, non-negative UV index
    pub fn classify(uv_index: f64) -> Self {
        if uv_index == 0.0 {
            Severity::None
        } else if uv_index < 3.0 {
            Severity::Low
        } else if uv_index < 6.0 {
            Severity::Moderate
        } else if uv_index < 8.0 {
            Severity::High
        } else if uv_index < 11.0 {
            Severity::VeryHigh
        } else {
            Severity::Extreme
        }
    }

    /// Reapplication interval for this band, ignoring sunset
    pub fn interval_seconds(self) -> u64 {
        match self {
            Severity::None => 0,
            Severity::Low => 120 * 60,
            Severity::Moderate => 90 * 60,
            Severity::High => 60 * 60,
            Severity::VeryHigh => 45 * 60,
            Severity::Extreme => 30 * 60,
        }
    }

    pub fn color(self) -> ColorCategory {
        match self {
            Severity::None => ColorCategory::Neutral,
            Severity::Low => ColorCategory::Green,
            Severity::Moderate => ColorCategory::Yellow,
            Severity::High => ColorCategory::Orange,
            Severity::VeryHigh => ColorCategory::Red,
            Severity::Extreme => ColorCategory::Purple,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::High => "high",
            Severity::VeryHigh => "very high",
            Severity::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// Display color for a severity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Neutral,
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
}

impl ColorCategory {
    pub fn hex(self) -> &'static str {
        match self {
            ColorCategory::Neutral => "#616161",
            ColorCategory::Green => "#2E7D32",
            ColorCategory::Yellow => "#FFEB3B",
            ColorCategory::Orange => "#FF9800",
            ColorCategory::Red => "#F44336",
            ColorCategory::Purple => "#9C27B0",
        }
    }
}

/// Advice derived from a single UV reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub uv_index: f64,
    pub sunset_imminent: bool,
    pub severity: Severity,
    pub color: ColorCategory,
    pub interval_seconds: u64,
    pub requires_protection: bool,
}

impl Recommendation {
    /// Compute the recommendation for a UV index.
    ///
    /// The index must be finite and non-negative. An imminent sunset or a
    /// zero index yields a zero interval and no protection requirement.
    pub fn compute(uv_index: f64, sunset_imminent: bool) -> Result<Self, EngineError> {
        if !uv_index.is_finite() {
            return Err(EngineError::validation("uv_index", "must be a finite number"));
        }
        if uv_index < 0.0 {
            return Err(EngineError::validation(
                "uv_index",
                format!("{} is negative", uv_index),
            ));
        }

        let severity = Severity::classify(uv_index);
        let requires_protection = severity != Severity::None && !sunset_imminent;
        let interval_seconds = if requires_protection {
            severity.interval_seconds()
        } else {
            0
        };

        Ok(Self {
            // -0.0 classifies as None; keep the output canonical
            uv_index: uv_index.abs(),
            sunset_imminent,
            severity,
            color: severity.color(),
            interval_seconds,
            requires_protection,
        })
    }

    /// One-line advice suitable for display
    pub fn advice(&self) -> String {
        if self.requires_protection {
            format!("Reapply sunscreen every {} minutes", self.interval_seconds / 60)
        } else {
            "No sunscreen needed".to_string()
        }
    }
}
