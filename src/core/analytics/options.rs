use crate::errors::{AppError, AppResult};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DANGER_RATE: f64 = 15.0;
pub const DEFAULT_WARNING_RATE: f64 = 10.0;
pub const DEFAULT_UNDERPERFORMER_RATIO: f64 = 0.5;

/// Thresholds used when raising report alerts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertPolicy {
    /// Impound rate (%) above which a danger alert is raised.
    pub danger_rate: f64,
    /// Impound rate (%) above which a warning alert is raised.
    pub warning_rate: f64,
    /// Fraction of the per-person average below which a person underperforms.
    pub underperformer_ratio: f64,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            danger_rate: DEFAULT_DANGER_RATE,
            warning_rate: DEFAULT_WARNING_RATE,
            underperformer_ratio: DEFAULT_UNDERPERFORMER_RATIO,
        }
    }
}

impl AlertPolicy {
    pub fn validate(&self) -> AppResult<()> {
        for (name, v) in [
            ("danger rate", self.danger_rate),
            ("warning rate", self.warning_rate),
        ] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(AppError::InvalidInput(format!(
                    "{name} must be a percentage between 0 and 100, got {v}"
                )));
            }
        }

        if self.warning_rate > self.danger_rate {
            return Err(AppError::InvalidInput(format!(
                "warning rate ({}) cannot exceed danger rate ({})",
                self.warning_rate, self.danger_rate
            )));
        }

        let r = self.underperformer_ratio;
        if !r.is_finite() || !(0.0..=1.0).contains(&r) {
            return Err(AppError::InvalidInput(format!(
                "underperformer ratio must be between 0 and 1, got {r}"
            )));
        }

        Ok(())
    }
}

/// How a record's shift bucket is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftStrategy {
    /// Look the person up in the shift mapping ("Unassigned" when absent).
    #[default]
    Assignment,
    /// Infer Morning / Afternoon / Night from the record time.
    Timestamp,
    /// Mapping first, inferred shift when the person has none.
    AssignmentThenTimestamp,
}

impl ShiftStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStrategy::Assignment => "assignment",
            ShiftStrategy::Timestamp => "timestamp",
            ShiftStrategy::AssignmentThenTimestamp => "assignment-then-timestamp",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportOptions {
    pub policy: AlertPolicy,
    pub shift_strategy: ShiftStrategy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AlertPolicy::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_or_broken_thresholds() {
        let inverted = AlertPolicy {
            danger_rate: 5.0,
            warning_rate: 10.0,
            ..Default::default()
        };
        assert!(matches!(inverted.validate(), Err(AppError::InvalidInput(_))));

        let nan = AlertPolicy {
            danger_rate: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let ratio = AlertPolicy {
            underperformer_ratio: 1.5,
            ..Default::default()
        };
        assert!(ratio.validate().is_err());
    }
}
