//! Risk profiles and the trading constants each one implies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::error::Error;

/// User-selected appetite for risk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
	/// Only very high-confidence signals, small positions.
	Conservative,
	/// The default.
	#[default]
	Balanced,
	/// Everything goes through.
	Aggressive,
}

/// Sizing and filtering constants for a [`RiskProfile`].
///
/// Percentages are fractions (`0.05` = 5%).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiskParams {
	/// Signals must have confidence strictly above this. `None` disables the filter.
	pub min_confidence: Option<f64>,
	/// Loss fraction at which a position is closed.
	pub stop_loss: f64,
	/// Daily cap on opened trades.
	pub max_trades_per_day: usize,
	/// Largest fraction of the balance that may be lost in one day.
	pub max_daily_risk: f64,
	/// Gain fraction at which a position is closed.
	pub take_profit: f64,
	/// Position size multiplier on margin.
	pub leverage: f64,
}

impl RiskProfile {
	/// Constants table shown on the risk selection screen.
	pub const fn params(self) -> RiskParams {
		match self {
			RiskProfile::Conservative => RiskParams {
				min_confidence: Some(0.85),
				stop_loss: 0.05,
				max_trades_per_day: 3,
				max_daily_risk: 0.03,
				take_profit: 0.10,
				leverage: 1.0,
			},
			RiskProfile::Balanced => RiskParams {
				min_confidence: Some(0.75),
				stop_loss: 0.10,
				max_trades_per_day: 6,
				max_daily_risk: 0.05,
				take_profit: 0.20,
				leverage: 2.0,
			},
			RiskProfile::Aggressive => RiskParams {
				min_confidence: None,
				stop_loss: 0.20,
				max_trades_per_day: 10,
				max_daily_risk: 0.10,
				take_profit: 0.40,
				leverage: 3.0,
			},
		}
	}

	/// Whether a signal with `confidence` is surfaced under this profile.
	pub fn accepts(self, confidence: f64) -> bool {
		match self.params().min_confidence {
			Some(threshold) => confidence > threshold,
			None => true,
		}
	}

	/// Lowercase name used in configuration.
	pub const fn as_str(self) -> &'static str {
		match self {
			RiskProfile::Conservative => "conservative",
			RiskProfile::Balanced => "balanced",
			RiskProfile::Aggressive => "aggressive",
		}
	}
}

impl fmt::Display for RiskProfile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for RiskProfile {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"conservative" => Ok(RiskProfile::Conservative),
			"balanced" => Ok(RiskProfile::Balanced),
			"aggressive" => Ok(RiskProfile::Aggressive),
			other => Err(Error::Configuration(format!(
				"unknown risk profile `{other}`"
			))),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use strum::IntoEnumIterator;

	#[test]
	fn table_matches_published_constants() {
		let c = RiskProfile::Conservative.params();
		assert_eq!(c.min_confidence, Some(0.85));
		assert_eq!((c.stop_loss, c.max_trades_per_day), (0.05, 3));
		assert_eq!((c.max_daily_risk, c.take_profit, c.leverage), (0.03, 0.10, 1.0));

		let b = RiskProfile::Balanced.params();
		assert_eq!(b.min_confidence, Some(0.75));
		assert_eq!((b.stop_loss, b.max_trades_per_day), (0.10, 6));
		assert_eq!((b.max_daily_risk, b.take_profit, b.leverage), (0.05, 0.20, 2.0));

		let a = RiskProfile::Aggressive.params();
		assert_eq!(a.min_confidence, None);
		assert_eq!((a.stop_loss, a.max_trades_per_day), (0.20, 10));
		assert_eq!((a.max_daily_risk, a.take_profit, a.leverage), (0.10, 0.40, 3.0));
	}

	#[test]
	fn filter_thresholds_are_strict() {
		assert!(!RiskProfile::Conservative.accepts(0.85));
		assert!(RiskProfile::Conservative.accepts(0.851));
		assert!(!RiskProfile::Balanced.accepts(0.75));
		assert!(RiskProfile::Balanced.accepts(0.8));
		assert!(RiskProfile::Aggressive.accepts(0.0));
	}

	#[test]
	fn parses_names_and_rejects_unknown() {
		for profile in RiskProfile::iter() {
			assert_eq!(profile.as_str().parse::<RiskProfile>().unwrap(), profile);
			assert_eq!(profile.to_string(), profile.as_str());
		}
		assert_eq!(" Aggressive ".parse::<RiskProfile>().unwrap(), RiskProfile::Aggressive);
		assert!(matches!("yolo".parse::<RiskProfile>(), Err(Error::Configuration(_))));
	}

	#[test]
	fn serde_uses_lowercase_names() {
		let json = serde_json::to_string(&RiskProfile::Conservative).unwrap();
		assert_eq!(json, "\"conservative\"");
	}
}
