//! Demo configuration read from the host page.
//!
//! The page may embed `<script id="demo-config" type="application/json">` with
//! any subset of [`DemoConfig`]'s fields; the rest fall back to defaults.

use serde::Deserialize;

use crate::demo::{FailureInjection, RiskProfile};
use crate::error::{Error, Result};
use crate::layout::LayoutConfig;

/// Raw configuration as written in the page.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
	/// Wallet address the demo data is seeded from.
	pub wallet: String,
	/// One of `conservative`, `balanced`, `aggressive`.
	pub risk_profile: String,
	/// Number of candidate signals generated before the risk filter.
	pub signal_count: usize,
	/// Relaxation steps for the graph layout.
	pub layout_iterations: usize,
	/// Chance of an injected 429 per snapshot request.
	pub rate_limit_probability: f64,
	/// Chance of an injected 500 when no 429 was drawn.
	pub server_error_probability: f64,
	/// Minimum spacing between snapshot requests.
	pub min_request_interval_ms: f64,
}

impl Default for DemoConfig {
	fn default() -> Self {
		let failures = FailureInjection::default();
		Self {
			wallet: "0xABC...123".to_string(),
			risk_profile: RiskProfile::default().to_string(),
			signal_count: 12,
			layout_iterations: LayoutConfig::default().iterations,
			rate_limit_probability: failures.rate_limit_probability,
			server_error_probability: failures.server_error_probability,
			min_request_interval_ms: 1_000.0,
		}
	}
}

/// Configuration after validation, with strings parsed into their types.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedConfig {
	/// Wallet address the demo data is seeded from.
	pub wallet: String,
	/// Profile whose table drives the signal filter and trade sizing.
	pub risk_profile: RiskProfile,
	/// Number of candidate signals generated before the risk filter.
	pub signal_count: usize,
	/// Layout parameters, with the configured iteration count.
	pub layout: LayoutConfig,
	/// Validated failure rates for the snapshot API.
	pub failures: FailureInjection,
	/// Minimum spacing between snapshot requests.
	pub min_request_interval_ms: f64,
}

impl Default for ValidatedConfig {
	fn default() -> Self {
		let raw = DemoConfig::default();
		Self {
			wallet: raw.wallet,
			risk_profile: RiskProfile::default(),
			signal_count: raw.signal_count,
			layout: LayoutConfig::default(),
			failures: FailureInjection::default(),
			min_request_interval_ms: raw.min_request_interval_ms,
		}
	}
}

impl DemoConfig {
	/// Parses a JSON payload.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Checks every field and converts to [`ValidatedConfig`].
	pub fn validate(&self) -> Result<ValidatedConfig> {
		let risk_profile = self.risk_profile.parse()?;
		let failures = FailureInjection::new(self.rate_limit_probability, self.server_error_probability)?;

		if !(self.min_request_interval_ms.is_finite() && self.min_request_interval_ms >= 0.0) {
			return Err(Error::Configuration(format!(
				"min_request_interval_ms must be a non-negative number, got {}",
				self.min_request_interval_ms
			)));
		}

		Ok(ValidatedConfig {
			wallet: self.wallet.clone(),
			risk_profile,
			signal_count: self.signal_count,
			layout: LayoutConfig {
				iterations: self.layout_iterations,
				..LayoutConfig::default()
			},
			failures,
			min_request_interval_ms: self.min_request_interval_ms,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_validate() {
		let cfg = DemoConfig::default().validate().unwrap();
		assert_eq!(cfg.risk_profile, RiskProfile::Balanced);
		assert_eq!(cfg.signal_count, 12);
		assert_eq!(cfg.layout.iterations, 100);
		assert_eq!(cfg.failures, FailureInjection::default());
		assert_eq!(cfg, ValidatedConfig::default());
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let cfg = DemoConfig::from_json(r#"{ "wallet": "0xfeed", "risk_profile": "aggressive" }"#).unwrap();
		assert_eq!(cfg.wallet, "0xfeed");
		assert_eq!(cfg.signal_count, 12);
		assert_eq!(cfg.validate().unwrap().risk_profile, RiskProfile::Aggressive);
	}

	#[test]
	fn unknown_profile_is_a_configuration_error() {
		let cfg = DemoConfig {
			risk_profile: "reckless".into(),
			..DemoConfig::default()
		};
		assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));
	}

	#[test]
	fn bad_numbers_are_rejected() {
		let cfg = DemoConfig {
			server_error_probability: 2.0,
			..DemoConfig::default()
		};
		assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));

		let cfg = DemoConfig {
			min_request_interval_ms: -1.0,
			..DemoConfig::default()
		};
		assert!(matches!(cfg.validate(), Err(Error::Configuration(_))));
	}

	#[test]
	fn malformed_json_is_reported() {
		assert!(matches!(DemoConfig::from_json("{ nope"), Err(Error::Json(_))));
	}
}
