//! Stand-in for the portfolio snapshot API.
//!
//! There is no transport. A call is admitted by a caller-owned
//! [`RateLimiter`], may fail with an injected 429 or 500, and otherwise returns
//! holdings derived from the wallet seed.

use log::warn;
use rand::Rng;
use serde::Serialize;

use super::signals::TOKENS;
use super::trades::reference_price;
use crate::error::{Error, Result};
use crate::seed::{chance, scaled_value, seed_from_string};

/// Enforces a minimum spacing between calls.
///
/// Each instance tracks its own last call, so independent limiters never
/// interfere with each other.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimiter {
	/// Minimum time between admitted calls.
	pub min_interval_ms: f64,
	/// When the last admitted call happened, epoch milliseconds.
	pub last_call_time: Option<f64>,
}

impl RateLimiter {
	/// A limiter that has never admitted a call.
	pub fn new(min_interval_ms: f64) -> Self {
		Self {
			min_interval_ms,
			last_call_time: None,
		}
	}

	/// Admits a call at `now_ms`, or reports how long to wait.
	///
	/// Refused calls do not move the window.
	pub fn try_acquire(&mut self, now_ms: f64) -> Result<()> {
		if let Some(last) = self.last_call_time {
			let elapsed = now_ms - last;
			if elapsed < self.min_interval_ms {
				return Err(Error::RateLimited {
					retry_after_ms: self.min_interval_ms - elapsed,
				});
			}
		}
		self.last_call_time = Some(now_ms);
		Ok(())
	}
}

/// Probabilities of the simulated transport failures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FailureInjection {
	/// Chance of a 429 response.
	pub rate_limit_probability: f64,
	/// Chance of a 500 response when no 429 was drawn.
	pub server_error_probability: f64,
}

impl Default for FailureInjection {
	fn default() -> Self {
		Self {
			rate_limit_probability: 0.05,
			server_error_probability: 0.03,
		}
	}
}

impl FailureInjection {
	/// Validates both probabilities lie in `[0, 1]`.
	pub fn new(rate_limit_probability: f64, server_error_probability: f64) -> Result<Self> {
		for (name, p) in [
			("rate_limit_probability", rate_limit_probability),
			("server_error_probability", server_error_probability),
		] {
			if !(0.0..=1.0).contains(&p) {
				return Err(Error::Configuration(format!(
					"{name} must be within [0, 1], got {p}"
				)));
			}
		}
		Ok(Self {
			rate_limit_probability,
			server_error_probability,
		})
	}

	fn checked(self) -> Result<Self> {
		Self::new(self.rate_limit_probability, self.server_error_probability)
	}

	/// Never fails.
	pub fn none() -> Self {
		Self {
			rate_limit_probability: 0.0,
			server_error_probability: 0.0,
		}
	}
}

/// One token position in a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
	/// Token symbol.
	pub token: String,
	/// Units held.
	pub amount: f64,
	/// `amount` at the reference price.
	pub value_usd: f64,
}

/// Wallet portfolio as the dashboard shows it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
	/// Wallet address the snapshot belongs to.
	pub wallet: String,
	/// Sum of all holdings in USD.
	pub balance_usd: f64,
	/// Per-token positions.
	pub holdings: Vec<Holding>,
	/// Epoch milliseconds.
	pub fetched_at: f64,
}

/// Builds the holdings for `wallet`. Pure; used by [`SnapshotApi::fetch`].
pub fn portfolio_for(wallet: &str, now_ms: f64) -> PortfolioSnapshot {
	let seed = seed_from_string(wallet);
	let holdings: Vec<Holding> = TOKENS
		.iter()
		.enumerate()
		.filter(|&(i, _)| i == 0 || chance(seed, 500 + i as i64, 0.5))
		.map(|(i, token)| {
			let value_usd = scaled_value(seed, 600 + i as i64, 50.0, 5_000.0);
			Holding {
				token: token.to_string(),
				amount: value_usd / reference_price(token),
				value_usd,
			}
		})
		.collect();

	PortfolioSnapshot {
		wallet: wallet.to_string(),
		balance_usd: holdings.iter().map(|h| h.value_usd).sum(),
		holdings,
		fetched_at: now_ms,
	}
}

/// Mock snapshot endpoint with caller-owned rate limiting and failure draws.
pub struct SnapshotApi<R: Rng> {
	/// Spacing between admitted calls; owned by the caller of [`SnapshotApi::fetch`].
	pub limiter: RateLimiter,
	failures: FailureInjection,
	rng: R,
}

impl<R: Rng> SnapshotApi<R> {
	/// Wraps a limiter, failure rates, and the RNG failures are drawn from.
	///
	/// Fails if either probability is outside `[0, 1]`.
	pub fn new(limiter: RateLimiter, failures: FailureInjection, rng: R) -> Result<Self> {
		Ok(Self {
			limiter,
			failures: failures.checked()?,
			rng,
		})
	}

	/// Current failure rates.
	pub fn failures(&self) -> FailureInjection {
		self.failures
	}

	/// Replaces the failure rates. Invalid rates leave the current ones in place.
	pub fn set_failures(&mut self, failures: FailureInjection) -> Result<()> {
		self.failures = failures.checked()?;
		Ok(())
	}

	/// Fetches the snapshot for `wallet` at `now_ms`.
	///
	/// Injected failures still consume the rate-limit window, as a real
	/// request would have.
	pub fn fetch(&mut self, wallet: &str, now_ms: f64) -> Result<PortfolioSnapshot> {
		self.limiter.try_acquire(now_ms)?;

		if self.rng.gen_bool(self.failures.rate_limit_probability) {
			warn!("echo-signals: injected 429 for snapshot of {wallet}");
			return Err(Error::Network {
				status: 429,
				message: "Too Many Requests".into(),
			});
		}
		if self.rng.gen_bool(self.failures.server_error_probability) {
			warn!("echo-signals: injected 500 for snapshot of {wallet}");
			return Err(Error::Network {
				status: 500,
				message: "Internal Server Error".into(),
			});
		}

		Ok(portfolio_for(wallet, now_ms))
	}
}

/// One-line summary of a fetch for the dashboard header.
pub fn status_line(result: &Result<PortfolioSnapshot>) -> String {
	match result {
		Ok(snapshot) => format!(
			"{} · ${:.2} across {} tokens",
			snapshot.wallet,
			snapshot.balance_usd,
			snapshot.holdings.len()
		),
		Err(e) if e.is_transient() => format!("Portfolio temporarily unavailable: {e}"),
		Err(e) => format!("Portfolio unavailable: {e}"),
	}
}
