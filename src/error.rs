//! Error type shared by the generators, layout helpers, and mock APIs.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while producing demo data.
#[derive(Error, Debug)]
pub enum Error {
	/// A deterministic pick was asked to choose from nothing.
	#[error("cannot pick from an empty option list")]
	EmptyOptions,

	/// Unknown risk profile or an out-of-range configuration value.
	#[error("invalid configuration: {0}")]
	Configuration(String),

	/// The caller-owned rate limiter refused the call.
	#[error("rate limited, retry after {retry_after_ms:.0} ms")]
	RateLimited {
		/// Time until the limiter admits another call.
		retry_after_ms: f64,
	},

	/// Injected transport failure from a mock API.
	#[error("network error {status}: {message}")]
	Network {
		/// HTTP-style status code of the simulated failure.
		status: u16,
		/// Human-readable failure text.
		message: String,
	},

	/// Configuration payload was not valid JSON.
	#[error("config parse error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Whether retrying the same call later could succeed.
	pub fn is_transient(&self) -> bool {
		matches!(self, Error::RateLimited { .. } | Error::Network { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transient_classification() {
		assert!(Error::RateLimited { retry_after_ms: 10.0 }.is_transient());
		assert!(
			Error::Network {
				status: 500,
				message: "boom".into()
			}
			.is_transient()
		);
		assert!(!Error::EmptyOptions.is_transient());
		assert!(!Error::Configuration("x".into()).is_transient());
	}

	#[test]
	fn messages_name_the_problem() {
		let err = Error::Configuration("unknown risk profile `yolo`".into());
		assert_eq!(
			err.to_string(),
			"invalid configuration: unknown risk profile `yolo`"
		);
	}
}
