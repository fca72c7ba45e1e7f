//! Mock trades opened by the demo trade agent.
//!
//! Trades are derived from the signals a risk profile surfaces, sized with the
//! profile's constants, and given a deterministic outcome.

use log::debug;
use serde::{Deserialize, Serialize};

use super::risk::{RiskParams, RiskProfile};
use super::signals::{Direction, signals_for_profile};
use crate::error::Result;
use crate::seed::{chance, scaled_value};

/// Lifecycle of a trade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
	/// Position still running; `current_price` is set.
	Open,
	/// Stopped out, took profit, or closed by the agent.
	Closed,
}

/// A position the agent took on a signal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
	/// `trade-` followed by the originating signal id.
	pub id: String,
	/// Token symbol.
	pub token: String,
	/// Direction taken from the signal.
	pub direction: Direction,
	/// Fill price in USD.
	pub entry_price: f64,
	/// Mark price while the trade is open.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_price: Option<f64>,
	/// Realized or unrealized PnL in USD.
	pub pnl: f64,
	/// Entry time, epoch milliseconds.
	pub timestamp: i64,
	/// Whether the position is still running.
	pub status: TradeStatus,
	/// Source of the originating signal.
	pub source: String,
	/// Confidence of the originating signal.
	pub confidence: f64,
}

/// Sizing for a single position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionPlan {
	/// Collateral committed, USD.
	pub margin_usd: f64,
	/// Exposure after leverage, USD.
	pub notional_usd: f64,
	/// Price at which the position is stopped out.
	pub stop_loss: f64,
	/// Price at which profit is taken.
	pub take_profit: f64,
	/// Leverage applied to the margin.
	pub leverage: f64,
}

/// Demo account balance trades are sized against.
pub const DEMO_BALANCE_USD: f64 = 10_000.0;

/// Candidate signals drawn before filtering and capping.
const SIGNAL_POOL: usize = 24;

/// Rough USD price for a token, used as the entry anchor.
pub fn reference_price(token: &str) -> f64 {
	match token {
		"BTC" => 65_000.0,
		"ETH" => 3_400.0,
		"SOL" => 150.0,
		"AVAX" => 35.0,
		"LINK" => 14.5,
		"OP" => 2.4,
		"ARB" => 1.1,
		"MATIC" => 0.7,
		_ => 1.0,
	}
}

/// Sizes a position so that hitting the stop loses one trade's share of the
/// daily risk budget.
pub fn plan_position(
	params: &RiskParams,
	entry: f64,
	direction: Direction,
	balance: f64,
) -> PositionPlan {
	let per_trade_budget = balance * params.max_daily_risk / params.max_trades_per_day.max(1) as f64;
	let notional = (per_trade_budget / params.stop_loss).min(balance * params.leverage);
	let sign = direction.sign();

	PositionPlan {
		margin_usd: notional / params.leverage,
		notional_usd: notional,
		stop_loss: entry * (1.0 - sign * params.stop_loss),
		take_profit: entry * (1.0 + sign * params.take_profit),
		leverage: params.leverage,
	}
}

/// Trades the agent has taken today under `profile`.
///
/// At most `max_trades_per_day` trades are returned. A trade whose price move
/// reaches its stop or target is closed at that level.
pub fn generate_trades(seed: i32, profile: RiskProfile, now_ms: i64) -> Result<Vec<Trade>> {
	let params = profile.params();
	let signals = signals_for_profile(seed, SIGNAL_POOL, now_ms, profile)?;

	let trades: Vec<Trade> = signals
		.iter()
		.take(params.max_trades_per_day)
		.enumerate()
		.map(|(i, signal)| {
			let base = 10_000 + i as i64 * 8;
			let entry = reference_price(&signal.token) * (1.0 + scaled_value(seed, base, -0.05, 0.05));
			let plan = plan_position(&params, entry, signal.direction, DEMO_BALANCE_USD);

			// Return on the position, bounded by the stop and the target.
			let raw = scaled_value(seed, base + 1, -params.stop_loss * 1.2, params.take_profit * 1.2);
			let ret = raw.clamp(-params.stop_loss, params.take_profit);
			let hit_level = ret != raw;
			let closed = hit_level || chance(seed, base + 2, 0.4);
			let mark = entry * (1.0 + signal.direction.sign() * ret);

			Trade {
				id: format!("trade-{}", signal.id),
				token: signal.token.clone(),
				direction: signal.direction,
				entry_price: entry,
				current_price: (!closed).then_some(mark),
				pnl: plan.notional_usd * ret,
				timestamp: signal.timestamp,
				status: if closed {
					TradeStatus::Closed
				} else {
					TradeStatus::Open
				},
				source: signal.source.clone(),
				confidence: signal.confidence,
			}
		})
		.collect();

	debug!("echo-signals: {} trades under {profile}", trades.len());
	Ok(trades)
}
