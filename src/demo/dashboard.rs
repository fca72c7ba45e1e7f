//! Performance figures for the dashboard header and equity chart.

use serde::Serialize;

use super::trades::{Trade, TradeStatus};

/// Aggregate performance over a set of trades.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStats {
	/// Sum of PnL over all trades, open and closed.
	pub total_pnl: f64,
	/// Share of closed trades with positive PnL, in `[0, 1]`.
	pub win_rate: f64,
	/// Number of trades considered.
	pub trade_count: usize,
	pub open_trades: usize,
	pub closed_trades: usize,
	/// Highest single-trade PnL, `None` without trades.
	pub best_trade: Option<f64>,
	/// Lowest single-trade PnL, `None` without trades.
	pub worst_trade: Option<f64>,
	/// Mean signal confidence across the trades.
	pub avg_confidence: f64,
}

/// Summarizes `trades`. An empty slice gives all-zero stats.
pub fn summarize(trades: &[Trade]) -> PerformanceStats {
	if trades.is_empty() {
		return PerformanceStats::default();
	}

	let closed: Vec<&Trade> = trades
		.iter()
		.filter(|t| t.status == TradeStatus::Closed)
		.collect();
	let wins = closed.iter().filter(|t| t.pnl > 0.0).count();

	PerformanceStats {
		total_pnl: trades.iter().map(|t| t.pnl).sum(),
		win_rate: if closed.is_empty() {
			0.0
		} else {
			wins as f64 / closed.len() as f64
		},
		trade_count: trades.len(),
		open_trades: trades.len() - closed.len(),
		closed_trades: closed.len(),
		best_trade: trades.iter().map(|t| t.pnl).reduce(f64::max),
		worst_trade: trades.iter().map(|t| t.pnl).reduce(f64::min),
		avg_confidence: trades.iter().map(|t| t.confidence).sum::<f64>() / trades.len() as f64,
	}
}

/// Running balance after each trade in time order, starting with `start_balance`.
pub fn equity_curve(trades: &[Trade], start_balance: f64) -> Vec<f64> {
	let mut ordered: Vec<&Trade> = trades.iter().collect();
	ordered.sort_by_key(|t| t.timestamp);

	let mut balance = start_balance;
	std::iter::once(start_balance)
		.chain(ordered.into_iter().map(|t| {
			balance += t.pnl;
			balance
		}))
		.collect()
}
