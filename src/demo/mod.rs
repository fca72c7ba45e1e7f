//! Mock data behind the demo screens.
//!
//! Every generator is a pure function of a seed (usually the wallet hash) and
//! a [`RiskProfile`], so screens can be re-rendered freely and tests can pin
//! exact output.

pub mod dashboard;
pub mod flow;
pub mod risk;
pub mod signals;
pub mod snapshot;
pub mod trades;

pub use dashboard::{PerformanceStats, equity_curve, summarize};
pub use flow::{Action, FlowState, Step, Tab, reduce};
pub use risk::{RiskParams, RiskProfile};
pub use signals::{Direction, Signal, SourceType, generate_signals, signals_for_profile};
pub use snapshot::{FailureInjection, PortfolioSnapshot, RateLimiter, SnapshotApi, status_line};
pub use trades::{PositionPlan, Trade, TradeStatus, generate_trades, plan_position};
