//! Onboarding flow as an explicit state machine.
//!
//! `Connect -> SelectRisk -> Deposit -> Active`. Actions that do not apply to
//! the current step leave the state untouched.

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use super::risk::RiskProfile;

/// Wizard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
	/// Waiting for a wallet.
	#[default]
	Connect,
	/// Wallet known, choosing a risk profile.
	SelectRisk,
	/// Profile chosen, waiting for the deposit.
	Deposit,
	/// Onboarding finished; tabs are available.
	Active,
}

/// Screen shown once the account is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum Tab {
	/// Performance figures.
	#[default]
	Dashboard,
	/// Live signal feed.
	Signals,
	/// Agent settings.
	Agent,
	/// Assistant chat.
	Chat,
}

/// Everything the flow remembers.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FlowState {
	/// Current wizard step.
	pub step: Step,
	/// Connected wallet, once known.
	pub wallet: Option<String>,
	/// Chosen risk profile, once known.
	pub risk: Option<RiskProfile>,
	/// USD deposited; zero until the deposit step completes.
	pub deposit: f64,
	/// Selected tab while active.
	pub tab: Tab,
}

/// User intent fed into [`reduce`].
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
	/// A wallet finished connecting; empty addresses are ignored.
	WalletConnected(String),
	/// The user chose a risk profile.
	RiskSelected(RiskProfile),
	/// USD amount deposited; must be positive and finite.
	Deposited(f64),
	/// Return to the previous step. Ignored once active.
	Back,
	/// Drop everything and start over.
	Disconnect,
	/// Switch tabs once active.
	SelectTab(Tab),
}

/// Applies `action` to `state`.
pub fn reduce(state: FlowState, action: Action) -> FlowState {
	match (state.step, action) {
		(_, Action::Disconnect) => FlowState::default(),
		(Step::Connect, Action::WalletConnected(wallet)) if !wallet.trim().is_empty() => FlowState {
			step: Step::SelectRisk,
			wallet: Some(wallet),
			..state
		},
		(Step::SelectRisk, Action::RiskSelected(risk)) => FlowState {
			step: Step::Deposit,
			risk: Some(risk),
			..state
		},
		(Step::SelectRisk, Action::Back) => FlowState {
			step: Step::Connect,
			wallet: None,
			..state
		},
		(Step::Deposit, Action::Deposited(amount)) if amount.is_finite() && amount > 0.0 => FlowState {
			step: Step::Active,
			deposit: amount,
			tab: Tab::Dashboard,
			..state
		},
		(Step::Deposit, Action::Back) => FlowState {
			step: Step::SelectRisk,
			risk: None,
			..state
		},
		(Step::Active, Action::SelectTab(tab)) => FlowState { tab, ..state },
		(step, action) => {
			debug!("echo-signals: ignoring {action:?} at {step:?}");
			state
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn run(actions: Vec<Action>) -> FlowState {
		actions.into_iter().fold(FlowState::default(), reduce)
	}

	#[test]
	fn happy_path_reaches_active() {
		let state = run(vec![
			Action::WalletConnected("0xABC...123".into()),
			Action::RiskSelected(RiskProfile::Aggressive),
			Action::Deposited(500.0),
		]);
		assert_eq!(state.step, Step::Active);
		assert_eq!(state.wallet.as_deref(), Some("0xABC...123"));
		assert_eq!(state.risk, Some(RiskProfile::Aggressive));
		assert_eq!(state.deposit, 500.0);
		assert_eq!(state.tab, Tab::Dashboard);
	}

	#[test]
	fn out_of_order_actions_are_ignored() {
		let state = run(vec![Action::RiskSelected(RiskProfile::Balanced), Action::Deposited(10.0)]);
		assert_eq!(state, FlowState::default());
	}

	#[test]
	fn blank_wallet_and_bad_deposits_are_rejected() {
		let state = run(vec![Action::WalletConnected("   ".into())]);
		assert_eq!(state.step, Step::Connect);

		let state = run(vec![
			Action::WalletConnected("0x1".into()),
			Action::RiskSelected(RiskProfile::Balanced),
			Action::Deposited(0.0),
			Action::Deposited(f64::NAN),
		]);
		assert_eq!(state.step, Step::Deposit);
	}

	#[test]
	fn back_unwinds_one_step() {
		let state = run(vec![
			Action::WalletConnected("0x1".into()),
			Action::RiskSelected(RiskProfile::Conservative),
			Action::Back,
		]);
		assert_eq!(state.step, Step::SelectRisk);
		assert_eq!(state.risk, None);

		let state = reduce(state, Action::Back);
		assert_eq!(state.step, Step::Connect);
		assert_eq!(state.wallet, None);
	}

	#[test]
	fn tabs_only_switch_when_active() {
		let early = run(vec![Action::SelectTab(Tab::Chat)]);
		assert_eq!(early.tab, Tab::Dashboard);

		let state = run(vec![
			Action::WalletConnected("0x1".into()),
			Action::RiskSelected(RiskProfile::Balanced),
			Action::Deposited(100.0),
			Action::SelectTab(Tab::Signals),
		]);
		assert_eq!(state.tab, Tab::Signals);
		assert_eq!(reduce(state.clone(), Action::Back), state);
	}

	#[test]
	fn disconnect_resets_from_anywhere() {
		let state = run(vec![
			Action::WalletConnected("0x1".into()),
			Action::RiskSelected(RiskProfile::Balanced),
			Action::Deposited(100.0),
			Action::Disconnect,
		]);
		assert_eq!(state, FlowState::default());
	}
}
