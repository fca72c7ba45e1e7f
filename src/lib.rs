//! echo-signals: deterministic mock data and a 3D signal graph for the Echo
//! trading demo.
//!
//! Everything the demo shows is derived from the connected wallet address:
//! the address is hashed into a seed, and the signal, trade, and portfolio
//! generators under [`demo`] are pure functions of that seed. The
//! [`SignalGraphCanvas`] component lays the signals out with the force
//! simulation in [`layout`] and renders them as an orbiting point cloud.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod demo;
pub mod error;
pub mod layout;
pub mod seed;

pub use components::signal_graph::SignalGraphCanvas;
pub use config::{DemoConfig, ValidatedConfig};
pub use error::{Error, Result};

use demo::trades::DEMO_BALANCE_USD;
use demo::{Action, FlowState, RateLimiter, RiskProfile, SnapshotApi, Tab};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("echo-signals: logging initialized");
}

/// Text of `<script id="demo-config">`, if the page has one.
fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("demo-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Loads and validates the page configuration, falling back to defaults on
/// any problem.
fn load_demo_config() -> ValidatedConfig {
	let Some(json) = config_script_text() else {
		info!("echo-signals: no demo-config element, using defaults");
		return ValidatedConfig::default();
	};

	match DemoConfig::from_json(&json).and_then(|raw| raw.validate()) {
		Ok(cfg) => {
			info!(
				"echo-signals: loaded config for {} ({} profile, {} signals)",
				cfg.wallet, cfg.risk_profile, cfg.signal_count
			);
			cfg
		}
		Err(e) => {
			warn!("echo-signals: invalid demo config: {}", e);
			ValidatedConfig::default()
		}
	}
}

/// Runs the onboarding wizard to completion for `wallet` at `risk`.
fn onboard(wallet: &str, risk: RiskProfile) -> FlowState {
	[
		Action::WalletConnected(wallet.to_string()),
		Action::RiskSelected(risk),
		Action::Deposited(DEMO_BALANCE_USD),
	]
	.into_iter()
	.fold(FlowState::default(), demo::reduce)
}

/// One snapshot request, rendered as a status line.
fn snapshot_line(cfg: &ValidatedConfig) -> String {
	let now = js_sys::Date::now();
	let result = SnapshotApi::new(
		RateLimiter::new(cfg.min_request_interval_ms),
		cfg.failures,
		StdRng::seed_from_u64(now as u64),
	)
	.and_then(|mut api| api.fetch(&cfg.wallet, now));
	demo::status_line(&result)
}

/// Main application component.
/// Builds the demo data for the configured wallet and renders the signal graph
/// with a small overlay for switching risk profile and tab.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let cfg = load_demo_config();
	let seed = seed::seed_from_string(&cfg.wallet);
	let now = js_sys::Date::now() as i64;
	let count = cfg.signal_count;
	let status = snapshot_line(&cfg);

	let wallet = cfg.wallet.clone();
	let flow = RwSignal::new(onboard(&wallet, cfg.risk_profile));
	let risk = Memo::new(move |_| flow.with(|f| f.risk.unwrap_or_default()));

	let signals = Signal::derive(move || {
		demo::signals_for_profile(seed, count, now, risk.get()).unwrap_or_else(|e| {
			warn!("echo-signals: signal generation failed: {}", e);
			Vec::new()
		})
	});
	let stats = Signal::derive(move || {
		demo::generate_trades(seed, risk.get(), now)
			.map(|trades| demo::summarize(&trades))
			.unwrap_or_default()
	});

	let select_risk = move |profile: RiskProfile| {
		let tab = flow.with_untracked(|f| f.tab);
		let next = demo::reduce(onboard(&wallet, profile), Action::SelectTab(tab));
		flow.set(next);
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Echo Signal Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<SignalGraphCanvas signals=signals layout=cfg.layout.clone() fullscreen=true />
			<div class="graph-overlay">
				<h1>"Echo Signals"</h1>
				<p class="subtitle">{status}</p>
				<div class="risk-picker">
					{RiskProfile::iter()
						.map(|profile| {
							let select_risk = select_risk.clone();
							view! {
								<button
									class:active=move || risk.get() == profile
									on:click=move |_| select_risk(profile)
								>
									{profile.to_string()}
								</button>
							}
						})
						.collect_view()}
				</div>
				<nav class="tabs">
					{Tab::iter()
						.map(|tab| {
							view! {
								<button
									class:active=move || flow.with(|f| f.tab == tab)
									on:click=move |_| flow.update(|f| *f = demo::reduce(std::mem::take(f), Action::SelectTab(tab)))
								>
									{format!("{:?}", tab)}
								</button>
							}
						})
						.collect_view()}
				</nav>
				{move || match flow.with(|f| f.tab) {
					Tab::Dashboard => {
						let s = stats.get();
						view! {
							<p class="stats">
								{format!(
									"{} trades · win rate {:.0}% · PnL ${:.2}",
									s.trade_count,
									s.win_rate * 100.0,
									s.total_pnl
								)}
							</p>
						}
						.into_any()
					}
					Tab::Signals => view! {
						<ul class="signal-list">
							{signals
								.get()
								.into_iter()
								.map(|s| {
									view! {
										<li>
											{format!(
												"{} {:?} {:.0}% via {}",
												s.token,
												s.direction,
												s.confidence * 100.0,
												s.source
											)}
										</li>
									}
								})
								.collect_view()}
						</ul>
					}
					.into_any(),
					Tab::Agent | Tab::Chat => ().into_any(),
				}}
			</div>
		</div>
	}
}
