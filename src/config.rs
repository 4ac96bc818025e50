//! Dashboard configuration, optionally overridden by the hosting page.

use log::{info, warn};
use serde::Deserialize;

/// Name of the page global that may override [`DashboardConfig`].
pub const CONFIG_GLOBAL: &str = "DASHBOARD_CONFIG";

/// HTTP endpoints the dashboard reads from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
	/// Company name search, queried with `?q=`.
	pub search: String,
	/// Full graph snapshot.
	pub network: String,
	/// Company detail prefix; the encoded company name is appended.
	pub company: String,
}

impl Default for Endpoints {
	fn default() -> Self {
		Self {
			search: "/api/search".into(),
			network: "/api/network".into(),
			company: "/api/company".into(),
		}
	}
}

/// Search box tuning.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
	/// Quiet window before a query is issued.
	pub debounce_ms: u32,
	/// Trimmed input shorter than this never queries.
	pub min_chars: usize,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			debounce_ms: 300,
			min_chars: 2,
		}
	}
}

/// Top-level configuration shared through Leptos context.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
	/// Endpoint paths.
	pub endpoints: Endpoints,
	/// Search behaviour.
	pub search: SearchConfig,
	/// Detail key suppressed in the modal body because it is the title.
	pub identity_key: String,
}

impl Default for DashboardConfig {
	fn default() -> Self {
		Self {
			endpoints: Endpoints::default(),
			search: SearchConfig::default(),
			identity_key: "Company_Name".into(),
		}
	}
}

impl DashboardConfig {
	/// Decode an override object. Missing fields keep their defaults.
	pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
		serde_json::from_value(value)
	}

	/// Read `window.DASHBOARD_CONFIG`, falling back to defaults when it is
	/// absent or malformed.
	pub fn from_page() -> Self {
		let value = match crate::page_data::read_global(CONFIG_GLOBAL) {
			Ok(Some(value)) => value,
			Ok(None) => return Self::default(),
			Err(e) => {
				warn!("Ignoring {}: {}", CONFIG_GLOBAL, e);
				return Self::default();
			}
		};
		match Self::from_json(value) {
			Ok(config) => {
				info!("Loaded {} override", CONFIG_GLOBAL);
				config
			}
			Err(e) => {
				warn!("Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn defaults_match_documented_values() {
		let config = DashboardConfig::default();
		assert_eq!(config.search.debounce_ms, 300);
		assert_eq!(config.search.min_chars, 2);
		assert_eq!(config.endpoints.network, "/api/network");
		assert_eq!(config.identity_key, "Company_Name");
	}

	#[test]
	fn partial_override_keeps_other_defaults() {
		let config =
			DashboardConfig::from_json(json!({ "search": { "debounce_ms": 150 } })).unwrap();
		assert_eq!(config.search.debounce_ms, 150);
		assert_eq!(config.search.min_chars, 2);
		assert_eq!(config.endpoints, Endpoints::default());
	}

	#[test]
	fn malformed_override_is_an_error() {
		assert!(DashboardConfig::from_json(json!({ "search": { "debounce_ms": "soon" } })).is_err());
	}
}
