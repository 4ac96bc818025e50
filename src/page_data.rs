//! Access to data the server injects into the page as JS globals.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use wasm_bindgen::JsValue;

use crate::error::PageDataError;

/// Name of the global holding the pre-computed chart datasets.
pub const CHART_DATA_GLOBAL: &str = "CHART_DATA";

/// Read a global off `window` as plain JSON. `Ok(None)` when it is unset.
pub fn read_global(name: &str) -> Result<Option<Value>, PageDataError> {
	let window = web_sys::window().ok_or(PageDataError::NoWindow)?;
	let raw = js_sys::Reflect::get(&window, &JsValue::from_str(name)).map_err(|e| {
		PageDataError::Decode {
			name: name.into(),
			message: format!("{:?}", e),
		}
	})?;
	if raw.is_undefined() || raw.is_null() {
		return Ok(None);
	}
	serde_wasm_bindgen::from_value(raw)
		.map(Some)
		.map_err(|e| PageDataError::Decode {
			name: name.into(),
			message: e.to_string(),
		})
}

/// The page-injected dataset object.
///
/// Entries stay as raw JSON so each consumer decodes only its own key and a
/// malformed dataset cannot take the others down with it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageData {
	entries: Map<String, Value>,
}

impl PageData {
	/// Wrap a decoded object. Anything but a JSON object yields empty data.
	pub fn from_value(value: Value) -> Self {
		match value {
			Value::Object(entries) => Self { entries },
			other => {
				warn!("{} is not an object (got {}), ignoring it", CHART_DATA_GLOBAL, kind(&other));
				Self::default()
			}
		}
	}

	/// Read `window.CHART_DATA`. A missing or undecodable global is empty data.
	pub fn from_page() -> Self {
		match read_global(CHART_DATA_GLOBAL) {
			Ok(Some(value)) => {
				let data = Self::from_value(value);
				debug!("{} has {} entries", CHART_DATA_GLOBAL, data.entries.len());
				data
			}
			Ok(None) => Self::default(),
			Err(e) => {
				warn!("{}", e);
				Self::default()
			}
		}
	}

	/// Raw entry for `key`, treating JSON `null` as absent.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key).filter(|v| !v.is_null())
	}

	/// Decode the entry for `key`. `None` when absent.
	pub fn decode<T: DeserializeOwned>(&self, key: &str) -> Option<Result<T, serde_json::Error>> {
		self.get(key).map(|v| T::deserialize(v))
	}
}

fn kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn non_object_is_empty() {
		assert_eq!(PageData::from_value(json!([1, 2])), PageData::default());
	}

	#[test]
	fn null_entries_are_absent() {
		let data = PageData::from_value(json!({ "degree": null, "kcore": {} }));
		assert!(data.get("degree").is_none());
		assert!(data.get("kcore").is_some());
		assert!(data.get("betweenness").is_none());
	}

	#[test]
	fn decode_reports_shape_errors_per_key() {
		let data = PageData::from_value(json!({
			"top_cities_list": ["Pune", "Delhi"],
			"top_industries_list": 7,
		}));
		let cities: Vec<String> = data.decode("top_cities_list").unwrap().unwrap();
		assert_eq!(cities, ["Pune", "Delhi"]);
		assert!(data.decode::<Vec<String>>("top_industries_list").unwrap().is_err());
	}
}
