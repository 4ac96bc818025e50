//! Error types shared across the dashboard components.

use thiserror::Error;

/// Failures talking to the dashboard's HTTP endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("request to {url} failed: {source}")]
	Transport {
		url: String,
		#[source]
		source: gloo_net::Error,
	},
	/// The server answered with a non-success status.
	#[error("{url} returned status {status}")]
	Status { url: String, status: u16 },
	/// The body was not the expected JSON shape.
	#[error("could not decode response from {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: gloo_net::Error,
	},
}

/// Failures building or drawing one chart.
#[derive(Debug, Error)]
pub enum ChartError {
	/// The dataset under `key` did not have the expected shape.
	#[error("dataset `{key}` is malformed: {source}")]
	Dataset {
		key: &'static str,
		#[source]
		source: serde_json::Error,
	},
	/// Labels and values are not parallel.
	#[error("dataset `{key}` has {labels} labels but {values} values")]
	LengthMismatch {
		key: &'static str,
		labels: usize,
		values: usize,
	},
	/// A value was NaN or infinite.
	#[error("dataset `{key}` has a non-finite value at index {index}")]
	NonFinite { key: &'static str, index: usize },
	/// The element could not be used as a drawing surface.
	#[error("element `{0}` is not a usable canvas")]
	Canvas(&'static str),
	/// The charting backend failed while drawing.
	#[error("drawing failed: {0}")]
	Draw(String),
}

/// Failures reading globals injected by the hosting page.
#[derive(Debug, Error)]
pub enum PageDataError {
	/// There is no browser window.
	#[error("no window available")]
	NoWindow,
	/// The global exists but is not plain JSON data.
	#[error("global `{name}` could not be decoded: {message}")]
	Decode { name: String, message: String },
}
