use std::fmt;

use serde_json::Value;

use crate::api::CompanyDetail;
use crate::error::ApiError;
use crate::format::format_number;

/// One `label: value` line of the detail list.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailRow {
	pub label: String,
	pub value: String,
}

impl fmt::Display for DetailRow {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.label, self.value)
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModalBody {
	#[default]
	Loading,
	Rows(Vec<DetailRow>),
	Error,
}

/// Modal contents. Every open takes a new ticket and only the response for
/// the latest ticket is applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetailModal {
	pub open: bool,
	pub title: String,
	pub body: ModalBody,
	ticket: u64,
}

impl DetailModal {
	pub fn open(&mut self, name: &str) -> u64 {
		self.ticket += 1;
		self.open = true;
		self.title = name.to_owned();
		self.body = ModalBody::Loading;
		self.ticket
	}

	/// Apply a fetch result. Returns false when a later open superseded it.
	pub fn resolve(
		&mut self,
		ticket: u64,
		result: Result<CompanyDetail, ApiError>,
		identity_key: &str,
	) -> bool {
		if ticket != self.ticket {
			return false;
		}
		self.body = match result {
			Ok(detail) => ModalBody::Rows(detail_rows(&detail, identity_key)),
			Err(_) => ModalBody::Error,
		};
		true
	}

	pub fn close(&mut self) {
		self.open = false;
	}
}

/// Rows for every attribute except the identity key, in server order.
pub fn detail_rows(detail: &CompanyDetail, identity_key: &str) -> Vec<DetailRow> {
	detail
		.iter()
		.filter(|(key, _)| key.as_str() != identity_key)
		.map(|(key, value)| DetailRow {
			label: key.replace('_', " "),
			value: display_value(value),
		})
		.collect()
}

fn display_value(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		Value::Number(n) => n
			.as_i64()
			.map(|i| i.to_string())
			.or_else(|| n.as_f64().map(format_number))
			.unwrap_or_else(|| n.to_string()),
		other => other.to_string(),
	}
}
