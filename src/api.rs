//! Thin client for the dashboard's read-only JSON endpoints.

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::components::network::GraphSnapshot;
use crate::config::Endpoints;
use crate::error::ApiError;

/// Attribute map for one company, in server order.
pub type CompanyDetail = Map<String, Value>;

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	results: Vec<String>,
}

/// `GET {search}?q=<query>`, returning matching company names.
pub async fn search(endpoints: &Endpoints, query: &str) -> Result<Vec<String>, ApiError> {
	let url = endpoints.search.clone();
	let response = Request::get(&url)
		.query([("q", query)])
		.send()
		.await
		.map_err(|source| ApiError::Transport {
			url: url.clone(),
			source,
		})?;
	let body: SearchResponse = decode(&url, response).await?;
	Ok(body.results)
}

/// `GET {network}`, the full node/edge snapshot.
pub async fn network(endpoints: &Endpoints) -> Result<GraphSnapshot, ApiError> {
	get_json(&endpoints.network).await
}

/// `GET {company}/<encoded name>`.
pub async fn company(endpoints: &Endpoints, name: &str) -> Result<CompanyDetail, ApiError> {
	get_json(&company_url(endpoints, name)).await
}

/// Detail URL for `name`, percent-encoded as a single path segment.
pub fn company_url(endpoints: &Endpoints, name: &str) -> String {
	format!(
		"{}/{}",
		endpoints.company.trim_end_matches('/'),
		urlencoding::encode(name)
	)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
	let response = Request::get(url)
		.send()
		.await
		.map_err(|source| ApiError::Transport {
			url: url.into(),
			source,
		})?;
	decode(url, response).await
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
	if !response.ok() {
		return Err(ApiError::Status {
			url: url.into(),
			status: response.status(),
		});
	}
	response.json().await.map_err(|source| ApiError::Decode {
		url: url.into(),
		source,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn company_url_encodes_the_name_as_one_segment() {
		let endpoints = Endpoints::default();
		assert_eq!(company_url(&endpoints, "Acme"), "/api/company/Acme");
		assert_eq!(
			company_url(&endpoints, "Foo & Bar/Baz"),
			"/api/company/Foo%20%26%20Bar%2FBaz"
		);
	}

	#[test]
	fn company_url_tolerates_trailing_slash() {
		let endpoints = Endpoints {
			company: "/api/company/".into(),
			..Endpoints::default()
		};
		assert_eq!(company_url(&endpoints, "Acme"), "/api/company/Acme");
	}

	#[test]
	fn search_response_without_results_is_empty() {
		let body: SearchResponse = serde_json::from_str("{}").unwrap();
		assert!(body.results.is_empty());
	}
}
