use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeRecord {
	pub id: String,
	#[serde(default)]
	pub label: Option<String>,
	/// Nodes sharing a group share a color.
	#[serde(default)]
	pub group: Option<String>,
	/// Hover text.
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EdgeRecord {
	pub from: String,
	pub to: String,
}

/// The graph as served by the network endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSnapshot {
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}
