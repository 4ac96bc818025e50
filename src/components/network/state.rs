use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphSnapshot;

const COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

pub const NODE_RADIUS: f64 = 8.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Edges are drawn in their source node's color at this opacity.
pub const EDGE_ALPHA: f64 = 0.3;
/// Hover dwell before a node's tooltip shows, in seconds.
pub const TOOLTIP_DELAY: f64 = 0.2;
/// Pointer travel, in screen pixels, below which a press counts as a click.
const CLICK_SLOP: f64 = 4.0;
const RING_RADIUS: f64 = 100.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	pub label: String,
	pub title: Option<String>,
	pub color: String,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	/// Travelled past the click slop.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	/// Travelled past the click slop.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	/// Seconds the pointer has rested on `node`.
	pub dwell_t: f64,
	delay_t: f64,
}

pub struct NetworkState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

impl NetworkState {
	pub fn new(data: &GraphSnapshot, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.04,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut id_to_idx = HashMap::new();
		let mut group_colors: HashMap<&str, &str> = HashMap::new();
		let mut edges = Vec::new();
		let ring = RING_RADIUS.max(data.nodes.len() as f64 * 2.0);

		for (i, node) in data.nodes.iter().enumerate() {
			let color = match (&node.color, &node.group) {
				(Some(color), _) => color.clone(),
				(None, Some(group)) => {
					let next = COLORS[group_colors.len() % COLORS.len()];
					(*group_colors.entry(group.as_str()).or_insert(next)).to_string()
				}
				(None, None) => COLORS[0].to_string(),
			};
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = ((ring * angle.cos()) as f32, (ring * angle.sin()) as f32);

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					label: node.label.clone().unwrap_or_else(|| node.id.clone()),
					title: node.title.clone(),
					color,
				},
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		for edge in &data.edges {
			if let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(edge.from.as_str()), id_to_idx.get(edge.to.as_str()))
			{
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			// HIT_RADIUS is in world-space, scales with zoom like nodes
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(node.index());
			}
		});
		found
	}

	/// Edges are not drawn while the user drags a node or the view.
	pub fn is_dragging(&self) -> bool {
		(self.drag.active && self.drag.moved) || (self.pan.active && self.pan.moved)
	}

	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.drag = DragState {
				active: true,
				node_idx: Some(idx),
				start_x: x,
				start_y: y,
				..DragState::default()
			};
			self.graph.visit_nodes(|node| {
				if node.index() == idx {
					self.drag.node_start_x = node.x();
					self.drag.node_start_y = node.y();
				}
			});
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	pub fn pointer_move(&mut self, x: f64, y: f64) {
		// Update hover state when not dragging
		if !self.drag.active {
			let hovered = self.node_at_position(x, y);
			self.set_hover(hovered);
		}

		if self.drag.active {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if !self.drag.moved && (dx * dx + dy * dy).sqrt() <= CLICK_SLOP {
				return;
			}
			self.drag.moved = true;
			if let Some(idx) = self.drag.node_idx {
				let (nx, ny) = (
					self.drag.node_start_x + (dx / self.transform.k) as f32,
					self.drag.node_start_y + (dy / self.transform.k) as f32,
				);
				self.graph.visit_nodes_mut(|node| {
					if node.index() == idx {
						node.data.x = nx;
						node.data.y = ny;
						node.data.is_anchor = true;
					}
				});
			}
		} else if self.pan.active {
			let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
			self.pan.moved |= (dx * dx + dy * dy).sqrt() > CLICK_SLOP;
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	/// End the current press. Returns the id of the clicked node when the
	/// press began and ended on the same node without dragging it.
	pub fn release(&mut self, x: f64, y: f64) -> Option<String> {
		let clicked = match (self.drag.active, self.drag.node_idx) {
			(true, Some(idx)) if !self.drag.moved && self.node_at_position(x, y) == Some(idx) => {
				self.node_id(idx)
			}
			_ => None,
		};
		self.cancel_pointer();
		clicked
	}

	pub fn cancel_pointer(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
		self.pan.moved = false;
	}

	/// Zoom by one wheel notch around the pointer.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Hover text and its screen anchor, once the dwell delay has passed.
	pub fn tooltip(&self) -> Option<(String, f64, f64)> {
		let idx = self.hover.node?;
		if self.hover.dwell_t < TOOLTIP_DELAY || self.drag.active {
			return None;
		}
		let mut tip = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				let info = &node.data.user_data;
				let text = info.title.clone().unwrap_or_else(|| info.label.clone());
				let (sx, sy) = self.graph_to_screen(node.x() as f64, node.y() as f64);
				tip = Some((text, sx, sy));
			}
		});
		tip
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		// Save previous state for fade-out
		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();
		self.hover.dwell_t = 0.0;

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.dwell_t += dt as f64;
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::types::{EdgeRecord, NodeRecord};

	fn node(id: &str, group: Option<&str>) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			label: None,
			group: group.map(Into::into),
			title: Some(format!("{} tip", id)),
			color: None,
		}
	}

	fn edge(from: &str, to: &str) -> EdgeRecord {
		EdgeRecord {
			from: from.into(),
			to: to.into(),
		}
	}

	fn snapshot() -> GraphSnapshot {
		GraphSnapshot {
			nodes: vec![
				node("Acme", Some("Tech")),
				node("Globex", Some("Energy")),
				node("Initech", Some("Tech")),
				node("Hooli", None),
			],
			edges: vec![edge("Acme", "Globex"), edge("Acme", "Ghost")],
		}
	}

	/// Screen position of the node with `id` at construction time.
	fn screen_of(state: &NetworkState, id: &str) -> (f64, f64) {
		let mut pos = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.id == id {
				pos = Some(state.graph_to_screen(node.x() as f64, node.y() as f64));
			}
		});
		pos.unwrap()
	}

	fn colors(state: &NetworkState) -> HashMap<String, String> {
		let mut colors = HashMap::new();
		state.graph.visit_nodes(|node| {
			let info = &node.data.user_data;
			colors.insert(info.id.clone(), info.color.clone());
		});
		colors
	}

	#[test]
	fn edges_to_unknown_nodes_are_skipped() {
		let state = NetworkState::new(&snapshot(), 800.0, 600.0);
		assert_eq!(state.edges.len(), 1);
	}

	#[test]
	fn groups_share_colors_in_first_seen_order() {
		let colors = colors(&NetworkState::new(&snapshot(), 800.0, 600.0));
		assert_eq!(colors["Acme"], COLORS[0]);
		assert_eq!(colors["Globex"], COLORS[1]);
		assert_eq!(colors["Initech"], colors["Acme"]);
		assert_eq!(colors["Hooli"], COLORS[0]);
	}

	#[test]
	fn label_falls_back_to_id() {
		let state = NetworkState::new(&snapshot(), 800.0, 600.0);
		let mut labels = Vec::new();
		state
			.graph
			.visit_nodes(|node| labels.push(node.data.user_data.label.clone()));
		assert!(labels.contains(&"Globex".to_string()));
	}

	#[test]
	fn click_on_node_reports_its_id() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		let (x, y) = screen_of(&state, "Globex");
		state.press(x, y);
		state.pointer_move(x + 1.0, y);
		assert_eq!(state.release(x + 1.0, y), Some("Globex".into()));
		assert!(!state.drag.active);
	}

	#[test]
	fn dragging_a_node_is_not_a_click() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		let (x, y) = screen_of(&state, "Acme");
		state.press(x, y);
		state.pointer_move(x + 40.0, y + 40.0);
		assert!(state.is_dragging());
		assert_eq!(state.release(x + 40.0, y + 40.0), None);
		assert!(!state.is_dragging());
	}

	#[test]
	fn click_on_empty_space_pans_and_reports_nothing() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		state.press(5.0, 5.0);
		assert!(state.pan.active);
		state.pointer_move(25.0, 5.0);
		assert_eq!(state.transform.x, 420.0);
		assert_eq!(state.release(25.0, 5.0), None);
	}

	#[test]
	fn click_on_empty_space_keeps_edges() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		state.press(5.0, 5.0);
		assert!(!state.is_dragging());
		state.pointer_move(7.0, 6.0);
		assert!(!state.is_dragging());
		state.pointer_move(25.0, 5.0);
		assert!(state.is_dragging());
		state.release(25.0, 5.0);
		assert!(!state.is_dragging());
	}

	#[test]
	fn hover_tooltip_waits_for_dwell() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		let (x, y) = screen_of(&state, "Acme");
		state.pointer_move(x, y);
		assert!(state.hover.neighbors.len() == 1);
		assert_eq!(state.tooltip(), None);
		state.hover.dwell_t = TOOLTIP_DELAY;
		let (text, _, _) = state.tooltip().unwrap();
		assert_eq!(text, "Acme tip");
	}

	#[test]
	fn zoom_keeps_pointer_fixed() {
		let mut state = NetworkState::new(&snapshot(), 800.0, 600.0);
		let before = state.screen_to_graph(100.0, 100.0);
		state.zoom_at(100.0, 100.0, -1.0);
		let after = state.screen_to_graph(100.0, 100.0);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
		assert!(state.transform.k > 1.0);
	}
}
