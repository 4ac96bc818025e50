use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{EDGE_ALPHA, NODE_RADIUS, NetworkState};

const BACKGROUND: &str = "#f8f9fa";
const LABEL_COLOR: &str = "#2b2d42";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// `#rrggbb` (or `#rgb`) as an `rgba()` string. Other color syntaxes are
/// returned unchanged.
pub fn with_alpha(color: &str, alpha: f64) -> String {
	let Some(hex) = color.strip_prefix('#') else {
		return color.to_owned();
	};
	let expanded: String = match hex.len() {
		3 => hex.chars().flat_map(|c| [c, c]).collect(),
		6 => hex.to_owned(),
		_ => return color.to_owned(),
	};
	let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
	match (channel(0), channel(2), channel(4)) {
		(Ok(r), Ok(g), Ok(b)) => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
		_ => color.to_owned(),
	}
}

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	if !state.is_dragging() {
		draw_edges(state, ctx);
	}
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());
		let (alpha, width) = if is_highlighted {
			(EDGE_ALPHA + 0.5 * t, (1.0 + 0.5 * t) / k)
		} else {
			(EDGE_ALPHA * (1.0 - 0.6 * t), 1.0 / k)
		};

		ctx.set_stroke_style_str(&with_alpha(&n1.data.user_data.color, alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	});
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let alpha = if has_highlight { 1.0 - 0.6 * t } else { 1.0 };
		let info = &node.data.user_data;

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();
		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&info.label, x + NODE_RADIUS + 3.0, y + 4.0);
		ctx.set_global_alpha(1.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let radius = if state.is_hovered(idx) {
			NODE_RADIUS * (1.0 + 0.35 * t)
		} else {
			NODE_RADIUS * (1.0 + 0.15 * t)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		if state.is_hovered(idx) && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&with_alpha(LABEL_COLOR, 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0);
	});
}

/// Drawn in screen space so it keeps its size under zoom.
fn draw_tooltip(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let Some((text, sx, sy)) = state.tooltip() else {
		return;
	};
	ctx.set_font("12px sans-serif");
	let text_width = ctx.measure_text(&text).map(|m| m.width()).unwrap_or(0.0);
	let (pad, height) = (6.0, 22.0);
	let width = text_width + 2.0 * pad;
	let x = (sx + 12.0).min(state.width - width).max(0.0);
	let y = (sy - height - 12.0).max(0.0);

	ctx.set_fill_style_str("rgba(33, 37, 41, 0.9)");
	ctx.fill_rect(x, y, width, height);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(&text, x + pad, y + 15.0);
}
