//! Charts drawn from the page-injected datasets onto fixed canvas slots.

mod draw;
mod slots;
mod tooltip;
mod transform;

use log::{info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement};

use crate::error::ChartError;
use crate::page_data::PageData;

pub use slots::ChartSlot;
use slots::{ChartSpec, plan_charts};

/// Draw every chart whose canvas and dataset are both present. A failing
/// chart is logged and skipped; the others still draw. Returns how many
/// charts were drawn.
pub fn render_charts(document: &Document, data: &PageData) -> usize {
	let plans = plan_charts(data, |id| document.get_element_by_id(id).is_some());
	let attempted = plans.len();
	let mut drawn = 0;
	for planned in plans {
		let slot = planned.slot;
		match planned.spec.and_then(|spec| draw_slot(document, slot, &spec)) {
			Ok(()) => drawn += 1,
			Err(e) => warn!("{} chart skipped: {}", slot.title(), e),
		}
	}
	info!("Rendered {} of {} charts", drawn, attempted);
	drawn
}

fn draw_slot(document: &Document, slot: ChartSlot, spec: &ChartSpec) -> Result<(), ChartError> {
	let id = slot.canvas_id();
	let canvas: HtmlCanvasElement = document
		.get_element_by_id(id)
		.and_then(|el| el.dyn_into().ok())
		.ok_or(ChartError::Canvas(id))?;
	let targets = draw::draw(canvas.clone(), id, spec)?;
	tooltip::attach(&canvas, targets);
	Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use super::*;
	use serde_json::json;
	use wasm_bindgen_test::*;
	use web_sys::Element;

	fn mount(document: &Document, tag: &str, id: &str) -> Element {
		let el = document.create_element(tag).unwrap();
		el.set_id(id);
		if let Ok(canvas) = el.clone().dyn_into::<HtmlCanvasElement>() {
			canvas.set_width(600);
			canvas.set_height(320);
		}
		document.body().unwrap().append_child(&el).unwrap();
		el
	}

	fn document() -> Document {
		web_sys::window().unwrap().document().unwrap()
	}

	#[wasm_bindgen_test]
	fn non_canvas_slot_is_a_canvas_error() {
		let document = document();
		let div = mount(&document, "div", "kcoreChart");
		let spec = ChartSpec::Ranking(vec!["Pune".into()]);
		let result = draw_slot(&document, ChartSlot::KCore, &spec);
		div.remove();
		assert!(matches!(result, Err(ChartError::Canvas("kcoreChart"))));
	}

	#[wasm_bindgen_test]
	fn failing_slot_does_not_stop_the_others() {
		let document = document();
		let bad = mount(&document, "div", "kcoreChart");
		let good = mount(&document, "canvas", "degreeChart");
		let data = PageData::from_value(json!({
			"kcore": { "labels": ["A"], "values": [3] },
			"degree": { "labels": ["A", "B"], "values": [0.5, 0.25] },
		}));
		let drawn = render_charts(&document, &data);
		bad.remove();
		good.remove();
		assert_eq!(drawn, 1);
	}

	#[wasm_bindgen_test]
	fn bars_span_the_whole_plot() {
		let document = document();
		let el = mount(&document, "canvas", "fundingChart");
		let canvas: HtmlCanvasElement = el.clone().dyn_into().unwrap();
		let spec = ChartSpec::Ranking(vec!["Pune".into(), "Delhi".into(), "Goa".into()]);
		let targets = draw::draw(canvas, "fundingChart", &spec).unwrap();
		el.remove();

		let spans: Vec<(f64, f64)> = targets
			.iter()
			.map(|t| match t.shape {
				tooltip::HitShape::Rect { x0, x1, .. } => (x0.min(x1), x0.max(x1)),
				tooltip::HitShape::Circle { .. } => panic!("bars are rectangles"),
			})
			.collect();
		assert_eq!(spans.len(), 3);
		for pair in spans.windows(2) {
			assert_eq!(pair[0].1, pair[1].0);
		}
		// 10px chart margin on the right, no label area there
		assert!(spans[2].1 >= 585.0, "last bar ends at {}", spans[2].1);
		let width = spans[0].1 - spans[0].0;
		assert!((spans[2].1 - spans[0].0 - 3.0 * width).abs() <= 2.0);
	}
}
