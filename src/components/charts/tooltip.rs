use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

/// Hoverable region of a drawn chart, in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum HitShape {
	Rect { x0: f64, y0: f64, x1: f64, y1: f64 },
	Circle { x: f64, y: f64, r: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HitTarget {
	pub shape: HitShape,
	pub text: String,
}

impl HitShape {
	fn contains(&self, px: f64, py: f64) -> bool {
		match *self {
			HitShape::Rect { x0, y0, x1, y1 } => {
				px >= x0.min(x1) && px <= x0.max(x1) && py >= y0.min(y1) && py <= y0.max(y1)
			}
			HitShape::Circle { x, y, r } => (px - x).powi(2) + (py - y).powi(2) <= r * r,
		}
	}
}

/// Text of the top-most target under the point. Later targets draw on top.
pub fn hit_test(targets: &[HitTarget], x: f64, y: f64) -> Option<&str> {
	targets
		.iter()
		.rev()
		.find(|t| t.shape.contains(x, y))
		.map(|t| t.text.as_str())
}

/// Show target text as the canvas `title` while the pointer is over it.
///
/// Charts are drawn once per page load, so the listener lives as long as the
/// page does.
pub fn attach(canvas: &HtmlCanvasElement, targets: Vec<HitTarget>) {
	if targets.is_empty() {
		return;
	}
	let surface = canvas.clone();
	let on_move = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
		let rect = surface.get_bounding_client_rect();
		if rect.width() <= 0.0 || rect.height() <= 0.0 {
			return;
		}
		// CSS pixels to backing-store pixels
		let (x, y) = (
			(ev.client_x() as f64 - rect.left()) * surface.width() as f64 / rect.width(),
			(ev.client_y() as f64 - rect.top()) * surface.height() as f64 / rect.height(),
		);
		let _ = match hit_test(&targets, x, y) {
			Some(text) => surface.set_attribute("title", text),
			None => surface.remove_attribute("title"),
		};
	});
	let _ = canvas.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref());
	on_move.forget();
}

#[cfg(test)]
mod tests {
	use super::*;

	fn target(shape: HitShape, text: &str) -> HitTarget {
		HitTarget {
			shape,
			text: text.into(),
		}
	}

	#[test]
	fn rect_hit_ignores_corner_order() {
		let targets = [target(
			HitShape::Rect {
				x0: 10.0,
				y0: 50.0,
				x1: 30.0,
				y1: 20.0,
			},
			"bar",
		)];
		assert_eq!(hit_test(&targets, 20.0, 30.0), Some("bar"));
		assert_eq!(hit_test(&targets, 5.0, 30.0), None);
	}

	#[test]
	fn later_targets_win_overlaps() {
		let targets = [
			target(HitShape::Circle { x: 0.0, y: 0.0, r: 5.0 }, "under"),
			target(HitShape::Circle { x: 2.0, y: 0.0, r: 5.0 }, "over"),
		];
		assert_eq!(hit_test(&targets, 1.0, 0.0), Some("over"));
		assert_eq!(hit_test(&targets, -4.0, 0.0), Some("under"));
		assert_eq!(hit_test(&targets, 0.0, 9.0), None);
	}
}
