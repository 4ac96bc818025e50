use std::fmt::Display;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;

use super::slots::{BarSeries, ChartSpec, ScatterPoint};
use super::tooltip::{HitShape, HitTarget};
use super::transform::{
	band, band_axis, band_center, padded_range, palette_color, rank_label, value_range,
};
use crate::error::ChartError;
use crate::format::format_number;

type Area = DrawingArea<CanvasBackend, Shift>;

const POINT_RADIUS: i32 = 6;

fn draw_error(e: impl Display) -> ChartError {
	ChartError::Draw(e.to_string())
}

/// Draw `spec` onto `canvas`, returning the hoverable regions.
pub fn draw(
	canvas: HtmlCanvasElement,
	canvas_id: &'static str,
	spec: &ChartSpec,
) -> Result<Vec<HitTarget>, ChartError> {
	let root = CanvasBackend::with_canvas_object(canvas)
		.ok_or(ChartError::Canvas(canvas_id))?
		.into_drawing_area();
	root.fill(&WHITE).map_err(draw_error)?;

	let targets = match spec {
		ChartSpec::Bar(series) => {
			let tips = series
				.labels
				.iter()
				.zip(&series.values)
				.map(|(label, value)| format!("{}: {}", label, format_number(*value)))
				.collect();
			vertical_bars(&root, &series.labels, &series.values, tips, true)?
		}
		ChartSpec::HorizontalBar(series) => horizontal_bars(&root, series)?,
		ChartSpec::Ranking(labels) => {
			// Lengths n..1 only encode position; the value axis stays unlabeled.
			let ranked: Vec<String> = labels
				.iter()
				.enumerate()
				.map(|(i, label)| rank_label(i + 1, label))
				.collect();
			let positions: Vec<f64> = (1..=labels.len()).rev().map(|p| p as f64).collect();
			vertical_bars(&root, &ranked, &positions, ranked.clone(), false)?
		}
		ChartSpec::Scatter(points) => scatter(&root, points)?,
	};

	root.present().map_err(draw_error)?;
	Ok(targets)
}

fn label_style(pos: Pos) -> TextStyle<'static> {
	("sans-serif", 12).into_font().color(&BLACK).pos(pos)
}

/// Bars sit on a continuous band axis so that `n` bars tile the plot.
/// Category labels are drawn by hand under each band's center.
fn vertical_bars(
	root: &Area,
	labels: &[String],
	values: &[f64],
	tips: Vec<String>,
	show_values: bool,
) -> Result<Vec<HitTarget>, ChartError> {
	let n = values.len();
	let range = value_range(values);
	let mut chart = ChartBuilder::on(root)
		.margin(10)
		.x_label_area_size(40)
		.y_label_area_size(if show_values { 50 } else { 10 })
		.build_cartesian_2d(band_axis(n), range.clone())
		.map_err(draw_error)?;

	let mut mesh = chart.configure_mesh();
	mesh.disable_x_mesh().x_labels(0);
	if !show_values {
		mesh.disable_y_mesh().y_labels(0);
	}
	mesh.draw().map_err(draw_error)?;

	chart
		.draw_series(values.iter().enumerate().map(|(i, &v)| {
			let mut bar = Rectangle::new(
				[(band(i).start, 0.0), (band(i).end, v)],
				palette_color(i).filled(),
			);
			bar.set_margin(0, 0, 3, 3);
			bar
		}))
		.map_err(draw_error)?;

	let style = label_style(Pos::new(HPos::Center, VPos::Top));
	for (i, label) in labels.iter().enumerate() {
		let (x, y) = chart.backend_coord(&(band_center(i), range.start));
		root.draw(&Text::new(label.as_str(), (x, y + 6), style.clone()))
			.map_err(draw_error)?;
	}

	Ok(values
		.iter()
		.zip(tips)
		.enumerate()
		.map(|(i, (&v, text))| {
			let (x0, y0) = chart.backend_coord(&(band(i).start, 0.0));
			let (x1, y1) = chart.backend_coord(&(band(i).end, v));
			HitTarget {
				shape: HitShape::Rect {
					x0: x0 as f64,
					y0: y0 as f64,
					x1: x1 as f64,
					y1: y1 as f64,
				},
				text,
			}
		})
		.collect())
}

/// Series index 0 is drawn as the top row.
fn horizontal_bars(root: &Area, series: &BarSeries) -> Result<Vec<HitTarget>, ChartError> {
	let n = series.values.len();
	let range = value_range(&series.values);
	let row_of = |i: usize| n - 1 - i;

	let mut chart = ChartBuilder::on(root)
		.margin(10)
		.x_label_area_size(30)
		.y_label_area_size(120)
		.build_cartesian_2d(range.clone(), band_axis(n))
		.map_err(draw_error)?;

	chart
		.configure_mesh()
		.disable_y_mesh()
		.y_labels(0)
		.draw()
		.map_err(draw_error)?;

	chart
		.draw_series(series.values.iter().enumerate().map(|(i, &v)| {
			let row = band(row_of(i));
			let mut bar = Rectangle::new(
				[(0.0, row.start), (v, row.end)],
				palette_color(i).filled(),
			);
			bar.set_margin(2, 2, 0, 0);
			bar
		}))
		.map_err(draw_error)?;

	let style = label_style(Pos::new(HPos::Right, VPos::Center));
	for (i, label) in series.labels.iter().enumerate() {
		let (x, y) = chart.backend_coord(&(range.start, band_center(row_of(i))));
		root.draw(&Text::new(label.as_str(), (x - 6, y), style.clone()))
			.map_err(draw_error)?;
	}

	Ok(series
		.labels
		.iter()
		.zip(&series.values)
		.enumerate()
		.map(|(i, (label, &v))| {
			let row = band(row_of(i));
			let (x0, y0) = chart.backend_coord(&(0.0, row.start));
			let (x1, y1) = chart.backend_coord(&(v, row.end));
			HitTarget {
				shape: HitShape::Rect {
					x0: x0 as f64,
					y0: y0 as f64,
					x1: x1 as f64,
					y1: y1 as f64,
				},
				text: format!("{}: {}", label, format_number(v)),
			}
		})
		.collect())
}

fn scatter(root: &Area, points: &[ScatterPoint]) -> Result<Vec<HitTarget>, ChartError> {
	let mut chart = ChartBuilder::on(root)
		.margin(10)
		.x_label_area_size(40)
		.y_label_area_size(50)
		.build_cartesian_2d(
			padded_range(points.iter().map(|p| p.x)),
			padded_range(points.iter().map(|p| p.y)),
		)
		.map_err(draw_error)?;

	let y_fmt = |v: &f64| format!("{:.0}", v);
	chart
		.configure_mesh()
		.x_desc("Degree centrality")
		.y_desc("Distinct neighbor industries")
		.y_label_formatter(&y_fmt)
		.draw()
		.map_err(draw_error)?;

	let color = palette_color(1);
	chart
		.draw_series(
			points
				.iter()
				.map(|p| Circle::new((p.x, p.y), POINT_RADIUS, color.filled())),
		)
		.map_err(draw_error)?;

	Ok(points
		.iter()
		.map(|p| {
			let (x, y) = chart.backend_coord(&(p.x, p.y));
			HitTarget {
				shape: HitShape::Circle {
					x: x as f64,
					y: y as f64,
					r: (POINT_RADIUS + 2) as f64,
				},
				text: p.tooltip(),
			}
		})
		.collect())
}
