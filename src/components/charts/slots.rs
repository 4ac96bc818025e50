use serde::Deserialize;

use super::transform::Precision;
use crate::error::ChartError;
use crate::format::{format_number, round_half_up};
use crate::page_data::PageData;

/// One of the fixed chart positions on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartSlot {
	TopCities,
	TopIndustries,
	Degree,
	Betweenness,
	Funding,
	KCore,
	Bridges,
}

impl ChartSlot {
	pub const ALL: [ChartSlot; 7] = [
		ChartSlot::TopCities,
		ChartSlot::TopIndustries,
		ChartSlot::Degree,
		ChartSlot::Betweenness,
		ChartSlot::Funding,
		ChartSlot::KCore,
		ChartSlot::Bridges,
	];

	pub fn canvas_id(self) -> &'static str {
		match self {
			ChartSlot::TopCities => "topCitiesChart",
			ChartSlot::TopIndustries => "topIndustriesChart",
			ChartSlot::Degree => "degreeChart",
			ChartSlot::Betweenness => "betweennessChart",
			ChartSlot::Funding => "fundingChart",
			ChartSlot::KCore => "kcoreChart",
			ChartSlot::Bridges => "bridgesScatter",
		}
	}

	pub fn data_key(self) -> &'static str {
		match self {
			ChartSlot::TopCities => "top_cities_list",
			ChartSlot::TopIndustries => "top_industries_list",
			ChartSlot::Degree => "degree",
			ChartSlot::Betweenness => "betweenness",
			ChartSlot::Funding => "funding_vs_influence",
			ChartSlot::KCore => "kcore",
			ChartSlot::Bridges => "bridges_scatter",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			ChartSlot::TopCities => "Top Cities",
			ChartSlot::TopIndustries => "Top Industries",
			ChartSlot::Degree => "Degree Centrality",
			ChartSlot::Betweenness => "Betweenness (×1000)",
			ChartSlot::Funding => "Funding vs Influence",
			ChartSlot::KCore => "K-core",
			ChartSlot::Bridges => "Industry Bridges",
		}
	}

	/// Build this slot's chart from `data`. `None` when the dataset is
	/// absent or empty.
	pub fn build(self, data: &PageData) -> Option<Result<ChartSpec, ChartError>> {
		let key = self.data_key();
		let built = match self {
			ChartSlot::TopCities | ChartSlot::TopIndustries => {
				decode::<Vec<String>>(data, key).map(|labels| labels.map(ChartSpec::Ranking))
			}
			ChartSlot::Degree => series(data, key, true, Precision::Places(4)),
			ChartSlot::Betweenness => series(data, key, true, Precision::Places(2)),
			ChartSlot::Funding => series(data, key, false, Precision::Places(4)),
			ChartSlot::KCore => series(data, key, true, Precision::Integer),
			ChartSlot::Bridges => decode::<Vec<BridgeRecord>>(data, key).map(|records| {
				records.and_then(|records| scatter_points(key, records).map(ChartSpec::Scatter))
			}),
		};
		built.filter(|spec| !matches!(spec, Ok(spec) if spec.is_empty()))
	}
}

/// A chart ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum ChartSpec {
	/// Vertical bars, left to right in series order.
	Bar(BarSeries),
	/// Horizontal bars, top to bottom in series order.
	HorizontalBar(BarSeries),
	/// Ordered labels with no magnitudes. Bar lengths only encode position.
	Ranking(Vec<String>),
	Scatter(Vec<ScatterPoint>),
}

impl ChartSpec {
	pub fn is_empty(&self) -> bool {
		match self {
			ChartSpec::Bar(series) | ChartSpec::HorizontalBar(series) => series.labels.is_empty(),
			ChartSpec::Ranking(labels) => labels.is_empty(),
			ChartSpec::Scatter(points) => points.is_empty(),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BarSeries {
	#[serde(default)]
	pub labels: Vec<String>,
	#[serde(default)]
	pub values: Vec<f64>,
}

impl BarSeries {
	fn check(&self, key: &'static str) -> Result<(), ChartError> {
		if self.labels.len() != self.values.len() {
			return Err(ChartError::LengthMismatch {
				key,
				labels: self.labels.len(),
				values: self.values.len(),
			});
		}
		match self.values.iter().position(|v| !v.is_finite()) {
			Some(index) => Err(ChartError::NonFinite { key, index }),
			None => Ok(()),
		}
	}

	/// Same series, opposite display order.
	pub fn reversed(mut self) -> Self {
		self.labels.reverse();
		self.values.reverse();
		self
	}

	pub fn rounded(mut self, precision: Precision) -> Self {
		for value in &mut self.values {
			*value = precision.apply(*value);
		}
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
	pub x: f64,
	pub y: f64,
	pub company: String,
	pub industry: String,
}

impl ScatterPoint {
	pub fn tooltip(&self) -> String {
		format!(
			"{} — Industry: {} — Degree: {:.3} — Neighbor industries: {}",
			self.company,
			self.industry,
			round_half_up(self.x, 3),
			format_number(self.y)
		)
	}
}

#[derive(Debug, Deserialize)]
struct BridgeRecord {
	company: String,
	#[serde(default)]
	industry: String,
	degree: f64,
	neighbor_industry_count: f64,
}

fn decode<T: for<'de> Deserialize<'de>>(
	data: &PageData,
	key: &'static str,
) -> Option<Result<T, ChartError>> {
	data.decode::<T>(key)
		.map(|decoded| decoded.map_err(|source| ChartError::Dataset { key, source }))
}

fn series(
	data: &PageData,
	key: &'static str,
	horizontal: bool,
	precision: Precision,
) -> Option<Result<ChartSpec, ChartError>> {
	decode::<BarSeries>(data, key).map(|decoded| {
		let series = decoded?;
		series.check(key)?;
		Ok(if horizontal {
			ChartSpec::HorizontalBar(series.reversed().rounded(precision))
		} else {
			ChartSpec::Bar(series.rounded(precision))
		})
	})
}

fn scatter_points(
	key: &'static str,
	records: Vec<BridgeRecord>,
) -> Result<Vec<ScatterPoint>, ChartError> {
	records
		.into_iter()
		.enumerate()
		.map(|(index, record)| {
			if !record.degree.is_finite() || !record.neighbor_industry_count.is_finite() {
				return Err(ChartError::NonFinite { key, index });
			}
			Ok(ScatterPoint {
				x: record.degree,
				y: record.neighbor_industry_count,
				company: record.company,
				industry: record.industry,
			})
		})
		.collect()
}

/// A construction attempt for one slot present on the page.
#[derive(Debug)]
pub struct PlannedChart {
	pub slot: ChartSlot,
	pub spec: Result<ChartSpec, ChartError>,
}

/// Decide which charts to construct. Slots whose canvas is missing or whose
/// dataset is absent or empty are skipped without error.
pub fn plan_charts(data: &PageData, is_present: impl Fn(&str) -> bool) -> Vec<PlannedChart> {
	ChartSlot::ALL
		.into_iter()
		.filter(|slot| is_present(slot.canvas_id()))
		.filter_map(|slot| slot.build(data).map(|spec| PlannedChart { slot, spec }))
		.collect()
}
