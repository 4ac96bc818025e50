//! Server-rendered plot images referenced from the page data.

use leptos::prelude::*;
use serde::Deserialize;

use crate::page_data::PageData;

const PLOTS: &[(&str, &str)] = &[
	("founded_per_year", "Companies Founded per Year"),
	("top_cities", "Top Cities"),
	("top_industries", "Top Industries"),
	("network_img", "Company Network"),
	("wordcloud_img", "Industry Word Cloud"),
	("city_industry_img", "City vs Industry"),
	("year_by_city_trends_img", "Founding Trends by City"),
];

#[derive(Deserialize)]
struct ImageRef {
	img: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlotImage {
	pub key: &'static str,
	pub title: &'static str,
	pub url: String,
}

/// Images present in `data`, in gallery order. Entries without a usable
/// `img` are skipped.
pub fn plot_images(data: &PageData) -> Vec<PlotImage> {
	PLOTS
		.iter()
		.filter_map(|&(key, title)| {
			let image = data.decode::<ImageRef>(key)?.ok()?;
			(!image.img.is_empty()).then(|| PlotImage {
				key,
				title,
				url: image.img,
			})
		})
		.collect()
}

#[component]
pub fn PlotGallery(data: PageData) -> impl IntoView {
	let images = plot_images(&data);
	if images.is_empty() {
		return None;
	}
	Some(view! {
		<div class="row g-3 plot-gallery">
			{images
				.into_iter()
				.map(|image| {
					view! {
						<div class="col-md-6">
							<div class="card h-100" id=format!("plot-{}", image.key)>
								<div class="card-header">{image.title}</div>
								<img class="card-img-bottom img-fluid" src=image.url alt=image.title />
							</div>
						</div>
					}
				})
				.collect_view()}
		</div>
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn present_images_in_gallery_order() {
		let data = PageData::from_value(json!({
			"wordcloud_img": { "img": "/static/wordcloud.png" },
			"top_cities": { "img": "/static/cities.png" },
			"degree": { "labels": [], "values": [] },
		}));
		let images = plot_images(&data);
		assert_eq!(
			images.iter().map(|i| i.key).collect::<Vec<_>>(),
			["top_cities", "wordcloud_img"]
		);
		assert_eq!(images[0].url, "/static/cities.png");
		assert_eq!(images[1].title, "Industry Word Cloud");
	}

	#[test]
	fn malformed_or_empty_entries_are_skipped() {
		let data = PageData::from_value(json!({
			"network_img": "/static/network.png",
			"top_industries": { "img": "" },
			"founded_per_year": null,
		}));
		assert!(plot_images(&data).is_empty());
	}
}
