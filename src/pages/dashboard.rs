use leptos::prelude::*;
use log::warn;

use crate::components::charts::{ChartSlot, render_charts};
use crate::components::modal::{CompanyModal, ModalHandle};
use crate::components::network::NetworkPanel;
use crate::components::plot_gallery::PlotGallery;
use crate::components::search::CompanySearch;
use crate::config::DashboardConfig;
use crate::page_data::PageData;

const CHART_WIDTH: u32 = 600;
const CHART_HEIGHT: u32 = 320;

/// The dashboard: search, charts, network and plots around one shared
/// company modal.
#[component]
pub fn Dashboard() -> impl IntoView {
	let config = use_context::<DashboardConfig>().unwrap_or_default();
	let modal = ModalHandle::new(&config);
	provide_context(modal);

	let data = PageData::from_page();
	let chart_data = data.clone();
	Effect::new(move |_| {
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			warn!("No document, charts not drawn");
			return;
		};
		render_charts(&document, &chart_data);
	});

	view! {
		<div class="container-fluid py-3 dashboard">
			<header class="d-flex flex-wrap align-items-center justify-content-between mb-3 gap-3">
				<h1 class="h3 mb-0">"Startup Network Dashboard"</h1>
				<div class="flex-grow-1" style="max-width: 420px;">
					<CompanySearch />
				</div>
			</header>

			<div class="row g-3 mb-3">
				{ChartSlot::ALL
					.into_iter()
					.map(|slot| {
						view! {
							<div class="col-lg-6">
								<div class="card h-100">
									<div class="card-header">{slot.title()}</div>
									<div class="card-body">
										<canvas
											id=slot.canvas_id()
											width=CHART_WIDTH.to_string()
											height=CHART_HEIGHT.to_string()
										></canvas>
									</div>
								</div>
							</div>
						}
					})
					.collect_view()}
			</div>

			<div class="card mb-3">
				<div class="card-header">"Company Network"</div>
				<div class="card-body p-0" style="height: 600px;">
					<NetworkPanel />
				</div>
			</div>

			<PlotGallery data=data />
			<CompanyModal handle=modal />
		</div>
	}
}
