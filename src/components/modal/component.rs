use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use super::state::{DetailModal, ModalBody};
use crate::api;
use crate::config::{DashboardConfig, Endpoints};

/// Shared entry point for opening the company detail modal.
#[derive(Clone, Copy)]
pub struct ModalHandle {
	state: RwSignal<DetailModal>,
	endpoints: StoredValue<Endpoints>,
	identity_key: StoredValue<String>,
}

impl ModalHandle {
	/// Create a closed modal using `config`'s endpoints.
	pub fn new(config: &DashboardConfig) -> Self {
		Self {
			state: RwSignal::new(DetailModal::default()),
			endpoints: StoredValue::new(config.endpoints.clone()),
			identity_key: StoredValue::new(config.identity_key.clone()),
		}
	}

	/// Show the modal for `name` and load its details.
	pub fn open(self, name: String) {
		let Some(ticket) = self.state.try_update(|m| m.open(&name)) else {
			return;
		};
		info!("Opening details for {:?}", name);
		let (endpoints, identity_key) = (self.endpoints.get_value(), self.identity_key.get_value());
		spawn_local(async move {
			let result = api::company(&endpoints, &name).await;
			if let Err(e) = &result {
				warn!("Could not load details for {:?}: {}", name, e);
			}
			self.state.try_update(|m| m.resolve(ticket, result, &identity_key));
		});
	}

	pub fn is_open(self) -> bool {
		self.state.with(|m| m.open)
	}

	pub fn title(self) -> String {
		self.state.with(|m| m.title.clone())
	}

	/// Hide the modal.
	pub fn close(self) {
		self.state.update(|m| m.close());
	}
}

/// The detail dialog. Renders nothing visible until opened.
#[component]
pub fn CompanyModal(handle: ModalHandle) -> impl IntoView {
	let state = handle.state;
	let is_open = move || handle.is_open();

	let on_backdrop = move |ev: MouseEvent| {
		if ev.target() == ev.current_target() {
			handle.close();
		}
	};

	let body = move || match state.with(|m| m.body.clone()) {
		ModalBody::Loading => view! {
			<div class="spinner-border text-primary" role="status">
				<span class="visually-hidden">"Loading..."</span>
			</div>
		}
		.into_any(),
		ModalBody::Rows(rows) => view! {
			<ul class="list-group list-group-flush">
				{rows
					.into_iter()
					.map(|row| {
						view! {
							<li class="list-group-item d-flex justify-content-between align-items-center">
								<span class="fw-bold text-muted small text-uppercase">
									{format!("{}:", row.label)}
								</span>
								<span>{row.value}</span>
							</li>
						}
					})
					.collect_view()}
			</ul>
		}
		.into_any(),
		ModalBody::Error => view! { <p class="text-danger">"Error loading details."</p> }.into_any(),
	};

	view! {
		<div
			id="companyModal"
			class="modal fade"
			class:show=is_open
			style:display=move || if is_open() { "block" } else { "none" }
			tabindex="-1"
			role="dialog"
			aria-modal="true"
			on:click=on_backdrop
		>
			<div class="modal-dialog modal-dialog-centered modal-dialog-scrollable" role="document">
				<div class="modal-content">
					<div class="modal-header">
						<h5 id="modalCompanyName" class="modal-title">
							{move || handle.title()}
						</h5>
						<button
							type="button"
							class="btn-close"
							aria-label="Close"
							on:click=move |_| handle.close()
						></button>
					</div>
					<div id="modalCompanyBody" class="modal-body">
						{body}
					</div>
				</div>
			</div>
		</div>
	}
}
