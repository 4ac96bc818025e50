use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use log::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, MouseEvent, Node};

use super::controller::{InputOutcome, ResultList, SearchController, Ticket};
use crate::api;
use crate::components::modal::ModalHandle;
use crate::config::{DashboardConfig, Endpoints};

/// Company search box with a debounced, dismissible result dropdown.
#[component]
pub fn CompanySearch() -> impl IntoView {
	let config = use_context::<DashboardConfig>().unwrap_or_default();
	let modal = use_context::<ModalHandle>();
	let debounce_ms = config.search.debounce_ms;
	let endpoints = StoredValue::new(config.endpoints);

	let controller = StoredValue::new(SearchController::new(config.search.min_chars));
	// Dropping the handle cancels the pending query.
	let timer = StoredValue::new_local(None::<Timeout>);
	let query = RwSignal::new(String::new());
	let list = RwSignal::new(ResultList::default());
	let input_ref = NodeRef::<leptos::html::Input>::new();
	let list_ref = NodeRef::<leptos::html::Div>::new();

	let sync = move || {
		if let Some((text, current)) =
			controller.try_with_value(|c| (c.input().to_owned(), c.list().clone()))
		{
			query.set(text);
			list.set(current);
		}
	};

	let on_input = move |ev: Event| {
		let raw = event_target_value(&ev);
		let outcome = controller.try_update_value(|c| c.on_input(&raw));
		sync();
		match outcome {
			Some(InputOutcome::Armed(ticket)) => {
				let pending = Timeout::new(debounce_ms, move || {
					fire(controller, endpoints.get_value(), list, ticket)
				});
				timer.set_value(Some(pending));
			}
			Some(InputOutcome::Cancelled) | None => timer.set_value(None),
		}
	};

	// A pending timer may still fire, but its ticket is retired by the select.
	let select = move |name: String| {
		pick(controller, modal, name);
		sync();
	};

	// Any click outside the box and the dropdown dismisses the dropdown.
	let outside_click: Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>> =
		Rc::new(RefCell::new(None));
	Effect::new(move |_| {
		if outside_click.borrow().is_some() {
			return;
		}
		let Some(document) = web_sys::window().and_then(|w| w.document()) else {
			return;
		};
		let cb = Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
			let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
			let regions = [
				input_ref.get_untracked().map(Node::from),
				list_ref.get_untracked().map(Node::from),
			];
			if !is_outside(target.as_ref(), &regions) {
				return;
			}
			controller.try_update_value(|c| c.on_outside_click());
			sync();
		});
		let _ = document.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
		*outside_click.borrow_mut() = Some(cb);
	});

	view! {
		<div class="company-search position-relative">
			<input
				node_ref=input_ref
				id="companySearch"
				type="search"
				class="form-control"
				placeholder="Search companies..."
				autocomplete="off"
				prop:value=move || query.get()
				on:input=on_input
			/>
			<div
				node_ref=list_ref
				class="list-group position-absolute w-100 shadow-lg search-results"
				style:display=move || if list.with(|l| l.visible) { "block" } else { "none" }
			>
				{move || {
					list.get()
						.items
						.into_iter()
						.map(|name| {
							let text = name.clone();
							view! {
								<a
									href="#"
									class="list-group-item list-group-item-action"
									on:click=move |ev: MouseEvent| {
										ev.prevent_default();
										select(name.clone());
									}
								>
									{text}
								</a>
							}
						})
						.collect_view()
				}}
			</div>
		</div>
	}
}

/// Whether a click on `target` landed outside all of `regions`.
fn is_outside(target: Option<&Node>, regions: &[Option<Node>]) -> bool {
	!regions.iter().flatten().any(|region| region.contains(target))
}

/// Apply a picked result and open its details.
fn pick(controller: StoredValue<SearchController>, modal: Option<ModalHandle>, name: String) {
	let picked = controller.try_update_value(|c| c.on_select(name));
	if let (Some(name), Some(modal)) = (picked, modal) {
		modal.open(name);
	}
}

fn fire(
	controller: StoredValue<SearchController>,
	endpoints: Endpoints,
	list: RwSignal<ResultList>,
	ticket: Ticket,
) {
	let Some(Some(request)) = controller.try_update_value(|c| c.on_timer(ticket)) else {
		return;
	};
	debug!("Searching for {:?}", request.query);
	spawn_local(async move {
		let result = api::search(&endpoints, &request.query).await;
		let applied = controller.try_update_value(|c| c.on_response(request.seq, result));
		if applied == Some(true) {
			if let Some(current) = controller.try_with_value(|c| c.list().clone()) {
				list.set(current);
			}
		}
	});
}
