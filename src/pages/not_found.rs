use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="container py-5 text-center">
			<h1>"Page not found"</h1>
			<a href="/">"Back to the dashboard"</a>
		</div>
	}
}
