use leptos::prelude::*;

use crate::components::route_map::RouteMapCanvas;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-map">
				<RouteMapCanvas fullscreen=true />
				<div class="map-overlay">
					<p class="subtitle">"Scroll to zoom. Drag the background to pan."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
