use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::api::MapApi;
use super::render;
use super::state::{MapState, RouteNotice, valid_route_request};
use super::view::MapView;

/// Interactive route map: loads the station graph on mount, lets the user
/// pick a start and end station, asks the routing service for a shortest
/// path and draws the result over the graph on a pannable/zoomable canvas.
///
/// `api_base` prefixes every service request; leave it empty for
/// same-origin deployments.
#[component]
pub fn RouteMapCanvas(
	#[prop(default = false)] fullscreen: bool,
	#[prop(into, default = String::new())] api_base: String,
) -> impl IntoView {
	let state = RwSignal::new(MapState::default());
	let notice = RwSignal::new(None::<RouteNotice>);
	let start = RwSignal::new(String::new());
	let end = RwSignal::new(String::new());
	// The core never interprets this toggle; it only gates which edge list
	// reaches the renderer.
	let show_graph = RwSignal::new(true);

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let view: Rc<RefCell<Option<MapView>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (view_init, animate_init, resize_cb_init) =
		(view.clone(), animate.clone(), resize_cb.clone());

	let api = MapApi::new(api_base);

	let load_api = api.clone();
	let load_graph = move || {
		if state.with_untracked(|s| s.loading) {
			return;
		}
		state.update(|s| s.loading = true);
		notice.set(None);
		let api = load_api.clone();
		spawn_local(async move {
			// Auxiliary statistics are optional server-side; a failure here
			// must never block the primary load.
			if let Err(err) = api.statistics().await {
				debug!("statistics endpoint unavailable: {err}");
			}

			let loaded = match api.stations().await {
				Ok(names) => api.edges().await.map(|edges| (names, edges)),
				Err(err) => Err(err),
			};
			match loaded {
				Ok((names, edges)) => {
					state.update(|s| {
						s.apply_graph(names, edges);
						s.loading = false;
					});
				}
				Err(err) => {
					// Previous stations/edges stay untouched so the user can
					// retry against a stale but consistent map.
					warn!("graph load failed: {err}");
					notice.set(Some(RouteNotice::from_fetch(err)));
					state.update(|s| s.loading = false);
				}
			}
		});
	};

	let route_api = api.clone();
	let calculate_route = move || {
		let (from, to) = (start.get_untracked(), end.get_untracked());
		// Precondition, not an error: no state change, no network call.
		if !valid_route_request(&from, &to) {
			return;
		}
		if state.with_untracked(|s| s.loading) {
			return;
		}
		state.update(|s| s.loading = true);
		notice.set(None);
		let api = route_api.clone();
		spawn_local(async move {
			let reply = api.route(&from, &to).await;
			let mut outcome = None;
			state.update(|s| {
				outcome = s.apply_route_reply(reply);
				s.loading = false;
			});
			if let Some(n) = &outcome {
				warn!("route request ended without a path: {n}");
			}
			notice.set(outcome);
		});
	};

	// Initial graph load, mirrored by the reload button below.
	let initial_load = load_graph.clone();
	initial_load();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0),
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*view_init.borrow_mut() =
			Some(MapView::new(&state.with_untracked(|s| s.stations.clone()), w, h));

		if fullscreen {
			let (view_resize, canvas_resize) = (view_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut v) = *view_resize.borrow_mut() {
					state.with_untracked(|s| v.resize(&s.stations, nw, nh));
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (view_anim, animate_inner) = (view_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let s = state.get_untracked();
			if let Some(ref mut v) = *view_anim.borrow_mut() {
				// Refit every frame so a freshly loaded graph snaps into view.
				v.refit(&s.stations);
				render::render(&s, v, show_graph.get_untracked(), &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let view_md = view.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut v) = *view_md.borrow_mut() {
			v.pan.active = true;
			v.pan.start_x = x;
			v.pan.start_y = y;
			v.pan.transform_start_x = v.transform.x;
			v.pan.transform_start_y = v.transform.y;
		}
	};

	let view_mm = view.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut v) = *view_mm.borrow_mut() {
			if v.pan.active {
				v.transform.x = v.pan.transform_start_x + (x - v.pan.start_x);
				v.transform.y = v.pan.transform_start_y + (y - v.pan.start_y);
			} else {
				let hovered = state.with_untracked(|s| {
					v.station_at_position(&s.stations, x, y)
						.map(|i| s.stations[i].name.clone())
				});
				v.hover = hovered;
			}
		}
	};

	let view_mu = view.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_mu.borrow_mut() {
			v.pan.active = false;
		}
	};

	let view_ml = view.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut v) = *view_ml.borrow_mut() {
			v.pan.active = false;
			v.hover = None;
		}
	};

	let view_wh = view.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut v) = *view_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			v.zoom_at(x, y, factor);
		}
	};

	let busy = move || state.with(|s| s.loading);
	let station_options = move || {
		state.with(|s| {
			s.stations
				.iter()
				.map(|st| {
					let name = st.name.clone();
					view! { <option value=name.clone()>{name.clone()}</option> }
				})
				.collect_view()
		})
	};

	view! {
		<div class="route-map">
			<aside class="route-map-sidebar">
				<h2>"Route planner"</h2>

				<label>
					"Start"
					<select
						prop:value=move || start.get()
						prop:disabled=busy
						on:change=move |ev| start.set(event_target_value(&ev))
					>
						<option value="">"Choose a station"</option>
						{station_options}
					</select>
				</label>

				<label>
					"Destination"
					<select
						prop:value=move || end.get()
						prop:disabled=busy
						on:change=move |ev| end.set(event_target_value(&ev))
					>
						<option value="">"Choose a station"</option>
						{station_options}
					</select>
				</label>

				<button
					prop:disabled=move || {
						busy() || !valid_route_request(&start.get(), &end.get())
					}
					on:click=move |_| calculate_route()
				>
					"Find route"
				</button>

				<button prop:disabled=busy on:click=move |_| load_graph()>
					"Reload stations"
				</button>

				<label class="route-map-toggle">
					<input
						type="checkbox"
						prop:checked=move || show_graph.get()
						on:change=move |ev| show_graph.set(event_target_checked(&ev))
					/>
					"Show full graph ("
					{move || state.with(|s| s.edges.len())}
					" connections)"
				</label>

				<Show when=busy>
					<p class="route-map-busy">"Working…"</p>
				</Show>

				{move || {
					notice
						.get()
						.map(|n| view! { <p class="route-map-notice">{n.to_string()}</p> })
				}}

				{move || {
					state
						.with(|s| s.route.clone())
						.map(|route| {
							view! {
								<div class="route-map-summary">
									<h3>"Route found"</h3>
									<p>"Total cost: " {route.cost}</p>
									<ol>
										{route
											.stops
											.iter()
											.map(|stop| view! { <li>{stop.name.clone()}</li> })
											.collect_view()}
									</ol>
								</div>
							}
						})
				}}
			</aside>

			<canvas
				node_ref=canvas_ref
				class="route-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
		</div>
	}
}
