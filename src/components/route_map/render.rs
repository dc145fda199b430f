use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::MapState;
use super::view::{MapView, STATION_RADIUS};

/// Draw the current map: graph edges (when toggled on), the active route on
/// top, then the stations.
pub fn render(state: &MapState, view: &MapView, show_graph: bool, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, view.width, view.height);
	ctx.save();
	let _ = ctx.translate(view.transform.x, view.transform.y);
	let _ = ctx.scale(view.transform.k, view.transform.k);

	let positions: HashMap<&str, (f64, f64)> = state
		.stations
		.iter()
		.map(|s| (s.name.as_str(), view.station_pos(s)))
		.collect();

	if show_graph {
		draw_edges(state, view, &positions, ctx);
	}
	draw_route(state, view, ctx);
	draw_stations(state, view, ctx);
	ctx.restore();
}

fn draw_edges(
	state: &MapState,
	view: &MapView,
	positions: &HashMap<&str, (f64, f64)>,
	ctx: &CanvasRenderingContext2d,
) {
	let k = view.transform.k;
	let (line_width, dash, gap) = (1.2 / k, 6.0 / k, 4.0 / k);

	ctx.set_stroke_style_str("rgba(100, 180, 255, 0.45)");
	ctx.set_line_width(line_width);
	let _ = ctx.set_line_dash(&js_sys::Array::of2(
		&JsValue::from_f64(dash),
		&JsValue::from_f64(gap),
	));

	for edge in &state.edges {
		// Assembly guarantees both endpoints are loaded, but stay defensive
		// about stale renders between signal updates.
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(edge.from.as_str()), positions.get(edge.to.as_str()))
		else {
			continue;
		};
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_route(state: &MapState, view: &MapView, ctx: &CanvasRenderingContext2d) {
	let Some(route) = &state.route else {
		return;
	};
	let k = view.transform.k;

	ctx.set_stroke_style_str("#ff7f0e");
	ctx.set_line_width(3.0 / k);
	ctx.begin_path();
	for (i, stop) in route.stops.iter().enumerate() {
		let (x, y) = view.station_pos(stop);
		if i == 0 {
			ctx.move_to(x, y);
		} else {
			ctx.line_to(x, y);
		}
	}
	ctx.stroke();

	// Stops get a halo so the route reads on top of the dense graph.
	for stop in &route.stops {
		let (x, y) = view.station_pos(stop);
		ctx.begin_path();
		let _ = ctx.arc(x, y, STATION_RADIUS + 2.5 / k, 0.0, 2.0 * PI);
		ctx.set_fill_style_str("rgba(255, 127, 14, 0.35)");
		ctx.fill();
	}
}

fn draw_stations(state: &MapState, view: &MapView, ctx: &CanvasRenderingContext2d) {
	let k = view.transform.k;
	let on_route = |name: &str| {
		state
			.route
			.as_ref()
			.is_some_and(|r| r.stops.iter().any(|s| s.name == name))
	};

	let hovered_idx = view.hovered(&state.stations);
	for (i, station) in state.stations.iter().enumerate() {
		let (x, y) = view.station_pos(station);
		let hovered = hovered_idx == Some(i);
		let routed = on_route(&station.name);

		let radius = if hovered {
			STATION_RADIUS * 1.35
		} else {
			STATION_RADIUS
		};
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if routed { "#ff7f0e" } else { "#1f77b4" });
		ctx.fill();

		if hovered {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if hovered || routed {
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(&station.name, x + radius + 3.0, y + 3.0);
		}
	}
}
