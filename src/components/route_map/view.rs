use super::types::Station;

pub const STATION_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;

/// Pan/zoom transform from world (projected) space to screen space.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Linear projection from the geographic window the stations occupy onto
/// the canvas, with a fixed margin. Latitude grows upward, canvas y grows
/// downward, so the vertical axis flips.
#[derive(Clone, Copy, Debug)]
pub struct Projection {
	min_lat: f64,
	min_lng: f64,
	lat_span: f64,
	lng_span: f64,
	width: f64,
	height: f64,
	margin: f64,
}

const MARGIN: f64 = 40.0;
// Guards against a zero-extent window (one station, or all names colliding).
const MIN_SPAN: f64 = 1e-6;

impl Projection {
	pub fn fit(stations: &[Station], width: f64, height: f64) -> Self {
		let mut min_lat = f64::INFINITY;
		let mut max_lat = f64::NEG_INFINITY;
		let mut min_lng = f64::INFINITY;
		let mut max_lng = f64::NEG_INFINITY;
		for s in stations {
			min_lat = min_lat.min(s.lat);
			max_lat = max_lat.max(s.lat);
			min_lng = min_lng.min(s.lng);
			max_lng = max_lng.max(s.lng);
		}
		if stations.is_empty() {
			(min_lat, max_lat, min_lng, max_lng) = (0.0, 1.0, 0.0, 1.0);
		}
		Self {
			min_lat,
			min_lng,
			lat_span: (max_lat - min_lat).max(MIN_SPAN),
			lng_span: (max_lng - min_lng).max(MIN_SPAN),
			width,
			height,
			margin: MARGIN,
		}
	}

	pub fn project(&self, lat: f64, lng: f64) -> (f64, f64) {
		let usable_w = (self.width - 2.0 * self.margin).max(1.0);
		let usable_h = (self.height - 2.0 * self.margin).max(1.0);
		let x = self.margin + (lng - self.min_lng) / self.lng_span * usable_w;
		let y = self.margin + (1.0 - (lat - self.min_lat) / self.lat_span) * usable_h;
		(x, y)
	}
}

/// Interaction state for the map canvas: projection, pan/zoom transform and
/// the currently hovered station.
///
/// Hover is keyed by name, the station's sole identity, so a reload that
/// shrinks or reorders the list can never highlight the wrong station.
pub struct MapView {
	pub transform: ViewTransform,
	pub pan: PanState,
	pub hover: Option<String>,
	pub width: f64,
	pub height: f64,
	projection: Projection,
}

impl MapView {
	pub fn new(stations: &[Station], width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			pan: PanState::default(),
			hover: None,
			width,
			height,
			projection: Projection::fit(stations, width, height),
		}
	}

	/// Projected world position of a station.
	pub fn station_pos(&self, station: &Station) -> (f64, f64) {
		self.projection.project(station.lat, station.lng)
	}

	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Resolve the hovered name against the current station list. A name
	/// left over from before a reload that no longer matches anything
	/// resolves to nothing.
	pub fn hovered(&self, stations: &[Station]) -> Option<usize> {
		let name = self.hover.as_deref()?;
		stations.iter().position(|s| s.name == name)
	}

	/// Index of the station under a screen position, if any.
	pub fn station_at_position(&self, stations: &[Station], sx: f64, sy: f64) -> Option<usize> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let mut found = None;
		for (i, station) in stations.iter().enumerate() {
			let (x, y) = self.station_pos(station);
			let (dx, dy) = (x - wx, y - wy);
			// HIT_RADIUS is in world-space, scales with zoom like stations
			if (dx * dx + dy * dy).sqrt() < HIT_RADIUS {
				found = Some(i);
			}
		}
		found
	}

	/// Zoom around a screen anchor so the point under the cursor stays put.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.25, 12.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Recompute the projection for the current station set without touching
	/// the pan/zoom transform.
	pub fn refit(&mut self, stations: &[Station]) {
		self.projection = Projection::fit(stations, self.width, self.height);
	}

	pub fn resize(&mut self, stations: &[Station], width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.projection = Projection::fit(stations, width, height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn mk_station(name: &str, lat: f64, lng: f64) -> Station {
		Station {
			name: name.to_string(),
			lat,
			lng,
		}
	}

	#[test]
	fn projection_keeps_stations_inside_the_margin() {
		let stations = vec![
			mk_station("sw", -10.10, -73.09),
			mk_station("ne", -9.98, -72.95),
			mk_station("mid", -10.03, -73.02),
		];
		let proj = Projection::fit(&stations, 800.0, 600.0);
		for s in &stations {
			let (x, y) = proj.project(s.lat, s.lng);
			assert!((MARGIN..=800.0 - MARGIN).contains(&x), "x out of bounds for {}", s.name);
			assert!((MARGIN..=600.0 - MARGIN).contains(&y), "y out of bounds for {}", s.name);
		}
	}

	#[test]
	fn northernmost_station_projects_highest() {
		let north = mk_station("north", -9.98, -73.0);
		let south = mk_station("south", -10.10, -73.0);
		let proj = Projection::fit(&[north.clone(), south.clone()], 800.0, 600.0);

		let (_, ny) = proj.project(north.lat, north.lng);
		let (_, sy) = proj.project(south.lat, south.lng);
		assert!(ny < sy, "larger latitude must land higher on the canvas");
	}

	#[test]
	fn single_station_projects_to_a_finite_point() {
		let lone = mk_station("lone", -10.0, -73.0);
		let proj = Projection::fit(std::slice::from_ref(&lone), 800.0, 600.0);
		let (x, y) = proj.project(lone.lat, lone.lng);
		assert!(x.is_finite() && y.is_finite());
	}

	#[test]
	fn hit_test_finds_the_station_under_the_cursor() {
		let stations = vec![
			mk_station("a", -10.10, -73.09),
			mk_station("b", -9.98, -72.95),
		];
		let view = MapView::new(&stations, 800.0, 600.0);

		let (x, y) = view.station_pos(&stations[1]);
		assert_eq!(view.station_at_position(&stations, x, y), Some(1));
		assert_eq!(view.station_at_position(&stations, x + 100.0, y + 100.0), None);
	}

	#[test]
	fn hover_follows_the_station_name_across_reloads() {
		let stations = vec![
			mk_station("a", -10.10, -73.09),
			mk_station("b", -9.98, -72.95),
		];
		let mut view = MapView::new(&stations, 800.0, 600.0);
		view.hover = Some("b".to_string());
		assert_eq!(view.hovered(&stations), Some(1));

		// A reload that reorders the list must keep the highlight on "b".
		let reordered = vec![stations[1].clone(), stations[0].clone()];
		assert_eq!(view.hovered(&reordered), Some(0));

		// A reload that drops "b" must highlight nothing, not index 1.
		let shrunk = vec![stations[0].clone()];
		assert_eq!(view.hovered(&shrunk), None);
	}

	#[test]
	fn resize_refits_the_projection_to_the_new_dimensions() {
		let stations = vec![
			mk_station("sw", -10.10, -73.09),
			mk_station("ne", -9.98, -72.95),
		];
		let mut view = MapView::new(&stations, 800.0, 600.0);
		view.resize(&stations, 1200.0, 900.0);

		assert_eq!((view.width, view.height), (1200.0, 900.0));
		for s in &stations {
			let (x, y) = view.station_pos(s);
			assert!((MARGIN..=1200.0 - MARGIN).contains(&x), "x out of bounds for {}", s.name);
			assert!((MARGIN..=900.0 - MARGIN).contains(&y), "y out of bounds for {}", s.name);
		}
	}

	#[test]
	fn zoom_keeps_the_anchor_point_fixed() {
		let stations = vec![
			mk_station("a", -10.10, -73.09),
			mk_station("b", -9.98, -72.95),
		];
		let mut view = MapView::new(&stations, 800.0, 600.0);

		let (ax, ay) = (400.0, 300.0);
		let before = view.screen_to_world(ax, ay);
		view.zoom_at(ax, ay, 1.1);
		let after = view.screen_to_world(ax, ay);

		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}
}
