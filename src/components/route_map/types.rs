use serde::{Deserialize, Serialize};

/// A named stop with a synthesized display coordinate.
///
/// The name is the sole identity; `lat`/`lng` come from the geocoder and are
/// demonstration coordinates, not authoritative geodata.
#[derive(Clone, Debug, PartialEq)]
pub struct Station {
	pub name: String,
	pub lat: f64,
	pub lng: f64,
}

/// An undirected weighted connection between two station names.
///
/// `(from, to, cost)` and `(to, from, cost)` denote the same connection.
/// Endpoints are weak references; an edge naming an unloaded station is
/// dropped during assembly.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	pub from: String,
	pub to: String,
	pub cost: f64,
}

/// The ordered result of a successful route computation.
///
/// First stop is the requested start, last is the requested end. Replaced
/// wholesale by the next request; cleared when the service reports no path.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePath {
	pub stops: Vec<Station>,
	pub cost: f64,
}

// Wire types for the routing service (see api.rs).

#[derive(Debug, Deserialize)]
pub struct StationsResponse {
	#[serde(default)]
	pub stations: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EdgesResponse {
	#[serde(default)]
	pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Serialize)]
pub struct RouteRequest {
	pub start: String,
	pub end: String,
}

/// Successful route body: ordered station names plus total cost.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RouteReply {
	#[serde(default)]
	pub path: Vec<String>,
	#[serde(default)]
	pub cost: f64,
}

/// Error bodies may carry a human-readable message; everything else is
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
	#[serde(default)]
	pub message: Option<String>,
}
