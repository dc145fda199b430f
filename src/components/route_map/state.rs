use std::collections::HashSet;

use super::api::FetchError;
use super::graph::assemble;
use super::types::{GraphEdge, RoutePath, RouteReply, Station};

/// User-visible outcome of an operation that did not produce a route.
///
/// Every variant returns the orchestrator to idle; none of these propagate
/// as faults.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteNotice {
	#[error("no route found between the selected stations")]
	NoRouteFound,
	#[error("routing service unreachable ({0}); make sure the backend is running on http://127.0.0.1:5000")]
	ServiceUnavailable(String),
	#[error("route computation failed: {0}")]
	ComputationFailed(String),
	#[error("connection error ({0}); check that the backend is reachable")]
	NetworkFailure(String),
}

impl RouteNotice {
	/// Classify a transport failure: 404 means the service (or endpoint)
	/// is missing entirely, any other status is a computation failure,
	/// and no response at all is a connectivity problem.
	pub fn from_fetch(err: FetchError) -> Self {
		match err {
			FetchError::Http {
				status: 404,
				message,
			} => Self::ServiceUnavailable(message.unwrap_or_else(|| "endpoint not found".to_string())),
			FetchError::Http { message, .. } => Self::ComputationFailed(
				message.unwrap_or_else(|| "the routing service rejected the request".to_string()),
			),
			FetchError::Network(err) => Self::NetworkFailure(err),
		}
	}
}

/// Everything the map surface renders, owned by the orchestrator and
/// mutated only between suspension points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapState {
	pub stations: Vec<Station>,
	pub edges: Vec<GraphEdge>,
	pub route: Option<RoutePath>,
	/// True while a load or route request is in flight. The UI must disable
	/// triggers while set; at most one operation is active by construction.
	pub loading: bool,
}

impl MapState {
	/// Store a freshly loaded graph: geocode every name, then restrict and
	/// dedup the raw edge list against the just-loaded station set.
	///
	/// Only called on a fully successful load, so a failed fetch never
	/// partially overwrites the previous graph.
	pub fn apply_graph(&mut self, names: Vec<String>, raw_edges: Vec<GraphEdge>) {
		let stations: Vec<Station> = names.into_iter().map(Station::positioned).collect();
		let visible: HashSet<String> = stations.iter().map(|s| s.name.clone()).collect();
		self.edges = assemble(raw_edges, &visible);
		self.stations = stations;
	}

	/// Classify the outcome of a route request and fold it into the state.
	///
	/// A non-empty path replaces the current route wholesale; an empty path
	/// means the service found no connection, so the route is cleared. Every
	/// failure leaves the previous route untouched and reports a notice.
	pub fn apply_route_reply(
		&mut self,
		reply: Result<RouteReply, FetchError>,
	) -> Option<RouteNotice> {
		match reply {
			Ok(reply) if reply.path.is_empty() => {
				self.route = None;
				Some(RouteNotice::NoRouteFound)
			}
			Ok(reply) => {
				let stops = reply.path.into_iter().map(Station::positioned).collect();
				self.route = Some(RoutePath {
					stops,
					cost: reply.cost,
				});
				None
			}
			Err(err) => Some(RouteNotice::from_fetch(err)),
		}
	}
}

/// Precondition for a route request: both endpoints chosen and distinct.
///
/// A request failing this check is rejected before any state change or
/// network call.
pub fn valid_route_request(start: &str, end: &str) -> bool {
	!start.is_empty() && !end.is_empty() && start != end
}
