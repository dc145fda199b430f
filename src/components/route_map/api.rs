use gloo_net::http::{Request, Response};
use serde_json::Value;

use super::types::{EdgesResponse, ErrorBody, GraphEdge, RouteReply, RouteRequest, StationsResponse};

/// Classified transport outcome for a single fetch.
///
/// `Http` carries the status plus the service's `message` field when the
/// error body had one; `Network` covers everything where no usable response
/// arrived, including an unparseable success body (the service is expected
/// to speak JSON or nothing).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
	#[error("HTTP {status}")]
	Http {
		status: u16,
		message: Option<String>,
	},
	#[error("{0}")]
	Network(String),
}

fn net(err: gloo_net::Error) -> FetchError {
	FetchError::Network(err.to_string())
}

/// HTTP client for the routing service. Endpoint paths match the backend;
/// `base` is empty for same-origin deployments.
#[derive(Clone, Debug, Default)]
pub struct MapApi {
	base: String,
}

impl MapApi {
	pub fn new(base: impl Into<String>) -> Self {
		Self { base: base.into() }
	}

	fn url(&self, path: &str) -> String {
		format!("{}{path}", self.base)
	}

	/// Turn a non-2xx response into `FetchError::Http`, reading `message`
	/// from the error body when one is present.
	async fn check(resp: Response) -> Result<Response, FetchError> {
		if resp.ok() {
			return Ok(resp);
		}
		let status = resp.status();
		let message = resp.json::<ErrorBody>().await.ok().and_then(|body| body.message);
		Err(FetchError::Http { status, message })
	}

	/// Full list of station names known to the service.
	pub async fn stations(&self) -> Result<Vec<String>, FetchError> {
		let resp = Request::get(&self.url("/api/stations")).send().await.map_err(net)?;
		let resp = Self::check(resp).await?;
		let body: StationsResponse = resp.json().await.map_err(net)?;
		Ok(body.stations)
	}

	/// Raw bidirectional edge list; callers are expected to run it through
	/// the assembler before rendering.
	pub async fn edges(&self) -> Result<Vec<GraphEdge>, FetchError> {
		let resp = Request::get(&self.url("/api/edges")).send().await.map_err(net)?;
		let resp = Self::check(resp).await?;
		let body: EdgesResponse = resp.json().await.map_err(net)?;
		Ok(body.edges)
	}

	/// Ask the service for a shortest path between two station names.
	pub async fn route(&self, start: &str, end: &str) -> Result<RouteReply, FetchError> {
		let request = Request::post(&self.url("/api/route/dijkstra"))
			.json(&RouteRequest {
				start: start.to_string(),
				end: end.to_string(),
			})
			.map_err(net)?;
		let resp = request.send().await.map_err(net)?;
		let resp = Self::check(resp).await?;
		resp.json().await.map_err(net)
	}

	/// Auxiliary service statistics. Not implemented on every backend, so
	/// callers must treat failure as non-fatal.
	pub async fn statistics(&self) -> Result<Value, FetchError> {
		let resp = Request::get(&self.url("/api/statistics")).send().await.map_err(net)?;
		let resp = Self::check(resp).await?;
		resp.json().await.map_err(net)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_client_targets_the_same_origin() {
		let api = MapApi::default();
		assert_eq!(api.url("/api/stations"), "/api/stations");
	}

	#[test]
	fn base_override_prefixes_every_endpoint() {
		let api = MapApi::new("http://127.0.0.1:5000");
		assert_eq!(api.url("/api/stations"), "http://127.0.0.1:5000/api/stations");
		assert_eq!(
			api.url("/api/route/dijkstra"),
			"http://127.0.0.1:5000/api/route/dijkstra"
		);
	}
}
