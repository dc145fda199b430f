pub mod api;
mod component;
pub mod geocode;
pub mod graph;
mod render;
pub mod state;
mod types;
mod view;

pub use component::RouteMapCanvas;
pub use types::{GraphEdge, RoutePath, RouteReply, Station};
