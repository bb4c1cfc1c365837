//! Graph data structures for input to the force graph component.

use serde::Deserialize;

/// Stable node identifier. Links reference nodes by this value.
pub type NodeId = u32;

/// Which shape a node is drawn as.
///
/// Deserialized from a lowercase string. Anything unrecognised is kept as
/// [`ShapeKind::Other`] and renders as an empty path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ShapeKind {
	/// `"circle"`
	Circle,
	/// `"rectangle"`
	Rectangle,
	/// `"triangle"`
	Triangle,
	/// Any other string, kept verbatim.
	Other(String),
}

impl From<String> for ShapeKind {
	fn from(value: String) -> Self {
		match value.as_str() {
			"circle" => ShapeKind::Circle,
			"rectangle" => ShapeKind::Rectangle,
			"triangle" => ShapeKind::Triangle,
			_ => ShapeKind::Other(value),
		}
	}
}

/// A node in the graph.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links.
	pub id: NodeId,
	/// Shape used when drawing the node.
	#[serde(rename = "type")]
	pub shape: ShapeKind,
}

/// An undirected spring between two nodes.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Source node ID.
	pub source: NodeId,
	/// Target node ID.
	pub target: NodeId,
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphData {
	/// All nodes. Ids must be unique.
	pub nodes: Vec<GraphNode>,
	/// Links between declared nodes.
	pub links: Vec<GraphLink>,
}

impl Default for GraphData {
	/// Three nodes, one of each shape, chained 1-2-3.
	fn default() -> Self {
		let node = |id, shape| GraphNode { id, shape };
		let link = |source, target| GraphLink { source, target };
		Self {
			nodes: vec![
				node(1, ShapeKind::Circle),
				node(2, ShapeKind::Rectangle),
				node(3, ShapeKind::Triangle),
			],
			links: vec![link(1, 2), link(2, 3)],
		}
	}
}

/// Runtime settings, read from the host page when present.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Canvas width in logical units.
	pub width: f64,
	/// Canvas height in logical units.
	pub height: f64,
	/// Endpoint queried for a random user on hover.
	pub user_endpoint: String,
	/// Rest length of link springs.
	pub link_distance: f64,
	/// Many-body strength; negative values repel.
	pub charge_strength: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			width: 800.0,
			height: 600.0,
			user_endpoint: "https://randomuser.me/api/".into(),
			link_distance: 100.0,
			charge_strength: -400.0,
		}
	}
}
