//! Validated, index-resolved view of the input graph.

use std::collections::HashMap;

use thiserror::Error;

use super::types::{GraphData, GraphNode, NodeId};

/// Configuration errors that make the graph unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	/// Two nodes share an id.
	#[error("node {0} is declared more than once")]
	DuplicateNode(NodeId),
	/// A link names a node that was never declared.
	#[error("link {from} -> {to} references unknown node {missing}")]
	DanglingLink {
		/// Source id of the link.
		from: NodeId,
		/// Target id of the link.
		to: NodeId,
		/// The id that could not be resolved.
		missing: NodeId,
	},
}

/// The static node and link lists, with links resolved to node indices.
///
/// Indices are positions in [`GraphModel::nodes`] and are shared with the
/// layout engine's bodies.
#[derive(Clone, Debug)]
pub struct GraphModel {
	nodes: Vec<GraphNode>,
	links: Vec<(usize, usize)>,
	id_to_idx: HashMap<NodeId, usize>,
}

impl GraphModel {
	/// Validate `data` and resolve its links. Any error here is fatal.
	pub fn new(data: &GraphData) -> Result<Self, GraphError> {
		let mut id_to_idx = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			if id_to_idx.insert(node.id, i).is_some() {
				return Err(GraphError::DuplicateNode(node.id));
			}
		}

		let links = data
			.links
			.iter()
			.map(|link| {
				let resolve = |id: NodeId| {
					id_to_idx
						.get(&id)
						.copied()
						.ok_or(GraphError::DanglingLink {
							from: link.source,
							to: link.target,
							missing: id,
						})
				};
				Ok((resolve(link.source)?, resolve(link.target)?))
			})
			.collect::<Result<Vec<_>, GraphError>>()?;

		Ok(Self {
			nodes: data.nodes.clone(),
			links,
			id_to_idx,
		})
	}

	/// Nodes in input order.
	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	/// Links as `(source index, target index)` pairs.
	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True for a graph without nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Index of node `id`.
	pub fn index_of(&self, id: NodeId) -> Option<usize> {
		self.id_to_idx.get(&id).copied()
	}

	/// Node with `id`.
	pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
		self.index_of(id).map(|i| &self.nodes[i])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, ShapeKind};

	#[test]
	fn default_graph_resolves_links() {
		let model = GraphModel::new(&GraphData::default()).unwrap();
		assert_eq!(model.len(), 3);
		assert_eq!(model.links(), &[(0, 1), (1, 2)]);
		assert_eq!(model.node(3).map(|n| &n.shape), Some(&ShapeKind::Triangle));
		assert_eq!(model.index_of(2), Some(1));
		assert_eq!(model.index_of(9), None);
	}

	#[test]
	fn dangling_link_is_fatal() {
		let mut data = GraphData::default();
		data.links.push(GraphLink {
			source: 3,
			target: 7,
		});
		assert_eq!(
			GraphModel::new(&data).unwrap_err(),
			GraphError::DanglingLink {
				from: 3,
				to: 7,
				missing: 7,
			}
		);
	}

	#[test]
	fn duplicate_ids_are_rejected() {
		let mut data = GraphData::default();
		data.nodes.push(data.nodes[0].clone());
		assert_eq!(
			GraphModel::new(&data).unwrap_err(),
			GraphError::DuplicateNode(1)
		);
	}
}
