//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - An alpha-cooled force simulation (link springs, repulsion, centering)
//! - Node dragging that re-energizes the layout while held
//! - Shapes drawn from a [`ShapeTable`] supplied through the [`Theme`]
//! - Hover tooltips showing a randomly fetched user per node
//!
//! # Example
//!
//! ```ignore
//! use user_graph::{ForceGraphCanvas, GraphConfig, GraphData, GraphModel};
//!
//! let model = GraphModel::new(&GraphData::default())?;
//! view! { <ForceGraphCanvas model=model config=GraphConfig::default() /> }
//! ```

mod component;
pub mod drag;
pub mod layout;
pub mod model;
pub mod render;
mod state;
pub mod theme;
pub mod tooltip;
mod types;

pub use component::ForceGraphCanvas;
pub use model::{GraphError, GraphModel};
pub use state::ForceGraphState;
pub use theme::{ShapeTable, Theme};
pub use types::{GraphConfig, GraphData, GraphLink, GraphNode, NodeId, ShapeKind};
