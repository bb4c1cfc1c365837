//! Graph simulation state and interaction tracking.
//!
//! Ties the validated model to the layout engine and routes canvas pointer
//! events to the drag and tooltip controllers.

use super::drag::DragController;
use super::layout::{LayoutEngine, Point, SimulationParameters};
use super::model::GraphModel;
use super::theme::ShapeTable;
use super::tooltip::{HoverTicket, TooltipController};
use super::types::{GraphConfig, NodeId};

/// Core graph state, created once when the component mounts and then
/// mutated by the animation loop and event handlers.
pub struct ForceGraphState {
	/// Validated nodes and links.
	pub model: GraphModel,
	/// Positions, indexed like `model.nodes()`.
	pub engine: LayoutEngine,
	/// In-progress drags.
	pub drag: DragController,
	/// Hover sessions and the user cache.
	pub tooltip: TooltipController,
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Node index held by the primary button, if any.
	pressed: Option<usize>,
}

impl ForceGraphState {
	/// Start a layout for `model` centered on the configured canvas.
	pub fn new(model: GraphModel, config: &GraphConfig) -> Self {
		let params = SimulationParameters {
			link_distance: config.link_distance,
			charge_strength: config.charge_strength,
			..SimulationParameters::centered(config.width, config.height)
		};
		let engine = LayoutEngine::new(&model, params);
		Self {
			model,
			engine,
			drag: DragController::default(),
			tooltip: TooltipController::default(),
			width: config.width,
			height: config.height,
			pressed: None,
		}
	}

	/// Id of the node at index `idx`.
	pub fn node_id(&self, idx: usize) -> Option<NodeId> {
		self.model.nodes().get(idx).map(|n| n.id)
	}

	/// Topmost node whose glyph covers `at`. Empty glyphs are never hit.
	pub fn node_at_position(&self, at: Point, shapes: &ShapeTable) -> Option<usize> {
		self.model
			.nodes()
			.iter()
			.zip(self.engine.positions())
			.enumerate()
			.rev()
			.find(|(_, (node, pos))| {
				let local = Point::new(at.x - pos.x, at.y - pos.y);
				shapes.style_for(&node.shape).glyph.contains(local)
			})
			.map(|(idx, _)| idx)
	}

	/// Advance the simulation one frame. Returns whether anything moved.
	pub fn tick(&mut self) -> bool {
		self.engine.tick()
	}

	/// Primary button pressed at canvas coordinates `at`.
	pub fn pointer_down(&mut self, at: Point, shapes: &ShapeTable) -> bool {
		let Some(idx) = self.node_at_position(at, shapes) else {
			return false;
		};
		if self.drag.start(&mut self.engine, idx) {
			self.pressed = Some(idx);
		}
		true
	}

	/// Pointer moved to canvas coordinates `at` (page coordinates `page`).
	///
	/// Returns a ticket when a new hover session starts; the caller owes
	/// the tooltip a fetch result for it.
	pub fn pointer_move(
		&mut self,
		at: Point,
		page: Point,
		shapes: &ShapeTable,
	) -> Option<HoverTicket> {
		if let Some(idx) = self.pressed {
			self.drag.drag(&mut self.engine, idx, at);
			self.tooltip.move_pointer(page);
			return None;
		}

		let hit = self
			.node_at_position(at, shapes)
			.and_then(|idx| self.node_id(idx));
		if hit == self.tooltip.hovered() {
			self.tooltip.move_pointer(page);
			return None;
		}
		if self.tooltip.hovered().is_some() {
			self.tooltip.end_hover();
		}
		hit.map(|id| self.tooltip.begin_hover(id, page))
	}

	/// Primary button released.
	pub fn pointer_up(&mut self) {
		if let Some(idx) = self.pressed.take() {
			self.drag.end(&mut self.engine, idx);
		}
	}

	/// Pointer left the canvas: release drags and hide the tooltip.
	pub fn pointer_leave(&mut self) {
		self.pressed = None;
		let dragged: Vec<usize> = self.drag.dragged_nodes().collect();
		for idx in dragged {
			self.drag.end(&mut self.engine, idx);
		}
		self.tooltip.end_hover();
	}
}
