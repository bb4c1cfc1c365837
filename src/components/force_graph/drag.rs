//! Pointer drags as an explicit per-node state machine over the layout engine.

use std::collections::HashMap;

use super::layout::{LayoutEngine, Point};

/// Alpha target while at least one node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Drag state of a single node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragPhase {
	/// Simulated freely.
	#[default]
	Idle,
	/// Pinned under the pointer.
	Dragging,
}

/// Turns start/move/end gestures into pins on the layout engine.
///
/// Only the first concurrent gesture re-energizes the simulation and only
/// the last one lets it cool again.
#[derive(Debug, Default)]
pub struct DragController {
	dragging: HashMap<usize, Point>,
}

impl DragController {
	/// Current phase of node `idx`.
	pub fn phase(&self, idx: usize) -> DragPhase {
		if self.dragging.contains_key(&idx) {
			DragPhase::Dragging
		} else {
			DragPhase::Idle
		}
	}

	/// Number of gestures currently in progress.
	pub fn active(&self) -> usize {
		self.dragging.len()
	}

	/// Indices of the nodes being dragged.
	pub fn dragged_nodes(&self) -> impl Iterator<Item = usize> + '_ {
		self.dragging.keys().copied()
	}

	/// Idle -> Dragging. Pins the node where it currently is.
	pub fn start(&mut self, engine: &mut LayoutEngine, idx: usize) -> bool {
		if self.phase(idx) == DragPhase::Dragging {
			return false;
		}
		let Some(at) = engine.position(idx) else {
			return false;
		};
		if self.dragging.is_empty() {
			engine.set_alpha_target(DRAG_ALPHA_TARGET);
			engine.restart();
		}
		self.dragging.insert(idx, at);
		engine.pin(idx, at);
		true
	}

	/// Dragging -> Dragging. Moves the pin to the pointer.
	pub fn drag(&mut self, engine: &mut LayoutEngine, idx: usize, to: Point) -> bool {
		let Some(pin) = self.dragging.get_mut(&idx) else {
			return false;
		};
		*pin = to;
		engine.pin(idx, to);
		true
	}

	/// Dragging -> Idle. Releases the pin back to the simulation.
	pub fn end(&mut self, engine: &mut LayoutEngine, idx: usize) -> bool {
		if self.dragging.remove(&idx).is_none() {
			return false;
		}
		engine.unpin(idx);
		if self.dragging.is_empty() {
			engine.set_alpha_target(0.0);
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::layout::SimulationParameters;
	use crate::components::force_graph::model::GraphModel;
	use crate::components::force_graph::types::GraphData;

	fn settled_engine() -> LayoutEngine {
		let model = GraphModel::new(&GraphData::default()).unwrap();
		let mut engine = LayoutEngine::new(&model, SimulationParameters::default());
		while engine.tick() {}
		engine
	}

	#[test]
	fn start_move_end_clears_the_pin() {
		let mut engine = settled_engine();
		let mut drag = DragController::default();

		assert!(drag.start(&mut engine, 1));
		assert_eq!(drag.phase(1), DragPhase::Dragging);
		assert!(engine.is_running());
		assert_eq!(engine.alpha_target(), DRAG_ALPHA_TARGET);

		assert!(drag.drag(&mut engine, 1, Point::new(400.0, 300.0)));
		assert_eq!(engine.bodies()[1].pinned, Some(Point::new(400.0, 300.0)));

		assert!(drag.end(&mut engine, 1));
		assert_eq!(drag.phase(1), DragPhase::Idle);
		assert_eq!(engine.bodies()[1].pinned, None);
		assert_eq!(engine.alpha_target(), 0.0);
	}

	// Dropped away from the canvas center, so the centering force and the
	// springs both pull the middle node back once released.
	#[test]
	fn released_node_drifts_from_where_it_was_dropped() {
		let mut engine = settled_engine();
		let mut drag = DragController::default();
		let drop_at = Point::new(650.0, 450.0);

		drag.start(&mut engine, 1);
		drag.drag(&mut engine, 1, drop_at);
		for _ in 0..30 {
			engine.tick();
		}
		assert_eq!(engine.position(1), Some(drop_at));

		drag.end(&mut engine, 1);
		for _ in 0..50 {
			engine.tick();
		}
		assert!(engine.position(1).unwrap().distance(drop_at) > 1.0);
	}

	// The chain is symmetric about its middle node, so once that node sits
	// on the canvas center the centering force keeps it there.
	#[test]
	fn middle_node_released_at_center_stays_there() {
		let mut engine = settled_engine();
		let mut drag = DragController::default();
		let center = Point::new(400.0, 300.0);
		let settled_at = engine.position(1).unwrap();

		drag.start(&mut engine, 1);
		drag.drag(&mut engine, 1, center);
		for _ in 0..30 {
			engine.tick();
		}
		drag.end(&mut engine, 1);
		while engine.tick() {}

		let released = engine.position(1).unwrap();
		assert!(released.distance(center) < 0.5, "ended at {released:?}");
		assert!(released.distance(settled_at) > 1.0);
		assert!(!engine.is_running());
	}

	#[test]
	fn only_the_first_gesture_boosts_alpha() {
		let mut engine = settled_engine();
		let mut drag = DragController::default();

		drag.start(&mut engine, 0);
		engine.set_alpha_target(0.1);
		drag.start(&mut engine, 2);
		assert_eq!(engine.alpha_target(), 0.1);
		assert_eq!(drag.active(), 2);

		drag.end(&mut engine, 0);
		assert_eq!(engine.alpha_target(), 0.1);
		assert!(engine.bodies()[2].pinned.is_some());

		drag.end(&mut engine, 2);
		assert_eq!(engine.alpha_target(), 0.0);
	}

	#[test]
	fn out_of_order_events_are_ignored() {
		let mut engine = settled_engine();
		let mut drag = DragController::default();

		assert!(!drag.drag(&mut engine, 0, Point::new(1.0, 1.0)));
		assert!(!drag.end(&mut engine, 0));
		assert!(drag.start(&mut engine, 0));
		assert!(!drag.start(&mut engine, 0));
		assert!(!drag.start(&mut engine, 42));
		assert_eq!(engine.bodies()[0].pinned, engine.position(0));
	}
}
