//! Hover tooltips backed by a per-node user cache.
//!
//! Every hover starts a new session with a fresh generation number. A
//! fetch result carries the [`HoverTicket`] it was started with, so a
//! response arriving after the pointer has moved on is still cached for
//! its node but never shown against another one.

use std::collections::HashMap;

use log::debug;

use super::layout::Point;
use super::types::NodeId;
use crate::random_user::{FetchError, UserRecord};

/// Panel offset from the pointer, in page pixels.
pub const PANEL_OFFSET: (f64, f64) = (10.0, -10.0);

/// Users fetched so far, keyed by node.
#[derive(Clone, Debug, Default)]
pub struct UserCache {
	users: HashMap<NodeId, UserRecord>,
}

impl UserCache {
	/// Last user fetched for `node`.
	pub fn get(&self, node: NodeId) -> Option<&UserRecord> {
		self.users.get(&node)
	}

	/// Replace whatever was cached for `node`.
	pub fn store(&mut self, node: NodeId, user: UserRecord) {
		self.users.insert(node, user);
	}

	/// Number of nodes with a cached user.
	pub fn len(&self) -> usize {
		self.users.len()
	}

	/// True before any fetch has succeeded.
	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}
}

/// Identifies the hover session a fetch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverTicket {
	/// Node being hovered.
	pub node: NodeId,
	/// Session number, unique per hover.
	pub generation: u64,
}

/// What the floating panel currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TooltipPanel {
	/// Hidden panels keep their last contents.
	pub visible: bool,
	/// Page x of the panel's corner.
	pub left: f64,
	/// Page y of the panel's corner.
	pub top: f64,
	/// Text lines, top to bottom.
	pub lines: Vec<String>,
}

/// Outcome of handing a fetch result back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
	/// Cached and displayed.
	Shown,
	/// Cached, but its hover session is over.
	Stale,
	/// Nothing cached, panel untouched.
	Failed,
}

#[derive(Clone, Copy, Debug)]
struct HoverSession {
	ticket: HoverTicket,
	pointer: Point,
}

/// Owns the user cache and the panel, and decides which fetch results
/// are displayed.
#[derive(Debug, Default)]
pub struct TooltipController {
	cache: UserCache,
	panel: TooltipPanel,
	session: Option<HoverSession>,
	generation: u64,
}

impl TooltipController {
	/// Users fetched so far.
	pub fn cache(&self) -> &UserCache {
		&self.cache
	}

	/// What the panel should show right now.
	pub fn panel(&self) -> &TooltipPanel {
		&self.panel
	}

	/// Node of the live hover session.
	pub fn hovered(&self) -> Option<NodeId> {
		self.session.map(|s| s.ticket.node)
	}

	/// Start a hover session on `node`. The caller fetches a user and
	/// passes the result to [`TooltipController::resolve`] with this ticket.
	pub fn begin_hover(&mut self, node: NodeId, pointer: Point) -> HoverTicket {
		self.generation += 1;
		let ticket = HoverTicket {
			node,
			generation: self.generation,
		};
		self.session = Some(HoverSession { ticket, pointer });
		ticket
	}

	/// Record the latest pointer position for the live session.
	pub fn move_pointer(&mut self, pointer: Point) {
		if let Some(session) = self.session.as_mut() {
			session.pointer = pointer;
		}
	}

	/// Hide the panel and end the session, whatever is still in flight.
	pub fn end_hover(&mut self) {
		self.session = None;
		self.panel.visible = false;
	}

	/// Hand back the result of the fetch started for `ticket`.
	///
	/// Successful results are always cached. They are displayed only
	/// while `ticket` is still the live session.
	pub fn resolve(
		&mut self,
		ticket: HoverTicket,
		result: Result<UserRecord, FetchError>,
	) -> Resolution {
		let user = match result {
			Ok(user) => user,
			Err(e) => {
				debug!("user-graph: no user for node {}: {}", ticket.node, e);
				return Resolution::Failed;
			}
		};
		self.cache.store(ticket.node, user);

		let Some(session) = self.session.filter(|s| s.ticket == ticket) else {
			return Resolution::Stale;
		};
		let Some(user) = self.cache.get(ticket.node) else {
			return Resolution::Stale;
		};
		self.panel = TooltipPanel {
			visible: true,
			left: session.pointer.x + PANEL_OFFSET.0,
			top: session.pointer.y + PANEL_OFFSET.1,
			lines: vec![user.name_line(), user.email_line()],
		};
		Resolution::Shown
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn user(first: &str) -> UserRecord {
		UserRecord {
			first_name: first.into(),
			last_name: "Doe".into(),
			email: format!("{}@example.com", first.to_lowercase()),
		}
	}

	fn text(panel: &TooltipPanel) -> String {
		panel.lines.join(" / ")
	}

	fn network_down() -> FetchError {
		FetchError::Network("connection refused".into())
	}

	#[test]
	fn successful_fetch_is_cached_and_shown() {
		let mut tooltip = TooltipController::default();
		let ticket = tooltip.begin_hover(2, Point::new(100.0, 50.0));
		assert!(!tooltip.panel().visible);

		tooltip.move_pointer(Point::new(110.0, 60.0));
		assert_eq!(tooltip.resolve(ticket, Ok(user("Jane"))), Resolution::Shown);

		assert_eq!(tooltip.cache().get(2), Some(&user("Jane")));
		let panel = tooltip.panel();
		assert!(panel.visible);
		assert_eq!(text(panel), "User: Jane Doe / Email: jane@example.com");
		assert_eq!((panel.left, panel.top), (120.0, 50.0));
	}

	#[test]
	fn failed_fetch_changes_nothing() {
		let mut tooltip = TooltipController::default();
		let ticket = tooltip.begin_hover(1, Point::default());
		assert_eq!(tooltip.resolve(ticket, Err(network_down())), Resolution::Failed);
		assert!(tooltip.cache().get(1).is_none());
		assert_eq!(tooltip.panel(), &TooltipPanel::default());
	}

	#[test]
	fn failure_after_success_keeps_the_old_user() {
		let mut tooltip = TooltipController::default();
		let first = tooltip.begin_hover(1, Point::default());
		tooltip.resolve(first, Ok(user("Ann")));
		tooltip.end_hover();

		let second = tooltip.begin_hover(1, Point::default());
		assert_eq!(tooltip.resolve(second, Err(network_down())), Resolution::Failed);
		assert_eq!(tooltip.cache().get(1), Some(&user("Ann")));
		assert!(!tooltip.panel().visible);
	}

	#[test]
	fn end_hover_hides_immediately() {
		let mut tooltip = TooltipController::default();
		let ticket = tooltip.begin_hover(3, Point::default());
		tooltip.resolve(ticket, Ok(user("Max")));
		assert!(tooltip.panel().visible);

		tooltip.end_hover();
		assert!(!tooltip.panel().visible);
		assert_eq!(tooltip.hovered(), None);
	}

	#[test]
	fn late_response_is_cached_but_not_shown() {
		let mut tooltip = TooltipController::default();
		let on_a = tooltip.begin_hover(1, Point::default());
		tooltip.end_hover();
		let on_b = tooltip.begin_hover(2, Point::new(5.0, 5.0));

		assert_eq!(tooltip.resolve(on_a, Ok(user("Late"))), Resolution::Stale);
		assert_eq!(tooltip.cache().get(1), Some(&user("Late")));
		assert!(!tooltip.panel().visible);

		assert_eq!(tooltip.resolve(on_b, Ok(user("Bob"))), Resolution::Shown);
		assert_eq!(
			text(tooltip.panel()),
			"User: Bob Doe / Email: bob@example.com"
		);
	}

	#[test]
	fn rehovering_the_same_node_starts_a_new_session() {
		let mut tooltip = TooltipController::default();
		let first = tooltip.begin_hover(1, Point::default());
		tooltip.end_hover();
		let second = tooltip.begin_hover(1, Point::default());
		assert_ne!(first, second);

		assert_eq!(tooltip.resolve(first, Ok(user("Old"))), Resolution::Stale);
		assert_eq!(tooltip.resolve(second, Ok(user("New"))), Resolution::Shown);
		assert_eq!(tooltip.cache().get(1), Some(&user("New")));
	}
}
