//! Canvas rendering for the force graph.
//!
//! Rendering is split in two. [`project`] turns the current state into a
//! [`Scene`] of plain values; [`paint`] draws a scene onto a 2D context.
//! Painting uses three passes for correct z-ordering:
//! 1. Background
//! 2. Link lines
//! 3. Nodes in model order, each under its own translation

use std::f64::consts::PI;

use log::debug;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::layout::Point;
use super::state::ForceGraphState;
use super::theme::{Glyph, ShapeStyle, ShapeTable, Theme};
use super::types::NodeId;

/// A link line between two resolved node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
	/// Source node position.
	pub from: Point,
	/// Target node position.
	pub to: Point,
}

/// A node's glyph placed at its position.
#[derive(Clone, Debug)]
pub struct NodeSprite<'a> {
	/// Node drawn.
	pub id: NodeId,
	/// Where the glyph's origin is placed.
	pub translate: Point,
	/// Looked up from the shape table.
	pub style: &'a ShapeStyle,
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug)]
pub struct Scene<'a> {
	/// Canvas width.
	pub width: f64,
	/// Canvas height.
	pub height: f64,
	/// Drawn first.
	pub links: Vec<LinkSegment>,
	/// Drawn over the links, in model order.
	pub nodes: Vec<NodeSprite<'a>>,
}

/// Project the current layout into a scene.
pub fn project<'a>(state: &ForceGraphState, shapes: &'a ShapeTable) -> Scene<'a> {
	let bodies = state.engine.bodies();
	let links = state
		.model
		.links()
		.iter()
		.map(|&(src, tgt)| LinkSegment {
			from: bodies[src].position,
			to: bodies[tgt].position,
		})
		.collect();
	let nodes = state
		.model
		.nodes()
		.iter()
		.zip(bodies)
		.map(|(node, body)| NodeSprite {
			id: node.id,
			translate: body.position,
			style: shapes.style_for(&node.shape),
		})
		.collect();

	Scene {
		width: state.width,
		height: state.height,
		links,
		nodes,
	}
}

/// Draw a scene.
pub fn paint(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	draw_links(scene, ctx, theme);
	for sprite in &scene.nodes {
		draw_node(ctx, sprite);
	}
}

fn draw_links(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_stroke_style_str(&theme.link.color.to_css());
	ctx.set_line_width(theme.link.width);
	for link in &scene.links {
		ctx.begin_path();
		ctx.move_to(link.from.x, link.from.y);
		ctx.line_to(link.to.x, link.to.y);
		ctx.stroke();
	}
}

fn draw_node(ctx: &CanvasRenderingContext2d, sprite: &NodeSprite) {
	let Some(fill) = sprite.style.fill else {
		return;
	};
	if sprite.style.glyph.is_empty() {
		return;
	}

	ctx.save();
	let _ = ctx.translate(sprite.translate.x, sprite.translate.y);
	ctx.set_fill_style_str(&fill.to_css());
	match &sprite.style.glyph {
		Glyph::Circle { radius } => {
			ctx.begin_path();
			let _ = ctx.arc(0.0, 0.0, *radius, 0.0, 2.0 * PI);
			ctx.fill();
		}
		Glyph::Path(d) => match Path2d::new_with_path_string(d) {
			Ok(path) => ctx.fill_with_path_2d(&path),
			Err(e) => debug!("user-graph: node {} has an unusable path: {:?}", sprite.id, e),
		},
	}
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::model::GraphModel;
	use crate::components::force_graph::theme::Color;
	use crate::components::force_graph::types::{GraphConfig, GraphData, ShapeKind};

	fn settled(data: &GraphData) -> ForceGraphState {
		let model = GraphModel::new(data).unwrap();
		let mut state = ForceGraphState::new(model, &GraphConfig::default());
		while state.tick() {}
		state
	}

	#[test]
	fn link_endpoints_follow_node_positions() {
		let state = settled(&GraphData::default());
		let shapes = ShapeTable::primitives();
		let scene = project(&state, &shapes);

		let p = |idx| state.engine.position(idx).unwrap();
		assert_eq!(
			scene.links,
			vec![
				LinkSegment {
					from: p(0),
					to: p(1),
				},
				LinkSegment {
					from: p(1),
					to: p(2),
				},
			]
		);
		for (idx, sprite) in scene.nodes.iter().enumerate() {
			assert_eq!(sprite.translate, p(idx));
		}
		assert_eq!((scene.width, scene.height), (800.0, 600.0));
	}

	#[test]
	fn sprites_take_their_style_from_the_table() {
		let state = settled(&GraphData::default());
		let shapes = ShapeTable::primitives();
		let scene = project(&state, &shapes);

		let ids: Vec<NodeId> = scene.nodes.iter().map(|s| s.id).collect();
		assert_eq!(ids, vec![1, 2, 3]);
		assert_eq!(scene.nodes[0].style.glyph, Glyph::Circle { radius: 10.0 });
		assert_eq!(
			scene.nodes[1].style.glyph,
			Glyph::Path("M -15 -10 15 -10 15 10 -15 10 Z".into())
		);
		assert_eq!(
			scene.nodes[2].style.glyph,
			Glyph::Path("M -10 10 10 10 0 -10 Z".into())
		);
	}

	#[test]
	fn new_shapes_only_need_a_table_entry() {
		let data: GraphData =
			serde_json::from_str(r#"{"nodes":[{"id":1,"type":"diamond"}],"links":[]}"#).unwrap();
		let state = settled(&data);
		let diamond = ShapeStyle::new(
			Glyph::Path("M 0 -12 12 0 0 12 -12 0 Z".into()),
			Color::rgb(128, 0, 128),
		);
		let theme = Theme::default().with_shapes(
			ShapeTable::primitives().with(ShapeKind::Other("diamond".into()), diamond.clone()),
		);

		let scene = project(&state, &theme.shapes);
		assert_eq!(scene.nodes[0].style, &diamond);
	}

	#[test]
	fn unknown_shapes_project_to_empty_paths() {
		let data: GraphData = serde_json::from_str(
			r#"{"nodes":[{"id":7,"type":"star"},{"id":8,"type":""}],"links":[{"source":7,"target":8}]}"#,
		)
		.unwrap();
		let state = settled(&data);
		let shapes = ShapeTable::primitives();
		let scene = project(&state, &shapes);

		assert_eq!(scene.links.len(), 1);
		assert!(
			scene
				.nodes
				.iter()
				.all(|s| s.style.glyph.is_empty() && s.style.fill.is_none())
		);
	}
}
