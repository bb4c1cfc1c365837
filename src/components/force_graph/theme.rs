//! Visual theming for the force graph.
//!
//! Node appearance is a lookup table from [`ShapeKind`] to [`ShapeStyle`]
//! handed to the renderer through [`Theme`]. Adding a shape means adding a
//! table entry; the renderer itself never matches on shape kinds.

use std::collections::HashMap;

use super::layout::Point;
use super::types::ShapeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Geometry of a node, in node-local coordinates centered on the node.
#[derive(Clone, Debug, PartialEq)]
pub enum Glyph {
	/// Circle around the node center.
	Circle {
		/// Radius in canvas units.
		radius: f64,
	},
	/// SVG path data, e.g. `"M -10 10 10 10 0 -10 Z"`.
	Path(String),
}

impl Glyph {
	/// A path that draws nothing.
	pub fn empty() -> Self {
		Glyph::Path(String::new())
	}

	/// True for blank path data.
	pub fn is_empty(&self) -> bool {
		matches!(self, Glyph::Path(d) if d.trim().is_empty())
	}

	/// Whether `local`, relative to the node center, lies on the painted
	/// glyph.
	///
	/// Paths are treated as the polygon through their listed vertices
	/// (even-odd rule), which is exact for straight-segment shapes. Fewer
	/// than three vertices paint nothing and contain nothing.
	pub fn contains(&self, local: Point) -> bool {
		match self {
			Glyph::Circle { radius } => local.x.hypot(local.y) <= *radius,
			Glyph::Path(d) => {
				let vertices = path_vertices(d);
				if vertices.len() < 3 {
					return false;
				}
				let edges = vertices.iter().zip(vertices.iter().cycle().skip(1));
				edges.fold(false, |inside, (a, b)| {
					let crosses = (a.y > local.y) != (b.y > local.y)
						&& local.x < (b.x - a.x) * (local.y - a.y) / (b.y - a.y) + a.x;
					inside != crosses
				})
			}
		}
	}
}

/// Coordinate pairs of an SVG path, ignoring commands.
fn path_vertices(d: &str) -> Vec<Point> {
	let coords: Vec<f64> = d
		.split(|c: char| c.is_whitespace() || c == ',')
		.filter_map(|tok| tok.parse().ok())
		.collect();
	coords
		.chunks_exact(2)
		.map(|xy| Point::new(xy[0], xy[1]))
		.collect()
}

/// How one kind of node is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStyle {
	/// Geometry drawn for the node.
	pub glyph: Glyph,
	/// `None` leaves the glyph unfilled.
	pub fill: Option<Color>,
}

impl ShapeStyle {
	/// A filled glyph.
	pub fn new(glyph: Glyph, fill: Color) -> Self {
		Self {
			glyph,
			fill: Some(fill),
		}
	}

	/// Empty path, no fill. Used for kinds missing from the table.
	pub fn empty() -> Self {
		Self {
			glyph: Glyph::empty(),
			fill: None,
		}
	}
}

/// Declarative mapping from shape kind to style.
#[derive(Clone, Debug)]
pub struct ShapeTable {
	styles: HashMap<ShapeKind, ShapeStyle>,
	fallback: ShapeStyle,
}

impl ShapeTable {
	/// A table with no entries; every kind falls back to an empty path.
	pub fn new() -> Self {
		Self {
			styles: HashMap::new(),
			fallback: ShapeStyle::empty(),
		}
	}

	/// Map `kind` to `style`, replacing any previous entry.
	pub fn with(mut self, kind: ShapeKind, style: ShapeStyle) -> Self {
		self.styles.insert(kind, style);
		self
	}

	/// Style for `kind`, or an empty path when the kind is not mapped.
	pub fn style_for(&self, kind: &ShapeKind) -> &ShapeStyle {
		self.styles.get(kind).unwrap_or(&self.fallback)
	}

	/// Circle, rectangle and triangle in blue, red and green.
	pub fn primitives() -> Self {
		Self::new()
			.with(
				ShapeKind::Circle,
				ShapeStyle::new(Glyph::Circle { radius: 10.0 }, Color::rgb(0, 0, 255)),
			)
			.with(
				ShapeKind::Rectangle,
				ShapeStyle::new(
					Glyph::Path("M -15 -10 15 -10 15 10 -15 10 Z".into()),
					Color::rgb(255, 0, 0),
				),
			)
			.with(
				ShapeKind::Triangle,
				ShapeStyle::new(
					Glyph::Path("M -10 10 10 10 0 -10 Z".into()),
					Color::rgb(0, 128, 0),
				),
			)
	}
}

impl Default for ShapeTable {
	fn default() -> Self {
		Self::primitives()
	}
}

/// Link line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Stroke color.
	pub color: Color,
	/// Stroke width.
	pub width: f64,
}

/// Floating tooltip panel style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Panel background.
	pub background: Color,
	/// One pixel border color.
	pub border: Color,
	/// Inner padding.
	pub padding_px: f64,
}

impl TooltipStyle {
	/// Inline CSS for the panel, minus position and visibility.
	pub fn to_css(&self) -> String {
		format!(
			"position: absolute; background: {}; padding: {}px; border: 1px solid {};",
			self.background.to_css(),
			self.padding_px,
			self.border.to_css()
		)
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Theme identifier.
	pub name: &'static str,
	/// Canvas background.
	pub background: Color,
	/// Link lines.
	pub link: LinkStyle,
	/// Node shapes by kind.
	pub shapes: ShapeTable,
	/// Tooltip panel.
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// White canvas, grey links, primary colored shapes.
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: Color::rgb(255, 255, 255),
			link: LinkStyle {
				color: Color::rgb(0xaa, 0xaa, 0xaa),
				width: 2.0,
			},
			shapes: ShapeTable::primitives(),
			tooltip: TooltipStyle {
				background: Color::rgb(255, 255, 255),
				border: Color::rgb(0xcc, 0xcc, 0xcc),
				padding_px: 5.0,
			},
		}
	}

	/// Same theme drawing nodes from `shapes`.
	pub fn with_shapes(self, shapes: ShapeTable) -> Self {
		Self { shapes, ..self }
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn primitives_map_each_known_shape() {
		let table = ShapeTable::primitives();

		let circle = table.style_for(&ShapeKind::Circle);
		assert_eq!(circle.glyph, Glyph::Circle { radius: 10.0 });
		assert_eq!(circle.fill.map(Color::to_css).as_deref(), Some("#0000ff"));

		let rect = table.style_for(&ShapeKind::Rectangle);
		assert_eq!(rect.glyph, Glyph::Path("M -15 -10 15 -10 15 10 -15 10 Z".into()));
		assert_eq!(rect.fill.map(Color::to_css).as_deref(), Some("#ff0000"));

		let tri = table.style_for(&ShapeKind::Triangle);
		assert_eq!(tri.glyph, Glyph::Path("M -10 10 10 10 0 -10 Z".into()));
		assert_eq!(tri.fill.map(Color::to_css).as_deref(), Some("#008000"));
	}

	#[test]
	fn unmapped_kinds_get_an_empty_path() {
		let table = ShapeTable::primitives();
		let style = table.style_for(&ShapeKind::Other("hexagon".into()));
		assert!(style.glyph.is_empty());
		assert_eq!(style.fill, None);

		let sparse = ShapeTable::new();
		assert_eq!(sparse.style_for(&ShapeKind::Circle), &ShapeStyle::empty());
	}

	#[test]
	fn glyphs_contain_only_their_painted_area() {
		let circle = Glyph::Circle { radius: 10.0 };
		assert!(circle.contains(Point::new(0.0, 0.0)));
		assert!(circle.contains(Point::new(6.0, 7.0)));
		assert!(!circle.contains(Point::new(8.0, 8.0)));

		let rect = Glyph::Path("M -15 -10 15 -10 15 10 -15 10 Z".into());
		assert!(rect.contains(Point::new(0.0, 0.0)));
		assert!(rect.contains(Point::new(14.0, 9.0)));
		assert!(!rect.contains(Point::new(0.0, 17.0)));
		assert!(!rect.contains(Point::new(16.0, 0.0)));

		let tri = Glyph::Path("M -10 10 10 10 0 -10 Z".into());
		assert!(tri.contains(Point::new(0.0, 0.0)));
		assert!(tri.contains(Point::new(0.0, 5.0)));
		assert!(!tri.contains(Point::new(-9.0, -5.0)));
		assert!(!tri.contains(Point::new(0.0, 12.0)));

		assert!(!Glyph::empty().contains(Point::new(0.0, 0.0)));
		assert!(!Glyph::Path("M 0 0 5 5".into()).contains(Point::new(1.0, 1.0)));
	}

	#[test]
	fn tooltip_css() {
		assert_eq!(
			Theme::default().tooltip.to_css(),
			"position: absolute; background: #ffffff; padding: 5px; border: 1px solid #cccccc;"
		);
	}
}
