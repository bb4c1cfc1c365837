//! Alpha-cooled force simulation.
//!
//! Each step combines three forces, all scaled by the current `alpha`:
//! - link springs pulling connected nodes towards `link_distance`
//! - pairwise many-body charge (negative strength repels)
//! - a centering shift keeping the mean position on `center`
//!
//! `alpha` moves towards `alpha_target` by `alpha_decay` each step. With a
//! target of zero it reaches `alpha_min` after roughly 300 steps and the
//! engine stops until [`LayoutEngine::restart`] is called.

use std::f64::consts::PI;

use super::model::GraphModel;

/// A point or vector in graph space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

/// Tunables for the simulation.
#[derive(Clone, Debug)]
pub struct SimulationParameters {
	/// Rest length of each link spring.
	pub link_distance: f64,
	/// Many-body strength. Negative repels.
	pub charge_strength: f64,
	/// Point the mean node position is held on.
	pub center: Point,
	/// The engine stops once alpha falls below this.
	pub alpha_min: f64,
	/// Fraction of the gap to `alpha_target` closed each step.
	pub alpha_decay: f64,
	/// Fraction of velocity lost each step.
	pub velocity_decay: f64,
	/// Charge is not amplified below this separation.
	pub distance_min: f64,
}

impl SimulationParameters {
	/// Defaults centered on a canvas of the given size.
	pub fn centered(width: f64, height: f64) -> Self {
		let alpha_min: f64 = 0.001;
		Self {
			link_distance: 100.0,
			charge_strength: -400.0,
			center: Point::new(width / 2.0, height / 2.0),
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			distance_min: 1.0,
		}
	}
}

impl Default for SimulationParameters {
	fn default() -> Self {
		Self::centered(800.0, 600.0)
	}
}

/// Simulated state of one node.
#[derive(Clone, Copy, Debug, Default)]
pub struct Body {
	/// Current position.
	pub position: Point,
	/// Displacement applied on the next step.
	pub velocity: Point,
	/// When set, overrides the simulated position at the end of every step.
	pub pinned: Option<Point>,
}

#[derive(Clone, Copy, Debug)]
struct Spring {
	source: usize,
	target: usize,
	strength: f64,
	bias: f64,
}

/// Owns node positions and advances them one step at a time.
pub struct LayoutEngine {
	params: SimulationParameters,
	bodies: Vec<Body>,
	springs: Vec<Spring>,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	seed: u32,
}

impl LayoutEngine {
	/// Place the nodes of `model` on a spiral around the center, hot.
	pub fn new(model: &GraphModel, params: SimulationParameters) -> Self {
		let mut degree = vec![0usize; model.len()];
		for &(src, tgt) in model.links() {
			degree[src] += 1;
			degree[tgt] += 1;
		}

		let springs = model
			.links()
			.iter()
			.map(|&(source, target)| {
				let (ds, dt) = (degree[source] as f64, degree[target] as f64);
				Spring {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect();

		// Phyllotaxis spiral, so no two nodes start on top of each other.
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		let bodies = (0..model.len())
			.map(|i| {
				let (radius, angle) = (10.0 * (0.5 + i as f64).sqrt(), i as f64 * golden_angle);
				Body {
					position: Point::new(
						params.center.x + radius * angle.cos(),
						params.center.y + radius * angle.sin(),
					),
					..Body::default()
				}
			})
			.collect();

		Self {
			params,
			bodies,
			springs,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			seed: 1,
		}
	}

	/// Parameters the engine was built with.
	pub fn params(&self) -> &SimulationParameters {
		&self.params
	}

	/// Current temperature.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Temperature alpha is moving towards.
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Change the temperature alpha moves towards.
	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// False once cooled below `alpha_min`, until restarted.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Resume stepping. Alpha is left as is and climbs towards its target.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// All bodies, indexed like the model's nodes.
	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	/// Current position of body `idx`, if it exists.
	pub fn position(&self, idx: usize) -> Option<Point> {
		self.bodies.get(idx).map(|b| b.position)
	}

	/// Positions of all bodies in index order.
	pub fn positions(&self) -> impl DoubleEndedIterator<Item = Point> + ExactSizeIterator + '_ {
		self.bodies.iter().map(|b| b.position)
	}

	/// Hold body `idx` at `at` until unpinned.
	pub fn pin(&mut self, idx: usize, at: Point) {
		if let Some(body) = self.bodies.get_mut(idx) {
			body.pinned = Some(at);
		}
	}

	/// Release body `idx` back to the simulation.
	pub fn unpin(&mut self, idx: usize) {
		if let Some(body) = self.bodies.get_mut(idx) {
			body.pinned = None;
		}
	}

	/// Advance one step if running. Returns whether a step happened.
	pub fn tick(&mut self) -> bool {
		if !self.running {
			return false;
		}
		self.step();
		if self.alpha < self.params.alpha_min {
			self.running = false;
		}
		true
	}

	/// Advance exactly one step regardless of the running flag.
	pub fn step(&mut self) {
		self.alpha += (self.alpha_target - self.alpha) * self.params.alpha_decay;

		self.apply_links();
		self.apply_charge();
		self.apply_center();

		let keep = 1.0 - self.params.velocity_decay;
		for body in &mut self.bodies {
			match body.pinned {
				Some(pin) => {
					body.position = pin;
					body.velocity = Point::default();
				}
				None => {
					body.velocity.x *= keep;
					body.velocity.y *= keep;
					body.position.x += body.velocity.x;
					body.position.y += body.velocity.y;
				}
			}
		}
	}

	fn apply_links(&mut self) {
		for i in 0..self.springs.len() {
			let spring = self.springs[i];
			let (s, t) = (self.bodies[spring.source], self.bodies[spring.target]);
			let mut x = t.position.x + t.velocity.x - s.position.x - s.velocity.x;
			let mut y = t.position.y + t.velocity.y - s.position.y - s.velocity.y;
			if x == 0.0 {
				x = self.jiggle();
			}
			if y == 0.0 {
				y = self.jiggle();
			}
			let len = x.hypot(y);
			let k = (len - self.params.link_distance) / len * self.alpha * spring.strength;
			let (x, y) = (x * k, y * k);

			let target = &mut self.bodies[spring.target].velocity;
			target.x -= x * spring.bias;
			target.y -= y * spring.bias;
			let source = &mut self.bodies[spring.source].velocity;
			source.x += x * (1.0 - spring.bias);
			source.y += y * (1.0 - spring.bias);
		}
	}

	fn apply_charge(&mut self) {
		let strength = self.params.charge_strength * self.alpha;
		let min2 = self.params.distance_min * self.params.distance_min;
		let positions: Vec<Point> = self.positions().collect();

		for (i, pi) in positions.iter().enumerate() {
			for (j, pj) in positions.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut x, mut y) = (pj.x - pi.x, pj.y - pi.y);
				if x == 0.0 {
					x = self.jiggle();
				}
				if y == 0.0 {
					y = self.jiggle();
				}
				let mut l = x * x + y * y;
				if l < min2 {
					l = (min2 * l).sqrt();
				}
				let w = strength / l;
				let v = &mut self.bodies[i].velocity;
				v.x += x * w;
				v.y += y * w;
			}
		}
	}

	fn apply_center(&mut self) {
		if self.bodies.is_empty() {
			return;
		}
		let n = self.bodies.len() as f64;
		let (sx, sy) = self
			.positions()
			.fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
		let (dx, dy) = (self.params.center.x - sx / n, self.params.center.y - sy / n);
		for body in &mut self.bodies {
			body.position.x += dx;
			body.position.y += dy;
		}
	}

	/// Tiny deterministic offset for separating coincident points.
	fn jiggle(&mut self) -> f64 {
		self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		((self.seed >> 8) as f64 / (1u32 << 24) as f64 - 0.5) * 1e-6
	}
}
