//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse event
//! handlers for node dragging and hover tooltips. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and repainting each frame.
//! Hovering a node spawns a user fetch on the local executor; its result is
//! handed back to the tooltip controller together with its hover ticket.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::layout::Point;
use super::model::GraphModel;
use super::render;
use super::state::ForceGraphState;
use super::theme::Theme;
use super::tooltip::{HoverTicket, TooltipPanel};
use super::types::GraphConfig;
use crate::random_user::RandomUserFetcher;

/// Bundles graph simulation state with its visual configuration and the
/// user source.
struct GraphContext {
	state: ForceGraphState,
	theme: Theme,
	fetcher: RandomUserFetcher,
}

type SharedContext = Rc<RefCell<Option<GraphContext>>>;

/// Push the controller's panel into the signal the view renders from.
fn sync_panel(panel: RwSignal<TooltipPanel>, current: &TooltipPanel) {
	if panel.with_untracked(|shown| shown != current) {
		panel.set(current.clone());
	}
}

fn spawn_user_fetch(context: SharedContext, panel: RwSignal<TooltipPanel>, ticket: HoverTicket) {
	let Some(fetcher) = context.borrow().as_ref().map(|c| c.fetcher.clone()) else {
		return;
	};
	spawn_local(async move {
		let result = fetcher.fetch().await;
		if let Some(ref mut c) = *context.borrow_mut() {
			let outcome = c.state.tooltip.resolve(ticket, result);
			debug!("user-graph: hover on node {} resolved as {:?}", ticket.node, outcome);
			sync_panel(panel, c.state.tooltip.panel());
		}
	});
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders an interactive force-directed graph on a canvas element, plus
/// the floating user tooltip.
///
/// The model must already be validated; the canvas is sized from `config`.
#[component]
pub fn ForceGraphCanvas(
	model: GraphModel,
	config: GraphConfig,
	#[prop(optional)] theme: Option<Theme>,
) -> impl IntoView {
	let theme = theme.unwrap_or_default();
	let tooltip_css = theme.tooltip.to_css();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let panel = RwSignal::new(TooltipPanel::default());
	let context: SharedContext = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			error!("user-graph: no window, graph not started");
			return;
		};

		canvas.set_width(config.width as u32);
		canvas.set_height(config.height as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
				Ok(ctx) => ctx,
				Err(_) => {
					error!("user-graph: canvas context is not 2d");
					return;
				}
			},
			_ => {
				error!("user-graph: canvas has no 2d context");
				return;
			}
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(model.clone(), &config),
			theme: theme.clone(),
			fetcher: RandomUserFetcher::new(config.user_endpoint.clone()),
		});

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick();
				let scene = render::project(&c.state, &c.theme.shapes);
				render::paint(&scene, &ctx, &c.theme);
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(at) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.pointer_down(at, &c.theme.shapes);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = canvas_point(canvas_ref, &ev) else {
			return;
		};
		let page = Point::new(ev.page_x() as f64, ev.page_y() as f64);

		let ticket = match *context_mm.borrow_mut() {
			Some(ref mut c) => {
				let ticket = c.state.pointer_move(at, page, &c.theme.shapes);
				sync_panel(panel, c.state.tooltip.panel());
				ticket
			}
			None => None,
		};
		if let Some(ticket) = ticket {
			spawn_user_fetch(context_mm.clone(), panel, ticket);
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.pointer_up();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.pointer_leave();
			sync_panel(panel, c.state.tooltip.panel());
		}
	};

	let tooltip_style = move || {
		panel.with(|p| {
			format!(
				"{} left: {}px; top: {}px; visibility: {};",
				tooltip_css,
				p.left,
				p.top,
				if p.visible { "visible" } else { "hidden" }
			)
		})
	};
	let tooltip_lines = move || {
		panel
			.get()
			.lines
			.into_iter()
			.map(|line| view! { <div>{line}</div> })
			.collect_view()
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; cursor: grab;"
		/>
		<div class="tooltip" style=tooltip_style>
			{tooltip_lines}
		</div>
	}
}
