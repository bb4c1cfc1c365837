//! user-graph: Interactive force-directed graph with random user tooltips.
//!
//! This crate provides a WASM-based graph visualization that lays out a small
//! graph with an alpha-cooled force simulation, lets nodes be dragged, and
//! shows a randomly fetched user when a node is hovered.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod random_user;

pub use components::force_graph::{
	ForceGraphCanvas, GraphConfig, GraphData, GraphError, GraphLink, GraphModel, GraphNode,
	ShapeKind,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("user-graph: logging initialized");
}

/// Parse the JSON text of an embedded script element. Malformed input is
/// logged and treated as absent.
fn parse_embedded<T: DeserializeOwned>(id: &str, json_text: &str) -> Option<T> {
	match serde_json::from_str::<T>(json_text) {
		Ok(value) => Some(value),
		Err(e) => {
			warn!("user-graph: failed to parse #{}: {}", id, e);
			None
		}
	}
}

/// Load JSON from a script element, e.g.
/// `<script id="graph-data" type="application/json">`.
fn load_embedded<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_embedded(id, &json_text)
}

/// Graph data from `#graph-data`, or the built-in three node graph.
fn load_graph_data() -> GraphData {
	match load_embedded::<GraphData>("graph-data") {
		Some(data) => {
			info!(
				"user-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			data
		}
		None => GraphData::default(),
	}
}

/// Main application component.
/// Loads configuration and graph data from the DOM and renders the graph,
/// or an error panel when the graph is malformed.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_embedded::<GraphConfig>("graph-config").unwrap_or_default();
	let body = match GraphModel::new(&load_graph_data()) {
		Ok(model) => view! { <ForceGraphCanvas model=model config=config /> }.into_any(),
		Err(e) => {
			error!("user-graph: invalid graph: {}", e);
			view! {
				<div class="graph-error">
					<h1>"Graph configuration error"</h1>
					<p>{e.to_string()}</p>
				</div>
			}
			.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="User Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div id="graph">{body}</div>
	}
}
