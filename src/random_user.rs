//! Client for the random user service queried when a node is hovered.
//!
//! One GET per call, no retries, no timeout. Only the first entry of the
//! `results` array is used.

use log::warn;
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

/// The user shown in a node's tooltip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserRecord {
	/// Given name.
	pub first_name: String,
	/// Family name.
	pub last_name: String,
	pub email: String,
}

impl UserRecord {
	/// `"User: {first} {last}"`, the tooltip's first line.
	pub fn name_line(&self) -> String {
		format!("User: {} {}", self.first_name, self.last_name)
	}

	/// `"Email: {email}"`, the tooltip's second line.
	pub fn email_line(&self) -> String {
		format!("Email: {}", self.email)
	}
}

/// Why no user could be produced. Always recoverable.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The request never produced a response.
	#[error("request failed: {0}")]
	Network(String),
	/// Non-2xx HTTP status.
	#[error("server answered with status {0}")]
	Status(u16),
	/// Body is not the expected JSON.
	#[error("malformed response: {0}")]
	Parse(#[from] serde_json::Error),
	/// `results` was empty.
	#[error("response contained no users")]
	EmptyResults,
}

#[derive(Deserialize)]
struct Envelope {
	results: Vec<RawUser>,
}

#[derive(Deserialize)]
struct RawUser {
	name: RawName,
	email: String,
}

#[derive(Deserialize)]
struct RawName {
	first: String,
	last: String,
}

/// Extract the first user from a response body.
pub fn parse_user(body: &str) -> Result<UserRecord, FetchError> {
	let envelope: Envelope = serde_json::from_str(body)?;
	let user = envelope
		.results
		.into_iter()
		.next()
		.ok_or(FetchError::EmptyResults)?;
	Ok(UserRecord {
		first_name: user.name.first,
		last_name: user.name.last,
		email: user.email,
	})
}

/// Fetches random users from a fixed endpoint through `window.fetch`.
#[derive(Clone, Debug)]
pub struct RandomUserFetcher {
	endpoint: String,
}

impl RandomUserFetcher {
	/// Fetcher for `endpoint`, e.g. `https://randomuser.me/api/`.
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
		}
	}

	/// URL every fetch is sent to.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Fetch one user. Failures are logged here; callers treat them as
	/// "no data".
	pub async fn fetch(&self) -> Result<UserRecord, FetchError> {
		let result = self.request().await;
		if let Err(e) = &result {
			warn!("user-graph: fetching user from {} failed: {}", self.endpoint, e);
		}
		result
	}

	async fn request(&self) -> Result<UserRecord, FetchError> {
		let window =
			web_sys::window().ok_or_else(|| FetchError::Network("no window available".into()))?;
		let response: Response = JsFuture::from(window.fetch_with_str(&self.endpoint))
			.await
			.map_err(js_error)?
			.dyn_into()
			.map_err(js_error)?;
		if !response.ok() {
			return Err(FetchError::Status(response.status()));
		}
		let text = JsFuture::from(response.text().map_err(js_error)?)
			.await
			.map_err(js_error)?;
		let body = text
			.as_string()
			.ok_or_else(|| FetchError::Network("response body is not text".into()))?;
		parse_user(&body)
	}
}

fn js_error(value: JsValue) -> FetchError {
	let message = value
		.dyn_ref::<js_sys::Error>()
		.map(|e| String::from(e.message()))
		.or_else(|| value.as_string())
		.unwrap_or_else(|| format!("{:?}", value));
	FetchError::Network(message)
}
