//! API client library for the Pink Visual catalog API.
//!
//! Wraps the `http://api.pinkvisual.com/get/latest/` endpoints for
//! episodes, niches and actors. Every operation is a single GET whose
//! JSON body is unwrapped to the record or list the endpoint names.

mod api;
mod client;
mod error;
mod key;
mod namespaces;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalPinkVisualApi, PinkVisualApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_BASE_URL, PinkVisualClient, PinkVisualClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::ApiError;
pub use key::{default_key, init};
pub use namespaces::{Actors, Episodes, Niches};
pub use params::QueryParams;
pub use types::{Actor, Episode, Listing, Niche, Record};
