//! `PinkVisualApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::params::QueryParams;
use super::types::{Actor, Episode, Listing, Niche};

/// Pink Visual catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Every operation sends `params` as query parameters; an explicit `key`
/// in `params` takes precedence over the client's configured key.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(PinkVisualApi: Send)]
pub trait LocalPinkVisualApi {
    /// Lists episodes (`episodes/all`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn episodes_all(&self, params: &QueryParams) -> Result<Listing<Episode>>;

    /// Fetches a single episode (`episode/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn episode(&self, id: &str, params: &QueryParams) -> Result<Episode>;

    /// Searches episodes by phrase (`episodes/search/{term}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn search_episodes(&self, term: &str, params: &QueryParams)
    -> Result<Listing<Episode>>;

    /// Lists episodes in a niche (`episodes/niche/{niche_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn episodes_by_niche(
        &self,
        niche_id: &str,
        params: &QueryParams,
    ) -> Result<Listing<Episode>>;

    /// Lists episodes featuring an actor (`episodes/actor/{actor_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn episodes_by_actor(
        &self,
        actor_id: &str,
        params: &QueryParams,
    ) -> Result<Listing<Episode>>;

    /// Lists niches (`niches/all`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn niches_all(&self, params: &QueryParams) -> Result<Listing<Niche>>;

    /// Fetches a single niche (`niche/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn niche(&self, id: &str, params: &QueryParams) -> Result<Niche>;

    /// Lists actors (`actors/all`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn actors_all(&self, params: &QueryParams) -> Result<Listing<Actor>>;

    /// Fetches a single actor (`actor/{id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn actor(&self, id: &str, params: &QueryParams) -> Result<Actor>;

    /// Searches actors by name (`actors/search/{term}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn search_actors(&self, term: &str, params: &QueryParams) -> Result<Listing<Actor>>;

    /// Lists actors whose name starts with `letter` (`actors/letter/{letter}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn actors_by_letter(&self, letter: char, params: &QueryParams)
    -> Result<Listing<Actor>>;

    /// Lists actors appearing in a niche (`actors/niche/{niche_id}`).
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured, the HTTP request fails,
    /// the API answers with a non-200 status, or JSON parsing fails.
    async fn actors_by_niche(&self, niche_id: &str, params: &QueryParams)
    -> Result<Listing<Actor>>;
}
