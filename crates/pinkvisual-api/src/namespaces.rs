//! Namespaced views over a [`LocalPinkVisualApi`] implementation.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::api::LocalPinkVisualApi;
use super::params::QueryParams;
use super::types::{Actor, Episode, Listing, Niche};

/// Episode operations, from [`crate::PinkVisualClient::episodes`].
#[derive(Debug, Clone, Copy)]
pub struct Episodes<'a, A> {
    api: &'a A,
}

impl<'a, A: LocalPinkVisualApi> Episodes<'a, A> {
    /// Wraps an API implementation.
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Lists episodes.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::episodes_all`].
    pub async fn all(&self, params: &QueryParams) -> Result<Listing<Episode>> {
        self.api.episodes_all(params).await
    }

    /// Fetches a single episode by id.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::episode`].
    pub async fn one(&self, id: &str, params: &QueryParams) -> Result<Episode> {
        self.api.episode(id, params).await
    }

    /// Searches episodes by phrase.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::search_episodes`].
    pub async fn search(&self, term: &str, params: &QueryParams) -> Result<Listing<Episode>> {
        self.api.search_episodes(term, params).await
    }

    /// Lists episodes in a niche.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::episodes_by_niche`].
    pub async fn by_niche(&self, niche_id: &str, params: &QueryParams) -> Result<Listing<Episode>> {
        self.api.episodes_by_niche(niche_id, params).await
    }

    /// Lists episodes featuring an actor.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::episodes_by_actor`].
    pub async fn by_actor(&self, actor_id: &str, params: &QueryParams) -> Result<Listing<Episode>> {
        self.api.episodes_by_actor(actor_id, params).await
    }
}

/// Niche operations, from [`crate::PinkVisualClient::niches`].
#[derive(Debug, Clone, Copy)]
pub struct Niches<'a, A> {
    api: &'a A,
}

impl<'a, A: LocalPinkVisualApi> Niches<'a, A> {
    /// Wraps an API implementation.
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Lists niches.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::niches_all`].
    pub async fn all(&self, params: &QueryParams) -> Result<Listing<Niche>> {
        self.api.niches_all(params).await
    }

    /// Fetches a single niche by id.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::niche`].
    pub async fn one(&self, id: &str, params: &QueryParams) -> Result<Niche> {
        self.api.niche(id, params).await
    }
}

/// Actor operations, from [`crate::PinkVisualClient::actors`].
#[derive(Debug, Clone, Copy)]
pub struct Actors<'a, A> {
    api: &'a A,
}

impl<'a, A: LocalPinkVisualApi> Actors<'a, A> {
    /// Wraps an API implementation.
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Lists actors.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::actors_all`].
    pub async fn all(&self, params: &QueryParams) -> Result<Listing<Actor>> {
        self.api.actors_all(params).await
    }

    /// Fetches a single actor by id.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::actor`].
    pub async fn one(&self, id: &str, params: &QueryParams) -> Result<Actor> {
        self.api.actor(id, params).await
    }

    /// Searches actors by name.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::search_actors`].
    pub async fn search(&self, term: &str, params: &QueryParams) -> Result<Listing<Actor>> {
        self.api.search_actors(term, params).await
    }

    /// Lists actors whose name starts with `letter`.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::actors_by_letter`].
    pub async fn by_letter(&self, letter: char, params: &QueryParams) -> Result<Listing<Actor>> {
        self.api.actors_by_letter(letter, params).await
    }

    /// Lists actors appearing in a niche.
    ///
    /// # Errors
    ///
    /// See [`LocalPinkVisualApi::actors_by_niche`].
    pub async fn by_niche(&self, niche_id: &str, params: &QueryParams) -> Result<Listing<Actor>> {
        self.api.actors_by_niche(niche_id, params).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::types::Record;

    /// Records which operation was called and with which argument.
    #[derive(Debug, Default)]
    struct MockApi {
        calls: Mutex<Vec<String>>,
    }

    impl MockApi {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn listing() -> Listing<Record> {
            let record: Record = serde_json::from_value(json!({ "id": 1 })).unwrap();
            Listing {
                items: vec![record],
                total: Some(1),
            }
        }
    }

    impl LocalPinkVisualApi for MockApi {
        async fn episodes_all(&self, _params: &QueryParams) -> Result<Listing<Episode>> {
            self.record(String::from("episodes_all"));
            Ok(Self::listing())
        }

        async fn episode(&self, id: &str, _params: &QueryParams) -> Result<Episode> {
            self.record(format!("episode:{id}"));
            Ok(Record::default())
        }

        async fn search_episodes(
            &self,
            term: &str,
            _params: &QueryParams,
        ) -> Result<Listing<Episode>> {
            self.record(format!("search_episodes:{term}"));
            Ok(Self::listing())
        }

        async fn episodes_by_niche(
            &self,
            niche_id: &str,
            _params: &QueryParams,
        ) -> Result<Listing<Episode>> {
            self.record(format!("episodes_by_niche:{niche_id}"));
            Ok(Self::listing())
        }

        async fn episodes_by_actor(
            &self,
            actor_id: &str,
            _params: &QueryParams,
        ) -> Result<Listing<Episode>> {
            self.record(format!("episodes_by_actor:{actor_id}"));
            Ok(Self::listing())
        }

        async fn niches_all(&self, _params: &QueryParams) -> Result<Listing<Niche>> {
            self.record(String::from("niches_all"));
            Ok(Self::listing())
        }

        async fn niche(&self, id: &str, _params: &QueryParams) -> Result<Niche> {
            self.record(format!("niche:{id}"));
            Ok(Record::default())
        }

        async fn actors_all(&self, _params: &QueryParams) -> Result<Listing<Actor>> {
            self.record(String::from("actors_all"));
            Ok(Self::listing())
        }

        async fn actor(&self, id: &str, _params: &QueryParams) -> Result<Actor> {
            self.record(format!("actor:{id}"));
            Ok(Record::default())
        }

        async fn search_actors(
            &self,
            term: &str,
            _params: &QueryParams,
        ) -> Result<Listing<Actor>> {
            self.record(format!("search_actors:{term}"));
            Ok(Self::listing())
        }

        async fn actors_by_letter(
            &self,
            letter: char,
            _params: &QueryParams,
        ) -> Result<Listing<Actor>> {
            self.record(format!("actors_by_letter:{letter}"));
            Ok(Self::listing())
        }

        async fn actors_by_niche(
            &self,
            niche_id: &str,
            _params: &QueryParams,
        ) -> Result<Listing<Actor>> {
            self.record(format!("actors_by_niche:{niche_id}"));
            Ok(Self::listing())
        }
    }

    #[tokio::test]
    async fn test_episodes_view_delegates() {
        // Arrange
        let api = MockApi::default();
        let episodes = Episodes::new(&api);
        let params = QueryParams::new();

        // Act
        episodes.all(&params).await.unwrap();
        episodes.one("7", &params).await.unwrap();
        episodes.search("beach", &params).await.unwrap();
        episodes.by_niche("4", &params).await.unwrap();
        episodes.by_actor("3311", &params).await.unwrap();

        // Assert
        assert_eq!(
            api.calls(),
            vec![
                "episodes_all",
                "episode:7",
                "search_episodes:beach",
                "episodes_by_niche:4",
                "episodes_by_actor:3311",
            ]
        );
    }

    #[tokio::test]
    async fn test_niches_view_delegates() {
        // Arrange
        let api = MockApi::default();
        let niches = Niches::new(&api);
        let params = QueryParams::new();

        // Act
        let listing = niches.all(&params).await.unwrap();
        niches.one("9", &params).await.unwrap();

        // Assert
        assert_eq!(listing.total, Some(1));
        assert_eq!(api.calls(), vec!["niches_all", "niche:9"]);
    }

    #[tokio::test]
    async fn test_actors_view_delegates() {
        // Arrange
        let api = MockApi::default();
        let actors = Actors::new(&api);
        let params = QueryParams::new();

        // Act
        actors.all(&params).await.unwrap();
        actors.one("3311", &params).await.unwrap();
        actors.search("vale", &params).await.unwrap();
        actors.by_letter('v', &params).await.unwrap();
        actors.by_niche("4", &params).await.unwrap();

        // Assert
        assert_eq!(
            api.calls(),
            vec![
                "actors_all",
                "actor:3311",
                "search_actors:vale",
                "actors_by_letter:v",
                "actors_by_niche:4",
            ]
        );
    }
}
