//! Deck endpoints, owner lookup, study history and study reports.
//!
//! History calls are scoped to the signed-in user: the user id is read from
//! the injected `Session` at call time, never passed in by the caller.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{
    check_status, decode_json, encode_query, HttpMethod, HttpRequest, HttpResponse, Transport,
};
use crate::session::Session;
use crate::types::{Deck, DeckId, HistoryParams, StudyReport, User, UserId};

/// Stateless client for decks, study history and study reports.
///
/// Works like `CardService`; calls scoped to the signed-in user also read the
/// injected `Session` and fail with `ApiError::NoSession` when it is empty.
#[derive(Debug, Clone)]
pub struct DeckService<T, S> {
    base_url: String,
    transport: T,
    session: S,
}

impl<T: Transport, S: Session> DeckService<T, S> {
    pub fn new(base_url: &str, transport: T, session: S) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn get_owner_username(&self, id: UserId) -> T::Pending {
        self.dispatch(self.build_get_owner_username(id))
    }

    pub fn create_deck(&self, deck: &Deck) -> Result<T::Pending, ApiError> {
        Ok(self.dispatch(self.build_create_deck(deck)?))
    }

    /// Public decks only.
    pub fn get_all_decks(&self) -> T::Pending {
        self.dispatch(self.build_get_all_decks())
    }

    pub fn get_deck_by_deck_id(&self, deck_id: DeckId) -> T::Pending {
        self.dispatch(self.build_get_deck_by_deck_id(deck_id))
    }

    /// Addressed by `deck.deck_id`.
    pub fn update_deck(&self, deck: &Deck) -> Result<T::Pending, ApiError> {
        Ok(self.dispatch(self.build_update_deck(deck)?))
    }

    pub fn delete_deck(&self, id: DeckId) -> T::Pending {
        self.dispatch(self.build_delete_deck(id))
    }

    pub fn get_my_decks(&self, id: UserId) -> T::Pending {
        self.dispatch(self.build_get_my_decks(id))
    }

    /// The server answers with 0 when there is no history, otherwise its
    /// own classification of the latest score.
    pub fn get_history_user_deck(&self, deck_id: DeckId) -> Result<T::Pending, ApiError> {
        let user_id = self.current_user()?;
        Ok(self.dispatch(self.build_get_history_user_deck(deck_id, user_id)))
    }

    pub fn update_user_deck_history(
        &self,
        deck_id: DeckId,
        score: f64,
        correct: Option<u32>,
    ) -> Result<T::Pending, ApiError> {
        let user_id = self.current_user()?;
        let request = self.build_update_user_deck_history(
            deck_id,
            user_id,
            &HistoryParams::new(score, correct),
        )?;
        Ok(self.dispatch(request))
    }

    pub fn create_user_deck_history(
        &self,
        deck_id: DeckId,
        score: f64,
        correct: Option<u32>,
    ) -> Result<T::Pending, ApiError> {
        let user_id = self.current_user()?;
        let request = self.build_create_user_deck_history(
            deck_id,
            user_id,
            &HistoryParams::new(score, correct),
        )?;
        Ok(self.dispatch(request))
    }

    pub fn get_user_study_report(&self, user_id: UserId) -> T::Pending {
        self.dispatch(self.build_get_user_study_report(user_id))
    }

    fn current_user(&self) -> Result<UserId, ApiError> {
        self.session.current_user_id().ok_or(ApiError::NoSession)
    }

    fn dispatch(&self, request: HttpRequest) -> T::Pending {
        debug!(method = %request.method, path = %request.path, "sending deck request");
        self.transport.send(request)
    }
}

impl<T, S> DeckService<T, S> {
    pub fn build_get_owner_username(&self, id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/user/{id}", self.base_url))
    }

    pub fn build_create_deck(&self, deck: &Deck) -> Result<HttpRequest, ApiError> {
        HttpRequest::with_json(HttpMethod::Post, format!("{}/api/deck", self.base_url), deck)
    }

    pub fn build_get_all_decks(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/deck/public", self.base_url))
    }

    pub fn build_get_deck_by_deck_id(&self, deck_id: DeckId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/deck/{deck_id}", self.base_url))
    }

    pub fn build_update_deck(&self, deck: &Deck) -> Result<HttpRequest, ApiError> {
        HttpRequest::with_json(
            HttpMethod::Put,
            format!("{}/api/deck/{}", self.base_url, deck.deck_id),
            deck,
        )
    }

    pub fn build_delete_deck(&self, id: DeckId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, format!("{}/api/deck/{id}", self.base_url))
    }

    pub fn build_get_my_decks(&self, id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/deck/myDecks/{id}", self.base_url))
    }

    pub fn build_get_history_user_deck(&self, deck_id: DeckId, user_id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.history_path(deck_id, user_id))
    }

    pub fn build_update_user_deck_history(
        &self,
        deck_id: DeckId,
        user_id: UserId,
        params: &HistoryParams,
    ) -> Result<HttpRequest, ApiError> {
        self.build_history_write(HttpMethod::Put, deck_id, user_id, params)
    }

    pub fn build_create_user_deck_history(
        &self,
        deck_id: DeckId,
        user_id: UserId,
        params: &HistoryParams,
    ) -> Result<HttpRequest, ApiError> {
        self.build_history_write(HttpMethod::Post, deck_id, user_id, params)
    }

    pub fn build_get_user_study_report(&self, user_id: UserId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/deck/report/{user_id}", self.base_url))
    }

    // Both history writers go through here so their parameters cannot drift.
    fn build_history_write(
        &self,
        method: HttpMethod,
        deck_id: DeckId,
        user_id: UserId,
        params: &HistoryParams,
    ) -> Result<HttpRequest, ApiError> {
        let path = self.history_path(deck_id, user_id);
        let mut request = HttpRequest::with_json(method, path, &serde_json::json!({}))?;
        request.query = encode_query(params)?;
        Ok(request)
    }

    fn history_path(&self, deck_id: DeckId, user_id: UserId) -> String {
        format!("{}/api/deck/{deck_id}/history/{user_id}", self.base_url)
    }

    pub fn parse_user(&self, response: &HttpResponse) -> Result<User, ApiError> {
        decode_json(response)
    }

    /// Parses a single deck from a create, get or update response.
    pub fn parse_deck(&self, response: &HttpResponse) -> Result<Deck, ApiError> {
        decode_json(response)
    }

    pub fn parse_decks(&self, response: &HttpResponse) -> Result<Vec<Deck>, ApiError> {
        decode_json(response)
    }

    pub fn parse_delete_deck(&self, response: &HttpResponse) -> Result<(), ApiError> {
        check_status(response, 200)
    }

    /// Raw history value; 0 means no record.
    pub fn parse_history(&self, response: &HttpResponse) -> Result<i32, ApiError> {
        decode_json(response)
    }

    /// Number of history rows the write touched.
    pub fn parse_history_write(&self, response: &HttpResponse) -> Result<i32, ApiError> {
        decode_json(response)
    }

    pub fn parse_study_report(&self, response: &HttpResponse) -> Result<StudyReport, ApiError> {
        decode_json(response)
    }
}
