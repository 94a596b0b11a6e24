//! Card endpoints, all nested under a parent deck.
//!
//! # Design
//! `CardService` holds only a `base_url` and a transport. Each operation is a
//! `build_*` method producing an `HttpRequest` plus a thin call that hands the
//! request to the transport and returns its pending value untouched. The
//! `parse_*` helpers are opt-in for callers that want typed bodies after
//! awaiting.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{decode_json, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{Card, CardId, DeckId};

/// Stateless client for the card endpoints of a deck.
///
/// Each call builds an `HttpRequest`, hands it to the transport and returns
/// the transport's pending value as is. Nothing is awaited or inspected.
#[derive(Debug, Clone)]
pub struct CardService<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> CardService<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn get_all_cards(&self, deck_id: DeckId) -> T::Pending {
        self.dispatch(self.build_get_all_cards(deck_id))
    }

    /// Addressed by `card.deck_id`.
    pub fn add_card(&self, card: &Card) -> Result<T::Pending, ApiError> {
        Ok(self.dispatch(self.build_add_card(card)?))
    }

    /// Addressed by `card.deck_id` and `card.card_id`.
    pub fn update_card(&self, card: &Card) -> Result<T::Pending, ApiError> {
        Ok(self.dispatch(self.build_update_card(card)?))
    }

    pub fn delete_card(&self, deck_id: DeckId, card_id: CardId) -> T::Pending {
        self.dispatch(self.build_delete_card(deck_id, card_id))
    }

    fn dispatch(&self, request: HttpRequest) -> T::Pending {
        debug!(method = %request.method, path = %request.path, "sending card request");
        self.transport.send(request)
    }
}

impl<T> CardService<T> {
    pub fn build_get_all_cards(&self, deck_id: DeckId) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, format!("{}/api/deck/{deck_id}/card", self.base_url))
    }

    pub fn build_add_card(&self, card: &Card) -> Result<HttpRequest, ApiError> {
        HttpRequest::with_json(
            HttpMethod::Post,
            format!("{}/api/deck/{}/card", self.base_url, card.deck_id),
            card,
        )
    }

    pub fn build_update_card(&self, card: &Card) -> Result<HttpRequest, ApiError> {
        HttpRequest::with_json(
            HttpMethod::Put,
            format!("{}/api/deck/{}/card/{}", self.base_url, card.deck_id, card.card_id),
            card,
        )
    }

    pub fn build_delete_card(&self, deck_id: DeckId, card_id: CardId) -> HttpRequest {
        HttpRequest::new(
            HttpMethod::Delete,
            format!("{}/api/deck/{deck_id}/card/{card_id}", self.base_url),
        )
    }

    pub fn parse_all_cards(&self, response: &HttpResponse) -> Result<Vec<Card>, ApiError> {
        decode_json(response)
    }

    /// Parses the body of an add or update response.
    pub fn parse_card(&self, response: &HttpResponse) -> Result<Card, ApiError> {
        decode_json(response)
    }

    /// `true` when the server removed the card.
    pub fn parse_delete_card(&self, response: &HttpResponse) -> Result<bool, ApiError> {
        decode_json(response)
    }
}
