//! Domain DTOs for the flashcards API.
//!
//! # Design
//! These mirror the remote API's JSON (camelCase field names) and carry no
//! validation; correctness is the server's job. Server-assigned ids default
//! to 0 so new decks and cards can be sent before they have one.

use serde::{Deserialize, Serialize};

pub type DeckId = i64;
pub type CardId = i64;
pub type UserId = i64;

/// A named collection of cards owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default)]
    pub deck_id: DeckId,
    pub deck_name: String,
    #[serde(default)]
    pub deck_desc: String,
    #[serde(default)]
    pub genre: String,
    pub owner_id: UserId,
    #[serde(default)]
    pub status: i32,
}

impl Deck {
    pub const PRIVATE: i32 = 1;
    pub const UNLISTED: i32 = 2;
    pub const PUBLIC: i32 = 3;
}

/// A single flashcard belonging to exactly one deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub card_id: CardId,
    pub deck_id: DeckId,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// Query parameters for writing a study-history record.
///
/// `score` is a percentage. `correct` is left out of the encoded query
/// entirely when `None`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoryParams {
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<u32>,
}

impl HistoryParams {
    pub fn new(score: f64, correct: Option<u32>) -> Self {
        Self { score, correct }
    }
}

/// Aggregate study report rows. The row shape belongs to the server.
pub type StudyReport = Vec<serde_json::Map<String, serde_json::Value>>;
