//! Client facades for the flashcards deck/card API.
//!
//! # Overview
//! `CardService` and `DeckService` turn each API operation into an
//! `HttpRequest`, hand it to an injected `Transport` and return the
//! transport's pending result untouched. Nothing is retried, cached,
//! validated or reinterpreted on the way through.
//!
//! # Design
//! - Services are stateless: a `base_url`, a transport and (for decks) a
//!   read-only `Session` used to look up the signed-in user.
//! - Every operation has a public `build_*` counterpart, so hosts that run
//!   their own I/O can skip the transport entirely.
//! - `parse_*` helpers decode responses for callers that want typed values;
//!   the services never call them.
//! - `UreqTransport` is the bundled transport; anything implementing
//!   `Transport` works.

pub mod card;
pub mod deck;
pub mod error;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use card::CardService;
pub use deck::DeckService;
pub use error::ApiError;
pub use http::{encode_query, HttpMethod, HttpRequest, HttpResponse, Transport};
pub use session::{Session, SessionStore};
pub use transport::{PendingResponse, TransportError, UreqTransport};
pub use types::{Card, CardId, Deck, DeckId, HistoryParams, StudyReport, User, UserId};
