use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

pub const PUBLIC: i32 = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    #[serde(default)]
    pub deck_id: i64,
    pub deck_name: String,
    #[serde(default)]
    pub deck_desc: String,
    #[serde(default)]
    pub genre: String,
    pub owner_id: i64,
    #[serde(default)]
    pub status: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default)]
    pub card_id: i64,
    #[serde(default)]
    pub deck_id: i64,
    pub question: String,
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct History {
    pub score: f64,
    pub correct: Option<u32>,
}

impl History {
    /// 1 red, 2 yellow, 3 green.
    pub fn level(&self) -> i32 {
        if self.score < 50.0 {
            1
        } else if self.score < 80.0 {
            2
        } else {
            3
        }
    }
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub score: f64,
    pub correct: Option<u32>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub users: HashMap<i64, User>,
    pub decks: BTreeMap<i64, Deck>,
    pub cards: BTreeMap<i64, Card>,
    pub history: HashMap<(i64, i64), History>,
    next_deck_id: i64,
    next_card_id: i64,
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Self::default();
        for (id, username) in [(1, "user"), (2, "admin")] {
            store.users.insert(
                id,
                User {
                    id,
                    username: username.to_string(),
                },
            );
        }
        store
    }

    fn next_deck_id(&mut self) -> i64 {
        self.next_deck_id += 1;
        self.next_deck_id
    }

    fn next_card_id(&mut self) -> i64 {
        self.next_card_id += 1;
        self.next_card_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/user/{id}", get(get_user))
        .route("/api/deck", get(list_decks).post(create_deck))
        .route("/api/deck/public", get(list_public_decks))
        .route("/api/deck/myDecks/{id}", get(list_my_decks))
        .route("/api/deck/report/{user_id}", get(study_report))
        .route(
            "/api/deck/{deck_id}",
            get(get_deck).put(update_deck).delete(delete_deck),
        )
        .route("/api/deck/{deck_id}/card", get(list_cards).post(add_card))
        .route(
            "/api/deck/{deck_id}/card/{card_id}",
            put(update_card).delete(delete_card),
        )
        .route(
            "/api/deck/{deck_id}/history/{user_id}",
            get(get_history).put(update_history).post(create_history),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn get_user(State(db): State<Db>, Path(id): Path<i64>) -> Result<Json<User>, StatusCode> {
    let store = db.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_decks(State(db): State<Db>) -> Json<Vec<Deck>> {
    let store = db.read().await;
    Json(store.decks.values().cloned().collect())
}

async fn list_public_decks(State(db): State<Db>) -> Json<Vec<Deck>> {
    let store = db.read().await;
    Json(
        store
            .decks
            .values()
            .filter(|deck| deck.status == PUBLIC)
            .cloned()
            .collect(),
    )
}

async fn list_my_decks(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Deck>> {
    let store = db.read().await;
    Json(
        store
            .decks
            .values()
            .filter(|deck| deck.owner_id == id)
            .cloned()
            .collect(),
    )
}

async fn create_deck(State(db): State<Db>, Json(mut deck): Json<Deck>) -> Json<Deck> {
    let mut store = db.write().await;
    deck.deck_id = store.next_deck_id();
    store.decks.insert(deck.deck_id, deck.clone());
    Json(deck)
}

async fn get_deck(
    State(db): State<Db>,
    Path(deck_id): Path<i64>,
) -> Result<Json<Deck>, StatusCode> {
    let store = db.read().await;
    store.decks.get(&deck_id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_deck(
    State(db): State<Db>,
    Path(deck_id): Path<i64>,
    Json(mut input): Json<Deck>,
) -> Result<Json<Deck>, StatusCode> {
    let mut store = db.write().await;
    let deck = store.decks.get_mut(&deck_id).ok_or(StatusCode::NOT_FOUND)?;
    input.deck_id = deck_id;
    *deck = input;
    Ok(Json(deck.clone()))
}

async fn delete_deck(State(db): State<Db>, Path(deck_id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    if store.decks.remove(&deck_id).is_none() {
        return StatusCode::NOT_FOUND;
    }
    store.cards.retain(|_, card| card.deck_id != deck_id);
    store.history.retain(|(deck, _), _| *deck != deck_id);
    StatusCode::OK
}

async fn list_cards(State(db): State<Db>, Path(deck_id): Path<i64>) -> Json<Vec<Card>> {
    let store = db.read().await;
    Json(
        store
            .cards
            .values()
            .filter(|card| card.deck_id == deck_id)
            .cloned()
            .collect(),
    )
}

async fn add_card(
    State(db): State<Db>,
    Path(deck_id): Path<i64>,
    Json(mut card): Json<Card>,
) -> Result<Json<Card>, StatusCode> {
    let mut store = db.write().await;
    if !store.decks.contains_key(&deck_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    card.card_id = store.next_card_id();
    card.deck_id = deck_id;
    store.cards.insert(card.card_id, card.clone());
    Ok(Json(card))
}

async fn update_card(
    State(db): State<Db>,
    Path((deck_id, card_id)): Path<(i64, i64)>,
    Json(mut input): Json<Card>,
) -> Result<Json<Card>, StatusCode> {
    let mut store = db.write().await;
    let card = store
        .cards
        .get_mut(&card_id)
        .filter(|card| card.deck_id == deck_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    input.card_id = card_id;
    input.deck_id = deck_id;
    *card = input;
    Ok(Json(card.clone()))
}

async fn delete_card(
    State(db): State<Db>,
    Path((deck_id, card_id)): Path<(i64, i64)>,
) -> Json<bool> {
    let mut store = db.write().await;
    let owned = store
        .cards
        .get(&card_id)
        .is_some_and(|card| card.deck_id == deck_id);
    if owned {
        store.cards.remove(&card_id);
    }
    Json(owned)
}

async fn get_history(
    State(db): State<Db>,
    Path((deck_id, user_id)): Path<(i64, i64)>,
) -> Json<i32> {
    let store = db.read().await;
    Json(
        store
            .history
            .get(&(deck_id, user_id))
            .map_or(0, History::level),
    )
}

async fn update_history(
    State(db): State<Db>,
    Path((deck_id, user_id)): Path<(i64, i64)>,
    Query(query): Query<HistoryQuery>,
) -> Json<i32> {
    let mut store = db.write().await;
    let Some(history) = store.history.get_mut(&(deck_id, user_id)) else {
        return Json(0);
    };
    history.score = query.score;
    if query.correct.is_some() {
        history.correct = query.correct;
    }
    Json(1)
}

async fn create_history(
    State(db): State<Db>,
    Path((deck_id, user_id)): Path<(i64, i64)>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<i32>, StatusCode> {
    let mut store = db.write().await;
    if store.history.contains_key(&(deck_id, user_id)) {
        return Err(StatusCode::CONFLICT);
    }
    store.history.insert(
        (deck_id, user_id),
        History {
            score: query.score,
            correct: query.correct,
        },
    );
    Ok(Json(1))
}

async fn study_report(
    State(db): State<Db>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let store = db.read().await;
    if !store.users.contains_key(&user_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut rows: Vec<(i64, &History)> = store
        .history
        .iter()
        .filter(|((_, user), _)| *user == user_id)
        .map(|((deck, _), history)| (*deck, history))
        .collect();
    rows.sort_by_key(|(deck, _)| *deck);
    let report = rows
        .into_iter()
        .map(|(deck_id, history)| {
            let deck_name = store.decks.get(&deck_id).map(|deck| deck.deck_name.clone());
            json!({
                "deckId": deck_id,
                "deckName": deck_name,
                "score": history.score,
                "correct": history.correct,
                "level": history.level(),
            })
        })
        .collect();
    Ok(Json(report))
}
