use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod duel;
pub mod health;
pub mod history;
pub mod list;
pub mod recommend;
pub mod session;
pub mod trivia;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(session::router())
        .merge(list::router())
        .merge(duel::router())
        .merge(trivia::router())
        .merge(recommend::router())
        .merge(history::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
