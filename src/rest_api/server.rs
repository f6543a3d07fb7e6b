//! # REST API Routes
//!
//! Maps item operations onto HTTP verbs and paths.
//!
//! | Verb + Path              | Operation |
//! |--------------------------|-----------|
//! | `POST /items`            | create    |
//! | `GET /items`             | list      |
//! | `GET /items/:id`         | get       |
//! | `PUT /items/:id`         | update    |
//! | `PATCH /items/:id/done`  | mark done |
//! | `DELETE /items/:id`      | delete    |

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handler::{
    create_item, delete_item, get_item, list_items, mark_item_done, update_item,
};
use super::state::SharedState;

/// Build the item router
pub fn item_routes(state: SharedState) -> Router {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/", post(create_item).get(list_items))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/:id/done", patch(mark_item_done))
        .with_state(state)
}
