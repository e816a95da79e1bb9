use axum::{
    routing::{get, post},
    Router,
};

use crate::app::AppState;
use crate::handler::copy_rates::copy_rates_batch;
use crate::handler::rates::{get_rate, get_rates_batch};
use crate::handler::room_types::list_room_types;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/room-types", get(list_room_types))
        .route("/rates", get(get_rate))
        .route("/rates-batch", get(get_rates_batch))
        .route("/copy-rates-batch", post(copy_rates_batch))
}
