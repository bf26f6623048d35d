//! Builders for the HTTP state shared by every worker.

use std::sync::Arc;

use actix_web::web;

use backend::domain::ports::UserStore;
use backend::domain::{UserService, WriteMode};
use backend::inbound::http::state::HttpState;

/// Wrap the store in a [`UserService`] and expose it through both ports.
pub(crate) fn build_http_state(
    store: Arc<dyn UserStore>,
    write_mode: WriteMode,
) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(store, write_mode));
    web::Data::new(HttpState::new(service.clone(), service))
}
