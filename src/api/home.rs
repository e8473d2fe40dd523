use axum::response::Redirect;

use crate::config;

pub async fn home() -> Redirect {
    Redirect::temporary(&config::homepage_url())
}
