use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use compact_str::CompactString;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::lookup::{Atlas, CountryView};

pub mod views;

type Shared = State<Arc<Atlas>>;

pub fn router(atlas: Arc<Atlas>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/countries", get(countries))
        .route("/country/{name}", get(country))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
        .with_state(atlas)
}

async fn index(State(atlas): Shared) -> Html<String> {
    Html(views::listing(&atlas.listing_view()))
}

async fn countries(State(atlas): Shared) -> Json<Vec<CompactString>> {
    Json(atlas.list_names())
}

async fn country(State(atlas): Shared, Path(name): Path<String>) -> Response {
    match atlas.country_detail(&name) {
        CountryView::Detail(detail) => Html(views::detail(&detail)).into_response(),
        CountryView::NotFound(not_found) => {
            (StatusCode::NOT_FOUND, Html(views::error(&not_found))).into_response()
        }
    }
}
