use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::assets::StaticAssets;

const INDEX_PAGE: &str = "static/index.html";

/// Serve the embedded landing page
pub async fn index() -> impl IntoResponse {
    match StaticAssets::get_asset(INDEX_PAGE) {
        Some(file) => {
            let content = String::from_utf8_lossy(&file.data);
            Html(content.into_owned()).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Html(format!("<h1>404 Not Found</h1><p>Page not found: {}</p>", INDEX_PAGE)),
        )
            .into_response(),
    }
}
