use axum::http::header;
use axum::response::IntoResponse;

const INDEX_CSS: &str = include_str!("../../frontend/index.css");

pub async fn indexcss() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        INDEX_CSS,
    )
}
