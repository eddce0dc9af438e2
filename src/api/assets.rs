use axum::{
    body::Body,
    http::{StatusCode, Uri, header},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web/dist"]
struct Asset;

pub async fn serve_asset(uri: Uri) -> impl IntoResponse {
    let mut path = uri.path().trim_start_matches('/').to_string();

    if path.is_empty() {
        path = "index.html".to_string();
    }

    if let Some(content) = Asset::get(&path) {
        return respond(&path, content);
    }

    // Extensionless page routes map onto their directory index
    let indexed = format!("{}/index.html", path.trim_end_matches('/'));
    if let Some(content) = Asset::get(&indexed) {
        return respond(&indexed, content);
    }

    if let Some(content) = Asset::get("index.html") {
        return respond("index.html", content);
    }

    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

fn respond(path: &str, content: rust_embed::EmbeddedFile) -> axum::response::Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        [(header::CONTENT_TYPE, mime.as_ref())],
        Body::from(content.data),
    )
        .into_response()
}
