use std::net::SocketAddr;

use anyhow::Context as _;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::{
    assemble::params::QueryParams,
    assets::store::AssetStore,
    foundation::error::SpriteError,
    render::pipeline::SpriteGenerator,
    server::cache::{cache_key, etag},
};

/// Defaults merged under the query of `HEAD /api/sprite`.
pub const HEAD_DEFAULTS: [(&str, &str); 3] = [
    ("body", "Body_color_light"),
    ("head", "Human_male_light"),
    ("sex", "male"),
];

const IMMUTABLE: &str = "public, max-age=31536000, immutable";
const NO_STORE: &str = "no-cache, no-store, must-revalidate";

const BODY_COLORS: [&str; 7] = [
    "light", "amber", "olive", "taupe", "bronze", "brown", "black",
];

const HAIR_COLORS: [&str; 15] = [
    "blonde",
    "ash",
    "sandy",
    "platinum",
    "strawberry",
    "redhead",
    "ginger",
    "carrot",
    "chestnut",
    "light_brown",
    "dark_brown",
    "black",
    "raven",
    "dark_gray",
    "gray",
];

const CLOTH_COLORS: [&str; 12] = [
    "black", "blue", "bluegray", "brown", "charcoal", "forest", "gray", "green", "lavender",
    "leather", "maroon", "navy",
];

/// HTTP surface of the generator.
///
/// - `GET /api/sprite?<params>`: PNG sheet with long-lived cache headers
/// - `HEAD /api/sprite?<params>`: cache identity only, honoring `If-None-Match`
/// - `OPTIONS /api/sprite`: CORS preflight
/// - `GET /api/sheet-definitions-simple`: option lists for pickers
pub fn router<S: AssetStore + 'static>(generator: SpriteGenerator<S>) -> Router {
    Router::new()
        .route(
            "/api/sprite",
            get(get_sprite::<S>)
                .head(head_sprite)
                .options(options_sprite),
        )
        .route(
            "/api/sheet-definitions-simple",
            get(sheet_definitions_simple::<S>),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(generator)
}

/// Bind `addr` and serve [`router`] until the process is stopped.
pub async fn serve<S: AssetStore + 'static>(
    generator: SpriteGenerator<S>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router(generator))
        .await
        .context("serve http")?;
    Ok(())
}

async fn get_sprite<S: AssetStore + 'static>(
    State(generator): State<SpriteGenerator<S>>,
    Query(query): Query<Vec<(String, String)>>,
) -> Response {
    let params: QueryParams = query.into_iter().collect();
    let key = cache_key(&params);
    let tag = etag(&key);
    for (name, value) in params.iter() {
        tracing::info!(param = name, value, "sprite parameter");
    }

    match generator.generate(&params).await {
        Ok(png) => (StatusCode::OK, sprite_headers(&key, &tag), png).into_response(),
        Err(err) => generation_failed(&key, &err),
    }
}

// Uncacheable 500 carrying the error text.
fn generation_failed(key: &str, err: &SpriteError) -> Response {
    tracing::error!(cache_key = %key, error = %err, "sprite generation failed");
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_STORE));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    let body = serde_json::json!({
        "error": "Failed to generate sprite",
        "details": err.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, headers, Json(body)).into_response()
}

async fn head_sprite(
    Query(query): Query<Vec<(String, String)>>,
    request_headers: HeaderMap,
) -> Response {
    let params: QueryParams = query.into_iter().collect();
    let params = params.with_defaults(&HEAD_DEFAULTS);
    let key = cache_key(&params);
    let tag = etag(&key);

    let status = match request_headers.get(header::IF_NONE_MATCH) {
        Some(v) if v.as_bytes() == format!("\"{tag}\"").as_bytes() => StatusCode::NOT_MODIFIED,
        _ => StatusCode::OK,
    };
    (status, sprite_headers(&key, &tag)).into_response()
}

async fn options_sprite() -> Response {
    let mut headers = HeaderMap::new();
    insert_cors(&mut headers);
    (StatusCode::OK, headers).into_response()
}

async fn sheet_definitions_simple<S: AssetStore + 'static>(
    State(generator): State<SpriteGenerator<S>>,
) -> Response {
    let hair_styles: Vec<String> = generator
        .catalog()
        .sheets()
        .filter(|d| d.type_name == "hair")
        .map(|d| d.name.replace(' ', "_"))
        .collect();

    let body = serde_json::json!({
        "sex": ["male", "female"],
        "bodyColor": BODY_COLORS,
        "hairStyle": hair_styles,
        "hairColor": HAIR_COLORS,
        "shirtStyle": ["Longsleeve", "Shortsleeve"],
        "shirtColor": CLOTH_COLORS,
        "pantsStyle": ["Pants"],
        "pantsColor": CLOTH_COLORS,
        "shoesStyle": ["Boots", "Shoes"],
        "shoesColor": CLOTH_COLORS,
    });

    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(IMMUTABLE));
    headers.insert(
        header::VARY,
        HeaderValue::from_static("Accept, Accept-Encoding, Accept-Language, Cookie"),
    );
    (StatusCode::OK, headers, Json(body)).into_response()
}

fn sprite_headers(key: &str, tag: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(IMMUTABLE));
    if let Ok(v) = HeaderValue::from_str(&format!("\"{tag}\"")) {
        headers.insert(header::ETAG, v);
    }
    headers.insert(header::VARY, HeaderValue::from_static("Accept"));
    match HeaderValue::from_bytes(key.as_bytes()) {
        Ok(v) => {
            headers.insert("x-cache-key", v);
        }
        Err(_) => tracing::debug!(cache_key = %key, "cache key is not a valid header value"),
    }
    insert_cors(&mut headers);
    headers
}

fn insert_cors(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, HEAD"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("If-None-Match"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/server/routes.rs"]
mod tests;
