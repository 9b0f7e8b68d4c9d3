//! Serves registered static paths: directories via `ServeDir`, files via `ServeFile`.
//!
//! Directory mounts serve files only. A request naming a directory is a 404,
//! never an index page or a redirect.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::app::AppState;
use crate::host::StaticMount;

/// 31 days, for cacheable bindings.
const CACHE_HEADER: &str = "public, max-age=2678400";
const NO_CACHE_HEADER: &str = "no-cache";

/// Router fallback: resolve the request path against the host's bindings.
pub async fn serve_static(State(state): State<AppState>, request: Request<Body>) -> Response {
    let Some((mount, rest)) = state.host.resolve_static(request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    serve_mount(&mount, &rest, request).await
}

async fn serve_mount(mount: &StaticMount, rest: &str, request: Request<Body>) -> Response {
    let binding = &mount.binding;
    let response = if mount.is_dir {
        let Some(uri) = rewrite_uri(request.uri(), rest) else {
            return StatusCode::BAD_REQUEST.into_response();
        };
        let (mut parts, body) = request.into_parts();
        parts.uri = uri;
        let request = Request::from_parts(parts, body);
        let serve_dir =
            ServeDir::new(&binding.source_path).append_index_html_on_directories(false);
        match serve_dir.oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(infallible) => match infallible {},
        }
    } else if rest.is_empty() {
        match ServeFile::new(&binding.source_path).oneshot(request).await {
            Ok(response) => response.map(Body::new),
            Err(infallible) => match infallible {},
        }
    } else {
        return StatusCode::NOT_FOUND.into_response();
    };
    with_cache_header(response, binding.cacheable)
}

/// Request URI relative to the binding root, keeping the query string.
fn rewrite_uri(uri: &Uri, rest: &str) -> Option<Uri> {
    let path = if rest.is_empty() { "/" } else { rest };
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    path_and_query.parse().ok()
}

fn with_cache_header(mut response: Response, cacheable: bool) -> Response {
    let status = response.status();
    if status.is_success() || status == StatusCode::NOT_MODIFIED {
        let value = if cacheable { CACHE_HEADER } else { NO_CACHE_HEADER };
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static(value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_keeps_query_string() {
        let uri: Uri = "/hacsfiles/frontend/entrypoint.js?hacstag=1.9.0".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/entrypoint.js").unwrap();
        assert_eq!(rewritten.path(), "/entrypoint.js");
        assert_eq!(rewritten.query(), Some("hacstag=1.9.0"));
    }

    #[test]
    fn rewrite_of_bare_prefix_is_root() {
        let uri: Uri = "/hacsfiles/frontend".parse().unwrap();
        assert_eq!(rewrite_uri(&uri, "").unwrap().path(), "/");
    }

    #[test]
    fn cache_header_only_on_success() {
        let ok = with_cache_header(StatusCode::OK.into_response(), true);
        assert_eq!(ok.headers()[header::CACHE_CONTROL], CACHE_HEADER);

        let fresh = with_cache_header(StatusCode::OK.into_response(), false);
        assert_eq!(fresh.headers()[header::CACHE_CONTROL], NO_CACHE_HEADER);

        let missing = with_cache_header(StatusCode::NOT_FOUND.into_response(), true);
        assert!(missing.headers().get(header::CACHE_CONTROL).is_none());
    }
}
