//! HTTP handlers for the gateway's JSON routes.

pub mod frontend;

pub async fn health() -> &'static str {
    "OK"
}
