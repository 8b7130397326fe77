//! Response content-type middleware
//!
//! JSON responses and bodyless responses without a content type are labelled
//! JSON with an explicit UTF-8 charset. Any other declared content type passes
//! through untouched.

use axum::{extract::Request, middleware::Next, response::Response};
use http::{header::CONTENT_TYPE, HeaderValue};

pub const JSON_UTF8: &str = "application/json; charset=UTF-8";

pub async fn json_content_type(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let relabel = match response.headers().get(CONTENT_TYPE) {
        None => true,
        Some(value) => value
            .to_str()
            .is_ok_and(|value| value.starts_with("application/json")),
    };

    if relabel {
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }

    response
}
