use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::AppError;

use super::AuthGate;

/// Axum middleware enforcing the authentication gate on protected routes.
///
/// The credential comes from the `Authorization: Bearer <token>` header, or,
/// for contexts where headers cannot be set (inline resource fetches), from
/// a `token` query parameter. The resolved [`super::AuthUser`] is attached to
/// the request extensions for handlers to read.
pub async fn auth_middleware(
    State(gate): State<AuthGate>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(t) => t,
        None => {
            return AppError::Unauthorized("authorization token missing".to_string())
                .into_response();
        }
    };

    match gate.authenticate(&token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

fn bearer_token(request: &Request<Body>) -> Option<String> {
    if let Some(value) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let query = request.uri().query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}
