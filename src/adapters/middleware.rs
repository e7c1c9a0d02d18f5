use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::core::StaticResolver;

/// Middleware that answers requests from the static resolver.
///
/// A 403 or 404 resolution with `handle_errors` disabled means "not handled":
/// the request continues down the chain untouched and the framework may try
/// further routes. Everything else is answered terminally.
pub async fn serve_static(
    req: Request,
    next: Next,
    resolver: Arc<StaticResolver>,
    handle_errors: bool,
) -> Response {
    match resolver.resolve(req.uri()).await {
        Ok(response) => {
            let unhandled = matches!(
                response.status(),
                StatusCode::NOT_FOUND | StatusCode::FORBIDDEN
            );
            if unhandled && !handle_errors {
                return next.run(req).await;
            }
            response.map(Body::from)
        }
        Err(err) => {
            tracing::error!("Static file error: {:?}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Creates a closure for the static file middleware
pub fn create_static_middleware(
    resolver: Arc<StaticResolver>,
    handle_errors: bool,
) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
+ Clone {
    move |req, next| {
        let resolver = resolver.clone();
        Box::pin(async move { serve_static(req, next, resolver, handle_errors).await })
    }
}
