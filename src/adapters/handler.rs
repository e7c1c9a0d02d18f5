use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::Service;

use crate::core::StaticResolver;

/// Standalone request handler around a shared resolver.
///
/// Implements `tower::Service`, so it plugs into an axum router via
/// `fallback_service`/`nest_service` or stands alone as the only handler.
/// Unlike the middleware adapter it always answers, 403 and 404 included.
#[derive(Clone)]
pub struct StaticHandler {
    resolver: Arc<StaticResolver>,
}

impl StaticHandler {
    pub fn new(resolver: Arc<StaticResolver>) -> Self {
        Self { resolver }
    }
}

impl<ReqBody> Service<Request<ReqBody>> for StaticHandler
where
    ReqBody: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let resolver = self.resolver.clone();
        let uri = req.uri().clone();

        Box::pin(async move {
            let response = match resolver.resolve(&uri).await {
                Ok(response) => response.map(Body::from),
                Err(err) => {
                    tracing::error!("Static file error: {:?}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
                }
            };
            Ok(response)
        })
    }
}
