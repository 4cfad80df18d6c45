use std::future::{ready, Ready};
use std::rc::Rc;

use actix_service::{forward_ready, Service, Transform};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::Error;
use futures::future::LocalBoxFuture;
use tracing_batteries::prelude::*;

/// Wraps every request in a server span carrying its method, target and response status.
pub struct TracingLogger;

impl<S, B> Transform<S, ServiceRequest> for TracingLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TracingLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TracingLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TracingLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TracingLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = tracing::info_span!(
            "http.request",
            otel.kind = "server",
            otel.name = %format!("{} {}", req.method(), req.path()),
            http.method = %req.method(),
            http.target = %req.uri(),
            http.user_agent = req
                .headers()
                .get("User-Agent")
                .and_then(|h| h.to_str().ok())
                .unwrap_or_default(),
            http.status_code = tracing::field::Empty,
        );

        let service = self.service.clone();
        let handled = async move {
            let result = service.call(req).await;

            match &result {
                Ok(response) => {
                    tracing::Span::current()
                        .record("http.status_code", response.status().as_u16());
                }
                Err(err) => {
                    let status = err.as_response_error().status_code();
                    tracing::Span::current().record("http.status_code", status.as_u16());
                    error!("The request failed to be handled: {}", err);
                }
            }

            result
        };

        Box::pin(tracing::Instrument::instrument(handled, span))
    }
}

#[cfg(test)]
mod tests {
    use super::TracingLogger;
    use crate::api::test::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_rt::test]
    async fn passes_responses_through() {
        test_log_init();

        let app = test::init_service(
            App::new()
                .wrap(TracingLogger)
                .route("/", web::get().to(|| async { HttpResponse::Accepted().finish() })),
        )
        .await;

        let req = test::TestRequest::with_uri("/").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), http::StatusCode::ACCEPTED);
    }
}
