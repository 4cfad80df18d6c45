use std::time::Duration;

use actix_web::{web, HttpRequest, HttpResponse};
use http::StatusCode;
use reqwest::{redirect, Client, Method, Url};
use tracing_batteries::prelude::*;

use crate::api::APIError;

/// Headers which describe a single connection and must not be forwarded.
static HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "host",
    "content-length",
    "accept-encoding",
];

/// How long the origin may take to accept a connection, send its response headers, or go
/// quiet between chunks of the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// The origin which renders the site once a request is known to be canonical.
#[derive(Clone)]
pub struct Upstream {
    base: Url,
    client: Client,
    timeout: Duration,
}

impl Upstream {
    pub fn new<U: AsRef<str>>(base: U, timeout: Duration) -> Result<Self, std::io::Error> {
        let base = Url::parse(base.as_ref())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("the upstream URL '{base}' must use http or https"),
            ));
        }

        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(std::io::Error::other)?;

        Ok(Self {
            base,
            client,
            timeout,
        })
    }

    pub fn url_for(&self, path: &str, query: &str) -> Url {
        let mut url = self.base.clone();
        let base_path = self.base.path().trim_end_matches('/');
        url.set_path(&format!("{base_path}{path}"));
        url.set_query(if query.is_empty() { None } else { Some(query) });
        url
    }

    #[tracing::instrument(err, skip(self, req, body), fields(otel.kind = "client", http.url))]
    pub async fn forward(
        &self,
        req: &HttpRequest,
        body: web::Bytes,
    ) -> Result<HttpResponse, APIError> {
        let url = self.url_for(req.path(), req.query_string());
        tracing::Span::current().record("http.url", url.as_str());

        let method = Method::from_bytes(req.method().as_str().as_bytes()).map_err(|_| {
            APIError::new(
                405,
                "Method Not Allowed",
                "The request method is not supported by this service.",
            )
        })?;

        let mut request = self.client.request(method, url).body(body);
        for (name, value) in req.headers() {
            if !is_hop_by_hop(name.as_str()) {
                request = request.header(name.as_str(), value.as_bytes());
            }
        }

        let response = actix_rt::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| {
                error!("The upstream site did not respond within {:?}", self.timeout);
                APIError::new(
                    504,
                    "Gateway Timeout",
                    "The site took too long to respond, please try again later.",
                )
            })??;
        let status = StatusCode::from_u16(response.status().as_u16())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        let mut builder = HttpResponse::build(status);
        for (name, value) in response.headers() {
            if !is_hop_by_hop(name.as_str()) {
                builder.append_header((name.as_str(), value.as_bytes()));
            }
        }

        debug!("Upstream responded with {} for {}", status, req.uri());

        Ok(builder.streaming(response.bytes_stream()))
    }
}
