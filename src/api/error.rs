use actix_http::body::BoxBody;
use actix_web::{HttpResponse, error, http::StatusCode};
use std::fmt;
use tracing_batteries::prelude::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct APIError {
    pub code: u16,
    pub error: String,
    pub message: String,
}

impl APIError {
    pub fn new(code: u16, error: &str, message: &str) -> Self {
        Self {
            code,
            error: error.to_string(),
            message: message.to_string(),
        }
    }
}

impl error::ResponseError for APIError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code())
            .content_type("application/json; charset=utf-8")
            .json(self)
    }

    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HTTP {} {}] {}", self.code, self.error, self.message)
    }
}

impl From<reqwest::Error> for APIError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            error!({ exception.message = %err }, "The upstream site took too long to respond");

            return Self::new(
                504,
                "Gateway Timeout",
                "The site took too long to respond, please try again later.",
            );
        }

        error!({ exception.message = %err }, "We were unable to reach the upstream site");

        sentry::capture_error(&err);

        Self::new(
            502,
            "Bad Gateway",
            "We were unable to load this page from the site, please try again later.",
        )
    }
}
