extern crate actix_web;
extern crate chrono;
#[macro_use]
extern crate serde;
extern crate serde_json;

use actix_cors::Cors;
use clap::Parser;
use tracing_batteries::{prelude::*, OpenTelemetry, Sentry, Session};

#[macro_use]
mod macros;

#[macro_use]
mod api;
mod config;
mod middleware;
mod models;
mod normalizer;
mod telemetry;
mod upstream;
mod utils;

use actix_web::{App, HttpServer};
use config::{NormalizerConfig, PathExclusions};
use middleware::NormalizeRequests;
use normalizer::TrackingParameterDenylist;
use std::time::Duration;
use telemetry::TracingLogger;
use upstream::Upstream;

/// Redirects visitors to the canonical URL of every page on your site.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The port to listen for incoming requests on.
    #[arg(short, long, default_value_t = 8000, env = "PORT")]
    port: u16,

    /// The origin which renders pages once their URL is canonical.
    ///
    /// When this is not set, canonical requests which do not match one of the built-in
    /// API routes will receive a 404 response.
    #[arg(short, long, env = "UPSTREAM_URL")]
    upstream: Option<String>,

    /// How many seconds the upstream site may take to connect, start responding, or go
    /// quiet while sending a page.
    #[arg(long, env = "UPSTREAM_TIMEOUT", default_value_t = upstream::DEFAULT_TIMEOUT.as_secs())]
    upstream_timeout: u64,

    /// Additional query parameters which should be stripped from page URLs.
    ///
    /// These extend the built-in list of campaign and attribution parameters (`utm_*`,
    /// `fbclid`, `gclid`, `msclkid` and `ref`).
    #[arg(long = "strip-param", env = "STRIP_PARAMS", value_delimiter = ',')]
    strip_params: Vec<String>,

    /// Additional path prefixes which are never redirected (e.g. `/media`).
    #[arg(long = "exclude-prefix", env = "EXCLUDED_PREFIXES", value_delimiter = ',')]
    exclude_prefixes: Vec<String>,

    /// Additional individual files which are never redirected (e.g. `/ads.txt`).
    #[arg(long = "exclude-file", env = "EXCLUDED_FILES", value_delimiter = ',')]
    exclude_files: Vec<String>,

    /// The name of the service which will be reported to OpenTelemetry endpoints.
    #[arg(long, env = "SERVICE_NAME", default_value = "canonical")]
    service_name: String,

    /// The Sentry DSN to use for error reporting.
    #[arg(long, env = "SENTRY_DSN")]
    sentry_dsn: Option<String>,

    /// The environment to report to Sentry.
    #[arg(long, env = "SENTRY_ENVIRONMENT")]
    sentry_environment: Option<String>,
}

impl Args {
    fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig::new(
            TrackingParameterDenylist::default().with(&self.strip_params),
            PathExclusions::default()
                .with_prefixes(&self.exclude_prefixes)
                .with_files(&self.exclude_files),
        )
    }
}

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let config = args.normalizer_config();

    let mut session = Session::new(args.service_name, version!("v"));
    if let Some(dsn) = args.sentry_dsn {
        session = session.with_battery(Sentry::new((
            dsn,
            sentry::ClientOptions {
                environment: args.sentry_environment.map(|v| v.into()),
                ..Default::default()
            },
        )));
    }
    let session = session.with_battery(OpenTelemetry::new(""));

    let upstream = args
        .upstream
        .map(|url| Upstream::new(url, Duration::from_secs(args.upstream_timeout)))
        .transpose()
        .map_err(|e| {
            eprintln!("Failed to configure the upstream site: {e}");
            session.record_error(&e);

            e
        })?;
    let state = models::GlobalState::new(config, upstream);

    info!(
        "Starting server on :{} (stripping {} tracking parameters)",
        args.port,
        state.config.denylist.len()
    );
    let result = HttpServer::new(move || {
        App::new()
            .app_data(actix_web::web::Data::new(state.clone()))
            .wrap(NormalizeRequests::new(state.config.clone()))
            .wrap(TracingLogger)
            .wrap(Cors::default().allow_any_origin().send_wildcard())
            .configure(api::configure)
    })
    .bind(("0.0.0.0", args.port))?
    .run()
    .await
    .map_err(|err| {
        error!("The server exited unexpectedly: {}", err);
        sentry::capture_event(sentry::protocol::Event {
            message: Some(format!("Server Exited Unexpectedly: {}", err)),
            level: sentry::protocol::Level::Fatal,
            ..Default::default()
        });

        err
    });

    session.shutdown();
    result
}
