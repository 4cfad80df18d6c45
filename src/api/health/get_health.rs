use crate::api::APIError;
use crate::models::*;
use actix_web::{get, web};
use tracing_batteries::prelude::*;

#[tracing::instrument(err, skip(state), fields(otel.kind = "internal"))]
#[get("/api/v1/health")]
pub async fn get_health_v1(state: web::Data<GlobalState>) -> Result<HealthV1, APIError> {
    Ok(Health {
        ok: true,
        started_at: state.started_at,
    }
    .into())
}
