//! `GET /check/all`: registration and certificate check for one URL or host.

use actix_web::{HttpRequest, HttpResponse, get, web};
use domain_checker_core::{CombinedResult, DomainChecker};
use serde::Deserialize;
use tracing::{error, info, warn};
use tracing_attributes::instrument;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub url: Option<String>,
}

#[get("/check/all")]
pub async fn check_all(
    req: HttpRequest,
    query: Option<web::Query<CheckQuery>>,
    checker: web::Data<DomainChecker>,
) -> Result<HttpResponse, ApiError> {
    let input = query
        .and_then(|q| q.into_inner().url)
        .unwrap_or_default();
    let client = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string();

    let result = run_check(&checker, &input, &client).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[instrument(name = "check_all", skip(checker), fields(request_id = %Uuid::new_v4()))]
async fn run_check(
    checker: &DomainChecker,
    input: &str,
    client: &str,
) -> Result<CombinedResult, ApiError> {
    if input.trim().is_empty() {
        warn!("Missing url parameter");
        return Err(ApiError::MissingUrl);
    }

    let result = checker.check(input).await.map_err(|e| {
        let api = ApiError::from(e);
        match &api {
            ApiError::Internal(detail) => error!("Check failed: {detail}"),
            _ => warn!("Rejected request: {api}"),
        }
        api
    })?;

    info!(
        domain = %result.domain,
        whois_ok = result.registration.is_data(),
        ssl_ok = result.certificate.is_data(),
        "Completed check"
    );
    Ok(result)
}
