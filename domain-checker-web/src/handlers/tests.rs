//! Tests for the check and health handlers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use domain_checker_core::{
    CertificateInfo, CertificateInspector, CheckerError, CheckerResult, DomainChecker,
    RegistrationInfo, RegistrationInspector,
};
use serde_json::{Value, json};

use super::configure;

#[derive(Default)]
struct CallCounter(AtomicUsize);

impl CallCounter {
    fn hit(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

struct FixtureCertificates {
    result: CheckerResult<CertificateInfo>,
    calls: CallCounter,
}

#[async_trait]
impl CertificateInspector for FixtureCertificates {
    async fn inspect(&self, _domain: &str) -> CheckerResult<CertificateInfo> {
        self.calls.hit();
        self.result.clone()
    }
}

struct FixtureRegistrations {
    result: CheckerResult<RegistrationInfo>,
    calls: CallCounter,
}

#[async_trait]
impl RegistrationInspector for FixtureRegistrations {
    async fn inspect(&self, _domain: &str) -> CheckerResult<RegistrationInfo> {
        self.calls.hit();
        self.result.clone()
    }
}

struct Fixture {
    certificates: Arc<FixtureCertificates>,
    registrations: Arc<FixtureRegistrations>,
}

impl Fixture {
    fn new(
        certificate: CheckerResult<CertificateInfo>,
        registration: CheckerResult<RegistrationInfo>,
    ) -> Self {
        Self {
            certificates: Arc::new(FixtureCertificates {
                result: certificate,
                calls: CallCounter::default(),
            }),
            registrations: Arc::new(FixtureRegistrations {
                result: registration,
                calls: CallCounter::default(),
            }),
        }
    }

    fn checker(&self) -> DomainChecker {
        DomainChecker::new(self.certificates.clone(), self.registrations.clone())
    }

    fn calls(&self) -> (usize, usize) {
        (
            self.certificates.calls.count(),
            self.registrations.calls.count(),
        )
    }
}

fn digicert() -> CertificateInfo {
    CertificateInfo::from_names(
        Some("DigiCert"),
        Some("example.com"),
        Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
    )
}

fn registered() -> RegistrationInfo {
    RegistrationInfo {
        created_date: Some("1995-08-14T04:00:00Z".to_string()),
        expiration_date: Some("2030-08-13T04:00:00Z".to_string()),
        registrar: Some("Example Registrar Inc.".to_string()),
        ..Default::default()
    }
}

async fn get_json(fixture: &Fixture, uri: &str) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(fixture.checker()))
            .configure(configure),
    )
    .await;

    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("json body");
    (status, value)
}

#[actix_web::test]
async fn missing_url_is_bad_request_without_lookups() {
    let fixture = Fixture::new(Ok(digicert()), Ok(registered()));

    let (status, body) = get_json(&fixture, "/check/all").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "url parameter is required" }));
    assert_eq!(fixture.calls(), (0, 0));
}

#[actix_web::test]
async fn empty_url_is_bad_request_without_lookups() {
    let fixture = Fixture::new(Ok(digicert()), Ok(registered()));

    let (status, body) = get_json(&fixture, "/check/all?url=").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "url parameter is required" }));
    assert_eq!(fixture.calls(), (0, 0));
}

#[actix_web::test]
async fn malformed_url_is_bad_request_without_lookups() {
    let fixture = Fixture::new(Ok(digicert()), Ok(registered()));

    let (status, body) =
        get_json(&fixture, "/check/all?url=https%3A%2F%2Fexample.com%2F%25zz").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid URL format" }));
    assert_eq!(fixture.calls(), (0, 0));
}

#[actix_web::test]
async fn successful_checks_render_data() {
    let fixture = Fixture::new(Ok(digicert()), Ok(registered()));

    let (status, body) =
        get_json(&fixture, "/check/all?url=https%3A%2F%2Fwww.example.com%2Fa").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "domain": "example.com",
            "whois": {
                "data": {
                    "created_date": "1995-08-14T04:00:00Z",
                    "expiration_date": "2030-08-13T04:00:00Z",
                    "registrar": "Example Registrar Inc."
                }
            },
            "ssl": {
                "data": {
                    "issuer": "DigiCert",
                    "expiry": "2030-01-01T00:00:00Z",
                    "is_self_signed": false
                }
            }
        })
    );
    assert_eq!(fixture.calls(), (1, 1));
}

#[actix_web::test]
async fn whois_failure_still_returns_ok_with_ssl_data() {
    let fixture = Fixture::new(Ok(digicert()), Err(CheckerError::DomainNotRegistered));

    let (status, body) = get_json(&fixture, "/check/all?url=example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "example.com");
    assert_eq!(
        body["whois"],
        json!({ "error": "domain not found or not registered" })
    );
    assert_eq!(body["ssl"]["data"]["issuer"], "DigiCert");
    assert!(body["ssl"].get("error").is_none());
}

#[actix_web::test]
async fn both_failures_still_return_ok() {
    let fixture = Fixture::new(
        Err(CheckerError::HandshakeFailed("invalid peer certificate: Expired".to_string())),
        Err(CheckerError::WhoisQueryFailed("connection refused".to_string())),
    );

    let (status, body) = get_json(&fixture, "/check/all?url=www.example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "example.com");
    assert_eq!(
        body["ssl"],
        json!({ "error": "TLS handshake failed: invalid peer certificate: Expired" })
    );
    assert_eq!(
        body["whois"],
        json!({ "error": "WHOIS query failed: connection refused" })
    );
}

#[actix_web::test]
async fn health_reports_ok() {
    let fixture = Fixture::new(Ok(digicert()), Ok(registered()));

    let (status, body) = get_json(&fixture, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
