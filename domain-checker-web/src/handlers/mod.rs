//! HTTP handlers and route registration.

mod check;
mod health;

use actix_web::web;

/// Register every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(check::check_all).service(health::health);
}

#[cfg(test)]
mod tests;
