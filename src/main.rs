mod app;
mod handlers;
mod models;
mod services;
mod store;
mod utils;

use app::config::Config;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use services::{BookingService, StripeGateway};
use std::sync::Arc;
use store::{InMemoryAppointmentStore, InMemoryDoctorDirectory};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    info!(
        "Starting clinic backend on port {} (payments {})",
        config.server_port,
        if config.payments_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );

    let gateway = Arc::new(StripeGateway::new(&config));
    let appointments = Arc::new(InMemoryAppointmentStore::new());
    let doctors = Arc::new(InMemoryDoctorDirectory::new());

    let booking_service = Arc::new(BookingService::new(
        gateway,
        appointments,
        doctors,
        &config,
    ));

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/payment/create-intent", post(handlers::payments::create_intent))
        .route("/payment/verify", post(handlers::payments::verify))
        .route("/payment/config", get(handlers::payments::get_config))
        .route("/appointments/create", post(handlers::appointments::create))
        .route(
            "/appointments/patient/:id",
            get(handlers::appointments::list_for_patient),
        )
        .route("/appointments", get(handlers::appointments::list_all))
        .route(
            "/doctors",
            get(handlers::doctors::list).post(handlers::doctors::register),
        )
        .with_state(booking_service);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn health_handler() -> StatusCode {
    StatusCode::OK
}
