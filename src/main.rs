//! Hotel Backend Server
//!
//! Reservation backend with per-room concurrency control, dynamic pricing
//! and real-time notifications over WebSocket.

use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpResponse, HttpServer};
use hotel_api::{
    configure_audit, configure_bookings, configure_pricing, configure_rooms, configure_tasks,
    ws_handler, AppPricingEngine, WsBroadcaster,
};
use hotel_core::AppConfig;
use hotel_db::create_pool;
use hotel_db::repositories::{PgPriceHistoryRepository, PgPriceRuleRepository};
use hotel_services::{
    BookingService, HousekeepingService, HttpPricingAdvisor, PricingEngine, RoomLockRegistry,
};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "hotel-backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            // Health check
            .route("/health", web::get().to(health_check))
            // Reservation endpoints
            .configure(configure_bookings)
            // Room inventory endpoints
            .configure(configure_rooms)
            // Pricing endpoints
            .configure(configure_pricing)
            // Housekeeping task endpoints
            .configure(configure_tasks)
            // Audit log endpoints (Admin/Manager only)
            .configure(configure_audit),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "hotel_backend={},hotel_api={},hotel_services={},hotel_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Hotel Backend v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().expect("Failed to load configuration");

    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, Some(config.database.max_connections))
        .await
        .expect("Failed to create database pool");

    // One lock registry for the whole process; every booking mutation
    // funnels through it.
    let locks = Arc::new(RoomLockRegistry::new(Duration::from_secs(
        config.booking.lock_timeout_secs,
    )));

    // WebSocket fan-out doubles as the services' notification sink.
    let broadcaster = Arc::new(WsBroadcaster::default());

    let advisor = HttpPricingAdvisor::new(&config.advisor.url, config.advisor.timeout_ms)
        .expect("Failed to build pricing advisor client");
    let pricing: AppPricingEngine = PricingEngine::new(
        Arc::new(PgPriceRuleRepository::new(pool.clone())),
        Arc::new(PgPriceHistoryRepository::new(pool.clone())),
        Arc::new(advisor),
    );

    let booking_service = BookingService::new(
        pool.clone(),
        locks.clone(),
        broadcaster.clone(),
        config.booking.clone(),
    );
    let housekeeping_service = HousekeepingService::new(pool.clone(), broadcaster.clone());

    let pricing_data = web::Data::new(pricing);
    let booking_data = web::Data::new(booking_service);
    let housekeeping_data = web::Data::new(housekeeping_service);
    let broadcaster_data = web::Data::from(broadcaster);

    // CORS configuration
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let bind_addr = config.server_addr();
    let workers = config.server.workers;
    info!(
        "Starting HTTP server on {} with {} workers",
        bind_addr, workers
    );

    HttpServer::new(move || {
        // Clone cors_origins for each worker
        let cors_origins_inner = cors_origins.clone();
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                let origins: Vec<&str> = cors_origins_inner.split(',').collect();
                if let Ok(origin_str) = origin.to_str() {
                    origins.iter().any(|o| o.trim() == origin_str)
                } else {
                    false
                }
            })
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::ACCEPT,
                header::CONTENT_TYPE,
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(pricing_data.clone())
            .app_data(booking_data.clone())
            .app_data(housekeeping_data.clone())
            .app_data(broadcaster_data.clone())
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                let error_message = err.to_string();
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(serde_json::json!({
                        "error": "invalid_query",
                        "message": error_message
                    })),
                )
                .into()
            }))
            .wrap(cors)
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
            // WebSocket endpoint for real-time updates
            .route("/ws", web::get().to(ws_handler))
            .route(
                "/",
                web::get().to(|| async {
                    HttpResponse::Found()
                        .append_header(("Location", "/api/v1/health"))
                        .finish()
                }),
            )
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await
}
