//! Booking handlers
//!
//! HTTP handlers for the reservation endpoints. The final price of a stay is
//! computed server-side: nightly quote from the pricing engine times the
//! number of nights.

use crate::dto::{
    ApiResponse, BookingResponse, CreateBookingRequest, PaginationParams, StatusUpdateRequest,
    UpdateBookingRequest,
};
use crate::extract::RequestActor;
use crate::AppPricingEngine;
use actix_web::{web, HttpResponse};
use hotel_core::models::{BookingStatus, BookingUpdate, NewBooking};
use hotel_core::AppError;
use hotel_db::repositories::PgRoomRepository;
use hotel_services::BookingService;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use validator::Validate;

/// Nights in a stay, minimum one (day-use bookings are billed one night)
fn nights(check_in: chrono::DateTime<chrono::Utc>, check_out: chrono::DateTime<chrono::Utc>) -> i64 {
    (check_out - check_in).num_days().max(1)
}

async fn price_stay(
    pool: &PgPool,
    pricing: &AppPricingEngine,
    room_id: i32,
    check_in: chrono::DateTime<chrono::Utc>,
    check_out: chrono::DateTime<chrono::Utc>,
) -> Result<Decimal, AppError> {
    let room = PgRoomRepository::new(pool.clone())
        .find_by_id(room_id)
        .await?
        .ok_or(AppError::RoomNotFound(room_id))?;

    let quote = pricing.quote(&room.room_type, check_in.date_naive()).await?;
    Ok(quote.price * Decimal::from(nights(check_in, check_out)))
}

/// Create a booking
///
/// POST /api/v1/bookings
#[instrument(skip(service, pricing, pool, actor, body))]
pub async fn create_booking(
    service: web::Data<BookingService>,
    pricing: web::Data<AppPricingEngine>,
    pool: web::Data<PgPool>,
    actor: RequestActor,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if body.check_in >= body.check_out {
        return Err(AppError::InvalidInput(
            "check_in must be before check_out".to_string(),
        ));
    }

    let final_price = price_stay(
        pool.get_ref(),
        pricing.get_ref(),
        body.room_id,
        body.check_in,
        body.check_out,
    )
    .await?;

    let booking = service
        .create_booking(
            NewBooking {
                room_id: body.room_id,
                check_in: body.check_in,
                check_out: body.check_out,
                status: BookingStatus::Pending,
                final_price,
                user_id: None,
            },
            &actor.0,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// List bookings
///
/// GET /api/v1/bookings
#[instrument(skip(service, actor))]
pub async fn list_bookings(
    service: web::Data<BookingService>,
    actor: RequestActor,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }
    query
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    debug!("Listing bookings page={}", query.page);

    let bookings = service.list(query.limit(), query.offset()).await?;
    let response: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// List the calling actor's bookings
///
/// GET /api/v1/bookings/my
#[instrument(skip(service, actor))]
pub async fn list_my_bookings(
    service: web::Data<BookingService>,
    actor: RequestActor,
) -> Result<HttpResponse, AppError> {
    let user_id = actor
        .0
        .id
        .ok_or_else(|| AppError::InvalidInput("No actor identity provided".to_string()))?;

    let bookings = service.list_for_user(user_id).await?;
    let response: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Get a booking by id
///
/// GET /api/v1/bookings/{id}
#[instrument(skip(service))]
pub async fn get_booking(
    service: web::Data<BookingService>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let booking = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Update a booking's stay details
///
/// PUT /api/v1/bookings/{id}
#[instrument(skip(service, pricing, pool, actor, body))]
pub async fn update_booking(
    service: web::Data<BookingService>,
    pricing: web::Data<AppPricingEngine>,
    pool: web::Data<PgPool>,
    actor: RequestActor,
    path: web::Path<i32>,
    body: web::Json<UpdateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    if body.check_in >= body.check_out {
        return Err(AppError::InvalidInput(
            "check_in must be before check_out".to_string(),
        ));
    }

    let final_price = price_stay(
        pool.get_ref(),
        pricing.get_ref(),
        body.room_id,
        body.check_in,
        body.check_out,
    )
    .await?;

    let booking = service
        .update_booking(
            path.into_inner(),
            BookingUpdate {
                room_id: body.room_id,
                check_in: body.check_in,
                check_out: body.check_out,
                final_price,
            },
            &actor.0,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Transition a booking's status
///
/// PUT /api/v1/bookings/{id}/status
#[instrument(skip(service, actor, body))]
pub async fn update_booking_status(
    service: web::Data<BookingService>,
    actor: RequestActor,
    path: web::Path<i32>,
    body: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }

    let status = BookingStatus::from_str(&body.status).ok_or_else(|| {
        AppError::InvalidInput(format!("Unknown booking status '{}'", body.status))
    })?;

    let booking = service
        .update_status(path.into_inner(), status, &actor.0)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Cancel a booking
///
/// POST /api/v1/bookings/{id}/cancel
#[instrument(skip(service, actor))]
pub async fn cancel_booking(
    service: web::Data<BookingService>,
    actor: RequestActor,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let booking = service.cancel_booking(path.into_inner(), &actor.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking cancelled",
    )))
}

/// Confirm payment for a booking
///
/// POST /api/v1/bookings/{id}/confirm-payment
#[instrument(skip(service, actor))]
pub async fn confirm_payment(
    service: web::Data<BookingService>,
    actor: RequestActor,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let booking = service.confirm_payment(path.into_inner(), &actor.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Payment confirmed",
    )))
}

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_bookings))
            .route("/my", web::get().to(list_my_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::put().to(update_booking))
            .route("/{id}/status", web::put().to(update_booking_status))
            .route("/{id}/cancel", web::post().to(cancel_booking))
            .route("/{id}/confirm-payment", web::post().to(confirm_payment)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_nights_rounds_up_day_use() {
        let now = Utc::now();
        assert_eq!(nights(now, now + Duration::hours(6)), 1);
        assert_eq!(nights(now, now + Duration::days(2)), 2);
    }
}
