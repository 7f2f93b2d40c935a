//! Room handlers
//!
//! Read access to the room inventory plus the staff-only status override.

use crate::dto::{ApiResponse, RoomResponse, RoomStatusRequest};
use crate::extract::RequestActor;
use crate::handlers::ws::WsBroadcaster;
use actix_web::{web, HttpResponse};
use hotel_core::models::RoomStatus;
use hotel_core::traits::Notifier;
use hotel_core::AppError;
use hotel_db::repositories::PgRoomRepository;
use sqlx::PgPool;
use tracing::instrument;

/// List all rooms
///
/// GET /api/v1/rooms
#[instrument(skip(pool))]
pub async fn list_rooms(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let rooms = PgRoomRepository::new(pool.get_ref().clone()).list().await?;
    let response: Vec<RoomResponse> = rooms.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Get a room by id
///
/// GET /api/v1/rooms/{id}
#[instrument(skip(pool))]
pub async fn get_room(
    pool: web::Data<PgPool>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let room = PgRoomRepository::new(pool.get_ref().clone())
        .find_by_id(id)
        .await?
        .ok_or(AppError::RoomNotFound(id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(RoomResponse::from(room))))
}

/// Override a room's status (staff only)
///
/// PUT /api/v1/rooms/{id}/status
#[instrument(skip(pool, broadcaster, actor, body))]
pub async fn update_room_status(
    pool: web::Data<PgPool>,
    broadcaster: web::Data<WsBroadcaster>,
    actor: RequestActor,
    path: web::Path<i32>,
    body: web::Json<RoomStatusRequest>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }

    let status = RoomStatus::from_str(&body.status)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown room status '{}'", body.status)))?;

    let room = PgRoomRepository::new(pool.get_ref().clone())
        .update_status(path.into_inner(), status)
        .await?;

    broadcaster
        .room_updated(room.id, &room.status.to_string())
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(RoomResponse::from(room))))
}

/// Configure room routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rooms")
            .route("", web::get().to(list_rooms))
            .route("/{id}", web::get().to(get_room))
            .route("/{id}/status", web::put().to(update_room_status)),
    );
}
