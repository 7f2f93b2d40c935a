//! End-to-end booking flow tests
//!
//! These exercise the full lock + transaction path against a real database.
//! Run with:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p hotel-services -- --ignored
//! ```

use chrono::{Duration, Utc};
use hotel_core::config::BookingConfig;
use hotel_core::models::{Actor, BookingStatus, NewBooking, Role, TaskStatus, TaskType};
use hotel_core::traits::NullNotifier;
use hotel_core::AppError;
use hotel_db::repositories::PgTaskRepository;
use hotel_services::{BookingService, RoomLockRegistry};
use rust_decimal_macros::dec;
use sqlx::PgPool;
use std::sync::Arc;

async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPool::connect(&url).await.expect("database connection")
}

async fn seed_room(pool: &PgPool, room_number: &str) -> i32 {
    sqlx::query_scalar(
        r#"
        INSERT INTO rooms (room_number, room_type, base_price, capacity, status)
        VALUES ($1, 'Suite', 450.0, 2, 'Available')
        RETURNING id
        "#,
    )
    .bind(room_number)
    .fetch_one(pool)
    .await
    .expect("seed room")
}

fn service(pool: PgPool) -> BookingService {
    BookingService::new(
        pool,
        Arc::new(RoomLockRegistry::default()),
        Arc::new(NullNotifier),
        BookingConfig::default(),
    )
}

fn receptionist() -> Actor {
    Actor::new(Some(1), "reception", Role::Receptionist)
}

fn stay(from_days: i64, to_days: i64) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let now = Utc::now();
    (now + Duration::days(from_days), now + Duration::days(to_days))
}

fn new_booking(room_id: i32, from_days: i64, to_days: i64) -> NewBooking {
    let (check_in, check_out) = stay(from_days, to_days);
    NewBooking {
        room_id,
        check_in,
        check_out,
        status: BookingStatus::Pending,
        final_price: dec!(540.00),
        user_id: None,
    }
}

#[tokio::test]
#[ignore] // Requires database
async fn test_overlapping_booking_rejected() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-101").await;
    let svc = service(pool);
    let actor = receptionist();

    let first = svc
        .create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("first booking succeeds");
    assert_eq!(first.status, BookingStatus::Pending);
    // ownership follows the calling actor, not the request body
    assert_eq!(first.user_id, Some(1));

    // [11,13) collides with [10,12)
    let err = svc
        .create_booking(new_booking(room_id, 11, 13), &actor)
        .await
        .expect_err("overlapping booking must be rejected");
    assert!(matches!(err, AppError::SchedulingConflict(id) if id == room_id));
}

#[tokio::test]
#[ignore] // Requires database
async fn test_back_to_back_stays_allowed() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-102").await;
    let svc = service(pool);
    let actor = receptionist();

    svc.create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("first booking");

    // checkout day == next check-in day, half-open intervals do not collide
    svc.create_booking(new_booking(room_id, 12, 14), &actor)
        .await
        .expect("back-to-back booking must be allowed");
}

#[tokio::test]
#[ignore] // Requires database
async fn test_checkout_creates_one_cleaning_task() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-103").await;
    let svc = service(pool.clone());
    let actor = receptionist();

    let booking = svc
        .create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("booking");
    svc.update_status(booking.id, BookingStatus::Paid, &actor)
        .await
        .expect("pay");
    svc.update_status(booking.id, BookingStatus::CheckedOut, &actor)
        .await
        .expect("checkout");

    let tasks = PgTaskRepository::new(pool).list().await.expect("list tasks");
    let cleaning: Vec<_> = tasks
        .iter()
        .filter(|t| t.room_id == room_id && t.task_type == TaskType::Cleaning)
        .collect();
    assert_eq!(cleaning.len(), 1, "checkout enqueues exactly one cleaning task");
    assert_eq!(cleaning[0].status, TaskStatus::Pending);
    assert!(cleaning[0].assigned_to_id.is_none());
}

#[tokio::test]
#[ignore] // Requires database
async fn test_terminal_booking_rejects_further_transitions() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-104").await;
    let svc = service(pool);
    let actor = receptionist();

    let booking = svc
        .create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("booking");
    svc.cancel_booking(booking.id, &actor).await.expect("cancel");

    let err = svc
        .cancel_booking(booking.id, &actor)
        .await
        .expect_err("double cancel must be rejected");
    assert!(matches!(err, AppError::InvalidState(_)));

    let err = svc
        .update_status(booking.id, BookingStatus::Paid, &actor)
        .await
        .expect_err("cancelled booking admits no transitions");
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
#[ignore] // Requires database
async fn test_late_cancellation_requires_privilege() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-105").await;
    let svc = service(pool);
    let guest = Actor::new(Some(2), "guest", Role::Guest);
    let manager = Actor::new(Some(3), "manager", Role::Manager);

    // check-in 6 hours out, well inside the 24h window
    let now = Utc::now();
    let booking = svc
        .create_booking(
            NewBooking {
                room_id,
                check_in: now + Duration::hours(6),
                check_out: now + Duration::days(2),
                status: BookingStatus::Pending,
                final_price: dec!(450.00),
                user_id: None,
            },
            &guest,
        )
        .await
        .expect("booking");

    let err = svc
        .cancel_booking(booking.id, &guest)
        .await
        .expect_err("guest cannot cancel inside the window");
    assert!(matches!(err, AppError::InvalidState(_)));

    svc.cancel_booking(booking.id, &manager)
        .await
        .expect("manager bypasses the window");
}

#[tokio::test]
#[ignore] // Requires database
async fn test_cancelled_booking_frees_the_interval() {
    let pool = test_pool().await;
    let room_id = seed_room(&pool, "T-106").await;
    let svc = service(pool);
    let actor = receptionist();

    let booking = svc
        .create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("booking");
    svc.cancel_booking(booking.id, &actor).await.expect("cancel");

    // The same interval is bookable again once the holder is cancelled.
    svc.create_booking(new_booking(room_id, 10, 12), &actor)
        .await
        .expect("rebooking a cancelled interval must succeed");
}
