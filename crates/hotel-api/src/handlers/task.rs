//! Staff task handlers

use crate::dto::{ApiResponse, CreateTaskRequest, TaskResponse, TaskStatusRequest};
use crate::extract::RequestActor;
use actix_web::{web, HttpResponse};
use hotel_core::models::{NewStaffTask, TaskStatus, TaskType};
use hotel_core::AppError;
use hotel_services::HousekeepingService;
use tracing::instrument;
use validator::Validate;

/// List staff tasks
///
/// GET /api/v1/tasks
#[instrument(skip(service, actor))]
pub async fn list_tasks(
    service: web::Data<HousekeepingService>,
    actor: RequestActor,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }

    let tasks = service.list().await?;
    let response: Vec<TaskResponse> = tasks.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Get a task by id
///
/// GET /api/v1/tasks/{id}
#[instrument(skip(service, actor))]
pub async fn get_task(
    service: web::Data<HousekeepingService>,
    actor: RequestActor,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }

    let task = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(TaskResponse::from(task))))
}

/// Create a staff task
///
/// POST /api/v1/tasks
#[instrument(skip(service, actor, body))]
pub async fn create_task(
    service: web::Data<HousekeepingService>,
    actor: RequestActor,
    body: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task_type = TaskType::from_str(&body.task_type).ok_or_else(|| {
        AppError::InvalidInput(format!("Unknown task type '{}'", body.task_type))
    })?;

    let body = body.into_inner();
    let task = service
        .create_task(
            NewStaffTask {
                title: body.title,
                description: body.description,
                room_id: body.room_id,
                status: TaskStatus::Pending,
                task_type,
                assigned_to_id: body.assigned_to_id,
            },
            &actor.0,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(TaskResponse::from(task))))
}

/// Move a task through its lifecycle
///
/// PUT /api/v1/tasks/{id}/status
#[instrument(skip(service, actor, body))]
pub async fn update_task_status(
    service: web::Data<HousekeepingService>,
    actor: RequestActor,
    path: web::Path<i32>,
    body: web::Json<TaskStatusRequest>,
) -> Result<HttpResponse, AppError> {
    if !actor.0.is_staff() {
        return Err(AppError::Forbidden);
    }

    let status = TaskStatus::from_str(&body.status)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown task status '{}'", body.status)))?;

    let task = service
        .update_status(path.into_inner(), status, &actor.0)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(TaskResponse::from(task))))
}

/// Configure task routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .route("", web::get().to(list_tasks))
            .route("", web::post().to(create_task))
            .route("/{id}", web::get().to(get_task))
            .route("/{id}/status", web::put().to(update_task_status)),
    );
}
