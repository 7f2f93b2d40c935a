//! Staff task DTOs

use chrono::{DateTime, Utc};
use hotel_core::models::StaffTask;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for creating a staff task
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 1))]
    pub room_id: i32,

    /// "Cleaning" or "Maintenance"
    pub task_type: String,

    pub assigned_to_id: Option<i32>,
}

/// Request body for a task status change
#[derive(Debug, Deserialize)]
pub struct TaskStatusRequest {
    /// Target status, e.g. "Completed"
    pub status: String,
}

/// Staff task response DTO
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub room_id: i32,
    pub status: String,
    pub task_type: String,
    pub assigned_to_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<StaffTask> for TaskResponse {
    fn from(task: StaffTask) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            room_id: task.room_id,
            status: task.status.to_string(),
            task_type: task.task_type.to_string(),
            assigned_to_id: task.assigned_to_id,
            created_at: task.created_at,
        }
    }
}
