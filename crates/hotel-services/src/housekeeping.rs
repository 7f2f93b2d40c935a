//! Housekeeping task lifecycle
//!
//! Staff tasks move Pending -> InProgress -> Completed. Completing a
//! cleaning task returns the room to the Available pool; other task types
//! leave the room status alone.

use hotel_core::models::{
    Actor, AuditLog, NewStaffTask, RoomStatus, StaffTask, TaskStatus, TaskType,
};
use hotel_core::traits::Notifier;
use hotel_core::{AppError, AppResult};
use hotel_db::repositories::{PgRoomRepository, PgTaskRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

/// Housekeeping and maintenance task service
pub struct HousekeepingService {
    pool: PgPool,
    tasks: PgTaskRepository,
    rooms: PgRoomRepository,
    notifier: Arc<dyn Notifier>,
}

impl HousekeepingService {
    pub fn new(pool: PgPool, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            tasks: PgTaskRepository::new(pool.clone()),
            rooms: PgRoomRepository::new(pool.clone()),
            pool,
            notifier,
        }
    }

    /// Fetch a task by id
    pub async fn get(&self, id: i32) -> AppResult<StaffTask> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(AppError::TaskNotFound(id))
    }

    /// List tasks, newest first
    pub async fn list(&self) -> AppResult<Vec<StaffTask>> {
        self.tasks.list().await
    }

    /// Create a task manually (checkout cleaning tasks are created by the
    /// booking transition instead)
    #[instrument(skip(self, actor, task))]
    pub async fn create_task(&self, task: NewStaffTask, actor: &Actor) -> AppResult<StaffTask> {
        self.rooms
            .find_by_id(task.room_id)
            .await?
            .ok_or(AppError::RoomNotFound(task.room_id))?;

        let created = self.tasks.create(&task).await?;

        info!("Created task {} for room {}", created.id, created.room_id);

        AuditLog::builder()
            .action("TASK_CREATE")
            .performed_by(&actor.name)
            .details(format!("{} task: {}", created.task_type, created.title))
            .entity_type("StaffTask")
            .entity_id(created.id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .task_updated(created.id, &created.status.to_string())
            .await;

        Ok(created)
    }

    /// Move a task through its lifecycle
    ///
    /// Completing a cleaning task flips the room back to Available.
    #[instrument(skip(self, actor))]
    pub async fn update_status(
        &self,
        id: i32,
        status: TaskStatus,
        actor: &Actor,
    ) -> AppResult<StaffTask> {
        let task = self.tasks.update_status(id, status).await?;

        if task.task_type == TaskType::Cleaning && status == TaskStatus::Completed {
            let room = self
                .rooms
                .update_status(task.room_id, RoomStatus::Available)
                .await?;
            info!("Room {} back in the available pool", room.id);
            self.notifier
                .room_updated(room.id, &room.status.to_string())
                .await;
        }

        AuditLog::builder()
            .action("TASK_STATUS_UPDATE")
            .performed_by(&actor.name)
            .details(format!("Task '{}' moved to {}", task.title, status))
            .entity_type("StaffTask")
            .entity_id(id.to_string())
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?
            .insert(&self.pool)
            .await;

        self.notifier
            .task_updated(task.id, &task.status.to_string())
            .await;

        Ok(task)
    }
}
