//! Staff task repository
//!
//! The checkout side effect inserts a cleaning task inside the booking
//! transaction, so the insert helper is executor-generic like the booking
//! helpers.

use hotel_core::models::{NewStaffTask, StaffTask, TaskStatus, TaskType};
use hotel_core::{AppError, AppResult};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use tracing::{error, instrument};

fn decode_err(column: &str, raw: &str) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: format!("unknown task column value '{}'", raw).into(),
    }
}

fn map_task(row: PgRow) -> Result<StaffTask, sqlx::Error> {
    let status: String = row.get("status");
    let task_type: String = row.get("task_type");
    Ok(StaffTask {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        room_id: row.get("room_id"),
        status: TaskStatus::from_str(&status).ok_or_else(|| decode_err("status", &status))?,
        task_type: TaskType::from_str(&task_type)
            .ok_or_else(|| decode_err("task_type", &task_type))?,
        assigned_to_id: row.get("assigned_to_id"),
        created_at: row.get("created_at"),
    })
}

/// Insert a staff task on the caller's executor (normally a transaction)
pub async fn insert<'e, E>(executor: E, task: &NewStaffTask) -> AppResult<StaffTask>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query(
        r#"
        INSERT INTO staff_tasks (title, description, room_id, status, task_type, assigned_to_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, description, room_id, status, task_type, assigned_to_id, created_at
        "#,
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.room_id)
    .bind(task.status.to_string())
    .bind(task.task_type.to_string())
    .bind(task.assigned_to_id)
    .try_map(map_task)
    .fetch_one(executor)
    .await
    .map_err(|e| {
        error!("Failed to insert staff task: {}", e);
        AppError::Database(format!("Failed to insert staff task: {}", e))
    })?;

    Ok(row)
}

/// PostgreSQL staff task repository
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a task outside any transaction
    #[instrument(skip(self, task))]
    pub async fn create(&self, task: &NewStaffTask) -> AppResult<StaffTask> {
        insert(&self.pool, task).await
    }

    /// Find a task by id
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<StaffTask>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, room_id, status, task_type, assigned_to_id, created_at
            FROM staff_tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .try_map(map_task)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to fetch staff task: {}", e)))?;

        Ok(row)
    }

    /// List tasks, newest first
    #[instrument(skip(self))]
    pub async fn list(&self) -> AppResult<Vec<StaffTask>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, room_id, status, task_type, assigned_to_id, created_at
            FROM staff_tasks
            ORDER BY created_at DESC
            "#,
        )
        .try_map(map_task)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Failed to list staff tasks: {}", e)))?;

        Ok(rows)
    }

    /// Update a task's status
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: i32, status: TaskStatus) -> AppResult<StaffTask> {
        let row = sqlx::query(
            r#"
            UPDATE staff_tasks
            SET status = $2
            WHERE id = $1
            RETURNING id, title, description, room_id, status, task_type, assigned_to_id, created_at
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .try_map(map_task)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update task {} status: {}", id, e);
            AppError::Database(format!("Failed to update task status: {}", e))
        })?
        .ok_or(AppError::TaskNotFound(id))?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_err_shape() {
        assert!(matches!(
            decode_err("status", "Done"),
            sqlx::Error::ColumnDecode { .. }
        ));
    }

    #[test]
    fn test_unknown_status_is_not_defaulted() {
        assert!(TaskStatus::from_str("Done")
            .ok_or_else(|| decode_err("status", "Done"))
            .is_err());
        assert!(TaskType::from_str("Repair")
            .ok_or_else(|| decode_err("task_type", "Repair"))
            .is_err());
    }
}
