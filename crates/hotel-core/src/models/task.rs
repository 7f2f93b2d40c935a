//! Staff task model
//!
//! Housekeeping and maintenance tasks. A checkout automatically enqueues an
//! unassigned cleaning task; completing a cleaning task returns the room to
//! the Available pool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::InProgress => write!(f, "InProgress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl TaskStatus {
    /// Parse from string, rejecting unknown values
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TaskStatus::Pending),
            "InProgress" => Some(TaskStatus::InProgress),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Task type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TaskType {
    #[default]
    Cleaning,
    Maintenance,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskType::Cleaning => write!(f, "Cleaning"),
            TaskType::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl TaskType {
    /// Parse from string, rejecting unknown values
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Cleaning" => Some(TaskType::Cleaning),
            "Maintenance" => Some(TaskType::Maintenance),
            _ => None,
        }
    }
}

/// Staff task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffTask {
    /// Unique identifier
    pub id: i32,

    /// Short title, e.g. "Clean Room 202"
    pub title: String,

    /// Longer description
    pub description: String,

    /// Room the task targets
    pub room_id: i32,

    /// Current status
    pub status: TaskStatus,

    /// Cleaning or Maintenance
    pub task_type: TaskType,

    /// Assigned staff member, None while unassigned
    pub assigned_to_id: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Data for creating a staff task
#[derive(Debug, Clone)]
pub struct NewStaffTask {
    pub title: String,
    pub description: String,
    pub room_id: i32,
    pub status: TaskStatus,
    pub task_type: TaskType,
    pub assigned_to_id: Option<i32>,
}

impl NewStaffTask {
    /// The task enqueued when a guest checks out: unassigned, pending,
    /// full deep clean.
    pub fn checkout_cleaning(room_id: i32, room_number: &str) -> Self {
        Self {
            title: format!("Clean Room {}", room_number),
            description: "Guest checked out. Full deep clean required.".to_string(),
            room_id,
            status: TaskStatus::Pending,
            task_type: TaskType::Cleaning,
            assigned_to_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_cleaning_task() {
        let task = NewStaffTask::checkout_cleaning(202, "202");
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.task_type, TaskType::Cleaning);
        assert!(task.assigned_to_id.is_none());
        assert_eq!(task.title, "Clean Room 202");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TaskStatus::from_str("InProgress"), Some(TaskStatus::InProgress));
        assert!(TaskStatus::from_str("Done").is_none());
    }
}
