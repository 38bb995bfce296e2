//! Agronomic task models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::dmy_date;

/// A generated recommendation for one crop. Never persisted: callers
/// regenerate the list rather than updating it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub name: String,
    pub description: String,
    /// Id of the originating crop
    pub plot_ref: String,
    #[serde(with = "dmy_date")]
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub state: TaskState,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort weight, higher first
    pub fn weight(&self) -> u8 {
        match self {
            TaskPriority::High => 3,
            TaskPriority::Medium => 2,
            TaskPriority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Irrigation,
    Fertilization,
    PestControl,
    Harvest,
    Monitoring,
}

/// Task lifecycle state. The generator only emits `Pending` and
/// `Scheduled`; `Completed` is set by the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Scheduled,
    Completed,
}

/// Counts of tasks per state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub scheduled: usize,
    pub completed: usize,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::High => write!(f, "high"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::Low => write!(f, "low"),
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskCategory::Irrigation => write!(f, "irrigation"),
            TaskCategory::Fertilization => write!(f, "fertilization"),
            TaskCategory::PestControl => write!(f, "pest_control"),
            TaskCategory::Harvest => write!(f, "harvest"),
            TaskCategory::Monitoring => write!(f, "monitoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_weights() {
        assert!(TaskPriority::High.weight() > TaskPriority::Medium.weight());
        assert!(TaskPriority::Medium.weight() > TaskPriority::Low.weight());
    }

    #[test]
    fn test_task_wire_format() {
        let task = Task {
            name: "Initial irrigation".to_string(),
            description: "Keep soil moisture constant for maize".to_string(),
            plot_ref: "1".to_string(),
            due_date: NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            priority: TaskPriority::High,
            category: TaskCategory::PestControl,
            state: TaskState::Pending,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["due_date"], "09/01/2025");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["category"], "pest_control");
        assert_eq!(json["state"], "pending");
    }
}
