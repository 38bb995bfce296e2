//! Task service
//!
//! Tasks are derived on every request from the user's active crops and are
//! never stored.

use chrono::NaiveDate;
use serde::Serialize;
use shared::{
    generate_tasks, generate_type_specific_tasks, select_featured, task_stats, validate_crop_id,
    Task, TaskStats,
};

use crate::error::{AppError, AppResult};
use crate::external::FarmApiClient;

/// Task service
#[derive(Clone)]
pub struct TaskService {
    farm_api: FarmApiClient,
}

/// Everything the task page shows
#[derive(Debug, Serialize)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub featured: Vec<Task>,
    pub stats: TaskStats,
}

impl TaskBoard {
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let featured = select_featured(&tasks).to_vec();
        let stats = task_stats(&tasks);
        Self {
            tasks,
            featured,
            stats,
        }
    }
}

impl TaskService {
    pub fn new(farm_api: FarmApiClient) -> Self {
        Self { farm_api }
    }

    /// Generate the task board for a user's active crops
    pub async fn board_for_user(&self, user_id: i64, today: NaiveDate) -> AppResult<TaskBoard> {
        let mut crops = self.farm_api.crops_for_user(user_id).await?;
        crops.retain(|c| c.active);

        let tasks = generate_tasks(&crops, today);
        tracing::debug!(
            "Generated {} tasks from {} crops for user {}",
            tasks.len(),
            crops.len(),
            user_id
        );
        Ok(TaskBoard::from_tasks(tasks))
    }

    /// Tasks from the crop-type table alone
    pub fn crop_type_tasks(
        &self,
        crop_type: &str,
        crop_id: i64,
        today: NaiveDate,
    ) -> AppResult<Vec<Task>> {
        validate_crop_id(crop_id).map_err(|m| AppError::invalid_field("crop_id", m))?;
        Ok(generate_type_specific_tasks(
            &crop_type.to_lowercase(),
            crop_id,
            today,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CropRecord, TaskState};

    #[test]
    fn test_board_from_tasks() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let crops: Vec<CropRecord> = (1..=3)
            .map(|id| {
                CropRecord::new(id, "maize", "growing")
                    .with_sow_date(today - chrono::Duration::days(30))
            })
            .collect();

        let board = TaskBoard::from_tasks(generate_tasks(&crops, today));
        assert_eq!(board.tasks.len(), 12);
        assert_eq!(board.featured.len(), 5);
        assert_eq!(board.featured[..], board.tasks[..5]);
        assert_eq!(board.stats.total, 12);
        assert_eq!(
            board.stats.pending,
            board.tasks.iter().filter(|t| t.state == TaskState::Pending).count()
        );
    }

    #[test]
    fn test_crop_type_tasks_rejects_bad_id() {
        let service = TaskService::new(FarmApiClient::with_client(
            reqwest::Client::new(),
            "http://localhost",
        ));
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(service.crop_type_tasks("maize", 0, today).is_err());
        assert!(!service.crop_type_tasks("Maize", 7, today).unwrap().is_empty());
    }
}
