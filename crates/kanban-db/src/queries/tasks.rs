use chrono::Utc;
use kanban_core::id::timestamp_id;
use kanban_core::task::{CreateTask, Task, TaskQuery, UpdateTask};

use crate::{keys, Db, DbError};

impl Db {
    /// Every task of every project. A missing document reads as empty.
    pub fn list_all_tasks(&self) -> Result<Vec<Task>, DbError> {
        Ok(self.read_json::<Vec<Task>>(keys::TASKS)?.unwrap_or_default())
    }

    pub fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>, DbError> {
        Ok(self
            .list_all_tasks()?
            .into_iter()
            .filter(|t| t.project_id == project_id)
            .collect())
    }

    pub fn get_task(&self, id: &str) -> Result<Task, DbError> {
        self.list_all_tasks()?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| DbError::NotFound(format!("task {id}")))
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<(), DbError> {
        self.write_json(keys::TASKS, tasks)
    }

    pub fn create_task(&self, input: &CreateTask) -> Result<Task, DbError> {
        let mut tasks = self.list_all_tasks()?;
        let id = timestamp_id("task", |id| tasks.iter().any(|t| t.id == id));
        let position = input.position.unwrap_or_else(|| {
            tasks
                .iter()
                .filter(|t| t.project_id == input.project_id && t.column_id == input.column_id)
                .map(|t| t.position)
                .max()
                .map_or(0, |max| max + 1)
        });
        let task = Task {
            id,
            column_id: input.column_id.clone(),
            project_id: input.project_id.clone(),
            title: input.title.clone(),
            description: input.description.clone(),
            priority: input.priority.clone(),
            task_type: input.task_type.clone(),
            comments_count: 0,
            attachments: input.attachments.clone(),
            position,
            created_at: Utc::now(),
        };
        tasks.push(task.clone());
        self.save_tasks(&tasks)?;
        Ok(task)
    }

    pub fn update_task(&self, id: &str, update: &UpdateTask) -> Result<Task, DbError> {
        let mut tasks = self.list_all_tasks()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DbError::NotFound(format!("task {id}")))?;
        task.apply(update);
        let updated = task.clone();
        self.save_tasks(&tasks)?;
        Ok(updated)
    }

    /// Deleting an unknown id is a no-op.
    pub fn delete_task(&self, id: &str) -> Result<(), DbError> {
        self.retain_tasks(|t| t.id != id)?;
        Ok(())
    }

    /// Tasks of `project_id` in `column_id`, optionally narrowed by a
    /// case-insensitive search and an exact priority. Type filtering is
    /// left to the caller.
    pub fn tasks_by_column(
        &self,
        project_id: &str,
        column_id: &str,
        search: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Vec<Task>, DbError> {
        let query = TaskQuery {
            search: search.map(str::to_string),
            priority: priority.map(str::to_string),
            task_type: None,
        };
        Ok(self
            .list_tasks(project_id)?
            .into_iter()
            .filter(|t| t.column_id == column_id && query.matches(t))
            .collect())
    }

    /// Keep only tasks matching `keep`, rewriting the collection when
    /// anything was dropped. Returns how many were removed.
    pub(crate) fn retain_tasks<F>(&self, keep: F) -> Result<usize, DbError>
    where
        F: Fn(&Task) -> bool,
    {
        let mut tasks = self.list_all_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| keep(t));
        let removed = before - tasks.len();
        if removed > 0 {
            self.save_tasks(&tasks)?;
        }
        Ok(removed)
    }
}
