use kanban_core::task::{CreateTask, Task, TaskQuery, UpdateTask};
use tracing::info;

use crate::error::{required, ServiceError};
use crate::BoardService;

impl BoardService {
    fn ensure_column(&self, project_id: &str, column_id: &str) -> Result<(), ServiceError> {
        self.ensure_project(project_id)?;
        self.db().get_column(project_id, column_id)?;
        Ok(())
    }

    /// Create a task at the end of its column. Blank priority or type take
    /// the defaults from settings.
    pub fn add_task(&self, input: &CreateTask) -> Result<Task, ServiceError> {
        let mut input = input.clone();
        input.title = required("task title", &input.title)?;
        self.ensure_column(&input.project_id, &input.column_id)?;

        if input.priority.trim().is_empty() || input.task_type.trim().is_empty() {
            let settings = self.db().get_settings()?;
            if input.priority.trim().is_empty() {
                input.priority = settings.default_priority;
            }
            if input.task_type.trim().is_empty() {
                input.task_type = settings.default_type;
            }
        }

        let task = self.db().create_task(&input)?;
        info!(task = %task.id, column = %task.column_id, "added task");
        Ok(task)
    }

    pub fn get_task(&self, id: &str) -> Result<Task, ServiceError> {
        Ok(self.db().get_task(id)?)
    }

    /// Apply a partial update. A column change must stay within the task's
    /// project; the position is left untouched.
    pub fn update_task(&self, id: &str, update: &UpdateTask) -> Result<Task, ServiceError> {
        let task = self.db().get_task(id)?;
        let mut update = update.clone();
        if let Some(ref title) = update.title {
            update.title = Some(required("task title", title)?);
        }
        if let Some(ref column_id) = update.column_id {
            self.ensure_column(&task.project_id, column_id)?;
        }
        Ok(self.db().update_task(id, &update)?)
    }

    pub fn move_task(&self, id: &str, column_id: &str) -> Result<Task, ServiceError> {
        let task = self.update_task(id, &UpdateTask::move_to(column_id))?;
        info!(task = id, column = column_id, "moved task");
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), ServiceError> {
        self.db().get_task(id)?;
        self.db().delete_task(id)?;
        info!(task = id, "deleted task");
        Ok(())
    }

    /// Search and priority filtered tasks of one column.
    pub fn tasks_by_column(
        &self,
        project_id: &str,
        column_id: &str,
        search: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Vec<Task>, ServiceError> {
        self.ensure_project(project_id)?;
        Ok(self
            .db()
            .tasks_by_column(project_id, column_id, search, priority)?)
    }

    /// Tasks of one column after every display filter, type included.
    pub fn filtered_tasks(
        &self,
        project_id: &str,
        column_id: &str,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, ServiceError> {
        self.ensure_project(project_id)?;
        let tasks = self.db().tasks_by_column(
            project_id,
            column_id,
            query.search.as_deref(),
            query.priority.as_deref(),
        )?;
        Ok(tasks.into_iter().filter(|t| query.matches_type(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use kanban_db::Db;

    use super::*;

    fn service() -> BoardService {
        BoardService::new(Db::open_in_memory())
    }

    fn input(title: &str, column: &str) -> CreateTask {
        CreateTask {
            project_id: "project-default".into(),
            column_id: column.into(),
            title: title.into(),
            description: String::new(),
            priority: String::new(),
            task_type: String::new(),
            attachments: vec![],
            position: None,
        }
    }

    #[test]
    fn blank_labels_take_settings_defaults() {
        let svc = service();
        let task = svc.add_task(&input("Wire up login", "col-todo")).unwrap();
        assert_eq!(task.priority, "Medium");
        assert_eq!(task.task_type, "Front-End");
    }

    #[test]
    fn title_is_required() {
        let svc = service();
        assert!(matches!(
            svc.add_task(&input("  ", "col-todo")),
            Err(ServiceError::InvalidInput(_))
        ));
        assert!(svc.db().list_all_tasks().unwrap().is_empty());
    }

    #[test]
    fn unknown_column_is_rejected() {
        let svc = service();
        assert!(matches!(
            svc.add_task(&input("Orphan", "col-nowhere")),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn positions_grow_per_column() {
        let svc = service();
        let a = svc.add_task(&input("a", "col-todo")).unwrap();
        let b = svc.add_task(&input("b", "col-todo")).unwrap();
        let c = svc.add_task(&input("c", "col-completed")).unwrap();
        assert_eq!((a.position, b.position, c.position), (0, 1, 0));
    }

    #[test]
    fn move_rejects_foreign_column() {
        let svc = service();
        let task = svc.add_task(&input("a", "col-todo")).unwrap();
        assert!(svc.move_task(&task.id, "col-elsewhere").is_err());
        assert_eq!(svc.get_task(&task.id).unwrap().column_id, "col-todo");
    }

    #[test]
    fn filtered_tasks_applies_type() {
        let svc = service();
        let mut design = input("Mockups", "col-todo");
        design.task_type = "Design".into();
        svc.add_task(&design).unwrap();
        svc.add_task(&input("Login form", "col-todo")).unwrap();

        let query = TaskQuery::from_inputs("", "All", "Design");
        let tasks = svc
            .filtered_tasks("project-default", "col-todo", &query)
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Mockups");

        let all = svc
            .filtered_tasks("project-default", "col-todo", &TaskQuery::default())
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn delete_unknown_task_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete_task("task-0"),
            Err(ServiceError::NotFound(_))
        ));
    }
}
