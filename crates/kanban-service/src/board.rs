use kanban_core::column::Column;
use kanban_core::project::{Project, UpdateProject};
use kanban_core::task::{Task, TaskQuery};
use kanban_db::Db;
use tracing::{info, warn};

use crate::error::{required, ServiceError};

/// One column of the visible board with its filtered tasks.
#[derive(Debug, Clone)]
pub struct BoardColumn {
    pub column: Column,
    pub tasks: Vec<Task>,
}

/// UI-facing orchestration over the stores.
///
/// Cascades and last-entry guards live here; the stores themselves only
/// read and rewrite collections.
#[derive(Clone)]
pub struct BoardService {
    db: Db,
}

impl BoardService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    // -- Projects --

    pub fn list_projects(&self) -> Result<Vec<Project>, ServiceError> {
        Ok(self.db.list_projects()?)
    }

    pub fn current_project_id(&self) -> Result<String, ServiceError> {
        Ok(self.db.get_current_project_id()?)
    }

    /// The selected project. A dangling selection falls back to the first
    /// project and is repaired in the store.
    pub fn current_project(&self) -> Result<Project, ServiceError> {
        let current = self.db.get_current_project_id()?;
        let projects = self.db.list_projects()?;
        if let Some(project) = projects.iter().find(|p| p.id == current) {
            return Ok(project.clone());
        }
        let first = projects
            .into_iter()
            .next()
            .ok_or_else(|| ServiceError::Internal("no projects stored".into()))?;
        warn!(stale = %current, now = %first.id, "current project missing, reselecting");
        self.db.set_current_project_id(&first.id)?;
        Ok(first)
    }

    pub fn select_project(&self, id: &str) -> Result<Project, ServiceError> {
        let project = self.db.get_project(id)?;
        self.db.set_current_project_id(id)?;
        info!(project = id, "selected project");
        Ok(project)
    }

    pub fn create_project(&self, name: &str) -> Result<Project, ServiceError> {
        let name = required("project name", name)?;
        let project = self.db.create_project(&name)?;
        info!(project = %project.id, "created project");
        Ok(project)
    }

    pub fn rename_project(&self, id: &str, name: &str) -> Result<Project, ServiceError> {
        let name = required("project name", name)?;
        Ok(self.db.update_project(
            id,
            &UpdateProject {
                name: Some(name),
            },
        )?)
    }

    /// Delete a project with its tasks and columns. The last project is
    /// never deleted. When the current project goes, the first remaining
    /// one becomes current.
    pub fn delete_project(&self, id: &str) -> Result<(), ServiceError> {
        let projects = self.db.list_projects()?;
        if !projects.iter().any(|p| p.id == id) {
            return Err(ServiceError::NotFound(format!("project {id}")));
        }
        if projects.len() <= 1 {
            warn!(project = id, "refused to delete the last project");
            return Err(ServiceError::Rejected(
                "cannot delete the last project".into(),
            ));
        }

        let was_current = self.db.get_current_project_id()? == id;
        self.db.delete_project(id)?;
        if was_current {
            if let Some(next) = projects.iter().find(|p| p.id != id) {
                self.db.set_current_project_id(&next.id)?;
                info!(project = %next.id, "switched to remaining project");
            }
        }
        Ok(())
    }

    /// Fail unless `project_id` names a stored project. Column reads seed
    /// defaults for any id, so every project-scoped entry point checks first.
    pub(crate) fn ensure_project(&self, project_id: &str) -> Result<(), ServiceError> {
        self.db.get_project(project_id)?;
        Ok(())
    }

    // -- Board view --

    /// Columns of `project_id` in position order, each with the tasks
    /// that pass `query`.
    pub fn board(&self, project_id: &str, query: &TaskQuery) -> Result<Vec<BoardColumn>, ServiceError> {
        self.ensure_project(project_id)?;
        let columns = self.db.list_columns(project_id)?;
        let tasks = self.db.list_tasks(project_id)?;
        Ok(columns
            .into_iter()
            .map(|column| {
                let tasks = tasks
                    .iter()
                    .filter(|t| t.column_id == column.id && query.matches(t))
                    .cloned()
                    .collect();
                BoardColumn { column, tasks }
            })
            .collect())
    }
}
