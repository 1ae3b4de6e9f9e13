use chrono::Utc;
use kanban_core::id::timestamp_id;
use kanban_core::project::{Project, UpdateProject, DEFAULT_PROJECT_ID};
use kanban_core::task::Task;
use tracing::info;

use crate::{keys, Db, DbError};

impl Db {
    /// All projects, seeding the default project on first access.
    pub fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        if let Some(projects) = self.read_json::<Vec<Project>>(keys::PROJECTS)? {
            return Ok(projects);
        }
        let projects = vec![Project::default_project()];
        self.write_json(keys::PROJECTS, &projects)?;
        info!("seeded default project");
        Ok(projects)
    }

    pub fn get_project(&self, id: &str) -> Result<Project, DbError> {
        self.list_projects()?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::NotFound(format!("project {id}")))
    }

    /// Id of the selected project, seeded to the default project id.
    pub fn get_current_project_id(&self) -> Result<String, DbError> {
        match self.kv().get_opt(keys::CURRENT_PROJECT)? {
            Some(id) if !id.is_empty() => Ok(id),
            _ => {
                self.kv().set(keys::CURRENT_PROJECT, DEFAULT_PROJECT_ID)?;
                Ok(DEFAULT_PROJECT_ID.to_string())
            }
        }
    }

    /// Stored as a bare string, not JSON.
    pub fn set_current_project_id(&self, id: &str) -> Result<(), DbError> {
        self.kv().set(keys::CURRENT_PROJECT, id)?;
        Ok(())
    }

    pub fn create_project(&self, name: &str) -> Result<Project, DbError> {
        let mut projects = self.list_projects()?;
        let id = timestamp_id("project", |id| projects.iter().any(|p| p.id == id));
        let project = Project {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        projects.push(project.clone());
        self.write_json(keys::PROJECTS, &projects)?;
        Ok(project)
    }

    pub fn update_project(&self, id: &str, update: &UpdateProject) -> Result<Project, DbError> {
        let mut projects = self.list_projects()?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DbError::NotFound(format!("project {id}")))?;
        project.apply(update);
        let updated = project.clone();
        self.write_json(keys::PROJECTS, &projects)?;
        Ok(updated)
    }

    /// Remove a project together with its tasks and its column list.
    /// Deleting an unknown id is a no-op.
    pub fn delete_project(&self, id: &str) -> Result<(), DbError> {
        let projects: Vec<Project> = self
            .list_projects()?
            .into_iter()
            .filter(|p| p.id != id)
            .collect();
        self.write_json(keys::PROJECTS, &projects)?;

        let removed = self.retain_tasks(|t: &Task| t.project_id != id)?;
        self.kv().remove(&keys::columns_key(id))?;
        info!(project = id, tasks = removed, "deleted project");
        Ok(())
    }
}
