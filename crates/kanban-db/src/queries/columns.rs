use chrono::Utc;
use kanban_core::column::{default_columns, Column, CreateColumn, UpdateColumn};
use kanban_core::id::timestamp_id;
use tracing::info;

use crate::{keys, Db, DbError};

impl Db {
    /// Columns of a project ordered by position. The four default
    /// columns are seeded on first access.
    pub fn list_columns(&self, project_id: &str) -> Result<Vec<Column>, DbError> {
        let key = keys::columns_key(project_id);
        let mut columns = match self.read_json::<Vec<Column>>(&key)? {
            Some(columns) => columns,
            None => {
                let columns = default_columns();
                self.write_json(&key, &columns)?;
                info!(project = project_id, "seeded default columns");
                columns
            }
        };
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    pub fn get_column(&self, project_id: &str, id: &str) -> Result<Column, DbError> {
        self.list_columns(project_id)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| DbError::NotFound(format!("column {id} in project {project_id}")))
    }

    pub fn create_column(&self, project_id: &str, input: &CreateColumn) -> Result<Column, DbError> {
        let mut columns = self.list_columns(project_id)?;
        let id = timestamp_id("col", |id| columns.iter().any(|c| c.id == id));
        let position = input.position.unwrap_or_else(|| {
            columns.iter().map(|c| c.position).max().map_or(0, |max| max + 1)
        });
        let column = Column {
            id,
            title: input.title.clone(),
            color: input.color.clone(),
            position,
            created_at: Utc::now(),
        };
        columns.push(column.clone());
        self.set_columns(project_id, &columns)?;
        Ok(column)
    }

    pub fn update_column(
        &self,
        project_id: &str,
        id: &str,
        update: &UpdateColumn,
    ) -> Result<Column, DbError> {
        let mut columns = self.list_columns(project_id)?;
        let column = columns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| DbError::NotFound(format!("column {id} in project {project_id}")))?;
        column.apply(update);
        let updated = column.clone();
        self.set_columns(project_id, &columns)?;
        Ok(updated)
    }

    /// Remove a column and every task of this project filed under it.
    /// Tasks of other projects that happen to share the column id stay.
    pub fn delete_column(&self, project_id: &str, id: &str) -> Result<(), DbError> {
        let columns: Vec<Column> = self
            .list_columns(project_id)?
            .into_iter()
            .filter(|c| c.id != id)
            .collect();
        self.set_columns(project_id, &columns)?;

        let removed = self.retain_tasks(|t| !(t.column_id == id && t.project_id == project_id))?;
        info!(project = project_id, column = id, tasks = removed, "deleted column");
        Ok(())
    }

    /// Replace a project's whole column list in one write.
    pub fn set_columns(&self, project_id: &str, columns: &[Column]) -> Result<(), DbError> {
        self.write_json(&keys::columns_key(project_id), columns)
    }
}
