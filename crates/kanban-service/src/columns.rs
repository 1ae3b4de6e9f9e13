use std::collections::HashSet;

use kanban_core::color::is_valid_hex;
use kanban_core::column::{renumber, Column, CreateColumn, UpdateColumn, DEFAULT_COLUMN_COLOR};
use tracing::info;

use crate::error::{required, ServiceError};
use crate::BoardService;

fn check_color(color: &str) -> Result<(), ServiceError> {
    if is_valid_hex(color) {
        Ok(())
    } else {
        Err(ServiceError::InvalidInput(format!("invalid color '{color}'")))
    }
}

impl BoardService {
    pub fn list_columns(&self, project_id: &str) -> Result<Vec<Column>, ServiceError> {
        self.ensure_project(project_id)?;
        Ok(self.db().list_columns(project_id)?)
    }

    /// Append a column after the current last one.
    pub fn add_column(
        &self,
        project_id: &str,
        title: &str,
        color: Option<&str>,
    ) -> Result<Column, ServiceError> {
        self.ensure_project(project_id)?;
        let title = required("column title", title)?;
        let color = color.unwrap_or(DEFAULT_COLUMN_COLOR);
        check_color(color)?;
        let column = self.db().create_column(
            project_id,
            &CreateColumn {
                title,
                color: color.to_string(),
                position: None,
            },
        )?;
        info!(project = project_id, column = %column.id, "added column");
        Ok(column)
    }

    pub fn update_column(
        &self,
        project_id: &str,
        id: &str,
        update: &UpdateColumn,
    ) -> Result<Column, ServiceError> {
        self.ensure_project(project_id)?;
        let mut update = update.clone();
        if let Some(ref title) = update.title {
            update.title = Some(required("column title", title)?);
        }
        if let Some(ref color) = update.color {
            check_color(color)?;
        }
        Ok(self.db().update_column(project_id, id, &update)?)
    }

    /// Delete a column and every task in it.
    pub fn delete_column(&self, project_id: &str, id: &str) -> Result<(), ServiceError> {
        self.ensure_project(project_id)?;
        self.db().get_column(project_id, id)?;
        self.db().delete_column(project_id, id)?;
        Ok(())
    }

    /// Put the project's columns in the given order and renumber them
    /// 0..n-1. `ordered_ids` must name every column exactly once. The
    /// whole list is written back in one store write.
    pub fn reorder_columns(
        &self,
        project_id: &str,
        ordered_ids: &[String],
    ) -> Result<Vec<Column>, ServiceError> {
        self.ensure_project(project_id)?;
        let mut current = self.db().list_columns(project_id)?;
        let unique: HashSet<&str> = ordered_ids.iter().map(String::as_str).collect();
        if unique.len() != ordered_ids.len() || ordered_ids.len() != current.len() {
            return Err(ServiceError::InvalidInput(format!(
                "expected each of the {} columns exactly once",
                current.len()
            )));
        }

        let mut reordered = Vec::with_capacity(current.len());
        for id in ordered_ids {
            let idx = current
                .iter()
                .position(|c| &c.id == id)
                .ok_or_else(|| ServiceError::NotFound(format!("column {id} in project {project_id}")))?;
            reordered.push(current.swap_remove(idx));
        }
        renumber(&mut reordered);
        self.db().set_columns(project_id, &reordered)?;
        info!(project = project_id, "reordered columns");
        Ok(reordered)
    }

    /// Move one column to `index` (clamped), shifting the others.
    pub fn move_column(
        &self,
        project_id: &str,
        id: &str,
        index: usize,
    ) -> Result<Vec<Column>, ServiceError> {
        let mut ids: Vec<String> = self
            .list_columns(project_id)?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let from = ids
            .iter()
            .position(|c| c == id)
            .ok_or_else(|| ServiceError::NotFound(format!("column {id} in project {project_id}")))?;
        let moved = ids.remove(from);
        ids.insert(index.min(ids.len()), moved);
        self.reorder_columns(project_id, &ids)
    }
}

#[cfg(test)]
mod tests {
    use kanban_db::keys::columns_key;
    use kanban_db::Db;

    use super::*;

    fn service() -> BoardService {
        BoardService::new(Db::open_in_memory())
    }

    fn ids(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    fn positions(columns: &[Column]) -> Vec<i64> {
        columns.iter().map(|c| c.position).collect()
    }

    #[test]
    fn add_column_defaults_color_and_validates() {
        let svc = service();
        let col = svc.add_column("project-default", " Blocked ", None).unwrap();
        assert_eq!(col.title, "Blocked");
        assert_eq!(col.color, DEFAULT_COLUMN_COLOR);
        assert!(svc.add_column("project-default", "", None).is_err());
        assert!(svc.add_column("project-default", "QA", Some("teal")).is_err());
    }

    #[test]
    fn reorder_yields_dense_positions() {
        let svc = service();
        let order: Vec<String> = ["col-completed", "col-todo", "col-in-review", "col-in-progress"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let cols = svc.reorder_columns("project-default", &order).unwrap();
        assert_eq!(positions(&cols), [0, 1, 2, 3]);
        let stored = svc.list_columns("project-default").unwrap();
        assert_eq!(ids(&stored), order.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(positions(&stored), [0, 1, 2, 3]);
    }

    #[test]
    fn reorder_closes_gaps() {
        let svc = service();
        svc.update_column(
            "project-default",
            "col-in-review",
            &UpdateColumn {
                position: Some(40),
                ..Default::default()
            },
        )
        .unwrap();
        let order: Vec<String> = svc.list_columns("project-default").unwrap().into_iter().map(|c| c.id).collect();
        let cols = svc.reorder_columns("project-default", &order).unwrap();
        assert_eq!(positions(&cols), [0, 1, 2, 3]);
    }

    #[test]
    fn reorder_rejects_partial_or_duplicate_orders() {
        let svc = service();
        let before = svc.list_columns("project-default").unwrap();
        let partial = vec!["col-todo".to_string()];
        assert!(svc.reorder_columns("project-default", &partial).is_err());
        let dupes: Vec<String> = ["col-todo", "col-todo", "col-in-review", "col-completed"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(svc.reorder_columns("project-default", &dupes).is_err());
        let unknown: Vec<String> = ["col-todo", "col-x", "col-in-review", "col-completed"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert!(matches!(
            svc.reorder_columns("project-default", &unknown),
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(svc.list_columns("project-default").unwrap(), before);
    }

    #[test]
    fn move_column_shifts_neighbours() {
        let svc = service();
        let cols = svc.move_column("project-default", "col-completed", 0).unwrap();
        assert_eq!(
            ids(&cols),
            ["col-completed", "col-todo", "col-in-progress", "col-in-review"]
        );
        let cols = svc.move_column("project-default", "col-completed", 99).unwrap();
        assert_eq!(ids(&cols)[3], "col-completed");
        assert_eq!(positions(&cols), [0, 1, 2, 3]);
    }

    #[test]
    fn unknown_project_gets_no_columns() {
        let svc = service();
        assert!(matches!(
            svc.add_column("project-never-existed", "QA", None),
            Err(ServiceError::NotFound(_))
        ));
        assert!(svc.list_columns("project-never-existed").is_err());
        assert!(!svc
            .db()
            .kv()
            .exists(&columns_key("project-never-existed"))
            .unwrap());
    }

    #[test]
    fn delete_unknown_column_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.delete_column("project-default", "col-nope"),
            Err(ServiceError::NotFound(_))
        ));
    }
}
