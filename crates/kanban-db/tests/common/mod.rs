// Backend-agnostic integration tests for the board stores.
//
// Each public function takes a `&Db` so that the same assertions run
// against the in-memory and the SQLite key/value backends.

use kanban_core::column::CreateColumn;
use kanban_core::task::{CreateTask, UpdateTask};
use kanban_db::{keys, Db};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_task(project_id: &str, column_id: &str, title: &str) -> CreateTask {
    CreateTask {
        project_id: project_id.to_string(),
        column_id: column_id.to_string(),
        title: title.to_string(),
        description: String::new(),
        priority: "Medium".to_string(),
        task_type: "Front-End".to_string(),
        attachments: vec![],
        position: None,
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Fresh stores seed one project, the current id, four columns and settings.
pub fn test_first_access_seeds(db: &Db) {
    let projects = db.list_projects().unwrap();
    assert_eq!(projects.len(), 1);
    let current = db.get_current_project_id().unwrap();
    assert_eq!(current, projects[0].id);

    let columns = db.list_columns(&current).unwrap();
    let titles: Vec<_> = columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, ["TODO", "In Progress", "In Review", "Completed"]);

    let settings = db.get_settings().unwrap();
    assert_eq!(settings.priorities.len(), 3);
    assert_eq!(settings.task_types.len(), 4);

    for key in [keys::PROJECTS, keys::CURRENT_PROJECT, keys::SETTINGS] {
        assert!(db.kv().exists(key).unwrap(), "{key} should be persisted");
    }
    assert!(db.kv().exists(&keys::columns_key(&current)).unwrap());
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

/// Deleting a project drops exactly its tasks and columns.
pub fn test_project_delete_cascades(db: &Db) {
    let keep = db.create_project("Keep").unwrap();
    let doomed = db.create_project("Doomed").unwrap();

    db.create_task(&make_task(&keep.id, "col-todo", "k1")).unwrap();
    db.create_task(&make_task(&doomed.id, "col-todo", "d1")).unwrap();
    db.create_task(&make_task(&doomed.id, "col-completed", "d2")).unwrap();
    let keep_columns: Vec<String> = db
        .list_columns(&keep.id)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    db.list_columns(&doomed.id).unwrap();

    db.delete_project(&doomed.id).unwrap();

    assert!(db.list_tasks(&doomed.id).unwrap().is_empty());
    assert_eq!(db.list_tasks(&keep.id).unwrap().len(), 1);
    let remaining: Vec<String> = db
        .list_columns(&keep.id)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(remaining, keep_columns);
    assert!(db
        .kv()
        .keys(keys::COLUMNS_PREFIX)
        .unwrap()
        .iter()
        .all(|k| k != &keys::columns_key(&doomed.id)));
    assert!(db.list_projects().unwrap().iter().all(|p| p.id != doomed.id));
}

/// Deleting a column drops its tasks in that project only.
pub fn test_column_delete_cascades(db: &Db) {
    let p1 = db.create_project("One").unwrap();
    let p2 = db.create_project("Two").unwrap();

    db.create_task(&make_task(&p1.id, "col-in-review", "p1 review")).unwrap();
    db.create_task(&make_task(&p1.id, "col-todo", "p1 todo")).unwrap();
    // Default column ids repeat across projects.
    db.create_task(&make_task(&p2.id, "col-in-review", "p2 review")).unwrap();

    db.delete_column(&p1.id, "col-in-review").unwrap();

    let p1_tasks = db.list_tasks(&p1.id).unwrap();
    assert_eq!(p1_tasks.len(), 1);
    assert_eq!(p1_tasks[0].title, "p1 todo");
    assert_eq!(db.list_tasks(&p2.id).unwrap().len(), 1);
    assert_eq!(db.list_columns(&p1.id).unwrap().len(), 3);
    assert_eq!(db.list_columns(&p2.id).unwrap().len(), 4);
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Moving a task changes its column and nothing else.
pub fn test_task_move_keeps_position(db: &Db) {
    let project = db.get_current_project_id().unwrap();
    db.create_task(&make_task(&project, "col-todo", "first")).unwrap();
    let task = db.create_task(&make_task(&project, "col-todo", "second")).unwrap();
    assert_eq!(task.position, 1);

    let moved = db
        .update_task(&task.id, &UpdateTask::move_to("col-completed"))
        .unwrap();
    assert_eq!(moved.column_id, "col-completed");
    assert_eq!(moved.position, 1);
    assert_eq!(moved.title, task.title);
    assert_eq!(moved.created_at, task.created_at);
}

/// The persisted tasks document keeps the wire field names.
pub fn test_task_document_shape(db: &Db) {
    let project = db.get_current_project_id().unwrap();
    db.create_task(&make_task(&project, "col-todo", "shape")).unwrap();
    let raw: serde_json::Value =
        serde_json::from_str(&db.kv().get(keys::TASKS).unwrap()).unwrap();
    let task = &raw[0];
    for field in [
        "id",
        "column_id",
        "project_id",
        "title",
        "description",
        "priority",
        "type",
        "comments_count",
        "attachments",
        "position",
        "created_at",
    ] {
        assert!(task.get(field).is_some(), "missing field {field}");
    }
}

/// Columns appended through the store continue the dense ranking.
pub fn test_column_append(db: &Db) {
    let project = db.get_current_project_id().unwrap();
    let col = db
        .create_column(
            &project,
            &CreateColumn {
                title: "Blocked".into(),
                color: "#fecaca".into(),
                position: None,
            },
        )
        .unwrap();
    let columns = db.list_columns(&project).unwrap();
    assert_eq!(columns.len(), 5);
    assert_eq!(columns[4].id, col.id);
    assert_eq!(
        columns.iter().map(|c| c.position).collect::<Vec<_>>(),
        [0, 1, 2, 3, 4]
    );
}
