// End-to-end board flows against both storage backends.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kanban_core::settings::Catalog;
use kanban_core::task::{CreateTask, TaskQuery};
use kanban_db::keys::columns_key;
use kanban_db::Db;
use kanban_service::{BoardService, DragState, DropOutcome, Point, ServiceError, TouchGesture, TouchOutcome};
use kanban_store::{MemoryStore, SqliteStore};

fn memory() -> BoardService {
    BoardService::new(Db::new(Arc::new(MemoryStore::new())))
}

fn sqlite() -> BoardService {
    BoardService::new(Db::new(Arc::new(SqliteStore::open_in_memory().unwrap())))
}

fn new_task(project: &str, column: &str, title: &str) -> CreateTask {
    CreateTask {
        project_id: project.into(),
        column_id: column.into(),
        title: title.into(),
        description: String::new(),
        priority: String::new(),
        task_type: String::new(),
        attachments: vec![],
        position: None,
    }
}

fn write_spec_round_trip(svc: BoardService) {
    let project = svc.current_project().unwrap();
    let mut input = new_task(&project.id, "col-todo", "Write spec");
    input.priority = "High".into();
    input.task_type = "Design".into();
    let task = svc.add_task(&input).unwrap();

    let in_todo = svc
        .tasks_by_column(&project.id, "col-todo", None, None)
        .unwrap();
    assert!(in_todo.iter().any(|t| t.id == task.id));
    let high = svc
        .tasks_by_column(&project.id, "col-todo", None, Some("High"))
        .unwrap();
    assert!(high.iter().any(|t| t.id == task.id));
    let low = svc
        .tasks_by_column(&project.id, "col-todo", None, Some("Low"))
        .unwrap();
    assert!(low.is_empty());

    svc.delete_task(&task.id).unwrap();
    assert!(svc
        .tasks_by_column(&project.id, "col-todo", None, None)
        .unwrap()
        .is_empty());
    assert!(svc
        .tasks_by_column(&project.id, "col-todo", None, Some("High"))
        .unwrap()
        .is_empty());
}

#[test]
fn write_spec_round_trip_memory() {
    write_spec_round_trip(memory());
}

#[test]
fn write_spec_round_trip_sqlite() {
    write_spec_round_trip(sqlite());
}

#[test]
fn drag_changes_only_the_column() {
    let svc = memory();
    svc.add_task(&new_task("project-default", "col-todo", "first")).unwrap();
    let task = svc
        .add_task(&new_task("project-default", "col-todo", "second"))
        .unwrap();
    assert_eq!(task.position, 1);

    let mut drag = DragState::Idle;
    drag.start_drag(task.clone());
    let moved = match svc.drop_on(&mut drag, Some("col-in-review")).unwrap() {
        DropOutcome::Moved(task) => task,
        other => panic!("expected a move, got {other:?}"),
    };
    assert_eq!(drag, DragState::Idle);

    assert_eq!(moved.column_id, "col-in-review");
    assert_eq!(moved.position, task.position);
    assert_eq!(moved.title, task.title);
    assert_eq!(moved.priority, task.priority);
    assert_eq!(moved.created_at, task.created_at);
}

#[test]
fn drop_on_same_column_or_outside_is_a_no_op() {
    let svc = memory();
    let task = svc
        .add_task(&new_task("project-default", "col-todo", "stay"))
        .unwrap();

    let mut drag = DragState::Idle;
    drag.start_drag(task.clone());
    assert_eq!(
        svc.drop_on(&mut drag, Some("col-todo")).unwrap(),
        DropOutcome::SameColumn
    );
    drag.start_drag(task.clone());
    assert_eq!(svc.drop_on(&mut drag, None).unwrap(), DropOutcome::SameColumn);
    assert_eq!(svc.drop_on(&mut drag, Some("col-todo")).unwrap(), DropOutcome::NoDrag);
    assert_eq!(svc.get_task(&task.id).unwrap(), task);
}

#[test]
fn drop_on_foreign_column_fails_and_resets() {
    let svc = memory();
    let other = svc.create_project("Other").unwrap();
    let foreign = svc.add_column(&other.id, "Elsewhere", None).unwrap();
    let task = svc
        .add_task(&new_task("project-default", "col-todo", "stay home"))
        .unwrap();

    let mut drag = DragState::Idle;
    drag.start_drag(task.clone());
    assert!(svc.drop_on(&mut drag, Some(&foreign.id)).is_err());
    assert_eq!(drag, DragState::Idle);
    assert_eq!(svc.get_task(&task.id).unwrap().column_id, "col-todo");
}

#[test]
fn touch_long_press_moves_task() {
    let svc = memory();
    let task = svc
        .add_task(&new_task("project-default", "col-todo", "touch me"))
        .unwrap();

    let mut drag = DragState::Idle;
    let mut gesture = TouchGesture::new();
    let t0 = Instant::now();
    gesture.press(task.clone(), Point::new(10.0, 10.0), t0);
    gesture.tick(t0 + Duration::from_millis(200), &mut drag);
    gesture.move_to(Point::new(400.0, 10.0));

    let column = match gesture.release(t0 + Duration::from_millis(600), Some("col-completed"), &mut drag) {
        TouchOutcome::Drop(column) => column,
        other => panic!("expected a drop, got {other:?}"),
    };
    let result = svc.drop_on(&mut drag, Some(&column)).unwrap();
    assert!(matches!(result, DropOutcome::Moved(t) if t.column_id == "col-completed"));
}

#[test]
fn reorder_writes_dense_positions_sqlite() {
    let svc = sqlite();
    let order: Vec<String> = ["col-in-review", "col-completed", "col-todo", "col-in-progress"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    svc.reorder_columns("project-default", &order).unwrap();
    let cols = svc.list_columns("project-default").unwrap();
    let ids: Vec<&str> = cols.iter().map(|c| c.id.as_str()).collect();
    let positions: Vec<i64> = cols.iter().map(|c| c.position).collect();
    assert_eq!(ids, order.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(positions, [0, 1, 2, 3]);
}

#[test]
fn last_entries_are_guarded() {
    let svc = memory();
    let projects = svc.list_projects().unwrap();
    assert!(matches!(
        svc.delete_project(&projects[0].id),
        Err(ServiceError::Rejected(_))
    ));
    assert_eq!(svc.list_projects().unwrap(), projects);

    for which in [Catalog::TaskTypes, Catalog::Priorities] {
        loop {
            let names: Vec<String> = svc
                .settings()
                .unwrap()
                .catalog(which)
                .iter()
                .map(|l| l.name.clone())
                .collect();
            if names.len() == 1 {
                let before = svc.settings().unwrap();
                assert!(matches!(
                    svc.remove_label(which, &names[0]),
                    Err(ServiceError::Rejected(_))
                ));
                assert_eq!(svc.settings().unwrap(), before);
                break;
            }
            svc.remove_label(which, &names[0]).unwrap();
        }
    }
}

#[test]
fn project_delete_leaves_other_projects_alone() {
    let svc = sqlite();
    let doomed = svc.create_project("Doomed").unwrap();
    svc.list_columns(&doomed.id).unwrap();
    svc.add_task(&new_task(&doomed.id, "col-todo", "gone")).unwrap();
    let kept = svc
        .add_task(&new_task("project-default", "col-todo", "kept"))
        .unwrap();

    svc.delete_project(&doomed.id).unwrap();
    let all = svc.db().list_all_tasks().unwrap();
    assert_eq!(all, vec![kept]);
    assert_eq!(svc.list_columns("project-default").unwrap().len(), 4);
}

#[test]
fn column_delete_is_scoped_to_its_project() {
    let svc = memory();
    let other = svc.create_project("Other").unwrap();
    let mine = svc
        .add_task(&new_task("project-default", "col-todo", "mine"))
        .unwrap();
    let theirs = svc.add_task(&new_task(&other.id, "col-todo", "theirs")).unwrap();
    let sibling = svc
        .add_task(&new_task("project-default", "col-completed", "sibling"))
        .unwrap();

    svc.delete_column("project-default", "col-todo").unwrap();
    let ids: Vec<String> = svc
        .db()
        .list_all_tasks()
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert!(!ids.contains(&mine.id));
    assert!(ids.contains(&theirs.id));
    assert!(ids.contains(&sibling.id));
}

#[test]
fn board_view_applies_all_filters() {
    let svc = memory();
    let mut a = new_task("project-default", "col-todo", "Design login");
    a.priority = "High".into();
    a.task_type = "Design".into();
    svc.add_task(&a).unwrap();
    let mut b = new_task("project-default", "col-in-progress", "API login");
    b.priority = "High".into();
    b.task_type = "Back-end".into();
    svc.add_task(&b).unwrap();
    svc.add_task(&new_task("project-default", "col-todo", "Unrelated")).unwrap();

    let query = TaskQuery::from_inputs("LOGIN", "High", "All");
    let board = svc.board("project-default", &query).unwrap();
    assert_eq!(board.len(), 4);
    let count: usize = board.iter().map(|c| c.tasks.len()).sum();
    assert_eq!(count, 2);

    let query = TaskQuery::from_inputs("login", "All", "Design");
    let board = svc.board("project-default", &query).unwrap();
    let titles: Vec<&str> = board
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.title.as_str()))
        .collect();
    assert_eq!(titles, ["Design login"]);
}

#[test]
fn deleted_project_accepts_no_new_work() {
    let svc = sqlite();
    let doomed = svc.create_project("Doomed").unwrap();
    svc.list_columns(&doomed.id).unwrap();
    svc.delete_project(&doomed.id).unwrap();

    let task = svc.add_task(&new_task(&doomed.id, "col-todo", "orphan"));
    assert!(matches!(task, Err(ServiceError::NotFound(_))));
    let column = svc.add_column(&doomed.id, "Late", None);
    assert!(matches!(column, Err(ServiceError::NotFound(_))));
    assert!(svc
        .tasks_by_column(&doomed.id, "col-todo", None, None)
        .is_err());

    assert!(svc.db().list_all_tasks().unwrap().is_empty());
    assert!(!svc.db().kv().exists(&columns_key(&doomed.id)).unwrap());
}
