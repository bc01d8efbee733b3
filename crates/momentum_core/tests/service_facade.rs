use momentum_core::db::{open_db_in_memory, DbError};
use momentum_core::{
    AddTaskOutcome, NewTask, RepoError, RepoResult, SqliteTaskRepository, Task, TaskId,
    TaskRepository, TaskService,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn payload(title: &str, impact: i64, priority: i64) -> NewTask {
    NewTask {
        title: title.to_string(),
        impact,
        priority: Some(priority),
        micro_task: None,
    }
}

/// In-memory repository double with switchable read/write failures.
#[derive(Default)]
struct FakeState {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<TaskId>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl FakeState {
    fn storage_error() -> RepoError {
        RepoError::Db(DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))
    }
}

struct FakeRepo {
    state: Rc<FakeState>,
}

impl TaskRepository for FakeRepo {
    fn create(&self, payload: &NewTask) -> RepoResult<Option<TaskId>> {
        if self.state.fail_writes.get() {
            return Err(FakeState::storage_error());
        }
        let Some(title) = payload.normalized_title() else {
            return Ok(None);
        };

        let id = self.state.next_id.get() + 1;
        self.state.next_id.set(id);
        self.state.tasks.borrow_mut().insert(
            0,
            Task {
                id,
                title,
                impact: payload.impact,
                micro_task: payload.normalized_micro_task(),
                completed: false,
                priority: payload.effective_priority(),
            },
        );
        Ok(Some(id))
    }

    fn list(&self) -> RepoResult<Vec<Task>> {
        if self.state.fail_reads.get() {
            return Err(FakeState::storage_error());
        }
        Ok(self.state.tasks.borrow().clone())
    }

    fn set_completed(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        if self.state.fail_writes.get() {
            return Err(FakeState::storage_error());
        }
        if let Some(task) = self
            .state
            .tasks
            .borrow_mut()
            .iter_mut()
            .find(|task| task.id == id)
        {
            task.completed = completed;
        }
        Ok(())
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        if self.state.fail_writes.get() {
            return Err(FakeState::storage_error());
        }
        self.state.tasks.borrow_mut().retain(|task| task.id != id);
        Ok(())
    }
}

fn fake_service() -> (TaskService<FakeRepo>, Rc<FakeState>) {
    let state = Rc::new(FakeState::default());
    let service = TaskService::new(FakeRepo {
        state: Rc::clone(&state),
    });
    (service, state)
}

#[test]
fn service_starts_not_ready_and_first_refresh_sets_ready() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);

    assert!(!service.is_ready());
    assert!(service.tasks().is_empty());

    service.refresh();
    assert!(service.is_ready());
}

#[test]
fn first_refresh_failure_still_reaches_ready() {
    let (mut service, state) = fake_service();
    state.fail_reads.set(true);

    service.refresh();
    assert!(service.is_ready());
    assert!(service.tasks().is_empty());
}

#[test]
fn refresh_failure_keeps_last_known_good_cache() {
    let (mut service, state) = fake_service();

    service.add_task(payload("keep me", 5, 3));
    service.add_task(payload("me too", 4, 2));
    assert_eq!(service.tasks().len(), 2);

    state.fail_reads.set(true);
    service.refresh();

    assert!(service.is_ready());
    assert_eq!(service.tasks().len(), 2);
    assert_eq!(service.tasks()[0].title, "me too");
}

#[test]
fn add_task_roundtrips_through_store_and_updates_cache() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);
    service.refresh();

    let outcome = service.add_task(NewTask {
        title: "  plan sprint  ".to_string(),
        impact: 6,
        priority: None,
        micro_task: Some("  open the board  ".to_string()),
    });

    let AddTaskOutcome::Added(id) = outcome else {
        panic!("expected Added, got {outcome:?}");
    };
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].id, id);
    assert_eq!(service.tasks()[0].title, "plan sprint");
    assert_eq!(service.tasks()[0].micro_task.as_deref(), Some("open the board"));
    assert_eq!(service.tasks()[0].priority, 1);
}

#[test]
fn add_task_with_blank_title_is_surfaced_as_rejection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);
    service.refresh();

    let outcome = service.add_task(payload("   ", 5, 1));
    assert_eq!(outcome, AddTaskOutcome::RejectedEmptyTitle);
    assert!(service.tasks().is_empty());
}

#[test]
fn add_task_store_failure_is_logged_not_raised() {
    let (mut service, state) = fake_service();
    service.refresh();

    state.fail_writes.set(true);
    let outcome = service.add_task(payload("doomed", 5, 1));

    assert_eq!(outcome, AddTaskOutcome::StoreFailed);
    assert!(service.tasks().is_empty());
}

#[test]
fn toggle_and_delete_resynchronize_the_cache() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);
    service.refresh();

    let AddTaskOutcome::Added(first) = service.add_task(payload("first", 4, 2)) else {
        panic!("expected Added");
    };
    let AddTaskOutcome::Added(second) = service.add_task(payload("second", 8, 5)) else {
        panic!("expected Added");
    };

    service.toggle_completion(first, true);
    let toggled = service
        .tasks()
        .iter()
        .find(|task| task.id == first)
        .unwrap();
    assert!(toggled.completed);

    service.toggle_completion(first, false);
    let restored = service
        .tasks()
        .iter()
        .find(|task| task.id == first)
        .unwrap();
    assert!(!restored.completed);

    service.delete_task(second);
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].id, first);
}

#[test]
fn mutation_store_failure_leaves_cache_untouched() {
    let (mut service, state) = fake_service();
    service.add_task(payload("stable", 5, 3));
    assert_eq!(service.tasks().len(), 1);

    state.fail_writes.set(true);
    service.toggle_completion(1, true);
    service.delete_task(1);

    assert_eq!(service.tasks().len(), 1);
    assert!(!service.tasks()[0].completed);
}

#[test]
fn stats_are_recomputed_from_the_current_cache() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);
    service.refresh();
    assert_eq!(service.stats().total, 0);

    let AddTaskOutcome::Added(done) = service.add_task(payload("done soon", 4, 1)) else {
        panic!("expected Added");
    };
    service.add_task(payload("still open", 8, 1));
    service.toggle_completion(done, true);

    let stats = service.stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_rate, 50);
    assert_eq!(stats.average_impact, 6.0);
    assert_eq!(stats.momentum_score, 36);
}

#[test]
fn top_priorities_rank_open_tasks_by_priority_then_impact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut service = TaskService::new(repo);
    service.refresh();

    service.add_task(payload("a", 3, 5));
    service.add_task(payload("b", 9, 5));
    service.add_task(payload("c", 1, 8));
    let AddTaskOutcome::Added(done) = service.add_task(payload("finished", 10, 10)) else {
        panic!("expected Added");
    };
    service.toggle_completion(done, true);

    let titles: Vec<_> = service
        .top_priorities()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["c", "b", "a"]);
}
