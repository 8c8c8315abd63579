use crate::backend::TaskBackend;
use crate::error::Result;
use crate::task::{Task, TaskDraft, TaskUpdate};

/// Client-side view of the task list.
///
/// `tasks` is always the last snapshot fetched from the backend: every
/// mutation goes to the backend first and is followed by a full
/// [`refresh`](Self::refresh). Backend failures are logged and otherwise
/// swallowed, so the previous snapshot stays on screen.
#[derive(Debug)]
pub struct TaskBoard<B> {
    backend: B,
    pub tasks: Vec<Task>,
    pub selected: usize,
}

impl<B: TaskBackend> TaskBoard<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
            selected: 0,
        }
    }

    pub fn refresh(&mut self) {
        match self.backend.list() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.clamp_selection();
            }
            Err(err) => tracing::error!(error = %err, "failed to fetch tasks"),
        }
    }

    pub fn add_task(&mut self, draft: TaskDraft) {
        if !draft.has_name() {
            tracing::debug!("ignoring task with empty name");
            return;
        }
        self.sync_after("add task", |backend| {
            let task = backend.create(&draft)?;
            tracing::info!(id = task.id, name = %task.name, "task added");
            Ok(())
        });
    }

    pub fn toggle_task(&mut self, id: u32) {
        let Some(completed) = self.find(id).map(|t| t.completed) else {
            tracing::warn!(id, "toggle on unknown task");
            return;
        };
        self.sync_after("toggle task", |backend| {
            backend.update(id, &TaskUpdate::completed(!completed))?;
            Ok(())
        });
    }

    pub fn update_task(&mut self, id: u32, update: TaskUpdate) {
        self.sync_after("update task", |backend| {
            backend.update(id, &update)?;
            Ok(())
        });
    }

    pub fn delete_task(&mut self, id: u32) {
        self.sync_after("delete task", |backend| {
            backend.delete(id)?;
            tracing::info!(id, "task deleted");
            Ok(())
        });
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.toggle_task(id);
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id) {
            self.delete_task(id);
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    fn find(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    /// Runs a backend mutation, logs a failure, then re-syncs regardless.
    fn sync_after<F>(&mut self, action: &str, op: F)
    where
        F: FnOnce(&mut B) -> Result<()>,
    {
        if let Err(err) = op(&mut self.backend) {
            tracing::error!(error = %err, "{action} failed");
        }
        self.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::error::AppError;

    fn board_with(names: &[&str]) -> TaskBoard<LocalBackend> {
        let mut board = TaskBoard::new(LocalBackend::new());
        for name in names {
            board.add_task(TaskDraft::new(*name));
        }
        board
    }

    /// Wraps the local backend, counting calls and failing on demand.
    #[derive(Default)]
    struct Scripted {
        inner: LocalBackend,
        calls: usize,
        fail: bool,
    }

    impl Scripted {
        fn check(&mut self) -> Result<()> {
            self.calls += 1;
            if self.fail {
                Err(AppError::Http("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    impl TaskBackend for Scripted {
        fn list(&mut self) -> Result<Vec<Task>> {
            self.check()?;
            self.inner.list()
        }
        fn create(&mut self, draft: &TaskDraft) -> Result<Task> {
            self.check()?;
            self.inner.create(draft)
        }
        fn update(&mut self, id: u32, update: &TaskUpdate) -> Result<Task> {
            self.check()?;
            self.inner.update(id, update)
        }
        fn delete(&mut self, id: u32) -> Result<()> {
            self.check()?;
            self.inner.delete(id)
        }
    }

    #[test]
    fn test_empty_name_is_noop() {
        let mut board = TaskBoard::new(Scripted::default());
        board.add_task(TaskDraft::new(""));
        board.add_task(TaskDraft::new("   "));
        assert!(board.tasks.is_empty());
        assert_eq!(board.backend.calls, 0);
    }

    #[test]
    fn test_add_resyncs_snapshot() {
        let board = board_with(&["Wash the dishes", "Water plants"]);
        let names: Vec<_> = board.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Wash the dishes", "Water plants"]);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut board = board_with(&["a"]);
        let id = board.tasks[0].id;
        let before = board.tasks[0].clone();

        board.toggle_task(id);
        assert!(board.tasks[0].completed);
        assert_eq!(board.completed_count(), 1);

        board.toggle_task(id);
        assert_eq!(board.tasks[0], before);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut board = TaskBoard::new(Scripted::default());
        board.toggle_task(99);
        assert_eq!(board.backend.calls, 0);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let mut board = board_with(&["a", "b", "c"]);
        let target = board.tasks[1].id;

        board.delete_task(target);

        assert_eq!(board.tasks.len(), 2);
        assert!(board.tasks.iter().all(|t| t.id != target));
    }

    #[test]
    fn test_delete_last_clamps_selection() {
        let mut board = board_with(&["a", "b"]);
        board.select_next();
        assert_eq!(board.selected, 1);
        board.delete_selected();
        assert_eq!(board.selected, 0);
        assert_eq!(board.selected_task().unwrap().name, "a");
    }

    #[test]
    fn test_update_task_edits_fields() {
        let mut board = board_with(&["draft"]);
        let id = board.tasks[0].id;
        board.update_task(
            id,
            TaskUpdate {
                name: Some("final".into()),
                deadline: Some("friday".into()),
                ..TaskUpdate::default()
            },
        );
        assert_eq!(board.tasks[0].name, "final");
        assert_eq!(board.tasks[0].deadline.as_deref(), Some("friday"));
    }

    #[test]
    fn test_failure_keeps_previous_snapshot() {
        let mut board = TaskBoard::new(Scripted::default());
        board.add_task(TaskDraft::new("kept"));
        assert_eq!(board.tasks.len(), 1);

        board.backend.fail = true;
        board.add_task(TaskDraft::new("lost"));
        board.toggle_selected();

        assert_eq!(board.tasks.len(), 1);
        assert_eq!(board.tasks[0].name, "kept");
        assert!(!board.tasks[0].completed);
    }

    #[test]
    fn test_selection_bounds() {
        let mut board = board_with(&["a", "b"]);
        board.select_previous();
        assert_eq!(board.selected, 0);
        board.select_next();
        board.select_next();
        assert_eq!(board.selected, 1);
    }

    #[test]
    fn test_delete_of_task_gone_from_server_resyncs() {
        let mut board = board_with(&["a", "b"]);
        let id = board.tasks[0].id;

        // Someone else removed it; the snapshot still shows it.
        board.backend.delete(id).unwrap();
        assert_eq!(board.tasks.len(), 2);
        assert!(matches!(board.backend.delete(id), Err(AppError::NotFound(_))));

        board.delete_task(id);

        assert_eq!(board.tasks.len(), 1);
        assert!(board.tasks.iter().all(|t| t.id != id));
    }

    #[test]
    fn test_failed_local_write_is_not_shown() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let backend = LocalBackend::with_file(blocker.join("tasks.json")).unwrap();
        let mut board = TaskBoard::new(backend);
        board.add_task(TaskDraft::new("unsaved"));

        assert!(board.tasks.is_empty());
        assert!(!blocker.join("tasks.json").exists());
    }
}
