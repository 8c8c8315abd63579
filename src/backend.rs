//! Task storage backends.
//!
//! `TaskBoard` only talks to the [`TaskBackend`] trait; the local backend
//! keeps tasks in memory (optionally mirrored to a JSON file) while
//! [`crate::remote::RemoteBackend`] forwards to the REST API.

use crate::error::{AppError, Result};
use crate::task::{Task, TaskDraft, TaskUpdate};
use chrono::Utc;
use std::{fs, path::PathBuf};

pub trait TaskBackend {
    fn list(&mut self) -> Result<Vec<Task>>;
    fn create(&mut self, draft: &TaskDraft) -> Result<Task>;
    fn update(&mut self, id: u32, update: &TaskUpdate) -> Result<Task>;
    fn delete(&mut self, id: u32) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct LocalBackend {
    tasks: Vec<Task>,
    file: Option<PathBuf>,
}

impl LocalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a file-backed store. A missing file starts empty.
    pub fn with_file(path: impl Into<PathBuf>) -> Result<Self> {
        let file = path.into();
        let tasks = if file.exists() {
            let data = fs::read_to_string(&file)?;
            serde_json::from_str(&data)?
        } else {
            Vec::new()
        };
        tracing::debug!(path = %file.display(), count = tasks.len(), "loaded local tasks");
        Ok(Self {
            tasks,
            file: Some(file),
        })
    }

    /// Writes `tasks` to the file (if any) and only then makes them current,
    /// so a failed write leaves the previous list in place.
    fn commit(&mut self, tasks: Vec<Task>) -> Result<()> {
        if let Some(path) = &self.file {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(&tasks)?)?;
        }
        self.tasks = tasks;
        Ok(())
    }

    fn next_id(&self) -> u32 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

impl TaskBackend for LocalBackend {
    fn list(&mut self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn create(&mut self, draft: &TaskDraft) -> Result<Task> {
        let task = Task {
            id: self.next_id(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            deadline: draft.deadline.clone(),
            completed: false,
            created_at: Some(Utc::now()),
        };
        let mut tasks = self.tasks.clone();
        tasks.push(task.clone());
        self.commit(tasks)?;
        Ok(task)
    }

    fn update(&mut self, id: u32, update: &TaskUpdate) -> Result<Task> {
        let mut tasks = self.tasks.clone();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("task {id}")))?;
        update.apply_to(task);
        let task = task.clone();
        self.commit(tasks)?;
        Ok(task)
    }

    fn delete(&mut self, id: u32) -> Result<()> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| AppError::not_found(format!("task {id}")))?;
        let mut tasks = self.tasks.clone();
        tasks.remove(index);
        self.commit(tasks)
    }
}
