//! Per-frame task registry.
//!
//! The engine only runs work that holds a live registration here. A
//! handle is released by `cancel`, and `cancel_all` releases everything
//! on shutdown.

use skylink_core::enums::FrameTask;

/// Registration handle returned by `FrameScheduler::register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    /// Live registrations in registration order.
    tasks: Vec<(TaskHandle, FrameTask)>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task to run every frame. A task that is already
    /// registered keeps its existing handle.
    pub fn register(&mut self, task: FrameTask) -> TaskHandle {
        if let Some(handle) = self.handle_of(task) {
            return handle;
        }
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.tasks.push((handle, task));
        handle
    }

    /// Release a registration. Returns false for unknown or already cancelled handles.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|(h, _)| *h != handle);
        self.tasks.len() != before
    }

    /// Release the registration of a task, if any.
    pub fn cancel_task(&mut self, task: FrameTask) -> bool {
        match self.handle_of(task) {
            Some(handle) => self.cancel(handle),
            None => false,
        }
    }

    /// Release every registration. Returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    pub fn handle_of(&self, task: FrameTask) -> Option<TaskHandle> {
        self.tasks
            .iter()
            .find(|(_, t)| *t == task)
            .map(|(handle, _)| *handle)
    }

    pub fn is_active(&self, task: FrameTask) -> bool {
        self.handle_of(task).is_some()
    }

    /// Registered tasks in the order they run.
    pub fn active_tasks(&self) -> Vec<FrameTask> {
        self.tasks.iter().map(|(_, task)| *task).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
