//! Run-after-current-operation task queue.

use std::collections::VecDeque;

/// FIFO of tasks that must not run inside the operation that scheduled them.
///
/// Owners push tasks while handling an operation and drain the queue once the
/// operation has finished its own state swap. Tasks pushed while draining are
/// run in the same drain, after the tasks already queued.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    tasks: VecDeque<T>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `task` to the back of the queue.
    pub fn schedule(&mut self, task: T) {
        self.tasks.push_back(task);
    }

    /// Next task to run, if any.
    pub fn next(&mut self) -> Option<T> {
        self.tasks.pop_front()
    }

    /// Whether no task is pending.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Drop every queued task matching `predicate`.
    pub fn cancel_where(&mut self, predicate: impl Fn(&T) -> bool) {
        self.tasks.retain(|task| !predicate(task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_run_in_fifo_order() {
        let mut queue = DeferredQueue::new();
        queue.schedule(1);
        queue.schedule(2);
        assert_eq!(queue.next(), Some(1));
        queue.schedule(3);
        assert_eq!(queue.next(), Some(2));
        assert_eq!(queue.next(), Some(3));
        assert_eq!(queue.next(), None);
    }

    #[test]
    fn cancel_where_removes_matching_tasks() {
        let mut queue = DeferredQueue::new();
        queue.schedule("complete");
        queue.schedule("other");
        queue.cancel_where(|t| *t == "complete");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.next(), Some("other"));
        assert!(queue.is_empty());
    }
}
