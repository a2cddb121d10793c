//! Async task bookkeeping.
//!
//! At most one task per [`TaskKind`] is tracked. A completion is accepted
//! only if its id still matches the tracked one, so abandoning a task is
//! enough to make its late result harmless.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

/// Monotonic id source for spawned tasks.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        self.next = self.next.wrapping_add(1);
        TaskId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Round-trip to the admin authority.
    AdminLogin,
    /// One mock review request.
    Review,
}

impl TaskKind {
    const COUNT: usize = 2;

    fn slot(self) -> usize {
        match self {
            TaskKind::AdminLogin => 0,
            TaskKind::Review => 1,
        }
    }
}

/// Handle of a task the update layer has just made active.
#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

/// Sent by the runtime when a task has produced `result`.
#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

#[derive(Debug, Clone)]
struct Running {
    id: TaskId,
    cancel: Option<CancellationToken>,
}

/// The tracked task of one kind, if any.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    running: Option<Running>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.running = Some(Running {
            id: started.id,
            cancel: started.cancel.clone(),
        });
    }

    /// Stops tracking `id` if it is the tracked task. A `false` return means
    /// the completion is stale and must be dropped.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        self.running.take_if(|running| running.id == id).is_some()
    }

    /// Stops tracking the current task and hands back its cancel token.
    pub fn abandon(&mut self) -> Option<CancellationToken> {
        self.running.take().and_then(|running| running.cancel)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    slots: [TaskState; TaskKind::COUNT],
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        &self.slots[kind.slot()]
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        &mut self.slots[kind.slot()]
    }

    pub fn is_any_running(&self) -> bool {
        self.slots.iter().any(TaskState::is_running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_completion_is_rejected() {
        let mut seq = TaskSeq::default();
        let first = seq.next_id();
        let second = seq.next_id();
        assert_ne!(first, second);

        let mut state = TaskState::default();
        state.on_started(&TaskStarted {
            id: second,
            cancel: Some(CancellationToken::new()),
        });
        assert!(!state.finish_if_active(first));
        assert!(state.is_running());
        assert!(state.finish_if_active(second));
        assert!(!state.is_running());
        assert!(state.abandon().is_none());
    }

    #[test]
    fn test_abandoned_task_drops_late_completion() {
        let mut tasks = Tasks::default();
        let id = TaskId(7);
        let cancel = CancellationToken::new();
        tasks.state_mut(TaskKind::Review).on_started(&TaskStarted {
            id,
            cancel: Some(cancel.clone()),
        });
        assert!(tasks.is_any_running());
        assert!(!tasks.state(TaskKind::AdminLogin).is_running());

        let token = tasks.state_mut(TaskKind::Review).abandon();
        assert!(token.is_some_and(|t| !t.is_cancelled()));
        assert!(!tasks.state_mut(TaskKind::Review).finish_if_active(id));
        assert!(!tasks.is_any_running());
    }
}
