/// Identifier of one dispatched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Monotonic id generator shared by every request kind.
#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        self.next += 1;
        TaskId(self.next)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Rephrase,
    Translate,
    Usage,
}

impl TaskKind {
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Rephrase => "rephrase",
            TaskKind::Translate => "translate",
            TaskKind::Usage => "usage",
        }
    }
}

/// Completion of a request, tagged with the id it was dispatched under.
#[derive(Debug)]
pub struct TaskCompleted<R> {
    pub id: TaskId,
    pub result: R,
}

/// Latest outstanding request of one kind (stored in `TuiState`, mutated
/// only by the reducer).
///
/// Starting a new request supersedes the previous one, so at most the most
/// recently issued id can ever be finished.
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn start(&mut self, seq: &mut TaskSeq) -> TaskId {
        let id = seq.next_id();
        self.active = Some(id);
        id
    }

    /// Returns true (and clears the slot) only for the latest issued id.
    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }

    /// Orphans the outstanding request; its completion will be discarded.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub rephrase: TaskState,
    pub translate: TaskState,
    pub usage: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Rephrase => &self.rephrase,
            TaskKind::Translate => &self.translate,
            TaskKind::Usage => &self.usage,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Rephrase => &mut self.rephrase,
            TaskKind::Translate => &mut self.translate,
            TaskKind::Usage => &mut self.usage,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.rephrase.is_running() || self.translate.is_running() || self.usage.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_id_finishes() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();
        let first = state.start(&mut seq);
        let second = state.start(&mut seq);
        assert!(second > first);

        assert!(!state.finish_if_active(first));
        assert!(state.is_running());
        assert!(state.finish_if_active(second));
        assert!(!state.finish_if_active(second));
    }

    #[test]
    fn test_cleared_slot_discards_everything() {
        let mut seq = TaskSeq::default();
        let mut state = TaskState::default();
        let id = state.start(&mut seq);
        state.clear();
        assert!(!state.finish_if_active(id));
    }
}
