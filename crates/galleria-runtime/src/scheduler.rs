//! Per-tick cooperative scheduler.
//!
//! Replaces recursive "request the next frame" callbacks with an explicit list
//! of tasks stepped once per render tick. Every task carries a
//! [`CancellationToken`]; a cancelled task is dropped before it can write.

use tracing::trace;

use crate::token::CancellationToken;

/// What a task wants after one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskStatus {
    /// Step again next tick.
    Running,
    /// Done; remove the task.
    Finished,
}

type TaskStep<T> = Box<dyn FnMut(&mut T, f64) -> TaskStatus>;

struct ScheduledTask<T> {
    label: &'static str,
    token: CancellationToken,
    step: TaskStep<T>,
}

/// Runs tasks against a shared target of type `T` once per tick.
pub struct TickScheduler<T> {
    tasks: Vec<ScheduledTask<T>>,
}

impl<T> Default for TickScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for TickScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler")
            .field("tasks", &self.tasks.iter().map(|t| t.label).collect::<Vec<_>>())
            .finish()
    }
}

impl<T> TickScheduler<T> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task. It is first stepped on the next [`run`](Self::run).
    pub fn schedule(
        &mut self,
        label: &'static str,
        token: CancellationToken,
        step: impl FnMut(&mut T, f64) -> TaskStatus + 'static,
    ) {
        self.tasks.push(ScheduledTask {
            label,
            token,
            step: Box::new(step),
        });
    }

    /// Step every live task once with `dt` seconds. Cancelled tasks are
    /// removed without being stepped. Returns the number of tasks that
    /// finished this tick.
    pub fn run(&mut self, target: &mut T, dt: f64) -> usize {
        let mut finished = 0;
        self.tasks.retain_mut(|task| {
            if task.token.is_cancelled() {
                trace!(task = task.label, "dropping cancelled task");
                return false;
            }
            match (task.step)(target, dt) {
                TaskStatus::Running => true,
                TaskStatus::Finished => {
                    finished += 1;
                    false
                }
            }
        });
        finished
    }

    /// Drop every task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Number of scheduled tasks, including ones cancelled since the last run.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there is nothing scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether any scheduled task is still live.
    pub fn has_live_tasks(&self) -> bool {
        self.tasks.iter().any(|t| !t.token.is_cancelled())
    }
}
