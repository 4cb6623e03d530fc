//! Delayed one-shot tasks
//!
//! Tasks let actors mutate themselves (or the stage) later, e.g. a monkey that
//! smiles and goes back to its normal face one second afterwards. Delays are
//! measured on the stage clock; every scheduled task runs exactly once unless
//! it is cancelled first.

use crate::error::Result;
use crate::identity::ActorId;
use crate::stage::Stage;
use crate::time::{Delay, Frame};
use crate::value::Value;
use std::fmt;

/// Closure run against the whole stage
pub type TaskFn = Box<dyn FnOnce(&mut Stage) -> Result<()>>;

/// Work performed when a task comes due
pub enum Job {
    /// Call a capability method on an actor
    Invoke {
        actor: ActorId,
        method: String,
        args: Vec<Value>,
    },
    /// Kill an actor
    Kill(ActorId),
    /// Run an arbitrary closure
    Call(TaskFn),
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::Invoke {
                actor,
                method,
                args,
            } => f
                .debug_struct("Invoke")
                .field("actor", actor)
                .field("method", method)
                .field("args", args)
                .finish(),
            Job::Kill(actor) => f.debug_tuple("Kill").field(actor).finish(),
            Job::Call(_) => f.write_str("Call(..)"),
        }
    }
}

/// A job plus the actor it concerns, if any
///
/// Killing the subject cancels the task.
#[derive(Debug)]
pub struct Task {
    subject: Option<ActorId>,
    job: Job,
}

impl Task {
    /// Call `method` on `actor`
    pub fn invoke(actor: ActorId, method: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            subject: Some(actor),
            job: Job::Invoke {
                actor,
                method: method.into(),
                args,
            },
        }
    }

    /// Kill `actor`
    pub fn kill(actor: ActorId) -> Self {
        Self {
            subject: Some(actor),
            job: Job::Kill(actor),
        }
    }

    /// Run a closure not tied to any actor
    pub fn call(f: impl FnOnce(&mut Stage) -> Result<()> + 'static) -> Self {
        Self {
            subject: None,
            job: Job::Call(Box::new(f)),
        }
    }

    /// Run a closure that is cancelled if `actor` is killed first
    pub fn call_for(actor: ActorId, f: impl FnOnce(&mut Stage) -> Result<()> + 'static) -> Self {
        Self {
            subject: Some(actor),
            job: Job::Call(Box::new(f)),
        }
    }

    pub fn subject(&self) -> Option<ActorId> {
        self.subject
    }

    pub fn job(&self) -> &Job {
        &self.job
    }

    pub fn into_job(self) -> Job {
        self.job
    }
}

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Something that can run tasks after a delay
pub trait TaskScheduler {
    /// Queue `task` to run once after `delay`
    fn schedule(&mut self, delay: Delay, task: Task) -> TaskId;

    /// Cancel a pending task, returning whether it was still pending
    fn cancel(&mut self, id: TaskId) -> bool;

    /// Cancel every pending task whose subject is `actor`
    fn cancel_for(&mut self, actor: ActorId) -> usize;

    /// Number of pending tasks
    fn pending(&self) -> usize;
}

#[derive(Debug)]
struct Scheduled {
    id: TaskId,
    due: Frame,
    task: Task,
}

/// Task queue keyed by due frame
///
/// Tasks due on the same frame run in the order they were scheduled.
#[derive(Debug)]
pub struct FrameScheduler {
    now: Frame,
    frames_per_second: u32,
    next_id: u64,
    scheduled: Vec<Scheduled>,
}

impl FrameScheduler {
    /// Create a scheduler at frame zero
    pub fn new(frames_per_second: u32) -> Self {
        Self {
            now: 0,
            frames_per_second: frames_per_second.max(1),
            next_id: 0,
            scheduled: Vec::new(),
        }
    }

    /// Move the scheduler's notion of the current frame forward
    pub fn advance_to(&mut self, frame: Frame) {
        self.now = self.now.max(frame);
    }

    pub fn now(&self) -> Frame {
        self.now
    }

    /// Remove and return every task due at or before `frame`, in run order
    pub fn take_due(&mut self, frame: Frame) -> Vec<(TaskId, Task)> {
        let split = self.scheduled.partition_point(|s| s.due <= frame);
        self.scheduled
            .drain(..split)
            .map(|s| (s.id, s.task))
            .collect()
    }

    /// Frame a pending task is due on
    pub fn due_frame(&self, id: TaskId) -> Option<Frame> {
        self.scheduled.iter().find(|s| s.id == id).map(|s| s.due)
    }
}

impl TaskScheduler for FrameScheduler {
    fn schedule(&mut self, delay: Delay, task: Task) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let due = self.now.saturating_add(delay.to_frames(self.frames_per_second));

        self.scheduled.push(Scheduled { id, due, task });
        // stable sort keeps scheduling order among equal due frames
        self.scheduled.sort_by_key(|s| s.due);
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.id != id);
        self.scheduled.len() != before
    }

    fn cancel_for(&mut self, actor: ActorId) -> usize {
        let before = self.scheduled.len();
        self.scheduled.retain(|s| s.task.subject != Some(actor));
        before - self.scheduled.len()
    }

    fn pending(&self) -> usize {
        self.scheduled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_due_order() {
        let mut scheduler = FrameScheduler::new(10);
        let late = scheduler.schedule(Delay::seconds(1.0), Task::kill(ActorId::new(1)));
        let early = scheduler.schedule(Delay::frames(2), Task::kill(ActorId::new(2)));
        let early_too = scheduler.schedule(Delay::frames(2), Task::kill(ActorId::new(3)));

        assert_eq!(scheduler.due_frame(late), Some(10));
        assert!(scheduler.take_due(1).is_empty());

        let due: Vec<_> = scheduler.take_due(2).into_iter().map(|(id, _)| id).collect();
        assert_eq!(due, vec![early, early_too]);
        assert_eq!(scheduler.pending(), 1);

        let due = scheduler.take_due(10);
        assert_eq!(due.len(), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = FrameScheduler::new(60);
        scheduler.advance_to(100);
        let id = scheduler.schedule(Delay::frames(5), Task::call(|_| Ok(())));
        assert_eq!(scheduler.due_frame(id), Some(105));
    }

    #[test]
    fn test_unreachable_delay_saturates() {
        let mut scheduler = FrameScheduler::new(60);
        scheduler.advance_to(5);
        let never = scheduler.schedule(Delay::frames(u64::MAX), Task::call(|_| Ok(())));
        let also_never = scheduler.schedule(Delay::seconds(1e300), Task::call(|_| Ok(())));

        assert_eq!(scheduler.due_frame(never), Some(u64::MAX));
        assert_eq!(scheduler.due_frame(also_never), Some(u64::MAX));
        assert!(scheduler.take_due(1_000_000).is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = FrameScheduler::new(60);
        let id = scheduler.schedule(Delay::frames(1), Task::call(|_| Ok(())));
        assert!(scheduler.cancel(id));
        assert!(!scheduler.cancel(id));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_cancel_for_subject() {
        let mut scheduler = FrameScheduler::new(60);
        let actor = ActorId::new(7);
        scheduler.schedule(Delay::frames(1), Task::invoke(actor, "normal", Vec::new()));
        scheduler.schedule(Delay::frames(1), Task::call_for(actor, |_| Ok(())));
        scheduler.schedule(Delay::frames(1), Task::kill(ActorId::new(8)));
        scheduler.schedule(Delay::frames(1), Task::call(|_| Ok(())));

        assert_eq!(scheduler.cancel_for(actor), 2);
        assert_eq!(scheduler.pending(), 2);
    }

    #[test]
    fn test_job_debug() {
        let task = Task::invoke(ActorId::new(1), "smile", vec![Value::from(1i64)]);
        assert!(format!("{:?}", task.job()).starts_with("Invoke"));
        assert_eq!(format!("{:?}", Task::call(|_| Ok(())).job()), "Call(..)");
    }
}
