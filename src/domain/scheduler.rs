// src/domain/scheduler.rs
use std::collections::BTreeMap;
use std::time::Duration;
use log::debug;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after a delay, with cancellation.
pub trait Scheduler: Send + Sync + 'static {
    type Handle: Send + 'static;

    fn schedule_after(&self, delay: Duration, task: Task) -> Self::Handle;
    fn cancel(&self, handle: Self::Handle);
}

/// Schedules tasks on a tokio runtime.
#[derive(Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        TokioScheduler { runtime }
    }

    /// Binds to the runtime of the calling context. Panics outside a runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl Scheduler for TokioScheduler {
    type Handle = JoinHandle<()>;

    fn schedule_after(&self, delay: Duration, task: Task) -> Self::Handle {
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        })
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.abort();
    }
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_id: u64,
    // Keyed by (deadline, id) so ties run in scheduling order.
    tasks: BTreeMap<(Duration, u64), Task>,
}

/// Virtual-time scheduler: tasks only run when [`ManualScheduler::advance`] is called.
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<ManualQueue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualHandle {
    deadline: Duration,
    id: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.queue.lock().now
    }

    pub fn pending(&self) -> usize {
        self.queue.lock().tasks.len()
    }

    /// Moves virtual time forward, running every task that falls due, including
    /// tasks scheduled by tasks run during this call. Returns how many ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.queue.lock().now + by;
        let mut ran = 0;
        loop {
            let due = {
                let mut queue = self.queue.lock();
                let next_key = queue.tasks.keys().next().copied();
                match next_key {
                    Some(key) if key.0 <= target => {
                        queue.now = key.0;
                        queue.tasks.remove(&key)
                    }
                    _ => None,
                }
            };
            match due {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => break,
            }
        }
        self.queue.lock().now = target;
        ran
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn schedule_after(&self, delay: Duration, task: Task) -> Self::Handle {
        let mut queue = self.queue.lock();
        let handle = ManualHandle {
            deadline: queue.now + delay,
            id: queue.next_id,
        };
        queue.next_id += 1;
        queue.tasks.insert((handle.deadline, handle.id), task);
        debug!("Manual task {} due at {:?}", handle.id, handle.deadline);
        handle
    }

    fn cancel(&self, handle: Self::Handle) {
        self.queue.lock().tasks.remove(&(handle.deadline, handle.id));
    }
}

impl<S: Scheduler> Scheduler for std::sync::Arc<S> {
    type Handle = S::Handle;

    fn schedule_after(&self, delay: Duration, task: Task) -> Self::Handle {
        (**self).schedule_after(delay, task)
    }

    fn cancel(&self, handle: Self::Handle) {
        (**self).cancel(handle)
    }
}
