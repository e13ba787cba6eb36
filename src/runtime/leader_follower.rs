/*!
# Leader-Follower Thread Pool

A fixed-size worker pool sharing one FIFO task queue and a distinguished
leader index. At any time exactly one worker is the leader; when work
arrives, the leader dequeues the head task, promotes the next worker to
leader, and only then executes the task outside the lock. The executing
worker therefore rotates round-robin while tasks run in submission order.

Wake-ups are broadcast on both submission and leader rotation. Waking a
single worker is not enough: the woken worker may not be the leader, in
which case it would re-check its predicate and go back to sleep with the
task still queued.

Shutdown is cooperative: `stop` wakes everyone, the in-flight task runs to
completion, and tasks still queued are abandoned.

# Examples

```rust
use spantree::runtime::leader_follower::LeaderFollowerPool;
use std::sync::mpsc;

let pool = LeaderFollowerPool::new(4);
pool.start();

let (tx, rx) = mpsc::channel();
for i in 0..8 {
    let tx = tx.clone();
    pool.add_task(Box::new(move || {
        tx.send(i).unwrap();
    }));
}
let mut done: Vec<i32> = rx.iter().take(8).collect();
done.sort();
assert_eq!(done, (0..8).collect::<Vec<_>>());
pool.stop();
```
*/

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::thread::JoinHandle;

use tracing::debug;

/// A unit of work; executed exactly once by some pool worker.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

thread_local! {
    static WORKER_ID: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Id of the pool worker running the current thread, if any.
///
/// Set for the duration of a worker thread's life; `None` on every other
/// thread. Lets a task observe which worker executes it.
pub fn current_worker() -> Option<usize> {
    WORKER_ID.get()
}

struct PoolState {
    queue: VecDeque<Task>,
    leader: usize,
    stop: bool,
}

struct Shared {
    state: Mutex<PoolState>,
    cond: Condvar,
    size: usize,
}

impl Shared {
    // A worker panicking inside a task must not take the whole pool down
    // with a poisoned mutex.
    fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A Leader-Follower worker pool over a FIFO task queue.
pub struct LeaderFollowerPool {
    shared: Arc<Shared>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl LeaderFollowerPool {
    /// Creates a pool with `size` workers (at least one). Workers do not run
    /// until [`start`](Self::start) is called.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PoolState {
                    queue: VecDeque::new(),
                    leader: 0,
                    stop: false,
                }),
                cond: Condvar::new(),
                size,
            }),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Number of workers.
    pub fn size(&self) -> usize {
        self.shared.size
    }

    /// Spawns the workers. Idempotent while the pool is running; after a
    /// [`stop`](Self::stop) the pool can be started again.
    pub fn start(&self) {
        let mut handles = self
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !handles.is_empty() {
            return;
        }
        {
            let mut state = self.shared.lock();
            state.stop = false;
            state.leader = 0;
        }
        for id in 0..self.shared.size {
            let shared = Arc::clone(&self.shared);
            handles.push(thread::spawn(move || worker_loop(&shared, id)));
        }
        debug!(workers = self.shared.size, "leader-follower pool started");
    }

    /// Enqueues a task and wakes all workers so the current leader runs it.
    pub fn add_task(&self, task: Task) {
        let mut state = self.shared.lock();
        state.queue.push_back(task);
        self.shared.cond.notify_all();
    }

    /// Signals shutdown, wakes all workers, and joins them. The in-flight
    /// task finishes; queued tasks are dropped. Idempotent.
    pub fn stop(&self) {
        {
            let mut state = self.shared.lock();
            state.stop = true;
            self.shared.cond.notify_all();
        }
        let handles = {
            let mut handles = self
                .handles
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *handles)
        };
        for handle in handles {
            let _ = handle.join();
        }
        debug!("leader-follower pool stopped");
    }
}

impl Drop for LeaderFollowerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

fn worker_loop(shared: &Arc<Shared>, id: usize) {
    WORKER_ID.set(Some(id));
    let mut state = shared.lock();
    loop {
        while !state.stop && (state.queue.is_empty() || state.leader != id) {
            state = shared
                .cond
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.stop {
            return;
        }
        // This worker is the leader and the queue is non-empty: take the
        // head task, hand leadership to the next worker, and execute
        // outside the lock.
        if let Some(task) = state.queue.pop_front() {
            state.leader = (id + 1) % shared.size;
            shared.cond.notify_all();
            drop(state);
            debug!(worker = id, "executing task");
            task();
            state = shared.lock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_tasks_run_exactly_once() {
        let pool = LeaderFollowerPool::new(2);
        pool.start();
        let (tx, rx) = mpsc::channel();
        for i in 0..10 {
            let tx = tx.clone();
            pool.add_task(Box::new(move || {
                tx.send(i).unwrap();
            }));
        }
        let mut seen: Vec<usize> = (0..10)
            .map(|_| rx.recv_timeout(Duration::from_secs(5)).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..10).collect::<Vec<_>>());
        pool.stop();
    }

    #[test]
    fn test_executing_worker_rotates_round_robin() {
        let pool = LeaderFollowerPool::new(4);
        pool.start();
        let (tx, rx) = mpsc::channel();
        for task_index in 0..8 {
            let tx = tx.clone();
            pool.add_task(Box::new(move || {
                tx.send((task_index, current_worker().unwrap())).unwrap();
            }));
        }
        // Task k is dequeued k-th, and the leader at the k-th dequeue is
        // worker k mod N.
        for _ in 0..8 {
            let (task_index, worker) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(worker, task_index % 4);
        }
        pool.stop();
    }

    #[test]
    fn test_stop_is_idempotent_and_restartable() {
        let pool = LeaderFollowerPool::new(1);
        pool.start();
        pool.stop();
        pool.stop();

        pool.start();
        let (tx, rx) = mpsc::channel();
        pool.add_task(Box::new(move || {
            tx.send(()).unwrap();
        }));
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        pool.stop();
    }

    #[test]
    fn test_zero_size_is_clamped_to_one() {
        let pool = LeaderFollowerPool::new(0);
        assert_eq!(pool.size(), 1);
    }
}
