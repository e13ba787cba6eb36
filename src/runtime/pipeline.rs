/*!
# Pipeline of Active Objects

A chain of single-threaded stages. Each stage owns a function, a private
FIFO inbox guarded by a mutex/condition pair, and a worker thread; after
running its function on a task the stage moves the task into the next
stage's inbox and wakes it. The tail stage consumes the task.

Tasks flow through every stage in the order they entered stage zero, and
distinct tasks may occupy distinct stages at the same time. Inboxes are
unbounded; task creation is assumed to be rate-limited upstream.

`stop` flags and joins the stages front to back; a stage exits once it
observes an empty inbox with its stop flag set. Because a stage is only
flagged after its predecessor has exited, in-flight tasks always complete
the remaining stages before the pipeline goes down.

# Examples

```rust
use spantree::runtime::pipeline::{Pipeline, StageFn};
use std::sync::mpsc;

let (tx, rx) = mpsc::channel::<String>();
let stages: Vec<StageFn<(String, mpsc::Sender<String>)>> = vec![
    Box::new(|task| task.0.push('a')),
    Box::new(|task| task.0.push('b')),
    Box::new(|task| {
        let _ = task.1.send(task.0.clone());
    }),
];
let pipeline = Pipeline::new(stages);
pipeline.start();
pipeline.add_task((String::new(), tx));
assert_eq!(rx.recv().unwrap(), "ab");
pipeline.stop();
```
*/

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::thread::JoinHandle;

use tracing::debug;

/// A stage function; mutates the task in place.
pub type StageFn<T> = Box<dyn Fn(&mut T) + Send + Sync + 'static>;

struct StageState<T> {
    inbox: VecDeque<T>,
    stop: bool,
}

struct Stage<T> {
    func: StageFn<T>,
    state: Mutex<StageState<T>>,
    cond: Condvar,
}

impl<T> Stage<T> {
    fn lock(&self) -> MutexGuard<'_, StageState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An ordered pipeline of active-object stages over tasks of type `T`.
pub struct Pipeline<T> {
    stages: Vec<Arc<Stage<T>>>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl<T> Pipeline<T> {
    /// Creates a pipeline with one stage per function, in order.
    pub fn new(functions: Vec<StageFn<T>>) -> Self {
        let stages = functions
            .into_iter()
            .map(|func| {
                Arc::new(Stage {
                    func,
                    state: Mutex::new(StageState {
                        inbox: VecDeque::new(),
                        stop: false,
                    }),
                    cond: Condvar::new(),
                })
            })
            .collect();
        Self {
            stages,
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn num_stages(&self) -> usize {
        self.stages.len()
    }

    /// Enqueues a task into the head stage and wakes it.
    pub fn add_task(&self, task: T) {
        if let Some(head) = self.stages.first() {
            let mut state = head.lock();
            state.inbox.push_back(task);
            head.cond.notify_one();
        }
    }

    /// Stops the pipeline and joins the workers. Stages are flagged and
    /// joined front to back: a stage's stop flag is only raised once the
    /// stage before it has exited, so nothing can be forwarded into a dead
    /// inbox and tasks already inside the pipeline finish every remaining
    /// stage. Idempotent.
    pub fn stop(&self) {
        let handles = {
            let mut handles = self
                .handles
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *handles)
        };
        if handles.is_empty() {
            return;
        }
        for (stage, handle) in self.stages.iter().zip(handles) {
            {
                let mut state = stage.lock();
                state.stop = true;
                stage.cond.notify_all();
            }
            let _ = handle.join();
        }
        debug!("pipeline stopped");
    }
}

impl<T: Send + 'static> Pipeline<T> {
    /// Spawns one worker thread per stage. Idempotent while running; after a
    /// [`stop`](Self::stop) the pipeline can be started again.
    pub fn start(&self) {
        let mut handles = self
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !handles.is_empty() {
            return;
        }
        for stage in &self.stages {
            stage.lock().stop = false;
        }
        for (index, stage) in self.stages.iter().enumerate() {
            let stage = Arc::clone(stage);
            let next = self.stages.get(index + 1).cloned();
            handles.push(thread::spawn(move || stage_loop(&stage, next.as_deref())));
        }
        debug!(stages = self.stages.len(), "pipeline started");
    }
}

impl<T> Drop for Pipeline<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn stage_loop<T>(stage: &Stage<T>, next: Option<&Stage<T>>) {
    loop {
        let task = {
            let mut state = stage.lock();
            while state.inbox.is_empty() && !state.stop {
                state = stage
                    .cond
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            if state.inbox.is_empty() && state.stop {
                return;
            }
            state.inbox.pop_front()
        };
        let Some(mut task) = task else { continue };
        (stage.func)(&mut task);
        if let Some(next) = next {
            let mut state = next.lock();
            state.inbox.push_back(task);
            next.cond.notify_one();
        }
    }
}
