//! Fire-and-forget dispatch of form snapshots
//!
//! Every change produces its own request. Nothing is debounced, merged,
//! ordered or cancelled; overlapping requests race and the last response to
//! arrive has no special meaning.

use std::cell::Cell;

use futures::task::{LocalFutureObj, LocalSpawn, LocalSpawnExt, SpawnError};
use tracing::{debug, error, warn};

use crate::error::DeliveryError;
use crate::payload::Payload;
use crate::transport::Transport;

/// Runs detached tasks on the browser's microtask queue
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

pub struct AutoSubmitter<T, S> {
    transport: T,
    spawner: S,
    next_id: Cell<u64>,
}

impl<T: Transport, S: LocalSpawn> AutoSubmitter<T, S> {
    pub const fn new(transport: T, spawner: S) -> Self {
        Self {
            transport,
            spawner,
            next_id: Cell::new(1),
        }
    }

    /// Start a POST of `payload` to `target` and return without waiting.
    ///
    /// The request is issued before this returns; only its completion runs
    /// as a detached task, whose failure path is the log.
    pub fn submit(&self, target: &str, payload: &Payload) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        debug!(request = id, url = target, fields = payload.len(), "Submitting form");
        let pending = self.transport.post(target, payload);
        let task_target = target.to_string();

        let task = async move {
            match pending.await {
                Ok(()) => debug!(request = id, "Form submitted"),
                Err(err) => report(id, &task_target, &err),
            }
        };

        if let Err(err) = self.spawner.spawn_local(task) {
            report(id, target, &DeliveryError::Spawn(err.to_string()));
        }
    }

    /// Requests issued so far
    pub fn submitted(&self) -> u64 {
        self.next_id.get() - 1
    }
}

fn report(id: u64, target: &str, err: &DeliveryError) {
    match err {
        DeliveryError::Status(status) => {
            warn!(request = id, url = target, status, "Server rejected volume update");
        }
        _ => error!(
            request = id,
            url = target,
            error = %err,
            "Error sending volume data update"
        ),
    }
}
