//! A cloneable, lock-guarded floor controller for async games.
//!
//! Floor operations are all-or-nothing and must never overlap. Rather than
//! queue a second "advance" behind the first (which would skip a floor),
//! a mutating call that finds the controller busy fails fast with
//! [`FloorError::Busy`].

use std::sync::Arc;

use delve_rooms::RoomContent;
use tokio::sync::{Mutex, MutexGuard, broadcast};
use tracing::trace;

use crate::{FloorController, FloorError, FloorListener, FloorPhase, FloorSnapshot};

/// Default capacity of the event channel.
const EVENT_CHANNEL_SIZE: usize = 16;

/// Lifecycle events fanned out to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorEvent {
    FloorGenerated { index: u32, snapshot: FloorSnapshot },
    RunCompleted { floors: u32 },
    FloorCleared,
}

/// Forwards controller callbacks into the broadcast channel.
struct BroadcastListener {
    tx: broadcast::Sender<FloorEvent>,
}

impl BroadcastListener {
    fn send(&self, event: FloorEvent) {
        // No subscribers is fine; events are advisory.
        if self.tx.send(event).is_err() {
            trace!("floor event dropped, no subscribers");
        }
    }
}

impl FloorListener for BroadcastListener {
    fn on_floor_generated(&mut self, index: u32, snapshot: &FloorSnapshot) {
        self.send(FloorEvent::FloorGenerated {
            index,
            snapshot: snapshot.clone(),
        });
    }

    fn on_run_completed(&mut self, floors: u32) {
        self.send(FloorEvent::RunCompleted { floors });
    }

    fn on_floor_cleared(&mut self) {
        self.send(FloorEvent::FloorCleared);
    }
}

/// Shared handle to a [`FloorController`].
///
/// Cheap to clone; every clone drives the same controller.
pub struct SharedFloorController<C: RoomContent> {
    inner: Arc<Mutex<FloorController<C>>>,
    events: broadcast::Sender<FloorEvent>,
}

impl<C: RoomContent> Clone for SharedFloorController<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            events: self.events.clone(),
        }
    }
}

impl<C: RoomContent> SharedFloorController<C> {
    pub fn new(mut controller: FloorController<C>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        controller.add_listener(BroadcastListener { tx: events.clone() });
        Self {
            inner: Arc::new(Mutex::new(controller)),
            events,
        }
    }

    /// Receives every event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.events.subscribe()
    }

    fn try_acquire(&self) -> Result<MutexGuard<'_, FloorController<C>>, FloorError> {
        self.inner.try_lock().map_err(|_| FloorError::Busy)
    }

    /// See [`FloorController::start_run`]. Returns the new floor's snapshot.
    pub fn start_run(&self) -> Result<FloorSnapshot, FloorError> {
        let mut floors = self.try_acquire()?;
        floors.start_run()?;
        floors.snapshot().ok_or(FloorError::InvalidState {
            operation: "start a run",
            state: floors.state(),
        })
    }

    /// See [`FloorController::generate_floor`].
    pub fn generate_floor(&self, index: u32) -> Result<FloorSnapshot, FloorError> {
        let mut floors = self.try_acquire()?;
        floors.generate_floor(index)?;
        floors.snapshot().ok_or(FloorError::InvalidState {
            operation: "generate a floor",
            state: floors.state(),
        })
    }

    /// See [`FloorController::advance_floor`].
    pub fn advance_floor(&self) -> Result<FloorPhase, FloorError> {
        self.try_acquire()?.advance_floor()
    }

    /// See [`FloorController::clear_floor`].
    pub fn clear_floor(&self) -> Result<usize, FloorError> {
        Ok(self.try_acquire()?.clear_floor())
    }

    /// Waits for the controller and returns its phase.
    pub async fn state(&self) -> FloorPhase {
        self.inner.lock().await.state()
    }

    /// Waits for the controller and returns a snapshot of the live floor.
    pub async fn snapshot(&self) -> Option<FloorSnapshot> {
        self.inner.lock().await.snapshot()
    }

    /// Waits for exclusive access, for queries not covered above.
    ///
    /// Mutating calls made through other clones fail with
    /// [`FloorError::Busy`] while the guard is held.
    pub async fn lock(&self) -> MutexGuard<'_, FloorController<C>> {
        self.inner.lock().await
    }
}
