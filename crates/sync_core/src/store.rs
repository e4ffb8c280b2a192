use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex, PoisonError, RwLock,
};

use serde::Serialize;
use shared::domain::{Campus, CampusId, Student, StudentId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::{action::Action, reducers};

const ACTION_CHANNEL_CAPACITY: usize = 256;

/// Every slice of application data at one point in time.
///
/// `campus` and `student` are `None` until a detail record is loaded, and again
/// after the loaded record is deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub campus: Option<Campus>,
    pub student: Option<Student>,
    pub all_campuses: Vec<Campus>,
    pub all_students: Vec<Student>,
}

impl Snapshot {
    pub fn reduce(self, action: &Action) -> Self {
        Self {
            campus: reducers::campus(self.campus, action),
            student: reducers::student(self.student, action),
            all_campuses: reducers::all_campuses(self.all_campuses, action),
            all_students: reducers::all_students(self.all_students, action),
        }
    }

    pub fn campus_id(&self) -> Option<CampusId> {
        self.campus.as_ref().map(|c| c.id)
    }

    pub fn student_id(&self) -> Option<StudentId> {
        self.student.as_ref().map(|s| s.id)
    }
}

type Listener = Arc<dyn Fn(&Snapshot) + Send + Sync>;

/// Holds the current [`Snapshot`] and applies actions to it.
pub struct Store {
    snapshot: RwLock<Arc<Snapshot>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    actions: broadcast::Sender<Action>,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_snapshot(Snapshot::default())
    }
}

impl Store {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
            actions,
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Runs every reducer against `action`, publishes the result and notifies
    /// listeners before returning.
    pub fn dispatch(&self, action: Action) -> Arc<Snapshot> {
        let next = {
            let mut guard = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
            let next = Arc::new(Snapshot::clone(&guard).reduce(&action));
            *guard = Arc::clone(&next);
            next
        };
        debug!(action = action.kind(), "store: dispatched");

        // Listeners run outside the lock so they may read or subscribe.
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }

        let _ = self.actions.send(action);
        next
    }

    pub fn subscribe<F>(self: &Arc<Self>, listener: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        Subscription {
            id,
            store: Arc::downgrade(self),
        }
    }

    /// Stream of applied actions, for consumers living on another task.
    pub fn subscribe_actions(&self) -> broadcast::Receiver<Action> {
        self.actions.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn remove_listener(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Handle returned by [`Store::subscribe`]. Dropping it keeps the listener
/// registered; call [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: std::sync::Weak<Store>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.id);
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
