// src/services/widget_registry.rs
use std::{
    collections::{HashMap, hash_map},
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::{sync::RwLock, task::JoinHandle};
use tracing::info;

use crate::services::chat_client::ChatTransport;
use crate::session::SessionId;
use crate::widget::ChatWidget;

type Widgets<T> = HashMap<SessionId, Slot<T>>;

struct Slot<T> {
    widget: Arc<ChatWidget<T>>,
    last_active: Instant,
}

/// One widget per page session, keyed by session id. Each widget gets its own
/// clone of the transport.
#[derive(Clone)]
pub struct WidgetRegistry<T> {
    inner: Arc<RwLock<Widgets<T>>>,
    transport: T,
    ttl: Duration,
}

impl<T> Debug for WidgetRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl<T> WidgetRegistry<T>
where
    T: ChatTransport + Clone + 'static,
{
    pub fn new(transport: T, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            transport,
            ttl,
        }
    }

    // Create a fresh widget with a generated session id. A generated id
    // that is already live is drawn again, never overwritten.
    pub async fn create_widget(&self) -> Arc<ChatWidget<T>> {
        let mut guard = self.inner.write().await;
        loop {
            if let Some(widget) = claim(&mut guard, SessionId::generate(), &self.transport) {
                return widget;
            }
        }
    }

    /// Look a widget up and mark it active.
    pub async fn get(&self, session_id: &SessionId) -> Option<Arc<ChatWidget<T>>> {
        let mut guard = self.inner.write().await;
        guard.get_mut(session_id).map(|entry| {
            entry.last_active = Instant::now();
            Arc::clone(&entry.widget)
        })
    }

    pub async fn remove(&self, session_id: &SessionId) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove widgets idle longer than ttl. Widgets with a request in flight
    /// are kept. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, e| e.widget.is_busy() || now.duration_since(e.last_active) < self.ttl);
        before - guard.len()
    }

    /// Purge on a fixed interval until the runtime shuts down.
    pub fn spawn_purger(&self, every: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let removed = registry.purge_expired().await;
                if removed > 0 {
                    info!(removed, "purged idle widgets");
                }
            }
        })
    }

    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

// Installs a widget under `session_id` unless that id is taken.
fn claim<T>(widgets: &mut Widgets<T>, session_id: SessionId, transport: &T) -> Option<Arc<ChatWidget<T>>>
where
    T: ChatTransport + Clone + 'static,
{
    match widgets.entry(session_id) {
        hash_map::Entry::Occupied(_) => None,
        hash_map::Entry::Vacant(slot) => {
            let widget = Arc::new(ChatWidget::with_session(transport.clone(), slot.key().clone()));
            slot.insert(Slot { widget: Arc::clone(&widget), last_active: Instant::now() });
            Some(widget)
        }
    }
}
