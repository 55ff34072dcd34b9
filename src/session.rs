//! One plugin session: store, router, scheduler, view and host sink wired
//! together. Transports own a `Session` and feed it inbound messages in
//! arrival order.

use crate::error::Result;
use crate::host::{HostSink, Outbox};
use crate::models::FeatureTree;
use crate::protocol::{DomainEvent, HostMessage, Inbound};
use crate::reconcile::TreeDiff;
use crate::router::{self, Routed};
use crate::scheduler::RenderScheduler;
use crate::store::FeatureStore;
use crate::view::{TextView, ViewTree};

pub struct Session<S = Outbox, V = TextView> {
    store: FeatureStore,
    scheduler: RenderScheduler,
    view: V,
    sink: S,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Outbox::new(), TextView::new())
    }
}

impl<S: HostSink, V: ViewTree> Session<S, V> {
    pub fn new(sink: S, view: V) -> Self {
        Self {
            store: FeatureStore::new(),
            scheduler: RenderScheduler::new(),
            view,
            sink,
        }
    }

    pub fn handle(&mut self, inbound: Inbound) -> Result<()> {
        match inbound {
            Inbound::Host(message) => self.handle_host(message),
            Inbound::Event(event) => self.handle_event(event),
        }
    }

    pub fn handle_event(&mut self, event: DomainEvent) -> Result<()> {
        let routed = router::dispatch_event(&mut self.store, event)?;
        self.settle(routed);
        Ok(())
    }

    pub fn handle_host(&mut self, message: HostMessage) -> Result<()> {
        let routed = router::dispatch_host(&mut self.store, message)?;
        self.settle(routed);
        Ok(())
    }

    /// Scheduling boundary: reconcile the view if anything changed since
    /// the last tick.
    pub fn tick(&mut self) -> Option<TreeDiff> {
        self.scheduler.flush(self.store.tree(), &mut self.view)
    }

    pub fn tree(&self) -> &FeatureTree {
        self.store.tree()
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_render_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    fn settle(&mut self, routed: Routed) {
        if routed.changed {
            self.scheduler.mark_pending();
        }
        for message in routed.outbound {
            self.sink.send(message);
        }
    }
}
