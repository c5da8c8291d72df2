//! Drill-down controller
//!
//! Owns the view state and the committed snapshot. Every dispatched event
//! produces a [`Ticket`] tagged with the view it was issued for; a loaded
//! snapshot is only committed while that tag is still current, so a slow
//! response can never replace the data of a newer view.

use geodrill_core::models::{Snapshot, ViewState};
use geodrill_core::ports::StatsSource;
use geodrill_geo::{GeoValueResolver, RenderedRegion};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::aggregator::Aggregator;
use crate::navigator::{Event, FetchPlan, Navigator};

/// Identifies the navigation a request belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    /// Monotonic dispatch counter
    pub epoch: u64,
    pub view: ViewState,
}

/// An accepted navigation waiting for its data
#[derive(Debug, Clone)]
pub struct Ticket {
    tag: RequestTag,
    plan: FetchPlan,
    base: Arc<Snapshot>,
}

impl Ticket {
    pub fn tag(&self) -> &RequestTag {
        &self.tag
    }

    pub fn plan(&self) -> &FetchPlan {
        &self.plan
    }

    /// Snapshot that was committed when the ticket was issued
    pub fn base(&self) -> &Snapshot {
        &self.base
    }

    /// Load this ticket's snapshot
    pub async fn load<S: StatsSource>(&self, aggregator: &Aggregator<S>) -> Snapshot {
        aggregator.load_snapshot(&self.plan, &self.base).await
    }
}

/// Result of offering a loaded snapshot to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The snapshot became current
    Applied,
    /// A newer navigation superseded the ticket
    Discarded,
}

/// Navigator, aggregator and resolver behind one owner
pub struct DrillDown<S> {
    navigator: Navigator,
    aggregator: Arc<Aggregator<S>>,
    resolver: GeoValueResolver,
    epoch: u64,
    current: Arc<Snapshot>,
    publisher: watch::Sender<Arc<Snapshot>>,
}

impl<S: StatsSource> DrillDown<S> {
    /// Create a controller at the national view with an empty snapshot
    pub fn new(source: S, resolver: GeoValueResolver, timeout: Duration) -> Self {
        let current = Arc::new(Snapshot::empty(ViewState::National));
        let (publisher, _) = watch::channel(current.clone());

        Self {
            navigator: Navigator::new(),
            aggregator: Arc::new(Aggregator::new(source, timeout)),
            resolver,
            epoch: 0,
            current,
            publisher,
        }
    }

    /// View state after the last accepted event (may still be loading)
    pub fn view(&self) -> &ViewState {
        self.navigator.view()
    }

    /// Last committed snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.clone()
    }

    /// Read-only feed of committed snapshots for the presentation layer
    pub fn subscribe(&self) -> watch::Receiver<Arc<Snapshot>> {
        self.publisher.subscribe()
    }

    pub fn aggregator(&self) -> Arc<Aggregator<S>> {
        self.aggregator.clone()
    }

    pub fn resolver(&self) -> &GeoValueResolver {
        &self.resolver
    }

    /// Whether a ticket still matches the current navigation
    pub fn is_current(&self, tag: &RequestTag) -> bool {
        tag.epoch == self.epoch && &tag.view == self.navigator.view()
    }

    /// Accept an event: move the cursor and issue a ticket for its data.
    ///
    /// Returns `None` for ignored events; the cursor is unchanged then.
    pub fn dispatch(&mut self, event: Event) -> Option<Ticket> {
        let from = self.navigator.view().clone();
        let target = self.navigator.apply(&event)?;
        self.epoch += 1;

        let plan = FetchPlan::between(&self.current, &target);
        tracing::info!(
            from = %from,
            to = %target,
            epoch = self.epoch,
            sources = ?plan.sources(),
            "Navigating"
        );

        Some(Ticket {
            tag: RequestTag {
                epoch: self.epoch,
                view: target,
            },
            plan,
            base: self.current.clone(),
        })
    }

    /// Offer a loaded snapshot; stale tickets are discarded
    pub fn commit(&mut self, ticket: Ticket, snapshot: Snapshot) -> CommitOutcome {
        if !self.is_current(&ticket.tag) || snapshot.view != ticket.tag.view {
            tracing::debug!(
                stale_epoch = ticket.tag.epoch,
                current_epoch = self.epoch,
                view = %ticket.tag.view,
                "Discarding superseded snapshot"
            );
            return CommitOutcome::Discarded;
        }

        self.current = Arc::new(snapshot);
        self.publisher.send_replace(self.current.clone());
        CommitOutcome::Applied
    }

    /// Dispatch, load and commit one event.
    ///
    /// Returns `None` when the event was ignored.
    pub async fn navigate(&mut self, event: Event) -> Option<CommitOutcome> {
        let ticket = self.dispatch(event)?;
        let snapshot = ticket.load(&self.aggregator).await;
        Some(self.commit(ticket, snapshot))
    }

    /// Initial national load
    pub async fn start(&mut self) -> CommitOutcome {
        self.navigate(Event::Reset).await.unwrap_or(CommitOutcome::Discarded)
    }

    /// Click on a map geometry; the label is reconciled before navigating
    pub async fn click_map(&mut self, label: &str) -> Option<CommitOutcome> {
        let name = self.resolver.canonical_click(label).to_string();
        self.navigate(Event::ClickState(name)).await
    }

    /// Click on a table row: a state in the national table, a district otherwise
    pub async fn click_table_row(&mut self, name: &str) -> Option<CommitOutcome> {
        let event = match self.current.table_scope {
            None => Event::ClickState(name.to_string()),
            Some(_) => Event::ClickDistrict(name.to_string()),
        };
        self.navigate(event).await
    }

    /// Colour boundary geometry from the committed snapshot
    pub fn render_map<L: AsRef<str>>(&self, labels: &[L]) -> Vec<RenderedRegion> {
        self.resolver.resolve_values(
            labels,
            &self.current.map_data,
            self.current.view.selected_state(),
        )
    }
}
