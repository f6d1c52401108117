//! One viewer's session on one ticket
//!
//! Turns stage clicks into commits through the store, holds the rollback
//! confirmation gate, and keeps the local copy of the ticket consistent with
//! what the store accepted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::display::{FillFlash, StageTrackView};
use crate::domain::{
    apply_stage, evaluate_transition, resolve, DenialReason, StageTransitionRequest,
    TransitionDecision, TransitionResult,
};
use crate::errors::{Result, ShopError};
use crate::schemas::{Role, Stage, Ticket};
use crate::store::TicketStore;

use super::events::StageEvent;
use super::gate::{ConfirmationGate, RollbackPrompt};

const EVENT_CHANNEL_CAPACITY: usize = 64;
const DEFAULT_FLASH_MS: i64 = 1200;

/// Result of a stage click
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// The store accepted the new stage
    Committed { from: Stage, to: Stage },
    /// A rollback is staged; show the prompt and wait for confirm or cancel
    AwaitingConfirmation(RollbackPrompt),
    /// Nothing happened
    Denied { reason: DenialReason },
}

/// Result of confirming a staged rollback
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// The store accepted the rollback
    Committed { from: Stage, to: Stage },
    /// No rollback was waiting
    NothingPending,
    /// The staged target stopped making sense (the ticket already sits there)
    Discarded { reason: DenialReason },
}

/// Stage-editing session for a single ticket and a single role
pub struct StageSession {
    store: Arc<dyn TicketStore>,
    ticket: Ticket,
    role: Role,
    gate: ConfirmationGate,
    flash: Option<FillFlash>,
    flash_duration: chrono::Duration,
    events: broadcast::Sender<StageEvent>,
}

impl std::fmt::Debug for StageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageSession")
            .field("ticket", &self.ticket.id())
            .field("stage", &self.ticket.stage())
            .field("role", &self.role)
            .field("gate", &self.gate)
            .finish()
    }
}

impl StageSession {
    /// Load a ticket and start a session on it.
    ///
    /// # Errors
    /// * `TicketNotFound` - If the store has no ticket with this id
    pub async fn open(store: Arc<dyn TicketStore>, ticket_id: &str, role: Role) -> Result<Self> {
        let ticket = store.get_ticket(ticket_id).await?;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        tracing::debug!(
            ticket = ticket_id,
            %role,
            stage = ticket.stage_index(),
            "stage session opened"
        );

        Ok(StageSession {
            store,
            ticket,
            role,
            gate: ConfirmationGate::Idle,
            flash: None,
            flash_duration: chrono::Duration::milliseconds(DEFAULT_FLASH_MS),
            events,
        })
    }

    /// Use a different fill highlight duration
    pub fn with_flash_duration(mut self, duration: chrono::Duration) -> Self {
        self.flash_duration = duration;
        self
    }

    /// Publish events on an existing channel shared with the rest of the app
    pub fn with_events(mut self, events: broadcast::Sender<StageEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StageEvent> {
        self.events.subscribe()
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn gate(&self) -> ConfirmationGate {
        self.gate
    }

    /// The prompt to display while a rollback waits, if any
    pub fn pending_rollback(&self) -> Option<RollbackPrompt> {
        self.gate
            .pending_target()
            .map(|target| RollbackPrompt::new(self.ticket.id(), target))
    }

    /// Handle a click on a stage position.
    ///
    /// Denied requests and clamped indices are not errors.
    ///
    /// # Errors
    /// * `CommitFailed` - The store rejected the write; the local stage is unchanged
    /// * `TicketNotFound` - The ticket disappeared from the store
    pub async fn request_stage(&mut self, requested_index: i64) -> Result<RequestOutcome> {
        let request = StageTransitionRequest {
            ticket_id: self.ticket.id().to_string(),
            requested_index,
            role: self.role,
        };

        match resolve(&self.ticket, &request) {
            TransitionResult::Denied { reason } => {
                tracing::debug!(
                    ticket = %request.ticket_id,
                    role = %self.role,
                    requested = requested_index,
                    %reason,
                    "stage request ignored"
                );
                Ok(RequestOutcome::Denied { reason })
            }
            TransitionResult::AwaitConfirmation { target } => {
                self.gate.stage(target);
                tracing::info!(
                    ticket = %request.ticket_id,
                    target = target.index(),
                    "rollback staged, waiting for confirmation"
                );
                Ok(RequestOutcome::AwaitingConfirmation(RollbackPrompt::new(
                    request.ticket_id,
                    target,
                )))
            }
            TransitionResult::Apply { next_ticket } => {
                let (from, to) = self.commit(next_ticket).await?;
                self.gate.clear();
                Ok(RequestOutcome::Committed { from, to })
            }
        }
    }

    /// Commit the staged rollback.
    ///
    /// On failure the rollback stays staged so the user can retry.
    pub async fn confirm_rollback(&mut self) -> Result<ConfirmOutcome> {
        let Some(target) = self.gate.pending_target() else {
            return Ok(ConfirmOutcome::NothingPending);
        };

        // The ticket may have moved since the prompt went up.
        if let TransitionDecision::Denied { reason } =
            evaluate_transition(self.role, self.ticket.stage(), target)
        {
            self.gate.clear();
            tracing::debug!(ticket = self.ticket.id(), %reason, "staged rollback discarded");
            return Ok(ConfirmOutcome::Discarded { reason });
        }

        let next = apply_stage(&self.ticket, target);
        let (from, to) = self.commit(next).await?;
        self.gate.clear();
        Ok(ConfirmOutcome::Committed { from, to })
    }

    /// Drop the staged rollback. Returns whether one was waiting.
    pub fn cancel_rollback(&mut self) -> bool {
        let cancelled = self.gate.clear();
        if let Some(target) = cancelled {
            tracing::debug!(
                ticket = self.ticket.id(),
                target = target.index(),
                "rollback cancelled"
            );
        }
        cancelled.is_some()
    }

    /// Reload the ticket from the store, picking up changes by other actors.
    pub async fn refresh(&mut self) -> Result<()> {
        let latest = self.store.get_ticket(self.ticket.id()).await?;
        if latest.stage() != self.ticket.stage() {
            tracing::debug!(
                ticket = latest.id(),
                from = self.ticket.stage_index(),
                to = latest.stage_index(),
                "stage changed elsewhere"
            );
            self.flash = Some(FillFlash::start(latest.stage(), Utc::now(), self.flash_duration));
        }
        self.ticket = latest;
        Ok(())
    }

    /// Derived progress track for this session's role
    pub fn view(&self, now: DateTime<Utc>) -> StageTrackView {
        StageTrackView::build(self.ticket.stage(), self.role, self.flash.as_ref(), now)
    }

    /// Apply `next` locally, persist it, and revert to the prior snapshot if
    /// the store refuses.
    async fn commit(&mut self, next: Ticket) -> Result<(Stage, Stage)> {
        let snapshot = std::mem::replace(&mut self.ticket, next);
        let from = snapshot.stage();
        let to = self.ticket.stage();

        match self.store.set_stage(snapshot.id(), to).await {
            Ok(stored) => {
                self.ticket = stored;
                self.flash = Some(FillFlash::start(to, Utc::now(), self.flash_duration));

                let event = StageEvent::committed(
                    snapshot.id(),
                    snapshot.shop_id(),
                    from,
                    to,
                    self.role,
                );
                tracing::info!(
                    ticket = snapshot.id(),
                    from = from.index(),
                    to = to.index(),
                    role = %self.role,
                    "{}",
                    event.notice()
                );
                // No subscribers is fine; delivery belongs to the app.
                let _ = self.events.send(event);

                Ok((from, to))
            }
            Err(ShopError::TicketNotFound(id)) => {
                self.ticket = snapshot;
                Err(ShopError::TicketNotFound(id))
            }
            Err(e) => {
                tracing::warn!(
                    ticket = snapshot.id(),
                    to = to.index(),
                    error = %e,
                    "stage commit failed"
                );
                let ticket_id = snapshot.id().to_string();
                self.ticket = snapshot;
                Err(ShopError::commit_failed(ticket_id, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTicketStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store whose next `failures` stage writes fail
    struct FlakyStore {
        inner: MemoryTicketStore,
        failures: AtomicUsize,
        writes: AtomicUsize,
    }

    impl FlakyStore {
        fn new(ticket: Ticket, failures: usize) -> Self {
            FlakyStore {
                inner: MemoryTicketStore::with_tickets([ticket]),
                failures: AtomicUsize::new(failures),
                writes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TicketStore for FlakyStore {
        async fn get_ticket(&self, id: &str) -> Result<Ticket> {
            self.inner.get_ticket(id).await
        }

        async fn set_stage(&self, id: &str, stage: Stage) -> Result<Ticket> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let left = self.failures.load(Ordering::SeqCst);
            if left > 0 {
                self.failures.store(left - 1, Ordering::SeqCst);
                return Err(ShopError::Io(std::io::Error::other("store offline")));
            }
            self.inner.set_stage(id, stage).await
        }

        async fn create_ticket(&self, ticket: Ticket) -> Result<Ticket> {
            self.inner.create_ticket(ticket).await
        }

        async fn list_tickets(&self, shop_id: &str) -> Result<Vec<Ticket>> {
            self.inner.list_tickets(shop_id).await
        }
    }

    fn ticket_at(stage: Stage) -> Ticket {
        let ticket = Ticket::new("t-100".to_string(), "shop-a".to_string(), "client-1".to_string())
            .with_details("Lee Park", "2019 Outback", "Rattle on cold start");
        apply_stage(&ticket, stage)
    }

    async fn session_at(stage: Stage, role: Role) -> (Arc<MemoryTicketStore>, StageSession) {
        let store = Arc::new(MemoryTicketStore::with_tickets([ticket_at(stage)]));
        let session = StageSession::open(store.clone(), "t-100", role).await.unwrap();
        (store, session)
    }

    async fn stored_stage(store: &MemoryTicketStore) -> Stage {
        store.get_ticket("t-100").await.unwrap().stage()
    }

    #[tokio::test]
    async fn test_open_missing_ticket() {
        let store = Arc::new(MemoryTicketStore::new());
        let err = StageSession::open(store, "nope", Role::Owner).await.unwrap_err();
        assert!(matches!(err, ShopError::TicketNotFound(_)));
    }

    #[tokio::test]
    async fn test_staff_advance_commits_without_prompt() {
        let (store, mut session) = session_at(Stage::Diagnosing, Role::Staff).await;

        let outcome = session.request_stage(2).await.unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Committed {
                from: Stage::Diagnosing,
                to: Stage::WaitingApproval
            }
        );
        assert_eq!(session.ticket().stage_index(), 2);
        assert_eq!(stored_stage(&store).await, Stage::WaitingApproval);
        assert!(session.pending_rollback().is_none());
    }

    #[tokio::test]
    async fn test_staff_skip_denied() {
        let (store, mut session) = session_at(Stage::Diagnosing, Role::Staff).await;

        let outcome = session.request_stage(4).await.unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Denied {
                reason: DenialReason::NotNextStage
            }
        );
        assert_eq!(session.ticket().stage_index(), 1);
        assert_eq!(stored_stage(&store).await, Stage::Diagnosing);
    }

    #[tokio::test]
    async fn test_owner_rollback_confirmed() {
        let (store, mut session) = session_at(Stage::ReadyForPickup, Role::Owner).await;

        let outcome = session.request_stage(2).await.unwrap();
        let RequestOutcome::AwaitingConfirmation(prompt) = outcome else {
            panic!("expected a confirmation prompt, got {:?}", outcome);
        };
        assert_eq!(prompt.label, "Waiting Approval");
        assert_eq!(session.ticket().stage_index(), 5);
        assert_eq!(stored_stage(&store).await, Stage::ReadyForPickup);

        let confirmed = session.confirm_rollback().await.unwrap();
        assert_eq!(
            confirmed,
            ConfirmOutcome::Committed {
                from: Stage::ReadyForPickup,
                to: Stage::WaitingApproval
            }
        );
        assert_eq!(session.ticket().stage_index(), 2);
        assert_eq!(stored_stage(&store).await, Stage::WaitingApproval);
        assert_eq!(session.gate(), ConfirmationGate::Idle);
    }

    #[tokio::test]
    async fn test_owner_rollback_cancelled() {
        let (store, mut session) = session_at(Stage::ReadyForPickup, Role::Owner).await;

        session.request_stage(2).await.unwrap();
        assert!(session.cancel_rollback());
        assert!(!session.cancel_rollback());

        assert_eq!(session.ticket().stage_index(), 5);
        assert_eq!(stored_stage(&store).await, Stage::ReadyForPickup);
        assert_eq!(session.confirm_rollback().await.unwrap(), ConfirmOutcome::NothingPending);
    }

    #[tokio::test]
    async fn test_client_click_is_a_no_op() {
        let (store, mut session) = session_at(Stage::RepairInProgress, Role::Client).await;

        for requested in [-1, 0, 2, 3, 4, 6, 99] {
            let outcome = session.request_stage(requested).await.unwrap();
            assert_eq!(
                outcome,
                RequestOutcome::Denied {
                    reason: DenialReason::ReadOnlyRole
                }
            );
        }
        assert_eq!(session.ticket().stage_index(), 3);
        assert!(session.pending_rollback().is_none());
        assert_eq!(stored_stage(&store).await, Stage::RepairInProgress);
    }

    #[tokio::test]
    async fn test_owner_out_of_range_request_clamps() {
        let (store, mut session) = session_at(Stage::WaitingApproval, Role::Owner).await;

        let outcome = session.request_stage(99).await.unwrap();
        assert_eq!(
            outcome,
            RequestOutcome::Committed {
                from: Stage::WaitingApproval,
                to: Stage::Completed
            }
        );
        assert_eq!(session.ticket().stage_index(), 6);
        assert_eq!(stored_stage(&store).await, Stage::Completed);
    }

    #[tokio::test]
    async fn test_second_rollback_replaces_staged_target() {
        let (_store, mut session) = session_at(Stage::Completed, Role::Owner).await;

        session.request_stage(4).await.unwrap();
        session.request_stage(1).await.unwrap();
        assert_eq!(session.pending_rollback().unwrap().target, Stage::Diagnosing);

        session.confirm_rollback().await.unwrap();
        assert_eq!(session.ticket().stage(), Stage::Diagnosing);
    }

    #[tokio::test]
    async fn test_forward_move_clears_staged_rollback() {
        let (_store, mut session) = session_at(Stage::QualityCheck, Role::Owner).await;

        session.request_stage(1).await.unwrap();
        assert!(session.gate().is_pending());

        session.request_stage(6).await.unwrap();
        assert!(!session.gate().is_pending());
        assert_eq!(session.ticket().stage(), Stage::Completed);
    }

    #[tokio::test]
    async fn test_failed_commit_reverts_and_is_retryable() {
        let store = Arc::new(FlakyStore::new(ticket_at(Stage::Diagnosing), 1));
        let mut session = StageSession::open(store.clone(), "t-100", Role::Staff).await.unwrap();

        let err = session.request_stage(2).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.code(), "COMMIT_FAILED");
        assert_eq!(session.ticket().stage(), Stage::Diagnosing);
        assert_eq!(store.get_ticket("t-100").await.unwrap().stage(), Stage::Diagnosing);

        let outcome = session.request_stage(2).await.unwrap();
        assert!(matches!(outcome, RequestOutcome::Committed { .. }));
        assert_eq!(store.writes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_rollback_stays_pending_until_retry_succeeds() {
        let store = Arc::new(FlakyStore::new(ticket_at(Stage::ReadyForPickup), 1));
        let mut session = StageSession::open(store.clone(), "t-100", Role::Owner).await.unwrap();

        session.request_stage(2).await.unwrap();
        let err = session.confirm_rollback().await.unwrap_err();
        assert!(matches!(err, ShopError::CommitFailed { .. }));
        assert_eq!(session.ticket().stage(), Stage::ReadyForPickup);
        assert_eq!(session.pending_rollback().unwrap().target, Stage::WaitingApproval);

        let outcome = session.confirm_rollback().await.unwrap();
        assert!(matches!(outcome, ConfirmOutcome::Committed { .. }));
        assert_eq!(store.get_ticket("t-100").await.unwrap().stage(), Stage::WaitingApproval);
        assert!(session.pending_rollback().is_none());
    }

    #[tokio::test]
    async fn test_failed_commit_publishes_nothing() {
        let store = Arc::new(FlakyStore::new(ticket_at(Stage::CheckedIn), 1));
        let mut session = StageSession::open(store, "t-100", Role::Staff).await.unwrap();
        let mut rx = session.subscribe();

        let _ = session.request_stage(1).await;
        assert!(rx.try_recv().is_err());
        assert!(!session.view(Utc::now()).is_flashing());
    }

    #[tokio::test]
    async fn test_rollback_publishes_client_notice() {
        let (_store, mut session) = session_at(Stage::ReadyForPickup, Role::Owner).await;
        let mut rx = session.subscribe();

        session.request_stage(2).await.unwrap();
        assert!(rx.try_recv().is_err()); // nothing before confirmation

        session.confirm_rollback().await.unwrap();
        let event = rx.try_recv().unwrap();
        assert!(event.notifies_client());
        assert_eq!(event.notice(), "ticket stage rolled back to Waiting Approval");
        assert_eq!(event.ticket_id(), "t-100");
    }

    #[tokio::test]
    async fn test_shared_event_channel() {
        let (tx, mut rx) = broadcast::channel(8);
        let (_store, session) = session_at(Stage::CheckedIn, Role::Staff).await;
        let mut session = session.with_events(tx);

        session.request_stage(1).await.unwrap();
        let event = rx.try_recv().unwrap();
        assert!(matches!(event, StageEvent::Advanced { to: Stage::Diagnosing, .. }));
    }

    #[tokio::test]
    async fn test_commit_starts_fill_flash() {
        let (_store, session) = session_at(Stage::CheckedIn, Role::Staff).await;
        let mut session = session.with_flash_duration(chrono::Duration::seconds(30));
        assert!(!session.view(Utc::now()).is_flashing());

        session.request_stage(1).await.unwrap();
        let view = session.view(Utc::now());
        assert!(view.is_flashing());
        assert!(view.positions[1].flashing);

        let later = Utc::now() + chrono::Duration::seconds(31);
        assert!(!session.view(later).is_flashing());
    }

    #[tokio::test]
    async fn test_refresh_picks_up_other_actor_and_flashes() {
        let (store, mut session) = session_at(Stage::Diagnosing, Role::Client).await;

        store.set_stage("t-100", Stage::WaitingApproval).await.unwrap();
        session.refresh().await.unwrap();

        assert_eq!(session.ticket().stage(), Stage::WaitingApproval);
        assert!(session.view(Utc::now()).is_flashing());
    }

    #[tokio::test]
    async fn test_confirm_discards_stale_rollback() {
        let (store, mut session) = session_at(Stage::QualityCheck, Role::Owner).await;

        session.request_stage(2).await.unwrap();
        // Another device already rolled the ticket back to the same stage.
        store.set_stage("t-100", Stage::WaitingApproval).await.unwrap();
        session.refresh().await.unwrap();

        let outcome = session.confirm_rollback().await.unwrap();
        assert_eq!(
            outcome,
            ConfirmOutcome::Discarded {
                reason: DenialReason::NoChange
            }
        );
        assert!(!session.gate().is_pending());
    }

    #[tokio::test]
    async fn test_staff_reaches_completed_in_six_commits() {
        let (store, mut session) = session_at(Stage::CheckedIn, Role::Staff).await;

        let mut commits = 0;
        for _ in 0..20 {
            let next = session.ticket().stage_index() as i64 + 1;
            if let RequestOutcome::Committed { .. } = session.request_stage(next).await.unwrap() {
                commits += 1;
            }
        }
        assert_eq!(commits, 6);
        assert_eq!(stored_stage(&store).await, Stage::Completed);
    }
}
