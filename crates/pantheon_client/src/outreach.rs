//! Outreach workflow: batch actions with optimistic local state and
//! rollback on failure.
//!
//! State machine per invocation, identical for apply, send, and
//! follow-up:
//!
//! ```text
//! Idle -> Submitting -> { Success, Partial, Failed } -> Idle
//! ```
//!
//! One instance drives one page's batch action. The selection and the
//! applied markers live inside the instance and are discarded with it,
//! so workflows on different pages never share mutable state. The
//! `&mut self` receiver serializes invocations; the explicit state
//! check guards re-entrancy through queued callers.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use pantheon_common::api::{MessageDraft, SendStatus, XpAwarded};
use pantheon_common::selection::SelectionSet;

use crate::api::{ApiError, BackendApi};
use crate::markers::AppliedMarkers;
use crate::report::{BatchOutcome, BatchReport};

/// Workflow errors, all rejected before any state change.
///
/// A remote failure is not an error here: it settles into a `Failed`
/// report so the caller always has something to render.
#[derive(Debug, thiserror::Error)]
pub enum OutreachError {
    /// Nothing to do: empty selection, or every target already
    /// actioned this session.
    #[error("No targets selected")]
    NoTargetsSelected,

    /// A batch is already in flight on this instance.
    #[error("A batch action is already in flight")]
    BatchInFlight,

    /// The backend failed during a side-effect-free preview step.
    #[error("Backend error: {0}")]
    Remote(#[from] ApiError),
}

/// Batch phase of a workflow instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchState {
    #[default]
    Idle,
    Submitting,
}

/// Orchestrates one page's batch actions against the backend.
pub struct OutreachWorkflow<C> {
    client: C,
    selection: SelectionSet,
    markers: AppliedMarkers,
    state: BatchState,
}

impl<C: BackendApi> OutreachWorkflow<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            selection: SelectionSet::new(),
            markers: AppliedMarkers::new(),
            state: BatchState::Idle,
        }
    }

    /// The selection this workflow consults for its next batch action.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn markers(&self) -> &AppliedMarkers {
        &self.markers
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    /// The owning collection was replaced: the selection no longer
    /// refers to live entities and is dropped wholesale.
    pub fn collection_replaced(&mut self) {
        self.selection.clear();
    }

    /// Apply to every eligible selected job in one batch.
    pub async fn apply_jobs(&mut self) -> Result<BatchReport, OutreachError> {
        let targets = self.begin()?;
        let report = match self.client.submit_batch_apply(&targets).await {
            Ok(outcome) => self.settle(
                &targets,
                &outcome.succeeded_ids,
                outcome.xp_awarded,
                outcome.notifications,
            ),
            Err(e) => self.roll_back(&targets, e),
        };
        self.state = BatchState::Idle;
        Ok(report)
    }

    /// Generate one draft per eligible selected id without touching
    /// markers or the selection. Drafts are immutable snapshots; the
    /// later send operates on them even if the selection changes in
    /// between.
    pub async fn draft_messages(&mut self) -> Result<Vec<MessageDraft>, OutreachError> {
        if self.state == BatchState::Submitting {
            return Err(OutreachError::BatchInFlight);
        }
        let targets = self.eligible(self.selection.as_slice());
        if targets.is_empty() {
            return Err(OutreachError::NoTargetsSelected);
        }
        let drafts = self.client.submit_draft_messages(&targets).await?;
        debug!("Generated {} outreach drafts", drafts.len());
        Ok(drafts)
    }

    /// Send previously generated drafts as one batch, keyed by each
    /// draft's target id.
    ///
    /// The drafts list is independent of the live selection: a target
    /// deselected or even gone from the collection since drafting is
    /// still sent from the draft's captured subject and body.
    pub async fn send_messages(
        &mut self,
        drafts: &[MessageDraft],
    ) -> Result<BatchReport, OutreachError> {
        if self.state == BatchState::Submitting {
            return Err(OutreachError::BatchInFlight);
        }
        let to_send: Vec<MessageDraft> = drafts
            .iter()
            .filter(|d| !self.markers.is_actioned(&d.target_id))
            .cloned()
            .collect();
        if to_send.is_empty() {
            return Err(OutreachError::NoTargetsSelected);
        }
        let targets: Vec<String> = to_send.iter().map(|d| d.target_id.clone()).collect();

        self.state = BatchState::Submitting;
        self.markers.mark_pending(&targets);
        debug!("Sending {} outreach messages", targets.len());

        let report = match self.client.submit_send_messages(&to_send).await {
            Ok(outcome) => {
                let confirmed = confirmed_targets(&targets, &outcome.results_by_target_id);
                self.settle(&targets, &confirmed, outcome.xp_awarded, outcome.notifications)
            }
            Err(e) => self.roll_back(&targets, e),
        };
        self.state = BatchState::Idle;
        Ok(report)
    }

    /// Send a follow-up to every eligible selected contacted-record id.
    pub async fn send_follow_up(&mut self) -> Result<BatchReport, OutreachError> {
        let targets = self.begin()?;
        let report = match self.client.submit_follow_up(&targets).await {
            Ok(outcome) => {
                let confirmed = confirmed_targets(&targets, &outcome.results_by_target_id);
                self.settle(&targets, &confirmed, outcome.xp_awarded, outcome.notifications)
            }
            Err(e) => self.roll_back(&targets, e),
        };
        self.state = BatchState::Idle;
        Ok(report)
    }

    /// Enter `Submitting` with the eligible target list, or reject
    /// synchronously with no state change.
    fn begin(&mut self) -> Result<Vec<String>, OutreachError> {
        if self.state == BatchState::Submitting {
            return Err(OutreachError::BatchInFlight);
        }
        let targets = self.eligible(self.selection.as_slice());
        if targets.is_empty() {
            return Err(OutreachError::NoTargetsSelected);
        }
        self.state = BatchState::Submitting;
        self.markers.mark_pending(&targets);
        debug!("Batch submitting {} targets", targets.len());
        Ok(targets)
    }

    /// Ids eligible for submission: the given list, deduplicated in
    /// first-occurrence order, minus targets already actioned this
    /// session. Advisory only; the backend stays authoritative and the
    /// `Partial` branch absorbs any mismatch.
    fn eligible(&self, ids: &[String]) -> Vec<String> {
        let mut targets: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.markers.is_actioned(id) && !targets.contains(id) {
                targets.push(id.clone());
            }
        }
        targets
    }

    /// Finalize confirmed targets, revert the rest, and assemble the
    /// aggregated report.
    fn settle(
        &mut self,
        targets: &[String],
        confirmed: &[String],
        xp_awarded: XpAwarded,
        notifications: Vec<String>,
    ) -> BatchReport {
        let mut succeeded_ids = Vec::new();
        let mut reverted_ids = Vec::new();
        for id in targets {
            if confirmed.iter().any(|c| c == id) {
                self.markers.finalize(id);
                succeeded_ids.push(id.clone());
            } else {
                self.markers.revert(id);
                reverted_ids.push(id.clone());
            }
        }

        let outcome = if reverted_ids.is_empty() {
            self.selection.clear();
            BatchOutcome::Success
        } else {
            warn!(
                "Backend confirmed {} of {} targets; reverting the rest",
                succeeded_ids.len(),
                targets.len()
            );
            // Retry UX for the rejected subset is the caller's call;
            // only confirmed ids leave the selection.
            for id in &succeeded_ids {
                self.selection.remove(id);
            }
            BatchOutcome::Partial
        };

        BatchReport {
            outcome,
            succeeded_ids,
            reverted_ids,
            xp_awarded,
            notifications,
        }
    }

    /// Full rollback on remote failure. The selection is preserved so
    /// the user's intent survives for a retry.
    fn roll_back(&mut self, targets: &[String], error: ApiError) -> BatchReport {
        warn!("Batch of {} targets failed: {}", targets.len(), error);
        for id in targets {
            self.markers.revert(id);
        }
        BatchReport {
            outcome: BatchOutcome::Failed,
            succeeded_ids: Vec::new(),
            reverted_ids: targets.to_vec(),
            xp_awarded: XpAwarded::new(),
            notifications: vec![format!("Batch action failed: {}", error)],
        }
    }
}

/// Targets with a confirmed success status, in submission order.
fn confirmed_targets(
    targets: &[String],
    results: &BTreeMap<String, SendStatus>,
) -> Vec<String> {
    targets
        .iter()
        .filter(|id| matches!(results.get(*id), Some(SendStatus::Success)))
        .cloned()
        .collect()
}
