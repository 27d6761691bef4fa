//! Schedule session: the in-memory store behind one schedule grid
//!
//! A session owns the schedule view, its notification center and the backend
//! handle. Mutations run on a working copy, are acknowledged by the backend,
//! and only then replace the view, so a failed commit leaves the grid as it
//! was. Nothing outlives the session.

use crate::backend::{ChangeRecord, CommitReceipt, ScheduleBackend};
use crate::core::data::{CoursePlacement, Schedule, Slot};
use crate::core::mutator::{DragGesture, DropOutcome, NewPlacement, PlacementEdit};
use crate::core::notification::{Notification, NotificationCenter, NotificationKind};
use crate::core::role::Role;
use crate::core::traits::{MutationOutcome, ScheduleCrud, ScheduleQuery};
use crate::utils::error::{AppResult, ScheduleError};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, info, warn};

const CONFLICT_TITLE: &str = "Conflit détecté";
const INVALID_TITLE: &str = "Placement impossible";

pub struct ScheduleSession<B: ScheduleBackend> {
    backend: B,
    role: Role,
    schedule: Schedule,
    notifications: NotificationCenter,
}

impl<B: ScheduleBackend> ScheduleSession<B> {
    /// Fetch `context` from the backend and open it for `role`
    pub async fn open(
        backend: B,
        role: Role,
        context: &str,
        notification_ttl: Duration,
    ) -> AppResult<Self> {
        let schedule = backend.fetch_schedule(context).await?;
        info!(context, %role, placements = schedule.len(), "schedule session opened");

        Ok(Self {
            backend,
            role,
            schedule,
            notifications: NotificationCenter::new(notification_ttl),
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn context(&self) -> &str {
        &self.schedule.context
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Current alert, clearing it first if its interval has elapsed
    pub fn current_notification(&mut self) -> Option<&Notification> {
        let now = Utc::now();
        self.notifications.dismiss_expired(now);
        self.notifications.active(now)
    }

    /// Switch to another view of the same backend
    pub async fn switch_context(&mut self, context: &str) -> AppResult<()> {
        self.schedule = self.backend.fetch_schedule(context).await?;
        info!(context, placements = self.schedule.len(), "switched schedule view");
        self.notifications.raise(
            NotificationKind::Info,
            "Vue chargée",
            format!("{} : {} cours", self.schedule.context, self.schedule.len()),
            Utc::now(),
        );
        Ok(())
    }

    fn reject(&mut self, reason: &ScheduleError) {
        warn!(context = %self.schedule.context, %reason, "placement rejected");
        let title = match reason {
            ScheduleError::SlotConflict { .. } => CONFLICT_TITLE,
            _ => INVALID_TITLE,
        };
        self.notifications
            .raise(NotificationKind::Error, title, reason.to_string(), Utc::now());
    }

    fn acknowledge(&mut self, title: &str, message: String) {
        self.notifications
            .raise(NotificationKind::Success, title, message, Utc::now());
    }

    async fn commit(&self, change: ChangeRecord) -> AppResult<CommitReceipt> {
        let receipt = self.backend.commit(&self.schedule.context, &change).await?;
        debug!(placement = %receipt.placement_id, at = %receipt.committed_at, "commit receipt");
        Ok(receipt)
    }

    /// Commit `change`, then swap in the working copy
    async fn commit_and_apply(&mut self, change: ChangeRecord, working: Schedule) -> AppResult<()> {
        self.commit(change).await?;
        self.schedule = working;
        Ok(())
    }

    fn settle(
        &mut self,
        result: Result<CoursePlacement, ScheduleError>,
    ) -> AppResult<Result<CoursePlacement, ScheduleError>> {
        match result {
            Ok(placement) => Ok(Ok(placement)),
            Err(reason @ ScheduleError::SlotConflict { .. }) => {
                self.reject(&reason);
                Ok(Err(reason))
            }
            Err(other) => Err(other.into()),
        }
    }
}

impl<B: ScheduleBackend> ScheduleQuery for ScheduleSession<B> {
    fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

#[async_trait]
impl<B: ScheduleBackend> ScheduleCrud for ScheduleSession<B> {
    async fn drop_placement(&mut self, id: &str, target: Slot) -> AppResult<DropOutcome> {
        let drag = DragGesture::begin(&self.schedule, id)?;
        let mut working = self.schedule.clone();
        let outcome = drag.drop_on(&mut working, target);

        match &outcome {
            DropOutcome::Placed { from, to } => {
                let moved = working
                    .find(id)
                    .cloned()
                    .ok_or_else(|| ScheduleError::NotFound(id.to_string()))?;
                let subject = moved.subject.clone();
                self.commit_and_apply(ChangeRecord::Updated(moved), working).await?;
                info!(context = %self.schedule.context, placement = id, %from, %to, "placement moved");
                self.acknowledge("Cours déplacé", format!("{} : {} → {}", subject, from, to));
            }
            DropOutcome::Reverted { reason, .. } => self.reject(reason),
            DropOutcome::Unchanged(_) => {}
        }

        Ok(outcome)
    }

    async fn add_placement(&mut self, new: NewPlacement) -> AppResult<MutationOutcome> {
        let mut working = self.schedule.clone();
        let result = working.add_placement(new).cloned();

        match self.settle(result)? {
            Ok(added) => {
                self.commit_and_apply(ChangeRecord::Added(added.clone()), working).await?;
                info!(context = %self.schedule.context, placement = %added.id, slot = %added.slot(), "placement added");
                self.acknowledge("Cours créé", added.to_string());
                Ok(MutationOutcome::Applied(added))
            }
            Err(reason) => Ok(MutationOutcome::Rejected(reason)),
        }
    }

    async fn edit_placement(&mut self, id: &str, edit: PlacementEdit) -> AppResult<MutationOutcome> {
        let mut working = self.schedule.clone();
        let result = working.edit_placement(id, edit).cloned();

        match self.settle(result)? {
            Ok(edited) => {
                self.commit_and_apply(ChangeRecord::Updated(edited.clone()), working).await?;
                info!(context = %self.schedule.context, placement = id, "placement edited");
                self.acknowledge("Cours modifié", edited.to_string());
                Ok(MutationOutcome::Applied(edited))
            }
            Err(reason) => Ok(MutationOutcome::Rejected(reason)),
        }
    }

    async fn delete_placement(&mut self, id: &str) -> AppResult<CoursePlacement> {
        let mut working = self.schedule.clone();
        let removed = working.remove_placement(id)?;

        self.commit_and_apply(ChangeRecord::Removed { id: id.to_string() }, working)
            .await?;
        info!(context = %self.schedule.context, placement = id, "placement deleted");
        self.acknowledge("Cours supprimé", removed.to_string());
        Ok(removed)
    }
}
