//! The assessment form's state machine
//!
//! [`FormWizard`] owns the profile being filled in, the current section and
//! the submission lifecycle. Disallowed operations are no-ops that report
//! [`Transition::Refused`]; nothing here returns an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::coercion::{coerce, RawInput};
use super::prediction::{NetworkError, PredictionClientTrait};
use super::validation;
use crate::entities::fields::{FieldValue, ProfileField};
use crate::entities::health_profile::HealthProfile;
use crate::entities::prediction::PredictionOutcome;
use crate::entities::wizard::WizardSection;

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Transition {
    /// The current section changed
    Moved { from: usize, to: usize },
    /// Advancing from the last section: the caller should submit
    SubmissionRequested,
    /// Not allowed in the current state; nothing changed
    Refused,
}

/// Result of a field edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum FieldUpdate {
    /// The field now holds the coerced value
    Set,
    /// The input could not be used and the field is now unset
    Cleared,
    /// The form is locked; the edit was dropped
    Ignored,
}

/// Result of a full submission cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// Submission not allowed in the current state
    Refused,
    Completed(PredictionOutcome),
    Failed(NetworkError),
    /// The wizard was reset while the request was outstanding
    Discarded,
}

/// A submission in flight
///
/// Carries a snapshot of the profile and the session generation it was issued
/// for; a ticket from before a reset is rejected on completion.
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    generation: u64,
    profile: HealthProfile,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }
}

/// Multi-step assessment form
#[derive(Debug, Clone, Default)]
pub struct FormWizard {
    profile: HealthProfile,
    current: usize,
    furthest: usize,
    in_flight: bool,
    outcome: Option<PredictionOutcome>,
    error: Option<String>,
    generation: u64,
}

impl FormWizard {
    /// A fresh wizard on the first section with an empty profile
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> &HealthProfile {
        &self.profile
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_section(&self) -> WizardSection {
        WizardSection::from_index(self.current).unwrap_or(WizardSection::PersonalInformation)
    }

    /// Furthest section reached by advancing
    pub fn furthest_index(&self) -> usize {
        self.furthest
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        self.outcome.as_ref()
    }

    /// User-facing message of the last failed submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Form fields accept input only before submission starts
    fn is_locked(&self) -> bool {
        self.in_flight || self.outcome.is_some()
    }

    /// Whether the current section may be left forward
    pub fn can_advance(&self) -> bool {
        !self.is_locked() && validation::is_section_complete(self.current_section(), &self.profile)
    }

    /// Whether a submission may start now
    pub fn can_submit(&self) -> bool {
        !self.is_locked()
            && self.current_section().is_last()
            && validation::is_profile_complete(&self.profile)
    }

    /// Coerce a raw input and store it in the profile
    pub fn set_field(&mut self, field: ProfileField, raw: &RawInput) -> FieldUpdate {
        if self.is_locked() {
            debug!("Ignoring edit to {} while the form is locked", field);
            return FieldUpdate::Ignored;
        }

        let value = coerce(field, raw);
        match self.profile.apply(field, value) {
            Ok(()) if value == FieldValue::Unset => FieldUpdate::Cleared,
            Ok(()) => FieldUpdate::Set,
            Err(e) => {
                debug!("Rejected value for {}: {}", field, e);
                FieldUpdate::Cleared
            }
        }
    }

    /// Move to the next section if the current one is complete
    ///
    /// On the last section nothing moves and a submission is requested.
    pub fn advance(&mut self) -> Transition {
        if !self.can_advance() {
            debug!("Advance refused on {}", self.current_section());
            return Transition::Refused;
        }

        if self.current_section().is_last() {
            return Transition::SubmissionRequested;
        }

        let from = self.current;
        self.current += 1;
        self.furthest = self.furthest.max(self.current);
        debug!("Advanced from section {} to {}", from, self.current);
        Transition::Moved { from, to: self.current }
    }

    /// Move to the previous section regardless of completeness
    pub fn retreat(&mut self) -> Transition {
        if self.is_locked() || self.current == 0 {
            return Transition::Refused;
        }

        let from = self.current;
        self.current -= 1;
        debug!("Retreated from section {} to {}", from, self.current);
        Transition::Moved { from, to: self.current }
    }

    /// Jump to a section already reached
    ///
    /// Gated on the furthest section reached, not on the sections in between
    /// still being complete: a section emptied after it was passed does not
    /// block navigation, only [`can_submit`](Self::can_submit), which checks
    /// the whole profile.
    pub fn jump_to(&mut self, index: usize) -> Transition {
        if self.is_locked() || index > self.furthest || index >= WizardSection::COUNT {
            debug!("Jump to section {} refused (furthest reached: {})", index, self.furthest);
            return Transition::Refused;
        }

        let from = self.current;
        self.current = index;
        Transition::Moved { from, to: index }
    }

    /// Start a submission, locking the form
    ///
    /// Returns `None` unless [`can_submit`](Self::can_submit) holds.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if !self.can_submit() {
            if self.in_flight {
                warn!("Submission already in flight");
            }
            return None;
        }

        self.in_flight = true;
        self.error = None;
        info!("Submitting assessment (generation {})", self.generation);
        Some(SubmissionTicket {
            generation: self.generation,
            profile: self.profile.clone(),
        })
    }

    /// Record the result of a submission
    ///
    /// Returns `false` and leaves the wizard untouched when the ticket belongs
    /// to a discarded session.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<PredictionOutcome, NetworkError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.in_flight {
            debug!(
                "Dropping response for generation {} (current {})",
                ticket.generation, self.generation
            );
            return false;
        }

        self.in_flight = false;
        match result {
            Ok(outcome) => {
                info!("Assessment complete: {}", outcome.risk_tier);
                self.outcome = Some(outcome);
            }
            Err(e) => {
                warn!("Assessment failed: {}", e.detail);
                self.error = Some(e.message);
            }
        }
        true
    }

    /// Run a whole submission against the client
    pub async fn submit<C>(&mut self, client: &C) -> SubmitResult
    where
        C: PredictionClientTrait + ?Sized,
    {
        let Some(ticket) = self.begin_submission() else {
            return SubmitResult::Refused;
        };

        let result = client.submit(ticket.profile()).await;
        let reported = result.clone();
        if !self.complete_submission(ticket, result) {
            return SubmitResult::Discarded;
        }

        match reported {
            Ok(outcome) => SubmitResult::Completed(outcome),
            Err(e) => SubmitResult::Failed(e),
        }
    }

    /// Discard everything and start a new assessment
    pub fn reset(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::default()
        };
        info!("Wizard reset (generation {})", generation);
    }
}
