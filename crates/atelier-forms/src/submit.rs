//! Submission controller.
//!
//! The controller is a small state machine:
//!
//! ```text
//! Idle ──begin──▶ Submitting ──finish(Ok)──▶ Succeeded ──reset──▶ Idle
//!                     ▲   └──finish(Err)──▶ Failed ──begin──┘
//! ```
//!
//! [`SubmissionController::begin`] refuses while a submission is in flight,
//! so at most one [`PendingSubmission`] exists per form.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{info, warn};

use crate::error::{SubmitError, DEFAULT_SUBMIT_ERROR};
use crate::fields::HiddenField;
use crate::relay::RelayClient;
use crate::store::{FieldValues, FormStore};

/// Error type returned by submit callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A caller-supplied async submit handler.
pub type SubmitCallback =
    Arc<dyn Fn(FieldValues) -> BoxFuture<'static, Result<(), BoxError>> + Send + Sync>;

/// How a form hands its values over.
#[derive(Clone)]
pub enum SubmitStrategy {
    /// Await a caller-supplied handler.
    Callback(SubmitCallback),
    /// POST to a hosted form relay.
    Relay(RelayClient),
}

impl std::fmt::Debug for SubmitStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback"),
            Self::Relay(client) => f
                .debug_tuple("Relay")
                .field(&client.config().endpoint)
                .finish(),
        }
    }
}

impl SubmitStrategy {
    /// Wraps an async function as a callback strategy.
    pub fn callback<F, Fut>(handler: F) -> Self
    where
        F: Fn(FieldValues) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
    {
        Self::Callback(Arc::new(move |values| Box::pin(handler(values))))
    }

    /// Uses the callback when one is supplied, the relay otherwise.
    pub fn callback_or_relay(callback: Option<SubmitCallback>, relay: RelayClient) -> Self {
        callback.map_or(Self::Relay(relay), Self::Callback)
    }
}

/// Where a form is in its submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Nothing submitted yet, or reset since.
    #[default]
    Idle,
    /// A submission is in flight.
    Submitting,
    /// The last submission succeeded.
    Succeeded,
    /// The last submission failed with this message.
    Failed(String),
}

impl SubmissionStatus {
    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns the failure message, if the last attempt failed.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A submission that has been started and is ready to run.
///
/// Holds its own copy of the values, the form's hidden fields and the
/// strategy, so running it borrows neither the form nor the controller.
/// Dropping it discards the attempt.
#[must_use = "a pending submission does nothing until run"]
pub struct PendingSubmission {
    values: FieldValues,
    hidden: Vec<HiddenField>,
    strategy: SubmitStrategy,
}

impl PendingSubmission {
    /// Returns the values being submitted.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Returns the hidden fields sent along by the relay strategy.
    pub fn hidden(&self) -> &[HiddenField] {
        &self.hidden
    }

    /// Performs the submission.
    pub async fn run(self) -> Result<(), SubmitError> {
        match self.strategy {
            SubmitStrategy::Callback(handler) => handler(self.values)
                .await
                .map_err(|err| SubmitError::Handler(err.to_string())),
            SubmitStrategy::Relay(client) => client.send(&self.values, &self.hidden).await,
        }
    }
}

/// Drives one form's submissions.
#[derive(Debug)]
pub struct SubmissionController {
    status: SubmissionStatus,
    strategy: SubmitStrategy,
    hidden: Vec<HiddenField>,
    disabled: bool,
}

/// Fails a submission whose future was dropped before it finished.
struct InFlightGuard<'a> {
    controller: &'a mut SubmissionController,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.controller.status.is_submitting() {
            warn!("submission cancelled before it finished");
            self.controller.status = SubmissionStatus::Failed(DEFAULT_SUBMIT_ERROR.to_string());
        }
    }
}

impl SubmissionController {
    /// Creates an idle controller.
    pub fn new(strategy: SubmitStrategy) -> Self {
        Self {
            status: SubmissionStatus::Idle,
            strategy,
            hidden: Vec::new(),
            disabled: false,
        }
    }

    /// Sets the static fields the relay strategy sends with every
    /// submission.
    #[must_use]
    pub fn with_hidden(mut self, hidden: Vec<HiddenField>) -> Self {
        self.hidden = hidden;
        self
    }

    /// Returns the current status.
    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Returns the strategy used to submit.
    pub fn strategy(&self) -> &SubmitStrategy {
        &self.strategy
    }

    /// Enables or disables submission on the caller's behalf.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Returns whether the caller disabled submission.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns whether the submit control should be enabled.
    pub fn can_submit(&self, store: &FormStore) -> bool {
        !self.disabled
            && matches!(self.status, SubmissionStatus::Idle | SubmissionStatus::Failed(_))
            && store.is_form_valid()
    }

    /// Starts a submission.
    ///
    /// Re-validates every field first; a form with errors is refused and the
    /// errors become visible. On success the status is `Submitting`.
    pub fn begin(&mut self, store: &mut FormStore) -> Result<PendingSubmission, SubmitError> {
        match self.status {
            SubmissionStatus::Submitting => return Err(SubmitError::InFlight),
            SubmissionStatus::Succeeded => return Err(SubmitError::AlreadySucceeded),
            SubmissionStatus::Idle | SubmissionStatus::Failed(_) => {}
        }
        if self.disabled {
            return Err(SubmitError::Disabled);
        }

        let errors = store.validate_all();
        if !errors.is_empty() {
            info!(fields = errors.len(), "submission refused, form has invalid fields");
            return Err(SubmitError::Invalid(errors));
        }

        info!(strategy = ?self.strategy, "submission started");
        self.status = SubmissionStatus::Submitting;
        Ok(PendingSubmission {
            values: store.values().clone(),
            hidden: self.hidden.clone(),
            strategy: self.strategy.clone(),
        })
    }

    /// Records the outcome of the in-flight submission.
    pub fn finish(&mut self, outcome: Result<(), SubmitError>) -> &SubmissionStatus {
        if !self.status.is_submitting() {
            warn!(status = ?self.status, "ignoring outcome with no submission in flight");
            return &self.status;
        }

        self.status = match outcome {
            Ok(()) => {
                info!("submission succeeded");
                SubmissionStatus::Succeeded
            }
            Err(err) => {
                let message = err.user_message();
                warn!(error = %message, "submission failed");
                SubmissionStatus::Failed(message)
            }
        };
        &self.status
    }

    /// Begins, runs and finishes a submission.
    ///
    /// Refusals from [`SubmissionController::begin`] are returned as errors
    /// and leave the status alone. Failures of the submission itself are
    /// reported through the returned status. If the returned future is
    /// dropped mid-flight the status becomes `Failed` with the default
    /// message, so the form can be retried or reset.
    pub async fn submit(&mut self, store: &mut FormStore) -> Result<SubmissionStatus, SubmitError> {
        let pending = self.begin(store)?;
        let guard = InFlightGuard { controller: self };
        let outcome = pending.run().await;
        let status = guard.controller.finish(outcome).clone();
        Ok(status)
    }

    /// Returns the form to `Idle` and clears its values, errors and touched
    /// fields.
    pub fn reset(&mut self, store: &mut FormStore) -> Result<(), SubmitError> {
        if self.status.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        store.reset();
        self.status = SubmissionStatus::Idle;
        Ok(())
    }
}
