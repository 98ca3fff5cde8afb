use std::{
    sync::{Arc, Weak},
    time::Duration,
};

use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::{
    contact::ContactFormFields,
    form::{ContactForm, FailureReason, FormField, SubmissionPhase, UnknownFormField},
};
use thiserror::Error;
use tokio::{
    sync::{watch, Mutex},
    task::{AbortHandle, JoinError},
};
use tracing::{debug, trace};

/// Owns the state of one mounted contact form and drives its submissions.
///
/// Clones share the same form. Views observe changes through
/// [`subscribe`](Self::subscribe).
pub struct ContactFormController<Contact> {
    inner: Arc<Inner<Contact>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFormConfig {
    /// How long a success or failure status stays visible before the form
    /// returns to [`SubmissionPhase::Idle`].
    pub status_display: Duration,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            status_display: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("A message is already being sent.")]
    AlreadySubmitting,
    #[error("The contact form has been closed.")]
    Closed,
    #[error("The form contains invalid fields.")]
    Validation,
    #[error("Failed to send message.")]
    Transport(#[source] ContactSendMessageError),
}

struct Inner<Contact> {
    contact: Contact,
    config: ContactFormConfig,
    state: watch::Sender<ContactForm>,
    lifecycle: Mutex<Lifecycle>,
}

/// Guarded by a single lock, so phase transitions, timer bookkeeping and
/// teardown never interleave.
#[derive(Default)]
struct Lifecycle {
    closed: bool,
    /// Incremented whenever the pending revert is cancelled. A revert task
    /// only acts if the epoch it was scheduled in is still current.
    epoch: u64,
    revert: Option<AbortHandle>,
}

impl Lifecycle {
    fn cancel_revert(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if let Some(revert) = self.revert.take() {
            revert.abort();
        }
    }
}

impl<Contact> Clone for ContactFormController<Contact> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Contact> ContactFormController<Contact>
where
    Contact: ContactService,
{
    pub fn new(contact: Contact, config: ContactFormConfig) -> Self {
        let (state, _) = watch::channel(ContactForm::default());
        Self {
            inner: Arc::new(Inner {
                contact,
                config,
                state,
                lifecycle: Default::default(),
            }),
        }
    }

    /// Returns a snapshot of the current form state.
    pub fn state(&self) -> ContactForm {
        self.inner.state.borrow().clone()
    }

    /// Returns a receiver that is notified whenever the form state changes.
    pub fn subscribe(&self) -> watch::Receiver<ContactForm> {
        self.inner.state.subscribe()
    }

    pub fn update_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.inner
            .state
            .send_modify(|form| form.update_field(field, value));
    }

    /// Same as [`update_field`](Self::update_field), with the field given by
    /// its input name.
    pub fn update_field_by_name(
        &self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), UnknownFormField> {
        let field = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Revalidates all fields, replacing the previous field errors.
    pub fn validate(&self) -> bool {
        let mut ok = false;
        self.inner.state.send_modify(|form| ok = form.validate());
        ok
    }

    /// Validates the form and, if every field is valid, sends the message.
    ///
    /// The form always ends up in [`SubmissionPhase::Succeeded`] or
    /// [`SubmissionPhase::Failed`], except when a submission is already in
    /// flight or the controller has been closed, in which case nothing
    /// changes. The send keeps running if the returned future is dropped.
    pub async fn submit(&self) -> Result<(), ContactFormSubmitError> {
        let fields = {
            let mut lifecycle = self.inner.lifecycle.lock().await;
            if lifecycle.closed {
                return Err(ContactFormSubmitError::Closed);
            }
            if self.inner.state.borrow().phase.is_submitting() {
                debug!("ignoring submit while a message is being sent");
                return Err(ContactFormSubmitError::AlreadySubmitting);
            }

            lifecycle.cancel_revert();

            let mut fields = None;
            self.inner.state.send_modify(|form| {
                if form.validate() {
                    form.phase = SubmissionPhase::Submitting;
                    fields = Some(form.fields.clone());
                } else {
                    form.phase = SubmissionPhase::Failed(FailureReason::Validation);
                }
            });

            let Some(fields) = fields else {
                trace!("validation failed");
                self.inner.schedule_revert(&mut lifecycle);
                return Err(ContactFormSubmitError::Validation);
            };

            trace!("submitting");
            fields
        };

        let task = tokio::spawn(Arc::clone(&self.inner).deliver(fields));
        delivery_outcome(task.await)
    }

    /// Tears the form down. Pending status timers are cancelled, a send that
    /// is still in flight no longer updates the form and later submits are
    /// rejected.
    pub async fn close(&self) {
        let mut lifecycle = self.inner.lifecycle.lock().await;
        lifecycle.closed = true;
        lifecycle.cancel_revert();
        trace!("closed");
    }
}

impl<Contact> Inner<Contact>
where
    Contact: ContactService,
{
    async fn deliver(self: Arc<Self>, fields: ContactFormFields) -> Result<(), ContactFormSubmitError> {
        let result = self.contact.send_message(fields).await;

        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.closed {
            debug!("form closed while sending, discarding the result");
            return Err(ContactFormSubmitError::Closed);
        }

        let delivered = result.is_ok();
        self.state.send_modify(|form| {
            if delivered {
                form.phase = SubmissionPhase::Succeeded;
                form.clear_fields();
            } else {
                form.phase = SubmissionPhase::Failed(FailureReason::Transport);
            }
        });
        trace!(phase = ?self.state.borrow().phase, "submission finished");
        self.schedule_revert(&mut lifecycle);

        result.map_err(ContactFormSubmitError::Transport)
    }

    fn schedule_revert(self: &Arc<Self>, lifecycle: &mut Lifecycle) {
        lifecycle.cancel_revert();
        let epoch = lifecycle.epoch;
        let delay = self.config.status_display;
        let inner = Arc::downgrade(self);
        let task = tokio::spawn(revert_after(inner, delay, epoch));
        lifecycle.revert = Some(task.abort_handle());
    }
}

/// Delivery is only cancelled when its runtime shuts down, at which point
/// the form is gone as well.
fn delivery_outcome(
    joined: Result<Result<(), ContactFormSubmitError>, JoinError>,
) -> Result<(), ContactFormSubmitError> {
    match joined {
        Ok(result) => result,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        Err(_) => {
            debug!("delivery task cancelled");
            Err(ContactFormSubmitError::Closed)
        }
    }
}

async fn revert_after<Contact>(inner: Weak<Inner<Contact>>, delay: Duration, epoch: u64)
where
    Contact: ContactService,
{
    tokio::time::sleep(delay).await;

    let Some(inner) = inner.upgrade() else {
        return;
    };
    let mut lifecycle = inner.lifecycle.lock().await;
    if lifecycle.closed || lifecycle.epoch != epoch {
        return;
    }
    lifecycle.revert = None;

    inner.state.send_if_modified(|form| {
        let expired = form.phase.is_terminal();
        if expired {
            form.phase = SubmissionPhase::Idle;
        }
        expired
    });
}
