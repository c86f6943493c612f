use log::{error, info};

use super::kind::Submission;
use super::submit::{SubmitError, Submitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
}

impl Tone {
    pub fn alert_class(self) -> &'static str {
        match self {
            Tone::Success => "alert-success",
            Tone::Danger => "alert-danger",
        }
    }
}

/// Feedback shown at the top of a form after a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub tone: Tone,
    pub message: &'static str,
}

/// The parts of a form the submit flow touches.
pub trait FormSurface {
    /// Disables the submit control and shows `busy_label` in it. Returns the
    /// label it replaced.
    fn lock(&self, busy_label: &str) -> Option<String>;

    /// Re-enables the submit control, restoring `label` when there is one.
    fn unlock(&self, label: Option<String>);

    fn show_banner(&self, banner: Banner);

    /// Clears inputs and every valid/invalid marker.
    fn reset(&self);
}

/// Sends an already validated submission. The submit control is re-enabled
/// whatever the outcome.
pub async fn run_submission<P, F>(
    port: &P,
    surface: &F,
    submission: Submission,
    after_success: Option<&dyn Fn()>,
) -> Result<(), SubmitError>
where
    P: Submitter,
    F: FormSurface + ?Sized,
{
    let kind = submission.form;
    let label = surface.lock(kind.busy_label());

    let outcome = port.submit(&submission).await;
    match &outcome {
        Ok(()) => {
            info!("forms: {} form delivered", kind.slug());
            surface.show_banner(Banner {
                tone: Tone::Success,
                message: kind.success_message(),
            });
            surface.reset();
            if let Some(hook) = after_success {
                hook();
            }
        }
        Err(err) => {
            error!("forms: {} form failed: {}", kind.slug(), err);
            surface.show_banner(Banner {
                tone: Tone::Danger,
                message: kind.failure_message(),
            });
        }
    }

    surface.unlock(label);
    outcome
}
