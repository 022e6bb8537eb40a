#![forbid(unsafe_code)]

//! Contact form stub: read the fields, report success, clear the form.

use serde::Serialize;
use tracing::info;

use crate::dom::{DomPatch, PatchBuffer};
use crate::notification::{ToastId, ToastKind, ToastStack};

/// Field values read from the form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// What the host must do after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactReceipt {
    /// Suppress native form navigation. Always set.
    pub prevent_default: bool,
    pub toast: ToastId,
}

#[derive(Debug, Clone)]
pub struct ContactController {
    bound: bool,
    success_message: String,
    submissions: u64,
}

impl ContactController {
    #[must_use]
    pub fn new(bound: bool, success_message: impl Into<String>) -> Self {
        Self {
            bound,
            success_message: success_message.into(),
            submissions: 0,
        }
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    #[must_use]
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Nothing is validated or transmitted; every submission succeeds.
    /// Returns `None` when there is no form on the page.
    pub fn submit(
        &mut self,
        submission: &ContactSubmission,
        toasts: &mut ToastStack,
        out: &mut PatchBuffer,
    ) -> Option<ContactReceipt> {
        if !self.bound {
            return None;
        }
        self.submissions += 1;
        info!(
            target: "folio.contact",
            name_len = submission.name.len(),
            email_len = submission.email.len(),
            message_len = submission.message.len(),
            "contact form submitted"
        );
        let toast = toasts.push(self.success_message.clone(), ToastKind::Success, out);
        out.push(DomPatch::ResetForm);
        Some(ContactReceipt {
            prevent_default: true,
            toast,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::ToastTimings;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_submission_still_succeeds() {
        let mut contact = ContactController::new(true, "ok!");
        let mut toasts = ToastStack::new(&ToastTimings::default());
        let mut out = PatchBuffer::new();

        let receipt = contact
            .submit(&ContactSubmission::default(), &mut toasts, &mut out)
            .expect("bound form should accept");
        assert!(receipt.prevent_default);
        assert_eq!(
            out.take(),
            vec![
                DomPatch::AppendToast {
                    id: receipt.toast,
                    text: "ok!".into(),
                    kind: ToastKind::Success,
                },
                DomPatch::ResetForm,
            ]
        );
        assert_eq!(contact.submissions(), 1);
    }

    #[test]
    fn unbound_form_does_nothing() {
        let mut contact = ContactController::new(false, "ok!");
        let mut toasts = ToastStack::new(&ToastTimings::default());
        let mut out = PatchBuffer::new();
        assert!(
            contact
                .submit(&ContactSubmission::default(), &mut toasts, &mut out)
                .is_none()
        );
        assert!(out.is_empty());
        assert!(toasts.is_empty());
    }
}
