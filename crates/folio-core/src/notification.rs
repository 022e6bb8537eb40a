#![forbid(unsafe_code)]

//! Transient toast notifications.
//!
//! Each toast walks `Created -> Shown -> Hiding -> Removed` on a
//! host-advanced clock. The stack exposes the single earliest pending
//! deadline so the host needs exactly one timer for all live toasts, and
//! can cancel it without leaking callbacks.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dom::{DomPatch, DomTarget, PatchBuffer, names};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ToastId(u64);

impl ToastId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    /// Appended, not yet carrying the `show` class.
    Created,
    Shown,
    /// `show` removed; waiting for the hide transition before removal.
    Hiding,
    Removed,
}

/// Toast sequencing delays in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastTimings {
    /// Creation to `show`.
    pub reveal_delay_ms: f64,
    /// Creation to start of hiding.
    pub display_ms: f64,
    /// Start of hiding to removal.
    pub hide_transition_ms: f64,
}

impl Default for ToastTimings {
    fn default() -> Self {
        Self {
            reveal_delay_ms: 100.0,
            display_ms: 3000.0,
            hide_transition_ms: 300.0,
        }
    }
}

/// Convert host milliseconds to a duration, clamping junk to zero.
#[must_use]
pub fn ms_to_duration(ms: f64) -> Duration {
    if !ms.is_finite() || ms <= 0.0 {
        return Duration::ZERO;
    }
    let nanos = (ms * 1_000_000.0).round().min(u64::MAX as f64) as u64;
    Duration::from_nanos(nanos)
}

#[derive(Debug, Clone)]
struct Toast {
    id: ToastId,
    kind: ToastKind,
    text: String,
    phase: ToastPhase,
    show_at: Duration,
    hide_at: Duration,
    remove_at: Duration,
}

impl Toast {
    fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            ToastPhase::Created => Some(self.show_at),
            ToastPhase::Shown => Some(self.hide_at),
            ToastPhase::Hiding => Some(self.remove_at),
            ToastPhase::Removed => None,
        }
    }
}

/// Public view of a live toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastSnapshot {
    pub id: ToastId,
    pub kind: ToastKind,
    pub text: String,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone)]
pub struct ToastStack {
    reveal_delay: Duration,
    display: Duration,
    hide_transition: Duration,
    now: Duration,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastStack {
    #[must_use]
    pub fn new(timings: &ToastTimings) -> Self {
        Self {
            reveal_delay: ms_to_duration(timings.reveal_delay_ms),
            display: ms_to_duration(timings.display_ms),
            hide_transition: ms_to_duration(timings.hide_transition_ms),
            now: Duration::ZERO,
            next_id: 1,
            toasts: Vec::new(),
        }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Append a new toast. Existing toasts are left alone.
    pub fn push(&mut self, text: impl Into<String>, kind: ToastKind, out: &mut PatchBuffer) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        let text = text.into();
        out.push(DomPatch::AppendToast {
            id,
            text: text.clone(),
            kind,
        });
        let hide_at = self.now.saturating_add(self.display);
        self.toasts.push(Toast {
            id,
            kind,
            text,
            phase: ToastPhase::Created,
            show_at: self.now.saturating_add(self.reveal_delay),
            hide_at,
            remove_at: hide_at.saturating_add(self.hide_transition),
        });
        debug!(target: "folio.toast", id = id.0, kind = kind.class(), "toast created");
        id
    }

    /// Phase of `id`, or `Removed` once it has left the page.
    #[must_use]
    pub fn phase(&self, id: ToastId) -> ToastPhase {
        self.toasts
            .iter()
            .find(|t| t.id == id)
            .map_or(ToastPhase::Removed, |t| t.phase)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<ToastSnapshot> {
        self.toasts
            .iter()
            .map(|t| ToastSnapshot {
                id: t.id,
                kind: t.kind,
                text: t.text.clone(),
                phase: t.phase,
            })
            .collect()
    }

    /// Earliest pending transition across all live toasts.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.toasts.iter().filter_map(Toast::next_deadline).min()
    }

    pub fn advance_by(&mut self, dt: Duration, out: &mut PatchBuffer) {
        let now = self.now.saturating_add(dt);
        self.advance_to(now, out);
    }

    /// Move the clock to `now` and apply every transition that became due,
    /// in deadline order. The clock never runs backwards.
    pub fn advance_to(&mut self, now: Duration, out: &mut PatchBuffer) {
        if now > self.now {
            self.now = now;
        }
        loop {
            let due = self
                .toasts
                .iter()
                .enumerate()
                .filter_map(|(i, t)| t.next_deadline().map(|d| (d, t.id, i)))
                .filter(|(d, _, _)| *d <= self.now)
                .min();
            let Some((_, _, index)) = due else {
                break;
            };
            self.step(index, out);
        }
    }

    fn step(&mut self, index: usize, out: &mut PatchBuffer) {
        let toast = &mut self.toasts[index];
        let target = DomTarget::Toast(toast.id);
        match toast.phase {
            ToastPhase::Created => {
                toast.phase = ToastPhase::Shown;
                out.push(DomPatch::add_class(target, names::SHOW));
            }
            ToastPhase::Shown => {
                toast.phase = ToastPhase::Hiding;
                out.push(DomPatch::remove_class(target, names::SHOW));
            }
            ToastPhase::Hiding | ToastPhase::Removed => {
                let id = toast.id;
                self.toasts.remove(index);
                out.push(DomPatch::RemoveToast { id });
                trace!(target: "folio.toast", id = id.0, "toast removed");
                return;
            }
        }
        trace!(target: "folio.toast", id = toast.id.0, phase = ?toast.phase, "toast transition");
    }
}
