//! Payment widget state machine.
//!
//! DESIGN
//! ======
//! The mount/validate/confirm lifecycle is modeled as plain data with pure
//! transition methods so it can be tested natively, without a browser. The
//! `PaymentWidget` component owns the hosted element and the processor client
//! and drives this state through signals; everything that decides *whether*
//! the processor may be contacted lives here.
//!
//! Invariant: a confirmation attempt never reaches the processor unless the
//! card is valid (`complete` and error-free) at the moment the request is
//! handled, and every request is answered with exactly one outcome report.

#[cfg(test)]
#[path = "payment_test.rs"]
mod payment_test;

use serde_json::Value;

use crate::net::types::ConfirmationOutcome;

/// Error string reported to the server when the card is not valid.
pub const INVALID_CARD_ERROR: &str = "Invalid card";

/// Inline message shown to the user when the card is not valid.
pub const INVALID_CARD_MESSAGE: &str = "Please enter valid card information.";

/// Error string reported when a confirmation request arrives while another
/// one is still in flight.
pub const BUSY_ERROR: &str = "Payment already in progress";

/// Widget lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No hosted element exists. Initial and terminal.
    #[default]
    Unmounted,
    /// Processor client initialization and element mount are underway.
    Mounting,
    /// Hosted element is mounted and accepting input.
    Ready,
    /// A confirmation round trip with the processor is in flight.
    Confirming,
}

/// A change notification from the hosted card element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardChange {
    /// The element reports all card fields as filled in.
    pub complete: bool,
    /// Validation error message, if the element reports one.
    pub error: Option<String>,
}

/// What the checkout page shows for the card input right now: the error
/// region content and the pay-trigger enablement.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardUi {
    /// Text for the error region; `None` means the region is hidden.
    pub error_text: Option<String>,
    /// Whether the pay-trigger control is enabled.
    pub pay_enabled: bool,
}

/// Decision for an incoming confirmation request.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmDecision {
    /// Call the processor's confirm operation with this token.
    Proceed { client_secret: String },
    /// Do not contact the processor; report this outcome immediately.
    Reject { outcome: ConfirmationOutcome },
}

/// Payment widget state: lifecycle phase, derived card validity, and the
/// visible card UI.
#[derive(Clone, Debug, Default)]
pub struct PaymentState {
    pub phase: Phase,
    /// True only while the latest change notification reported both
    /// "complete" and "no error". Recomputed on every notification.
    pub card_valid: bool,
    pub ui: CardUi,
}

impl PaymentState {
    /// Enter `Mounting`: the processor client is being initialized and the
    /// hosted element is about to be created.
    pub fn begin_mount(&mut self) {
        self.phase = Phase::Mounting;
    }

    /// Hosted element is mounted; card validity starts false.
    pub fn mounted(&mut self) {
        self.phase = Phase::Ready;
        self.card_valid = false;
        self.ui = CardUi::default();
    }

    /// Hosted element released; no further events are processed.
    pub fn unmounted(&mut self) {
        *self = Self::default();
    }

    /// Apply a change notification from the hosted element.
    ///
    /// Validity is derived from the most recent notification only. The error
    /// region shows the processor's validation message when present; the
    /// pay trigger is enabled iff the input is complete and error-free.
    pub fn apply_card_change(&mut self, change: &CardChange) {
        self.card_valid = change.complete && change.error.is_none();

        match &change.error {
            Some(message) => {
                self.ui.error_text = Some(message.clone());
                self.ui.pay_enabled = false;
            }
            None => {
                self.ui.error_text = None;
                self.ui.pay_enabled = change.complete;
            }
        }
    }

    /// Handle a server confirmation request carrying a charge token.
    ///
    /// Overlapping requests are rejected while one is in flight, and invalid
    /// cards are rejected without contacting the processor. Both rejections
    /// surface inline text and carry the failure outcome to report.
    pub fn begin_confirmation(&mut self, client_secret: &str) -> ConfirmDecision {
        if self.phase == Phase::Confirming {
            self.ui.error_text = Some(BUSY_ERROR.to_owned());
            return ConfirmDecision::Reject {
                outcome: ConfirmationOutcome::Failure { error: BUSY_ERROR.to_owned() },
            };
        }

        if !self.card_valid {
            self.ui.error_text = Some(INVALID_CARD_MESSAGE.to_owned());
            return ConfirmDecision::Reject {
                outcome: ConfirmationOutcome::Failure { error: INVALID_CARD_ERROR.to_owned() },
            };
        }

        self.phase = Phase::Confirming;
        ConfirmDecision::Proceed { client_secret: client_secret.to_owned() }
    }

    /// Record the processor's answer to a confirmation round trip and return
    /// the single outcome report for it. Either branch returns to `Ready`.
    pub fn finish_confirmation(&mut self, result: Result<Value, String>) -> ConfirmationOutcome {
        self.phase = Phase::Ready;

        match result {
            Ok(payment_intent) => ConfirmationOutcome::Success { payment_intent },
            Err(message) => {
                self.ui.error_text = Some(message.clone());
                ConfirmationOutcome::Failure { error: message }
            }
        }
    }
}

/// Parse a hosted-element change event payload into a [`CardChange`].
///
/// The element reports `{ "complete": bool, "error": { "message": ... } | null }`.
/// An error object without a message still blocks the card; a generic text
/// stands in for the missing message.
pub fn parse_card_change(data: &Value) -> CardChange {
    let complete = data.get("complete").and_then(Value::as_bool).unwrap_or(false);

    let error = match data.get("error") {
        Some(e) if !e.is_null() => Some(
            e.get("message")
                .and_then(Value::as_str)
                .unwrap_or("Your card details are invalid.")
                .to_owned(),
        ),
        _ => None,
    };

    CardChange { complete, error }
}
