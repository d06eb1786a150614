use super::*;

fn ready_state() -> PaymentState {
    let mut state = PaymentState::default();
    state.begin_mount();
    state.mounted();
    state
}

fn valid_change() -> CardChange {
    CardChange { complete: true, error: None }
}

// =============================================================
// Lifecycle
// =============================================================

#[test]
fn initial_phase_is_unmounted() {
    let state = PaymentState::default();
    assert_eq!(state.phase, Phase::Unmounted);
    assert!(!state.card_valid);
    assert!(!state.ui.pay_enabled);
}

#[test]
fn mounted_resets_validity_and_ui() {
    let mut state = PaymentState::default();
    state.begin_mount();
    assert_eq!(state.phase, Phase::Mounting);

    state.mounted();
    assert_eq!(state.phase, Phase::Ready);
    assert!(!state.card_valid);
    assert_eq!(state.ui, CardUi::default());
}

#[test]
fn unmounted_is_terminal_reset() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());
    state.unmounted();

    assert_eq!(state.phase, Phase::Unmounted);
    assert!(!state.card_valid);
    assert!(!state.ui.pay_enabled);
}

// =============================================================
// Card validity and UI (scenarios A and B)
// =============================================================

#[test]
fn complete_without_error_enables_pay_and_hides_error() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());

    assert!(state.card_valid);
    assert_eq!(state.ui.error_text, None);
    assert!(state.ui.pay_enabled);
}

#[test]
fn validation_error_shows_text_and_disables_pay() {
    let mut state = ready_state();
    state.apply_card_change(&CardChange {
        complete: false,
        error: Some("Your card number is incomplete.".to_owned()),
    });

    assert!(!state.card_valid);
    assert_eq!(state.ui.error_text.as_deref(), Some("Your card number is incomplete."));
    assert!(!state.ui.pay_enabled);
}

#[test]
fn incomplete_without_error_hides_error_but_keeps_pay_disabled() {
    let mut state = ready_state();
    state.apply_card_change(&CardChange { complete: false, error: None });

    assert!(!state.card_valid);
    assert_eq!(state.ui.error_text, None);
    assert!(!state.ui.pay_enabled);
}

#[test]
fn validity_tracks_most_recent_change_only() {
    let mut state = ready_state();

    state.apply_card_change(&valid_change());
    assert!(state.card_valid);

    state.apply_card_change(&CardChange { complete: true, error: Some("bad cvc".to_owned()) });
    assert!(!state.card_valid);

    state.apply_card_change(&valid_change());
    assert!(state.card_valid);
    assert_eq!(state.ui.error_text, None);
}

// =============================================================
// Confirmation (scenarios C and D plus the busy guard)
// =============================================================

#[test]
fn invalid_card_rejects_without_processor_call() {
    let mut state = ready_state();

    let decision = state.begin_confirmation("sec_123");

    assert_eq!(
        decision,
        ConfirmDecision::Reject {
            outcome: ConfirmationOutcome::Failure { error: INVALID_CARD_ERROR.to_owned() },
        }
    );
    assert_eq!(state.ui.error_text.as_deref(), Some(INVALID_CARD_MESSAGE));
    assert_eq!(state.phase, Phase::Ready);
}

#[test]
fn valid_card_proceeds_with_current_token() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());

    let decision = state.begin_confirmation("sec_123");

    assert_eq!(decision, ConfirmDecision::Proceed { client_secret: "sec_123".to_owned() });
    assert_eq!(state.phase, Phase::Confirming);
}

#[test]
fn successful_confirmation_reports_charge_record() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());
    let _ = state.begin_confirmation("sec_123");

    let outcome = state.finish_confirmation(Ok(serde_json::json!({"id": "pi_1"})));

    assert_eq!(
        outcome,
        ConfirmationOutcome::Success { payment_intent: serde_json::json!({"id": "pi_1"}) }
    );
    assert_eq!(state.phase, Phase::Ready);
}

#[test]
fn processor_error_is_shown_and_reported() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());
    let _ = state.begin_confirmation("sec_123");

    let outcome = state.finish_confirmation(Err("Your card was declined.".to_owned()));

    assert_eq!(
        outcome,
        ConfirmationOutcome::Failure { error: "Your card was declined.".to_owned() }
    );
    assert_eq!(state.ui.error_text.as_deref(), Some("Your card was declined."));
    assert_eq!(state.phase, Phase::Ready);
}

#[test]
fn overlapping_request_is_rejected_while_confirming() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());
    let first = state.begin_confirmation("sec_123");
    assert!(matches!(first, ConfirmDecision::Proceed { .. }));

    let second = state.begin_confirmation("sec_456");

    assert_eq!(
        second,
        ConfirmDecision::Reject {
            outcome: ConfirmationOutcome::Failure { error: BUSY_ERROR.to_owned() },
        }
    );
    // The in-flight attempt is unaffected.
    assert_eq!(state.phase, Phase::Confirming);
}

#[test]
fn token_arriving_mid_flight_yields_one_busy_failure_and_one_processor_call() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());

    // Serve requests the way the widget task does: every arriving token goes
    // through `begin_confirmation`, including ones that land while the
    // round trip is suspended.
    let mut processor_calls = 0;
    let mut reports = Vec::new();

    match state.begin_confirmation("sec_A") {
        ConfirmDecision::Proceed { client_secret } => {
            processor_calls += 1;
            assert_eq!(client_secret, "sec_A");
        }
        ConfirmDecision::Reject { .. } => panic!("valid card must proceed"),
    }

    // Second token arrives while the first round trip is in flight.
    match state.begin_confirmation("sec_B") {
        ConfirmDecision::Proceed { .. } => processor_calls += 1,
        ConfirmDecision::Reject { outcome } => reports.push(outcome),
    }

    // The in-flight attempt resolves normally afterward.
    reports.push(state.finish_confirmation(Ok(serde_json::json!({"id": "pi_1"}))));

    assert_eq!(processor_calls, 1);
    assert_eq!(
        reports,
        vec![
            ConfirmationOutcome::Failure { error: BUSY_ERROR.to_owned() },
            ConfirmationOutcome::Success { payment_intent: serde_json::json!({"id": "pi_1"}) },
        ]
    );
}

#[test]
fn next_request_is_accepted_after_cycle_completes() {
    let mut state = ready_state();
    state.apply_card_change(&valid_change());
    let _ = state.begin_confirmation("sec_123");
    let _ = state.finish_confirmation(Ok(serde_json::json!({"id": "pi_1"})));

    let decision = state.begin_confirmation("sec_456");
    assert_eq!(decision, ConfirmDecision::Proceed { client_secret: "sec_456".to_owned() });
}

#[test]
fn unmounted_widget_rejects_confirmation() {
    let mut state = PaymentState::default();

    let decision = state.begin_confirmation("sec_123");

    assert_eq!(
        decision,
        ConfirmDecision::Reject {
            outcome: ConfirmationOutcome::Failure { error: INVALID_CARD_ERROR.to_owned() },
        }
    );
}

// =============================================================
// Change event parsing
// =============================================================

#[test]
fn parse_card_change_complete_with_null_error() {
    let change = parse_card_change(&serde_json::json!({"complete": true, "error": null}));
    assert_eq!(change, CardChange { complete: true, error: None });
}

#[test]
fn parse_card_change_extracts_error_message() {
    let change = parse_card_change(&serde_json::json!({
        "complete": false,
        "error": {"message": "Your card number is incomplete."}
    }));
    assert!(!change.complete);
    assert_eq!(change.error.as_deref(), Some("Your card number is incomplete."));
}

#[test]
fn parse_card_change_error_without_message_gets_generic_text() {
    let change = parse_card_change(&serde_json::json!({"complete": true, "error": {}}));
    assert_eq!(change.error.as_deref(), Some("Your card details are invalid."));
}

#[test]
fn parse_card_change_missing_fields_default_to_incomplete() {
    let change = parse_card_change(&serde_json::json!({}));
    assert_eq!(change, CardChange { complete: false, error: None });
}
