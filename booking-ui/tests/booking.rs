//! Confirmation dialog, cancellation and printing.

mod common;

use booking_ui::{Command, CommandOutcome, UiError, UiEvent};
use common::*;

const CANCEL_PROMPT: &str = "Are you sure you want to cancel this booking?";

#[test]
fn confirmation_dialog_shows_reference_once() {
    let mut page = page("bookings.html");
    let body = page.document().body().unwrap();

    let outcome = page
        .execute(Command::ShowBookingConfirmation {
            reference: "ABC123".into(),
        })
        .unwrap();
    let CommandOutcome::DialogShown(dialog) = outcome else {
        panic!("unexpected outcome {outcome:?}");
    };

    assert_eq!(page.document().parent(dialog), Some(body));
    assert_eq!(page.document().children(body).last(), Some(&dialog));
    assert!(page.document().element(dialog).unwrap().has_class("fixed"));

    let text = page.document().text_content(dialog);
    assert!(text.contains("Booking Confirmed!"));
    assert_eq!(text.matches("ABC123").count(), 1);
}

#[test]
fn close_control_removes_only_the_dialog() {
    let mut page = page("bookings.html");
    let before = page.document().outer_html(page.document().root());

    let dialog = page.show_booking_confirmation("ABC123").unwrap();
    let close = page
        .document()
        .query_within(dialog, r#"[data-dismiss="dialog"]"#)
        .unwrap()[0];

    page.dispatch(UiEvent::Click(close)).unwrap();
    assert!(!page.document().is_connected(dialog));
    assert_eq!(page.document().outer_html(page.document().root()), before);
}

#[test]
fn clicking_inside_dialog_does_not_close_it() {
    let mut page = page("bookings.html");
    let dialog = page.show_booking_confirmation("ABC123").unwrap();
    let reference = page
        .document()
        .query_within(dialog, ".booking-reference")
        .unwrap()[0];

    page.dispatch(UiEvent::Click(reference)).unwrap();
    assert!(page.document().is_connected(dialog));
}

#[test]
fn stacked_dialogs_close_one_at_a_time() {
    let mut page = page("bookings.html");
    let first = page.show_booking_confirmation("AAA111").unwrap();
    let second = page.show_booking_confirmation("BBB222").unwrap();

    let close = page
        .document()
        .query_within(second, "button")
        .unwrap()[0];
    page.dispatch(UiEvent::Click(close)).unwrap();

    assert!(page.document().is_connected(first));
    assert!(!page.document().is_connected(second));
}

#[test]
fn reference_markup_is_shown_as_text() {
    let mut page = page("bookings.html");
    let dialog = page
        .show_booking_confirmation(r#"<img src=x onerror="alert(1)">"#)
        .unwrap();

    assert!(page.document().query_within(dialog, "img").unwrap().is_empty());
    assert!(
        page.document()
            .text_content(dialog)
            .contains(r#"<img src=x onerror="alert(1)">"#)
    );
}

#[test]
fn empty_reference_still_renders() {
    let mut page = page("bookings.html");
    let dialog = page.show_booking_confirmation("").unwrap();
    let strong = page
        .document()
        .query_within(dialog, ".booking-reference")
        .unwrap()[0];
    assert_eq!(page.document().text_content(strong), "");
}

#[test]
fn confirmed_cancellation_submits_the_form() {
    let mut page = page("bookings.html");
    page.platform_mut().answer_confirm(true);

    let outcome = page
        .execute(Command::ConfirmCancelBooking {
            booking_id: "42".into(),
        })
        .unwrap();
    assert_eq!(outcome, CommandOutcome::CancellationAnswered { submitted: true });

    assert_eq!(page.platform().confirms, [CANCEL_PROMPT]);
    let submission = &page.platform().submissions[0];
    assert_eq!(submission.form, by_id(&page, "cancel-form-42"));
    assert_eq!(submission.action.as_deref(), Some("/travels/bookings/42/cancel/"));
    assert_eq!(submission.method, "post");
}

#[test]
fn declined_cancellation_changes_nothing() {
    let mut page = page("bookings.html");
    let before = page.document().outer_html(page.document().root());
    page.platform_mut().answer_confirm(false);

    let submitted = page.confirm_cancel_booking("42").unwrap();
    assert!(!submitted);
    assert!(page.platform().submissions.is_empty());
    assert_eq!(page.document().outer_html(page.document().root()), before);
}

#[test]
fn declined_cancellation_of_unknown_booking_is_fine() {
    let mut page = page("bookings.html");
    page.platform_mut().answer_confirm(false);
    assert!(!page.confirm_cancel_booking("999").unwrap());
}

#[test]
fn confirmed_cancellation_without_form_is_an_error() {
    let mut page = page("bookings.html");
    page.platform_mut().set_default_confirm_answer(true);

    let err = page.confirm_cancel_booking("999").unwrap_err();
    assert!(matches!(err, UiError::CancelFormMissing { ref booking_id } if booking_id == "999"));

    let err = page.confirm_cancel_booking("43").unwrap_err();
    assert!(matches!(err, UiError::CancelFormMissing { .. }));
    assert!(page.platform().submissions.is_empty());
}

#[test]
fn cancellation_bypasses_field_validation() {
    let mut page = page("bookings.html");
    let cancel = by_id(&page, "cancel-form-42");
    page.document_mut()
        .element_mut(cancel)
        .unwrap()
        .set_attr("data-validate", "");
    page.document_mut()
        .append_html(cancel, r#"<input name="reason" required>"#);
    page.platform_mut().answer_confirm(true);

    assert!(page.confirm_cancel_booking("42").unwrap());
    assert_eq!(page.platform().submissions.len(), 1);
    assert!(page.platform().alerts.is_empty());
}

#[test]
fn print_command_opens_print_dialog() {
    let mut page = page("bookings.html");
    assert_eq!(
        page.execute(Command::PrintBooking).unwrap(),
        CommandOutcome::PrintRequested
    );
    page.print_booking();
    assert_eq!(page.platform().print_count, 2);
}

#[test]
fn removed_nodes_reject_events() {
    let mut page = page("bookings.html");
    let dialog = page.show_booking_confirmation("ABC123").unwrap();
    let close = page.document().query_within(dialog, "button").unwrap()[0];
    page.dispatch(UiEvent::Click(close)).unwrap();

    assert!(matches!(
        page.dispatch(UiEvent::Click(close)),
        Err(UiError::DetachedNode(n)) if n == close
    ));
}
