//! Booking confirmation dialog and cancellation flow.

use askama::Template;

use crate::templates::BookingConfirmationTemplate;

pub const CANCEL_FORM_PREFIX: &str = "cancel-form-";

pub const CANCEL_PROMPT: &str = "Are you sure you want to cancel this booking?";

/// Outermost element of an overlay dialog.
pub const DIALOG_SELECTOR: &str = ".fixed";

/// Attribute marking a control that closes its enclosing dialog.
pub const DISMISS_ATTR: &str = "data-dismiss";
pub const DISMISS_DIALOG: &str = "dialog";

/// Id of the hidden form that cancels a booking.
pub fn cancel_form_id(booking_id: &str) -> String {
    format!("{CANCEL_FORM_PREFIX}{booking_id}")
}

/// Markup for the confirmation overlay.
pub fn confirmation_markup(reference: &str) -> Result<String, askama::Error> {
    BookingConfirmationTemplate { reference }.render()
}
