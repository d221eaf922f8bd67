//! Typed inputs to a page.

use crate::dom::NodeId;

/// A user interaction with the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Click(NodeId),
    /// A control's value was committed (`change`).
    Change(NodeId),
    /// A form is being submitted.
    Submit(NodeId),
    Focus(NodeId),
}

impl UiEvent {
    pub fn target(self) -> NodeId {
        match self {
            UiEvent::Click(n) | UiEvent::Change(n) | UiEvent::Submit(n) | UiEvent::Focus(n) => n,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UiEvent::Click(_) => "click",
            UiEvent::Change(_) => "change",
            UiEvent::Submit(_) => "submit",
            UiEvent::Focus(_) => "focus",
        }
    }
}

/// What the page did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The browser's default action (navigation, submission) was cancelled.
    pub default_prevented: bool,
}

/// An action requested by page markup or the embedding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Overlay a confirmation dialog showing `reference`.
    ShowBookingConfirmation { reference: String },

    /// Ask before submitting the booking's cancellation form.
    ConfirmCancelBooking { booking_id: String },

    /// Open the print dialog.
    PrintBooking,
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The dialog's outermost element.
    DialogShown(NodeId),
    /// Whether the user confirmed and the form was submitted.
    CancellationAnswered { submitted: bool },
    PrintRequested,
}
