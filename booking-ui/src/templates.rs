//! Askama templates for generated markup.

use askama::Template;

/// Booking confirmation overlay, appended to the page on demand.
///
/// The reference is HTML-escaped, so any string is safe to show.
#[derive(Template)]
#[template(path = "booking_confirmation.html")]
pub struct BookingConfirmationTemplate<'a> {
    pub reference: &'a str,
}

/// Standalone page showing the theme stylesheet and a sample dialog.
#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate<'a> {
    pub title: &'a str,
    /// Trusted CSS produced by [`crate::theme::ThemeConfig::to_css`].
    pub stylesheet: &'a str,
    /// Trusted markup from [`BookingConfirmationTemplate`].
    pub dialog: &'a str,
}
