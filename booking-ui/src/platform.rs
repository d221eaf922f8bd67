//! Native browser facilities the page behaviors call out to.
//!
//! Everything a behavior cannot do to the page model itself (blocking
//! dialogs, printing, scrolling, navigating away on form submission, reading
//! the wall clock) goes through [`Platform`]. [`RecordingPlatform`] captures
//! those calls and answers confirmations from a script, which is what the
//! tests drive pages with.

use std::collections::VecDeque;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::dom::NodeId;

/// How `scrollIntoView` should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Which edge of the target aligns with the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollOptions {
    /// Smooth scroll with the target's top edge at the viewport start.
    pub const SMOOTH_START: Self = Self {
        behavior: ScrollBehavior::Smooth,
        block: ScrollBlock::Start,
    };
}

/// A native form submission: the browser would navigate to `action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form: NodeId,
    pub form_id: Option<String>,
    pub action: Option<String>,
    pub method: String,
}

/// Side effects outside the page model.
pub trait Platform {
    /// Show a blocking notice.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question; `true` means the user accepted.
    fn confirm(&mut self, message: &str) -> bool;

    /// Open the native print flow.
    fn print(&mut self);

    fn scroll_into_view(&mut self, target: NodeId, options: ScrollOptions);

    /// Hand a form to the browser for submission.
    fn submit_form(&mut self, submission: FormSubmission);

    /// Today's calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;
}

/// Headless platform backed by the system clock.
///
/// Dialogs and navigation are logged; confirmations get a fixed answer.
#[derive(Debug, Clone)]
pub struct SystemPlatform {
    confirm_answer: bool,
}

impl SystemPlatform {
    pub fn new(confirm_answer: bool) -> Self {
        Self { confirm_answer }
    }
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Platform for SystemPlatform {
    fn alert(&mut self, message: &str) {
        info!(notice = message, "alert");
    }

    fn confirm(&mut self, message: &str) -> bool {
        info!(question = message, answer = self.confirm_answer, "confirm");
        self.confirm_answer
    }

    fn print(&mut self) {
        info!("print requested");
    }

    fn scroll_into_view(&mut self, target: NodeId, options: ScrollOptions) {
        info!(%target, ?options, "scroll into view");
    }

    fn submit_form(&mut self, submission: FormSubmission) {
        info!(
            form = ?submission.form_id,
            action = ?submission.action,
            method = %submission.method,
            "form submitted"
        );
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Platform that records every call for later inspection.
#[derive(Debug, Clone)]
pub struct RecordingPlatform {
    today: NaiveDate,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    confirm_answers: VecDeque<bool>,
    default_confirm_answer: bool,
    pub print_count: usize,
    pub scrolls: Vec<(NodeId, ScrollOptions)>,
    pub submissions: Vec<FormSubmission>,
}

impl RecordingPlatform {
    /// A recorder whose clock is pinned to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            alerts: Vec::new(),
            confirms: Vec::new(),
            confirm_answers: VecDeque::new(),
            default_confirm_answer: false,
            print_count: 0,
            scrolls: Vec::new(),
            submissions: Vec::new(),
        }
    }

    /// Queue the answer for the next `confirm` call.
    pub fn answer_confirm(&mut self, answer: bool) {
        self.confirm_answers.push_back(answer);
    }

    /// Answer used once queued answers run out.
    pub fn set_default_confirm_answer(&mut self, answer: bool) {
        self.default_confirm_answer = answer;
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }
}

impl Platform for RecordingPlatform {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answers
            .pop_front()
            .unwrap_or(self.default_confirm_answer)
    }

    fn print(&mut self) {
        self.print_count += 1;
    }

    fn scroll_into_view(&mut self, target: NodeId, options: ScrollOptions) {
        self.scrolls.push((target, options));
    }

    fn submit_form(&mut self, submission: FormSubmission) {
        self.submissions.push(submission);
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
