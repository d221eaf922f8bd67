//! A page with its behaviors wired up.
//!
//! [`Page`] owns the document, the timer queue and the platform. It is
//! driven in three ways: [`Page::dispatch`] for user events,
//! [`Page::execute`] for commands, and [`Page::advance_time`] to let timers
//! fire. All of it is single-threaded and runs to completion per call, as
//! in a browser event loop.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, trace};

use crate::behaviors::booking::{
    self, CANCEL_PROMPT, DIALOG_SELECTOR, DISMISS_ATTR, DISMISS_DIALOG,
};
use crate::behaviors::dates::{self, DateVerdict, INVENTORY_DATE_ID, PAST_DATE_NOTICE};
use crate::behaviors::navigation::{
    self, ClickRegion, HIDDEN_CLASS, IN_PAGE_ANCHORS, MENU_BUTTON_ID, MENU_ID, MenuVisibility,
};
use crate::behaviors::route_search::{
    LocationField, RouteType, SAME_LOCATION_NOTICE, SubmitButtonState, location_conflict,
};
use crate::behaviors::transient::{
    AUTO_HIDE_SELECTOR, AlertPhase, FLOAT_CLASS, HERO_SECTION_SELECTOR, PLANE_ICON_SELECTOR, Pulse,
};
use crate::behaviors::validation::{
    ERROR_CLASS, MISSING_FIELDS_NOTICE, REQUIRED_FIELDS, VALIDATED_FORMS, check_fields,
};
use crate::config::UiConfig;
use crate::dom::{Document, NodeId};
use crate::error::UiError;
use crate::event::{Command, CommandOutcome, DispatchOutcome, UiEvent};
use crate::platform::{FormSubmission, Platform, ScrollOptions};
use crate::timers::{PendingTimer, TimerQueue};

/// Work scheduled on the page's timer queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTask {
    /// Move an auto-hide alert to the given phase.
    Alert { alert: NodeId, reach: AlertPhase },
    /// End the search box pulse.
    SettlePulse(NodeId),
    /// Take the search button out of its loading state.
    RestoreSubmitButton(NodeId),
    /// Make sure the plane icon carries the float animation class.
    EnsureFloat(NodeId),
}

/// The mobile menu and its toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuBinding {
    pub button: NodeId,
    pub menu: NodeId,
}

/// Elements of the flight search form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchBinding {
    pub form: NodeId,
    pub origin: Option<NodeId>,
    pub destination: Option<NodeId>,
    pub domestic: Option<NodeId>,
    pub international: Option<NodeId>,
    pub route_type_toggle: bool,
    pub submit_loading: bool,
}

impl SearchBinding {
    fn locations(&self) -> Option<(NodeId, NodeId)> {
        self.origin.zip(self.destination)
    }
}

/// The past-date guard and the day it was armed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FutureDateBinding {
    pub input: NodeId,
    pub min: NaiveDate,
}

/// Elements each behavior was attached to at bootstrap.
///
/// A `None` or empty entry means the behavior found no anchors and is
/// inactive on this page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pub menu: Option<MenuBinding>,
    pub anchors: Vec<NodeId>,
    pub alerts: Vec<NodeId>,
    pub inventory_date: Option<NodeId>,
    pub validated_forms: Vec<NodeId>,
    pub search: Option<SearchBinding>,
    pub future_date: Option<FutureDateBinding>,
    pub float_icon: Option<NodeId>,
}

impl Bindings {
    /// Human-readable list of the active behaviors.
    pub fn summary(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.menu.is_some() {
            out.push("mobile menu".to_string());
        }
        if !self.anchors.is_empty() {
            out.push(format!("smooth scroll ({} links)", self.anchors.len()));
        }
        if !self.alerts.is_empty() {
            out.push(format!("alert auto-hide ({} alerts)", self.alerts.len()));
        }
        if self.inventory_date.is_some() {
            out.push("inventory date minimum".to_string());
        }
        if !self.validated_forms.is_empty() {
            out.push(format!(
                "required-field validation ({} forms)",
                self.validated_forms.len()
            ));
        }
        if let Some(search) = &self.search {
            if search.locations().is_some() {
                out.push("same-location guard".to_string());
            }
            let has_radios = search.domestic.is_some() || search.international.is_some();
            if search.route_type_toggle && has_radios {
                out.push("route-type toggle".to_string());
            }
            if search.submit_loading {
                out.push("search loading state".to_string());
            }
        }
        if self.future_date.is_some() {
            out.push("past-date guard".to_string());
        }
        if self.float_icon.is_some() {
            out.push("floating plane".to_string());
        }
        out
    }
}

/// A document with the site's behaviors attached.
pub struct Page<P: Platform> {
    doc: Document,
    platform: P,
    config: UiConfig,
    timers: TimerQueue<PageTask>,
    bindings: Bindings,
    available_dates: bool,
    booted: bool,
    /// Search buttons currently in their loading state.
    submit_states: HashMap<NodeId, SubmitButtonState>,
}

impl<P: Platform> Page<P> {
    pub fn new(doc: Document, platform: P, config: UiConfig) -> Self {
        Self {
            doc,
            platform,
            config,
            timers: TimerQueue::new(),
            bindings: Bindings::default(),
            available_dates: false,
            booted: false,
            submit_states: HashMap::new(),
        }
    }

    /// Parse `html` into a new page.
    pub fn from_html(html: &str, platform: P, config: UiConfig) -> Self {
        Self::new(Document::parse(html), platform, config)
    }

    /// Mark the page as publishing date inventory, which enables the
    /// focus-time minimum on `#travel-date`.
    pub fn with_available_dates(mut self, available: bool) -> Self {
        self.available_dates = available;
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Virtual milliseconds since the page was created.
    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer<PageTask>> {
        self.timers.pending()
    }

    // ------------------------------------------------------------------
    // Bootstrap
    // ------------------------------------------------------------------

    /// Attach every behavior whose anchors exist. Runs once; later calls
    /// return the existing bindings.
    pub fn bootstrap(&mut self) -> Result<&Bindings, UiError> {
        if self.booted {
            return Ok(&self.bindings);
        }
        self.booted = true;

        self.bind_navigation()?;
        self.bind_alerts()?;
        self.bind_inventory_date();
        self.bindings.validated_forms = self.doc.query_selector_all(VALIDATED_FORMS)?;
        self.bind_search_form()?;
        self.bind_future_date();
        self.bind_float_animation()?;

        info!(behaviors = ?self.bindings.summary(), "page bootstrapped");
        Ok(&self.bindings)
    }

    fn bind_navigation(&mut self) -> Result<(), UiError> {
        let button = self.doc.get_element_by_id(MENU_BUTTON_ID);
        let menu = self.doc.get_element_by_id(MENU_ID);
        match button.zip(menu) {
            Some((button, menu)) => self.bindings.menu = Some(MenuBinding { button, menu }),
            None => debug!("no mobile menu on page"),
        }
        self.bindings.anchors = self.doc.query_selector_all(IN_PAGE_ANCHORS)?;
        Ok(())
    }

    fn bind_alerts(&mut self) -> Result<(), UiError> {
        let alerts = self.doc.query_selector_all(AUTO_HIDE_SELECTOR)?;
        let delay = self.config.timings.alert_hide();
        for &alert in &alerts {
            self.timers.set_timeout(
                delay,
                PageTask::Alert {
                    alert,
                    reach: AlertPhase::Visible.next(),
                },
            );
        }
        self.bindings.alerts = alerts;
        Ok(())
    }

    fn bind_inventory_date(&mut self) {
        if !self.available_dates {
            debug!("page publishes no date inventory");
            return;
        }
        self.bindings.inventory_date = self.doc.get_element_by_id(INVENTORY_DATE_ID);
    }

    fn bind_search_form(&mut self) -> Result<(), UiError> {
        let selectors = self.config.search_profile.selectors();
        let Some(form) = self.doc.query_selector(selectors.form)? else {
            debug!(selector = selectors.form, "no search form on page");
            return Ok(());
        };
        self.bindings.search = Some(SearchBinding {
            form,
            origin: self.doc.get_element_by_id(selectors.origin_id),
            destination: self.doc.get_element_by_id(selectors.destination_id),
            domestic: self.doc.get_element_by_id(selectors.domestic_id),
            international: self.doc.get_element_by_id(selectors.international_id),
            route_type_toggle: selectors.route_type_toggle,
            submit_loading: selectors.submit_loading,
        });
        Ok(())
    }

    fn bind_future_date(&mut self) {
        let Some(id) = self.config.search_profile.selectors().future_date_id else {
            return;
        };
        let Some(input) = self.doc.get_element_by_id(id) else {
            debug!(id, "no travel date input on page");
            return;
        };
        let min = self.platform.today();
        if let Some(element) = self.doc.element_mut(input) {
            element.set_attr("min", dates::min_attr(min));
        }
        self.bindings.future_date = Some(FutureDateBinding { input, min });
    }

    fn bind_float_animation(&mut self) -> Result<(), UiError> {
        if self.doc.query_selector(HERO_SECTION_SELECTOR)?.is_none() {
            return Ok(());
        }
        let Some(plane) = self.doc.query_selector(PLANE_ICON_SELECTOR)? else {
            debug!("hero section has no plane icon");
            return Ok(());
        };
        // The class is idempotent; a single tick is enough.
        self.timers.set_timeout(
            self.config.timings.float_interval(),
            PageTask::EnsureFloat(plane),
        );
        self.bindings.float_icon = Some(plane);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Deliver a user event to the behaviors bound to its target.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<DispatchOutcome, UiError> {
        let target = event.target();
        if !self.doc.is_connected(target) {
            return Err(UiError::DetachedNode(target));
        }
        trace!(event = event.name(), %target, "dispatch");

        match event {
            UiEvent::Click(target) => Ok(self.on_click(target)),
            UiEvent::Change(target) => {
                self.on_change(target);
                Ok(DispatchOutcome::default())
            }
            UiEvent::Submit(form) => self.on_submit(form),
            UiEvent::Focus(target) => {
                self.on_focus(target);
                Ok(DispatchOutcome::default())
            }
        }
    }

    fn on_click(&mut self, target: NodeId) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let path: Vec<NodeId> = self.doc.ancestors(target).collect();

        for &node in &path {
            if self.bindings.anchors.contains(&node) {
                outcome.default_prevented = true;
                self.scroll_to_anchor(node);
            }
            let dismisses = self
                .doc
                .element(node)
                .is_some_and(|e| e.attr(DISMISS_ATTR) == Some(DISMISS_DIALOG));
            if dismisses {
                self.dismiss_dialog(node);
            }
        }

        if let Some(binding) = self.bindings.menu {
            let region = if self.doc.contains(binding.button, target) {
                ClickRegion::Toggle
            } else if self.doc.contains(binding.menu, target) {
                ClickRegion::Menu
            } else {
                ClickRegion::Outside
            };
            let current = MenuVisibility::from_hidden_class(
                self.doc
                    .element(binding.menu)
                    .is_some_and(|e| e.has_class(HIDDEN_CLASS)),
            );
            let next = navigation::menu_after_click(current, region);
            if let Some(menu) = self.doc.element_mut(binding.menu) {
                if next.is_hidden() {
                    menu.add_class(HIDDEN_CLASS);
                } else {
                    menu.remove_class(HIDDEN_CLASS);
                }
            }
        }

        outcome
    }

    fn scroll_to_anchor(&mut self, anchor: NodeId) {
        let Some(href) = self.doc.element(anchor).and_then(|e| e.attr("href")) else {
            return;
        };
        let Some(selector) = navigation::anchor_target(href) else {
            return;
        };
        match self.doc.query_selector(selector) {
            Ok(Some(target)) => self
                .platform
                .scroll_into_view(target, ScrollOptions::SMOOTH_START),
            Ok(None) => debug!(href, "anchor target not found"),
            Err(err) => debug!(href, %err, "anchor href is not a selector"),
        }
    }

    fn dismiss_dialog(&mut self, control: NodeId) {
        match self.doc.closest(control, DIALOG_SELECTOR) {
            Ok(Some(dialog)) => {
                self.doc.remove(dialog);
                trace!(%dialog, "dialog dismissed");
            }
            Ok(None) => debug!(%control, "dismiss control outside any dialog"),
            Err(err) => debug!(%err, "bad dialog selector"),
        }
    }

    fn on_change(&mut self, target: NodeId) {
        if let Some(search) = self.bindings.search {
            if let Some((origin, destination)) = search.locations() {
                if target == origin {
                    self.guard_same_location(origin, destination, LocationField::Origin);
                } else if target == destination {
                    self.guard_same_location(origin, destination, LocationField::Destination);
                }
            }
            let is_route_radio =
                Some(target) == search.domestic || Some(target) == search.international;
            if search.route_type_toggle && is_route_radio {
                self.apply_route_type(&search);
            }
        }

        if let Some(guard) = self.bindings.future_date {
            if guard.input == target {
                self.guard_future_date(guard);
            }
        }
    }

    fn guard_same_location(&mut self, origin: NodeId, destination: NodeId, changed: LocationField) {
        let value = |id| {
            self.doc
                .element(id)
                .map(|e| e.value().to_string())
                .unwrap_or_default()
        };
        let (from, to) = (value(origin), value(destination));
        let Some(cleared) = location_conflict(&from, &to, changed) else {
            return;
        };
        self.platform.alert(SAME_LOCATION_NOTICE);
        let field = match cleared {
            LocationField::Origin => origin,
            LocationField::Destination => destination,
        };
        if let Some(element) = self.doc.element_mut(field) {
            element.set_value("");
        }
    }

    fn apply_route_type(&mut self, search: &SearchBinding) {
        let international = search
            .international
            .and_then(|id| self.doc.element(id))
            .is_some_and(|e| e.checked());
        let route = RouteType::from_international_checked(international);

        let search_box = self
            .doc
            .query_selector(self.config.search_profile.selectors().search_box)
            .ok()
            .flatten();
        if let Some(search_box) = search_box {
            if let Some(element) = self.doc.element_mut(search_box) {
                element.set_style_property("transform", Pulse::Grown.transform());
            }
            self.timers
                .set_timeout(self.config.timings.pulse(), PageTask::SettlePulse(search_box));
        }

        for (field, id) in [
            (LocationField::Origin, search.origin),
            (LocationField::Destination, search.destination),
        ] {
            if let Some(element) = id.and_then(|id| self.doc.element_mut(id)) {
                element.set_attr("placeholder", route.placeholder(field));
            }
        }
        trace!(?route, "route type changed");
    }

    fn guard_future_date(&mut self, guard: FutureDateBinding) {
        let Some(element) = self.doc.element_mut(guard.input) else {
            return;
        };
        if dates::check_travel_date(element.value(), guard.min) == DateVerdict::Past {
            element.set_value("");
            self.platform.alert(PAST_DATE_NOTICE);
        }
    }

    fn on_focus(&mut self, target: NodeId) {
        if self.bindings.inventory_date != Some(target) {
            return;
        }
        let today = self.platform.today();
        if let Some(element) = self.doc.element_mut(target) {
            element.set_attr("min", dates::min_attr(today));
        }
    }

    fn on_submit(&mut self, form: NodeId) -> Result<DispatchOutcome, UiError> {
        let mut outcome = DispatchOutcome::default();
        if !self.doc.element(form).is_some_and(|e| e.tag() == "form") {
            debug!(%form, "submit event on a non-form node ignored");
            return Ok(outcome);
        }

        if self.bindings.validated_forms.contains(&form) && !self.validate_required(form)? {
            outcome.default_prevented = true;
            self.platform.alert(MISSING_FIELDS_NOTICE);
        }

        if let Some(search) = self.bindings.search {
            if search.form == form && search.submit_loading {
                self.begin_search_loading(form)?;
            }
        }

        if !outcome.default_prevented {
            let submission = self.submission_for(form);
            self.platform.submit_form(submission);
        }
        Ok(outcome)
    }

    /// Mark blank required fields and report whether the form may submit.
    fn validate_required(&mut self, form: NodeId) -> Result<bool, UiError> {
        let fields = self.doc.query_within(form, REQUIRED_FIELDS)?;
        let values: Vec<String> = fields
            .iter()
            .map(|&f| {
                self.doc
                    .element(f)
                    .map(|e| e.value().to_string())
                    .unwrap_or_default()
            })
            .collect();
        let (verdicts, ok) = check_fields(values.iter().map(String::as_str));
        for (&field, verdict) in fields.iter().zip(verdicts) {
            if let Some(element) = self.doc.element_mut(field) {
                if verdict.is_blank() {
                    element.add_class(ERROR_CLASS);
                } else {
                    element.remove_class(ERROR_CLASS);
                }
            }
        }
        Ok(ok)
    }

    fn begin_search_loading(&mut self, form: NodeId) -> Result<(), UiError> {
        let selector = self.config.search_profile.selectors().submit_button;
        let Some(button) = self.doc.query_within(form, selector)?.into_iter().next() else {
            debug!("search form has no submit button");
            return Ok(());
        };
        let state = self
            .submit_states
            .remove(&button)
            .unwrap_or_else(|| SubmitButtonState::Idle {
                label: self.doc.inner_html(button),
            })
            .begin_loading();
        self.doc.set_inner_html(button, state.label());
        if let Some(element) = self.doc.element_mut(button) {
            element.set_disabled(state.disabled());
        }
        self.submit_states.insert(button, state);
        self.timers.set_timeout(
            self.config.timings.submit_reset(),
            PageTask::RestoreSubmitButton(button),
        );
        Ok(())
    }

    fn submission_for(&self, form: NodeId) -> FormSubmission {
        let element = self.doc.element(form);
        FormSubmission {
            form,
            form_id: element.and_then(|e| e.id()).map(str::to_string),
            action: element.and_then(|e| e.attr("action")).map(str::to_string),
            method: element
                .and_then(|e| e.attr("method"))
                .unwrap_or("get")
                .to_ascii_lowercase(),
        }
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, UiError> {
        match command {
            Command::ShowBookingConfirmation { reference } => self
                .show_booking_confirmation(&reference)
                .map(CommandOutcome::DialogShown),
            Command::ConfirmCancelBooking { booking_id } => self
                .confirm_cancel_booking(&booking_id)
                .map(|submitted| CommandOutcome::CancellationAnswered { submitted }),
            Command::PrintBooking => {
                self.print_booking();
                Ok(CommandOutcome::PrintRequested)
            }
        }
    }

    /// Append a confirmation overlay for `reference` and return it.
    pub fn show_booking_confirmation(&mut self, reference: &str) -> Result<NodeId, UiError> {
        let markup = booking::confirmation_markup(reference)?;
        let parent = self.doc.body().unwrap_or_else(|| self.doc.root());
        let created = self.doc.append_html(parent, markup.trim());
        let dialog = created
            .into_iter()
            .find(|&n| self.doc.element(n).is_some())
            .ok_or(UiError::DetachedNode(parent))?;
        info!(reference, %dialog, "booking confirmation shown");
        Ok(dialog)
    }

    /// Ask for confirmation, then submit `cancel-form-{booking_id}`.
    ///
    /// Returns whether the form was submitted. Declining leaves the page
    /// untouched; accepting with no matching form is an error.
    pub fn confirm_cancel_booking(&mut self, booking_id: &str) -> Result<bool, UiError> {
        if !self.platform.confirm(CANCEL_PROMPT) {
            debug!(booking_id, "cancellation declined");
            return Ok(false);
        }
        let form = self
            .doc
            .get_element_by_id(&booking::cancel_form_id(booking_id))
            .filter(|&f| self.doc.element(f).is_some_and(|e| e.tag() == "form"))
            .ok_or_else(|| UiError::CancelFormMissing {
                booking_id: booking_id.to_string(),
            })?;
        let submission = self.submission_for(form);
        self.platform.submit_form(submission);
        info!(booking_id, "cancellation submitted");
        Ok(true)
    }

    pub fn print_booking(&mut self) {
        self.platform.print();
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Move the virtual clock forward by `delta_ms`, running every timer
    /// that falls due on the way. Returns how many ran.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<usize, UiError> {
        let delta = u64::try_from(delta_ms).map_err(|_| UiError::NegativeTime(delta_ms))?;
        let target = self.timers.now_ms().saturating_add(delta);
        let mut ran = 0;
        while let Some(task) = self.timers.pop_due(target) {
            self.run_task(task);
            ran += 1;
        }
        self.timers.advance_clock_to(target);
        Ok(ran)
    }

    fn run_task(&mut self, task: PageTask) {
        trace!(?task, now_ms = self.timers.now_ms(), "timer fired");
        match task {
            PageTask::Alert { alert, reach } => {
                if reach == AlertPhase::Removed {
                    self.doc.remove(alert);
                    return;
                }
                if let (Some(element), Some(opacity)) =
                    (self.doc.element_mut(alert), reach.opacity())
                {
                    element.set_style_property("opacity", opacity);
                }
                self.timers.set_timeout(
                    self.config.timings.alert_remove(),
                    PageTask::Alert {
                        alert,
                        reach: reach.next(),
                    },
                );
            }
            PageTask::SettlePulse(search_box) => {
                if let Some(element) = self.doc.element_mut(search_box) {
                    element.set_style_property("transform", Pulse::Resting.transform());
                }
            }
            PageTask::RestoreSubmitButton(button) => {
                let Some(state) = self.submit_states.remove(&button).map(SubmitButtonState::reset)
                else {
                    return;
                };
                self.doc.set_inner_html(button, state.label());
                if let Some(element) = self.doc.element_mut(button) {
                    element.set_disabled(state.disabled());
                }
            }
            PageTask::EnsureFloat(plane) => {
                if let Some(element) = self.doc.element_mut(plane) {
                    element.add_class(FLOAT_CLASS);
                }
            }
        }
    }
}
