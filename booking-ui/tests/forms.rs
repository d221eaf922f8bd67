//! Form validation, date guards and the flight search helpers.

mod common;

use booking_ui::behaviors::route_search::SEARCHING_LABEL;
use booking_ui::config::UiConfig;
use booking_ui::platform::RecordingPlatform;
use booking_ui::{Page, UiEvent};
use chrono::NaiveDate;
use common::*;

const MISSING: &str = "Please fill in all required fields";
const SAME_PLACE: &str = "Destination cannot be the same as origin";
const PAST_DATE: &str = "Please select a future date";

fn submit(page: &mut TestPage, form: &str) -> bool {
    let form = by_id(page, form);
    page.dispatch(UiEvent::Submit(form)).unwrap().default_prevented
}

fn change(page: &mut TestPage, id: &str, new_value: &str) {
    set_value(page, id, new_value);
    let target = by_id(page, id);
    page.dispatch(UiEvent::Change(target)).unwrap();
}

fn choose_route(page: &mut TestPage, radio: &str) {
    let target = by_id(page, radio);
    page.document_mut().set_checked(target, true);
    page.dispatch(UiEvent::Change(target)).unwrap();
}

// ----------------------------------------------------------------------
// Required fields
// ----------------------------------------------------------------------

#[test]
fn blank_required_fields_block_submission() {
    let mut page = page("bookings.html");

    assert!(submit(&mut page, "passenger-form"));
    assert_eq!(page.platform().alerts, [MISSING]);
    assert!(page.platform().submissions.is_empty());

    assert!(has_class(&page, "full-name", "border-red-500"));
    assert!(has_class(&page, "seat-class", "border-red-500"));
    assert!(!has_class(&page, "email", "border-red-500"));
    assert!(!has_class(&page, "notes", "border-red-500"));
}

#[test]
fn whitespace_counts_as_blank() {
    let mut page = page("bookings.html");
    set_value(&mut page, "full-name", "   ");
    set_value(&mut page, "seat-class", "economy");
    assert!(submit(&mut page, "passenger-form"));
    assert!(has_class(&page, "full-name", "border-red-500"));
    assert!(!has_class(&page, "seat-class", "border-red-500"));
}

#[test]
fn fixing_fields_clears_marks_and_submits() {
    let mut page = page("bookings.html");
    submit(&mut page, "passenger-form");

    set_value(&mut page, "full-name", "Ada Lovelace");
    set_value(&mut page, "seat-class", "business");
    assert!(!submit(&mut page, "passenger-form"));

    assert!(!has_class(&page, "full-name", "border-red-500"));
    assert!(!has_class(&page, "seat-class", "border-red-500"));
    assert_eq!(page.platform().alerts.len(), 1);

    let submission = &page.platform().submissions[0];
    assert_eq!(submission.form_id.as_deref(), Some("passenger-form"));
    assert_eq!(submission.action.as_deref(), Some("/travels/book/7/"));
    assert_eq!(submission.method, "post");
}

#[test]
fn forms_without_opt_in_are_not_validated() {
    let mut page = page("bookings.html");
    assert!(!submit(&mut page, "filter-form"));
    assert!(page.platform().alerts.is_empty());
    assert!(!has_class(&page, "filter-q", "border-red-500"));
    assert_eq!(page.platform().submissions.len(), 1);
}

// ----------------------------------------------------------------------
// Dates
// ----------------------------------------------------------------------

#[test]
fn inventory_date_minimum_is_set_on_focus() {
    let mut page = page_with("bookings.html", UiConfig::default(), true);
    assert_eq!(attr(&page, "travel-date", "min"), None);

    let input = by_id(&page, "travel-date");
    page.dispatch(UiEvent::Focus(input)).unwrap();
    assert_eq!(attr(&page, "travel-date", "min").as_deref(), Some("2024-03-15"));

    page.platform_mut()
        .set_today(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    page.dispatch(UiEvent::Focus(input)).unwrap();
    assert_eq!(attr(&page, "travel-date", "min").as_deref(), Some("2024-03-16"));
}

#[test]
fn inventory_date_needs_published_inventory() {
    let mut page = page("bookings.html");
    assert_eq!(page.bindings().inventory_date, None);
    let input = by_id(&page, "travel-date");
    page.dispatch(UiEvent::Focus(input)).unwrap();
    assert_eq!(attr(&page, "travel-date", "min"), None);
}

#[test]
fn travel_date_minimum_is_set_at_bootstrap() {
    let page = page("home.html");
    assert_eq!(attr(&page, "travel_date", "min").as_deref(), Some("2024-03-15"));
}

#[test]
fn past_travel_dates_are_cleared() {
    let mut page = page("home.html");
    change(&mut page, "travel_date", "2024-03-14");
    assert_eq!(value(&page, "travel_date"), "");
    assert_eq!(page.platform().alerts, [PAST_DATE]);
}

#[test]
fn today_and_later_are_kept() {
    let mut page = page("home.html");
    for date in ["2024-03-15", "2025-01-01"] {
        change(&mut page, "travel_date", date);
        assert_eq!(value(&page, "travel_date"), date);
    }
    assert!(page.platform().alerts.is_empty());
}

#[test]
fn guard_keeps_the_day_it_was_armed_with() {
    let mut page = page("home.html");
    page.platform_mut()
        .set_today(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    change(&mut page, "travel_date", "2024-03-20");
    assert_eq!(value(&page, "travel_date"), "2024-03-20");
}

#[test]
fn unreadable_dates_are_left_alone() {
    let mut page = page("home.html");
    change(&mut page, "travel_date", "next tuesday");
    assert_eq!(value(&page, "travel_date"), "next tuesday");
    assert!(page.platform().alerts.is_empty());
}

// ----------------------------------------------------------------------
// Same-location guard
// ----------------------------------------------------------------------

#[test]
fn choosing_destination_equal_to_origin_clears_destination() {
    let mut page = page("home.html");
    change(&mut page, "from_location", "DEL");
    change(&mut page, "to_location", "DEL");

    assert_eq!(value(&page, "from_location"), "DEL");
    assert_eq!(value(&page, "to_location"), "");
    assert_eq!(page.platform().alerts, [SAME_PLACE]);
}

#[test]
fn choosing_origin_equal_to_destination_clears_origin() {
    let mut page = page("home.html");
    change(&mut page, "to_location", "BOM");
    change(&mut page, "from_location", "BOM");

    assert_eq!(value(&page, "from_location"), "");
    assert_eq!(value(&page, "to_location"), "BOM");
    assert_eq!(page.platform().alerts, [SAME_PLACE]);
}

#[test]
fn distinct_or_empty_locations_pass() {
    let mut page = page("home.html");
    change(&mut page, "from_location", "");
    change(&mut page, "to_location", "");
    change(&mut page, "from_location", "DEL");
    change(&mut page, "to_location", "BOM");
    assert!(page.platform().alerts.is_empty());
    assert_eq!(value(&page, "from_location"), "DEL");
    assert_eq!(value(&page, "to_location"), "BOM");
}

// ----------------------------------------------------------------------
// Route type
// ----------------------------------------------------------------------

#[test]
fn route_type_switches_placeholders_not_values() {
    let mut page = page("home.html");
    change(&mut page, "from_location", "DEL");
    change(&mut page, "to_location", "BOM");

    choose_route(&mut page, "international");
    assert_eq!(
        attr(&page, "from_location", "placeholder").as_deref(),
        Some("Select International Origin")
    );
    assert_eq!(
        attr(&page, "to_location", "placeholder").as_deref(),
        Some("Select International Destination")
    );
    assert_eq!(value(&page, "from_location"), "DEL");
    assert_eq!(value(&page, "to_location"), "BOM");

    choose_route(&mut page, "domestic");
    assert_eq!(
        attr(&page, "from_location", "placeholder").as_deref(),
        Some("Select Domestic Origin")
    );
    assert_eq!(
        attr(&page, "to_location", "placeholder").as_deref(),
        Some("Select Domestic Destination")
    );
}

#[test]
fn route_change_pulses_the_search_box() {
    let mut page = page("home.html");
    let search_box = by_id(&page, "search-box");
    let transform = |page: &TestPage| {
        page.document()
            .element(search_box)
            .unwrap()
            .style_property("transform")
    };

    choose_route(&mut page, "international");
    assert_eq!(transform(&page).as_deref(), Some("scale(1.02)"));

    page.advance_time(199).unwrap();
    assert_eq!(transform(&page).as_deref(), Some("scale(1.02)"));
    page.advance_time(1).unwrap();
    assert_eq!(transform(&page).as_deref(), Some("scale(1)"));
}

#[test]
fn missing_international_radio_counts_as_domestic() {
    let html = fixture("home.html").replace(
        r#"<input type="radio" name="route_type" id="international" value="international">"#,
        "",
    );
    let mut page = Page::from_html(&html, RecordingPlatform::new(today()), UiConfig::default());
    page.bootstrap().unwrap();
    assert_eq!(page.bindings().search.unwrap().international, None);

    choose_route(&mut page, "domestic");
    assert_eq!(
        attr(&page, "from_location", "placeholder").as_deref(),
        Some("Select Domestic Origin")
    );
    assert_eq!(
        attr(&page, "to_location", "placeholder").as_deref(),
        Some("Select Domestic Destination")
    );
}

// ----------------------------------------------------------------------
// Search loading state
// ----------------------------------------------------------------------

#[test]
fn search_button_shows_loading_then_resets() {
    let mut page = page("home.html");
    let button = by_id(&page, "search-button");
    let original = page.document().inner_html(button);

    assert!(!submit(&mut page, "flight-search"));
    assert_eq!(page.document().inner_html(button), SEARCHING_LABEL);
    assert!(page.document().element(button).unwrap().disabled());
    assert_eq!(page.platform().submissions.len(), 1);
    assert_eq!(page.platform().submissions[0].method, "get");

    page.advance_time(2999).unwrap();
    assert!(page.document().element(button).unwrap().disabled());

    page.advance_time(1).unwrap();
    assert_eq!(page.document().inner_html(button), original);
    assert!(!page.document().element(button).unwrap().disabled());
}

#[test]
fn overlapping_searches_restore_the_real_label() {
    let mut page = page("home.html");
    let button = by_id(&page, "search-button");
    let original = page.document().inner_html(button);

    submit(&mut page, "flight-search");
    page.advance_time(1000).unwrap();
    submit(&mut page, "flight-search");
    assert_eq!(page.document().inner_html(button), SEARCHING_LABEL);

    page.advance_time(2000).unwrap();
    assert_eq!(page.document().inner_html(button), original);
    assert!(!page.document().element(button).unwrap().disabled());

    page.advance_time(1000).unwrap();
    assert_eq!(page.document().inner_html(button), original);
}

// ----------------------------------------------------------------------
// Hyphenated markup
// ----------------------------------------------------------------------

#[test]
fn hyphenated_profile_guards_locations_only() {
    let mut page = hyphenated_page("search_hyphenated.html");
    let summary = page.bindings().summary();
    assert_eq!(summary, ["same-location guard"]);

    change(&mut page, "from-location", "DEL");
    change(&mut page, "to-location", "DEL");
    assert_eq!(value(&page, "to-location"), "");
    assert_eq!(page.platform().alerts, [SAME_PLACE]);

    choose_route(&mut page, "international");
    assert_eq!(
        attr(&page, "from-location", "placeholder").as_deref(),
        Some("Select Domestic Origin")
    );

    let button = by_id(&page, "search-button");
    assert!(!submit(&mut page, "search-form"));
    assert_eq!(page.document().inner_html(button), "Search");
    assert_eq!(attr(&page, "travel_date", "min"), None);
}

#[test]
fn default_profile_ignores_hyphenated_markup() {
    let mut page = page("search_hyphenated.html");
    assert_eq!(page.bindings().search, None);

    change(&mut page, "from-location", "DEL");
    change(&mut page, "to-location", "DEL");
    assert_eq!(value(&page, "to-location"), "DEL");
    assert!(page.platform().alerts.is_empty());
}
