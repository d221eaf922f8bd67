//! Shared fixtures for page-level tests.

#![allow(dead_code)]

use std::path::Path;

use booking_ui::config::{SearchFormProfile, UiConfig};
use booking_ui::dom::NodeId;
use booking_ui::platform::RecordingPlatform;
use booking_ui::Page;
use chrono::NaiveDate;

pub type TestPage = Page<RecordingPlatform>;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

/// A bootstrapped page with the default configuration.
pub fn page(name: &str) -> TestPage {
    page_with(name, UiConfig::default(), false)
}

pub fn hyphenated_page(name: &str) -> TestPage {
    let config = UiConfig {
        search_profile: SearchFormProfile::Hyphenated,
        ..UiConfig::default()
    };
    page_with(name, config, false)
}

pub fn page_with(name: &str, config: UiConfig, available_dates: bool) -> TestPage {
    let mut page = Page::from_html(&fixture(name), RecordingPlatform::new(today()), config)
        .with_available_dates(available_dates);
    page.bootstrap().unwrap();
    page
}

pub fn by_id(page: &TestPage, id: &str) -> NodeId {
    page.document()
        .get_element_by_id(id)
        .unwrap_or_else(|| panic!("no element #{id}"))
}

pub fn has_class(page: &TestPage, id: &str, class: &str) -> bool {
    page.document()
        .element(by_id(page, id))
        .unwrap()
        .has_class(class)
}

pub fn value(page: &TestPage, id: &str) -> String {
    page.document()
        .element(by_id(page, id))
        .unwrap()
        .value()
        .to_string()
}

pub fn attr(page: &TestPage, id: &str, name: &str) -> Option<String> {
    page.document()
        .element(by_id(page, id))
        .unwrap()
        .attr(name)
        .map(str::to_string)
}

pub fn set_value(page: &mut TestPage, id: &str, value: &str) {
    let node = by_id(page, id);
    page.document_mut()
        .element_mut(node)
        .unwrap()
        .set_value(value);
}
