//! Flight search form helpers.

pub const SAME_LOCATION_NOTICE: &str = "Destination cannot be the same as origin";

/// Label shown on the search button while a search is in flight.
pub const SEARCHING_LABEL: &str = r#"<i class="bi bi-hourglass-split"></i> Searching..."#;

/// One of the two location fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Origin,
    Destination,
}

/// Which field to clear after `changed` was edited, if any.
///
/// Equal, non-empty locations are rejected; the field just edited is the
/// one that loses its value.
pub fn location_conflict(
    origin: &str,
    destination: &str,
    changed: LocationField,
) -> Option<LocationField> {
    (!origin.is_empty() && origin == destination).then_some(changed)
}

/// Domestic or international search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteType {
    Domestic,
    International,
}

impl RouteType {
    /// Route type from the state of the international radio. A missing
    /// radio counts as unchecked.
    pub fn from_international_checked(checked: bool) -> Self {
        if checked {
            RouteType::International
        } else {
            RouteType::Domestic
        }
    }

    pub fn origin_placeholder(self) -> &'static str {
        match self {
            RouteType::Domestic => "Select Domestic Origin",
            RouteType::International => "Select International Origin",
        }
    }

    pub fn destination_placeholder(self) -> &'static str {
        match self {
            RouteType::Domestic => "Select Domestic Destination",
            RouteType::International => "Select International Destination",
        }
    }

    pub fn placeholder(self, field: LocationField) -> &'static str {
        match field {
            LocationField::Origin => self.origin_placeholder(),
            LocationField::Destination => self.destination_placeholder(),
        }
    }
}

/// Submit button state around a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitButtonState {
    Idle { label: String },
    Loading { original_label: String },
}

impl SubmitButtonState {
    /// Enter the loading state. A button already loading keeps the label
    /// it had before the first submit, so overlapping submits restore the
    /// real label rather than the spinner.
    pub fn begin_loading(self) -> Self {
        match self {
            SubmitButtonState::Idle { label } => SubmitButtonState::Loading {
                original_label: label,
            },
            loading @ SubmitButtonState::Loading { .. } => loading,
        }
    }

    /// Leave the loading state.
    pub fn reset(self) -> Self {
        match self {
            SubmitButtonState::Loading { original_label } => SubmitButtonState::Idle {
                label: original_label,
            },
            idle @ SubmitButtonState::Idle { .. } => idle,
        }
    }

    /// Markup the button shows in this state.
    pub fn label(&self) -> &str {
        match self {
            SubmitButtonState::Idle { label } => label,
            SubmitButtonState::Loading { .. } => SEARCHING_LABEL,
        }
    }

    pub fn disabled(&self) -> bool {
        matches!(self, SubmitButtonState::Loading { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_locations_clear_the_changed_field() {
        assert_eq!(
            location_conflict("DEL", "DEL", LocationField::Origin),
            Some(LocationField::Origin)
        );
        assert_eq!(
            location_conflict("DEL", "DEL", LocationField::Destination),
            Some(LocationField::Destination)
        );
    }

    #[test]
    fn distinct_or_empty_locations_pass() {
        assert_eq!(location_conflict("DEL", "BOM", LocationField::Origin), None);
        assert_eq!(location_conflict("", "", LocationField::Destination), None);
        assert_eq!(location_conflict("DEL", "", LocationField::Origin), None);
    }

    #[test]
    fn comparison_is_exact() {
        assert_eq!(location_conflict("DEL", "del", LocationField::Origin), None);
        assert_eq!(location_conflict("DEL", "DEL ", LocationField::Origin), None);
    }

    #[test]
    fn placeholders_follow_route_type() {
        let intl = RouteType::from_international_checked(true);
        assert_eq!(intl.origin_placeholder(), "Select International Origin");
        assert_eq!(
            intl.placeholder(LocationField::Destination),
            "Select International Destination"
        );
        let dom = RouteType::from_international_checked(false);
        assert_eq!(dom.placeholder(LocationField::Origin), "Select Domestic Origin");
        assert_eq!(dom.destination_placeholder(), "Select Domestic Destination");
    }

    #[test]
    fn submit_button_cycle() {
        let idle = SubmitButtonState::Idle {
            label: "Search Flights".into(),
        };
        assert!(!idle.disabled());
        let loading = idle.clone().begin_loading();
        assert!(loading.disabled());
        assert_eq!(loading.label(), SEARCHING_LABEL);
        assert_eq!(loading.reset(), idle);
    }

    #[test]
    fn overlapping_submits_keep_the_first_label() {
        let loading = SubmitButtonState::Idle {
            label: "Search".into(),
        }
        .begin_loading()
        .begin_loading();
        assert_eq!(
            loading.reset(),
            SubmitButtonState::Idle {
                label: "Search".into()
            }
        );
    }
}
