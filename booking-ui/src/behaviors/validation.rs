//! Required-field gate for opted-in forms.

/// Forms opt in to validation with this attribute.
pub const VALIDATED_FORMS: &str = "form[data-validate]";

/// Controls checked on submit.
pub const REQUIRED_FIELDS: &str = "input[required], select[required]";

/// Marker class for a blank required field.
pub const ERROR_CLASS: &str = "border-red-500";

pub const MISSING_FIELDS_NOTICE: &str = "Please fill in all required fields";

/// Outcome for one required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVerdict {
    Filled,
    Blank,
}

impl FieldVerdict {
    /// A field is blank when its value is empty after trimming whitespace.
    pub fn of(value: &str) -> Self {
        if value.trim().is_empty() {
            FieldVerdict::Blank
        } else {
            FieldVerdict::Filled
        }
    }

    pub fn is_blank(self) -> bool {
        self == FieldVerdict::Blank
    }
}

/// Judge every field; the form may submit only if none is blank.
pub fn check_fields<'a>(values: impl IntoIterator<Item = &'a str>) -> (Vec<FieldVerdict>, bool) {
    let verdicts: Vec<FieldVerdict> = values.into_iter().map(FieldVerdict::of).collect();
    let ok = !verdicts.iter().any(|v| v.is_blank());
    (verdicts, ok)
}
