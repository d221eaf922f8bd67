//! Validated theme values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid hex color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color {value:?}: {reason}")]
pub struct InvalidHexColor {
    value: String,
    reason: &'static str,
}

/// An opaque sRGB color written as `#rgb` or `#rrggbb`.
///
/// Always rendered in the six-digit lowercase form.
///
/// # Examples
///
/// ```
/// use booking_ui::theme::HexColor;
///
/// let sky = HexColor::parse("#38BDF8").unwrap();
/// assert_eq!(sky.to_string(), "#38bdf8");
///
/// assert_eq!(HexColor::parse("#fff").unwrap().to_string(), "#ffffff");
/// assert!(HexColor::parse("38bdf8").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor([r, g, b])
    }

    pub fn parse(s: &str) -> Result<Self, InvalidHexColor> {
        let invalid = |reason| InvalidHexColor {
            value: s.to_string(),
            reason,
        };
        let digits = s.strip_prefix('#').ok_or_else(|| invalid("must start with '#'"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("must contain only hex digits"));
        }
        let nibble = |b: u8| (b as char).to_digit(16).map_or(0, |d| d as u8);
        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => Ok(HexColor([
                nibble(bytes[0]) * 17,
                nibble(bytes[1]) * 17,
                nibble(bytes[2]) * 17,
            ])),
            6 => Ok(HexColor([
                (nibble(bytes[0]) << 4) | nibble(bytes[1]),
                (nibble(bytes[2]) << 4) | nibble(bytes[3]),
                (nibble(bytes[4]) << 4) | nibble(bytes[5]),
            ])),
            _ => Err(invalid("must have 3 or 6 hex digits")),
        }
    }

    pub fn channels(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexColor({self})")
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl TryFrom<String> for HexColor {
    type Error = InvalidHexColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HexColor::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Error returned when an animation shorthand cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid animation {value:?}: {reason}")]
pub struct InvalidAnimation {
    value: String,
    reason: &'static str,
}

/// A CSS time value, held in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationDuration {
    millis: u64,
}

impl AnimationDuration {
    pub const fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    /// Parse `3s`, `0.5s` or `200ms`. Sub-millisecond precision is rejected.
    pub fn parse(s: &str) -> Result<Self, InvalidAnimation> {
        let invalid = |reason| InvalidAnimation {
            value: s.to_string(),
            reason,
        };
        let (number, scale) = if let Some(n) = s.strip_suffix("ms") {
            (n, 1)
        } else if let Some(n) = s.strip_suffix('s') {
            (n, 1000)
        } else {
            return Err(invalid("duration needs an 's' or 'ms' unit"));
        };

        let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !digits_only(whole) || !digits_only(frac) {
            return Err(invalid("duration must be a non-negative decimal number"));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("duration is too large"))?
        };
        let mut millis = whole
            .checked_mul(scale)
            .ok_or_else(|| invalid("duration is too large"))?;

        // Remaining fractional digits must land on whole milliseconds.
        let mut unit = scale;
        for digit in frac.bytes() {
            let d = u64::from(digit - b'0');
            if unit < 10 {
                if d != 0 {
                    return Err(invalid("duration is finer than a millisecond"));
                }
                continue;
            }
            unit /= 10;
            millis = millis
                .checked_add(d * unit)
                .ok_or_else(|| invalid("duration is too large"))?;
        }
        Ok(Self { millis })
    }

    pub fn as_millis(self) -> u64 {
        self.millis
    }
}

impl fmt::Display for AnimationDuration {
    /// Seconds, with trailing zeros dropped: `3s`, `0.5s`, `0.125s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.millis / 1000;
        let frac = self.millis % 1000;
        if frac == 0 {
            return write!(f, "{secs}s");
        }
        let frac = format!("{frac:03}");
        write!(f, "{secs}.{}s", frac.trim_end_matches('0'))
    }
}

/// How many times an animation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iterations {
    Count(u32),
    Infinite,
}

impl fmt::Display for Iterations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Iterations::Count(n) => write!(f, "{n}"),
            Iterations::Infinite => f.write_str("infinite"),
        }
    }
}

/// An `animation` shorthand:
/// `<keyframes> <duration> [timing] [delay] [iterations]`.
///
/// Timing functions may take arguments, e.g. `cubic-bezier(0, 0, 0.2, 1)`.
///
/// ```
/// use booking_ui::theme::AnimationSpec;
///
/// let float = AnimationSpec::parse("float 3s ease-in-out infinite").unwrap();
/// assert_eq!(float.keyframes, "float");
/// assert_eq!(float.duration.as_millis(), 3000);
/// assert_eq!(float.to_string(), "float 3s ease-in-out infinite");
///
/// let ping = AnimationSpec::parse("ping 1s cubic-bezier(0, 0, 0.2, 1) infinite").unwrap();
/// assert_eq!(ping.timing.as_deref(), Some("cubic-bezier(0, 0, 0.2, 1)"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AnimationSpec {
    pub keyframes: String,
    pub duration: AnimationDuration,
    pub timing: Option<String>,
    pub delay: Option<AnimationDuration>,
    pub iterations: Option<Iterations>,
}

/// Split on whitespace outside parentheses.
fn components(s: &str) -> Result<Vec<&str>, &'static str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = None;
    for (idx, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1).ok_or("unbalanced parentheses")?,
            c if c.is_whitespace() && depth == 0 => {
                if let Some(begin) = start.take() {
                    parts.push(&s[begin..idx]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(idx);
    }
    if depth != 0 {
        return Err("unbalanced parentheses");
    }
    if let Some(begin) = start {
        parts.push(&s[begin..]);
    }
    Ok(parts)
}

impl AnimationSpec {
    pub fn parse(s: &str) -> Result<Self, InvalidAnimation> {
        let invalid = |reason| InvalidAnimation {
            value: s.to_string(),
            reason,
        };
        let mut parts = components(s).map_err(invalid)?.into_iter();
        let keyframes = parts
            .next()
            .ok_or_else(|| invalid("missing keyframes name"))?;
        let duration = parts.next().ok_or_else(|| invalid("missing duration"))?;
        let duration = AnimationDuration::parse(duration)?;

        let mut timing = None;
        let mut delay = None;
        let mut iterations = None;
        for part in parts {
            if let Ok(time) = AnimationDuration::parse(part) {
                if delay.is_some() {
                    return Err(invalid("more than two time values"));
                }
                delay = Some(time);
                continue;
            }
            let count = if part == "infinite" {
                Some(Iterations::Infinite)
            } else {
                part.parse().ok().map(Iterations::Count)
            };
            match count {
                Some(count) if iterations.is_none() => iterations = Some(count),
                None if timing.is_none() => timing = Some(part.to_string()),
                _ => return Err(invalid("too many components")),
            }
        }

        Ok(Self {
            keyframes: keyframes.to_string(),
            duration,
            timing,
            delay,
            iterations,
        })
    }
}

impl fmt::Display for AnimationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keyframes, self.duration)?;
        if let Some(timing) = &self.timing {
            write!(f, " {timing}")?;
        }
        if let Some(delay) = self.delay {
            write!(f, " {delay}")?;
        }
        if let Some(iterations) = self.iterations {
            write!(f, " {iterations}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for AnimationSpec {
    type Error = InvalidAnimation;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        AnimationSpec::parse(&value)
    }
}

impl From<AnimationSpec> for String {
    fn from(spec: AnimationSpec) -> Self {
        spec.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_colors() {
        assert_eq!(HexColor::parse("#38bdf8").unwrap(), HexColor::rgb(0x38, 0xbd, 0xf8));
        assert_eq!(HexColor::parse("#0EA5E9").unwrap(), HexColor::rgb(0x0e, 0xa5, 0xe9));
        assert_eq!(HexColor::parse("#abc").unwrap(), HexColor::rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn reject_bad_colors() {
        assert!(HexColor::parse("").is_err());
        assert!(HexColor::parse("#").is_err());
        assert!(HexColor::parse("38bdf8").is_err());
        assert!(HexColor::parse("#38bdf").is_err());
        assert!(HexColor::parse("#38bdfg").is_err());
        assert!(HexColor::parse("#38bdf8ff").is_err());
        assert!(HexColor::parse("#ÿÿÿ").is_err());
    }

    #[test]
    fn color_display_and_debug() {
        let c = HexColor::rgb(0x0e, 0xa5, 0xe9);
        assert_eq!(c.to_string(), "#0ea5e9");
        assert_eq!(format!("{c:?}"), "HexColor(#0ea5e9)");
    }

    #[test]
    fn color_error_message() {
        let err = HexColor::parse("blue").unwrap_err();
        assert_eq!(err.to_string(), r#"invalid color "blue": must start with '#'"#);
    }

    #[test]
    fn color_serde() {
        let c: HexColor = serde_json::from_str(r##""#38BDF8""##).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), r##""#38bdf8""##);
        assert!(serde_json::from_str::<HexColor>(r#""red""#).is_err());
    }

    #[test]
    fn parse_durations() {
        assert_eq!(AnimationDuration::parse("3s").unwrap().as_millis(), 3000);
        assert_eq!(AnimationDuration::parse("0.5s").unwrap().as_millis(), 500);
        assert_eq!(AnimationDuration::parse(".25s").unwrap().as_millis(), 250);
        assert_eq!(AnimationDuration::parse("200ms").unwrap().as_millis(), 200);
        assert_eq!(AnimationDuration::parse("1.500s").unwrap().as_millis(), 1500);
        assert_eq!(AnimationDuration::parse("0s").unwrap().as_millis(), 0);
    }

    #[test]
    fn reject_bad_durations() {
        for bad in ["", "3", "s", "ms", "-1s", "1.2.3s", "0.0001s", "1.5ms", "abc", "1 s"] {
            assert!(AnimationDuration::parse(bad).is_err(), "{bad:?} parsed");
        }
    }

    #[test]
    fn duration_display() {
        assert_eq!(AnimationDuration::from_millis(3000).to_string(), "3s");
        assert_eq!(AnimationDuration::from_millis(500).to_string(), "0.5s");
        assert_eq!(AnimationDuration::from_millis(1250).to_string(), "1.25s");
        assert_eq!(AnimationDuration::from_millis(1).to_string(), "0.001s");
    }

    #[test]
    fn parse_animation_shorthand() {
        let slide = AnimationSpec::parse("slideIn 0.5s ease-out").unwrap();
        assert_eq!(slide.keyframes, "slideIn");
        assert_eq!(slide.duration.as_millis(), 500);
        assert_eq!(slide.timing.as_deref(), Some("ease-out"));
        assert_eq!(slide.iterations, None);

        let spin = AnimationSpec::parse("spin 1s 3").unwrap();
        assert_eq!(spin.iterations, Some(Iterations::Count(3)));
        assert_eq!(spin.timing, None);
    }

    #[test]
    fn reject_bad_animation_shorthand() {
        assert!(AnimationSpec::parse("").is_err());
        assert!(AnimationSpec::parse("float").is_err());
        assert!(AnimationSpec::parse("float fast").is_err());
        assert!(AnimationSpec::parse("float 1s linear ease").is_err());
        assert!(AnimationSpec::parse("float 1s 2 infinite").is_err());
        assert!(AnimationSpec::parse("float 1s 2s 3s").is_err());
        assert!(AnimationSpec::parse("float 1s steps(4, end").is_err());
        assert!(AnimationSpec::parse("float 1s ease)").is_err());
    }

    #[test]
    fn timing_functions_with_arguments() {
        let ping = AnimationSpec::parse("ping 1s cubic-bezier(0, 0, 0.2, 1) infinite").unwrap();
        assert_eq!(ping.keyframes, "ping");
        assert_eq!(ping.timing.as_deref(), Some("cubic-bezier(0, 0, 0.2, 1)"));
        assert_eq!(ping.iterations, Some(Iterations::Infinite));
        assert_eq!(ping.to_string(), "ping 1s cubic-bezier(0, 0, 0.2, 1) infinite");

        let tick = AnimationSpec::parse("tick 2s  steps( 4 , end )  3").unwrap();
        assert_eq!(tick.timing.as_deref(), Some("steps( 4 , end )"));
        assert_eq!(tick.iterations, Some(Iterations::Count(3)));
    }

    #[test]
    fn second_time_is_the_delay() {
        let fade = AnimationSpec::parse("fade 0.5s ease-in 200ms 2").unwrap();
        assert_eq!(fade.duration.as_millis(), 500);
        assert_eq!(fade.delay, Some(AnimationDuration::from_millis(200)));
        assert_eq!(fade.timing.as_deref(), Some("ease-in"));
        assert_eq!(fade.to_string(), "fade 0.5s ease-in 0.2s 2");

        let plain = AnimationSpec::parse("fade 1s 1s").unwrap();
        assert_eq!(plain.delay, Some(AnimationDuration::from_millis(1000)));
        assert_eq!(plain.timing, None);
    }
}
