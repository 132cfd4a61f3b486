//! Display helpers for server-rendered timestamps
//!
//! The locale is passed in explicitly (normally from `[display] locale`)
//! rather than read from process globals.

use chrono::{DateTime, FixedOffset, Local, Locale, NaiveDateTime, Offset, TimeZone};

/// Shown in place of a timestamp that could not be parsed.
pub const PLACEHOLDER: &str = "–";

/// Formats timestamps for one locale in one UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct LocalTimeFormatter {
    locale: Locale,
    offset: FixedOffset,
}

impl LocalTimeFormatter {
    /// Formatter for the host's current UTC offset.
    pub fn new(locale: &str) -> Self {
        Self::with_offset(locale, Local::now().offset().fix())
    }

    /// Formatter for a fixed UTC offset.
    ///
    /// Unknown locale tags fall back to POSIX formatting.
    pub fn with_offset(locale: &str, offset: FixedOffset) -> Self {
        let tag = locale.replace('-', "_");
        let locale = Locale::try_from(tag.as_str()).unwrap_or(Locale::POSIX);
        Self { locale, offset }
    }

    /// Locale time, e.g. `10:04:00 AM` for `en-US`.
    pub fn time(&self, input: &str) -> String {
        self.format(input, "%X")
    }

    /// Short date, e.g. `5 Jan 2024`.
    pub fn date(&self, input: &str) -> String {
        self.format(input, "%-d %b %Y")
    }

    /// `"{date}, {start} – {end}"` with 24-hour `HH:MM` times.
    ///
    /// The date is taken from `start`; each part degrades to the placeholder
    /// on its own.
    pub fn time_range(&self, start: &str, end: &str) -> String {
        format!(
            "{}, {} – {}",
            self.date(start),
            self.format(start, "%H:%M"),
            self.format(end, "%H:%M"),
        )
    }

    fn format(&self, input: &str, fmt: &str) -> String {
        match self.parse(input) {
            Some(at) => at.format_localized(fmt, self.locale).to_string(),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// RFC 3339 with offset, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` read in
    /// the formatter's own offset.
    fn parse(&self, input: &str) -> Option<DateTime<FixedOffset>> {
        let input = input.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(input) {
            return Some(at.with_timezone(&self.offset));
        }

        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .and_then(|naive| self.offset.from_local_datetime(&naive).single())
    }
}

/// Keystroke filter for numeric-only inputs.
///
/// Control characters (codes up to 31) pass so editing keys keep working;
/// otherwise only ASCII digits are accepted.
pub fn accepts_keystroke(char_code: u32) -> bool {
    char_code <= 31 || (48..=57).contains(&char_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> LocalTimeFormatter {
        LocalTimeFormatter::with_offset("en-US", FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn test_invalid_input_uses_placeholder() {
        let f = formatter();
        assert_eq!(f.time("not a date"), PLACEHOLDER);
        assert_eq!(f.date(""), PLACEHOLDER);
    }

    #[test]
    fn test_time_is_localized() {
        let f = formatter();
        let shown = f.time("2024-01-05T10:04:00Z");
        assert_ne!(shown, PLACEHOLDER);
        assert!(shown.contains("10:04"), "{shown}");
    }

    #[test]
    fn test_date_format() {
        assert_eq!(formatter().date("2024-01-05T10:04:00Z"), "5 Jan 2024");
    }

    #[test]
    fn test_time_range() {
        let f = formatter();
        assert_eq!(
            f.time_range("2024-01-05T10:04:00Z", "2024-01-05T11:30:00Z"),
            "5 Jan 2024, 10:04 – 11:30"
        );
        assert_eq!(
            f.time_range("2024-01-05T10:04:00Z", "garbage"),
            "5 Jan 2024, 10:04 – –"
        );
    }

    #[test]
    fn test_offset_is_applied() {
        let f = LocalTimeFormatter::with_offset("en-US", FixedOffset::east_opt(8 * 3600).unwrap());
        assert_eq!(
            f.time_range("2024-01-05T20:00:00Z", "2024-01-05T21:15:00Z"),
            "6 Jan 2024, 04:00 – 05:15"
        );
    }

    #[test]
    fn test_naive_input_is_read_in_own_offset() {
        let f = LocalTimeFormatter::with_offset("en-US", FixedOffset::east_opt(3600).unwrap());
        assert_eq!(
            f.time_range("2024-03-01T08:00:00", "2024-03-01T09:00:00.500"),
            "1 Mar 2024, 08:00 – 09:00"
        );
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let f = LocalTimeFormatter::with_offset("xx-YY", FixedOffset::east_opt(0).unwrap());
        assert_eq!(f.date("2024-01-05T10:04:00Z"), "5 Jan 2024");
    }

    #[test]
    fn test_accepts_keystroke() {
        assert!(accepts_keystroke(8)); // backspace
        assert!(accepts_keystroke('0' as u32));
        assert!(accepts_keystroke('9' as u32));
        assert!(!accepts_keystroke('a' as u32));
        assert!(!accepts_keystroke('.' as u32));
        assert!(!accepts_keystroke(' ' as u32));
    }
}
