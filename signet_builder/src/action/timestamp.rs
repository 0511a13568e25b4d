use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::NaiveDateTime;

use crate::action::{invalid, Action};
use crate::error::ValidationError;
use crate::model::Value;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The formats accepted by a timestamp parameter which does not configure its own.
pub const DEFAULT_TIMESTAMP_FORMATS: [&str; 3] =
    ["%Y-%m-%d", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parses timestamps by trying each configured `strftime` format in order; the first success wins.
///
/// Fields a format leaves out take the values year 1900, month 1, day 1, 00:00:00.
/// For example, the format `%Y-%m` reads `1956-01` as `1956-01-01 00:00:00`.
#[derive(Debug, Clone)]
pub struct TimestampAction {
    formats: Vec<String>,
}

impl TimestampAction {
    /// Create a timestamp action over the `formats`, tried in the given order.
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }
}

impl Default for TimestampAction {
    fn default() -> Self {
        Self::new(
            DEFAULT_TIMESTAMP_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        )
    }
}

impl Action for TimestampAction {
    fn process(&self, raw: Value, destination: &str) -> Result<Value, ValidationError> {
        let text = match &raw {
            Value::Timestamp(_) => return Ok(raw),
            Value::Str(text) => text,
            _ => {
                return Err(invalid(
                    destination,
                    &raw,
                    format!("invalid timestamp value: '{raw}'"),
                ))
            }
        };

        for format in &self.formats {
            if let Some(timestamp) = parse_with(text, format) {
                return Ok(Value::Timestamp(timestamp));
            }

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Timestamp '{text}' does not match the format '{format}'.");
            }
        }

        Err(invalid(
            destination,
            &raw,
            format!(
                "invalid timestamp format supplied: '{text}'. Only the following are supported: [{}]",
                self.formats.join(", ")
            ),
        ))
    }
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDateTime> {
    let missing = missing_fields(format)?;

    if missing.is_empty() {
        return NaiveDateTime::parse_from_str(text, format).ok();
    }

    // Pad both sides with the absent fields so chrono always sees a complete date and time.
    let (values, specifiers): (Vec<&str>, Vec<&str>) = missing.into_iter().unzip();
    let padded_text = format!("{text} {}", values.join(" "));
    let padded_format = format!("{format} {}", specifiers.join(" "));
    NaiveDateTime::parse_from_str(&padded_text, &padded_format).ok()
}

#[derive(Default)]
struct Present {
    year: bool,
    month: bool,
    day: bool,
    ordinal: bool,
    hour: bool,
    minute: bool,
    second: bool,
    timestamp: bool,
}

/// The `(value, specifier)` pairs of the fields which `format` does not mention.
/// `None` when the format itself is malformed.
fn missing_fields(format: &str) -> Option<Vec<(&'static str, &'static str)>> {
    let mut present = Present::default();

    for item in StrftimeItems::new(format) {
        match item {
            Item::Error => return None,
            Item::Numeric(Numeric::Year | Numeric::IsoYear, _) => present.year = true,
            Item::Numeric(Numeric::YearMod100 | Numeric::YearDiv100, _) => present.year = true,
            Item::Numeric(Numeric::Month, _) => present.month = true,
            Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => present.month = true,
            Item::Numeric(Numeric::Day, _) => present.day = true,
            Item::Numeric(Numeric::Ordinal, _) => present.ordinal = true,
            Item::Numeric(Numeric::Hour | Numeric::Hour12, _) => present.hour = true,
            Item::Numeric(Numeric::Minute, _) => present.minute = true,
            Item::Numeric(Numeric::Second, _) => present.second = true,
            Item::Numeric(Numeric::Timestamp, _) => present.timestamp = true,
            _ => {}
        }
    }

    if present.timestamp {
        return Some(Vec::default());
    }

    let mut missing = Vec::default();

    if !present.year {
        missing.push(("1900", "%Y"));
    }

    if !present.ordinal {
        if !present.month {
            missing.push(("01", "%m"));
        }

        if !present.day {
            missing.push(("01", "%d"));
        }
    }

    if !present.hour {
        missing.push(("00", "%H"));
    }

    if !present.minute {
        missing.push(("00", "%M"));
    }

    if !present.second {
        missing.push(("00", "%S"));
    }

    Some(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn timestamp(ymd: (i32, u32, u32), hms: (u32, u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2)
            .unwrap()
            .and_hms_opt(hms.0, hms.1, hms.2)
            .unwrap()
    }

    #[rstest]
    #[case("1956-01-31", timestamp((1956, 1, 31), (0, 0, 0)))]
    #[case("1956-01-31T10:00:00", timestamp((1956, 1, 31), (10, 0, 0)))]
    #[case("1956-01-31 10:20:30", timestamp((1956, 1, 31), (10, 20, 30)))]
    fn default_formats(#[case] raw: &str, #[case] expected: NaiveDateTime) {
        assert_eq!(
            TimestampAction::default()
                .process(Value::from(raw), "birthday")
                .unwrap(),
            Value::Timestamp(expected)
        );
    }

    #[rstest]
    #[case("%Y-%m", "1956-01", timestamp((1956, 1, 1), (0, 0, 0)))]
    #[case("%Y", "1956", timestamp((1956, 1, 1), (0, 0, 0)))]
    #[case("%m/%d/%Y", "01/31/1956", timestamp((1956, 1, 31), (0, 0, 0)))]
    #[case("%H:%M", "10:30", timestamp((1900, 1, 1), (10, 30, 0)))]
    #[case("%Y-%m-%d %H:%M", "1956-01-31 10:30", timestamp((1956, 1, 31), (10, 30, 0)))]
    fn partial_formats(#[case] format: &str, #[case] raw: &str, #[case] expected: NaiveDateTime) {
        let action = TimestampAction::new(vec![format.to_string()]);
        assert_eq!(
            action.process(Value::from(raw), "birthday").unwrap(),
            Value::Timestamp(expected)
        );
    }

    #[test]
    fn first_match_wins() {
        // Both formats accept the input, but read the fields in a different order.
        let action = TimestampAction::new(vec!["%d-%m-%Y".to_string(), "%m-%d-%Y".to_string()]);
        assert_eq!(
            action.process(Value::from("02-03-1956"), "day").unwrap(),
            Value::Timestamp(timestamp((1956, 3, 2), (0, 0, 0)))
        );
    }

    #[test]
    fn no_format_matches() {
        let action = TimestampAction::new(vec!["%Y-%m".to_string()]);
        let error = action
            .process(Value::from("1956-01-31T10:00:00"), "birthday")
            .unwrap_err();
        assert_eq!(error.destination(), "birthday");
        assert_eq!(error.raw(), "1956-01-31T10:00:00");
        assert!(error.to_string().contains("invalid timestamp format"));
        assert!(error.to_string().contains("%Y-%m"));
    }

    #[test]
    fn typed_value_passes_through() {
        let value = Value::Timestamp(timestamp((1956, 1, 1), (0, 0, 0)));
        let action = TimestampAction::new(vec!["%Y".to_string()]);
        assert_eq!(action.process(value.clone(), "birthday").unwrap(), value);
    }

    #[rstest]
    #[case("1956-01-31")]
    #[case("1956-01-31T10:00:00")]
    #[case("2001-12-09 23:59:59")]
    fn recoercion(#[case] raw: &str) {
        let action = TimestampAction::default();
        let once = action.process(Value::from(raw), "x").unwrap();
        let twice = action.process(Value::Str(once.to_string()), "x").unwrap();
        assert_eq!(once, twice);
    }
}
