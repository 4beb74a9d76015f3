//! Field validation shared by every command.
//!
//! Each helper returns the cleaned value or a `ValidationError` carrying the
//! message shown to the user.

use chrono::NaiveDate;

use crate::error::{HmsError, HmsResult};

/// Storage and wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Minimum length of a contact number.
pub const MIN_CONTACT_LEN: usize = 10;

/// Shortest bookable appointment, in minutes.
pub const MIN_DURATION_MINUTES: u32 = 15;

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Trimmed, non-empty text.
pub fn required(field: &str, value: &str) -> HmsResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HmsError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Contact number of at least ten characters.
pub fn contact(value: &str) -> HmsResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_CONTACT_LEN {
        return Err(HmsError::validation(format!(
            "Contact must be at least {} digits",
            MIN_CONTACT_LEN
        )));
    }
    Ok(trimmed.to_string())
}

/// A `H:MM AM` style time of day.
///
/// Hours run 0–23 with an optional leading zero, minutes 00–59, followed by
/// a single whitespace character and a case-insensitive `AM`/`PM`. The
/// meridiem is normalised to upper case.
pub fn time_of_day(value: &str) -> HmsResult<String> {
    parse_time(value.trim())
        .map(|(hour, minute, meridiem)| format!("{}:{} {}", hour, minute, meridiem))
        .ok_or_else(|| HmsError::validation("Invalid time format (e.g., 10:00 AM)"))
}

/// Minutes since midnight for a stored time, used for ordering.
pub fn minutes_of_day(value: &str) -> Option<u32> {
    let (hour, minute, meridiem) = parse_time(value.trim())?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    let hour24 = match (hour, meridiem.as_str()) {
        (h, _) if h > 12 => h,
        (12, "AM") => 0,
        (12, "PM") => 12,
        (h, "PM") => h + 12,
        (h, _) => h,
    };
    Some(hour24 * 60 + minute)
}

fn parse_time(value: &str) -> Option<(&str, &str, String)> {
    let (clock, meridiem) = split_meridiem(value)?;
    let (hour, minute) = clock.split_once(':')?;

    let hour_ok = match hour.as_bytes() {
        [h] => h.is_ascii_digit(),
        [b'0' | b'1', h] => h.is_ascii_digit(),
        [b'2', h] => (b'0'..=b'3').contains(h),
        _ => false,
    };
    let minute_ok = matches!(minute.as_bytes(), [b'0'..=b'5', m] if m.is_ascii_digit());

    if hour_ok && minute_ok {
        Some((hour, minute, meridiem))
    } else {
        None
    }
}

fn split_meridiem(value: &str) -> Option<(&str, String)> {
    if value.len() < 3 || !value.is_char_boundary(value.len() - 3) {
        return None;
    }
    let (rest, suffix) = value.split_at(value.len() - 3);
    let mut chars = suffix.chars();
    let separator = chars.next()?;
    if !separator.is_whitespace() {
        return None;
    }
    let meridiem: String = chars.collect::<String>().to_ascii_uppercase();
    if meridiem != "AM" && meridiem != "PM" {
        return None;
    }
    Some((rest, meridiem))
}

/// A plausible email address.
pub fn email(value: &str) -> HmsResult<String> {
    let trimmed = value.trim();
    let invalid = || HmsError::validation("Invalid email address");

    let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || trimmed.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(trimmed.to_string())
}

/// Amounts of money: finite and not negative.
pub fn non_negative(field: &str, value: f64) -> HmsResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(HmsError::validation(format!("{} cannot be negative", field)));
    }
    Ok(value)
}

/// Appointment length in minutes.
pub fn duration(minutes: u32) -> HmsResult<u32> {
    if minutes < MIN_DURATION_MINUTES {
        return Err(HmsError::validation(format!(
            "Duration must be at least {} minutes",
            MIN_DURATION_MINUTES
        )));
    }
    Ok(minutes)
}

/// Scheduling dates may not lie in the past.
pub fn not_past(date: NaiveDate, today: NaiveDate) -> HmsResult<NaiveDate> {
    if date < today {
        return Err(HmsError::validation(format!(
            "Date {} is in the past",
            date.format(DATE_FORMAT)
        )));
    }
    Ok(date)
}

/// Parse user-supplied `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> HmsResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| HmsError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Parse a date read back from the store.
pub(crate) fn stored_date(value: &str) -> HmsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| HmsError::CorruptRecord(format!("invalid date '{}'", value)))
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Name", "  Ravi ").unwrap(), "Ravi");
        assert_eq!(
            required("Name", "   ").unwrap_err().to_string(),
            "Validation error: Name is required"
        );
    }

    #[test]
    fn test_contact_length() {
        assert!(contact("98765").is_err());
        assert_eq!(contact("9876543210").unwrap(), "9876543210");
    }

    #[test]
    fn test_time_of_day_accepts_common_forms() {
        assert_eq!(time_of_day("10:00 AM").unwrap(), "10:00 AM");
        assert_eq!(time_of_day("9:30 pm").unwrap(), "9:30 PM");
        assert_eq!(time_of_day("09:05 Am").unwrap(), "09:05 AM");
        assert_eq!(time_of_day("23:59 PM").unwrap(), "23:59 PM");
    }

    #[test]
    fn test_time_of_day_rejects_bad_input() {
        for bad in ["", "10:00", "24:00 AM", "10:60 AM", "10:0 AM", "10:00  AM", "10.00 AM", "1000 AM", "10:00 XM"] {
            assert!(time_of_day(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_minutes_of_day_orders_meridiem() {
        assert_eq!(minutes_of_day("12:15 AM"), Some(15));
        assert_eq!(minutes_of_day("9:00 AM"), Some(540));
        assert_eq!(minutes_of_day("12:00 PM"), Some(720));
        assert_eq!(minutes_of_day("2:30 PM"), Some(870));
        assert!(minutes_of_day("2:30 PM") > minutes_of_day("11:00 AM"));
        assert_eq!(minutes_of_day("nonsense"), None);
    }

    #[test]
    fn test_email() {
        assert!(email("dr.rao@hospital.org").is_ok());
        for bad in ["rao", "@hospital.org", "rao@hospital", "rao@.org", "rao@a@b.org", "r ao@b.org"] {
            assert!(email(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_numbers() {
        assert!(non_negative("Fees", 0.0).is_ok());
        assert!(non_negative("Fees", -1.0).is_err());
        assert!(non_negative("Fees", f64::NAN).is_err());
        assert!(duration(15).is_ok());
        assert!(duration(10).is_err());
    }

    #[test]
    fn test_not_past() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(not_past(today, today).is_ok());
        assert!(not_past(today.succ_opt().unwrap(), today).is_ok());
        assert!(not_past(today.pred_opt().unwrap(), today).is_err());
    }

    #[test]
    fn test_dates() {
        let d = parse_date("2025-01-31").unwrap();
        assert_eq!(format_date(d), "2025-01-31");
        assert!(parse_date("31-01-2025").is_err());
        assert!(matches!(stored_date("x"), Err(HmsError::CorruptRecord(_))));
    }
}
