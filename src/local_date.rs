//! Calendar date handling for the transaction ledger.
//!
//! Transaction dates are plain calendar dates with no time-of-day or UTC
//! offset. Every date string in the application goes through
//! [parse_local_date], which builds the date from its integer parts so that
//! a transaction dated `2024-01-31` lands in January no matter what timezone
//! the server runs in.

use time::{Date, Month};

use crate::Error;

/// Full month names in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse `text` as a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` does not have the `YYYY-MM-DD`
/// shape or does not name a real calendar date.
pub fn parse_local_date(text: &str) -> Result<Date, Error> {
    let invalid_date = || Error::InvalidDate(text.to_owned());

    if !is_date_shaped(text) {
        return Err(invalid_date());
    }

    let year: i32 = text[0..4].parse().map_err(|_| invalid_date())?;
    let month: u8 = text[5..7].parse().map_err(|_| invalid_date())?;
    let day: u8 = text[8..10].parse().map_err(|_| invalid_date())?;

    let month = Month::try_from(month).map_err(|_| invalid_date())?;

    Date::from_calendar_date(year, month, day).map_err(|_| invalid_date())
}

/// Whether `text` has the `YYYY-MM-DD` shape: four digits, a dash, two
/// digits, a dash, two digits.
///
/// This is a shape check only, it does not reject dates such as
/// `2024-13-40`.
pub fn is_date_shaped(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&index| bytes[index].is_ascii_digit())
}

/// The calendar month before `(year, month)`, rolling into the previous year
/// from January.
pub fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

#[cfg(test)]
mod local_date_tests {
    use time::{Month, macros::date};

    use crate::Error;

    use super::{MONTH_NAMES, is_date_shaped, parse_local_date, previous_month};

    #[test]
    fn parses_a_calendar_date() {
        assert_eq!(parse_local_date("2024-03-01"), Ok(date!(2024 - 03 - 01)));
    }

    #[test]
    fn month_end_stays_in_its_month() {
        // A date at the end of the month must not shift across the month
        // boundary under any server timezone.
        let parsed = parse_local_date("2024-01-31").unwrap();

        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.month(), Month::January);
        assert_eq!(parsed.day(), 31);
    }

    #[test]
    fn rejects_bad_shapes() {
        let cases = [
            "",
            "2024-1-01",
            "01-03-2024",
            "2024/03/01",
            "2024-03-01T00:00:00Z",
            "not a date",
        ];

        for text in cases {
            assert_eq!(
                parse_local_date(text),
                Err(Error::InvalidDate(text.to_owned())),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_shaped_but_invalid_dates() {
        assert_eq!(
            parse_local_date("2024-13-40"),
            Err(Error::InvalidDate("2024-13-40".to_owned()))
        );
        assert_eq!(
            parse_local_date("2023-02-29"),
            Err(Error::InvalidDate("2023-02-29".to_owned()))
        );
    }

    #[test]
    fn shape_check_accepts_non_calendar_digits() {
        assert!(is_date_shaped("2024-13-40"));
        assert!(!is_date_shaped("2024-3-4"));
    }

    #[test]
    fn month_names_are_full_english_names_in_calendar_order() {
        assert_eq!(MONTH_NAMES[0], "January");
        assert_eq!(MONTH_NAMES[11], "December");
    }

    #[test]
    fn previous_month_rolls_over_the_year_boundary() {
        assert_eq!(previous_month(2024, Month::January), (2023, Month::December));
        assert_eq!(previous_month(2024, Month::June), (2024, Month::May));
    }
}
