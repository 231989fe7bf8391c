//! The calendar month a monthly report covers.

use std::ops::RangeInclusive;

use time::{Date, Month};

use crate::Error;

/// A calendar month in a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    first_day: Date,
    last_day: Date,
}

impl MonthWindow {
    /// Create the window for `month` (1-12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidMonth] if the month is outside 1-12 or the year
    /// cannot be represented.
    pub fn new(year: i32, month: u8) -> Result<Self, Error> {
        let invalid_month = || Error::InvalidMonth { year, month };

        let calendar_month = Month::try_from(month).map_err(|_| invalid_month())?;
        let first_day =
            Date::from_calendar_date(year, calendar_month, 1).map_err(|_| invalid_month())?;
        let first_day_of_next_month = match calendar_month {
            Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
            _ => Date::from_calendar_date(year, calendar_month.next(), 1),
        }
        .map_err(|_| invalid_month())?;
        let last_day = first_day_of_next_month
            .previous_day()
            .ok_or_else(invalid_month)?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The month containing `date`.
    pub fn containing(date: Date) -> Result<Self, Error> {
        Self::new(date.year(), date.month().into())
    }

    /// Use the requested year and month, falling back to the year and month of
    /// `today` for whichever is missing.
    pub fn resolve(year: Option<i32>, month: Option<u8>, today: Date) -> Result<Self, Error> {
        Self::new(
            year.unwrap_or(today.year()),
            month.unwrap_or(today.month().into()),
        )
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1-12.
    pub fn month(&self) -> u8 {
        self.first_day.month().into()
    }

    /// The first through last day of the month, inclusive.
    pub fn date_range(&self) -> RangeInclusive<Date> {
        self.first_day..=self.last_day
    }

    /// A label such as "January 2024".
    pub fn label(&self) -> String {
        format!("{} {}", self.first_day.month(), self.year())
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::Error;

    use super::MonthWindow;

    #[test]
    fn january_spans_whole_month() {
        let window = MonthWindow::new(2024, 1).unwrap();

        assert_eq!(
            window.date_range(),
            date!(2024 - 01 - 01)..=date!(2024 - 01 - 31)
        );
        assert_eq!(window.label(), "January 2024");
    }

    #[test]
    fn february_in_leap_year_has_29_days() {
        let window = MonthWindow::new(2024, 2).unwrap();

        assert_eq!(*window.date_range().end(), date!(2024 - 02 - 29));
    }

    #[test]
    fn december_ends_on_the_31st() {
        let window = MonthWindow::new(2023, 12).unwrap();

        assert_eq!(
            window.date_range(),
            date!(2023 - 12 - 01)..=date!(2023 - 12 - 31)
        );
    }

    #[test]
    fn month_outside_range_fails() {
        assert_eq!(
            MonthWindow::new(2024, 13),
            Err(Error::InvalidMonth {
                year: 2024,
                month: 13
            })
        );
        assert_eq!(
            MonthWindow::new(2024, 0),
            Err(Error::InvalidMonth {
                year: 2024,
                month: 0
            })
        );
    }

    #[test]
    fn resolve_fills_missing_parts_from_today() {
        let today = date!(2025 - 03 - 14);

        assert_eq!(
            MonthWindow::resolve(None, None, today),
            MonthWindow::containing(today)
        );
        assert_eq!(
            MonthWindow::resolve(Some(2020), None, today).unwrap().label(),
            "March 2020"
        );
        assert_eq!(
            MonthWindow::resolve(None, Some(7), today).unwrap().label(),
            "July 2025"
        );
    }
}
