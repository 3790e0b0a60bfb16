//! Fare and bulletin summary for the wanted trains.
//!
//! Outward journeys are scanned first, then inward, each in response order.
//! A journey is kept only if it leaves at the wanted time (outward: exact
//! hour and minute, inward: hour only). For kept journeys:
//!
//! - fares of the wanted class are listed cheapest first, ties in response
//!   order, one line each: `Fri 2024-03-15 08:05 = £12.50  Anytime Day Single`
//! - a timestamp equal to the previous line's is replaced by
//!   [`REPEATED_TIME`], across both directions
//! - descriptions of uncleared bulletins are collected into one line,
//!   skipping any already contained in the text collected so far
//!
//! The bulletin line always comes last, even when empty.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

use crate::domain::{FareClass, Journey, JourneyResponse};

/// Shown instead of a timestamp that repeats the line above.
///
/// Fixed width, as wide as a rendered timestamp.
pub const REPEATED_TIME: &str = r#""""""""""""""""""""""#;

const TIME_FORMAT: &str = "%a %Y-%m-%d %H:%M";

/// Which trains and fares the report is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    pub outward_hour: u32,
    pub outward_minute: u32,
    pub inward_hour: u32,
    pub fare_class: FareClass,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            outward_hour: 8,
            outward_minute: 5,
            inward_hour: 16,
            fare_class: FareClass::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Outward,
    Inward,
}

impl ReportFilter {
    fn wants(&self, direction: Direction, departure: NaiveDateTime) -> bool {
        match direction {
            Direction::Outward => {
                departure.hour() == self.outward_hour && departure.minute() == self.outward_minute
            }
            Direction::Inward => departure.hour() == self.inward_hour,
        }
    }
}

/// The rendered summary: fare lines followed by one bulletin line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub fare_lines: Vec<String>,
    pub bulletins: String,
}

impl Report {
    /// Every output line, bulletin line last.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.fare_lines
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.bulletins.as_str()))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Running state while walking journeys.
struct ReportBuilder<'a> {
    filter: &'a ReportFilter,
    report: Report,
    prev_time: String,
}

impl<'a> ReportBuilder<'a> {
    fn new(filter: &'a ReportFilter) -> Self {
        Self {
            filter,
            report: Report::default(),
            prev_time: String::new(),
        }
    }

    fn add_journey(&mut self, direction: Direction, journey: &Journey) {
        let departure = journey.departure();
        if !self.filter.wants(direction, departure) {
            return;
        }

        let time = departure.format(TIME_FORMAT).to_string();

        let mut fares: Vec<_> = journey.fare.iter().collect();
        fares.sort_by_key(|fare| fare.total_price);

        for fare in fares {
            if fare.fare_class != self.filter.fare_class {
                continue;
            }
            let shown = if time == self.prev_time {
                REPEATED_TIME
            } else {
                self.prev_time.clone_from(&time);
                time.as_str()
            };
            self.report.fare_lines.push(format!(
                "{shown} = {}  {}",
                fare.total_price, fare.description
            ));
        }

        for bulletin in journey.service_bulletins.iter().filter(|b| !b.cleared) {
            if !self.report.bulletins.contains(bulletin.description.as_str()) {
                self.report.bulletins.push_str(&bulletin.description);
                self.report.bulletins.push_str(". ");
            }
        }
    }
}

/// Build the report for `response`. The response is only read.
pub fn render(response: &JourneyResponse, filter: &ReportFilter) -> Report {
    let mut builder = ReportBuilder::new(filter);

    for journey in &response.outward_journey {
        builder.add_journey(Direction::Outward, journey);
    }
    for journey in &response.inward_journey {
        builder.add_journey(Direction::Inward, journey);
    }

    builder.report
}
