use chrono::{Datelike, Duration, NaiveDate, SecondsFormat, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

const DAY_KEYS: [&str; 5] = ["mon", "tue", "wed", "thu", "fri"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDay {
    pub key: &'static str,
    pub date: NaiveDate,
}

impl ScheduleDay {
    /// "Mon 15 Dec"
    pub fn label(&self) -> String {
        self.date.format("%a %-d %b").to_string()
    }

    /// "Monday, December 15"
    pub fn date_label(&self) -> String {
        self.date.format("%A, %B %-d").to_string()
    }
}

/// Monday to Friday of one calendar week.
#[derive(Debug, Clone)]
pub struct Week {
    days: Vec<ScheduleDay>,
    today: NaiveDate,
}

impl Week {
    pub fn containing(today: NaiveDate) -> Self {
        let monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let days = DAY_KEYS
            .into_iter()
            .zip(0i64..)
            .map(|(key, offset)| ScheduleDay {
                key,
                date: monday + Duration::days(offset),
            })
            .collect();
        Self { days, today }
    }

    pub fn days(&self) -> &[ScheduleDay] {
        &self.days
    }

    /// Today on weekdays, Monday on weekends.
    pub fn default_day(&self) -> &ScheduleDay {
        match self.today.weekday() {
            Weekday::Sat | Weekday::Sun => &self.days[0],
            weekday => &self.days[weekday.num_days_from_monday() as usize],
        }
    }

    /// Unknown keys select the default day.
    pub fn select(&self, key: Option<&str>) -> &ScheduleDay {
        key.and_then(|key| self.days.iter().find(|day| day.key == key))
            .unwrap_or_else(|| self.default_day())
    }
}

pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

fn local_midnight(tz: Tz, date: NaiveDate) -> chrono::DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    match tz.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST jump.
        None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|local| local.with_timezone(&Utc))
            .unwrap_or_else(|| naive.and_utc()),
    }
}

/// `[from, to)` bounds of `date` in `tz`, as UTC ISO instants.
pub fn day_range(tz: Tz, date: NaiveDate) -> (String, String) {
    let from = local_midnight(tz, date);
    let to = local_midnight(tz, date + Duration::days(1));
    (
        from.to_rfc3339_opts(SecondsFormat::Millis, true),
        to.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_from_wednesday() {
        let week = Week::containing(date(2025, 12, 17));
        let dates: Vec<_> = week.days().iter().map(|d| d.date).collect();
        assert_eq!(dates.first(), Some(&date(2025, 12, 15)));
        assert_eq!(dates.last(), Some(&date(2025, 12, 19)));
        assert_eq!(week.default_day().key, "wed");
    }

    #[test]
    fn test_weekend_defaults_to_monday() {
        let week = Week::containing(date(2025, 12, 21));
        assert_eq!(week.days()[0].date, date(2025, 12, 15));
        assert_eq!(week.default_day().key, "mon");
    }

    #[test]
    fn test_select_day() {
        let week = Week::containing(date(2025, 12, 15));
        assert_eq!(week.select(Some("thu")).date, date(2025, 12, 18));
        assert_eq!(week.select(Some("sun")).key, "mon");
        assert_eq!(week.select(None).key, "mon");
    }

    #[test]
    fn test_labels() {
        let day = ScheduleDay {
            key: "mon",
            date: date(2025, 12, 15),
        };
        assert_eq!(day.label(), "Mon 15 Dec");
        assert_eq!(day.date_label(), "Monday, December 15");
    }

    #[test]
    fn test_day_range_utc() {
        let (from, to) = day_range(chrono_tz::UTC, date(2025, 12, 15));
        assert_eq!(from, "2025-12-15T00:00:00.000Z");
        assert_eq!(to, "2025-12-16T00:00:00.000Z");
    }

    #[test]
    fn test_day_range_in_timezone() {
        let (from, to) = day_range(chrono_tz::Europe::Madrid, date(2025, 12, 15));
        assert_eq!(from, "2025-12-14T23:00:00.000Z");
        assert_eq!(to, "2025-12-15T23:00:00.000Z");

        // Spring-forward day is 23 hours long.
        let (from, to) = day_range(chrono_tz::Europe::Madrid, date(2025, 3, 30));
        assert_eq!(from, "2025-03-29T23:00:00.000Z");
        assert_eq!(to, "2025-03-30T22:00:00.000Z");
    }
}
