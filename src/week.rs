use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use log::warn;

use crate::{Event, NO_DATE, NO_TIME};

/// Minutes since midnight for the start of a time range like
/// "10:30 AM - 12:00 PM". Anything unparsable sorts first at 0.
pub fn parse_time_to_minutes(time: &str) -> u32 {
    if time.is_empty() || time == NO_TIME {
        return 0;
    }

    let start = match time.split(" - ").next() {
        Some(start) => start.trim(),
        None => return 0,
    };

    match NaiveTime::parse_from_str(start, "%I:%M %p") {
        Ok(parsed) => parsed.hour() * 60 + parsed.minute(),
        Err(_) => 0,
    }
}

/// Parses a date string of the form "Monday, Aug 1, 2025" by rejoining its
/// second and third comma-separated segments and reading them as "%b %d, %Y".
pub fn parse_event_date(date: &str) -> Option<NaiveDate> {
    let mut segments = date.split(", ");
    let month_day = segments.nth(1)?;
    let year = segments.next()?;
    NaiveDate::parse_from_str(&format!("{month_day}, {year}"), "%b %d, %Y").ok()
}

/// Sort key variant of [`parse_event_date`]: unparsable dates map to the
/// maximal date so they order last.
pub fn date_sort_key(date: &str) -> NaiveDate {
    parse_event_date(date).unwrap_or(NaiveDate::MAX)
}

/// First and last day (inclusive) of the week containing `target_week`,
/// where weeks begin on `week_start_day`.
pub fn week_bounds(week_start_day: Weekday, target_week: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_week_start = (target_week.weekday().num_days_from_monday() as i64
        - week_start_day.num_days_from_monday() as i64)
        .rem_euclid(7);

    let week_start = target_week - Duration::days(days_since_week_start);
    (week_start, week_start + Duration::days(6))
}

/// Events falling inside the week containing `target_week`, sorted ascending
/// by date and then by start time. Events whose date string is missing or
/// does not parse are excluded entirely rather than kept with a sentinel.
pub fn filter_by_week(
    events: &[Event],
    week_start_day: Weekday,
    target_week: NaiveDate,
) -> Vec<Event> {
    let (week_start, week_end) = week_bounds(week_start_day, target_week);

    let mut filtered: Vec<Event> = events
        .iter()
        .filter(|event| {
            if event.date == NO_DATE {
                return false;
            }
            match parse_event_date(&event.date) {
                Some(date) => week_start <= date && date <= week_end,
                None => {
                    warn!("skipping event with unparsable date {:?}", event.date);
                    false
                }
            }
        })
        .cloned()
        .collect();

    filtered.sort_by_key(|event| match parse_event_date(&event.date) {
        Some(date) => (date, parse_time_to_minutes(&event.time)),
        None => (NaiveDate::MAX, 0),
    });

    filtered
}

/// Groups events by their raw date string, preserving first-seen key order
/// before sorting groups by parsed calendar date (unparsable keys last) and
/// each group's events by start time. Two date strings naming the same day in
/// different formats stay separate groups.
pub fn organize_by_date(events: &[Event]) -> Vec<(String, Vec<Event>)> {
    let mut groups: Vec<(String, Vec<Event>)> = Vec::new();

    for event in events {
        match groups.iter_mut().find(|(date, _)| *date == event.date) {
            Some((_, group)) => group.push(event.clone()),
            None => groups.push((event.date.clone(), vec![event.clone()])),
        }
    }

    for (_, group) in &mut groups {
        group.sort_by_key(|event| parse_time_to_minutes(&event.time));
    }

    groups.sort_by_key(|(date, _)| date_sort_key(date));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NO_DESCRIPTION;

    fn event(date: &str, time: &str, title: &str) -> Event {
        Event {
            url: format!("https://example.test/{title}"),
            title: title.into(),
            date: date.into(),
            time: time.into(),
            location: "City Hall".into(),
            location_link: "https://example.test/map".into(),
            description: NO_DESCRIPTION.into(),
        }
    }

    #[test]
    fn time_parses_start_of_range() {
        assert_eq!(parse_time_to_minutes("2:00 PM - 3:30 PM"), 840);
        assert_eq!(parse_time_to_minutes("10:30 AM - 12:00 PM"), 630);
        assert_eq!(parse_time_to_minutes("10:30 AM"), 630);
        assert_eq!(parse_time_to_minutes("12:00 PM"), 720);
        assert_eq!(parse_time_to_minutes("12:15 AM"), 15);
    }

    #[test]
    fn time_falls_back_to_zero() {
        assert_eq!(parse_time_to_minutes(""), 0);
        assert_eq!(parse_time_to_minutes(NO_TIME), 0);
        assert_eq!(parse_time_to_minutes("midnightish"), 0);
        assert_eq!(parse_time_to_minutes("25:99 XM"), 0);
    }

    #[test]
    fn date_parses_three_segment_form() {
        assert_eq!(
            parse_event_date("Monday, Aug 1, 2025"),
            NaiveDate::from_ymd_opt(2025, 8, 1)
        );
        assert_eq!(
            parse_event_date("Sun, Dec 21, 2025"),
            NaiveDate::from_ymd_opt(2025, 12, 21)
        );
    }

    #[test]
    fn date_failures_yield_sentinel_sort_key() {
        assert_eq!(parse_event_date("garbage"), None);
        assert_eq!(parse_event_date("Aug 1, 2025"), None);
        assert_eq!(parse_event_date(NO_DATE), None);
        assert_eq!(date_sort_key("garbage"), NaiveDate::MAX);
    }

    #[test]
    fn week_bounds_snap_to_start_day() {
        let target = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        assert_eq!(
            week_bounds(Weekday::Mon, target),
            (
                NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
                NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()
            )
        );

        // Wednesday inside a Monday-started week snaps back to Monday.
        let midweek = NaiveDate::from_ymd_opt(2025, 8, 6).unwrap();
        assert_eq!(
            week_bounds(Weekday::Mon, midweek),
            (
                NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
                NaiveDate::from_ymd_opt(2025, 8, 10).unwrap()
            )
        );

        assert_eq!(
            week_bounds(Weekday::Sun, midweek),
            (
                NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
                NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()
            )
        );
    }

    #[test]
    fn filter_is_inclusive_of_both_bounds() {
        let events = vec![
            event("Sunday, Aug 3, 2025", "9:00 AM", "before"),
            event("Monday, Aug 4, 2025", "10:00 AM", "first day"),
            event("Sunday, Aug 10, 2025", "4:00 PM", "last day"),
            event("Monday, Aug 11, 2025", "10:00 AM", "after"),
        ];

        let target = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let filtered = filter_by_week(&events, Weekday::Mon, target);

        let titles: Vec<&str> = filtered.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first day", "last day"]);
    }

    #[test]
    fn filter_drops_missing_and_unparsable_dates() {
        let events = vec![
            event(NO_DATE, "9:00 AM", "dateless"),
            event("not a date", "9:00 AM", "mangled"),
            event("Tuesday, Aug 5, 2025", "9:00 AM", "kept"),
        ];

        let target = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let filtered = filter_by_week(&events, Weekday::Mon, target);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "kept");
    }

    #[test]
    fn filter_sorts_by_date_then_time() {
        let events = vec![
            event("Tuesday, Aug 5, 2025", "2:00 PM", "tue afternoon"),
            event("Monday, Aug 4, 2025", "7:30 PM", "mon evening"),
            event("Tuesday, Aug 5, 2025", "8:00 AM", "tue morning"),
            event("Monday, Aug 4, 2025", "9:00 AM", "mon morning"),
        ];

        let target = NaiveDate::from_ymd_opt(2025, 8, 4).unwrap();
        let filtered = filter_by_week(&events, Weekday::Mon, target);

        let titles: Vec<&str> = filtered.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["mon morning", "mon evening", "tue morning", "tue afternoon"]
        );
    }

    #[test]
    fn organize_groups_by_raw_string_not_calendar_day() {
        let events = vec![
            event("Monday, Aug 4, 2025", "1:00 PM", "long form"),
            event("Mon, Aug 4, 2025", "9:00 AM", "short form"),
        ];

        let organized = organize_by_date(&events);
        assert_eq!(organized.len(), 2);
    }

    #[test]
    fn organize_orders_groups_and_events() {
        let events = vec![
            event("someday soon", "9:00 AM", "undated"),
            event("Tuesday, Aug 5, 2025", "11:00 AM", "tue"),
            event("Monday, Aug 4, 2025", "3:00 PM", "mon late"),
            event("Monday, Aug 4, 2025", "8:00 AM", "mon early"),
        ];

        let organized = organize_by_date(&events);
        let keys: Vec<&str> = organized.iter().map(|(date, _)| date.as_str()).collect();
        assert_eq!(
            keys,
            vec!["Monday, Aug 4, 2025", "Tuesday, Aug 5, 2025", "someday soon"]
        );

        let monday: Vec<&str> = organized[0].1.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(monday, vec!["mon early", "mon late"]);
    }
}
