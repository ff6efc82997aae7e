use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

/// Practice runs Monday 18:15 and Friday 19:15 local time; weekends roll to
/// the following Monday.
const MONDAY_HM: (u32, u32) = (18, 15);
const FRIDAY_HM: (u32, u32) = (19, 15);

fn occurrence(date: NaiveDate, (hour, minute): (u32, u32)) -> NaiveDateTime {
    date.and_hms_opt(hour, minute, 0)
        .expect("fixed schedule time is a valid wall-clock time")
}

fn start_time((hour, minute): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0)
        .expect("fixed schedule time is a valid wall-clock time")
}

/// Next practice occurrence at or after `now` (local wall-clock). Pure in
/// the clock reading, so callers decide the time source.
pub fn next_practice(now: NaiveDateTime) -> NaiveDateTime {
    let date = now.date();
    match date.weekday() {
        Weekday::Sat => occurrence(date + Duration::days(2), MONDAY_HM),
        Weekday::Sun => occurrence(date + Duration::days(1), MONDAY_HM),
        Weekday::Mon => {
            if now.time() < start_time(MONDAY_HM) {
                occurrence(date, MONDAY_HM)
            } else {
                occurrence(date + Duration::days(4), FRIDAY_HM)
            }
        }
        Weekday::Tue => occurrence(date + Duration::days(3), FRIDAY_HM),
        Weekday::Wed => occurrence(date + Duration::days(2), FRIDAY_HM),
        Weekday::Thu => occurrence(date + Duration::days(1), FRIDAY_HM),
        Weekday::Fri => {
            if now.time() < start_time(FRIDAY_HM) {
                occurrence(date, FRIDAY_HM)
            } else {
                occurrence(date + Duration::days(3), MONDAY_HM)
            }
        }
    }
}

/// Whether the policy is monitored at this moment: all day Sunday, and from
/// 17:00 on Mondays and Fridays (the run-up to practice).
pub fn monitoring_active(now: NaiveDateTime) -> bool {
    match now.weekday() {
        Weekday::Sun => true,
        Weekday::Mon | Weekday::Fri => now.hour() >= 17,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2026-03-02 is a Monday.
    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn monday_morning_points_to_same_day() {
        assert_eq!(next_practice(at(2, 10, 0)), at(2, 18, 15));
    }

    #[test]
    fn monday_evening_rolls_to_friday() {
        assert_eq!(next_practice(at(2, 19, 0)), at(6, 19, 15));
    }

    #[test]
    fn monday_at_the_start_instant_rolls_forward() {
        // 18:15 exactly is "at/after" the Monday start.
        assert_eq!(next_practice(at(2, 18, 15)), at(6, 19, 15));
    }

    #[test]
    fn midweek_points_to_friday() {
        assert_eq!(next_practice(at(3, 9, 0)), at(6, 19, 15)); // Tuesday
        assert_eq!(next_practice(at(4, 23, 59)), at(6, 19, 15)); // Wednesday
        assert_eq!(next_practice(at(5, 0, 0)), at(6, 19, 15)); // Thursday
    }

    #[test]
    fn friday_before_start_is_same_day() {
        assert_eq!(next_practice(at(6, 19, 14)), at(6, 19, 15));
    }

    #[test]
    fn friday_after_start_rolls_to_monday() {
        assert_eq!(next_practice(at(6, 19, 15)), at(9, 18, 15));
        assert_eq!(next_practice(at(6, 22, 0)), at(9, 18, 15));
    }

    #[test]
    fn weekend_defers_to_monday() {
        assert_eq!(next_practice(at(7, 8, 0)), at(9, 18, 15)); // Saturday
        assert_eq!(next_practice(at(8, 20, 0)), at(9, 18, 15)); // Sunday
    }

    #[test]
    fn monitoring_window() {
        assert!(monitoring_active(at(8, 0, 0))); // Sunday midnight
        assert!(monitoring_active(at(8, 23, 0))); // Sunday evening
        assert!(!monitoring_active(at(2, 16, 59))); // Monday afternoon
        assert!(monitoring_active(at(2, 17, 0))); // Monday 5pm
        assert!(monitoring_active(at(6, 18, 30))); // Friday evening
        assert!(!monitoring_active(at(4, 17, 0))); // Wednesday
    }
}
