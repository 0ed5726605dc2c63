use chrono::{DateTime, Utc};

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1_440;
const MINUTES_IN_MONTH: i64 = 43_200;
const MINUTES_IN_TWO_MONTHS: i64 = 86_400;

/// Human wording for how long ago `then` was, e.g. "about 3 hours ago".
///
/// Timestamps in the future read as "less than a minute ago".
pub fn format_distance(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format!("{} ago", distance_words(then, now))
}

fn distance_words(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    let minutes = (seconds as f64 / 60.0).round() as i64;

    if minutes < 1 && seconds < 30 {
        return "less than a minute".to_string();
    }
    if minutes < 2 {
        return "1 minute".to_string();
    }
    if minutes < 45 {
        return format!("{} minutes", minutes);
    }
    if minutes < 90 {
        return "about 1 hour".to_string();
    }
    if minutes < MINUTES_IN_DAY {
        let hours = (minutes as f64 / MINUTES_IN_HOUR as f64).round() as i64;
        return format!("about {} hours", hours);
    }
    if minutes < 2_520 {
        return "1 day".to_string();
    }
    if minutes < MINUTES_IN_MONTH {
        let days = (minutes as f64 / MINUTES_IN_DAY as f64).round() as i64;
        return format!("{} days", days);
    }
    if minutes < 64_800 {
        return "about 1 month".to_string();
    }
    if minutes < MINUTES_IN_TWO_MONTHS {
        return "about 2 months".to_string();
    }

    let months = (minutes as f64 / MINUTES_IN_MONTH as f64).round() as i64;
    if months < 12 {
        return format!("{} months", months);
    }

    let years = months / 12;
    let remainder = months % 12;
    if remainder < 3 {
        format!("about {}", plural(years, "year"))
    } else if remainder < 9 {
        format!("over {}", plural(years, "year"))
    } else {
        format!("almost {}", plural(years + 1, "year"))
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn ago(delta: Duration) -> String {
        let now = Utc::now();
        format_distance(now - delta, now)
    }

    #[test]
    fn short_spans() {
        assert_eq!(ago(Duration::seconds(10)), "less than a minute ago");
        assert_eq!(ago(Duration::seconds(50)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(5)), "5 minutes ago");
        assert_eq!(ago(Duration::minutes(60)), "about 1 hour ago");
        assert_eq!(ago(Duration::hours(3)), "about 3 hours ago");
    }

    #[test]
    fn long_spans() {
        assert_eq!(ago(Duration::hours(30)), "1 day ago");
        assert_eq!(ago(Duration::days(4)), "4 days ago");
        assert_eq!(ago(Duration::days(35)), "about 1 month ago");
        assert_eq!(ago(Duration::days(50)), "about 2 months ago");
        assert_eq!(ago(Duration::days(150)), "5 months ago");
        assert_eq!(ago(Duration::days(365)), "about 1 year ago");
        assert_eq!(ago(Duration::days(365 * 2 + 180)), "over 2 years ago");
        assert_eq!(ago(Duration::days(365 * 2 + 330)), "almost 3 years ago");
    }

    #[test]
    fn future_timestamps_clamp_to_now() {
        let now = Utc::now();
        assert_eq!(
            format_distance(now + Duration::minutes(10), now),
            "less than a minute ago"
        );
    }
}
