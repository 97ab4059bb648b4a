use chrono::{DateTime, TimeZone};

/// `10:42 AM` style label shown under a message bubble.
pub fn clock_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%I:%M %p").to_string()
}

/// Avatar fallback: the first letter of every word in the name.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn clock_label_is_twelve_hour() {
        let morning = Utc.with_ymd_and_hms(2024, 5, 1, 9, 5, 0).unwrap();
        assert_eq!(clock_label(&morning), "09:05 AM");
        let offset = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let evening = offset.with_ymd_and_hms(2024, 5, 1, 22, 30, 0).unwrap();
        assert_eq!(clock_label(&evening), "10:30 PM");
    }

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("Kishore Reddy"), "KR");
        assert_eq!(initials("  John   Doe "), "JD");
        assert_eq!(initials("Émile"), "É");
        assert_eq!(initials(""), "");
    }
}
