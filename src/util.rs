/// `round(100 * score / total)`, or 0 when nothing was attempted
pub fn accuracy(score: u32, total: u32) -> u32 {
    match total {
        positive if positive > 0 => ((score as f64 / total as f64) * 100.0).round() as u32,
        _ => 0,
    }
}

/// `m:ss` countdown display
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Round length as the player-entry screen describes it
pub fn format_minutes(seconds: u32) -> String {
    let minutes = seconds / 60;
    if minutes == 0 {
        return format!("{seconds} second{}", if seconds == 1 { "" } else { "s" });
    }
    format!("{minutes} minute{}", if minutes == 1 { "" } else { "s" })
}

/// `1 movie` / `3 movies`
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(3, 4), 75);
        assert_eq!(accuracy(1, 3), 33);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(5, 5), 100);
    }

    #[test]
    fn test_accuracy_rounds_half_up() {
        assert_eq!(accuracy(1, 8), 13);
        assert_eq!(accuracy(1, 200), 1);
    }

    #[test]
    fn test_accuracy_no_attempts() {
        assert_eq!(accuracy(0, 0), 0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(120), "2:00");
        assert_eq!(format_clock(69), "1:09");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(0), "0:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(60), "1 minute");
        assert_eq!(format_minutes(180), "3 minutes");
        assert_eq!(format_minutes(45), "45 seconds");
        assert_eq!(format_minutes(1), "1 second");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "movie", "movies"), "1 movie");
        assert_eq!(pluralize(0, "movie", "movies"), "0 movies");
        assert_eq!(pluralize(7, "category", "categories"), "7 categories");
    }
}
