use crate::domain::Rating;

/// Parse a review count such as `(1,234)`. Absent when unparsable.
pub fn parse_reviews_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '\u{a0}' | '(' | ')' | ','))
        .collect();
    cleaned.trim().parse::<u64>().ok()
}

/// Parse an average rating such as `4,6` or `4.6`. Absent when unparsable
/// or outside `[0, 5]`.
pub fn parse_reviews_average(raw: &str) -> Option<Rating> {
    let cleaned = raw.replace(' ', "").replace(',', ".");
    cleaned.trim().parse::<f64>().ok().and_then(Rating::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_strips_decoration() {
        assert_eq!(parse_reviews_count("(1,234)"), Some(1234));
        assert_eq!(parse_reviews_count("\u{a0}(87)"), Some(87));
        assert_eq!(parse_reviews_count("12"), Some(12));
    }

    #[test]
    fn test_count_absent_not_zero_on_failure() {
        assert_eq!(parse_reviews_count(""), None);
        assert_eq!(parse_reviews_count("no reviews"), None);
        assert_eq!(parse_reviews_count("(-3)"), None);
    }

    #[test]
    fn test_average_accepts_comma_decimal() {
        assert_eq!(parse_reviews_average("4,6").map(Rating::value), Some(4.6));
        assert_eq!(parse_reviews_average(" 3.9 ").map(Rating::value), Some(3.9));
    }

    #[test]
    fn test_average_rejects_out_of_range() {
        assert_eq!(parse_reviews_average("7.2"), None);
        assert_eq!(parse_reviews_average("-1"), None);
        assert_eq!(parse_reviews_average("NaN"), None);
        assert_eq!(parse_reviews_average("stars"), None);
    }
}
