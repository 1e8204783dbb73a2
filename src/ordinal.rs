//! Ordinal number labels ("1st", "2nd", "3rd", "4th", ...)

/// Format a 1-based rank as its English ordinal.
///
/// 11, 12 and 13 (and 111, 212, ...) always take "th".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(10), "10th");
    }

    #[test]
    fn test_teens_take_th() {
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(111), "111th");
        assert_eq!(ordinal(1012), "1012th");
    }

    #[test]
    fn test_twenties_and_beyond() {
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(23), "23rd");
        assert_eq!(ordinal(101), "101st");
        assert_eq!(ordinal(u32::MAX), "4294967295th");
    }

    proptest! {
        #[test]
        fn prop_ordinal_keeps_number_prefix(n in 1u32..100_000) {
            let label = ordinal(n);
            prop_assert!(label.starts_with(&n.to_string()));
            prop_assert_eq!(label.len(), n.to_string().len() + 2);
        }
    }
}
