use linegrep::Regex;

fn test_pattern(pattern: &str, text: &str, expected: bool) {
    let regex =
        Regex::new(pattern).unwrap_or_else(|e| panic!("failed to parse pattern {pattern:?}: {e}"));
    let result = regex.is_match(text);
    assert_eq!(
        result, expected,
        "pattern {pattern:?} against text {text:?} - expected: {expected}, got: {result}"
    );
}

mod group_tests {
    use super::*;

    #[test]
    fn simple_group() {
        test_pattern("(abc)", "abc", true);
        test_pattern("(abc)", "def", false);
    }

    #[test]
    fn group_in_sequence() {
        test_pattern("x(abc)y", "xabcy", true);
    }

    #[test]
    fn empty_group() {
        test_pattern("()", "hello", true);
    }

    #[test]
    fn nested_groups() {
        test_pattern("(a(b)c)", "abc", true);
        test_pattern("(((a)))", "a", true);
    }

    #[test]
    fn group_repeated_as_a_unit() {
        test_pattern("(ab)+", "ababab", true);
        test_pattern("(ab)+c", "ababc", true);
        test_pattern("^(ab)+$", "aba", false);
    }

    #[test]
    fn optional_group() {
        test_pattern("a(bc)?d", "ad", true);
        test_pattern("a(bc)?d", "abcd", true);
        test_pattern("a(bc)?d", "abd", false);
    }

    #[test]
    fn repeated_alternation_group() {
        test_pattern("^(a|b)+$", "abba", true);
        test_pattern("^(a|b)+$", "abca", false);
    }
}

mod capture_tests {
    use super::*;

    #[test]
    fn adjacent_groups() {
        let regex = Regex::new("(a)(b)").unwrap();
        let caps = regex.captures("ab").unwrap();
        assert_eq!(caps.group_text(1, "ab").as_deref(), Some("a"));
        assert_eq!(caps.group_text(2, "ab").as_deref(), Some("b"));
    }

    #[test]
    fn nested_groups_number_by_left_paren() {
        let regex = Regex::new("((a)(b))").unwrap();
        let caps = regex.captures("ab").unwrap();
        assert_eq!(caps.group_text(1, "ab").as_deref(), Some("ab"));
        assert_eq!(caps.group_text(2, "ab").as_deref(), Some("a"));
        assert_eq!(caps.group_text(3, "ab").as_deref(), Some("b"));
    }

    #[test]
    fn group_count_is_exposed() {
        let regex = Regex::new("((a)(b))c(d)").unwrap();
        assert_eq!(regex.group_count(), 4);
    }

    #[test]
    fn unmatched_optional_group_is_unbound() {
        let regex = Regex::new("(x)?y").unwrap();
        let caps = regex.captures("y").unwrap();
        assert_eq!(caps.span(1), None);
    }

    #[test]
    fn capture_spans_are_char_offsets() {
        let regex = Regex::new("x(ab)").unwrap();
        let caps = regex.captures("zxab").unwrap();
        assert_eq!(caps.span(1), Some((2, 4)));
    }
}

mod backreference_tests {
    use super::*;

    #[test]
    fn backreference_repeats_captured_text() {
        test_pattern(r"(cat) and \1", "cat and cat", true);
        test_pattern(r"(cat) and \1", "cat and dog", false);
    }

    #[test]
    fn backreference_tracks_winning_alternative() {
        test_pattern(r"(cat|dog) and \1", "dog and dog", true);
        test_pattern(r"(cat|dog) and \1", "dog and cat", false);
    }

    #[test]
    fn backreference_to_unexercised_group_fails() {
        test_pattern(r"(x)?a\1", "a", false);
    }

    #[test]
    fn backreference_forces_alternation_backtrack() {
        // `ab` is preferred for group 1, but only `a` lets `\1` succeed.
        test_pattern(r"(ab|a)\1$", "aa", true);
    }

    #[test]
    fn two_digit_backreference() {
        test_pattern(
            r"((((((((((a))))))))))\10",
            "aa",
            true,
        );
    }

    #[test]
    fn backreference_after_repeated_group_sees_last_repetition() {
        let regex = Regex::new(r"(a|b)+\1").unwrap();
        // Group 1 ends bound to "b", so the backreference needs a second `b`.
        assert!(regex.is_match("abb"));
        assert!(!regex.is_match("ab"));
    }
}
