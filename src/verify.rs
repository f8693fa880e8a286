//! Output comparison for exercises.
//!
//! The remote runtime does not always print Turkish letters the same way
//! (it depends on the encoding of the execution environment), so both sides
//! are folded to plain ASCII letters before comparing.

use crate::model::{ExecutionError, ExecutionResult, Verdict};

/// Turkish letters and their base-alphabet replacements.
pub const FOLD_TABLE: [(char, char); 12] = [
    ('ı', 'i'),
    ('İ', 'I'),
    ('ğ', 'g'),
    ('Ğ', 'G'),
    ('ü', 'u'),
    ('Ü', 'U'),
    ('ş', 's'),
    ('Ş', 'S'),
    ('ö', 'o'),
    ('Ö', 'O'),
    ('ç', 'c'),
    ('Ç', 'C'),
];

/// Apostrophe glyphs that collapse to `'`.
pub const APOSTROPHES: [char; 5] = ['\u{2019}', '\u{2018}', '\u{02BC}', '\u{2032}', '\u{00B4}'];

fn fold_char(c: char) -> char {
    if APOSTROPHES.contains(&c) {
        return '\'';
    }
    FOLD_TABLE
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Canonical form used on both sides of a comparison.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.chars().map(fold_char).collect();
    folded.trim().to_string()
}

/// Lenient match: the normalized output only has to contain the normalized
/// expectation, so extra labels around it are fine.
pub fn verify_output(actual: &str, expected: Option<&str>) -> Verdict {
    let Some(expected) = expected.filter(|e| !e.is_empty()) else {
        return Verdict::Unknown;
    };
    if normalize_text(actual).contains(&normalize_text(expected)) {
        Verdict::Correct
    } else {
        Verdict::Incorrect
    }
}

/// Verdict for a whole run.
///
/// A transport failure means nothing ran, so no verdict is given. A compile
/// or runtime failure counts as incorrect when there was something to match.
pub fn verdict_for(result: &ExecutionResult, expected: Option<&str>) -> Verdict {
    let has_expectation = expected.is_some_and(|e| !e.is_empty());
    match &result.error {
        Some(ExecutionError::Transport(_)) => Verdict::Unknown,
        Some(ExecutionError::Program(_)) if has_expectation => Verdict::Incorrect,
        Some(ExecutionError::Program(_)) => Verdict::Unknown,
        None => verify_output(&result.raw_output, expected),
    }
}

pub fn normalize_newlines(value: &str) -> String {
    value.replace("\r\n", "\n")
}

/// First line where the normalized outputs differ, for the mismatch panel.
pub fn line_diff(expected: &str, received: &str) -> String {
    let expected_norm = normalize_text(&normalize_newlines(expected));
    let received_norm = normalize_text(&normalize_newlines(received));
    let exp: Vec<&str> = expected_norm.split('\n').collect();
    let rec: Vec<&str> = received_norm.split('\n').collect();
    let max_lines = exp.len().max(rec.len());

    for i in 0..max_lines {
        let e = exp.get(i).copied().unwrap_or("<satır yok>");
        let r = rec.get(i).copied().unwrap_or("<satır yok>");
        if e.trim_end() != r.trim_end() {
            return format!("Satır {}\n- beklenen: {:?}\n+ alınan: {:?}", i + 1, e, r);
        }
    }

    "Fark bulunamadı (görünmez karakter olabilir).".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn folds_turkish_letters_and_trims() {
        assert_eq!(normalize_text("  İğüşöç ıĞÜŞÖÇ \n"), "Igusoc iGUSOC");
    }

    #[test]
    fn unifies_apostrophes() {
        assert_eq!(normalize_text("5\u{2019}in"), "5'in");
        assert_eq!(normalize_text("5\u{2018}in"), "5'in");
        assert_eq!(normalize_text("5'in"), "5'in");
    }

    #[test]
    fn doubling_exercise_output_is_correct() {
        let expected = "5'in iki katı: 10\n10'un iki katı: 20";
        let actual = "5'in iki kat\u{0131}: 10\n10\u{2019}un iki kati: 20\n";
        assert_eq!(verify_output(actual, Some(expected)), Verdict::Correct);
    }

    #[test]
    fn partial_output_is_incorrect() {
        let expected = "5'in iki katı: 10\n10'un iki katı: 20";
        assert_eq!(
            verify_output("5'in iki katı: 10", Some(expected)),
            Verdict::Incorrect
        );
    }

    #[test]
    fn missing_second_line_is_incorrect() {
        let expected = "Max(10, 20): 20\nMax(50, 30): 50";
        assert_eq!(
            verify_output("Max(10, 20): 20\n", Some(expected)),
            Verdict::Incorrect
        );
    }

    #[test]
    fn extra_surrounding_text_is_accepted() {
        assert_eq!(
            verify_output("Başlıyor\nToplam: 15\nBitti", Some("Toplam: 15")),
            Verdict::Correct
        );
    }

    #[test]
    fn lenient_policy_accepts_digit_inside_other_output() {
        assert_eq!(verify_output("Sonuç: 10", Some("0")), Verdict::Correct);
    }

    #[test]
    fn no_expectation_gives_no_verdict() {
        assert_eq!(verify_output("anything", None), Verdict::Unknown);
        assert_eq!(verify_output("anything", Some("")), Verdict::Unknown);
    }

    #[test]
    fn transport_failure_gives_no_verdict() {
        let result = ExecutionResult::transport_failure("Hata: connection refused");
        assert_eq!(verdict_for(&result, Some("1\n2\n3")), Verdict::Unknown);
    }

    #[test]
    fn program_failure_is_incorrect_only_with_expectation() {
        let result = ExecutionResult::program_failure("", "Main.java:3: error");
        assert_eq!(verdict_for(&result, Some("1")), Verdict::Incorrect);
        assert_eq!(verdict_for(&result, None), Verdict::Unknown);
    }

    #[test]
    fn clean_run_is_compared() {
        let result = ExecutionResult::success("Toplam: 15\n");
        assert_eq!(verdict_for(&result, Some("Toplam: 15")), Verdict::Correct);
        assert_eq!(verdict_for(&result, Some("Toplam: 16")), Verdict::Incorrect);
    }

    #[test]
    fn line_diff_points_at_missing_line() {
        let diff = line_diff("Max(10, 20): 20\nMax(50, 30): 50", "Max(10, 20): 20");
        assert!(diff.starts_with("Satır 2"), "{diff}");
        assert!(diff.contains("<satır yok>"));
    }

    #[test]
    fn line_diff_ignores_crlf() {
        let diff = line_diff("a\nb", "a\r\nb\r\n");
        assert!(diff.starts_with("Fark bulunamadı"), "{diff}");
    }

    fn text_with_turkish() -> impl Strategy<Value = String> {
        let pool: Vec<char> = FOLD_TABLE
            .iter()
            .map(|(c, _)| *c)
            .chain(APOSTROPHES)
            .chain(['a', 'Z', '0', ' ', '\n', '\'', ':', '\t'])
            .collect();
        proptest::collection::vec(proptest::sample::select(pool), 0..40)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(s in "\\PC*") {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn normalization_is_idempotent_on_turkish_text(s in text_with_turkish()) {
            let once = normalize_text(&s);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn no_folded_character_survives(s in text_with_turkish()) {
            let out = normalize_text(&s);
            for (from, _) in FOLD_TABLE {
                prop_assert!(!out.contains(from));
            }
            for apostrophe in APOSTROPHES {
                prop_assert!(!out.contains(apostrophe));
            }
        }

        #[test]
        fn verdict_follows_containment(a in text_with_turkish(), b in text_with_turkish()) {
            prop_assume!(!b.is_empty());
            let contains = normalize_text(&a).contains(&normalize_text(&b));
            let expected = if contains { Verdict::Correct } else { Verdict::Incorrect };
            prop_assert_eq!(verify_output(&a, Some(&b)), expected);
        }

        #[test]
        fn output_containing_expectation_is_correct(
            prefix in "[a-z ]{0,8}",
            b in text_with_turkish(),
            suffix in "[a-z ]{0,8}",
        ) {
            prop_assume!(!b.is_empty());
            let actual = format!("{prefix}\n{b}\n{suffix}");
            // Trimming the expectation can only shrink it, so it stays inside.
            prop_assert_eq!(verify_output(&actual, Some(&b)), Verdict::Correct);
        }
    }
}
