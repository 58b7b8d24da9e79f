use crate::language::Language;

/// Offset from an ASCII digit to its full-width form (`'0'` -> U+FF10).
const FULLWIDTH_OFFSET: u32 = 0xfee0;

const FULLWIDTH_COLON: char = '\u{ff1a}';
const FULLWIDTH_HYPHEN_MINUS: char = '\u{ff0d}';
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Convert ASCII numerals and separators into the glyphs used by `language`.
///
/// English and Arabic keep Western digits. Japanese maps digits, `:`, `-` and
/// space to their full-width forms; every other character passes through.
pub fn format_numeral_string(text: &str, language: Language) -> String {
    match language {
        Language::English | Language::Arabic => text.to_string(),
        Language::Japanese => text.chars().map(to_fullwidth).collect(),
    }
}

fn to_fullwidth(ch: char) -> char {
    match ch {
        '0'..='9' => char::from_u32(ch as u32 + FULLWIDTH_OFFSET).unwrap_or(ch),
        ':' => FULLWIDTH_COLON,
        '-' => FULLWIDTH_HYPHEN_MINUS,
        ' ' => IDEOGRAPHIC_SPACE,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japanese_time_and_year() {
        assert_eq!(format_numeral_string("00:00", Language::Japanese), "００：００");
        assert_eq!(format_numeral_string("2025", Language::Japanese), "２０２５");
    }

    #[test]
    fn test_japanese_every_digit() {
        let converted = format_numeral_string("0123456789", Language::Japanese);
        let expected: String = (0xff10..=0xff19).filter_map(char::from_u32).collect();

        assert_eq!(converted, expected);
    }

    #[test]
    fn test_japanese_separators_and_passthrough() {
        assert_eq!(
            format_numeral_string("Tokyo - 12月/x", Language::Japanese),
            "Tokyo\u{3000}\u{ff0d}\u{3000}１２月/x"
        );
    }

    #[test]
    fn test_latin_and_arabic_are_identity() {
        for text in ["00:00", "2025", "a - b", "بيروت 2025"] {
            assert_eq!(format_numeral_string(text, Language::English), text);
            assert_eq!(format_numeral_string(text, Language::Arabic), text);
        }
    }

    #[test]
    fn test_reapplying_to_converted_text_is_noop() {
        let once = format_numeral_string("23:59 - 2024", Language::Japanese);
        let twice = format_numeral_string(&once, Language::Japanese);

        assert_eq!(once, twice);
    }
}
