pub mod arabic;
pub mod numerals;

use std::ops::RangeInclusive;

pub use arabic::shape_arabic;
pub use numerals::format_numeral_string;

// Arabic
const ARABIC_RANGE: RangeInclusive<u32> = 0x0600..=0x06ff;
const ARABIC_SUPPLEMENT_RANGE: RangeInclusive<u32> = 0x0750..=0x077f;
const ARABIC_EXTENDED_A_RANGE: RangeInclusive<u32> = 0x08a0..=0x08ff;
const ARABIC_PRESENTATION_A_RANGE: RangeInclusive<u32> = 0xfb50..=0xfdff;
const ARABIC_PRESENTATION_B_RANGE: RangeInclusive<u32> = 0xfe70..=0xfeff;

// CJK
const CJK_RANGE: RangeInclusive<u32> = 0x4e00..=0x9fff;
const HIRAGANA_RANGE: RangeInclusive<u32> = 0x3040..=0x309f;
const KATAKANA_RANGE: RangeInclusive<u32> = 0x30a0..=0x30ff;
const HANGUL_SYLLABLES_RANGE: RangeInclusive<u32> = 0xac00..=0xd7af;
const KANJI_EXTENDED_A_RANGE: RangeInclusive<u32> = 0x3400..=0x4dbf;

const ARABIC_RANGES: [RangeInclusive<u32>; 5] = [
    ARABIC_RANGE,
    ARABIC_SUPPLEMENT_RANGE,
    ARABIC_EXTENDED_A_RANGE,
    ARABIC_PRESENTATION_A_RANGE,
    ARABIC_PRESENTATION_B_RANGE,
];

const CJK_RANGES: [RangeInclusive<u32>; 5] = [
    CJK_RANGE,
    HIRAGANA_RANGE,
    KATAKANA_RANGE,
    HANGUL_SYLLABLES_RANGE,
    KANJI_EXTENDED_A_RANGE,
];

pub fn is_arabic_char(ch: char) -> bool {
    ARABIC_RANGES.iter().any(|r| r.contains(&(ch as u32)))
}

pub fn is_cjk_char(ch: char) -> bool {
    CJK_RANGES.iter().any(|r| r.contains(&(ch as u32)))
}

pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(is_arabic_char)
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk_char)
}
