//! Font fallback chains per script, in priority order.
//!
//! Each chain ends in families with wide Unicode coverage so that a partially
//! equipped system still renders something legible.

use crate::language::{Language, ScriptClass};

pub const LATIN_FAMILIES: &[&str] = &[
    "IBM Plex Sans",
    "Noto Sans",
    "DejaVu Sans",
    "Arial",
    "Liberation Sans",
    "FreeSans",
];

pub const ARABIC_FAMILIES: &[&str] = &[
    "IBM Plex Sans Arabic",
    "Noto Sans Arabic",
    "Amiri",
    "DejaVu Sans",
    "Arial Unicode MS",
    // General fallbacks
    "Arial",
    "Liberation Sans",
    "FreeSans",
];

pub const CJK_FAMILIES: &[&str] = &[
    // Japanese-first CJK families
    "Noto Sans CJK JP",
    "Noto Sans JP",
    "Noto Serif CJK JP",
    "Source Han Sans",
    "Source Han Sans JP",
    "Harano Aji Gothic",
    "Harano Aji Mincho",
    "IBM Plex Sans JP",
    "Droid Sans Japanese",
    "WenQuanYi Zen Hei",
    "Yu Gothic",
    "Meiryo",
    "Droid Sans Fallback",
    "Arial Unicode MS",
    // General fallbacks, no kana or kanji
    "Noto Sans",
    "IBM Plex Sans",
    "Source Sans Pro",
    "DejaVu Sans",
    "Arial",
    "Liberation Sans",
    "FreeSans",
];

pub fn chain_for_script(script: ScriptClass) -> &'static [&'static str] {
    match script {
        ScriptClass::Latin => LATIN_FAMILIES,
        ScriptClass::Arabic => ARABIC_FAMILIES,
        ScriptClass::Cjk => CJK_FAMILIES,
    }
}

pub fn chain_for(language: Language) -> &'static [&'static str] {
    chain_for_script(language.script())
}
