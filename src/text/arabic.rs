//! Arabic shaping for renderers that lay text out left-to-right only.
//!
//! Shaping happens in two stages:
//! 1. Contextual reshaping: every letter of an Arabic run is replaced by its
//!    isolated, final, initial or medial presentation form (Unicode block
//!    "Arabic Presentation Forms-B"), including the mandatory lam-alef ligatures.
//! 2. Bidirectional reordering with `unicode-bidi`, so the returned string is
//!    already in visual order and can be drawn glyph by glyph from the left.
//!    Right-to-left runs are reversed per cluster, keeping combining marks
//!    after their base letter, and paired punctuation is mirrored.
//!
//! Runs containing characters the reshaper does not know (already shaped
//! presentation forms, letters outside the basic Arabic alphabet) are kept
//! unshaped but still reordered.

use tracing::debug;
use unicode_bidi::{BidiClass, BidiInfo, bidi_class};

use super::{contains_arabic, is_arabic_char};

const LAM: char = '\u{0644}';
const TATWEEL: char = '\u{0640}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joining {
    /// Never connects (hamza).
    None,
    /// Connects to the previous letter only.
    Right,
    /// Connects on both sides.
    Dual,
    /// Kashida; connects on both sides and has no presentation forms.
    Causing,
}

impl Joining {
    fn joins_prev(self) -> bool {
        matches!(self, Joining::Right | Joining::Dual | Joining::Causing)
    }

    fn joins_next(self) -> bool {
        matches!(self, Joining::Dual | Joining::Causing)
    }
}

/// Letter, first presentation form (isolated), joining type.
///
/// Forms follow the isolated, final, initial, medial order of the
/// presentation block, so a form is `isolated + offset`.
const LETTERS: &[(char, u32, Joining)] = &[
    ('\u{0621}', 0xfe80, Joining::None),  // hamza
    ('\u{0622}', 0xfe81, Joining::Right), // alef with madda
    ('\u{0623}', 0xfe83, Joining::Right), // alef with hamza above
    ('\u{0624}', 0xfe85, Joining::Right), // waw with hamza
    ('\u{0625}', 0xfe87, Joining::Right), // alef with hamza below
    ('\u{0626}', 0xfe89, Joining::Dual),  // yeh with hamza
    ('\u{0627}', 0xfe8d, Joining::Right), // alef
    ('\u{0628}', 0xfe8f, Joining::Dual),  // beh
    ('\u{0629}', 0xfe93, Joining::Right), // teh marbuta
    ('\u{062A}', 0xfe95, Joining::Dual),  // teh
    ('\u{062B}', 0xfe99, Joining::Dual),  // theh
    ('\u{062C}', 0xfe9d, Joining::Dual),  // jeem
    ('\u{062D}', 0xfea1, Joining::Dual),  // hah
    ('\u{062E}', 0xfea5, Joining::Dual),  // khah
    ('\u{062F}', 0xfea9, Joining::Right), // dal
    ('\u{0630}', 0xfeab, Joining::Right), // thal
    ('\u{0631}', 0xfead, Joining::Right), // reh
    ('\u{0632}', 0xfeaf, Joining::Right), // zain
    ('\u{0633}', 0xfeb1, Joining::Dual),  // seen
    ('\u{0634}', 0xfeb5, Joining::Dual),  // sheen
    ('\u{0635}', 0xfeb9, Joining::Dual),  // sad
    ('\u{0636}', 0xfebd, Joining::Dual),  // dad
    ('\u{0637}', 0xfec1, Joining::Dual),  // tah
    ('\u{0638}', 0xfec5, Joining::Dual),  // zah
    ('\u{0639}', 0xfec9, Joining::Dual),  // ain
    ('\u{063A}', 0xfecd, Joining::Dual),  // ghain
    ('\u{0641}', 0xfed1, Joining::Dual),  // feh
    ('\u{0642}', 0xfed5, Joining::Dual),  // qaf
    ('\u{0643}', 0xfed9, Joining::Dual),  // kaf
    ('\u{0644}', 0xfedd, Joining::Dual),  // lam
    ('\u{0645}', 0xfee1, Joining::Dual),  // meem
    ('\u{0646}', 0xfee5, Joining::Dual),  // noon
    ('\u{0647}', 0xfee9, Joining::Dual),  // heh
    ('\u{0648}', 0xfeed, Joining::Right), // waw
    ('\u{0649}', 0xfeef, Joining::Right), // alef maksura
    ('\u{064A}', 0xfef1, Joining::Dual),  // yeh
];

/// Alef variant following a lam, and the isolated form of the ligature.
const LAM_ALEF: &[(char, u32)] = &[
    ('\u{0622}', 0xfef5),
    ('\u{0623}', 0xfef7),
    ('\u{0625}', 0xfef9),
    ('\u{0627}', 0xfefb),
];

#[derive(Debug, Clone, Copy)]
enum Unit {
    /// A joining letter; `isolated` is `None` for the tatweel.
    Letter {
        ch: char,
        isolated: Option<u32>,
        joining: Joining,
    },
    /// Harakat and other marks; invisible to joining.
    Transparent(char),
    /// Arabic punctuation and digits; end any joining.
    Boundary(char),
}

fn is_transparent(ch: char) -> bool {
    matches!(ch, '\u{064B}'..='\u{065F}' | '\u{0670}')
}

fn is_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\u{060C}' | '\u{061B}' | '\u{061F}' | '\u{0660}'..='\u{066D}' | '\u{06D4}'
    )
}

fn letter(ch: char) -> Option<Unit> {
    if ch == TATWEEL {
        return Some(Unit::Letter {
            ch,
            isolated: None,
            joining: Joining::Causing,
        });
    }

    LETTERS
        .iter()
        .find(|(c, _, _)| *c == ch)
        .map(|&(ch, isolated, joining)| Unit::Letter {
            ch,
            isolated: Some(isolated),
            joining,
        })
}

fn lam_alef(alef: char) -> Option<Unit> {
    LAM_ALEF
        .iter()
        .find(|(c, _)| *c == alef)
        .map(|&(_, isolated)| Unit::Letter {
            ch: LAM,
            isolated: Some(isolated),
            joining: Joining::Right,
        })
}

/// Split an Arabic run into units, or `None` if it holds an unsupported character.
fn units(run: &[char]) -> Option<Vec<Unit>> {
    let mut units = Vec::with_capacity(run.len());
    let mut i = 0;

    while i < run.len() {
        let ch = run[i];

        if ch == LAM {
            // marks between lam and alef do not prevent the ligature
            let next = (i + 1..run.len()).find(|&j| !is_transparent(run[j]));

            if let Some((alef, ligature)) =
                next.and_then(|j| lam_alef(run[j]).map(|ligature| (j, ligature)))
            {
                units.push(ligature);
                units.extend(run[i + 1..alef].iter().map(|&mark| Unit::Transparent(mark)));
                i = alef + 1;
                continue;
            }
        }

        let unit = if is_transparent(ch) {
            Unit::Transparent(ch)
        } else if is_boundary(ch) {
            Unit::Boundary(ch)
        } else {
            letter(ch)?
        };

        units.push(unit);
        i += 1;
    }

    Some(units)
}

/// Joining type of the nearest letter in `iter`, skipping marks.
fn neighbour<'a>(mut iter: impl Iterator<Item = &'a Unit>) -> Option<Joining> {
    iter.find_map(|unit| match unit {
        Unit::Transparent(_) => None,
        Unit::Letter { joining, .. } => Some(Some(*joining)),
        Unit::Boundary(_) => Some(None),
    })
    .flatten()
}

fn reshape_run(run: &[char]) -> Option<String> {
    let units = units(run)?;
    let mut out = String::with_capacity(run.len() * 3);

    for (idx, unit) in units.iter().enumerate() {
        match *unit {
            Unit::Transparent(ch) | Unit::Boundary(ch) => out.push(ch),
            Unit::Letter { ch, isolated, joining } => {
                let Some(isolated) = isolated else {
                    out.push(ch);
                    continue;
                };

                let prev = neighbour(units[..idx].iter().rev());
                let next = neighbour(units[idx + 1..].iter());

                let connects_prev = joining.joins_prev() && prev.is_some_and(Joining::joins_next);
                let connects_next = joining.joins_next() && next.is_some_and(Joining::joins_prev);

                let offset = match (connects_prev, connects_next) {
                    (false, false) => 0,
                    (true, false) => 1,
                    (false, true) => 2,
                    (true, true) => 3,
                };

                out.push(char::from_u32(isolated + offset)?);
            }
        }
    }

    Some(out)
}

/// Replace each Arabic letter with its contextual presentation form, in logical order.
///
/// Non-Arabic characters are copied as-is and break joining.
pub fn reshape(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !is_arabic_char(chars[i]) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && is_arabic_char(chars[i]) {
            i += 1;
        }

        let run = &chars[start..i];
        match reshape_run(run) {
            Some(shaped) => out.push_str(&shaped),
            None => {
                debug!(
                    "Leaving Arabic run unshaped, unsupported character in {:?}",
                    run.iter().collect::<String>()
                );
                out.extend(run);
            }
        }
    }

    out
}

/// Reorder `text` from logical to visual order using the Unicode bidi algorithm.
///
/// The paragraph direction is taken from the first strong character.
pub fn reorder(text: &str) -> String {
    let bidi = BidiInfo::new(text, None);
    let mut out = String::with_capacity(text.len());

    for para in &bidi.paragraphs {
        let (levels, runs) = bidi.visual_runs(para, para.range.clone());

        for run in runs {
            let slice = &text[run.clone()];

            if levels[run.start].is_rtl() {
                push_rtl_run(&mut out, slice);
            } else {
                out.push_str(slice);
            }
        }
    }

    out
}

/// Append a right-to-left run reversed cluster by cluster.
fn push_rtl_run(out: &mut String, run: &str) {
    let mut clusters = Vec::new();
    let mut start = 0;

    for (idx, ch) in run.char_indices() {
        if idx > start && bidi_class(ch) != BidiClass::NSM {
            clusters.push(&run[start..idx]);
            start = idx;
        }
    }
    clusters.push(&run[start..]);

    for cluster in clusters.into_iter().rev() {
        out.extend(cluster.chars().map(mirror));
    }
}

/// Bidi mirrored counterpart of paired punctuation.
fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '\u{00AB}' => '\u{00BB}',
        '\u{00BB}' => '\u{00AB}',
        '\u{2039}' => '\u{203A}',
        '\u{203A}' => '\u{2039}',
        _ => ch,
    }
}

/// Shape and reorder Arabic text for a left-to-right-only renderer.
///
/// Text without Arabic characters is returned unchanged. Latin and digit runs
/// keep their internal left-to-right order.
pub fn shape_arabic(text: &str) -> String {
    if !contains_arabic(text) {
        return text.to_string();
    }

    reorder(&reshape(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(codes: &[u32]) -> String {
        codes.iter().filter_map(|&c| char::from_u32(c)).collect()
    }

    #[test]
    fn test_reshape_positional_forms() {
        // beh yeh reh waw teh
        assert_eq!(
            reshape("بيروت"),
            chars(&[0xfe91, 0xfef4, 0xfeae, 0xfeed, 0xfe95])
        );
    }

    #[test]
    fn test_reshape_single_letters_are_isolated() {
        assert_eq!(reshape("ب"), chars(&[0xfe8f]));
        assert_eq!(reshape("ب ب"), chars(&[0xfe8f, 0x20, 0xfe8f]));
        assert_eq!(reshape("ء"), chars(&[0xfe80]));
    }

    #[test]
    fn test_reshape_lam_alef_ligature() {
        assert_eq!(reshape("لا"), chars(&[0xfefb]));
        // kaf joins into the ligature, which then takes its final form
        assert_eq!(reshape("كلا"), chars(&[0xfedb, 0xfefc]));
        assert_eq!(reshape("لأ"), chars(&[0xfef7]));
    }

    #[test]
    fn test_reshape_marks_are_transparent() {
        // beh + kasra + teh: the kasra does not break the connection
        assert_eq!(reshape("بِت"), chars(&[0xfe91, 0x0650, 0xfe96]));
    }

    #[test]
    fn test_reshape_lam_alef_across_marks() {
        // lam + fatha + alef still forms the ligature; the mark follows it
        assert_eq!(reshape("لَا"), chars(&[0xfefb, 0x064e]));
        assert_eq!(reshape("كلَا"), chars(&[0xfedb, 0xfefc, 0x064e]));
    }

    #[test]
    fn test_reshape_tatweel_connects() {
        assert_eq!(reshape("بـب"), chars(&[0xfe91, 0x0640, 0xfe90]));
    }

    #[test]
    fn test_reshape_digits_break_joining() {
        assert_eq!(reshape("ب1ب"), chars(&[0xfe8f, 0x31, 0xfe8f]));
    }

    #[test]
    fn test_reshape_unsupported_run_is_left_alone() {
        // Persian peh is outside the table; the whole run stays as written
        assert_eq!(reshape("پارس"), "پارس");
        // only the offending run falls back
        assert_eq!(
            reshape("پارس ب"),
            format!("پارس {}", chars(&[0xfe8f]))
        );
    }

    #[test]
    fn test_shape_reverses_arabic_run() {
        assert_eq!(
            shape_arabic("بيروت"),
            chars(&[0xfe95, 0xfeed, 0xfeae, 0xfef4, 0xfe91])
        );
    }

    #[test]
    fn test_shape_keeps_latin_order() {
        let shaped = shape_arabic("بيروت Beirut");

        assert_eq!(
            shaped,
            format!("Beirut {}", chars(&[0xfe95, 0xfeed, 0xfeae, 0xfef4, 0xfe91]))
        );
    }

    #[test]
    fn test_shape_keeps_digit_order() {
        // ain alef meem, then a year
        assert_eq!(
            shape_arabic("عام 2025"),
            format!("2025 {}", chars(&[0xfee1, 0xfe8e, 0xfecb]))
        );
    }

    #[test]
    fn test_shape_keeps_marks_on_their_letter() {
        // beh + kasra + teh: the kasra stays right after beh once reversed
        assert_eq!(shape_arabic("بِت"), chars(&[0xfe96, 0xfe91, 0x0650]));
        assert_eq!(shape_arabic("لَا"), chars(&[0xfefb, 0x064e]));
    }

    #[test]
    fn test_shape_mirrors_brackets() {
        let shaped = shape_arabic("بيروت (لبنان)");

        assert!(shaped.starts_with('('));
        assert_eq!(
            shaped,
            format!(
                "({}) {}",
                chars(&[0xfee5, 0xfe8e, 0xfee8, 0xfe92, 0xfedf]),
                chars(&[0xfe95, 0xfeed, 0xfeae, 0xfef4, 0xfe91])
            )
        );
    }

    #[test]
    fn test_shape_leaves_ltr_brackets_alone() {
        assert_eq!(shape_arabic("(1)"), "(1)");
        assert_eq!(
            shape_arabic("بيروت (Beirut)"),
            format!("(Beirut) {}", chars(&[0xfe95, 0xfeed, 0xfeae, 0xfef4, 0xfe91]))
        );
    }

    #[test]
    fn test_shape_unsupported_still_reordered() {
        let expected: String = "پارس".chars().rev().collect();

        assert_eq!(shape_arabic("پارس"), expected);
    }

    #[test]
    fn test_shape_without_arabic_is_identity() {
        assert_eq!(shape_arabic("00:00"), "00:00");
        assert_eq!(shape_arabic("Beirut, Lebanon"), "Beirut, Lebanon");
    }

    #[test]
    fn test_shape_is_deterministic() {
        let text = "بيروت, محافظة بيروت, لبنان";

        assert_eq!(shape_arabic(text), shape_arabic(text));
    }
}
