//! Static chart wording for every supported language.
//!
//! Strings here are raw: numerals are Western and Arabic is in logical order.
//! [`crate::labels`] turns them into display strings.

use crate::language::Language;

pub const LOCATION_PLACEHOLDER: &str = "{location}";
pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelSet {
    /// Contains `{location}` and `{year}` placeholders.
    pub title: &'static str,
    pub x_axis_label: &'static str,
    pub y_axis_label: &'static str,
    pub legend_sunrise: &'static str,
    pub legend_noon: &'static str,
    pub legend_sunset: &'static str,
    pub month_names: [&'static str; 12],
}

impl LabelSet {
    /// Month name for a 1-based month number.
    pub fn month_name(&self, month: u32) -> Option<&'static str> {
        let idx = usize::try_from(month).ok()?.checked_sub(1)?;
        self.month_names.get(idx).copied()
    }

    /// Fill the title placeholders.
    pub fn format_title(template: &str, location: &str, year: &str) -> String {
        template
            .replace(YEAR_PLACEHOLDER, year)
            .replace(LOCATION_PLACEHOLDER, location)
    }
}

pub const ENGLISH_LABELS: LabelSet = LabelSet {
    title: "{location} - Sunrise and Sunset Graph for {year}",
    x_axis_label: "Gregorian Month",
    y_axis_label: "Time of Day",
    legend_sunrise: "Sunrise",
    legend_noon: "Solar Noon",
    legend_sunset: "Sunset",
    month_names: [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ],
};

// Levantine month names
pub const ARABIC_LABELS: LabelSet = LabelSet {
    title: "{location} - رسم بياني لشروق وغروب الشمس لعام {year}",
    x_axis_label: "الشهر الميلادي",
    y_axis_label: "وقت اليوم",
    legend_sunrise: "شروق الشمس",
    legend_noon: "الظهر",
    legend_sunset: "غروب الشمس",
    month_names: [
        "كانون الثاني",
        "شباط",
        "آذار",
        "نيسان",
        "أيار",
        "حزيران",
        "تموز",
        "آب",
        "أيلول",
        "تشرين الأول",
        "تشرين الثاني",
        "كانون الأول",
    ],
};

pub const JAPANESE_LABELS: LabelSet = LabelSet {
    title: "{location} - {year}年の日の出と日の入りのグラフ",
    x_axis_label: "西暦の月",
    y_axis_label: "時刻",
    legend_sunrise: "日の出",
    legend_noon: "正午",
    legend_sunset: "日の入り",
    month_names: [
        "1月", "2月", "3月", "4月", "5月", "6月", "7月", "8月", "9月", "10月", "11月", "12月",
    ],
};

/// Read-only lookup of [`LabelSet`]s, built once and shared by all pipelines.
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    english: LabelSet,
    arabic: LabelSet,
    japanese: LabelSet,
}

impl Default for LocalizationTable {
    fn default() -> Self {
        Self {
            english: ENGLISH_LABELS,
            arabic: ARABIC_LABELS,
            japanese: JAPANESE_LABELS,
        }
    }
}

impl LocalizationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self, language: Language) -> &LabelSet {
        match language {
            Language::English => &self.english,
            Language::Arabic => &self.arabic,
            Language::Japanese => &self.japanese,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_title_has_both_placeholders() {
        let table = LocalizationTable::new();

        for language in Language::ALL {
            let title = table.labels(language).title;

            assert!(title.contains(LOCATION_PLACEHOLDER), "{language}");
            assert!(title.contains(YEAR_PLACEHOLDER), "{language}");
        }
    }

    #[test]
    fn test_month_name_lookup() {
        let table = LocalizationTable::new();

        assert_eq!(table.labels(Language::English).month_name(1), Some("January"));
        assert_eq!(table.labels(Language::Arabic).month_name(8), Some("آب"));
        assert_eq!(table.labels(Language::Japanese).month_name(12), Some("12月"));
        assert_eq!(table.labels(Language::English).month_name(0), None);
        assert_eq!(table.labels(Language::English).month_name(13), None);
    }

    #[test]
    fn test_format_title() {
        assert_eq!(
            LabelSet::format_title(ENGLISH_LABELS.title, "London", "2025"),
            "London - Sunrise and Sunset Graph for 2025"
        );
    }

    #[test]
    fn test_format_title_does_not_expand_placeholders_in_location() {
        assert_eq!(
            LabelSet::format_title("{location} {year}", "{year}", "2025"),
            "{year} 2025"
        );
    }
}
