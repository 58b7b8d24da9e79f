use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Output language of a chart. Selects labels, numerals, shaping and fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Arabic,
    Japanese,
}

/// Script family used to pick a font fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptClass {
    Latin,
    Arabic,
    Cjk,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Arabic, Language::Japanese];

    pub fn script(self) -> ScriptClass {
        match self {
            Language::English => ScriptClass::Latin,
            Language::Arabic => ScriptClass::Arabic,
            Language::Japanese => ScriptClass::Cjk,
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Arabic
    }

    /// Lowercase name, also used as the output file suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Arabic => "arabic",
            Language::Japanese => "japanese",
        }
    }

    /// English charts carry no suffix in their file name.
    pub fn file_suffix(self) -> Option<&'static str> {
        match self {
            Language::English => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "arabic" | "ar" => Ok(Language::Arabic),
            "japanese" | "ja" | "jp" => Ok(Language::Japanese),
            other => Err(Error::UnknownLanguage(other.to_string())),
        }
    }
}
