//! Font discovery and per-language family selection.
//!
//! A [`FontInventory`] is built once per run from a bundled fonts directory and
//! (optionally) the system font set. [`FontResolver`] walks each language's
//! fallback chain against it and caches the chosen family.

pub mod fallbacks;

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow, bail};
use fontcull_read_fonts::FileRef;
use fontcull_skrifa::{MetadataProvider, string::StringId};
use fontdb::Database;
use glob::{Pattern, glob};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Serialize, Serializer};
use tracing::{debug, info, info_span, warn};

use crate::language::Language;

pub use fallbacks::chain_for;

/// Relative location of the fonts shipped with the project.
pub const BUNDLED_FONTS_DIR: &str = "fonts";

const FONT_PATTERNS: [&str; 2] = ["*.ttf", "*.otf"];

/// The family handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Named(String),
    /// No preferred family is installed; the renderer uses its own default.
    SystemDefault,
}

impl FontFamily {
    pub const SYSTEM_DEFAULT_NAME: &'static str = "sans-serif";

    pub fn as_str(&self) -> &str {
        match self {
            FontFamily::Named(name) => name,
            FontFamily::SystemDefault => Self::SYSTEM_DEFAULT_NAME,
        }
    }

    pub fn is_system_default(&self) -> bool {
        matches!(self, FontFamily::SystemDefault)
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FontFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Families known to be usable in this run.
///
/// Bundled font files are parsed for their family names and registered with a
/// [`fontdb::Database`], which the renderer can draw from.
pub struct FontInventory {
    /// lowercase family name -> name as reported by the font
    families: FxHashMap<String, String>,
    registered: FxHashSet<PathBuf>,
    database: Database,
}

impl Default for FontInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl FontInventory {
    pub fn new() -> Self {
        Self {
            families: FxHashMap::default(),
            registered: FxHashSet::default(),
            database: Database::new(),
        }
    }

    /// Scan the bundled directory and, when enabled, the system fonts.
    pub fn discover(fonts_dir: &Path, system_fonts: bool) -> Self {
        let mut inventory = Self::new();

        inventory.scan_directory(fonts_dir);

        if system_fonts {
            inventory.load_system_fonts();
        }

        inventory
    }

    /// Mark a family as present without a backing file.
    pub fn insert_family(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.families.entry(name.to_lowercase()).or_insert(name);
    }

    pub fn contains(&self, family: &str) -> bool {
        self.families.contains_key(&family.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.values().map(String::as_str)
    }

    /// Font data registered so far, for the renderer.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Register every `.ttf`/`.otf` file directly inside `dir`.
    ///
    /// Unreadable or malformed files are logged and skipped. Returns the
    /// number of newly registered files.
    pub fn scan_directory(&mut self, dir: &Path) -> usize {
        let span = info_span!("scan_fonts", dir = %dir.display());
        let _enter = span.enter();

        if !dir.is_dir() {
            debug!("Fonts directory {:?} does not exist, skipping", dir);
            return 0;
        }

        let mut paths = Vec::new();

        for pattern in FONT_PATTERNS {
            let Some(dir_str) = dir.to_str() else {
                warn!("Fonts directory {:?} is not valid UTF-8, skipping", dir);
                return 0;
            };
            let pattern = Path::new(&Pattern::escape(dir_str)).join(pattern);
            let pattern = pattern.to_string_lossy();

            match glob(&pattern) {
                Ok(entries) => paths.extend(entries.filter_map(|entry| entry.ok())),
                Err(e) => warn!("Invalid font glob pattern {pattern:?}: {e}"),
            }
        }

        paths.sort();

        let mut count = 0;
        let mut names = Vec::new();

        for path in paths.iter().filter(|p| p.is_file()) {
            match self.register_font_file(path) {
                Ok(families) if families.is_empty() => {}
                Ok(families) => {
                    count += 1;
                    names.extend(families);
                }
                Err(e) => warn!("Could not register font {:?}: {e:#}", path),
            }
        }

        if !names.is_empty() {
            info!("Registered bundled fonts: {}", names.join(", "));
        }

        count
    }

    /// Parse and register a single font file.
    ///
    /// Registering the same file twice is a no-op and returns no families.
    pub fn register_font_file(&mut self, path: &Path) -> Result<Vec<String>> {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());

        if self.registered.contains(&key) {
            debug!("Font {:?} already registered", path);
            return Ok(Vec::new());
        }

        let data = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
        let families =
            family_names(&data).with_context(|| format!("Failed to parse {:?}", path))?;

        self.database.load_font_data(data);

        for family in &families {
            self.insert_family(family.clone());
        }

        self.registered.insert(key);

        Ok(families)
    }

    /// Add the families installed on this machine.
    #[cfg(feature = "system-fonts")]
    pub fn load_system_fonts(&mut self) {
        self.database.load_system_fonts();

        let names: Vec<String> = self
            .database
            .faces()
            .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
            .collect();

        for name in names {
            self.insert_family(name);
        }

        info!(
            "Loaded {} system font faces, {} families known",
            self.database.len(),
            self.families.len()
        );
    }

    #[cfg(not(feature = "system-fonts"))]
    pub fn load_system_fonts(&mut self) {
        debug!("System font discovery disabled at build time");
    }
}

/// Family names (name ID 1) of every font in a font file or collection.
fn family_names(data: &[u8]) -> Result<Vec<String>> {
    let file = FileRef::new(data).map_err(|e| anyhow!("Failed to parse font file: {:?}", e))?;

    let mut names = Vec::new();

    for font in file.fonts() {
        let font = font.map_err(|e| anyhow!("Failed to load font: {:?}", e))?;

        if let Some(name) = font
            .localized_strings(StringId::FAMILY_NAME)
            .english_or_first()
        {
            let name = name.to_string();
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
    }

    if names.is_empty() {
        bail!("No family name found");
    }

    Ok(names)
}

/// Families of `language`'s chain that are present, in chain order.
pub fn available_chain(language: Language, inventory: &FontInventory) -> Vec<&'static str> {
    chain_for(language)
        .iter()
        .copied()
        .filter(|family| inventory.contains(family))
        .collect()
}

/// First family of `language`'s fallback chain present in `inventory`.
///
/// Never fails: with no match the system default sentinel is returned.
pub fn resolve_font(language: Language, inventory: &FontInventory) -> FontFamily {
    match chain_for(language)
        .iter()
        .find(|family| inventory.contains(family))
    {
        Some(family) => FontFamily::Named(family.to_string()),
        None => FontFamily::SystemDefault,
    }
}

/// Per-language font choice, resolved once and reused for the whole run.
#[derive(Debug, Clone)]
pub struct FontResolver {
    resolved: FxHashMap<Language, FontFamily>,
}

impl FontResolver {
    pub fn new(inventory: &FontInventory) -> Self {
        let mut resolved = FxHashMap::default();

        for language in Language::ALL {
            let family = resolve_font(language, inventory);

            if family.is_system_default() {
                warn!(
                    "No preferred font found for {} text, falling back to the system default",
                    language
                );
            } else {
                let chain = available_chain(language, inventory);
                info!(
                    "Using font fallback chain for {}: {}",
                    language,
                    chain.iter().take(3).copied().collect::<Vec<_>>().join(", ")
                );
            }

            resolved.insert(language, family);
        }

        Self { resolved }
    }

    pub fn family(&self, language: Language) -> &FontFamily {
        static SYSTEM_DEFAULT: FontFamily = FontFamily::SystemDefault;

        self.resolved.get(&language).unwrap_or(&SYSTEM_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory(families: &[&str]) -> FontInventory {
        let mut inventory = FontInventory::new();
        for family in families {
            inventory.insert_family(*family);
        }
        inventory
    }

    #[test]
    fn test_resolve_first_available_in_chain_order() {
        let inventory = inventory(&["DejaVu Sans", "Noto Sans Arabic", "Amiri"]);

        assert_eq!(
            resolve_font(Language::Arabic, &inventory),
            FontFamily::Named("Noto Sans Arabic".into())
        );
        assert_eq!(
            resolve_font(Language::English, &inventory),
            FontFamily::Named("DejaVu Sans".into())
        );
        assert_eq!(
            resolve_font(Language::Japanese, &inventory),
            FontFamily::Named("DejaVu Sans".into())
        );
    }

    #[test]
    fn test_resolve_prefers_cjk_family_for_japanese() {
        let inventory = inventory(&["Arial", "Meiryo", "Noto Sans CJK JP"]);

        assert_eq!(
            resolve_font(Language::Japanese, &inventory).as_str(),
            "Noto Sans CJK JP"
        );
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let inventory = inventory(&["dejavu sans"]);

        assert_eq!(
            resolve_font(Language::English, &inventory).as_str(),
            "DejaVu Sans"
        );
    }

    #[test]
    fn test_resolve_without_match_returns_sentinel() {
        let inventory = FontInventory::new();

        for language in Language::ALL {
            let family = resolve_font(language, &inventory);

            assert!(family.is_system_default());
            assert!(!family.as_str().is_empty());
        }
    }

    #[test]
    fn test_resolver_caches_every_language() {
        let resolver = FontResolver::new(&inventory(&["Amiri", "Liberation Sans"]));

        assert_eq!(resolver.family(Language::Arabic).as_str(), "Amiri");
        assert_eq!(resolver.family(Language::English).as_str(), "Liberation Sans");
        assert_eq!(resolver.family(Language::Japanese).as_str(), "Liberation Sans");
    }

    #[test]
    fn test_available_chain_keeps_order() {
        let inventory = inventory(&["FreeSans", "Arial", "Noto Sans"]);

        assert_eq!(
            available_chain(Language::English, &inventory),
            vec!["Noto Sans", "Arial", "FreeSans"]
        );
    }

    #[test]
    fn test_chains_end_in_generic_fallbacks() {
        for language in Language::ALL {
            assert_eq!(chain_for(language).last(), Some(&"FreeSans"));
        }
        assert!(chain_for(Language::Japanese).len() >= 15);
    }

    #[test]
    fn test_scan_skips_unreadable_files() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("broken.ttf"), b"not a font")?;
        fs::write(dir.path().join("also-broken.otf"), [0u8; 16])?;
        fs::write(dir.path().join("readme.txt"), b"fonts go here")?;

        let mut inventory = FontInventory::new();

        assert_eq!(inventory.scan_directory(dir.path()), 0);
        assert!(inventory.is_empty());

        Ok(())
    }

    #[test]
    fn test_scan_missing_directory() {
        let mut inventory = FontInventory::new();

        assert_eq!(
            inventory.scan_directory(Path::new("definitely/not/a/fonts/dir")),
            0
        );
    }

    #[test]
    fn test_register_font_file_is_idempotent() -> anyhow::Result<()> {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/SunchartTest.ttf");

        let dir = tempfile::tempdir()?;
        fs::copy(&fixture, dir.path().join("SunchartTest.ttf"))?;

        let mut inventory = FontInventory::new();

        assert_eq!(inventory.scan_directory(dir.path()), 1);
        assert!(inventory.contains("Sunchart Test"));
        assert!(inventory.contains("sunchart test"));
        let faces = inventory.database().len();

        assert_eq!(inventory.scan_directory(dir.path()), 0);
        assert_eq!(inventory.database().len(), faces);
        assert_eq!(inventory.len(), 1);

        // same file through a different path
        assert!(
            inventory
                .register_font_file(&dir.path().join(".").join("SunchartTest.ttf"))?
                .is_empty()
        );

        Ok(())
    }

    #[test]
    fn test_scan_directory_with_glob_metacharacters() -> anyhow::Result<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("fonts [bundled]*?");
        fs::create_dir(&dir)?;
        fs::copy(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/SunchartTest.ttf"),
            dir.join("SunchartTest.ttf"),
        )?;

        let mut inventory = FontInventory::new();

        assert_eq!(inventory.scan_directory(&dir), 1);
        assert!(inventory.contains("Sunchart Test"));

        Ok(())
    }
}
