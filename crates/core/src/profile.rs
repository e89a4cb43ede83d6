//! Site profiles: per-directory DOM knowledge.
//!
//! A [`SiteProfile`] bundles everything the engine needs to know about one
//! directory's markup: the card root selector, the origin used to absolutize
//! profile links, and the per-field selector cascades. Built-in profiles
//! cover the directories this tool grew up on; [`SiteProfile::for_url`] picks
//! one by host hint, falling back to a deliberately loose generic profile.
//!
//! Profiles are plain serde structs, so a custom one can be loaded from a
//! JSON file with [`SiteProfile::from_json_file`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::{Origin, Url};

use crate::selectors::FieldSelectors;
use crate::{ExpositorError, Result};

/// DOM knowledge for one directory site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Short identifier, e.g. `"imts"`.
    pub name: String,

    /// Substrings matched against the target URL by [`SiteProfile::matches`].
    pub host_hints: Vec<String>,

    /// Selector identifying one listing card. May itself be a comma-combined
    /// list for loosely-shaped sites.
    pub card_selector: String,

    /// Origin prefixed onto relative profile hrefs. Empty means "derive from
    /// the target URL at harvest time" (see [`SiteProfile::origin_for`]).
    pub origin: String,

    /// Per-field candidate cascades.
    pub selectors: FieldSelectors,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self::generic()
    }
}

impl SiteProfile {
    /// The IMTS exhibitor gallery.
    pub fn imts() -> Self {
        Self {
            name: "imts".to_string(),
            host_hints: vec!["directory.imts.com".to_string()],
            card_selector: ".directory-item".to_string(),
            origin: "https://directory.imts.com".to_string(),
            selectors: FieldSelectors::default(),
        }
    }

    /// The Interphex exhibitor list.
    pub fn interphex() -> Self {
        let selectors = FieldSelectors {
            name: vec![
                ".m-exhibitors-list__items__item__header__title".to_string(),
                "h3".to_string(),
                "h2".to_string(),
                ".title".to_string(),
                ".name".to_string(),
            ],
            booth: vec![
                ".m-exhibitors-list__items__item__header__stand".to_string(),
                ".booth".to_string(),
                ".stand".to_string(),
                "[class*='booth']".to_string(),
                "[class*='stand']".to_string(),
            ],
            ..FieldSelectors::default()
        };

        Self {
            name: "interphex".to_string(),
            host_hints: vec!["interphex.com".to_string()],
            card_selector: ".m-exhibitors-list__items__item".to_string(),
            origin: String::new(),
            selectors,
        }
    }

    /// Loose fallback for directories without a dedicated profile.
    pub fn generic() -> Self {
        let selectors = FieldSelectors {
            name: vec![
                "h1".to_string(),
                "h2".to_string(),
                "h3".to_string(),
                "h4".to_string(),
                ".title".to_string(),
                ".name".to_string(),
                ".company".to_string(),
                ".company-name".to_string(),
                "a".to_string(),
            ],
            booth: vec![
                ".booth".to_string(),
                ".stand".to_string(),
                "[class*='booth']".to_string(),
                "[class*='stand']".to_string(),
            ],
            ..FieldSelectors::default()
        };

        Self {
            name: "generic".to_string(),
            host_hints: Vec::new(),
            card_selector: ".exhibitor, .company, .vendor, .directory-item, [class*='exhibitor'], [class*='card'], li.card, .list-item"
                .to_string(),
            origin: String::new(),
            selectors,
        }
    }

    /// Looks up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "imts" => Some(Self::imts()),
            "interphex" => Some(Self::interphex()),
            "generic" => Some(Self::generic()),
            _ => None,
        }
    }

    /// Picks the first built-in profile whose host hints match `url`,
    /// falling back to [`SiteProfile::generic`].
    pub fn for_url(url: &str) -> Self {
        [Self::imts(), Self::interphex()]
            .into_iter()
            .find(|profile| profile.matches(url))
            .unwrap_or_else(Self::generic)
    }

    /// Whether any host hint occurs in `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.host_hints.iter().any(|hint| url.contains(hint.as_str()))
    }

    /// Resolves the origin used to absolutize relative profile hrefs.
    ///
    /// Prefers the profile's fixed origin; otherwise derives scheme + host
    /// from the target URL. Non-URL inputs (local files, stdin) yield an
    /// empty origin, leaving relative hrefs untouched apart from the prefix.
    pub fn origin_for(&self, url: &str) -> String {
        if !self.origin.is_empty() {
            return self.origin.clone();
        }

        match Url::parse(url) {
            Ok(parsed) => match parsed.origin() {
                tuple @ Origin::Tuple(..) => tuple.ascii_serialization(),
                Origin::Opaque(_) => String::new(),
            },
            Err(_) => String::new(),
        }
    }

    /// Loads a profile from a JSON file.
    ///
    /// Missing fields fall back to the generic profile's values, so a file
    /// only needs to spell out what differs.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExpositorError::FileNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| ExpositorError::ConfigError(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_for_url_matches_imts() {
        let profile = SiteProfile::for_url("https://directory.imts.com/8_0/explore/exhibitor-gallery.cfm");
        assert_eq!(profile.name, "imts");
        assert_eq!(profile.card_selector, ".directory-item");
        assert_eq!(profile.origin, "https://directory.imts.com");
    }

    #[test]
    fn test_for_url_matches_interphex() {
        let profile = SiteProfile::for_url("https://www.interphex.com/en/attend/exhibitor-list.html");
        assert_eq!(profile.name, "interphex");
        assert!(profile.selectors.booth.contains(&"[class*='stand']".to_string()));
    }

    #[test]
    fn test_for_url_falls_back_to_generic() {
        let profile = SiteProfile::for_url("https://expo.example.com/exhibitors");
        assert_eq!(profile.name, "generic");
        assert!(profile.card_selector.contains("[class*='exhibitor']"));
    }

    #[test]
    fn test_for_url_on_file_path_is_generic() {
        let profile = SiteProfile::for_url("tests/fixtures/directory.html");
        assert_eq!(profile.name, "generic");
    }

    #[test]
    fn test_builtin_lookup() {
        assert!(SiteProfile::builtin("imts").is_some());
        assert!(SiteProfile::builtin("interphex").is_some());
        assert!(SiteProfile::builtin("tradeshow-9000").is_none());
    }

    #[test]
    fn test_origin_for_prefers_fixed_origin() {
        let profile = SiteProfile::imts();
        assert_eq!(profile.origin_for("https://mirror.example.com/page"), "https://directory.imts.com");
    }

    #[test]
    fn test_origin_for_derives_from_url() {
        let profile = SiteProfile::generic();
        assert_eq!(
            profile.origin_for("https://expo.example.com/list?page=1"),
            "https://expo.example.com"
        );
    }

    #[test]
    fn test_origin_for_non_url_input_is_empty() {
        let profile = SiteProfile::generic();
        assert_eq!(profile.origin_for("fixtures/directory.html"), "");
        assert_eq!(profile.origin_for("-"), "");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "name": "medtec", "host_hints": ["medtec.example.com"], "card_selector": ".exhibitor-tile" }}"#
        )
        .unwrap();

        let profile = SiteProfile::from_json_file(file.path()).unwrap();
        assert_eq!(profile.name, "medtec");
        assert_eq!(profile.card_selector, ".exhibitor-tile");
        // Unspecified fields come from the generic profile.
        assert_eq!(profile.selectors.description, SiteProfile::generic().selectors.description);
    }

    #[test]
    fn test_from_json_file_missing() {
        let result = SiteProfile::from_json_file("/nonexistent/profile.json");
        assert!(matches!(result, Err(ExpositorError::FileNotFound(_))));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = SiteProfile::from_json_file(file.path());
        assert!(matches!(result, Err(ExpositorError::ConfigError(_))));
    }
}
