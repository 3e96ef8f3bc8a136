//! User-facing message text
//!
//! Messages are looked up by key in `.properties` bundles embedded in the
//! binary. A locale bundle falls back to the root bundle, and a key missing
//! from both renders as `!key!`.

use rustc_hash::FxHashMap;
use std::sync::LazyLock;

const ROOT_BUNDLE: &str = include_str!("messages.properties");

/// Locale tag -> bundle source
const LOCALE_BUNDLES: &[(&str, &str)] = &[("de", include_str!("messages_de.properties"))];

static ROOT_CATALOG: LazyLock<MessageCatalog> = LazyLock::new(MessageCatalog::root);

/// Look up `key` in the root catalog
pub fn get_string(key: &str) -> String {
    ROOT_CATALOG.get(key)
}

/// A parsed message bundle with an optional locale overlay
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: Option<String>,
    overlay: FxHashMap<String, String>,
    root: FxHashMap<String, String>,
}

impl MessageCatalog {
    /// Catalog with only the root bundle
    pub fn root() -> Self {
        MessageCatalog {
            locale: None,
            overlay: FxHashMap::default(),
            root: parse_bundle(ROOT_BUNDLE),
        }
    }

    /// Catalog for a locale tag such as `de` or `de-AT`
    ///
    /// The language part of the tag selects the bundle. Unknown locales
    /// behave like the root catalog.
    pub fn for_locale(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        let overlay = LOCALE_BUNDLES
            .iter()
            .find(|(locale, _)| *locale == language)
            .map(|(_, source)| parse_bundle(source))
            .unwrap_or_default();

        MessageCatalog {
            locale: Some(tag.to_string()),
            overlay,
            root: parse_bundle(ROOT_BUNDLE),
        }
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Message for `key`, or `!key!` if no bundle defines it
    pub fn get(&self, key: &str) -> String {
        self.overlay
            .get(key)
            .or_else(|| self.root.get(key))
            .cloned()
            .unwrap_or_else(|| format!("!{}!", key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.overlay.contains_key(key) || self.root.contains_key(key)
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::root()
    }
}

/// Parse `key=value` lines; `#` and `!` start comments
fn parse_bundle(source: &str) -> FxHashMap<String, String> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .filter_map(|line| {
            let (key, value) = line.split_once(['=', ':'])?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
