use std::collections::HashMap;

pub const FALLBACK_LOCALE: &str = "en";

const CATALOGS: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.json")),
    ("de", include_str!("../locales/de.json")),
];

/// Message-key lookup for one active locale, falling back to English and
/// then to the key itself. Server messages are not keys, so they pass through.
pub struct Translator {
    locale: String,
    catalogs: HashMap<&'static str, HashMap<String, String>>,
}

impl Translator {
    pub fn new(locale: &str) -> Self {
        let mut catalogs = HashMap::new();
        for (code, raw) in CATALOGS {
            match serde_json::from_str::<HashMap<String, String>>(raw) {
                Ok(messages) => {
                    catalogs.insert(*code, messages);
                }
                Err(e) => tracing::error!(locale = *code, error = %e, "bad message catalog"),
            }
        }
        Self {
            locale: locale.to_string(),
            catalogs,
        }
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        [self.locale.as_str(), FALLBACK_LOCALE]
            .iter()
            .filter_map(|code| self.catalogs.get(*code))
            .find_map(|messages| messages.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    pub fn is_supported(locale: &str) -> bool {
        CATALOGS.iter().any(|(code, _)| *code == locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_active_locale() {
        let t = Translator::new("de");
        assert_eq!(t.t("form:button-label-back"), "Zurück");
    }

    #[test]
    fn falls_back_to_english() {
        let t = Translator::new("fr");
        assert_eq!(t.t("form:button-label-back"), "Back");
        assert!(!Translator::is_supported("fr"));
    }

    #[test]
    fn unknown_key_passes_through() {
        let t = Translator::new("en");
        assert_eq!(t.t("Name taken"), "Name taken");
    }

    #[test]
    fn catalogs_share_keys() {
        let t = Translator::new("en");
        let en = &t.catalogs["en"];
        let de = &t.catalogs["de"];
        let mut missing: Vec<_> = en.keys().filter(|k| !de.contains_key(*k)).collect();
        missing.sort();
        assert!(missing.is_empty(), "missing in de: {missing:?}");
    }
}
