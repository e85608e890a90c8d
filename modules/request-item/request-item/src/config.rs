//! Configuration for the request item module.

use serde::Deserialize;

/// Configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RequestItemConfig {
    /// Repository name quoted in request emails.
    pub site_name: String,

    /// Help desk address quoted in request emails.
    pub helpdesk_email: String,

    /// Locale of outgoing templates. `None` uses the default templates.
    pub locale: Option<String>,

    /// Locale the unsuffixed templates are written in.
    pub default_locale: String,

    /// Shown in place of a file name when all files are requested.
    pub all_files_label: String,

    /// Prepended to handles to form resolvable URLs.
    pub canonical_handle_prefix: String,
}

impl Default for RequestItemConfig {
    fn default() -> Self {
        Self {
            site_name: "Repository".to_owned(),
            helpdesk_email: String::new(),
            locale: None,
            default_locale: "en".to_owned(),
            all_files_label: "all files".to_owned(),
            canonical_handle_prefix: "https://hdl.handle.net/".to_owned(),
        }
    }
}

impl RequestItemConfig {
    /// Localized template name, e.g. `request_item.author_de`.
    ///
    /// The default locale and any variant of it use the unsuffixed name.
    #[must_use]
    pub fn template_name(&self, base: &str) -> String {
        let language = self
            .locale
            .as_deref()
            .map(|l| l.split(['_', '-']).next().unwrap_or(l).to_lowercase())
            .filter(|l| !l.is_empty());

        match language {
            Some(lang) if !lang.eq_ignore_ascii_case(&self.default_locale) => {
                format!("{base}_{lang}")
            }
            _ => base.to_owned(),
        }
    }
}
