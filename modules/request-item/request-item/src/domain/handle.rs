use request_item_sdk::HandleService;

/// Resolves handles by prepending a resolver URL.
pub struct PrefixHandleService {
    prefix: String,
}

impl PrefixHandleService {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl HandleService for PrefixHandleService {
    fn canonical_form(&self, handle: &str) -> String {
        format!("{}{handle}", self.prefix)
    }
}
