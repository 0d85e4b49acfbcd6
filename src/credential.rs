use std::fmt;

/// API key for the completion service.
///
/// Held only for the duration of a session and never printed: `Debug` and
/// `Display` are redacted so the key cannot leak through log fields.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` when no key was entered. The key is kept as given.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new(String::new()).is_none());
    }

    #[test]
    fn keeps_key_exactly_as_supplied() {
        let credential = Credential::new(" sk-abc \n").unwrap();
        assert_eq!(credential.expose(), " sk-abc \n");

        let credential = Credential::new("   ").unwrap();
        assert_eq!(credential.expose(), "   ");
    }

    #[test]
    fn never_formats_the_secret() {
        let credential = Credential::new("sk-secret").unwrap();
        assert!(!format!("{credential:?}").contains("sk-secret"));
        assert!(!format!("{credential}").contains("sk-secret"));
    }
}
