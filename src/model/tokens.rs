#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Accepts any non-blank string. The token is minted and interpreted by
    /// the backend only; the client carries it opaquely.
    pub fn from_str(raw: &str) -> Option<AccessToken> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
