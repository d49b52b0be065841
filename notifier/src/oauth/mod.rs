//! OAuth2 authentication artifacts for Outlook mail servers.

pub mod outlook;

pub use outlook::OutlookTokenClient;

use crate::errors::TokenError;
use async_trait::async_trait;

/// Produces the SASL XOAUTH2 string a mail server authenticates with.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn generate_oauth2_string(
        &self,
        user: &str,
        refresh_token: &str,
    ) -> Result<String, TokenError>;
}

/// `user=<user>^Aauth=Bearer <token>^A^A`
pub fn xoauth2_string(user: &str, access_token: &str) -> String {
    format!("user={}\x01auth=Bearer {}\x01\x01", user, access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xoauth2_string_layout() {
        assert_eq!(
            xoauth2_string("ops@example.com", "abc"),
            "user=ops@example.com\u{1}auth=Bearer abc\u{1}\u{1}"
        );
    }
}
