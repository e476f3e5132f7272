use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Claims carried by every issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub email: String,
    #[serde(rename = "appName")]
    pub app_name: String,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens
///
/// The service owns the signing keys derived from the configured secret, so
/// every handler and the admin gate share one instance through `AppState`.
/// Tokens are stateless: there is no revocation, expiry is the only bound.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    admin_email_domain: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, admin_email_domain: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            admin_email_domain: admin_email_domain.into(),
            ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.token_secret,
            config.admin_email_domain.as_str(),
            Duration::hours(config.token_ttl_hours),
        )
    }

    /// Whether `email` belongs to the trusted admin domain
    ///
    /// Only the part after the last `@` is compared, case-insensitively.
    pub fn is_admin_email(&self, email: &str) -> bool {
        email
            .rsplit_once('@')
            .map(|(_, domain)| domain.eq_ignore_ascii_case(&self.admin_email_domain))
            .unwrap_or(false)
    }

    /// Build the claims for `email` / `app_name`, setting the admin flag from the email domain
    pub fn claims_for(&self, email: &str, app_name: &str) -> Claims {
        let now = Utc::now();
        Claims {
            email: email.to_string(),
            app_name: app_name.to_string(),
            admin: self.is_admin_email(email),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        }
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::default(), claims, &self.encoding_key)
    }

    /// Sign a token for `email` / `app_name`
    pub fn issue(
        &self,
        email: &str,
        app_name: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.sign(&self.claims_for(email, app_name))
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("admin_email_domain", &self.admin_email_domain)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", "turing.io", Duration::days(2))
    }

    #[test]
    fn test_admin_claim_for_trusted_domain() {
        let tokens = service();
        let token = tokens.issue("a@turing.io", "x").unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert!(claims.admin);
        assert_eq!(claims.email, "a@turing.io");
        assert_eq!(claims.app_name, "x");
    }

    #[test]
    fn test_no_admin_claim_for_other_domains() {
        let tokens = service();

        for email in ["a@example.com", "a@turing.io.evil.com", "turing.io", "a@notturing.io"] {
            let token = tokens.issue(email, "x").unwrap();
            assert!(!tokens.verify(&token).unwrap().admin, "{} must not be admin", email);
        }
    }

    #[test]
    fn test_signed_token_carries_built_claims() {
        let tokens = service();
        let claims = tokens.claims_for("a@turing.io", "x");
        let decoded = tokens.verify(&tokens.sign(&claims).unwrap()).unwrap();

        assert_eq!(decoded, claims);
        assert!(decoded.admin);
    }

    #[test]
    fn test_domain_comparison_ignores_case() {
        assert!(service().is_admin_email("Someone@Turing.IO"));
    }

    #[test]
    fn test_expiry_is_two_days_from_issue() {
        let tokens = service();
        let claims = tokens.verify(&tokens.issue("a@turing.io", "x").unwrap()).unwrap();

        assert_eq!(claims.exp - claims.iat, 2 * 24 * 60 * 60);
    }

    #[test]
    fn test_expired_token_fails_verification() {
        let expired = TokenService::new("unit-test-secret", "turing.io", Duration::hours(-1));
        let token = expired.issue("a@turing.io", "x").unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new("another-secret", "turing.io", Duration::days(2));
        let token = other.issue("a@turing.io", "x").unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(service().verify("not-a-token").is_err());
    }
}
