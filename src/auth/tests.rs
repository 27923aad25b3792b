//! Tests for auth module
//!
//! Clerk session token verification and company token issuing/verification.

#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    const CLERK_SECRET: &str = "clerk_test_secret";
    const COMPANY_SECRET: &str = "company_test_secret";

    fn config() -> AuthConfig {
        AuthConfig::with_secrets(CLERK_SECRET, COMPANY_SECRET)
    }

    fn clerk_token(secret: &str, sub: &str, exp_offset_secs: i64, azp: Option<&str>) -> String {
        let claims = models::ClerkClaims {
            sub: sub.to_string(),
            exp: (Utc::now().timestamp() + exp_offset_secs) as usize,
            iss: Some("https://clerk.example.com".to_string()),
            azp: azp.map(str::to_string),
            sid: Some("sess_123".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to encode token")
    }

    #[test]
    fn test_valid_clerk_token() {
        let token = clerk_token(CLERK_SECRET, "user_2abc", 3600, None);
        let claims = config().verify_clerk_token(&token).unwrap();
        assert_eq!(claims.sub, "user_2abc");
        assert_eq!(claims.sid.as_deref(), Some("sess_123"));
    }

    #[test]
    fn test_clerk_token_wrong_secret() {
        let token = clerk_token("some_other_secret", "user_2abc", 3600, None);
        assert!(matches!(
            config().verify_clerk_token(&token),
            Err(models::AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_clerk_token() {
        let token = clerk_token(CLERK_SECRET, "user_2abc", -3600, None);
        assert!(config().verify_clerk_token(&token).is_err());
    }

    #[test]
    fn test_clerk_issuer_checked_when_configured() {
        let token = clerk_token(CLERK_SECRET, "user_2abc", 3600, None);

        let matching = config().with_issuer("https://clerk.example.com");
        assert!(matching.verify_clerk_token(&token).is_ok());

        let other = config().with_issuer("https://clerk.other.com");
        assert!(other.verify_clerk_token(&token).is_err());
    }

    #[test]
    fn test_authorized_parties() {
        let config = config().with_authorized_parties(vec!["http://localhost:5173".to_string()]);

        let allowed = clerk_token(CLERK_SECRET, "user_1", 3600, Some("http://localhost:5173"));
        assert!(config.verify_clerk_token(&allowed).is_ok());

        let foreign = clerk_token(CLERK_SECRET, "user_1", 3600, Some("https://evil.example"));
        assert!(matches!(
            config.verify_clerk_token(&foreign),
            Err(models::AuthError::UnauthorizedParty)
        ));

        let missing = clerk_token(CLERK_SECRET, "user_1", 3600, None);
        assert!(config.verify_clerk_token(&missing).is_err());
    }

    #[test]
    fn test_company_token_without_expiry() {
        let token = tokens::issue_company_token(COMPANY_SECRET, "C_ABC123", None).unwrap();
        let claims = config().verify_company_token(&token).unwrap();
        assert_eq!(claims.id, "C_ABC123");
        assert!(claims.exp.is_none());
    }

    #[test]
    fn test_company_token_with_expiry() {
        let token =
            tokens::issue_company_token(COMPANY_SECRET, "C_ABC123", Some(Duration::days(7)))
                .unwrap();
        let claims = config().verify_company_token(&token).unwrap();
        assert!(claims.exp.is_some());
    }

    #[test]
    fn test_expired_company_token_rejected() {
        let token =
            tokens::issue_company_token(COMPANY_SECRET, "C_ABC123", Some(Duration::days(-1)))
                .unwrap();
        assert!(config().verify_company_token(&token).is_err());
    }

    #[test]
    fn test_company_token_wrong_secret() {
        let token = tokens::issue_company_token("not_the_secret", "C_ABC123", None).unwrap();
        assert!(config().verify_company_token(&token).is_err());
    }

    #[test]
    fn test_clerk_token_is_not_a_company_token() {
        // Different secrets keep the two token kinds apart
        let token = clerk_token(CLERK_SECRET, "user_1", 3600, None);
        assert!(config().verify_company_token(&token).is_err());
    }
}
