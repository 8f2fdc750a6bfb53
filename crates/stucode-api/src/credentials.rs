//! Password hashing and bearer-token signing.

use anyhow::{Result, anyhow};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use stucode_types::api::Claims;

/// Hash a password with Argon2id. `cost` is the time-cost parameter from
/// configuration; memory and parallelism stay at the crate defaults.
pub fn hash_password(plain: &str, cost: u32) -> Result<String> {
    let params = Params::new(Params::DEFAULT_M_COST, cost, Params::DEFAULT_P_COST, None)
        .map_err(|e| anyhow!("invalid argon2 params: {}", e))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::generate(&mut OsRng);
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("password hashing failed: {}", e))?;

    Ok(hash.to_string())
}

/// Compare a plaintext password against a stored PHC hash. The hash string
/// carries its own parameters, so verification is independent of the
/// configured cost.
pub fn verify_password(plain: &str, hash: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(hash).map_err(|e| anyhow!("stored password hash is malformed: {}", e))?;

    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

pub fn sign_token(claims: &Claims, secret: &str) -> Result<String> {
    let token = encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Fails on a bad signature or an expired token.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(exp: usize) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "test@test.com".into(),
            name: Some("test".into()),
            account_id: Uuid::new_v4(),
            exp,
        }
    }

    #[test]
    fn hash_verify_roundtrip() {
        let hash = hash_password("test", 1).unwrap();
        assert_ne!(hash, "test");
        assert!(verify_password("test", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("test", 1).unwrap();
        let second = hash_password("test", 1).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn verify_rejects_malformed_hash() {
        assert!(verify_password("test", "not-a-phc-string").is_err());
    }

    #[test]
    fn token_roundtrip() {
        let exp = (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as usize;
        let claims = claims(exp);

        let token = sign_token(&claims, "secret").unwrap();
        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.email, claims.email);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let exp = (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as usize;
        let token = sign_token(&claims(exp), "secret").unwrap();
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn token_rejects_expiry() {
        // Well past the default validation leeway.
        let exp = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp() as usize;
        let token = sign_token(&claims(exp), "secret").unwrap();
        assert!(verify_token(&token, "secret").is_err());
    }
}
