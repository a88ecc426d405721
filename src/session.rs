//! Signed session cookie carrying the auth ticket.
//!
//! The cookie value is an HS512 token naming the user, signed with the auth
//! secret. The cookie itself is signed again with a key derived from the
//! session secret, so either secret alone is enough to reject a forgery.

use crate::error::Result;
use actix_web::cookie::{Cookie, CookieJar, Key, SameSite};
use actix_web::HttpRequest;
use chrono::prelude::*;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use std::collections::HashSet;

pub const AUTH_COOKIE: &str = "auth_tkt";

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    #[serde(with = "jwt_numeric_date")]
    pub iat: DateTime<Utc>,
}

impl TokenClaims {
    pub fn new(sub: &str, iat: DateTime<Utc>) -> Self {
        // normalize the timestamp by stripping off sub-second precision
        let iat = Utc
            .timestamp_opt(iat.timestamp(), 0)
            .single()
            .unwrap_or(iat);
        Self {
            sub: sub.to_owned(),
            iat,
        }
    }
}

mod jwt_numeric_date {
    //! `iat` as a NumericDate: whole seconds since the Unix epoch (RFC 7519, section 2).
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(date.timestamp())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Utc.timestamp_opt(i64::deserialize(deserializer)?, 0)
            .single()
            .ok_or_else(|| serde::de::Error::custom("invalid Unix timestamp value"))
    }
}

pub struct SessionSigner {
    cookie_key: Key,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionSigner {
    pub fn new(session_secret: &str, auth_secret: &str) -> Self {
        let cookie_key = Key::from(Sha512::digest(session_secret.as_bytes()).as_slice());
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();
        Self {
            cookie_key,
            encoding_key: EncodingKey::from_secret(auth_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(auth_secret.as_bytes()),
            validation,
        }
    }

    /// Cookie that marks the client as `username`.
    pub fn remember(&self, username: &str) -> Result<Cookie<'static>> {
        let claims = TokenClaims::new(username, Utc::now());
        let ticket = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)?;
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.cookie_key).add(
            Cookie::build(AUTH_COOKIE, ticket)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .finish(),
        );
        let cookie = jar
            .get(AUTH_COOKIE)
            .cloned()
            .unwrap_or_else(|| Cookie::new(AUTH_COOKIE, ""));
        Ok(cookie)
    }

    /// Cookie that clears the session on the client.
    pub fn forget(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(AUTH_COOKIE, "").path("/").finish();
        cookie.make_removal();
        cookie
    }

    /// Username bound to the request's session, if the cookie verifies.
    pub fn identify(&self, req: &HttpRequest) -> Option<String> {
        let cookie = req.cookie(AUTH_COOKIE)?;
        self.verify(cookie)
    }

    pub fn verify(&self, cookie: Cookie<'static>) -> Option<String> {
        let mut jar = CookieJar::new();
        jar.add_original(cookie);
        let verified = jar.signed(&self.cookie_key).get(AUTH_COOKIE)?;
        match decode::<TokenClaims>(verified.value(), &self.decoding_key, &self.validation) {
            Ok(token) => Some(token.claims.sub),
            Err(e) => {
                debug!("rejected auth ticket: {}", e);
                None
            }
        }
    }
}
