//! One-shot status messages carried across a redirect.
//!
//! Messages live in the `flash` cookie as a base64url-encoded JSON list. A
//! redirecting handler appends to it, the next rendered page drains it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

fn decode(value: &str) -> Option<Vec<Flash>> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn encode(flashes: &[Flash]) -> Option<String> {
    serde_json::to_vec(flashes).ok().map(|bytes| URL_SAFE_NO_PAD.encode(bytes))
}

fn read(jar: &CookieJar) -> Vec<Flash> {
    match jar.get(FLASH_COOKIE) {
        Some(c) => decode(c.value()).unwrap_or_else(|| {
            debug!(event = "flash_cookie_malformed", "ignoring malformed flash cookie");
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// Queue a message for the next rendered page.
pub fn push(jar: CookieJar, kind: FlashKind, message: impl Into<String>) -> CookieJar {
    let mut flashes = read(&jar);
    flashes.push(Flash { kind, message: message.into() });
    let Some(value) = encode(&flashes) else { return jar };
    let mut cookie = Cookie::new(FLASH_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    jar.add(cookie)
}

pub fn success(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    push(jar, FlashKind::Success, message)
}

pub fn error(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    push(jar, FlashKind::Error, message)
}

/// Drain queued messages; the returned jar expires the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let flashes = read(&jar);
    let mut cookie = Cookie::from(FLASH_COOKIE);
    cookie.set_path("/");
    (jar.remove(cookie), flashes)
}
