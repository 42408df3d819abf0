use std::time::Duration;

use axum::extract::FromRef;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error};

use crate::state::AppState;

pub const NOTICE_COOKIE: &str = "fitlog_notice";
const NOTICE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Danger,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeLevel::Success => "success",
            NoticeLevel::Danger => "danger",
        }
    }
}

/// Message shown once on the next rendered form page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct NoticeClaims {
    level: NoticeLevel,
    message: String,
    iat: usize,
    exp: usize,
}

/// Signs and verifies notice cookies with the configured session secret.
#[derive(Clone)]
pub struct NoticeKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl FromRef<AppState> for NoticeKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.session_secret)
    }
}

impl NoticeKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: NOTICE_TTL,
        }
    }

    pub fn sign(&self, notice: &Notice) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = NoticeClaims {
            level: notice.level,
            message: notice.message.clone(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Notice> {
        let data = decode::<NoticeClaims>(token, &self.decoding, &Validation::default())?;
        Ok(Notice {
            level: data.claims.level,
            message: data.claims.message,
        })
    }
}

/// Stores `notice` in the jar for the next page render. A signing failure
/// drops the notice rather than the response.
pub fn attach(jar: CookieJar, keys: &NoticeKeys, notice: &Notice) -> CookieJar {
    match keys.sign(notice) {
        Ok(token) => jar.add(
            Cookie::build((NOTICE_COOKIE, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            error!(error = %e, "sign notice failed");
            jar
        }
    }
}

/// Reads the pending notice, if any, and clears it.
pub fn take(jar: CookieJar, keys: &NoticeKeys) -> (CookieJar, Option<Notice>) {
    let Some(cookie) = jar.get(NOTICE_COOKIE) else {
        return (jar, None);
    };
    let notice = match keys.verify(cookie.value()) {
        Ok(n) => Some(n),
        Err(e) => {
            debug!(error = %e, "ignoring invalid notice cookie");
            None
        }
    };
    (jar.remove(Cookie::build(NOTICE_COOKIE).path("/")), notice)
}
