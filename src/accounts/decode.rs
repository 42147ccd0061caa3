//! Request-payload normalization for the account endpoints.
//!
//! Clients in the wild send credentials in several shapes: plain JSON,
//! JSON with the real payload string-encoded under a `data` key, form
//! encoding, and a raw `user:password` line. Each shape gets one decoder;
//! the chain tries them in priority order and the first success wins.

use percent_encoding::percent_decode_str;
use serde_json::Value;

use crate::error::ApiError;

/// Normalized credentials produced by any decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

type Decoder = fn(&str) -> Option<Credentials>;

/// Priority order matters: the JSON shapes are unambiguous, the raw-pair
/// decoder would happily eat anything containing a colon.
const CHAIN: &[Decoder] = &[
    decode_json_direct,
    decode_json_nested,
    decode_form,
    decode_raw_pair,
];

pub fn decode_credentials(body: &str) -> Result<Credentials, ApiError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(ApiError::Validation("request body is empty".to_string()));
    }

    CHAIN
        .iter()
        .find_map(|decode| decode(body))
        .ok_or_else(|| {
            ApiError::Validation(
                "could not decode credentials from request body".to_string(),
            )
        })
}

fn creds_from_value(value: &Value) -> Option<Credentials> {
    let obj = value.as_object()?;
    let username = obj
        .get("username")
        .or_else(|| obj.get("user"))
        .and_then(Value::as_str)?
        .to_string();
    let password = obj
        .get("password")
        .or_else(|| obj.get("pass"))
        .and_then(Value::as_str)?
        .to_string();
    let email = obj
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(Credentials {
        username,
        password,
        email,
    })
}

/// `{"username": "...", "password": "...", "email"?: "..."}`
fn decode_json_direct(body: &str) -> Option<Credentials> {
    let value: Value = serde_json::from_str(body).ok()?;
    creds_from_value(&value)
}

/// `{"data": "{\"username\": ...}"}` — the payload JSON-encoded once more
/// under a wrapper key.
fn decode_json_nested(body: &str) -> Option<Credentials> {
    let value: Value = serde_json::from_str(body).ok()?;
    let inner = value
        .get("data")
        .or_else(|| value.get("payload"))?
        .as_str()?;
    let inner: Value = serde_json::from_str(inner).ok()?;
    creds_from_value(&inner)
}

/// `username=...&password=...&email=...`
fn decode_form(body: &str) -> Option<Credentials> {
    if !body.contains('=') || body.starts_with('{') {
        return None;
    }

    let mut username = None;
    let mut password = None;
    let mut email = None;
    for pair in body.split('&') {
        let (key, raw) = pair.split_once('=')?;
        let decoded = percent_decode_str(&raw.replace('+', " "))
            .decode_utf8()
            .ok()?
            .into_owned();
        match key {
            "username" | "user" => username = Some(decoded),
            "password" | "pass" => password = Some(decoded),
            "email" => email = Some(decoded),
            _ => {}
        }
    }

    Some(Credentials {
        username: username?,
        password: password?,
        email,
    })
}

/// A bare `username:password` line, the oldest client shape.
fn decode_raw_pair(body: &str) -> Option<Credentials> {
    if body.contains('\n') || body.starts_with('{') {
        return None;
    }
    let (username, password) = body.split_once(':')?;
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
        email: None,
    })
}
