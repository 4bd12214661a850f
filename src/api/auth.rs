//! Mock authentication endpoints / 模拟认证接口
//!
//! Bare-bones collaborator: any credentials log in as the administrator and
//! any well-formed token verifies. Nothing in the query surface depends on
//! these endpoints rejecting a request.

use axum::http::StatusCode;
use axum::Json;
use base64::prelude::*;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::{json, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_SECRET: &str = "auto-discovery-dev-secret-key";
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    #[allow(dead_code)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

/// Signing secret, overridable for deployments / 签名密钥
fn secret() -> Vec<u8> {
    std::env::var("JWT_SECRET")
        .unwrap_or_else(|_| DEFAULT_SECRET.to_string())
        .into_bytes()
}

fn signature(payload_b64: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(&secret()).expect("HMAC accepts any key length");
    mac.update(payload_b64.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Issue a signed token for the mock user / 为模拟用户签发令牌
fn sign_token(username: &str) -> String {
    let now = Utc::now();
    let payload = json!({
        "userId": "admin-001",
        "username": username,
        "role": "administrator",
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        "nonce": hex::encode(rand::random::<[u8; 8]>()),
    });

    let payload_b64 = BASE64_URL_SAFE_NO_PAD.encode(payload.to_string());
    let sig = signature(&payload_b64);
    format!("{}.{}", payload_b64, sig)
}

/// Decode and check a token / 解码并校验令牌
fn verify_token(token: &str) -> Option<Value> {
    let (payload_b64, sig) = token.split_once('.')?;
    if signature(payload_b64) != sig {
        return None;
    }

    let payload: Value =
        serde_json::from_slice(&BASE64_URL_SAFE_NO_PAD.decode(payload_b64).ok()?).ok()?;
    if payload["exp"].as_i64()? < Utc::now().timestamp() {
        return None;
    }
    Some(payload)
}

/// The one user this stub knows / 这个桩只认识一个用户
fn mock_user(username: &str) -> Value {
    json!({
        "id": "admin-001",
        "username": username,
        "email": "admin@auto-discovery.local",
        "role": "administrator",
        "permissions": ["read", "write", "delete", "admin"],
        "createdAt": Utc::now().to_rfc3339(),
    })
}

/// POST /api/auth/v1/login — accepts any credentials / 接受任意凭证
pub async fn login(body: Option<Json<LoginRequest>>) -> Json<Value> {
    let username = body
        .and_then(|Json(req)| req.username)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "admin".to_string());

    let token = sign_token(&username);
    Json(json!({
        "success": true,
        "message": "Authentication successful",
        "token": token,
        "user": mock_user(&username),
    }))
}

/// GET /api/auth/v1/user — always the administrator / 始终返回管理员
pub async fn current_user() -> Json<Value> {
    let mut user = mock_user("admin");
    user["authenticated"] = json!(true);
    Json(json!({
        "success": true,
        "user": user,
    }))
}

/// POST /api/auth/v1/verify
pub async fn verify(
    body: Option<Json<VerifyRequest>>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let token = body
        .and_then(|Json(req)| req.token)
        .filter(|token| !token.is_empty())
        .ok_or((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "valid": false,
                "message": "No token provided",
            })),
        ))?;

    match verify_token(&token) {
        Some(payload) => Ok(Json(json!({
            "valid": true,
            "user": {
                "id": payload["userId"],
                "username": payload["username"],
                "role": payload["role"],
            },
        }))),
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "valid": false,
                "message": "Invalid or expired token",
            })),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let token = sign_token("admin");
        let payload = verify_token(&token).expect("freshly signed token must verify");
        assert_eq!(payload["username"], "admin");
        assert_eq!(payload["role"], "administrator");
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let token = sign_token("admin");
        let mut parts = token.splitn(2, '.');
        let _payload = parts.next().unwrap();
        let sig = parts.next().unwrap();

        let forged_payload = BASE64_URL_SAFE_NO_PAD.encode(
            json!({ "userId": "admin-001", "username": "intruder", "exp": i64::MAX })
                .to_string(),
        );
        assert!(verify_token(&format!("{}.{}", forged_payload, sig)).is_none());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token("not-a-token").is_none());
        assert!(verify_token("a.b").is_none());
    }
}
