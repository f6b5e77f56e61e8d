use serde::{Deserialize, Serialize};

/// Client credentials body sent to the tenant token endpoint.
/// Only inspected for logging; the mock accepts anything.
#[derive(Debug, Default, Deserialize)]
pub struct OAuthRequest {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OAuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub ext_expires_in: i64,
    pub token_type: String,
}

impl OAuthResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            expires_in,
            ext_expires_in: expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_response_fields() {
        let resp = OAuthResponse::bearer("tok".into(), 45);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["expires_in"], 45);
        assert_eq!(json["ext_expires_in"], 45);
        assert_eq!(json["token_type"], "Bearer");
    }

    #[test]
    fn test_request_fields_are_optional() {
        let req: OAuthRequest = serde_json::from_str(r#"{"client_id":"abc"}"#).unwrap();
        assert_eq!(req.client_id.as_deref(), Some("abc"));
        assert!(req.grant_type.is_none());
    }
}
