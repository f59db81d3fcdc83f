//! Common response shapes of the Aliyun RPC APIs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body of a successful call that carries no payload besides the request id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Response {
    pub request_id: String,
}

/// Error payload returned with a non-2xx status.
///
/// `status_code` is not part of the body; the client fills it in from the
/// HTTP response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "PascalCase", default)]
#[error(
    "Aliyun API error: RequestId: {request_id}, Status Code: {status_code}, Code: {code}, Message: {message}"
)]
pub struct ErrorResponse {
    pub request_id: String,
    pub recommend: String,
    pub host_id: String,
    pub code: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_deserialize() {
        let json = r#"{
            "RequestId": "B2E7E3A8-1C7B-4AEB-8D2B-7F3B34D1A1A0",
            "HostId": "live.aliyuncs.com",
            "Code": "Forbidden.RAM",
            "Message": "User not authorized to operate on the specified resource.",
            "Recommend": "https://error-center.aliyun.com/status/search?Keyword=Forbidden.RAM"
        }"#;
        let resp: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.request_id, "B2E7E3A8-1C7B-4AEB-8D2B-7F3B34D1A1A0");
        assert_eq!(resp.host_id, "live.aliyuncs.com");
        assert_eq!(resp.code, "Forbidden.RAM");
        assert!(resp.recommend.starts_with("https://error-center"));
        assert_eq!(resp.status_code, 0);
    }

    #[test]
    fn test_error_response_display_contains_fields() {
        let resp = ErrorResponse {
            request_id: "req-1".to_string(),
            code: "InvalidDomain.NotFound".to_string(),
            message: "The domain provided does not exist in our records.".to_string(),
            status_code: 404,
            ..Default::default()
        };
        let msg = resp.to_string();
        assert!(msg.contains("req-1"));
        assert!(msg.contains("404"));
        assert!(msg.contains("InvalidDomain.NotFound"));
        assert!(msg.contains("The domain provided does not exist in our records."));
    }

    #[test]
    fn test_response_missing_fields_default() {
        let resp: Response = serde_json::from_str("{}").unwrap();
        assert_eq!(resp, Response::default());
    }
}
