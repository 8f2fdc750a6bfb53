use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The uniform JSON wrapper returned by every endpoint:
/// `{statusCode, message, errorCode?, data?, count?}`.
/// Optional fields are omitted entirely when absent, never null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}
