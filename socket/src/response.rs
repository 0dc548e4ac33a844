use serde::Serialize;
use serde_json::Value;

/// The answer to a socket request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Response {
    pub const SUCCESS: u16 = 200;
    pub const ERROR: u16 = 500;

    pub fn success() -> Self {
        Self::new(Self::SUCCESS, "success")
    }

    pub fn success_with(data: impl Into<Value>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::success()
        }
    }

    pub fn bad_request() -> Self {
        Self::new(Self::ERROR, "bad request")
    }

    pub fn bad_request_method() -> Self {
        Self::new(Self::ERROR, "bad request method")
    }

    pub fn unknown_route() -> Self {
        Self::new(Self::ERROR, "unknown route")
    }

    fn new(code: u16, message: &str) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}
