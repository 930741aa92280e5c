use reqwest::Method;
use serde_json::Value;

/// How a request body goes on the wire. The backend is inconsistent across
/// endpoints (the token endpoints take form pairs, everything else JSON), so
/// the caller declares the encoding instead of the dispatcher inferring it.
#[derive(Debug, Clone)]
pub enum Payload {
    Json(Value),
    Form(Vec<(String, String)>),
}

/// Everything the dispatcher needs for one call: method, fixed path, optional
/// body, and whether a bearer token must be attached first.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub payload: Option<Payload>,
    pub requires_auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            requires_auth: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.payload = Some(Payload::Json(body));
        self
    }

    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.payload = Some(Payload::Form(pairs));
        self
    }

    pub fn authorized(mut self) -> Self {
        self.requires_auth = true;
        self
    }
}
