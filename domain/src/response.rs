use crate::error::Error;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Indentation applied to each line of a logged response body.
const LOG_BODY_INDENT: &str = "               ";

/// A completed exchange with the Rainforest API, handed back as received.
///
/// Non-success statuses are not turned into errors; check `status` or `is_success()`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    /// The raw response body.
    pub text: String,
    /// The response body parsed as JSON, when it parses.
    pub body: Option<Value>,
}

impl ApiResponse {
    pub(crate) fn new(method: Method, path: String, status: StatusCode, text: String) -> Self {
        let body = serde_json::from_str(&text).ok();
        Self {
            method,
            path,
            status,
            text,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Decodes the body into a typed record such as `TestRecord` or `GeneratorRecord`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// The diagnostic rendering used for debug logs: method and path, then the
    /// pretty-printed body.
    pub fn log_line(&self) -> String {
        let rendered = match &self.body {
            Some(body) => serde_json::to_string_pretty(body),
            None => serde_json::to_string_pretty(&self.text),
        }
        .unwrap_or_default();

        let indented = rendered
            .lines()
            .map(|line| format!("{LOG_BODY_INDENT}{line}"))
            .collect::<Vec<_>>()
            .join("\n");

        format!("{} {}\n{}", self.method, self.path, indented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::RemoveTestsResponse;
    use serde_json::json;

    fn response(status: u16, text: &str) -> ApiResponse {
        ApiResponse::new(
            Method::DELETE,
            "/api/1/tests".to_string(),
            StatusCode::from_u16(status).unwrap(),
            text.to_string(),
        )
    }

    #[test]
    fn test_json_text_is_parsed() {
        let res = response(200, r#"{"ok":true,"count":0}"#);

        assert!(res.is_success());
        assert_eq!(res.body, Some(json!({ "ok": true, "count": 0 })));
        assert_eq!(
            res.json::<RemoveTestsResponse>().unwrap(),
            RemoveTestsResponse { ok: true, count: 0 }
        );
    }

    #[test]
    fn test_non_json_text_has_no_body() {
        let res = response(502, "Bad Gateway");

        assert!(!res.is_success());
        assert_eq!(res.text, "Bad Gateway");
        assert!(res.body.is_none());
        assert!(res.json::<RemoveTestsResponse>().is_err());
    }

    #[test]
    fn test_log_line_indents_body() {
        let res = response(200, r#"{"ok":true}"#);

        assert_eq!(
            res.log_line(),
            "DELETE /api/1/tests\n               {\n                 \"ok\": true\n               }"
        );
    }

    #[test]
    fn test_log_line_quotes_raw_text() {
        let res = response(500, "oops");
        assert_eq!(res.log_line(), "DELETE /api/1/tests\n               \"oops\"");
    }
}
