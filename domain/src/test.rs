//! Rainforest tests: stored sequences of UI interaction steps with a starting URI
//! and a target site.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEST_TITLE: &str = "Unnamed Test";

/// Payload for creating or replacing a test.
///
/// The client forwards this verbatim; the server assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Test {
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<i64>,
}

impl Default for Test {
    fn default() -> Self {
        Self {
            title: DEFAULT_TEST_TITLE.to_string(),
            elements: Vec::new(),
            start_uri: None,
            site_id: None,
        }
    }
}

impl Test {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_start_uri(mut self, start_uri: impl Into<String>) -> Self {
        self.start_uri = Some(start_uri.into());
        self
    }

    pub fn with_site_id(mut self, site_id: i64) -> Self {
        self.site_id = Some(site_id);
        self
    }

    pub fn with_step(mut self, step: Step) -> Self {
        self.elements.push(step);
        self
    }
}

/// One element of a test. Only `"step"` elements are produced by this crate,
/// but records from the server may carry other element types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "type")]
    pub element_type: String,
    pub element: StepElement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepElement {
    pub action: String,
    pub response: String,
}

impl Step {
    /// A step asking the tester to perform `action` and answer `response`.
    pub fn new(action: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            element_type: "step".to_string(),
            element: StepElement {
                action: action.into(),
                response: response.into(),
            },
        }
    }
}

/// A test as returned by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct TestRecord {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub start_uri: Option<String>,
    #[serde(default)]
    pub site_id: Option<i64>,
    #[serde(default)]
    pub elements: Vec<serde_json::Value>,
}

/// Body of a successful `DELETE /api/1/tests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoveTestsResponse {
    pub ok: bool,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_title() {
        assert_eq!(Test::default().title, "Unnamed Test");
    }

    #[test]
    fn test_serialization_omits_unset_fields() {
        let value = serde_json::to_value(Test::default()).unwrap();
        assert_eq!(value, json!({ "title": "Unnamed Test", "elements": [] }));
    }

    #[test]
    fn test_step_serializes_with_type_tag() {
        let test = Test::new("Login")
            .with_start_uri("/login")
            .with_site_id(9)
            .with_step(Step::new(
                "Click the login button",
                "Are you at the login page?",
            ));

        let value = serde_json::to_value(&test).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Login",
                "start_uri": "/login",
                "site_id": 9,
                "elements": [{
                    "type": "step",
                    "element": {
                        "action": "Click the login button",
                        "response": "Are you at the login page?"
                    }
                }]
            })
        );
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: TestRecord = serde_json::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(record.id, 42);
        assert!(record.title.is_none());
        assert!(record.elements.is_empty());
    }
}
