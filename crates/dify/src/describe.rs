// Turn a raw workflow response into text the agent can read.
//
// Dify wraps workflow outputs as `{"data": {"outputs": {...}}}`, but the
// response is treated as opaque: whatever shape arrives is classified once
// and rendered by a fixed priority order.

use serde_json::{Map, Value};

pub const OUTPUTS_PREFIX: &str = "Workflow execution succeeded. Outputs: ";
pub const DATA_PREFIX: &str = "Workflow execution succeeded. Result data: ";
pub const FULL_RESULT_PREFIX: &str = "Workflow execution succeeded. Full result: ";
pub const RESULT_PREFIX: &str = "Workflow execution succeeded. Result: ";

/// Shape of a workflow response, in rendering priority order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultShape<'a> {
    /// `{"data": {"outputs": ...}}`
    Outputs(&'a Value),
    /// `{"data": ...}` where `data` has no `outputs`
    Data(&'a Value),
    /// Any other JSON object
    Object(&'a Map<String, Value>),
    /// Arrays, strings, numbers, booleans, null
    Scalar(&'a Value),
}

impl<'a> ResultShape<'a> {
    pub fn classify(result: &'a Value) -> Self {
        match result {
            Value::Object(map) => match map.get("data") {
                Some(data) => match data.as_object().and_then(|d| d.get("outputs")) {
                    Some(outputs) => ResultShape::Outputs(outputs),
                    None => ResultShape::Data(data),
                },
                None => ResultShape::Object(map),
            },
            other => ResultShape::Scalar(other),
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            ResultShape::Outputs(_) => OUTPUTS_PREFIX,
            ResultShape::Data(_) => DATA_PREFIX,
            ResultShape::Object(_) => FULL_RESULT_PREFIX,
            ResultShape::Scalar(_) => RESULT_PREFIX,
        }
    }

    pub fn render(&self) -> String {
        let body = match self {
            ResultShape::Outputs(value) | ResultShape::Data(value) => pretty(value),
            ResultShape::Object(map) => {
                serde_json::to_string_pretty(map).unwrap_or_else(|_| format!("{:?}", map))
            }
            ResultShape::Scalar(Value::String(s)) => s.clone(),
            ResultShape::Scalar(value) => value.to_string(),
        };
        format!("{}{}", self.prefix(), body)
    }
}

/// Describe a workflow response. Never fails.
pub fn describe_result(result: &Value) -> String {
    ResultShape::classify(result).render()
}

/// Two-space indented JSON; non-ASCII text is kept as-is
fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outputs_are_unwrapped() {
        let result = json!({"data": {"outputs": {"a": 1}, "status": "succeeded"}});

        let text = describe_result(&result);

        assert_eq!(text, format!("{}{{\n  \"a\": 1\n}}", OUTPUTS_PREFIX));
    }

    #[test]
    fn test_data_without_outputs() {
        let result = json!({"data": {"foo": "bar"}});

        let text = describe_result(&result);

        assert_eq!(text, format!("{}{{\n  \"foo\": \"bar\"\n}}", DATA_PREFIX));
        assert!(!text.starts_with(OUTPUTS_PREFIX));
    }

    #[test]
    fn test_non_object_data_is_rendered_as_data() {
        let result = json!({"data": [1, 2]});
        assert_eq!(
            describe_result(&result),
            format!("{}[\n  1,\n  2\n]", DATA_PREFIX)
        );
    }

    #[test]
    fn test_object_without_data_is_rendered_whole() {
        let result = json!({"other": 1});
        assert_eq!(
            describe_result(&result),
            format!("{}{{\n  \"other\": 1\n}}", FULL_RESULT_PREFIX)
        );
    }

    #[test]
    fn test_plain_string_is_not_quoted() {
        let result = json!("plain string");
        assert_eq!(describe_result(&result), format!("{}plain string", RESULT_PREFIX));
    }

    #[test]
    fn test_other_scalars() {
        assert_eq!(describe_result(&json!(42)), format!("{}42", RESULT_PREFIX));
        assert_eq!(describe_result(&Value::Null), format!("{}null", RESULT_PREFIX));
        assert_eq!(
            describe_result(&json!([1, "x"])),
            format!("{}[1,\"x\"]", RESULT_PREFIX)
        );
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        let result = json!({"data": {"outputs": {"answer": "晴天 ☀"}}});
        let text = describe_result(&result);
        assert!(text.contains("晴天 ☀"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_null_outputs_still_count_as_outputs() {
        let result = json!({"data": {"outputs": null}});
        assert_eq!(
            ResultShape::classify(&result),
            ResultShape::Outputs(&Value::Null)
        );
        assert_eq!(describe_result(&result), format!("{}null", OUTPUTS_PREFIX));
    }
}
