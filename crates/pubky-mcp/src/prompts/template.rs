//! Prompt templates and argument substitution.

use serde_json::{Map, Value};

use crate::types::{
    McpError, McpResult, PromptArgument, PromptDefinition, PromptGetResult, PromptMessage, Role,
    ToolContent,
};

/// A declared prompt argument.
#[derive(Debug, Clone)]
pub struct ArgumentSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Substituted when an optional argument is not supplied.
    pub default: Option<String>,
}

impl ArgumentSpec {
    pub fn required(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: true,
            default: None,
        }
    }

    pub fn optional(name: &str, description: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            required: false,
            default: Some(default.to_string()),
        }
    }
}

/// A named message template. Placeholders are written `{{argument}}`.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub arguments: Vec<ArgumentSpec>,
    pub messages: Vec<(Role, String)>,
}

impl PromptTemplate {
    pub fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            arguments: Some(
                self.arguments
                    .iter()
                    .map(|a| PromptArgument {
                        name: a.name.clone(),
                        description: Some(a.description.clone()),
                        required: a.required,
                    })
                    .collect(),
            ),
        }
    }

    /// Substitute declared arguments into every message.
    ///
    /// Undeclared arguments are ignored; a missing required one is a validation error.
    pub fn render(&self, args: &Map<String, Value>) -> McpResult<PromptGetResult> {
        let mut values: Vec<(&str, String)> = Vec::with_capacity(self.arguments.len());

        for spec in &self.arguments {
            let supplied = args
                .get(&spec.name)
                .filter(|v| !v.is_null())
                .map(value_text)
                .filter(|s| !s.trim().is_empty());

            let value = match (supplied, spec.required) {
                (Some(v), _) => v,
                (None, true) => {
                    return Err(McpError::Validation(format!(
                        "Missing required argument '{}' for prompt '{}'",
                        spec.name, self.name
                    )));
                }
                (None, false) => spec.default.clone().unwrap_or_default(),
            };
            values.push((spec.name.as_str(), value));
        }

        let messages = self
            .messages
            .iter()
            .map(|(role, text)| PromptMessage {
                role: *role,
                content: ToolContent::Text {
                    text: substitute(text, &values),
                },
            })
            .collect();

        Ok(PromptGetResult {
            description: Some(self.description.clone()),
            messages,
        })
    }
}

/// Replace each `{{name}}` in one left-to-right pass over the template.
///
/// Substituted values are copied verbatim and never rescanned. Placeholders
/// with no matching argument are left as written.
fn substitute(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match values.iter().find(|(n, _)| *n == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> PromptTemplate {
        PromptTemplate {
            name: "greet".to_string(),
            description: "Greeting".to_string(),
            arguments: vec![
                ArgumentSpec::required("who", "Who to greet"),
                ArgumentSpec::optional("tone", "Tone", "friendly"),
            ],
            messages: vec![
                (Role::User, "Say hi to {{who}} in a {{tone}} way.".to_string()),
                (Role::Assistant, "Greeting {{who}}.".to_string()),
            ],
        }
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn text(message: &PromptMessage) -> &str {
        match &message.content {
            ToolContent::Text { text } => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_render_with_default_and_unknown_args() {
        let result = template()
            .render(&args(json!({ "who": "Alice", "unused": "x" })))
            .unwrap();
        assert_eq!(result.messages.len(), 2);
        assert_eq!(text(&result.messages[0]), "Say hi to Alice in a friendly way.");
        assert_eq!(result.messages[1].role, Role::Assistant);
        assert_eq!(text(&result.messages[1]), "Greeting Alice.");
    }

    #[test]
    fn test_placeholder_inside_value_is_kept_verbatim() {
        let result = template()
            .render(&args(json!({ "who": "the {{tone}} syntax" })))
            .unwrap();
        assert_eq!(
            text(&result.messages[0]),
            "Say hi to the {{tone}} syntax in a friendly way."
        );
        assert_eq!(text(&result.messages[1]), "Greeting the {{tone}} syntax.");
    }

    #[test]
    fn test_substitute_edge_cases() {
        let values = [("a", "1".to_string())];
        assert_eq!(substitute("{{a}}{{a}}", &values), "11");
        assert_eq!(substitute("{{b}} and {{a}}", &values), "{{b}} and 1");
        assert_eq!(substitute("open {{a", &values), "open {{a");
        assert_eq!(substitute("no placeholders", &values), "no placeholders");
    }

    #[test]
    fn test_non_string_argument() {
        let result = template().render(&args(json!({ "who": 42 }))).unwrap();
        assert_eq!(text(&result.messages[1]), "Greeting 42.");
    }

    #[test]
    fn test_missing_required() {
        let err = template().render(&Map::new()).unwrap_err();
        assert!(matches!(err, McpError::Validation(_)));

        let err = template().render(&args(json!({ "who": "  " }))).unwrap_err();
        assert!(err.to_string().contains("'who'"));
    }

    #[test]
    fn test_definition_lists_arguments() {
        let def = template().definition();
        let arguments = def.arguments.unwrap();
        assert_eq!(arguments.len(), 2);
        assert!(arguments[0].required);
        assert!(!arguments[1].required);
    }
}
