//! Tool `validate_public_key`: Check a z-base-32 encoded Pubky public key.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::registry::{ToolContext, ToolHandler};

/// z-base-32 alphabet used for Pkarr/Pubky public keys.
const Z_BASE_32: &str = "ybndrfg8ejkmcpqxot1uwisza345h769";

/// 32-byte ed25519 key encoded in z-base-32.
pub const PUBLIC_KEY_LEN: usize = 52;

#[derive(Debug, Deserialize)]
struct KeyParams {
    public_key: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "validate_public_key".to_string(),
        description: Some(
            "Validate a Pubky public key (z-base-32, optionally prefixed with pubky:// or pk:)"
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "public_key": { "type": "string" }
            },
            "required": ["public_key"]
        }),
    }
}

pub struct ValidatePublicKey;

#[async_trait]
impl ToolHandler for ValidatePublicKey {
    async fn execute(&self, args: Value, _ctx: &ToolContext) -> McpResult<ToolCallResult> {
        let params: KeyParams =
            serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let normalized = normalize(&params.public_key);
        let problems = check(&normalized);

        Ok(ToolCallResult::json(&json!({
            "input": params.public_key,
            "normalized": normalized,
            "valid": problems.is_empty(),
            "problems": problems,
        })))
    }
}

fn normalize(input: &str) -> String {
    let trimmed = input.trim();
    let bare = trimmed
        .strip_prefix("pubky://")
        .or_else(|| trimmed.strip_prefix("pk:"))
        .unwrap_or(trimmed);
    bare.split('/').next().unwrap_or("").to_lowercase()
}

fn check(key: &str) -> Vec<String> {
    let mut problems = Vec::new();

    let length = key.chars().count();
    if length != PUBLIC_KEY_LEN {
        problems.push(format!(
            "expected {PUBLIC_KEY_LEN} characters, got {length}"
        ));
    }

    let invalid: String = key.chars().filter(|c| !Z_BASE_32.contains(*c)).collect();
    if !invalid.is_empty() {
        problems.push(format!("characters outside z-base-32 alphabet: {invalid}"));
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "o4dksfbqk85ogzdb5osziw6befigbuxmuxkuxq8434q89uj56uyy";

    #[test]
    fn test_valid_key_forms() {
        assert!(check(&normalize(KEY)).is_empty());
        assert!(check(&normalize(&format!("pubky://{KEY}/pub/app/"))).is_empty());
        assert!(check(&normalize(&format!("pk:{}", KEY.to_uppercase()))).is_empty());
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(check("short").len(), 1);
        // 'l' and 'v' are not part of z-base-32.
        let bad = format!("{}lv", &KEY[..50]);
        let problems = check(&bad);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("lv"));
    }

    #[test]
    fn test_length_counts_characters() {
        // 52 characters, 53 bytes.
        let accented = format!("{}é", &KEY[..51]);
        let problems = check(&accented);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains('é'));
        assert!(!problems.iter().any(|p| p.contains("expected")));

        let problems = check("ééé");
        assert!(problems[0].contains("got 3"));
    }
}
