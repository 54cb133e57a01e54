//! Prompt `build_app`: Plan a Pubky application end to end.

use crate::types::Role;

use super::template::{ArgumentSpec, PromptTemplate};

pub fn template() -> PromptTemplate {
    PromptTemplate {
        name: "build_app".to_string(),
        description: "Plan and scaffold an application on top of Pubky".to_string(),
        arguments: vec![
            ArgumentSpec::required("app_idea", "What the application should do"),
            ArgumentSpec::optional("language", "javascript or rust", "javascript"),
        ],
        messages: vec![
            (
                Role::User,
                "I want to build this on Pubky: {{app_idea}}\n\
                 Preferred language: {{language}}"
                    .to_string(),
            ),
            (
                Role::Assistant,
                "Let's plan it layer by layer:\n\
                 1. Identity: keypairs and Pkarr records so users can be discovered\n\
                 2. Storage: signup on a homeserver and choose /pub/<app>/ paths \
                 (check them with validate_homeserver_path)\n\
                 3. Data model: reuse pubky://app-specs/readme models where possible\n\
                 4. Reads: fetch aggregated social data through the Nexus API\n\
                 5. Code: generate_code_example in {{language}} for signup, put, get and list"
                    .to_string(),
            ),
        ],
    }
}
