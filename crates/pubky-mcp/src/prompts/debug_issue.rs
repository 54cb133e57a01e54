//! Prompt `debug_issue`: Triage an error from a Pubky client or homeserver.

use crate::types::Role;

use super::template::{ArgumentSpec, PromptTemplate};

pub fn template() -> PromptTemplate {
    PromptTemplate {
        name: "debug_issue".to_string(),
        description: "Diagnose an error seen while using Pubky".to_string(),
        arguments: vec![
            ArgumentSpec::required("error", "The error message or symptom"),
            ArgumentSpec::optional("context", "What you were doing when it happened", "not provided"),
        ],
        messages: vec![(
            Role::User,
            "I hit this error while working with Pubky:\n\n\
             {{error}}\n\n\
             Context: {{context}}\n\n\
             Please:\n\
             1. Search the docs for the error text with search_docs\n\
             2. Check whether keys and paths involved are valid \
             (validate_public_key, validate_homeserver_path)\n\
             3. Identify the failing layer (DHT resolution, homeserver session, indexer)\n\
             4. Suggest a concrete fix"
                .to_string(),
        )],
    }
}
