//! Prompt `design_data_model`: Shape an entity for storage on a homeserver.

use crate::types::Role;

use super::template::{ArgumentSpec, PromptTemplate};

pub fn template() -> PromptTemplate {
    PromptTemplate {
        name: "design_data_model".to_string(),
        description: "Design the JSON model and homeserver path for an entity".to_string(),
        arguments: vec![ArgumentSpec::required(
            "entity",
            "Entity to model, e.g. bookmark or event",
        )],
        messages: vec![(
            Role::User,
            "Design a Pubky data model for \"{{entity}}\".\n\n\
             Please:\n\
             1. Read pubky://app-specs/readme and reuse existing models if one fits\n\
             2. Propose the JSON schema and an id strategy\n\
             3. Propose the /pub/<app>/{{entity}}s/<id> path and validate it\n\
             4. Explain how Nexus would index it"
                .to_string(),
        )],
    }
}
