//! Prompt `explain_concept`: Walk through one Pubky concept using the bundled docs.

use crate::types::Role;

use super::template::{ArgumentSpec, PromptTemplate};

pub fn template() -> PromptTemplate {
    PromptTemplate {
        name: "explain_concept".to_string(),
        description: "Explain a Pubky concept (homeserver, pkarr, capabilities, ...)".to_string(),
        arguments: vec![
            ArgumentSpec::required("topic", "Concept to explain, e.g. homeserver"),
            ArgumentSpec::optional("depth", "beginner or advanced", "beginner"),
        ],
        messages: vec![(
            Role::User,
            "Explain the Pubky concept \"{{topic}}\" at a {{depth}} level.\n\n\
             Please:\n\
             1. Use search_docs with query \"{{topic}}\" to find where it is documented\n\
             2. Read the most relevant pubky:// resources\n\
             3. Explain which layer of the stack it belongs to (Pkarr, Pkdns, Pubky Core, App Specs, Nexus)\n\
             4. Show a short code example if one applies (generate_code_example)"
                .to_string(),
        )],
    }
}
