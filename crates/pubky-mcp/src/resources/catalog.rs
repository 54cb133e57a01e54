//! Static resource catalog for the bundled Pubky projects.
//!
//! Each entry maps a stable uri onto a `(root, path)` pair. The scheme is
//! shared and the first uri segment names the source project, so files
//! with the same name in different projects never collide.

use pubky_content::mime_for;

use crate::types::ResourceDefinition;

/// Catalog metadata plus the content address it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEntry {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
    pub root: String,
    pub path: String,
}

impl ResourceEntry {
    /// Create an entry whose mime type is derived from the path.
    pub fn new(
        uri: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        root: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            uri: uri.into(),
            name: name.into(),
            description: description.into(),
            mime_type: mime_for(&path).to_string(),
            root: root.into(),
            path,
        }
    }

    pub fn definition(&self) -> ResourceDefinition {
        ResourceDefinition {
            uri: self.uri.clone(),
            name: self.name.clone(),
            description: Some(self.description.clone()),
            mime_type: Some(self.mime_type.clone()),
        }
    }
}

pub const URI_SCHEME: &str = "pubky";

struct BundledDoc {
    root: &'static str,
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    path: &'static str,
}

const BUNDLED_DOCS: &[BundledDoc] = &[
    BundledDoc {
        root: "core",
        slug: "readme",
        name: "Pubky Core Overview",
        description: "Protocol overview: homeservers, sessions, and the read/write data model",
        path: "README.md",
    },
    BundledDoc {
        root: "core",
        slug: "homeserver",
        name: "Homeserver Guide",
        description: "Running and configuring a Pubky homeserver",
        path: "pubky-homeserver/README.md",
    },
    BundledDoc {
        root: "core",
        slug: "client",
        name: "Pubky Client SDK",
        description: "Client SDK usage: signup, signin, put, get, list, delete",
        path: "pubky-client/README.md",
    },
    BundledDoc {
        root: "core",
        slug: "auth",
        name: "Pubky Auth Specification",
        description: "Authentication flow and capability tokens",
        path: "docs/auth.md",
    },
    BundledDoc {
        root: "core",
        slug: "changelog",
        name: "Pubky Core Changelog",
        description: "Release history of Pubky Core",
        path: "CHANGELOG.md",
    },
    BundledDoc {
        root: "pkarr",
        slug: "readme",
        name: "Pkarr Overview",
        description: "Public-Key Addressable Resource Records over the Mainline DHT",
        path: "README.md",
    },
    BundledDoc {
        root: "pkarr",
        slug: "design",
        name: "Pkarr Design",
        description: "Signed packet format, relays, and republishing",
        path: "design/README.md",
    },
    BundledDoc {
        root: "pkdns",
        slug: "readme",
        name: "Pkdns Overview",
        description: "DNS server resolving Pkarr domains",
        path: "README.md",
    },
    BundledDoc {
        root: "nexus",
        slug: "readme",
        name: "Pubky Nexus Overview",
        description: "Social graph indexer aggregating data from homeservers",
        path: "README.md",
    },
    BundledDoc {
        root: "nexus",
        slug: "api",
        name: "Nexus API Reference",
        description: "REST API for reading aggregated social data",
        path: "docs/api.md",
    },
    BundledDoc {
        root: "app-specs",
        slug: "readme",
        name: "Pubky App Specs",
        description: "Data models and paths for Pubky social applications",
        path: "README.md",
    },
];

/// All documents shipped with the server, in catalog order.
pub fn bundled_entries() -> Vec<ResourceEntry> {
    BUNDLED_DOCS
        .iter()
        .map(|doc| {
            ResourceEntry::new(
                format!("{URI_SCHEME}://{}/{}", doc.root, doc.slug),
                doc.name,
                doc.description,
                doc.root,
                doc.path,
            )
        })
        .collect()
}
