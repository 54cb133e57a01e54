//! Bundled data layout: which projects ship with the server and where.

use std::path::Path;

use crate::types::ContentRoot;

/// Directory under the bundle that holds every project tree.
pub const DATA_DIR: &str = "data";

/// Logical root name and directory name (under [`DATA_DIR`]) for each bundled project.
pub const BUNDLED_PROJECTS: &[(&str, &str)] = &[
    ("core", "pubky-core"),
    ("pkarr", "pkarr"),
    ("pkdns", "pkdns"),
    ("nexus", "pubky-nexus"),
    ("app-specs", "pubky-app-specs"),
];

/// Build the bundled content roots under a data directory.
pub fn bundled_roots(data_root: &Path) -> Vec<ContentRoot> {
    BUNDLED_PROJECTS
        .iter()
        .map(|(name, dir)| ContentRoot::new(*name, data_root.join(dir)))
        .collect()
}
