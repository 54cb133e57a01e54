//! Multi-root content resolution.
//!
//! Callers address files by `(root name, relative path)` and never by raw
//! filesystem path. Every read is confined to its root twice: lexically
//! (no absolute paths, no `..`) and physically (the canonical target must
//! live under the canonical root, which also catches symlink escapes).

use std::path::{Component, Path, PathBuf};

use crate::types::{Content, ContentError, ContentResult, ContentRoot, RootReport, RootStatus};

/// Read-only view over a fixed set of named content roots.
#[derive(Debug, Clone, Default)]
pub struct ContentResolver {
    roots: Vec<ContentRoot>,
}

impl ContentResolver {
    /// Build a resolver over the given roots. Later duplicates of a name are ignored.
    pub fn new(roots: impl IntoIterator<Item = ContentRoot>) -> Self {
        let mut unique: Vec<ContentRoot> = Vec::new();
        for root in roots {
            if unique.iter().any(|r| r.name == root.name) {
                tracing::warn!("Duplicate content root '{}' ignored", root.name);
                continue;
            }
            unique.push(root);
        }
        Self { roots: unique }
    }

    pub fn roots(&self) -> &[ContentRoot] {
        &self.roots
    }

    /// Look up a root by logical name.
    pub fn root(&self, name: &str) -> ContentResult<&ContentRoot> {
        self.roots
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| ContentError::UnknownRoot(name.to_string()))
    }

    /// Whether `relative` names a readable regular file inside `root`.
    pub async fn exists(&self, root: &str, relative: &str) -> bool {
        match self.locate(root, relative).await {
            Ok(path) => tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Read a whole file. Never returns partial content: any failure is an error.
    pub async fn read(&self, root: &str, relative: &str) -> ContentResult<Content> {
        let path = self.locate(root, relative).await?;

        let meta = tokio::fs::metadata(&path).await?;
        if !meta.is_file() {
            return Err(not_found(root, relative));
        }

        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => not_found(root, relative),
            _ => ContentError::Io(e),
        })?;

        tracing::debug!("Read {} bytes from {root}/{relative}", bytes.len());
        Ok(Content::from_bytes(bytes))
    }

    /// Read a file as text, replacing invalid UTF-8 sequences.
    pub async fn read_to_string(&self, root: &str, relative: &str) -> ContentResult<String> {
        match self.read(root, relative).await? {
            Content::Text(text) => Ok(text),
            Content::Binary(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }

    /// Check every root once. Unreadable roots are reported, never fatal.
    pub async fn verify(&self) -> RootReport {
        let mut report = RootReport::default();

        for root in &self.roots {
            let readable = tokio::fs::read_dir(&root.path).await.is_ok();
            if readable {
                tracing::debug!("Content root '{}' readable at {}", root.name, root.path.display());
            } else {
                tracing::warn!(
                    "Content root '{}' is not readable at {}",
                    root.name,
                    root.path.display()
                );
            }
            report.roots.push(RootStatus {
                name: root.name.clone(),
                path: root.path.clone(),
                readable,
            });
        }

        report
    }

    /// Resolve to a canonical path that is guaranteed to sit under the root.
    async fn locate(&self, root: &str, relative: &str) -> ContentResult<PathBuf> {
        let base = &self.root(root)?.path;
        let candidate = base.join(sanitize(root, relative)?);

        let canonical_root = tokio::fs::canonicalize(base)
            .await
            .map_err(|_| not_found(root, relative))?;
        let canonical = tokio::fs::canonicalize(&candidate)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => not_found(root, relative),
                _ => ContentError::Io(e),
            })?;

        if !canonical.starts_with(&canonical_root) {
            return Err(outside(root, relative));
        }

        Ok(canonical)
    }
}

/// Lexical confinement: keep only normal components.
fn sanitize(root: &str, relative: &str) -> ContentResult<PathBuf> {
    let mut clean = PathBuf::new();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(outside(root, relative));
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(not_found(root, relative));
    }

    Ok(clean)
}

fn not_found(root: &str, relative: &str) -> ContentError {
    ContentError::NotFound {
        root: root.to_string(),
        path: relative.to_string(),
    }
}

fn outside(root: &str, relative: &str) -> ContentError {
    ContentError::OutsideRoot {
        root: root.to_string(),
        path: relative.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (tempfile::TempDir, ContentResolver) {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        let pkarr = dir.path().join("pkarr");
        std::fs::create_dir_all(core.join("docs")).unwrap();
        std::fs::create_dir_all(&pkarr).unwrap();
        std::fs::write(core.join("README.md"), "# Pubky Core\n").unwrap();
        std::fs::write(core.join("docs/auth.md"), "auth flow").unwrap();
        std::fs::write(pkarr.join("README.md"), "# Pkarr\n").unwrap();
        std::fs::write(dir.path().join("secret.txt"), "outside").unwrap();

        let resolver = ContentResolver::new([
            ContentRoot::new("core", core),
            ContentRoot::new("pkarr", pkarr),
        ]);
        (dir, resolver)
    }

    #[tokio::test]
    async fn test_read_from_named_roots() {
        let (_dir, resolver) = fixture();

        let core = resolver.read("core", "README.md").await.unwrap();
        assert_eq!(core.as_text(), Some("# Pubky Core\n"));

        let pkarr = resolver.read_to_string("pkarr", "README.md").await.unwrap();
        assert_eq!(pkarr, "# Pkarr\n");

        let nested = resolver.read_to_string("core", "./docs/auth.md").await.unwrap();
        assert_eq!(nested, "auth flow");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, resolver) = fixture();
        let err = resolver.read("core", "nope.md").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound { .. }));
        assert!(err.is_not_found());
        assert!(!resolver.exists("core", "nope.md").await);
    }

    #[tokio::test]
    async fn test_unknown_root() {
        let (_dir, resolver) = fixture();
        let err = resolver.read("nexus", "README.md").await.unwrap_err();
        assert!(matches!(err, ContentError::UnknownRoot(_)));
    }

    #[tokio::test]
    async fn test_parent_traversal_rejected() {
        let (_dir, resolver) = fixture();

        let err = resolver.read("core", "../secret.txt").await.unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot { .. }));

        let err = resolver.read("core", "docs/../../secret.txt").await.unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot { .. }));

        assert!(!resolver.exists("core", "../secret.txt").await);
        // Sibling root is not reachable through another root either.
        assert!(!resolver.exists("core", "../pkarr/README.md").await);
    }

    #[tokio::test]
    async fn test_absolute_path_rejected() {
        let (dir, resolver) = fixture();
        let absolute = dir.path().join("secret.txt");
        let err = resolver
            .read("core", absolute.to_str().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escape_rejected() {
        let (dir, resolver) = fixture();
        std::os::unix::fs::symlink(
            dir.path().join("secret.txt"),
            dir.path().join("core/leak.txt"),
        )
        .unwrap();

        let err = resolver.read("core", "leak.txt").await.unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot { .. }));
        assert!(!resolver.exists("core", "leak.txt").await);
    }

    #[tokio::test]
    async fn test_directory_is_not_a_file() {
        let (_dir, resolver) = fixture();
        assert!(!resolver.exists("core", "docs").await);
        assert!(resolver.read("core", "docs").await.is_err());
        assert!(resolver.read("core", "").await.is_err());
    }

    #[tokio::test]
    async fn test_binary_content() {
        let (dir, resolver) = fixture();
        std::fs::write(dir.path().join("core/logo.png"), [0x89, 0x50, 0xFF, 0xFE]).unwrap();
        let content = resolver.read("core", "logo.png").await.unwrap();
        assert_eq!(content, Content::Binary(vec![0x89, 0x50, 0xFF, 0xFE]));
        assert_eq!(content.len(), 4);
    }

    #[test]
    fn test_verify_reports_missing_roots() {
        let (dir, _) = fixture();
        let resolver = ContentResolver::new([
            ContentRoot::new("core", dir.path().join("core")),
            ContentRoot::new("nexus", dir.path().join("pubky-nexus")),
        ]);

        let report = tokio_test::block_on(resolver.verify());
        assert!(!report.all_readable());
        let missing: Vec<_> = report.unreadable().map(|r| r.name.as_str()).collect();
        assert_eq!(missing, vec!["nexus"]);
    }

    #[test]
    fn test_duplicate_root_names() {
        let resolver = ContentResolver::new([
            ContentRoot::new("core", "/a"),
            ContentRoot::new("core", "/b"),
        ]);
        assert_eq!(resolver.roots().len(), 1);
        assert_eq!(resolver.root("core").unwrap().path, PathBuf::from("/a"));
    }
}
