//! Configuration loading and resolution.

use std::path::{Path, PathBuf};

use pubky_content::DATA_DIR;

pub const DEFAULT_PORT: u16 = 3000;
pub const PORT_ENV: &str = "PORT";

/// Resolve the HTTP port: explicit flag, then `PORT`, then 3000.
pub fn resolve_port(explicit: Option<u16>) -> u16 {
    resolve_port_from(explicit, std::env::var(PORT_ENV).ok())
}

fn resolve_port_from(explicit: Option<u16>, env_value: Option<String>) -> u16 {
    if let Some(port) = explicit {
        return port;
    }

    match env_value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {PORT_ENV}={raw:?}, using {DEFAULT_PORT}");
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}

/// Resolve the bundled data root.
///
/// Looks next to the installed bundle (`<exe>/../data`) first, then in the
/// working directory. When neither exists the bundle location is returned so
/// that startup verification can report it.
pub fn resolve_data_root() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    pick_data_root(&data_root_candidates(exe_dir.as_deref(), &cwd))
}

fn data_root_candidates(exe_dir: Option<&Path>, cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(dir) = exe_dir {
        candidates.push(dir.join("..").join(DATA_DIR));
    }
    candidates.push(cwd.join(DATA_DIR));
    candidates
}

fn pick_data_root(candidates: &[PathBuf]) -> PathBuf {
    candidates
        .iter()
        .find(|p| p.is_dir())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DATA_DIR))
}
