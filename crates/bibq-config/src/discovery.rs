//! Configuration file discovery.
//!
//! Finds `.bibq.toml` files from a working directory up to the filesystem root, then appends
//! the global `~/.bibq.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".bibq.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global last. Walking stops at a
/// file with `root = true`, in which case the global file is skipped as well.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let config_path = dir.join(CONFIG_FILENAME);
        if !config_path.is_file() {
            continue;
        }
        let is_root = is_root_config(&config_path);
        configs.push(config_path);
        if is_root {
            return configs;
        }
    }

    if let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.bibq.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config, which depends on the machine running the tests.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn no_configs() {
        let dir = TestDir::new();
        let subdir = dir.create_dir("a/b/c");

        assert!(local(&discover_config_files(&subdir)).is_empty());
    }

    #[test]
    fn closest_config_first() {
        let dir = TestDir::new();
        let top = dir.create_config("");
        let mid = dir.create_config("a/b");
        let leaf = dir.create_config("a/b/c");
        let cwd = dir.create_dir("a/b/c/d");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&leaf, &mid, &top]);
    }

    #[test]
    fn directory_named_like_config_is_ignored() {
        let dir = TestDir::new();
        dir.create_dir(CONFIG_FILENAME);
        let subdir = dir.create_dir("sub");

        assert!(local(&discover_config_files(&subdir)).is_empty());
    }

    #[test]
    fn root_config_stops_discovery() {
        let dir = TestDir::new();
        dir.create_config("");
        let root = dir.create_config_with_content("project", "root = true\n");
        let child = dir.create_config("project/sub");
        let cwd = dir.create_dir("project/sub/deep");

        assert_eq!(discover_config_files(&cwd), vec![child, root]);
    }

    #[test]
    fn root_false_continues() {
        let dir = TestDir::new();
        let top = dir.create_config("");
        let mid = dir.create_config_with_content("project", "root = false\n");
        let cwd = dir.create_dir("project/src");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&mid, &top]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.bibq.toml")));
    }
}
