//! On-disk config trees for cardq-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use cardq_query::ClauseType;
use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A throwaway directory tree holding `.cardq.toml` files at chosen depths.
pub struct ConfigTree {
    /// Removed on drop.
    root: TempDir,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates `rel` (and its parents) below the root. An empty `rel` is the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `.cardq.toml` into `rel` with the given body.
    pub fn write(&self, rel: &str, body: &str) -> PathBuf {
        let config = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&config, body).unwrap();
        config
    }

    /// Writes a config that only carries a comment.
    pub fn write_blank(&self, rel: &str) -> PathBuf {
        self.write(rel, "# cardq\n")
    }

    /// Writes a `root = true` config that stops discovery.
    pub fn write_root(&self, rel: &str) -> PathBuf {
        self.write(rel, "root = true\n")
    }

    /// Writes a `root = true` config aliasing `keywords` to one clause type.
    pub fn write_aliases(&self, rel: &str, clause_type: ClauseType, keywords: &[&str]) -> PathBuf {
        let list = keywords
            .iter()
            .map(|k| format!("{k:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.write(
            rel,
            &format!("root = true\n\n[aliases]\n{} = [{list}]\n", clause_type.id()),
        )
    }
}
