//! Marker-based project discovery
//!
//! Backs the `repo-list` enumerator: walks each configured root and lists
//! directories holding a project marker (`.git`, `Cargo.toml`, ...) along
//! with every directory on the way down to one.

mod walker;

pub use walker::*;

use crate::config::{DiscoveryConfig, IncludeEntry};

/// Command-line adjustments to the configured discovery
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replace the configured include list with these roots
    pub roots: Vec<String>,
    /// Depth limit for every include entry
    pub depth: Option<u8>,
    /// Descend into hidden directories everywhere
    pub hidden: bool,
}

impl Overrides {
    pub fn apply(&self, config: &mut DiscoveryConfig) {
        if !self.roots.is_empty() {
            config.include = vec![IncludeEntry::new(self.roots.clone())];
        }

        for entry in &mut config.include {
            if let Some(depth) = self.depth {
                entry.depth = depth;
            }
            if self.hidden {
                entry.show_hidden = Some(true);
            }
        }

        if self.hidden {
            config.traverse_hidden = true;
        }
    }
}
