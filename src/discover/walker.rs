//! Directory walker

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::{DiscoveryConfig, IncludeEntry, expand};
use crate::error::{DiscoverError, Result};

/// Matches any entry name
const WILDCARD: &str = "*";

/// Effective rules for one include entry, with the global lists merged in
#[derive(Debug, Clone)]
pub struct WalkRules {
    pub markers: Vec<String>,
    pub ignore: Vec<String>,
    pub show_hidden: bool,
    pub stop_on_match: bool,
    pub depth: u8,
}

impl WalkRules {
    pub fn resolve(entry: &IncludeEntry, config: &DiscoveryConfig) -> Self {
        let mut markers = entry.markers.clone();
        if entry.use_root_markers {
            markers.extend(config.markers.iter().cloned());
        }

        let mut ignore = entry.ignore.clone();
        if entry.use_root_ignore {
            ignore.extend(config.ignore.iter().cloned());
        }

        Self {
            markers,
            ignore,
            show_hidden: entry.show_hidden.unwrap_or(config.traverse_hidden),
            stop_on_match: entry.stop_on_match.unwrap_or(config.stop_on_match),
            depth: entry.depth,
        }
    }

    /// Whether `dir` holds an entry named like one of the markers
    fn has_marker(&self, dir: &Path) -> bool {
        self.markers.iter().any(|marker| {
            if marker == WILDCARD {
                WalkDir::new(dir)
                    .min_depth(1)
                    .max_depth(1)
                    .into_iter()
                    .flatten()
                    .next()
                    .is_some()
            } else {
                dir.join(marker).symlink_metadata().is_ok()
            }
        })
    }

    /// Directories worth walking into; the root itself always is
    fn should_visit(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }
        if !entry.file_type().is_dir() {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!("Skipping non UTF-8 entry {:?}", entry.file_name());
            return false;
        };
        (self.show_hidden || !name.starts_with('.')) && !self.ignore.iter().any(|i| i == name)
    }
}

/// Walk every include entry and collect the listed directories in order
///
/// Each root comes first, followed by the matched directories beneath it.
pub fn discover(config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut listed = Vec::new();
    for entry in &config.include {
        let rules = WalkRules::resolve(entry, config);
        for raw in &entry.paths {
            let root = PathBuf::from(expand(raw)?);
            listed.push(root.clone());
            walk_root(&root, &rules, &mut listed)?;
        }
    }
    Ok(listed)
}

/// Walk one root, appending matches below it to `out`
///
/// A directory is listed when it or anything below it matched, always
/// after its parent. Symlinks are not followed.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn walk_root(root: &Path, rules: &WalkRules, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut walker = WalkDir::new(root)
        .max_depth(usize::from(rules.depth))
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| rules.should_visit(entry));

    // directories on the way down from the root, and whether each is listed yet
    let mut ancestors: Vec<(PathBuf, bool)> = Vec::new();

    loop {
        let entry = match walker.next() {
            None => break,
            Some(Ok(entry)) => entry,
            Some(Err(e)) if e.depth() == 0 => {
                return Err(DiscoverError::ReadRoot {
                    path: root.to_path_buf(),
                    reason: e.to_string(),
                }
                .into());
            }
            Some(Err(e)) => {
                warn!("Skipping {}", e);
                continue;
            }
        };

        let depth = entry.depth();
        let matched = rules.has_marker(entry.path());

        if depth > 0 {
            ancestors.truncate(depth - 1);
            ancestors.push((entry.path().to_path_buf(), false));

            if matched {
                trace!("match found {}", entry.path().display());
                for (dir, listed) in ancestors.iter_mut().filter(|(_, listed)| !*listed) {
                    out.push(dir.clone());
                    *listed = true;
                }
            }
        }

        if matched && rules.stop_on_match {
            walker.skip_current_dir();
        }
    }

    debug!("{} paths listed so far", out.len());
    Ok(())
}
