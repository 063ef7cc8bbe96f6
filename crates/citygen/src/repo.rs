//! Input model handed over by the retrieval layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One source file of the repository. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoFile {
    /// Forward-slash separated, unique within the repository.
    pub path: String,
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Estimated line count.
    pub lines: u32,
    pub language: String,
    /// Language tint, e.g. `#dea584`.
    pub color: String,
    /// Containing directory, or `/` for files at the repository root.
    pub folder: String,
    #[serde(default)]
    pub commit_count: u32,
    #[serde(default)]
    pub is_frequently_updated: bool,
}

impl RepoFile {
    /// Build a file entry from its path alone, deriving `name` and `folder`
    /// the way the retrieval layer does. Metadata starts empty.
    pub fn from_path(path: &str, size: u64, lines: u32) -> Self {
        let (folder, name) = match path.rsplit_once('/') {
            Some((folder, name)) => (folder.to_string(), name.to_string()),
            None => ("/".to_string(), path.to_string()),
        };
        Self {
            path: path.to_string(),
            name,
            size,
            lines,
            language: String::new(),
            color: String::new(),
            folder,
            commit_count: 0,
            is_frequently_updated: false,
        }
    }
}

/// Everything the engine receives for one repository. `files` arrive
/// pre-filtered and in an order that is significant for district ordering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoData {
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub total_lines: u64,
    #[serde(default)]
    pub main_language: String,
    #[serde(default)]
    pub largest_file: String,
    /// Language → share of files in percent.
    #[serde(default)]
    pub language_breakdown: BTreeMap<String, u32>,
    pub files: Vec<RepoFile>,
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub fetched_at: String,
}

impl RepoData {
    /// `owner/repo`, the identity a layout is cached and seeded by.
    pub fn repo_key(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Lines of code guessed from byte size, never below one.
pub fn estimate_lines_from_size(size: u64, bytes_per_line: u64) -> u32 {
    let per_line = bytes_per_line.max(1);
    let rounded = size.saturating_add(per_line / 2) / per_line;
    rounded.clamp(1, u32::MAX as u64) as u32
}
