use std::collections::HashMap;

use crate::repo::RepoFile;

/// Name of the district holding files at the repository root.
pub const ROOT_FOLDER: &str = "/";

/// Files sharing one top-level folder. Becomes one district.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderGroup<'a> {
    pub folder: String,
    pub files: Vec<&'a RepoFile>,
}

/// Top-level segment of a file's folder. Root files (`/`, or an empty
/// folder) map to [`ROOT_FOLDER`].
pub fn folder_key(folder: &str) -> &str {
    let trimmed = folder.trim_start_matches('/');
    match trimmed.split('/').next() {
        Some(first) if !first.is_empty() => first,
        _ => ROOT_FOLDER,
    }
}

/// Partition files into top-level folder groups, largest first. Groups of
/// equal size keep the order in which their folder was first seen.
pub fn group_by_folder(files: &[RepoFile]) -> Vec<FolderGroup<'_>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<FolderGroup<'_>> = Vec::new();

    for file in files {
        let key = folder_key(&file.folder);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(FolderGroup {
                folder: key.to_string(),
                files: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].files.push(file);
    }

    // sort_by is stable: ties keep first-seen order.
    groups.sort_by(|a, b| b.files.len().cmp(&a.files.len()));
    groups
}
