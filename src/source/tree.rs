// src/source/tree.rs

use crate::errors::{io_error_with_path, Result};
use serde::Serialize;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// One entry of the bundle's file tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub name: String,
    /// Path relative to the bundle root, `/`-separated. Empty for the root.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Size in bytes; zero for directories.
    pub size: u64,
    /// Children of a directory, directories first and then by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
}

impl FileNode {
    /// Total number of files below (or at) this node.
    pub fn file_count(&self) -> usize {
        match &self.children {
            None => 1,
            Some(children) => children.iter().map(FileNode::file_count).sum(),
        }
    }

    /// Finds a descendant by its relative path.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        if self.path == path {
            return Some(self);
        }
        self.children
            .as_ref()?
            .iter()
            .find_map(|child| child.find(path))
    }
}

fn node_from_entry(entry: &DirEntry, root: &Path) -> FileNode {
    let relative = entry
        .path()
        .strip_prefix(root)
        .unwrap_or(entry.path())
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let is_dir = entry.file_type().is_dir();
    FileNode {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: relative,
        kind: if is_dir {
            NodeKind::Directory
        } else {
            NodeKind::File
        },
        size: if is_dir {
            0
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        },
        children: is_dir.then(Vec::new),
    }
}

fn attach(stack: &mut Vec<FileNode>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.get_or_insert_with(Vec::new).push(done);
        }
    }
}

/// Builds the file tree below `root`.
///
/// Entries that cannot be read are skipped. Symbolic links are listed but not
/// followed.
///
/// # Errors
/// Returns `Error::Io` if `root` itself cannot be read.
pub fn build_tree(root: &Path) -> Result<FileNode> {
    let metadata = std::fs::metadata(root).map_err(|e| io_error_with_path(e, root))?;
    let root_node = FileNode {
        name: root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string()),
        path: String::new(),
        kind: if metadata.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        },
        size: if metadata.is_dir() { 0 } else { metadata.len() },
        children: metadata.is_dir().then(Vec::new),
    };
    if !metadata.is_dir() {
        return Ok(root_node);
    }

    // stack[d] is the open node at depth d.
    let mut stack = vec![root_node];
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::debug!("Skipping unreadable entry while building tree: {}", e);
                continue;
            }
        };
        while stack.len() > entry.depth() {
            attach(&mut stack);
        }
        stack.push(node_from_entry(&entry, root));
    }
    while stack.len() > 1 {
        attach(&mut stack);
    }

    let tree = stack.pop().ok_or_else(|| {
        io_error_with_path(
            std::io::Error::new(std::io::ErrorKind::Other, "empty tree"),
            root,
        )
    })?;
    log::debug!(
        "Built tree for '{}' with {} files",
        root.display(),
        tree.file_count()
    );
    Ok(tree)
}
