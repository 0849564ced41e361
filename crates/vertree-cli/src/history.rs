//! Version history files.
//!
//! A history file lists versions in creation order:
//!
//! ```toml
//! [[version]]
//! id = 1
//! parent = 0
//!
//! [[version]]
//! id = 2
//! parent = 1
//! tag = "release"
//! merge = [1]
//! ```
//!
//! Version `0` is the implicit root. It may appear once without a parent to
//! give it a tag. `merge` lists extra incoming edges, added after the parent
//! edge.

use std::{collections::HashSet, ops::Range};

use log::debug;
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use vertree::{
    identifier::VersionId,
    version::{Tag, TagMap, VersionHistory},
};

/// Errors found while reading a history file. Each carries the byte span of
/// the offending value when one is known.
#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("invalid history file: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("the root version {root} cannot have a parent")]
    RootWithParent { root: VersionId, span: Range<usize> },

    #[error("version {id} is defined more than once")]
    DuplicateVersion { id: VersionId, span: Range<usize> },

    #[error("version {id} has no parent")]
    MissingParent { id: VersionId, span: Range<usize> },

    #[error("unknown version {id}")]
    UnknownVersion { id: VersionId, span: Range<usize> },
}

impl HistoryError {
    /// Byte range of the source the error points at.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            HistoryError::Parse { span, .. } => span.clone(),
            HistoryError::RootWithParent { span, .. }
            | HistoryError::DuplicateVersion { span, .. }
            | HistoryError::MissingParent { span, .. }
            | HistoryError::UnknownVersion { span, .. } => Some(span.clone()),
        }
    }

    /// Short label shown next to the span.
    pub fn label(&self) -> &'static str {
        match self {
            HistoryError::Parse { .. } => "here",
            HistoryError::RootWithParent { .. } => "root declared here",
            HistoryError::DuplicateVersion { .. } => "redefined here",
            HistoryError::MissingParent { .. } => "version without parent",
            HistoryError::UnknownVersion { .. } => "not defined in this file",
        }
    }

    pub fn help(&self) -> Option<&'static str> {
        match self {
            HistoryError::Parse { .. } => None,
            HistoryError::RootWithParent { .. } => {
                Some("the root is implicit; only list it to give it a tag")
            }
            HistoryError::DuplicateVersion { .. } => Some("version ids must be unique"),
            HistoryError::MissingParent { .. } => {
                Some("add `parent = <id>`; every version except the root needs one")
            }
            HistoryError::UnknownVersion { .. } => {
                Some("parents and merges must refer to versions listed in the file")
            }
        }
    }
}

impl From<toml::de::Error> for HistoryError {
    fn from(err: toml::de::Error) -> Self {
        HistoryError::Parse {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HistoryFile {
    #[serde(default, rename = "version")]
    versions: Vec<VersionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionEntry {
    id: Spanned<VersionId>,
    parent: Option<Spanned<VersionId>>,
    tag: Option<String>,
    #[serde(default)]
    merge: Vec<Spanned<VersionId>>,
}

/// A loaded history: the version graph and its tags.
#[derive(Debug)]
pub struct History {
    graph: VersionHistory,
    tags: TagMap,
}

impl History {
    /// Parses and validates a history file.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] for malformed TOML, duplicate versions,
    /// versions without a parent, a root with a parent, and references to
    /// versions the file does not define.
    pub fn parse(source: &str) -> Result<Self, HistoryError> {
        let file: HistoryFile = toml::from_str(source)?;

        let mut known = HashSet::from([VersionId::ROOT]);
        let mut root_seen = false;
        for entry in &file.versions {
            let id = *entry.id.get_ref();
            if id.is_root() {
                if let Some(parent) = &entry.parent {
                    return Err(HistoryError::RootWithParent {
                        root: id,
                        span: parent.span(),
                    });
                }
                if root_seen {
                    return Err(HistoryError::DuplicateVersion {
                        id,
                        span: entry.id.span(),
                    });
                }
                root_seen = true;
                continue;
            }
            if !known.insert(id) {
                return Err(HistoryError::DuplicateVersion {
                    id,
                    span: entry.id.span(),
                });
            }
            if entry.parent.is_none() {
                return Err(HistoryError::MissingParent {
                    id,
                    span: entry.id.span(),
                });
            }
        }

        let references = file
            .versions
            .iter()
            .flat_map(|entry| entry.parent.iter().chain(&entry.merge));
        for reference in references {
            if !known.contains(reference.get_ref()) {
                return Err(HistoryError::UnknownVersion {
                    id: *reference.get_ref(),
                    span: reference.span(),
                });
            }
        }

        let mut graph = VersionHistory::new();
        let mut tags = TagMap::new();
        for entry in file.versions {
            let id = entry.id.into_inner();
            if let Some(parent) = entry.parent {
                graph.add_version(parent.into_inner(), id);
            }
            for merged in entry.merge {
                graph.add_edge(merged.into_inner(), id);
            }
            if let Some(tag) = entry.tag {
                tags.insert(id, Tag::new(tag));
            }
        }

        debug!(
            versions = graph.version_count(),
            edges = graph.edge_count(),
            tags = tags.len();
            "History loaded"
        );
        Ok(Self { graph, tags })
    }

    pub fn graph(&self) -> &VersionHistory {
        &self.graph
    }

    pub fn tags(&self) -> &TagMap {
        &self.tags
    }
}
