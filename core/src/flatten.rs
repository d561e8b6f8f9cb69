/// Flattens up to three per-language token trees into a merged flat row
/// set keyed by dotted path, capturing group-level `$extensions`
/// separately from leaf tokens.
use crate::model::{FlatRow, GroupExtension, Language};
use crate::tree::{TokenGroup, TokenNode};
use log::{debug, warn};
use std::collections::HashMap;

/// Parsed source trees, one per language. Any subset may be present.
#[derive(Debug, Clone, Default)]
pub struct LanguageTrees {
    pub az: Option<TokenGroup>,
    pub en: Option<TokenGroup>,
    pub ru: Option<TokenGroup>,
}

impl LanguageTrees {
    pub fn get(&self, language: Language) -> Option<&TokenGroup> {
        match language {
            Language::Az => self.az.as_ref(),
            Language::En => self.en.as_ref(),
            Language::Ru => self.ru.as_ref(),
        }
    }

    pub fn set(&mut self, language: Language, tree: TokenGroup) {
        match language {
            Language::Az => self.az = Some(tree),
            Language::En => self.en = Some(tree),
            Language::Ru => self.ru = Some(tree),
        }
    }

    pub fn with(mut self, language: Language, tree: TokenGroup) -> Self {
        self.set(language, tree);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenOutput {
    /// Rows in insertion order: az paths first, later languages either
    /// fill existing rows or append new ones
    pub rows: Vec<FlatRow>,
    pub group_extensions: Vec<GroupExtension>,
}

struct Arena {
    rows: Vec<FlatRow>,
    row_index: HashMap<String, usize>,
    groups: Vec<GroupExtension>,
    group_index: HashMap<String, usize>,
}

/// Flatten the supplied trees, processing languages in the fixed
/// `az, en, ru` order, each tree depth-first in document order.
pub fn flatten(trees: &LanguageTrees) -> FlattenOutput {
    let mut arena = Arena {
        rows: Vec::new(),
        row_index: HashMap::new(),
        groups: Vec::new(),
        group_index: HashMap::new(),
    };

    for language in Language::ALL {
        if let Some(root) = trees.get(language) {
            walk_group(root, "", language, &mut arena);
        }
    }

    FlattenOutput {
        rows: arena.rows,
        group_extensions: arena.groups,
    }
}

fn walk_group(group: &TokenGroup, prefix: &str, language: Language, arena: &mut Arena) {
    for (name, node) in &group.children {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        match node {
            TokenNode::Leaf(leaf) => {
                let idx = match arena.row_index.get(&path) {
                    Some(idx) => *idx,
                    None => {
                        arena.rows.push(FlatRow::new(path.clone()));
                        let idx = arena.rows.len() - 1;
                        arena.row_index.insert(path.clone(), idx);
                        idx
                    }
                };
                let row = &mut arena.rows[idx];

                row.set_value(language, leaf.value.clone());

                // Type overwrites when present, never clears
                if let Some(ty) = &leaf.token_type {
                    if let Some(previous) = &row.token_type {
                        if previous != ty {
                            debug!(
                                "token type for {} changed {} -> {} while merging {}",
                                path, previous, ty, language
                            );
                        }
                    }
                    row.token_type = Some(ty.clone());
                }

                // Variable id keeps the first seen value, unlike every
                // other field
                if row.figma_variable_id.is_none() {
                    if let Some(id) = leaf.figma_variable_id() {
                        row.figma_variable_id = Some(id.to_string());
                    }
                }
            }
            TokenNode::Group(child) => {
                if let Some(extensions) = &child.extensions {
                    record_group_extension(&path, extensions, arena);
                }
                walk_group(child, &path, language, arena);
            }
        }
    }
}

/// Record or overwrite the extension payload for a group path; the last
/// language processed wins.
fn record_group_extension(path: &str, extensions: &serde_json::Value, arena: &mut Arena) {
    match arena.group_index.get(path) {
        Some(idx) => {
            let existing = &mut arena.groups[*idx];
            if existing.extensions != *extensions {
                warn!("group extensions for {} overwritten by a later language", path);
            }
            existing.extensions = extensions.clone();
        }
        None => {
            arena.groups.push(GroupExtension {
                group_path: path.to_string(),
                extensions: extensions.clone(),
            });
            arena
                .group_index
                .insert(path.to_string(), arena.groups.len() - 1);
        }
    }
}
