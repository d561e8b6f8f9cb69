/// Rebuilds nested JSON from the flat row set.
/// Two target shapes: a merged developer file and a per-language
/// Figma-compatible file with group `$extensions` reattached.
use crate::model::{FlatRow, GroupExtension, Language};
use log::debug;
use serde_json::{Map, Value};

/// Build the merged developer shape: one object with the three language
/// codes as fixed top-level keys. Rows without a value for a language
/// are absent from that language's subtree.
pub fn build_merged(rows: &[FlatRow]) -> Value {
    let mut root = Map::new();
    for language in Language::ALL {
        let mut subtree = Map::new();
        for row in rows {
            if let Some(value) = row.value(language) {
                insert_at_path(
                    &mut subtree,
                    &row.key_path,
                    merged_leaf(value, row.token_type.as_deref()),
                );
            }
        }
        root.insert(language.code().to_string(), Value::Object(subtree));
    }
    Value::Object(root)
}

/// Build the single-language Figma shape, reattaching group extensions
/// after all leaves are placed.
pub fn build_language(
    rows: &[FlatRow],
    group_extensions: &[GroupExtension],
    language: Language,
) -> Value {
    let mut root = Map::new();
    for row in rows {
        if let Some(value) = row.value(language) {
            insert_at_path(&mut root, &row.key_path, figma_leaf(row, value));
        }
    }
    for extension in group_extensions {
        apply_group_extension(&mut root, extension);
    }
    Value::Object(root)
}

fn merged_leaf(value: &str, token_type: Option<&str>) -> Value {
    // Developer file renames the "string" tag; everything else passes
    // through, including null
    let ty = match token_type {
        Some("string") => Some("text"),
        other => other,
    };
    let mut leaf = Map::new();
    leaf.insert("$value".to_string(), Value::String(value.to_string()));
    leaf.insert("$type".to_string(), type_value(ty));
    Value::Object(leaf)
}

fn figma_leaf(row: &FlatRow, value: &str) -> Value {
    let mut leaf = Map::new();
    leaf.insert("$type".to_string(), type_value(row.token_type.as_deref()));
    leaf.insert("$value".to_string(), Value::String(value.to_string()));
    if let Some(id) = &row.figma_variable_id {
        let mut figma = Map::new();
        figma.insert("variableId".to_string(), Value::String(id.clone()));
        let mut extensions = Map::new();
        extensions.insert("com.figma".to_string(), Value::Object(figma));
        leaf.insert("$extensions".to_string(), Value::Object(extensions));
    }
    Value::Object(leaf)
}

fn type_value(token_type: Option<&str>) -> Value {
    match token_type {
        Some(ty) => Value::String(ty.to_string()),
        None => Value::Null,
    }
}

/// A slot can be descended into only when it is a plain group object.
/// Leaf tokens (objects carrying `$value`) and non-objects are fair
/// game for replacement during a path walk.
fn is_group_object(slot: &Value) -> bool {
    slot.as_object().is_some_and(|map| !map.contains_key("$value"))
}

/// Nest `leaf` under the dotted path, creating intermediate objects on
/// demand. An intermediate segment already occupied by a leaf token is
/// replaced by an object, without error.
fn insert_at_path(root: &mut Map<String, Value>, key_path: &str, leaf: Value) {
    let segments: Vec<&str> = key_path.split('.').collect();
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = root;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !is_group_object(slot) {
            debug!("path segment {} replaced an existing leaf while nesting {}", segment, key_path);
            *slot = Value::Object(Map::new());
        }
        let Some(map) = slot.as_object_mut() else {
            return;
        };
        current = map;
    }
    current.insert(last.to_string(), leaf);
}

/// Walk the extension's group path from the root, creating intermediate
/// objects as needed, and set `$extensions` at that exact path. A leaf
/// token occupying any segment of the path is replaced without
/// collision detection.
fn apply_group_extension(root: &mut Map<String, Value>, extension: &GroupExtension) {
    let mut current = root;
    for segment in extension.group_path.split('.') {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !is_group_object(slot) {
            debug!(
                "group walk replaced a leaf at {} of {}",
                segment, extension.group_path
            );
            *slot = Value::Object(Map::new());
        }
        let Some(map) = slot.as_object_mut() else {
            return;
        };
        current = map;
    }
    current.insert("$extensions".to_string(), extension.extensions.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(key_path: &str) -> FlatRow {
        FlatRow::new(key_path)
    }

    #[test]
    fn merged_shape_has_all_three_language_keys() {
        let mut a = row("a");
        a.en_value = Some("Hello".into());
        let merged = build_merged(&[a]);

        let top: Vec<&String> = merged.as_object().unwrap().keys().collect();
        assert_eq!(top, vec!["az", "en", "ru"]);
        assert_eq!(merged["az"], json!({}));
        assert_eq!(merged["en"]["a"]["$value"], "Hello");
    }

    #[test]
    fn merged_shape_rewrites_string_type_to_text() {
        let mut a = row("a");
        a.en_value = Some("Hello".into());
        a.token_type = Some("string".into());
        let mut b = row("b");
        b.en_value = Some("#fff".into());
        b.token_type = Some("color".into());
        let mut c = row("c");
        c.en_value = Some("plain".into());

        let merged = build_merged(&[a, b, c]);
        assert_eq!(merged["en"]["a"]["$type"], "text");
        assert_eq!(merged["en"]["b"]["$type"], "color");
        assert_eq!(merged["en"]["c"]["$type"], Value::Null);
    }

    #[test]
    fn null_values_are_omitted_not_emitted() {
        let mut a = row("group.a");
        a.az_value = Some("X".into());
        let merged = build_merged(&[a]);

        assert_eq!(merged["az"]["group"]["a"]["$value"], "X");
        assert!(merged["en"].as_object().unwrap().is_empty());
        assert!(merged["ru"].as_object().unwrap().is_empty());
    }

    #[test]
    fn intermediate_leaf_is_silently_replaced_by_object() {
        let mut shallow = row("a");
        shallow.en_value = Some("leaf".into());
        let mut deep = row("a.b");
        deep.en_value = Some("nested".into());

        let merged = build_merged(&[shallow, deep]);
        // "a" was first a leaf object with $value, then re-created as a
        // plain group for "a.b"
        assert_eq!(merged["en"]["a"]["b"]["$value"], "nested");
        assert!(merged["en"]["a"].get("$value").is_none());
    }

    #[test]
    fn group_extension_at_leaf_path_replaces_the_leaf() {
        let mut leaf = row("theme");
        leaf.en_value = Some("clobbered".into());
        let extensions = vec![GroupExtension {
            group_path: "theme".into(),
            extensions: json!({"note": "x"}),
        }];

        let built = build_language(&[leaf], &extensions, Language::En);
        assert_eq!(built["theme"]["$extensions"], json!({"note": "x"}));
        assert!(built["theme"].get("$value").is_none());
    }

    #[test]
    fn figma_shape_orders_type_before_value() {
        let mut a = row("a");
        a.en_value = Some("Hello".into());
        a.token_type = Some("string".into());

        let built = build_language(&[a], &[], Language::En);
        let keys: Vec<&String> = built["a"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["$type", "$value"]);
        // No rewrite in the Figma shape
        assert_eq!(built["a"]["$type"], "string");
    }

    #[test]
    fn figma_shape_carries_variable_id_extension() {
        let mut a = row("a");
        a.az_value = Some("X".into());
        a.figma_variable_id = Some("VariableID:7:9".into());
        let mut b = row("b");
        b.az_value = Some("Y".into());

        let built = build_language(&[a, b], &[], Language::Az);
        assert_eq!(
            built["a"]["$extensions"]["com.figma"]["variableId"],
            "VariableID:7:9"
        );
        assert!(built["b"].get("$extensions").is_none());
    }

    #[test]
    fn group_extension_lands_beside_children() {
        let mut leaf = row("theme.color");
        leaf.en_value = Some("#000".into());
        let extensions = vec![GroupExtension {
            group_path: "theme".into(),
            extensions: json!({"note": "x"}),
        }];

        let built = build_language(&[leaf], &extensions, Language::En);
        assert_eq!(built["theme"]["$extensions"], json!({"note": "x"}));
        assert_eq!(built["theme"]["color"]["$value"], "#000");
    }

    #[test]
    fn group_extension_creates_missing_path() {
        let extensions = vec![GroupExtension {
            group_path: "a.b".into(),
            extensions: json!({"k": 1}),
        }];
        let built = build_language(&[], &extensions, Language::En);
        assert_eq!(built["a"]["b"]["$extensions"], json!({"k": 1}));
    }
}
