/// Tagged token tree parsed once from a nested JSON document.
/// Leaf-ness is decided here, at parse time, so the flattener and the
/// builders never probe raw JSON properties again.
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root must be an object, got {0}")]
    NonObjectRoot(&'static str),
}

/// A node inside a token document: either a translatable leaf (marked
/// by a `$value` property) or a group of further nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(TokenLeaf),
    Group(TokenGroup),
}

/// Leaf token: carries the value plus optional `$type`/`$extensions`.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenLeaf {
    pub value: Option<String>,
    pub token_type: Option<String>,
    pub extensions: Option<Value>,
}

impl TokenLeaf {
    /// Provenance id from `$extensions["com.figma"].variableId`, if any.
    pub fn figma_variable_id(&self) -> Option<&str> {
        self.extensions
            .as_ref()?
            .get("com.figma")?
            .get("variableId")?
            .as_str()
    }
}

/// Group node: named children in document order, plus optional
/// `$extensions` metadata unrelated to any single leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    pub children: Vec<(String, TokenNode)>,
    pub extensions: Option<Value>,
}

impl TokenGroup {
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Parse a token export document into a typed tree.
/// The only fallible step in the pipeline; everything past this point
/// is total over the parsed tree.
pub fn parse_document(content: &str) -> Result<TokenGroup, ParseError> {
    let value: Value = serde_json::from_str(content)?;
    match value {
        Value::Object(map) => Ok(group_from_map(&map)),
        other => Err(ParseError::NonObjectRoot(json_kind(&other))),
    }
}

/// Build a group from an already-parsed JSON object.
pub fn group_from_value(value: &Value) -> Option<TokenGroup> {
    value.as_object().map(group_from_map)
}

fn group_from_map(map: &Map<String, Value>) -> TokenGroup {
    let mut children = Vec::new();
    for (key, child) in map {
        // `$extensions` is metadata on this node, never a child
        if key == "$extensions" {
            continue;
        }
        // Non-object properties are not token nodes; skip them
        let Value::Object(child_map) = child else {
            continue;
        };
        let node = if child_map.contains_key("$value") {
            TokenNode::Leaf(leaf_from_map(child_map))
        } else {
            TokenNode::Group(group_from_map(child_map))
        };
        children.push((key.clone(), node));
    }
    TokenGroup {
        children,
        extensions: map.get("$extensions").cloned(),
    }
}

fn leaf_from_map(map: &Map<String, Value>) -> TokenLeaf {
    let value = match map.get("$value") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Null) | None => None,
        // Non-string values survive as their compact JSON rendering
        Some(other) => Some(other.to_string()),
    };
    let token_type = map.get("$type").and_then(Value::as_str).map(str::to_string);
    TokenLeaf {
        value,
        token_type,
        extensions: map.get("$extensions").cloned(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
