// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shared, possibly cyclic value graphs and their conversion to plain JSON.

use serde_json::{Map, Number, Value};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

/// A JSON-like value whose arrays and objects are shared by reference.
///
/// Cloning a container node clones the handle, not the contents, so a graph
/// can reference the same array or object from several places, itself
/// included. [`decycle`] turns such a graph into a finite [`Value`].
#[derive(Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Rc<RefCell<Vec<Node>>>),
    Object(Rc<RefCell<BTreeMap<String, Node>>>),
}

impl Node {
    pub fn array() -> Self {
        Node::Array(Rc::new(RefCell::new(Vec::new())))
    }

    pub fn object() -> Self {
        Node::Object(Rc::new(RefCell::new(BTreeMap::new())))
    }

    /// Append to an array node. Returns `false` for any other kind of node.
    pub fn push(&self, value: Node) -> bool {
        match self {
            Node::Array(items) => {
                items.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Set a key on an object node. Returns `false` for any other kind of node.
    pub fn insert(&self, key: impl Into<String>, value: Node) -> bool {
        match self {
            Node::Object(entries) => {
                entries.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Identity of a container node; scalars have none.
    fn identity(&self) -> Option<*const ()> {
        match self {
            Node::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            Node::Object(entries) => Some(Rc::as_ptr(entries) as *const ()),
            _ => None,
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(Rc::new(RefCell::new(
                items.into_iter().map(Node::from).collect(),
            ))),
            Value::Object(entries) => Node::Object(Rc::new(RefCell::new(
                entries.into_iter().map(|(k, v)| (k, Node::from(v))).collect(),
            ))),
        }
    }
}

// Shallow on purpose: a cyclic graph would recurse forever.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("Null"),
            Node::Bool(b) => write!(f, "Bool({})", b),
            Node::Number(n) => write!(f, "Number({})", n),
            Node::String(s) => write!(f, "String({:?})", s),
            Node::Array(items) => match items.try_borrow() {
                Ok(items) => write!(f, "Array(len={})", items.len()),
                Err(_) => f.write_str("Array(<borrowed>)"),
            },
            Node::Object(entries) => match entries.try_borrow() {
                Ok(entries) => f
                    .debug_struct("Object")
                    .field("keys", &entries.keys().collect::<Vec<_>>())
                    .finish(),
                Err(_) => f.write_str("Object(<borrowed>)"),
            },
        }
    }
}

/// Deep-copy `root` into a plain [`Value`], breaking reference cycles.
///
/// A container met again while it is still on the current path from the
/// root is replaced by the marker string `<reference to "/path">`, where the
/// path points at its first occurrence (`"/"` is the root itself). Shared
/// containers that do not form a cycle are copied by value at each site.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use the_hive::codec::{decycle, Node};
///
/// let root = Node::object();
/// root.insert("name", Node::String("queen".into()));
/// root.insert("self", root.clone());
///
/// assert_eq!(
///     decycle(&root),
///     json!({"name": "queen", "self": "<reference to \"/\">"})
/// );
/// ```
pub fn decycle(root: &Node) -> Value {
    let mut ancestors = HashMap::new();
    copy_node(root, "/", &mut ancestors)
}

fn copy_node(node: &Node, path: &str, ancestors: &mut HashMap<*const (), String>) -> Value {
    if let Some(id) = node.identity() {
        if let Some(first_seen) = ancestors.get(&id) {
            return Value::String(format!("<reference to \"{}\">", first_seen));
        }
        ancestors.insert(id, path.to_string());
    }

    let copied = match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::String(s) => Value::String(s.clone()),
        Node::Array(items) => Value::Array(
            items
                .borrow()
                .iter()
                .enumerate()
                .map(|(index, item)| copy_node(item, &child_path(path, &index.to_string()), ancestors))
                .collect(),
        ),
        Node::Object(entries) => {
            let mut map = Map::new();
            for (key, value) in entries.borrow().iter() {
                let copied = copy_node(value, &child_path(path, key), ancestors);
                map.insert(key.clone(), copied);
            }
            Value::Object(map)
        }
    };

    if let Some(id) = node.identity() {
        ancestors.remove(&id);
    }
    copied
}

fn child_path(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{}", segment)
    } else {
        format!("{}/{}", parent, segment)
    }
}
