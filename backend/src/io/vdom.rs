//! Minimal virtual DOM: element/text trees, structural diff, patch
//! application and HTML serialization.
//!
//! Children are matched by position. The picker's markup is a fixed grid
//! whose cells keep their place between renders, so keyed reconciliation
//! would buy nothing here.
//!
//! # Example
//!
//! ```
//! use datepicker_backend::io::vdom::{apply_patches, diff, h, text};
//!
//! let mut live = h("span", [("class", "day")], vec![text("1")]);
//! let next = h("span", [("class", "day selected")], vec![text("1")]);
//!
//! let patches = diff(&live, &next);
//! apply_patches(&mut live, &patches).unwrap();
//! assert_eq!(live, next);
//! ```

use std::collections::BTreeMap;

use crate::error::{PickerError, PickerResult};

/// Elements rendered without a closing tag
const VOID_ELEMENTS: [&str; 4] = ["br", "hr", "img", "input"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<VNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VNode {
    Element(VElement),
    Text(String),
}

/// Build an element node
pub fn h<K, V>(tag: &str, attrs: impl IntoIterator<Item = (K, V)>, children: Vec<VNode>) -> VNode
where
    K: Into<String>,
    V: Into<String>,
{
    VNode::Element(VElement {
        tag: tag.to_string(),
        attrs: attrs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect(),
        children,
    })
}

/// Build a text node
pub fn text(content: impl Into<String>) -> VNode {
    VNode::Text(content.into())
}

impl VNode {
    /// Empty element, to be filled with [`VNode::attr`] and [`VNode::child`]
    pub fn el(tag: &str) -> Self {
        h(tag, Vec::<(String, String)>::new(), Vec::new())
    }

    /// Set an attribute. No effect on text nodes.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element(element) = &mut self {
            element.attrs.insert(key.into(), value.into());
        }
        self
    }

    /// Append a child. No effect on text nodes.
    pub fn child(mut self, child: VNode) -> Self {
        if let VNode::Element(element) = &mut self {
            element.children.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element(element) = &mut self {
            element.children.extend(children);
        }
        self
    }

    pub fn as_element(&self) -> Option<&VElement> {
        match self {
            VNode::Element(element) => Some(element),
            VNode::Text(_) => None,
        }
    }

    /// Attribute value of an element node
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.as_element()
            .and_then(|element| element.attrs.get(key))
            .map(String::as_str)
    }

    /// Depth-first search for every element matching `predicate`
    pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&VElement) -> bool) -> Vec<&'a VElement> {
        let mut found = Vec::new();
        collect_matching(self, predicate, &mut found);
        found
    }

    /// Concatenated text of the subtree
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text(content) => content.clone(),
            VNode::Element(element) => element.children.iter().map(VNode::text_content).collect(),
        }
    }

    fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut VNode> {
        let mut node = self;
        for &index in path {
            node = match node {
                VNode::Element(element) => element.children.get_mut(index)?,
                VNode::Text(_) => return None,
            };
        }
        Some(node)
    }
}

fn collect_matching<'a>(
    node: &'a VNode,
    predicate: &dyn Fn(&VElement) -> bool,
    found: &mut Vec<&'a VElement>,
) {
    if let VNode::Element(element) = node {
        if predicate(element) {
            found.push(element);
        }
        for child in &element.children {
            collect_matching(child, predicate, found);
        }
    }
}

/// One edit to a live tree. `path` lists child indices from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    Replace {
        path: Vec<usize>,
        node: VNode,
    },
    SetText {
        path: Vec<usize>,
        text: String,
    },
    SetAttributes {
        path: Vec<usize>,
        set: BTreeMap<String, String>,
        removed: Vec<String>,
    },
    AppendChildren {
        path: Vec<usize>,
        children: Vec<VNode>,
    },
    TruncateChildren {
        path: Vec<usize>,
        len: usize,
    },
}

impl Patch {
    pub fn path(&self) -> &[usize] {
        match self {
            Patch::Replace { path, .. }
            | Patch::SetText { path, .. }
            | Patch::SetAttributes { path, .. }
            | Patch::AppendChildren { path, .. }
            | Patch::TruncateChildren { path, .. } => path,
        }
    }
}

/// Patches that turn `old` into `new` when applied in order
pub fn diff(old: &VNode, new: &VNode) -> Vec<Patch> {
    let mut patches = Vec::new();
    diff_node(old, new, &mut Vec::new(), &mut patches);
    patches
}

fn diff_node(old: &VNode, new: &VNode, path: &mut Vec<usize>, patches: &mut Vec<Patch>) {
    match (old, new) {
        (VNode::Text(old_text), VNode::Text(new_text)) => {
            if old_text != new_text {
                patches.push(Patch::SetText {
                    path: path.clone(),
                    text: new_text.clone(),
                });
            }
        }
        (VNode::Element(old_el), VNode::Element(new_el)) if old_el.tag == new_el.tag => {
            diff_attributes(old_el, new_el, path, patches);

            let shared = old_el.children.len().min(new_el.children.len());
            for index in 0..shared {
                path.push(index);
                diff_node(&old_el.children[index], &new_el.children[index], path, patches);
                path.pop();
            }

            if new_el.children.len() > shared {
                patches.push(Patch::AppendChildren {
                    path: path.clone(),
                    children: new_el.children[shared..].to_vec(),
                });
            } else if old_el.children.len() > shared {
                patches.push(Patch::TruncateChildren {
                    path: path.clone(),
                    len: shared,
                });
            }
        }
        _ => patches.push(Patch::Replace {
            path: path.clone(),
            node: new.clone(),
        }),
    }
}

fn diff_attributes(old: &VElement, new: &VElement, path: &[usize], patches: &mut Vec<Patch>) {
    let set: BTreeMap<String, String> = new
        .attrs
        .iter()
        .filter(|(key, value)| old.attrs.get(*key) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    let removed: Vec<String> = old
        .attrs
        .keys()
        .filter(|key| !new.attrs.contains_key(*key))
        .cloned()
        .collect();

    if !set.is_empty() || !removed.is_empty() {
        patches.push(Patch::SetAttributes {
            path: path.to_vec(),
            set,
            removed,
        });
    }
}

/// Apply patches in order. Stops at the first patch whose path does not
/// name a node of the right kind.
pub fn apply_patches(root: &mut VNode, patches: &[Patch]) -> PickerResult<()> {
    for patch in patches {
        let invalid = || PickerError::InvalidPatchPath(patch.path().to_vec());
        let node = root.node_at_mut(patch.path()).ok_or_else(invalid)?;

        match (patch, node) {
            (Patch::Replace { node: replacement, .. }, node) => *node = replacement.clone(),
            (Patch::SetText { text, .. }, VNode::Text(content)) => *content = text.clone(),
            (Patch::SetAttributes { set, removed, .. }, VNode::Element(element)) => {
                for key in removed {
                    element.attrs.remove(key);
                }
                element
                    .attrs
                    .extend(set.iter().map(|(key, value)| (key.clone(), value.clone())));
            }
            (Patch::AppendChildren { children, .. }, VNode::Element(element)) => {
                element.children.extend(children.iter().cloned());
            }
            (Patch::TruncateChildren { len, .. }, VNode::Element(element)) => {
                element.children.truncate(*len);
            }
            _ => return Err(invalid()),
        }
    }
    Ok(())
}

/// Serialize to HTML
pub fn render_to_string(node: &VNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &VNode, out: &mut String) {
    match node {
        VNode::Text(content) => out.push_str(&escape(content, false)),
        VNode::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in &element.attrs {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&element.tag.as_str()) {
                return;
            }
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(&element.tag);
            out.push('>');
        }
    }
}

fn escape(raw: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
