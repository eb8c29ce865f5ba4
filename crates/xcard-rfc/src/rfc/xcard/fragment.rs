//! Detached XML trees handed to scribes.
//!
//! A fragment is an arena of nodes addressed by index. Index 0 is always
//! the root element; every other node records its parent, so the builder
//! can walk back up without holding references into the tree.

use std::fmt;

use quick_xml::escape::escape;

use super::namespace::QName;

/// Index of a node inside its [`XmlFragment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const ROOT: Self = Self(0);
}

/// A non-namespace attribute, keyed by its local name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Element {
        name: QName,
        attributes: Vec<Attribute>,
        children: Vec<NodeId>,
    },
    Text(String),
}

/// An owned XML subtree rooted at a single element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFragment {
    nodes: Vec<Node>,
}

impl XmlFragment {
    /// Creates a fragment holding only an empty root element.
    #[must_use]
    pub fn new(name: QName, attributes: Vec<Attribute>) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Element {
                    name,
                    attributes,
                    children: Vec::new(),
                },
            }],
        }
    }

    /// Returns the root element.
    #[must_use]
    pub fn root(&self) -> Element<'_> {
        Element {
            fragment: self,
            id: NodeId::ROOT,
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn push_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            kind,
        });
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
            children.push(id);
        }
        id
    }

    fn append_text(&mut self, parent: NodeId, text: &str) {
        let last_child = match &self.nodes[parent.0].kind {
            NodeKind::Element { children, .. } => children.last().copied(),
            NodeKind::Text(_) => return,
        };
        if let Some(last) = last_child
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].kind
        {
            existing.push_str(text);
            return;
        }
        self.push_child(parent, NodeKind::Text(text.to_owned()));
    }

    fn write_element(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        parent_ns: Option<&str>,
    ) -> fmt::Result {
        let NodeKind::Element {
            name,
            attributes,
            children,
        } = &self.node(id).kind
        else {
            return Ok(());
        };

        let ns = name.namespace_uri();
        write!(f, "<{}", name.local_name())?;
        match parent_ns {
            None if ns.is_empty() => {}
            Some(parent) if parent == ns => {}
            _ => write!(f, " xmlns=\"{}\"", escape(ns))?,
        }
        for attr in attributes {
            write!(f, " {}=\"{}\"", attr.name, escape(attr.value.as_str()))?;
        }
        if children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">")?;
        for &child in children {
            match &self.node(child).kind {
                NodeKind::Text(text) => f.write_str(&escape(text.as_str()))?,
                NodeKind::Element { .. } => self.write_element(f, child, Some(ns))?,
            }
        }
        write!(f, "</{}>", name.local_name())
    }
}

/// Serializes the fragment as XML.
///
/// Namespaces are written as default-namespace declarations wherever an
/// element's namespace differs from its parent's, so the output is
/// self-contained.
impl fmt::Display for XmlFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_element(f, NodeId::ROOT, None)
    }
}

/// A borrowed element inside a fragment.
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    fragment: &'a XmlFragment,
    id: NodeId,
}

/// A child of an element: a nested element or a run of text.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Element(Element<'a>),
    Text(&'a str),
}

impl<'a> Element<'a> {
    fn parts(&self) -> (&'a QName, &'a [Attribute], &'a [NodeId]) {
        match &self.fragment.node(self.id).kind {
            NodeKind::Element {
                name,
                attributes,
                children,
            } => (name, attributes, children),
            NodeKind::Text(_) => unreachable!("element handle points at a text node"),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'a QName {
        self.parts().0
    }

    #[must_use]
    pub fn local_name(&self) -> &'a str {
        self.name().local_name()
    }

    #[must_use]
    pub fn attributes(&self) -> &'a [Attribute] {
        self.parts().1
    }

    /// Returns the value of the attribute with the given local name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Iterates the children in document order.
    pub fn children(&self) -> impl Iterator<Item = Child<'a>> + use<'a> {
        let fragment = self.fragment;
        self.parts()
            .2
            .iter()
            .map(move |&id| match &fragment.node(id).kind {
                NodeKind::Text(text) => Child::Text(text),
                NodeKind::Element { .. } => Child::Element(Element { fragment, id }),
            })
    }

    /// Iterates the child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.children().filter_map(|child| match child {
            Child::Element(element) => Some(element),
            Child::Text(_) => None,
        })
    }

    /// Iterates the xCard-namespace child elements with the given local name.
    pub fn xcard_elements(&self, local_name: &'a str) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.elements()
            .filter(move |e| e.name().is_xcard() && e.local_name() == local_name)
    }

    /// Returns the first xCard-namespace child element with the given local name.
    #[must_use]
    pub fn first_xcard_element(&self, local_name: &'a str) -> Option<Element<'a>> {
        self.xcard_elements(local_name).next()
    }

    /// Returns the parent element, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Element<'a>> {
        self.fragment
            .node(self.id)
            .parent
            .map(|id| Element {
                fragment: self.fragment,
                id,
            })
    }

    /// Concatenates all descendant text in document order.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.children() {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(element) => element.collect_text(out),
            }
        }
    }
}

/// Grows a fragment one event at a time.
///
/// `current` is the element that receives new children. It moves down on
/// [`open`](Self::open) and back up on [`close`](Self::close), mirroring the
/// open elements of the property being read.
#[derive(Debug)]
pub struct FragmentBuilder {
    fragment: XmlFragment,
    current: NodeId,
}

impl FragmentBuilder {
    /// Starts a fragment at the given root element.
    #[must_use]
    pub fn new(name: QName, attributes: Vec<Attribute>) -> Self {
        Self {
            fragment: XmlFragment::new(name, attributes),
            current: NodeId::ROOT,
        }
    }

    /// Appends text to the current element. Empty text is ignored.
    pub fn text(&mut self, text: &str) {
        if !text.is_empty() {
            self.fragment.append_text(self.current, text);
        }
    }

    /// Appends a child element and makes it current.
    pub fn open(&mut self, name: QName, attributes: Vec<Attribute>) {
        self.current = self.fragment.push_child(
            self.current,
            NodeKind::Element {
                name,
                attributes,
                children: Vec::new(),
            },
        );
    }

    /// Makes the parent of the current element current again.
    ///
    /// Closing at the root leaves the root current.
    pub fn close(&mut self) {
        if let Some(parent) = self.fragment.node(self.current).parent {
            self.current = parent;
        }
    }

    /// Finishes the tree.
    #[must_use]
    pub fn finish(self) -> XmlFragment {
        self.fragment
    }
}
