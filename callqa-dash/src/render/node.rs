//! Side-effect-free node descriptions
//!
//! Renderers produce these; the surface decides how to place them.

/// A node to place on the page
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with classes, attributes and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for an element by id
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.id.as_deref() == Some(id) {
            return Some(el);
        }
        el.children.iter().find_map(|c| c.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        let Node::Element(el) = self else {
            return None;
        };
        if el.id.as_deref() == Some(id) {
            return Some(el);
        }
        el.children.iter_mut().find_map(|c| c.find_by_id_mut(id))
    }

    /// All elements (self included) carrying `class`
    pub fn find_by_class<'a>(&'a self, class: &str, out: &mut Vec<&'a Element>) {
        if let Node::Element(el) = self {
            if el.has_class(class) {
                out.push(el);
            }
            for child in &el.children {
                child.find_by_class(class, out);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add or remove a class; returns whether anything changed
    pub fn set_class(&mut self, class: &str, on: bool) -> bool {
        let present = self.has_class(class);
        match (present, on) {
            (false, true) => {
                self.classes.push(class.to_string());
                true
            }
            (true, false) => {
                self.classes.retain(|c| c != class);
                true
            }
            _ => false,
        }
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_and_lookup() {
        let node: Node = Element::new("div")
            .id("outer")
            .child(Element::new("span").id("inner").class("x").text("Hello"))
            .text(", world")
            .into();

        assert_eq!(node.text_content(), "Hello, world");
        assert_eq!(node.find_by_id("inner").map(|e| e.tag), Some("span"));
        assert!(node.find_by_id("missing").is_none());

        let mut found = Vec::new();
        node.find_by_class("x", &mut found);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_set_class_is_idempotent() {
        let mut el = Element::new("div");
        assert!(el.set_class("highlight", true));
        assert!(!el.set_class("highlight", true));
        assert_eq!(el.classes, vec!["highlight"]);
        assert!(el.set_class("highlight", false));
        assert!(el.classes.is_empty());
    }
}
