use std::fmt::{self, Write};

/// Behaviour the host surface wires to an element event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandler {
    /// Enter (without shift) inserts a line break rather than a new block
    InsertLineBreak,
    /// Pasting inserts the clipboard's plain text only
    PastePlainText,
    /// Recompute the dynamic font size from the element's text
    RecomputeFontSize,
    /// Report the element's text as the schema's new content
    CommitContent,
    /// Report the range input's value as the schema's new content
    UpdateProgress,
    /// Focus the element with the caret after its last character
    FocusAtEnd,
}

/// A node of the editing surface: the element tree a schema renders into its root element
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    /// Inline style declarations, in insertion order
    pub style: Vec<(String, String)>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
    /// Event handlers by event name (`keyup`, `paste`, ...)
    pub handlers: Vec<(String, EventHandler)>,
}

fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value,
        None => pairs.push((key.to_string(), value)),
    }
}

impl Element {
    pub fn new<S: Into<String>>(tag: S) -> Element {
        Element {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id<S: Into<String>>(mut self, id: S) -> Element {
        self.id = Some(id.into());
        self
    }

    pub fn style<V: ToString>(mut self, property: &str, value: V) -> Element {
        self.set_style(property, value);
        self
    }

    pub fn attr<V: ToString>(mut self, name: &str, value: V) -> Element {
        self.set_attr(name, value);
        self
    }

    pub fn text<S: Into<String>>(mut self, text: S) -> Element {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: Element) -> Element {
        self.children.push(child);
        self
    }

    pub fn on(mut self, event: &str, handler: EventHandler) -> Element {
        self.handlers.push((event.to_string(), handler));
        self
    }

    /// Set a style declaration, replacing an earlier value for the same property
    pub fn set_style<V: ToString>(&mut self, property: &str, value: V) {
        set_pair(&mut self.style, property, value.to_string());
    }

    pub fn set_attr<V: ToString>(&mut self, name: &str, value: V) {
        set_pair(&mut self.attributes, name, value.to_string());
    }

    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn handles(&self, event: &str, handler: EventHandler) -> bool {
        self.handlers
            .iter()
            .any(|(e, h)| e == event && *h == handler)
    }

    /// Depth-first search for the element with the given id, including this one
    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Text of this element and all of its descendants, in document order
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone().unwrap_or_default();
        for child in self.children.iter() {
            out.push_str(&child.text_content());
        }
        out
    }

    fn is_void(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "br" | "img")
    }

    /// Serialise the element tree as HTML. Event handlers are not serialised; the host wires
    /// them from [Element::handlers].
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write!(f, " id=\"{}\"", Escaped(id))?;
        }
        if !self.style.is_empty() {
            let mut style = String::new();
            for (i, (property, value)) in self.style.iter().enumerate() {
                if i > 0 {
                    style.push(' ');
                }
                write!(style, "{property}: {value};")?;
            }
            write!(f, " style=\"{}\"", Escaped(&style))?;
        }
        for (name, value) in self.attributes.iter() {
            write!(f, " {name}=\"{}\"", Escaped(value))?;
        }
        f.write_char('>')?;

        if self.is_void() {
            return Ok(());
        }

        if let Some(text) = &self.text {
            write!(f, "{}", Escaped(text))?;
        }
        for child in self.children.iter() {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Escapes text for use in HTML content and double-quoted attribute values
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0;
        let mut start = 0usize;
        for (i, b) in text.bytes().enumerate() {
            let esc = match b {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                b'\'' => "&#39;",
                _ => continue,
            };
            if start < i {
                f.write_str(&text[start..i])?;
            }
            f.write_str(esc)?;
            start = i + 1;
        }
        if start < text.len() {
            f.write_str(&text[start..])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_nested_elements() {
        let el = Element::new("div")
            .with_id("text-a")
            .style("width", "100%")
            .style("color", "#000")
            .child(Element::new("span").text("a < b & \"c\""))
            .child(Element::new("input").attr("type", "range"));
        assert_eq!(
            el.to_html(),
            "<div id=\"text-a\" style=\"width: 100%; color: #000;\">\
             <span>a &lt; b &amp; &quot;c&quot;</span>\
             <input type=\"range\"></div>"
        );
    }

    #[test]
    fn styles_are_replaced_in_place() {
        let mut el = Element::new("div").style("a", 1).style("b", 2);
        el.set_style("a", 3);
        assert_eq!(
            el.style,
            vec![("a".to_string(), "3".to_string()), ("b".into(), "2".into())]
        );
        assert_eq!(el.style_value("a"), Some("3"));
        assert_eq!(el.style_value("c"), None);
    }

    #[test]
    fn finds_descendants_by_id() {
        let mut root = Element::new("div").child(
            Element::new("div").child(Element::new("div").with_id("deep").text("x")),
        );
        assert_eq!(root.find("deep").map(|e| e.text_content()), Some("x".into()));
        if let Some(deep) = root.find_mut("deep") {
            deep.text = Some("y".into());
        }
        assert_eq!(root.text_content(), "y");
        assert!(root.find("missing").is_none());
    }
}
