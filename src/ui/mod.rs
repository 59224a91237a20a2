//! The editing surface: element trees schemas render into, and the editor state that reacts
//! to input on them.

mod editor;
mod element;

pub use editor::*;
pub use element::*;

use crate::fonts::FontSet;
use crate::schema::Variables;
use serde::{Deserialize, Serialize};

/// Where a schema is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read-only preview
    #[default]
    Viewer,
    /// Filling in a generated form
    Form,
    /// Editing the template itself
    Designer,
}

/// Whether a schema accepts input: always in the designer, and in forms unless it is
/// read-only
pub fn is_editable(mode: Mode, read_only: bool) -> bool {
    match mode {
        Mode::Designer => true,
        Mode::Form => !read_only,
        Mode::Viewer => false,
    }
}

/// What the host surface supports, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `contenteditable="plaintext-only"` is available
    pub plaintext_only_editable: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            plaintext_only_editable: true,
        }
    }
}

impl Capabilities {
    /// Resolve capabilities from a browser's user agent string
    pub fn from_user_agent(user_agent: &str) -> Capabilities {
        let firefox = user_agent.to_ascii_lowercase().contains("firefox");
        Capabilities {
            plaintext_only_editable: !firefox,
        }
    }

    /// Make `element` editable as plain text. Without `plaintext-only` support, Enter and
    /// paste are handled explicitly so no markup ends up in the element.
    pub fn make_plain_text_editable(&self, element: Element) -> Element {
        if self.plaintext_only_editable {
            element.attr("contenteditable", "plaintext-only")
        } else {
            element
                .attr("contenteditable", "true")
                .on("keydown", EventHandler::InsertLineBreak)
                .on("paste", EventHandler::PastePlainText)
        }
    }
}

/// A single edit reported up to the designer: `schema[key] = value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePatch {
    pub key: String,
    pub value: String,
}

impl ChangePatch {
    pub fn content<S: Into<String>>(value: S) -> ChangePatch {
        ChangePatch {
            key: "content".to_string(),
            value: value.into(),
        }
    }
}

/// Everything a schema needs to render onto the editing surface
pub struct UiRenderContext<'a> {
    pub mode: Mode,
    pub capabilities: Capabilities,
    pub fonts: &'a FontSet,
    pub variables: &'a Variables,
    pub tab_index: Option<i32>,
}

/// The element tree a schema rendered, and the editor driving it when it is editable
#[derive(Debug, Clone)]
pub struct UiRender {
    pub root: Element,
    pub editor: Option<Editor>,
}

#[derive(Debug, Clone)]
pub enum Editor {
    Text(TextEditor),
    Progress(ProgressEditor),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editability_by_mode() {
        assert!(is_editable(Mode::Designer, true));
        assert!(is_editable(Mode::Form, false));
        assert!(!is_editable(Mode::Form, true));
        assert!(!is_editable(Mode::Viewer, false));
    }

    #[test]
    fn firefox_gets_explicit_handlers() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        let caps = Capabilities::from_user_agent(ua);
        assert!(!caps.plaintext_only_editable);

        let el = caps.make_plain_text_editable(Element::new("div"));
        assert_eq!(el.attribute("contenteditable"), Some("true"));
        assert!(el.handles("keydown", EventHandler::InsertLineBreak));
        assert!(el.handles("paste", EventHandler::PastePlainText));

        let el = Capabilities::default().make_plain_text_editable(Element::new("div"));
        assert_eq!(el.attribute("contenteditable"), Some("plaintext-only"));
        assert!(el.handlers.is_empty());
    }
}
