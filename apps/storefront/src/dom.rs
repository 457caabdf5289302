//! # Retained Element Tree
//!
//! A small in-memory document the views patch in place.
//!
//! ## Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Document                                       │
//! │                                                                         │
//! │  root ("document", receives keydown)                                   │
//! │    └── body                                                             │
//! │          └── .page > .page__wrapper > header, main.gallery             │
//! │          └── #modal-container > .modal__content                        │
//! │                                                                         │
//! │  templates: id → Element  (cloned with `Document::template`)           │
//! │                                                                         │
//! │  Element = Rc<RefCell<Node>>: cloning an Element clones the handle,    │
//! │  `deep_clone` copies the subtree without listeners.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Events are delivered to their target only; there is no bubbling. Clicks on
//! a disabled element are dropped, and an `Input` event stores its value on
//! the target before listeners run.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{DomError, DomResult};

static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

const VOID_TAGS: [&str; 2] = ["img", "input"];

// =============================================================================
// Events
// =============================================================================

/// A user interaction delivered to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    Input { value: String },
    Submit,
    KeyDown { key: String },
}

impl DomEvent {
    pub fn input(value: impl Into<String>) -> Self {
        DomEvent::Input {
            value: value.into(),
        }
    }

    pub fn key(key: impl Into<String>) -> Self {
        DomEvent::KeyDown { key: key.into() }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Click => EventKind::Click,
            DomEvent::Input { .. } => EventKind::Input,
            DomEvent::Submit => EventKind::Submit,
            DomEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Submit,
    KeyDown,
}

/// Handle returned by [`Element::on`], used to detach the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Rc<dyn Fn(&DomEvent)>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    handler: Handler,
}

// =============================================================================
// Selectors
// =============================================================================

/// The selector forms the views use.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    /// `.name`
    Class(String),
    /// `#id`
    Id(String),
    /// `tag`
    Tag(String),
    /// `tag[attr="value"]`
    TagAttr {
        tag: String,
        attr: String,
        value: String,
    },
}

impl Selector {
    fn parse(selector: &str) -> DomResult<Self> {
        let invalid = || DomError::InvalidSelector(selector.to_string());
        let is_ident = |s: &str| {
            !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        };

        if let Some(class) = selector.strip_prefix('.') {
            return is_ident(class)
                .then(|| Selector::Class(class.to_string()))
                .ok_or_else(invalid);
        }
        if let Some(id) = selector.strip_prefix('#') {
            return is_ident(id)
                .then(|| Selector::Id(id.to_string()))
                .ok_or_else(invalid);
        }
        if let Some((tag, rest)) = selector.split_once('[') {
            let inner = rest.strip_suffix(']').ok_or_else(invalid)?;
            let (attr, value) = inner.split_once('=').ok_or_else(invalid)?;
            let value = value.trim_matches('"');
            if !is_ident(tag) || !is_ident(attr) || value.is_empty() {
                return Err(invalid());
            }
            return Ok(Selector::TagAttr {
                tag: tag.to_string(),
                attr: attr.to_string(),
                value: value.to_string(),
            });
        }
        if is_ident(selector) {
            return Ok(Selector::Tag(selector.to_string()));
        }
        Err(invalid())
    }

    fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Id(id) => node.attrs.get("id") == Some(id),
            Selector::Tag(tag) => node.tag == *tag,
            Selector::TagAttr { tag, attr, value } => {
                node.tag == *tag && node.attrs.get(attr) == Some(value)
            }
        }
    }
}

// =============================================================================
// Element
// =============================================================================

struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    children: Vec<Element>,
    listeners: Vec<Listener>,
}

/// Shared handle to one node of the tree.
#[derive(Clone)]
pub struct Element(Rc<RefCell<Node>>);

/// Non-owning handle, for listeners that refer back to their own subtree.
#[derive(Clone)]
pub struct WeakElement(Weak<RefCell<Node>>);

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("Element")
            .field("tag", &node.tag)
            .field("classes", &node.classes)
            .field("children", &node.children.len())
            .finish()
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element(Rc::new(RefCell::new(Node {
            tag: tag.to_string(),
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
            listeners: Vec::new(),
        })))
    }

    // -------------------------------------------------------------------------
    // Builder helpers (used by the document templates)
    // -------------------------------------------------------------------------

    /// Adds space-separated classes.
    pub fn with_class(self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.add_class(class);
        }
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append(child);
        self
    }

    // -------------------------------------------------------------------------
    // Identity
    // -------------------------------------------------------------------------

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    // -------------------------------------------------------------------------
    // Classes and attributes
    // -------------------------------------------------------------------------

    pub fn add_class(&self, class: &str) {
        let mut node = self.0.borrow_mut();
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&self, name: &str) {
        self.0.borrow_mut().attrs.remove(name);
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0.borrow().attrs.get(name).cloned()
    }

    pub fn set_disabled(&self, disabled: bool) {
        if disabled {
            self.set_attr("disabled", "");
        } else {
            self.remove_attr("disabled");
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.0.borrow().attrs.contains_key("disabled")
    }

    pub fn set_value(&self, value: &str) {
        self.set_attr("value", value);
    }

    pub fn value(&self) -> String {
        self.attr("value").unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Content
    // -------------------------------------------------------------------------

    /// Replaces the whole content with plain text, like `textContent`.
    pub fn set_text(&self, text: &str) {
        let mut node = self.0.borrow_mut();
        node.children.clear();
        node.text = text.to_string();
    }

    /// Text of this node and all its descendants, in document order.
    pub fn text(&self) -> String {
        let node = self.0.borrow();
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&child.text());
        }
        out
    }

    pub fn append(&self, child: Element) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn replace_children(&self, children: Vec<Element>) {
        let mut node = self.0.borrow_mut();
        node.text.clear();
        node.children = children;
    }

    pub fn clear(&self) {
        self.replace_children(Vec::new());
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    /// Copies the subtree. Listeners are not copied.
    pub fn deep_clone(&self) -> Element {
        let node = self.0.borrow();
        Element(Rc::new(RefCell::new(Node {
            tag: node.tag.clone(),
            classes: node.classes.clone(),
            attrs: node.attrs.clone(),
            text: node.text.clone(),
            children: node.children.iter().map(Element::deep_clone).collect(),
            listeners: Vec::new(),
        })))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// First descendant matching `selector`, depth-first.
    pub fn query(&self, selector: &str) -> DomResult<Option<Element>> {
        let selector = Selector::parse(selector)?;
        Ok(self.find_first(&selector))
    }

    /// Every descendant matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> DomResult<Vec<Element>> {
        let selector = Selector::parse(selector)?;
        let mut found = Vec::new();
        self.collect(&selector, &mut found);
        Ok(found)
    }

    /// Like [`Element::query`] but a missing element is an error.
    pub fn ensure(&self, selector: &str) -> DomResult<Element> {
        self.query(selector)?
            .ok_or_else(|| DomError::ElementNotFound(selector.to_string()))
    }

    fn find_first(&self, selector: &Selector) -> Option<Element> {
        for child in self.children() {
            if selector.matches(&child.0.borrow()) {
                return Some(child);
            }
            if let Some(found) = child.find_first(selector) {
                return Some(found);
            }
        }
        None
    }

    fn collect(&self, selector: &Selector, found: &mut Vec<Element>) {
        for child in self.children() {
            if selector.matches(&child.0.borrow()) {
                found.push(child.clone());
            }
            child.collect(selector, found);
        }
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    pub fn on<F>(&self, kind: EventKind, handler: F) -> ListenerId
    where
        F: Fn(&DomEvent) + 'static,
    {
        let id = ListenerId(NEXT_LISTENER.fetch_add(1, Ordering::Relaxed));
        self.0.borrow_mut().listeners.push(Listener {
            id,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    pub fn off(&self, id: ListenerId) {
        self.0.borrow_mut().listeners.retain(|l| l.id != id);
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    /// Delivers `event` to this element's listeners.
    pub fn dispatch(&self, event: &DomEvent) {
        if *event == DomEvent::Click && self.is_disabled() {
            return;
        }
        if let DomEvent::Input { value } = event {
            self.set_value(value);
        }

        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }

    /// Convenience for `dispatch(&DomEvent::Click)`.
    pub fn click(&self) {
        self.dispatch(&DomEvent::Click);
    }

    // -------------------------------------------------------------------------
    // Serialization
    // -------------------------------------------------------------------------

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let node = self.0.borrow();
        out.push('<');
        out.push_str(&node.tag);
        if !node.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&node.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &node.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push('>');

        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }

        out.push_str(&escape(&node.text));
        for child in &node.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Document
// =============================================================================

/// Page root plus the templates views are cloned from.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
    body: Element,
    templates: HashMap<String, Element>,
}

impl Document {
    pub fn new(body: Element) -> Self {
        let root = Element::new("html").with_child(body.clone());
        Document {
            root,
            body,
            templates: HashMap::new(),
        }
    }

    pub fn add_template(&mut self, id: &str, content: Element) {
        self.templates.insert(id.to_string(), content);
    }

    /// Document-level target, used for keyboard listeners.
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    /// Fresh copy of a template's content.
    pub fn template(&self, id: &str) -> DomResult<Element> {
        self.templates
            .get(id)
            .map(Element::deep_clone)
            .ok_or_else(|| DomError::TemplateNotFound(id.to_string()))
    }

    /// Looks `selector` up under the root, failing if absent.
    pub fn ensure_element(&self, selector: &str) -> DomResult<Element> {
        self.root.ensure(selector)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn sample() -> Element {
        Element::new("div").with_class("card").with_child(
            Element::new("div")
                .with_class("card__row")
                .with_child(Element::new("span").with_class("card__title").with_text("Title"))
                .with_child(
                    Element::new("input")
                        .with_class("form__input")
                        .with_attr("name", "address"),
                ),
        )
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(
            Selector::parse(".card__title").unwrap(),
            Selector::Class("card__title".into())
        );
        assert_eq!(
            Selector::parse("#modal-container").unwrap(),
            Selector::Id("modal-container".into())
        );
        assert_eq!(
            Selector::parse(r#"button[name="card"]"#).unwrap(),
            Selector::TagAttr {
                tag: "button".into(),
                attr: "name".into(),
                value: "card".into()
            }
        );
        assert_eq!(
            Selector::parse("input[name=email]").unwrap(),
            Selector::TagAttr {
                tag: "input".into(),
                attr: "name".into(),
                value: "email".into()
            }
        );
        assert!(Selector::parse("div > span").is_err());
        assert!(Selector::parse(".").is_err());
        assert!(Selector::parse("button[name]").is_err());
    }

    #[test]
    fn test_query_and_ensure() {
        let root = sample();
        let title = root.ensure(".card__title").unwrap();
        assert_eq!(title.text(), "Title");
        assert!(root.ensure(r#"input[name="address"]"#).is_ok());
        assert!(root.query(".card__price").unwrap().is_none());

        match root.ensure(".card__price") {
            Err(DomError::ElementNotFound(sel)) => assert_eq!(sel, ".card__price"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_query_excludes_self() {
        let root = sample();
        assert!(root.query(".card").unwrap().is_none());
    }

    #[test]
    fn test_classes() {
        let el = Element::new("span").with_class("a b");
        el.add_class("a");
        assert_eq!(el.classes(), vec!["a", "b"]);
        el.toggle_class("c", true);
        el.toggle_class("a", false);
        assert!(el.has_class("c"));
        assert!(!el.has_class("a"));
    }

    #[test]
    fn test_set_text_replaces_children() {
        let root = sample();
        root.set_text("plain");
        assert!(root.children().is_empty());
        assert_eq!(root.text(), "plain");
    }

    #[test]
    fn test_deep_clone_is_independent_and_drops_listeners() {
        let original = sample();
        original.on(EventKind::Click, |_| {});
        let copy = original.deep_clone();

        copy.ensure(".card__title").unwrap().set_text("Changed");
        assert_eq!(original.ensure(".card__title").unwrap().text(), "Title");
        assert_eq!(copy.listener_count(EventKind::Click), 0);
        assert!(!copy.ptr_eq(&original));
    }

    #[test]
    fn test_dispatch_and_off() {
        let el = Element::new("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = el.on(EventKind::Click, move |_| counter.set(counter.get() + 1));

        el.click();
        el.dispatch(&DomEvent::Submit);
        assert_eq!(hits.get(), 1);

        el.off(id);
        el.click();
        assert_eq!(hits.get(), 1);
        assert_eq!(el.listener_count(EventKind::Click), 0);
    }

    #[test]
    fn test_disabled_element_ignores_clicks() {
        let el = Element::new("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        el.on(EventKind::Click, move |_| counter.set(counter.get() + 1));

        el.set_disabled(true);
        el.click();
        assert_eq!(hits.get(), 0);

        el.set_disabled(false);
        el.click();
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_input_event_sets_value() {
        let input = Element::new("input");
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = seen.clone();
        input.on(EventKind::Input, move |event| {
            if let DomEvent::Input { value } = event {
                *sink.borrow_mut() = value.clone();
            }
        });

        input.dispatch(&DomEvent::input("Moscow"));
        assert_eq!(input.value(), "Moscow");
        assert_eq!(*seen.borrow(), "Moscow");
    }

    #[test]
    fn test_listener_may_detach_itself() {
        let el = Element::new("div");
        let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let weak = el.downgrade();
        let own = slot.clone();
        let id = el.on(EventKind::KeyDown, move |_| {
            if let (Some(el), Some(id)) = (weak.upgrade(), own.get()) {
                el.off(id);
            }
        });
        slot.set(Some(id));

        el.dispatch(&DomEvent::key("Escape"));
        assert_eq!(el.listener_count(EventKind::KeyDown), 0);
    }

    #[test]
    fn test_to_html_escapes_and_handles_void_tags() {
        let el = Element::new("p")
            .with_class("card__text")
            .with_text("<b> & \"q\"")
            .with_child(Element::new("img").with_attr("src", "/a.svg"));
        let button = Element::new("button");
        button.set_disabled(true);
        el.append(button);

        assert_eq!(
            el.to_html(),
            "<p class=\"card__text\">&lt;b&gt; &amp; &quot;q&quot;<img src=\"/a.svg\"><button disabled></button></p>"
        );
    }

    #[test]
    fn test_document_templates() {
        let mut doc = Document::new(Element::new("body").with_child(sample()));
        doc.add_template("card-basket", Element::new("li").with_class("basket__item"));

        let a = doc.template("card-basket").unwrap();
        let b = doc.template("card-basket").unwrap();
        assert!(!a.ptr_eq(&b));
        assert!(matches!(doc.template("nope"), Err(DomError::TemplateNotFound(_))));
        assert!(doc.ensure_element(".card__title").is_ok());
    }
}
