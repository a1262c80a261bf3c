//! Parsed markup tree and the traversal primitives the extractors rely on.
//!
//! Traversal is always in document order: depth-first, source order, the way
//! the nodes appear in the markup.

use anyhow::Context;
use scraper::{CaseSensitivity, ElementRef, Html};
use std::fs;
use std::path::Path;

use crate::error::{Result, ScrapeError};

/// A best-effort parse of one HTML document.
pub struct Page {
    document: Html,
}

impl Page {
    /// Parse markup; malformed input is repaired by the parser, never rejected.
    pub fn parse(markup: &str) -> Self {
        Self {
            document: Html::parse_document(markup),
        }
    }

    /// Load and parse the raw document persisted by `fetch`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScrapeError::MissingInput {
                path: path.to_path_buf(),
            }
            .into());
        }
        let markup = fs::read_to_string(path)
            .with_context(|| format!("Failed to read raw document {}", path.display()))?;
        Ok(Self::parse(&markup))
    }

    /// Every element in document order.
    fn elements(&self) -> impl Iterator<Item = ElementRef<'_>> {
        self.document
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
    }

    /// Elements carrying exactly `class` among their classes, in document order.
    ///
    /// The name is compared literally; `.`, `:` or `[` have no selector meaning.
    pub fn select_class(&self, class: &str) -> Result<Vec<ElementRef<'_>>> {
        if class.is_empty() || class.chars().any(char::is_whitespace) {
            return Err(ScrapeError::InvalidClassName {
                class: class.to_string(),
            }
            .into());
        }
        Ok(self
            .elements()
            .filter(|element| {
                element
                    .value()
                    .has_class(class, CaseSensitivity::CaseSensitive)
            })
            .collect())
    }

    /// Whether any text node contains `needle` (case-sensitive).
    pub fn contains_text(&self, needle: &str) -> bool {
        self.document
            .tree
            .root()
            .descendants()
            .any(|node| node.value().as_text().is_some_and(|text| text.contains(needle)))
    }

    /// Anchors with an `href` inside the container around the first text node
    /// containing `needle`.
    ///
    /// The container is reached by walking `depth` parents up from the text
    /// node, stopping early at the document root. Returns `None` when no text
    /// node contains `needle`.
    pub fn anchors_near_text(&self, needle: &str, depth: usize) -> Option<Vec<ElementRef<'_>>> {
        let marker = self
            .document
            .tree
            .root()
            .descendants()
            .find(|node| node.value().as_text().is_some_and(|text| text.contains(needle)))?;

        let mut container = marker;
        for _ in 0..depth {
            match container.parent() {
                Some(parent) => container = parent,
                None => break,
            }
        }

        // descendants() yields the container first; it is not part of its own scope
        let anchors = container
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| {
                element.value().name() == "a" && element.value().attr("href").is_some()
            })
            .collect();
        Some(anchors)
    }

    pub fn document_order(&self) -> DocumentOrder<'_> {
        DocumentOrder {
            elements: self.elements().collect(),
        }
    }
}

/// Precomputed document-order index over all elements of a page.
pub struct DocumentOrder<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> DocumentOrder<'a> {
    /// Nearest element named `tag` that starts before `element` in document
    /// order. Ancestors count as preceding; siblings are not required.
    pub fn preceding(&self, element: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
        let position = self
            .elements
            .iter()
            .position(|candidate| candidate.id() == element.id())?;
        self.elements[..position]
            .iter()
            .rev()
            .find(|candidate| candidate.value().name() == tag)
            .copied()
    }
}

/// Collapse whitespace runs (newlines included) to single spaces and trim.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized concatenation of every text node below `element`.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<String>())
}
