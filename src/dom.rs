//! Page-side collaborators.
//!
//! The orchestration never touches a real document. It measures elements
//! through a [`Layout`] and mutates element properties through a
//! [`PropertyTarget`].

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Rect, Size};

/// Measures element boxes in document coordinates (scroll-independent).
pub trait Layout {
    /// Box of the first element matching `selector`, if any.
    fn element_rect(&self, selector: &str) -> Option<Rect>;

    /// Visible viewport size.
    fn viewport(&self) -> Size;

    /// Full scrollable height of the document.
    fn document_height(&self) -> f32;

    /// Box of an element identified by id. Defaults to the `#id` selector.
    fn element_by_id(&self, id: &str) -> Option<Rect> {
        self.element_rect(&format!("#{id}"))
    }
}

/// A fixed, hand-authored layout.
///
/// Selectors are matched verbatim; there is no CSS engine behind this.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    elements: FxHashMap<String, Rect>,
    viewport: Size,
    document_height: f32,
}

impl StaticLayout {
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            elements: FxHashMap::default(),
            viewport,
            document_height: viewport.height,
        }
    }

    /// Adds an element. The document grows to contain it.
    #[must_use]
    pub fn with_element(mut self, selector: impl Into<String>, rect: Rect) -> Self {
        self.set_element(selector, rect);
        self
    }

    pub fn set_element(&mut self, selector: impl Into<String>, rect: Rect) {
        self.document_height = self.document_height.max(rect.bottom());
        self.elements.insert(selector.into(), rect);
    }

    pub fn remove_element(&mut self, selector: &str) -> Option<Rect> {
        self.elements.remove(selector)
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.document_height = self.document_height.max(viewport.height);
    }

    pub fn set_document_height(&mut self, height: f32) {
        self.document_height = height;
    }
}

impl Layout for StaticLayout {
    fn element_rect(&self, selector: &str) -> Option<Rect> {
        self.elements.get(selector).copied()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn document_height(&self) -> f32 {
        self.document_height
    }
}

/// Element properties a scroll timeline may drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    Scale,
    /// Rotation in degrees.
    Rotation,
    Opacity,
}

impl Property {
    /// Value an untouched element reports.
    #[must_use]
    pub fn default_value(self) -> f32 {
        match self {
            Self::Scale | Self::Opacity => 1.0,
            Self::X | Self::Y | Self::Rotation => 0.0,
        }
    }
}

/// Receives property writes for selected elements.
pub trait PropertyTarget {
    fn get(&self, selector: &str, property: Property) -> f32;

    fn set(&mut self, selector: &str, property: Property, value: f32);
}

/// Inline-style store: the current value of every driven property.
#[derive(Debug, Clone, Default)]
pub struct StyleStore {
    values: FxHashMap<String, BTreeMap<Property, f32>>,
    writes: u64,
}

impl StyleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every property explicitly written for `selector`.
    #[must_use]
    pub fn style(&self, selector: &str) -> Option<&BTreeMap<Property, f32>> {
        self.values.get(selector)
    }

    /// Total number of writes so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes
    }
}

impl PropertyTarget for StyleStore {
    fn get(&self, selector: &str, property: Property) -> f32 {
        self.values
            .get(selector)
            .and_then(|props| props.get(&property))
            .copied()
            .unwrap_or_else(|| property.default_value())
    }

    fn set(&mut self, selector: &str, property: Property, value: f32) {
        self.writes += 1;
        self.values
            .entry(selector.to_string())
            .or_default()
            .insert(property, value);
    }
}
