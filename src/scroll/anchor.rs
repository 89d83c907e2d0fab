//! Trigger anchors such as `"top center"` or `"25% center"`.
//!
//! An anchor names a point on the trigger element and a point on the
//! viewport; the boundary is the scroll offset at which the two coincide.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ScrollyError;

/// A position along an extent: a fraction of it, or absolute pixels from its
/// top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Offset {
    Fraction(f32),
    Pixels(f32),
}

impl Offset {
    #[must_use]
    pub fn resolve(self, extent: f32) -> f32 {
        match self {
            Self::Fraction(f) => f * extent,
            Self::Pixels(px) => px,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        match token {
            "top" => Some(Self::Fraction(0.0)),
            "center" => Some(Self::Fraction(0.5)),
            "bottom" => Some(Self::Fraction(1.0)),
            _ => {
                if let Some(pct) = token.strip_suffix('%') {
                    pct.parse::<f32>().ok().map(|p| Self::Fraction(p / 100.0))
                } else {
                    token
                        .strip_suffix("px")
                        .unwrap_or(token)
                        .parse::<f32>()
                        .ok()
                        .map(Self::Pixels)
                }
            }
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fraction(v) if v == 0.0 => f.write_str("top"),
            Self::Fraction(v) if v == 0.5 => f.write_str("center"),
            Self::Fraction(v) if v == 1.0 => f.write_str("bottom"),
            Self::Fraction(v) => write!(f, "{}%", v * 100.0),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

/// `"<element> <viewport>"` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Anchor {
    pub element: Offset,
    pub viewport: Offset,
}

impl Anchor {
    #[must_use]
    pub const fn new(element: Offset, viewport: Offset) -> Self {
        Self { element, viewport }
    }

    /// Both points as fractions: `fractions(0.0, 0.5)` is `"top center"`.
    #[must_use]
    pub const fn fractions(element: f32, viewport: f32) -> Self {
        Self::new(Offset::Fraction(element), Offset::Fraction(viewport))
    }

    /// Scroll offset at which the anchor points meet, for an element whose
    /// box starts at document `top` with the given `height`.
    #[must_use]
    pub fn scroll_offset(&self, top: f32, height: f32, viewport_height: f32) -> f32 {
        top + self.element.resolve(height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Anchor {
    type Err = ScrollyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ScrollyError::InvalidAnchor(s.to_string()));
        };
        match (Offset::parse(element), Offset::parse(viewport)) {
            (Some(element), Some(viewport)) => Ok(Self { element, viewport }),
            _ => Err(ScrollyError::InvalidAnchor(s.to_string())),
        }
    }
}

impl TryFrom<String> for Anchor {
    type Error = ScrollyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Anchor> for String {
    fn from(anchor: Anchor) -> Self {
        anchor.to_string()
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}
