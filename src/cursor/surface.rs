//! The automation surface a cursor drives
//!
//! A surface answers element and viewport queries and accepts low-level
//! pointer commands. Browser drivers, remote-desktop sessions and test
//! doubles all plug in here.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Point, Rect};

/// Failures reported by a surface
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The surface has been closed
    #[error("Surface is closed")]
    Closed,

    /// A wait ran out of time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Any other command or query failure
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Element selector
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// CSS selector
    Css(String),
    /// Structural path (XPath) selector
    XPath(String),
}

impl Selector {
    /// Classify a raw selector string
    ///
    /// Strings starting with `//` or `(//` are structural paths; everything
    /// else is CSS.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("//") || raw.starts_with("(//") {
            Selector::XPath(raw.to_string())
        } else {
            Selector::Css(raw.to_string())
        }
    }

    /// The selector text
    pub fn as_str(&self) -> &str {
        match self {
            Selector::Css(s) | Selector::XPath(s) => s,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A low-level pointer command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `to`, optionally at a given wall-clock time (ms)
    Move { to: Point, timestamp: Option<i64> },
    /// Button pressed
    Down {
        button: MouseButton,
        click_count: u32,
    },
    /// Button released
    Up {
        button: MouseButton,
        click_count: u32,
    },
}

/// Something a cursor can point at
#[derive(Debug, Clone, PartialEq)]
pub enum Target<E> {
    /// Resolved through the surface on every attempt
    Selector(String),
    /// An element handle the caller already holds
    Element(E),
}

impl<E> Target<E> {
    /// Human-readable description for errors
    pub fn describe(&self) -> String {
        match self {
            Target::Selector(s) => s.clone(),
            Target::Element(_) => "<element handle>".to_string(),
        }
    }
}

impl<E> From<&str> for Target<E> {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl<E> From<String> for Target<E> {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

/// Queries and commands against the controlled surface
#[async_trait]
pub trait Surface: Send + Sync + 'static {
    /// Handle to a live element
    type Element: Clone + Send + Sync + 'static;

    /// First element matching `selector`, if any
    async fn query_selector(
        &self,
        selector: &Selector,
    ) -> Result<Option<Self::Element>, SurfaceError>;

    /// Wait until `selector` matches; `SurfaceError::Timeout` when it never does
    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), SurfaceError>;

    /// Scroll `element` into the visible area
    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), SurfaceError>;

    /// Layout box of `element` in viewport coordinates, `None` if it has none
    async fn bounding_box(&self, element: &Self::Element) -> Result<Option<Rect>, SurfaceError>;

    /// Visible area, origin at (0, 0)
    async fn viewport(&self) -> Result<Rect, SurfaceError>;

    /// Whether the surface has gone away
    async fn is_closed(&self) -> bool;

    /// Send a pointer command
    async fn dispatch(&self, event: PointerEvent) -> Result<(), SurfaceError>;
}

#[async_trait]
impl<T: Surface> Surface for Arc<T> {
    type Element = T::Element;

    async fn query_selector(
        &self,
        selector: &Selector,
    ) -> Result<Option<Self::Element>, SurfaceError> {
        (**self).query_selector(selector).await
    }

    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), SurfaceError> {
        (**self).wait_for_selector(selector, timeout).await
    }

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), SurfaceError> {
        (**self).scroll_into_view(element).await
    }

    async fn bounding_box(&self, element: &Self::Element) -> Result<Option<Rect>, SurfaceError> {
        (**self).bounding_box(element).await
    }

    async fn viewport(&self) -> Result<Rect, SurfaceError> {
        (**self).viewport().await
    }

    async fn is_closed(&self) -> bool {
        (**self).is_closed().await
    }

    async fn dispatch(&self, event: PointerEvent) -> Result<(), SurfaceError> {
        (**self).dispatch(event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_syntax() {
        assert_eq!(
            Selector::parse("//button"),
            Selector::XPath("//button".into())
        );
        assert_eq!(
            Selector::parse("(//div)[2]"),
            Selector::XPath("(//div)[2]".into())
        );
        assert_eq!(Selector::parse("#submit"), Selector::Css("#submit".into()));
        assert_eq!(Selector::parse("div > /a").as_str(), "div > /a");
    }

    #[test]
    fn test_target_from_str() {
        let target: Target<u32> = "#login".into();
        assert_eq!(target, Target::Selector("#login".to_string()));
        assert_eq!(Target::Element(3u32).describe(), "<element handle>");
    }
}
