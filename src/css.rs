//!
//! Style values for DOM like surfaces.
//!
//! [style_fit_container] makes a replaced element (image, video)
//! fill its container. [CssSurface] applies the clip and handle
//! values as inline styles, the way a browser binding does.
//!
//! ```rust
//! use rat_compare::css::{style_fit_container, FitContainer};
//!
//! let style = style_fit_container(FitContainer::new().object_fit("contain"));
//! assert_eq!(style.get("objectFit"), Some("contain"));
//! ```
//!

use crate::engine::SliderSurface;
use crate::geometry::{ContainerBounds, ScrollOffset};
use ratatui::layout::Direction;
use std::borrow::Cow;

/// Ordered list of style properties.
///
/// Property names are kept as given, usually in camelCase.
/// Setting an existing property replaces the value in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CssStyle {
    props: Vec<(String, String)>,
}

/// Options for [style_fit_container].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FitContainer<'a> {
    pub box_sizing: Option<Cow<'a, str>>,
    pub object_fit: Option<Cow<'a, str>>,
    pub object_position: Option<Cow<'a, str>>,
    /// Applied last.
    pub overrides: CssStyle,
}

/// Surface that keeps the inline styles of the clip and handle wrappers.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CssSurface {
    /// Container bounds as reported by the layout.
    pub bounds: ContainerBounds,
    /// Viewport scroll offset.
    pub scroll: ScrollOffset,
    /// Inline style of the clip wrapper.
    pub clip: CssStyle,
    /// Inline style of the handle wrapper.
    pub handle: CssStyle,
}

impl CssStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(v) = self.props.iter_mut().find(|(n, _)| *n == name) {
            v.1 = value;
        } else {
            self.props.push((name, value));
        }
    }

    /// Set a property.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Value of a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove a property.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.props.iter().position(|(n, _)| n == name)?;
        Some(self.props.remove(idx).1)
    }

    /// Apply all properties of other. Later wins.
    pub fn merge(&mut self, other: &CssStyle) {
        for (n, v) in other.iter() {
            self.set(n, v);
        }
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Properties in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// As inline css, property names in kebab-case.
    pub fn to_inline(&self) -> String {
        let mut s = String::new();
        for (n, v) in self.iter() {
            if !s.is_empty() {
                s.push(' ');
            }
            s.push_str(&kebab_case(n));
            s.push_str(": ");
            s.push_str(v);
            s.push(';');
        }
        s
    }
}

// camelCase to kebab-case. A leading vendor prefix like WebkitX
// becomes -webkit-x.
fn kebab_case(name: &str) -> String {
    let mut s = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            s.push('-');
            s.push(c.to_ascii_lowercase());
        } else {
            s.push(c);
        }
    }
    s
}

impl<'a> FitContainer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// box-sizing, defaults to border-box.
    pub fn box_sizing(mut self, box_sizing: impl Into<Cow<'a, str>>) -> Self {
        self.box_sizing = Some(box_sizing.into());
        self
    }

    /// object-fit, defaults to cover.
    pub fn object_fit(mut self, object_fit: impl Into<Cow<'a, str>>) -> Self {
        self.object_fit = Some(object_fit.into());
        self
    }

    /// object-position, defaults to center.
    pub fn object_position(mut self, object_position: impl Into<Cow<'a, str>>) -> Self {
        self.object_position = Some(object_position.into());
        self
    }

    /// Extra property. Overrides anything else.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.set(name, value);
        self
    }
}

/// Style for a replaced element to fill its container.
pub fn style_fit_container(options: FitContainer<'_>) -> CssStyle {
    let mut style = CssStyle::new()
        .with("display", "block")
        .with("width", "100%")
        .with("height", "100%")
        .with("maxWidth", "100%")
        .with(
            "boxSizing",
            options.box_sizing.unwrap_or(Cow::Borrowed("border-box")),
        )
        .with(
            "objectFit",
            options.object_fit.unwrap_or(Cow::Borrowed("cover")),
        )
        .with(
            "objectPosition",
            options.object_position.unwrap_or(Cow::Borrowed("center")),
        );
    style.merge(&options.overrides);
    style
}

/// Style for the root container.
///
/// The given style is merged last.
pub fn container_style(direction: Direction, dragging: bool, style: &CssStyle) -> CssStyle {
    let mut root = CssStyle::new()
        .with("position", "relative")
        .with("overflow", "hidden");
    if dragging {
        root.set("cursor", resize_cursor(direction));
    }
    root.set("userSelect", "none");
    root.set("KhtmlUserSelect", "none");
    root.set("msUserSelect", "none");
    root.set("MozUserSelect", "none");
    root.set("WebkitUserSelect", "none");
    root.merge(style);
    root
}

/// Marker attribute for the parts of the slider.
pub const DATA_RCS: &str = "data-rcs";
/// [DATA_RCS] value of the root container.
pub const RCS_ROOT: &str = "root";
/// [DATA_RCS] value of the clip wrapper.
pub const RCS_CLIP: &str = "clip-item";
/// [DATA_RCS] value of the handle wrapper.
pub const RCS_HANDLE: &str = "handle-container";
/// [DATA_RCS] value of an image item.
pub const RCS_IMAGE: &str = "image";

/// Base style of the clip wrapper around the first item.
///
/// The clip value itself is set by the surface.
pub fn clip_container_style() -> CssStyle {
    CssStyle::new()
        .with("position", "absolute")
        .with("top", "0")
        .with("left", "0")
        .with("width", "100%")
        .with("height", "100%")
        .with("willChange", "clip")
        .with("userSelect", "none")
        .with("KhtmlUserSelect", "none")
        .with("MozUserSelect", "none")
        .with("WebkitUserSelect", "none")
}

/// Base styles of the handle wrapper.
///
/// Returns the outer style, which is moved along the axis, and the
/// style of the inner element that centers the handle on the divider.
pub fn handle_container_style(direction: Direction) -> (CssStyle, CssStyle) {
    let outer = CssStyle::new()
        .with("position", "absolute")
        .with("top", "0")
        .with("width", "100%")
        .with("height", "100%")
        .with("pointerEvents", "none");

    let inner = match direction {
        Direction::Horizontal => CssStyle::new()
            .with("position", "absolute")
            .with("height", "100%")
            .with("transform", "translateX(-50%)")
            .with("pointerEvents", "all"),
        Direction::Vertical => CssStyle::new()
            .with("position", "absolute")
            .with("width", "100%")
            .with("transform", "translateY(-50%)")
            .with("pointerEvents", "all"),
    };

    (outer, inner)
}

/// Style for an image item.
///
/// The fit-container defaults with the given style on top.
/// The element should be tagged with [DATA_RCS] = [RCS_IMAGE].
pub fn image_style(style: &CssStyle) -> CssStyle {
    style_fit_container(FitContainer {
        overrides: style.clone(),
        ..Default::default()
    })
}

/// Cursor while dragging.
pub fn resize_cursor(direction: Direction) -> &'static str {
    match direction {
        Direction::Horizontal => "ew-resize",
        Direction::Vertical => "ns-resize",
    }
}

/// Value of the `clip` property for the clip wrapper.
pub fn clip_value(direction: Direction, px: f64) -> String {
    match direction {
        Direction::Horizontal => format!("rect(auto,{}px,auto,auto)", px),
        Direction::Vertical => format!("rect(auto,auto,{}px,auto)", px),
    }
}

/// Value of the `transform` property for the handle wrapper.
pub fn handle_transform(direction: Direction, px: f64) -> String {
    match direction {
        Direction::Horizontal => format!("translate3d({}px,0,0)", px),
        Direction::Vertical => format!("translate3d(0,{}px,0)", px),
    }
}

impl CssSurface {
    /// Surface with the base wrapper styles.
    pub fn new(bounds: ContainerBounds) -> Self {
        Self {
            bounds,
            scroll: Default::default(),
            clip: clip_container_style(),
            handle: handle_container_style(Direction::Horizontal).0,
        }
    }
}

impl SliderSurface for CssSurface {
    fn bounds(&self) -> ContainerBounds {
        self.bounds
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn set_clip(&mut self, direction: Direction, px: f64) {
        self.clip.set("clip", clip_value(direction, px));
    }

    fn set_handle_offset(&mut self, direction: Direction, px: f64) {
        self.handle.set("transform", handle_transform(direction, px));
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::CssStyle;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt::Formatter;

    impl Serialize for CssStyle {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (n, v) in self.iter() {
                map.serialize_entry(n, v)?;
            }
            map.end()
        }
    }

    struct CssStyleVisitor;

    impl<'de> Visitor<'de> for CssStyleVisitor {
        type Value = CssStyle;

        fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map of css properties")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut style = CssStyle::new();
            while let Some((n, v)) = map.next_entry::<String, String>()? {
                style.set(n, v);
            }
            Ok(style)
        }
    }

    impl<'de> Deserialize<'de> for CssStyle {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_map(CssStyleVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_defaults() {
        let s = style_fit_container(FitContainer::new());
        let v = s.iter().collect::<Vec<_>>();
        assert_eq!(
            v,
            vec![
                ("display", "block"),
                ("width", "100%"),
                ("height", "100%"),
                ("maxWidth", "100%"),
                ("boxSizing", "border-box"),
                ("objectFit", "cover"),
                ("objectPosition", "center"),
            ]
        );
    }

    #[test]
    fn test_fit_overrides() {
        let s = style_fit_container(
            FitContainer::new()
                .object_position("left top")
                .prop("display", "inline-block")
                .prop("borderRadius", "4px"),
        );
        assert_eq!(s.get("display"), Some("inline-block"));
        assert_eq!(s.get("objectPosition"), Some("left top"));
        assert_eq!(s.get("borderRadius"), Some("4px"));
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_inline() {
        let s = CssStyle::new()
            .with("maxWidth", "100%")
            .with("WebkitUserSelect", "none");
        assert_eq!(s.to_inline(), "max-width: 100%; -webkit-user-select: none;");
    }

    #[test]
    fn test_values() {
        assert_eq!(
            clip_value(Direction::Horizontal, 256.0),
            "rect(auto,256px,auto,auto)"
        );
        assert_eq!(
            clip_value(Direction::Vertical, 12.5),
            "rect(auto,auto,12.5px,auto)"
        );
        assert_eq!(
            handle_transform(Direction::Horizontal, 256.0),
            "translate3d(256px,0,0)"
        );
        assert_eq!(
            handle_transform(Direction::Vertical, 0.0),
            "translate3d(0,0px,0)"
        );
    }

    #[test]
    fn test_container_style() {
        let s = container_style(
            Direction::Vertical,
            true,
            &CssStyle::new().with("overflow", "visible"),
        );
        assert_eq!(s.get("position"), Some("relative"));
        assert_eq!(s.get("overflow"), Some("visible"));
        assert_eq!(s.get("cursor"), Some("ns-resize"));

        let s = container_style(Direction::Horizontal, false, &CssStyle::new());
        assert_eq!(s.get("cursor"), None);
    }

    #[test]
    fn test_wrapper_styles() {
        let s = clip_container_style();
        assert_eq!(s.get("position"), Some("absolute"));
        assert_eq!(s.get("willChange"), Some("clip"));
        assert_eq!(s.get("WebkitUserSelect"), Some("none"));

        let (outer, inner) = handle_container_style(Direction::Horizontal);
        assert_eq!(outer.get("pointerEvents"), Some("none"));
        assert_eq!(inner.get("transform"), Some("translateX(-50%)"));
        assert_eq!(inner.get("height"), Some("100%"));
        assert_eq!(inner.get("width"), None);

        let (_, inner) = handle_container_style(Direction::Vertical);
        assert_eq!(inner.get("transform"), Some("translateY(-50%)"));
        assert_eq!(inner.get("width"), Some("100%"));
        assert_eq!(inner.get("pointerEvents"), Some("all"));
    }

    #[test]
    fn test_image_style() {
        let s = image_style(
            &CssStyle::new()
                .with("objectFit", "contain")
                .with("filter", "grayscale(1)"),
        );
        assert_eq!(s.get("objectFit"), Some("contain"));
        assert_eq!(s.get("objectPosition"), Some("center"));
        assert_eq!(s.get("filter"), Some("grayscale(1)"));
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_surface_base_styles() {
        let mut s = CssSurface::new(ContainerBounds::new(0.0, 0.0, 100.0, 100.0));
        s.set_clip(Direction::Horizontal, 40.0);
        s.set_handle_offset(Direction::Horizontal, 40.0);
        assert_eq!(s.clip.get("willChange"), Some("clip"));
        assert_eq!(s.clip.get("clip"), Some("rect(auto,40px,auto,auto)"));
        assert_eq!(s.handle.get("pointerEvents"), Some("none"));
        assert_eq!(s.handle.get("transform"), Some("translate3d(40px,0,0)"));
    }
}
