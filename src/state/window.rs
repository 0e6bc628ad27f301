use serde::{Deserialize, Serialize};

/// Top-left corner of a window, in layout units
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow either dimension up to `min` if it falls short
    pub fn at_least(&self, min: Size) -> Self {
        Self {
            width: self.width.max(min.width),
            height: self.height.max(min.height),
        }
    }
}

/// Position and size captured together (used for restore-after-maximize)
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

/// Area the desktop lays windows out in, taskbar included
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SnapSide {
    Left,
    Right,
}

impl SnapSide {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(SnapSide::Left),
            "right" => Some(SnapSide::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    pub id: String,           // Unique, never reassigned
    pub kind: String,         // Content view hosted (e.g. "home", "post")
    pub key: Option<String>,  // Identity within a kind (post slug, username)
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub z_order: u64,         // Higher renders above lower
    pub is_maximized: bool,
    pub is_minimized: bool,
    pub previous_geometry: Option<Geometry>, // Set only while maximized
}

impl WindowRecord {
    pub fn geometry(&self) -> Geometry {
        Geometry {
            position: self.position,
            size: self.size,
        }
    }

    /// Geometry the window returns to when it is not maximized
    pub fn restore_geometry(&self) -> Geometry {
        match (self.is_maximized, self.previous_geometry) {
            (true, Some(previous)) => previous,
            _ => self.geometry(),
        }
    }

    pub fn matches_identity(&self, kind: &str, key: Option<&str>) -> bool {
        self.kind == kind && self.key.as_deref() == key
    }
}

/// Partial update merged into a record by [`super::WindowStore::update`].
///
/// `previous_geometry` is doubly optional so a patch can clear it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WindowPatch {
    pub title: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub z_order: Option<u64>,
    pub is_maximized: Option<bool>,
    pub is_minimized: Option<bool>,
    pub previous_geometry: Option<Option<Geometry>>,
}

impl WindowPatch {
    pub fn apply(self, record: &mut WindowRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(position) = self.position {
            record.position = position;
        }
        if let Some(size) = self.size {
            record.size = size;
        }
        if let Some(z_order) = self.z_order {
            record.z_order = z_order;
        }
        if let Some(is_maximized) = self.is_maximized {
            record.is_maximized = is_maximized;
        }
        if let Some(is_minimized) = self.is_minimized {
            record.is_minimized = is_minimized;
        }
        if let Some(previous_geometry) = self.previous_geometry {
            record.previous_geometry = previous_geometry;
        }
    }

    pub fn geometry(geometry: Geometry) -> Self {
        Self {
            position: Some(geometry.position),
            size: Some(geometry.size),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WindowRecord {
        WindowRecord {
            id: "w1".to_string(),
            kind: "post".to_string(),
            key: Some("hello-world".to_string()),
            title: "Hello".to_string(),
            position: Position::new(10.0, 20.0),
            size: Size::new(400.0, 300.0),
            z_order: 1,
            is_maximized: false,
            is_minimized: false,
            previous_geometry: None,
        }
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut win = record();
        WindowPatch {
            title: Some("Renamed".to_string()),
            ..WindowPatch::default()
        }
        .apply(&mut win);

        assert_eq!(win.title, "Renamed");
        assert_eq!(win.position, Position::new(10.0, 20.0));
        assert_eq!(win.z_order, 1);
    }

    #[test]
    fn patch_can_clear_previous_geometry() {
        let mut win = record();
        win.previous_geometry = Some(win.geometry());
        WindowPatch {
            previous_geometry: Some(None),
            ..WindowPatch::default()
        }
        .apply(&mut win);
        assert!(win.previous_geometry.is_none());
    }

    #[test]
    fn identity_requires_kind_and_key() {
        let win = record();
        assert!(win.matches_identity("post", Some("hello-world")));
        assert!(!win.matches_identity("post", None));
        assert!(!win.matches_identity("profile", Some("hello-world")));
    }

    #[test]
    fn size_at_least_clamps_each_axis() {
        let size = Size::new(100.0, 500.0).at_least(Size::new(320.0, 200.0));
        assert_eq!(size, Size::new(320.0, 500.0));
    }

    #[test]
    fn record_serializes_camel_case() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["zOrder"], 1);
        assert_eq!(value["isMaximized"], false);
        assert!(value.get("previousGeometry").is_some());
    }
}
