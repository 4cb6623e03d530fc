//! The drawable surface underneath every actor
//!
//! `Sprite` is the state a rendering backend reads to draw an actor. The core
//! writes it through property channels; the backend never writes it back.

use serde::{Deserialize, Serialize};

/// Renderer-facing transform and appearance of an actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    position: (f64, f64),
    /// Stored rotation in degrees, in screen convention (already negated)
    rotation: f64,
    scale: (f64, f64),
    center: (f64, f64),
    size: (f64, f64),
    image: Option<String>,
    visible: bool,
}

impl Sprite {
    /// Create a sprite of the given visual size, untransformed at the origin
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            position: (0.0, 0.0),
            rotation: 0.0,
            scale: (1.0, 1.0),
            center: (0.0, 0.0),
            size: (width, height),
            image: None,
            visible: true,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = (x, y);
    }

    pub fn set_x(&mut self, x: f64) {
        self.position.0 = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.position.1 = y;
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = degrees;
    }

    /// Horizontal and vertical scale factors
    pub fn scale(&self) -> (f64, f64) {
        self.scale
    }

    pub fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale = (sx, sy);
    }

    /// Rotation and scale pivot, relative to the top-left corner
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    pub fn set_center(&mut self, cx: f64, cy: f64) {
        self.center = (cx, cy);
    }

    /// Visual size before scaling
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    /// Change the visual size. The pivot is left where it is.
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = (width, height);
    }

    /// Key of the image the renderer should draw, if any
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Put the pivot at the geometric center of the current size
    pub fn center_axis(&mut self) {
        self.center = (self.size.0 / 2.0, self.size.1 / 2.0);
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
