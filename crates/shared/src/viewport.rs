use crate::models::Position;

/// Hard upper bound on zoom, in multiples of native image pixels.
pub const MAX_SCALE: f64 = 3.0;

/// Per-step wheel zoom factors.
const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

/// Fallback natural dimensions used when image resolution fails.
pub const DEFAULT_IMAGE_WIDTH: f64 = 1200.0;
pub const DEFAULT_IMAGE_HEIGHT: f64 = 734.0;

/// Below this pinch span (in pixels) the scale factor is meaningless.
const MIN_PINCH_DISTANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// The affine transform applied to the image layer: uniform scale
/// followed by a translation, both in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    /// CSS transform string for the image layer (`transform-origin: 0 0`).
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// One continuous interaction. Created on gesture start, discarded on
/// gesture end; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    /// Pan deltas are measured between consecutive events, not from
    /// gesture start, so clamping never accumulates drift.
    Pan { last_x: f64, last_y: f64 },
    /// Pinch scales relative to a snapshot taken at gesture start.
    Pinch { start_distance: f64, start: Transform },
}

/// Pan/zoom state for one image inside a fixed viewport.
///
/// Owns the (scale, translate) triple and keeps it valid under layout
/// changes and gestures: `scale` stays within `[min_scale, MAX_SCALE]`
/// where `min_scale` is the cover-fit scale, and the transformed image
/// never reveals background inside the viewport (oversized axes clamp,
/// undersized axes center).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    viewport_width: f64,
    viewport_height: f64,
    image_width: f64,
    image_height: f64,
    min_scale: f64,
    transform: Transform,
    gesture: Option<Gesture>,
}

/// Cover fit: the larger axis ratio wins so the image fully covers the
/// viewport on both axes.
fn cover_scale(viewport_w: f64, viewport_h: f64, image_w: f64, image_h: f64) -> f64 {
    (viewport_w / image_w).max(viewport_h / image_h)
}

/// Boundary policy for one axis. An oversized axis keeps the image
/// edges outside the viewport; an undersized axis is pinned centered.
fn clamp_axis(translate: f64, viewport: f64, scaled: f64) -> f64 {
    if scaled > viewport {
        translate.clamp(viewport - scaled, 0.0)
    } else {
        (viewport - scaled) / 2.0
    }
}

fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    (dx * dx + dy * dy).sqrt()
}

fn sanitize_dimension(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Viewport {
    /// Initialize for the given viewport and image dimensions: cover-fit
    /// scale, image centered. Non-positive or non-finite image dimensions
    /// fall back to the configured defaults so `scale` is never zero.
    pub fn new(viewport_w: f64, viewport_h: f64, image_w: f64, image_h: f64) -> Self {
        let viewport_width = sanitize_dimension(viewport_w, 1.0);
        let viewport_height = sanitize_dimension(viewport_h, 1.0);
        let image_width = sanitize_dimension(image_w, DEFAULT_IMAGE_WIDTH);
        let image_height = sanitize_dimension(image_h, DEFAULT_IMAGE_HEIGHT);

        let scale = cover_scale(viewport_width, viewport_height, image_width, image_height);
        Viewport {
            viewport_width,
            viewport_height,
            image_width,
            image_height,
            min_scale: scale,
            transform: Transform {
                scale,
                translate_x: (viewport_width - image_width * scale) / 2.0,
                translate_y: (viewport_height - image_height * scale) / 2.0,
            },
            gesture: None,
        }
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Effective zoom ceiling. A small image in a large viewport can
    /// have a cover scale above `MAX_SCALE`; the floor wins.
    pub fn max_scale(&self) -> f64 {
        MAX_SCALE.max(self.min_scale)
    }

    pub fn image_size(&self) -> (f64, f64) {
        (self.image_width, self.image_height)
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Re-initialize after a layout change (e.g. orientation change),
    /// keeping the already-resolved image dimensions.
    pub fn resize(&mut self, viewport_w: f64, viewport_h: f64) {
        *self = Viewport::new(viewport_w, viewport_h, self.image_width, self.image_height);
    }

    /// Re-initialize after image dimensions are (re)resolved.
    pub fn set_image_size(&mut self, image_w: f64, image_h: f64) {
        *self = Viewport::new(self.viewport_width, self.viewport_height, image_w, image_h);
    }

    /// Back to the initial cover-fit transform. Bit-identical to a
    /// fresh `new()` with the same dimensions.
    pub fn reset(&mut self) -> Transform {
        *self = Viewport::new(
            self.viewport_width,
            self.viewport_height,
            self.image_width,
            self.image_height,
        );
        self.transform
    }

    // --- Pan ---

    pub fn begin_pan(&mut self, pointer_x: f64, pointer_y: f64) {
        self.gesture = Some(Gesture::Pan {
            last_x: pointer_x,
            last_y: pointer_y,
        });
    }

    pub fn update_pan(&mut self, pointer_x: f64, pointer_y: f64) -> Transform {
        let Some(Gesture::Pan { last_x, last_y }) = self.gesture else {
            return self.transform;
        };
        self.transform.translate_x += pointer_x - last_x;
        self.transform.translate_y += pointer_y - last_y;
        self.clamp();
        self.gesture = Some(Gesture::Pan {
            last_x: pointer_x,
            last_y: pointer_y,
        });
        self.transform
    }

    pub fn end_pan(&mut self) {
        self.gesture = None;
    }

    // --- Pinch ---

    pub fn begin_pinch(&mut self, ax: f64, ay: f64, bx: f64, by: f64) {
        self.gesture = Some(Gesture::Pinch {
            start_distance: distance(ax, ay, bx, by),
            start: self.transform,
        });
    }

    /// Scale relative to the pinch-start snapshot, keeping the current
    /// two-pointer midpoint visually fixed, then clamp.
    pub fn update_pinch(&mut self, ax: f64, ay: f64, bx: f64, by: f64) -> Transform {
        let Some(Gesture::Pinch {
            start_distance,
            start,
        }) = self.gesture
        else {
            return self.transform;
        };

        // Coincident pointers give an undefined scale factor. Re-arm the
        // session and skip the update until the fingers separate.
        if start_distance < MIN_PINCH_DISTANCE {
            self.begin_pinch(ax, ay, bx, by);
            return self.transform;
        }

        let scale_factor = distance(ax, ay, bx, by) / start_distance;
        let new_scale = (start.scale * scale_factor).clamp(self.min_scale, self.max_scale());

        let center_x = (ax + bx) / 2.0;
        let center_y = (ay + by) / 2.0;
        let ratio = new_scale / start.scale;

        self.transform = Transform {
            scale: new_scale,
            translate_x: center_x - (center_x - start.translate_x) * ratio,
            translate_y: center_y - (center_y - start.translate_y) * ratio,
        };
        self.clamp();
        self.transform
    }

    pub fn end_pinch(&mut self) {
        self.gesture = None;
    }

    // --- Wheel ---

    /// Discrete zoom step anchored at the pointer position.
    pub fn wheel_zoom(&mut self, pointer_x: f64, pointer_y: f64, direction: ZoomDirection) -> Transform {
        let factor = match direction {
            ZoomDirection::In => WHEEL_ZOOM_IN,
            ZoomDirection::Out => WHEEL_ZOOM_OUT,
        };
        let new_scale = (self.transform.scale * factor).clamp(self.min_scale, self.max_scale());
        let ratio = new_scale / self.transform.scale;

        self.transform.translate_x += (pointer_x - self.transform.translate_x) * (1.0 - ratio);
        self.transform.translate_y += (pointer_y - self.transform.translate_y) * (1.0 - ratio);
        self.transform.scale = new_scale;
        self.clamp();
        self.transform
    }

    // --- Coordinate mapping ---

    /// Image-space point to viewport pixels under the current transform.
    pub fn screen_position(&self, point: Position) -> Position {
        Position {
            x: point.x * self.transform.scale + self.transform.translate_x,
            y: point.y * self.transform.scale + self.transform.translate_y,
        }
    }

    /// Viewport pixels back to image space. Used for tap hit-testing.
    pub fn image_position(&self, point: Position) -> Position {
        Position {
            x: (point.x - self.transform.translate_x) / self.transform.scale,
            y: (point.y - self.transform.translate_y) / self.transform.scale,
        }
    }

    fn clamp(&mut self) {
        let scaled_w = self.image_width * self.transform.scale;
        let scaled_h = self.image_height * self.transform.scale;
        self.transform.translate_x =
            clamp_axis(self.transform.translate_x, self.viewport_width, scaled_w);
        self.transform.translate_y =
            clamp_axis(self.transform.translate_y, self.viewport_height, scaled_h);
    }
}
