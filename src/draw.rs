//! Canvas-style path construction and small layout helpers shared by the
//! card renderers.

use std::f64::consts::{PI, TAU};

use piet_common::{
    kurbo::{BezPath, Point, Rect},
    TextLayout,
};

/// Incremental path builder with HTML-canvas semantics.
///
/// `arc` draws a connecting line from the current point to the arc start and
/// preserves the sweep direction: the status badge cut-outs rely on
/// anticlockwise subpaths punching holes through non-zero winding. A sweep
/// spanning the whole circumference is normalized to a full circle instead of
/// collapsing to zero.
pub(crate) struct CanvasPath {
    path: BezPath,
    subpath_start: Option<Point>,
    current: Option<Point>,
}

impl CanvasPath {
    pub fn new() -> Self {
        Self {
            path: BezPath::new(),
            subpath_start: None,
            current: None,
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.path.move_to((x, y));
        self.subpath_start = Some(Point::new(x, y));
        self.current = Some(Point::new(x, y));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(x, y);
        }
        self.path.line_to((x, y));
        self.current = Some(Point::new(x, y));
        self
    }

    pub fn bezier_curve_to(
        &mut self,
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    ) -> &mut Self {
        self.path.curve_to((c1x, c1y), (c2x, c2y), (x, y));
        self.current = Some(Point::new(x, y));
        self
    }

    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) -> &mut Self {
        let sweep = canvas_sweep(start_angle, end_angle, anticlockwise);
        let start_x = cx + radius * start_angle.cos();
        let start_y = cy + radius * start_angle.sin();
        if self.current.is_some() {
            self.line_to(start_x, start_y);
        } else {
            self.move_to(start_x, start_y);
        }

        // One cubic per quarter turn keeps the approximation error invisible.
        let segments = ((sweep.abs() / (PI / 2.0)).ceil() as usize).max(1);
        let step = sweep / segments as f64;
        for i in 0..segments {
            let a1 = start_angle + step * i as f64;
            self.arc_segment(cx, cy, radius, a1, a1 + step);
        }
        self
    }

    fn arc_segment(&mut self, cx: f64, cy: f64, radius: f64, a1: f64, a2: f64) {
        let k = 4.0 / 3.0 * ((a2 - a1) / 4.0).tan();
        let (x1, y1) = (a1.cos(), a1.sin());
        let (x2, y2) = (a2.cos(), a2.sin());
        let at = |px: f64, py: f64| (cx + radius * px, cy + radius * py);
        let c1 = at(x1 - k * y1, y1 + k * x1);
        let c2 = at(x2 + k * y2, y2 - k * x2);
        let end = at(x2, y2);
        self.path.curve_to(c1, c2, end);
        self.current = Some(Point::new(end.0, end.1));
    }

    pub fn close(&mut self) -> &mut Self {
        self.path.close_path();
        // Canvas leaves the pen at the start of the closed subpath.
        self.current = self.subpath_start;
        self
    }

    pub fn finish(self) -> BezPath {
        self.path
    }
}

/// Signed sweep angle for a canvas `arc` call. Clockwise sweeps are positive
/// (y grows downward), anticlockwise negative.
fn canvas_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    let delta = if anticlockwise { start - end } else { end - start };
    let sweep = if delta >= TAU {
        TAU
    } else {
        let m = delta.rem_euclid(TAU);
        if m == 0.0 && delta != 0.0 {
            TAU
        } else {
            m
        }
    };
    if anticlockwise {
        -sweep
    } else {
        sweep
    }
}

/// Source crop rectangle for `cover` fitting: scale the image so it covers
/// the canvas in both axes, crop the overflow around the center.
pub(crate) fn cover_crop(img_w: f64, img_h: f64, canvas_w: f64, canvas_h: f64) -> Rect {
    const OFFSET_X: f64 = 0.5;
    const OFFSET_Y: f64 = 0.5;

    let scale = (canvas_w / img_w).min(canvas_h / img_h);
    let mut new_w = img_w * scale;
    let mut new_h = img_h * scale;

    // Fill whichever axis the scaled image leaves uncovered.
    let mut ratio = 1.0;
    if new_w < canvas_w {
        ratio = canvas_w / new_w;
    }
    if (ratio - 1.0).abs() < 1e-14 && new_h < canvas_h {
        ratio = canvas_h / new_h;
    }
    new_w *= ratio;
    new_h *= ratio;

    let crop_w = (img_w / (new_w / canvas_w)).min(img_w);
    let crop_h = (img_h / (new_h / canvas_h)).min(img_h);
    let crop_x = ((img_w - crop_w) * OFFSET_X).max(0.0);
    let crop_y = ((img_h - crop_h) * OFFSET_Y).max(0.0);

    Rect::new(crop_x, crop_y, crop_x + crop_w, crop_y + crop_h)
}

/// Origin that puts the layout's first-line alphabetic baseline at
/// `baseline_y`, mirroring how canvas `fillText` anchors text.
pub(crate) fn baseline_origin(layout: &impl TextLayout, x: f64, baseline_y: f64) -> Point {
    let baseline = layout
        .line_metric(0)
        .map_or_else(|| layout.size().height, |metric| metric.baseline);
    Point::new(x, baseline_y - baseline)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_clockwise_semicircle() {
        assert!((canvas_sweep(PI * 1.5, PI * 0.5, false) - PI).abs() < 1e-12);
    }

    #[test]
    fn sweep_anticlockwise_wraps() {
        // Going anticlockwise from 0.9π to 1.6π travels 1.3π the long way.
        assert!((canvas_sweep(PI * 0.9, PI * 1.6, true) + PI * 1.3).abs() < 1e-12);
    }

    #[test]
    fn sweep_full_circle_either_direction() {
        assert!((canvas_sweep(0.0, TAU, false) - TAU).abs() < 1e-12);
        assert!((canvas_sweep(0.0, TAU, true) + TAU).abs() < 1e-12);
    }

    #[test]
    fn arc_line_connects_from_current_point() {
        let mut path = CanvasPath::new();
        path.move_to(0.0, 0.0);
        path.arc(10.0, 0.0, 5.0, 0.0, PI, false);
        let elements = path.finish().elements().to_vec();
        // MoveTo, the connecting LineTo, then the two quarter-circle cubics.
        assert_eq!(elements.len(), 4);
    }

    #[test]
    fn cover_crops_a_wide_image_to_a_center_band() {
        let crop = cover_crop(2000.0, 1000.0, 1000.0, 250.0);
        assert_eq!(crop, Rect::new(0.0, 250.0, 2000.0, 750.0));
    }

    #[test]
    fn cover_is_identity_when_ratios_match() {
        let crop = cover_crop(2000.0, 500.0, 1000.0, 250.0);
        assert_eq!(crop, Rect::new(0.0, 0.0, 2000.0, 500.0));
    }
}
