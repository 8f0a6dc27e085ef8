use crate::error::CoreError;
use crate::point::{GamePoint, Vec2};

/// How far anchor labels are pushed outward from the anchor centroid, in
/// pixels, once the full anchor set is on the board.
pub const CENTROID_PUSH_PX: f64 = 30.0;

/// Push used while anchors are still being collected, measured from the
/// canvas center instead of the (not yet meaningful) centroid.
pub const CENTER_PUSH_PX: f64 = 20.0;

/// Downward offset for the "Start"/"Current" annotations, in pixels.
const CUSTOM_LABEL_DROP_PX: f64 = 2.0;

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidCanvasSize { width, height });
        }
        Ok(Self { width, height })
    }

    /// Map normalized device coordinates to screen pixels.
    ///
    /// `(-1, 1)` is the top-left corner; the y-axis is flipped so that
    /// increasing pixel-y moves downward.
    #[inline]
    pub fn ndc_to_screen(&self, pos: Vec2) -> Vec2 {
        Vec2::new(
            self.width as f64 * (pos.x + 1.0) / 2.0,
            -(self.height as f64) * (pos.y - 1.0) / 2.0,
        )
    }

    #[inline]
    fn center(&self) -> Vec2 {
        Vec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// A text annotation anchored at a screen-pixel position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// Index of the labeled history entry.
    pub index: usize,
    pub text: String,
    /// Screen-pixel anchor for the label text.
    pub pos: Vec2,
}

/// Push `point` outward from `origin` by `push` pixels along the direction
/// from `origin` to `point`.
///
/// Coincident inputs yield a zero-length direction, which normalizes to the
/// zero vector, so the label simply sits on the point. Degenerate (collinear
/// or coincident) anchor sets are otherwise a documented limitation.
fn push_outward(point: Vec2, origin: Vec2, push: f64) -> Vec2 {
    let dir = point - origin;
    dir + dir.normalized() * push + origin
}

/// Label layout used while anchors are still being collected: each label
/// radiates from the canvas center.
pub fn collecting_label_layout(points: &[GamePoint], canvas: CanvasSize) -> Vec<LabelPlacement> {
    let center = canvas.center();
    points
        .iter()
        .enumerate()
        .map(|(index, p)| LabelPlacement {
            index,
            text: p.label.clone().unwrap_or_default(),
            pos: push_outward(canvas.ndc_to_screen(p.pos), center, CENTER_PUSH_PX),
        })
        .collect()
}

/// Recentred label layout: labels radiate outward from the anchor centroid.
///
/// Only the first `n` entries contribute to (and receive) the layout, even
/// if the start point is transiently present. Recomputed on every
/// state-affecting update, including canvas resizes; must not be used once
/// the session has finished (anchors are gone by then).
pub fn anchor_label_layout(
    anchors: &[GamePoint],
    n: usize,
    canvas: CanvasSize,
) -> Vec<LabelPlacement> {
    let count = anchors.len().min(n);
    if count == 0 {
        return Vec::new();
    }

    let mut sum = Vec2::ZERO;
    for p in &anchors[..count] {
        sum += p.pos;
    }
    let centroid = canvas.ndc_to_screen(sum * (1.0 / count as f64));

    anchors[..count]
        .iter()
        .enumerate()
        .map(|(index, p)| LabelPlacement {
            index,
            text: p.label.clone().unwrap_or_default(),
            pos: push_outward(canvas.ndc_to_screen(p.pos), centroid, CENTROID_PUSH_PX),
        })
        .collect()
}

/// Placement for the "Start" and "Current" annotations: just below the point.
pub fn below_point_placement(pos: Vec2, canvas: CanvasSize, text: &str) -> LabelPlacement {
    let screen = canvas.ndc_to_screen(pos);
    LabelPlacement {
        index: 0,
        text: text.to_owned(),
        pos: Vec2::new(screen.x, screen.y + CUSTOM_LABEL_DROP_PX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn canvas() -> CanvasSize {
        CanvasSize::new(800, 600).unwrap()
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(CanvasSize::new(0, 600).is_err());
        assert!(CanvasSize::new(800, 0).is_err());
    }

    #[test]
    fn ndc_mapping_corners_and_center() {
        let c = canvas();
        let tl = c.ndc_to_screen(Vec2::new(-1.0, 1.0));
        assert!((tl.x - 0.0).abs() < EPSILON);
        assert!((tl.y - 0.0).abs() < EPSILON);

        let br = c.ndc_to_screen(Vec2::new(1.0, -1.0));
        assert!((br.x - 800.0).abs() < EPSILON);
        assert!((br.y - 600.0).abs() < EPSILON);

        let mid = c.ndc_to_screen(Vec2::ZERO);
        assert!((mid.x - 400.0).abs() < EPSILON);
        assert!((mid.y - 300.0).abs() < EPSILON);
    }

    #[test]
    fn labels_radiate_from_centroid() {
        // Symmetric anchors: centroid at the canvas center, each label pushed
        // 30 px further out along its own axis.
        let anchors = vec![
            GamePoint::labeled(Vec2::new(-0.5, 0.0), "A"),
            GamePoint::labeled(Vec2::new(0.5, 0.0), "B"),
        ];
        let layout = anchor_label_layout(&anchors, 2, canvas());
        assert_eq!(layout.len(), 2);

        let a_screen = canvas().ndc_to_screen(anchors[0].pos);
        assert!((layout[0].pos.x - (a_screen.x - CENTROID_PUSH_PX)).abs() < EPSILON);
        assert!((layout[0].pos.y - a_screen.y).abs() < EPSILON);

        let b_screen = canvas().ndc_to_screen(anchors[1].pos);
        assert!((layout[1].pos.x - (b_screen.x + CENTROID_PUSH_PX)).abs() < EPSILON);
    }

    #[test]
    fn start_point_does_not_shift_layout() {
        let mut anchors = vec![
            GamePoint::labeled(Vec2::new(-0.5, -0.5), "A"),
            GamePoint::labeled(Vec2::new(0.5, -0.5), "B"),
            GamePoint::labeled(Vec2::new(0.0, 0.5), "C"),
        ];
        let without_start = anchor_label_layout(&anchors, 3, canvas());
        anchors.push(GamePoint::labeled(Vec2::ZERO, "Start"));
        let with_start = anchor_label_layout(&anchors, 3, canvas());
        assert_eq!(without_start, with_start);
    }

    #[test]
    fn coincident_anchor_and_centroid_stays_put() {
        // A single anchor is its own centroid; the push direction is
        // zero-length and must not produce NaN.
        let anchors = vec![GamePoint::labeled(Vec2::new(0.25, 0.25), "A")];
        let layout = anchor_label_layout(&anchors, 1, canvas());
        let screen = canvas().ndc_to_screen(anchors[0].pos);
        assert!((layout[0].pos.x - screen.x).abs() < EPSILON);
        assert!((layout[0].pos.y - screen.y).abs() < EPSILON);
    }

    #[test]
    fn empty_layout() {
        assert!(anchor_label_layout(&[], 3, canvas()).is_empty());
    }

    #[test]
    fn below_point_drops_down() {
        let placement = below_point_placement(Vec2::ZERO, canvas(), "Current");
        assert_eq!(placement.text, "Current");
        assert!((placement.pos.y - 302.0).abs() < EPSILON);
    }
}
