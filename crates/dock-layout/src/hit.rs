// ABOUTME: Drop zone classification for a pointer over a candidate window.
// ABOUTME: Edge bands split the target, the header band and the center merge into it.

use dock_core::{HoverSettings, Point, Rect, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropZone {
    Top,
    Right,
    Bottom,
    Left,
    /// Tab bar of the target window
    Header,
    Center,
}

impl DropZone {
    /// The side to split on, or `None` for zones that merge
    pub fn side(&self) -> Option<Side> {
        match self {
            DropZone::Top => Some(Side::Top),
            DropZone::Right => Some(Side::Right),
            DropZone::Bottom => Some(Side::Bottom),
            DropZone::Left => Some(Side::Left),
            DropZone::Header | DropZone::Center => None,
        }
    }
}

impl From<Side> for DropZone {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => DropZone::Top,
            Side::Right => DropZone::Right,
            Side::Bottom => DropZone::Bottom,
            Side::Left => DropZone::Left,
        }
    }
}

/// Pick the edge nearest to `pointer` if it is closer than `border`.
///
/// Corners are split along the diagonals, ties go to the first of top, right,
/// bottom, left. Pointers outside the rectangle map to the edge they passed.
pub fn detect_position(rect: &Rect, pointer: Point, border: f64) -> DropZone {
    let x = pointer.x - rect.x;
    let y = pointer.y - rect.y;
    let distances = [
        (Side::Top, y),
        (Side::Right, rect.width - x),
        (Side::Bottom, rect.height - y),
        (Side::Left, x),
    ];

    let mut nearest = distances[0];
    for candidate in &distances[1..] {
        if candidate.1 < nearest.1 {
            nearest = *candidate;
        }
    }
    if nearest.1 < border {
        DropZone::from(nearest.0)
    } else {
        DropZone::Center
    }
}

pub fn classify(
    target_docked: bool,
    rect: &Rect,
    pointer: Point,
    settings: &HoverSettings,
) -> DropZone {
    let border = settings.border;
    let header = settings.header_height;
    if !target_docked
        || rect.width < 4.0 * border
        || rect.height < 3.0 * border + 2.0 * header
    {
        return DropZone::Center;
    }

    let y = pointer.y - rect.y;
    if y > 0.0 && y < header {
        return DropZone::Header;
    }
    let body = Rect::new(rect.x, rect.y + header, rect.width, rect.height - header);
    detect_position(&body, pointer, border)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let at = |x, y| detect_position(&rect, Point::new(x, y), 20.0);
        assert_eq!(at(50.0, 15.0), DropZone::Top);
        assert_eq!(at(105.0, 50.0), DropZone::Right);
        assert_eq!(at(15.0, 50.0), DropZone::Left);
        assert_eq!(at(50.0, 105.0), DropZone::Bottom);
        assert_eq!(at(50.0, 50.0), DropZone::Center);
    }

    #[test]
    fn every_point_gets_the_nearest_band() {
        let rect = Rect::new(7.0, 13.0, 120.0, 80.0);
        let border = 25.0;
        for i in 0..=48 {
            for j in 0..=32 {
                let pointer = Point::new(rect.x + i as f64 * 2.5, rect.y + j as f64 * 2.5);
                let top = pointer.y - rect.y;
                let right = rect.right() - pointer.x;
                let bottom = rect.bottom() - pointer.y;
                let left = pointer.x - rect.x;
                let nearest = top.min(right).min(bottom).min(left);

                let zone = detect_position(&rect, pointer, border);
                let distance = match zone {
                    DropZone::Top => top,
                    DropZone::Right => right,
                    DropZone::Bottom => bottom,
                    DropZone::Left => left,
                    DropZone::Center => {
                        assert!(nearest >= border, "{pointer:?} is inside an edge band");
                        continue;
                    }
                    DropZone::Header => panic!("{pointer:?} mapped to the header"),
                };
                assert!(distance < border, "{pointer:?} mapped to {zone:?} outside its band");
                assert_eq!(distance, nearest, "{pointer:?} mapped to a farther edge");
            }
        }
    }

    #[test]
    fn classify_agrees_with_the_body_below_the_header() {
        let settings = HoverSettings::default();
        let rect = Rect::new(0.0, 0.0, 400.0, 400.0);
        let body = Rect::new(0.0, settings.header_height, 400.0, 400.0 - settings.header_height);
        for i in 1..40 {
            for j in 1..40 {
                let pointer = Point::new(i as f64 * 10.0, j as f64 * 10.0);
                let zone = classify(true, &rect, pointer, &settings);
                if pointer.y < settings.header_height {
                    assert_eq!(zone, DropZone::Header);
                } else {
                    assert_eq!(zone, detect_position(&body, pointer, settings.border));
                }
            }
        }
    }

    #[test]
    fn corners_split_on_diagonals() {
        let rect = Rect::new(10.0, 10.0, 100.0, 100.0);
        let at = |x, y| detect_position(&rect, Point::new(x, y), 20.0);
        assert_eq!(at(20.0, 15.0), DropZone::Top);
        assert_eq!(at(15.0, 20.0), DropZone::Left);
        assert_eq!(at(105.0, 100.0), DropZone::Right);
        assert_eq!(at(100.0, 105.0), DropZone::Bottom);
    }

    #[test]
    fn classify_collapses_to_center() {
        let settings = HoverSettings::default();
        let large = Rect::new(0.0, 0.0, 400.0, 400.0);
        let pointer = Point::new(5.0, 200.0);

        assert_eq!(classify(false, &large, pointer, &settings), DropZone::Center);
        let narrow = Rect::new(0.0, 0.0, 239.0, 400.0);
        assert_eq!(classify(true, &narrow, pointer, &settings), DropZone::Center);
        let short = Rect::new(0.0, 0.0, 400.0, 239.0);
        assert_eq!(classify(true, &short, pointer, &settings), DropZone::Center);
        assert_eq!(classify(true, &large, pointer, &settings), DropZone::Left);
    }

    #[test]
    fn classify_carves_header_band() {
        let settings = HoverSettings::default();
        let rect = Rect::new(0.0, 0.0, 400.0, 400.0);
        let at = |x, y| classify(true, &rect, Point::new(x, y), &settings);
        assert_eq!(at(200.0, 10.0), DropZone::Header);
        // Just below the header counts towards the top edge
        assert_eq!(at(200.0, 50.0), DropZone::Top);
        assert_eq!(at(200.0, 200.0), DropZone::Center);
        assert_eq!(at(390.0, 200.0), DropZone::Right);
        assert_eq!(at(200.0, 390.0), DropZone::Bottom);
    }

    #[test]
    fn merge_zones_have_no_side() {
        assert_eq!(DropZone::Center.side(), None);
        assert_eq!(DropZone::Header.side(), None);
        assert_eq!(DropZone::Bottom.side(), Some(Side::Bottom));
    }
}
