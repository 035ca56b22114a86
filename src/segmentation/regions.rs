use image::GrayImage;
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::rect::Rect;

/// Find the bounding rectangles of the symbols in a binary ink mask,
/// sorted left to right.
///
/// Only top-level external contours are kept, so the hole of an "8" does not
/// produce a second region. Rectangles narrower or shorter than `min_dim`
/// are dropped as noise. The sort is stable, so components with the same
/// left edge keep their detection order.
pub fn symbol_regions(mask: &GrayImage, min_dim: u32) -> Vec<Rect> {
    let contours = find_contours::<i32>(mask);

    let mut regions: Vec<Rect> = contours
        .iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .filter_map(bounding_rect)
        .filter(|r| r.width() >= min_dim && r.height() >= min_dim)
        .collect();

    regions.sort_by_key(|r| r.left());
    regions
}

/// Tight axis-aligned bounding rectangle of a contour's points.
fn bounding_rect(contour: &Contour<i32>) -> Option<Rect> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for point in &contour.points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Some(
        Rect::at(min_x, min_y).of_size((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    const MIN_DIM: u32 = 5;

    fn blot(mask: &mut GrayImage, x: u32, y: u32, w: u32, h: u32) {
        for dy in 0..h {
            for dx in 0..w {
                mask.put_pixel(x + dx, y + dy, Luma([255]));
            }
        }
    }

    #[test]
    fn test_disjoint_blobs_sorted_left_to_right() {
        let mut mask = GrayImage::new(100, 40);
        // Deliberately out of left-to-right order
        blot(&mut mask, 60, 10, 8, 8);
        blot(&mut mask, 5, 20, 6, 10);
        blot(&mut mask, 30, 5, 10, 6);

        let regions = symbol_regions(&mask, MIN_DIM);

        assert_eq!(regions.len(), 3);
        assert_eq!(regions[0].left(), 5);
        assert_eq!(regions[1].left(), 30);
        assert_eq!(regions[2].left(), 60);
    }

    #[test]
    fn test_bounding_rect_is_tight() {
        let mut mask = GrayImage::new(40, 40);
        blot(&mut mask, 12, 7, 9, 13);

        let regions = symbol_regions(&mask, MIN_DIM);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].left(), 12);
        assert_eq!(regions[0].top(), 7);
        assert_eq!(regions[0].width(), 9);
        assert_eq!(regions[0].height(), 13);
    }

    #[test]
    fn test_min_dim_boundary() {
        let mut mask = GrayImage::new(60, 20);
        blot(&mut mask, 5, 5, 4, 5); // too narrow, dropped
        blot(&mut mask, 30, 5, 5, 5); // exactly at the limit, kept

        let regions = symbol_regions(&mask, MIN_DIM);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].left(), 30);
    }

    #[test]
    fn test_hole_is_not_a_separate_region() {
        // A ring, like a handwritten "0": outer 12x12, hollow 6x6 center
        let mut mask = GrayImage::new(30, 30);
        blot(&mut mask, 8, 8, 12, 12);
        for dy in 0..6 {
            for dx in 0..6 {
                mask.put_pixel(11 + dx, 11 + dy, Luma([0]));
            }
        }

        let regions = symbol_regions(&mask, MIN_DIM);

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].width(), 12);
        assert_eq!(regions[0].height(), 12);
    }

    #[test]
    fn test_empty_mask_has_no_regions() {
        let mask = GrayImage::new(50, 50);
        assert!(symbol_regions(&mask, MIN_DIM).is_empty());
    }
}
