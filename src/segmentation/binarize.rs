use image::{DynamicImage, GrayImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Binarize an image into an ink mask: ink pixels become 255, background 0.
///
/// The threshold is chosen per-image by Otsu's method so the mask adapts to
/// varying scan brightness and contrast. Polarity is inverted because
/// handwriting is dark ink on a light background.
pub fn ink_mask(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();

    // A uniform image has no ink/background separation for Otsu to find;
    // treat it as blank rather than letting the threshold pick a side.
    let (min, max) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| {
            (lo.min(p.0[0]), hi.max(p.0[0]))
        });
    if min == max {
        return GrayImage::new(gray.width(), gray.height());
    }

    let level = otsu_level(&gray);
    threshold(&gray, level, ThresholdType::BinaryInverted)
}
