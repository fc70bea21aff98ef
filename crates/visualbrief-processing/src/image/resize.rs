use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Calculate dimensions that fit within `max_dimension` on both axes.
    ///
    /// The larger side becomes exactly `max_dimension` and the other side is
    /// scaled by the same ratio and rounded. Images already within bounds keep
    /// their dimensions.
    pub fn fit_within(orig_width: u32, orig_height: u32, max_dimension: u32) -> (u32, u32) {
        if orig_width <= max_dimension && orig_height <= max_dimension {
            return (orig_width, orig_height);
        }

        if orig_width > orig_height {
            let h = (orig_height as f64 * max_dimension as f64 / orig_width as f64).round() as u32;
            (max_dimension, h.max(1))
        } else {
            let w = (orig_width as f64 * max_dimension as f64 / orig_height as f64).round() as u32;
            (w.max(1), max_dimension)
        }
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Resize image to exact dimensions
    pub fn resize_image(img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }

    /// Downscale so that neither side exceeds `max_dimension`. Never upscales.
    pub fn downscale_to_fit(img: DynamicImage, max_dimension: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::fit_within(orig_width, orig_height, max_dimension);

        if (width, height) == (orig_width, orig_height) {
            return img;
        }

        tracing::debug!(
            orig_width,
            orig_height,
            width,
            height,
            "Downscaling image to fit bounds"
        );
        Self::resize_image(&img, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_fit_within_landscape() {
        // 2048x1536 -> 1024x768
        assert_eq!(ImageResize::fit_within(2048, 1536, 1024), (1024, 768));
    }

    #[test]
    fn test_fit_within_portrait() {
        // 1000x3000 -> 341.33 rounds to 341
        assert_eq!(ImageResize::fit_within(1000, 3000, 1024), (341, 1024));
    }

    #[test]
    fn test_fit_within_square() {
        assert_eq!(ImageResize::fit_within(4000, 4000, 1024), (1024, 1024));
    }

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(ImageResize::fit_within(800, 600, 1024), (800, 600));
        assert_eq!(ImageResize::fit_within(1024, 1024, 1024), (1024, 1024));
    }

    #[test]
    fn test_fit_within_never_collapses_to_zero() {
        assert_eq!(ImageResize::fit_within(5000, 1, 1024), (1024, 1));
    }

    #[test]
    fn test_select_filter_by_ratio() {
        assert_eq!(
            ImageResize::select_filter(3000, 3000, 1000, 1000),
            FilterType::Triangle
        );
        assert_eq!(
            ImageResize::select_filter(1700, 1700, 1000, 1000),
            FilterType::CatmullRom
        );
        assert_eq!(
            ImageResize::select_filter(1200, 1200, 1000, 1000),
            FilterType::Lanczos3
        );
    }

    #[test]
    fn test_downscale_to_fit() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2000, 500, Rgba([255, 0, 0, 255])));
        let resized = ImageResize::downscale_to_fit(img, 1024);
        assert_eq!(resized.dimensions(), (1024, 256));
    }

    #[test]
    fn test_downscale_to_fit_no_upscale() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255])));
        let resized = ImageResize::downscale_to_fit(img, 1024);
        assert_eq!(resized.dimensions(), (50, 50));
    }
}
