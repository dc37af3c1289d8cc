use bevy::log::warn;
use bevy::math::Vec2;
use cosmic_text::{
    Attrs, Buffer, Color as TextColor, Family, FontSystem, Metrics, Shaping, SwashCache, Weight,
    fontdb,
};
use image::{Rgba, RgbaImage};
use std::sync::Arc;

/// Glyph-to-pixel capability used by the rock-on shape.
///
/// Implementations draw `text` centred on a transparent `width` x `height`
/// canvas; lit pixels carry high alpha.
pub trait TextRasterizer: Send + Sync {
    fn rasterize(&self, text: &str, width: u32, height: u32) -> RgbaImage;
}

/// Rasterizer used when no font could be loaded. Every text renders empty,
/// so the rock-on shape degrades to the idle scatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlankTextRasterizer;

impl TextRasterizer for BlankTextRasterizer {
    fn rasterize(&self, _text: &str, width: u32, height: u32) -> RgbaImage {
        RgbaImage::new(width, height)
    }
}

/// Shapes and draws text with `cosmic-text` from a single bold font face.
///
/// The inked area is centred on the canvas; anything past the canvas edge is
/// clipped, never wrapped.
#[derive(Debug, Clone)]
pub struct FontTextRasterizer {
    font_data: Arc<Vec<u8>>,
    font_size: f32,
}

impl FontTextRasterizer {
    pub fn new(font_data: Arc<Vec<u8>>, font_size: f32) -> Self {
        Self {
            font_data,
            font_size,
        }
    }

    /// Glyph coverage as `(x, y, alpha)` relative to the buffer origin.
    fn coverage(&self, text: &str) -> Vec<(i32, i32, u8)> {
        let mut db = fontdb::Database::new();
        db.load_font_data(self.font_data.as_ref().clone());

        let Some(family) = db
            .faces()
            .next()
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
        else {
            warn!("Text font data holds no usable face");
            return Vec::new();
        };

        let mut font_system = FontSystem::new_with_locale_and_db("en-US".to_string(), db);
        let mut swash_cache = SwashCache::new();
        let metrics = Metrics::new(self.font_size, self.font_size * 1.2);

        let mut buffer = Buffer::new(&mut font_system, metrics);
        buffer.set_size(&mut font_system, None, None);
        let attrs = Attrs::new().family(Family::Name(&family)).weight(Weight::BOLD);
        buffer.set_text(&mut font_system, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut font_system, false);

        let mut pixels = Vec::new();
        buffer.draw(
            &mut font_system,
            &mut swash_cache,
            TextColor::rgb(0xFF, 0xFF, 0xFF),
            |x, y, w, h, color| {
                if color.a() == 0 {
                    return;
                }
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        pixels.push((x + dx, y + dy, color.a()));
                    }
                }
            },
        );
        pixels
    }
}

impl TextRasterizer for FontTextRasterizer {
    fn rasterize(&self, text: &str, width: u32, height: u32) -> RgbaImage {
        let mut canvas = RgbaImage::new(width, height);
        if text.trim().is_empty() || self.font_size <= 0.0 {
            return canvas;
        }

        let pixels = self.coverage(text);
        let Some(((min_x, min_y), (max_x, max_y))) = ink_bounds(&pixels) else {
            return canvas;
        };

        let offset_x = (width as i32 - (max_x - min_x + 1)) / 2 - min_x;
        let offset_y = (height as i32 - (max_y - min_y + 1)) / 2 - min_y;

        for (x, y, alpha) in pixels {
            let (px, py) = (x + offset_x, y + offset_y);
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                continue;
            }
            let pixel = canvas.get_pixel_mut(px as u32, py as u32);
            // Overlapping glyph edges keep the stronger coverage.
            if alpha > pixel[3] {
                *pixel = Rgba([255, 255, 255, alpha]);
            }
        }

        canvas
    }
}

fn ink_bounds(pixels: &[(i32, i32, u8)]) -> Option<((i32, i32), (i32, i32))> {
    let (first_x, first_y, _) = *pixels.first()?;
    let bounds = pixels.iter().fold(
        ((first_x, first_y), (first_x, first_y)),
        |((min_x, min_y), (max_x, max_y)), &(x, y, _)| {
            ((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y)))
        },
    );
    Some(bounds)
}

/// Scan `raster` every `step` pixels and keep those with alpha above
/// `alpha_threshold`. Coordinates are recentred on the canvas centre with y
/// pointing up.
pub fn sample_text_points(raster: &RgbaImage, step: u32, alpha_threshold: u8) -> Vec<Vec2> {
    let (width, height) = raster.dimensions();
    let step = step.max(1) as usize;
    let half_width = width as f32 / 2.0;
    let half_height = height as f32 / 2.0;

    let mut points = Vec::new();
    for y in (0..height).step_by(step) {
        for x in (0..width).step_by(step) {
            if raster.get_pixel(x, y)[3] > alpha_threshold {
                points.push(Vec2::new(x as f32 - half_width, -(y as f32 - half_height)));
            }
        }
    }
    points
}

/// Font shipped in `assets/fonts`, for tests that need real glyphs.
#[cfg(test)]
pub(crate) fn bundled_font() -> Arc<Vec<u8>> {
    Arc::new(include_bytes!("../../../assets/fonts/DejaVuSans-Bold.ttf").to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rasterizer() -> FontTextRasterizer {
        FontTextRasterizer::new(bundled_font(), 100.0)
    }

    #[test]
    fn test_blank_text_has_no_samples() {
        let raster = rasterizer().rasterize("   ", 1200, 200);
        assert!(sample_text_points(&raster, 2, 128).is_empty());

        let raster = rasterizer().rasterize("", 1200, 200);
        assert!(sample_text_points(&raster, 2, 128).is_empty());
    }

    #[test]
    fn test_message_samples_are_centred_and_inside_canvas() {
        let raster = rasterizer().rasterize("I LOVE YOU NANDA", 1200, 200);
        let points = sample_text_points(&raster, 2, 128);
        assert!(points.len() > 1000, "only {} samples", points.len());

        for p in &points {
            assert!(p.x >= -600.0 && p.x < 600.0);
            assert!(p.y > -100.0 && p.y <= 100.0);
        }

        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        assert!((min_x + max_x).abs() < 8.0, "x span {min_x}..{max_x}");
        assert!((min_y + max_y).abs() < 8.0, "y span {min_y}..{max_y}");
        // Bold 100 px capitals span most of the canvas width.
        assert!(max_x - min_x > 600.0);
    }

    #[test]
    fn test_rasterization_is_deterministic() {
        let first = rasterizer().rasterize("HI", 300, 150);
        let second = rasterizer().rasterize("HI", 300, 150);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_font_data_renders_nothing() {
        let broken = FontTextRasterizer::new(Arc::new(vec![0u8; 64]), 100.0);
        let raster = broken.rasterize("I LOVE YOU NANDA", 1200, 200);
        assert!(sample_text_points(&raster, 1, 0).is_empty());
    }

    #[test]
    fn test_oversized_text_is_clipped_to_canvas() {
        let raster = rasterizer().rasterize("I LOVE YOU NANDA", 120, 40);
        assert_eq!(raster.dimensions(), (120, 40));
        let points = sample_text_points(&raster, 1, 128);
        assert!(!points.is_empty());
        assert!(points.iter().all(|p| p.x.abs() <= 60.0 && p.y.abs() <= 20.0));
    }

    #[test]
    fn test_blank_rasterizer_is_empty() {
        let raster = BlankTextRasterizer.rasterize("I LOVE YOU NANDA", 1200, 200);
        assert!(sample_text_points(&raster, 1, 0).is_empty());
    }

    #[test]
    fn test_threshold_excludes_faint_pixels() {
        let mut raster = RgbaImage::new(4, 4);
        raster.put_pixel(0, 0, Rgba([255, 255, 255, 128]));
        raster.put_pixel(2, 0, Rgba([255, 255, 255, 129]));
        let points = sample_text_points(&raster, 2, 128);
        assert_eq!(points, vec![Vec2::new(0.0, 2.0)]);
    }
}
