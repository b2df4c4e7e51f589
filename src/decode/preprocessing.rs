use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, imageops};
use imageproc::contrast::equalize_histogram;
use imageproc::filter::bilateral_filter;
use imageproc::morphology::{Mask, grayscale_close, grayscale_open};

/// Composite any image with an alpha channel onto an opaque white background
/// and return a 3-channel buffer. Symbol readers misbehave on transparent
/// pixels, so normalization always runs before the first detection attempt.
pub fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut flattened = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let alpha = pixel[3] as u32;
        let inverse = 255 - alpha;
        let blend = |channel: u8| (((channel as u32) * alpha + 255 * inverse + 127) / 255) as u8;
        flattened.put_pixel(x, y, Rgb([blend(pixel[0]), blend(pixel[1]), blend(pixel[2])]));
    }
    flattened
}

/// Luminance buffer the symbol reader consumes.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    imageops::grayscale(image)
}

/// Edge-aware smoothing: reduces sensor noise without blurring bar edges.
pub fn smooth_preserving_edges(
    image: &GrayImage,
    window: u32,
    sigma_color: f32,
    sigma_spatial: f32,
) -> GrayImage {
    bilateral_filter(image, window, sigma_color, sigma_spatial)
}

/// Global histogram equalization.
pub fn equalize(image: &GrayImage) -> GrayImage {
    equalize_histogram(image)
}

/// Morphological close then open with a 3x3 square element: close fills
/// small gaps in symbol bars, open strips small noise speckles.
pub fn morphological_cleanup(image: &GrayImage) -> GrayImage {
    let element = Mask::square(1);
    grayscale_open(&grayscale_close(image, &element), &element)
}

/// Linear upscale in both dimensions with cubic interpolation.
pub fn upscale(image: &GrayImage, factor: u32) -> GrayImage {
    imageops::resize(
        image,
        image.width() * factor,
        image.height() * factor,
        imageops::FilterType::CatmullRom,
    )
}

/// Clockwise rotation angles tried by the final fallback stage, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Cw90,
    Cw180,
    Cw270,
}

impl Rotation {
    pub const ALL: [Rotation; 3] = [Rotation::Cw90, Rotation::Cw180, Rotation::Cw270];

    pub fn label(self) -> &'static str {
        match self {
            Rotation::Cw90 => "rotated 90",
            Rotation::Cw180 => "rotated 180",
            Rotation::Cw270 => "rotated 270",
        }
    }
}

/// Lossless clockwise rotation about the image center.
pub fn rotate_cw(image: &GrayImage, rotation: Rotation) -> GrayImage {
    match rotation {
        Rotation::Cw90 => imageops::rotate90(image),
        Rotation::Cw180 => imageops::rotate180(image),
        Rotation::Cw270 => imageops::rotate270(image),
    }
}

/// Contrast-limited adaptive histogram equalization over a `tiles x tiles`
/// grid. Each tile gets a clipped-histogram CDF mapping; pixels interpolate
/// bilinearly between the four nearest tile mappings to avoid block seams.
/// Images too small for the grid fall back to global equalization.
pub fn adaptive_equalize(image: &GrayImage, tiles: u32, clip_limit: f32) -> GrayImage {
    let (width, height) = image.dimensions();
    let (w, h, tiles) = (width as usize, height as usize, tiles as usize);
    if w == 0 || h == 0 || tiles == 0 {
        return image.clone();
    }
    let tile_w = w / tiles;
    let tile_h = h / tiles;
    if tile_w == 0 || tile_h == 0 {
        return equalize(image);
    }

    let pixels = image.as_raw();
    let mut mappings = vec![[0u8; 256]; tiles * tiles];
    for ty in 0..tiles {
        for tx in 0..tiles {
            let x0 = tx * tile_w;
            let y0 = ty * tile_h;
            // Last row/column of tiles absorbs the remainder.
            let x1 = if tx == tiles - 1 { w } else { x0 + tile_w };
            let y1 = if ty == tiles - 1 { h } else { y0 + tile_h };
            mappings[ty * tiles + tx] =
                tile_mapping(pixels, w, (x0, y0, x1, y1), clip_limit);
        }
    }

    let tile_w_f = tile_w as f32;
    let tile_h_f = tile_h as f32;
    let last = tiles as i32 - 1;
    ImageBuffer::from_fn(width, height, |x, y| {
        let level = pixels[y as usize * w + x as usize] as usize;

        let fx = (x as f32 + 0.5) / tile_w_f - 0.5;
        let fy = (y as f32 + 0.5) / tile_h_f - 0.5;
        let tx0 = (fx.floor() as i32).clamp(0, last) as usize;
        let tx1 = (fx.floor() as i32 + 1).clamp(0, last) as usize;
        let ty0 = (fy.floor() as i32).clamp(0, last) as usize;
        let ty1 = (fy.floor() as i32 + 1).clamp(0, last) as usize;
        let ax = fx - fx.floor();
        let ay = fy - fy.floor();

        let v00 = mappings[ty0 * tiles + tx0][level] as f32;
        let v10 = mappings[ty0 * tiles + tx1][level] as f32;
        let v01 = mappings[ty1 * tiles + tx0][level] as f32;
        let v11 = mappings[ty1 * tiles + tx1][level] as f32;
        let top = v00 * (1.0 - ax) + v10 * ax;
        let bottom = v01 * (1.0 - ax) + v11 * ax;
        Luma([(top * (1.0 - ay) + bottom * ay).round().clamp(0.0, 255.0) as u8])
    })
}

/// Clipped-histogram CDF mapping for one tile.
fn tile_mapping(
    pixels: &[u8],
    stride: usize,
    (x0, y0, x1, y1): (usize, usize, usize, usize),
    clip_limit: f32,
) -> [u8; 256] {
    let mut histogram = [0u32; 256];
    for row in y0..y1 {
        for col in x0..x1 {
            histogram[pixels[row * stride + col] as usize] += 1;
        }
    }

    // Clip each bin and spread the excess uniformly.
    let tile_pixels = ((x1 - x0) * (y1 - y0)) as u32;
    let clip = ((clip_limit * tile_pixels as f32 / 256.0) as u32).max(1);
    let mut excess = 0u32;
    for bin in histogram.iter_mut() {
        if *bin > clip {
            excess += *bin - clip;
            *bin = clip;
        }
    }
    let per_bin = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in histogram.iter_mut().enumerate() {
        *bin += per_bin;
        if i < remainder {
            *bin += 1;
        }
    }

    let mut cdf = [0u32; 256];
    let mut running = 0u32;
    for (i, &bin) in histogram.iter().enumerate() {
        running += bin;
        cdf[i] = running;
    }
    let cdf_min = cdf.iter().copied().find(|&v| v > 0).unwrap_or(0);
    let denominator = cdf[255].saturating_sub(cdf_min);

    let mut mapping = [0u8; 256];
    for (i, slot) in mapping.iter_mut().enumerate() {
        *slot = if denominator == 0 {
            i as u8
        } else {
            let scaled =
                (cdf[i].saturating_sub(cdf_min) as f32 / denominator as f32) * 255.0;
            scaled.min(255.0) as u8
        };
    }
    mapping
}
