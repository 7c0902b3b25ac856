use image::{imageops, DynamicImage, Rgb, RgbImage};
use tract_onnx::prelude::*;

const PAD_COLOR: Rgb<u8> = Rgb([114, 114, 114]);

/// A frame scaled to fit the model input, centered on padding, plus what
/// it takes to map model coordinates back onto the frame.
pub struct Letterbox {
    pub image: RgbImage,
    pub scale: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl Letterbox {
    pub fn to_frame(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.x_offset) / self.scale,
            (y - self.y_offset) / self.scale,
        )
    }
}

pub fn letterbox(image: &DynamicImage, width: u32, height: u32) -> Letterbox {
    let (w, h) = (image.width() as f32, image.height() as f32);
    let scale = (width as f32 / w).min(height as f32 / h);
    let new_w = ((w * scale).round() as u32).clamp(1, width);
    let new_h = ((h * scale).round() as u32).clamp(1, height);

    let scaled = image
        .resize_exact(new_w, new_h, imageops::FilterType::Triangle)
        .to_rgb8();

    let mut padded = RgbImage::from_pixel(width, height, PAD_COLOR);
    let x_offset = (width - new_w) / 2;
    let y_offset = (height - new_h) / 2;
    imageops::replace(&mut padded, &scaled, x_offset as i64, y_offset as i64);

    Letterbox {
        image: padded,
        scale,
        x_offset: x_offset as f32,
        y_offset: y_offset as f32,
    }
}

/// NCHW, RGB, scaled to [0, 1].
pub fn rgb_to_tensor(rgb: &RgbImage) -> Tensor {
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    tract_ndarray::Array4::from_shape_fn((1, 3, height, width), |(_, c, y, x)| {
        rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0
    })
    .into_tensor()
}

/// NCHW with a single gray channel, raw 0-255 values.
pub fn grayscale_to_tensor(image: &DynamicImage, width: u32, height: u32) -> Tensor {
    let gray = image
        .resize_exact(width, height, imageops::FilterType::Triangle)
        .to_luma8();
    tract_ndarray::Array4::from_shape_fn(
        (1, 1, height as usize, width as usize),
        |(_, _, y, x)| gray.get_pixel(x as u32, y as u32)[0] as f32,
    )
    .into_tensor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn solid(width: u32, height: u32, color: Rgb<u8>) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(width, height, color))
    }

    #[test]
    fn test_rgb_tensor_square() {
        let boxed = letterbox(&solid(100, 100, Rgb([255, 0, 0])), 640, 640);
        let tensor = rgb_to_tensor(&boxed.image);

        assert_eq!(tensor.shape(), &[1, 3, 640, 640]);
        assert_eq!((boxed.x_offset, boxed.y_offset), (0.0, 0.0));

        let slice = tensor.as_slice::<f32>().unwrap();
        assert_eq!(slice[0], 1.0);
        assert_eq!(slice[640 * 640], 0.0);
        assert_eq!(slice[2 * 640 * 640], 0.0);
    }

    #[test]
    fn test_rectangle_is_centered_on_padding() {
        let boxed = letterbox(&solid(200, 100, Rgb([255, 0, 0])), 640, 640);

        assert_eq!(boxed.scale, 3.2);
        assert_eq!(boxed.y_offset, 160.0);
        assert_eq!(*boxed.image.get_pixel(320, 320), Rgb([255, 0, 0]));
        assert_eq!(*boxed.image.get_pixel(320, 10), PAD_COLOR);
    }

    #[test]
    fn test_letterbox_maps_back_to_frame() {
        let boxed = letterbox(&solid(200, 100, Rgb([0, 0, 0])), 640, 640);

        let (x, y) = boxed.to_frame(320.0, 320.0);

        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_rgb_tensor_normalization() {
        let boxed = letterbox(&solid(100, 100, Rgb([128, 128, 128])), 64, 64);
        let slice_tensor = rgb_to_tensor(&boxed.image);
        let slice = slice_tensor.as_slice::<f32>().unwrap();

        let expected = 128.0 / 255.0;
        assert!((slice[0] - expected).abs() < 0.0001);
        assert!((slice[64 * 64] - expected).abs() < 0.0001);
    }

    #[test]
    fn test_grayscale_tensor_keeps_raw_values() {
        let image = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(32, 32, Luma([200u8])));

        let tensor = grayscale_to_tensor(&image, 64, 64);

        assert_eq!(tensor.shape(), &[1, 1, 64, 64]);
        assert_eq!(tensor.as_slice::<f32>().unwrap()[0], 200.0);
    }
}
