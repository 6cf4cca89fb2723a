//! # 图像读写
//!
//! 在图像文件与 [`PixelGrid`] 之间转换。只保留 RGB 三个通道，透明通道会被丢弃。

use crate::error::{Result, StegoError};
use crate::pixel::{Pixel, PixelGrid};
use image::{ImageBuffer, Rgb, RgbImage};
use std::path::Path;

impl From<&RgbImage> for PixelGrid {
    fn from(image: &RgbImage) -> Self {
        let mut grid = PixelGrid::new(image.width(), image.height(), Pixel::default());
        for (x, y, &Rgb([r, g, b])) in image.enumerate_pixels() {
            grid.set(x, y, Pixel::new(r, g, b));
        }
        grid
    }
}

impl From<&PixelGrid> for RgbImage {
    fn from(grid: &PixelGrid) -> Self {
        let mut image: RgbImage = ImageBuffer::new(grid.width(), grid.height());
        image
            .pixels_mut()
            .zip(grid.pixels())
            .for_each(|(out, p)| *out = Rgb([p.r, p.g, p.b]));
        image
    }
}

/// 读取图像文件并转换为 RGB 像素网格。
///
/// # Errors
///
/// 文件不可读或不是受支持的图像格式时返回 `Io`。
pub fn read_image(path: &Path) -> Result<PixelGrid> {
    let image = image::open(path).map_err(|source| StegoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(PixelGrid::from(&image.to_rgb8()))
}

/// 将像素网格保存为图像文件，格式由扩展名决定。
///
/// 隐写结果必须使用无损格式 (如 PNG、BMP) 保存，否则通道值会被改变。
///
/// # Errors
///
/// 扩展名不受支持或写入失败时返回 `Io`。
pub fn write_image(grid: &PixelGrid, path: &Path) -> Result<()> {
    RgbImage::from(grid)
        .save(path)
        .map_err(|source| StegoError::Io {
            path: path.to_path_buf(),
            source,
        })
}
