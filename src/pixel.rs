//! # 像素与像素网格
//!
//! 核心算法只操作 [`PixelGrid`]，与具体的图像文件格式无关。
//! 打包整数形式 `0x00RRGGBB` 仅在边界处通过 [`extract_channel`] / [`compose_pixel`] 使用。

/// 颜色通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    R,
    G,
    B,
}

impl Channel {
    /// 差分类策略逐通道访问的固定顺序。
    pub const ALL: [Channel; 3] = [Channel::R, Channel::G, Channel::B];

    fn shift(self) -> u32 {
        match self {
            Channel::R => 16,
            Channel::G => 8,
            Channel::B => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 由可能越界的通道值构造像素，每个值先被截断到 `[0, 255]`。
    pub fn compose(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    pub fn from_packed(packed: u32) -> Self {
        Self {
            r: extract_channel(packed, Channel::R),
            g: extract_channel(packed, Channel::G),
            b: extract_channel(packed, Channel::B),
        }
    }

    pub fn to_packed(self) -> u32 {
        compose_pixel(self.r as i32, self.g as i32, self.b as i32)
    }

    pub fn channel(&self, channel: Channel) -> u8 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::R => self.r = value,
            Channel::G => self.g = value,
            Channel::B => self.b = value,
        }
    }
}

/// 从打包像素中取出指定通道的值。
pub fn extract_channel(packed: u32, channel: Channel) -> u8 {
    ((packed >> channel.shift()) & 0xFF) as u8
}

/// 将三个通道值打包为 `0x00RRGGBB`。
///
/// 调用方应自行截断，这里仍会再次截断到 `[0, 255]`，不会报错。
pub fn compose_pixel(r: i32, g: i32, b: i32) -> u32 {
    ((clamp_channel(r) as u32) << Channel::R.shift())
        | ((clamp_channel(g) as u32) << Channel::G.shift())
        | ((clamp_channel(b) as u32) << Channel::B.shift())
}

pub fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

/// 行优先存储的 RGB 像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// 创建一个所有像素都为 `fill` 的网格。
    pub fn new(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// 由行优先的像素序列构造网格，长度不符时返回 `None`。
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let i = self.index(x, y);
        self.pixels[i] = pixel;
    }

    pub fn get_packed(&self, x: u32, y: u32) -> u32 {
        self.get(x, y).to_packed()
    }

    pub fn set_packed(&mut self, x: u32, y: u32, packed: u32) {
        self.set(x, y, Pixel::from_packed(packed));
    }

    /// 按光栅顺序 (从左到右、从上到下) 遍历像素。
    pub fn pixels(&self) -> impl Iterator<Item = &Pixel> {
        self.pixels.iter()
    }

    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Pixel> {
        self.pixels.iter_mut()
    }

    /// 对每个像素应用 `f`，生成一个新的同尺寸网格。
    pub fn map_pixels(&self, f: impl FnMut(&Pixel) -> Pixel) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(f).collect(),
        }
    }
}
