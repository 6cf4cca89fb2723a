use crate::constants::MAX_CONSPICUOUSNESS;
use crate::error::Result;
use crate::pixel::{Channel, Pixel, PixelGrid, clamp_channel};
use crate::utils::{Conspicuousness, validate_conspicuousness};
use log::debug;
use rand::Rng;

/// 预处理：每个通道减去隐写幅度，下限为 0，为之后只加不减的编码留出空间。
///
/// 返回新的网格，不修改输入。
///
/// # Errors
///
/// 隐写幅度不在 `1..=255` 时返回 `InvalidArgument`。
pub fn prep_source_image(source: &PixelGrid, conspicuousness: u32) -> Result<PixelGrid> {
    validate_conspicuousness(conspicuousness, MAX_CONSPICUOUSNESS)?;
    debug!(
        "prepping {}x{} image by {}",
        source.width(),
        source.height(),
        conspicuousness
    );

    let shift = conspicuousness as i32;
    Ok(source.map_pixels(|p| {
        Pixel::compose(
            p.r as i32 - shift,
            p.g as i32 - shift,
            p.b as i32 - shift,
        )
    }))
}

/// 计算下一个通道值。
///
/// 当前比特为 1 时加上 `[1, conspicuousness]` 内的随机扰动；
/// 比特为 0 或比特已用完时原样返回。
pub fn encode_next_value<R: Rng>(
    bits: &mut impl Iterator<Item = bool>,
    value: u8,
    conspicuousness: u32,
    rng: &mut R,
) -> Result<u8> {
    let conspicuousness = Conspicuousness::new(conspicuousness)?;
    Ok(next_value(bits.next(), value, conspicuousness, rng))
}

fn next_value<R: Rng>(bit: Option<bool>, value: u8, conspicuousness: Conspicuousness, rng: &mut R) -> u8 {
    match bit {
        Some(true) => {
            let perturbation = rng.random_range(1..=conspicuousness.get()) as i32;
            clamp_channel(value as i32 + perturbation)
        }
        _ => value,
    }
}

pub(crate) fn embed<R: Rng>(
    grid: &mut PixelGrid,
    mut bits: impl Iterator<Item = bool>,
    conspicuousness: Conspicuousness,
    rng: &mut R,
) {
    'pixels: for pixel in grid.pixels_mut() {
        for channel in Channel::ALL {
            let Some(bit) = bits.next() else {
                break 'pixels;
            };
            let value = next_value(Some(bit), pixel.channel(channel), conspicuousness, rng);
            pixel.set_channel(channel, value);
        }
    }
}
