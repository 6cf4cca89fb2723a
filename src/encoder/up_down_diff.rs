use crate::pixel::{Channel, PixelGrid};
use crate::utils::Conspicuousness;
use rand::Rng;

/// 比特为 1 时向上、为 0 时向下扰动 `[1, conspicuousness]` 内的随机量。
///
/// 扰动会被缩小到通道剩余的空间内，因此 255 上的 1 和 0 上的 0 不会改变通道值。
pub fn encode_value<R: Rng>(value: u8, bit: bool, conspicuousness: Conspicuousness, rng: &mut R) -> u8 {
    let perturbation = rng.random_range(1..=conspicuousness.get());
    if bit {
        value + perturbation.min(u8::MAX - value)
    } else {
        value - perturbation.min(value)
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
            let value = encode_value(pixel.channel(channel), bit, conspicuousness, rng);
            pixel.set_channel(channel, value);
        }
    }
}
