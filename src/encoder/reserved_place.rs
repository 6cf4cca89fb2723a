use crate::pixel::{Channel, PixelGrid, clamp_channel};
use crate::utils::Conspicuousness;

/// 固定位置策略写入的通道。
pub const RESERVED_CHANNEL: Channel = Channel::R;

/// 能容纳 `0..=conspicuousness` 的最小 2 的幂减一，即被覆盖的低位区域。
pub(crate) fn low_region_mask(conspicuousness: Conspicuousness) -> u16 {
    (conspicuousness.get() as u16 + 1).next_power_of_two() - 1
}

/// 清除低位区域后，按比特值加上幅度。
pub fn encode_value(value: u8, bit: bool, conspicuousness: Conspicuousness) -> u8 {
    let cleared = value as u16 & !low_region_mask(conspicuousness);
    let added = if bit { conspicuousness.get() as u16 } else { 0 };
    clamp_channel((cleared + added) as i32)
}

pub(crate) fn embed(
    grid: &mut PixelGrid,
    bits: impl Iterator<Item = bool>,
    conspicuousness: Conspicuousness,
) {
    for (pixel, bit) in grid.pixels_mut().zip(bits) {
        let value = pixel.channel(RESERVED_CHANNEL);
        pixel.set_channel(RESERVED_CHANNEL, encode_value(value, bit, conspicuousness));
    }
}
