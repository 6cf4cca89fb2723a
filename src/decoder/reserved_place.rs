use crate::constants::RESERVED_PLACE_BITS_PER_PIXEL;
use crate::encoder::reserved_place::{RESERVED_CHANNEL, low_region_mask};
use crate::error::Result;
use crate::pixel::PixelGrid;
use crate::utils::{Conspicuousness, capacity, unframe_payload};
use log::debug;

/// 低位区域的值不小于幅度的一半时判为 1。
pub fn decode_value(value: u8, conspicuousness: Conspicuousness) -> bool {
    let low = value as u16 & low_region_mask(conspicuousness);
    low * 2 >= conspicuousness.get() as u16
}

pub fn decode(encoded: &PixelGrid, conspicuousness: u32) -> Result<Vec<u8>> {
    let conspicuousness = Conspicuousness::new(conspicuousness)?;
    let available = capacity(encoded, RESERVED_PLACE_BITS_PER_PIXEL);
    debug!(
        "reserved-place decode: up to {} bytes, conspicuousness {}",
        available,
        conspicuousness.get()
    );

    let bits = encoded
        .pixels()
        .map(|p| decode_value(p.channel(RESERVED_CHANNEL), conspicuousness));
    unframe_payload(bits, available)
}
