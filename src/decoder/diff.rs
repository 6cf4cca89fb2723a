use crate::constants::DIFF_BITS_PER_PIXEL;
use crate::error::{Result, StegoError};
use crate::pixel::{Channel, PixelGrid};
use crate::utils::{Conspicuousness, capacity, unframe_payload};
use log::debug;

/// 差分解码时 `source` 与编码基准的关系。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffBaseline {
    /// `source` 本身就是编码基准：上下扰动编码的原图，或预处理后的图像。
    Source,
    /// `source` 是未经预处理的原图，编码前曾以该幅度预处理。
    Prepped { conspicuousness: u32 },
}

/// 判断单个通道的比特。
///
/// `Source` 基准下差值为正即为 1；原值已饱和 (255) 时无法再向上扰动，未变化也视为 1。
/// `Prepped` 基准下重新计算预处理值 `max(source - c, 0)`，编码值高于它即为 1，
/// 在 `source >= c` 时等价于 `diff > -c`。
fn classify(source: u8, encoded: u8, baseline: Option<Conspicuousness>) -> bool {
    match baseline {
        None if source == u8::MAX => encoded == u8::MAX,
        None => encoded > source,
        Some(c) => encoded > source.saturating_sub(c.get()),
    }
}

/// 对比 `source` 与 `encoded` 恢复消息。
///
/// # Errors
///
/// * 两张图尺寸不同时返回 `DimensionMismatch`。
/// * `Prepped` 的幅度非法时返回 `InvalidArgument`。
/// * 长度头与图像容量不符时返回 `InvalidPayload`。
pub fn decode(source: &PixelGrid, encoded: &PixelGrid, baseline: DiffBaseline) -> Result<Vec<u8>> {
    if source.dimensions() != encoded.dimensions() {
        return Err(StegoError::DimensionMismatch {
            source_size: source.dimensions(),
            encoded_size: encoded.dimensions(),
        });
    }

    let prepped_by = match baseline {
        DiffBaseline::Source => None,
        DiffBaseline::Prepped { conspicuousness } => Some(Conspicuousness::new(conspicuousness)?),
    };
    let available = capacity(encoded, DIFF_BITS_PER_PIXEL);
    debug!("diff decode ({baseline:?}): up to {available} bytes");

    let bits = source
        .pixels()
        .zip(encoded.pixels())
        .flat_map(|(s, e)| {
            Channel::ALL.map(|channel| classify(s.channel(channel), e.channel(channel), prepped_by))
        });
    unframe_payload(bits, available)
}
