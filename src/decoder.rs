//! # 解码器
//!
//! 固定位置解码只需要编码后的图像；差分解码还需要作为基准的原图。

pub mod diff;
pub mod reserved_place;

use crate::error::{Result, StegoError};
use crate::pixel::PixelGrid;

pub use diff::DiffBaseline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoder {
    /// 以编码时相同的隐写幅度读取 R 通道
    ReservedPlace { conspicuousness: u32 },
    /// 与原图逐通道作差
    Diff(DiffBaseline),
}

impl Decoder {
    /// 从 `encoded` 中恢复消息。
    ///
    /// `Diff` 需要 `source`，`ReservedPlace` 会忽略它。
    ///
    /// # Errors
    ///
    /// * `Diff` 未提供 `source`，或隐写幅度非法时返回 `InvalidArgument`。
    /// * 两张图尺寸不同时返回 `DimensionMismatch`。
    /// * 长度头与图像容量不符时返回 `InvalidPayload`。
    pub fn decode(self, encoded: &PixelGrid, source: Option<&PixelGrid>) -> Result<Vec<u8>> {
        match self {
            Decoder::ReservedPlace { conspicuousness } => {
                reserved_place::decode(encoded, conspicuousness)
            }
            Decoder::Diff(baseline) => {
                let source = source.ok_or_else(|| {
                    StegoError::InvalidArgument(
                        "diff decoding requires the source image".to_string(),
                    )
                })?;
                diff::decode(source, encoded, baseline)
            }
        }
    }
}
