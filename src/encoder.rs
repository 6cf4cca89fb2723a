//! # 编码器
//!
//! 三种可互换的编码策略，共享同一组约定：
//! 先校验幅度与容量，再在输入图像的副本上写入带长度头的载荷，输入图像本身保持不变。

pub mod diff_with_prep;
pub mod reserved_place;
pub mod up_down_diff;

use crate::constants::{DIFF_BITS_PER_PIXEL, RESERVED_PLACE_BITS_PER_PIXEL};
use crate::error::Result;
use crate::pixel::PixelGrid;
use crate::utils::{Conspicuousness, capacity, ensure_capacity, frame_payload, message_bits};
use log::debug;
use rand::Rng;

pub use diff_with_prep::{encode_next_value, prep_source_image};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    /// 在每个像素的 R 通道固定位置写入比特，解码不需要原图
    ReservedPlace,
    /// 在预处理过的图像上只做正向扰动，解码需要原图
    DiffWithPrep,
    /// 以扰动方向 (加或减) 表示比特，解码需要原图
    UpDownDiff,
}

impl Encoder {
    pub fn name(self) -> &'static str {
        match self {
            Encoder::ReservedPlace => "reserved-place",
            Encoder::DiffWithPrep => "diff-with-prep",
            Encoder::UpDownDiff => "up/down diff",
        }
    }

    pub fn bits_per_pixel(self) -> usize {
        match self {
            Encoder::ReservedPlace => RESERVED_PLACE_BITS_PER_PIXEL,
            Encoder::DiffWithPrep | Encoder::UpDownDiff => DIFF_BITS_PER_PIXEL,
        }
    }

    /// 该策略在 `grid` 上最多可编码的消息字节数。
    pub fn max_encodable_bytes(self, grid: &PixelGrid) -> usize {
        capacity(grid, self.bits_per_pixel())
    }

    /// 将 `message` 编码进 `source` 的副本中并返回。
    ///
    /// `DiffWithPrep` 期望 `source` 已经过 [`prep_source_image`] 处理。
    /// `rng` 只被差分类策略用来抽取扰动幅度。
    ///
    /// # Errors
    ///
    /// * 隐写幅度不在 `1..=255` 时返回 `InvalidArgument`。
    /// * 消息超出容量时返回 `CapacityExceeded`，此时不会生成任何输出。
    pub fn encode<R: Rng>(
        self,
        source: &PixelGrid,
        message: &[u8],
        conspicuousness: u32,
        rng: &mut R,
    ) -> Result<PixelGrid> {
        let conspicuousness = Conspicuousness::new(conspicuousness)?;
        let available = self.max_encodable_bytes(source);
        ensure_capacity(message, source, self.bits_per_pixel())?;

        debug!(
            "{} encode: {} of {} bytes, conspicuousness {}",
            self.name(),
            message.len(),
            available,
            conspicuousness.get()
        );

        let payload = frame_payload(message)?;
        let bits = message_bits(&payload);
        let mut encoded = source.clone();
        match self {
            Encoder::ReservedPlace => reserved_place::embed(&mut encoded, bits, conspicuousness),
            Encoder::DiffWithPrep => diff_with_prep::embed(&mut encoded, bits, conspicuousness, rng),
            Encoder::UpDownDiff => up_down_diff::embed(&mut encoded, bits, conspicuousness, rng),
        }
        Ok(encoded)
    }
}
