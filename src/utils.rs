//! # 通用工具
//!
//! 容量计算、隐写幅度校验、载荷分帧以及水印字符串构造。
//! 所有编码器与解码器共享这里的约定，以保证容量与实际消耗的比特数完全一致。

use crate::constants::{LENGTH_HEADER_BYTES, MAX_CONSPICUOUSNESS, WATERMARK_DELIMITER};
use crate::error::{Result, StegoError};
use crate::pixel::PixelGrid;

/// 计算图像在给定 "每像素比特数" 约定下可容纳的消息字节数 (已扣除长度头)。
pub fn capacity(grid: &PixelGrid, bits_per_pixel: usize) -> usize {
    let total_bytes = grid.pixel_count().saturating_mul(bits_per_pixel) / 8;
    total_bytes.saturating_sub(LENGTH_HEADER_BYTES)
}

/// 校验隐写幅度是否落在 `[1, max]` 区间内。
pub fn validate_conspicuousness(value: u32, max: u32) -> Result<()> {
    if value < 1 || value > max {
        return Err(StegoError::InvalidArgument(format!(
            "conspicuousness must be between 1 and {max}, got {value}"
        )));
    }
    Ok(())
}

/// 经过校验的隐写幅度，取值 `1..=255`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conspicuousness(u8);

impl Conspicuousness {
    pub fn new(value: u32) -> Result<Self> {
        validate_conspicuousness(value, MAX_CONSPICUOUSNESS)?;
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// 在 `capacity_bytes` 之内尽可能多次地重复 `pattern` (每次后接分隔符)。
///
/// 结果总是由完整的 "图案 + 分隔符" 单元组成。
///
/// # Errors
///
/// * 图案为空时返回 `InvalidArgument`。
/// * 连一个单元都放不下时返回 `CapacityExceeded`。
pub fn make_longest_encodable_string(capacity_bytes: usize, pattern: &str) -> Result<String> {
    if pattern.is_empty() {
        return Err(StegoError::InvalidArgument(
            "watermark pattern must not be empty".to_string(),
        ));
    }

    let unit = format!("{pattern}{WATERMARK_DELIMITER}");
    let repeats = capacity_bytes / unit.len();
    if repeats == 0 {
        return Err(StegoError::CapacityExceeded {
            required: unit.len(),
            available: capacity_bytes,
        });
    }

    Ok(unit.repeat(repeats))
}

/// 给消息加上 `u32` 大端序长度头。
pub(crate) fn frame_payload(message: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(message.len()).map_err(|_| {
        StegoError::InvalidArgument(format!(
            "message of {} bytes is too long to frame",
            message.len()
        ))
    })?;

    let mut payload = Vec::with_capacity(LENGTH_HEADER_BYTES + message.len());
    payload.extend_from_slice(&len.to_be_bytes());
    payload.extend_from_slice(message);
    Ok(payload)
}

/// 在写入任何像素之前检查容量。
///
/// 按比特比较 "长度头 + 消息" 与图像实际提供的比特数，
/// 图像连长度头都放不下时，即使消息为空也会失败。
pub(crate) fn ensure_capacity(
    message: &[u8],
    grid: &PixelGrid,
    bits_per_pixel: usize,
) -> Result<()> {
    let required_bits = (LENGTH_HEADER_BYTES + message.len()).saturating_mul(8);
    let offered_bits = grid.pixel_count().saturating_mul(bits_per_pixel);
    if required_bits > offered_bits {
        return Err(StegoError::CapacityExceeded {
            required: message.len(),
            available: capacity(grid, bits_per_pixel),
        });
    }
    Ok(())
}

/// 按字节内高位在前的顺序逐比特遍历。
pub(crate) fn message_bits(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
}

/// 从比特流中读取长度头和正文。
///
/// `available` 是图像容量，长度头声明的字节数超过它时视为无效载荷。
pub(crate) fn unframe_payload(
    mut bits: impl Iterator<Item = bool>,
    available: usize,
) -> Result<Vec<u8>> {
    let mut header = [0u8; LENGTH_HEADER_BYTES];
    for byte in header.iter_mut() {
        *byte = read_byte(&mut bits).ok_or(StegoError::InvalidPayload {
            declared: 0,
            available,
        })?;
    }

    let declared = u32::from_be_bytes(header) as usize;
    if declared > available {
        return Err(StegoError::InvalidPayload {
            declared,
            available,
        });
    }

    (0..declared)
        .map(|_| {
            read_byte(&mut bits).ok_or(StegoError::InvalidPayload {
                declared,
                available,
            })
        })
        .collect()
}

fn read_byte(bits: &mut impl Iterator<Item = bool>) -> Option<u8> {
    (0..8).try_fold(0u8, |acc, _| bits.next().map(|bit| (acc << 1) | bit as u8))
}
