//! # 错误类型模块
//!
//! 核心隐写逻辑只返回 [`StegoError`]，从不打印或退出进程。
//! 将错误转换为用户可读的信息和退出码是命令行层 (`handler` / `main`) 的职责。

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegoError {
    /// 参数非法，例如隐写幅度超出范围或水印图案为空
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// 消息超出图像在当前策略下的容量
    #[error("Not enough space in the image. Required: {required} bytes, Available: {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// 差分解码时原图与编码图尺寸不一致
    #[error("Image dimensions differ: source is {}x{}, encoded is {}x{}", .source_size.0, .source_size.1, .encoded_size.0, .encoded_size.1)]
    DimensionMismatch {
        source_size: (u32, u32),
        encoded_size: (u32, u32),
    },

    /// 读出的长度头超出图像容量，说明图像中没有隐藏消息或参数不匹配
    #[error("Decoded length header declares {declared} bytes but the image holds at most {available}")]
    InvalidPayload { declared: usize, available: usize },

    /// 图像读写失败
    #[error("Image I/O failed for {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, StegoError>;
