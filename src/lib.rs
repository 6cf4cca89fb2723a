//! # steganos 库
//!
//! 本库包含通过扰动像素颜色通道隐藏文本的核心逻辑：
//! 固定位置 (reserved-place)、预处理差分 (diff-with-prep) 与上下扰动差分 (up/down diff) 三种编码策略，
//! 以及对应的解码器和命令行处理逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod image_io;
pub mod pixel;
pub mod utils;

pub use error::{Result, StegoError};
