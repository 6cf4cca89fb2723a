//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，每种模式对应一个子命令。
//! 参数个数、隐写幅度的默认值以及输出路径选项都在此模块中定义。

use crate::constants::DEFAULT_CONSPICUOUSNESS;
use crate::encoder::Encoder;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// 通过扰动像素颜色通道在图像中隐藏文本，并可单独从编码图像或对比原图恢复。
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "snake_case")]
pub enum Commands {
    /// 输出图像在各策略下最多可隐藏的字节数。
    MaxEncodableBytes(CapacityArgs),

    /// 以固定位置策略隐藏消息，解码时不需要原图。
    ReservedPlaceEncode(EncodeArgs),

    /// 从固定位置策略编码的图像中恢复消息。
    ReservedPlaceDecode(ReservedPlaceDecodeArgs),

    /// 为差分编码预处理图像：每个通道减去隐写幅度。
    DiffImgPrep(PrepArgs),

    /// 在预处理过的图像上以只加不减的方式隐藏消息。
    DiffWithPrepEncode(DiffWithPrepEncodeArgs),

    /// 以上下扰动的方向隐藏消息，解码时需要原图。
    UpDownDiffEncode(EncodeArgs),

    /// 对比原图与编码图像恢复消息。
    DiffDecode(DiffDecodeArgs),

    /// 在图像容量内尽可能多次地重复隐藏一段文本。
    Watermark(WatermarkArgs),
}

/// 'max_encodable_bytes' 命令所需的参数。
#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// 要计算容量的图像文件路径。
    pub source: PathBuf,
}

/// 输出文件相关的公共选项。
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// 结果图像的保存路径，默认在源文件名的扩展名前插入后缀。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 编码类命令所需的参数。
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径。
    pub source: PathBuf,

    /// 要隐藏的消息；若该参数是已存在的文件路径，则使用文件内容。
    pub message: String,

    /// 隐写幅度 (1-255)，越大越明显。
    #[arg(default_value_t = DEFAULT_CONSPICUOUSNESS)]
    pub conspicuousness: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// 'diff_with_prep_encode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct DiffWithPrepEncodeArgs {
    #[command(flatten)]
    pub encode: EncodeArgs,

    /// 编码前先对源图像做预处理，适用于直接传入原图的情况。
    #[arg(long)]
    pub prep: bool,
}

/// 'reserved_place_decode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct ReservedPlaceDecodeArgs {
    /// 已隐藏消息的图像文件路径。
    pub encoded: PathBuf,

    /// 编码时使用的隐写幅度。
    #[arg(default_value_t = DEFAULT_CONSPICUOUSNESS)]
    pub conspicuousness: u32,
}

/// 'diff_img_prep' 命令所需的参数。
#[derive(Args, Debug)]
pub struct PrepArgs {
    /// 要预处理的原图路径。
    pub source: PathBuf,

    /// 预处理时减去的隐写幅度，之后编码应使用相同的值。
    #[arg(default_value_t = DEFAULT_CONSPICUOUSNESS)]
    pub conspicuousness: u32,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// 'diff_decode' 命令所需的参数。
#[derive(Args, Debug)]
pub struct DiffDecodeArgs {
    /// 作为基准的图像：上下扰动编码的原图，或预处理后的图像。
    pub source: PathBuf,

    /// 已隐藏消息的图像文件路径。
    pub encoded: PathBuf,

    /// 基准图像是未预处理的原图，编码前曾以该幅度预处理。
    #[arg(long, value_name = "CONSPICUOUSNESS")]
    pub prepped_with: Option<u32>,
}

/// 水印可使用的编码模式。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "snake_case")]
pub enum EncodeMode {
    ReservedPlaceEncode,
    DiffWithPrepEncode,
    UpDownDiffEncode,
}

impl From<EncodeMode> for Encoder {
    fn from(mode: EncodeMode) -> Self {
        match mode {
            EncodeMode::ReservedPlaceEncode => Encoder::ReservedPlace,
            EncodeMode::DiffWithPrepEncode => Encoder::DiffWithPrep,
            EncodeMode::UpDownDiffEncode => Encoder::UpDownDiff,
        }
    }
}

/// 'watermark' 命令所需的参数。
#[derive(Args, Debug)]
pub struct WatermarkArgs {
    /// 用于写入水印的编码模式。
    #[arg(value_enum)]
    pub mode: EncodeMode,

    /// 用于隐写的输入图像文件路径。
    pub source: PathBuf,

    /// 要重复的水印文本；若该参数是已存在的文件路径，则使用文件内容。
    pub pattern: String,

    /// 隐写幅度 (1-255)。
    #[arg(default_value_t = DEFAULT_CONSPICUOUSNESS)]
    pub conspicuousness: u32,

    /// 使用 diff_with_prep_encode 时先对源图像做预处理，适用于直接传入原图的情况。
    #[arg(long)]
    pub prep: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}
