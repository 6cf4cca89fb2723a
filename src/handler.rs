//! # 命令处理逻辑模块
//!
//! 包含各子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编码/解码策略以及向用户报告结果；
//! 核心层返回的 `StegoError` 在这里被附加上下文后交给 `main`。

use crate::cli::{
    CapacityArgs, DiffDecodeArgs, DiffWithPrepEncodeArgs, EncodeArgs, OutputArgs, PrepArgs,
    ReservedPlaceDecodeArgs, WatermarkArgs,
};
use crate::constants::{ENCODED_SUFFIX, PREPPED_SUFFIX};
use crate::decoder::{Decoder, DiffBaseline};
use crate::encoder::{Encoder, prep_source_image};
use crate::image_io::{read_image, write_image};
use crate::pixel::PixelGrid;
use crate::utils::make_longest_encodable_string;
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'max_encodable_bytes' 命令，输出每种策略的容量。
pub fn handle_max_encodable_bytes(args: CapacityArgs) -> Result<()> {
    let grid = load(&args.source)?;

    println!("Source file: {}", args.source.to_string_lossy().green().bold());
    for encoder in [Encoder::ReservedPlace, Encoder::DiffWithPrep, Encoder::UpDownDiff] {
        println!(
            "Max encodable bytes ({}): {}",
            encoder.name(),
            encoder.max_encodable_bytes(&grid).to_string().green().bold()
        );
    }
    Ok(())
}

pub fn handle_reserved_place_encode(args: EncodeArgs) -> Result<PathBuf> {
    handle_encode(Encoder::ReservedPlace, args)
}

pub fn handle_up_down_diff_encode(args: EncodeArgs) -> Result<PathBuf> {
    handle_encode(Encoder::UpDownDiff, args)
}

/// 处理 'diff_with_prep_encode' 命令。
///
/// 默认认为源图像已经由 'diff_img_prep' 预处理过；指定 `--prep` 时先在内存中预处理。
pub fn handle_diff_with_prep_encode(args: DiffWithPrepEncodeArgs) -> Result<PathBuf> {
    if !args.prep {
        return handle_encode(Encoder::DiffWithPrep, args.encode);
    }

    let args = args.encode;
    let message = read_message(&args.message)?;
    let grid = load(&args.source)?;
    let prepped = prep_source_image(&grid, args.conspicuousness)
        .context("Failed to prep the source image")?;
    encode_and_save(Encoder::DiffWithPrep, &prepped, &message, &args)
}

/// 处理各编码命令的执行逻辑。
///
/// 负责读取消息与源图像、调用编码策略，并把结果写入输出路径。
///
/// # Arguments
///
/// * `encoder` - 使用的编码策略。
/// * `args` - 包含源图像、消息、隐写幅度与输出选项的 `EncodeArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取源图像或消息文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 隐写幅度非法，或图像没有足够的空间来隐藏消息。
/// * 无法写入到输出图像文件。
pub fn handle_encode(encoder: Encoder, args: EncodeArgs) -> Result<PathBuf> {
    let message = read_message(&args.message)?;
    let grid = load(&args.source)?;
    encode_and_save(encoder, &grid, &message, &args)
}

fn encode_and_save(
    encoder: Encoder,
    grid: &PixelGrid,
    message: &[u8],
    args: &EncodeArgs,
) -> Result<PathBuf> {
    let dest = resolve_output(&args.source, ENCODED_SUFFIX, &args.output)?;
    println!("Encoding message: {}", String::from_utf8_lossy(message));

    let encoded = encoder
        .encode(grid, message, args.conspicuousness, &mut rand::rng())
        .with_context(|| {
            format!(
                "Failed to encode the message with the {} strategy.",
                encoder.name().red().bold()
            )
        })?;

    save(&encoded, &dest)?;
    info!("{} encode wrote {}", encoder.name(), dest.display());
    println!(
        "Encoding complete. Encoded file location: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(dest)
}

/// 处理 'reserved_place_decode' 命令，返回并输出恢复的消息。
pub fn handle_reserved_place_decode(args: ReservedPlaceDecodeArgs) -> Result<String> {
    let encoded = load(&args.encoded)?;
    let decoded = Decoder::ReservedPlace {
        conspicuousness: args.conspicuousness,
    }
    .decode(&encoded, None)
    .with_context(|| {
        format!(
            "Failed to recover a message from '{}'. \nThe image may not contain a hidden message or the conspicuousness differs.",
            args.encoded.to_string_lossy().red().bold()
        )
    })?;

    Ok(report_decoded(&decoded))
}

/// 处理 'diff_img_prep' 命令，返回预处理图像的保存路径。
pub fn handle_diff_img_prep(args: PrepArgs) -> Result<PathBuf> {
    println!("Prepping source file for diff-type encoding");
    let grid = load(&args.source)?;
    let dest = resolve_output(&args.source, PREPPED_SUFFIX, &args.output)?;

    let prepped = prep_source_image(&grid, args.conspicuousness)
        .context("Failed to prep the source image")?;
    save(&prepped, &dest)?;

    println!(
        "Prepping complete. Prepped file location: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(dest)
}

/// 处理 'diff_decode' 命令，返回并输出恢复的消息。
pub fn handle_diff_decode(args: DiffDecodeArgs) -> Result<String> {
    let source = load(&args.source)?;
    let encoded = load(&args.encoded)?;

    let baseline = match args.prepped_with {
        Some(conspicuousness) => DiffBaseline::Prepped { conspicuousness },
        None => DiffBaseline::Source,
    };
    let decoded = Decoder::Diff(baseline)
        .decode(&encoded, Some(&source))
        .with_context(|| {
            format!(
                "Failed to recover a message by comparing '{}' with '{}'.",
                args.source.to_string_lossy().red().bold(),
                args.encoded.to_string_lossy().red().bold()
            )
        })?;

    Ok(report_decoded(&decoded))
}

/// 处理 'watermark' 命令。
///
/// 计算所选策略的容量，把水印文本重复到恰好填满容量，再交给对应的编码命令。
/// `--prep` 只对 diff_with_prep_encode 有效，会先在内存中预处理源图像。
pub fn handle_watermark(args: WatermarkArgs) -> Result<PathBuf> {
    let encoder = Encoder::from(args.mode);
    anyhow::ensure!(
        !args.prep || encoder == Encoder::DiffWithPrep,
        "--prep is only valid with {}",
        "diff_with_prep_encode".red().bold()
    );

    let grid = load(&args.source)?;
    let grid = if args.prep {
        prep_source_image(&grid, args.conspicuousness)
            .context("Failed to prep the source image")?
    } else {
        grid
    };

    let pattern = read_message(&args.pattern)?;
    let pattern = String::from_utf8(pattern).context("Watermark text must be valid UTF-8")?;
    let capacity = encoder.max_encodable_bytes(&grid);
    let watermark = make_longest_encodable_string(capacity, &pattern)
        .context("Failed to build the watermark text")?;
    info!(
        "watermark fills {} of {} bytes with '{}'",
        watermark.len(),
        capacity,
        pattern
    );

    let encode_args = EncodeArgs {
        source: args.source,
        message: watermark,
        conspicuousness: args.conspicuousness,
        output: args.output,
    };
    encode_and_save(encoder, &grid, encode_args.message.as_bytes(), &encode_args)
}

/// 若参数是已存在的文件路径则读取其内容，否则把参数本身当作消息。
pub fn read_message(message_or_path: &str) -> Result<Vec<u8>> {
    let path = Path::new(message_or_path);
    if !path.is_file() {
        return Ok(message_or_path.as_bytes().to_vec());
    }

    let message = fs::read(path).with_context(|| {
        format!(
            "Unable to read message file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    println!(
        "Message read from file: {}",
        path.to_string_lossy().green().bold()
    );
    Ok(message)
}

/// 在文件名的扩展名之前插入 `suffix`，例如 `dir/a.png` -> `dir/a-encoded.png`。
pub fn append_to_file_name(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(file_name)
}

fn resolve_output(source: &Path, suffix: &str, output: &OutputArgs) -> Result<PathBuf> {
    let dest = output
        .output
        .clone()
        .unwrap_or_else(|| append_to_file_name(source, suffix));

    anyhow::ensure!(
        output.force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );
    Ok(dest)
}

fn load(path: &Path) -> Result<PixelGrid> {
    read_image(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn save(grid: &PixelGrid, path: &Path) -> Result<()> {
    write_image(grid, path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn report_decoded(decoded: &[u8]) -> String {
    let message = String::from_utf8_lossy(decoded).into_owned();
    println!("Decoded message:");
    println!("{message}");
    message
}
