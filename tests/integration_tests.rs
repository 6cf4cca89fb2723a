use image::{ImageBuffer, Rgb};
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use steganos::{
    cli::{
        CapacityArgs, DiffDecodeArgs, DiffWithPrepEncodeArgs, EncodeArgs, EncodeMode, OutputArgs,
        PrepArgs, ReservedPlaceDecodeArgs, WatermarkArgs,
    },
    constants::WATERMARK_DELIMITER,
    encoder::Encoder,
    handler::{
        handle_diff_decode, handle_diff_img_prep, handle_diff_with_prep_encode,
        handle_max_encodable_bytes, handle_reserved_place_decode, handle_reserved_place_encode,
        handle_up_down_diff_encode, handle_watermark,
    },
    image_io::read_image,
};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(3))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgb([chunk[0], chunk[1], chunk[2]]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn encode_args(source: &Path, message: &str, conspicuousness: u32) -> EncodeArgs {
    EncodeArgs {
        source: source.to_path_buf(),
        message: message.to_string(),
        conspicuousness,
        output: OutputArgs::default(),
    }
}

const MESSAGE: &str = "This is a test message for the handler! 这是一个给处理器的测试信息！";

/// 验证固定位置策略从隐藏到恢复的完整流程，以及默认输出文件名
#[test]
fn test_reserved_place_encode_and_decode() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 100, 100);

    let encoded = handle_reserved_place_encode(encode_args(&original, MESSAGE, 4))?;
    assert_eq!(encoded, dir.path().join("original-encoded.png"));
    assert!(encoded.exists(), "Encoded image should be created.");

    let decoded = handle_reserved_place_decode(ReservedPlaceDecodeArgs {
        encoded,
        conspicuousness: 4,
    })?;
    assert_eq!(decoded, MESSAGE, "Recovered text must match the original.");

    Ok(())
}

/// 验证上下扰动策略与差分解码
#[test]
fn test_up_down_diff_encode_and_decode() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 60, 40);

    let encoded = handle_up_down_diff_encode(encode_args(&original, MESSAGE, 20))?;
    let decoded = handle_diff_decode(DiffDecodeArgs {
        source: original,
        encoded,
        prepped_with: None,
    })?;
    assert_eq!(decoded, MESSAGE);

    Ok(())
}

/// 验证 "预处理 -> 编码 -> 解码" 的两步流程，可分别对比预处理图与原图解码
#[test]
fn test_prep_then_diff_with_prep_encode() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 60, 40);

    let prepped = handle_diff_img_prep(PrepArgs {
        source: original.clone(),
        conspicuousness: 6,
        output: OutputArgs::default(),
    })?;
    assert_eq!(prepped, dir.path().join("original-prepped.png"));

    let encoded = handle_diff_with_prep_encode(DiffWithPrepEncodeArgs {
        encode: encode_args(&prepped, MESSAGE, 6),
        prep: false,
    })?;
    assert_eq!(encoded, dir.path().join("original-prepped-encoded.png"));

    let against_prepped = handle_diff_decode(DiffDecodeArgs {
        source: prepped,
        encoded: encoded.clone(),
        prepped_with: None,
    })?;
    assert_eq!(against_prepped, MESSAGE);

    let against_original = handle_diff_decode(DiffDecodeArgs {
        source: original,
        encoded,
        prepped_with: Some(6),
    })?;
    assert_eq!(against_original, MESSAGE);

    Ok(())
}

/// 验证 `--prep` 可以一步完成预处理与编码
#[test]
fn test_diff_with_prep_encode_with_inline_prep() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 30, 30);

    let encoded = handle_diff_with_prep_encode(DiffWithPrepEncodeArgs {
        encode: encode_args(&original, "inline prep", 3),
        prep: true,
    })?;

    let decoded = handle_diff_decode(DiffDecodeArgs {
        source: original,
        encoded,
        prepped_with: Some(3),
    })?;
    assert_eq!(decoded, "inline prep");

    Ok(())
}

/// 验证消息参数指向已存在文件时读取文件内容
#[test]
fn test_message_read_from_file() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    let text_path = dir.path().join("source.txt");
    create_test_image(&original, 50, 50);
    fs::write(&text_path, "message kept in a file")?;

    let encoded =
        handle_reserved_place_encode(encode_args(&original, &text_path.to_string_lossy(), 1))?;
    let decoded = handle_reserved_place_decode(ReservedPlaceDecodeArgs {
        encoded,
        conspicuousness: 1,
    })?;
    assert_eq!(decoded, "message kept in a file");

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");
    create_test_image(&image_path, 50, 50);

    fs::write(&dest_path, "this is a dummy file to be overwritten")?;

    let mut args = encode_args(&image_path, "some text", 1);
    args.output = OutputArgs {
        output: Some(dest_path.clone()),
        force: false,
    };
    let result = handle_up_down_diff_encode(args);
    assert!(result.is_err(), "Execution should fail without --force when file exists.");
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    let mut args = encode_args(&image_path, "some text", 1);
    args.output = OutputArgs {
        output: Some(dest_path.clone()),
        force: true,
    };
    let written = handle_up_down_diff_encode(args)?;
    assert_eq!(written, dest_path);

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，且不会生成输出文件
#[test]
fn test_encode_not_enough_space() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    create_test_image(&image_path, 10, 10);

    let large_text = "a".repeat(5000);
    let result = handle_reserved_place_encode(encode_args(&image_path, &large_text, 1));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("Not enough space"));
    }
    assert!(!dir.path().join("small-encoded.png").exists());

    Ok(())
}

/// 验证非法隐写幅度会在写入前失败
#[test]
fn test_invalid_conspicuousness() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    create_test_image(&image_path, 20, 20);

    let result = handle_diff_img_prep(PrepArgs {
        source: image_path,
        conspicuousness: 0,
        output: OutputArgs::default(),
    });
    assert!(result.is_err());
    assert!(!dir.path().join("image-prepped.png").exists());

    Ok(())
}

/// 验证尺寸不同的图像无法差分解码
#[test]
fn test_diff_decode_dimension_mismatch() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let a = dir.path().join("a.png");
    let b = dir.path().join("b.png");
    create_test_image(&a, 20, 20);
    create_test_image(&b, 20, 21);

    let result = handle_diff_decode(DiffDecodeArgs {
        source: a,
        encoded: b,
        prepped_with: None,
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("dimensions differ"));
    }

    Ok(())
}

/// 验证水印模式把容量恰好填满整数个图案
#[test]
fn test_watermark_fills_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 40, 40);

    let pattern = "(c) steganos";
    let encoded = handle_watermark(WatermarkArgs {
        mode: EncodeMode::UpDownDiffEncode,
        source: original.clone(),
        pattern: pattern.to_string(),
        conspicuousness: 2,
        prep: false,
        output: OutputArgs::default(),
    })?;

    let decoded = handle_diff_decode(DiffDecodeArgs {
        source: original.clone(),
        encoded,
        prepped_with: None,
    })?;

    let unit = format!("{pattern}{WATERMARK_DELIMITER}");
    let capacity = Encoder::UpDownDiff.max_encodable_bytes(&read_image(&original)?);
    assert_eq!(decoded.len(), capacity / unit.len() * unit.len());
    assert!(capacity - decoded.len() < unit.len());
    assert_eq!(decoded, unit.repeat(capacity / unit.len()));

    Ok(())
}

/// 验证水印在原图上配合 `--prep` 使用预处理差分编码，饱和像素也能对比原图恢复
#[test]
fn test_watermark_with_inline_prep() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("white.png");
    ImageBuffer::from_pixel(30, 30, Rgb([255u8, 255, 255])).save(&original)?;

    let pattern = "mark";
    let encoded = handle_watermark(WatermarkArgs {
        mode: EncodeMode::DiffWithPrepEncode,
        source: original.clone(),
        pattern: pattern.to_string(),
        conspicuousness: 4,
        prep: true,
        output: OutputArgs::default(),
    })?;

    let decoded = handle_diff_decode(DiffDecodeArgs {
        source: original.clone(),
        encoded,
        prepped_with: Some(4),
    })?;
    let unit = format!("{pattern}{WATERMARK_DELIMITER}");
    let capacity = Encoder::DiffWithPrep.max_encodable_bytes(&read_image(&original)?);
    assert_eq!(decoded, unit.repeat(capacity / unit.len()));

    Ok(())
}

/// 验证 `--prep` 不能与其他编码模式组合
#[test]
fn test_watermark_prep_requires_diff_with_prep() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let original = dir.path().join("original.png");
    create_test_image(&original, 20, 20);

    let result = handle_watermark(WatermarkArgs {
        mode: EncodeMode::UpDownDiffEncode,
        source: original,
        pattern: "mark".to_string(),
        conspicuousness: 1,
        prep: true,
        output: OutputArgs::default(),
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("--prep is only valid"));
    }
    assert!(!dir.path().join("original-encoded.png").exists());

    Ok(())
}

/// 验证读取不存在的图像时返回错误
#[test]
fn test_missing_image() {
    let result = handle_max_encodable_bytes(CapacityArgs {
        source: PathBuf::from("/nonexistent/steganos/missing.png"),
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unable to read image file"));
    }
}
