/// 隐写幅度 (conspicuousness) 允许的最大值，等于单个颜色通道的取值上限。
pub const MAX_CONSPICUOUSNESS: u32 = 255;

/// 命令行未指定隐写幅度时使用的默认值。
pub const DEFAULT_CONSPICUOUSNESS: u32 = 1;

/// 用于隐写消息长度信息的字节数。
/// 长度以 `u32` 大端序写在载荷最前面，解码时先读出它再读取正文。
pub const LENGTH_HEADER_BYTES: usize = 4;

/// 固定位置 (reserved-place) 策略每个像素可存储的比特数。
/// 只使用 R 通道，因此每个像素 1 bit。
pub const RESERVED_PLACE_BITS_PER_PIXEL: usize = 1;

/// 差分类策略每个像素可存储的比特数。
/// R、G、B 三个通道各存 1 bit。
pub const DIFF_BITS_PER_PIXEL: usize = 3;

/// 编码结果文件名的后缀，插入在扩展名之前。
pub const ENCODED_SUFFIX: &str = "-encoded";

/// 预处理结果文件名的后缀，插入在扩展名之前。
pub const PREPPED_SUFFIX: &str = "-prepped";

/// 水印模式下，重复图案之间的分隔符。
pub const WATERMARK_DELIMITER: &str = " ";
