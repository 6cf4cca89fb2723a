use clap::Parser;
use env_logger::Env;

use steganos::{
    cli::{Cli, Commands},
    handler::{
        handle_diff_decode, handle_diff_img_prep, handle_diff_with_prep_encode,
        handle_max_encodable_bytes, handle_reserved_place_decode, handle_reserved_place_encode,
        handle_up_down_diff_encode, handle_watermark,
    },
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令将执行分派到相应的处理函数。
/// 任何错误 (包括参数错误) 都会输出到标准错误并以退出码 1 结束。
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // 解析命令行参数；clap 默认以退出码 2 结束，这里统一为 1
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::MaxEncodableBytes(args) => handle_max_encodable_bytes(args),
        Commands::ReservedPlaceEncode(args) => handle_reserved_place_encode(args).map(drop),
        Commands::ReservedPlaceDecode(args) => handle_reserved_place_decode(args).map(drop),
        Commands::DiffImgPrep(args) => handle_diff_img_prep(args).map(drop),
        Commands::DiffWithPrepEncode(args) => handle_diff_with_prep_encode(args).map(drop),
        Commands::UpDownDiffEncode(args) => handle_up_down_diff_encode(args).map(drop),
        Commands::DiffDecode(args) => handle_diff_decode(args).map(drop),
        Commands::Watermark(args) => handle_watermark(args).map(drop),
    }
}
