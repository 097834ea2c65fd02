// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/args.rs - 项目参数配置
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use url::Url;

/// QrAngle 项目参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 摄像头设备索引（/dev/videoN）
  #[arg(long, default_value_t = 0, value_name = "INDEX")]
  pub device: usize,

  /// 读帧失败后重新打开的设备索引，缺省与 --device 相同
  #[arg(long, value_name = "INDEX")]
  pub reacquire_device: Option<usize>,

  /// 打开摄像头的最大尝试次数
  #[arg(long, default_value_t = 5, value_name = "COUNT")]
  pub attempts: u32,

  /// 每次打开失败后的等待秒数
  #[arg(long, default_value_t = 5, value_name = "SECONDS")]
  pub delay: u64,

  /// 读帧失败后、重新打开前的等待秒数
  #[arg(long, default_value_t = 2, value_name = "SECONDS")]
  pub reacquire_pause: u64,

  /// 单帧处理出现意外错误后的等待秒数
  #[arg(long, default_value_t = 1, value_name = "SECONDS")]
  pub error_pause: u64,

  /// 显示输出
  /// 支持格式:
  /// - 窗口: gst://autovideosink?title=...
  /// - 目录: folder:///path/to/dir（加 ?always 保存每一帧）
  #[arg(
    long,
    value_name = "OUTPUT",
    default_value = "gst://autovideosink?title=QR%20Rotation%20Detection"
  )]
  pub display: Url,

  /// 退出按键
  #[arg(long, default_value_t = 'q', value_name = "KEY")]
  pub quit_key: char,

  /// 角度文字所用的 TTF 字体
  #[arg(
    long,
    value_name = "FILE",
    default_value = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"
  )]
  pub font: PathBuf,

  /// 日志文件路径
  #[arg(long, value_name = "FILE", default_value = "qr_detection.log")]
  pub log_file: PathBuf,

  /// 日志级别
  #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
  pub log_level: Level,

  /// 最大处理帧数，缺省不限制
  #[arg(long, value_name = "COUNT")]
  pub max_frames: Option<u64>,
}

impl Args {
  pub fn reacquire_device(&self) -> usize {
    self.reacquire_device.unwrap_or(self.device)
  }

  pub fn delay(&self) -> Duration {
    Duration::from_secs(self.delay)
  }
}
