// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/logging.rs - 日志初始化
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

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*};

#[derive(Error, Debug)]
pub enum LoggingError {
  #[error("无法打开日志文件 {path}: {source}")]
  LogFile {
    path: String,
    source: std::io::Error,
  },
  #[error("日志已经初始化: {0}")]
  AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// 初始化进程级日志：同时输出到控制台和日志文件（追加写入）
///
/// 只能调用一次，重复调用返回 `AlreadyInitialized`。
pub fn init(log_file: &Path, level: Level) -> Result<(), LoggingError> {
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .map_err(|source| LoggingError::LogFile {
      path: log_file.display().to_string(),
      source,
    })?;

  tracing_subscriber::registry()
    .with(LevelFilter::from_level(level))
    .with(fmt::layer().with_target(false))
    .with(
      fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file)),
    )
    .try_init()?;

  Ok(())
}
