// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/output/directory_record.rs - 目录记录输出（无窗口）
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

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, Utc};
use image::RgbImage;
use thiserror::Error;
use tracing::debug;

use crate::{FromUrl, FromUrlWithScheme, detector::Detection, output::FrameDisplay};

#[derive(Error, Debug)]
pub enum DirectoryRecordError {
  #[error("URI 方案不匹配")]
  SchemeMismatch,
  #[error("图像错误: {0}")]
  ImageError(#[from] image::ImageError),
  #[error("I/O 错误: {0}")]
  IoError(#[from] std::io::Error),
}

/// 把标注后的帧按日期保存到目录中
///
/// 默认只保存检测到二维码的帧，URL 带 `always` 参数时保存每一帧。
/// 每张图片旁边写一个同名 `.txt`，记录解码内容和角点。
pub struct DirectoryRecordDisplay {
  directory: PathBuf,
  frame_counter: u16,
  always: bool,
}

impl FromUrlWithScheme for DirectoryRecordDisplay {
  const SCHEME: &'static str = "folder";
}

impl FromUrl for DirectoryRecordDisplay {
  type Error = DirectoryRecordError;

  fn from_url(uri: &url::Url) -> Result<Self, Self::Error> {
    if uri.scheme() != Self::SCHEME {
      return Err(DirectoryRecordError::SchemeMismatch);
    }

    let always = uri.query_pairs().any(|(k, _)| k == "always");

    Ok(DirectoryRecordDisplay {
      directory: PathBuf::from(uri.path()),
      frame_counter: 0,
      always,
    })
  }
}

impl DirectoryRecordDisplay {
  pub fn new(directory: impl Into<PathBuf>, always: bool) -> Self {
    Self {
      directory: directory.into(),
      frame_counter: 0,
      always,
    }
  }

  fn frame_id(&mut self) -> u16 {
    self.frame_counter = self.frame_counter.wrapping_add(1);
    self.frame_counter
  }

  fn frame_path(&mut self) -> Result<PathBuf, DirectoryRecordError> {
    let now = Utc::now();
    let directory = self
      .directory
      .join(now.year().to_string())
      .join(format!("{:02}", now.month()))
      .join(format!("{:02}", now.day()));
    std::fs::create_dir_all(&directory)?;

    Ok(directory.join(format!(
      "{}-{:04X}.png",
      now.format("%H-%M-%S"),
      self.frame_id()
    )))
  }
}

fn record_detection(detection: &Detection, path: &Path) -> Result<(), std::io::Error> {
  let mut fields = vec![detection.payload.clone().unwrap_or_default()];
  if let Some(corners) = detection.corners.as_ref() {
    for corner in corners {
      fields.push(format!("{:.2}", corner.x));
      fields.push(format!("{:.2}", corner.y));
    }
  }
  std::fs::write(path.with_extension("txt"), fields.join(", "))
}

impl FrameDisplay for DirectoryRecordDisplay {
  type Error = DirectoryRecordError;

  fn show(&mut self, frame: &RgbImage, detection: Option<&Detection>) -> Result<(), Self::Error> {
    if !self.always && detection.is_none() {
      return Ok(());
    }

    let path = self.frame_path()?;
    frame.save(&path)?;
    if let Some(detection) = detection {
      record_detection(detection, &path)?;
    }
    debug!("保存帧到文件: {}", path.display());
    Ok(())
  }

  fn poll_key(&mut self, _timeout: Duration) -> Option<char> {
    None
  }

  fn close(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}
