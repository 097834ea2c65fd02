// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/output.rs - 显示输出定义
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

use std::time::Duration;

use image::RgbImage;
use thiserror::Error;
use url::Url;

use crate::FromUrl;
#[cfg(any(feature = "gstreamer_display", feature = "directory_record"))]
use crate::FromUrlWithScheme;
use crate::detector::Detection;

/// 帧显示端
pub trait FrameDisplay {
  type Error;

  /// 显示一帧（已绘制标注），`detection` 为本帧检测结果
  fn show(&mut self, frame: &RgbImage, detection: Option<&Detection>) -> Result<(), Self::Error>;

  /// 最多等待 `timeout`，返回期间按下的按键
  fn poll_key(&mut self, timeout: Duration) -> Option<char>;

  /// 窗口是否已被用户关闭
  fn is_closed(&self) -> bool {
    false
  }

  fn close(&mut self) -> Result<(), Self::Error>;
}

pub mod draw;

#[cfg(feature = "gstreamer_display")]
mod gstreamer_display;
#[cfg(feature = "gstreamer_display")]
pub use self::gstreamer_display::{GStreamerDisplay, GStreamerDisplayError};

#[cfg(feature = "directory_record")]
mod directory_record;
#[cfg(feature = "directory_record")]
pub use self::directory_record::{DirectoryRecordDisplay, DirectoryRecordError};

#[derive(Error, Debug)]
pub enum DisplayError {
  #[cfg(feature = "gstreamer_display")]
  #[error("GStreamer 显示错误: {0}")]
  GStreamerDisplayError(#[from] GStreamerDisplayError),
  #[cfg(feature = "directory_record")]
  #[error("目录记录错误: {0}")]
  DirectoryRecordError(#[from] DirectoryRecordError),
  #[error("URI 方案不匹配: {0}")]
  SchemeMismatch(String),
}

pub enum DisplayWrapper {
  #[cfg(feature = "gstreamer_display")]
  GStreamer(GStreamerDisplay),
  #[cfg(feature = "directory_record")]
  DirectoryRecord(DirectoryRecordDisplay),
}

impl FromUrl for DisplayWrapper {
  type Error = DisplayError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    match url.scheme() {
      #[cfg(feature = "gstreamer_display")]
      GStreamerDisplay::SCHEME => Ok(DisplayWrapper::GStreamer(GStreamerDisplay::from_url(url)?)),
      #[cfg(feature = "directory_record")]
      DirectoryRecordDisplay::SCHEME => Ok(DisplayWrapper::DirectoryRecord(
        DirectoryRecordDisplay::from_url(url)?,
      )),
      other => Err(DisplayError::SchemeMismatch(other.to_string())),
    }
  }
}

impl FrameDisplay for DisplayWrapper {
  type Error = DisplayError;

  fn show(&mut self, frame: &RgbImage, detection: Option<&Detection>) -> Result<(), Self::Error> {
    match self {
      #[cfg(feature = "gstreamer_display")]
      DisplayWrapper::GStreamer(display) => display.show(frame, detection).map_err(DisplayError::from),
      #[cfg(feature = "directory_record")]
      DisplayWrapper::DirectoryRecord(display) => {
        display.show(frame, detection).map_err(DisplayError::from)
      }
    }
  }

  fn poll_key(&mut self, timeout: Duration) -> Option<char> {
    match self {
      #[cfg(feature = "gstreamer_display")]
      DisplayWrapper::GStreamer(display) => display.poll_key(timeout),
      #[cfg(feature = "directory_record")]
      DisplayWrapper::DirectoryRecord(display) => display.poll_key(timeout),
    }
  }

  fn is_closed(&self) -> bool {
    match self {
      #[cfg(feature = "gstreamer_display")]
      DisplayWrapper::GStreamer(display) => display.is_closed(),
      #[cfg(feature = "directory_record")]
      DisplayWrapper::DirectoryRecord(display) => display.is_closed(),
    }
  }

  fn close(&mut self) -> Result<(), Self::Error> {
    match self {
      #[cfg(feature = "gstreamer_display")]
      DisplayWrapper::GStreamer(display) => display.close().map_err(DisplayError::from),
      #[cfg(feature = "directory_record")]
      DisplayWrapper::DirectoryRecord(display) => display.close().map_err(DisplayError::from),
    }
  }
}
