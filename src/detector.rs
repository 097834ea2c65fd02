// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/detector.rs - 二维码检测
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

use image::RgbImage;
use thiserror::Error;

use crate::geometry::Quad;

mod rxing_detector;
pub use self::rxing_detector::RxingDetector;

#[derive(Error, Debug)]
pub enum DetectorError {
  #[error("检测器错误: {0}")]
  Backend(String),
  #[error("检测器异常终止: {0}")]
  Panicked(String),
}

/// 单帧检测结果
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Detection {
  pub payload: Option<String>,
  pub corners: Option<Quad>,
}

impl Detection {
  pub fn with_corners(corners: Quad) -> Self {
    Self {
      payload: None,
      corners: Some(corners),
    }
  }

  pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
    self.payload = Some(payload.into());
    self
  }
}

pub trait QrDetector {
  /// `Ok(None)` 表示本帧没有二维码
  fn detect_and_decode(&self, frame: &RgbImage) -> Result<Option<Detection>, DetectorError>;
}

impl<D: QrDetector + ?Sized> QrDetector for Box<D> {
  fn detect_and_decode(&self, frame: &RgbImage) -> Result<Option<Detection>, DetectorError> {
    (**self).detect_and_decode(frame)
  }
}
