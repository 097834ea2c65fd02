// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/detector/rxing_detector.rs - 基于 rxing 的二维码检测器
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

use std::any::Any;
use std::panic::{self, UnwindSafe};

use image::RgbImage;
use rxing::{BarcodeFormat, Exceptions, RXingResult};
use tracing::debug;

use super::{Detection, DetectorError, QrDetector};
use crate::geometry::{Point, complete_parallelogram};

/// rxing 二维码检测器
///
/// rxing 给出的结果点依次为左下、左上、右上三个定位图案中心（可能附带校正图案），
/// 第四个角点按平行四边形补全。
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingDetector;

impl QrDetector for RxingDetector {
  fn detect_and_decode(&self, frame: &RgbImage) -> Result<Option<Detection>, DetectorError> {
    let luma = image::imageops::grayscale(frame);
    let (width, height) = luma.dimensions();
    let data = luma.into_raw();

    guarded_detect(move || {
      rxing::helpers::detect_in_luma(data, width, height, Some(BarcodeFormat::QR_CODE))
    })
  }
}

/// 运行 rxing 检测并把结果映射为检测结果，检测器内部 panic 也转换为错误
fn guarded_detect<F>(detect: F) -> Result<Option<Detection>, DetectorError>
where
  F: FnOnce() -> Result<RXingResult, Exceptions> + UnwindSafe,
{
  match panic::catch_unwind(detect) {
    Err(payload) => Err(DetectorError::Panicked(panic_message(payload))),
    Ok(Err(
      e @ (Exceptions::NotFoundException(..)
      | Exceptions::ChecksumException(..)
      | Exceptions::FormatException(..)),
    )) => {
      debug!("本帧未解出二维码: {:?}", e);
      Ok(None)
    }
    Ok(Err(e)) => Err(DetectorError::Backend(format!("{:?}", e))),
    Ok(Ok(result)) => {
      let points: Vec<Point> = result
        .getPoints()
        .iter()
        .map(|p| Point::new(p.x, p.y))
        .collect();
      Ok(Some(Detection {
        payload: Some(result.getText().to_string()),
        corners: corners_from_finder_patterns(&points),
      }))
    }
  }
}

fn corners_from_finder_patterns(points: &[Point]) -> Option<[Point; 4]> {
  match points {
    [bottom_left, top_left, top_right, ..] => {
      Some(complete_parallelogram(*bottom_left, *top_left, *top_right))
    }
    _ => None,
  }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
  if let Some(message) = payload.downcast_ref::<&str>() {
    message.to_string()
  } else if let Some(message) = payload.downcast_ref::<String>() {
    message.clone()
  } else {
    "未知错误".to_string()
  }
}
