// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/camera.rs - 摄像头获取与重试
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
use tracing::{error, info, warn};

mod v4l2_camera;
pub use self::v4l2_camera::{V4l2Camera, V4l2Opener};

#[derive(Error, Debug)]
pub enum CameraError {
  #[error("无法打开设备 {path}: {source}")]
  Open {
    path: String,
    source: std::io::Error,
  },
  #[error("无法设置视频格式: {0}")]
  Format(std::io::Error),
  #[error("无法创建捕获流: {0}")]
  Stream(std::io::Error),
  #[error("不支持的像素格式: {0}")]
  UnsupportedPixelFormat(String),
  #[error("摄像头不可用: {0}")]
  Unavailable(String),
}

#[derive(Error, Debug)]
pub enum FrameReadError {
  #[error("无法捕获帧: {0}")]
  Capture(std::io::Error),
  #[error("无法解码 MJPG 帧: {0}")]
  Decode(#[from] image::ImageError),
  #[error("帧数据长度不匹配: 期望 {expected}, 实际 {actual}")]
  SizeMismatch { expected: usize, actual: usize },
  #[error("没有更多帧")]
  EndOfStream,
}

#[derive(Error, Debug)]
pub enum AcquireError {
  #[error("尝试 {attempts} 次后仍无法打开摄像头 {device_index}")]
  Exhausted { device_index: usize, attempts: u32 },
  #[error("打开摄像头 {device_index} 的过程被中断")]
  Cancelled { device_index: usize },
}

/// 已打开的摄像头句柄，释放即 drop
pub trait FrameSource {
  fn read_frame(&mut self) -> Result<RgbImage, FrameReadError>;
}

pub trait CameraOpener {
  type Handle: FrameSource;

  fn open(&mut self, device_index: usize) -> Result<Self::Handle, CameraError>;
}

pub trait Sleeper {
  fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
  fn sleep(&mut self, duration: Duration) {
    std::thread::sleep(duration);
  }
}

/// 摄像头获取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquirePolicy {
  device_index: usize,
  attempts: u32,
  delay: Duration,
}

impl AcquirePolicy {
  /// `attempts` 为 0 时按 1 次处理
  pub fn new(device_index: usize, attempts: u32, delay: Duration) -> Self {
    Self {
      device_index,
      attempts: attempts.max(1),
      delay,
    }
  }

  pub fn device_index(&self) -> usize {
    self.device_index
  }

  pub fn attempts(&self) -> u32 {
    self.attempts
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  pub fn with_device_index(mut self, device_index: usize) -> Self {
    self.device_index = device_index;
    self
  }

  /// 反复尝试打开摄像头
  ///
  /// 成功后立即返回句柄；每次失败后都会等待 `delay`，包括最后一次。
  /// N 次全部失败时恰好等待 N 次。
  pub fn acquire<O, S>(&self, opener: &mut O, sleeper: &mut S) -> Result<O::Handle, AcquireError>
  where
    O: CameraOpener,
    S: Sleeper,
  {
    self.acquire_with_cancel(opener, sleeper, &|| false)
  }

  /// 同 [`acquire`](Self::acquire)，但在每次尝试前和每次等待后检查 `cancelled`
  pub fn acquire_with_cancel<O, S>(
    &self,
    opener: &mut O,
    sleeper: &mut S,
    cancelled: &dyn Fn() -> bool,
  ) -> Result<O::Handle, AcquireError>
  where
    O: CameraOpener,
    S: Sleeper,
  {
    for attempt in 1..=self.attempts {
      if cancelled() {
        warn!("打开摄像头 {} 被中断", self.device_index);
        return Err(AcquireError::Cancelled {
          device_index: self.device_index,
        });
      }
      match opener.open(self.device_index) {
        Ok(handle) => {
          info!("摄像头 {} 打开成功", self.device_index);
          return Ok(handle);
        }
        Err(e) => {
          warn!(
            "第 {}/{} 次尝试: 无法打开摄像头 {} ({})，{:.2?} 后重试...",
            attempt, self.attempts, self.device_index, e, self.delay
          );
          sleeper.sleep(self.delay);
        }
      }
    }

    if cancelled() {
      warn!("打开摄像头 {} 被中断", self.device_index);
      return Err(AcquireError::Cancelled {
        device_index: self.device_index,
      });
    }
    error!(
      "致命: 尝试 {} 次后仍无法打开摄像头 {}",
      self.attempts, self.device_index
    );
    Err(AcquireError::Exhausted {
      device_index: self.device_index,
      attempts: self.attempts,
    })
  }
}
