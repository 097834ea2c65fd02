// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/camera/v4l2_camera.rs - V4L2 摄像头
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

use std::pin::Pin;

use image::{ImageFormat, RgbImage};
use tracing::{debug, info};
use v4l::FourCC;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::prelude::*;
use v4l::video::Capture;

use super::{CameraError, CameraOpener, FrameReadError, FrameSource};

const DEFAULT_WIDTH: u32 = 640;
const DEFAULT_HEIGHT: u32 = 480;
const BUFFER_COUNT: u32 = 4;

const YUYV: &[u8; 4] = b"YUYV";
const MJPG: &[u8; 4] = b"MJPG";

/// 按设备索引打开 `/dev/videoN`
#[derive(Debug, Clone, Copy)]
pub struct V4l2Opener {
  pub width: u32,
  pub height: u32,
}

impl Default for V4l2Opener {
  fn default() -> Self {
    Self {
      width: DEFAULT_WIDTH,
      height: DEFAULT_HEIGHT,
    }
  }
}

impl CameraOpener for V4l2Opener {
  type Handle = V4l2Camera;

  fn open(&mut self, device_index: usize) -> Result<Self::Handle, CameraError> {
    V4l2Camera::open(device_index, self.width, self.height)
  }
}

/// V4L2 摄像头句柄
///
/// v4l 的 Stream 需要引用 Device，这里用 Pin<Box<Device>> 固定设备地址，
/// 再把引用交给同一结构体中的 Stream。
pub struct V4l2Camera {
  device: Pin<Box<Device>>,
  stream: Option<Stream<'static>>,
  device_index: usize,
  fourcc: FourCC,
  width: u32,
  height: u32,
}

impl V4l2Camera {
  pub fn open(device_index: usize, width: u32, height: u32) -> Result<Self, CameraError> {
    let device = Box::pin(Device::new(device_index).map_err(|source| CameraError::Open {
      path: format!("/dev/video{}", device_index),
      source,
    })?);

    let mut format = device.format().map_err(CameraError::Format)?;
    format.width = width;
    format.height = height;
    format.fourcc = FourCC::new(YUYV);
    let format = device.set_format(&format).map_err(CameraError::Format)?;

    if format.fourcc != FourCC::new(YUYV) && format.fourcc != FourCC::new(MJPG) {
      return Err(CameraError::UnsupportedPixelFormat(format.fourcc.to_string()));
    }
    debug!("摄像头格式: {:?}", format);

    // SAFETY: device 被 Pin<Box> 固定在堆上，移动 Box 不会移动设备本身；
    // stream 在 Drop 中先于 device 释放
    let device_ref: &Device = &device;
    let stream = unsafe {
      let device_static: &'static Device = std::mem::transmute(device_ref);
      Stream::with_buffers(device_static, Type::VideoCapture, BUFFER_COUNT)
        .map_err(CameraError::Stream)?
    };

    let camera = Self {
      device,
      stream: Some(stream),
      device_index,
      fourcc: format.fourcc,
      width: format.width,
      height: format.height,
    };

    info!(
      "摄像头 {} 已就绪: {}x{} {}",
      device_index, camera.width, camera.height, camera.fourcc
    );
    Ok(camera)
  }

  pub fn device_index(&self) -> usize {
    self.device_index
  }

  pub fn width(&self) -> u32 {
    self.width
  }

  pub fn height(&self) -> u32 {
    self.height
  }
}

impl FrameSource for V4l2Camera {
  fn read_frame(&mut self) -> Result<RgbImage, FrameReadError> {
    let stream = self.stream.as_mut().ok_or(FrameReadError::EndOfStream)?;
    let (buffer, meta) = stream.next().map_err(FrameReadError::Capture)?;

    if self.fourcc == FourCC::new(MJPG) {
      let used = (meta.bytesused as usize).min(buffer.len());
      let image = image::load_from_memory_with_format(&buffer[..used], ImageFormat::Jpeg)?;
      return Ok(image.to_rgb8());
    }

    yuyv_to_rgb(buffer, self.width, self.height)
  }
}

impl Drop for V4l2Camera {
  fn drop(&mut self) {
    // stream 必须先于 device 释放
    if release_stream(&mut self.stream) {
      info!("摄像头 {} 已释放", self.device_index);
    }
  }
}

/// 释放捕获流，返回之前是否真的持有流
fn release_stream<S>(stream: &mut Option<S>) -> bool {
  stream.take().is_some()
}

/// 将 YUYV 4:2:2 转换为 RGB 图像
pub fn yuyv_to_rgb(yuyv: &[u8], width: u32, height: u32) -> Result<RgbImage, FrameReadError> {
  let expected = (width * height * 2) as usize;
  if yuyv.len() < expected {
    return Err(FrameReadError::SizeMismatch {
      expected,
      actual: yuyv.len(),
    });
  }

  let mut rgb = Vec::with_capacity((width * height * 3) as usize);
  for chunk in yuyv[..expected].chunks_exact(4) {
    let u = chunk[1] as f32 - 128.0;
    let v = chunk[3] as f32 - 128.0;
    for y in [chunk[0] as f32, chunk[2] as f32] {
      let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
      let g = (y - 0.344 * u - 0.714 * v).clamp(0.0, 255.0) as u8;
      let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;
      rgb.extend_from_slice(&[r, g, b]);
    }
  }

  RgbImage::from_raw(width, height, rgb).ok_or(FrameReadError::SizeMismatch {
    expected: (width * height * 3) as usize,
    actual: 0,
  })
}
