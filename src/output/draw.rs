// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/output/draw.rs - 二维码轮廓与角度标注
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

use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut};
use tracing::warn;

use crate::geometry::{Point, Quad};

// 文本渲染常量
const LABEL_FONT_SIZE: f32 = 22.0;
const LABEL_OFFSET_Y: i32 = 10; // 文本位于第一个角点上方
const POLYGON_THICKNESS: i32 = 3;
const POLYGON_COLOR: [u8; 3] = [0, 255, 0]; // 绿色
const LABEL_COLOR: [u8; 3] = [0, 0, 255]; // 蓝色

pub struct Draw {
  font_size: f32,
  thickness: i32,
  polygon_color: Rgb<u8>,
  label_color: Rgb<u8>,
  font: Option<FontVec>,
}

impl Default for Draw {
  fn default() -> Self {
    Self {
      font_size: LABEL_FONT_SIZE,
      thickness: POLYGON_THICKNESS,
      polygon_color: Rgb(POLYGON_COLOR),
      label_color: Rgb(LABEL_COLOR),
      font: None,
    }
  }
}

impl Draw {
  /// 从 TTF 文件加载标注字体；加载失败时只画轮廓不画文字
  pub fn with_font_file(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let font = match std::fs::read(path) {
      Ok(data) => match FontVec::try_from_vec(data) {
        Ok(font) => Some(font),
        Err(e) => {
          warn!("无法解析字体文件 {}: {}，角度文字将不会绘制", path.display(), e);
          None
        }
      },
      Err(e) => {
        warn!("无法读取字体文件 {}: {}，角度文字将不会绘制", path.display(), e);
        None
      }
    };
    Self {
      font,
      ..Self::default()
    }
  }

  pub fn has_font(&self) -> bool {
    self.font.is_some()
  }

  /// 按原有顺序连接四个角点，绘制闭合多边形
  pub fn draw_quad(&self, image: &mut RgbImage, quad: &Quad) {
    let reach = self.thickness / 2;
    for (index, start) in quad.iter().enumerate() {
      let end = quad[(index + 1) % quad.len()];
      for ox in -reach..=reach {
        for oy in -reach..=reach {
          let (ox, oy) = (ox as f32, oy as f32);
          draw_line_segment_mut(
            image,
            (start.x + ox, start.y + oy),
            (end.x + ox, end.y + oy),
            self.polygon_color,
          );
        }
      }
    }
  }

  /// 在 `anchor` 上方绘制文字
  pub fn draw_label(&self, image: &mut RgbImage, anchor: Point, text: &str) {
    let Some(font) = self.font.as_ref() else {
      return;
    };

    let x = anchor.x as i32;
    let y = (anchor.y as i32 - LABEL_OFFSET_Y - self.font_size as i32).max(0);
    draw_text_mut(
      image,
      self.label_color,
      x,
      y,
      PxScale::from(self.font_size),
      font,
      text,
    );
  }

  /// 绘制轮廓与角度文字
  pub fn draw_orientation(&self, image: &mut RgbImage, quad: &Quad, label: &str) {
    self.draw_quad(image, quad);
    self.draw_label(image, quad[0], label);
  }
}

/// 角度文字，显示与日志共用
pub fn angle_label(angle: f64) -> String {
  format!("Angle: {:.6} deg", angle)
}
