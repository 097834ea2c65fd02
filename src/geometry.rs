// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/geometry.rs - 角点与方位角计算
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

/// 图像像素坐标系中的点（y 轴向下）
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
  pub x: f32,
  pub y: f32,
}

impl Point {
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }
}

impl From<(f32, f32)> for Point {
  fn from((x, y): (f32, f32)) -> Self {
    Self { x, y }
  }
}

/// 二维码四边形，角点顺序由检测器决定
pub type Quad = [Point; 4];

/// 从 `from` 指向 `to` 的边相对图像水平轴的角度（度）
///
/// 直接使用屏幕坐标计算 `atan2(dy, dx)`，不翻转 y 轴。
/// 返回值位于 (-180, 180] 区间。
pub fn edge_angle(from: Point, to: Point) -> f64 {
  let dx = f64::from(to.x) - f64::from(from.x);
  let dy = f64::from(to.y) - f64::from(from.y);
  let angle = dy.atan2(dx).to_degrees();
  // atan2(-0.0, 负数) 会得到 -180
  if angle <= -180.0 { angle + 360.0 } else { angle }
}

/// 四边形方位角：角点 0 指向角点 1 的边
pub fn orientation_angle(quad: &Quad) -> f64 {
  edge_angle(quad[0], quad[1])
}

/// 由三个定位图案中心补全平行四边形
///
/// 结果按 左上、右上、右下、左下 排列。
pub fn complete_parallelogram(bottom_left: Point, top_left: Point, top_right: Point) -> Quad {
  let bottom_right = Point::new(
    top_right.x + bottom_left.x - top_left.x,
    top_right.y + bottom_left.y - top_left.y,
  );
  [top_left, top_right, bottom_right, bottom_left]
}
