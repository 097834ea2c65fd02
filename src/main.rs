// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/main.rs - 项目主程序
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

mod args;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use qrangle::{
  FromUrl,
  camera::{AcquirePolicy, ThreadSleeper, V4l2Opener},
  detector::RxingDetector,
  logging,
  output::{DisplayWrapper, draw::Draw},
  task::{DetectionLoop, LoopConfig},
};

fn main() -> Result<()> {
  let args = args::Args::parse();
  logging::init(&args.log_file, args.log_level)?;

  let initial = AcquirePolicy::new(args.device, args.attempts, args.delay());
  info!(
    "摄像头设备: {} (重连: {})",
    initial.device_index(),
    args.reacquire_device()
  );
  info!("打开尝试: {} 次，间隔 {:.2?}", initial.attempts(), initial.delay());
  info!("显示输出: {}", args.display);
  info!("日志文件: {}", args.log_file.display());

  let interrupt = Arc::new(AtomicBool::new(false));
  {
    let interrupt = interrupt.clone();
    ctrlc::set_handler(move || {
      warn!("收到中断信号，准备退出...");
      interrupt.store(true, Ordering::SeqCst);
    })?;
  }

  let mut opener = V4l2Opener::default();
  let mut sleeper = ThreadSleeper;
  let camera = initial.acquire(&mut opener, &mut sleeper)?;
  info!(
    "输入源已打开: /dev/video{} {}x{}",
    camera.device_index(),
    camera.width(),
    camera.height()
  );

  let display = DisplayWrapper::from_url(&args.display)?;
  let draw = Draw::with_font_file(&args.font);

  let config = LoopConfig {
    reacquire_pause: Duration::from_secs(args.reacquire_pause),
    error_pause: Duration::from_secs(args.error_pause),
    quit_key: args.quit_key,
    max_frames: args.max_frames,
    ..LoopConfig::new(initial.with_device_index(args.reacquire_device()))
  };

  let summary = DetectionLoop::new(config, opener, RxingDetector, display, sleeper, draw)
    .with_interrupt(interrupt)
    .run(camera);

  info!(
    "处理完成: 总帧数 {}, 检测数 {}, 重连次数 {}",
    summary.frames, summary.detections, summary.reacquisitions
  );

  Ok(())
}
