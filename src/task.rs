// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/task.rs - 检测主循环
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

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use image::RgbImage;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::{
  camera::{AcquireError, AcquirePolicy, CameraOpener, FrameSource, Sleeper},
  detector::{Detection, QrDetector},
  geometry::orientation_angle,
  output::{
    FrameDisplay,
    draw::{Draw, angle_label},
  },
};

#[derive(Debug, Clone)]
pub struct LoopConfig {
  /// 重新获取摄像头时使用的策略
  pub reacquire: AcquirePolicy,
  /// 读帧失败后、重新获取前的等待
  pub reacquire_pause: Duration,
  /// 单次迭代出现意外错误后的等待
  pub error_pause: Duration,
  pub quit_key: char,
  pub key_timeout: Duration,
  /// 处理指定帧数后退出，`None` 表示不限制
  pub max_frames: Option<u64>,
}

impl LoopConfig {
  pub fn new(reacquire: AcquirePolicy) -> Self {
    Self {
      reacquire,
      reacquire_pause: Duration::from_secs(2),
      error_pause: Duration::from_secs(1),
      quit_key: 'q',
      key_timeout: Duration::from_millis(1),
      max_frames: None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
  Running,
  Reacquiring,
  Terminated,
}

/// 单次迭代的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
  Continue,
  FrameLost,
  Quit,
}

#[derive(Error, Debug)]
pub enum IterationError {
  #[error("显示失败: {0}")]
  Display(Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoopSummary {
  pub frames: u64,
  pub detections: u64,
  pub reacquisitions: u64,
}

pub struct DetectionLoop<O, D, P, S> {
  config: LoopConfig,
  opener: O,
  detector: D,
  display: P,
  sleeper: S,
  draw: Draw,
  interrupt: Option<Arc<AtomicBool>>,
  summary: LoopSummary,
}

impl<O, D, P, S> DetectionLoop<O, D, P, S>
where
  O: CameraOpener,
  D: QrDetector,
  P: FrameDisplay,
  P::Error: std::error::Error + Send + Sync + 'static,
  S: Sleeper,
{
  pub fn new(config: LoopConfig, opener: O, detector: D, display: P, sleeper: S, draw: Draw) -> Self {
    Self {
      config,
      opener,
      detector,
      display,
      sleeper,
      draw,
      interrupt: None,
      summary: LoopSummary::default(),
    }
  }

  /// 标志被置位后，循环在下一次迭代开始前退出
  pub fn with_interrupt(mut self, interrupt: Arc<AtomicBool>) -> Self {
    self.interrupt = Some(interrupt);
    self
  }

  /// 运行主循环直到退出，返回统计信息
  pub fn run(mut self, camera: O::Handle) -> LoopSummary {
    info!(
      "开始主循环，在显示窗口中按 '{}' 退出",
      self.config.quit_key
    );

    let mut camera = Some(camera);
    let mut state = LoopState::Running;

    while state != LoopState::Terminated {
      state = match state {
        LoopState::Running => self.running(&mut camera),
        LoopState::Reacquiring => self.reacquiring(&mut camera),
        LoopState::Terminated => LoopState::Terminated,
      };
    }

    drop(camera.take());
    if let Err(e) = self.display.close() {
      error!("关闭显示失败: {}", e);
    }
    info!(
      "摄像头已释放，窗口已关闭 (帧数: {}, 检测数: {}, 重连次数: {})",
      self.summary.frames, self.summary.detections, self.summary.reacquisitions
    );

    self.summary
  }

  fn interrupted(&self) -> bool {
    self
      .interrupt
      .as_ref()
      .is_some_and(|flag| flag.load(Ordering::SeqCst))
  }

  fn running(&mut self, camera: &mut Option<O::Handle>) -> LoopState {
    if self.interrupted() {
      warn!("收到中断信号，退出主循环");
      return LoopState::Terminated;
    }

    let Some(handle) = camera.as_mut() else {
      return LoopState::Reacquiring;
    };

    match self.step(handle) {
      Ok(IterationOutcome::Continue) => {
        if self
          .config
          .max_frames
          .is_some_and(|limit| self.summary.frames >= limit)
        {
          info!("达到指定帧数 {}，退出主循环", self.summary.frames);
          return LoopState::Terminated;
        }
        LoopState::Running
      }
      Ok(IterationOutcome::FrameLost) => {
        drop(camera.take());
        self.sleeper.sleep(self.config.reacquire_pause);
        LoopState::Reacquiring
      }
      Ok(IterationOutcome::Quit) => LoopState::Terminated,
      Err(e) => {
        error!("主循环出现意外错误: {:?}", e);
        self.sleeper.sleep(self.config.error_pause);
        LoopState::Running
      }
    }
  }

  fn reacquiring(&mut self, camera: &mut Option<O::Handle>) -> LoopState {
    if self.interrupted() {
      warn!("收到中断信号，放弃重新打开摄像头");
      return LoopState::Terminated;
    }

    let interrupt = self.interrupt.clone();
    let cancelled = move || {
      interrupt
        .as_ref()
        .is_some_and(|flag| flag.load(Ordering::SeqCst))
    };
    match self
      .config
      .reacquire
      .acquire_with_cancel(&mut self.opener, &mut self.sleeper, &cancelled)
    {
      Ok(handle) => {
        *camera = Some(handle);
        self.summary.reacquisitions += 1;
        LoopState::Running
      }
      Err(e @ AcquireError::Cancelled { .. }) => {
        warn!("{}，退出主循环", e);
        LoopState::Terminated
      }
      Err(e) => {
        error!("致命: 摄像头故障，退出 ({})", e);
        LoopState::Terminated
      }
    }
  }

  /// 处理一帧：读取、检测、标注、显示、检查按键
  fn step(&mut self, camera: &mut O::Handle) -> Result<IterationOutcome, IterationError> {
    let mut frame = match camera.read_frame() {
      Ok(frame) => frame,
      Err(e) => {
        warn!("读取帧失败 ({})，尝试重新初始化摄像头", e);
        return Ok(IterationOutcome::FrameLost);
      }
    };
    self.summary.frames += 1;

    let detection = match self.detector.detect_and_decode(&frame) {
      Ok(detection) => detection,
      Err(e) => {
        error!("二维码检测错误: {}", e);
        None
      }
    };

    if let Some(detection) = detection.as_ref()
      && self.annotate(&mut frame, detection).is_some()
    {
      self.summary.detections += 1;
    }

    // 窗口可能在上一帧的按键轮询中被关闭
    if self.display.is_closed() {
      info!("显示窗口已关闭，退出...");
      return Ok(IterationOutcome::Quit);
    }
    self
      .display
      .show(&frame, detection.as_ref())
      .map_err(|e| IterationError::Display(Box::new(e)))?;

    if self.display.poll_key(self.config.key_timeout) == Some(self.config.quit_key) {
      info!("收到退出按键，退出...");
      return Ok(IterationOutcome::Quit);
    }
    if self.display.is_closed() {
      info!("显示窗口已关闭，退出...");
      return Ok(IterationOutcome::Quit);
    }

    Ok(IterationOutcome::Continue)
  }

  /// 绘制轮廓和角度，返回方位角；没有角点时不做任何事
  fn annotate(&self, frame: &mut RgbImage, detection: &Detection) -> Option<f64> {
    let corners = detection.corners.as_ref()?;
    let angle = orientation_angle(corners);
    let label = angle_label(angle);
    self.draw.draw_orientation(frame, corners, &label);
    info!("{}", label);
    Some(angle)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::collections::VecDeque;
  use std::io;
  use std::sync::Mutex;

  use image::Rgb;
  use tracing_subscriber::fmt::MakeWriter;

  use super::*;
  use crate::camera::FrameReadError;
  use crate::camera::testing::{CameraEvent, RecordingSleeper, ScriptedOpener};
  use crate::detector::DetectorError;
  use crate::geometry::Point;

  const GREEN: [u8; 3] = [0, 255, 0];

  fn blank() -> RgbImage {
    RgbImage::from_pixel(64, 64, Rgb([0, 0, 0]))
  }

  fn square() -> [Point; 4] {
    [
      Point::new(10.0, 10.0),
      Point::new(50.0, 10.0),
      Point::new(50.0, 50.0),
      Point::new(10.0, 50.0),
    ]
  }

  struct ScriptedDetector {
    results: RefCell<VecDeque<Result<Option<Detection>, DetectorError>>>,
    calls: RefCell<u32>,
  }

  impl ScriptedDetector {
    fn new(results: Vec<Result<Option<Detection>, DetectorError>>) -> Self {
      Self {
        results: RefCell::new(results.into()),
        calls: RefCell::new(0),
      }
    }
  }

  impl QrDetector for ScriptedDetector {
    fn detect_and_decode(&self, _frame: &RgbImage) -> Result<Option<Detection>, DetectorError> {
      *self.calls.borrow_mut() += 1;
      self.results.borrow_mut().pop_front().unwrap_or(Ok(None))
    }
  }

  #[derive(Debug, Error)]
  #[error("window gone")]
  struct FakeDisplayError;

  #[derive(Default)]
  struct RecordingDisplay {
    shown: Vec<(RgbImage, Option<Detection>)>,
    keys: VecDeque<Option<char>>,
    fail_on: Vec<usize>,
  }

  impl FrameDisplay for RecordingDisplay {
    type Error = FakeDisplayError;

    fn show(&mut self, frame: &RgbImage, detection: Option<&Detection>) -> Result<(), Self::Error> {
      let index = self.shown.len();
      self.shown.push((frame.clone(), detection.cloned()));
      if self.fail_on.contains(&index) {
        return Err(FakeDisplayError);
      }
      Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Option<char> {
      self.keys.pop_front().flatten()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
      Ok(())
    }
  }

  /// 在第 `close_on_poll` 次按键轮询时被用户关闭的窗口，关闭后 show 失败
  struct ClosingDisplay {
    shown: usize,
    polls: usize,
    close_on_poll: usize,
    closed: bool,
  }

  impl ClosingDisplay {
    fn new(close_on_poll: usize) -> Self {
      Self {
        shown: 0,
        polls: 0,
        close_on_poll,
        closed: false,
      }
    }
  }

  impl FrameDisplay for ClosingDisplay {
    type Error = FakeDisplayError;

    fn show(&mut self, _frame: &RgbImage, _detection: Option<&Detection>) -> Result<(), Self::Error> {
      if self.closed {
        return Err(FakeDisplayError);
      }
      self.shown += 1;
      Ok(())
    }

    fn poll_key(&mut self, _timeout: Duration) -> Option<char> {
      self.polls += 1;
      if self.polls == self.close_on_poll {
        self.closed = true;
      }
      None
    }

    fn is_closed(&self) -> bool {
      self.closed
    }

    fn close(&mut self) -> Result<(), Self::Error> {
      Ok(())
    }
  }

  /// 第一次等待时置位中断标志的 sleeper
  struct InterruptingSleeper {
    interrupt: Arc<AtomicBool>,
    sleeps: Vec<Duration>,
  }

  impl Sleeper for InterruptingSleeper {
    fn sleep(&mut self, duration: Duration) {
      self.sleeps.push(duration);
      self.interrupt.store(true, Ordering::SeqCst);
    }
  }

  fn config(max_frames: Option<u64>) -> LoopConfig {
    LoopConfig {
      max_frames,
      ..LoopConfig::new(AcquirePolicy::new(0, 2, Duration::from_secs(5)))
    }
  }

  #[derive(Clone, Default)]
  struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

  impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
      self.clone()
    }
  }

  impl CapturedLogs {
    fn text(&self) -> String {
      String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
  }

  #[test]
  fn three_frames_with_one_detection() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
      .with_ansi(false)
      .with_writer(logs.clone())
      .finish();

    let opener = ScriptedOpener::new(Vec::new());
    let camera = {
      let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank()), Ok(blank()), Ok(blank())])]);
      opener.open(0).unwrap()
    };
    let detector = ScriptedDetector::new(vec![
      Ok(None),
      Ok(Some(Detection::with_corners(square()))),
      Ok(None),
    ]);
    let mut display = RecordingDisplay::default();
    display.keys = VecDeque::from(vec![None, None, None]);

    let task = DetectionLoop::new(
      config(Some(3)),
      opener,
      detector,
      display,
      RecordingSleeper::default(),
      Draw::default(),
    );

    let summary = tracing::subscriber::with_default(subscriber, || {
      let mut task = task;
      let mut camera = camera;
      for _ in 0..3 {
        assert_eq!(task.step(&mut camera).unwrap(), IterationOutcome::Continue);
      }
      assert_eq!(task.summary.frames, 3);
      assert_eq!(task.summary.detections, 1);

      let shown = &task.display.shown;
      assert_eq!(shown.len(), 3);
      assert_eq!(shown[0].0, blank());
      assert_eq!(shown[2].0, blank());
      assert_eq!(shown[1].1, Some(Detection::with_corners(square())));
      for (x, y) in [(30, 10), (50, 30), (30, 50), (10, 30)] {
        assert_eq!(shown[1].0.get_pixel(x, y).0, GREEN);
      }
      task.summary.clone()
    });

    assert_eq!(summary.detections, 1);
    let text = logs.text();
    assert_eq!(text.matches("Angle: 0.000000 deg").count(), 1);
    assert_eq!(text.matches("Angle:").count(), 1);
  }

  #[test]
  fn detector_failure_does_not_stop_the_loop() {
    let opener = ScriptedOpener::new(Vec::new());
    let mut camera = {
      let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank()), Ok(blank())])]);
      opener.open(0).unwrap()
    };
    let detector = ScriptedDetector::new(vec![
      Err(DetectorError::Backend("corrupt frame".to_string())),
      Ok(Some(Detection::with_corners(square()))),
    ]);

    let mut task = DetectionLoop::new(
      config(None),
      opener,
      detector,
      RecordingDisplay::default(),
      RecordingSleeper::default(),
      Draw::default(),
    );

    assert_eq!(task.step(&mut camera).unwrap(), IterationOutcome::Continue);
    assert_eq!(task.step(&mut camera).unwrap(), IterationOutcome::Continue);
    assert_eq!(*task.detector.calls.borrow(), 2);
    assert_eq!(task.display.shown[0].1, None);
    assert_eq!(task.summary.detections, 1);
  }

  #[test]
  fn frame_read_failure_releases_then_reacquires_once() {
    let mut opener = ScriptedOpener::new(vec![
      Some(vec![Ok(blank()), Err(FrameReadError::EndOfStream)]),
      Some(vec![Ok(blank())]),
    ]);
    let log = opener.log.clone();
    let camera = opener.open(0).unwrap();

    let task = DetectionLoop::new(
      config(Some(2)),
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      RecordingSleeper::default(),
      Draw::default(),
    );
    let summary = task.run(camera);

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.reacquisitions, 1);
    assert_eq!(
      log.borrow().clone(),
      vec![
        CameraEvent::Open {
          device_index: 0,
          attempt: 1
        },
        CameraEvent::Read { handle: 1 },
        CameraEvent::Read { handle: 1 },
        CameraEvent::Release { handle: 1 },
        CameraEvent::Open {
          device_index: 0,
          attempt: 2
        },
        CameraEvent::Read { handle: 2 },
        CameraEvent::Release { handle: 2 },
      ]
    );
  }

  #[test]
  fn exhausted_reacquisition_terminates() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Err(FrameReadError::EndOfStream)])]);
    let camera = opener.open(0).unwrap();

    let task = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      RecordingSleeper::default(),
      Draw::default(),
    );
    let summary = task.run(camera);

    assert_eq!(summary.frames, 0);
    assert_eq!(summary.reacquisitions, 0);
  }

  #[test]
  fn pauses_follow_the_failure_kind() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Err(FrameReadError::EndOfStream)])]);
    let camera = opener.open(0).unwrap();
    let mut task = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      RecordingSleeper::default(),
      Draw::default(),
    );

    let mut camera = Some(camera);
    assert_eq!(task.running(&mut camera), LoopState::Reacquiring);
    assert!(camera.is_none());
    assert_eq!(task.reacquiring(&mut camera), LoopState::Terminated);

    // 读帧失败等待 2 秒，随后两次打开失败各等待 5 秒
    assert_eq!(
      task.sleeper.sleeps,
      vec![
        Duration::from_secs(2),
        Duration::from_secs(5),
        Duration::from_secs(5)
      ]
    );
  }

  #[test]
  fn display_error_is_contained_and_loop_continues() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank()), Ok(blank())])]);
    let camera = opener.open(0).unwrap();
    let display = RecordingDisplay {
      fail_on: vec![0],
      ..RecordingDisplay::default()
    };

    let mut task = DetectionLoop::new(
      config(Some(2)),
      opener,
      ScriptedDetector::new(Vec::new()),
      display,
      RecordingSleeper::default(),
      Draw::default(),
    );

    let mut camera = Some(camera);
    assert_eq!(task.running(&mut camera), LoopState::Running);
    assert_eq!(task.sleeper.sleeps, vec![Duration::from_secs(1)]);
    assert_eq!(task.running(&mut camera), LoopState::Terminated);
    assert_eq!(task.display.shown.len(), 2);
  }

  #[test]
  fn quit_key_terminates_and_closes_display() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank()), Ok(blank()), Ok(blank())])]);
    let camera = opener.open(0).unwrap();
    let display = RecordingDisplay {
      keys: VecDeque::from(vec![Some('x'), Some('q')]),
      ..RecordingDisplay::default()
    };

    let mut task = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      display,
      RecordingSleeper::default(),
      Draw::default(),
    );

    let mut camera = Some(camera);
    assert_eq!(task.running(&mut camera), LoopState::Running);
    assert_eq!(task.running(&mut camera), LoopState::Terminated);
    assert_eq!(task.summary.frames, 2);
  }

  #[test]
  fn closed_window_terminates_instead_of_retrying() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank()), Ok(blank()), Ok(blank())])]);
    let camera = opener.open(0).unwrap();

    let mut task = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      ClosingDisplay::new(2),
      RecordingSleeper::default(),
      Draw::default(),
    );

    let mut camera = Some(camera);
    assert_eq!(task.running(&mut camera), LoopState::Running);
    assert_eq!(task.running(&mut camera), LoopState::Terminated);
    assert_eq!(task.display.shown, 2);
    assert!(task.sleeper.sleeps.is_empty());
  }

  #[test]
  fn window_closed_before_show_is_not_a_display_error() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank())])]);
    let camera = opener.open(0).unwrap();
    let mut display = ClosingDisplay::new(usize::MAX);
    display.closed = true;

    let summary = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      display,
      RecordingSleeper::default(),
      Draw::default(),
    )
    .run(camera);

    assert_eq!(summary.frames, 1);
    assert_eq!(summary.reacquisitions, 0);
  }

  #[test]
  fn interrupt_during_reacquisition_stops_retrying() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Err(FrameReadError::EndOfStream)])]);
    let camera = opener.open(0).unwrap();
    let interrupt = Arc::new(AtomicBool::new(false));
    let sleeper = InterruptingSleeper {
      interrupt: interrupt.clone(),
      sleeps: Vec::new(),
    };

    let config = LoopConfig {
      reacquire: AcquirePolicy::new(0, 5, Duration::from_secs(5)),
      ..config(None)
    };
    let mut task = DetectionLoop::new(
      config,
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      sleeper,
      Draw::default(),
    )
    .with_interrupt(interrupt);

    let mut camera = Some(camera);
    // 读帧失败后的等待即置位中断标志
    assert_eq!(task.running(&mut camera), LoopState::Reacquiring);
    assert_eq!(task.reacquiring(&mut camera), LoopState::Terminated);
    assert_eq!(task.opener.attempts(), 1);
    assert_eq!(task.sleeper.sleeps, vec![Duration::from_secs(2)]);
  }

  #[test]
  fn interrupt_between_open_attempts_stops_retrying() {
    let opener = ScriptedOpener::always_failing();
    let interrupt = Arc::new(AtomicBool::new(false));
    let sleeper = InterruptingSleeper {
      interrupt: interrupt.clone(),
      sleeps: Vec::new(),
    };

    let config = LoopConfig {
      reacquire: AcquirePolicy::new(0, 5, Duration::from_secs(5)),
      ..config(None)
    };
    let mut task = DetectionLoop::new(
      config,
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      sleeper,
      Draw::default(),
    )
    .with_interrupt(interrupt);

    let mut camera = None;
    assert_eq!(task.reacquiring(&mut camera), LoopState::Terminated);
    // 第一次打开失败后等待期间收到中断，不再尝试后面 4 次
    assert_eq!(task.opener.attempts(), 1);
    assert_eq!(task.sleeper.sleeps, vec![Duration::from_secs(5)]);
    assert!(camera.is_none());
  }

  #[test]
  fn interrupt_flag_stops_before_reading() {
    let mut opener = ScriptedOpener::new(vec![Some(vec![Ok(blank())])]);
    let log = opener.log.clone();
    let camera = opener.open(0).unwrap();
    let interrupt = Arc::new(AtomicBool::new(true));

    let summary = DetectionLoop::new(
      config(None),
      opener,
      ScriptedDetector::new(Vec::new()),
      RecordingDisplay::default(),
      RecordingSleeper::default(),
      Draw::default(),
    )
    .with_interrupt(interrupt)
    .run(camera);

    assert_eq!(summary, LoopSummary::default());
    assert!(!log.borrow().contains(&CameraEvent::Read { handle: 1 }));
    assert!(log.borrow().contains(&CameraEvent::Release { handle: 1 }));
  }
}
