// 该文件是 QrAngle （二维码方位角） 项目的一部分。
// src/output/gstreamer_display.rs - GStreamer 窗口显示
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

//! # GStreamer 窗口显示模块
//!
//! 通过 `appsrc ! videoconvert ! <sink>` 管道把标注后的帧显示到窗口中，
//! 窗口中的按键以上行 navigation 事件的形式回到 appsrc。
//!
//! ## URL Scheme
//!
//! `gst://<sink>?title=<窗口标题>`，sink 缺省为 `autovideosink`。
//!
//! ```no_run
//! use qrangle::{FromUrl, output::GStreamerDisplay};
//! use url::Url;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let url = Url::parse("gst://xvimagesink?title=QR%20Rotation%20Detection")?;
//! let display = GStreamerDisplay::from_url(&url)?;
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gstreamer::{self as gst, prelude::*};
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use image::RgbImage;
use thiserror::Error;
use tracing::{error, info, warn};
use url::Url;

use crate::{FromUrl, FromUrlWithScheme, detector::Detection, output::FrameDisplay};

const DEFAULT_SINK: &str = "autovideosink";

#[derive(Error, Debug)]
pub enum GStreamerDisplayError {
  #[error("URI scheme mismatch")]
  SchemeMismatch,
  #[error("GStreamer error: {0}")]
  GStreamerError(#[from] gst::glib::Error),
  #[error("GStreamer boolean error: {0}")]
  GStreamerBoolError(#[from] gst::glib::BoolError),
  #[error("Failed to get appsrc element")]
  AppSrcNotFound,
  #[error("Failed to convert element to appsrc")]
  AppSrcConversionFailed,
  #[error("Pipeline error: {0}")]
  PipelineError(String),
  #[error("State change error: {0}")]
  StateChangeError(#[from] gst::StateChangeError),
  #[error("Display window closed")]
  WindowClosed,
}

type KeyQueue = Arc<Mutex<VecDeque<String>>>;

pub struct GStreamerDisplay {
  pipeline: gst::Pipeline,
  appsrc: gst_app::AppSrc,
  title: Option<String>,
  dimensions: Option<(u32, u32)>,
  keys: KeyQueue,
  closed: bool,
  frame_count: u64,
}

impl FromUrlWithScheme for GStreamerDisplay {
  const SCHEME: &'static str = "gst";
}

impl FromUrl for GStreamerDisplay {
  type Error = GStreamerDisplayError;

  fn from_url(url: &Url) -> Result<Self, Self::Error> {
    if url.scheme() != Self::SCHEME {
      error!(
        "URI scheme mismatch: expected '{}', found '{}'",
        Self::SCHEME,
        url.scheme()
      );
      return Err(GStreamerDisplayError::SchemeMismatch);
    }

    gst::init()?;

    let sink = url
      .host_str()
      .filter(|host| !host.is_empty())
      .unwrap_or(DEFAULT_SINK);
    let title = url
      .query_pairs()
      .find(|(k, _)| k == "title")
      .map(|(_, v)| v.into_owned());

    let pipeline_desc = format!("appsrc name=src ! videoconvert ! {}", sink);
    info!("Creating display pipeline: {}", pipeline_desc);

    let pipeline = gst::parse::launch(&pipeline_desc)?
      .downcast::<gst::Pipeline>()
      .map_err(|_| GStreamerDisplayError::PipelineError("Failed to create pipeline".to_string()))?;

    let appsrc = pipeline
      .by_name("src")
      .ok_or(GStreamerDisplayError::AppSrcNotFound)?
      .downcast::<gst_app::AppSrc>()
      .map_err(|_| GStreamerDisplayError::AppSrcConversionFailed)?;

    appsrc.set_is_live(true);
    appsrc.set_property("do-timestamp", true);
    appsrc.set_format(gst::Format::Time);

    let keys = KeyQueue::default();
    let pad = appsrc
      .static_pad("src")
      .ok_or_else(|| GStreamerDisplayError::PipelineError("appsrc has no src pad".to_string()))?;
    let queue = keys.clone();
    pad.add_probe(gst::PadProbeType::EVENT_UPSTREAM, move |_pad, info| {
      if let Some(gst::PadProbeData::Event(ref event)) = info.data
        && let Ok(gst_video::NavigationEvent::KeyPress { key, .. }) =
          gst_video::NavigationEvent::parse(event)
        && let Ok(mut queue) = queue.lock()
      {
        queue.push_back(key);
      }
      gst::PadProbeReturn::Ok
    });

    pipeline.set_state(gst::State::Playing)?;

    Ok(GStreamerDisplay {
      pipeline,
      appsrc,
      title,
      dimensions: None,
      keys,
      closed: false,
      frame_count: 0,
    })
  }
}

impl GStreamerDisplay {
  fn configure(&mut self, width: u32, height: u32) {
    let caps = gst::Caps::builder("video/x-raw")
      .field("format", "RGB")
      .field("width", width as i32)
      .field("height", height as i32)
      .field("framerate", gst::Fraction::new(0, 1))
      .build();
    self.appsrc.set_caps(Some(&caps));
    self.dimensions = Some((width, height));
    info!("Display configured: {}x{}", width, height);

    // 支持标题标签的 sink 会将其作为窗口标题
    if let Some(title) = self.title.as_deref() {
      let mut tags = gst::TagList::new();
      if let Some(tags) = tags.get_mut() {
        tags.add::<gst::tags::Title>(&title, gst::TagMergeMode::Replace);
      }
      if !self.appsrc.send_event(gst::event::Tag::new(tags)) {
        warn!("Failed to set window title '{}'", title);
      }
    }
  }

  fn drain_bus(&mut self, timeout: Duration) {
    let Some(bus) = self.pipeline.bus() else {
      return;
    };
    let timeout = gst::ClockTime::from_mseconds(timeout.as_millis() as u64);
    let types = [gst::MessageType::Error, gst::MessageType::Eos];
    if let Some(message) = bus.timed_pop_filtered(timeout, &types) {
      match message.view() {
        gst::MessageView::Error(err) => {
          warn!(
            "Display pipeline error from {:?}: {}",
            err.src().map(|s| s.path_string()),
            err.error()
          );
          self.closed = true;
        }
        gst::MessageView::Eos(_) => {
          self.closed = true;
        }
        _ => {}
      }
    }
  }
}

impl FrameDisplay for GStreamerDisplay {
  type Error = GStreamerDisplayError;

  fn show(&mut self, frame: &RgbImage, _detection: Option<&Detection>) -> Result<(), Self::Error> {
    if self.closed {
      return Err(GStreamerDisplayError::WindowClosed);
    }

    let dimensions = frame.dimensions();
    if self.dimensions != Some(dimensions) {
      self.configure(dimensions.0, dimensions.1);
    }

    let buffer = gst::Buffer::from_mut_slice(frame.as_raw().clone());
    self.appsrc.push_buffer(buffer).map_err(|e| {
      GStreamerDisplayError::PipelineError(format!("Failed to push buffer: {:?}", e))
    })?;
    self.frame_count += 1;

    Ok(())
  }

  fn poll_key(&mut self, timeout: Duration) -> Option<char> {
    self.drain_bus(timeout);
    let key = self.keys.lock().ok()?.pop_front()?;
    // navigation 事件给出按键名，单字符按键取其字符
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
      (Some(c), None) => Some(c),
      _ => None,
    }
  }

  fn is_closed(&self) -> bool {
    self.closed
  }

  fn close(&mut self) -> Result<(), Self::Error> {
    if let Err(e) = self.appsrc.end_of_stream() {
      warn!("Failed to send EOS to display pipeline: {:?}", e);
    }
    self.pipeline.set_state(gst::State::Null)?;
    self.closed = true;
    info!("Display closed. Total frames shown: {}", self.frame_count);
    Ok(())
  }
}

impl Drop for GStreamerDisplay {
  fn drop(&mut self) {
    if let Err(e) = self.pipeline.set_state(gst::State::Null) {
      warn!("Failed to stop GStreamer display pipeline: {}", e);
    }
  }
}
