//! Frame consumers.
//!
//! A renderer receives every [`SceneFrame`] through [`FrameSink`]. The host
//! ships two headless sinks: periodic log summaries and a JSON-lines
//! recording.

use std::io::Write;

use orbital_scene::SceneFrame;
use serde::Serialize;
use tracing::info;

use crate::error::AppError;

/// Consumer of computed frames.
pub trait FrameSink {
    /// Accepts frame `index`.
    fn submit(&mut self, index: u64, frame: &SceneFrame) -> Result<(), AppError>;

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<(), AppError> {
        Ok(())
    }
}

impl FrameSink for Vec<Box<dyn FrameSink>> {
    fn submit(&mut self, index: u64, frame: &SceneFrame) -> Result<(), AppError> {
        for sink in self.iter_mut() {
            sink.submit(index, frame)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), AppError> {
        for sink in self.iter_mut() {
            sink.finish()?;
        }
        Ok(())
    }
}

/// Logs a one-line summary every `every` frames.
#[derive(Debug, Clone)]
pub struct TraceSink {
    every: u64,
}

impl TraceSink {
    /// `every == 0` disables the summaries.
    pub fn new(every: u32) -> Self {
        Self {
            every: u64::from(every),
        }
    }
}

impl FrameSink for TraceSink {
    fn submit(&mut self, index: u64, frame: &SceneFrame) -> Result<(), AppError> {
        if self.every == 0 || index % self.every != 0 {
            return Ok(());
        }
        let planet = &frame.planet;
        let satellite = &frame.satellite;
        info!(
            "frame {index} t={:.3} {:?}/{:?} planet s={:.2} ({:.2}, {:.2}, {:.2}) satellite s={:.2} ({:.2}, {:.2}, {:.2}) yaw={:.2}",
            frame.progress,
            frame.phase,
            frame.mode,
            planet.scale,
            planet.position.x,
            planet.position.y,
            planet.position.z,
            satellite.scale,
            satellite.smoothed_position.x,
            satellite.smoothed_position.y,
            satellite.smoothed_position.z,
            satellite.smoothed_orientation.yaw,
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    index: u64,
    #[serde(flatten)]
    frame: &'a SceneFrame,
}

/// Writes one JSON object per frame.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn submit(&mut self, index: u64, frame: &SceneFrame) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.writer, &FrameRecord { index, frame })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), AppError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use orbital_input::ViewportHalfExtents;
    use orbital_scene::SceneEngine;

    fn frames(count: u32) -> Vec<SceneFrame> {
        let mut engine = SceneEngine::default();
        (0..count)
            .map(|i| {
                let t = f64::from(i) / f64::from(count);
                engine.tick(t, f64::from(i) / 60.0, DVec2::ZERO, ViewportHalfExtents::default())
            })
            .collect()
    }

    #[test]
    fn test_json_lines_one_record_per_frame() {
        let mut sink = JsonLinesSink::new(Vec::new());
        for (i, frame) in frames(5).iter().enumerate() {
            sink.submit(i as u64, frame).unwrap();
        }
        sink.finish().unwrap();
        assert_eq!(sink.written(), 5);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["index"], 0);
        assert_eq!(first["phase"], "Hero");
        assert_eq!(first["mode"], "Orbiting");
        assert!(first["satellite"]["smoothed_position"].is_array());
        assert_eq!(first["cues"]["navbar_visible"], false);

        let late: serde_json::Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(late["index"], 3);
        assert_eq!(late["phase"], "Background");
        assert_eq!(late["mode"], "CursorFollowing");
    }

    #[test]
    fn test_trace_sink_never_fails() {
        let mut sink = TraceSink::new(2);
        for (i, frame) in frames(4).iter().enumerate() {
            assert!(sink.submit(i as u64, frame).is_ok());
        }
        let mut disabled = TraceSink::new(0);
        assert!(disabled.submit(0, &frames(1)[0]).is_ok());
    }

    #[test]
    fn test_sink_list_fans_out() {
        let mut sinks: Vec<Box<dyn FrameSink>> = vec![
            Box::new(TraceSink::new(1)),
            Box::new(JsonLinesSink::new(std::io::sink())),
        ];
        for (i, frame) in frames(3).iter().enumerate() {
            sinks.submit(i as u64, frame).unwrap();
        }
        assert!(sinks.finish().is_ok());
    }
}
