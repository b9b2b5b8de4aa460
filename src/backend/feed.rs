//! Line-delimited JSON frame feed.
//!
//! The hand-landmark detector runs as a separate process and writes one JSON
//! object per camera frame:
//!
//! ```json
//! {"hand": [[x, y, z], ...21 points], "fingers": [false, true, false, false, false],
//!  "pointer": [x, y], "clicked": false, "command": {"type": "undo"}, "quit": false}
//! ```
//!
//! Every field is optional. A line containing only `q` or `quit` ends the session.
//! Lines are read on a helper thread so a quit signal is noticed even while the
//! detector is silent.

use crate::gesture::{FingerState, HandLandmarks, Landmark};
use crate::input::{
    Detection, HandFrame, InteractionChannel, LandmarkSource, SourceError, UiCommand,
};
use log::{debug, info, warn};
use serde::Deserialize;
use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// How often the quit flag is checked while waiting for a line.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One decoded feed line.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeedLine {
    hand: Option<Vec<Landmark>>,
    fingers: Option<FingerState>,
    pointer: Option<[f32; 2]>,
    clicked: bool,
    command: Option<UiCommand>,
    quit: bool,
}

/// What a single raw line asks for.
#[derive(Debug)]
enum LineEvent {
    Frame(Detection, Option<UiCommand>),
    Quit,
}

/// Landmark source and UI channel backed by a line reader (stdin in the binary).
pub struct FeedSource {
    lines: Receiver<std::io::Result<String>>,
    quit: Arc<AtomicBool>,
    pending: Option<UiCommand>,
    camera: u32,
    frames: u64,
    malformed: u64,
}

impl FeedSource {
    /// Starts reading `reader` on a background thread.
    ///
    /// `quit` is polled between lines; setting it ends the feed at the next
    /// tick boundary.
    pub fn spawn<R>(reader: R, camera: u32, quit: Arc<AtomicBool>) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });

        info!("Reading hand landmarks for camera {camera} from the detector feed");
        Self {
            lines: rx,
            quit,
            pending: None,
            camera,
            frames: 0,
            malformed: 0,
        }
    }

    /// Frames received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Lines that failed to parse and were treated as hand-less frames.
    pub fn malformed_lines(&self) -> u64 {
        self.malformed
    }

    fn parse_line(&mut self, line: &str) -> LineEvent {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            return LineEvent::Quit;
        }
        if trimmed.is_empty() {
            return LineEvent::Frame(Detection::no_hand(), None);
        }

        let parsed: FeedLine = match serde_json::from_str(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.malformed += 1;
                warn!("Ignoring malformed feed line: {err}");
                return LineEvent::Frame(Detection::no_hand(), None);
            }
        };
        if parsed.quit {
            return LineEvent::Quit;
        }

        let hand = match parsed.hand.as_deref().map(HandLandmarks::from_slice) {
            Some(Ok(landmarks)) => Some(HandFrame {
                landmarks,
                fingers: parsed.fingers,
            }),
            Some(Err(err)) => {
                self.malformed += 1;
                warn!("Ignoring hand in feed line: {err}");
                None
            }
            None => None,
        };

        let detection = Detection {
            hand,
            pointer: parsed.pointer.map(|[x, y]| (x, y)),
            clicked: parsed.clicked,
        };
        LineEvent::Frame(detection, parsed.command)
    }
}

impl LandmarkSource for FeedSource {
    fn detect(&mut self) -> Result<Option<Detection>, SourceError> {
        loop {
            if self.quit.load(Ordering::Acquire) {
                debug!("Quit flag set; closing feed for camera {}", self.camera);
                return Ok(None);
            }
            match self.lines.recv_timeout(POLL_INTERVAL) {
                Ok(Ok(line)) => match self.parse_line(&line) {
                    LineEvent::Quit => {
                        info!("Quit requested by the feed");
                        return Ok(None);
                    }
                    LineEvent::Frame(detection, command) => {
                        self.frames += 1;
                        self.pending = command;
                        return Ok(Some(detection));
                    }
                },
                Ok(Err(err)) => return Err(SourceError::Device(err)),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    info!("Feed closed after {} frames", self.frames);
                    return Ok(None);
                }
            }
        }
    }
}

impl InteractionChannel for FeedSource {
    fn poll_interaction(
        &mut self,
        _point: Option<(f32, f32)>,
        _clicked: bool,
    ) -> Option<UiCommand> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};

    fn feed(text: &str) -> FeedSource {
        FeedSource::spawn(
            Cursor::new(text.to_string()),
            0,
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn hand_json() -> String {
        let points: Vec<String> = (0..21).map(|i| format!("[{i}, {i}, 0]")).collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn parses_hand_pointer_and_command() {
        let line = format!(
            r#"{{"hand": {}, "fingers": [false,true,false,false,false], "command": {{"type":"redo"}}}}"#,
            hand_json()
        );
        let mut source = feed(&format!("{line}\n"));

        let detection = source.detect().unwrap().unwrap();
        let hand = detection.hand.unwrap();
        assert_eq!(hand.landmarks.index_tip().x, 8.0);
        assert_eq!(hand.fingers, Some(FingerState([false, true, false, false, false])));
        assert_eq!(source.poll_interaction(None, false), Some(UiCommand::Redo));
        assert_eq!(source.poll_interaction(None, false), None);
    }

    #[test]
    fn malformed_lines_become_empty_frames() {
        let mut source = feed("{not json\n{\"hand\": [[1,2,3]]}\n");
        assert_eq!(source.detect().unwrap(), Some(Detection::no_hand()));
        assert_eq!(source.detect().unwrap(), Some(Detection::no_hand()));
        assert_eq!(source.malformed_lines(), 2);
    }

    #[test]
    fn pointer_and_click_pass_through() {
        let mut source = feed("{\"pointer\": [10, 20], \"clicked\": true}\n");
        let detection = source.detect().unwrap().unwrap();
        assert!(detection.hand.is_none());
        assert_eq!(detection.pointer, Some((10.0, 20.0)));
        assert!(detection.clicked);
    }

    #[test]
    fn quit_line_and_eof_end_the_feed() {
        let mut source = feed("{}\nq\n{}\n");
        assert!(source.detect().unwrap().is_some());
        assert!(source.detect().unwrap().is_none());

        let mut empty = feed("");
        assert!(empty.detect().unwrap().is_none());
    }

    #[test]
    fn quit_flag_stops_waiting() {
        let quit = Arc::new(AtomicBool::new(true));
        let mut source = FeedSource::spawn(Cursor::new("{}\n".to_string()), 0, quit);
        assert!(source.detect().unwrap().is_none());
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("camera unplugged"))
        }
    }

    #[test]
    fn read_errors_are_device_failures() {
        let mut source = FeedSource::spawn(
            io::BufReader::new(BrokenReader),
            2,
            Arc::new(AtomicBool::new(false)),
        );
        let err = source.detect().unwrap_err();
        assert!(matches!(err, SourceError::Device(_)));
        assert!(err.to_string().contains("unreadable"));
    }
}
