//! Tracking frame sources: keyboard simulation, recorded replay and
//! LeapMotion hardware.
//!
//! The public interface is [`TrackingEvent`] delivered over an `mpsc`
//! channel.  The interaction core never knows which source produced a
//! frame.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use hand_sign::pose::{HandPose, PoseBuilder};
use hand_sign::{HandFrame, HandLandmarks, Landmark, Side, TrackedHand, TrackerLabel, MAX_HANDS};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Nominal tracker cadence (~30 Hz).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Longest pause a replay will reproduce between two records.
const MAX_REPLAY_GAP: Duration = Duration::from_secs(1);

// ════════════════════════════════════════════════════════════════════════════
// TrackingEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum TrackingEvent {
    Frame(HandFrame),
    /// The source has nothing more to deliver.
    Finished,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait: unified interface for hw, replay and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`TrackingEvent`]s over a channel.
pub trait FrameSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>);
}

/// Spawn a frame source on its own thread and return the receiving end.
pub fn spawn_frame_source<S: FrameSource>(source: S) -> Receiver<TrackingEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// Keyboard simulation
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the stage window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    /// Show a pose with the physical left hand, or hide it.
    LeftPose(Option<HandPose>),
    RightPose(Option<HandPose>),
    /// Nudge one hand (or both when `side` is `None`) in image space.
    Move { side: Option<Side>, dx: f32, dy: f32 },
    /// A typed letter, routed to the secret-phrase listener.
    Letter(char),
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct SimHand {
    pose: Option<HandPose>,
    x:    f32,
    y:    f32,
}

impl SimHand {
    fn nudge(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).clamp(0.0, 1.0);
        self.y = (self.y + dy).clamp(0.0, 1.0);
    }

    fn landmarks(&self, mirror: bool) -> Option<HandLandmarks> {
        let pose = self.pose?;
        Some(PoseBuilder::new(self.x, self.y).mirrored(mirror).build(pose))
    }
}

/// The two simulated hands.  The physical left hand appears on the right
/// of the (mirrored) image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimHands {
    left:  SimHand,
    right: SimHand,
}

impl Default for SimHands {
    fn default() -> Self {
        SimHands {
            left:  SimHand { pose: None, x: 0.7, y: 0.6 },
            right: SimHand { pose: None, x: 0.3, y: 0.6 },
        }
    }
}

impl SimHands {
    pub fn apply(&mut self, input: &SimInput) {
        match *input {
            SimInput::LeftPose(pose)  => self.left.pose = pose,
            SimInput::RightPose(pose) => self.right.pose = pose,
            SimInput::Move { side, dx, dy } => {
                if side != Some(Side::Right) { self.left.nudge(dx, dy); }
                if side != Some(Side::Left)  { self.right.nudge(dx, dy); }
            }
            SimInput::Letter(_) | SimInput::Quit => {}
        }
    }

    pub fn pose(&self, side: Side) -> Option<HandPose> {
        match side {
            Side::Left  => self.left.pose,
            Side::Right => self.right.pose,
        }
    }

    pub fn frame(&self) -> HandFrame {
        let mut hands = Vec::with_capacity(MAX_HANDS);
        if let Some(l) = self.left.landmarks(false) {
            hands.push(TrackedHand::physical(l, Side::Left));
        }
        if let Some(r) = self.right.landmarks(true) {
            hands.push(TrackedHand::physical(r, Side::Right));
        }
        HandFrame::new(hands).unwrap_or_default()
    }
}

/// Frame source driven by [`SimInput`] events from the stage window.
///
/// Emits the current simulated hands at the tracker cadence whether or not
/// anything changed, like a camera would.
pub struct SimFrameSource {
    pub rx:       Receiver<SimInput>,
    pub interval: Duration,
}

impl SimFrameSource {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimFrameSource { rx, interval: FRAME_INTERVAL }
    }
}

impl FrameSource for SimFrameSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        let mut hands = SimHands::default();
        let mut next = Instant::now();
        loop {
            let wait = next.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(wait) {
                Ok(SimInput::Quit) => {
                    let _ = tx.send(TrackingEvent::Finished);
                    return;
                }
                Ok(input) => {
                    hands.apply(&input);
                    continue;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    let _ = tx.send(TrackingEvent::Finished);
                    return;
                }
            }
            next = Instant::now() + self.interval;
            if tx.send(TrackingEvent::Frame(hands.frame())).is_err() {
                return;
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Recorded replay
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    multi_hand_landmarks: Vec<Vec<Landmark>>,
    #[serde(default)]
    multi_handedness:     Vec<RawHandedness>,
    timestamp_ms:         Option<u64>,
}

#[derive(Deserialize)]
struct RawHandedness {
    label: TrackerLabel,
}

/// One recorded tracker callback.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRecord {
    pub timestamp_ms: Option<u64>,
    pub frame:        HandFrame,
}

/// Parse one JSON-lines record in the tracker's callback shape:
///
/// ```json
/// {"timestampMs": 1200, "multiHandLandmarks": [[{"x":0.3,"y":0.6,"z":0.0}, ...]],
///  "multiHandedness": [{"label": "Left"}]}
/// ```
///
/// Blank lines and `#` comments yield `None`.  A hand with the wrong number
/// of landmarks is dropped with a warning; hands beyond the second are
/// ignored.
pub fn parse_record(line: &str) -> Result<Option<ReplayRecord>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let raw: RawRecord = serde_json::from_str(line).context("malformed tracking record")?;
    if raw.multi_hand_landmarks.len() != raw.multi_handedness.len() {
        debug!(
            landmarks = raw.multi_hand_landmarks.len(),
            labels = raw.multi_handedness.len(),
            "landmark/label count mismatch, pairing the shorter"
        );
    }

    let hands: Vec<TrackedHand> = raw
        .multi_hand_landmarks
        .into_iter()
        .zip(raw.multi_handedness)
        .filter_map(|(points, h)| match HandLandmarks::from_points(&points) {
            Ok(landmarks) => Some(TrackedHand::new(landmarks, h.label)),
            Err(e) => {
                warn!(error = %e, "skipping hand");
                None
            }
        })
        .take(MAX_HANDS)
        .collect();

    let frame = HandFrame::new(hands)?;
    Ok(Some(ReplayRecord { timestamp_ms: raw.timestamp_ms, frame }))
}

/// Plays a JSON-lines recording back in real time.
pub struct ReplayFrameSource {
    lines: Vec<String>,
}

impl ReplayFrameSource {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed opening recording {}", path.display()))?;
        let lines = BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .with_context(|| format!("failed reading recording {}", path.display()))?;
        info!(path = %path.display(), records = lines.len(), "replay loaded");
        Ok(ReplayFrameSource { lines })
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        ReplayFrameSource { lines }
    }
}

/// Pause between two consecutive records.  Untimed records fall back to
/// the tracker cadence.
fn replay_gap(prev: Option<u64>, current: Option<u64>) -> Duration {
    match (prev, current) {
        (Some(p), Some(c)) => Duration::from_millis(c.saturating_sub(p)).min(MAX_REPLAY_GAP),
        _ => FRAME_INTERVAL,
    }
}

impl FrameSource for ReplayFrameSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        let mut prev_ts: Option<u64> = None;
        let mut first = true;
        for (n, line) in self.lines.iter().enumerate() {
            let record = match parse_record(line) {
                Ok(Some(r)) => r,
                Ok(None) => continue,
                Err(e) => {
                    warn!(line = n + 1, error = %format!("{e:#}"), "skipping record");
                    continue;
                }
            };
            if !first {
                thread::sleep(replay_gap(prev_ts, record.timestamp_ms));
            }
            first = false;
            prev_ts = record.timestamp_ms;
            if tx.send(TrackingEvent::Frame(record.frame)).is_err() {
                return;
            }
        }
        info!("replay finished");
        let _ = tx.send(TrackingEvent::Finished);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapFrameSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Frame source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
/// Joint positions (millimetres above the device) are projected into the
/// normalized, mirrored image space the classifiers expect.
#[cfg(feature = "leap")]
pub struct LeapFrameSource;

#[cfg(feature = "leap")]
impl FrameSource for LeapFrameSource {
    fn run(self: Box<Self>, tx: Sender<TrackingEvent>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c) => c,
            Err(e) => {
                warn!(error = ?e, "failed to create LeapC connection");
                let _ = tx.send(TrackingEvent::Finished);
                return;
            }
        };
        if let Err(e) = connection.open() {
            warn!(error = ?e, "failed to open LeapMotion device");
            let _ = tx.send(TrackingEvent::Finished);
            return;
        }
        info!("LeapMotion connected");

        let mut last_sent = Instant::now() - FRAME_INTERVAL;
        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };
            if let Event::Tracking(frame) = msg.event() {
                if last_sent.elapsed() < FRAME_INTERVAL {
                    continue;
                }
                last_sent = Instant::now();

                let hands: Vec<TrackedHand> = frame.hands()
                    .filter_map(|h| leap_hand(&h))
                    .take(MAX_HANDS)
                    .collect();
                let frame = HandFrame::new(hands).unwrap_or_default();
                if tx.send(TrackingEvent::Frame(frame)).is_err() {
                    return;
                }
            }
        }
    }
}

/// Millimetres above the device → mirrored normalized image coordinates.
#[cfg(feature = "leap")]
macro_rules! leap_point {
    ($v:expr) => {{
        let v = $v;
        Landmark::new(0.5 - v.x / 400.0, 0.5 - (v.y - 250.0) / 400.0, v.z / 400.0)
    }};
}

#[cfg(feature = "leap")]
fn leap_hand(hand: &leaprs::Hand) -> Option<TrackedHand> {
    use leaprs::HandType;

    let digits: Vec<_> = hand.digits().collect();
    if digits.len() < 5 {
        return None;
    }

    let mut points = Vec::with_capacity(hand_sign::LANDMARK_COUNT);
    let bases: Vec<Landmark> = digits[1..].iter().map(|d| leap_point!(d.metacarpal().prev_joint())).collect();
    let n = bases.len() as f32;
    points.push(Landmark::new(
        bases.iter().map(|p| p.x).sum::<f32>() / n,
        bases.iter().map(|p| p.y).sum::<f32>() / n,
        bases.iter().map(|p| p.z).sum::<f32>() / n,
    ));
    for digit in &digits {
        points.push(leap_point!(digit.proximal().prev_joint()));
        points.push(leap_point!(digit.intermediate().prev_joint()));
        points.push(leap_point!(digit.distal().prev_joint()));
        points.push(leap_point!(digit.distal().next_joint()));
    }

    let landmarks = match HandLandmarks::from_points(&points) {
        Ok(l) => l,
        Err(e) => {
            warn!(error = %e, "dropping malformed Leap hand");
            return None;
        }
    };
    let side = if hand.hand_type() == HandType::Left { Side::Left } else { Side::Right };
    Some(TrackedHand::physical(landmarks, side))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
