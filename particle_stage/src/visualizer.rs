//! Software-rendered stage using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ scene label                                     gifts 2/5        │
//! │                                                                  │
//! │        particle text  /  projected tree, gifts, media            │
//! │                                                                  │
//! │        hand skeletons (mirrored, like a webcam preview)          │
//! │                                                                  │
//! │ [caption bar]                                                    │
//! │ status line                                                      │
//! │ key legend                                                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{anyhow, Result};
use glam::Vec3;
use gesture_core::FrameReport;
use hand_sign::pose::HandPose;
use hand_sign::{HandFrame, Landmark, Side};
use minifb::{Key, KeyRepeat, Window, WindowOptions};
use scene_state::{
    FreeLookCamera, GiftId, MediaId, MediaKind, MediaShelf, SceneMode, Stage, GIFT_TREE_POSITION,
    MEDIA_TREE_POSITION,
};

use crate::source::SimInput;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 1000;
pub const WIN_H:     usize = 600;
const CAPTION_Y:     usize = WIN_H - 96;
const STATUS_Y:      usize = WIN_H - 36;
const FOCAL:         f32   = 520.0;
const NEAR:          f32   = 0.1;
/// Image-space travel of one arrow-key press.
const NUDGE:         f32   = 0.02;
/// Particle text pixel pitch at model scale 1.
const PARTICLE_PITCH: f32  = 9.0;

const LEFT_HAND:     u32 = 0xFF0000FF;
const RIGHT_HAND:    u32 = 0xFF00FF00;
const ACTIVE_HAND:   u32 = 0xFFFF0000;
const PENDING_HAND:  u32 = 0xFFFFFF00;
const TEXT_BG:       u32 = 0xFF0F3460;
const GOLD:          u32 = 0xFFFFD700;

/// Bones drawn between landmark indices.
pub const HAND_CONNECTIONS: [(usize, usize); 23] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (0, 9), (9, 10), (10, 11), (11, 12),
    (0, 13), (13, 14), (14, 15), (15, 16),
    (0, 17), (17, 18), (18, 19), (19, 20),
    (5, 9), (9, 13), (13, 17),
];

fn background(mode: SceneMode) -> u32 {
    match mode {
        SceneMode::Particles     => 0xFF0B0B1A,
        SceneMode::CherryBlossom => 0xFF2A1624,
        SceneMode::Christmas     => 0xFF0E1F14,
        SceneMode::PhotoTree     => 0xFF1A1A2E,
        SceneMode::EmptyTree     => 0xFF101018,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pure helpers
// ════════════════════════════════════════════════════════════════════════════

/// Skeleton color for one hand given what the last frame did with it.
pub fn skeleton_color(side: Side, report: &FrameReport) -> u32 {
    match side {
        Side::Left => {
            if report.dragging || report.rotating || report.scaling || report.looking || report.dollying {
                ACTIVE_HAND
            } else {
                LEFT_HAND
            }
        }
        Side::Right => {
            if report.scaling || report.strafing || report.dollying {
                ACTIVE_HAND
            } else if report.switch_pending {
                PENDING_HAND
            } else {
                RIGHT_HAND
            }
        }
    }
}

/// Perspective-project a world point into window pixels.  Returns the
/// pixel position and view depth, or `None` behind the camera.
pub fn project(camera: &FreeLookCamera, point: Vec3) -> Option<(f32, f32, f32)> {
    let rel = point - camera.position;
    let forward = camera.forward();
    let right = camera.right();
    let up = right.cross(forward);
    let depth = rel.dot(forward);
    if depth <= NEAR {
        return None;
    }
    let sx = WIN_W as f32 / 2.0 + rel.dot(right) / depth * FOCAL;
    let sy = WIN_H as f32 / 2.0 - rel.dot(up) / depth * FOCAL;
    Some((sx, sy, depth))
}

/// Mirrored preview: the tracker image is flipped so the user's left hand
/// appears on the left.
pub fn landmark_pixel(lm: &Landmark) -> (f32, f32) {
    ((1.0 - lm.x) * WIN_W as f32, lm.y * WIN_H as f32)
}

/// Digit → simulated pose.  `Some(None)` hides the hand.
pub fn pose_for_digit(digit: u8) -> Option<Option<HandPose>> {
    match digit {
        0     => Some(None),
        1..=5 => Some(Some(HandPose::Number(digit))),
        6     => Some(Some(HandPose::Fist)),
        7     => Some(Some(HandPose::Pinch)),
        8     => Some(Some(HandPose::ThreeFingerPinch)),
        9     => Some(Some(HandPose::OpenPalm)),
        _     => None,
    }
}

/// Number row drives the left hand, numpad the right.
pub fn key_digit(key: Key) -> Option<(Side, u8)> {
    let d = match key {
        Key::Key0 => (Side::Left, 0), Key::Key1 => (Side::Left, 1),
        Key::Key2 => (Side::Left, 2), Key::Key3 => (Side::Left, 3),
        Key::Key4 => (Side::Left, 4), Key::Key5 => (Side::Left, 5),
        Key::Key6 => (Side::Left, 6), Key::Key7 => (Side::Left, 7),
        Key::Key8 => (Side::Left, 8), Key::Key9 => (Side::Left, 9),
        Key::NumPad0 => (Side::Right, 0), Key::NumPad1 => (Side::Right, 1),
        Key::NumPad2 => (Side::Right, 2), Key::NumPad3 => (Side::Right, 3),
        Key::NumPad4 => (Side::Right, 4), Key::NumPad5 => (Side::Right, 5),
        Key::NumPad6 => (Side::Right, 6), Key::NumPad7 => (Side::Right, 7),
        Key::NumPad8 => (Side::Right, 8), Key::NumPad9 => (Side::Right, 9),
        _ => return None,
    };
    Some(d)
}

pub fn key_letter(key: Key) -> Option<char> {
    const LETTERS: [(Key, char); 26] = [
        (Key::A, 'a'), (Key::B, 'b'), (Key::C, 'c'), (Key::D, 'd'), (Key::E, 'e'),
        (Key::F, 'f'), (Key::G, 'g'), (Key::H, 'h'), (Key::I, 'i'), (Key::J, 'j'),
        (Key::K, 'k'), (Key::L, 'l'), (Key::M, 'm'), (Key::N, 'n'), (Key::O, 'o'),
        (Key::P, 'p'), (Key::Q, 'q'), (Key::R, 'r'), (Key::S, 's'), (Key::T, 't'),
        (Key::U, 'u'), (Key::V, 'v'), (Key::W, 'w'), (Key::X, 'x'), (Key::Y, 'y'),
        (Key::Z, 'z'),
    ];
    LETTERS.iter().find(|(k, _)| *k == key).map(|&(_, c)| c)
}

fn key_input(key: Key) -> Option<SimInput> {
    if let Some((side, d)) = key_digit(key) {
        let pose = pose_for_digit(d)?;
        return Some(match side {
            Side::Left  => SimInput::LeftPose(pose),
            Side::Right => SimInput::RightPose(pose),
        });
    }
    key_letter(key).map(SimInput::Letter)
}

// ════════════════════════════════════════════════════════════════════════════
// Frame snapshot
// ════════════════════════════════════════════════════════════════════════════

/// Everything one rendered frame shows, borrowed from the app.
pub struct StageView<'a> {
    pub stage:         &'a Stage,
    pub text:          &'a str,
    pub caption:       Option<&'a str>,
    pub hands:         &'a HandFrame,
    pub report:        &'a FrameReport,
    /// Gift or media item currently under the hold gesture.
    pub hovered_gift:  Option<GiftId>,
    pub hovered_media: Option<MediaId>,
    pub status:        &'a str,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
}

impl Visualizer {
    pub fn new() -> Result<Self> {
        let mut window = Window::new(
            "Particle Stage",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("failed opening window: {e}"))?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![0xFF000000; WIN_W * WIN_H],
        })
    }

    /// Poll keyboard input.  `None` when the window should close.
    pub fn poll_input(&mut self) -> Option<Vec<SimInput>> {
        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return None;
        }

        let mut out: Vec<SimInput> = self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(key_input)
            .collect();

        let shift = self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift);
        let ctrl  = self.window.is_key_down(Key::LeftCtrl) || self.window.is_key_down(Key::RightCtrl);
        let side = match (shift, ctrl) {
            (true, false) => Some(Side::Left),
            (false, true) => Some(Side::Right),
            _             => None,
        };
        let held = |k: Key| self.window.is_key_down(k);
        let dx = (held(Key::Right) as i8 - held(Key::Left) as i8) as f32 * NUDGE;
        let dy = (held(Key::Down) as i8 - held(Key::Up) as i8) as f32 * NUDGE;
        if dx != 0.0 || dy != 0.0 {
            // Arrows move in screen space; the preview is mirrored.
            out.push(SimInput::Move { side, dx: -dx, dy });
        }

        Some(out)
    }

    pub fn render(&mut self, view: &StageView<'_>) {
        let mode = view.stage.scenes.active();
        self.buf.fill(background(mode));

        match mode {
            SceneMode::Particles => self.draw_particle_text(view),
            SceneMode::CherryBlossom => {
                self.draw_tree(&view.stage.camera, MEDIA_TREE_POSITION, 0xFFF4A6C8);
            }
            SceneMode::Christmas => {
                self.draw_tree(&view.stage.camera, GIFT_TREE_POSITION, 0xFF1E7A3A);
                self.draw_gifts(view);
            }
            SceneMode::PhotoTree | SceneMode::EmptyTree => {
                self.draw_tree(&view.stage.camera, MEDIA_TREE_POSITION, 0xFF2E8B57);
                if let Some(shelf) = view.stage.active_shelf() {
                    self.draw_media(shelf, &view.stage.camera, view.hovered_media);
                }
            }
        }

        if view.report.hover_progress > 0.0 {
            let w = (200.0 * view.report.hover_progress.clamp(0.0, 1.0)) as usize;
            self.draw_border(WIN_W / 2 - 101, 40, 202, 10, 0xFF888888);
            self.fill_rect(WIN_W / 2 - 100, 41, w, 8, GOLD);
        }

        if let Some(open) = view.stage.viewer.current() {
            self.fill_rect(150, 90, WIN_W - 300, WIN_H - 220, 0xF0202030);
            self.draw_border(150, 90, WIN_W - 300, WIN_H - 220, GOLD);
            let name = open.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            self.draw_label(&format!("{}: {}", open.kind.label(), name), 170, 110, GOLD);
            self.draw_label("open palm (right) to close", 170, WIN_H - 150, 0xFFAAAAAA);
        }

        for hand in view.hands.hands() {
            let color = skeleton_color(hand.side(), view.report);
            self.draw_skeleton(hand.landmarks.points(), color);
        }

        // ── Header ──────────────────────────────────────────────────────────
        self.draw_label(mode.label(), 10, 10, 0xFFAADDFF);
        if view.stage.gifts.spawned() > 0 {
            let gifts = format!("gifts {}/{}", view.stage.gifts.opened(), view.stage.gifts.spawned());
            self.draw_label(&gifts, WIN_W - 120, 10, GOLD);
        }

        // ── Caption bar ─────────────────────────────────────────────────────
        if let Some(caption) = view.caption {
            self.fill_rect(0, CAPTION_Y, WIN_W, 28, TEXT_BG);
            self.draw_label_scaled(caption, 12, CAPTION_Y + 6, 3, 0xFFEEEEEE);
        }

        // ── Status bar ──────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(view.status, 10, STATUS_Y + 8, 0xFFEEEEEE);

        // ── Key legend ──────────────────────────────────────────────────────
        self.draw_label(
            "0-9=left pose  numpad=right pose  1-5=count 6=fist 7=pinch 8=3-pinch 9=palm 0=hide  arrows=move (shift=left ctrl=right)  a-z=type  esc=quit",
            10, WIN_H - 12, 0xFF888888,
        );

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Particle text ─────────────────────────────────────────────────────

    fn draw_particle_text(&mut self, view: &StageView<'_>) {
        let model = &view.stage.model;
        let pitch = (PARTICLE_PITCH * model.scale).max(1.0);
        // Turning about y foreshortens the text; about x, its height.
        let sx = pitch * model.rotation.y.cos().abs().max(0.1);
        let sy = pitch * model.rotation.x.cos().abs().max(0.1);
        let chars = view.text.chars().count() as f32;
        let width = chars * 4.0 * sx;
        let cx = WIN_W as f32 / 2.0 + model.position.x * 20.0;
        let cy = WIN_H as f32 / 2.0 - model.position.y * 20.0;
        let x0 = cx - width / 2.0;
        let y0 = cy - 2.5 * sy;
        let dot = (pitch * 0.5).max(1.0);

        for (i, ch) in view.text.chars().enumerate() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) == 0 {
                        continue;
                    }
                    let px = x0 + (i as f32 * 4.0 + col as f32) * sx;
                    let py = y0 + row as f32 * sy;
                    self.fill_span(px, py, px + dot, py + dot, 0xFFFFE4F2);
                }
            }
        }
    }

    // ── 3-D scenes ────────────────────────────────────────────────────────

    fn draw_tree(&mut self, camera: &FreeLookCamera, base: Vec3, color: u32) {
        // Three stacked tiers, widest at the bottom.
        for tier in 0..3 {
            let y = 2.0 + tier as f32 * 2.5;
            let half = 3.5 - tier as f32;
            let (Some(l), Some(r)) = (
                project(camera, base + Vec3::new(-half, y, 0.0)),
                project(camera, base + Vec3::new(half, y + 2.5, 0.0)),
            ) else {
                continue;
            };
            self.fill_span(l.0, r.1, r.0, l.1, color);
        }
        if let (Some(a), Some(b)) = (
            project(camera, base + Vec3::new(-0.4, 0.0, 0.0)),
            project(camera, base + Vec3::new(0.4, 2.0, 0.0)),
        ) {
            self.fill_span(a.0, b.1, b.0, a.1, 0xFF5C3A1E);
        }
    }

    fn draw_gifts(&mut self, view: &StageView<'_>) {
        let camera = &view.stage.camera;
        for gift in view.stage.gifts.gifts() {
            let Some((x, y, depth)) = project(camera, gift.position + Vec3::Y * 0.5) else {
                continue;
            };
            let half = (0.5 / depth * FOCAL).max(2.0);
            let color = if gift.is_opened() { 0xFF555555 } else { 0xFFC0392B };
            self.fill_span(x - half, y - half, x + half, y + half, color);
            if view.hovered_gift == Some(gift.id) {
                self.draw_border(
                    (x - half - 3.0).max(0.0) as usize,
                    (y - half - 3.0).max(0.0) as usize,
                    (half * 2.0 + 6.0) as usize,
                    (half * 2.0 + 6.0) as usize,
                    GOLD,
                );
            }
        }
    }

    fn draw_media(&mut self, shelf: &MediaShelf, camera: &FreeLookCamera, hovered: Option<MediaId>) {
        for item in shelf.items() {
            let Some((x, y, depth)) = project(camera, item.position) else {
                continue;
            };
            let half = (0.6 / depth * FOCAL).max(2.0);
            let color = match item.entry.kind {
                MediaKind::Image => 0xFFEEEEEE,
                MediaKind::Audio => 0xFFE6B450,
                MediaKind::Video => 0xFF6FA8DC,
            };
            self.fill_span(x - half, y - half * 0.75, x + half, y + half * 0.75, color);
            if hovered == Some(item.id) {
                self.draw_border(
                    (x - half - 3.0).max(0.0) as usize,
                    (y - half * 0.75 - 3.0).max(0.0) as usize,
                    (half * 2.0 + 6.0) as usize,
                    (half * 1.5 + 6.0) as usize,
                    GOLD,
                );
            }
        }
    }

    fn draw_skeleton(&mut self, points: &[Landmark], color: u32) {
        for &(a, b) in HAND_CONNECTIONS.iter() {
            let (x0, y0) = landmark_pixel(&points[a]);
            let (x1, y1) = landmark_pixel(&points[b]);
            self.draw_line(x0, y0, x1, y1, color);
        }
        for p in points {
            let (x, y) = landmark_pixel(p);
            self.fill_span(x - 2.0, y - 2.0, x + 2.0, y + 2.0, color);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y+h).min(WIN_H) {
            for col in x..(x+w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    /// Fill between two float corners, clipped to the window.
    fn fill_span(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let (x, y, w, h) = clip_span(x0, y0, x1, y1);
        self.fill_rect(x, y, w, h, color);
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            if y < WIN_H           { self.buf[y           * WIN_W + col] = color; }
            if y+h-1 < WIN_H       { self.buf[(y+h-1)     * WIN_W + col] = color; }
        }
        for row in y..(y+h).min(WIN_H) {
            if x < WIN_W           { self.buf[row * WIN_W + x    ] = color; }
            if x+w-1 < WIN_W       { self.buf[row * WIN_W + x+w-1] = color; }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: u32) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.set_pixel(x as isize, y as isize, color);
            self.set_pixel(x as isize + 1, y as isize, color);
        }
    }

    /// Minimal bitmap font, 3×5 characters.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        self.draw_label_scaled(text, x, y, 1, color);
    }

    fn draw_label_scaled(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W { break; }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Two float corners → `(x, y, w, h)` inside the window.  Off-screen or
/// non-finite corners collapse to an empty rect.
fn clip_span(x0: f32, y0: f32, x1: f32, y1: f32) -> (usize, usize, usize, usize) {
    let clip = |v: f32, max: usize| if v.is_nan() { 0 } else { v.clamp(0.0, max as f32) as usize };
    let (xa, xb) = (clip(x0.min(x1), WIN_W), clip(x0.max(x1), WIN_W));
    let (ya, yb) = (clip(y0.min(y1), WIN_H), clip(y0.max(y1), WIN_H));
    (xa, ya, xb - xa, yb - ya)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
