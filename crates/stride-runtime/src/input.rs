//! Input state management

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use stride_core::{Result, Vec2};
use winit::keyboard::KeyCode;

/// Action bindings as stored on disk: action name -> winit key codes
///
/// ```toml
/// [actions]
/// jump = ["Space"]
/// crouch = ["ControlLeft", "KeyC"]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BindingsFile {
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<KeyCode>>,
}

impl BindingsFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// A physical input that can fire an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key(KeyCode),
    MouseButton(u32),
}

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,

    /// Mouse button state (button index -> pressed)
    mouse_buttons_down: HashSet<u32>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<u32>,

    /// Raw accumulated mouse delta (for cursor-locked mode)
    raw_mouse_delta: (f64, f64),

    /// Action map: action name -> list of key bindings
    action_map: HashMap<String, Vec<KeyCode>>,

    /// Mouse button action map: action name -> list of mouse button indices
    mouse_button_map: HashMap<String, Vec<u32>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            raw_mouse_delta: (0.0, 0.0),
            action_map: Self::default_action_map(),
            mouse_button_map: Self::default_mouse_button_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<KeyCode>> {
        let mut map = HashMap::new();
        map.insert("move_left".into(), vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
        map.insert("move_right".into(), vec![KeyCode::KeyD, KeyCode::ArrowRight]);
        map.insert("move_forward".into(), vec![KeyCode::KeyW, KeyCode::ArrowUp]);
        map.insert("move_backward".into(), vec![KeyCode::KeyS, KeyCode::ArrowDown]);
        map.insert("jump".into(), vec![KeyCode::Space]);
        map.insert("sprint".into(), vec![KeyCode::ShiftLeft]);
        map.insert("crouch".into(), vec![KeyCode::ControlLeft, KeyCode::KeyC]);
        map.insert("cancel".into(), vec![KeyCode::Escape]);
        map
    }

    fn default_mouse_button_map() -> HashMap<String, Vec<u32>> {
        let mut map = HashMap::new();
        map.insert("capture".into(), vec![0]); // Left mouse button
        map
    }

    /// Bind an action to one or more keys
    pub fn bind_action(&mut self, action: impl Into<String>, keys: Vec<KeyCode>) {
        self.action_map.insert(action.into(), keys);
    }

    /// Replace key bindings for every action named in the file.
    ///
    /// A rebound action drops its mouse buttons, so the file fully describes it.
    pub fn apply_bindings(&mut self, bindings: &BindingsFile) {
        for (action, keys) in &bindings.actions {
            log::debug!("rebound action '{}' to {:?}", action, keys);
            self.mouse_button_map.remove(action);
            self.bind_action(action.clone(), keys.clone());
        }
    }

    /// First physical input bound to an action, keys before mouse buttons
    pub fn action_trigger(&self, action: &str) -> Option<Trigger> {
        let key = self
            .action_map
            .get(action)
            .and_then(|keys| keys.first())
            .map(|k| Trigger::Key(*k));
        key.or_else(|| {
            self.mouse_button_map
                .get(action)
                .and_then(|btns| btns.first())
                .map(|b| Trigger::MouseButton(*b))
        })
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
    }

    pub fn press(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Key(key) => self.process_key_down(key),
            Trigger::MouseButton(button) => self.process_mouse_button_down(button),
        }
    }

    pub fn release(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Key(key) => self.process_key_up(key),
            Trigger::MouseButton(button) => self.process_mouse_button_up(button),
        }
    }

    /// Process raw mouse delta (device motion, for locked cursor)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.mouse_buttons_just_pressed.clear();
        self.raw_mouse_delta = (0.0, 0.0);
    }

    // --- Query methods ---

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_down.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_down.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        let key_match = self
            .action_map
            .get(action)
            .map(|keys| keys.iter().any(|k| self.keys_just_pressed.contains(k)))
            .unwrap_or(false);
        let mouse_match = self
            .mouse_button_map
            .get(action)
            .map(|btns| btns.iter().any(|b| self.mouse_buttons_just_pressed.contains(b)))
            .unwrap_or(false);
        key_match || mouse_match
    }

    /// 2D axis from four digital actions, clamped to unit length.
    ///
    /// `neg_y`/`pos_y` follow screen convention: forward is negative Y.
    pub fn get_vector(&self, neg_x: &str, pos_x: &str, neg_y: &str, pos_y: &str) -> Vec2 {
        let axis = |neg: &str, pos: &str| {
            let mut value = 0.0;
            if self.is_action_pressed(neg) {
                value -= 1.0;
            }
            if self.is_action_pressed(pos) {
                value += 1.0;
            }
            value
        };
        Vec2::new(axis(neg_x, pos_x), axis(neg_y, pos_y)).clamp_length(1.0)
    }

    /// Get the raw mouse delta (accumulated device motion)
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }
}
