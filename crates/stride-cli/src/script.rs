//! Input scripts: timed key holds and mouse motion replayed frame by frame
//!
//! ```toml
//! frame_time = 0.016
//!
//! [[step]]
//! frames = 10
//! click = true
//!
//! [[step]]
//! frames = 60
//! hold = ["KeyW", "ShiftLeft"]
//! mouse = [4.0, 0.0]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use stride_runtime::{InputState, Trigger, MAX_FRAME_TIME};
use winit::keyboard::KeyCode;

fn default_frame_time() -> f64 {
    1.0 / 60.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Wall-clock seconds per frame, fed to the fixed-step clock
    #[serde(default = "default_frame_time")]
    pub frame_time: f64,
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    pub frames: usize,
    /// Keys held for the whole step
    #[serde(default)]
    pub hold: Vec<KeyCode>,
    /// Raw mouse delta applied every frame of the step
    #[serde(default)]
    pub mouse: Option<[f64; 2]>,
    /// Press the `capture` binding on the first frame
    #[serde(default)]
    pub click: bool,
    /// Press the `cancel` binding on the first frame
    #[serde(default)]
    pub cancel: bool,
}

impl Script {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script '{}'", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: Self = toml::from_str(content).context("Failed to parse script")?;
        if !(script.frame_time.is_finite()
            && script.frame_time > 0.0
            && script.frame_time <= MAX_FRAME_TIME)
        {
            bail!(
                "frame_time must be in (0, {}], got {}",
                MAX_FRAME_TIME,
                script.frame_time
            );
        }
        Ok(script)
    }

    /// Stand still for `seconds`
    pub fn idle(seconds: f64) -> Self {
        let frame_time = default_frame_time();
        Self {
            frame_time,
            steps: vec![ScriptStep {
                frames: (seconds / frame_time).round() as usize,
                hold: Vec::new(),
                mouse: None,
                click: false,
                cancel: false,
            }],
        }
    }

    pub fn total_frames(&self) -> usize {
        self.steps.iter().map(|s| s.frames).sum()
    }
}

/// Feeds a script into an [`InputState`] one frame at a time
pub struct ScriptPlayer<'a> {
    script: &'a Script,
    step: usize,
    frame_in_step: usize,
    held: Vec<KeyCode>,
    /// Action triggers pressed last frame, released on the next
    tapped: Vec<Trigger>,
}

impl<'a> ScriptPlayer<'a> {
    pub fn new(script: &'a Script) -> Self {
        Self {
            script,
            step: 0,
            frame_in_step: 0,
            held: Vec::new(),
            tapped: Vec::new(),
        }
    }

    /// Apply the next frame's input events. Returns false once the script is done.
    pub fn apply_next(&mut self, input: &mut InputState) -> Result<bool> {
        while let Some(step) = self.script.steps.get(self.step) {
            if self.frame_in_step < step.frames {
                break;
            }
            self.step += 1;
            self.frame_in_step = 0;
        }
        let Some(step) = self.script.steps.get(self.step) else {
            for key in self.held.drain(..) {
                input.process_key_up(key);
            }
            for trigger in self.tapped.drain(..) {
                input.release(trigger);
            }
            return Ok(false);
        };

        let first_frame = self.frame_in_step == 0;
        if first_frame {
            for key in self.held.iter().filter(|k| !step.hold.contains(k)) {
                input.process_key_up(*key);
            }
            for key in step.hold.iter().filter(|k| !self.held.contains(k)) {
                input.process_key_down(*key);
            }
            self.held = step.hold.clone();
        }

        // Taps last a single frame so each one is a single press edge
        for trigger in self.tapped.drain(..) {
            input.release(trigger);
        }
        if first_frame {
            let taps = [("capture", step.click), ("cancel", step.cancel)];
            for (action, _) in taps.iter().filter(|(_, wanted)| *wanted) {
                let trigger = input
                    .action_trigger(action)
                    .with_context(|| format!("action '{}' has no binding", action))?;
                input.press(trigger);
                self.tapped.push(trigger);
            }
        }
        if let Some([dx, dy]) = step.mouse {
            input.process_mouse_raw_delta(dx, dy);
        }

        self.frame_in_step += 1;
        Ok(true)
    }
}
