//! Console-backed UI and camera for the headless host

use std::collections::HashMap;

use tracing::{debug, info};

use crate::game::{CameraRig, InstanceHandle, MessageSurface, PauseControl, UiLookup};

/// Drop `<color=...>` rich-text tags
pub fn strip_color_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let is_tag = tail.starts_with("<color=") || tail.starts_with("</color>");
        match (is_tag, tail.find('>')) {
            (true, Some(end)) => rest = &tail[end + 1..],
            _ => {
                out.push('<');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Writes banners to the log
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl MessageSurface for ConsoleSurface {
    fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            debug!("Message cleared");
            return;
        }
        for line in strip_color_tags(text).lines().filter(|l| !l.is_empty()) {
            info!(target: "tank_arena::banner", "{}", line);
        }
    }
}

#[derive(Debug, Default)]
pub struct ConsolePauseControl {
    bound: bool,
    active: bool,
}

impl PauseControl for ConsolePauseControl {
    fn bind_toggle(&mut self) {
        if self.bound {
            debug!("Pause control rebound");
        }
        self.bound = true;
    }

    fn set_active(&mut self, active: bool) {
        if active != self.active {
            debug!(active, "Pause control visibility changed");
        }
        self.active = active;
    }
}

/// Named controls available for lookup
#[derive(Default)]
pub struct ConsoleUi {
    controls: HashMap<String, ConsolePauseControl>,
}

impl ConsoleUi {
    pub fn with_pause_control(name: &str) -> Self {
        let mut controls = HashMap::new();
        controls.insert(name.to_string(), ConsolePauseControl::default());
        Self { controls }
    }
}

impl UiLookup for ConsoleUi {
    fn find_pause_control(&mut self, name: &str) -> Option<Box<dyn PauseControl>> {
        self.controls
            .remove(name)
            .map(|control| Box::new(control) as Box<dyn PauseControl>)
    }
}

/// Camera that keeps track of what it is framing
#[derive(Debug, Default)]
pub struct TrackingCamera {
    targets: Vec<InstanceHandle>,
    framings: u32,
}

impl TrackingCamera {
    pub fn framings(&self) -> u32 {
        self.framings
    }
}

impl CameraRig for TrackingCamera {
    fn set_targets(&mut self, targets: &[InstanceHandle]) {
        self.targets = targets.to_vec();
        debug!(targets = targets.len(), "Camera targets set");
    }

    fn reset_to_start(&mut self) {
        self.framings += 1;
    }
}
