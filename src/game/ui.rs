//! UI boundary: message display and the pause control
//!
//! Both are optional. A missing surface or control turns every call into a
//! no-op.

/// Name the pause control is discovered by when none is provided
pub const PAUSE_CONTROL_NAME: &str = "PauseButton";

/// Text surface showing round banners and results
pub trait MessageSurface: Send {
    fn set_text(&mut self, text: &str);
}

/// Clickable pause affordance
pub trait PauseControl: Send {
    /// Bind presses to the pause toggle, replacing any earlier binding
    fn bind_toggle(&mut self);
    fn set_active(&mut self, active: bool);
}

/// Finds UI controls by name
pub trait UiLookup: Send {
    fn find_pause_control(&mut self, name: &str) -> Option<Box<dyn PauseControl>>;
}

/// Identity of one posted message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

/// Owns the optional message surface and remembers what is showing
#[derive(Default)]
pub struct MessageBoard {
    surface: Option<Box<dyn MessageSurface>>,
    next_id: u64,
    current: Option<MessageId>,
}

impl MessageBoard {
    pub fn new(surface: Option<Box<dyn MessageSurface>>) -> Self {
        Self {
            surface,
            next_id: 0,
            current: None,
        }
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Show `text`; returns `None` when there is no surface
    pub fn post(&mut self, text: impl AsRef<str>) -> Option<MessageId> {
        let surface = self.surface.as_mut()?;
        surface.set_text(text.as_ref());

        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.current = Some(id);
        Some(id)
    }

    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_text("");
            self.current = None;
        }
    }

    /// Clear only if `id` is still the message on screen
    pub fn clear_if_current(&mut self, id: MessageId) -> bool {
        if self.current == Some(id) {
            self.clear();
            true
        } else {
            false
        }
    }
}

/// UI that outlives a single match.
///
/// The host keeps one of these across scene reloads and hands it to each
/// new match.
#[derive(Default)]
pub struct Ui {
    pub board: MessageBoard,
    pub pause_control: Option<Box<dyn PauseControl>>,
    pub lookup: Option<Box<dyn UiLookup>>,
}

impl Ui {
    pub fn new(
        surface: Option<Box<dyn MessageSurface>>,
        pause_control: Option<Box<dyn PauseControl>>,
        lookup: Option<Box<dyn UiLookup>>,
    ) -> Self {
        Self {
            board: MessageBoard::new(surface),
            pause_control,
            lookup,
        }
    }

    /// Discover the pause control if needed, then wire and show it.
    ///
    /// Returns true if a control is wired.
    pub fn init_pause_control(&mut self) -> bool {
        if self.pause_control.is_none() {
            self.pause_control = self
                .lookup
                .as_mut()
                .and_then(|lookup| lookup.find_pause_control(PAUSE_CONTROL_NAME));
        }

        match self.pause_control.as_mut() {
            Some(control) => {
                control.bind_toggle();
                control.set_active(true);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Surface that records every text it was given
    #[derive(Clone, Default)]
    pub struct RecordingSurface {
        pub history: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingSurface {
        pub fn last(&self) -> String {
            self.history.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    impl MessageSurface for RecordingSurface {
        fn set_text(&mut self, text: &str) {
            self.history.lock().unwrap().push(text.to_string());
        }
    }

    /// Control that counts bindings; bindings replace, so `bound` stays at 1
    #[derive(Clone, Default)]
    pub struct CountingControl {
        pub bind_calls: Arc<Mutex<u32>>,
        pub bound: Arc<Mutex<u32>>,
        pub active: Arc<Mutex<bool>>,
    }

    impl PauseControl for CountingControl {
        fn bind_toggle(&mut self) {
            *self.bind_calls.lock().unwrap() += 1;
            *self.bound.lock().unwrap() = 1;
        }

        fn set_active(&mut self, active: bool) {
            *self.active.lock().unwrap() = active;
        }
    }

    pub struct NamedLookup {
        pub name: &'static str,
        pub control: CountingControl,
    }

    impl UiLookup for NamedLookup {
        fn find_pause_control(&mut self, name: &str) -> Option<Box<dyn PauseControl>> {
            (name == self.name).then(|| Box::new(self.control.clone()) as Box<dyn PauseControl>)
        }
    }
}
