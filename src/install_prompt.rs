//! Deferred install prompt handling.
//!
//! The host environment may offer to install the application; the offer
//! arrives ahead of any user gesture and must be held until the
//! application decides to show it. `InstallPrompt` owns that pending
//! signal explicitly: capture stores it, prompting consumes it, and a
//! consumed or cleared signal can never be triggered again.

/// How the host environment is currently displaying the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Ordinary browser-style display.
    #[default]
    Browser,
    /// Installed, running as a standalone application.
    Standalone,
}

/// The user's decision on an install prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

/// A deferred install offer captured from the host environment.
///
/// `show` takes the offer by value: an offer can be presented to the
/// user at most once.
pub trait InstallOffer: Send {
    fn show(self: Box<Self>) -> InstallOutcome;
}

/// Holds at most one pending install offer until consumed or cleared.
#[derive(Default)]
pub struct InstallPrompt {
    signal: Option<Box<dyn InstallOffer>>,
    display_mode: DisplayMode,
}

impl InstallPrompt {
    pub fn new(display_mode: DisplayMode) -> Self {
        Self {
            signal: None,
            display_mode,
        }
    }

    /// Capture a deferred offer. A newer offer replaces an older one;
    /// the replaced offer is dropped unshown.
    pub fn capture(&mut self, offer: Box<dyn InstallOffer>) {
        self.signal = Some(offer);
    }

    pub fn has_signal(&self) -> bool {
        self.signal.is_some()
    }

    /// Drop the pending offer without showing it.
    pub fn clear(&mut self) {
        self.signal = None;
    }

    /// Show the pending prompt, if any, and report whether the user
    /// accepted. Consumes the signal either way; with no signal pending
    /// this is a no-op returning false.
    pub fn prompt(&mut self) -> bool {
        match self.signal.take() {
            Some(offer) => offer.show() == InstallOutcome::Accepted,
            None => false,
        }
    }

    /// Whether the application is already running installed/standalone.
    pub fn is_standalone(&self) -> bool {
        self.display_mode == DisplayMode::Standalone
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }
}
