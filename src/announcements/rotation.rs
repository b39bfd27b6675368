use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, Weak};
use std::time::Duration;

use rand::RngCore;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use super::dismissal::DismissalSet;
use crate::domain::Announcement;

/// Default time each banner stays on screen before the next one replaces it.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(10);

/// Highest priority first; within a priority, the most recently started first.
pub fn sort_for_display(announcements: &mut [Announcement]) {
    announcements.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.start_date.cmp(&a.start_date))
    });
}

/// Which announcement a banner shows, given candidates already sorted with
/// [`sort_for_display`] and the visitor's dismissal set.
pub struct BannerRotation {
    candidates: Vec<Announcement>,
    dismissals: DismissalSet,
    index: Option<usize>,
    dismissed: bool,
}

impl BannerRotation {
    pub fn new(candidates: Vec<Announcement>, dismissals: DismissalSet) -> Self {
        let mut rotation = Self {
            candidates,
            dismissals,
            index: None,
            dismissed: false,
        };
        rotation.index = rotation.next_eligible_from(0);
        rotation
    }

    pub fn current(&self) -> Option<&Announcement> {
        if self.dismissed {
            return None;
        }
        self.index.map(|i| &self.candidates[i])
    }

    pub fn eligible_count(&self) -> usize {
        (0..self.candidates.len())
            .filter(|&i| self.is_eligible(i))
            .count()
    }

    /// True while there is something to cycle through.
    pub fn is_rotating(&self) -> bool {
        !self.dismissed && self.eligible_count() > 1
    }

    /// Moves to the next eligible candidate, wrapping after the last one.
    pub fn advance(&mut self) -> Option<&Announcement> {
        if self.dismissed {
            return None;
        }
        if let Some(i) = self.index {
            self.index = self.next_eligible_from(i + 1);
        }
        self.current()
    }

    /// Positions the rotation on the eligible candidate following `id`.
    /// Unknown ids leave the initial selection in place.
    pub fn resume_after(&mut self, id: &str) -> Option<&Announcement> {
        if self.dismissed {
            return None;
        }
        match self.candidates.iter().position(|a| a.dismissal_key() == id) {
            Some(position) => {
                self.index = self.next_eligible_from(position + 1);
            }
            None => {
                self.index = self.next_eligible_from(0);
            }
        }
        self.current()
    }

    /// Hides the current announcement for good and stops the rotation.
    /// Returns the dismissed id.
    pub fn dismiss(&mut self) -> Option<String> {
        let id = self.current()?.dismissal_key();
        self.dismissals.dismiss(&id);
        self.dismissed = true;
        tracing::debug!("Announcement {} dismissed", id);
        Some(id)
    }

    /// Records a dismissal made elsewhere (another request, another tab).
    /// Dismissing what is on screen behaves like [`BannerRotation::dismiss`];
    /// any other id is only skipped from now on. Returns true when the
    /// banner was hidden.
    pub fn dismiss_id(&mut self, id: &str) -> bool {
        if self.current().map(|a| a.dismissal_key() == id).unwrap_or(false) {
            self.dismiss();
            return true;
        }
        self.dismissals.dismiss(id);
        false
    }

    fn is_eligible(&self, i: usize) -> bool {
        !self.dismissals.contains(&self.candidates[i].dismissal_key())
    }

    fn next_eligible_from(&self, start: usize) -> Option<usize> {
        let len = self.candidates.len();
        (0..len)
            .map(|offset| (start + offset) % len)
            .find(|&i| self.is_eligible(i))
    }
}

/// Drives a [`BannerRotation`] on a fixed interval from a background task and
/// publishes what should be on screen. Dropping the timer stops the task.
pub struct RotationTimer {
    rotation: Arc<Mutex<BannerRotation>>,
    sender: Arc<watch::Sender<Option<Announcement>>>,
    cancel: CancellationToken,
}

impl RotationTimer {
    pub fn spawn(rotation: BannerRotation, interval: Duration) -> Self {
        let rotating = rotation.is_rotating();
        let (sender, _) = watch::channel(rotation.current().cloned());
        let sender = Arc::new(sender);
        let rotation = Arc::new(Mutex::new(rotation));
        let cancel = CancellationToken::new();

        if rotating {
            tokio::spawn(run_rotation(
                rotation.clone(),
                sender.clone(),
                interval,
                cancel.clone(),
            ));
        }

        Self {
            rotation,
            sender,
            cancel,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Announcement>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<Announcement> {
        self.sender.borrow().clone()
    }

    /// Dismisses whatever is showing, stops the timer and clears the display.
    pub async fn dismiss(&self) -> Option<String> {
        let id = self.rotation.lock().await.dismiss();
        self.stop();
        self.sender.send_replace(None);
        id
    }

    /// Applies a dismissal of `id` to the running rotation. The banner is
    /// cleared when `id` is the one showing.
    pub async fn dismiss_id(&self, id: &str) {
        let hidden = self.rotation.lock().await.dismiss_id(id);
        if hidden {
            self.stop();
            self.sender.send_replace(None);
        }
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for RotationTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Open banner streams by token, so a dismissal posted on another request
/// reaches the timer of the connection that shows the banner. Entries die
/// with their stream.
#[derive(Default)]
pub struct RotationRegistry {
    timers: StdMutex<HashMap<String, Weak<RotationTimer>>>,
}

impl RotationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a live timer and returns the token that addresses it.
    pub fn register(&self, timer: &Arc<RotationTimer>) -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers.retain(|_, timer| timer.strong_count() > 0);
        timers.insert(token.clone(), Arc::downgrade(timer));
        token
    }

    /// Forwards a dismissal to the stream behind `token`. Returns false when
    /// that stream is gone.
    pub async fn dismiss(&self, token: &str, id: &str) -> bool {
        let timer = {
            let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
            timers.retain(|_, timer| timer.strong_count() > 0);
            timers.get(token).and_then(Weak::upgrade)
        };

        match timer {
            Some(timer) => {
                timer.dismiss_id(id).await;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers.retain(|_, timer| timer.strong_count() > 0);
        timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

async fn run_rotation(
    rotation: Arc<Mutex<BannerRotation>>,
    sender: Arc<watch::Sender<Option<Announcement>>>,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; the current banner is already published.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let mut rotation = rotation.lock().await;
                if !rotation.is_rotating() {
                    break;
                }
                let next = rotation.advance().cloned();
                sender.send_replace(next);
            }
        }
    }

    tracing::debug!("Banner rotation stopped");
}
