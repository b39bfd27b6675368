//! Time-bounded announcements: which ones are live, in what order they are
//! shown, and which ones a visitor has chosen to hide.

pub mod dismissal;
pub mod rotation;
pub mod window;

pub use dismissal::{CookieStore, DismissalSet, KeyValueStore, MemoryStore, DISMISSAL_KEY};
pub use rotation::{
    sort_for_display, BannerRotation, RotationRegistry, RotationTimer, DEFAULT_ROTATION_INTERVAL,
};
pub use window::{filter_active, is_active, ActiveWindow};
