pub mod countdown;
pub mod events;
pub mod format;
pub mod playback;
pub mod ticker;

pub use countdown::{CountdownClock, Mode, ModeKind, TimerState};
pub use events::{ClockEvent, RunState};
pub use playback::{PlaybackClock, PlaybackState, Track};
pub use ticker::Ticker;
