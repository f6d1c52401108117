//! Stage progress display
//!
//! A read-only projection of a ticket's stage for one viewer, the transient
//! fill highlight, and a ratatui widget that draws the track.

pub mod flash;
pub mod track;
pub mod widgets;

// Re-export commonly used types
pub use flash::FillFlash;
pub use track::{PositionStatus, StagePosition, StageTrackView};
pub use widgets::{marker_columns, render_to_lines, StageTrack, TRACK_HEIGHT};
