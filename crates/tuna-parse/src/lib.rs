//! Text helpers shared by the platform adapters: timecodes, video-title
//! cleanup and artwork URL rewriting.

pub mod artwork;
pub mod timecode;
pub mod title;

pub use timecode::{format_timecode, parse_timecode, split_time_info};
pub use title::clean_video_title;
