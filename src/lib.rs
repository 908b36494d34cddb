//! Basepath State Library
//!
//! This crate turns a live play-by-play feed of a simulated baseball game
//! into structured game state.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Play Classification** - Derives semantic flags (hit, walk, error,
//!   runs scored, half-inning over) from each event's free text.
//!
//! - **Baserunner Tracking** - An ordered queue of runners, front first to
//!   score, and the first/second/third snapshot shown to viewers.
//!
//! - **Box Score Statistics** - Scoreboards, batting lines and pitching
//!   lines updated in place as events arrive.
//!
//! - **Live Sessions** - Follow one game's feed and skip events that were
//!   already applied.
//!
//! # Design Principles
//!
//! 1. **Never halt the feed** - Unrecognized text is a no-op and untracked
//!    runners show as "Unknown". Nothing in the interpreter returns an error.
//!
//! 2. **Statistics are borrowed** - The caller owns [`GameStats`] and lends
//!    it to each call. Passing `None` tracks baserunners only.
//!
//! 3. **Strict ordering** - Events must be applied once each, in sequence
//!    index order.
//!
//! 4. **Serialization-ready** - Statistics keep the camelCase field names
//!    the box-score renderers read.
//!
//! # Example
//!
//! ```rust
//! use basepath_state::state::{process_event, BaseQueue, Event, GameStats, Side};
//!
//! let roster = vec!["Jane Doe".to_string(), "John Smith".to_string()];
//! let mut stats = GameStats::new("AWY", "HOM");
//!
//! let event = Event::new(1, "Ball 4. John Smith walks.")
//!     .with_inning(1, Side::Away)
//!     .with_batter("John Smith")
//!     .with_pitcher("Sam Hurler")
//!     .with_bases(true, false, false);
//!
//! let result = process_event(&event, &roster, BaseQueue::new(), Some(&mut stats));
//!
//! assert_eq!(result.bases.first.as_deref(), Some("John Smith"));
//! assert_eq!(stats.batter("John Smith").unwrap().walks, 1);
//! assert_eq!(stats.batter("John Smith").unwrap().at_bats, 0);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
