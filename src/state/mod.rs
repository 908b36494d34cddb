//! Live game state for play-by-play feeds.
//!
//! This module provides the core state types:
//!
//! - `event` - Feed records and player identities
//! - `classify` - Semantic flags derived from play text
//! - `bases` - Baserunner queue and bases snapshot
//! - `stats` - Scoreboards and batting/pitching lines
//! - `interpreter` - Applies one event to the queue and statistics
//! - `game` - Session that follows one game's feed in order
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                            LiveGame                               │
//! │                                                                   │
//! │   events ──▶ index > last? ──▶ process_event ──▶ Bases snapshot   │
//! │                                     │                             │
//! │                   ┌─────────────────┼──────────────────┐          │
//! │                   ▼                 ▼                  ▼          │
//! │            Classification       BaseQueue          GameStats      │
//! │            (pure, per event)   (≤ 3 runners)    (mutated in place)│
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use basepath_state::state::{process_event, BaseQueue, Event, GameStats};
//!
//! let mut stats = GameStats::new("AWY", "HOM");
//! let mut queue = BaseQueue::new();
//!
//! for event in &events {
//!     let result = process_event(event, &roster, queue, Some(&mut stats));
//!     queue = result.base_queue;
//!     render(&result.bases);
//! }
//! ```

pub mod bases;
pub mod classify;
pub mod event;
pub mod game;
pub mod interpreter;
pub mod stats;

// Re-export commonly used types
pub use bases::{BaseQueue, Baserunner, Bases, MAX_BASERUNNERS, UNKNOWN_RUNNER};
pub use classify::{extract_players, Classification, HitKind, PlayOutcome};
pub use event::{Event, PlayerRef, Side};
pub use game::{decode_events, FeedError, LiveGame};
pub use interpreter::{process_event, ProcessedEvent};
pub use stats::{BatterGameStats, GameStats, PitcherGameStats, Scoreboard};
