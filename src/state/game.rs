//! Live game session.
//!
//! Owns the baserunner queue, the latest bases snapshot and the box-score
//! statistics for one game, and feeds them events in sequence order.
//! Refetching the whole event log is safe: anything at or below the last
//! applied index is skipped.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::bases::{BaseQueue, Bases};
use super::event::Event;
use super::interpreter::process_event;
use super::stats::GameStats;

/// Feed errors.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("event {index} was already applied (last applied index is {last})")]
    AlreadyApplied { index: u64, last: u64 },

    #[error("malformed event feed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Decode a JSON array of feed events.
pub fn decode_events(json: &str) -> Result<Vec<Event>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// State for one game being followed live.
#[derive(Debug, Clone)]
pub struct LiveGame {
    /// Game identifier
    pub id: String,

    /// Both teams' players as "First Last"
    roster: Vec<String>,

    queue: BaseQueue,

    bases: Bases,

    stats: GameStats,

    /// Sequence index of the last applied event
    last_index: Option<u64>,

    /// When the session was created
    pub created_at: DateTime<Utc>,

    /// When an event was last applied
    pub updated_at: Option<DateTime<Utc>>,
}

impl LiveGame {
    /// Create a session with empty bases.
    pub fn new(id: impl Into<String>, roster: Vec<String>, stats: GameStats) -> Self {
        Self {
            id: id.into(),
            roster,
            queue: BaseQueue::new(),
            bases: Bases::default(),
            stats,
            last_index: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn is_new(&self, event: &Event) -> bool {
        self.last_index.map_or(true, |last| event.index > last)
    }

    fn apply_unchecked(&mut self, event: &Event) {
        let queue = std::mem::take(&mut self.queue);
        let result = process_event(event, &self.roster, queue, Some(&mut self.stats));
        self.queue = result.base_queue;
        self.bases = result.bases;
        self.last_index = Some(event.index);
        self.updated_at = Some(Utc::now());
    }

    /// Apply one event, rejecting anything already applied.
    pub fn apply(&mut self, event: &Event) -> Result<&Bases, FeedError> {
        if let Some(last) = self.last_index.filter(|_| !self.is_new(event)) {
            return Err(FeedError::AlreadyApplied {
                index: event.index,
                last,
            });
        }
        self.apply_unchecked(event);
        Ok(&self.bases)
    }

    /// Apply every event newer than the last applied one, in order.
    ///
    /// Events already applied before this call are skipped quietly. An
    /// event that falls behind one applied earlier in the same batch means
    /// the feed went backwards; it is skipped with a warning.
    ///
    /// Returns how many events were applied.
    pub fn ingest(&mut self, events: &[Event]) -> usize {
        let mut applied = 0;
        for event in events {
            if !self.is_new(event) {
                if applied > 0 {
                    warn!(
                        game = %self.id,
                        index = event.index,
                        last_index = ?self.last_index,
                        "feed went backwards; skipping event"
                    );
                } else {
                    debug!(game = %self.id, index = event.index, "skipping applied event");
                }
                continue;
            }
            self.apply_unchecked(event);
            applied += 1;
        }

        if applied > 0 {
            info!(
                game = %self.id,
                applied,
                last_index = ?self.last_index,
                "ingested events"
            );
        }
        applied
    }

    pub fn bases(&self) -> &Bases {
        &self.bases
    }

    pub fn queue(&self) -> &BaseQueue {
        &self.queue
    }

    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn last_index(&self) -> Option<u64> {
        self.last_index
    }

    /// Hand the statistics back to the caller.
    pub fn into_stats(self) -> GameStats {
        self.stats
    }

    /// Snapshot for display.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "game_id": self.id,
            "last_index": self.last_index,
            "bases": self.bases.to_json(),
            "runners": self.queue.names(),
            "line_score": self.stats.to_json(),
            "created_at": self.created_at.to_rfc3339(),
            "updated_at": self.updated_at.map(|t| t.to_rfc3339())
        })
    }
}
