//! Baserunner tracking.
//!
//! The queue holds runners in the order they reached base, so the front is
//! the runner closest to scoring. A [`Bases`] snapshot is derived from the
//! queue together with the feed's occupancy flags.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::event::Event;

/// Placeholder shown for an occupied base with no tracked runner.
pub const UNKNOWN_RUNNER: &str = "Unknown";

/// At most three runners can be on base.
pub const MAX_BASERUNNERS: usize = 3;

/// A runner on the base paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baserunner {
    pub runner: String,

    /// Pitcher charged with this runner reaching base
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitcher: Option<String>,
}

impl Baserunner {
    pub fn new(runner: impl Into<String>) -> Self {
        Self {
            runner: runner.into(),
            pitcher: None,
        }
    }

    pub fn charged_to(mut self, pitcher: Option<String>) -> Self {
        self.pitcher = pitcher;
        self
    }

    /// Whether this runner is a real, tracked player.
    pub fn is_known(&self) -> bool {
        !self.runner.is_empty() && self.runner != UNKNOWN_RUNNER
    }
}

/// Runners in arrival order, front first to score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseQueue {
    runners: VecDeque<Baserunner>,
}

impl BaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Baserunner> {
        self.runners.iter()
    }

    /// Runner at queue position `index` (0 = next to score).
    pub fn get(&self, index: usize) -> Option<&Baserunner> {
        self.runners.get(index)
    }

    /// Names of all runners, front first.
    pub fn names(&self) -> Vec<String> {
        self.runners.iter().map(|r| r.runner.clone()).collect()
    }

    pub fn push(&mut self, runner: Baserunner) {
        self.runners.push_back(runner);
    }

    /// Remove up to `count` runners from the front (they scored).
    pub fn score_front(&mut self, count: usize) -> Vec<Baserunner> {
        let count = count.min(self.runners.len());
        self.runners.drain(..count).collect()
    }

    /// Remove the first runner with this name.
    pub fn remove_named(&mut self, name: &str) -> Option<Baserunner> {
        let index = self.runners.iter().position(|r| r.runner == name)?;
        self.runners.remove(index)
    }

    /// Drop the oldest runners until the queue fits on the bases.
    pub fn enforce_capacity(&mut self) -> Vec<Baserunner> {
        let excess = self.runners.len().saturating_sub(MAX_BASERUNNERS);
        self.runners.drain(..excess).collect()
    }

    pub fn clear(&mut self) {
        self.runners.clear();
    }
}

impl FromIterator<Baserunner> for BaseQueue {
    fn from_iter<I: IntoIterator<Item = Baserunner>>(iter: I) -> Self {
        Self {
            runners: iter.into_iter().collect(),
        }
    }
}

/// Who is on each base.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    pub first: Option<String>,
    pub second: Option<String>,
    pub third: Option<String>,
}

impl Bases {
    /// Fill occupied bases from third back to first, taking runners from the
    /// front of the queue. Occupied bases left over show [`UNKNOWN_RUNNER`].
    pub fn assign(queue: &BaseQueue, on_1b: bool, on_2b: bool, on_3b: bool) -> Self {
        let mut runners = queue.iter();
        let mut next = |occupied: bool| {
            occupied.then(|| {
                runners
                    .next()
                    .map(|r| r.runner.clone())
                    .unwrap_or_else(|| UNKNOWN_RUNNER.to_string())
            })
        };

        let third = next(on_3b);
        let second = next(on_2b);
        let first = next(on_1b);

        Self {
            first,
            second,
            third,
        }
    }

    /// Snapshot for an event's occupancy flags.
    pub fn for_event(event: &Event, queue: &BaseQueue) -> Self {
        Self::assign(queue, event.on_1b, event.on_2b, event.on_3b)
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none() && self.third.is_none()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "first": self.first,
            "second": self.second,
            "third": self.third
        })
    }
}
