//! Play-by-play feed records.
//!
//! Events are produced upstream and are read-only here. Identity fields
//! arrive either as a bare name or as an object carrying a `name`, so they
//! are normalized through [`PlayerRef`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which team is at bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    /// Map the feed's `inning_side` field (0 = away batting).
    pub fn from_inning_side(inning_side: u8) -> Self {
        if inning_side == 0 {
            Self::Away
        } else {
            Self::Home
        }
    }

    /// The team in the field while this side bats.
    pub fn opponent(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Away => "away",
            Self::Home => "home",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A player identity as it appears in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerRef {
    Name(String),
    Object { name: String },
}

impl PlayerRef {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Object { name } => name,
        }
    }
}

impl From<&str> for PlayerRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// A single play-by-play record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic sequence index
    pub index: u64,

    /// Free-text description of the play
    pub message: String,

    /// Inning number (1-indexed)
    #[serde(default)]
    pub inning: u32,

    /// 0 when the away team bats, 1 when the home team bats
    #[serde(default)]
    pub inning_side: u8,

    /// Outs in the half-inning; absent when the half-inning just ended
    #[serde(default)]
    pub outs: Option<u8>,

    #[serde(default)]
    pub batter: Option<PlayerRef>,

    #[serde(default)]
    pub pitcher: Option<PlayerRef>,

    #[serde(default)]
    pub on_deck: Option<PlayerRef>,

    /// Base occupancy after this event, per the upstream feed
    #[serde(default)]
    pub on_1b: bool,
    #[serde(default)]
    pub on_2b: bool,
    #[serde(default)]
    pub on_3b: bool,
}

impl Event {
    /// Create an event with no players attached and empty bases.
    pub fn new(index: u64, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
            inning: 1,
            inning_side: 0,
            outs: Some(0),
            batter: None,
            pitcher: None,
            on_deck: None,
            on_1b: false,
            on_2b: false,
            on_3b: false,
        }
    }

    pub fn with_inning(mut self, inning: u32, side: Side) -> Self {
        self.inning = inning;
        self.inning_side = match side {
            Side::Away => 0,
            Side::Home => 1,
        };
        self
    }

    pub fn with_batter(mut self, batter: &str) -> Self {
        self.batter = Some(batter.into());
        self
    }

    pub fn with_pitcher(mut self, pitcher: &str) -> Self {
        self.pitcher = Some(pitcher.into());
        self
    }

    pub fn with_outs(mut self, outs: Option<u8>) -> Self {
        self.outs = outs;
        self
    }

    pub fn with_bases(mut self, on_1b: bool, on_2b: bool, on_3b: bool) -> Self {
        self.on_1b = on_1b;
        self.on_2b = on_2b;
        self.on_3b = on_3b;
        self
    }

    /// The side currently at bat.
    pub fn batting_side(&self) -> Side {
        Side::from_inning_side(self.inning_side)
    }

    pub fn batter_name(&self) -> Option<&str> {
        self.batter.as_ref().map(PlayerRef::name)
    }

    pub fn pitcher_name(&self) -> Option<&str> {
        self.pitcher.as_ref().map(PlayerRef::name)
    }

    pub fn on_deck_name(&self) -> Option<&str> {
        self.on_deck.as_ref().map(PlayerRef::name)
    }

    /// The feed signals a finished half-inning by omitting the out count.
    pub fn ends_half_inning(&self) -> bool {
        self.outs.is_none()
    }
}
