//! Box-score statistics for one game.
//!
//! Field names serialize in camelCase; the box-score and scoreboard
//! renderers read this shape directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::Side;

/// Per-game batting line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatterGameStats {
    pub hits: u32,
    pub at_bats: u32,
    pub runs: u32,
    pub home_runs: u32,
    pub rbi: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub stolen_bases: u32,
    pub caught_stealing: u32,
    pub total_bases: u32,
    pub left_on_base: u32,
    pub grounded_into_double_play: u32,
    pub ejected: bool,
}

/// Per-game pitching line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitcherGameStats {
    pub outs_recorded: u32,
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub strikes_thrown: u32,
    pub pitch_count: u32,
    pub ejected: bool,
}

impl PitcherGameStats {
    /// Innings pitched in box-score notation, e.g. "5.2".
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.outs_recorded / 3, self.outs_recorded % 3)
    }

    /// Charge one run to this pitcher.
    pub fn charge_run(&mut self) {
        self.earned_runs += 1;
        self.runs += 1;
    }
}

/// One team's line on the scoreboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard {
    pub team_abbreviation: String,
    pub runs_by_inning: Vec<u32>,
    pub hits: u32,
    pub errors: u32,
    pub left_on_base: u32,

    /// Batters in order of first appearance
    pub batting_order: Vec<String>,

    /// Pitchers in order of first appearance
    pub pitching_order: Vec<String>,
}

impl Scoreboard {
    pub fn new(team_abbreviation: impl Into<String>) -> Self {
        Self {
            team_abbreviation: team_abbreviation.into(),
            ..Self::default()
        }
    }

    /// Grow the inning line so `inning` has a slot.
    pub fn ensure_inning(&mut self, inning: u32) {
        while self.runs_by_inning.len() < inning as usize {
            self.runs_by_inning.push(0);
        }
    }

    /// Add runs to an inning (1-indexed). Inning 0 is ignored.
    pub fn add_runs(&mut self, inning: u32, runs: u32) {
        let Some(slot) = (inning as usize).checked_sub(1) else {
            return;
        };
        self.ensure_inning(inning);
        self.runs_by_inning[slot] += runs;
    }

    pub fn total_runs(&self) -> u32 {
        self.runs_by_inning.iter().sum()
    }

    /// The pitcher most recently added to this team's staff.
    pub fn current_pitcher(&self) -> Option<&str> {
        self.pitching_order.last().map(String::as_str)
    }
}

/// Statistics for a whole game, owned by the caller and updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub away: Scoreboard,
    pub home: Scoreboard,
    pub batters: HashMap<String, BatterGameStats>,
    pub pitchers: HashMap<String, PitcherGameStats>,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new("AWAY", "HOME")
    }
}

impl GameStats {
    pub fn new(away_abbreviation: impl Into<String>, home_abbreviation: impl Into<String>) -> Self {
        Self {
            away: Scoreboard::new(away_abbreviation),
            home: Scoreboard::new(home_abbreviation),
            batters: HashMap::new(),
            pitchers: HashMap::new(),
        }
    }

    pub fn scoreboard(&self, side: Side) -> &Scoreboard {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn scoreboard_mut(&mut self, side: Side) -> &mut Scoreboard {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    /// Register a batter for `side` on first appearance.
    ///
    /// Returns true if the batter was new.
    pub fn register_batter(&mut self, side: Side, batter: &str) -> bool {
        if self.batters.contains_key(batter) {
            return false;
        }
        self.scoreboard_mut(side).batting_order.push(batter.to_string());
        self.batters
            .insert(batter.to_string(), BatterGameStats::default());
        true
    }

    /// Register a pitcher for the fielding `side` on first appearance.
    ///
    /// Returns true if the pitcher was new.
    pub fn register_pitcher(&mut self, side: Side, pitcher: &str) -> bool {
        if self.pitchers.contains_key(pitcher) {
            return false;
        }
        self.scoreboard_mut(side).pitching_order.push(pitcher.to_string());
        self.pitchers
            .insert(pitcher.to_string(), PitcherGameStats::default());
        true
    }

    pub fn batter(&self, name: &str) -> Option<&BatterGameStats> {
        self.batters.get(name)
    }

    pub fn batter_mut(&mut self, name: &str) -> Option<&mut BatterGameStats> {
        self.batters.get_mut(name)
    }

    pub fn pitcher(&self, name: &str) -> Option<&PitcherGameStats> {
        self.pitchers.get(name)
    }

    pub fn pitcher_mut(&mut self, name: &str) -> Option<&mut PitcherGameStats> {
        self.pitchers.get_mut(name)
    }

    /// Batting lines for a team in batting order.
    pub fn batting_lines(&self, side: Side) -> Vec<(&str, &BatterGameStats)> {
        self.scoreboard(side)
            .batting_order
            .iter()
            .filter_map(|name| self.batters.get(name).map(|s| (name.as_str(), s)))
            .collect()
    }

    /// Pitching lines for a team in the order pitchers appeared.
    pub fn pitching_lines(&self, side: Side) -> Vec<(&str, &PitcherGameStats)> {
        self.scoreboard(side)
            .pitching_order
            .iter()
            .filter_map(|name| self.pitchers.get(name).map(|s| (name.as_str(), s)))
            .collect()
    }

    /// Line score summary for display.
    pub fn to_json(&self) -> serde_json::Value {
        let line = |board: &Scoreboard| {
            serde_json::json!({
                "team": board.team_abbreviation,
                "innings": board.runs_by_inning,
                "runs": board.total_runs(),
                "hits": board.hits,
                "errors": board.errors,
                "left_on_base": board.left_on_base
            })
        };

        serde_json::json!({
            "away": line(&self.away),
            "home": line(&self.home)
        })
    }
}
