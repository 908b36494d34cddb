//! Play-by-play interpreter.
//!
//! Applies one classified event to the baserunner queue and, when supplied,
//! to the game's statistics. The steps run in a fixed order because each
//! one reads state left behind by the previous one:
//!
//! ```text
//!  classify ─▶ register players ─▶ credit runs ─▶ batting/pitching lines
//!                                                          │
//!  bases ◀─ clear ◀─ left on base ◀─ retire runners ◀─ steals ◀─ advance queue
//! ```
//!
//! Nothing here fails. Text that matches no pattern leaves the state
//! untouched apart from the generic fields, and an occupied base with no
//! tracked runner is reported as [`UNKNOWN_RUNNER`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::bases::{BaseQueue, Baserunner, Bases, UNKNOWN_RUNNER};
use super::classify::{
    extract_players, Classification, CAUGHT_STEALING_PHRASE, OUT_AT_PHRASE,
    STARTS_INNING_PHRASE, STEALS_HOME_PHRASE, STEALS_PHRASE,
};
use super::event::{Event, Side};
use super::stats::{BatterGameStats, GameStats, PitcherGameStats};

/// Result of applying one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedEvent {
    pub bases: Bases,
    pub base_queue: BaseQueue,
}

/// Apply one event.
///
/// `players` is the roster of both teams as "First Last" names. The queue
/// is consumed and returned updated. When `stats` is `None` only baserunners
/// are tracked.
pub fn process_event<S: AsRef<str>>(
    event: &Event,
    players: &[S],
    mut queue: BaseQueue,
    mut stats: Option<&mut GameStats>,
) -> ProcessedEvent {
    let message = event.message.as_str();
    let side = event.batting_side();
    let batter = event.batter_name().filter(|b| !b.is_empty());
    let mut pitcher = event
        .pitcher_name()
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    let play = Classification::of_event(event);
    debug!(
        index = event.index,
        inning = event.inning,
        side = %side,
        outcome = ?play.outcome(),
        scored = play.score_count,
        "processing play"
    );

    if let Some(stats) = stats.as_deref_mut() {
        pitcher = register_players(stats, event, &play, batter, pitcher);
        credit_runs(stats, event, &play, &queue, pitcher.as_deref());
        record_play(stats, side, &play, message, batter, pitcher.as_deref());
    }

    queue.score_front(play.score_count as usize);

    if play.starts_inning {
        for runner in extract_players(message, players, STARTS_INNING_PHRASE) {
            queue.push(Baserunner::new(runner));
        }
    }

    if play.batter_reaches() {
        // Runners who reach on an error are not charged to the pitcher.
        let charged = if play.error { None } else { pitcher.clone() };
        queue.push(Baserunner::new(batter.unwrap_or(UNKNOWN_RUNNER)).charged_to(charged));
    }

    if let Some(stats) = stats.as_deref_mut() {
        credit_steals(stats, message, players);
    }

    retire_runners(&mut queue, message, players);

    let dropped = queue.enforce_capacity();
    if !dropped.is_empty() {
        warn!(
            index = event.index,
            dropped = ?dropped.iter().map(|r| r.runner.as_str()).collect::<Vec<_>>(),
            "more runners than bases; dropping oldest"
        );
    }

    if play.inning_end {
        if let Some(stats) = stats.as_deref_mut() {
            strand_runners(stats, side, &queue);
        }
    }

    if play.homer || play.inning_end {
        queue.clear();
    }

    let bases = Bases::for_event(event, &queue);
    trace!(index = event.index, ?bases, "bases updated");

    ProcessedEvent {
        bases,
        base_queue: queue,
    }
}

/// Add first-time batters and pitchers, returning the pitcher of record.
///
/// An ejection line may not name the replacement, so an ejected pitcher is
/// resolved to the fielding team's most recent pitcher.
fn register_players(
    stats: &mut GameStats,
    event: &Event,
    play: &Classification,
    batter: Option<&str>,
    pitcher: Option<String>,
) -> Option<String> {
    let side = event.batting_side();
    let fielding = side.opponent();

    stats.scoreboard_mut(side).ensure_inning(event.inning);

    if let Some(batter) = batter {
        if stats.register_batter(side, batter) {
            debug!(batter, side = %side, "new batter");
        }
    }

    let pitcher = if play.pitcher_ejected {
        stats
            .scoreboard(fielding)
            .current_pitcher()
            .map(str::to_string)
    } else {
        pitcher
    };

    if let Some(name) = pitcher.as_deref() {
        if stats.register_pitcher(fielding, name) {
            debug!(pitcher = name, side = %fielding, "new pitcher");
        }
    }

    pitcher
}

/// Credit runs to the runners at the front of the queue and charge them to
/// a pitcher.
///
/// A runner without a recorded pitcher is charged to the current one.
fn credit_runs(
    stats: &mut GameStats,
    event: &Event,
    play: &Classification,
    queue: &BaseQueue,
    pitcher: Option<&str>,
) {
    for runner in queue.iter().take(play.score_count as usize) {
        if !runner.is_known() {
            continue;
        }

        match stats.batter_mut(&runner.runner) {
            Some(line) => line.runs += 1,
            None => debug!(runner = %runner.runner, "scoring runner has no batting line"),
        }

        let charged = runner.pitcher.as_deref().or(pitcher);
        match charged.and_then(|name| stats.pitchers.get_mut(name)) {
            Some(line) => line.charge_run(),
            None => debug!(runner = %runner.runner, "run not charged to any pitcher"),
        }
    }

    if play.score_count > 0 {
        stats
            .scoreboard_mut(event.batting_side())
            .add_runs(event.inning, play.score_count);
    }
}

/// Team, batter and pitcher counters for the play itself.
fn record_play(
    stats: &mut GameStats,
    side: Side,
    play: &Classification,
    message: &str,
    batter: Option<&str>,
    pitcher: Option<&str>,
) {
    if play.hit || play.homer {
        stats.scoreboard_mut(side).hits += 1;
    } else if play.error {
        stats.scoreboard_mut(side.opponent()).errors += 1;
    }

    if let Some(name) = batter {
        if let Some(line) = stats.batter_mut(name) {
            record_batting(line, play, message, name);
        }
    }

    if let Some(name) = pitcher {
        if let Some(line) = stats.pitcher_mut(name) {
            record_pitching(line, play);
        }
    }
}

fn record_batting(line: &mut BatterGameStats, play: &Classification, message: &str, batter: &str) {
    if play.is_at_bat() {
        line.at_bats += 1;
    }
    if play.hit || play.homer {
        line.hits += 1;
    }
    if play.homer {
        line.home_runs += 1;
        line.runs += 1;
        line.total_bases += 4;
    }
    if play.single {
        line.total_bases += 1;
    }
    if play.double {
        line.total_bases += 2;
    }
    if play.triple {
        line.total_bases += 3;
    }
    if play.credits_rbi() {
        line.rbi += play.score_count;
    }
    if play.strikeout {
        line.strikeouts += 1;
    }
    if play.walk || play.hbp {
        line.walks += 1;
    }
    if play.double_play && message.contains(&format!("{} grounds into", batter)) {
        line.grounded_into_double_play += 1;
    }
    if play.batter_ejected {
        line.ejected = true;
    }
}

fn record_pitching(line: &mut PitcherGameStats, play: &Classification) {
    if play.strike {
        line.strikes_thrown += 1;
    }
    if play.strike || play.ball {
        line.pitch_count += 1;
    }
    if play.hit || play.homer {
        line.hits += 1;
    }
    // The batter's own run; runners ahead are charged in credit_runs.
    if play.homer {
        line.home_runs += 1;
        line.charge_run();
    }
    line.outs_recorded += play.outs_recorded();
    if play.strikeout {
        line.strikeouts += 1;
    }
    if play.walk {
        line.walks += 1;
    }
    if play.pitcher_ejected {
        line.ejected = true;
    }
}

/// Stolen bases and caught stealing for every player named in the play.
fn credit_steals<S: AsRef<str>>(stats: &mut GameStats, message: &str, players: &[S]) {
    for name in extract_players(message, players, STEALS_PHRASE) {
        if let Some(line) = stats.batter_mut(name) {
            line.stolen_bases += 1;
        }
    }
    for name in extract_players(message, players, CAUGHT_STEALING_PHRASE) {
        if let Some(line) = stats.batter_mut(name) {
            line.caught_stealing += 1;
        }
    }
}

/// Take runners put out on the bases, caught stealing, or stealing home off
/// the queue. One entry per named player.
fn retire_runners<S: AsRef<str>>(queue: &mut BaseQueue, message: &str, players: &[S]) {
    let mut retired: Vec<&str> = Vec::new();
    for phrase in [OUT_AT_PHRASE, CAUGHT_STEALING_PHRASE, STEALS_HOME_PHRASE] {
        for name in extract_players(message, players, phrase) {
            if !retired.contains(&name) {
                retired.push(name);
            }
        }
    }

    for name in retired {
        if queue.remove_named(name).is_some() {
            trace!(runner = name, "runner retired");
        }
    }
}

/// Charge the runners still on base when the half-inning ends.
fn strand_runners(stats: &mut GameStats, side: Side, queue: &BaseQueue) {
    stats.scoreboard_mut(side).left_on_base += queue.len() as u32;
    for runner in queue.iter().filter(|r| r.is_known()) {
        if let Some(line) = stats.batter_mut(&runner.runner) {
            line.left_on_base += 1;
        }
    }
}
