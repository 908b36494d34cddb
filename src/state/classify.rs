//! Play text classification.
//!
//! The feed carries no structured play type, so every semantic flag is
//! derived from the message text. Flags overlap on purpose: a single is
//! both a `hit` and a `strike`, a walk is both a `walk` and a `ball`.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::event::Event;

/// Phrase marking a runner placed on base at the start of a half-inning.
pub const STARTS_INNING_PHRASE: &str = "starts the inning on";
pub const STEALS_PHRASE: &str = "steals";
pub const CAUGHT_STEALING_PHRASE: &str = "is caught stealing";
pub const STEALS_HOME_PHRASE: &str = "steals home";
pub const OUT_AT_PHRASE: &str = "out at";

struct Patterns {
    starts_inning: Regex,
    single: Regex,
    double: Regex,
    triple: Regex,
    homer: Regex,
    walk: Regex,
    hbp: Regex,
    error: Regex,
    sac_fly: Regex,
    double_play: Regex,
    out: Regex,
    strikeout: Regex,
    fielders_choice: Regex,
    ball: Regex,
    strike: Regex,
    balk: Regex,
    caught_stealing: Regex,
    steals_home: Regex,
    steals: Regex,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid play pattern")
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        starts_inning: compile(r"(?i)starts the inning on"),
        single: compile(r"(?i)singles on"),
        double: compile(r"(?i)doubles on"),
        triple: compile(r"(?i)triples on"),
        homer: compile(r"(?i)(homers on|grand slam)"),
        walk: compile(r"(?i)^Ball 4. "),
        hbp: compile(r"(?i)hit by the pitch"),
        error: compile(r"(?i)(fielding error|throwing error)"),
        sac_fly: compile(r"(?i)sacrifice fly"),
        double_play: compile(r"(?i)double play"),
        out: compile(r"(?i)(grounds out|lines out|flies out|pops out)"),
        strikeout: compile(r"(?i)(struck out|strikes out)"),
        fielders_choice: compile(r"(?i)(fielder's choice|force out)"),
        ball: compile(r"^Ball"),
        strike: compile(r"^Strike, |^Foul ball|^Foul tip"),
        balk: compile(r"^Balk. "),
        caught_stealing: compile(r"(?i)caught stealing"),
        steals_home: compile(r"(?i)steals home"),
        steals: compile(r"(?i)\bsteals\b"),
    })
}

/// Check for a ROBO-UMP ejection naming `player`, with an optional trailing
/// requirement on the rest of the line.
fn ejection_matches(message: &str, player: Option<&str>, suffix: &str) -> bool {
    let Some(player) = player.filter(|p| !p.is_empty()) else {
        return false;
    };
    if !message.contains("ROBO-UMP ejected") {
        return false;
    }
    let pattern = format!("ROBO-UMP ejected.*{}{}", regex::escape(player), suffix);
    Regex::new(&pattern)
        .map(|re| re.is_match(message))
        .unwrap_or(false)
}

/// Kind of base hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HitKind {
    Single,
    Double,
    Triple,
}

impl HitKind {
    pub fn total_bases(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Primary outcome of a play, picked from the overlapping flags.
///
/// This is a summary for logging and display. The interpreter applies
/// effects from the individual flags, never from this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayOutcome {
    Hit(HitKind),
    HomeRun,
    Walk,
    HitByPitch,
    Error,
    Strikeout,
    FieldersChoice,
    Out { sac_fly: bool },
    DoublePlay,
    Balk,
    StolenBase,
    CaughtStealing,
    Unclassified,
}

/// Semantic flags for one play.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub starts_inning: bool,
    pub single: bool,
    pub double: bool,
    pub triple: bool,
    pub hit: bool,
    pub homer: bool,
    pub walk: bool,
    pub hbp: bool,
    pub error: bool,
    pub sac_fly: bool,
    pub double_play: bool,
    pub out: bool,
    pub strikeout: bool,
    pub fc: bool,
    pub ball: bool,
    pub strike: bool,
    pub balk: bool,
    pub steals: bool,
    pub caught_stealing: bool,
    pub steals_home: bool,
    pub inning_end: bool,
    pub score_count: u32,
    pub pitcher_ejected: bool,
    pub batter_ejected: bool,
}

impl Classification {
    /// Classify a message.
    ///
    /// `outs` is the event's out count; `None` marks the end of a
    /// half-inning. Batter and pitcher names are only used for ejections.
    pub fn classify(
        message: &str,
        batter: Option<&str>,
        pitcher: Option<&str>,
        outs: Option<u8>,
    ) -> Self {
        let p = patterns();

        let single = p.single.is_match(message);
        let double = p.double.is_match(message);
        let triple = p.triple.is_match(message);
        let hit = single || double || triple;
        let homer = p.homer.is_match(message);
        let walk = p.walk.is_match(message);
        let hbp = p.hbp.is_match(message);
        let error = p.error.is_match(message);
        let sac_fly = p.sac_fly.is_match(message);
        let double_play = p.double_play.is_match(message);
        let out = !sac_fly && p.out.is_match(message);
        let strikeout = p.strikeout.is_match(message);
        let fc = !error && p.fielders_choice.is_match(message);
        let ball = walk || hbp || p.ball.is_match(message);
        let strike = hit
            || homer
            || error
            || out
            || double_play
            || fc
            || strikeout
            || p.strike.is_match(message);
        let steals_home = p.steals_home.is_match(message);

        let score_count = message.matches("scores!").count() as u32
            + u32::from(steals_home)
            + u32::from(homer);

        Self {
            starts_inning: p.starts_inning.is_match(message),
            single,
            double,
            triple,
            hit,
            homer,
            walk,
            hbp,
            error,
            sac_fly,
            double_play,
            out,
            strikeout,
            fc,
            ball,
            strike,
            balk: p.balk.is_match(message),
            steals: p.steals.is_match(message),
            caught_stealing: p.caught_stealing.is_match(message),
            steals_home,
            inning_end: outs.is_none(),
            score_count,
            pitcher_ejected: ejection_matches(message, pitcher, ""),
            batter_ejected: ejection_matches(message, batter, ".*for.*Bench Player"),
        }
    }

    /// Classify an event using its own batter, pitcher and out count.
    pub fn of_event(event: &Event) -> Self {
        Self::classify(
            &event.message,
            event.batter_name(),
            event.pitcher_name(),
            event.outs,
        )
    }

    pub fn hit_kind(&self) -> Option<HitKind> {
        if self.single {
            Some(HitKind::Single)
        } else if self.double {
            Some(HitKind::Double)
        } else if self.triple {
            Some(HitKind::Triple)
        } else {
            None
        }
    }

    /// Whether the batter is charged an official at-bat.
    pub fn is_at_bat(&self) -> bool {
        self.hit
            || self.homer
            || self.out
            || self.strikeout
            || self.fc
            || self.double_play
            || self.error
    }

    /// Whether the batter ends up on base.
    pub fn batter_reaches(&self) -> bool {
        self.hit || self.walk || self.hbp || self.error || self.fc
    }

    /// Whether runs scored on this play count as runs batted in.
    pub fn credits_rbi(&self) -> bool {
        self.score_count > 0 && !self.error && !self.double_play && !self.steals_home && !self.balk
    }

    /// Outs credited to the pitcher for this play.
    pub fn outs_recorded(&self) -> u32 {
        let mut outs = 0;
        if self.out || self.strikeout || self.fc || self.sac_fly {
            outs += 1;
        }
        if self.caught_stealing {
            outs += 1;
        }
        if self.double_play {
            outs += 2;
        }
        outs
    }

    pub fn outcome(&self) -> PlayOutcome {
        if self.homer {
            PlayOutcome::HomeRun
        } else if let Some(kind) = self.hit_kind() {
            PlayOutcome::Hit(kind)
        } else if self.walk {
            PlayOutcome::Walk
        } else if self.hbp {
            PlayOutcome::HitByPitch
        } else if self.error {
            PlayOutcome::Error
        } else if self.double_play {
            PlayOutcome::DoublePlay
        } else if self.fc {
            PlayOutcome::FieldersChoice
        } else if self.strikeout {
            PlayOutcome::Strikeout
        } else if self.out || self.sac_fly {
            PlayOutcome::Out { sac_fly: self.sac_fly }
        } else if self.balk {
            PlayOutcome::Balk
        } else if self.caught_stealing {
            PlayOutcome::CaughtStealing
        } else if self.steals {
            PlayOutcome::StolenBase
        } else {
            PlayOutcome::Unclassified
        }
    }
}

/// Return every candidate that appears in `message` as `"<name> <phrase>"`.
pub fn extract_players<'a, S: AsRef<str>>(
    message: &str,
    candidates: &'a [S],
    phrase: &str,
) -> Vec<&'a str> {
    if !message.contains(phrase) {
        return Vec::new();
    }

    candidates
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| !name.is_empty() && message.contains(&format!("{} {}", name, phrase)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(message: &str) -> Classification {
        Classification::classify(message, None, None, Some(0))
    }

    #[test]
    fn test_single_is_hit_and_strike() {
        let c = classify("Jane Doe singles on a ground ball to shortstop.");
        assert!(c.single && c.hit && c.strike);
        assert!(!c.double && !c.triple && !c.homer && !c.ball);
        assert_eq!(c.hit_kind(), Some(HitKind::Single));
        assert_eq!(c.outcome(), PlayOutcome::Hit(HitKind::Single));
    }

    #[test]
    fn test_grand_slam_scores_batter_once() {
        let c = classify(
            "Jane Doe hits a grand slam! Al Bee scores! Cy Dee scores! Ed Eff scores!",
        );
        assert!(c.homer && c.strike);
        assert!(!c.hit);
        assert_eq!(c.score_count, 4);
    }

    #[test]
    fn test_walk_and_ball() {
        let c = classify("Ball 4. John Smith walks.");
        assert!(c.walk && c.ball);
        assert!(!c.strike);
        assert!(!c.is_at_bat());
        assert!(c.batter_reaches());

        let c = classify("Ball, 2-1.");
        assert!(c.ball && !c.walk);

        // Ball prefix is case sensitive, ball four is not
        let c = classify("ball 4. John Smith walks.");
        assert!(c.walk && c.ball);
        let c = classify("ball, 2-1.");
        assert!(!c.ball);
    }

    #[test]
    fn test_hit_by_pitch() {
        let c = classify("John Smith was hit by the pitch and advances to first base.");
        assert!(c.hbp && c.ball && c.batter_reaches());
        assert_eq!(c.outcome(), PlayOutcome::HitByPitch);
    }

    #[test]
    fn test_error_suppresses_fielders_choice() {
        let c = classify("John Smith reaches on a fielder's choice and a throwing error.");
        assert!(c.error);
        assert!(!c.fc);

        let c = classify("John Smith reaches on a fielder's choice. Jane Doe out at second.");
        assert!(c.fc && !c.error);
        assert_eq!(c.outs_recorded(), 1);
    }

    #[test]
    fn test_sac_fly_is_not_an_out_or_at_bat() {
        let c = classify("John Smith flies out on a sacrifice fly to center. Jane Doe scores!");
        assert!(c.sac_fly);
        assert!(!c.out);
        assert!(!c.is_at_bat());
        assert_eq!(c.outs_recorded(), 1);
        assert!(c.credits_rbi());
        assert_eq!(c.outcome(), PlayOutcome::Out { sac_fly: true });
    }

    #[test]
    fn test_strike_prefixes() {
        assert!(classify("Strike, swinging. 0-1.").strike);
        assert!(classify("Foul ball. 1-2.").strike);
        assert!(classify("Foul tip. 1-2.").strike);
        assert!(!classify("strike, looking.").strike);
        assert!(classify("John Smith strikes out swinging.").strikeout);
        assert!(classify("John Smith struck out looking.").strikeout);
    }

    #[test]
    fn test_steal_home_counts_a_run() {
        let c = classify("Jane Doe steals home!");
        assert!(c.steals_home && c.steals);
        assert_eq!(c.score_count, 1);
        assert!(!c.credits_rbi());
        assert_eq!(c.outcome(), PlayOutcome::StolenBase);
    }

    #[test]
    fn test_caught_stealing_records_out() {
        let c = classify("Jane Doe is caught stealing second.");
        assert!(c.caught_stealing);
        assert_eq!(c.outs_recorded(), 1);
        assert_eq!(c.outcome(), PlayOutcome::CaughtStealing);
    }

    #[test]
    fn test_double_play() {
        let c = classify("Jane Doe grounds into a double play, Bob Roe scores!");
        assert!(c.double_play && c.strike);
        assert_eq!(c.score_count, 1);
        assert_eq!(c.outs_recorded(), 2);
        assert!(!c.credits_rbi());
    }

    #[test]
    fn test_balk_denies_rbi() {
        let c = classify("Balk. Jane Doe scores!");
        assert!(c.balk);
        assert_eq!(c.score_count, 1);
        assert!(!c.credits_rbi());
    }

    #[test]
    fn test_inning_end_comes_from_outs() {
        let c = Classification::classify("Jane Doe grounds out to first.", None, None, None);
        assert!(c.inning_end && c.out);
    }

    #[test]
    fn test_ejections() {
        let c = Classification::classify(
            "ROBO-UMP ejected Sam Hurler for arguing balls and strikes.",
            Some("John Smith"),
            Some("Sam Hurler"),
            Some(1),
        );
        assert!(c.pitcher_ejected);
        assert!(!c.batter_ejected);

        let c = Classification::classify(
            "ROBO-UMP ejected John Smith for excessive celebration. \
             Replaced by Bench Player Kim Lee.",
            Some("John Smith"),
            Some("Sam Hurler"),
            Some(1),
        );
        assert!(c.batter_ejected);
        assert!(!c.pitcher_ejected);

        // Names are matched literally, not as patterns
        let c = Classification::classify(
            "ROBO-UMP ejected JXhn Smith for arguing.",
            None,
            Some("J.hn Smith"),
            Some(1),
        );
        assert!(!c.pitcher_ejected);
    }

    #[test]
    fn test_unrecognized_text_sets_nothing() {
        let c = classify("The crowd does the wave.");
        assert_eq!(c.outcome(), PlayOutcome::Unclassified);
        assert_eq!(c, Classification::default());
    }

    #[test]
    fn test_extract_players() {
        let roster = vec![
            "Jane Doe".to_string(),
            "John Smith".to_string(),
            "Bob Roe".to_string(),
        ];

        let found = extract_players(
            "Jane Doe steals second! Bob Roe steals third!",
            &roster,
            STEALS_PHRASE,
        );
        assert_eq!(found, vec!["Jane Doe", "Bob Roe"]);

        let found = extract_players("John Smith singles on a fly ball.", &roster, STEALS_PHRASE);
        assert!(found.is_empty());

        let found = extract_players(
            "Jane Doe and John Smith starts the inning on second.",
            &roster,
            STARTS_INNING_PHRASE,
        );
        assert_eq!(found, vec!["John Smith"]);
    }
}
