// ============================
// netguessr-backend-lib/src/scoring.rs
// ============================
//! Guess scoring tiers.
//!
//! The party core treats this as an external function: it awards whatever
//! points come out, it does not own the formula.

/// Points for an exact guess.
pub const POINTS_EXACT: i64 = 5;
/// Points for a guess within ±10% of the true value.
pub const POINTS_CLOSE: i64 = 3;
/// Points for a guess within ±50% of the true value.
pub const POINTS_OFF: i64 = 1;

/// Outcome of scoring one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessOutcome {
    pub statcode: &'static str,
    pub message: &'static str,
    pub points: i64,
}

/// Score `guess` against the true `net_worth`.
pub fn score_guess(guess: i64, net_worth: i64) -> GuessOutcome {
    let nw = net_worth as f64;
    let g = guess as f64;

    if guess == net_worth {
        GuessOutcome {
            statcode: "onthemoney",
            message: "You got it exactly right!",
            points: POINTS_EXACT,
        }
    } else if g >= nw * 0.9 && g <= nw * 1.1 {
        GuessOutcome {
            statcode: "closeenough",
            message: "You were close!",
            points: POINTS_CLOSE,
        }
    } else if g >= nw * 0.5 && g <= nw * 1.5 {
        GuessOutcome {
            statcode: "off",
            message: "You were off!",
            points: POINTS_OFF,
        }
    } else {
        GuessOutcome {
            statcode: "wayoff",
            message: "You were way off!",
            points: 0,
        }
    }
}
