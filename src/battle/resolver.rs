//! Deterministic, pure-data fight resolution
//!
//! Two combatant snapshots go in, the id of the survivor comes out. The
//! resolver keeps its own running hit-point totals and never touches the
//! caller's records, so independent fights can be resolved from any thread.

use rocket::serde::{Deserialize, Serialize};
use rocket_okapi::JsonSchema;

/// A participant snapshot handed to the resolver.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct Combatant {
    pub id: usize,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub hit_points: i64,
}

/// Which of the two combatants passed to the resolver.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Outcome of a finished fight.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(crate = "rocket::serde")]
pub struct BattleReport {
    pub winner: usize,
    pub first_striker: Side,
    pub strikes: u64,
    pub remaining_hit_points_a: i64,
    pub remaining_hit_points_b: i64,
}

/// Why a fight could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

/// Damage dealt by one strike. A defender can never fully negate an attack.
pub fn damage(attack: i64, defense: i64) -> i64 {
    if attack > defense {
        attack - defense
    } else {
        1
    }
}

/// Initiative: A opens iff it is faster OR hits harder.
///
/// This is not a symmetric tie-break. With equal speed and equal attack both
/// comparisons are false and B opens, even though nothing favours B.
pub fn strikes_first(a: &Combatant, b: &Combatant) -> Side {
    if a.speed > b.speed || a.attack > b.attack {
        Side::A
    } else {
        Side::B
    }
}

fn validate_one(label: &str, c: &Combatant) -> Result<(), BattleError> {
    let invalid = |reason: String| Err(BattleError::InvalidInput { reason });
    if c.hit_points <= 0 {
        return invalid(format!(
            "monster {label} (id {}) must start with positive hit points, got {}",
            c.id, c.hit_points
        ));
    }
    for (field, value) in [
        ("attack", c.attack),
        ("defense", c.defense),
        ("speed", c.speed),
    ] {
        if value < 0 {
            return invalid(format!(
                "monster {label} (id {}) has negative {field}: {value}",
                c.id
            ));
        }
    }
    Ok(())
}

/// Reject snapshots the fight is not defined for.
pub fn validate(a: &Combatant, b: &Combatant) -> Result<(), BattleError> {
    validate_one("A", a)?;
    validate_one("B", b)
}

/// Strikes `damage_per_strike` needs to bring `hit_points` to zero or below.
fn strikes_to_down(hit_points: i64, damage_per_strike: i64) -> i128 {
    let (hp, dmg) = (i128::from(hit_points), i128::from(damage_per_strike));
    (hp + dmg - 1) / dmg
}

/// Run the fight to completion and report how it went.
///
/// Strikes alternate starting with the initiative holder, so the fight is
/// decided by how many blows each side needs: the opener lands its n-th blow
/// on strike 2n-1, the other side on strike 2n. The outcome is computed from
/// those two counts instead of replaying every blow, which keeps huge hit
/// point totals cheap.
pub fn simulate(a: &Combatant, b: &Combatant) -> Result<BattleReport, BattleError> {
    validate(a, b)?;

    let first_striker = strikes_first(a, b);
    let damage_to_b = damage(a.attack, b.defense);
    let damage_to_a = damage(b.attack, a.defense);
    let a_needs = strikes_to_down(b.hit_points, damage_to_b);
    let b_needs = strikes_to_down(a.hit_points, damage_to_a);

    // (hits landed on A, hits landed on B, total strikes)
    let (hits_on_a, hits_on_b, strikes) = match first_striker {
        Side::A if a_needs <= b_needs => (a_needs - 1, a_needs, 2 * a_needs - 1),
        Side::A => (b_needs, b_needs, 2 * b_needs),
        Side::B if b_needs <= a_needs => (b_needs, b_needs - 1, 2 * b_needs - 1),
        Side::B => (a_needs, a_needs, 2 * a_needs),
    };

    let remaining_hit_points_a = remaining(a.hit_points, hits_on_a, damage_to_a);
    let remaining_hit_points_b = remaining(b.hit_points, hits_on_b, damage_to_b);

    // Only one side takes damage per strike, so both cannot be down at once.
    let winner = if remaining_hit_points_a <= 0 { b.id } else { a.id };

    Ok(BattleReport {
        winner,
        first_striker,
        // At most 2 * i64::MAX, which fits.
        strikes: strikes as u64,
        remaining_hit_points_a,
        remaining_hit_points_b,
    })
}

// The last blow overshoots by less than one strike's damage, so this fits in i64.
fn remaining(hit_points: i64, hits: i128, damage_per_strike: i64) -> i64 {
    (i128::from(hit_points) - hits * i128::from(damage_per_strike)) as i64
}

/// Resolve a fight between `a` and `b`, returning the winner's id.
pub fn resolve(a: &Combatant, b: &Combatant) -> Result<usize, BattleError> {
    simulate(a, b).map(|report| report.winner)
}
