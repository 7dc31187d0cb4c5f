use serde::Serialize;

use crate::domain::agent::Agent;

/// One scored, reasoned association of an agent to a query. Created fresh
/// per evaluation and never persisted; ordering is the contract.
#[derive(Clone, Debug, Serialize)]
pub struct MatchResult<'a> {
    pub agent: &'a Agent,
    pub score: f64,
    pub reasoning: String,
}

/// Display confidence for a score: `min(round(score / 15 * 100), 99)`.
///
/// The divisor 15 is an assumed maximum, not a true one: an agent matching
/// many rules can exceed it, in which case the display pins at 99.
pub fn confidence_pct(score: f64) -> u8 {
    let scaled = (score / 15.0 * 100.0).round();
    scaled.min(99.0).max(0.0) as u8
}

#[cfg(test)]
mod tests {
    use super::confidence_pct;

    #[test]
    fn scales_against_fifteen() {
        assert_eq!(confidence_pct(7.5), 50);
        assert_eq!(confidence_pct(3.0), 20);
        assert_eq!(confidence_pct(0.0), 0);
    }

    #[test]
    fn caps_at_ninety_nine() {
        assert_eq!(confidence_pct(15.0), 99);
        assert_eq!(confidence_pct(40.0), 99);
    }
}
