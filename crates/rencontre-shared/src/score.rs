//! Client-computed compatibility score.
//!
//! Advisory and display-only: the server's `matchPercentage`, when
//! present at completion, is authoritative for any persisted record.

use crate::constants::QUESTIONS_PER_ROUND;
use crate::types::QuestionPair;

/// Percentage of questions both participants answered identically,
/// over the questions both have answered. `0` when nothing is answered
/// by both yet.
pub fn match_percentage(pairs: &[QuestionPair]) -> u8 {
    let mut answered = 0usize;
    let mut matched = 0usize;

    for pair in pairs {
        if let (Some(a), Some(b)) = (pair.u1_answer, pair.u2_answer) {
            answered += 1;
            if a == b {
                matched += 1;
            }
        }
    }

    if answered == 0 {
        return 0;
    }
    (100.0 * matched as f64 / answered as f64).round() as u8
}

/// The cumulative question slice covered by the end of the given round
/// (1-based). Used for the per-round results display.
pub fn through_round(pairs: &[QuestionPair], round: u8) -> &[QuestionPair] {
    let end = (round as usize * QUESTIONS_PER_ROUND).min(pairs.len());
    &pairs[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Question;

    fn pair(u1: Option<usize>, u2: Option<usize>) -> QuestionPair {
        QuestionPair {
            question: Question {
                text: "q".into(),
                options: vec!["a".into(), "b".into(), "c".into()],
            },
            u1_answer: u1,
            u2_answer: u2,
        }
    }

    #[test]
    fn test_score_counts_only_fully_answered_pairs() {
        let pairs = vec![pair(Some(1), Some(1)), pair(Some(0), Some(2)), pair(None, Some(1))];
        // answered = 2, matched = 1
        assert_eq!(match_percentage(&pairs), 50);
    }

    #[test]
    fn test_score_empty_is_zero() {
        assert_eq!(match_percentage(&[]), 0);
        assert_eq!(match_percentage(&[pair(None, None), pair(Some(1), None)]), 0);
    }

    #[test]
    fn test_score_rounds_to_nearest() {
        let pairs = vec![pair(Some(0), Some(0)), pair(Some(1), Some(1)), pair(Some(0), Some(1))];
        // 2/3 -> 66.67 -> 67
        assert_eq!(match_percentage(&pairs), 67);
    }

    #[test]
    fn test_through_round_slicing() {
        let pairs: Vec<_> = (0..8).map(|_| pair(Some(0), Some(0))).collect();
        assert_eq!(through_round(&pairs, 1).len(), 5);
        assert_eq!(through_round(&pairs, 2).len(), 8);
    }
}
