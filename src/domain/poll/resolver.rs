//! Winner resolution over a poll tally.
//!
//! Pure and deterministic: no randomness, no side effects, no access to
//! anything but the tally handed in.

use crate::domain::foundation::{DomainError, ErrorCode, PostId};

use super::Tally;

/// The set of options sharing the maximum vote count, in poll option order.
///
/// Size 1 is a clean win. Size > 1 requires tiebreaking. A full tie (every
/// option equal) is handled like any other tie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinnerSet(Vec<PostId>);

impl WinnerSet {
    pub fn ids(&self) -> &[PostId] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, post_id: PostId) -> bool {
        self.0.contains(&post_id)
    }

    /// True when exactly one option won outright.
    pub fn is_decisive(&self) -> bool {
        self.0.len() == 1
    }

    /// The sole winner, or - for a still-tied set that must be accepted
    /// anyway - the lowest option identifier. Arbitrary but deterministic.
    pub fn pick(&self) -> PostId {
        *self.0.iter().min().expect("winner set is never empty")
    }
}

/// Compute the winner set from a tally.
///
/// # Errors
///
/// - `NoVotesCast` if no ballots were cast; an empty tally is a caller
///   precondition violation and is never silently resolved
pub fn resolve(tally: &Tally) -> Result<WinnerSet, DomainError> {
    if tally.is_empty() {
        return Err(DomainError::new(
            ErrorCode::NoVotesCast,
            "Cannot resolve a poll with no votes",
        ));
    }

    let max = tally
        .counts
        .iter()
        .map(|option| option.votes)
        .max()
        .unwrap_or(0);
    let winners = tally
        .counts
        .iter()
        .filter(|option| option.votes == max)
        .map(|option| option.post_id)
        .collect();
    Ok(WinnerSet(winners))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll::OptionTally;
    use crate::domain::foundation::UserId;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn tally(counts: Vec<(PostId, u32)>, voters: usize) -> Tally {
        Tally {
            counts: counts
                .into_iter()
                .map(|(post_id, votes)| OptionTally { post_id, votes })
                .collect(),
            voters: (0..voters)
                .map(|i| UserId::new(format!("member-{}", i)).unwrap())
                .collect(),
        }
    }

    #[test]
    fn empty_tally_fails_with_no_votes_cast() {
        let empty = tally(vec![(PostId::new(), 0)], 0);
        let err = resolve(&empty).unwrap_err();
        assert_eq!(err.code, ErrorCode::NoVotesCast);
    }

    #[test]
    fn single_max_is_decisive() {
        let a = PostId::new();
        let b = PostId::new();
        let winners = resolve(&tally(vec![(a, 2), (b, 1)], 3)).unwrap();
        assert!(winners.is_decisive());
        assert_eq!(winners.ids(), &[a]);
        assert_eq!(winners.pick(), a);
    }

    #[test]
    fn shared_max_yields_all_tied_options() {
        let a = PostId::new();
        let b = PostId::new();
        let c = PostId::new();
        let winners = resolve(&tally(vec![(a, 3), (b, 3), (c, 1)], 4)).unwrap();
        assert_eq!(winners.len(), 2);
        assert!(winners.contains(a));
        assert!(winners.contains(b));
        assert!(!winners.contains(c));
    }

    #[test]
    fn full_tie_returns_every_option() {
        let a = PostId::new();
        let b = PostId::new();
        let c = PostId::new();
        let winners = resolve(&tally(vec![(a, 1), (b, 1), (c, 1)], 3)).unwrap();
        assert_eq!(winners.len(), 3);
    }

    #[test]
    fn pick_on_tie_is_lowest_identifier() {
        let mut ids = vec![PostId::new(), PostId::new(), PostId::new()];
        let winners = resolve(&tally(ids.iter().map(|id| (*id, 2)).collect(), 2)).unwrap();
        ids.sort();
        assert_eq!(winners.pick(), ids[0]);
    }

    proptest! {
        #[test]
        fn winners_always_share_the_maximum(counts in prop::collection::vec(0u32..20, 1..12)) {
            let ids: Vec<PostId> = counts.iter().map(|_| PostId::new()).collect();
            let t = tally(ids.iter().copied().zip(counts.iter().copied()).collect(), 1);

            let winners = resolve(&t).unwrap();
            prop_assert!(!winners.is_empty());

            let max = *counts.iter().max().unwrap();
            for (id, count) in ids.iter().zip(counts.iter()) {
                prop_assert_eq!(winners.contains(*id), *count == max);
            }
        }

        #[test]
        fn pick_is_deterministic_and_member_of_set(counts in prop::collection::vec(0u32..5, 1..8)) {
            let ids: Vec<PostId> = counts.iter().map(|_| PostId::new()).collect();
            let t = tally(ids.iter().copied().zip(counts.iter().copied()).collect(), 1);

            let winners = resolve(&t).unwrap();
            let picked = winners.pick();
            prop_assert!(winners.contains(picked));
            prop_assert_eq!(picked, resolve(&t).unwrap().pick());

            let as_set: BTreeSet<PostId> = winners.ids().iter().copied().collect();
            prop_assert_eq!(*as_set.iter().next().unwrap(), picked);
        }
    }
}
