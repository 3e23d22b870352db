//! Stage 2: derive eligibility sets from aggregated state.

use crate::AuthorTally;
use rolesweep_core::Author;

/// Final classification of every author seen by a scan.
///
/// `eligible` and the two exclusion buckets partition the authors seen.
/// `duplicates` overlaps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct Resolution {
    /// Authors with at least one qualifying message, in first-seen order
    eligible: Vec<Author>,
    /// Excluded authors that failed the filter on some unmarked message
    excluded_by_filter: Vec<Author>,
    /// All other excluded authors
    excluded_by_reaction: Vec<Author>,
    /// Authors with more than one message
    duplicates: Vec<Author>,
}

impl Resolution {
    /// Classify tallies, which must be in first-seen order.
    ///
    /// `excluded_by_filter` is `filter_failed ∩ excluded` and
    /// `excluded_by_reaction` is whatever else is excluded. The reaction
    /// bucket is therefore a set difference, not a direct tally of rejected
    /// messages.
    pub fn from_tallies(tallies: Vec<AuthorTally>) -> Self {
        let mut resolution = Self::default();

        for tally in tallies {
            if *tally.messages() > 1 {
                resolution.duplicates.push(tally.author().clone());
            }

            if *tally.clean() {
                resolution.eligible.push(tally.author().clone());
            } else if *tally.filter_failed() {
                resolution.excluded_by_filter.push(tally.author().clone());
            } else {
                resolution.excluded_by_reaction.push(tally.author().clone());
            }
        }

        resolution
    }

    /// Number of distinct authors seen.
    pub fn seen(&self) -> usize {
        self.eligible.len() + self.excluded()
    }

    /// Number of excluded authors.
    pub fn excluded(&self) -> usize {
        self.excluded_by_filter.len() + self.excluded_by_reaction.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::Aggregation;
    use rolesweep_core::{
        AttachmentFilter, Author, AuthorId, MessageId, Reaction, ReactionEmoji,
        ScannedMessageBuilder,
    };
    use std::collections::HashSet;

    fn observe(agg: &mut Aggregation, id: u64, author: u64, content: &str, rejected: bool) {
        let reactions = if rejected {
            vec![Reaction::new(ReactionEmoji::Unicode("❎".to_string()), 2)]
        } else {
            vec![]
        };
        agg.observe(
            &ScannedMessageBuilder::default()
                .id(MessageId(id))
                .author(Author::new(AuthorId(author), format!("user{}", author), false))
                .content(content)
                .reactions(reactions)
                .build()
                .unwrap(),
        );
    }

    fn ids(authors: &[Author]) -> HashSet<u64> {
        authors.iter().map(|a| a.id().0).collect()
    }

    #[test]
    fn test_partition_is_disjoint_and_complete() {
        let mut agg = Aggregation::new(AttachmentFilter::Link);
        observe(&mut agg, 1, 1, "http://a.b", false); // eligible
        observe(&mut agg, 2, 2, "no link", false); // filter
        observe(&mut agg, 3, 3, "http://a.b", true); // reaction
        observe(&mut agg, 4, 4, "no link", false); // filter then redeemed
        observe(&mut agg, 5, 4, "https://c.d", false);
        observe(&mut agg, 6, 5, "no link", true); // reaction then filter
        observe(&mut agg, 7, 5, "still none", false);

        let resolution = agg.resolve();
        let eligible = ids(resolution.eligible());
        let by_filter = ids(resolution.excluded_by_filter());
        let by_reaction = ids(resolution.excluded_by_reaction());

        assert_eq!(eligible, HashSet::from([1, 4]));
        assert_eq!(by_filter, HashSet::from([2, 5]));
        assert_eq!(by_reaction, HashSet::from([3]));
        assert!(eligible.is_disjoint(&by_filter));
        assert!(eligible.is_disjoint(&by_reaction));
        assert!(by_filter.is_disjoint(&by_reaction));
        assert_eq!(resolution.seen(), 5);
        assert_eq!(resolution.excluded(), 3);
    }

    #[test]
    fn test_duplicates_independent_of_eligibility() {
        let mut agg = Aggregation::new(AttachmentFilter::None);
        observe(&mut agg, 1, 1, "", false);
        observe(&mut agg, 2, 1, "", false);
        observe(&mut agg, 3, 2, "", true);
        observe(&mut agg, 4, 2, "", true);
        observe(&mut agg, 5, 3, "", false);

        let resolution = agg.resolve();
        assert_eq!(ids(resolution.duplicates()), HashSet::from([1, 2]));
        assert_eq!(ids(resolution.eligible()), HashSet::from([1, 3]));
    }

    #[test]
    fn test_eligible_keeps_first_seen_order() {
        let mut agg = Aggregation::new(AttachmentFilter::None);
        observe(&mut agg, 1, 30, "", false);
        observe(&mut agg, 2, 10, "", false);
        observe(&mut agg, 3, 20, "", false);

        let order: Vec<u64> = agg.resolve().eligible().iter().map(|a| a.id().0).collect();
        assert_eq!(order, vec![30, 10, 20]);
    }
}
