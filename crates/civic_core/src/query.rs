//! Read-only queries over a loaded [`Catalog`].
//!
//! Every function here is pure: same catalog and arguments, same result.
//! Results borrow from the catalog and keep its original order.

use crate::dates::compare_iso_dates;
use crate::schema::{set_value, Deputy, DeputyFilters, Proposal, ProposalFilters, Vote};
use crate::store::Catalog;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

pub fn filter_proposals<'a>(
    catalog: &'a Catalog,
    filters: &ProposalFilters,
    search_term: &str,
) -> Vec<&'a Proposal> {
    let search = search_term.to_lowercase();
    let author = set_value(&filters.author).map(str::to_lowercase);
    let status = set_value(&filters.status);

    let matches: Vec<&Proposal> = catalog
        .proposals()
        .iter()
        .filter(|proposal| {
            let matches_search = search.is_empty()
                || [
                    &proposal.title,
                    &proposal.summary,
                    &proposal.number,
                    &proposal.author,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&search));

            let matches_type = filters
                .proposal_type
                .is_none_or(|wanted| proposal.proposal_type == wanted);
            let matches_status = status.is_none_or(|wanted| proposal.status == wanted);
            let matches_author = author
                .as_deref()
                .is_none_or(|wanted| proposal.author.to_lowercase().contains(wanted));

            matches_search && matches_type && matches_status && matches_author
        })
        .collect();

    debug!(matched = matches.len(), "filtered proposals");
    matches
}

/// Free-text search only looks at `name` here, unlike proposals.
pub fn filter_deputies<'a>(
    catalog: &'a Catalog,
    filters: &DeputyFilters,
    search_term: &str,
) -> Vec<&'a Deputy> {
    let search = search_term.to_lowercase();
    let name = set_value(&filters.name).map(str::to_lowercase);
    let party = set_value(&filters.party).map(str::to_lowercase);
    let state = set_value(&filters.state);

    let matches: Vec<&Deputy> = catalog
        .deputies()
        .iter()
        .filter(|deputy| {
            let deputy_name = deputy.name.to_lowercase();
            let matches_search = search.is_empty() || deputy_name.contains(&search);
            let matches_name = name
                .as_deref()
                .is_none_or(|wanted| deputy_name.contains(wanted));
            let matches_party = party
                .as_deref()
                .is_none_or(|wanted| deputy.party.to_lowercase().contains(wanted));
            let matches_state = state.is_none_or(|wanted| deputy.state == wanted);

            matches_search && matches_name && matches_party && matches_state
        })
        .collect();

    debug!(matched = matches.len(), "filtered deputies");
    matches
}

pub fn votes_for_proposal<'a>(catalog: &'a Catalog, proposal_id: &str) -> Vec<&'a Vote> {
    catalog
        .votes()
        .iter()
        .filter(|vote| vote.proposal_id == proposal_id)
        .collect()
}

pub fn votes_for_deputy<'a>(catalog: &'a Catalog, deputy_id: &str) -> Vec<&'a Vote> {
    catalog
        .votes()
        .iter()
        .filter(|vote| vote.deputy_id == deputy_id)
        .collect()
}

pub fn deputy_vote_count(catalog: &Catalog, deputy_id: &str) -> usize {
    catalog
        .votes()
        .iter()
        .filter(|vote| vote.deputy_id == deputy_id)
        .count()
}

/// Latest vote date for the deputy, `None` when they never voted.
///
/// Among votes sharing the latest date the first one in catalog order wins;
/// the returned string is that vote's date verbatim.
pub fn deputy_last_vote_date<'a>(catalog: &'a Catalog, deputy_id: &str) -> Option<&'a str> {
    catalog
        .votes()
        .iter()
        .filter(|vote| vote.deputy_id == deputy_id)
        .map(|vote| vote.date.as_str())
        .reduce(|latest, date| {
            if compare_iso_dates(date, latest) == Ordering::Greater {
                date
            } else {
                latest
            }
        })
}

/// A vote joined with the deputy who cast it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoteRow<'a> {
    pub vote: &'a Vote,
    pub deputy: Option<&'a Deputy>,
    pub deputy_name: &'a str,
}

pub fn proposal_vote_rows<'a>(catalog: &'a Catalog, proposal_id: &str) -> Vec<VoteRow<'a>> {
    votes_for_proposal(catalog, proposal_id)
        .into_iter()
        .map(|vote| VoteRow {
            vote,
            deputy: catalog.find_deputy_by_id(&vote.deputy_id),
            deputy_name: catalog.deputy_name_or_fallback(&vote.deputy_id),
        })
        .collect()
}

/// What a deputy listing shows next to each deputy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeputySummary<'a> {
    pub deputy: &'a Deputy,
    pub vote_count: usize,
    pub last_vote_date: Option<&'a str>,
}

pub fn deputy_summaries<'a>(catalog: &'a Catalog, deputies: &[&'a Deputy]) -> Vec<DeputySummary<'a>> {
    deputies
        .iter()
        .map(|&deputy| DeputySummary {
            deputy,
            vote_count: deputy_vote_count(catalog, &deputy.id),
            last_vote_date: deputy_last_vote_date(catalog, &deputy.id),
        })
        .collect()
}
