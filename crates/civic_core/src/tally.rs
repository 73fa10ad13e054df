use crate::schema::{Vote, VoteChoice};
use crate::store::Catalog;
use schemars::JsonSchema;
use serde::Serialize;

/// Votes partitioned by choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub struct VoteTally {
    pub favor: usize,
    pub contra: usize,
    pub abstencao: usize,
    pub ausente: usize,
}

impl VoteTally {
    pub fn from_votes<'a, I>(votes: I) -> Self
    where
        I: IntoIterator<Item = &'a Vote>,
    {
        let mut tally = Self::default();
        for vote in votes {
            *tally.slot_mut(vote.vote) += 1;
        }
        tally
    }

    pub fn get(&self, choice: VoteChoice) -> usize {
        match choice {
            VoteChoice::Favor => self.favor,
            VoteChoice::Contra => self.contra,
            VoteChoice::Abstencao => self.abstencao,
            VoteChoice::Ausente => self.ausente,
        }
    }

    pub fn total(&self) -> usize {
        self.favor + self.contra + self.abstencao + self.ausente
    }

    fn slot_mut(&mut self, choice: VoteChoice) -> &mut usize {
        match choice {
            VoteChoice::Favor => &mut self.favor,
            VoteChoice::Contra => &mut self.contra,
            VoteChoice::Abstencao => &mut self.abstencao,
            VoteChoice::Ausente => &mut self.ausente,
        }
    }
}

/// Headline numbers for a loaded catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CatalogStats {
    pub proposals: usize,
    pub deputies: usize,
    pub votes: usize,
    pub approved: usize,
}

pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    CatalogStats {
        proposals: catalog.proposals().len(),
        deputies: catalog.deputies().len(),
        votes: catalog.votes().len(),
        approved: catalog
            .proposals()
            .iter()
            .filter(|p| p.status == "aprovado")
            .count(),
    }
}
