//! Bundled sample catalog, used by the `fixture` source kind and in tests.

use crate::schema::{Dataset, Deputy, Proposal, ProposalType, Vote, VoteChoice};
use crate::source::StaticSource;

pub fn sample_source() -> StaticSource {
    StaticSource::new(sample_dataset())
}

pub fn sample_dataset() -> Dataset {
    Dataset {
        proposals: sample_proposals(),
        deputies: sample_deputies(),
        votes: sample_votes(),
    }
}

#[allow(clippy::too_many_arguments)]
fn proposal(
    id: &str,
    number: &str,
    proposal_type: ProposalType,
    title: &str,
    summary: &str,
    author: &str,
    status: &str,
    date: &str,
) -> Proposal {
    Proposal {
        id: id.to_string(),
        number: number.to_string(),
        proposal_type,
        title: title.to_string(),
        summary: summary.to_string(),
        author: author.to_string(),
        status: status.to_string(),
        date: date.to_string(),
    }
}

fn sample_proposals() -> Vec<Proposal> {
    vec![
        proposal(
            "1",
            "PEC 32/2020",
            ProposalType::Pec,
            "Reforma Administrativa - Altera disposições sobre servidores, empregados públicos e organização administrativa",
            "Modifica o regime jurídico dos servidores públicos e a organização administrativa direta e indireta.",
            "Poder Executivo",
            "em_tramitacao",
            "2020-09-03",
        ),
        proposal(
            "2",
            "PL 2630/2020",
            ProposalType::Pl,
            "Lei Brasileira de Liberdade, Responsabilidade e Transparência na Internet",
            "Institui a Lei Brasileira de Liberdade, Responsabilidade e Transparência na Internet.",
            "Sen. Alessandro Vieira",
            "em_tramitacao",
            "2020-05-07",
        ),
        proposal(
            "3",
            "PEC 95/2016",
            ProposalType::Pec,
            "Novo Regime Fiscal",
            "Institui o Novo Regime Fiscal no âmbito dos Orçamentos Fiscal e da Seguridade Social da União.",
            "Poder Executivo",
            "aprovado",
            "2016-06-15",
        ),
        proposal(
            "4",
            "PL 1179/2020",
            ProposalType::Pl,
            "Marco Legal do Saneamento Básico",
            "Atualiza o marco legal do saneamento básico e altera a Lei nº 9.984, de 17 de julho de 2000.",
            "Sen. Tasso Jereissati",
            "aprovado",
            "2020-03-11",
        ),
    ]
}

fn sample_deputies() -> Vec<Deputy> {
    [
        ("1", "Arthur Oliveira Maia", "DEM", "BA"),
        ("2", "Gleisi Helena Hoffmann", "PT", "PR"),
        ("3", "Rodrigo Maia", "DEM", "RJ"),
        ("4", "Marcelo Freixo", "PSOL", "RJ"),
        ("5", "Joice Hasselmann", "PSL", "SP"),
        ("6", "Alessandro Molon", "PSB", "RJ"),
    ]
    .into_iter()
    .map(|(id, name, party, state)| Deputy {
        id: id.to_string(),
        name: name.to_string(),
        party: party.to_string(),
        state: state.to_string(),
        photo: None,
    })
    .collect()
}

fn sample_votes() -> Vec<Vote> {
    use VoteChoice::*;

    [
        ("1", "1", "1", Favor, "2021-05-12"),
        ("2", "2", "1", Contra, "2021-05-12"),
        ("3", "3", "1", Favor, "2021-05-12"),
        ("4", "4", "1", Contra, "2021-05-12"),
        ("5", "5", "1", Abstencao, "2021-05-12"),
        ("6", "6", "1", Ausente, "2021-05-12"),
        ("7", "1", "2", Contra, "2021-08-03"),
        ("8", "2", "2", Favor, "2021-08-03"),
        ("9", "3", "2", Favor, "2021-08-03"),
        ("10", "4", "2", Favor, "2021-08-03"),
    ]
    .into_iter()
    .map(|(id, deputy_id, proposal_id, vote, date)| Vote {
        id: id.to_string(),
        deputy_id: deputy_id.to_string(),
        proposal_id: proposal_id.to_string(),
        vote,
        date: date.to_string(),
    })
    .collect()
}
