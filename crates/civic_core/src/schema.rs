use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The 27 federative-unit codes (26 states plus the federal district).
pub const FEDERATIVE_UNITS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

pub fn is_known_state(code: &str) -> bool {
    FEDERATIVE_UNITS.contains(&code)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Deputy {
    pub id: String,
    pub name: String,
    pub party: String,             // short party code, e.g. "PT"
    pub state: String,             // federative-unit code, e.g. "RJ"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,     // portrait URI
}

impl Deputy {
    /// First letter of the first two words of the name, upper-cased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProposalType {
    #[serde(rename = "PEC")]
    Pec,
    #[serde(rename = "PL")]
    Pl,
}

impl ProposalType {
    pub fn code(self) -> &'static str {
        match self {
            ProposalType::Pec => "PEC",
            ProposalType::Pl => "PL",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PEC" => Some(ProposalType::Pec),
            "PL" => Some(ProposalType::Pl),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Proposal {
    pub id: String,
    pub number: String,            // e.g. "PEC 32/2020"
    #[serde(rename = "type")]
    pub proposal_type: ProposalType,
    pub title: String,
    pub summary: String,
    pub author: String,            // person or institutional body, not a deputy id
    pub status: String,            // open-ended, see labels::StatusKind
    pub date: String,              // ISO-8601 date
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoteChoice {
    Favor,
    Contra,
    Abstencao,
    Ausente,
}

impl VoteChoice {
    pub const ALL: [VoteChoice; 4] = [
        VoteChoice::Favor,
        VoteChoice::Contra,
        VoteChoice::Abstencao,
        VoteChoice::Ausente,
    ];

    pub fn code(self) -> &'static str {
        match self {
            VoteChoice::Favor => "FAVOR",
            VoteChoice::Contra => "CONTRA",
            VoteChoice::Abstencao => "ABSTENCAO",
            VoteChoice::Ausente => "AUSENTE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.code() == value)
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: String,
    pub deputy_id: String,         // non-owning reference to Deputy.id
    pub proposal_id: String,       // non-owning reference to Proposal.id
    pub vote: VoteChoice,
    pub date: String,              // ISO-8601 date the vote was cast
}

/// The three collections delivered by a data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dataset {
    #[serde(default)]
    pub proposals: Vec<Proposal>,
    #[serde(default)]
    pub deputies: Vec<Deputy>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

/// Proposal criteria. `None` or an empty string leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalFilters {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub proposal_type: Option<ProposalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    // date bounds only feed `is_active`; filter_proposals ignores them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl ProposalFilters {
    pub fn is_active(&self) -> bool {
        self.proposal_type.is_some()
            || is_set(&self.status)
            || is_set(&self.author)
            || is_set(&self.date_from)
            || is_set(&self.date_to)
    }
}

/// Deputy criteria. `None` or an empty string leaves a field unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DeputyFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DeputyFilters {
    pub fn is_active(&self) -> bool {
        is_set(&self.party) || is_set(&self.state) || is_set(&self.name)
    }
}

/// Returns the filter value when it actually constrains.
pub(crate) fn set_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn is_set(value: &Option<String>) -> bool {
    set_value(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_uses_camel_case_wire_names() {
        let raw = r#"{"id":"1","deputyId":"3","proposalId":"2","vote":"ABSTENCAO","date":"2021-05-12"}"#;
        let vote: Vote = serde_json::from_str(raw).unwrap();
        assert_eq!(vote.deputy_id, "3");
        assert_eq!(vote.proposal_id, "2");
        assert_eq!(vote.vote, VoteChoice::Abstencao);
    }

    #[test]
    fn unknown_vote_value_is_rejected() {
        let raw = r#"{"id":"1","deputyId":"3","proposalId":"2","vote":"TALVEZ","date":"2021-05-12"}"#;
        assert!(serde_json::from_str::<Vote>(raw).is_err());
    }

    #[test]
    fn proposal_type_field_is_named_type() {
        let raw = r#"{"id":"9","number":"PL 1/2024","type":"PL","title":"t","summary":"s",
            "author":"a","status":"qualquer_coisa","date":"2024-01-01"}"#;
        let proposal: Proposal = serde_json::from_str(raw).unwrap();
        assert_eq!(proposal.proposal_type, ProposalType::Pl);
        assert_eq!(proposal.status, "qualquer_coisa");
    }

    #[test]
    fn deputy_photo_is_optional() {
        let raw = r#"{"id":"1","name":"Ana","party":"PT","state":"SP"}"#;
        let deputy: Deputy = serde_json::from_str(raw).unwrap();
        assert_eq!(deputy.photo, None);
    }

    #[test]
    fn initials_take_first_two_words() {
        let deputy = Deputy {
            id: "1".into(),
            name: "gleisi Helena Hoffmann".into(),
            party: "PT".into(),
            state: "PR".into(),
            photo: None,
        };
        assert_eq!(deputy.initials(), "GH");
    }

    #[test]
    fn empty_strings_do_not_activate_filters() {
        let filters = DeputyFilters {
            party: Some(String::new()),
            ..Default::default()
        };
        assert!(!filters.is_active());

        let filters = ProposalFilters {
            proposal_type: Some(ProposalType::Pec),
            ..Default::default()
        };
        assert!(filters.is_active());
    }

    #[test]
    fn federative_units_cover_all_codes() {
        assert_eq!(FEDERATIVE_UNITS.len(), 27);
        assert!(is_known_state("DF"));
        assert!(!is_known_state("rj"));
    }
}
