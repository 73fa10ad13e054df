//! Display data for proposal statuses and vote choices.

use crate::schema::VoteChoice;
use serde::Serialize;
use std::borrow::Cow;

/// Status codes the catalog knows how to label. Anything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    EmTramitacao,
    Aprovado,
    Rejeitado,
    Arquivado,
    Other,
}

impl StatusKind {
    pub fn classify(status: &str) -> Self {
        match status.to_lowercase().as_str() {
            "em_tramitacao" => StatusKind::EmTramitacao,
            "aprovado" => StatusKind::Aprovado,
            "rejeitado" => StatusKind::Rejeitado,
            "arquivado" => StatusKind::Arquivado,
            _ => StatusKind::Other,
        }
    }

    pub fn is_known(self) -> bool {
        self != StatusKind::Other
    }
}

/// Human-readable status: the first underscore becomes a space, unknown codes included.
pub fn status_label(status: &str) -> Cow<'_, str> {
    if status.contains('_') {
        Cow::Owned(status.replacen('_', " ", 1))
    } else {
        Cow::Borrowed(status)
    }
}

impl VoteChoice {
    pub fn label(self) -> &'static str {
        match self {
            VoteChoice::Favor => "Favorável",
            VoteChoice::Contra => "Contrário",
            VoteChoice::Abstencao => "Abstenção",
            VoteChoice::Ausente => "Ausente",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_classify_case_insensitively() {
        assert_eq!(StatusKind::classify("aprovado"), StatusKind::Aprovado);
        assert_eq!(StatusKind::classify("EM_TRAMITACAO"), StatusKind::EmTramitacao);
        assert_eq!(StatusKind::classify("arquivado"), StatusKind::Arquivado);
        assert_eq!(StatusKind::classify("rejeitado"), StatusKind::Rejeitado);
    }

    #[test]
    fn unknown_status_degrades_to_other() {
        let kind = StatusKind::classify("aguardando_sancao");
        assert_eq!(kind, StatusKind::Other);
        assert!(!kind.is_known());
        assert_eq!(status_label("aguardando_sancao"), "aguardando sancao");
    }

    #[test]
    fn labels() {
        assert_eq!(status_label("em_tramitacao"), "em tramitacao");
        assert_eq!(status_label("aprovado"), "aprovado");
        assert_eq!(VoteChoice::Abstencao.label(), "Abstenção");
    }

    #[test]
    fn only_the_first_underscore_is_replaced() {
        assert_eq!(status_label("aguardando_sancao_presidencial"), "aguardando sancao_presidencial");
    }
}
