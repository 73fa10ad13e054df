use crate::error::LoadError;
use crate::schema::{Dataset, Deputy, Proposal, ProposalType, Vote, VoteChoice};
use crate::source::DataSource;
use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use tracing::debug;

/// Tables [`SqliteSource`] reads. Rows are read in `rowid` order.
pub const CATALOG_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS proposals (
  id TEXT PRIMARY KEY,
  number TEXT NOT NULL,
  type TEXT NOT NULL,
  title TEXT NOT NULL,
  summary TEXT NOT NULL,
  author TEXT NOT NULL,
  status TEXT NOT NULL,
  date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS deputies (
  id TEXT PRIMARY KEY,
  name TEXT NOT NULL,
  party TEXT NOT NULL,
  state TEXT NOT NULL,
  photo TEXT
);

CREATE TABLE IF NOT EXISTS votes (
  id TEXT PRIMARY KEY,
  deputy_id TEXT NOT NULL,
  proposal_id TEXT NOT NULL,
  vote TEXT NOT NULL,
  date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_votes_proposal ON votes(proposal_id);
CREATE INDEX IF NOT EXISTS idx_votes_deputy ON votes(deputy_id);
"#;

/// Reads the catalog tables of an existing database without writing to it.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataSource for SqliteSource {
    fn fetch_all(&self) -> Result<Dataset, LoadError> {
        debug!(path = %self.path.display(), "opening catalog database");
        let conn = Connection::open_with_flags(&self.path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        fetch_dataset(&conn)
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}

pub fn fetch_dataset(conn: &Connection) -> Result<Dataset, LoadError> {
    Ok(Dataset {
        proposals: fetch_proposals(conn)?,
        deputies: fetch_deputies(conn)?,
        votes: fetch_votes(conn)?,
    })
}

fn fetch_proposals(conn: &Connection) -> Result<Vec<Proposal>, LoadError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, number, type, title, summary, author, status, date
        FROM proposals
        ORDER BY rowid
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ProposalRow {
            id: row.get(0)?,
            number: row.get(1)?,
            proposal_type: row.get(2)?,
            title: row.get(3)?,
            summary: row.get(4)?,
            author: row.get(5)?,
            status: row.get(6)?,
            date: row.get(7)?,
        })
    })?;

    let mut proposals = Vec::new();
    for r in rows {
        proposals.push(r?.into_proposal()?);
    }
    Ok(proposals)
}

fn fetch_deputies(conn: &Connection) -> Result<Vec<Deputy>, LoadError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, name, party, state, photo
        FROM deputies
        ORDER BY rowid
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(Deputy {
            id: row.get(0)?,
            name: row.get(1)?,
            party: row.get(2)?,
            state: row.get(3)?,
            photo: row.get(4)?,
        })
    })?;

    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

fn fetch_votes(conn: &Connection) -> Result<Vec<Vote>, LoadError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, deputy_id, proposal_id, vote, date
        FROM votes
        ORDER BY rowid
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(VoteRow {
            id: row.get(0)?,
            deputy_id: row.get(1)?,
            proposal_id: row.get(2)?,
            vote: row.get(3)?,
            date: row.get(4)?,
        })
    })?;

    let mut votes = Vec::new();
    for r in rows {
        votes.push(r?.into_vote()?);
    }
    Ok(votes)
}

#[derive(Debug)]
struct ProposalRow {
    id: String,
    number: String,
    proposal_type: String,
    title: String,
    summary: String,
    author: String,
    status: String,
    date: String,
}

impl ProposalRow {
    fn into_proposal(self) -> Result<Proposal, LoadError> {
        let Some(proposal_type) = ProposalType::parse(&self.proposal_type) else {
            return Err(LoadError::UnknownValue {
                entity: "proposal",
                id: self.id,
                field: "type",
                value: self.proposal_type,
            });
        };
        Ok(Proposal {
            id: self.id,
            number: self.number,
            proposal_type,
            title: self.title,
            summary: self.summary,
            author: self.author,
            status: self.status,
            date: self.date,
        })
    }
}

#[derive(Debug)]
struct VoteRow {
    id: String,
    deputy_id: String,
    proposal_id: String,
    vote: String,
    date: String,
}

impl VoteRow {
    fn into_vote(self) -> Result<Vote, LoadError> {
        let Some(vote) = VoteChoice::parse(&self.vote) else {
            return Err(LoadError::UnknownValue {
                entity: "vote",
                id: self.id,
                field: "vote",
                value: self.vote,
            });
        };
        Ok(Vote {
            id: self.id,
            deputy_id: self.deputy_id,
            proposal_id: self.proposal_id,
            vote,
            date: self.date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_catalog() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(CATALOG_TABLES).unwrap();
        conn
    }

    #[test]
    fn rows_map_to_entities_in_insertion_order() {
        let conn = memory_catalog();
        conn.execute_batch(
            r#"
            INSERT INTO proposals VALUES ('b', 'PL 2/2020', 'PL', 'Segundo', 's', 'Autor', 'aprovado', '2020-01-02');
            INSERT INTO proposals VALUES ('a', 'PEC 1/2020', 'PEC', 'Primeiro', 's', 'Autor', 'arquivado', '2020-01-01');
            INSERT INTO deputies VALUES ('1', 'Ana Souza', 'PT', 'SP', NULL);
            INSERT INTO votes VALUES ('v1', '1', 'a', 'CONTRA', '2021-01-01');
            "#,
        )
        .unwrap();

        let dataset = fetch_dataset(&conn).unwrap();
        let ids: Vec<&str> = dataset.proposals.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(dataset.proposals[1].proposal_type, ProposalType::Pec);
        assert_eq!(dataset.deputies[0].photo, None);
        assert_eq!(dataset.votes[0].vote, VoteChoice::Contra);
    }

    #[test]
    fn unknown_vote_code_fails_the_fetch() {
        let conn = memory_catalog();
        conn.execute(
            "INSERT INTO votes VALUES ('v1', '1', 'a', 'TALVEZ', '2021-01-01')",
            [],
        )
        .unwrap();

        let err = fetch_dataset(&conn).unwrap_err();
        assert!(matches!(err, LoadError::UnknownValue { field: "vote", .. }));
    }
}
