use anyhow::{anyhow, Result};
use civic_core::config::{CivicConfig, SourceKind, DEFAULT_CONFIG_FILE};
use civic_core::labels::status_label;
use civic_core::query::{
    deputy_summaries, filter_deputies, filter_proposals, proposal_vote_rows, votes_for_deputy,
};
use civic_core::tally::catalog_stats;
use civic_core::{
    Catalog, DeputyFilters, EntityStore, ProposalFilters, ProposalType, VoteTally,
};
use clap::{Args, Parser, Subcommand};
use schemars::schema_for;
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "civic")]
#[command(about = "Browse legislative proposals, deputies and their votes", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Config file (default: ./civic.toml, ignored when missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Data source kind: json, yaml, sqlite or fixture
    #[arg(long, global = true)]
    source: Option<String>,

    /// Path of the data file or database
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List proposals matching the filters
    Proposals {
        /// Case-insensitive text searched in title, summary, number and author
        #[arg(long, short, default_value = "")]
        search: String,
        /// PEC or PL
        #[arg(long = "type")]
        proposal_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// List deputies with their vote counts
    Deputies {
        /// Case-insensitive text searched in the deputy name
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        party: Option<String>,
        /// Federative-unit code, exact match
        #[arg(long)]
        state: Option<String>,
    },
    /// Show the votes on a proposal, or a deputy's voting history
    Votes {
        #[arg(long, conflicts_with = "deputy", required_unless_present = "deputy")]
        proposal: Option<String>,
        #[arg(long)]
        deputy: Option<String>,
    },
    /// Catalog totals
    Stats,
    /// Export JSON Schemas for the catalog types
    Schema {
        #[command(subcommand)]
        command: SchemaCommands,
    },
}

#[derive(Subcommand)]
enum SchemaCommands {
    /// Export JSON Schema files for canonical types
    Export {
        /// Output directory (default: ./schemas)
        #[arg(long, default_value = "schemas")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CivicConfig::load(&cli.global.config)?;
    init_tracing(&config);

    match cli.command {
        Commands::Schema { command } => match command {
            SchemaCommands::Export { out_dir } => schema_export(out_dir),
        },
        Commands::Proposals {
            search,
            proposal_type,
            status,
            author,
        } => {
            let proposal_type = proposal_type
                .as_deref()
                .map(|value| {
                    ProposalType::parse(value).ok_or_else(|| anyhow!("Unknown proposal type: {value}"))
                })
                .transpose()?;
            let filters = ProposalFilters {
                proposal_type,
                status,
                author,
                ..Default::default()
            };
            let catalog = load_catalog(&cli.global, &config)?;
            list_proposals(&catalog, &filters, &search, cli.global.json)
        }
        Commands::Deputies {
            search,
            name,
            party,
            state,
        } => {
            let filters = DeputyFilters { party, state, name };
            let catalog = load_catalog(&cli.global, &config)?;
            list_deputies(&catalog, &filters, &search, cli.global.json)
        }
        Commands::Votes { proposal, deputy } => {
            let catalog = load_catalog(&cli.global, &config)?;
            match (proposal, deputy) {
                (Some(id), _) => show_proposal_votes(&catalog, &id, cli.global.json),
                (None, Some(id)) => show_deputy_votes(&catalog, &id, cli.global.json),
                (None, None) => Err(anyhow!("pass --proposal or --deputy")),
            }
        }
        Commands::Stats => {
            let catalog = load_catalog(&cli.global, &config)?;
            show_stats(&catalog, cli.global.json)
        }
    }
}

fn init_tracing(config: &CivicConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_catalog(global: &GlobalArgs, config: &CivicConfig) -> Result<std::sync::Arc<Catalog>> {
    let mut source_config = config.source.clone();
    if let Some(kind) = &global.source {
        source_config.kind = SourceKind::parse(kind)?;
    }
    if let Some(path) = &global.data {
        source_config.path = Some(path.clone());
    }

    let source = source_config.open()?;
    let mut store = EntityStore::new();
    Ok(store.load(&source)?)
}

fn list_proposals(catalog: &Catalog, filters: &ProposalFilters, search: &str, as_json: bool) -> Result<()> {
    let proposals = filter_proposals(catalog, filters, search);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&proposals)?);
        return Ok(());
    }

    if proposals.is_empty() {
        println!("No proposals match the current filters.");
        return Ok(());
    }
    for p in proposals {
        println!(
            "[{}] {:<14} {:<14} {}  {}",
            p.id,
            p.number,
            status_label(&p.status),
            p.date,
            p.title
        );
        println!("      by {}", p.author);
    }
    Ok(())
}

fn list_deputies(catalog: &Catalog, filters: &DeputyFilters, search: &str, as_json: bool) -> Result<()> {
    let deputies = filter_deputies(catalog, filters, search);
    let summaries = deputy_summaries(catalog, &deputies);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("No deputies match the current filters.");
        return Ok(());
    }
    for s in summaries {
        let last = s.last_vote_date.unwrap_or("-");
        println!(
            "[{}] {:<28} {:<6} {}  votes: {}  last: {}",
            s.deputy.id, s.deputy.name, s.deputy.party, s.deputy.state, s.vote_count, last
        );
    }
    Ok(())
}

fn show_proposal_votes(catalog: &Catalog, proposal_id: &str, as_json: bool) -> Result<()> {
    let Some(proposal) = catalog.find_proposal_by_id(proposal_id) else {
        return Err(anyhow!("Proposal not found: {proposal_id}"));
    };
    let rows = proposal_vote_rows(catalog, proposal_id);
    let tally = VoteTally::from_votes(rows.iter().map(|row| row.vote));

    if as_json {
        let out = json!({
            "proposal": proposal,
            "tally": tally,
            "votes": rows,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{} {} - {}", proposal.proposal_type, proposal.number, proposal.title);
    println!(
        "FAVOR {}  CONTRA {}  ABSTENCAO {}  AUSENTE {}",
        tally.favor, tally.contra, tally.abstencao, tally.ausente
    );
    for row in rows {
        let affiliation = row
            .deputy
            .map(|d| format!("{} - {}", d.party, d.state))
            .unwrap_or_default();
        println!(
            "  {:<28} {:<10} {:<10} {}",
            row.deputy_name,
            affiliation,
            row.vote.vote.label(),
            row.vote.date
        );
    }
    Ok(())
}

fn show_deputy_votes(catalog: &Catalog, deputy_id: &str, as_json: bool) -> Result<()> {
    let name = catalog.deputy_name_or_fallback(deputy_id);
    let votes = votes_for_deputy(catalog, deputy_id);

    if as_json {
        let out = json!({
            "deputyId": deputy_id,
            "name": name,
            "votes": votes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{name} ({} votes)", votes.len());
    for vote in votes {
        let proposal = catalog
            .find_proposal_by_id(&vote.proposal_id)
            .map(|p| p.number.as_str())
            .unwrap_or(vote.proposal_id.as_str());
        println!("  {:<14} {:<10} {}", proposal, vote.vote.label(), vote.date);
    }
    Ok(())
}

fn show_stats(catalog: &Catalog, as_json: bool) -> Result<()> {
    let stats = catalog_stats(catalog);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Proposals: {}", stats.proposals);
    println!("Deputies:  {}", stats.deputies);
    println!("Votes:     {}", stats.votes);
    println!("Approved:  {}", stats.approved);
    Ok(())
}

fn schema_export(out_dir: PathBuf) -> Result<()> {
    fs::create_dir_all(&out_dir)?;

    let schemas = [
        ("Proposal", schema_for!(civic_core::Proposal)),
        ("Deputy", schema_for!(civic_core::Deputy)),
        ("Vote", schema_for!(civic_core::Vote)),
        ("Dataset", schema_for!(civic_core::Dataset)),
        ("ProposalFilters", schema_for!(civic_core::ProposalFilters)),
        ("DeputyFilters", schema_for!(civic_core::DeputyFilters)),
        ("VoteTally", schema_for!(civic_core::VoteTally)),
    ];
    for (name, schema) in schemas {
        let json = serde_json::to_string_pretty(&schema)?;
        fs::write(out_dir.join(format!("{name}.schema.json")), json)?;
    }

    println!("Exported schemas to {}", out_dir.display());
    Ok(())
}
