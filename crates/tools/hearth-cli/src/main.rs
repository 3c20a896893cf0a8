use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use hearth_bids::{calculate_bid_score, sort_bids_by_priority};
use hearth_territory::{
    calculate_territory_pricing, rurality_tier, ClaimLedger, FreeClaimProgram, SledClaimLedger,
};
use hearth_types::{Bid, Contractor, EntityInfo, EntityType, RuralityTier, Territory};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Parser)]
#[clap(name = "hearth", about = "Hearth marketplace operations", version)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the rurality tier for a population count
    Tier {
        /// Territory population
        population: u64,
    },

    /// Print a full pricing quote for a territory
    Quote {
        /// Territory population
        population: u64,

        /// Quote the territory as a promotional free claim
        #[clap(long)]
        free: bool,

        /// Manual tier override (rural, small, medium, metro)
        #[clap(long)]
        tier: Option<String>,
    },

    /// Rank bids by priority score
    Score {
        /// Path to a JSON array of bids
        #[clap(long)]
        bids: PathBuf,

        /// Path to a JSON array of contractor profiles
        #[clap(long)]
        contractors: PathBuf,
    },

    /// Record a free territory claim for a legal entity
    Claim {
        /// Path to the sled claim ledger
        #[clap(long)]
        ledger: PathBuf,

        /// User account performing the claim
        #[clap(long)]
        user: String,

        /// Territory being claimed
        #[clap(long)]
        territory: u64,

        /// Legal form of the entity (individual, llc, corporation)
        #[clap(long)]
        entity_type: String,

        /// Entity contact email
        #[clap(long)]
        email: String,

        /// Entity tax id, if any
        #[clap(long)]
        tax_id: Option<String>,
    },

    /// Show recorded free claims and remaining promotional slots
    Claims {
        /// Path to the sled claim ledger
        #[clap(long)]
        ledger: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Tier { population } => {
            println!("{}", rurality_tier(population));
            Ok(())
        }
        Commands::Quote {
            population,
            free,
            tier,
        } => quote(population, free, tier.as_deref()),
        Commands::Score { bids, contractors } => score(&bids, &contractors),
        Commands::Claim {
            ledger,
            user,
            territory,
            entity_type,
            email,
            tax_id,
        } => claim(&ledger, &user, territory, &entity_type, &email, tax_id).await,
        Commands::Claims { ledger } => claims(&ledger).await,
    }
}

fn quote(population: u64, free: bool, tier_override: Option<&str>) -> Result<()> {
    let mut territory = Territory::new(0, "quote", population);
    if let Some(raw) = tier_override {
        let tier = RuralityTier::from_str(raw)
            .map_err(|_| anyhow!("Unknown tier '{}': expected rural, small, medium or metro", raw))?;
        territory.rurality_classification = Some(tier);
    }

    let pricing = calculate_territory_pricing(&territory, free);

    println!("{}", "Territory quote".bold());
    println!("  Tier:              {}", pricing.rurality_tier.to_string().cyan());
    println!("  One-time fee:      ${}", pricing.one_time_fee);
    println!("  Monthly fee:       ${}", pricing.monthly_fee);
    println!("  First year total:  ${}", pricing.total_first_year);
    println!("  Projected jobs:    {}", pricing.projected_job_output);
    if pricing.is_free {
        println!("  {}", "Free promotional claim".green());
    }
    Ok(())
}

fn score(bids_path: &Path, contractors_path: &Path) -> Result<()> {
    let bids: Vec<Bid> = read_json(bids_path).context("Failed to read bids file")?;
    let contractors: Vec<Contractor> =
        read_json(contractors_path).context("Failed to read contractors file")?;

    let by_id: HashMap<String, Contractor> = contractors
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();

    let ranked = sort_bids_by_priority(&bids, &by_id);
    if ranked.is_empty() {
        println!("{}", "No bids to rank".yellow());
        return Ok(());
    }

    println!("{}", "Bids by priority".bold());
    for (rank, bid) in ranked.iter().enumerate() {
        let score = by_id
            .get(&bid.contractor_id)
            .map(calculate_bid_score)
            .unwrap_or(0.0);
        println!(
            "  {:>3}. {}  score {:.2}  ${:.2}",
            rank + 1,
            bid.contractor_id.cyan(),
            score,
            bid.amount
        );
    }
    Ok(())
}

async fn claim(
    ledger_path: &Path,
    user: &str,
    territory: u64,
    entity_type: &str,
    email: &str,
    tax_id: Option<String>,
) -> Result<()> {
    let entity_type = EntityType::from_str(entity_type).map_err(|_| {
        anyhow!(
            "Unknown entity type '{}': expected individual, llc or corporation",
            entity_type
        )
    })?;
    let mut entity = EntityInfo::new(entity_type, email);
    if let Some(tax_id) = tax_id {
        entity = entity.with_tax_id(tax_id);
    }

    let ledger = SledClaimLedger::open(ledger_path)?;
    let program = FreeClaimProgram::new(Arc::new(ledger));

    let record = program.claim_free(user, &entity, territory).await?;
    println!(
        "{} territory {} for entity {}",
        "Claimed".green().bold(),
        territory,
        record.entity_hash
    );
    Ok(())
}

async fn claims(ledger_path: &Path) -> Result<()> {
    let ledger = Arc::new(SledClaimLedger::open(ledger_path)?);
    let recorded = ledger.count().await?;
    let program = FreeClaimProgram::new(ledger);

    let remaining = program.claims_remaining().await?;
    println!("Recorded free claims: {}", recorded);
    println!("Remaining slots:      {}", remaining);
    if remaining == 0 {
        println!("{}", "Promotional pool exhausted".red());
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}
