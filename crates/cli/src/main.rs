use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{Dataset, Paper, ACTIVE_USER_ID};
use ranking::{normalize, rank, rank_with_scores, ItemModel, ScoreBasis, ScoredItem};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// PaperRecs - ranks paper summary cards for a reader
#[derive(Parser)]
#[command(name = "paper-recs")]
#[command(about = "Paper ranking using item-based collaborative filtering", long_about = None)]
struct Cli {
    /// Directory holding paper_seeds.json (and optionally feedback.json)
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Catalog variants generated per seed paper
    #[arg(long, default_value = "3")]
    variants: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the whole catalog for a user
    Rank {
        /// User ID to rank papers for
        #[arg(long, default_value = ACTIVE_USER_ID)]
        user: String,

        /// Show canonical key and score origin for each paper
        #[arg(long)]
        explain: bool,
    },

    /// Show a user's ratings
    User {
        /// User ID to display
        #[arg(long, default_value = ACTIVE_USER_ID)]
        user: String,
    },

    /// List papers similar to a given paper
    Similar {
        /// Paper ID (variant ids are accepted)
        #[arg(long)]
        paper: String,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of rank calls to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent rank calls
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let dataset = Arc::new(
        Dataset::load_from_files(&cli.data_dir, cli.variants)
            .with_context(|| format!("Failed to load catalog from {}", cli.data_dir.display()))?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Rank { user, explain } => handle_rank(&dataset, &user, explain)?,
        Commands::User { user } => handle_user(&dataset, &user)?,
        Commands::Similar { paper } => handle_similar(&dataset, &paper)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(dataset, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'rank' command
fn handle_rank(dataset: &Dataset, user: &str, explain: bool) -> Result<()> {
    if dataset.get_user_ratings(user).is_empty() {
        warn!("User {} has no ratings; ranking by popularity only", user);
    }

    let papers: Vec<&Paper> = dataset.papers().iter().collect();
    let ranked = rank_with_scores(papers, dataset.feedback(), user);

    print_ranking(user, &ranked, explain);
    Ok(())
}

/// Handle the 'user' command
fn handle_user(dataset: &Dataset, user: &str) -> Result<()> {
    let ratings = dataset.get_user_ratings(user);
    if ratings.is_empty() {
        bail!("User {} not found in feedback table", user);
    }

    println!("{}", format!("User: {}", user).bold().blue());
    println!("{}Number of ratings: {}", "• ".cyan(), ratings.len());

    let average = ratings.iter().map(|(_, r)| r).sum::<f64>() / ratings.len() as f64;
    println!("{}Average rating: {:.2}", "• ".cyan(), average);

    println!("Ratings:");
    for (paper_id, rating) in &ratings {
        let key = normalize(paper_id);
        let title = dataset
            .get_paper(paper_id)
            .or_else(|| dataset.get_paper(key))
            .map(|p| p.title.as_str())
            .unwrap_or("(not in catalog)");
        if key == *paper_id {
            println!("  - {:.1}  {} [{}]", rating, title, paper_id);
        } else {
            println!("  - {:.1}  {} [{} -> {}]", rating, title, paper_id, key);
        }
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(dataset: &Dataset, paper_id: &str) -> Result<()> {
    let key = normalize(paper_id);
    let model = ItemModel::from_feedback(dataset.feedback());

    if model.ratings().get(key).is_none() {
        return Err(anyhow!("Paper {} has no ratings, so it has no neighbors", paper_id));
    }

    let mut neighbors: Vec<(&str, f64)> = model
        .similarities()
        .neighbors(key)
        .map(|row| row.iter().map(|(k, s)| (k.as_str(), *s)).collect())
        .unwrap_or_default();
    neighbors.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("{}", format!("Papers similar to '{}':", key).bold().blue());
    if neighbors.is_empty() {
        println!("  (none: no co-rated papers)");
    }
    for (neighbor, similarity) in neighbors {
        let title = dataset
            .get_paper(neighbor)
            .map(|p| p.title.as_str())
            .unwrap_or("(not in catalog)");
        println!(
            "  {:.3}  {} [{}] avg {:.2}",
            similarity,
            title,
            neighbor,
            model.popularity().score(neighbor)
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(dataset: Arc<Dataset>, requests: usize, concurrent: usize) -> Result<()> {
    let users: Vec<String> = dataset.user_ids().into_iter().map(String::from).collect();
    if users.is_empty() {
        bail!("Feedback table is empty; nothing to benchmark");
    }
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    info!(
        "Running {} rank calls, {} at a time, over {} papers",
        requests,
        concurrent,
        dataset.papers().len()
    );

    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // Each call rebuilds everything from the shared, read-only dataset
    let mut handles = Vec::with_capacity(requests);
    for _ in 0..requests {
        let user = users[rand::random::<u64>() as usize % users.len()].clone();
        let dataset = Arc::clone(&dataset);
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let papers: Vec<&Paper> = dataset.papers().iter().collect();
                let ranked = rank(papers, dataset.feedback(), &user);
                debug_assert_eq!(ranked.len(), dataset.papers().len());
                start.elapsed()
            })
            .await
            .map_err(anyhow::Error::from)
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / timings.len() as u32;
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(&timings, 0.50));
    println!("P95 latency: {:?}", percentile(&timings, 0.95));
    println!("P99 latency: {:?}", percentile(&timings, 0.99));
    println!("Throughput: {:.2} rank calls/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of an ascending, non-empty slice
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let index = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[index]
}

/// Helper function to format and print a ranking
fn print_ranking(user: &str, ranked: &[ScoredItem<&Paper>], explain: bool) {
    println!("{}", format!("Papers for {}:", user).bold().blue());
    for (position, scored) in ranked.iter().enumerate() {
        let paper = scored.item;
        println!(
            "{}. {} [{}] - Score: {:.2}",
            (position + 1).to_string().green(),
            paper.title,
            paper.topic,
            scored.score
        );
        if explain {
            println!("   Key: {} | {}", scored.canonical_key, describe_basis(scored.basis));
        }
    }
}

fn describe_basis(basis: ScoreBasis) -> String {
    match basis {
        ScoreBasis::Direct => "rated by you".to_string(),
        ScoreBasis::Neighbors { count } => {
            format!("predicted from {} similar paper(s) you rated", count)
        }
        ScoreBasis::Popularity => "average rating across readers".to_string(),
        ScoreBasis::NoSignal => "no ratings yet".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_bounds() {
        let timings: Vec<Duration> = (1..=10).map(Duration::from_millis).collect();
        assert_eq!(percentile(&timings, 0.50), Duration::from_millis(6));
        assert_eq!(percentile(&timings, 0.99), Duration::from_millis(10));
        assert_eq!(percentile(&timings[..1], 0.95), Duration::from_millis(1));
    }

    #[test]
    fn test_describe_basis() {
        assert_eq!(describe_basis(ScoreBasis::Direct), "rated by you");
        assert!(describe_basis(ScoreBasis::Neighbors { count: 2 }).contains('2'));
    }

    #[test]
    fn test_cli_parses_rank_defaults() {
        let cli = Cli::try_parse_from(["paper-recs", "rank"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert_eq!(cli.variants, 3);
        match cli.command {
            Commands::Rank { user, explain } => {
                assert_eq!(user, ACTIVE_USER_ID);
                assert!(!explain);
            }
            _ => panic!("expected rank command"),
        }
    }
}
