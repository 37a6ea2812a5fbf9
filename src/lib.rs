pub mod config;
pub mod error;
pub mod fetcher;
pub mod logger;
pub mod output;
pub mod poll;
pub mod profile;
pub mod rules;
pub mod text;

// Exporting types for convenience
pub use config::OutputPaths;
pub use error::{Result, ScrapeError};
pub use fetcher::{Fetch, HttpFetcher};
pub use poll::{PollEntry, PollLists, RankedEntry};
pub use profile::{CandidateFields, CandidateLink, ProfileSet};
pub use rules::{ExtractionRule, PollRules, ProfileRules};

use log::info;

/// Runs both pipelines back to back: profiles first, then polls. Each
/// pipeline's files are written as soon as it finishes.
pub fn run<F: Fetch>(
    fetcher: &F,
    profile_index_url: &str,
    poll_url: &str,
    paths: &OutputPaths,
) -> Result<()> {
    let profile_rules = ProfileRules::standard()?;
    let profiles = profile::scrape_profiles(fetcher, profile_index_url, &profile_rules)?;
    output::save_profiles(&profiles, paths)?;

    let poll_rules = PollRules::standard()?;
    let ranks = poll::scrape_polls(fetcher, poll_url, &poll_rules)?;
    output::save_ranks(&ranks, paths)?;

    info!(
        "Done: {} candidate profiles, {} poll rows",
        profiles.candidates.len(),
        ranks.len()
    );
    Ok(())
}
