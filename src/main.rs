use std::error::Error;

use log::{error, info};

use candidate_scraper_lib::config::{POLL_PAGE_URL, PROFILE_INDEX_URL};
use candidate_scraper_lib::{logger, HttpFetcher, OutputPaths};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init();
    info!("Starting candidate scraper...");

    let fetcher = HttpFetcher::new()?;
    let paths = OutputPaths::default();

    if let Err(e) = candidate_scraper_lib::run(&fetcher, PROFILE_INDEX_URL, POLL_PAGE_URL, &paths) {
        error!("Scrape aborted: {}", e);
        return Err(e.into());
    }

    info!("Scraping Completed.");
    Ok(())
}
