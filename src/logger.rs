use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Console logging for a scrape run: timestamp, level, emitting module.
pub fn init() {
    Builder::new()
        .format(|buf, record| {
            let module = record
                .target()
                .strip_prefix("candidate_scraper_lib::")
                .unwrap_or(record.target());
            writeln!(
                buf,
                "{} [{}] {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                module,
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        // One line per page comes from the pipelines; the HTTP stack stays quiet.
        .filter(Some("reqwest"), LevelFilter::Warn)
        .filter(Some("html5ever"), LevelFilter::Warn)
        .filter(Some("selectors"), LevelFilter::Warn)
        .init();

    log::info!("Logger initialized.");
}
