use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use indexmap::IndexMap;
use log::info;

use crate::config::OutputPaths;
use crate::error::Result;
use crate::poll::PollEntry;
use crate::profile::{CandidateFields, ProfileSet};

pub const RANKS_HEADER: [&str; 4] = ["Name", "Primary", "Favorability", "Unfavorability"];

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer)
}

/// One JSON object: candidate name to label to value.
pub fn write_candidates_json<W: Write>(writer: W, profiles: &ProfileSet) -> Result<()> {
    serde_json::to_writer(writer, &profiles.candidates)?;
    Ok(())
}

pub fn load_candidates_json<R: Read>(reader: R) -> Result<IndexMap<String, CandidateFields>> {
    Ok(serde_json::from_reader(reader)?)
}

/// All names on a single comma-separated row.
pub fn write_names_csv<W: Write>(writer: W, names: &[String]) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(names)?;
    wtr.flush()?;
    Ok(())
}

/// Header row, then one row per entry. A missing percentage is written as an
/// empty cell so every row has four columns.
pub fn write_ranks_csv<W: Write>(writer: W, entries: &[PollEntry]) -> Result<()> {
    let mut wtr = csv_writer(writer);
    wtr.write_record(RANKS_HEADER)?;
    for entry in entries {
        wtr.serialize(entry)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes `candidates.json` and `names.csv`, replacing any earlier run.
pub fn save_profiles(profiles: &ProfileSet, paths: &OutputPaths) -> Result<()> {
    let mut json = create(&paths.candidates_json)?;
    write_candidates_json(&mut json, profiles)?;
    json.flush()?;
    info!("Wrote {} candidates to {:?}", profiles.candidates.len(), paths.candidates_json);

    write_names_csv(create(&paths.names_csv)?, &profiles.names)?;
    info!("Wrote {} names to {:?}", profiles.names.len(), paths.names_csv);
    Ok(())
}

pub fn save_ranks(entries: &[PollEntry], paths: &OutputPaths) -> Result<()> {
    write_ranks_csv(create(&paths.ranks_csv)?, entries)?;
    info!("Wrote {} rows to {:?}", entries.len(), paths.ranks_csv);
    Ok(())
}
