use std::path::{Path, PathBuf};

/// Index page listing one link per Democratic candidate profile.
pub const PROFILE_INDEX_URL: &str = "https://www.axios.com/2020-presidential-election-candidate-profiles1552432119-facfee57-8089-4f14-bbdf-dc44ffa0ea4a.html";

/// Polling aggregator page with the support and favorability rankings.
pub const POLL_PAGE_URL: &str = "https://morningconsult.com/2020-democratic-primary/";

pub const CANDIDATES_JSON: &str = "candidates.json";
pub const NAMES_CSV: &str = "names.csv";
pub const RANKS_CSV: &str = "ranks.csv";

/// Where the three output files land. Existing files are overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub candidates_json: PathBuf,
    pub names_csv: PathBuf,
    pub ranks_csv: PathBuf,
}

impl OutputPaths {
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        OutputPaths {
            candidates_json: dir.join(CANDIDATES_JSON),
            names_csv: dir.join(NAMES_CSV),
            ranks_csv: dir.join(RANKS_CSV),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        // Relative paths: the working directory of the run.
        OutputPaths {
            candidates_json: PathBuf::from(CANDIDATES_JSON),
            names_csv: PathBuf::from(NAMES_CSV),
            ranks_csv: PathBuf::from(RANKS_CSV),
        }
    }
}
