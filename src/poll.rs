use log::{info, warn};
use scraper::Html;
use serde::Serialize;

use crate::error::{Result, ScrapeError};
use crate::fetcher::Fetch;
use crate::rules::{ExtractionRule, PollRules};
use crate::text::{element_text, first_text_run, normalize_name};

/// One line of a ranking widget: a candidate and the percentage shown next
/// to them, kept as page text ("32%").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub percent: String,
}

/// The three rankings on the poll page. `unfavorability` pairs position by
/// position with `favorability`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollLists {
    pub support: Vec<RankedEntry>,
    pub favorability: Vec<RankedEntry>,
    pub unfavorability: Vec<RankedEntry>,
}

/// A row of `ranks.csv`. Field order matches the CSV header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Primary")]
    pub primary: String,
    #[serde(rename = "Favorability")]
    pub favorability: Option<String>,
    #[serde(rename = "Unfavorability")]
    pub unfavorability: Option<String>,
}

impl PollEntry {
    /// How many of the three percentages this entry carries.
    pub fn percent_count(&self) -> usize {
        1 + usize::from(self.favorability.is_some()) + usize::from(self.unfavorability.is_some())
    }
}

fn cell_texts(document: &Html, rule: &ExtractionRule) -> Result<Vec<String>> {
    rule.select(document)
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            let text = element_text(node);
            first_text_run(&text)
                .map(str::to_string)
                .ok_or_else(|| ScrapeError::EmptyText { rule: rule.name().to_string(), index })
        })
        .collect()
}

/// Pairs the n-th name with the n-th value. A value list shorter than the
/// name list means the page layout changed and is an error; extra values
/// are ignored.
fn ranked_list(
    names: &[String],
    names_rule: &ExtractionRule,
    values: Vec<String>,
    values_rule: &ExtractionRule,
) -> Result<Vec<RankedEntry>> {
    if values.len() < names.len() {
        return Err(ScrapeError::LengthMismatch {
            names: names_rule.name().to_string(),
            values: values_rule.name().to_string(),
            expected: names.len(),
            found: values.len(),
        });
    }
    if values.len() > names.len() {
        warn!(
            "Ignoring {} surplus values from '{}'",
            values.len() - names.len(),
            values_rule.name()
        );
    }

    Ok(names
        .iter()
        .zip(values)
        .map(|(name, percent)| RankedEntry { name: name.clone(), percent })
        .collect())
}

/// Reads the three rankings. The support ranking drives the join, so a page
/// where it matches nothing is an error.
pub fn extract_polls(document: &Html, rules: &PollRules) -> Result<PollLists> {
    let support_names: Vec<String> = cell_texts(document, &rules.support_names)?
        .iter()
        .map(|n| normalize_name(n))
        .collect();
    if support_names.is_empty() {
        return Err(ScrapeError::MissingElement { rule: rules.support_names.name().to_string() });
    }
    let favorability_names: Vec<String> = cell_texts(document, &rules.favorability_names)?
        .iter()
        .map(|n| normalize_name(n))
        .collect();

    let support = ranked_list(
        &support_names,
        &rules.support_names,
        cell_texts(document, &rules.support_values)?,
        &rules.support_values,
    )?;
    let favorability = ranked_list(
        &favorability_names,
        &rules.favorability_names,
        cell_texts(document, &rules.favorability_values)?,
        &rules.favorability_values,
    )?;
    let unfavorability = ranked_list(
        &favorability_names,
        &rules.favorability_names,
        cell_texts(document, &rules.unfavorability_values)?,
        &rules.unfavorability_values,
    )?;

    Ok(PollLists { support, favorability, unfavorability })
}

/// Attaches favorability and unfavorability to each support entry by exact
/// name. The first favorability match wins and unfavorability is read from
/// the same position. Entries with no match keep `None` in both columns.
pub fn join_polls(lists: &PollLists) -> Vec<PollEntry> {
    lists
        .support
        .iter()
        .map(|entry| {
            let matched = lists.favorability.iter().position(|f| f.name == entry.name);
            PollEntry {
                name: entry.name.clone(),
                primary: entry.percent.clone(),
                favorability: matched.map(|j| lists.favorability[j].percent.clone()),
                unfavorability: matched
                    .and_then(|j| lists.unfavorability.get(j))
                    .map(|u| u.percent.clone()),
            }
        })
        .collect()
}

/// Keeps entries that carry at least two of the three percentages.
pub fn drop_unmatched(entries: Vec<PollEntry>) -> Vec<PollEntry> {
    entries.into_iter().filter(|e| e.percent_count() >= 2).collect()
}

/// Pipeline B: one page, three rankings, joined on the support list.
pub fn scrape_polls<F: Fetch>(
    fetcher: &F,
    url: &str,
    rules: &PollRules,
) -> Result<Vec<PollEntry>> {
    let page = fetcher.fetch_document(url)?;
    let lists = extract_polls(&page, rules)?;
    info!(
        "Rankings: {} support, {} favorability, {} unfavorability",
        lists.support.len(),
        lists.favorability.len(),
        lists.unfavorability.len()
    );

    let joined = join_polls(&lists);
    let total = joined.len();
    let kept = drop_unmatched(joined);
    info!("Kept {} of {} support entries after join", kept.len(), total);
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::StubFetcher;

    const POLL_URL: &str = "https://polls.example/primary/";

    fn rules() -> PollRules {
        PollRules::standard().unwrap()
    }

    fn entry(name: &str, percent: &str) -> RankedEntry {
        RankedEntry { name: name.to_string(), percent: percent.to_string() }
    }

    fn support_row(name: &str, percent: &str) -> String {
        format!(
            "<div class=\"ranking\"><div class=\"ranking__info\">\
             <div class=\"ranking__name\">\n\t\t{name}\n\t</div>\
             <div class=\"ranking__bar\">\n\t{percent}\n</div></div></div>"
        )
    }

    fn favorability_row(name: &str, positive: &str, negative: &str) -> String {
        format!(
            "<div class=\"ranking__info\">\
             <div class=\"ranking__name\">\n\t{name}\n</div>\
             <div class=\"ranking__bar-group\">\
             <span class=\"ranking__positive\">\t{positive}\n</span>\
             <span class=\"ranking__negative\">\t{negative}\n</span></div></div>"
        )
    }

    fn poll_page(support: &[(&str, &str)], favorability: &[(&str, &str, &str)]) -> String {
        let support: String = support.iter().map(|(n, p)| support_row(n, p)).collect();
        let favorability: String = favorability
            .iter()
            .map(|(n, pos, neg)| favorability_row(n, pos, neg))
            .collect();
        format!(
            "<html><body><div id=\"content-00\">{support}</div>\
             <div class=\"ranking ranking-favorability\">{favorability}</div></body></html>"
        )
    }

    #[test]
    fn extract_polls_reads_all_three_rankings() {
        let doc = Html::parse_document(&poll_page(
            &[("Joe Biden", "32%"), ("Bernie Sanders", "21%")],
            &[("Bernie Sanders", "74%", "19%")],
        ));
        let lists = extract_polls(&doc, &rules()).unwrap();

        assert_eq!(lists.support, vec![entry("Joe_Biden", "32%"), entry("Bernie_Sanders", "21%")]);
        assert_eq!(lists.favorability, vec![entry("Bernie_Sanders", "74%")]);
        assert_eq!(lists.unfavorability, vec![entry("Bernie_Sanders", "19%")]);
    }

    #[test]
    fn poll_names_share_profile_normalization() {
        let doc = Html::parse_document(&poll_page(&[("Julián Castro", "1%")], &[]));
        let lists = extract_polls(&doc, &rules()).unwrap();
        assert_eq!(lists.support[0].name, "Julian_Castro");
    }

    #[test]
    fn missing_values_are_an_error() {
        let doc = Html::parse_document(
            "<div id=\"content-00\"><div class=\"ranking\"><div class=\"ranking__info\">\
             <div class=\"ranking__name\">Joe Biden</div></div></div></div>",
        );
        assert!(matches!(
            extract_polls(&doc, &rules()),
            Err(ScrapeError::LengthMismatch { expected: 1, found: 0, .. })
        ));
    }

    #[test]
    fn page_without_support_ranking_is_an_error() {
        let doc = Html::parse_document(&poll_page(&[], &[("Joe Biden", "70%", "22%")]));
        match extract_polls(&doc, &rules()) {
            Err(ScrapeError::MissingElement { rule }) => assert_eq!(rule, "support_names"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn blank_cell_is_an_error() {
        let doc = Html::parse_document(&poll_page(&[("\n", "5%")], &[]));
        assert!(matches!(
            extract_polls(&doc, &rules()),
            Err(ScrapeError::EmptyText { index: 0, .. })
        ));
    }

    #[test]
    fn join_attaches_first_matching_favorability() {
        let lists = PollLists {
            support: vec![entry("A", "30%"), entry("B", "20%")],
            favorability: vec![entry("B", "60%"), entry("A", "55%"), entry("A", "99%")],
            unfavorability: vec![entry("B", "25%"), entry("A", "35%"), entry("A", "1%")],
        };
        let joined = join_polls(&lists);
        assert_eq!(
            joined,
            vec![
                PollEntry {
                    name: "A".into(),
                    primary: "30%".into(),
                    favorability: Some("55%".into()),
                    unfavorability: Some("35%".into()),
                },
                PollEntry {
                    name: "B".into(),
                    primary: "20%".into(),
                    favorability: Some("60%".into()),
                    unfavorability: Some("25%".into()),
                },
            ]
        );
    }

    #[test]
    fn unmatched_support_entries_are_dropped() {
        let lists = PollLists {
            support: vec![
                entry("A", "30%"),
                entry("B", "20%"),
                entry("C", "10%"),
                entry("D", "5%"),
            ],
            favorability: vec![entry("D", "40%"), entry("Z", "10%")],
            unfavorability: vec![entry("D", "50%"), entry("Z", "80%")],
        };
        let kept = drop_unmatched(join_polls(&lists));
        // Consecutive misses must all go; none of them is skipped.
        let names: Vec<&str> = kept.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["D"]);
    }

    #[test]
    fn two_of_three_percentages_is_enough() {
        let partial = PollEntry {
            name: "A".into(),
            primary: "3%".into(),
            favorability: Some("40%".into()),
            unfavorability: None,
        };
        let bare = PollEntry { favorability: None, ..partial.clone() };
        assert_eq!(partial.percent_count(), 2);
        assert_eq!(drop_unmatched(vec![partial.clone(), bare]), vec![partial]);
    }

    #[test]
    fn scrape_polls_joins_and_filters() {
        let fetcher = StubFetcher::default().with_page(
            POLL_URL,
            &poll_page(
                &[("Joe Biden", "32%"), ("Michael Bennet", "0%"), ("Bernie Sanders", "21%")],
                &[("Bernie Sanders", "74%", "19%"), ("Joe Biden", "70%", "22%")],
            ),
        );
        let rows = scrape_polls(&fetcher, POLL_URL, &rules()).unwrap();

        let names: Vec<&str> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Joe_Biden", "Bernie_Sanders"]);
        assert_eq!(rows[0].favorability.as_deref(), Some("70%"));
        assert_eq!(rows[0].unfavorability.as_deref(), Some("22%"));
    }
}
