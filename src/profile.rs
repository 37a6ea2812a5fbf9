use indexmap::IndexMap;
use log::{debug, info};
use scraper::{ElementRef, Html, Node};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::fetcher::Fetch;
use crate::rules::{ExtractionRule, ProfileRules};
use crate::text::{element_text, normalize_dashes, normalize_name, trim_field};

/// Title word that marks the one profile page whose heading reads
/// "Everything You Need to Know: <First> <Last>".
const LONG_TITLE_SENTINEL: &str = "Everything";

/// Prefix that sets criticism fields apart from facts and issues.
const CRITICISM_MARKER: char = '*';

/// 1-based position of the criticism section among the bullet sections.
const CRITICISM_SECTION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    pub label: String,
    pub url: String,
}

/// Field label to field text, in the order the bullets appear on the page.
pub type CandidateFields = IndexMap<String, String>;

/// Everything pipeline A produces for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSet {
    /// Normalized candidate name to that candidate's fields.
    pub candidates: IndexMap<String, CandidateFields>,
    /// Names in the order the candidate pages were visited, duplicates kept.
    pub names: Vec<String>,
}

impl ProfileSet {
    /// A repeated name keeps its first position but takes the newer fields.
    pub fn insert(&mut self, name: String, fields: CandidateFields) {
        self.names.push(name.clone());
        self.candidates.insert(name, fields);
    }
}

/// Collects the candidate links from the index page. An index without the
/// link list yields no candidates.
pub fn discover_links(
    document: &Html,
    base_url: &str,
    rules: &ProfileRules,
) -> Result<Vec<CandidateLink>> {
    let base = Url::parse(base_url).map_err(|source| ScrapeError::InvalidUrl {
        href: base_url.to_string(),
        source,
    })?;

    rules
        .links
        .select(document)
        .into_iter()
        .map(|anchor| -> Result<CandidateLink> {
            let href = anchor
                .value()
                .attr("href")
                .ok_or_else(|| ScrapeError::MissingAttribute {
                    rule: rules.links.name().to_string(),
                    attr: "href".to_string(),
                })?;
            let url = base
                .join(href)
                .map_err(|source| ScrapeError::InvalidUrl { href: href.to_string(), source })?;
            Ok(CandidateLink {
                label: element_text(anchor).trim().to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

/// Derives the normalized candidate name from a page heading.
///
/// Headings normally read "<Name>: <tagline>", so the name is whatever comes
/// before the first colon. One page instead reads
/// "Everything You Need to Know: <First> <Last>"; for it the name is the last
/// two words.
pub fn candidate_name(title: &str) -> String {
    let title = title.trim();
    let words: Vec<&str> = title.split(' ').collect();

    let name = if words.first() == Some(&LONG_TITLE_SENTINEL) && words.len() >= 2 {
        words[words.len() - 2..].join(" ")
    } else {
        title.split(':').next().unwrap_or(title).trim().to_string()
    };

    normalize_name(&name)
}

/// The bold element a bullet opens with, if any. Whitespace and comments
/// before it are skipped; any other text first means the bullet has no lead.
fn lead_emphasis<'a>(item: ElementRef<'a>, emphasis: &ExtractionRule) -> Option<ElementRef<'a>> {
    for child in item.children() {
        match child.value() {
            Node::Text(text) if text.trim().is_empty() => continue,
            Node::Comment(_) => continue,
            Node::Element(_) => return ElementRef::wrap(child).filter(|el| emphasis.matches(el)),
            _ => return None,
        }
    }
    None
}

/// Turns the bullets of one section into (label, value) fields.
///
/// `section` is 1-based. Bullets that open with bold text use it as the
/// label; bold text later in a bullet is part of the value. In
/// the criticism section every label gets the `*` marker and bullets with
/// no bold text are numbered "Criticism N" by position; in the other
/// sections such bullets are dropped.
pub fn extract_section(
    items: &[ElementRef],
    section: usize,
    emphasis: &ExtractionRule,
) -> Vec<(String, String)> {
    let is_criticism = section == CRITICISM_SECTION;
    let mut fields = Vec::new();

    for (idx, item) in items.iter().enumerate() {
        let text = element_text(*item);

        match lead_emphasis(*item, emphasis) {
            Some(lead) => {
                let raw_label = element_text(lead);
                let rest = text
                    .split_once(raw_label.as_str())
                    .map(|(_, after)| after)
                    .unwrap_or(text.as_str());
                let value = normalize_dashes(rest);

                let label = if is_criticism {
                    format!("{CRITICISM_MARKER}{raw_label}")
                } else {
                    raw_label
                };
                fields.push((trim_field(&label).to_string(), trim_field(&value).to_string()));
            }
            None if is_criticism => {
                let label = format!("{CRITICISM_MARKER}Criticism {}", idx + 1);
                let value = normalize_dashes(&text);
                fields.push((label, trim_field(&value).to_string()));
            }
            None => {
                debug!("Dropping unlabeled bullet in section {}: {:?}", section, text.trim());
            }
        }
    }

    fields
}

/// Name and fields from one candidate page. A page where none of the
/// section rules match any bullet is an error.
pub fn extract_candidate(
    document: &Html,
    rules: &ProfileRules,
) -> Result<(String, CandidateFields)> {
    let title = element_text(rules.title.first(document)?);
    let name = candidate_name(&title);

    let sections: Vec<Vec<ElementRef>> =
        rules.sections.iter().map(|rule| rule.select(document)).collect();
    if sections.iter().all(Vec::is_empty) {
        let names: Vec<&str> = rules.sections.iter().map(ExtractionRule::name).collect();
        return Err(ScrapeError::MissingElement { rule: names.join(", ") });
    }

    let mut fields = CandidateFields::new();
    for (i, items) in sections.iter().enumerate() {
        for (label, value) in extract_section(items, i + 1, &rules.emphasis) {
            fields.insert(label, value);
        }
    }

    Ok((name, fields))
}

/// Pipeline A: index page, then every linked candidate page in order. Any
/// failing candidate page aborts the whole run.
pub fn scrape_profiles<F: Fetch>(
    fetcher: &F,
    index_url: &str,
    rules: &ProfileRules,
) -> Result<ProfileSet> {
    let index = fetcher.fetch_document(index_url)?;
    let links = discover_links(&index, index_url, rules)?;
    info!("Found {} candidate links", links.len());

    let mut profiles = ProfileSet::default();
    for (i, link) in links.iter().enumerate() {
        info!("Processing {} / {} : {}", i + 1, links.len(), link.label);
        let page = fetcher.fetch_document(&link.url)?;
        let (name, fields) = extract_candidate(&page, rules)?;
        info!("Extracted {} fields for {}", fields.len(), name);
        profiles.insert(name, fields);
    }

    Ok(profiles)
}
