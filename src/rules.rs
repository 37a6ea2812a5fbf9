//! Named CSS extraction rules.
//!
//! Every field the pipelines read from a page goes through one
//! [`ExtractionRule`]. The rules are positional and tied to the current
//! markup of the two source sites; when that markup changes, only the rule
//! sets in this module need to follow.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

#[derive(Debug, Clone)]
pub struct ExtractionRule {
    name: String,
    selector: Selector,
}

impl ExtractionRule {
    pub fn new(name: &str, css: &str) -> Result<Self> {
        let selector = Selector::parse(css).map_err(|e| ScrapeError::Selector {
            rule: name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(ExtractionRule { name: name.to_string(), selector })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, node: &ElementRef) -> bool {
        self.selector.matches(node)
    }

    pub fn select<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(&self.selector).collect()
    }

    /// First match in the document, or `MissingElement`.
    pub fn first<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>> {
        document
            .select(&self.selector)
            .next()
            .ok_or_else(|| ScrapeError::MissingElement { rule: self.name.clone() })
    }
}

/// Rules for the profile index page and the per-candidate pages.
#[derive(Debug, Clone)]
pub struct ProfileRules {
    pub links: ExtractionRule,
    pub title: ExtractionRule,
    /// Key facts, key issues, key criticisms; picked by heading position,
    /// not by heading text.
    pub sections: [ExtractionRule; 3],
    pub emphasis: ExtractionRule,
}

impl ProfileRules {
    pub fn standard() -> Result<Self> {
        Ok(ProfileRules {
            links: ExtractionRule::new(
                "candidate_links",
                "div#hidden-facfee57-8089-4f14-bbdf-dc44ffa0ea4a ul:nth-of-type(1) li.StoryBody__item--1cHYD a",
            )?,
            title: ExtractionRule::new("page_title", "h1")?,
            sections: [
                section_rule("key_facts", 1)?,
                section_rule("key_issues", 2)?,
                section_rule("key_criticisms", 3)?,
            ],
            emphasis: ExtractionRule::new("bullet_label", "strong")?,
        })
    }
}

fn section_rule(name: &str, position: usize) -> Result<ExtractionRule> {
    ExtractionRule::new(
        name,
        &format!("div.StoryBody__root--2VihO h2:nth-of-type({position}) + ul li"),
    )
}

/// Rules for the polling page. Names and values are separate node lists that
/// pair up by position.
#[derive(Debug, Clone)]
pub struct PollRules {
    pub support_names: ExtractionRule,
    pub support_values: ExtractionRule,
    pub favorability_names: ExtractionRule,
    pub favorability_values: ExtractionRule,
    /// Paired with `favorability_names`; the widget lists each name once.
    pub unfavorability_values: ExtractionRule,
}

impl PollRules {
    pub fn standard() -> Result<Self> {
        const SUPPORT: &str = "div#content-00 div.ranking div.ranking__info";
        const FAVORABILITY: &str = "div.ranking.ranking-favorability div.ranking__info";

        Ok(PollRules {
            support_names: ExtractionRule::new(
                "support_names",
                &format!("{SUPPORT} div.ranking__name"),
            )?,
            support_values: ExtractionRule::new(
                "support_values",
                &format!("{SUPPORT} div.ranking__bar"),
            )?,
            favorability_names: ExtractionRule::new(
                "favorability_names",
                &format!("{FAVORABILITY} div.ranking__name"),
            )?,
            favorability_values: ExtractionRule::new(
                "favorability_values",
                &format!("{FAVORABILITY} div.ranking__bar-group span.ranking__positive"),
            )?,
            unfavorability_values: ExtractionRule::new(
                "unfavorability_values",
                &format!("{FAVORABILITY} div.ranking__bar-group span.ranking__negative"),
            )?,
        })
    }
}
