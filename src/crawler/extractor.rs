//! Contact extraction from HTML pages
//!
//! This module pulls three things out of a page:
//! - The organization name, from the first element matching a CSS selector
//! - Every e-mail address and phone number in the page text
//! - Every anchor link, resolved against the page URL

use crate::storage::ExtractedRecord;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// `local-part@domain.tld`, matched case-insensitively
const EMAIL_PATTERN: &str = r"(?i)[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+";

/// Optional `+`, then at least 11 digits/whitespace/hyphens starting and ending with a digit
const PHONE_PATTERN: &str = r"\+?\d[\d\s\-]{9,}\d";

/// Contact data found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Organization name, absent when the page has no matching heading
    pub name: Option<String>,

    /// Distinct e-mail addresses in the page text
    pub emails: BTreeSet<String>,

    /// Distinct phone numbers in the page text
    pub phones: BTreeSet<String>,
}

impl Extraction {
    /// Expands the extraction into records
    ///
    /// One record per (phone, email) pair, all attributed to the page's name.
    /// Pages without a name, phone or email yield nothing.
    pub fn records(&self) -> Vec<ExtractedRecord> {
        let Some(name) = &self.name else {
            return Vec::new();
        };

        self.phones
            .iter()
            .flat_map(|phone| {
                self.emails
                    .iter()
                    .map(move |email| ExtractedRecord::new(name.clone(), phone.clone(), email.clone()))
            })
            .collect()
    }
}

/// Everything the crawl needs from one page, from a single parse
#[derive(Debug, Clone)]
pub struct ParsedPage {
    pub extraction: Extraction,
    pub links: Vec<Url>,
}

/// Compiled selectors and patterns, built once per run
#[derive(Debug, Clone)]
pub struct Extractor {
    name_selector: Selector,
    anchor_selector: Selector,
    email_regex: Regex,
    phone_regex: Regex,
}

impl Extractor {
    /// Creates an extractor that reads the organization name from `name_selector`
    ///
    /// # Returns
    ///
    /// * `Ok(Extractor)` - Selector and patterns compiled
    /// * `Err(ConfigError)` - The selector is not valid CSS
    pub fn new(name_selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            name_selector: parse_selector(name_selector)?,
            anchor_selector: parse_selector("a[href]")?,
            email_regex: compile(EMAIL_PATTERN)?,
            phone_regex: compile(PHONE_PATTERN)?,
        })
    }

    /// Extracts the organization name, e-mails and phones from a page
    ///
    /// Without a name, the page contributes nothing and the text is not scanned.
    ///
    /// # Example
    ///
    /// ```
    /// use contact_crawler::crawler::Extractor;
    ///
    /// let extractor = Extractor::new("h1").unwrap();
    /// let html = "<h1>Acme</h1><p>Call +1 555 123 4567 or mail sales@acme.test</p>";
    /// let extraction = extractor.extract(html);
    /// assert_eq!(extraction.name.as_deref(), Some("Acme"));
    /// assert_eq!(extraction.records().len(), 1);
    /// ```
    pub fn extract(&self, html: &str) -> Extraction {
        let document = Html::parse_document(html);
        self.extract_from_document(&document)
    }

    /// Extracts every anchor link, resolved against `base_url`
    ///
    /// Duplicates are kept; hrefs that cannot be resolved are skipped.
    pub fn extract_links(&self, html: &str, base_url: &Url) -> Vec<Url> {
        let document = Html::parse_document(html);
        self.links_from_document(&document, base_url)
    }

    /// Runs both extractions over a single parse of the page
    pub fn parse_page(&self, html: &str, base_url: &Url) -> ParsedPage {
        let document = Html::parse_document(html);
        ParsedPage {
            extraction: self.extract_from_document(&document),
            links: self.links_from_document(&document, base_url),
        }
    }

    fn extract_from_document(&self, document: &Html) -> Extraction {
        let name = document
            .select(&self.name_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let Some(name) = name else {
            return Extraction::default();
        };

        let text = visible_text(document);
        Extraction {
            name: Some(name),
            emails: find_all(&self.email_regex, &text),
            phones: find_all(&self.phone_regex, &text),
        }
    }

    fn links_from_document(&self, document: &Html, base_url: &Url) -> Vec<Url> {
        document
            .select(&self.anchor_selector)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| match base_url.join(href.trim()) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::debug!("Skipping unresolvable href {:?} on {}: {}", href, base_url, e);
                    None
                }
            })
            .collect()
    }
}

/// All text nodes of the document, concatenated as a browser renders inline markup
fn visible_text(document: &Html) -> String {
    document.root_element().text().collect::<String>()
}

fn find_all(regex: &Regex, text: &str) -> BTreeSet<String> {
    regex
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn parse_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern)
        .map_err(|e| ConfigError::Validation(format!("Invalid pattern {}: {}", pattern, e)))
}
