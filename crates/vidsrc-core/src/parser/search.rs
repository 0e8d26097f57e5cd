//! Search results parser
//!
//! Parses the provider's title search page into an ordered list of
//! candidates. Malformed result items are skipped one by one; they never
//! abort the page or shift the order of the items after them.

use scraper::{ElementRef, Html, Selector};

use crate::error::{LookupError, Result};
use crate::types::{Candidate, DEFAULT_LABEL};

/// One result entry in the search list
const ITEM_SELECTOR: &str = "li.ipc-metadata-list-summary-item";

/// Title link inside a result entry
const TITLE_SELECTOR: &str = "a.ipc-metadata-list-summary-item__t";

/// Descriptor spans: the first holds the year, the second the type label
const DESCRIPTOR_SELECTOR: &str = "span.ipc-metadata-list-summary-item__li";

/// Extract the title identifier from a link.
///
/// The identifier is `tt` followed by digits, taken from a `/title/<id>/`
/// path segment.
///
/// # Examples
/// ```
/// use vidsrc_core::parser::extract_external_id;
///
/// assert_eq!(
///     extract_external_id("/title/tt1375666/?ref_=fn_al_tt_1"),
///     Some("tt1375666".to_string())
/// );
/// assert_eq!(extract_external_id("/name/nm0000138/"), None);
/// ```
pub fn extract_external_id(href: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"/title/(tt\d+)/").ok()?;
    let caps = re.captures(href)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Parse candidates from the search page HTML.
///
/// # Returns
/// * `Ok(Vec<Candidate>)` in document order, possibly empty
/// * `Err(LookupError::ParseError)` if a selector cannot be compiled
pub fn parse_search_results(html: &str) -> Result<Vec<Candidate>> {
    let document = Html::parse_document(html);
    let selectors = ItemSelectors::new()?;

    let items = document
        .select(&selectors.item)
        .filter_map(|element| parse_search_item(&element, &selectors))
        .collect();

    Ok(items)
}

struct ItemSelectors {
    item: Selector,
    title: Selector,
    descriptor: Selector,
}

impl ItemSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            item: compile(ITEM_SELECTOR)?,
            title: compile(TITLE_SELECTOR)?,
            descriptor: compile(DESCRIPTOR_SELECTOR)?,
        })
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| LookupError::ParseError(format!("Invalid selector {}: {:?}", selector, e)))
}

/// Parse a single result entry; `None` when title, year or identifier is missing.
fn parse_search_item(element: &ElementRef, selectors: &ItemSelectors) -> Option<Candidate> {
    let link = element.select(&selectors.title).next()?;

    let mut descriptors = element.select(&selectors.descriptor);
    let year = element_text(&descriptors.next()?);
    let label = descriptors
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_else(|| DEFAULT_LABEL.to_string());

    let external_id = extract_external_id(link.value().attr("href")?)?;

    Some(Candidate::new(element_text(&link), year, label, external_id))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
