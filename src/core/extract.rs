//! Markup extraction for the two pages of a lookup.
//!
//! These functions take the page body as text and return owned values, so the
//! parsed document never lives across an `.await`.

use crate::config::site::AddressLayout;
use crate::domain::model::Address;
use crate::utils::error::{LookupError, Result};
use scraper::{ElementRef, Html, Selector};

pub(crate) fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| LookupError::SelectorError {
        selector: sel_str.into(),
    })
}

/// Returns the `href` of every search hit, in document order. Hits without a
/// link are kept as `None` so they still count towards ambiguity.
pub fn search_hits(html: &str, result_selector: &Selector) -> Vec<Option<String>> {
    let doc = Html::parse_document(html);

    doc.select(result_selector)
        .map(|hit| hit.value().attr("href").map(|href| href.trim().to_string()))
        .collect()
}

/// Trimmed text of the `n`-th immediate child node of `container`.
///
/// Fails if the child is missing, is not a text node, or is blank.
pub fn nth_text_child(container: ElementRef<'_>, n: usize) -> Result<String> {
    let child = container.children().nth(n).ok_or_else(|| {
        LookupError::markup(format!(
            "<{}> has no child node at index {}",
            container.value().name(),
            n
        ))
    })?;

    let text = child.value().as_text().ok_or_else(|| {
        LookupError::markup(format!(
            "child {} of <{}> is not a text node",
            n,
            container.value().name()
        ))
    })?;

    let text = text.trim();
    if text.is_empty() {
        return Err(LookupError::markup(format!(
            "child {} of <{}> is empty",
            n,
            container.value().name()
        )));
    }
    Ok(text.to_string())
}

/// Reads the street and city lines out of the first address container on the page.
pub fn postal_address(html: &str, container: &Selector, layout: &AddressLayout) -> Result<Address> {
    let doc = Html::parse_document(html);

    let element = doc
        .select(container)
        .next()
        .ok_or_else(|| LookupError::markup(format!("no '{}' element", layout.selector)))?;

    let line1 = nth_text_child(element, layout.street_child)?;
    let line2 = nth_text_child(element, layout.city_child)?;

    Ok(Address { line1, line2 })
}
