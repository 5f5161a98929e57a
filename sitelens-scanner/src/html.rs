//! Small `scraper` helpers shared by the analyzer and the HTTP page driver.
//!
//! `scraper::Html` is not `Send`, so documents are parsed and dropped inside
//! synchronous functions and never held across an `.await`.

use crate::error::{Result, ScanError};
use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScanError::Analysis(format!("bad selector {css}: {e:?}")))
}

/// Text content with whitespace runs collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

fn hides_itself(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() || value.attr("aria-hidden") == Some("true") {
        return true;
    }
    if value.name() == "input"
        && value
            .attr("type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden"))
    {
        return true;
    }
    value.attr("style").is_some_and(|style| {
        let style: String = style
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

/// Markup-level visibility: the element or one of its ancestors is hidden by
/// attribute or inline style. Stylesheets are not evaluated.
pub(crate) fn is_hidden(element: ElementRef<'_>) -> bool {
    hides_itself(element)
        || element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(hides_itself)
}
