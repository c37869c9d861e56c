use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::NO_DESCRIPTION;

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

/// Phrases marking navigation chrome and footer boilerplate. Candidates whose
/// lowercase text contains any of these are dropped wholesale.
const NAV_DENYLIST: &[&str] = &[
    "open",
    "close",
    "menu",
    "navigation",
    "contact us",
    "get involved",
    "submit a request",
    "careers",
    "about us",
    "site feedback",
    "events",
    "disclaimer",
    "privacy policy",
    "accessibility policy",
    "your city hall",
    "strategic priorities",
    "city management",
    "departments",
    "council and commissions",
    "transparency",
    "participating in government",
    "working at the city",
];

const LINK_LIST_WORDS: &[&str] = &["services", "programs", "departments"];

/// Concatenation of an element's stripped text nodes, with no separator and
/// whitespace-only nodes dropped.
pub(crate) fn text_content(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Best-effort description assembly for an event page.
///
/// Event pages are inconsistently structured, so this over-collects from
/// several markup shapes inside `div.container` regions, plus loose text
/// directly under `main > div`, then filters out known boilerplate. False
/// positives and negatives are expected; the result is prose-ish, not exact.
pub fn extract_description(doc: &Html) -> String {
    let mut parts: Vec<String> = Vec::new();

    for container in doc.select(selector!("div.container")) {
        if text_content(container).is_empty() {
            continue;
        }

        collect_matches(&mut parts, container, selector!("p"), 10);
        collect_matches(&mut parts, container, selector!("p > i"), 5);
        collect_matches(&mut parts, container, selector!("ul > li"), 5);
        collect_matches(&mut parts, container, selector!("p > a"), 5);
    }

    // Loose text nodes sitting directly under the main content wrapper,
    // skipping any descendant elements.
    if let Some(main_div) = doc.select(selector!("main > div")).next() {
        for child in main_div.children() {
            if let Some(text) = child.value().as_text() {
                let text = text.trim();
                if text.chars().count() > 10 && !parts.iter().any(|part| part == text) {
                    parts.push(text.to_string());
                }
            }
        }
    }

    let filtered: Vec<String> = parts.into_iter().filter(|part| keep(part)).collect();

    if filtered.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        filtered.join(" ")
    }
}

fn collect_matches(
    parts: &mut Vec<String>,
    scope: ElementRef,
    selector: &Selector,
    min_chars: usize,
) {
    for element in scope.select(selector) {
        let text = text_content(element);
        if !text.is_empty() && text.chars().count() > min_chars && !parts.contains(&text) {
            parts.push(text);
        }
    }
}

fn keep(part: &str) -> bool {
    let lowered = part.to_lowercase();

    if NAV_DENYLIST.iter().any(|skip| lowered.contains(skip)) {
        return false;
    }

    // Long comma-salads of city services are link lists, not prose.
    if part.split_whitespace().count() > 20
        && LINK_LIST_WORDS.iter().any(|word| lowered.contains(word))
    {
        return false;
    }

    true
}
