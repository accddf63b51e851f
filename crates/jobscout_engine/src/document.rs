//! Typed view over a parsed listing page.
//!
//! Every lookup goes through a [`SelectorPair`]: the primary selector is tried
//! first and the secondary only when the primary yields nothing usable. This
//! is what keeps adapters working across small markup changes on the sources.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::ParseError;

/// Primary and secondary selector for one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    pub primary: &'static str,
    pub secondary: &'static str,
}

impl SelectorRule {
    pub const fn new(primary: &'static str, secondary: &'static str) -> Self {
        Self { primary, secondary }
    }
}

/// Compiled [`SelectorRule`].
#[derive(Debug, Clone)]
pub struct SelectorPair {
    primary: Selector,
    secondary: Selector,
}

impl SelectorPair {
    pub fn compile(rule: SelectorRule) -> Result<Self, ParseError> {
        Ok(Self {
            primary: parse_selector(rule.primary)?,
            secondary: parse_selector(rule.secondary)?,
        })
    }

    fn tiers(&self) -> [&Selector; 2] {
        [&self.primary, &self.secondary]
    }
}

fn parse_selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|err| ParseError::InvalidSelector {
        selector: css.to_string(),
        message: err.to_string(),
    })
}

pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Listing containers matched by the primary selector, or by the
    /// secondary one if the primary matches nothing.
    pub fn containers(&self, pair: &SelectorPair) -> Vec<Listing<'_>> {
        pair.tiers()
            .into_iter()
            .map(|selector| {
                self.html
                    .select(selector)
                    .map(|element| Listing { element })
                    .collect::<Vec<_>>()
            })
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }
}

/// One listing container inside a [`Page`].
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    element: ElementRef<'a>,
}

impl<'a> Listing<'a> {
    /// First non-blank text for the pair, whitespace collapsed.
    pub fn text(&self, pair: &SelectorPair) -> Option<String> {
        pair.tiers().into_iter().find_map(|selector| {
            self.element
                .select(selector)
                .map(collapsed_text)
                .find(|text| !text.is_empty())
        })
    }

    /// First `href` for the pair that resolves against `base`.
    ///
    /// When neither selector matches and the container is itself an anchor,
    /// its own `href` is used.
    pub fn link(&self, pair: &SelectorPair, base: &Url) -> Option<Url> {
        pair.tiers()
            .into_iter()
            .find_map(|selector| {
                self.element
                    .select(selector)
                    .filter_map(|element| element.value().attr("href"))
                    .find_map(|href| resolve_url(href, base))
            })
            .or_else(|| {
                if self.element.value().name().eq_ignore_ascii_case("a") {
                    self.element
                        .value()
                        .attr("href")
                        .and_then(|href| resolve_url(href, base))
                } else {
                    None
                }
            })
    }
}

fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn resolve_url(reference: &str, base: &Url) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with('?') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.join(trimmed).ok()
}
