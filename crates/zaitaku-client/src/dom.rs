//! Small query helpers over `scraper` element trees.

use scraper::ElementRef;

/// Every element under `root`, excluding `root` itself, in document order.
pub fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant with one of `tags` that satisfies `pred`.
pub fn find_first<'a, P>(root: ElementRef<'a>, tags: &[&str], pred: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    descendant_elements(root)
        .find(|el| tags.iter().any(|t| *t == el.value().name()) && pred(el))
}

/// CSS `[class*=needle]`: substring of the raw class attribute, case-sensitive.
pub fn class_attr_contains(el: &ElementRef<'_>, needle: &str) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|class| class.contains(needle))
}

/// CSS `.token`: exact class token.
pub fn has_class(el: &ElementRef<'_>, token: &str) -> bool {
    el.value().classes().any(|c| c == token)
}

/// Any class token containing any of `needles`, ignoring case.
pub fn class_token_contains_any(el: &ElementRef<'_>, needles: &[&str]) -> bool {
    el.value().classes().any(|class| {
        let class = class.to_lowercase();
        needles.iter().any(|n| class.contains(n))
    })
}

/// Text of every node under `el`, each trimmed, concatenated.
pub fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

/// Raw concatenated text under `el`.
pub fn full_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}
