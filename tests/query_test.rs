//! Extraction semantics over complete documents.

use pagewatch::{query_html, Query, Selector};
use regex::Regex;

const BODY: &str = "<ul><li>A</li><li id='b'>B</li></ul><ol><li>C</li><li class='d'>D</li></ol>";

fn run(selector: &str, regex: Option<&str>) -> Option<String> {
    let selector = Selector::parse(selector);
    let regex = regex.map(|pattern| Regex::new(pattern).unwrap());
    query_html(BODY, &selector, regex.as_ref())
}

#[test]
fn tag_selector_returns_first_in_document_order() {
    assert_eq!(run("li", None).as_deref(), Some("A"));
}

#[test]
fn id_selector_finds_the_tagged_item() {
    assert_eq!(run("#b", None).as_deref(), Some("B"));
}

#[test]
fn descendant_selector_scopes_to_the_outer_tag() {
    assert_eq!(run("ol li", None).as_deref(), Some("C"));
}

#[test]
fn class_selector_finds_the_classed_item() {
    assert_eq!(run(".d", None).as_deref(), Some("D"));
}

#[test]
fn regex_filters_inside_the_matched_nodes() {
    assert_eq!(run("ul li", Some("B|X")).as_deref(), Some("B"));
}

#[test]
fn regex_that_matches_nothing_in_scope_yields_none() {
    assert_eq!(run("ol li", Some("B|X")), None);
}

#[test]
fn empty_selector_matches_the_first_text_node() {
    assert_eq!(run("", None).as_deref(), Some("A"));

    let other = "<html><body><div><span>deep</span></div></body></html>";
    assert_eq!(
        query_html(other, &Selector::parse(""), None).as_deref(),
        Some("deep")
    );
}

#[test]
fn descendant_steps_span_intermediate_wrappers() {
    let html = "<article><div><section><p>nested</p></section></div></article>";
    assert_eq!(
        query_html(html, &Selector::parse("article p"), None).as_deref(),
        Some("nested")
    );
}

#[test]
fn sibling_subtrees_do_not_satisfy_descendant_steps() {
    // The ul and the p are siblings, so "ul p" must not match.
    let html = "<ul><li>list</li></ul><p>paragraph</p>";
    assert_eq!(query_html(html, &Selector::parse("ul p"), None), None);
}

#[test]
fn selector_miss_is_a_no_match_not_an_error() {
    assert_eq!(run("table", None), None);
    assert_eq!(run("#missing", None), None);
    assert_eq!(run(".missing", None), None);
}

#[test]
fn multi_class_attributes_match_on_whole_tokens() {
    let html = "<div class='alpha beta'>both</div><div class='alphabet'>suffix</div>";
    assert_eq!(
        query_html(html, &Selector::parse(".beta"), None).as_deref(),
        Some("both")
    );
    assert_eq!(
        query_html(html, &Selector::parse(".alphabet"), None).as_deref(),
        Some("suffix")
    );
    // ".alph" is a prefix of "alphabet" but not a class token anywhere.
    assert_eq!(query_html(html, &Selector::parse(".alph"), None), None);
}

#[test]
fn whole_body_flag_wins_over_selector_and_regex() {
    let query = Query {
        whole_body: true,
        selector: Some(Selector::parse("li")),
        regex: Some(Regex::new("B|X").unwrap()),
    };
    assert_eq!(query.extract(BODY).as_deref(), Some(BODY));
}

#[test]
fn bare_regex_searches_the_raw_body() {
    let query = Query {
        whole_body: false,
        selector: None,
        regex: Some(Regex::new("[A-Z]").unwrap()),
    };
    assert_eq!(query.extract(BODY).as_deref(), Some("A"));
}

#[test]
fn no_query_at_all_yields_none() {
    assert_eq!(Query::default().extract(BODY), None);
}

#[test]
fn extraction_is_idempotent() {
    for selector in ["li", "#b", "ol li", ".d", ""] {
        assert_eq!(run(selector, None), run(selector, None));
    }
    for (selector, regex) in [("ul li", "B|X"), ("ol li", "B|X")] {
        assert_eq!(run(selector, Some(regex)), run(selector, Some(regex)));
    }
}
