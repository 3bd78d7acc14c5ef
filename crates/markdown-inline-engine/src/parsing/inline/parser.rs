use crate::document::Document;
use crate::node::Node;

use super::{cursor::Cursor, stack::TagStack};

/// Parses one span of inline content into a sequence of [`Node`]s.
///
/// Each iteration first offers the cursor to the open constructs, innermost
/// first, so a closer takes priority over a new opener. Otherwise the
/// document's rules are tried in order, and if none matches the character is
/// left in the pending literal text run. Constructs still open at the end are
/// turned back into literal text.
///
/// The cursor and stack are local to the call; `document` is only read.
pub fn parse_inline(source: &str, document: &Document) -> Vec<Node> {
    let mut cursor = Cursor::new(source);
    let mut stack = TagStack::new();

    while !cursor.eof() {
        if stack.try_close_any(&mut cursor, document) {
            continue;
        }
        if document
            .syntaxes()
            .iter()
            .any(|syntax| syntax.try_match(&mut cursor, &mut stack, document))
        {
            continue;
        }
        cursor.advance_char();
    }

    stack.finish(&mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::document::{InlineOptions, Resolver};
    use crate::node::Element;
    use crate::parsing::inline::syntax::{ExtensionSet, InlineSyntax};
    use crate::reference::{Link, ReferenceLinks};
    use crate::render::to_html;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn html(source: &str) -> String {
        to_html(&parse_inline(source, &Document::default()))
    }

    fn gfm_html(source: &str) -> String {
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                extensions: ExtensionSet::github_flavored(),
                ..InlineOptions::default()
            },
        );
        to_html(&parse_inline(source, &document))
    }

    #[test]
    fn parse_simple_text() {
        let nodes = parse_inline("hello world", &Document::default());
        assert_eq!(nodes, vec![Node::text("hello world")]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_inline("", &Document::default()).is_empty());
    }

    #[test]
    fn parse_code_span() {
        let nodes = parse_inline("`code`", &Document::default());
        assert_eq!(nodes, vec![Element::text("code", "code").into()]);
    }

    #[test]
    fn code_span_with_inner_backtick() {
        assert_eq!(html("``a ` b``"), "<code>a ` b</code>");
    }

    #[test]
    fn code_span_suppresses_other_rules() {
        assert_eq!(html("`*not* [a](b)`"), "<code>*not* [a](b)</code>");
    }

    #[rstest]
    #[case("`unclosed code", "`unclosed code")]
    #[case("```a``", "```a``")]
    #[case("x ``` y `` z", "x ``` y `` z")]
    fn unclosed_code_span_becomes_text(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case("*a*", "<em>a</em>")]
    #[case("_a_", "<em>a</em>")]
    #[case("**a**", "<strong>a</strong>")]
    #[case("__a__", "<strong>a</strong>")]
    #[case("***a***", "<em><strong>a</strong></em>")]
    #[case("**a *b* c**", "<strong>a <em>b</em> c</strong>")]
    #[case("*a **b** c*", "<em>a <strong>b</strong> c</em>")]
    #[case("**foo*", "*<em>foo</em>")]
    #[case("*foo**", "<em>foo</em>*")]
    #[case("foo*bar*", "foo<em>bar</em>")]
    #[case("foo_bar_", "foo_bar_")]
    #[case("snake_case_name", "snake_case_name")]
    fn emphasis(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case("*foo**bar*", "<em>foo**bar</em>")]
    #[case("*foo**bar**baz*", "<em>foo<strong>bar</strong>baz</em>")]
    #[case("foo***bar***baz", "foo<em><strong>bar</strong></em>baz")]
    fn rule_of_three(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case("a * b", "a * b")]
    #[case("a _ b", "a _ b")]
    #[case("* a *", "* a *")]
    #[case("a ** b", "a ** b")]
    fn unflanked_runs_are_literal(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[test]
    fn mismatched_tags_are_flattened() {
        let nodes = parse_inline("*a _b* c", &Document::default());
        assert_eq!(
            nodes,
            vec![
                Element::text("em", "a _b").into(),
                Node::text(" c"),
            ]
        );
    }

    #[test]
    fn flattening_keeps_nested_children() {
        assert_eq!(html("*a _b `c`* d"), "<em>a _b <code>c</code></em> d");
    }

    #[test]
    fn unclosed_opener_at_end_is_text() {
        assert_eq!(html("**a *b*"), "**a <em>b</em>");
    }

    #[rstest]
    #[case("~~gone~~", "<del>gone</del>")]
    #[case("~gone~", "<del>gone</del>")]
    #[case("~~a~", "~~a~")]
    #[case("~~~a~~~", "~~~a~~~")]
    #[case("a~~b~~", "a~~b~~")]
    fn strikethrough(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(gfm_html(input), expected);
    }

    #[test]
    fn strikethrough_needs_the_extension() {
        assert_eq!(html("~~a~~"), "~~a~~");
    }

    #[rstest]
    #[case(r"\*not em\*", "*not em*")]
    #[case(r"\[x\]", "[x]")]
    #[case(r"\<b\>", "&lt;b&gt;")]
    #[case(r#"\""#, "&quot;")]
    #[case(r"\a", r"\a")]
    fn escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case("a  \nb", "a<br />b")]
    #[case("a\\\nb", "a<br />b")]
    #[case("a \nb", "a \nb")]
    fn line_breaks(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case("a & b", "a &amp; b")]
    #[case("&amp; &copy; &#35;", "&amp; &copy; &#35;")]
    #[case("1 < 2 > 0", "1 &lt; 2 &gt; 0")]
    fn html_encoding(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[test]
    fn html_encoding_can_be_disabled() {
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                encode_html: false,
                ..InlineOptions::default()
            },
        );
        assert_eq!(
            to_html(&parse_inline("a & `<b>`", &document)),
            "a & <code><b></code>"
        );
    }

    #[test]
    fn inline_html_passes_through() {
        assert_eq!(
            html(r#"a <span class="x">b</span> < c"#),
            r#"a <span class="x">b</span> &lt; c"#
        );
    }

    #[rstest]
    #[case("<http://foo.com/a b>", "&lt;http://foo.com/a b&gt;")]
    #[case("<http://foo.com/?a=1&b=2>", r#"<a href="http://foo.com/?a=1&amp;b=2">http://foo.com/?a=1&amp;b=2</a>"#)]
    #[case("<foo@bar.example.com>", r#"<a href="mailto:foo@bar.example.com">foo@bar.example.com</a>"#)]
    fn autolinks(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(html(input), expected);
    }

    #[rstest]
    #[case(
        "(see www.example.com).",
        r#"(see <a href="http://www.example.com">www.example.com</a>)."#
    )]
    #[case(
        "Visit https://example.com/path?x=1, now",
        r#"Visit <a href="https://example.com/path?x=1">https://example.com/path?x=1</a>, now"#
    )]
    #[case(
        "*www.example.com*",
        r#"<em><a href="http://www.example.com">www.example.com</a></em>"#
    )]
    #[case("foo.www.example.com", "foo.www.example.com")]
    fn bare_urls(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(gfm_html(input), expected);
    }

    fn limited(max_nesting: usize) -> Document {
        Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                max_nesting,
                ..InlineOptions::default()
            },
        )
    }

    #[rstest]
    #[case(0, "*a*", "*a*")]
    #[case(0, "[a](/b)", "[a](/b)")]
    #[case(1, "*a _b_ c*", "<em>a _b_ c</em>")]
    #[case(2, "*a _b_ c*", "<em>a <em>b</em> c</em>")]
    fn nesting_limit_keeps_excess_openers_literal(
        #[case] max_nesting: usize,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        let document = limited(max_nesting);
        assert_eq!(to_html(&parse_inline(input, &document)), expected);
    }

    fn with_references(definitions: &[(&str, &str, Option<&str>)]) -> Document {
        let mut references = ReferenceLinks::new();
        for (label, url, title) in definitions {
            references.insert(label, Link::new(*url, title.map(str::to_string)));
        }
        Document::new(references, InlineOptions::default())
    }

    #[test]
    fn unknown_references_stay_literal() {
        let nodes = parse_inline("[not] [known]", &Document::default());
        assert_eq!(nodes, vec![Node::text("[not] [known]")]);
    }

    #[test]
    fn literal_fallback_is_stable_when_reparsed() {
        let document = Document::default();
        let once = to_html(&parse_inline("[not] [known] ![x]", &document));
        let twice = to_html(&parse_inline(&once, &document));
        assert_eq!(once, twice);
    }

    #[test]
    fn reference_labels_ignore_case() {
        let document = with_references(&[("are", "http://foo.com", None)]);
        let nodes = parse_inline("[ARE][]", &document);
        assert_eq!(
            nodes,
            vec![
                Element::text("a", "ARE")
                    .with_attribute("href", "http://foo.com")
                    .into()
            ]
        );
    }

    #[rstest]
    #[case("[link](http://a.com)", r#"<a href="http://a.com">link</a>"#)]
    #[case(
        r#"[link](http://a.com "The Title")"#,
        r#"<a href="http://a.com" title="The Title">link</a>"#
    )]
    #[case("[*em* text](/u)", r#"<a href="/u"><em>em</em> text</a>"#)]
    #[case("[a](/u?x=1&y=2)", r#"<a href="/u?x=1&amp;y=2">a</a>"#)]
    #[case("[text][id]", r#"<a href="/ref" title="Ref">text</a>"#)]
    #[case("[text] [id]", r#"[text] <a href="/ref" title="Ref">id</a>"#)]
    #[case("[id]", r#"<a href="/ref" title="Ref">id</a>"#)]
    #[case("[text][missing]", "[text][missing]")]
    #[case("[a [b](/x) c]", r#"[a <a href="/x">b</a> c]"#)]
    #[case("[a](/u(v))", r#"<a href="/u(v)">a</a>"#)]
    #[case("[a](<b c>)", r#"<a href="b c">a</a>"#)]
    #[case("[a](/u(v)", "[a](/u(v)")]
    fn links(#[case] input: &str, #[case] expected: &str) {
        let document = with_references(&[("id", "/ref", Some("Ref"))]);
        assert_eq!(to_html(&parse_inline(input, &document)), expected);
    }

    #[rstest]
    #[case("![alt](/i.png)", r#"<img alt="alt" src="/i.png" />"#)]
    #[case("![*very* \"odd\"](/i.png)", r#"<img alt="very &quot;odd&quot;" src="/i.png" />"#)]
    #[case("![logo]", r#"<img alt="logo" src="/logo.svg" />"#)]
    #[case("![nope]", "![nope]")]
    fn images(#[case] input: &str, #[case] expected: &str) {
        let document = with_references(&[("logo", "/logo.svg", None)]);
        assert_eq!(to_html(&parse_inline(input, &document)), expected);
    }

    #[test]
    fn resolver_handles_unknown_links() {
        let resolver: Resolver = Arc::new(|name: &str| {
            Some(Node::from(
                Element::text("a", name)
                    .with_attribute("href", format!("/wiki/{}", name.replace(' ', "_"))),
            ))
        });
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                link_resolver: Some(resolver),
                ..InlineOptions::default()
            },
        );
        assert_eq!(
            to_html(&parse_inline("see [Main Page] and [x](/y)", &document)),
            r#"see <a href="/wiki/Main_Page">Main Page</a> and <a href="/y">x</a>"#
        );
        assert_eq!(to_html(&parse_inline("![Main Page]", &document)), "![Main Page]");
    }

    #[test]
    fn image_resolver_receives_raw_inner_text() {
        let resolver: Resolver = Arc::new(|name: &str| {
            Some(Node::from(
                Element::empty("img").with_attribute("src", format!("/media/{name}")),
            ))
        });
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                image_resolver: Some(resolver),
                ..InlineOptions::default()
            },
        );

        let nodes = parse_inline("![Main Page]", &document);
        let src = nodes[0].as_element().and_then(|img| img.attribute("src"));
        assert_eq!(src, Some("/media/Main Page"));

        assert_eq!(
            to_html(&parse_inline("![*a*] and [*a*]", &document)),
            r#"<img src="/media/*a*" /> and [<em>a</em>]"#
        );
    }

    #[test]
    fn resolver_may_decline() {
        let resolver: Resolver = Arc::new(|name: &str| {
            name.starts_with("wiki:")
                .then(|| Node::from(Element::text("a", &name[5..])))
        });
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                link_resolver: Some(resolver),
                ..InlineOptions::default()
            },
        );
        assert_eq!(
            to_html(&parse_inline("[wiki:Foo] [Bar]", &document)),
            "<a>Foo</a> [Bar]"
        );
    }

    #[test]
    fn host_rules_run_before_builtins() {
        let mention = InlineSyntax::custom(r"@([a-z]+)", |caps| {
            Some(
                Element::text("a", &caps[0])
                    .with_attribute("href", format!("/u/{}", &caps[1]))
                    .into(),
            )
        })
        .unwrap();
        let mark = InlineSyntax::paired("==", "==", "mark").unwrap();
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                syntaxes: vec![mention, mark],
                ..InlineOptions::default()
            },
        );
        assert_eq!(
            to_html(&parse_inline("hi @bob, ==*look*== here", &document)),
            r#"hi <a href="/u/bob">@bob</a>, <mark><em>look</em></mark> here"#
        );
    }

    #[test]
    fn declined_custom_match_stays_literal() {
        let never = InlineSyntax::custom(r"\*\*", |_| None).unwrap();
        let document = Document::new(
            ReferenceLinks::new(),
            InlineOptions {
                syntaxes: vec![never],
                ..InlineOptions::default()
            },
        );
        assert_eq!(to_html(&parse_inline("**a**", &document)), "**a**");
    }

    #[test]
    fn many_unmatched_brackets_stay_text() {
        let source = "[".repeat(5000);
        let nodes = parse_inline(&source, &Document::default());
        assert_eq!(nodes, vec![Node::Text(source)]);
    }

    #[test]
    fn many_unclosed_destinations_stay_text() {
        let source = "[a](".repeat(20_000);
        let nodes = parse_inline(&source, &Document::default());
        assert_eq!(nodes, vec![Node::Text(source)]);
    }
}
