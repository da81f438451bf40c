use afx_fusion::{
    CompiledAfx, ConvertError, GenerateErrorKind, GenerateOptions, convert, convert_with_options,
};
use rstest::rstest;

fn lines(parts: &[&str]) -> String {
    parts.join("\n")
}

/// Reads a single-quoted Fusion string literal back into plain text.
fn unquote_fusion_string(literal: &str) -> String {
    let inner = &literal[1..literal.len() - 1];
    let mut result = String::new();
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(ch);
        }
    }
    result
}

// ── Lists ───────────────────────────────────────────────────────────────

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n")]
#[case("  \n\t  \n  ")]
#[case("\n<!-- only a comment -->\n")]
fn test_blank_source_renders_empty_string(#[case] source: &str) {
    assert_eq!(convert(source).unwrap(), "''");
}

#[test]
fn test_self_closing_tag() {
    assert_eq!(
        convert("<h1/>").unwrap(),
        "Neos.Fusion:Tag {\n    tagName = 'h1'\n    selfClosingTag = true\n}"
    );
}

#[test]
fn test_single_child_is_not_joined() {
    let source = "<p>\n    {props.text}\n</p>";
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'p'",
            "    content = ${props.text}",
            "}",
        ])
    );
}

#[test]
fn test_multiple_children_are_joined() {
    assert_eq!(
        convert("<p>Hello <strong>World</strong>!</p>").unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'p'",
            "    content = Neos.Fusion:Join {",
            "        item_1 = 'Hello '",
            "        item_2 = Neos.Fusion:Tag {",
            "            tagName = 'strong'",
            "            content = 'World'",
            "        }",
            "        item_3 = '!'",
            "    }",
            "}",
        ])
    );
}

#[test]
fn test_keyed_child_takes_its_slot() {
    let source = "<ul>\n  <li @key=\"first\">a</li>\n  <li>b</li>\n</ul>";
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'ul'",
            "    content = Neos.Fusion:Join {",
            "        first = Neos.Fusion:Tag {",
            "            tagName = 'li'",
            "            content = 'a'",
            "        }",
            "        item_2 = Neos.Fusion:Tag {",
            "            tagName = 'li'",
            "            content = 'b'",
            "        }",
            "    }",
            "}",
        ])
    );
}

#[test]
fn test_comments_between_children_are_dropped() {
    assert_eq!(
        convert("<div>\n  <!-- teaser -->\n  <hr/>\n</div>").unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'div'",
            "    content = Neos.Fusion:Tag {",
            "        tagName = 'hr'",
            "        selfClosingTag = true",
            "    }",
            "}",
        ])
    );
}

#[rstest]
#[case("<p>\n    line one\n    line two   spaced\n</p>", "'line one line two   spaced'")]
#[case("<p>  inline  </p>", "'  inline  '")]
#[case("<p>\n  \n</p>", "''")]
#[case("<p>a\r\n  b</p>", "'a b'")]
fn test_text_whitespace(#[case] source: &str, #[case] content: &str) {
    let expected = lines(&[
        "Neos.Fusion:Tag {",
        "    tagName = 'p'",
        &format!("    content = {content}"),
        "}",
    ]);
    assert_eq!(convert(source).unwrap(), expected);
}

#[test]
fn test_whitespace_only_line_between_nodes_vanishes() {
    let source = "<div>\n  <br/>\n  <br/>\n</div>";
    let fusion = convert(source).unwrap();
    assert!(fusion.contains("item_1 = Neos.Fusion:Tag"));
    assert!(fusion.contains("item_2 = Neos.Fusion:Tag"));
    assert!(!fusion.contains("item_3"));
}

// ── Attributes ──────────────────────────────────────────────────────────

#[test]
fn test_spread_ordering() {
    let source = r#"<Vendor.Site:Card title="a" {...props} subtitle="b" {...more} />"#;
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Vendor.Site:Card {",
            "    title = 'a'",
            "    @apply.spread_1 = ${props}",
            "    @apply.spread_2 = Neos.Fusion:DataStructure {",
            "        subtitle = 'b'",
            "    }",
            "    @apply.spread_3 = ${more}",
            "}",
        ])
    );
}

#[test]
fn test_consecutive_spreads_stay_direct() {
    assert_eq!(
        convert("<div {...a} {...b} />").unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'div'",
            "    selfClosingTag = true",
            "    attributes.@apply.spread_1 = ${a}",
            "    attributes.@apply.spread_2 = ${b}",
            "}",
        ])
    );
}

#[test]
fn test_meta_attributes_render_last() {
    let source = r#"<div @if={a} class="c" {...s} @process={p} id="i" />"#;
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "    tagName = 'div'",
            "    selfClosingTag = true",
            "    attributes.class = 'c'",
            "    attributes.@apply.spread_1 = ${s}",
            "    attributes.@apply.spread_2 = Neos.Fusion:DataStructure {",
            "        id = 'i'",
            "    }",
            "    @if.if_1 = ${a}",
            "    @process.process_1 = ${p}",
            "}",
        ])
    );
}

#[test]
fn test_named_meta_paths_are_not_numbered() {
    let source = r#"<Vendor.Site:Proto @if.hasX={x} @position="start" />"#;
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Vendor.Site:Proto {",
            "    @if.hasX = ${x}",
            "    @position = 'start'",
            "}",
        ])
    );
}

#[test]
fn test_repeated_shorthand_meta_paths_are_numbered() {
    let fusion = convert("<div @if={a} @if={b} />").unwrap();
    assert!(fusion.contains("\n    @if.if_1 = ${a}\n    @if.if_2 = ${b}\n"));
}

#[test]
fn test_boolean_attribute() {
    let fusion = convert("<input disabled/>").unwrap();
    assert!(fusion.contains("\n    attributes.disabled = true\n"));
}

// ── Children routing ────────────────────────────────────────────────────

#[test]
fn test_path_children() {
    let source = lines(&[
        "<Vendor.Site:Page>",
        "    <Vendor.Site:Header @path=\"slots.header\" />",
        "    <main>x</main>",
        "</Vendor.Site:Page>",
    ]);
    assert_eq!(
        convert(&source).unwrap(),
        lines(&[
            "Vendor.Site:Page {",
            "    slots.header = Vendor.Site:Header {",
            "    }",
            "    content = Neos.Fusion:Tag {",
            "        tagName = 'main'",
            "        content = 'x'",
            "    }",
            "}",
        ])
    );
}

#[test]
fn test_children_property_override() {
    let source = r#"<Vendor.Site:Section @children="body"><h2>Title</h2></Vendor.Site:Section>"#;
    assert_eq!(
        convert(source).unwrap(),
        lines(&[
            "Vendor.Site:Section {",
            "    body = Neos.Fusion:Tag {",
            "        tagName = 'h2'",
            "        content = 'Title'",
            "    }",
            "}",
        ])
    );
}

// ── Escaping ────────────────────────────────────────────────────────────

#[test]
fn test_attribute_string_escaping_round_trips() {
    let fusion = convert(r#"<Vendor.Site:Link title="it's a \\ path" />"#).unwrap();
    assert_eq!(
        fusion,
        "Vendor.Site:Link {\n    title = 'it\\'s a \\\\ path'\n}"
    );
    let literal = fusion
        .lines()
        .nth(1)
        .and_then(|line| line.split(" = ").nth(1))
        .unwrap();
    assert_eq!(unquote_fusion_string(literal), r"it's a \ path");
}

#[test]
fn test_text_escaping() {
    let fusion = convert("<p>Rock 'n' roll</p>").unwrap();
    assert!(fusion.contains(r"content = 'Rock \'n\' roll'"));
}

// ── Options ─────────────────────────────────────────────────────────────

#[test]
fn test_base_indentation() {
    let options = GenerateOptions::new().indentation("    ");
    assert_eq!(
        convert_with_options("<p>a</p>", &options).unwrap(),
        lines(&[
            "Neos.Fusion:Tag {",
            "        tagName = 'p'",
            "        content = 'a'",
            "    }",
        ])
    );
}

#[test]
fn test_compiled_document_is_reusable() {
    let compiled = CompiledAfx::compile("<hr/>").unwrap();
    let flat = compiled.to_fusion().unwrap();
    let nested = compiled
        .to_fusion_with_options(&GenerateOptions::new().indentation("  "))
        .unwrap();
    assert_eq!(flat, "Neos.Fusion:Tag {\n    tagName = 'hr'\n    selfClosingTag = true\n}");
    assert_eq!(
        nested,
        "Neos.Fusion:Tag {\n      tagName = 'hr'\n      selfClosingTag = true\n  }"
    );
    assert_eq!(compiled.ast().values.len(), 1);
}

// ── Errors ──────────────────────────────────────────────────────────────

#[rstest]
#[case("<div>")]
#[case("<div")]
#[case(r#"<a href="/home />"#)]
#[case("<p>{props.title</p>")]
#[case("<p {...props />")]
#[case("<div></span>")]
fn test_parse_errors_are_propagated(#[case] source: &str) {
    match convert(source) {
        Err(ConvertError::Parse(errors)) => assert!(!errors.is_empty()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[rstest]
#[case("<div @children={name}></div>", "@children only supports string payloads, expression found")]
#[case("<div><p @path={name}/></div>", "@path only supports string payloads, expression found")]
#[case("<div><p @key={name}/><p/></div>", "@key only supports string payloads, expression found")]
#[case("<div><p @key/><p/></div>", "@key only supports string payloads, boolean found")]
#[case("<p @key={x}/>", "@key only supports string payloads, expression found")]
#[case("<p @path={x}/>", "@path only supports string payloads, expression found")]
#[case("<div><p @key={x}/></div>", "@key only supports string payloads, expression found")]
#[case(r#"<div><p @path="a" @key={x}/></div>"#, "@key only supports string payloads, expression found")]
fn test_generate_errors_name_directive(#[case] source: &str, #[case] message: &str) {
    match convert(source) {
        Err(ConvertError::Generate(err)) => {
            assert_eq!(err.kind, GenerateErrorKind::InvalidMetaPayload);
            assert_eq!(err.message, message);
        }
        other => panic!("expected generate error, got {other:?}"),
    }
}

#[test]
fn test_convert_error_display() {
    let err = convert("<div @children={name}></div>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "@children only supports string payloads, expression found"
    );
}
