use bibtex_lint::model::BlockKind;
use bibtex_lint::{Code, Config, Diagnostic, Severity, Span, parse, validate};

fn check(input: &str) -> Vec<Diagnostic> {
    validate(&parse(input), &Config::default())
}

fn codes(diagnostics: &[Diagnostic]) -> Vec<Code> {
    diagnostics.iter().filter_map(|d| d.code).collect()
}

fn count(diagnostics: &[Diagnostic], code: Code) -> usize {
    diagnostics.iter().filter(|d| d.code == Some(code)).count()
}

#[test]
fn test_duplicate_book_keys() {
    let input = "@book{b1, title={T1}}\n@book{b1, title={T2}}";
    let diagnostics = check(input);

    assert_eq!(
        codes(&diagnostics),
        [
            Code::MissingRequiredFields,
            Code::DuplicateKey,
            Code::MissingRequiredFields,
        ]
    );

    let second = input.rfind("b1").unwrap();
    assert_eq!(diagnostics[1].span, Span::new(second, second + 2));
    assert_eq!(diagnostics[1].severity, Severity::Error);
    for idx in [0, 2] {
        assert_eq!(
            diagnostics[idx].message,
            "Missing required fields for @book: author, publisher, year"
        );
    }
}

#[test]
fn test_math_is_excluded_from_brace_count() {
    for input in [
        "@misc{m, title = {$\\alpha$ and {nested}}}",
        "@misc{m, title = \"$\\alpha$ and {nested}\"}",
        "@misc{m, title = {$x_{1$ and {nested}}}",
    ] {
        let diagnostics = check(input);
        assert_eq!(count(&diagnostics, Code::UnbalancedBraces), 0, "{input}");
        assert!(diagnostics.is_empty(), "{input}: {diagnostics:?}");
    }
}

#[test]
fn test_unbalanced_outside_math() {
    for input in [
        "@misc{m, title = \"{unbalanced $x$\"}",
        "@misc{m, title = {unbalanced $x$",
    ] {
        let diagnostics = check(input);
        assert_eq!(count(&diagnostics, Code::UnbalancedBraces), 1, "{input}");
        assert_eq!(
            diagnostics[0].message,
            "Unmatched braces in field value for 'title'"
        );
    }
}

#[test]
fn test_only_entry_types() {
    let config = Config {
        check_entry_types: true,
        ..Config::none()
    };
    let input = "@weird{k, title={X}}";
    let diagnostics = validate(&parse(input), &config);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].code, Some(Code::UnknownEntryType));
    assert_eq!(diagnostics[0].message, "Unknown entry type: @weird");
    assert_eq!(diagnostics[0].span.slice(input), "@weird");
}

#[test]
fn test_duplicate_keys() {
    let unique = "@misc{a, title={1}} @misc{b, title={2}} @misc{A, title={3}}";
    assert_eq!(count(&check(unique), Code::DuplicateKey), 0);

    let input = "@misc{a, title={1}} @misc{b, title={2}} @misc{a, title={3}}";
    let diagnostics = check(input);
    assert_eq!(count(&diagnostics, Code::DuplicateKey), 1);
    let third = input.rfind("{a").unwrap() + 1;
    assert_eq!(diagnostics[0].span, Span::new(third, third + 1));
}

#[test]
fn test_required_fields() {
    let input = "@article{a, title = {T}}";
    let diagnostics = check(input);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "Missing required fields for @article: author, journal, year"
    );
    assert_eq!(diagnostics[0].span, Span::new(0, input.len()));

    let input = "@article{a, title = {T}, year = 1999, journal = {J}, author = {A}}";
    assert!(check(input).is_empty());
}

#[test]
fn test_idempotent() {
    let input = "@weird{k, colour = {}, title = \"{\"}\n@book{k}\n@misc(m, note = jan # {x})";
    let doc = parse(input);
    let config = Config::default();
    let first = validate(&doc, &config);
    let second = validate(&parse(input), &config);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_special_blocks_are_not_validated() {
    let input = "@string{jan = {January}}\n@preamble{\"\\newcommand{\"}\n@comment{@weird{k}}";
    let doc = parse(input);
    assert!(doc.entries().is_empty());
    assert!(validate(&doc, &Config::default()).is_empty());
    assert!(matches!(doc.blocks()[0].kind, BlockKind::StringDef(_)));
    assert!(matches!(doc.blocks()[2].kind, BlockKind::Preamble(_)));
    assert!(matches!(doc.blocks()[4].kind, BlockKind::Comment(_)));
}

#[test]
fn test_realistic_bibliography() {
    let input = r#"% Generated by hand
@String{ acm = "ACM" }

@Article{knuth:1984,
  author  = {Donald E. Knuth},
  title   = {Literate Programming},
  journal = {The Computer Journal},
  year    = 1984,
  volume  = 27,
  number  = 2,
  pages   = {97--111},
  month   = may,
}

@InProceedings(lamport:86,
  author    = "Leslie Lamport",
  title     = "{\LaTeX}: A Document Preparation System",
  booktitle = acm # " Proceedings",
  year      = {1986},
  isbn      = {0-201-15790-X}
)
"#;
    let doc = parse(input);
    assert_eq!(doc.entries().len(), 2);
    assert!(doc.entries().iter().all(|entry| entry.closed));
    assert_eq!(doc.entries()[1].key, Some("lamport:86"));
    let booktitle = doc.entries()[1].get(&doc, "booktitle").unwrap();
    assert_eq!(booktitle.value.parts.len(), 2);
    assert!(check(input).is_empty(), "{:?}", check(input));
}
