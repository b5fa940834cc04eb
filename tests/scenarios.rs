use ordlex::builder::{Buildable, RuleFileSchema};
use ordlex::stream::StringStream;
use ordlex::{scan, Error, Priority, Rule, RuleSet, ScanEngine};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use std::thread;

fn rule(pattern: &str, priority: Priority, capture: bool) -> Arc<Rule> {
    Arc::new(Rule::full(pattern, priority, capture).unwrap())
}

#[test]
fn type_declaration() {
    let space = rule(r"\s+", Priority::Immediate, false);
    let keyword = rule(r"int|float", Priority::Immediate, true);
    let punctuation = rule(r"[=;]", Priority::Natural, true);
    let int_literal = rule(r"[0-9]+", Priority::Natural, true);
    let float_literal = rule(r"[0-9]+\.[0-9]+", Priority::Immediate, true);
    let identifier = rule(r"[a-zA-Z_][a-zA-Z0-9_]*", Priority::Natural, true);

    let mut rules = RuleSet::new();
    rules
        .extend_at_current([space, keyword.clone(), punctuation.clone()])
        .advance_order()
        .extend_at_current([int_literal.clone(), float_literal])
        .advance_order()
        .insert_at_current(identifier.clone());

    let tokens = scan(&rules, "int a_b_c = 1;").unwrap();
    let expected = [
        ("int", &keyword),
        ("a_b_c", &identifier),
        ("=", &punctuation),
        ("1", &int_literal),
        (";", &punctuation),
    ];
    assert_eq!(tokens.len(), expected.len());
    for (token, (text, rule)) in tokens.iter().zip(expected) {
        assert_eq!(token.text(), text);
        assert!(std::ptr::eq(token.rule(), &**rule));
    }
}

#[test]
fn whitespace_skip_and_failure() {
    let r1 = rule("r1", Priority::Natural, true);
    let r2 = rule("r2", Priority::Natural, false);
    let r3 = rule("r3", Priority::Natural, true);
    let input = "  r1 r2   r3   r1 ";

    let mut with_space = RuleSet::skipping_whitespace().unwrap();
    with_space.extend_at_current([r1.clone(), r2.clone(), r3.clone()]);
    assert_eq!(with_space.string_tokens(input).unwrap(), vec!["r1", "r3", "r1"]);

    let mut without_space = RuleSet::new();
    without_space.extend_at_current([r1, r2, r3]);
    let error = without_space.tokenize(input).unwrap_err();
    assert!(matches!(error, Error::Tokenize { offset: 0, .. }));
}

#[test]
fn plain_rule_file() {
    let source = StringStream::new(
        Path::new("decl.olx"),
        "# a tiny declaration language\n\
         ignore immediate WS ::= \\s+\n\
         immediate KEYWORD ::= int|float\n\
         PUNCT ::= [=;]\n\
         @next\n\
         INT ::= [0-9]+\n\
         @next\n\
         ID ::= [a-z_]+\n",
    );
    let rules = RuleSet::build_from_plain(source).unwrap();
    let input = StringStream::new(Path::new("input.decl"), "float x = 12;");
    let tokens = ScanEngine::new(&rules).scan_stream(&input).unwrap();
    let labelled = tokens
        .iter()
        .map(|token| (token.rule().label(), token.text()))
        .collect::<Vec<_>>();
    assert_eq!(
        labelled,
        vec![
            ("KEYWORD", "float"),
            ("ID", "x"),
            ("PUNCT", "="),
            ("INT", "12"),
            ("PUNCT", ";"),
        ]
    );

    let bad = StringStream::new(Path::new("input.decl"), "float x = 1.5;");
    let error = ScanEngine::new(&rules).scan_stream(&bad).unwrap_err();
    assert_eq!(
        error.to_string(),
        "failed to tokenize the beginning of sequence '.5;', in file input.decl, at character 11 of line 1\nplease verify your rule set"
    );
}

#[test]
fn rule_file_on_disk() {
    let directory = std::env::temp_dir().join(format!("ordlex-test-{}", std::process::id()));
    std::fs::create_dir_all(&directory).unwrap();
    let path = directory.join("rules.json");
    std::fs::write(
        &path,
        r#"{"orders": [{"order": 0, "rules": [{"pattern": "[a-z]+"}, {"pattern": ",", "capture": false}]}]}"#,
    )
    .unwrap();
    let rules = RuleSet::build_from_path(&path).unwrap();
    assert_eq!(rules.string_tokens("ab,cd").unwrap(), vec!["ab", "cd"]);

    // Without an extension, the existing file is found.
    let rules = RuleSet::build_from_path(&directory.join("rules")).unwrap();
    assert_eq!(rules.len(), 2);
    std::fs::remove_dir_all(&directory).unwrap();
}

#[test]
fn json_dumps() {
    let rules = RuleSet::build_from_plain(StringStream::new(
        Path::new("rules.olx"),
        "ignore immediate WS ::= \\s+\nKEYWORD ::= int\n@next\nID ::= [a-z]+\n",
    ))
    .unwrap();

    let tokens = rules.tokenize("int x").unwrap();
    assert_eq!(
        serde_json::to_value(&tokens).unwrap(),
        json!([
            {"offset": 0, "rule": "KEYWORD", "text": "int"},
            {"offset": 4, "rule": "ID", "text": "x"},
        ])
    );

    let schema = serde_json::to_value(RuleFileSchema::from(&rules)).unwrap();
    assert_eq!(
        schema,
        json!({"orders": [
            {"order": 0, "rules": [
                {"pattern": "\\s+", "priority": "immediate", "capture": false, "name": "WS"},
                {"pattern": "int", "priority": "natural", "capture": true, "name": "KEYWORD"},
            ]},
            {"order": 1, "rules": [
                {"pattern": "[a-z]+", "priority": "natural", "capture": true, "name": "ID"},
            ]},
        ]})
    );
    // The dump is itself a valid rule file.
    let reloaded = RuleSet::build_from_json(StringStream::new(
        Path::new("dump.json"),
        schema.to_string(),
    ))
    .unwrap();
    assert_eq!(reloaded.to_string(), rules.to_string());
}

#[test]
fn concurrent_scans() {
    let mut rules = RuleSet::skipping_whitespace().unwrap();
    rules.insert_at_current(rule("[a-z]+", Priority::Natural, true));
    let rules = Arc::new(rules);
    let handles = (0..4)
        .map(|i| {
            let rules = Arc::clone(&rules);
            thread::spawn(move || {
                let input = "word ".repeat(i + 1);
                rules.string_tokens(&input).unwrap().len()
            })
        })
        .collect::<Vec<_>>();
    let counts = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![1, 2, 3, 4]);
}
