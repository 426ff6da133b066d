//! Behavioural tests for template rendering.

use super::*;
use std::collections::BTreeMap;

fn ctx() -> Context {
    Context::new()
}

#[test]
fn test_literal_passthrough() {
    let samples = [
        "",
        "plain text",
        "#!/bin/bash\n\nset -e\n",
        "  leading and trailing whitespace \t\n\n",
        "f() { echo \"${HOME}\"; }",
        "a } b }} c %} d #}",
        "unicode: 日本語 🎉",
    ];
    let context = ctx().with("unused", "value");
    for sample in samples {
        assert_eq!(render(sample, &context).unwrap(), sample);
        assert_eq!(render(sample, &Context::new()).unwrap(), sample);
    }
}

#[test]
fn test_simple_substitution() {
    let context = ctx().with("greeting", "Hello").with("name", "Alice");
    let out = render("{{ greeting }}, {{name}}!", &context).unwrap();
    assert_eq!(out, "Hello, Alice!");
}

#[test]
fn test_boolean_interpolation() {
    let context = ctx().with("flag", true);
    assert_eq!(render("tests={{ flag }}", &context).unwrap(), "tests=true");
}

#[test]
fn test_missing_variable_fails() {
    let err = render("{{ missing }}", &Context::new()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UndefinedVariable {
            name: "missing".to_string(),
            location: Location {
                offset: 3,
                line: 1,
                column: 4
            },
        }
    );
}

#[test]
fn test_missing_variable_in_untaken_branch_is_ignored() {
    let context = ctx().with("enabled", false);
    let out = render("{% if enabled %}{{ missing }}{% endif %}ok", &context).unwrap();
    assert_eq!(out, "ok");
}

#[test]
fn test_missing_variable_late_in_template_gives_no_output() {
    let context = ctx().with("a", "A");
    let result = render("{{ a }}{{ a }}\n{{ b }}", &context);
    match result {
        Err(TemplateError::UndefinedVariable { name, location }) => {
            assert_eq!(name, "b");
            assert_eq!(location.line, 2);
        }
        other => panic!("expected undefined variable, got {:?}", other),
    }
}

#[test]
fn test_conditional_branches() {
    let template = "{% if enable_tests %}A{% else %}B{% endif %}";
    assert_eq!(render(template, &ctx().with("enable_tests", true)).unwrap(), "A");
    assert_eq!(render(template, &ctx().with("enable_tests", false)).unwrap(), "B");
}

#[test]
fn test_conditional_without_else() {
    let template = "x{% if on %}-y{% endif %}-z";
    assert_eq!(render(template, &ctx().with("on", true)).unwrap(), "x-y-z");
    assert_eq!(render(template, &ctx().with("on", false)).unwrap(), "x-z");
}

#[test]
fn test_condition_must_be_boolean() {
    let err = render("{% if name %}yes{% endif %}", &ctx().with("name", "x")).unwrap_err();
    match err {
        TemplateError::TypeMismatch { message, .. } => {
            assert_eq!(message, "condition must be a boolean, found string")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_loop_concatenates_in_order() {
    let context = ctx().with("files", vec!["x", "y"]);
    let out = render("{% for f in files %}run {{ f }}{% endfor %}", &context).unwrap();
    assert_eq!(out, "run xrun y");
}

#[test]
fn test_loop_order_preserved() {
    let context = ctx().with("seq", vec!["a", "b", "c"]);
    let out = render("{% for s in seq %}[{{ loop.index }}:{{ s }}]{% endfor %}", &context).unwrap();
    assert_eq!(out, "[1:a][2:b][3:c]");
}

#[test]
fn test_empty_loop_renders_nothing() {
    let context = ctx().with("files", Vec::<String>::new());
    let out = render("before\n{% for f in files %}run {{ f }}\n{% endfor %}after\n", &context)
        .unwrap();
    assert_eq!(out, "before\nafter\n");
}

#[test]
fn test_empty_loop_body_not_evaluated() {
    let context = ctx().with("files", Vec::<String>::new());
    let out = render("{% for f in files %}{{ undefined_thing }}{% endfor %}", &context).unwrap();
    assert_eq!(out, "");
}

#[test]
fn test_loop_over_non_sequence_fails() {
    let err = render("{% for f in name %}{% endfor %}", &ctx().with("name", "abc")).unwrap_err();
    match err {
        TemplateError::TypeMismatch { message, location } => {
            assert_eq!(message, "`name` is a string, but `for` needs a sequence");
            assert_eq!(location.offset, 12);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_loop_binding_does_not_leak() {
    let context = ctx().with("files", vec!["x"]);
    let err = render("{% for f in files %}{{ f }}{% endfor %}{{ f }}", &context).unwrap_err();
    assert!(matches!(err, TemplateError::UndefinedVariable { ref name, .. } if name == "f"));
}

#[test]
fn test_loop_binding_shadows_parent() {
    let context = ctx().with("f", "outer").with("files", vec!["inner"]);
    let out = render("{% for f in files %}{{ f }}{% endfor %} {{ f }}", &context).unwrap();
    assert_eq!(out, "inner outer");
}

#[test]
fn test_nested_loops_and_loop_metadata() {
    let groups: Value = vec![
        [("name", Value::from("fix")), ("codes", Value::from(vec!["E301", "E303"]))]
            .into_iter()
            .collect::<Value>(),
        [("name", Value::from("warn")), ("codes", Value::from(vec!["E101"]))]
            .into_iter()
            .collect::<Value>(),
    ]
    .into();
    let context = ctx().with("groups", groups);
    let template = "{% for g in groups %}{{ g.name }}={% for c in g.codes %}{{ c }}\
{% if not loop.last %},{% endif %}{% endfor %}{% if not loop.last %};{% endif %}{% endfor %}";
    let out = render(template, &context).unwrap();
    assert_eq!(out, "fix=E301,E303;warn=E101");
}

#[test]
fn test_loop_metadata_values() {
    let context = ctx().with("xs", vec!["a", "b"]);
    let template = "{% for x in xs %}{{ loop.index0 }}{{ loop.first }}{{ loop.last }} {% endfor %}";
    assert_eq!(render(template, &context).unwrap(), "0truefalse 1falsetrue ");
}

#[test]
fn test_loop_over_mappings() {
    let mut first = BTreeMap::new();
    first.insert("path".to_string(), Value::from("src/pkg"));
    first.insert("tests".to_string(), Value::from(true));
    let mut second = BTreeMap::new();
    second.insert("path".to_string(), Value::from("tools"));
    second.insert("tests".to_string(), Value::from(false));
    let context = ctx().with("dirs", Value::Seq(vec![first.into(), second.into()]));
    let template = "{% for d in dirs %}{{ d.path }}{% if d.tests %}+t{% endif %}\n{% endfor %}";
    assert_eq!(render(template, &context).unwrap(), "src/pkg+t\ntools\n");
}

#[test]
fn test_whitespace_around_tags_is_preserved() {
    let context = ctx().with("enable_tests", true).with("tests_dir", "tests");
    let template = "flake8 pkg/ {% if enable_tests %} {{ tests_dir }}/ {% endif %}\n\n  exit 0\n";
    assert_eq!(
        render(template, &context).unwrap(),
        "flake8 pkg/  tests/ \n\n  exit 0\n"
    );
}

#[test]
fn test_indexed_and_dotted_paths() {
    let meta: Value = [("name", Value::from("demo")), ("dirs", Value::from(vec!["a", "b"]))]
        .into_iter()
        .collect();
    let context = ctx().with("meta", meta);
    assert_eq!(
        render(r#"{{ meta.name }} {{ meta.dirs[1] }} {{ meta["dirs"].0 }}"#, &context).unwrap(),
        "demo b a"
    );
}

#[test]
fn test_missing_path_component_reports_full_path() {
    let meta: Value = [("name", Value::from("demo"))].into_iter().collect();
    let context = ctx().with("meta", meta).with("xs", vec!["a"]);

    let err = render("{{ meta.version }}", &context).unwrap_err();
    assert!(matches!(err, TemplateError::UndefinedVariable { ref name, .. } if name == "meta.version"));

    let err = render("{{ xs[3] }}", &context).unwrap_err();
    assert!(matches!(err, TemplateError::UndefinedVariable { ref name, .. } if name == "xs[3]"));
}

#[test]
fn test_attribute_on_scalar_is_type_mismatch() {
    let err = render("{{ name.first }}", &ctx().with("name", "x")).unwrap_err();
    match err {
        TemplateError::TypeMismatch { message, .. } => {
            assert_eq!(message, "`name` is a string; cannot access `.first` on it")
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_interpolating_sequence_is_type_mismatch() {
    let err = render("{{ files }}", &ctx().with("files", vec!["a"])).unwrap_err();
    assert!(matches!(err, TemplateError::TypeMismatch { .. }));
}

#[test]
fn test_join_filter() {
    let context = ctx().with("fix", vec!["E301", "E303", "W291"]);
    let out = render(r#"--select "{{ fix | join(",") }}""#, &context).unwrap();
    assert_eq!(out, r#"--select "E301,E303,W291""#);
}

#[test]
fn test_default_filter() {
    let context = ctx().with("present", "here");
    assert_eq!(
        render(r#"{{ absent | default("fallback") }}"#, &context).unwrap(),
        "fallback"
    );
    assert_eq!(
        render(r#"{{ present | default("fallback") }}"#, &context).unwrap(),
        "here"
    );
}

#[test]
fn test_default_filter_after_other_filters() {
    let out = render(r#"{{ absent | upper | default("x") }}"#, &Context::new()).unwrap();
    assert_eq!(out, "x");
}

#[test]
fn test_default_filter_can_use_another_variable() {
    let context = ctx().with("repo_name", "demo-repo");
    let out = render("{{ pypi_name | default(repo_name) }}", &context).unwrap();
    assert_eq!(out, "demo-repo");
}

#[test]
fn test_default_does_not_hide_type_errors() {
    let context = ctx().with("name", "x");
    let err = render(r#"{{ name.first | default("y") }}"#, &context).unwrap_err();
    assert!(matches!(err, TemplateError::TypeMismatch { .. }));
}

#[test]
fn test_filter_type_mismatch_location() {
    let err = render("ab\n{{ flag | upper }}", &ctx().with("flag", true)).unwrap_err();
    match err {
        TemplateError::TypeMismatch { message, location } => {
            assert_eq!(message, "filter `upper` expects a string, found boolean");
            assert_eq!(location.line, 2);
            assert_eq!(location.column, 11);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_lstrip_filter() {
    let context = ctx().with("unique_name", "_demo");
    let out = render(r#".. start shields {{ unique_name | lstrip("_") }}"#, &context).unwrap();
    assert_eq!(out, ".. start shields demo");
}

#[test]
fn test_membership_and_comparison() {
    let context = ctx()
        .with("platforms", vec!["Windows", "Linux"])
        .with("site", "com");
    let template = r#"{% if "Windows" in platforms %}W{% endif %}{% if "macOS" not in platforms %}-noMac{% endif %}{% if site == "com" and site != "org" %}-com{% endif %}"#;
    assert_eq!(render(template, &context).unwrap(), "W-noMac-com");
}

#[test]
fn test_substring_and_key_membership() {
    let meta: Value = [("docs", Value::from(true))].into_iter().collect();
    let context = ctx().with("desc", "a template engine").with("meta", meta);
    let template = r#"{% if "engine" in desc %}1{% endif %}{% if "docs" in meta %}2{% endif %}"#;
    assert_eq!(render(template, &context).unwrap(), "12");
}

#[test]
fn test_boolean_operators_short_circuit() {
    let context = ctx().with("off", false).with("on", true);
    assert_eq!(
        render("{% if off and missing %}x{% else %}y{% endif %}", &context).unwrap(),
        "y"
    );
    assert_eq!(
        render("{% if on or missing %}x{% endif %}", &context).unwrap(),
        "x"
    );
}

#[test]
fn test_parenthesised_conditions() {
    let context = ctx().with("a", false).with("b", true).with("c", true);
    assert_eq!(
        render("{% if (a or b) and c %}yes{% endif %}", &context).unwrap(),
        "yes"
    );
    assert_eq!(
        render("{% if a or (b and not c) %}yes{% else %}no{% endif %}", &context).unwrap(),
        "no"
    );
}

#[test]
fn test_in_on_boolean_is_type_mismatch() {
    let err = render(r#"{% if "x" in flag %}{% endif %}"#, &ctx().with("flag", true)).unwrap_err();
    assert!(matches!(err, TemplateError::TypeMismatch { .. }));
}

#[test]
fn test_raw_block() {
    let context = ctx().with("os", "linux");
    let out = render(
        "os: {{ os }}\nmatrix: {% raw %}${{ matrix.os }}{% endraw %}\n",
        &context,
    )
    .unwrap();
    assert_eq!(out, "os: linux\nmatrix: ${{ matrix.os }}\n");
}

#[test]
fn test_deeply_nested_blocks_fail_without_output() {
    let levels = 400;
    let template = format!("{}x{}", "{% if t %}".repeat(levels), "{% endif %}".repeat(levels));

    let err = render(&template, &ctx().with("t", true)).unwrap_err();
    match err {
        TemplateError::Malformed { message, location } => {
            assert!(message.contains("deeper than 64 levels"));
            assert_eq!(location.line, 1);
        }
        other => panic!("expected malformed error, got {:?}", other),
    }
}

#[test]
fn test_nesting_at_the_limit_renders() {
    let template = format!("{}x{}", "{% if t %}".repeat(64), "{% endif %}".repeat(64));
    assert_eq!(render(&template, &ctx().with("t", true)).unwrap(), "x");
}

#[test]
fn test_shell_length_expansion_passes_through() {
    let script = "n=${#files[@]}\necho $n\n";
    assert_eq!(render(script, &Context::new()).unwrap(), script);

    let context = ctx().with("files", vec!["ab", "cde"]);
    let out = render("{% for f in files %}{{ f }}=${#f} {% endfor %}", &context).unwrap();
    assert_eq!(out, "ab=${#f} cde=${#f} ");
}

#[test]
fn test_rerender_of_delimiter_free_output_is_stable() {
    let context = ctx()
        .with("dirs", vec!["pkg", "tests"])
        .with("body", "if [ -z \"$x\" ]; then { echo ok; } fi");
    let first = render(
        "{% for d in dirs %}lint {{ d }}/\n{% endfor %}{{ body }}\n",
        &context,
    )
    .unwrap();
    let second = render(&first, &context).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_values_are_not_reinterpreted() {
    let context = ctx().with("value", "{{ not_a_tag }} {% if %}");
    let out = render("{{ value }}", &context).unwrap();
    assert_eq!(out, "{{ not_a_tag }} {% if %}");
}

#[test]
fn test_rendering_is_deterministic() {
    let template = Template::parse("{% for k in keys %}{{ k }}{% endfor %}").unwrap();
    let context = ctx().with("keys", vec!["b", "a", "c"]);
    let first = template.render(&context).unwrap();
    for _ in 0..10 {
        assert_eq!(template.render(&context).unwrap(), first);
    }
}

#[test]
fn test_template_is_reusable_across_threads() {
    let template = Template::parse("{{ who }}:{% for i in items %}{{ i }}{% endfor %}").unwrap();
    let results: Vec<String> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let template = &template;
                s.spawn(move || {
                    let context = Context::new()
                        .with("who", format!("t{}", n))
                        .with("items", vec![n.to_string(); n]);
                    template.render(&context).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(results, vec!["t0:", "t1:1", "t2:22", "t3:333"]);
}

#[test]
fn test_from_str() {
    let template: Template = "{{ x }}".parse().unwrap();
    assert_eq!(template.source(), "{{ x }}");
    assert_eq!(template.render(&ctx().with("x", "1")).unwrap(), "1");
}

#[test]
fn test_malformed_template_is_reported_before_rendering() {
    let err = Template::parse("{% if a %}unterminated").unwrap_err();
    assert!(matches!(err, TemplateError::Malformed { .. }));
    let err = Template::parse("{% endif %}").unwrap_err();
    assert!(matches!(err, TemplateError::Malformed { .. }));
}

#[test]
fn test_context_from_yaml_drives_render() {
    let context = Context::from_yaml_str(
        "import_name: demo\nenable_tests: true\ntests_dir: tests\npy_versions: [3.8, 3.9]\n",
    )
    .unwrap();
    let template = "{{ import_name }} {% if enable_tests %}{{ tests_dir }}{% endif %} {{ py_versions | join(\" \") }}";
    assert_eq!(render(template, &context).unwrap(), "demo tests 3.8 3.9");
}
