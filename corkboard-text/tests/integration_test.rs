//! Integration tests for corkboard-text

use corkboard_text::*;
use std::sync::Arc;

#[test]
fn test_escape_post_body() {
    let body = r#"<script>alert("hi")</script> & welcome"#;
    let escaped = escape_html(body);

    assert_eq!(
        escaped,
        "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt; &amp; welcome"
    );
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
}

#[test]
fn test_escape_twice_is_stable() {
    let body = r#"Q&A: "5 < 6" isn't news &mdash; &#8212;"#;
    let once = escape(body, &EscapeConfig::default());
    let twice = escape(&once, &EscapeConfig::default());

    assert_eq!(once, twice);
    assert!(once.contains("&mdash;"));
    assert!(once.contains("&#8212;"));
    assert!(once.starts_with("Q&amp;A"));
}

#[test]
fn test_disable_double_escape_prevention() {
    let config = EscapeConfig::new().prevent_double_escape(false);
    assert_eq!(escape("&lt;safe&gt;", &config), "&amp;lt;safe&amp;gt;");
    assert_eq!(escape("&amp;", &config), "&amp;amp;");
}

#[test]
fn test_escaper_shared_between_threads() {
    let escaper = Arc::new(
        Escaper::new(EscapeConfig::new().with_extra('`').with_entity('`', "&#96;")).unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let escaper = Arc::clone(&escaper);
            std::thread::spawn(move || escaper.escape(&format!("`{}` <{}>", i, i)))
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(
            handle.join().unwrap(),
            format!("&#96;{}&#96; &lt;{}&gt;", i, i)
        );
    }
}

#[test]
fn test_escape_config_from_toml() {
    let config: EscapeConfig = toml::from_str(
        r#"
        extra = ["/"]
        exclude = ["'"]
        prevent_double_escape = true

        [map]
        "/" = "&#x2F;"
        "#,
    )
    .unwrap();

    assert_eq!(escape("</a> it's", &config), "&lt;&#x2F;a&gt; it's");
}

#[test]
fn test_escape_value_rejects_non_strings() {
    let config = EscapeConfig::default();
    assert_eq!(escape_value(&serde_json::json!(["<b>"]), &config), "");
    assert_eq!(escape_value(&serde_json::json!(true), &config), "");
    assert_eq!(escape_value(&serde_json::json!("<b>"), &config), "&lt;b&gt;");
}

#[test]
fn test_truncate_then_escape_preview() {
    let body = "Tom & Jerry <3 each other a lot";
    let preview = escape_html(&truncate(body, 12, &TruncateOptions::default()));
    assert_eq!(preview, "Tom &amp; Jerry...");
}

#[test]
fn test_truncate_leaves_short_text() {
    for text in ["", "a", "exactly ten"] {
        assert_eq!(truncate(text, 11, &TruncateOptions::default()), text);
    }
}
