//! Pattern substitution engine and the two built-in rule sets.
//!
//! Rules are literal string patterns applied in list order. Each rule
//! replaces every occurrence of its pattern in document order; replacement
//! text is never rescanned, so a rule cannot match its own output.
//!
//! A [`Replacement::Sequence`] yields one value per occurrence and repeats
//! its last value once the list is exhausted. The sample rule set uses this
//! for `{Title}`, which appears once per post type in the theme.

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::BuildError;

/// Replacement value for a single rule
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Same value for every occurrence
    Literal(String),
    /// One value per occurrence in document order; the last value repeats
    /// for occurrences past the end of the list
    Sequence(Vec<String>),
}

/// One ordered find/replace rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: String,
    pub replacement: Replacement,
}

impl Rule {
    pub fn literal(pattern: &str, replacement: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: Replacement::Literal(replacement.to_string()),
        }
    }

    pub fn sequence(pattern: &str, values: &[&str]) -> Self {
        Self {
            pattern: pattern.to_string(),
            replacement: Replacement::Sequence(
                values.iter().map(|s| s.to_string()).collect(),
            ),
        }
    }

    /// Replacement value for the nth occurrence (0-based)
    fn value_for(&self, occurrence: usize) -> &str {
        match &self.replacement {
            Replacement::Literal(value) => value,
            Replacement::Sequence(values) => values
                .get(occurrence)
                .or_else(|| values.last())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// Apply a single rule over the whole document
fn apply_rule(rule: &Rule, input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut occurrence = 0usize;

    while let Some(pos) = rest.find(&rule.pattern) {
        out.push_str(&rest[..pos]);
        out.push_str(rule.value_for(occurrence));
        occurrence += 1;
        rest = &rest[pos + rule.pattern.len()..];
    }

    out.push_str(rest);
    out
}

/// Apply every rule in list order
pub fn apply_rules(rules: &[Rule], input: &str) -> String {
    let mut doc = input.to_string();
    for rule in rules {
        doc = apply_rule(rule, &doc);
    }
    doc
}

/// Rule set for the locally previewable sample: placeholder markers become
/// illustrative content.
pub fn sample_rules() -> Vec<Rule> {
    vec![
        Rule::literal("<!-- {CustomCSS}-->", ""),
        Rule::sequence(
            "{Title}",
            &[
                "Blog Title",
                "Blog Title",
                "This is a text post",
                "This is a chat post",
            ],
        ),
        Rule::literal("{Description}", "This is a sample blog"),
        Rule::literal(
            "{Favicon}",
            "https://assets.tumblr.com/images/default_avatar/cube_closed_128.png",
        ),
        Rule::literal("{Body}", "Lorem ipsum, dolor sit amet"),
        Rule::literal("{Caption}", "This image has this caption"),
        Rule::literal(
            "{PhotoURL-500}",
            "https://68.media.tumblr.com/71faf3456411d636c82f8b0b51b87f6e/tumblr_ot4msyMgBA1wum1vko1_500.jpg",
        ),
        Rule::literal(
            "{PhotoURL-Panorama}",
            "https://68.media.tumblr.com/27417bb967101c7a1a06eb3834a220d5/tumblr_ot4mwisRYW1wum1vko1_500.jpg",
        ),
        Rule::literal(
            "{Photoset}",
            "<div id=\"photoset_163011928188\" class=\"html_photoset\"><iframe id=\"photoset_iframe_163011928188\" name=\"photoset_iframe_163011928188\" class=\"photoset\" scrolling=\"no\" frameborder=\"0\" height=\"511\" width=\"100%\" style=\"border:0px; background-color:transparent; overflow:hidden;\" src=\"https://www.tumblr.com/post/163011928188/photoset_iframe/tremblrtheme/tumblr_ot4mv2tChL1wum1vk/0/false\"></iframe></div>",
        ),
        Rule::literal(
            "{Quote}",
            "It does not matter how slow you go so long as you do not stop.",
        ),
        Rule::literal("{Source}", "Confucious"),
        Rule::literal("{Name}", "Link post"),
    ]
}

/// Rule set for the platform-ready artifact: comment wrappers are stripped
/// so Tumblr sees the bare template markers.
pub fn platform_rules() -> Vec<Rule> {
    vec![Rule::literal("<!-- ", ""), Rule::literal("-->", "")]
}

/// Apply `rules` to the document at `src` and write the result to `dest`
/// as a fresh file; `src` is left unmodified.
pub fn write_artifact(src: &Path, dest: &Path, rules: &[Rule]) -> Result<(), BuildError> {
    let doc = fs::read_to_string(src).map_err(|e| BuildError::ReadFailed {
        path: src.to_path_buf(),
        source: e,
    })?;

    let out = apply_rules(rules, &doc);

    if let Some(parent) = dest.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| BuildError::CreateDirFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(dest, out).map_err(|e| BuildError::WriteFailed {
        path: dest.to_path_buf(),
        source: e,
    })
}

/// Produce dist/sample.html from the working document
pub fn write_sample(config: &Config) -> Result<(), BuildError> {
    write_artifact(&config.working_html, &config.sample_out, &sample_rules())
}

/// Produce the platform-ready dist/theme.html from the working document
pub fn write_platform(config: &Config) -> Result<(), BuildError> {
    write_artifact(&config.working_html, &config.theme_out, &platform_rules())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ==================== apply_rule tests ====================

    #[test]
    fn test_literal_replaces_every_occurrence() {
        let rule = Rule::literal("{Body}", "text");
        let out = apply_rule(&rule, "a {Body} b {Body} c");
        assert_eq!(out, "a text b text c");
    }

    #[test]
    fn test_literal_no_occurrences_is_noop() {
        let rule = Rule::literal("{Body}", "text");
        let out = apply_rule(&rule, "nothing to do");
        assert_eq!(out, "nothing to do");
    }

    #[test]
    fn test_rule_does_not_match_its_own_output() {
        let rule = Rule::literal("{T}", "{T}!");
        let out = apply_rule(&rule, "{T}");
        assert_eq!(out, "{T}!");
    }

    #[test]
    fn test_sequence_values_in_document_order() {
        let rule = Rule::sequence("{Title}", &["one", "two", "three"]);
        let out = apply_rule(&rule, "{Title} {Title} {Title}");
        assert_eq!(out, "one two three");
    }

    #[test]
    fn test_sequence_repeats_last_value_when_exhausted() {
        let rule = Rule::sequence("{Title}", &["a", "b"]);
        let out = apply_rule(&rule, "{Title} {Title} {Title} {Title}");
        assert_eq!(out, "a b b b");
    }

    #[test]
    fn test_empty_sequence_replaces_with_nothing() {
        let rule = Rule::sequence("{Title}", &[]);
        let out = apply_rule(&rule, "x {Title} y");
        assert_eq!(out, "x  y");
    }

    // ==================== apply_rules tests ====================

    #[test]
    fn test_rules_applied_in_list_order() {
        // The earlier rule claims the longer pattern before the later one
        // can see its suffix.
        let rules = vec![Rule::literal("ab", "1"), Rule::literal("b", "2")];
        let out = apply_rules(&rules, "ab b");
        assert_eq!(out, "1 2");
    }

    // ==================== sample rule set tests ====================

    #[test]
    fn test_sample_title_cycle() {
        let out = apply_rules(&sample_rules(), "{Title}|{Title}|{Title}|{Title}");
        assert_eq!(
            out,
            "Blog Title|Blog Title|This is a text post|This is a chat post"
        );
    }

    #[test]
    fn test_sample_removes_custom_css_marker() {
        let out = apply_rules(&sample_rules(), "<style><!-- {CustomCSS}--></style>");
        assert_eq!(out, "<style></style>");
    }

    #[test]
    fn test_sample_leaves_no_recognized_token() {
        let doc = "{Title} {Description} {Favicon} {Body} {Caption} \
                   {PhotoURL-500} {PhotoURL-Panorama} {Photoset} {Quote} \
                   {Source} {Name} <!-- {CustomCSS}-->";
        let out = apply_rules(&sample_rules(), doc);

        for rule in sample_rules() {
            assert!(
                !out.contains(&rule.pattern),
                "token {} survived substitution",
                rule.pattern
            );
        }
        assert!(out.contains("This is a sample blog"));
        assert!(out.contains("Lorem ipsum, dolor sit amet"));
        assert!(out.contains("Confucious"));
    }

    #[test]
    fn test_sample_unknown_token_untouched() {
        let out = apply_rules(&sample_rules(), "{NotATumblrTag}");
        assert_eq!(out, "{NotATumblrTag}");
    }

    // ==================== platform rule set tests ====================

    #[test]
    fn test_platform_unwraps_marker_comments() {
        let doc = "<!-- {block:Posts}--><p>{Body}</p><!-- {/block:Posts}-->";
        let out = apply_rules(&platform_rules(), doc);
        assert_eq!(out, "{block:Posts}<p>{Body}</p>{/block:Posts}");
    }

    #[test]
    fn test_platform_leaves_no_wrapper_residue() {
        let doc = "<!-- !import scripts--> body <!-- {CustomCSS}--> tail -->";
        let out = apply_rules(&platform_rules(), doc);
        assert!(!out.contains("<!-- "));
        assert!(!out.contains("-->"));
        assert!(out.contains("!import scripts"));
    }

    // ==================== artifact tests ====================

    #[test]
    fn test_write_sample_is_fresh_write() {
        let temp = TempDir::new().unwrap();
        let config = Config::for_root(temp.path());
        fs::create_dir_all(&config.work_dir).unwrap();
        fs::write(&config.working_html, "<p>{Description}</p>").unwrap();

        write_sample(&config).unwrap();

        // Working document untouched, dist created fresh
        assert_eq!(
            fs::read_to_string(&config.working_html).unwrap(),
            "<p>{Description}</p>"
        );
        assert_eq!(
            fs::read_to_string(&config.sample_out).unwrap(),
            "<p>This is a sample blog</p>"
        );
    }

    #[test]
    fn test_write_platform_output_path() {
        let temp = TempDir::new().unwrap();
        let config = Config::for_root(temp.path());
        fs::create_dir_all(&config.work_dir).unwrap();
        fs::write(&config.working_html, "<!-- {Title}-->").unwrap();

        write_platform(&config).unwrap();

        assert_eq!(fs::read_to_string(&config.theme_out).unwrap(), "{Title}");
    }

    #[test]
    fn test_write_artifact_missing_working_document() {
        let temp = TempDir::new().unwrap();
        let config = Config::for_root(temp.path());

        let err = write_sample(&config).unwrap_err();
        assert!(matches!(err, BuildError::ReadFailed { .. }));
    }
}
