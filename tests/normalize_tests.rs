use pretty_assertions::assert_eq;
use tldr_llama::normalize::{
    enforce_character_limit, remove_disclaimer_lines, strip_structural_markup, Structure,
    SummaryBudget,
};

#[test]
fn test_remove_disclaimer_lines_drops_marked_lines() {
    let text = "Here is a rewrite of the text:\nRust 1.80 ships today.\n\nIt adds   LazyCell.\nDisclaimer: I am a model.";
    assert_eq!(
        remove_disclaimer_lines(text),
        "Rust 1.80 ships today. It adds LazyCell."
    );
}

#[test]
fn test_remove_disclaimer_lines_is_case_insensitive_substring() {
    assert_eq!(remove_disclaimer_lines("THE ARTICLE says so"), "");
    assert_eq!(remove_disclaimer_lines("I'll REWRITE this"), "");
    assert_eq!(remove_disclaimer_lines("Rewriting is hard"), "");
}

#[test]
fn test_remove_disclaimer_lines_needs_the_exact_marker() {
    // "rewritten" does not contain "rewrite"
    assert_eq!(
        remove_disclaimer_lines("rewritten for clarity"),
        "rewritten for clarity"
    );
}

#[test]
fn test_remove_disclaimer_lines_all_lines_marked() {
    let text = "I will rewrite this.\nRewriting now\nDISCLAIMER follows\nIn the article we see";
    assert_eq!(remove_disclaimer_lines(text), "");
}

#[test]
fn test_remove_disclaimer_lines_empty_input() {
    assert_eq!(remove_disclaimer_lines(""), "");
    assert_eq!(remove_disclaimer_lines("\n\n  \t\n"), "");
}

#[test]
fn test_strip_bullet_prefixes() {
    assert_eq!(strip_structural_markup("* first item"), "first item");
    assert_eq!(strip_structural_markup("3) third item"), "third item");
    assert_eq!(strip_structural_markup("12. twelfth"), "twelfth");
    assert_eq!(strip_structural_markup("-dash"), "dash");
}

#[test]
fn test_strip_flattens_list_into_paragraph() {
    let text = "```\n- one\n  * two\n\n1. three\n2) four\n```";
    assert_eq!(strip_structural_markup(text), "one two three four");
}

#[test]
fn test_strip_leaves_mid_line_markers() {
    let text = "A state-of-the-art tool * with 2) parts and 3. points";
    assert_eq!(strip_structural_markup(text), text);
}

#[test]
fn test_strip_repeats_through_leading_numbers() {
    // leading markers are stripped until none is left, including a decimal's integer part
    assert_eq!(strip_structural_markup("1. 3.5 million users"), "5 million users");
    assert_eq!(strip_structural_markup("- 2) 10. done"), "done");
}

#[test]
fn test_strip_is_idempotent() {
    let inputs = [
        "- - nested dash",
        "* 1. 2) mixed markers\n- - - more",
        "```rust\nfn main() {}\n```",
        "1.5 million users\n  -  spaced bullet",
        "plain text only",
        "",
        "- \n* \n```",
    ];

    for input in inputs {
        let once = strip_structural_markup(input);
        let twice = strip_structural_markup(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_enforce_character_limit_under_budget_is_identity() {
    let text = "Short and sweet";
    assert_eq!(enforce_character_limit(text, SummaryBudget::new(15)), text);
    assert_eq!(enforce_character_limit(text, SummaryBudget::new(500)), text);
}

#[test]
fn test_enforce_character_limit_truncates_and_closes_sentence() {
    let text = "The quick brown fox jumps over the lazy dog";
    assert_eq!(
        enforce_character_limit(text, SummaryBudget::new(10)),
        "The quick."
    );
    assert_eq!(
        enforce_character_limit("Ends here. More text", SummaryBudget::new(10)),
        "Ends here."
    );
}

#[test]
fn test_enforce_character_limit_bound_holds() {
    let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod.";
    for budget in 1..=text.len() + 2 {
        let out = enforce_character_limit(text, SummaryBudget::new(budget));
        assert!(
            out.chars().count() <= budget + 1,
            "budget {} produced {} chars",
            budget,
            out.chars().count()
        );
    }
}

#[test]
fn test_enforce_character_limit_counts_chars_not_bytes() {
    let text = "héllo wörld ünïcode";
    let out = enforce_character_limit(text, SummaryBudget::new(5));
    assert_eq!(out, "héllo.");
}

#[test]
fn test_enforce_character_limit_degenerate_budget() {
    let zero = enforce_character_limit("Some candidate text", SummaryBudget::new(0));
    assert!(zero.chars().count() <= 1);
    assert_eq!(zero, ".");

    let negative = enforce_character_limit("Some candidate text", SummaryBudget::from(-10));
    assert_eq!(negative, ".");

    assert_eq!(enforce_character_limit("", SummaryBudget::new(0)), "");
}

#[test]
fn test_structure_detection_is_whole_text() {
    assert_eq!(Structure::detect("- one - two"), Structure::NeedsRewrite);
    assert_eq!(Structure::detect("a state-of-the-art tool"), Structure::NeedsRewrite);
    assert_eq!(Structure::detect("grew 2.5 times"), Structure::NeedsRewrite);
    assert_eq!(Structure::detect("bold *claim*"), Structure::NeedsRewrite);
    assert_eq!(
        Structure::detect("Plain sentence with no markers."),
        Structure::AcceptableAsIs
    );
    assert_eq!(Structure::detect("Chapter 3) begins"), Structure::AcceptableAsIs);
}
