use super::{count_words, tokens, Reducer};
use crate::policy::{CommandAction, Policy};

fn reduced_tokens(fragment: &str) -> Vec<String> {
    let reduced = Reducer::default().reduce(fragment);
    tokens(&reduced).map(str::to_string).collect()
}

#[test]
fn test_empty_fragment() {
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("   \n\t "), 0);
}

#[test]
fn test_plain_prose() {
    assert_eq!(count_words("The quick brown fox."), 4);
}

#[test]
fn test_line_comment_is_removed() {
    assert_eq!(count_words("hello % this is a comment\nworld"), 2);
    assert_eq!(reduced_tokens("hello % this is a comment\nworld"), ["hello", "world"]);
}

#[test]
fn test_escaped_percent_survives() {
    let toks = reduced_tokens("cost is 50\\% off");
    assert_eq!(toks, ["cost", "is", "50\\%", "off"]);
}

#[test]
fn test_double_backslash_before_percent_starts_comment() {
    assert_eq!(count_words("line\\\\% gone\nnext"), 2);
}

#[test]
fn test_inline_math_is_removed() {
    assert_eq!(reduced_tokens("Given $x + y = z$ we see"), ["Given", "we", "see"]);
}

#[test]
fn test_display_math_forms() {
    assert_eq!(count_words("a $$x^2$$ b"), 2);
    assert_eq!(count_words("a \\[ \\int f \\] b"), 2);
    assert_eq!(count_words("a \\( y \\) b"), 2);
}

#[test]
fn test_math_removal_concatenates_neighbours() {
    assert_eq!(reduced_tokens("pre$x$post"), ["prepost"]);
}

#[test]
fn test_escaped_dollar_is_not_math() {
    assert_eq!(count_words("costs \\$5 and \\$6 today"), 5);
}

#[test]
fn test_unclosed_math_is_kept() {
    assert_eq!(count_words("only $one dollar here"), 4);
}

#[test]
fn test_inline_math_does_not_cross_paragraphs() {
    assert_eq!(count_words("pay $5 now\n\nthen $6 later"), 6);
}

#[test]
fn test_line_break_is_not_display_math() {
    assert_eq!(count_words("first line\\\\[2pt]\nsecond line \\] end"), 5);
}

#[test]
fn test_figure_environment_is_removed() {
    let text = "Before.\n\\begin{figure}[h]\n\\centering\n\\caption{Lots of caption words}\n\\end{figure}\nAfter.";
    assert_eq!(reduced_tokens(text), ["Before.", "After."]);
}

#[test]
fn test_starred_environment_is_removed() {
    assert_eq!(count_words("a \\begin{equation*} x = 1 \\end{equation*} b"), 2);
    assert_eq!(count_words("a \\begin{align*} x &= 1 \\end{align*} b"), 2);
}

#[test]
fn test_nested_same_environment() {
    let text = "keep \\begin{figure} a \\begin{figure} b \\end{figure} c \\end{figure} kept";
    assert_eq!(reduced_tokens(text), ["keep", "kept"]);
}

#[test]
fn test_nested_different_environments() {
    let text = "x \\begin{table} \\begin{tabular}{cc} 1 & 2 \\end{tabular} note \\end{table} y";
    assert_eq!(reduced_tokens(text), ["x", "y"]);
}

#[test]
fn test_unmatched_end_is_ignored() {
    assert_eq!(reduced_tokens("one \\end{figure} two"), ["one", "two"]);
}

#[test]
fn test_unclosed_environment_removes_nothing() {
    assert_eq!(reduced_tokens("one \\begin{figure} two"), ["one", "two"]);
}

#[test]
fn test_unclosed_environment_still_removes_closed_ones_inside() {
    let text = "keep \\begin{figure} words \\begin{table} secret table text \\end{table} tail";
    assert_eq!(reduced_tokens(text), ["keep", "words", "tail"]);
}

#[test]
fn test_environment_closed_after_unclosed_sibling() {
    let text = "a \\begin{figure} b \\begin{table} c \\end{table} d \\begin{table} e \\end{table} f";
    assert_eq!(reduced_tokens(text), ["a", "b", "d", "f"]);
}

#[test]
fn test_list_items_count_as_prose() {
    let text = "\\begin{itemize}\n\\item First point\n\\item Second point\n\\end{itemize}";
    assert_eq!(
        reduced_tokens(text),
        ["First", "point", "Second", "point"]
    );
}

#[test]
fn test_content_preserving_command() {
    assert_eq!(reduced_tokens("an \\textbf{important} result"), ["an", "important", "result"]);
    assert_eq!(reduced_tokens("\\emph{\\textbf{deep}} nest"), ["deep", "nest"]);
}

#[test]
fn test_content_discarding_command() {
    assert_eq!(count_words("\\cite{key2020}"), 0);
    assert_eq!(reduced_tokens("as shown \\citep[p.~4]{smith} here"), ["as", "shown", "here"]);
    assert_eq!(reduced_tokens("see Figure~\\ref{fig:one}."), ["see", "Figure~."]);
}

#[test]
fn test_deeply_nested_arguments() {
    let depth = 100_000;
    let text = format!("{}x{}", "\\emph{".repeat(depth), "}".repeat(depth));
    assert_eq!(count_words(&text), 1);

    let mixed = format!("{}deep{} words", "\\textbf{\\cite{k}".repeat(depth), "}".repeat(depth));
    assert_eq!(reduced_tokens(&mixed), ["deep", "words"]);
}

#[test]
fn test_arguments_after_a_preserved_group() {
    assert_eq!(reduced_tokens("\\mymacro{one}[opt]{two} three"), ["onetwo", "three"]);
    assert_eq!(reduced_tokens("\\emph{\\cite{a}b}{c} d"), ["bc", "d"]);
}

#[test]
fn test_groups_do_not_reach_past_a_preserved_argument() {
    assert_eq!(reduced_tokens("\\emph{a\\\\[b} c] d"), ["a[b", "c]", "d"]);
    assert_eq!(reduced_tokens("\\emph{a \\cite{b} c"), ["a", "c"]);
}

#[test]
fn test_many_unclosed_arguments() {
    let text = "\\cite{word ".repeat(20_000);
    assert_eq!(count_words(&text), 20_000);
}

#[test]
fn test_unknown_command_keeps_content() {
    assert_eq!(reduced_tokens("\\mymacro{kept words} \\LaTeX"), ["kept", "words"]);
}

#[test]
fn test_starred_section_title_is_dropped() {
    assert_eq!(reduced_tokens("\\subsection*{Acknowledgements} Thanks"), ["Thanks"]);
}

#[test]
fn test_punctuation_only_residue_is_not_counted() {
    assert_eq!(count_words("word -- word ~ \\\\"), 2);
}

#[test]
fn test_stray_braces_are_removed() {
    assert_eq!(reduced_tokens("{grouped} text}"), ["grouped", "text"]);
}

#[test]
fn test_unbalanced_argument_does_not_swallow_text() {
    assert_eq!(count_words("\\cite{unclosed and more words"), 4);
}

#[test]
fn test_custom_policy() {
    let policy = Policy::default()
        .with_command("todo", CommandAction::Discard)
        .skip_environment("comment");
    let reducer = Reducer::new(policy);

    assert_eq!(reducer.count_words("real \\todo{fix this} text"), 2);
    assert_eq!(
        reducer.count_words("a \\begin{comment} hidden words \\end{comment} b"),
        2
    );
    assert_eq!(count_words("real \\todo{fix this} text"), 4);
}
