//! End-to-end expansion of the physics notation through the reference host

use physmac::config::Loader;
use physmac::error::ExpandError;
use physmac::{expand, expand_with_config, Expander, MacroRegistry};
use rstest::rstest;

#[rstest]
#[case::parentheses("\\qty(x)", "\\left(x\\right)")]
#[case::brackets("\\qty[x]", "\\left[x\\right]")]
#[case::bars("\\qty|x|", "\\left|x\\right|")]
#[case::escaped_braces("\\qty\\{x\\}", "\\left\\{x\\right\\}")]
#[case::bare_braces("\\qty{x}", "\\left\\{x\\right\\}")]
#[case::big("\\qty\\big(x)", "\\bigl(x\\bigr)")]
#[case::bigg_cap("\\qty\\Bigg[x]", "\\Biggl[x\\Biggr]")]
fn quantity_per_delimiter(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expand(source).unwrap(), expected);
}

#[rstest]
#[case::parentheses("\\qty(x", ")")]
#[case::brackets("\\qty[x", "]")]
#[case::bars("\\qty|x", "|")]
#[case::escaped_braces("\\qty\\{x", "\\}")]
#[case::nested("\\qty(a(b)", ")")]
fn quantity_unterminated(#[case] source: &str, #[case] closer: &str) {
    let diag = expand(source).unwrap_err();
    assert_eq!(diag.error, ExpandError::unterminated(closer));
    assert_eq!(diag.macro_name, "\\quantity");
    assert_eq!(diag.span, Some(0..4));
}

#[rstest]
#[case::parenthesis("\\eval(f(x", "|")]
#[case::bracket("\\eval[x", "|")]
#[case::brace("\\eval{x^2", "}")]
fn evaluated_unterminated(#[case] source: &str, #[case] closer: &str) {
    let diag = expand(source).unwrap_err();
    assert_eq!(diag.error, ExpandError::unterminated(closer));
    assert_eq!(diag.macro_name, "\\evaluated");
    assert_eq!(diag.span, Some(0..5));
}

#[test]
fn text_inside_delimiters_is_kept_intact() {
    assert_eq!(
        expand("\\qty(\\text{speed})").unwrap(),
        "\\left(\\text{speed}\\right)"
    );
    assert_eq!(
        expand("\\abs{\\text{area}}").unwrap(),
        "\\left|{\\text{area}}\\right|"
    );
    assert_eq!(
        expand("\\mqty[\\text{a}&b]").unwrap(),
        "\\left[\\begin{matrix}\\text{a}&b\\end{matrix}\\right]"
    );
}

#[test]
fn absolute_value_autosizes_unless_starred() {
    assert_eq!(expand("\\abs{x}").unwrap(), "\\left|{x}\\right|");
    assert_eq!(expand("\\abs*{x}").unwrap(), "\\lvert{x}\\rvert");
    assert_eq!(
        expand("\\absolutevalue{x}").unwrap(),
        expand("\\abs{x}").unwrap()
    );
}

#[rstest]
#[case::identity("\\imat{18446744073709551615}")]
#[case::zero("\\zmat{18446744073709551615}{1}")]
#[case::x_matrix("\\xmat{a}{1}{18446744073709551615}")]
fn huge_matrices_are_rejected(#[case] source: &str) {
    let diag = expand(source).unwrap_err();
    assert!(matches!(
        diag.error,
        ExpandError::MatrixTooLarge { limit: 64, .. }
    ));
}

#[test]
fn matrix_size_limit_is_configurable() {
    let config = Loader::new()
        .set_override("notation.max_matrix_size", 2i64)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        expand_with_config("\\imat{3}", &config).unwrap_err().error,
        ExpandError::MatrixTooLarge { found: 3, limit: 2 }
    );
    assert_eq!(
        expand_with_config("\\zmat{2}{2}", &config).unwrap(),
        "\\begin{matrix}0&0\\\\0&0\\end{matrix}"
    );
}

#[test]
fn diagonal_matrix_places_elements_on_the_diagonal() {
    assert_eq!(
        expand("\\dmat{1,2,3}").unwrap(),
        "\\begin{matrix}{1}&{0}&{0}\\\\{0}&{2}&{0}\\\\{0}&{0}&{3}\\end{matrix}"
    );
}

#[rstest]
#[case("\\qty(x)", "\\quantity(x)")]
#[case("\\abs{x}", "\\absolutevalue{x}")]
#[case("\\ip{a}{b}", "\\innerproduct{a}{b}")]
#[case("\\dv{f}{x}", "\\derivative{f}{x}")]
#[case("\\pdv{f}{x}{y}", "\\partialderivative{f}{x}{y}")]
#[case("\\mqty(a&b)", "\\matrixquantity(a&b)")]
#[case("\\tr A", "\\trace A")]
#[case("\\vb{v}", "\\vectorbold{v}")]
#[case("\\qq{if}", "\\qqtext{if}")]
#[case("\\pmat{z}", "\\paulimatrix{z}")]
fn aliases_expand_like_their_target(#[case] alias: &str, #[case] target: &str) {
    assert_eq!(expand(alias).unwrap(), expand(target).unwrap());
}

#[test]
fn overriding_a_long_name_changes_its_aliases() {
    let mut registry = MacroRegistry::with_physics();
    registry.register("\\trace", "\\mathrm{Tr}");
    let expander = Expander::new(&registry);
    assert_eq!(expander.expand("\\tr A").unwrap(), "\\mathrm{Tr}A");
}

#[test]
fn pauli_selector_outside_the_set_is_reported() {
    let diag = expand("\\pmat{4}").unwrap_err();
    assert_eq!(
        diag.to_string(),
        "\\paulimatrix: invalid parameter 4, expecting one of 0, 1, 2, 3, x, y, z at 0..5"
    );
}

#[test]
fn self_referential_alias_is_stopped() {
    let mut registry = MacroRegistry::with_physics();
    registry.alias("\\loop", "\\qty(\\loop)");
    let diag = Expander::new(&registry)
        .with_max_expansions(50)
        .expand("\\loop")
        .unwrap_err();
    assert_eq!(diag.error, ExpandError::ExpansionLimitExceeded { limit: 50 });
}

#[test]
fn configured_settings_reach_the_rules() {
    let config = Loader::new()
        .set_override("notation.matrix_fill", "\\cdot")
        .unwrap()
        .set_override("notation.close_at_end_of_input", true)
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        expand_with_config("\\admat{a,b}", &config).unwrap(),
        "\\begin{matrix}{\\cdot}&{a}\\\\{b}&{\\cdot}\\end{matrix}"
    );
    assert_eq!(
        expand_with_config("\\qty(x", &config).unwrap(),
        "\\left(x\\right)"
    );
}

#[test]
fn snapshots() {
    insta::assert_snapshot!(
        expand("\\pmat{y}").unwrap(),
        @r"\begin{matrix}0 & -i\\ i & 0\end{matrix}"
    );
    insta::assert_snapshot!(
        expand("\\ev{H}{\\psi}").unwrap(),
        @r"\left<{\psi}\middle|{H}\middle|{\psi}\right>"
    );
    insta::assert_snapshot!(
        expand("\\dv[2]{f}{x}").unwrap(),
        @r"\frac{\mathop{}\!\mathrm{d}^{2}{f}}{\mathop{}\!\mathrm{d}{x}^{2}}"
    );
    insta::assert_snapshot!(
        expand("\\eval{x^2}_0^1").unwrap(),
        @r"\left.x^2\rule{0px}{1.2em}\right|_0^1"
    );
}
