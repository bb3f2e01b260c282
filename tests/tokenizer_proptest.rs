//! Property-based tests for the tokenizer and detokenizer

use physmac::token::{detokenize, tokenize};
use proptest::prelude::*;

proptest! {
    #[test]
    fn tokenize_never_panics(input in "\\PC{0,40}") {
        let _tokens = tokenize(&input);
    }

    #[test]
    fn printable_text_without_spaces_round_trips(input in "[!-$&-~]{0,24}") {
        // `%` is excluded: it starts a comment
        let tokens = tokenize(&input);
        prop_assert_eq!(detokenize(&tokens), input);
    }

    #[test]
    fn whitespace_runs_collapse(words in prop::collection::vec("[a-z0-9]{1,4}", 1..6), gap in "[ \t\n]{1,3}") {
        let source = words.join(&gap);
        let tokens = tokenize(&source);
        prop_assert!(tokens.iter().filter(|t| t.is_whitespace()).all(|t| t.text == " "));
        prop_assert_eq!(detokenize(&tokens), words.join(" "));
    }

    #[test]
    fn every_token_has_a_source_span(input in "[!-$&-~ ]{0,24}") {
        for token in tokenize(&input) {
            let span = token.span.clone().unwrap();
            prop_assert!(span.end <= input.len());
            if !token.is_whitespace() {
                prop_assert_eq!(&input[span], token.text.as_str());
            }
        }
    }
}
