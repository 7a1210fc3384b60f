use proptest::prelude::*;
use rvoip_sip_lexer::prelude::*;

const KEYWORD: u32 = KEYWORD_START + 7;

fn token_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._~+-]{0,8}"
}

fn quoted_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ;,=]{1,4}",
        Just("\\\"".to_string()),
        Just("\\\\".to_string()),
    ]
}

fn flip_case(text: &str, flips: &[bool]) -> String {
    text.chars()
        .zip(flips.iter().chain(std::iter::repeat(&false)))
        .map(|(c, &flip)| {
            if flip && c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else if flip {
                c.to_ascii_uppercase()
            } else {
                c
            }
        })
        .collect()
}

proptest! {
    /// A list of unquoted parameters parses back to itself under its own separator
    #[test]
    fn parameter_list_roundtrip(
        entries in prop::collection::vec((token_text(), proptest::option::of(token_text())), 1..6),
        separator in prop::sample::select(vec![b';', b',']),
    ) {
        let mut list = NameValueList::with_separator((separator as char).to_string());
        for (name, value) in &entries {
            list.add_name_and_value(name.clone(), value.clone());
        }

        let rendered = list.to_string();
        let mut parser = CoreParser::new(rendered.clone());
        let parsed = parser.name_value_list(b'=', separator);
        prop_assert_eq!(parsed, Ok(list), "input: {}", rendered);
        prop_assert!(!parser.lexer().has_more());
    }

    /// Quoted values come back with their escape sequences untouched
    #[test]
    fn quoted_value_keeps_escapes(
        name in token_text(),
        fragments in prop::collection::vec(quoted_fragment(), 0..6),
        escape in prop::sample::select(vec!["\\\"", "\\\\"]),
    ) {
        let mut value = fragments.concat();
        value.push_str(escape);

        let nv = NameValue::new(name.clone(), Some(value.clone())).quoted();
        let mut lexer = Lexer::new(CHAR_LEXER, nv.to_string());
        prop_assert_eq!(lexer.scan_identifier(), name);
        lexer.match_token(TokenType::Char(b'=')).unwrap();
        prop_assert_eq!(lexer.quoted_string(), Ok(value));
        prop_assert!(!lexer.has_more());
    }

    /// Reads between a mark and its rewind leave no trace
    #[test]
    fn rewind_restores_behavior(
        input in "[ -~]{0,24}",
        skip in 0usize..4,
        reads in prop::collection::vec(0u8..5, 0..8),
    ) {
        let mut lexer = Lexer::new(CHAR_LEXER, input.clone());
        lexer.consume(skip);
        let mut fresh = lexer.clone();

        let mark = lexer.mark();
        for read in reads {
            match read {
                0 => { let _ = lexer.next_byte(); }
                1 => { lexer.scan_identifier(); }
                2 => { let _ = lexer.quoted_string(); }
                3 => { let _ = lexer.number(); }
                _ => lexer.skip_space_or_tab(),
            }
        }
        lexer.rewind(mark);

        prop_assert_eq!(lexer.position(), fresh.position());
        prop_assert_eq!(lexer.lookahead(0), fresh.lookahead(0));
        prop_assert_eq!(lexer.peek_tokens(3), fresh.peek_tokens(3));
        prop_assert_eq!(lexer.match_token(TokenType::Id), fresh.match_token(TokenType::Id));
        prop_assert_eq!(lexer.rest(), fresh.rest());
    }

    /// Failed single-byte matches never move the cursor
    #[test]
    fn failed_byte_match_does_not_consume(
        input in "[ -~]{0,8}",
        expected in prop_oneof![
            any::<u8>().prop_map(TokenType::Char),
            Just(TokenType::Alpha),
            Just(TokenType::Digit),
        ],
    ) {
        let mut lexer = Lexer::new(CHAR_LEXER, input);
        let before = lexer.position();
        match lexer.match_token(expected) {
            Ok(tok) => {
                prop_assert_eq!(lexer.position(), before + 1);
                prop_assert_eq!(tok.token_type(), expected);
            }
            Err(_) => prop_assert_eq!(lexer.position(), before),
        }
    }

    /// Keywords match in any case and keep the input spelling
    #[test]
    fn keyword_match_ignores_case(
        keyword in "[a-zA-Z][a-zA-Z-]{0,10}",
        flips in prop::collection::vec(any::<bool>(), 0..12),
    ) {
        let input = flip_case(&keyword, &flips);
        let mut lexer = Lexer::new("method_keywordLexer", input.clone());
        lexer.add_keyword(&keyword, KEYWORD);

        let tok = lexer.match_token(TokenType::keyword(KEYWORD));
        prop_assert_eq!(tok, Ok(Token::new(input, TokenType::Keyword(KEYWORD))));
    }

    /// A keyword is only visible while its table is selected
    #[test]
    fn keyword_tables_are_isolated(keyword in "[a-zA-Z]{1,10}") {
        let mut lexer = Lexer::new("A", keyword.clone());
        lexer.add_keyword(&keyword, KEYWORD);

        lexer.select_table("B");
        prop_assert!(lexer.match_token(TokenType::keyword(KEYWORD)).is_err());
        prop_assert_eq!(lexer.position(), 0);
        prop_assert_eq!(lexer.peek_token().map(|t| t.token_type()), Ok(TokenType::Id));

        lexer.select_table("A");
        prop_assert!(lexer.match_token(TokenType::keyword(KEYWORD)).is_ok());
    }
}
