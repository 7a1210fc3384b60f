//! Lexer and parser-base scenarios
//!
//! Exercises the engine through its public API the way a header grammar
//! would drive it:
//! - parameter parsing after a `;`
//! - quoted values and comments keeping their escapes
//! - numbers followed by other text
//! - keyword tables: case handling, isolation, failure recovery

use rvoip_sip_lexer::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("rvoip_sip_lexer=trace")
        .with_test_writer()
        .try_init();
}

const BYE: u32 = KEYWORD_START + 1;
const INVITE: u32 = KEYWORD_START + 2;

#[test]
fn test_tag_parameter_after_semicolon() {
    init_tracing();
    let mut parser = CoreParser::new(";tag=abc123");
    parser.lexer_mut().match_token(TokenType::Char(b';')).unwrap();

    let nv = parser.name_value(b'=').unwrap();
    assert_eq!(nv, NameValue::new("tag", Some("abc123")));
    assert!(!nv.is_value_quoted());
    assert_eq!(nv.to_string(), "tag=abc123");
    assert!(!parser.lexer().has_more());
}

#[test]
fn test_quoted_realm() {
    let mut parser = CoreParser::new("realm=\"example.com\"");
    let nv = parser.name_value(b'=').unwrap();
    assert_eq!(nv, NameValue::new("realm", Some("example.com")).quoted());
    assert_eq!(nv.to_string(), "realm=\"example.com\"");
}

#[test]
fn test_comment_keeps_escape() {
    let mut lexer = Lexer::new(CHAR_LEXER, "(hello \\) world) rest");
    let comment = lexer.comment().unwrap();
    assert_eq!(comment, "hello \\) world");
    assert_eq!(lexer.rest(), " rest");
}

#[test]
fn test_number_then_text() {
    let mut lexer = Lexer::new(CHAR_LEXER, "5061abc");
    assert_eq!(lexer.number().unwrap(), 5061);
    assert_eq!(lexer.rest(), "abc");
    assert_eq!(lexer.match_token(TokenType::Id).unwrap().value(), "abc");
}

#[test]
fn test_keyword_preserves_input_casing() {
    for input in ["bye", "Bye", "BYE"] {
        let mut lexer = Lexer::new("method_keywordLexer", input);
        lexer.add_keyword("BYE", BYE);
        let tok = lexer.match_token(TokenType::keyword(BYE)).unwrap();
        assert_eq!(tok.value(), input);
        assert_eq!(tok.token_type(), TokenType::Keyword(BYE));
        assert_eq!(lexer.current_match(), Some(&tok));
    }
}

#[test]
fn test_table_isolation() {
    let mut lexer = Lexer::new("A", "INVITE");
    lexer.add_keyword("INVITE", INVITE);

    lexer.select_table("B");
    assert!(lexer.match_token(TokenType::keyword(INVITE)).is_err());
    assert_eq!(lexer.position(), 0);
    // Without the keyword the text is just an identifier
    assert_eq!(lexer.peek_token().unwrap().token_type(), TokenType::Id);

    lexer.select_table("A");
    assert!(lexer.match_token(TokenType::keyword(INVITE)).is_ok());
}

#[test]
fn test_failed_keyword_rewinds_by_default() {
    let mut lexer = Lexer::new("method_keywordLexer", "INVITE sip:bob@biloxi.com");
    lexer.add_keyword("BYE", BYE);
    lexer.add_keyword("INVITE", INVITE);

    let err = lexer.match_token(TokenType::keyword(BYE)).unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedToken {
            expected: "BYE".to_string(),
            found: "INVITE".to_string(),
            position: 0,
        }
    );
    assert_eq!(err.position(), Some(0));
    assert_eq!(lexer.position(), 0);
    assert_eq!(lexer.match_token(TokenType::keyword(INVITE)).unwrap().value(), "INVITE");
}

#[test]
fn test_failed_keyword_legacy_consumption() {
    let config = ParserConfig::new()
        .with_legacy_keyword_consumption()
        .with_initial_table("method_keywordLexer");
    let mut lexer = Lexer::with_config("INVITE sip:bob@biloxi.com", &config);
    lexer.add_keyword("BYE", BYE);

    let mark = lexer.mark();
    assert!(lexer.match_token(TokenType::keyword(BYE)).is_err());
    assert_eq!(lexer.position(), 6);
    lexer.rewind(mark);
    assert_eq!(lexer.next_id(), "INVITE");
}

#[test]
fn test_peek_then_consume_saved() {
    let mut lexer = Lexer::new(CHAR_LEXER, "branch=z9hG4bK776asdhds");
    let tokens = lexer.peek_tokens(2);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value(), "branch");
    assert_eq!(tokens[1].token_type(), TokenType::Char(b'='));
    assert_eq!(lexer.position(), 0);

    lexer.cursor_mut().consume_saved();
    assert_eq!(lexer.rest(), "z9hG4bK776asdhds");
}

#[test]
fn test_end_of_input() {
    let mut lexer = Lexer::new(CHAR_LEXER, "");
    let err = lexer.peek_token().unwrap_err();
    assert!(err.is_end_of_input());
    assert!(lexer.match_token(TokenType::Digit).unwrap_err().is_end_of_input());
    assert!(lexer.lookahead(0).is_err());
    assert!(lexer.peek_tokens(3).is_empty());
}

#[test]
fn test_rule_tracing_enabled() {
    init_tracing();
    let config = ParserConfig::new().with_rule_tracing();
    let mut parser = CoreParser::with_config("transport=tcp; lr", &config);
    parser.peek_line("nameValueList");
    let list = parser.name_value_list(b'=', b';').unwrap();
    assert_eq!(list.to_string(), "transport=tcp;lr");
    assert_eq!(parser.nesting_level(), 0);
}
