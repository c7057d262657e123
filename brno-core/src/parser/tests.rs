use crate::{
    lexer::prelude::Lexer,
    parser::prelude::{parse_module, ParseError, ParseErrorType, Parser}
};

#[test]
fn test_declarations() -> Result<(), ParseError> {
    let input = r#"
        nech a piča
        nech b = 5 piča
        nech c = "text" piča
        nech d = rožni piča
        nech e = null piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    assert_eq!(parsed.module.program.statements.len(), 5);

    Ok(())
}

#[test]
fn test_infixes() -> Result<(), ParseError> {
    let input = r#"
        1 + 2 * 3 piča
        (1 + 2) * 3 piča
        a ?? b || c && d == e < f + g * h ** i piča
        10 % 3 - 4 / 2 piča
        a != b piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_precedence_via_display() -> Result<(), ParseError> {
    // multiplication binds tighter than addition
    let parsed = parse_module("1 + 2 * 3 piča")?;
    let statement = &parsed.module.program.statements[0];

    assert_eq!(format!("{statement}"), "1 + 2 * 3 piča");

    // grouping reorders the tree, Display renders it without parens
    let parsed = parse_module("(1 + 2) * 3 piča")?;
    let statement = &parsed.module.program.statements[0];

    assert_eq!(format!("{statement}"), "1 + 2 * 3 piča");

    Ok(())
}

#[test]
fn test_power_is_right_associative() -> Result<(), ParseError> {
    let parsed = parse_module("2 ** 3 ** 2 piča")?;

    // 2 ** (3 ** 2): the outer tree has 2 on the left
    let rendered = format!("{}", parsed.module.program.statements[0]);
    assert_eq!(rendered, "2 ** 3 ** 2 piča");

    Ok(())
}

#[test]
fn test_prefix() -> Result<(), ParseError> {
    let input = r#"
        !!!zhasni piča
        -x piča
        !a == !!b piča
        - -5 piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_assignment() -> Result<(), ParseError> {
    let input = r#"
        a = 5 piča
        a = b = c piča
        a += 1 piča
        a -= 2 piča
        a *= 3 piča
        a /= 4 piča
        a %= 5 piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    // compound assignment desugars into a plain binary
    let parsed = parse_module("a += 1 piča")?;
    let rendered = format!("{}", parsed.module.program.statements[0]);
    assert_eq!(rendered, "a = a + 1 piča");

    Ok(())
}

#[test]
fn test_invalid_assignment_target() {
    let inputs = ["1 + 2 = 3 piča", "a.b = 3 piča", "f() = 3 piča"];

    for input in inputs {
        let err = parse_module(input).expect_err("expected a parse error");

        assert_eq!(err.error, ParseErrorType::InvalidAssignmentTarget, "{input}");
    }
}

#[test]
fn test_postfix() -> Result<(), ParseError> {
    let input = r#"
        i++ piča
        j-- piča
        a.b piča
        a.b.c piča
        f(1, 2)(3) piča
        a.metoda(x).dalši piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_invalid_postfix_target() {
    let inputs = ["a.b++ piča", "f()-- piča", "5++ piča"];

    for input in inputs {
        let err = parse_module(input).expect_err("expected a parse error");

        assert_eq!(err.error, ParseErrorType::InvalidPostfixTarget, "{input}");
    }
}

#[test]
fn test_blocks() -> Result<(), ParseError> {
    let input = r#"
        {
            nech a = 1 piča
            {
                nech a = 2 piča
            }
        }
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_conditionals() -> Result<(), ParseError> {
    let input = r#"
        esli (a == b) vyblij(a) piča
        esli (a == b) { vyblij(a) piča } inak { vyblij(b) piča }
        esli (a) esli (b) x = 1 piča inak x = 2 piča
        šalina (a > 5) a -= 1 piča
        šalina (rožni) { vypadni piča }
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_for_loops() -> Result<(), ParseError> {
    let input = r#"
        okruh (nech i = 0 piča i < 10 piča i++) { vyblij(i) piča }
        okruh (i = 0 piča i < 10 piča i++) vyblij(i) piča
        okruh (piča piča) { vypadni piča }
        okruh (piča a < 3 piča) { a++ piča }
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_functions() -> Result<(), ParseError> {
    let input = r#"
        rob prázdná() { }
        rob sečti(a, b) { vrat a + b piča }
        nech anonymní = rob (x) { vrat x * 2 piča } piča
        sečti(1, 2) piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_print_sugar_desugars_to_call() -> Result<(), ParseError> {
    let parsed = parse_module(r#"vyblij("ahoj") piča"#)?;

    let rendered = format!("{}", parsed.module.program.statements[0]);
    assert_eq!(rendered, "vyblij(\"ahoj\") piča");

    Ok(())
}

#[test]
fn test_array_literal_desugars_to_call() -> Result<(), ParseError> {
    let parsed = parse_module("nech a = [1, 2, 3] piča")?;

    let rendered = format!("{}", parsed.module.program.statements[0]);
    assert_eq!(rendered, "nech a = __arr(1, 2, 3) piča");

    let parsed = parse_module("nech prázdné = [] piča")?;

    let rendered = format!("{}", parsed.module.program.statements[0]);
    assert_eq!(rendered, "nech prázdné = __arr() piča");

    Ok(())
}

#[test]
fn test_imports() -> Result<(), ParseError> {
    let input = r#"
        vokno "knihovna.brno" piča
        vokno cesta + ".brno" piča
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_try_catch() -> Result<(), ParseError> {
    let input = r#"
        zkus { házej("chyba") piča } chyť (e) { vyblij(e) piča }
        zkus { } chyť () { }
        zkus { } chyť (e) { } potom { vyblij("vždy") piča }
        zkus { } potom { }
    "#;

    let parsed = parse_module(input)?;

    println!("{}", parsed.module.program);

    Ok(())
}

#[test]
fn test_missing_terminator() {
    let err = parse_module("nech a = 5").expect_err("expected a parse error");

    assert_eq!(err.error, ParseErrorType::MissingTerminator);

    let err = parse_module("nech a = 5 nech b = 6 piča").expect_err("expected a parse error");

    assert_eq!(err.error, ParseErrorType::MissingTerminator);
}

#[test]
fn test_lex_error_surfaces_as_parse_error() {
    let err = parse_module("nech a = b & c piča").expect_err("expected a parse error");

    assert!(matches!(err.error, ParseErrorType::LexError { .. }));
}

#[test]
fn test_comments_are_collected() -> Result<(), ParseError> {
    let input = r#"
        // hlavička
        nech a = 1 piča /* uvnitř */ nech b = 2 piča
    "#;

    let parsed = parse_module(input)?;

    assert_eq!(parsed.comments.len(), 2);
    assert_eq!(parsed.module.program.statements.len(), 2);

    Ok(())
}

#[test]
fn test_program() -> Result<(), ParseError> {
    let input = r#"
        rob fib(n) {
            esli (n < 2) { vrat n piča }
            vrat fib(n - 1) + fib(n - 2) piča
        }

        nech výsledky = [] piča

        okruh (nech i = 0 piča i < 10 piča i++) {
            výsledky.přidej(fib(i)) piča
        }

        vyblij(výsledky) piča
    "#;

    let lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));
    let mut parser = Parser::new(lexer);

    let parsed = parser.parse()?;

    println!("{}", parsed.module.program);

    Ok(())
}
