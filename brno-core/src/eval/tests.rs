use std::collections::HashMap;
use std::rc::Rc;

use crate::{
    environment::prelude::Value,
    parser::prelude::parse_module,
    utils::prelude::VectorOutputEmitterIO
};

use super::prelude::{
    Capabilities, Config, Interpreter, ModuleLoader, RuntimeError, RuntimeErrorType
};

struct MapLoader {
    modules: HashMap<String, String>,
}

impl MapLoader {
    fn new(modules: &[(&str, &str)]) -> Box<Self> {
        Box::new(Self {
            modules: modules.iter()
                .map(|(path, src)| (path.to_string(), src.to_string()))
                .collect()
        })
    }
}

impl ModuleLoader for MapLoader {
    fn load(&self, path: &str) -> Result<String, String> {
        self.modules.get(path)
            .cloned()
            .ok_or_else(|| format!("modul '{path}' nenalezen"))
    }
}

fn eval_config(src: &str, config: Config) -> Result<Vec<String>, RuntimeError> {
    let output = VectorOutputEmitterIO::new();

    let mut interpreter = Interpreter::new(Config {
        output: Rc::new(output.clone()),
        ..config
    });

    let parsed = parse_module(src).expect("source should parse");

    interpreter.run(&parsed.module.program)?;

    Ok(output.take())
}

fn eval_lines(src: &str) -> Result<Vec<String>, RuntimeError> {
    eval_config(src, Config::default())
}

#[test]
fn test_arithmetic_and_precedence() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(1 + 2 * 3) piča
        vyblij((1 + 2) * 3) piča
        vyblij(2 ** 3 ** 2) piča
        vyblij(7 % 3) piča
        vyblij(1 / 0) piča
        vyblij(0 / 0) piča
    "#)?;

    assert_eq!(lines, vec!["7", "9", "512", "1", "Infinity", "NaN"]);

    Ok(())
}

#[test]
fn test_string_concatenation() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij("a" + 1) piča
        vyblij(1 + "a") piča
        vyblij("2" + "3") piča
        vyblij("2" - "3") piča
        vyblij("10" * 2) piča
    "#)?;

    // `+` concatenates when either side is a string, the rest of the
    // arithmetic operators always coerce to numbers
    assert_eq!(lines, vec!["a1", "1a", "23", "-1", "20"]);

    Ok(())
}

#[test]
fn test_reassignment_accumulates() -> Result<(), RuntimeError> {
    let lines = eval_lines("nech x = 1 piča x = x + 2 piča vyblij(x) piča")?;

    assert_eq!(lines, vec!["3"]);

    Ok(())
}

#[test]
fn test_counting_loop() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech součet = 0 piča

        okruh (nech i = 1 piča i <= 10 piča i++) {
            součet += i piča
        }

        vyblij(součet) piča
    "#)?;

    assert_eq!(lines, vec!["55"]);

    Ok(())
}

#[test]
fn test_recursion() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob fib(n) {
            esli (n < 2) { vrat n piča }
            vrat fib(n - 1) + fib(n - 2) piča
        }

        vyblij(fib(10)) piča
    "#)?;

    assert_eq!(lines, vec!["55"]);

    Ok(())
}

#[test]
fn test_call_result_feeds_print() -> Result<(), RuntimeError> {
    let lines = eval_lines("rob f(a, b) { vrat a + b piča } vyblij(f(2, 3)) piča")?;

    assert_eq!(lines, vec!["5"]);

    Ok(())
}

#[test]
fn test_closures_capture_their_scope() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob počítadlo() {
            nech stav = 0 piča
            vrat rob () { stav += 1 piča vrat stav piča } piča
        }

        nech a = počítadlo() piča
        nech b = počítadlo() piča

        vyblij(a()) piča
        vyblij(a()) piča
        vyblij(b()) piča
    "#)?;

    // each factory call gets its own captured `stav`
    assert_eq!(lines, vec!["1", "2", "1"]);

    Ok(())
}

#[test]
fn test_block_scoping_and_shadowing() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech a = 1 piča
        {
            nech a = 2 piča
            vyblij(a) piča
            a = 3 piča
        }
        vyblij(a) piča

        {
            a = 4 piča
        }
        vyblij(a) piča
    "#)?;

    assert_eq!(lines, vec!["2", "1", "4"]);

    Ok(())
}

#[test]
fn test_break_and_continue_bind_innermost_loop() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        okruh (nech i = 0 piča i < 3 piča i++) {
            okruh (nech j = 0 piča j < 5 piča j++) {
                esli (j == 1) { přeskoč piča }
                esli (j == 3) { vypadni piča }
                vyblij(i + "," + j) piča
            }
        }
    "#)?;

    assert_eq!(lines, vec!["0,0", "0,2", "1,0", "1,2", "2,0", "2,2"]);

    Ok(())
}

#[test]
fn test_continue_still_runs_the_step() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        okruh (nech i = 0 piča i < 6 piča i++) {
            esli (i % 2 == 1) { přeskoč piča }
            vyblij(i) piča
        }
    "#)?;

    assert_eq!(lines, vec!["0", "2", "4"]);

    Ok(())
}

#[test]
fn test_while_loop() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech n = 3 piča
        šalina (n > 0) {
            vyblij(n) piča
            n -= 1 piča
        }
    "#)?;

    assert_eq!(lines, vec!["3", "2", "1"]);

    Ok(())
}

#[test]
fn test_return_escapes_loops() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob najdi(limit) {
            okruh (nech i = 0 piča piča i++) {
                esli (i ** 2 > limit) { vrat i piča }
            }
        }

        vyblij(najdi(50)) piča
    "#)?;

    assert_eq!(lines, vec!["8"]);

    Ok(())
}

#[test]
fn test_try_catch_binds_thrown_value() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        zkus {
            házej("bacha") piča
            vyblij("nedosažitelné") piča
        } chyť (e) {
            vyblij("chyceno: " + e) piča
        }
    "#)?;

    assert_eq!(lines, vec!["chyceno: bacha"]);

    Ok(())
}

#[test]
fn test_caught_throw_does_not_propagate() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"zkus { házej("e") piča } chyť (e) { vyblij(e) piča }"#)?;

    assert_eq!(lines, vec!["e"]);

    Ok(())
}

#[test]
fn test_engine_errors_are_catchable() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        zkus {
            vyblij(neexistuje) piča
        } chyť (e) {
            vyblij(e) piča
        }
    "#)?;

    assert_eq!(lines, vec!["Neznámá proměnná 'neexistuje'"]);

    Ok(())
}

#[test]
fn test_finally_always_runs() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        zkus {
            vyblij("tělo") piča
        } potom {
            vyblij("úklid") piča
        }

        zkus {
            házej("x") piča
        } chyť () {
            vyblij("chyceno") piča
        } potom {
            vyblij("úklid 2") piča
        }
    "#)?;

    assert_eq!(lines, vec!["tělo", "úklid", "chyceno", "úklid 2"]);

    Ok(())
}

#[test]
fn test_finally_does_not_swallow_return() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob f() {
            zkus {
                vrat 1 piča
            } potom {
                vyblij("úklid") piča
            }
        }

        vyblij(f()) piča
    "#)?;

    assert_eq!(lines, vec!["úklid", "1"]);

    Ok(())
}

#[test]
fn test_uncaught_throw() {
    let err = eval_lines(r#"házej(42) piča"#).expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::Thrown { value: Value::Number(42.0) });
}

#[test]
fn test_rethrow_without_handler() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        zkus {
            zkus {
                házej("hluboko") piča
            } potom {
                vyblij("vnitřní úklid") piča
            }
        } chyť (e) {
            vyblij("venku: " + e) piča
        }
    "#)?;

    assert_eq!(lines, vec!["vnitřní úklid", "venku: hluboko"]);

    Ok(())
}

#[test]
fn test_import_merges_into_global_scope() -> Result<(), RuntimeError> {
    let loader = MapLoader::new(&[(
        "knihovna.brno",
        r#"
            nech konstanta = 42 piča
            rob dvojnásobek(x) { vrat x * 2 piča }
        "#
    )]);

    let lines = eval_config(
        r#"
            vokno "knihovna.brno" piča
            vyblij(dvojnásobek(konstanta)) piča
        "#,
        Config {
            loader: Some(loader),
            ..Config::default()
        }
    )?;

    assert_eq!(lines, vec!["84"]);

    Ok(())
}

#[test]
fn test_reimport_runs_the_module_again() -> Result<(), RuntimeError> {
    // no caching: every `vokno` executes the module from scratch
    let loader = MapLoader::new(&[("m.brno", r#"vyblij("běžím") piča"#)]);

    let lines = eval_config(
        r#"
            vokno "m.brno" piča
            vokno "m.brno" piča
        "#,
        Config {
            loader: Some(loader),
            ..Config::default()
        }
    )?;

    assert_eq!(lines, vec!["běžím", "běžím"]);

    Ok(())
}

#[test]
fn test_import_without_loader_fails() {
    let err = eval_lines(r#"vokno "m.brno" piča"#).expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::ImportUnavailable);
}

#[test]
fn test_import_path_must_be_string() {
    let loader = MapLoader::new(&[]);

    let err = eval_config(
        "vokno 42 piča",
        Config {
            loader: Some(loader),
            ..Config::default()
        }
    ).expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::ImportPathNotString);
}

#[test]
fn test_import_parse_failure_surfaces_at_the_import() {
    let loader = MapLoader::new(&[("vadný.brno", "nech a =")]);

    let err = eval_config(
        r#"vokno "vadný.brno" piča"#,
        Config {
            loader: Some(loader),
            ..Config::default()
        }
    ).expect_err("expected a runtime error");

    assert!(matches!(err.error, RuntimeErrorType::ImportFailed { .. }));
}

#[test]
fn test_arity_is_enforced() {
    let err = eval_lines(r#"
        rob f(a, b) { vrat a + b piča }
        f(1) piča
    "#).expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::ArityMismatch { expected: 2, got: 1 });
}

#[test]
fn test_extra_argument_is_an_arity_error() {
    let err = eval_lines("rob f(a) { vrat a piča } f(1, 2) piča")
        .expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::ArityMismatch { expected: 1, got: 2 });
}

#[test]
fn test_calling_a_non_function_fails() {
    let err = eval_lines(r#"
        nech x = 5 piča
        x() piča
    "#).expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::NotCallable);
}

#[test]
fn test_short_circuit_operators() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(null ?? "záloha") piča
        vyblij(0 ?? "záloha") piča
        vyblij(0 || "záloha") piča
        vyblij("první" || "druhý") piča
        vyblij(rožni && "druhý") piča
        vyblij(zhasni && "druhý") piča

        nech volané = 0 piča
        rob stopa() { volané += 1 piča vrat rožni piča }
        zhasni && stopa() piča
        "x" || stopa() piča
        vyblij(volané) piča
    "#)?;

    // `??` only falls through on null, `||` on any falsy value; the
    // right side is never evaluated when the left decides
    assert_eq!(lines, vec!["záloha", "0", "záloha", "první", "druhý", "false", "0"]);

    Ok(())
}

#[test]
fn test_postfix_yields_the_raw_previous_value() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech a = "5" piča
        vyblij(a++) piča
        vyblij(a) piča
        vyblij(typ(a)) piča

        nech b = 3 piča
        vyblij(b--) piča
        vyblij(b) piča
    "#)?;

    // the expression sees the old value uncoerced, the variable holds
    // the coerced stepped number afterwards
    assert_eq!(lines, vec!["5", "6", "číslo", "3", "2"]);

    Ok(())
}

#[test]
fn test_equality_semantics() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(1 == 1) piča
        vyblij("a" == "a") piča
        vyblij(1 == "1") piča
        vyblij(null == null) piča

        nech a = [1, 2] piča
        nech b = a piča
        nech c = [1, 2] piča
        vyblij(a == b) piča
        vyblij(a == c) piča
    "#)?;

    // primitives compare by value without coercion, composites by
    // identity
    assert_eq!(lines, vec!["true", "true", "false", "true", "true", "false"]);

    Ok(())
}

#[test]
fn test_member_access() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech m = __obj("jméno", "brno", "věk", 700) piča
        vyblij(m.jméno) piča
        vyblij(m.chybí) piča
        vyblij(5 .cokoliv) piča
    "#)?;

    assert_eq!(lines, vec!["brno", "null", "null"]);

    Ok(())
}

#[test]
fn test_reading_an_undeclared_variable_fails() {
    let err = eval_lines("vyblij(neznámá) piča").expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::UnknownVariable { name: "neznámá".into() });
}

#[test]
fn test_assignment_never_creates_a_binding() {
    let err = eval_lines("neznámá = 1 piča").expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::UnknownVariable { name: "neznámá".into() });
}

#[test]
fn test_undeclared_read_fails_before_any_output() {
    let output = VectorOutputEmitterIO::new();

    let mut interpreter = Interpreter::new(Config {
        output: Rc::new(output.clone()),
        ..Config::default()
    });

    let parsed = parse_module(r#"
        vyblij(neznámá) piča
        vyblij("potom") piča
    "#).expect("source should parse");

    let err = interpreter
        .run(&parsed.module.program)
        .expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::UnknownVariable { name: "neznámá".into() });
    assert!(output.take().is_empty());
}

#[test]
fn test_member_access_on_null_fails() {
    let err = eval_lines("null.x piča").expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::NullMember { name: "x".into() });
}

#[test]
fn test_truthiness() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        esli ("") { vyblij("ano") piča } inak { vyblij("ne") piča }
        esli (0) { vyblij("ano") piča } inak { vyblij("ne") piča }
        esli (null) { vyblij("ano") piča } inak { vyblij("ne") piča }
        esli ([]) { vyblij("ano") piča } inak { vyblij("ne") piča }
        esli ("0") { vyblij("ano") piča } inak { vyblij("ne") piča }
    "#)?;

    assert_eq!(lines, vec!["ne", "ne", "ne", "ano", "ano"]);

    Ok(())
}

#[test]
fn test_stray_break_at_top_level_fails() {
    let err = eval_lines("vypadni piča").expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::StrayBreak);
}

#[test]
fn test_top_level_return_stops_the_program() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij("před") piča
        vrat piča
        vyblij("po") piča
    "#)?;

    assert_eq!(lines, vec!["před"]);

    Ok(())
}

#[test]
fn test_print_aliases() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        řekni("a") piča
        pisni("b") piča
    "#)?;

    assert_eq!(lines, vec!["a", "b"]);

    Ok(())
}

#[test]
fn test_typ_builtin() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(typ(null)) piča
        vyblij(typ(1)) piča
        vyblij(typ("a")) piča
        vyblij(typ(rožni)) piča
        vyblij(typ(zhasni)) piča
        vyblij(typ([])) piča
        vyblij(typ(__obj())) piča
        vyblij(typ(typ)) piča
    "#)?;

    assert_eq!(lines, vec![
        "null", "číslo", "řetězec", "pravda", "nepravda", "pole", "mapa", "funkce"
    ]);

    Ok(())
}

#[test]
fn test_text_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(text.velký("ahoj")) piča
        vyblij(text.malý("AHOJ")) piča
        vyblij(text.díl("šalina", 0, 3)) piča
        vyblij(text.nahrad("a-b-c", "-", "+")) piča
        vyblij(text.trim("  x  ")) piča
        vyblij(text.obsahuje("šalina", "lin")) piča
        vyblij(text.spojuj(text.řež("a,b,c", ","), "|")) piča
    "#)?;

    assert_eq!(lines, vec!["AHOJ", "ahoj", "šal", "a+b+c", "x", "true", "a|b|c"]);

    Ok(())
}

#[test]
fn test_array_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech a = [3, 1, 2] piča
        vyblij(šalát.dl(a)) piča
        vyblij(šalát.hoď(a, 4)) piča
        vyblij(šalát.sekni(a)) piča
        vyblij(a) piča

        vyblij(šalát.mapuj([1, 2, 3], rob (x) { vrat x * 10 piča })) piča
        vyblij(šalát.filtruj([1, 2, 3, 4], rob (x) { vrat x % 2 == 0 piča })) piča
        vyblij(šalát.spočítej([1, 2, 3], rob (acc, x) { vrat acc + x piča }, 0)) piča
        vyblij(šalát.placka([[1, 2], [3], 4])) piča
        vyblij(šalát.seřaď([3, 1, 2], rob (x, y) { vrat x - y piča })) piča
        vyblij(šalát.je([])) piča
        vyblij(šalát.vem([10, 20], 1)) piča
        vyblij(šalát.vem([10, 20], 5)) piča
    "#)?;

    assert_eq!(lines, vec![
        "3", "4", "4", "[3, 1, 2]",
        "[10, 20, 30]", "[2, 4]", "6", "[1, 2, 3, 4]", "[1, 2, 3]",
        "true", "20", "null"
    ]);

    Ok(())
}

#[test]
fn test_callbacks_may_take_fewer_parameters() -> Result<(), RuntimeError> {
    // stdlib callbacks get (item, index, collection) but a shorter
    // parameter list is fine
    let lines = eval_lines(r#"
        vyblij(šalát.mapuj([5, 6], rob (x, i) { vrat x + i piča })) piča
    "#)?;

    assert_eq!(lines, vec!["[5, 7]"]);

    Ok(())
}

#[test]
fn test_map_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech m = mapa.vytvor() piča
        mapa.dej(m, "b", 2) piča
        mapa.dej(m, "a", 1) piča
        vyblij(mapa.vem(m, "a")) piča
        vyblij(mapa.vem(m, "chybí")) piča
        vyblij(mapa.keys(m)) piča
        vyblij(mapa.values(m)) piča
        vyblij(mapa.páry(m)) piča
        vyblij(mapa.spojit(m, __obj("c", 3))) piča
    "#)?;

    assert_eq!(lines, vec![
        "1", "null",
        "[a, b]", "[1, 2]", "[[a, 1], [b, 2]]",
        "{a: 1, b: 2, c: 3}"
    ]);

    Ok(())
}

#[test]
fn test_map_set_rejects_a_null_receiver() {
    let err = eval_lines(r#"mapa.dej(null, "k", 1) piča"#)
        .expect_err("expected a runtime error");

    assert!(matches!(err.error, RuntimeErrorType::InvalidArgument { .. }));
}

#[test]
fn test_math_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(matyš.abs(-3)) piča
        vyblij(matyš.kolo(2.5)) piča
        vyblij(matyš.kolo(-2.5)) piča
        vyblij(matyš.pod(2.9)) piča
        vyblij(matyš.nad(2.1)) piča
        vyblij(matyš.moc(2, 10)) piča
        vyblij(matyš.kořen(81)) piča
        vyblij(matyš.min(3, 1, 2)) piča
        vyblij(matyš.max(3, 1, 2)) piča
        vyblij(matyš.min()) piča
    "#)?;

    // rounding halves goes towards positive infinity
    assert_eq!(lines, vec![
        "3", "3", "-2", "2", "3", "1024", "9", "1", "3", "Infinity"
    ]);

    Ok(())
}

#[test]
fn test_random_between_stays_in_range() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        okruh (nech i = 0 piča i < 20 piča i++) {
            nech n = matyš.náhodaMezi(1, 3) piča
            esli (n < 1 || n > 3 || n != matyš.pod(n)) {
                vyblij("mimo rozsah") piča
            }
        }
        vyblij("hotovo") piča
    "#)?;

    assert_eq!(lines, vec!["hotovo"]);

    Ok(())
}

#[test]
fn test_regex_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(regl.najdi("rok 1869 a 2024", "[0-9]+")) piča
        vyblij(regl.najdi("žádná čísla", "[0-9]+")) piča
        vyblij(regl.všeci("rok 1869 a 2024", "[0-9]+")) piča
        vyblij(regl.nahrad("a1b2c3", "[0-9]", "-")) piča
    "#)?;

    assert_eq!(lines, vec!["1869", "null", "[1869, 2024]", "a-b-c-"]);

    Ok(())
}

#[test]
fn test_invalid_regex_is_catchable() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        zkus {
            regl.najdi("x", "[") piča
        } chyť (e) {
            vyblij(text.obsahuje(e, "Neplatný regulární výraz")) piča
        }
    "#)?;

    assert_eq!(lines, vec!["true"]);

    Ok(())
}

#[test]
fn test_crypto_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(krypto.base64("ahoj")) piča
        vyblij(krypto.zbase64(krypto.base64("šalina"))) piča
        vyblij(krypto.sha256("abc")) piča
    "#)?;

    assert_eq!(lines, vec![
        "YWhvag==",
        "šalina",
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    ]);

    Ok(())
}

#[test]
fn test_uuid_shape() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        nech id = krypto.uuid() piča
        vyblij(šalát.dl(id)) piča
        vyblij(šalát.dl(text.řež(id, "-"))) piča
        vyblij(id == krypto.uuid()) piča
    "#)?;

    assert_eq!(lines, vec!["36", "5", "false"]);

    Ok(())
}

#[test]
fn test_introspection_namespace() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        vyblij(šmirgl.typy(__obj("a", 1, "b", "x", "c", []))) piča
    "#)?;

    assert_eq!(lines, vec!["{a: číslo, b: řetězec, c: pole}"]);

    Ok(())
}

#[test]
fn test_fs_capability_is_denied_by_default() {
    let err = eval_lines(r#"šufle.čti("soubor.txt") piča"#)
        .expect_err("expected a runtime error");

    assert_eq!(err.error, RuntimeErrorType::CapabilityDenied { capability: "fs" });
}

#[test]
fn test_fs_capability_can_be_granted() -> Result<(), RuntimeError> {
    let dir = std::env::temp_dir().join("brno-fs-test");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("zpráva.txt");
    let path = path.to_string_lossy().into_owned();

    let lines = eval_config(
        &format!(
            r#"
                šufle.piš("{path}", "ahoj") piča
                vyblij(šufle.je("{path}")) piča
                vyblij(šufle.čti("{path}")) piča
            "#
        ),
        Config {
            capabilities: Capabilities { fs_enabled: true },
            ..Config::default()
        }
    )?;

    assert_eq!(lines, vec!["true", "true", "ahoj"]);

    Ok(())
}

#[test]
fn test_functions_print_their_name() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob pozdrav() { }
        vyblij(pozdrav) piča
        vyblij(vyblij) piča
        vyblij(matyš.abs) piča
    "#)?;

    assert_eq!(lines, vec!["<rob pozdrav>", "<builtin vyblij>", "<matyš.abs>"]);

    Ok(())
}

#[test]
fn test_functions_without_return_yield_null() -> Result<(), RuntimeError> {
    let lines = eval_lines(r#"
        rob nic() { nech a = 1 piča }
        vyblij(nic()) piča
    "#)?;

    assert_eq!(lines, vec!["null"]);

    Ok(())
}
