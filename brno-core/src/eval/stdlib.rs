use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Instant, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{Datelike, Local, TimeZone, Timelike};
use sha2::{Digest, Sha256};

use crate::environment::prelude::{Builtin, NativeFn, Value};
use crate::utils::prelude::SrcSpan;

use super::error::{RuntimeError, RuntimeErrorType};
use super::interpreter::Interpreter;

/// Standard library namespaces. Each is a plain object of builtins,
/// looked up through ordinary member access (`matyš.abs`).
pub fn install(interpreter: &mut Interpreter) {
    let global = interpreter.envs.global();

    let namespaces = [
        ("text", text_namespace()),
        ("šalát", array_namespace()),
        ("mapa", map_namespace()),
        ("matyš", math_namespace()),
        ("čas", time_namespace()),
        ("regl", regex_namespace()),
        ("krypto", crypto_namespace()),
        ("šichta", process_namespace()),
        ("šufle", fs_namespace()),
        ("šmirgl", introspection_namespace()),
    ];

    for (name, value) in namespaces {
        interpreter.envs.define(global, name.into(), value);
    }
}

fn namespace(ns: &str, entries: &[(&str, Option<usize>, NativeFn)]) -> Value {
    let mut map = HashMap::new();

    for (key, arity, func) in entries {
        let value = Value::Builtin(Rc::new(Builtin {
            name: format!("{ns}.{key}"),
            arity: *arity,
            func: *func,
        }));

        map.insert(key.to_string(), value);
    }

    Value::object(map)
}

/// String coercion matching `+` concatenation.
fn stringify(value: Option<Value>) -> String {
    format!("{}", value.unwrap_or(Value::Null))
}

fn callback_error(error: RuntimeError) -> RuntimeErrorType {
    error.error
}

/* text.* */

fn text_namespace() -> Value {
    namespace("text", &[
        ("díl", Some(3), text_slice),
        ("nahrad", Some(3), text_replace),
        ("malý", Some(1), text_lower),
        ("velký", Some(1), text_upper),
        ("řež", Some(2), text_split),
        ("spojuj", Some(2), text_join),
        ("trim", Some(1), text_trim),
        ("obsahuje", Some(2), text_contains),
        ("zacina", Some(2), text_starts),
        ("končí", Some(2), text_ends),
        ("formátujDatum", Some(2), time_format),
    ])
}

fn text_slice(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let from = args.next().unwrap_or(Value::Null).as_number();
    let count = args.next().unwrap_or(Value::Null).as_number();

    let chars: Vec<char> = text.chars().collect();

    let mut start = from.max(0.0) as usize;
    let mut end = (from + count).max(0.0) as usize;

    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let start = start.min(chars.len());
    let end = end.min(chars.len());

    Ok(Value::String(chars[start..end].iter().collect()))
}

fn text_replace(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let from = stringify(args.next());
    let to = stringify(args.next());

    if from.is_empty() {
        return Ok(Value::String(text));
    }

    Ok(Value::String(text.replace(&from, &to)))
}

fn text_lower(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::String(stringify(args.into_iter().next()).to_lowercase()))
}

fn text_upper(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::String(stringify(args.into_iter().next()).to_uppercase()))
}

fn text_split(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let delimiter = stringify(args.next());

    let parts: Vec<Value> = match delimiter.is_empty() {
        // an empty delimiter splits into single characters
        true => text.chars().map(|c| Value::String(c.to_string())).collect(),
        false => text.split(&delimiter).map(Value::string).collect(),
    };

    Ok(Value::array(parts))
}

fn text_join(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let separator = stringify(args.next());

    match array {
        Value::Array(values) => {
            let rendered = values.borrow().iter()
                .map(|value| format!("{value}"))
                .collect::<Vec<String>>();

            Ok(Value::String(rendered.join(&separator)))
        },
        _ => Ok(Value::Null),
    }
}

fn text_trim(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::string(stringify(args.into_iter().next()).trim()))
}

fn text_contains(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());

    Ok(Value::Bool(text.contains(&pattern)))
}

fn text_starts(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());

    Ok(Value::Bool(text.starts_with(&pattern)))
}

fn text_ends(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());

    Ok(Value::Bool(text.ends_with(&pattern)))
}

/* šalát.* */

fn array_namespace() -> Value {
    namespace("šalát", &[
        ("je", Some(1), array_is),
        ("vem", Some(2), array_get),
        ("hoď", Some(2), array_push),
        ("sekni", Some(1), array_pop),
        ("otoč", Some(1), array_reverse),
        ("seřaď", None, array_sort),
        ("mapuj", Some(2), array_map),
        ("filtruj", Some(2), array_filter),
        ("spočítej", Some(3), array_reduce),
        ("placka", Some(1), array_flatten),
        ("dl", Some(1), array_len),
    ])
}

fn array_is(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let value = args.into_iter().next().unwrap_or(Value::Null);

    Ok(Value::Bool(matches!(value, Value::Array(_))))
}

fn array_get(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let index = args.next().unwrap_or(Value::Null).as_number();

    let Value::Array(values) = array else {
        return Ok(Value::Null);
    };

    if index < 0.0 || index.fract() != 0.0 {
        return Ok(Value::Null);
    }

    let value = values.borrow()
        .get(index as usize)
        .cloned()
        .unwrap_or(Value::Null);

    Ok(value)
}

fn array_push(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let value = args.next().unwrap_or(Value::Null);

    let Value::Array(values) = array else {
        return Ok(Value::Null);
    };

    let mut values = values.borrow_mut();
    values.push(value);

    Ok(Value::Number(values.len() as f64))
}

fn array_pop(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let array = args.into_iter().next().unwrap_or(Value::Null);

    let Value::Array(values) = array else {
        return Ok(Value::Null);
    };

    let popped = values.borrow_mut().pop();

    Ok(popped.unwrap_or(Value::Null))
}

fn array_reverse(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let array = args.into_iter().next().unwrap_or(Value::Null);

    if let Value::Array(values) = &array {
        values.borrow_mut().reverse();
    }

    // reversal happens in place, the same array comes back
    Ok(array)
}

fn array_sort(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let comparator = args.next().unwrap_or(Value::Null);

    let Value::Array(values) = &array else {
        return Ok(Value::Null);
    };

    let mut sorted = values.borrow().clone();

    if comparator.is_null() {
        // without a comparator elements order by their string form
        sorted.sort_by(|a, b| format!("{a}").cmp(&format!("{b}")));
    } else {
        // insertion sort, the comparator runs user code
        for i in 1..sorted.len() {
            let mut j = i;

            while j > 0 {
                let ordering = interpreter
                    .call_lenient(
                        comparator.clone(),
                        vec![sorted[j - 1].clone(), sorted[j].clone()],
                        SrcSpan::default()
                    )
                    .map_err(callback_error)?
                    .as_number();

                if ordering > 0.0 {
                    sorted.swap(j - 1, j);
                    j -= 1;
                } else {
                    break;
                }
            }
        }
    }

    *values.borrow_mut() = sorted;

    Ok(array)
}

fn array_map(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let callback = args.next().unwrap_or(Value::Null);

    let Value::Array(values) = &array else {
        return Ok(Value::Null);
    };

    let snapshot = values.borrow().clone();
    let mut mapped = Vec::with_capacity(snapshot.len());

    for (index, value) in snapshot.into_iter().enumerate() {
        let result = interpreter
            .call_lenient(
                callback.clone(),
                vec![value, Value::Number(index as f64), array.clone()],
                SrcSpan::default()
            )
            .map_err(callback_error)?;

        mapped.push(result);
    }

    Ok(Value::array(mapped))
}

fn array_filter(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let callback = args.next().unwrap_or(Value::Null);

    let Value::Array(values) = &array else {
        return Ok(Value::Null);
    };

    let snapshot = values.borrow().clone();
    let mut kept = vec![];

    for (index, value) in snapshot.into_iter().enumerate() {
        let keep = interpreter
            .call_lenient(
                callback.clone(),
                vec![value.clone(), Value::Number(index as f64), array.clone()],
                SrcSpan::default()
            )
            .map_err(callback_error)?
            .is_truthy();

        if keep {
            kept.push(value);
        }
    }

    Ok(Value::array(kept))
}

fn array_reduce(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let array = args.next().unwrap_or(Value::Null);
    let callback = args.next().unwrap_or(Value::Null);
    let mut accumulator = args.next().unwrap_or(Value::Null);

    let Value::Array(values) = &array else {
        return Ok(Value::Null);
    };

    let snapshot = values.borrow().clone();

    for (index, value) in snapshot.into_iter().enumerate() {
        accumulator = interpreter
            .call_lenient(
                callback.clone(),
                vec![accumulator, value, Value::Number(index as f64), array.clone()],
                SrcSpan::default()
            )
            .map_err(callback_error)?;
    }

    Ok(accumulator)
}

fn array_flatten(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let array = args.into_iter().next().unwrap_or(Value::Null);

    let Value::Array(values) = array else {
        return Ok(Value::Null);
    };

    let mut flat = vec![];

    for value in values.borrow().iter() {
        match value {
            Value::Array(inner) => flat.extend(inner.borrow().iter().cloned()),
            other => flat.push(other.clone()),
        }
    }

    Ok(Value::array(flat))
}

fn array_len(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let value = args.into_iter().next().unwrap_or(Value::Null);

    match value {
        Value::Array(values) => Ok(Value::Number(values.borrow().len() as f64)),
        Value::String(text) => Ok(Value::Number(text.chars().count() as f64)),
        _ => Ok(Value::Null),
    }
}

/* mapa.* */

fn map_namespace() -> Value {
    namespace("mapa", &[
        ("vytvor", Some(0), map_create),
        ("vem", Some(2), map_get),
        ("dej", Some(3), map_set),
        ("keys", Some(1), map_keys),
        ("values", Some(1), map_values),
        ("páry", Some(1), map_entries),
        ("spojit", Some(2), map_merge),
    ])
}

fn sorted_keys(map: &HashMap<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = map.keys().cloned().collect();
    keys.sort();
    keys
}

fn map_create(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::object(HashMap::new()))
}

fn map_get(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let object = args.next().unwrap_or(Value::Null);
    let key = stringify(args.next());

    match object {
        Value::Object(map) => Ok(map.borrow().get(&key).cloned().unwrap_or(Value::Null)),
        _ => Ok(Value::Null),
    }
}

fn map_set(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let object = args.next().unwrap_or(Value::Null);
    let key = stringify(args.next());
    let value = args.next().unwrap_or(Value::Null);

    match &object {
        Value::Object(map) => {
            map.borrow_mut().insert(key, value.clone());
            Ok(value)
        }
        other => Err(RuntimeErrorType::InvalidArgument {
            message: format!("mapa.dej očekává mapu, dostal {}", other.type_name()),
        }),
    }
}

fn map_keys(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let object = args.into_iter().next().unwrap_or(Value::Null);

    let keys = match object {
        Value::Object(map) => sorted_keys(&map.borrow())
            .into_iter()
            .map(Value::String)
            .collect(),
        _ => vec![],
    };

    Ok(Value::array(keys))
}

fn map_values(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let object = args.into_iter().next().unwrap_or(Value::Null);

    let values = match object {
        Value::Object(map) => {
            let map = map.borrow();

            sorted_keys(&map)
                .into_iter()
                .map(|key| map[&key].clone())
                .collect()
        },
        _ => vec![],
    };

    Ok(Value::array(values))
}

fn map_entries(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let object = args.into_iter().next().unwrap_or(Value::Null);

    let entries = match object {
        Value::Object(map) => {
            let map = map.borrow();

            sorted_keys(&map)
                .into_iter()
                .map(|key| {
                    let value = map[&key].clone();
                    Value::array(vec![Value::String(key), value])
                })
                .collect()
        },
        _ => vec![],
    };

    Ok(Value::array(entries))
}

fn map_merge(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut merged = HashMap::new();

    for argument in args {
        if let Value::Object(map) = argument {
            for (key, value) in map.borrow().iter() {
                merged.insert(key.clone(), value.clone());
            }
        }
    }

    Ok(Value::object(merged))
}

/* matyš.* */

fn math_namespace() -> Value {
    namespace("matyš", &[
        ("abs", Some(1), math_abs),
        ("kolo", Some(1), math_round),
        ("pod", Some(1), math_floor),
        ("nad", Some(1), math_ceil),
        ("moc", Some(2), math_pow),
        ("kořen", Some(1), math_sqrt),
        ("sin", Some(1), math_sin),
        ("cos", Some(1), math_cos),
        ("tan", Some(1), math_tan),
        ("min", None, math_min),
        ("max", None, math_max),
        ("náhoda", Some(0), math_random),
        ("náhodaMezi", Some(2), math_random_between),
    ])
}

fn math_abs(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().abs()))
}

fn math_round(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    // halves round towards positive infinity
    let value = args.into_iter().next().unwrap_or(Value::Null).as_number();

    Ok(Value::Number((value + 0.5).floor()))
}

fn math_floor(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().floor()))
}

fn math_ceil(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().ceil()))
}

fn math_pow(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let base = args.next().unwrap_or(Value::Null).as_number();
    let exponent = args.next().unwrap_or(Value::Null).as_number();

    Ok(Value::Number(base.powf(exponent)))
}

fn math_sqrt(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().sqrt()))
}

fn math_sin(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().sin()))
}

fn math_cos(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().cos()))
}

fn math_tan(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(args.into_iter().next().unwrap_or(Value::Null).as_number().tan()))
}

fn math_min(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut min = f64::INFINITY;

    for argument in args {
        let value = argument.as_number();

        if value.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }

        if value < min {
            min = value;
        }
    }

    Ok(Value::Number(min))
}

fn math_max(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut max = f64::NEG_INFINITY;

    for argument in args {
        let value = argument.as_number();

        if value.is_nan() {
            return Ok(Value::Number(f64::NAN));
        }

        if value > max {
            max = value;
        }
    }

    Ok(Value::Number(max))
}

fn math_random(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(rand::random::<f64>()))
}

fn math_random_between(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let low = args.next().unwrap_or(Value::Null).as_number();
    let high = args.next().unwrap_or(Value::Null).as_number();

    let value = (rand::random::<f64>() * (high - low + 1.0)).floor() + low;

    Ok(Value::Number(value))
}

/* čas.* */

fn time_namespace() -> Value {
    namespace("čas", &[
        ("teď", Some(0), time_now),
        ("formát", Some(2), time_format),
        ("usni", Some(1), time_sleep),
        ("odměř", Some(1), time_measure),
    ])
}

fn time_now(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::Number(chrono::Utc::now().timestamp_millis() as f64))
}

fn time_format(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let millis = args.next().unwrap_or(Value::Null).as_number();
    let mask = stringify(args.next());

    Ok(Value::String(format_date(millis, &mask)))
}

fn format_date(millis: f64, mask: &str) -> String {
    let datetime = match Local.timestamp_millis_opt(millis as i64).single() {
        Some(datetime) => datetime,
        None => return mask.into(),
    };

    mask.replace("YYYY", &format!("{:04}", datetime.year()))
        .replace("MM", &format!("{:02}", datetime.month()))
        .replace("DD", &format!("{:02}", datetime.day()))
        .replace("hh", &format!("{:02}", datetime.hour()))
        .replace("mm", &format!("{:02}", datetime.minute()))
        .replace("ss", &format!("{:02}", datetime.second()))
}

fn time_sleep(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let millis = args.into_iter().next().unwrap_or(Value::Null).as_number();

    if millis.is_finite() && millis > 0.0 {
        std::thread::sleep(std::time::Duration::from_millis(millis as u64));
    }

    Ok(Value::Null)
}

fn time_measure(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let callee = args.into_iter().next().unwrap_or(Value::Null);

    let started = Instant::now();

    interpreter
        .call_lenient(callee, vec![], SrcSpan::default())
        .map_err(callback_error)?;

    Ok(Value::Number(started.elapsed().as_millis() as f64))
}

/* regl.* */

fn regex_namespace() -> Value {
    namespace("regl", &[
        ("najdi", Some(2), regex_find),
        ("všeci", Some(2), regex_find_all),
        ("nahrad", Some(3), regex_replace),
    ])
}

fn compile_pattern(pattern: &str) -> Result<regex::Regex, RuntimeErrorType> {
    regex::Regex::new(pattern).map_err(|err| RuntimeErrorType::InvalidArgument {
        message: format!("Neplatný regulární výraz: {err}"),
    })
}

fn regex_find(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());

    let found = compile_pattern(&pattern)?
        .find(&text)
        .map(|m| Value::string(m.as_str()))
        .unwrap_or(Value::Null);

    Ok(found)
}

fn regex_find_all(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());

    let matches = compile_pattern(&pattern)?
        .find_iter(&text)
        .map(|m| Value::string(m.as_str()))
        .collect();

    Ok(Value::array(matches))
}

fn regex_replace(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let mut args = args.into_iter();
    let text = stringify(args.next());
    let pattern = stringify(args.next());
    let replacement = stringify(args.next());

    let replaced = compile_pattern(&pattern)?
        .replace_all(&text, replacement.as_str())
        .into_owned();

    Ok(Value::String(replaced))
}

/* krypto.* */

fn crypto_namespace() -> Value {
    namespace("krypto", &[
        ("uuid", Some(0), crypto_uuid),
        ("base64", Some(1), crypto_base64_encode),
        ("zbase64", Some(1), crypto_base64_decode),
        ("sha256", Some(1), crypto_sha256),
    ])
}

fn crypto_uuid(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    Ok(Value::String(uuid::Uuid::new_v4().to_string()))
}

fn crypto_base64_encode(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let text = stringify(args.into_iter().next());

    Ok(Value::String(BASE64.encode(text.as_bytes())))
}

fn crypto_base64_decode(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let encoded = stringify(args.into_iter().next());

    let bytes = BASE64.decode(encoded.trim()).map_err(|err| RuntimeErrorType::InvalidArgument {
        message: format!("Neplatný base64: {err}"),
    })?;

    // Invalid UTF-8 degrades to replacement characters instead of failing.
    Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

fn crypto_sha256(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let text = stringify(args.into_iter().next());

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());

    Ok(Value::String(format!("{:x}", hasher.finalize())))
}

/* šichta.* */

fn process_namespace() -> Value {
    namespace("šichta", &[
        ("argv", Some(0), process_argv),
        ("env", Some(1), process_env),
        ("konec", Some(1), process_exit),
    ])
}

fn process_argv(_: &mut Interpreter, _: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let arguments = std::env::args()
        .skip(1)
        .map(Value::String)
        .collect();

    Ok(Value::array(arguments))
}

fn process_env(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let key = stringify(args.into_iter().next());

    match std::env::var(&key) {
        Ok(value) => Ok(Value::String(value)),
        Err(_) => Ok(Value::Null),
    }
}

fn process_exit(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let code = args.into_iter().next().unwrap_or(Value::Null).as_number();
    let code = if code.is_nan() { 0 } else { code as i32 };

    std::process::exit(code);
}

/* šufle.* — filesystem, gated behind the fs capability */

fn fs_namespace() -> Value {
    namespace("šufle", &[
        ("je", Some(1), fs_exists),
        ("čti", Some(1), fs_read),
        ("piš", Some(2), fs_write),
        ("seznam", Some(1), fs_list),
        ("info", Some(1), fs_info),
    ])
}

fn ensure_fs(interpreter: &Interpreter) -> Result<(), RuntimeErrorType> {
    match interpreter.capabilities().fs_enabled {
        true => Ok(()),
        false => Err(RuntimeErrorType::CapabilityDenied { capability: "fs" }),
    }
}

fn io_error(err: std::io::Error) -> RuntimeErrorType {
    RuntimeErrorType::Io { message: format!("{err}") }
}

fn fs_exists(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    ensure_fs(interpreter)?;

    let path = stringify(args.into_iter().next());

    Ok(Value::Bool(std::path::Path::new(&path).exists()))
}

fn fs_read(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    ensure_fs(interpreter)?;

    let path = stringify(args.into_iter().next());
    let contents = std::fs::read_to_string(&path).map_err(io_error)?;

    Ok(Value::String(contents))
}

fn fs_write(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    ensure_fs(interpreter)?;

    let mut args = args.into_iter();
    let path = stringify(args.next());
    let data = stringify(args.next());

    std::fs::write(&path, data).map_err(io_error)?;

    Ok(Value::Bool(true))
}

fn fs_list(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    ensure_fs(interpreter)?;

    let path = stringify(args.into_iter().next());

    let mut names = vec![];

    for entry in std::fs::read_dir(&path).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        names.push(Value::String(entry.file_name().to_string_lossy().into_owned()));
    }

    names.sort_by(|a, b| format!("{a}").cmp(&format!("{b}")));

    Ok(Value::array(names))
}

fn fs_info(interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    ensure_fs(interpreter)?;

    let path = stringify(args.into_iter().next());
    let metadata = std::fs::metadata(&path).map_err(io_error)?;

    let timestamp = |time: std::io::Result<std::time::SystemTime>| {
        time.ok()
            .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
            .map(|duration| Value::Number(duration.as_millis() as f64))
            .unwrap_or(Value::Null)
    };

    let mut info = HashMap::new();
    info.insert("isFile".into(), Value::Bool(metadata.is_file()));
    info.insert("isDirectory".into(), Value::Bool(metadata.is_dir()));
    info.insert("size".into(), Value::Number(metadata.len() as f64));
    info.insert("atimeMs".into(), timestamp(metadata.accessed()));
    info.insert("mtimeMs".into(), timestamp(metadata.modified()));

    Ok(Value::object(info))
}

/* šmirgl.* */

fn introspection_namespace() -> Value {
    namespace("šmirgl", &[
        ("typy", Some(1), introspect_types),
    ])
}

fn introspect_types(_: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeErrorType> {
    let object = args.into_iter().next().unwrap_or(Value::Null);

    let mut types = HashMap::new();

    if let Value::Object(map) = object {
        for (key, value) in map.borrow().iter() {
            types.insert(key.clone(), Value::string(value.type_name()));
        }
    }

    Ok(Value::object(types))
}
