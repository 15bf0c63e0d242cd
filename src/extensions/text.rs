use crate::{
    extensions::args::Arguments,
    interpreter::{native::NativeResult, value::core::Value},
};

/// `trim`: strip leading characters.
pub const MCL_TRIM_LEFT: i64 = 1;
/// `trim`: strip trailing characters.
pub const MCL_TRIM_RIGHT: i64 = 2;
/// `trim`: collapse inner runs of trim characters to their first character.
pub const MCL_TRIM_MIDDLE: i64 = 4;
/// `trim`: both ends.
pub const MCL_TRIM_ENDS: i64 = MCL_TRIM_LEFT | MCL_TRIM_RIGHT;
/// `trim`: both ends and the middle.
pub const MCL_TRIM_ALL: i64 = MCL_TRIM_ENDS | MCL_TRIM_MIDDLE;

/// `pad`: pad on the left.
pub const MCL_PAD_LEFT: i64 = 1;
/// `pad`: pad on the right.
pub const MCL_PAD_RIGHT: i64 = 2;

/// `uppercase`: every letter.
pub const MCL_UPPERCASE_EVERYTHING: i64 = 0;
/// `uppercase`: the first letter of every word, the rest lowercased.
pub const MCL_UPPERCASE_TITLE: i64 = 1;
/// `uppercase`: only the first letter of the string.
pub const MCL_UPPERCASE_FIRST: i64 = 2;
/// `uppercase`: alternate upper and lower case across letters.
pub const MCL_UPPERCASE_ALTERNATING: i64 = 3;
/// `uppercase`: swap the case of every letter.
pub const MCL_UPPERCASE_TOGGLE: i64 = 4;

/// Characters `trim` removes when none are given.
pub const DEFAULT_TRIM_CHARACTERS: &str = " \t\n\r\0\x0B";

/// Removes characters from the ends and/or the middle of a string.
///
/// Signature: `trim(string str, string characters = " \t\n\r\0\x0B", integer
/// operation = MCL_TRIM_ENDS)`. `operation` is any combination of the
/// `MCL_TRIM_*` bits.
///
/// # Example
/// ```
/// use nirvana::{
///     extensions::text::{MCL_TRIM_ALL, trim},
///     interpreter::value::core::Value,
/// };
///
/// let trimmed = trim(&[Value::from("  a   b  ")]).unwrap();
/// assert_eq!(trimmed, Value::from("a   b"));
///
/// let collapsed = trim(&[Value::from("--a---b--"), Value::from("-"), Value::Integer(MCL_TRIM_ALL)]).unwrap();
/// assert_eq!(collapsed, Value::from("a-b"));
/// ```
pub fn trim(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("trim", args);
    let input = args.string(1, "str")?;
    let characters = args.string_or(2, "characters", DEFAULT_TRIM_CHARACTERS)?;
    let operation = args.integer_or(3, "operation", MCL_TRIM_ENDS)?;
    if !(0..=MCL_TRIM_ALL).contains(&operation) {
        return Err(args.invalid(format!("Invalid operation constant {operation}. Valid values are combinations of \
                                         MCL_TRIM_LEFT (1), MCL_TRIM_RIGHT (2), MCL_TRIM_MIDDLE (4), \
                                         MCL_TRIM_ENDS (3), MCL_TRIM_ALL (7).")));
    }

    let is_trimmed = |c: char| characters.contains(c);
    let mut result = input;
    if operation & MCL_TRIM_LEFT != 0 {
        result = result.trim_start_matches(is_trimmed);
    }
    if operation & MCL_TRIM_RIGHT != 0 {
        result = result.trim_end_matches(is_trimmed);
    }
    if operation & MCL_TRIM_MIDDLE == 0 {
        return Ok(Value::from(result));
    }

    let mut collapsed = String::with_capacity(result.len());
    let mut in_run = false;
    for c in result.chars() {
        let trimmed = is_trimmed(c);
        if !(trimmed && in_run) {
            collapsed.push(c);
        }
        in_run = trimmed;
    }
    Ok(Value::String(collapsed))
}

/// Pads a string to a length with the first character of `pad`.
///
/// Signature: `pad(string str, integer length, string pad = " ", integer
/// type = MCL_PAD_RIGHT)`. An empty `pad` pads with spaces. Strings already
/// at least `length` characters long are returned unchanged.
///
/// # Example
/// ```
/// use nirvana::{
///     extensions::text::{MCL_PAD_LEFT, pad},
///     interpreter::value::core::Value,
/// };
///
/// let padded = pad(&[Value::from("7"), Value::Integer(3), Value::from("0"), Value::Integer(MCL_PAD_LEFT)]).unwrap();
/// assert_eq!(padded, Value::from("007"));
/// ```
pub fn pad(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("pad", args);
    let input = args.string(1, "str")?;
    let length = args.integer(2, "length")?;
    let fill = args.string_or(3, "pad", " ")?.chars().next().unwrap_or(' ');
    let side = args.integer_or(4, "type", MCL_PAD_RIGHT)?;
    if side != MCL_PAD_LEFT && side != MCL_PAD_RIGHT {
        return Err(args.invalid(format!("Invalid pad type {side}. Use MCL_PAD_LEFT (1) or MCL_PAD_RIGHT (2).")));
    }

    let current = input.chars().count();
    let missing = usize::try_from(length).map_or(0, |length| length.saturating_sub(current));

    let too_long = || args.invalid(format!("Cannot pad to {length} characters."));
    let extra = missing.checked_mul(fill.len_utf8()).ok_or_else(too_long)?;
    let mut result = String::new();
    result.try_reserve_exact(input.len().saturating_add(extra)).map_err(|_| too_long())?;

    if side == MCL_PAD_RIGHT {
        result.push_str(input);
    }
    result.extend(std::iter::repeat_n(fill, missing));
    if side == MCL_PAD_LEFT {
        result.push_str(input);
    }
    Ok(Value::String(result))
}

/// Changes letter case. Only ASCII letters are affected.
///
/// Signature: `uppercase(string str, integer technique =
/// MCL_UPPERCASE_EVERYTHING)`.
///
/// # Example
/// ```
/// use nirvana::{
///     extensions::text::{MCL_UPPERCASE_TITLE, uppercase},
///     interpreter::value::core::Value,
/// };
///
/// let title = uppercase(&[Value::from("hello wORLD"), Value::Integer(MCL_UPPERCASE_TITLE)]).unwrap();
/// assert_eq!(title, Value::from("Hello World"));
/// ```
pub fn uppercase(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("uppercase", args);
    let input = args.string(1, "str")?;
    let technique = args.integer_or(2, "technique", MCL_UPPERCASE_EVERYTHING)?;

    let result = match technique {
        MCL_UPPERCASE_EVERYTHING => input.to_ascii_uppercase(),
        MCL_UPPERCASE_TITLE => {
            let mut capitalize_next = true;
            input.chars()
                 .map(|c| {
                     if !c.is_ascii_alphabetic() {
                         capitalize_next = true;
                         return c;
                     }
                     let c = if capitalize_next {
                         c.to_ascii_uppercase()
                     } else {
                         c.to_ascii_lowercase()
                     };
                     capitalize_next = false;
                     c
                 })
                 .collect()
        },
        MCL_UPPERCASE_FIRST => match input.char_indices().find(|(_, c)| c.is_ascii_alphabetic()) {
            Some((index, c)) => {
                let mut result = input.to_string();
                result.replace_range(index..=index, &c.to_ascii_uppercase().to_string());
                result
            },
            None => input.to_string(),
        },
        MCL_UPPERCASE_ALTERNATING => {
            let mut upper = true;
            input.chars()
                 .map(|c| {
                     if !c.is_ascii_alphabetic() {
                         return c;
                     }
                     let c = if upper {
                         c.to_ascii_uppercase()
                     } else {
                         c.to_ascii_lowercase()
                     };
                     upper = !upper;
                     c
                 })
                 .collect()
        },
        MCL_UPPERCASE_TOGGLE => input.chars()
                                     .map(|c| {
                                         if c.is_ascii_lowercase() {
                                             c.to_ascii_uppercase()
                                         } else {
                                             c.to_ascii_lowercase()
                                         }
                                     })
                                     .collect(),
        other => {
            return Err(args.invalid(format!("Invalid technique constant {other}. Valid values are \
                                             MCL_UPPERCASE_EVERYTHING (0) through MCL_UPPERCASE_TOGGLE (4).")));
        },
    };
    Ok(Value::String(result))
}

/// Substring test.
pub fn contains(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("contains", args);
    let haystack = args.string(1, "str")?;
    let needle = args.string(2, "substring")?;
    Ok(Value::Boolean(haystack.contains(needle)))
}

/// Concatenates all arguments and reverses the characters.
pub fn reverse(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("reverse", args);
    let mut combined = String::new();
    for position in 1..=args.len() {
        combined.push_str(args.string(position, "strings")?);
    }
    Ok(Value::String(combined.chars().rev().collect()))
}

/// Wraps a string: `"L|R"` puts `L` before and `R` after; without a `|`
/// the whole argument goes before.
///
/// # Example
/// ```
/// use nirvana::{extensions::text::wrap, interpreter::value::core::Value};
///
/// assert_eq!(wrap(&[Value::from("x"), Value::from("[|]")]).unwrap(), Value::from("[x]"));
/// assert_eq!(wrap(&[Value::from("x"), Value::from("> ")]).unwrap(), Value::from("> x"));
/// ```
pub fn wrap(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("wrap", args);
    let input = args.string(1, "str")?;
    let wrapper = args.string_or(2, "chars", "")?;
    let (left, right) = wrapper.split_once('|').unwrap_or((wrapper, ""));
    Ok(Value::String(format!("{left}{input}{right}")))
}

/// Code point of the first character.
pub fn ascii(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("ascii", args);
    let input = args.string(1, "character")?;
    input.chars()
         .next()
         .map(|c| Value::Integer(i64::from(u32::from(c))))
         .ok_or_else(|| args.invalid("Argument 1 ($character) must not be an empty string."))
}

/// One-character string for a code in `0..=255`.
pub fn character(args: &[Value]) -> NativeResult<Value> {
    let args = Arguments::new("character", args);
    let code = args.integer(1, "ascii")?;
    u8::try_from(code).map(|byte| Value::String(char::from(byte).to_string()))
                      .map_err(|_| {
                          args.invalid(format!("ASCII value {code} is out of valid character range (0-255)."))
                      })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::NativeError;

    fn text(value: Result<Value, NativeError>) -> String {
        match value.unwrap() {
            Value::String(s) => s,
            other => panic!("expected a string, got {other:?}"),
        }
    }

    #[test]
    fn trim_modes() {
        let input = Value::from("xxaxxbxx");
        let chars = Value::from("x");
        let run = |op| text(trim(&[input.clone(), chars.clone(), Value::Integer(op)]));

        assert_eq!(run(MCL_TRIM_LEFT), "axxbxx");
        assert_eq!(run(MCL_TRIM_RIGHT), "xxaxxb");
        assert_eq!(run(MCL_TRIM_MIDDLE), "xaxbx");
        assert_eq!(run(MCL_TRIM_ENDS), "axxb");
        assert_eq!(run(MCL_TRIM_ALL), "axb");
        assert_eq!(run(0), "xxaxxbxx");
    }

    #[test]
    fn trim_everything_away() {
        assert_eq!(text(trim(&[Value::from(" \t\n ")])), "");
    }

    #[test]
    fn trim_rejects_unknown_bits() {
        let error = trim(&[Value::from("a"), Value::from(" "), Value::Integer(8)]).unwrap_err();
        assert!(matches!(error, NativeError::InvalidArgument { .. }));
    }

    #[test]
    fn pad_defaults() {
        assert_eq!(text(pad(&[Value::from("ab"), Value::Integer(4)])), "ab  ");
        assert_eq!(text(pad(&[Value::from("ab"), Value::Integer(4), Value::from("")])), "ab  ");
        assert_eq!(text(pad(&[Value::from("abc"), Value::Integer(2)])), "abc");
        assert_eq!(text(pad(&[Value::from("abc"), Value::Integer(-5)])), "abc");
        assert_eq!(text(pad(&[Value::from("é"), Value::Integer(3), Value::from("*-")])), "é**");
        assert!(pad(&[Value::from("a"), Value::Integer(3), Value::from(" "), Value::Integer(3)]).is_err());
    }

    #[test]
    fn pad_to_an_impossible_length_fails() {
        let error = pad(&[Value::from("x"), Value::Integer(i64::MAX)]).unwrap_err();
        assert!(matches!(error, NativeError::InvalidArgument { .. }));

        let error = pad(&[Value::from("x"), Value::Integer(i64::MAX), Value::from("é")]).unwrap_err();
        assert_eq!(error.to_string(), format!("Function 'pad': Cannot pad to {} characters.", i64::MAX));
    }

    #[test]
    fn uppercase_techniques() {
        let run = |technique| text(uppercase(&[Value::from("hello, wORLD 2nd"), Value::Integer(technique)]));

        assert_eq!(run(MCL_UPPERCASE_EVERYTHING), "HELLO, WORLD 2ND");
        assert_eq!(run(MCL_UPPERCASE_TITLE), "Hello, World 2Nd");
        assert_eq!(run(MCL_UPPERCASE_FIRST), "Hello, wORLD 2nd");
        assert_eq!(run(MCL_UPPERCASE_ALTERNATING), "HeLlO, wOrLd 2Nd");
        assert_eq!(run(MCL_UPPERCASE_TOGGLE), "HELLO, World 2ND");
        assert!(uppercase(&[Value::from("a"), Value::Integer(5)]).is_err());
    }

    #[test]
    fn uppercase_first_skips_leading_symbols() {
        assert_eq!(text(uppercase(&[Value::from("  ¡hola"), Value::Integer(MCL_UPPERCASE_FIRST)])),
                   "  ¡Hola");
    }

    #[test]
    fn contains_and_reverse() {
        assert_eq!(contains(&[Value::from("haystack"), Value::from("st")]).unwrap(),
                   Value::Boolean(true));
        assert_eq!(contains(&[Value::from("haystack"), Value::from("")]).unwrap(),
                   Value::Boolean(true));
        assert_eq!(text(reverse(&[Value::from("ab"), Value::from("cd")])), "dcba");
        assert!(matches!(reverse(&[Value::from("ab"), Value::Integer(1)]),
                         Err(NativeError::ArgumentType { position: 2, .. })));
    }

    #[test]
    fn ascii_and_character_round_trip() {
        assert_eq!(ascii(&[Value::from("A")]).unwrap(), Value::Integer(65));
        assert_eq!(text(character(&[Value::Integer(65)])), "A");
        assert_eq!(text(character(&[Value::Float(97.0)])), "a");
        assert!(ascii(&[Value::from("")]).is_err());
        assert!(character(&[Value::Integer(256)]).is_err());
        assert!(character(&[Value::Integer(-1)]).is_err());
    }
}
