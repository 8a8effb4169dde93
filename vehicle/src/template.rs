use regex::Regex;

use crate::error::{Error, Result};
use crate::params::ParamMap;

// `@` followed by identifier characters. A lone `@` (or `@` followed by
// punctuation) is not a token and passes through unchanged; there is no
// escaping mechanism.
const TOKEN_PATTERN: &str = r"@(\w+)";

/// Replace every `@identifier` token in `template` with its parameter value.
///
/// Single left-to-right pass: substituted text is never re-scanned for
/// further tokens. An identifier with no entry in `params` fails the whole
/// substitution, so the caller never writes partial output.
pub fn substitute(template: &str, params: &ParamMap) -> Result<String> {
    let token = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");

    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;
    for captures in token.captures_iter(template) {
        let matched = captures.get(0).expect("whole-match group is present");
        let name = &captures[1];
        let value = params.get(name).ok_or_else(|| {
            let (line, column) = position(template, matched.start());
            Error::UndefinedPlaceholder {
                name: name.to_string(),
                line,
                column,
            }
        })?;
        out.push_str(&template[cursor..matched.start()]);
        out.push_str(&value.to_string());
        cursor = matched.end();
    }
    out.push_str(&template[cursor..]);
    Ok(out)
}

// 1-based line/column of a byte offset.
fn position(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let column = offset - before.rfind('\n').map_or(0, |i| i + 1) + 1;
    (line, column)
}
