//! Parameter-substitution micro-language for description templates.
//!
//! Tokens are `{{...}}`; token content splits on `|` into a command and
//! its arguments:
//!
//! - `{{plural|param|singular|plural}}` - exact forms, with an optional
//!   fourth argument used when the value is zero
//! - `{{s|param}}` - suffix pluralization; optional plural suffix
//!   (default `"s"`) and singular suffix (default empty)
//! - `{{ifzero|param|zeroText|elseText}}`
//! - `{{ifone|param|oneText|elseText}}`
//! - `{{param}}` - bare substitution of the parameter's string value
//!
//! A token whose parameter is missing or of the wrong type stays in the
//! text unchanged. Each pass expands innermost tokens left to right;
//! expansion runs at most `MAX_EXPANSION_PASSES` passes so nested tokens
//! resolve without any risk of looping forever. The cap is a
//! compatibility-relevant bound, not tunable.

use tracing::debug;

use crate::conditions::{ParamValue, Params};

/// Hard cap on expansion passes over one template.
pub const MAX_EXPANSION_PASSES: usize = 5;

/// Expand a template against a resolved parameter map.
#[must_use]
pub fn expand_template(template: &str, params: &Params) -> String {
    let mut text = template.to_string();

    for _ in 0..MAX_EXPANSION_PASSES {
        if !text.contains("{{") {
            break;
        }
        let expanded = expand_once(&text, params);
        if expanded == text {
            break;
        }
        text = expanded;
    }

    text
}

/// Does the text still carry an unexpanded token?
#[must_use]
pub fn has_tokens(text: &str) -> bool {
    match (text.find("{{"), text.find("}}")) {
        (Some(open), Some(close)) => open < close,
        _ => false,
    }
}

/// One pass: expand every innermost token, left to right.
fn expand_once(input: &str, params: &Params) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let Some(close) = rest.find("}}") else {
            out.push_str(rest);
            return out;
        };

        match rest[..close].rfind("{{") {
            // A closer with no opener ahead of it is plain text.
            None => out.push_str(&rest[..close + 2]),
            Some(open) => {
                out.push_str(&rest[..open]);
                let token = &rest[open + 2..close];
                match resolve_token(token, params) {
                    Some(replacement) => out.push_str(&replacement),
                    None => {
                        debug!(token, "template token left unresolved");
                        out.push_str(&rest[open..close + 2]);
                    }
                }
            }
        }
        rest = &rest[close + 2..];
    }
}

/// Resolve one token's content. `None` leaves the token in the text.
fn resolve_token(content: &str, params: &Params) -> Option<String> {
    let parts: Vec<&str> = content.split('|').collect();

    match parts.as_slice() {
        ["plural", param, singular, plural, rest @ ..] => {
            let n = params.int(param)?;
            let text = match n {
                0 if !rest.is_empty() => rest[0],
                1 => *singular,
                _ => *plural,
            };
            Some(text.to_string())
        }

        ["s", param, rest @ ..] => {
            let n = params.int(param)?;
            let plural_suffix = rest.first().copied().unwrap_or("s");
            let singular_suffix = rest.get(1).copied().unwrap_or("");
            let suffix = if n == 1 { singular_suffix } else { plural_suffix };
            Some(suffix.to_string())
        }

        ["ifzero", param, zero_text, else_text] => {
            let n = params.int(param)?;
            Some(if n == 0 { zero_text } else { else_text }.to_string())
        }

        ["ifone", param, one_text, else_text] => {
            let n = params.int(param)?;
            Some(if n == 1 { one_text } else { else_text }.to_string())
        }

        // Anything else reads as a bare parameter name.
        [name, ..] => params.get(name).map(ParamValue::display),

        [] => None,
    }
}
