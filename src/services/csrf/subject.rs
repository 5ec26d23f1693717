//! Canonical subject string for a matched route.
//!
//! The subject is what a CSRF token is bound to: the route template with its
//! leading `/` removed and every `{name}` placeholder replaced by the raw value
//! captured for that name.
//!
//! Substitution is a single left-to-right scan. Values are copied into the output
//! and never scanned again, so a captured value that itself looks like `{other}`
//! is emitted verbatim instead of being expanded a second time.

use std::collections::HashMap;

/// Build the subject string for `template` using the captured `params`.
///
/// - A placeholder with no entry in `params` is kept as literal `{name}` text.
/// - An unterminated `{`, or a stray `{` before a placeholder, is copied as-is.
/// - Only a single leading `/` is stripped.
pub fn build_subject(template: &str, params: &HashMap<String, String>) -> String {
    let template = template.strip_prefix('/').unwrap_or(template);

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find('}') else {
            // no closing brace: the remainder is literal text
            out.push_str(&rest[open..]);
            return out;
        };

        // the placeholder opens at the last `{` before the closing brace
        let end = open + 1 + close;
        let start = open + rest[open..end].rfind('{').unwrap_or(0);
        out.push_str(&rest[open..start]);

        let name = &rest[start + 1..end];
        match params.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..=end]),
        }

        rest = &rest[end + 1..];
    }

    out.push_str(rest);
    out
}
