//! Header representation and value tokenization.

use crate::pool::Pool;

/// A header value: the original string plus its split tokens.
///
/// `raw` is the value as received, internal whitespace untouched. `items`
/// holds the sub-tokens obtained by splitting `raw` on `,` or `;`, each
/// trimmed of ASCII whitespace, empties dropped, encounter order preserved.
/// Both are independent pool copies.
#[derive(Debug, Clone)]
pub struct HeaderValue<'a> {
    pub raw: &'a str,
    pub items: Vec<&'a str>,
}

/// One header line: name plus tokenized value.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    pub name: &'a str,
    pub value: HeaderValue<'a>,
}

/// Splits a header value into trimmed sub-tokens.
///
/// No quoted-string awareness: a `,` inside quotes still separates tokens.
pub fn tokenize<'a>(pool: &'a Pool, value: &str) -> HeaderValue<'a> {
    let raw = pool.alloc_str(value);
    let mut items = Vec::new();
    for token in value.split([',', ';']) {
        let token = token.trim_matches(|c: char| c.is_ascii_whitespace());
        if !token.is_empty() {
            items.push(pool.alloc_str(token));
        }
    }
    HeaderValue { raw, items }
}
