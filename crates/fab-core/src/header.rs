//! Structured OSGi manifest header parsing.
//!
//! Headers such as `Export-Package` are a comma-separated list of clauses.
//! Each clause names one or more packages and carries shared parameters:
//!
//! ```text
//! header    := clause ( ',' clause )*
//! clause    := name ( ';' name )* ( ';' parameter )*
//! parameter := key '=' value | key ':=' value
//! value     := token | '"' chars '"'
//! ```
//!
//! Attributes (`=`) are stored under their key, directives (`:=`) under their
//! key with a trailing `:` (`uses:`). Parsing is strict: malformed text is an
//! error, never silently skipped.

use std::collections::BTreeMap;

use fab_util::errors::FabError;

/// Parameters attached to one header name.
pub type Attributes = BTreeMap<String, String>;

/// A parsed header: clause name to its parameters.
pub type Header = BTreeMap<String, Attributes>;

/// Parse a structured header value. `header` names the header in errors.
pub fn parse_header(header: &str, text: &str) -> Result<Header, FabError> {
    let mut result = Header::new();
    for clause in split_outside_quotes(text, ',', header)? {
        if clause.trim().is_empty() {
            continue;
        }
        let (names, attributes) = parse_clause(header, &clause)?;
        for name in names {
            if result.contains_key(&name) {
                tracing::warn!("Duplicate {header} entry '{name}'; keeping the first one");
                continue;
            }
            result.insert(name, attributes.clone());
        }
    }
    Ok(result)
}

fn parse_clause(header: &str, clause: &str) -> Result<(Vec<String>, Attributes), FabError> {
    let mut names = Vec::new();
    let mut attributes = Attributes::new();

    for part in split_outside_quotes(clause, ';', header)? {
        let part = part.trim();
        if part.is_empty() {
            return Err(error(header, format!("empty element in clause '{}'", clause.trim())));
        }
        match find_outside_quotes(part, '=') {
            Some(eq) => {
                let (key, directive) = match part[..eq].strip_suffix(':') {
                    Some(key) => (key.trim(), true),
                    None => (part[..eq].trim(), false),
                };
                if key.is_empty() {
                    return Err(error(header, format!("parameter without a name: '{part}'")));
                }
                let value = parse_value(header, part[eq + 1..].trim())?;
                let key = if directive {
                    format!("{key}:")
                } else {
                    key.to_string()
                };
                attributes.insert(key, value);
            }
            None => {
                if !attributes.is_empty() {
                    return Err(error(
                        header,
                        format!("'{part}' follows parameters in clause '{}'", clause.trim()),
                    ));
                }
                if part.contains('"') {
                    return Err(error(header, format!("unexpected quote in name '{part}'")));
                }
                names.push(part.to_string());
            }
        }
    }

    if names.is_empty() {
        return Err(error(
            header,
            format!("clause '{}' has parameters but no name", clause.trim()),
        ));
    }
    Ok((names, attributes))
}

fn parse_value(header: &str, raw: &str) -> Result<String, FabError> {
    if raw.is_empty() {
        return Err(error(header, "parameter without a value".to_string()));
    }
    let Some(rest) = raw.strip_prefix('"') else {
        if raw.contains('"') {
            return Err(error(header, format!("unexpected quote in value '{raw}'")));
        }
        return Ok(raw.to_string());
    };
    match rest.find('"') {
        Some(end) if end + 1 == rest.len() => Ok(rest[..end].to_string()),
        Some(_) => Err(error(header, format!("text after closing quote in '{raw}'"))),
        None => Err(error(header, format!("unterminated quote in '{raw}'"))),
    }
}

/// Split on `sep`, ignoring separators inside double quotes.
fn split_outside_quotes(text: &str, sep: char, header: &str) -> Result<Vec<String>, FabError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    for ch in text.chars() {
        if ch == '"' {
            quoted = !quoted;
        }
        if ch == sep && !quoted {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if quoted {
        return Err(error(header, format!("unterminated quote in '{}'", text.trim())));
    }
    parts.push(current);
    Ok(parts)
}

fn find_outside_quotes(text: &str, needle: char) -> Option<usize> {
    let mut quoted = false;
    for (i, ch) in text.char_indices() {
        if ch == '"' {
            quoted = !quoted;
        } else if ch == needle && !quoted {
            return Some(i);
        }
    }
    None
}

fn error(header: &str, message: String) -> FabError {
    FabError::Header {
        header: header.to_string(),
        message,
    }
}
