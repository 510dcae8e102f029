//! Function argument list parsing: `a, b: Number` → `[a, b: Number]`.

use crate::model::Argument;

/// Parse the text between a function's parentheses.
///
/// Splits on every comma; argument lists in DataWeave signatures are flat so
/// there is no nesting to track. The first `:` of a part separates the name
/// from its type. Parts with an empty name are skipped, which also makes an
/// empty or blank list produce no arguments.
pub fn parse(text: &str) -> Vec<Argument> {
    text.split(',').filter_map(parse_one).collect()
}

fn parse_one(part: &str) -> Option<Argument> {
    let (name, datatype) = match part.split_once(':') {
        Some((name, datatype)) => (name.trim(), Some(datatype.trim().to_string())),
        None => (part.trim(), None),
    };
    if name.is_empty() {
        return None;
    }
    Some(Argument {
        name: name.to_string(),
        datatype,
    })
}
