use super::parser::{FieldPath, Node};
use crate::error::{SmarterrError, SmarterrResult};
use crate::types::{TokenValue, TokenValues};

/// Evaluates `nodes` against `values`, appending to `out`.
pub(crate) fn render_nodes(
    name: &str,
    nodes: &[Node],
    values: &TokenValues,
    out: &mut String,
) -> SmarterrResult<()> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Field(path) => out.push_str(&lookup(name, path, values)?),
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                let branch = if truthy(name, cond, values)? { then } else { otherwise };
                render_nodes(name, branch, values, out)?;
            }
        }
    }
    Ok(())
}

fn value<'v>(
    name: &str,
    path: &FieldPath,
    values: &'v TokenValues,
) -> SmarterrResult<&'v TokenValue> {
    values
        .get(&path.name)
        .ok_or_else(|| {
            SmarterrError::template(name, format!("no value for {path}"))
        })
}

fn lookup(name: &str, path: &FieldPath, values: &TokenValues) -> SmarterrResult<String> {
    let token = value(name, path, values)?;
    match (&path.field, token) {
        (None, token) => Ok(token.to_string()),
        (Some(field), TokenValue::Structured(structured)) => structured
            .field(field)
            .map(str::to_string)
            .ok_or_else(|| {
                SmarterrError::template(name, format!("{path}: no field {field:?}"))
            }),
        (Some(field), TokenValue::Text(_)) => Err(SmarterrError::template(
            name,
            format!("{path}: can't evaluate field {field:?} of a text token"),
        )),
    }
}

fn truthy(name: &str, path: &FieldPath, values: &TokenValues) -> SmarterrResult<bool> {
    match &path.field {
        None => Ok(value(name, path, values)?.is_truthy()),
        Some(_) => Ok(!lookup(name, path, values)?.is_empty()),
    }
}

/// Every field path referenced by `nodes`, conditionals included.
pub(crate) fn collect_variables<'n>(nodes: &'n [Node], out: &mut Vec<&'n FieldPath>) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Field(path) => out.push(path),
            Node::If {
                cond,
                then,
                otherwise,
            } => {
                out.push(cond);
                collect_variables(then, out);
                collect_variables(otherwise, out);
            }
        }
    }
}
