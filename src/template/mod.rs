//! Template rendering.
//!
//! A template is parsed once per render, its referenced variables are
//! checked against the resolved token values, and anything missing is filled
//! with the token-error-mode fallback before evaluation. Parse and evaluation
//! failures come back as [`SmarterrError::Template`].
//!
//! # Examples
//!
//! ```
//! use smarterr::template::ParsedTemplate;
//! use smarterr::types::{TokenValue, TokenValues};
//!
//! let template = ParsedTemplate::parse("error_summary", "creating {{.service}}").unwrap();
//! let mut values = TokenValues::new();
//! values.insert("service".into(), TokenValue::from("CloudWatch"));
//! assert_eq!(template.render(&values).unwrap(), "creating CloudWatch");
//! ```

pub mod parser;
mod render;

pub use parser::{FieldPath, Node};

use crate::error::{SmarterrError, SmarterrResult};
use crate::runtime::RuntimeEnvelope;
use crate::types::{StructuredValue, TokenValue, TokenValues};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    name: String,
    nodes: Vec<Node>,
}

impl ParsedTemplate {
    pub fn parse(name: &str, source: &str) -> SmarterrResult<Self> {
        Ok(Self {
            name: name.to_string(),
            nodes: parser::parse(name, source)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Referenced variables in first-use order, without duplicates.
    pub fn variables(&self) -> Vec<&FieldPath> {
        let mut all = Vec::new();
        render::collect_variables(&self.nodes, &mut all);
        let mut seen = std::collections::HashSet::new();
        all.retain(|path| seen.insert(*path));
        all
    }

    pub fn render(&self, values: &TokenValues) -> SmarterrResult<String> {
        let mut out = String::new();
        render::render_nodes(&self.name, &self.nodes, values, &mut out)?;
        Ok(out)
    }
}

/// Renders the template called `name` from the envelope's config.
///
/// Returns `None` when the template is not configured or has an empty
/// format. Variables with no resolved value are filled in `values` with the
/// fallback first; a variable used with a field gets a structured fallback.
pub fn render_template(
    env: &RuntimeEnvelope<'_>,
    name: &str,
    values: &mut TokenValues,
) -> Option<Result<String, SmarterrError>> {
    let template = env.config.template(name)?;
    if template.format.is_empty() {
        return None;
    }
    Some(ParsedTemplate::parse(name, &template.format).and_then(|parsed| {
        for path in parsed.variables() {
            if values.contains_key(&path.name) {
                continue;
            }
            env.trace.log(format_args!(
                "template {name:?}: token {:?} is not declared",
                path.name
            ));
            let text = env.fallback(&path.name, "token is not declared");
            let value = match path.field {
                Some(_) => TokenValue::Structured(StructuredValue::uniform(&text)),
                None => TokenValue::Text(text),
            };
            values.insert(path.name.clone(), value);
        }
        parsed.render(values)
    }))
}
