//! Placeholder substitution for provider parameter and header templates.
//!
//! Templates are static strings with `{name}` fragments. Substituted values
//! are percent-encoded before insertion, so rendered parameter pairs can be
//! joined directly into a query string.

use thiserror::Error;

/// Template rendering errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder had no value and the policy was [`MissingKeyPolicy::Fail`].
    #[error("unresolved placeholder '{{{0}}}'")]
    MissingKey(String),
}

/// What to do when a placeholder cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Leave the literal `{name}` fragment in the output. This is the
    /// lenient-degradation policy used at dispatch time: a provider with a
    /// missing optional credential still gets called and reports its own
    /// auth error instead of aborting the whole request.
    #[default]
    PassThrough,
    /// Return [`TemplateError::MissingKey`].
    Fail,
}

/// Values available to placeholder substitution for one dispatch.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
    pub page: usize,
    pub safe_search: bool,
    pub region: String,
    pub language: String,
    pub api_key: Option<String>,
    pub search_engine_id: Option<String>,
}

impl TemplateContext {
    /// Resolves a placeholder name to its percent-encoded value.
    ///
    /// Credential keys resolve only when present and non-empty; everything
    /// else always resolves.
    fn lookup(&self, key: &str) -> Option<String> {
        let raw = match key {
            "query" => self.query.clone(),
            "limit" => self.limit.to_string(),
            "offset" => self.offset.to_string(),
            "page" => self.page.to_string(),
            "safe_search" => {
                if self.safe_search { "moderate" } else { "off" }.to_string()
            }
            "region" => self.region.clone(),
            "language" => self.language.clone(),
            "api_key" => self.api_key.clone().filter(|v| !v.is_empty())?,
            "search_engine_id" => {
                self.search_engine_id.clone().filter(|v| !v.is_empty())?
            }
            _ => return None,
        };
        Some(urlencoding::encode(&raw).into_owned())
    }
}

/// Renders a template, substituting each `{name}` fragment per the policy.
///
/// A `{` without a closing `}` is treated as literal text.
pub fn render(
    template: &str,
    ctx: &TemplateContext,
    policy: MissingKeyPolicy,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                match ctx.lookup(name) {
                    Some(value) => out.push_str(&value),
                    None => match policy {
                        MissingKeyPolicy::PassThrough => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                        MissingKeyPolicy::Fail => {
                            return Err(TemplateError::MissingKey(name.to_string()))
                        }
                    },
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}
