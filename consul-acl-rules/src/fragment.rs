//! Rule fragments: the composition model behind every role's rule text.
//!
//! Composers build a small tree of [`RuleFragment`]s and flatten it to text.
//! Sibling fragments are separated by exactly one newline and a wrapped
//! fragment renders as `header`, inner fragments, then a closing `}` line.

use std::borrow::Cow;
use std::fmt;

use crate::config::Configuration;
use crate::error::TemplateError;
use crate::template::substitute;

/// Namespace scoping applied to a group of rule blocks.
///
/// The name may contain `${Name}` placeholders, resolved at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// `namespace_prefix "<name>" { ... }`
    NamespacePrefix(Cow<'static, str>),
    /// `namespace "<name>" { ... }`
    Namespace(Cow<'static, str>),
}

impl Scope {
    /// Scope covering every namespace.
    pub const fn all_namespaces() -> Self {
        Self::NamespacePrefix(Cow::Borrowed(""))
    }

    fn keyword(&self) -> &'static str {
        match self {
            Self::NamespacePrefix(_) => "namespace_prefix",
            Self::Namespace(_) => "namespace",
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::NamespacePrefix(name) | Self::Namespace(name) => name,
        }
    }

    fn header(&self, config: &Configuration) -> Result<String, TemplateError> {
        let name = substitute(self.name(), config)?;
        Ok(format!("{} \"{}\" {{", self.keyword(), name))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.keyword(), self.name())
    }
}

/// A piece of rule text, either raw lines or a group nested in a [`Scope`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleFragment {
    /// Raw rule lines, possibly spanning several lines. An empty leaf renders
    /// as an empty line once joined with its siblings.
    Leaf(Cow<'static, str>),
    /// Inner fragments enclosed in a namespace block.
    Wrapped(Scope, Vec<RuleFragment>),
}

impl RuleFragment {
    pub const fn leaf(text: &'static str) -> Self {
        Self::Leaf(Cow::Borrowed(text))
    }

    /// Render this fragment, substituting configuration values into
    /// placeholders.
    pub fn render(&self, config: &Configuration) -> Result<String, TemplateError> {
        match self {
            Self::Leaf(text) => Ok(substitute(text, config)?.into_owned()),
            Self::Wrapped(scope, inner) => Ok(format!(
                "{}\n{}\n}}",
                scope.header(config)?,
                render_fragments(inner, config)?
            )),
        }
    }
}

/// Flatten a fragment sequence to text, one newline between siblings.
pub fn render_fragments(
    fragments: &[RuleFragment],
    config: &Configuration,
) -> Result<String, TemplateError> {
    let rendered = fragments
        .iter()
        .map(|fragment| fragment.render(config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join("\n"))
}

/// Nest `inner` inside `scope` when `condition` holds, otherwise keep it flat.
pub fn wrap_if(condition: bool, scope: Scope, inner: Vec<RuleFragment>) -> Vec<RuleFragment> {
    if condition {
        vec![RuleFragment::Wrapped(scope, inner)]
    } else {
        inner
    }
}

/// Strip exactly one leading and one trailing newline from a raw skeleton
/// literal. Indentation and any further blank lines are preserved.
pub fn skeleton(raw: &'static str) -> &'static str {
    let raw = raw.strip_prefix('\n').unwrap_or(raw);
    raw.strip_suffix('\n').unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_trims_one_newline_each_side() {
        assert_eq!(skeleton("\n  a\n"), "  a");
        assert_eq!(skeleton("\n\n  a\n\n"), "\n  a\n");
        assert_eq!(skeleton("a"), "a");
        assert_eq!(skeleton(""), "");
        assert_eq!(skeleton("\n"), "");
    }

    #[test]
    fn test_leaf_renders_verbatim() {
        let out = RuleFragment::leaf("  node_prefix \"\" {\n  }")
            .render(&Configuration::default())
            .expect("should render");
        assert_eq!(out, "  node_prefix \"\" {\n  }");
    }

    #[test]
    fn test_wrapped_renders_header_and_closing_brace() {
        let fragment = RuleFragment::Wrapped(
            Scope::Namespace(Cow::Borrowed("${SyncNamespace}")),
            vec![RuleFragment::leaf("  a"), RuleFragment::leaf("  b")],
        );
        let config = Configuration::default().with_sync_namespace("team-a");
        assert_eq!(
            fragment.render(&config).expect("should render"),
            "namespace \"team-a\" {\n  a\n  b\n}"
        );
    }

    #[test]
    fn test_empty_leaf_yields_leading_blank_line() {
        let out = render_fragments(
            &[RuleFragment::leaf(""), RuleFragment::leaf("x")],
            &Configuration::default(),
        )
        .expect("should render");
        assert_eq!(out, "\nx");
    }

    #[test]
    fn test_wrap_if() {
        let inner = vec![RuleFragment::leaf("x")];
        assert_eq!(wrap_if(false, Scope::all_namespaces(), inner.clone()), inner);
        assert_eq!(
            wrap_if(true, Scope::all_namespaces(), inner.clone()),
            vec![RuleFragment::Wrapped(Scope::all_namespaces(), inner)]
        );
    }

    #[test]
    fn test_scope_header_propagates_template_errors() {
        let fragment = RuleFragment::Wrapped(
            Scope::NamespacePrefix(Cow::Borrowed("${Missing}")),
            vec![],
        );
        assert_eq!(
            fragment.render(&Configuration::default()),
            Err(TemplateError::UnknownPlaceholder("Missing".to_string()))
        );
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(Scope::all_namespaces().to_string(), "namespace_prefix \"\"");
        assert_eq!(
            Scope::Namespace(Cow::Borrowed("${SyncNamespace}")).to_string(),
            "namespace \"${SyncNamespace}\""
        );
    }
}
