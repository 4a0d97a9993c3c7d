//! Localizable message templates for conform errors.
//!
//! Errors store only a message key and positional arguments; rendering is
//! deferred until a message is actually requested. A process-wide
//! translator, injected via [`install`], maps `(locale, key)` pairs to
//! templates with positional `{0}`, `{1}`, … placeholders. A built-in
//! English table backs the default locale; when no template is found at
//! all, the key name and argument list are rendered directly.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// The locale used by [`crate::ConformError::message`].
pub const DEFAULT_LOCALE: &str = "en";

/// A source of message templates.
///
/// Implementations are read-only after construction; the engine never
/// reads translation files itself — a loaded translator is handed in
/// via [`install`].
pub trait Translate: Send + Sync {
    /// Returns the template for `(locale, key)`, or None if this source
    /// has no entry for the pair.
    fn template(&self, locale: &str, key: &str) -> Option<String>;
}

/// An in-memory `locale -> key -> template` table.
///
/// # Example
///
/// ```rust
/// use conformal::i18n::{Catalog, Translate};
///
/// let catalog = Catalog::new()
///     .insert("de", "type_error", "{0} erwartet, {1} erhalten");
///
/// assert!(catalog.template("de", "type_error").is_some());
/// assert!(catalog.template("fr", "type_error").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template for `(locale, key)`, replacing any existing entry.
    pub fn insert(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), template.into());
        self
    }
}

impl Translate for Catalog {
    fn template(&self, locale: &str, key: &str) -> Option<String> {
        self.locales.get(locale)?.get(key).cloned()
    }
}

static TRANSLATOR: RwLock<Option<Arc<dyn Translate>>> = RwLock::new(None);

/// Installs a process-wide translator.
///
/// The swap is atomic; conforms running on other threads observe either
/// the previous translator or the new one, never a mixture. Installing
/// after first use is permitted.
pub fn install(translator: Arc<dyn Translate>) {
    *TRANSLATOR.write() = Some(translator);
}

/// Removes the installed translator, restoring built-in behavior.
pub fn uninstall() {
    *TRANSLATOR.write() = None;
}

/// Renders the message for `(locale, key, args)`.
///
/// Lookup order: the installed translator, then the built-in English
/// table (for the `en` locale), then the key-name fallback.
pub(crate) fn render(locale: &str, key: &str, args: &[String]) -> String {
    let installed = TRANSLATOR.read().as_ref().and_then(|t| t.template(locale, key));
    let template = installed.or_else(|| {
        if locale == DEFAULT_LOCALE {
            builtin_en(key).map(str::to_string)
        } else {
            None
        }
    });

    match template {
        Some(tpl) => substitute(&tpl, args),
        None if args.is_empty() => key.to_string(),
        None => format!("{}: {}", key, args.join(", ")),
    }
}

/// Substitutes positional `{n}` placeholders.
fn substitute(template: &str, args: &[String]) -> String {
    let mut rendered = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        rendered = rendered.replace(&format!("{{{}}}", i), arg);
    }
    rendered
}

/// Built-in English templates for the core message-key taxonomy.
fn builtin_en(key: &str) -> Option<&'static str> {
    Some(match key {
        "type_error" => "expected {0}, got {1}",
        "coercion_error" => "cannot coerce {1} to {0}",
        "and_failed" => "did not pass '{0}'",
        "or_failed" => "no alternative of '{0}' matched",
        "each_failed" => "{0} element(s) did not conform",
        "missing_key" => "required key '{0}' is missing",
        "unexpected_key" => "unexpected key '{0}'",
        "key_failed" => "value at '{0}' did not conform",
        "not_a_mapping" => "expected a mapping, got {0}",
        "not_a_sequence" => "expected a sequence, got {0}",
        "enum_failed" => "must be one of: {0}",
        "equal_failed" => "must equal {0}",
        "nil_failed" => "must be nil",
        "boolean_failed" => "must be a boolean",
        "empty_failed" => "must be empty",
        "non_empty_failed" => "must not be empty",
        "size_min" => "size must be at least {0}",
        "size_max" => "size must be at most {0}",
        "regex_failed" => "must match pattern '{0}'",
        "gt_failed" => "must be greater than {0}",
        "lt_failed" => "must be less than {0}",
        "gte_failed" => "must be greater than or equal to {0}",
        "lte_failed" => "must be less than or equal to {0}",
        "lambda_failed" => "did not conform to '{0}'",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_english_templates() {
        let msg = render("en", "type_error", &["string".into(), "integer".into()]);
        assert_eq!(msg, "expected string, got integer");
    }

    #[test]
    fn test_fallback_is_key_and_args() {
        let msg = render("en", "some_custom_key", &["a".into(), "b".into()]);
        assert_eq!(msg, "some_custom_key: a, b");

        let bare = render("en", "some_custom_key", &[]);
        assert_eq!(bare, "some_custom_key");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_key() {
        let msg = render("zz", "nil_failed", &[]);
        assert_eq!(msg, "nil_failed");
    }

    #[test]
    fn test_substitute_positional() {
        assert_eq!(
            substitute("a {0} b {1} c {0}", &["X".into(), "Y".into()]),
            "a X b Y c X"
        );
    }

    #[test]
    fn test_installed_catalog_wins() {
        // Use a private locale so this test cannot interfere with
        // default-locale rendering elsewhere in the suite.
        let catalog = Catalog::new().insert("x-test", "nil_failed", "muss nil sein");
        install(Arc::new(catalog));
        assert_eq!(render("x-test", "nil_failed", &[]), "muss nil sein");
        assert_eq!(render("en", "nil_failed", &[]), "must be nil");
    }
}
