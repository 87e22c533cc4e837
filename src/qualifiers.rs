//! Query qualifier compilation.
//!
//! [`Qualifiers`] is a sparse set of optional search modifiers compiled
//! into a single backend query string by [`compile`]. This is a textual
//! compiler, not a query-language parser: values are appended verbatim
//! with no escaping, and malformed values simply fail to match anything
//! downstream.

/// Optional query modifiers. Absent fields contribute nothing to the
/// compiled query.
#[derive(Debug, Clone, Default)]
pub struct Qualifiers {
    /// Restrict to a site, `site:value`.
    pub site: Option<String>,
    /// Restrict to a file type, `filetype:value`.
    pub filetype: Option<String>,
    /// Require a keyword in the URL, `inurl:value`.
    pub inurl: Option<String>,
    /// Require a keyword in the title, `intitle:value`.
    pub intitle: Option<String>,
    /// Require a keyword in the body, `intext:value`.
    pub intext: Option<String>,
    /// Require all keywords in the URL, `allinurl:value`.
    pub allinurl: Option<String>,
    /// Require all keywords in the title, `allintitle:value`.
    pub allintitle: Option<String>,
    /// Require all keywords in the body, `allintext:value`.
    pub allintext: Option<String>,
    /// Upper date bound, `before:YYYY-MM-DD`. Also drives post-filtering.
    pub before: Option<String>,
    /// Lower date bound, `after:YYYY-MM-DD`. Also drives post-filtering.
    pub after: Option<String>,
    /// Exact phrase; replaces the base query with the quoted phrase.
    pub exact_phrase: Option<String>,
    /// Excluded term, `-value`.
    pub exclude: Option<String>,
    /// Wrap the accumulated query in parentheses.
    pub group: bool,
    /// Alternative terms appended as ` OR terms` after grouping.
    pub or_terms: Option<String>,
}

impl Qualifiers {
    /// Whether any qualifier is set. The top-level flow runs a separate
    /// qualifier search only when this is true.
    pub fn is_empty(&self) -> bool {
        self.site.is_none()
            && self.filetype.is_none()
            && self.inurl.is_none()
            && self.intitle.is_none()
            && self.intext.is_none()
            && self.allinurl.is_none()
            && self.allintitle.is_none()
            && self.allintext.is_none()
            && self.before.is_none()
            && self.after.is_none()
            && self.exact_phrase.is_none()
            && self.exclude.is_none()
            && !self.group
            && self.or_terms.is_none()
    }
}

/// Compile a base query plus qualifiers into one backend query string.
///
/// An `exact_phrase` replaces the base query with the quoted phrase
/// rather than appending to it — exact-phrase searches are meant to
/// override the raw query. The remaining qualifiers are appended in a
/// fixed order, `group` wraps the accumulated query in parentheses, and
/// `or_terms` is appended last, outside the grouping.
///
/// Pure function: same inputs always produce the same string.
pub fn compile(base: &str, qualifiers: &Qualifiers) -> String {
    let mut query = match &qualifiers.exact_phrase {
        Some(phrase) => format!("\"{phrase}\""),
        None => base.to_owned(),
    };

    if let Some(exclude) = &qualifiers.exclude {
        query.push_str(&format!(" -{exclude}"));
    }
    if let Some(filetype) = &qualifiers.filetype {
        query.push_str(&format!(" filetype:{filetype}"));
    }
    if let Some(site) = &qualifiers.site {
        query.push_str(&format!(" site:{site}"));
    }
    if let Some(intitle) = &qualifiers.intitle {
        query.push_str(&format!(" intitle:{intitle}"));
    }
    if let Some(inurl) = &qualifiers.inurl {
        query.push_str(&format!(" inurl:{inurl}"));
    }
    if let Some(intext) = &qualifiers.intext {
        query.push_str(&format!(" intext:{intext}"));
    }
    if let Some(allintitle) = &qualifiers.allintitle {
        query.push_str(&format!(" allintitle:{allintitle}"));
    }
    if let Some(allinurl) = &qualifiers.allinurl {
        query.push_str(&format!(" allinurl:{allinurl}"));
    }
    if let Some(allintext) = &qualifiers.allintext {
        query.push_str(&format!(" allintext:{allintext}"));
    }
    if let Some(before) = &qualifiers.before {
        query.push_str(&format!(" before:{before}"));
    }
    if let Some(after) = &qualifiers.after {
        query.push_str(&format!(" after:{after}"));
    }

    if qualifiers.group {
        query = format!("({query})");
    }
    if let Some(or_terms) = &qualifiers.or_terms {
        query.push_str(&format!(" OR {or_terms}"));
    }

    query
}

/// Convenience for a site-only restriction, used by the category routing
/// table for partner-site searches.
pub fn site_only(site: &str) -> Qualifiers {
    Qualifiers {
        site: Some(site.to_owned()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_qualifiers_returns_base() {
        assert_eq!(compile("rust async", &Qualifiers::default()), "rust async");
    }

    #[test]
    fn empty_detects_absence() {
        assert!(Qualifiers::default().is_empty());
        assert!(!site_only("a.com").is_empty());
        let grouped = Qualifiers {
            group: true,
            ..Default::default()
        };
        assert!(!grouped.is_empty());
    }

    #[test]
    fn site_appended() {
        let compiled = compile("quantum computing", &site_only("a.com"));
        assert!(compiled.contains("site:a.com"));
        assert!(compiled.starts_with("quantum computing"));
    }

    #[test]
    fn exact_phrase_replaces_base_query() {
        let qualifiers = Qualifiers {
            exact_phrase: Some("deep learning".into()),
            ..Default::default()
        };
        let compiled = compile("machine learning", &qualifiers);
        assert_eq!(compiled, "\"deep learning\"");
        assert!(!compiled.contains("machine"));
    }

    #[test]
    fn exclude_prefixed_with_dash() {
        let qualifiers = Qualifiers {
            exclude: Some("neural".into()),
            ..Default::default()
        };
        assert_eq!(compile("ml", &qualifiers), "ml -neural");
    }

    #[test]
    fn qualifiers_applied_in_fixed_order() {
        let qualifiers = Qualifiers {
            site: Some("b.org".into()),
            filetype: Some("pdf".into()),
            exclude: Some("ads".into()),
            intitle: Some("intro".into()),
            before: Some("2024-01-01".into()),
            after: Some("2020-01-01".into()),
            ..Default::default()
        };
        let compiled = compile("q", &qualifiers);
        assert_eq!(
            compiled,
            "q -ads filetype:pdf site:b.org intitle:intro before:2024-01-01 after:2020-01-01"
        );
    }

    #[test]
    fn all_variants_appended_as_tokens() {
        let qualifiers = Qualifiers {
            allintitle: Some("rust guide".into()),
            allinurl: Some("docs api".into()),
            allintext: Some("borrow checker".into()),
            ..Default::default()
        };
        let compiled = compile("q", &qualifiers);
        assert!(compiled.contains("allintitle:rust guide"));
        assert!(compiled.contains("allinurl:docs api"));
        assert!(compiled.contains("allintext:borrow checker"));
    }

    #[test]
    fn group_wraps_everything_before_it() {
        let qualifiers = Qualifiers {
            site: Some("a.com".into()),
            filetype: Some("pdf".into()),
            group: true,
            ..Default::default()
        };
        let compiled = compile("q", &qualifiers);
        assert_eq!(compiled, "(q filetype:pdf site:a.com)");
        assert!(compiled.starts_with('('));
        assert!(compiled.ends_with(')'));
    }

    #[test]
    fn or_terms_appended_outside_grouping() {
        let qualifiers = Qualifiers {
            site: Some("a.com".into()),
            group: true,
            or_terms: Some("wasm".into()),
            ..Default::default()
        };
        assert_eq!(compile("rust", &qualifiers), "(rust site:a.com) OR wasm");
    }

    #[test]
    fn no_escaping_of_special_characters() {
        let qualifiers = Qualifiers {
            site: Some("a.com/path?x=1".into()),
            ..Default::default()
        };
        assert!(compile("q", &qualifiers).contains("site:a.com/path?x=1"));
    }

    #[test]
    fn compile_is_deterministic() {
        let qualifiers = Qualifiers {
            site: Some("a.com".into()),
            exclude: Some("spam".into()),
            group: true,
            ..Default::default()
        };
        assert_eq!(compile("q", &qualifiers), compile("q", &qualifiers));
    }
}
