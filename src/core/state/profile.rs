use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{AnalyzerError, AnalyzerResult};

/// Template key bound to the profile directory.
pub const PROFILE_PUBLIC_PATH: &str = "PROFILE_PUBLIC_PATH";

// `$$`, `$name`, `${name}`, or a stray `$`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:(\$)|([_A-Za-z][_A-Za-z0-9]*)|\{([_A-Za-z][_A-Za-z0-9]*)\}|)")
        .expect("placeholder pattern is valid")
});

/// A named entry of `analyzer.json` pointing at an instance descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    /// File path or URL, may contain `$PROFILE_PUBLIC_PATH`.
    pub location: String,
}

impl Profile {
    pub fn resolve_location(&self, profile_dir: &Path) -> AnalyzerResult<String> {
        let vars = HashMap::from([(
            PROFILE_PUBLIC_PATH,
            profile_dir.to_string_lossy().into_owned(),
        )]);
        substitute(&self.location, &vars)
    }
}

/// Shell-style `$name` / `${name}` substitution. `$$` yields a literal `$`;
/// unknown keys and dangling `$` are errors.
pub fn substitute(template: &str, vars: &HashMap<&str, String>) -> AnalyzerResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        if caps.get(1).is_some() {
            out.push('$');
            continue;
        }

        let key = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str());
        match key.and_then(|k| vars.get(k)) {
            Some(value) => out.push_str(value),
            None => {
                return Err(AnalyzerError::Template {
                    template: template.to_string(),
                    key: key.unwrap_or("$").to_string(),
                })
            }
        }
    }

    out.push_str(&template[last..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> HashMap<&'static str, String> {
        HashMap::from([(PROFILE_PUBLIC_PATH, "/srv/profile".to_string())])
    }

    #[test]
    fn substitutes_both_placeholder_forms() {
        assert_eq!(
            substitute("$PROFILE_PUBLIC_PATH/a.json", &vars()).unwrap(),
            "/srv/profile/a.json"
        );
        assert_eq!(
            substitute("${PROFILE_PUBLIC_PATH}a.json", &vars()).unwrap(),
            "/srv/profilea.json"
        );
    }

    #[test]
    fn dollar_escape_and_plain_text_pass_through() {
        assert_eq!(substitute("cost $$5", &vars()).unwrap(), "cost $5");
        assert_eq!(
            substitute("https://example.com/pack.json", &vars()).unwrap(),
            "https://example.com/pack.json"
        );
    }

    #[test]
    fn unknown_key_and_dangling_dollar_fail() {
        match substitute("$HOME/pack.json", &vars()) {
            Err(AnalyzerError::Template { key, .. }) => assert_eq!(key, "HOME"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(substitute("pack$", &vars()).is_err());
    }

    #[test]
    fn profile_binds_its_directory() {
        let profile = Profile {
            name: "Default".into(),
            location: "${PROFILE_PUBLIC_PATH}/pack.json".into(),
        };

        let resolved = profile.resolve_location(Path::new("/data/profile")).unwrap();

        assert_eq!(resolved, "/data/profile/pack.json");
    }
}
