//! Joins committers and commit descriptions into single spoken strings.

use serde::{Deserialize, Serialize};

const USER_DELIMITER: &str = ", ";
const COMMENT_DELIMITER: &str = ". ";

/// A VCS change contained in a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modification {
    pub user_name: String,
    pub description: String,
}

impl Modification {
    pub fn new(user_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            description: description.into(),
        }
    }
}

/// Who to name for a build.
///
/// A user who triggered the build by hand wins outright. Otherwise the
/// distinct committer names are used, and if there are none, the authors of
/// the contained modifications.
pub fn join_user_names(
    triggered_by: Option<&str>,
    committers: &[String],
    modifications: &[Modification],
) -> String {
    if let Some(user) = triggered_by.filter(|u| !u.is_empty()) {
        return user.to_string();
    }

    let mut names: Vec<&str> = Vec::new();
    for name in committers.iter().map(String::as_str).filter(|n| !n.is_empty()) {
        if !names.contains(&name) {
            names.push(name);
        }
    }

    if names.is_empty() {
        names = modifications
            .iter()
            .map(|m| m.user_name.as_str())
            .filter(|n| !n.is_empty())
            .collect();
    }

    names.join(USER_DELIMITER)
}

pub fn join_comments(modifications: &[Modification]) -> String {
    modifications
        .iter()
        .map(|m| m.description.as_str())
        .filter(|d| !d.is_empty())
        .collect::<Vec<_>>()
        .join(COMMENT_DELIMITER)
}

/// Test names affected by a test responsibility change.
pub fn join_test_names(names: &[String]) -> String {
    names
        .iter()
        .map(String::as_str)
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(join_user_names(None, &[], &[]), "");
        assert_eq!(join_comments(&[]), "");
        assert_eq!(join_test_names(&[]), "");
    }

    #[test]
    fn test_committers_joined() {
        assert_eq!(join_user_names(None, &names(&["A", "B", "C"]), &[]), "A, B, C");
    }

    #[test]
    fn test_committers_distinct_and_non_empty() {
        let committers = names(&["", "Ann", "Bob", "Ann", ""]);
        assert_eq!(join_user_names(None, &committers, &[]), "Ann, Bob");
    }

    #[test]
    fn test_triggering_user_short_circuits() {
        let mods = vec![Modification::new("ann", "x")];
        assert_eq!(
            join_user_names(Some("Carol"), &names(&["Ann"]), &mods),
            "Carol"
        );
    }

    #[test]
    fn test_empty_triggering_user_ignored() {
        assert_eq!(join_user_names(Some(""), &names(&["Ann"]), &[]), "Ann");
    }

    #[test]
    fn test_falls_back_to_modification_authors() {
        let mods = vec![
            Modification::new("ann", "one"),
            Modification::new("", "two"),
            Modification::new("bob", "three"),
        ];
        assert_eq!(join_user_names(None, &names(&["", ""]), &mods), "ann, bob");
    }

    #[test]
    fn test_comments_skip_empty() {
        let mods = vec![
            Modification::new("ann", ""),
            Modification::new("ann", "Fix parser"),
            Modification::new("bob", "Add tests"),
        ];
        assert_eq!(join_comments(&mods), "Fix parser. Add tests");
    }

    #[test]
    fn test_single_comment_has_no_delimiter() {
        assert_eq!(join_comments(&[Modification::new("a", "Only")]), "Only");
    }

    #[test]
    fn test_test_names() {
        assert_eq!(
            join_test_names(&names(&["ParserTest", "", "LexerTest"])),
            "ParserTest LexerTest"
        );
    }
}
