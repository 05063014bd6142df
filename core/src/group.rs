//! Partitioning of options into subcommand groups.

use crate::OptionDeclaration;
use crate::error::ParseError;
use crate::index::OptionEntry;

/// Options partitioned by group, in order of first appearance.
///
/// Each group's option list keeps declaration order and ends with the
/// injected help entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupIndex {
    groups: Vec<(String, Vec<OptionEntry>)>,
}

impl GroupIndex {
    /// Partitions resolved entries by their group tag.
    ///
    /// Entries without a group tag are skipped; callers check consistency
    /// with [`check_grouping`] first.
    pub fn build(entries: &[OptionEntry]) -> Self {
        let mut groups: Vec<(String, Vec<OptionEntry>)> = Vec::new();

        for entry in entries {
            let Some(group) = entry.declaration.group() else {
                continue;
            };
            match groups.iter().position(|(name, _)| name == group) {
                Some(i) => groups[i].1.push(entry.clone()),
                None => groups.push((group.to_string(), vec![entry.clone()])),
            }
        }

        for (_, members) in &mut groups {
            members.push(OptionEntry::help());
        }

        Self { groups }
    }

    /// Returns the options of `group`, help included.
    pub fn get(&self, group: &str) -> Option<&[OptionEntry]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, members)| members.as_slice())
    }

    /// Like [`get`](Self::get), also returning the stored group name.
    pub fn get_key_value(&self, group: &str) -> Option<(&str, &[OptionEntry])> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn contains(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    /// Group names in order of first appearance.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Checks that either no declaration or every declaration has a group tag.
///
/// Returns whether the options are grouped.
///
/// # Errors
///
/// Returns [`ParseError::InconsistentGrouping`] naming the first declaration
/// that disagrees with the first one.
pub fn check_grouping(options: &[OptionDeclaration]) -> Result<bool, ParseError> {
    let Some(first) = options.first() else {
        return Ok(false);
    };
    let grouped = first.group().is_some();

    match options.iter().find(|o| o.group().is_some() != grouped) {
        Some(odd) => {
            let option = if grouped { odd } else { first };
            Err(ParseError::InconsistentGrouping {
                option: option.canonical_name().to_string(),
            })
        }
        None => Ok(grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(short: &str, group: &str) -> OptionEntry {
        OptionEntry::resolve(&OptionDeclaration::new(Some(short), None, "bool").in_group(group))
            .unwrap()
    }

    #[test]
    fn test_build_keeps_first_appearance_order() {
        let entries = vec![
            entry("a", "general"),
            entry("s", "special"),
            entry("b", "general"),
        ];
        let index = GroupIndex::build(&entries);

        assert_eq!(index.names().collect::<Vec<_>>(), vec!["general", "special"]);

        let general = index.get("general").unwrap();
        let names: Vec<&str> = general.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["a", "b", "help"]);
        assert!(general.last().unwrap().is_help());
        assert_eq!(index.get("special").unwrap().len(), 2);
        assert!(index.get("other").is_none());
    }

    #[test]
    fn test_check_grouping_all_or_none() {
        let none = vec![
            OptionDeclaration::new(Some("a"), None, "bool"),
            OptionDeclaration::new(Some("b"), None, "bool"),
        ];
        assert_eq!(check_grouping(&none), Ok(false));

        let all = vec![
            OptionDeclaration::new(Some("a"), None, "bool").in_group("x"),
            OptionDeclaration::new(Some("b"), None, "bool").in_group("y"),
        ];
        assert_eq!(check_grouping(&all), Ok(true));

        assert_eq!(check_grouping(&[]), Ok(false));
    }

    #[test]
    fn test_check_grouping_names_ungrouped_option() {
        let mixed = vec![
            OptionDeclaration::new(Some("a"), None, "bool").in_group("x"),
            OptionDeclaration::new(Some("b"), None, "bool"),
        ];
        assert_eq!(
            check_grouping(&mixed),
            Err(ParseError::InconsistentGrouping { option: "b".into() })
        );

        let mixed = vec![
            OptionDeclaration::new(Some("a"), None, "bool"),
            OptionDeclaration::new(Some("b"), None, "bool").in_group("x"),
        ];
        assert_eq!(
            check_grouping(&mixed),
            Err(ParseError::InconsistentGrouping { option: "a".into() })
        );
    }

    #[test]
    fn test_empty_group_tag_counts_as_missing() {
        let mixed = vec![
            OptionDeclaration::new(Some("a"), None, "bool").in_group("x"),
            OptionDeclaration::new(Some("b"), None, "bool").in_group(""),
        ];
        assert!(check_grouping(&mixed).is_err());
    }
}
