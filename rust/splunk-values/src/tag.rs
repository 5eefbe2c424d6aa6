//! Field tag parsing.
//!
//! A field's `#[values("...")]` tag is a comma-separated list whose first
//! item is the key name and whose remaining items are options:
//!
//! | Tag | Effect |
//! |-----|--------|
//! | `"name"` | encode under `name` instead of the field name |
//! | `",omitempty"` | keep the field name, skip the field when empty |
//! | `"-"` | never encode the field |
//! | `"-,"` | encode under the literal key `-` |
//! | `",anonymize"` | encode the field's members at the parent's level |
//! | `",content"` | mark the field as the entry's content |
//!
//! `omitzero` is accepted as a synonym of `omitempty`.

use crate::ValuesError;

/// Encoding options of one struct field, parsed from its tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldConfig {
    /// The key segment of the field.
    pub name: String,
    /// Skip the field when its value is empty.
    pub omit_empty: bool,
    /// Never encode the field.
    pub omit_always: bool,
    /// Encode the field's members under the parent key.
    pub anonymize: bool,
    /// The field holds the entry's content.
    pub content: bool,
}

impl FieldConfig {
    /// Parse the tag of `field`; a missing tag yields the defaults.
    pub fn parse(field: &str, tag: Option<&str>) -> Result<Self, ValuesError> {
        let mut config = FieldConfig {
            name: field.to_string(),
            ..Default::default()
        };

        let Some(tag) = tag else {
            return Ok(config);
        };

        if tag == "-" {
            config.omit_always = true;
            return Ok(config);
        }

        let mut parts = tag.split(',');

        if let Some(name) = parts.next().filter(|name| !name.is_empty()) {
            config.name = name.to_string();
        }

        for option in parts {
            match option.trim() {
                "" => {}
                "omitempty" | "omitzero" => config.omit_empty = true,
                "anonymize" => config.anonymize = true,
                "content" => config.content = true,
                unknown => {
                    return Err(ValuesError::MalformedTagConfiguration {
                        field: field.to_string(),
                        tag: tag.to_string(),
                        option: unknown.to_string(),
                    });
                }
            }
        }

        Ok(config)
    }
}

/// Whether a `#[selective("...")]` list names `view`.
///
/// Views are trimmed before the exact comparison.
pub(crate) fn selects(list: &str, view: &str) -> bool {
    list.split(',').map(str::trim).any(|item| item == view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn it_defaults_to_the_field_name() -> anyhow::Result<()> {
        let config = FieldConfig::parse("search", None)?;
        assert_eq!(config.name, "search");
        assert!(!config.omit_empty && !config.omit_always && !config.anonymize);
        Ok(())
    }

    #[test]
    fn it_parses_name_and_options() -> anyhow::Result<()> {
        let config = FieldConfig::parse("real_name", Some("realname,omitempty"))?;
        assert_eq!(
            config,
            FieldConfig {
                name: "realname".into(),
                omit_empty: true,
                ..Default::default()
            }
        );

        let config = FieldConfig::parse("content", Some(",anonymize,content"))?;
        assert_eq!(config.name, "content");
        assert!(config.anonymize && config.content);

        let config = FieldConfig::parse("quota", Some(",omitzero"))?;
        assert!(config.omit_empty);
        Ok(())
    }

    #[test]
    fn it_parses_omit_always() -> anyhow::Result<()> {
        assert!(FieldConfig::parse("namespace", Some("-"))?.omit_always);

        let dash = FieldConfig::parse("dash", Some("-,"))?;
        assert!(!dash.omit_always);
        assert_eq!(dash.name, "-");
        Ok(())
    }

    #[test]
    fn it_rejects_unknown_options_with_context() {
        let error = FieldConfig::parse("search", Some("search,omitempy")).unwrap_err();
        assert_eq!(
            error,
            ValuesError::MalformedTagConfiguration {
                field: "search".into(),
                tag: "search,omitempy".into(),
                option: "omitempy".into(),
            }
        );
        assert!(error.to_string().contains("search,omitempy"));
    }

    #[test]
    fn it_matches_views_exactly() {
        assert!(selects("create,update", "update"));
        assert!(selects("create, update", "update"));
        assert!(!selects("created", "create"));
        assert!(!selects("", "create"));
    }
}
