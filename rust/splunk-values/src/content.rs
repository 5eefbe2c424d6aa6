use crate::{Field, FieldConfig, Fields, ValuesError};

/// Find the field of `fields` marked with the `content` tag option.
///
/// An entry keeps its writable attributes in one content field; updates send
/// only that field. Exactly one exported field must carry the option: none is
/// [`ValuesError::InvalidInput`], several are
/// [`ValuesError::AmbiguousContentSelection`].
pub fn content_of(fields: &dyn Fields) -> Result<Field<'_>, ValuesError> {
    let mut found = Vec::new();

    for field in fields.fields() {
        if !field.exported {
            continue;
        }
        if FieldConfig::parse(field.name, field.tag)?.content {
            found.push(field);
        }
    }

    match found.len() {
        0 => Err(ValuesError::InvalidInput(format!(
            "'{}' has no field marked as content",
            fields.type_name()
        ))),
        1 => Ok(found.remove(0)),
        _ => Err(ValuesError::AmbiguousContentSelection {
            type_name: fields.type_name(),
            fields: found.iter().map(|field| field.name.to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Explicit, Kind, Value, Values};
    use pretty_assertions::assert_eq;

    #[derive(Values, Default)]
    struct RoleContent {
        pub imported_roles: Vec<String>,
    }

    #[derive(Values, Default)]
    struct Role {
        #[values("name")]
        pub title: String,
        #[values(",anonymize,content")]
        pub content: RoleContent,
    }

    #[test]
    fn it_finds_the_content_field() -> anyhow::Result<()> {
        let role = Role::default();
        let field = content_of(&role)?;

        assert_eq!(field.name, "content");
        assert!(matches!(field.value.kind(), Kind::Struct(_)));
        Ok(())
    }

    #[derive(Values, Default)]
    struct Bare {
        pub name: String,
    }

    #[test]
    fn it_requires_a_content_field() {
        assert!(matches!(
            content_of(&Bare::default()),
            Err(ValuesError::InvalidInput(_))
        ));
    }

    #[derive(Values, Default)]
    struct Twice {
        #[values(",content")]
        pub first: Explicit<String>,
        #[values("second,content")]
        pub second: Explicit<String>,
    }

    #[test]
    fn it_rejects_ambiguous_content() {
        assert_eq!(
            content_of(&Twice::default()).unwrap_err(),
            ValuesError::AmbiguousContentSelection {
                type_name: "Twice",
                fields: vec!["first".into(), "second".into()],
            }
        );
    }
}
