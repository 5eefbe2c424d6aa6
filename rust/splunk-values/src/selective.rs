//! Selective field projection.
//!
//! A field tagged `#[selective("create")]` only belongs to the `create` view;
//! untagged fields belong to every view. Projecting a struct for a view
//! yields a [`Projection`] that the encoder walks like the struct itself, minus
//! the fields outside the view.

use tracing::debug;

use crate::{Field, Fields, Kind, Value, ValuesError, tag::selects};

/// A struct reduced to the fields of one view.
pub enum Projection<'a> {
    /// The struct declares no selection tags; every field passes through,
    /// private ones included.
    Whole(&'a dyn Fields),
    /// The exported fields that belong to the view.
    Reduced {
        /// The projected struct's name.
        type_name: &'static str,
        /// Kept fields in declaration order.
        fields: Vec<ProjectedField<'a>>,
    },
}

/// One kept field of a [`Projection::Reduced`].
pub struct ProjectedField<'a> {
    /// The original field.
    pub field: Field<'a>,
    /// The field's own projection, when it holds a struct that was reduced.
    pub nested: Option<Projection<'a>>,
}

impl std::fmt::Debug for Projection<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Projection::Whole(fields) => f.debug_tuple("Whole").field(&fields.type_name()).finish(),
            Projection::Reduced { type_name, fields } => f
                .debug_struct("Reduced")
                .field("type_name", type_name)
                .field(
                    "fields",
                    &fields.iter().map(|kept| kept.field.name).collect::<Vec<_>>(),
                )
                .finish(),
        }
    }
}

/// Reduce `fields` to the view named `tag`.
pub fn project<'a>(fields: &'a dyn Fields, tag: &str) -> Projection<'a> {
    let table = fields.fields();

    if table.iter().all(|field| field.selective.is_none()) {
        return Projection::Whole(fields);
    }

    let kept: Vec<ProjectedField<'a>> = table
        .into_iter()
        .filter(|field| field.exported)
        .filter(|field| field.selective.is_none_or(|list| selects(list, tag)))
        .map(|field| {
            let nested = match field.value.kind() {
                Kind::Struct(inner) => match project(inner, tag) {
                    Projection::Whole(_) => None,
                    reduced => Some(reduced),
                },
                _ => None,
            };
            ProjectedField { field, nested }
        })
        .collect();

    debug!(
        type_name = fields.type_name(),
        view = tag,
        kept = kept.len(),
        "Projected fields"
    );

    Projection::Reduced {
        type_name: fields.type_name(),
        fields: kept,
    }
}

/// Reduce a struct-valued `value` to the view named `tag`.
///
/// Fails with [`ValuesError::InvalidInput`] when `value` is not a struct.
pub fn project_value<'a>(value: &'a dyn Value, tag: &str) -> Result<Projection<'a>, ValuesError> {
    match value.kind() {
        Kind::Struct(fields) => Ok(project(fields, tag)),
        _ => Err(ValuesError::InvalidInput(format!(
            "only structs can be projected for the '{tag}' view"
        ))),
    }
}

impl Fields for Projection<'_> {
    fn type_name(&self) -> &'static str {
        match self {
            Projection::Whole(fields) => fields.type_name(),
            Projection::Reduced { type_name, .. } => *type_name,
        }
    }

    fn fields(&self) -> Vec<Field<'_>> {
        match self {
            Projection::Whole(fields) => fields.fields(),
            Projection::Reduced { fields, .. } => fields
                .iter()
                .map(|kept| match &kept.nested {
                    Some(nested) => Field {
                        value: nested,
                        ..kept.field
                    },
                    None => kept.field,
                })
                .collect(),
        }
    }
}

impl Value for Projection<'_> {
    fn kind(&self) -> Kind<'_> {
        Kind::Struct(self)
    }

    fn is_empty(&self) -> bool {
        self.fields().iter().all(|field| field.value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Explicit, Values, encode};
    use pretty_assertions::assert_eq;

    fn names(projection: &Projection<'_>) -> Vec<&'static str> {
        projection.fields().iter().map(|field| field.name).collect()
    }

    #[derive(Values, Default)]
    struct Sample {
        #[selective("x")]
        pub a: String,
        #[selective("y")]
        pub b: String,
        pub c: String,
    }

    #[test]
    fn it_keeps_untagged_and_matching_fields() {
        let sample = Sample::default();

        assert_eq!(names(&project(&sample, "x")), vec!["a", "c"]);
        assert_eq!(names(&project(&sample, "y")), vec!["b", "c"]);
        assert_eq!(names(&project(&sample, "z")), vec!["c"]);
    }

    #[derive(Values, Default)]
    struct Plain {
        pub name: String,
        cache: u32,
    }

    #[test]
    fn it_passes_untagged_structs_through_whole() {
        let plain = Plain::default();
        let projection = project(&plain, "create");

        assert!(matches!(projection, Projection::Whole(_)));
        assert_eq!(names(&projection), vec!["name", "cache"]);
    }

    #[derive(Values, Default)]
    struct Mixed {
        #[selective("create")]
        pub name: String,
        pub description: String,
        internal: String,
    }

    #[test]
    fn it_drops_private_fields_when_reduced() {
        let mixed = Mixed::default();
        assert_eq!(names(&project(&mixed, "create")), vec!["name", "description"]);
    }

    #[derive(Values, Default)]
    struct Listed {
        #[selective("create, update")]
        pub both: String,
        #[selective("created")]
        pub near_miss: String,
        #[selective("")]
        pub nowhere: String,
    }

    #[test]
    fn it_matches_views_exactly() {
        let listed = Listed::default();
        assert_eq!(names(&project(&listed, "update")), vec!["both"]);
        assert_eq!(names(&project(&listed, "create")), vec!["both"]);
    }

    #[derive(Values, Default)]
    struct Dispatch {
        #[selective("create")]
        pub ttl: Explicit<i64>,
        pub earliest_time: Explicit<String>,
    }

    #[derive(Values, Default)]
    struct Search {
        #[values("name")]
        #[selective("create")]
        pub title: String,
        pub search: String,
        pub dispatch: Dispatch,
        pub description: Option<Plain>,
    }

    #[test]
    fn it_projects_nested_structs() -> anyhow::Result<()> {
        let search = Search {
            title: "errors".into(),
            search: "index=main error".into(),
            dispatch: Dispatch {
                ttl: Explicit::new(600),
                earliest_time: Explicit::new("-1h".into()),
            },
            description: Some(Plain {
                name: "kept whole".into(),
                cache: 1,
            }),
        };

        let update = encode(&project(&search, "update"))?;
        assert_eq!(
            update.pairs().collect::<Vec<_>>(),
            vec![
                ("search", "index=main error"),
                ("dispatch.earliest_time", "-1h"),
                ("description.name", "kept whole"),
            ]
        );

        let create = encode(&project(&search, "create"))?;
        assert_eq!(
            create.pairs().collect::<Vec<_>>(),
            vec![
                ("name", "errors"),
                ("search", "index=main error"),
                ("dispatch.ttl", "600"),
                ("dispatch.earliest_time", "-1h"),
                ("description.name", "kept whole"),
            ]
        );
        Ok(())
    }

    #[test]
    fn it_rejects_projecting_non_structs() {
        let value = "plain".to_string();
        assert!(matches!(
            project_value(&value, "create"),
            Err(ValuesError::InvalidInput(_))
        ));
        assert!(project_value(&Sample::default(), "x").is_ok());
    }
}
