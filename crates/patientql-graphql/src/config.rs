//! `[graphql]` section of `patientql.toml`.
//!
//! ```toml
//! [graphql]
//! graphiql = true
//! pretty = true
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! Missing keys take their defaults.

use serde::{Deserialize, Serialize};

use crate::SchemaBuilderConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Serve the explorer page on `GET /graphql` when no query is given.
    pub graphiql: bool,

    /// Indent JSON response bodies.
    pub pretty: bool,

    /// Deepest selection set a document may nest.
    pub max_depth: usize,

    /// Complexity budget per document; every field costs 1.
    pub max_complexity: usize,

    pub introspection: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            graphiql: true,
            pretty: true,
            max_depth: 15,
            max_complexity: 500,
            introspection: true,
        }
    }
}

impl GraphQLConfig {
    pub fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("max_depth", self.max_depth),
            ("max_complexity", self.max_complexity),
        ] {
            if value == 0 {
                return Err(format!("graphql.{key} must be > 0"));
            }
        }
        Ok(())
    }

    /// Limits handed to [`PatientSchemaBuilder`](crate::PatientSchemaBuilder).
    #[must_use]
    pub fn to_schema_builder_config(&self) -> SchemaBuilderConfig {
        SchemaBuilderConfig {
            max_depth: self.max_depth,
            max_complexity: self.max_complexity,
            introspection_enabled: self.introspection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limits_are_rejected() {
        assert!(GraphQLConfig::default().validate().is_ok());

        let no_depth = GraphQLConfig {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(
            no_depth.validate().unwrap_err(),
            "graphql.max_depth must be > 0"
        );

        let no_budget = GraphQLConfig {
            max_complexity: 0,
            ..Default::default()
        };
        assert!(no_budget.validate().unwrap_err().contains("max_complexity"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: GraphQLConfig = toml::from_str(
            r#"
            graphiql = false
            max_depth = 4
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            GraphQLConfig {
                graphiql: false,
                max_depth: 4,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_introspection_flag_reaches_schema_config() {
        let config = GraphQLConfig {
            introspection: false,
            ..Default::default()
        };
        let schema_config = config.to_schema_builder_config();
        assert_eq!(schema_config.max_complexity, 500);
        assert!(!schema_config.introspection_enabled);
    }
}
