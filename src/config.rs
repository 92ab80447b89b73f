// src/config.rs
use crate::api::types::Pagination;
use crate::assembler::RecordSchema;
use crate::constants::{
    API_KEY_ENV, DATABASE_ID_ENV, DEFAULT_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT_SECS,
    MAX_CONCURRENCY,
};
use crate::error::ConfigError;
use crate::model::{FilterPredicate, SortSpec};
use crate::query::DocumentQuery;
use crate::types::{ApiKey, DatabaseId, PageId};
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Only sync posts whose Status select equals this value (e.g. "Draft")
    #[arg(long)]
    pub status: Option<String>,

    /// Extra Notion filter as JSON, e.g. '{"property":"Tags","multi_select":{"contains":"rust"}}'
    #[arg(long)]
    pub filter: Option<String>,

    /// Notion sorts as JSON: one sort object or an array of them
    #[arg(long)]
    pub sort: Option<String>,

    /// Sync a single page by id instead of querying the database
    #[arg(long)]
    pub page: Option<String>,

    /// Write records to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Documents whose blocks are fetched at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Seconds before a Notion request is abandoned
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Read only the first page of each listing instead of following cursors
    #[arg(long, default_value_t = false)]
    pub single_page: bool,

    /// Put Gutenberg block classes on the generated markup
    #[arg(long, default_value_t = false)]
    pub gutenberg: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved sync configuration, validated and ready to drive a sync.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_key: ApiKey,
    pub database_id: DatabaseId,
    pub query: DocumentQuery,
    /// When set, only this page is synced.
    pub page: Option<PageId>,
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub pagination: Pagination,
    pub schema: RecordSchema,
    pub gutenberg_markup: bool,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl SyncConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, ConfigError> {
        Self::from_parts(
            cli,
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(DATABASE_ID_ENV).ok(),
        )
    }

    /// Resolves a configuration from CLI input and explicit credentials.
    ///
    /// Unset and blank credentials are both reported as missing.
    pub fn from_parts(
        cli: CommandLineInput,
        api_key: Option<String>,
        database_id: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = ApiKey::new(required(api_key, API_KEY_ENV)?)?;
        let database_id = DatabaseId::parse(&required(database_id, DATABASE_ID_ENV)?)?;

        let schema = RecordSchema::default();
        let query = build_query(&schema, &cli)?;
        let page = cli.page.as_deref().map(PageId::parse).transpose()?;

        if cli.concurrency == 0 || cli.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::Invalid {
                field: "concurrency",
                reason: format!("must be between 1 and {}", MAX_CONCURRENCY),
            });
        }
        if cli.timeout == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(SyncConfig {
            api_key,
            database_id,
            query,
            page,
            concurrency: cli.concurrency,
            request_timeout: Duration::from_secs(cli.timeout),
            pagination: if cli.single_page {
                Pagination::SinglePage
            } else {
                Pagination::FollowCursors
            },
            schema,
            gutenberg_markup: cli.gutenberg,
            output_file: cli.output.map(PathBuf::from),
            verbose: cli.verbose,
        })
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, ConfigError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(format!(
            "{} environment variable not set",
            name
        ))),
    }
}

/// The caller's query: `--status` and `--filter` are and-ed together.
///
/// An empty filter (`{}`, `null`, or a compound with no children) adds
/// no condition.
fn build_query(schema: &RecordSchema, cli: &CommandLineInput) -> Result<DocumentQuery, ConfigError> {
    let mut predicates = Vec::new();

    if let Some(status) = &cli.status {
        predicates.push(FilterPredicate::select_equals(&schema.status, status.as_str()));
    }
    if let Some(raw) = &cli.filter {
        if let Some(filter) = parse_filter(raw)? {
            predicates.push(filter);
        }
    }

    let filter = match predicates.len() {
        0 => None,
        1 => predicates.pop(),
        _ => Some(FilterPredicate::And(predicates)),
    };

    let sort = match &cli.sort {
        None => SortSpec::default(),
        Some(raw) => match parse_json("sort", raw)? {
            Value::Array(sorts) => SortSpec(sorts),
            sort @ Value::Object(_) => SortSpec(vec![sort]),
            _ => {
                return Err(ConfigError::Invalid {
                    field: "sort",
                    reason: "expected a sort object or an array of them".to_string(),
                })
            }
        },
    };

    Ok(DocumentQuery::new(filter, sort))
}

fn parse_filter(raw: &str) -> Result<Option<FilterPredicate>, ConfigError> {
    let value = parse_json("filter", raw)?;
    let is_blank = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    };
    if is_blank {
        return Ok(None);
    }

    let filter = FilterPredicate::from_value(value)
        .map_err(|reason| ConfigError::Invalid { field: "filter", reason })?;
    Ok((!filter.is_empty()).then_some(filter))
}

fn parse_json(field: &'static str, raw: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::Invalid {
        field,
        reason: e.to_string(),
    })
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::new("secret_default_key_for_testing_only")
                .expect("Default API key should be valid"),
            database_id: DatabaseId::parse("00000000000000000000000000000000")
                .expect("Default database id should be valid"),
            query: DocumentQuery::default(),
            page: None,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            pagination: Pagination::default(),
            schema: RecordSchema::default(),
            gutenberg_markup: false,
            output_file: None,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn creds() -> (Option<String>, Option<String>) {
        (Some("secret_abc".to_string()), Some("db123".to_string()))
    }

    fn cli() -> CommandLineInput {
        CommandLineInput {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
            ..Default::default()
        }
    }

    #[test]
    fn missing_credentials_are_config_errors() {
        let err = SyncConfig::from_parts(cli(), None, Some("db".into())).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing("NOTION_API_KEY environment variable not set".to_string())
        );

        let err = SyncConfig::from_parts(cli(), Some("key".into()), Some("  ".into())).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(m) if m.contains("NOTION_DATABASE_ID")));
    }

    #[test]
    fn defaults_follow_cursors_with_plain_markup() {
        let (key, db) = creds();
        let config = SyncConfig::from_parts(cli(), key, db).unwrap();
        assert_eq!(config.database_id.as_str(), "db123");
        assert_eq!(config.pagination, Pagination::FollowCursors);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.query, DocumentQuery::default());
        assert!(!config.gutenberg_markup);
    }

    #[test]
    fn status_and_filter_are_combined() {
        let (key, db) = creds();
        let input = CommandLineInput {
            status: Some("Draft".into()),
            filter: Some(r#"{"property":"Tags","multi_select":{"contains":"rust"}}"#.into()),
            sort: Some(r#"{"property":"Created time","direction":"descending"}"#.into()),
            single_page: true,
            ..cli()
        };

        let config = SyncConfig::from_parts(input, key, db).unwrap();
        assert_eq!(
            config.query.filter,
            Some(FilterPredicate::And(vec![
                FilterPredicate::select_equals("Status", "Draft"),
                FilterPredicate::simple("Tags", "multi_select", json!({ "contains": "rust" })),
            ]))
        );
        assert_eq!(config.query.sort.0.len(), 1);
        assert_eq!(config.pagination, Pagination::SinglePage);
    }

    #[test]
    fn empty_filters_count_as_absent() {
        for raw in ["{}", "null", r#"{"and": []}"#] {
            let (key, db) = creds();
            let input = CommandLineInput {
                filter: Some(raw.to_string()),
                ..cli()
            };
            let config = SyncConfig::from_parts(input, key, db).unwrap();
            assert_eq!(config.query.filter, None, "filter {}", raw);
        }

        let (key, db) = creds();
        let input = CommandLineInput {
            status: Some("Draft".into()),
            filter: Some("{}".into()),
            ..cli()
        };
        let config = SyncConfig::from_parts(input, key, db).unwrap();
        assert_eq!(
            config.query.filter,
            Some(FilterPredicate::select_equals("Status", "Draft"))
        );
    }

    #[test]
    fn timestamp_filters_are_accepted() {
        let (key, db) = creds();
        let input = CommandLineInput {
            filter: Some(
                r#"{"timestamp":"last_edited_time","last_edited_time":{"after":"2024-01-01"}}"#
                    .into(),
            ),
            ..cli()
        };
        let config = SyncConfig::from_parts(input, key, db).unwrap();
        assert!(matches!(
            config.query.filter,
            Some(FilterPredicate::Timestamp { ref timestamp, .. }) if timestamp == "last_edited_time"
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let (key, db) = creds();
        let input = CommandLineInput {
            filter: Some("{not json".into()),
            ..cli()
        };
        let err = SyncConfig::from_parts(input, key, db).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "filter", .. }));
    }

    #[test]
    fn concurrency_must_be_in_range() {
        let (key, db) = creds();
        let input = CommandLineInput {
            concurrency: 0,
            ..cli()
        };
        assert!(SyncConfig::from_parts(input, key, db).is_err());
    }
}
