//! CLI command definitions for pcindex
//!
//! Provides Clap-based command definitions for the six index operations.

use clap::{Parser, Subcommand};
use pinecone_index::{
    BlockingIndex, DeleteParams, DescribeIndexStatsParams, FetchParams, Filter, QueryParams,
    TransportOptions, UpdateParams, UpsertParams,
};
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::output::{OutputFormat, Outcome};
use crate::error::CliError;

/// pcindex
///
/// Upsert, fetch, query, update and delete vectors in a remote index.
#[derive(Parser, Debug)]
#[command(name = "pcindex")]
#[command(about = "Vector index client - upsert, fetch, query, update and delete vectors", long_about = None)]
#[command(version)]
pub struct IndexCli {
    /// Name of the index to operate on
    #[arg(short, long, env = "PINECONE_INDEX")]
    pub index: String,

    /// API key
    #[arg(long, env = "PINECONE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Deployment environment, e.g. us-west1-gcp
    #[arg(long, env = "PINECONE_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Project name
    #[arg(long, env = "PINECONE_PROJECT_NAME")]
    pub project: Option<String>,

    /// Explicit base URL, bypassing the server template
    #[arg(long)]
    pub host: Option<String>,

    /// TOML file with api_key, environment and project_name
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads for the connection pool
    #[arg(long, default_value_t = 1)]
    pub pool_threads: usize,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,

    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: IndexCommands,
}

/// Available index commands
#[derive(Subcommand, Debug)]
pub enum IndexCommands {
    /// Write vectors from a JSON file
    ///
    /// The file holds an array (or an object with a `vectors` array) whose
    /// entries are `{"id", "values", "metadata"}` objects or
    /// `[id, values, metadata]` arrays.
    Upsert {
        /// Path to the vectors file
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Look up vectors by id
    Fetch {
        /// Comma-separated vector ids
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<String>,

        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Similarity search by values or by a stored vector id
    Query {
        /// Comma-separated query values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        vector: Option<Vec<f32>>,

        /// Use a stored vector as the query
        #[arg(long)]
        id: Option<String>,

        /// Number of matches to return
        #[arg(short = 'k', long, default_value_t = 10)]
        top_k: u32,

        #[arg(short, long)]
        namespace: Option<String>,

        /// Metadata filter as a JSON object
        #[arg(long)]
        filter: Option<String>,

        #[arg(long)]
        include_values: bool,

        #[arg(long)]
        include_metadata: bool,
    },

    /// Delete vectors by ids, by filter, or the whole namespace
    Delete {
        /// Comma-separated vector ids
        #[arg(long, value_delimiter = ',')]
        ids: Option<Vec<String>>,

        /// Delete every vector in the namespace
        #[arg(long)]
        all: bool,

        /// Metadata filter as a JSON object
        #[arg(long)]
        filter: Option<String>,

        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Overwrite values and/or merge metadata of one vector
    Update {
        #[arg(long)]
        id: String,

        /// Comma-separated replacement values
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        values: Option<Vec<f32>>,

        /// Metadata fields to set, as a JSON object
        #[arg(long)]
        set_metadata: Option<String>,

        #[arg(short, long)]
        namespace: Option<String>,
    },

    /// Vector counts per namespace and index dimension
    Stats {
        /// Metadata filter as a JSON object
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Execute one command against the index
pub fn execute(
    index: &BlockingIndex,
    command: IndexCommands,
    options: TransportOptions,
) -> Result<Outcome, CliError> {
    match command {
        IndexCommands::Upsert { file, namespace } => {
            let vectors = read_vectors(&file)?;
            let mut params = UpsertParams::new(vectors);
            params.namespace = namespace;
            Ok(Outcome::Upserted(index.upsert(params, options)?))
        }
        IndexCommands::Fetch { ids, namespace } => {
            let mut params = FetchParams::new(ids);
            params.namespace = namespace;
            Ok(Outcome::Fetched(index.fetch(params, options)?))
        }
        IndexCommands::Query {
            vector,
            id,
            top_k,
            namespace,
            filter,
            include_values,
            include_metadata,
        } => {
            let params = QueryParams {
                vector,
                id,
                top_k: Some(top_k),
                namespace,
                filter: filter.as_deref().map(|raw| parse_object("--filter", raw)).transpose()?,
                include_values: include_values.then_some(true),
                include_metadata: include_metadata.then_some(true),
                ..Default::default()
            };
            Ok(Outcome::Queried(index.query(params, options)?))
        }
        IndexCommands::Delete {
            ids,
            all,
            filter,
            namespace,
        } => {
            let params = delete_params(ids, all, filter.as_deref(), namespace)?;
            index.delete(params, options)?;
            Ok(Outcome::Deleted)
        }
        IndexCommands::Update {
            id,
            values,
            set_metadata,
            namespace,
        } => {
            let mut params = UpdateParams::new(id);
            params.values = values;
            params.set_metadata = set_metadata
                .as_deref()
                .map(|raw| parse_object("--set-metadata", raw))
                .transpose()?;
            params.namespace = namespace;
            index.update(params, options)?;
            Ok(Outcome::Updated)
        }
        IndexCommands::Stats { filter } => {
            let params = DescribeIndexStatsParams {
                filter: filter.as_deref().map(|raw| parse_object("--filter", raw)).transpose()?,
            };
            Ok(Outcome::Stats(index.describe_index_stats(params, options)?))
        }
    }
}

/// Selectors pass through untouched so conflicts surface from the client
pub fn delete_params(
    ids: Option<Vec<String>>,
    all: bool,
    filter: Option<&str>,
    namespace: Option<String>,
) -> Result<DeleteParams, CliError> {
    Ok(DeleteParams {
        ids,
        delete_all: all.then_some(true),
        filter: filter.map(|raw| parse_object("--filter", raw)).transpose()?,
        namespace,
    })
}

/// Parse a flag value that must be a JSON object
pub fn parse_object(flag: &str, raw: &str) -> Result<Filter, CliError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CliError::input(format!("{} must be a JSON object", flag))),
        Err(e) => Err(CliError::input(format!("{} is not valid JSON: {}", flag, e))),
    }
}

/// Read upsert input; entries are normalized by the client
pub fn read_vectors(path: &Path) -> Result<Vec<Value>, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.display().to_string(),
        source,
    })?;
    let document: Value = serde_json::from_str(&content).map_err(|e| {
        CliError::input(format!("{} is not valid JSON: {}", path.display(), e))
    })?;

    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("vectors") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(CliError::input(format!(
                    "{} must hold an array or an object with a \"vectors\" array",
                    path.display()
                )))
            }
        },
        _ => {
            return Err(CliError::input(format!(
                "{} must hold an array of vectors",
                path.display()
            )))
        }
    };

    tracing::debug!(path = %path.display(), count = entries.len(), "Read vectors file");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ExitCode;
    use serde_json::json;
    use std::io::Write;

    fn parse(args: &[&str]) -> IndexCli {
        let mut full = vec!["pcindex", "--index", "movies"];
        full.extend_from_slice(args);
        IndexCli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_parse_query_by_vector() {
        let cli = parse(&["query", "--vector", "0.5,-1,2", "-k", "3", "--include-metadata"]);
        match cli.command {
            IndexCommands::Query {
                vector,
                id,
                top_k,
                include_metadata,
                include_values,
                ..
            } => {
                assert_eq!(vector, Some(vec![0.5, -1.0, 2.0]));
                assert!(id.is_none());
                assert_eq!(top_k, 3);
                assert!(include_metadata);
                assert!(!include_values);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_fetch_ids() {
        let cli = parse(&["--format", "json", "fetch", "--ids", "a,b,c", "-n", "films"]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            IndexCommands::Fetch { ids, namespace } => {
                assert_eq!(ids, vec!["a", "b", "c"]);
                assert_eq!(namespace.as_deref(), Some("films"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_delete_params() {
        let params = delete_params(None, true, None, Some("films".into())).unwrap();
        assert_eq!(params.delete_all, Some(true));
        assert!(params.ids.is_none());

        let params = delete_params(None, false, Some(r#"{"genre": "drama"}"#), None).unwrap();
        assert!(params.delete_all.is_none());
        assert_eq!(params.filter.unwrap()["genre"], json!("drama"));
    }

    #[test]
    fn test_parse_object_rejects_non_objects() {
        let err = parse_object("--filter", "[1, 2]").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
        assert!(err.to_string().contains("--filter must be a JSON object"));

        assert!(parse_object("--filter", "{not json").is_err());
    }

    #[test]
    fn test_read_vectors_array_and_wrapped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "a", "values": [1.0]}}, ["b", [2.0], {{"genre": "drama"}}]]"#
        )
        .unwrap();
        let entries = read_vectors(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1][0], json!("b"));

        let mut wrapped = tempfile::NamedTempFile::new().unwrap();
        write!(wrapped, r#"{{"vectors": [["c", [3.0]]]}}"#).unwrap();
        assert_eq!(read_vectors(wrapped.path()).unwrap().len(), 1);
    }

    #[test]
    fn test_read_vectors_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_vectors(&dir.path().join("missing.json")).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::FileError);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": "a"}}"#).unwrap();
        let err = read_vectors(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::InvalidInput);
    }
}
