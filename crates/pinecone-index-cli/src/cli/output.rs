//! Output formatting for the pcindex CLI
//!
//! JSON output is the response record as received. Pretty output is a short
//! colored summary for terminals.

use clap::ValueEnum;
use colored::Colorize;
use pinecone_index::{
    DescribeIndexStatsResponse, FetchResponse, QueryResponse, ScoredVector, UpsertResponse,
};
use std::io::Write;

use crate::error::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable summary with colors
    #[default]
    Pretty,
    /// JSON format for machine processing
    Json,
}

/// Result of one executed command
#[derive(Debug, Clone)]
pub enum Outcome {
    Upserted(UpsertResponse),
    Fetched(FetchResponse),
    Queried(QueryResponse),
    Deleted,
    Updated,
    Stats(DescribeIndexStatsResponse),
}

impl Outcome {
    /// Render output in the specified format
    pub fn render<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => self.render_json(out),
            OutputFormat::Pretty => self.render_pretty(out),
        }
    }

    fn render_json<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let json = match self {
            Outcome::Upserted(response) => serde_json::to_string_pretty(response)?,
            Outcome::Fetched(response) => serde_json::to_string_pretty(response)?,
            Outcome::Queried(response) => serde_json::to_string_pretty(response)?,
            Outcome::Deleted | Outcome::Updated => "{}".to_string(),
            Outcome::Stats(response) => serde_json::to_string_pretty(response)?,
        };
        writeln!(out, "{}", json)?;
        Ok(())
    }

    fn render_pretty<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        match self {
            Outcome::Upserted(response) => {
                writeln!(
                    out,
                    "{} {}",
                    "✓".green(),
                    format!("Upserted {} vector(s)", response.upserted_count).bold()
                )?;
            }
            Outcome::Fetched(response) => {
                writeln!(
                    out,
                    "{}",
                    format!(
                        "Fetched {} vector(s) from namespace {}",
                        response.vectors.len(),
                        namespace_label(&response.namespace)
                    )
                    .bold()
                )?;
                let mut ids: Vec<&String> = response.vectors.keys().collect();
                ids.sort();
                for id in ids {
                    let vector = &response.vectors[id];
                    write!(out, "  {}  dim={}", id.cyan(), vector.values.len())?;
                    if let Some(metadata) = vector.metadata.as_ref().filter(|m| !m.is_empty()) {
                        write!(out, "  {}", serde_json::Value::Object(metadata.clone()))?;
                    }
                    writeln!(out)?;
                }
            }
            Outcome::Queried(QueryResponse::Unary(result)) => {
                writeln!(
                    out,
                    "{}",
                    format!(
                        "{} match(es) in namespace {}",
                        result.matches.len(),
                        namespace_label(&result.namespace)
                    )
                    .bold()
                )?;
                write_matches(out, &result.matches)?;
                if let Some(usage) = &result.usage {
                    writeln!(out, "{}", format!("read units: {}", usage.read_units).dimmed())?;
                }
            }
            Outcome::Queried(QueryResponse::Multi(result)) => {
                for (i, single) in result.results.iter().enumerate() {
                    writeln!(
                        out,
                        "{}",
                        format!("Query {}: {} match(es)", i, single.matches.len()).bold()
                    )?;
                    write_matches(out, &single.matches)?;
                }
                if let Some(usage) = &result.usage {
                    writeln!(out, "{}", format!("read units: {}", usage.read_units).dimmed())?;
                }
            }
            Outcome::Deleted => writeln!(out, "{} {}", "✓".green(), "Deleted".bold())?,
            Outcome::Updated => writeln!(out, "{} {}", "✓".green(), "Updated".bold())?,
            Outcome::Stats(stats) => {
                writeln!(out, "{}", "Index statistics".bold().underline())?;
                writeln!(out, "  dimension:      {}", stats.dimension)?;
                writeln!(out, "  total vectors:  {}", stats.total_vector_count)?;
                writeln!(out, "  fullness:       {:.4}", stats.index_fullness)?;
                writeln!(out, "  namespaces:")?;
                let mut names: Vec<&String> = stats.namespaces.keys().collect();
                names.sort();
                for name in names {
                    writeln!(
                        out,
                        "    {}: {}",
                        namespace_label(name).cyan(),
                        stats.namespaces[name].vector_count
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn write_matches<W: Write>(out: &mut W, matches: &[ScoredVector]) -> Result<(), CliError> {
    for (rank, scored) in matches.iter().enumerate() {
        write!(
            out,
            "  {:>3}. {}  score={:.4}",
            rank + 1,
            scored.id.cyan(),
            scored.score
        )?;
        if let Some(metadata) = scored.metadata.as_ref().filter(|m| !m.is_empty()) {
            write!(out, "  {}", serde_json::Value::Object(metadata.clone()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The default namespace is the empty string
fn namespace_label(namespace: &str) -> String {
    if namespace.is_empty() {
        "(default)".to_string()
    } else {
        namespace.to_string()
    }
}
