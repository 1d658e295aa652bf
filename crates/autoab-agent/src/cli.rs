//! Command-line surface of the `autoab` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Autoantibody portal facet and network tools")]
pub struct Args {
    /// Serve entries from a local JSON array instead of the configured backend.
    #[arg(long, global = true)]
    pub entries: Option<PathBuf>,

    /// Serve biomarker search rows from a local JSON array.
    #[arg(long, global = true)]
    pub associations: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply one facet change and print the resulting state.
    Facet {
        facet: String,
        /// Empty or omitted clears the facet.
        #[arg(default_value = "")]
        value: String,
    },
    /// Print the fetch plan for a facet change without contacting the backend.
    Plan {
        facet: String,
        #[arg(default_value = "")]
        value: String,
    },
    /// Lay out the disease network for a search query.
    Network {
        query: String,
        /// Focus one disease and include its manifestations.
        #[arg(long)]
        disease: Option<String>,
    },
    /// Autoantibody suggestions for a partial query.
    Suggest { query: String },
}

impl Args {
    /// Both local sources absent means the HTTP backend is used.
    pub fn uses_local_data(&self) -> bool {
        self.entries.is_some() || self.associations.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_value_defaults_to_clear() {
        let args = Args::try_parse_from(["autoab", "facet", "epitope"]).unwrap();
        match &args.command {
            Command::Facet { facet, value } => {
                assert_eq!(facet, "epitope");
                assert_eq!(value, "");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(!args.uses_local_data());
    }

    #[test]
    fn test_network_with_disease_and_local_rows() {
        let args = Args::try_parse_from([
            "autoab",
            "network",
            "Anti-Ro52",
            "--disease",
            "SLE",
            "--associations",
            "rows.json",
        ])
        .unwrap();
        assert!(args.uses_local_data());
        assert!(matches!(
            args.command,
            Command::Network { ref query, disease: Some(ref d) } if query == "Anti-Ro52" && d == "SLE"
        ));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["autoab"]).is_err());
    }
}
