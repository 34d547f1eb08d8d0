use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pdfhighlights::UnicodeNorm;

/// Print the text under the highlight annotations of PDF documents.
#[derive(Debug, Parser)]
#[command(name = "pdfhighlights", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Highlights of the PDF named BASENAME under the root folder
    Highlights {
        /// File name without the `.pdf` extension
        #[arg(value_name = "BASENAME")]
        basename: String,

        /// Folder searched recursively for PDFs
        #[arg(long, env = "PDFHIGHLIGHTS_ROOT", value_name = "DIR")]
        root: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Apply Unicode normalization to highlight text
        #[arg(long, value_enum)]
        unicode_norm: Option<UnicodeNormArg>,
    },

    /// Number of highlight annotations in the PDF named BASENAME
    Count {
        /// File name without the `.pdf` extension
        #[arg(value_name = "BASENAME")]
        basename: String,

        /// Folder searched recursively for PDFs
        #[arg(long, env = "PDFHIGHLIGHTS_ROOT", value_name = "DIR")]
        root: PathBuf,
    },

    /// Highlights of an explicit PDF file
    File {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Page range (e.g. '1,3-5'). Default: all pages
        #[arg(long)]
        pages: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Apply Unicode normalization to highlight text
        #[arg(long, value_enum)]
        unicode_norm: Option<UnicodeNormArg>,
    },

    /// List the PDFs found under the root folder
    List {
        /// Folder searched recursively for PDFs
        #[arg(long, env = "PDFHIGHLIGHTS_ROOT", value_name = "DIR")]
        root: PathBuf,
    },
}

/// Output format for highlight records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines
    Text,
    /// JSON array of records
    Json,
    /// CSV with a header row
    Csv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnicodeNormArg {
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
}

impl UnicodeNormArg {
    pub fn to_norm(self) -> UnicodeNorm {
        match self {
            UnicodeNormArg::Nfc => UnicodeNorm::Nfc,
            UnicodeNormArg::Nfd => UnicodeNorm::Nfd,
            UnicodeNormArg::Nfkc => UnicodeNorm::Nfkc,
            UnicodeNormArg::Nfkd => UnicodeNorm::Nfkd,
        }
    }
}
