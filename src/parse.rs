use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gbif-fetcher")]
#[command(about = "A CLI tool for fetching GBIF occurrence images and metadata")]
#[command(version = "1.0")]
pub(crate) struct Args {
    /// Scientific name of the species to search for
    #[arg(short, long, default_value = "Achillea millefolium", value_parser = NonEmptyStringValueParser::new())]
    pub species: String,

    /// Maximum number of occurrence records to request
    #[arg(short, long, default_value = "100", value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Directory for downloaded images
    #[arg(short, long, default_value = "images")]
    pub image_dir: PathBuf,

    /// Directory for metadata JSON files
    #[arg(short, long, default_value = "metadata")]
    pub metadata_dir: PathBuf,

    /// Base URL of the GBIF API
    #[arg(long, default_value = "https://api.gbif.org/v1")]
    pub api_base: String,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "10")]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
