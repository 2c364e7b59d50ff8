use crate::error::Error;
use crate::record::OccurrenceRecord;
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};

const GBIF_API_BASE: &str = "https://api.gbif.org/v1";

/// Buffering granularity for streamed downloads, so memory stays bounded
/// regardless of image size.
const WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// Envelope around the occurrence search response; only `results` matters.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    results: Vec<OccurrenceRecord>,
}

pub struct GbifClient {
    client: Client,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
}

impl GbifClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("gbif-fetcher/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: GBIF_API_BASE.to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout = Duration::from_secs(timeout_secs);
        self
    }

    /// Query the occurrence search endpoint for records of `species_name`
    /// that carry still images. The service does the media filtering; the
    /// `results` array comes back as-is, empty when absent.
    pub async fn search(
        &self,
        species_name: &str,
        limit: u32,
    ) -> Result<Vec<OccurrenceRecord>, Error> {
        let url = format!("{}/occurrence/search", self.base_url);

        println!("Querying GBIF for {species_name}...");
        debug!("GET {url} scientificName={species_name} limit={limit}");

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .query(&[
                ("scientificName", species_name),
                ("mediaType", "StillImage"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: SearchResponse = response.json().await?;
        println!("Found {} records with images", body.results.len());

        Ok(body.results)
    }

    /// Stream an image to `save_path`, creating parent directories as
    /// needed. A failure mid-stream can leave a truncated file behind.
    pub async fn download_image(&self, image_url: &str, save_path: &Path) -> Result<(), Error> {
        println!("Downloading image from {image_url}...");

        let response = self
            .client
            .get(image_url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let progress = match response.content_length() {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "[{elapsed_precise}] {bar:40.cyan/blue} {bytes:>10}/{total_bytes:10} {msg}",
                        )
                        .unwrap()
                        .progress_chars("##-"),
                );
                bar
            }
            None => ProgressBar::new_spinner(),
        };
        progress.set_message("Downloading image");

        if let Some(parent) = save_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = fs::File::create(save_path).await?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            writer.write_all(&chunk).await?;
            progress.inc(chunk.len() as u64);
        }

        writer.flush().await?;
        progress.finish_and_clear();
        println!("Image saved to {}", save_path.display());

        Ok(())
    }
}
