mod client;
mod error;
mod metadata;
mod parse;
mod record;
mod util;

use crate::client::GbifClient;
use crate::error::Error;
use crate::parse::Args;
use crate::util::print_hms;
use clap::Parser;
use log::LevelFilter;
use std::time::Instant;

/// Extensions accepted verbatim when naming the image file.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Derive a file extension from the trailing `.`-segment of an image URL,
/// with any query string stripped. Matching is case-sensitive, so an
/// uppercase extension falls back to "jpg".
pub fn image_extension(image_url: &str) -> &str {
    let extension = image_url
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .split('?')
        .next()
        .unwrap_or_default();

    if IMAGE_EXTENSIONS.contains(&extension) {
        extension
    } else {
        "jpg"
    }
}

/// One full pass: query, pick the first record and its first image,
/// download it, write the metadata document. Missing data ends the run
/// early with a message; only HTTP and I/O failures surface as errors.
async fn run(args: &Args) -> Result<(), Error> {
    let client = GbifClient::new()
        .with_base_url(&args.api_base)
        .with_timeout(args.timeout);

    let records = client.search(&args.species, args.limit).await?;
    if records.is_empty() {
        println!("No records found for {}", args.species);
        return Ok(());
    }

    let record = &records[0];
    let record_id = record.id_string();
    println!("\nProcessing record {record_id}...");

    let Some(media) = record.media.first() else {
        println!("No media found in the first record");
        return Ok(());
    };
    let Some(image_url) = media.identifier.as_deref() else {
        println!("No image URL found in media");
        return Ok(());
    };

    let extension = image_extension(image_url);
    let image_file = args.image_dir.join(format!("{record_id}.{extension}"));
    let json_file = args.metadata_dir.join(format!("{record_id}.json"));

    client.download_image(image_url, &image_file).await?;
    metadata::save_metadata(record, &json_file)?;

    println!("\n✓ Successfully processed record {record_id}");
    println!("  Image: {}", image_file.display());
    println!("  Metadata: {}", json_file.display());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::try_parse()?;
    // Initialize logger; RUST_LOG still takes precedence when set
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    let start = Instant::now();
    if let Err(e) = run(&args).await {
        match &e {
            Error::Request(err) => println!("Error making API request: {err}"),
            Error::Unexpected(err) => println!("Error: {err}"),
        }
    }
    print_hms(&start);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::path::Path;

    fn test_args(api_base: &str, root: &Path) -> Args {
        Args {
            species: "Achillea millefolium".to_string(),
            limit: 100,
            image_dir: root.join("images"),
            metadata_dir: root.join("metadata"),
            api_base: api_base.to_string(),
            timeout: 10,
            verbose: false,
        }
    }

    #[test]
    fn test_image_extension_allowed() {
        assert_eq!(image_extension("https://img.example/a/b/photo.png"), "png");
        assert_eq!(
            image_extension("https://img.example/photo.jpeg?size=large"),
            "jpeg"
        );
        assert_eq!(image_extension("https://img.example/photo.gif"), "gif");
    }

    #[test]
    fn test_image_extension_uppercase_defaults_to_jpg() {
        // Case-sensitive allow-list, uppercase falls through to jpg.
        assert_eq!(
            image_extension("https://img.example/image123.PNG?size=large"),
            "jpg"
        );
    }

    #[test]
    fn test_image_extension_unrecognized_defaults_to_jpg() {
        assert_eq!(image_extension("https://img.example/photo.webp"), "jpg");
        assert_eq!(image_extension("https://img.example/photo"), "jpg");
    }

    #[tokio::test]
    async fn run_writes_nothing_when_no_records() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/occurrence/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results": []}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let args = test_args(&server.url(), dir.path());

        run(&args).await.unwrap();

        assert!(!args.image_dir.exists());
        assert!(!args.metadata_dir.exists());
    }

    #[tokio::test]
    async fn run_writes_nothing_when_first_record_has_no_media() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/occurrence/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"results": [{"gbifID": 7, "scientificName": "Achillea millefolium L."}]}"#,
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let args = test_args(&server.url(), dir.path());

        run(&args).await.unwrap();

        assert!(!args.image_dir.exists());
        assert!(!args.metadata_dir.exists());
    }

    #[tokio::test]
    async fn run_writes_nothing_without_an_image_url() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/occurrence/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results": [{"gbifID": 7, "media": [{"type": "StillImage"}]}]}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let args = test_args(&server.url(), dir.path());

        run(&args).await.unwrap();

        assert!(!args.image_dir.exists());
        assert!(!args.metadata_dir.exists());
    }

    #[tokio::test]
    async fn run_downloads_first_image_and_writes_metadata() {
        let mut server = mockito::Server::new_async().await;
        let image_bytes = b"not really a jpeg".to_vec();

        let search_body = format!(
            r#"{{"results": [{{
                "gbifID": 42,
                "scientificName": "Achillea millefolium L.",
                "media": [{{"type": "StillImage", "identifier": "{}/img/42.jpg"}}]
            }}]}}"#,
            server.url()
        );
        let _search = server
            .mock("GET", "/occurrence/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("scientificName".into(), "Achillea millefolium".into()),
                Matcher::UrlEncoded("mediaType".into(), "StillImage".into()),
                Matcher::UrlEncoded("limit".into(), "100".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_body)
            .create_async()
            .await;
        let _image = server
            .mock("GET", "/img/42.jpg")
            .with_status(200)
            .with_header("content-type", "image/jpeg")
            .with_body(image_bytes.clone())
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let args = test_args(&server.url(), dir.path());

        run(&args).await.unwrap();

        let image_file = args.image_dir.join("42.jpg");
        assert_eq!(std::fs::read(&image_file).unwrap(), image_bytes);

        let json_file = args.metadata_dir.join("42.json");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_file).unwrap()).unwrap();
        assert_eq!(json["gbifID"], 42);
        assert!(json["citation"].as_str().unwrap().contains("dl.42"));
    }
}
