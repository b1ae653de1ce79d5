//! Bucket Publisher Entry Point
//!
//! `bucket-public <bucket-name>` makes the named bucket publicly readable.
//! Missing argument prints usage and exits 1; a missing or inaccessible
//! bucket exits 1 before any policy call is attempted.

use aws_config::BehaviorVersion;
use tracing_subscriber::EnvFilter;

use starboard_s3::{make_bucket_public, parse_bucket_arg};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(bucket) = parse_bucket_arg(std::env::args()) else {
        eprintln!("Usage: bucket-public <bucket-name>");
        std::process::exit(1);
    };

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);

    if let Err(e) = make_bucket_public(&client, &bucket).await {
        tracing::error!(bucket, error = %e, "bucket publishing failed");
        std::process::exit(1);
    }

    tracing::info!(bucket, "bucket is now publicly readable");
}
