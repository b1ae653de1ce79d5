//! Starboard S3 - bucket publishing and public URL helpers
//!
//! Published assets (demo exports, result files) live in a public-read S3
//! bucket. This crate carries the URL helpers used when handing object
//! references to browsers, and the one-shot publisher that configures a
//! bucket for public read access.

use serde_json::json;
use thiserror::Error;

pub mod publisher;

pub use publisher::make_bucket_public;

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised by bucket configuration and URL generation.
#[derive(Debug, Error)]
pub enum S3Error {
    #[error("S3 configuration incomplete: {field} is not set")]
    MissingConfig { field: &'static str },

    #[error("bucket {bucket} is missing or inaccessible: {message}")]
    BucketUnavailable { bucket: String, message: String },

    #[error("failed to apply {operation} to bucket {bucket}: {message}")]
    OperationFailed {
        bucket: String,
        operation: &'static str,
        message: String,
    },
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Object-storage configuration from environment variables.
///
/// Environment variables:
/// - `S3_BUCKET_NAME`: bucket holding published assets
/// - `AWS_REGION`: region for direct S3 URLs
/// - `CLOUDFRONT_DOMAIN`: optional CDN domain, preferred for public URLs
#[derive(Debug, Clone, Default)]
pub struct BucketConfig {
    pub bucket_name: Option<String>,
    pub region: Option<String>,
    pub cloudfront_domain: Option<String>,
}

impl BucketConfig {
    /// Create a BucketConfig from environment variables.
    pub fn from_env() -> Self {
        Self {
            bucket_name: std::env::var("S3_BUCKET_NAME").ok(),
            region: std::env::var("AWS_REGION").ok(),
            cloudfront_domain: std::env::var("CLOUDFRONT_DOMAIN").ok(),
        }
    }
}

// ============================================================================
// POLICY AND CORS DOCUMENTS
// ============================================================================

/// The public-read bucket policy document for the given bucket.
pub fn bucket_policy_json(bucket: &str) -> String {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "PublicReadGetObject",
                "Effect": "Allow",
                "Principal": "*",
                "Action": "s3:GetObject",
                "Resource": format!("arn:aws:s3:::{}/*", bucket)
            }
        ]
    })
    .to_string()
}

/// CORS settings applied to published buckets so browsers can fetch objects
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub expose_headers: Vec<String>,
    pub max_age_seconds: i32,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_headers: vec![
                "Authorization".to_string(),
                "Content-Length".to_string(),
                "Content-Type".to_string(),
            ],
            allowed_methods: vec!["GET".to_string(), "HEAD".to_string()],
            allowed_origins: vec!["*".to_string()],
            expose_headers: vec!["ETag".to_string()],
            max_age_seconds: 3000,
        }
    }
}

// ============================================================================
// PUBLIC URL HELPERS
// ============================================================================

/// Generate a public URL for an object key.
///
/// The CloudFront domain wins when configured and requested; otherwise a
/// direct regional S3 URL is built, which needs both the bucket name and the
/// region to be configured.
pub fn public_object_url(
    config: &BucketConfig,
    key: &str,
    use_cloudfront: bool,
) -> Result<String, S3Error> {
    if use_cloudfront {
        if let Some(domain) = &config.cloudfront_domain {
            return Ok(format!("https://{}/{}", domain, key));
        }
    }

    let bucket = config
        .bucket_name
        .as_deref()
        .ok_or(S3Error::MissingConfig {
            field: "S3_BUCKET_NAME",
        })?;
    let region = config.region.as_deref().ok_or(S3Error::MissingConfig {
        field: "AWS_REGION",
    })?;

    Ok(format!(
        "https://{}.s3.{}.amazonaws.com/{}",
        bucket, region, key
    ))
}

/// Check whether a URL looks like an S3 object URL.
pub fn is_s3_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    [".s3.amazonaws.com", ".s3-", ".s3.", "//s3.amazonaws.com"]
        .iter()
        .any(|pattern| url.contains(pattern))
}

/// Extract the object key from an S3 URL, for the URL forms this service
/// hands out. Returns None for anything unrecognized.
pub fn extract_object_key(url: &str) -> Option<String> {
    // Legacy global-endpoint URLs: bucket.s3.amazonaws.com/key
    if let Some((_, key)) = url.split_once(".s3.amazonaws.com/") {
        return Some(key.to_string());
    }

    // Region-specific URLs: bucket.s3.region.amazonaws.com/key and the
    // older bucket.s3-region.amazonaws.com/key form. The key is everything
    // past the host segment.
    if (url.contains(".s3-") || url.contains(".s3.")) && url.matches('/').count() >= 3 {
        return url.splitn(4, '/').nth(3).map(|key| key.to_string());
    }

    None
}

/// Parse the bucket-name argument for the `bucket-public` CLI.
///
/// `args` is the full argv including the program name. None means the caller
/// should print usage and exit non-zero.
pub fn parse_bucket_arg(mut args: impl Iterator<Item = String>) -> Option<String> {
    let _program = args.next();
    match args.next() {
        Some(bucket) if !bucket.trim().is_empty() => Some(bucket),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BucketConfig {
        BucketConfig {
            bucket_name: Some("starboard-assets".to_string()),
            region: Some("us-east-1".to_string()),
            cloudfront_domain: None,
        }
    }

    #[test]
    fn test_bucket_policy_document() -> Result<(), serde_json::Error> {
        let policy: serde_json::Value = serde_json::from_str(&bucket_policy_json("starboard-assets"))?;

        assert_eq!(policy["Version"], "2012-10-17");
        assert_eq!(policy["Statement"][0]["Effect"], "Allow");
        assert_eq!(policy["Statement"][0]["Action"], "s3:GetObject");
        assert_eq!(
            policy["Statement"][0]["Resource"],
            "arn:aws:s3:::starboard-assets/*"
        );
        Ok(())
    }

    #[test]
    fn test_cors_defaults() {
        let cors = CorsSettings::default();
        assert_eq!(cors.allowed_methods, vec!["GET", "HEAD"]);
        assert_eq!(cors.allowed_origins, vec!["*"]);
        assert_eq!(cors.expose_headers, vec!["ETag"]);
        assert_eq!(cors.max_age_seconds, 3000);
    }

    #[test]
    fn test_public_url_prefers_cloudfront() -> Result<(), S3Error> {
        let mut config = config();
        config.cloudfront_domain = Some("cdn.starboard.rs".to_string());

        let url = public_object_url(&config, "exports/votes.csv", true)?;
        assert_eq!(url, "https://cdn.starboard.rs/exports/votes.csv");

        // CloudFront can be bypassed explicitly.
        let url = public_object_url(&config, "exports/votes.csv", false)?;
        assert_eq!(
            url,
            "https://starboard-assets.s3.us-east-1.amazonaws.com/exports/votes.csv"
        );
        Ok(())
    }

    #[test]
    fn test_public_url_requires_bucket_and_region() {
        let config = BucketConfig::default();
        let err = public_object_url(&config, "key", true).unwrap_err();
        assert!(matches!(err, S3Error::MissingConfig { .. }));
    }

    #[test]
    fn test_url_validation() {
        assert!(is_s3_url(
            "https://starboard-assets.s3.us-east-1.amazonaws.com/key"
        ));
        assert!(is_s3_url("https://starboard-assets.s3.amazonaws.com/key"));
        assert!(!is_s3_url("https://starboard.rs/key"));
        assert!(!is_s3_url(""));
    }

    #[test]
    fn test_key_extraction_inverts_generated_urls() -> Result<(), S3Error> {
        let config = config();
        let key = "exports/2024/votes.csv";

        let url = public_object_url(&config, key, false)?;
        assert_eq!(extract_object_key(&url).as_deref(), Some(key));
        Ok(())
    }

    #[test]
    fn test_key_extraction_legacy_and_unknown_forms() {
        assert_eq!(
            extract_object_key("https://bucket.s3.amazonaws.com/a/b.txt").as_deref(),
            Some("a/b.txt")
        );
        assert_eq!(
            extract_object_key("https://bucket.s3-us-west-2.amazonaws.com/a.txt").as_deref(),
            Some("a.txt")
        );
        assert_eq!(extract_object_key("https://starboard.rs/a.txt"), None);
    }

    #[test]
    fn test_parse_bucket_arg() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter();

        assert_eq!(
            parse_bucket_arg(args(&["bucket-public", "my-bucket"])),
            Some("my-bucket".to_string())
        );
        assert_eq!(parse_bucket_arg(args(&["bucket-public"])), None);
        assert_eq!(parse_bucket_arg(args(&["bucket-public", "  "])), None);
    }
}
