//! Bucket publisher: configure an S3 bucket for public read access.
//!
//! Three idempotent control-plane calls, gated on the bucket actually
//! existing: remove the public-access block, set the public-read policy,
//! set the CORS policy.

use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{CorsConfiguration, CorsRule};
use aws_sdk_s3::Client;

use crate::{bucket_policy_json, CorsSettings, S3Error};

fn cors_configuration(settings: &CorsSettings, bucket: &str) -> Result<CorsConfiguration, S3Error> {
    let rule = CorsRule::builder()
        .set_allowed_headers(Some(settings.allowed_headers.clone()))
        .set_allowed_methods(Some(settings.allowed_methods.clone()))
        .set_allowed_origins(Some(settings.allowed_origins.clone()))
        .set_expose_headers(Some(settings.expose_headers.clone()))
        .max_age_seconds(settings.max_age_seconds)
        .build()
        .map_err(|e| S3Error::OperationFailed {
            bucket: bucket.to_string(),
            operation: "PutBucketCors",
            message: e.to_string(),
        })?;

    CorsConfiguration::builder()
        .cors_rules(rule)
        .build()
        .map_err(|e| S3Error::OperationFailed {
            bucket: bucket.to_string(),
            operation: "PutBucketCors",
            message: e.to_string(),
        })
}

/// Make a bucket publicly readable.
///
/// The existence check runs first: a missing or inaccessible bucket fails
/// before any policy call is attempted. A pre-existing public-access block
/// that cannot be removed is a warning, not a failure; the policy and CORS
/// calls are fatal when they fail.
pub async fn make_bucket_public(client: &Client, bucket: &str) -> Result<(), S3Error> {
    client
        .head_bucket()
        .bucket(bucket)
        .send()
        .await
        .map_err(|e| S3Error::BucketUnavailable {
            bucket: bucket.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;
    tracing::info!(bucket, "bucket exists and is accessible");

    match client
        .delete_public_access_block()
        .bucket(bucket)
        .send()
        .await
    {
        Ok(_) => tracing::info!(bucket, "removed public access block"),
        Err(e) => tracing::warn!(
            bucket,
            error = %DisplayErrorContext(&e),
            "could not remove public access block, continuing"
        ),
    }

    client
        .put_bucket_policy()
        .bucket(bucket)
        .policy(bucket_policy_json(bucket))
        .send()
        .await
        .map_err(|e| S3Error::OperationFailed {
            bucket: bucket.to_string(),
            operation: "PutBucketPolicy",
            message: DisplayErrorContext(&e).to_string(),
        })?;
    tracing::info!(bucket, "applied public-read bucket policy");

    let cors = cors_configuration(&CorsSettings::default(), bucket)?;
    client
        .put_bucket_cors()
        .bucket(bucket)
        .cors_configuration(cors)
        .send()
        .await
        .map_err(|e| S3Error::OperationFailed {
            bucket: bucket.to_string(),
            operation: "PutBucketCors",
            message: DisplayErrorContext(&e).to_string(),
        })?;
    tracing::info!(bucket, "applied CORS configuration");

    Ok(())
}
