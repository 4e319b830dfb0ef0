//! CLI tool to create the audit table and transcript bucket
//!
//! Usage:
//!   cargo run --bin setup_resources -- --table code-conversions --bucket code-transcripts
//!
//! For local development with LocalStack:
//!   DYNAMODB_ENDPOINT_URL=http://localhost:4566 S3_ENDPOINT_URL=http://localhost:4566 \
//!   S3_FORCE_PATH_STYLE=true cargo run --bin setup_resources

use anyhow::{Context, Result};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use clap::Parser;
use code_converter::config::{AwsConfigBuilder, Settings};

/// Partition key of the audit table
const AUDIT_PARTITION_KEY: &str = "LogID";

/// Create the DynamoDB audit table and the S3 transcript bucket
#[derive(Parser, Debug)]
#[command(name = "setup_resources")]
#[command(about = "Create the audit table and transcript bucket used by code-converter")]
struct Args {
    /// Audit table name (overrides DYNAMODB_TABLE env var)
    #[arg(long)]
    table: Option<String>,

    /// Transcript bucket name (overrides S3_BUCKET_NAME env var)
    #[arg(long)]
    bucket: Option<String>,

    /// DynamoDB endpoint URL (for local development)
    #[arg(long)]
    dynamodb_endpoint_url: Option<String>,

    /// S3 endpoint URL (for local development)
    #[arg(long)]
    s3_endpoint_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load()?;
    if let Some(url) = args.dynamodb_endpoint_url {
        settings.dynamodb_endpoint_url = Some(url);
    }
    if let Some(url) = args.s3_endpoint_url {
        settings.s3_endpoint_url = Some(url);
        settings.s3_force_path_style = true;
    }

    let table = args
        .table
        .or_else(|| settings.dynamodb_table.clone())
        .context("No table name: pass --table or set DYNAMODB_TABLE")?;
    let bucket = args
        .bucket
        .or_else(|| settings.s3_bucket_name.clone())
        .context("No bucket name: pass --bucket or set S3_BUCKET_NAME")?;

    if let Some(ref url) = settings.dynamodb_endpoint_url {
        println!("Using DynamoDB endpoint: {}", url);
    }
    if let Some(ref url) = settings.s3_endpoint_url {
        println!("Using S3 endpoint: {}", url);
    }

    let builder = AwsConfigBuilder::new(&settings);
    let sdk_config = builder.build_sdk_config().await;
    let dynamodb = builder.dynamodb_client(&sdk_config);
    let s3 = builder.s3_client(&sdk_config);

    println!("\n🚀 Setting up conversion resources...\n");

    let mut failed = false;

    match create_audit_table(&dynamodb, &table).await {
        Ok(true) => println!("✅ Created table: {}", table),
        Ok(false) => println!("⏭️  Table already exists: {}", table),
        Err(e) => {
            failed = true;
            println!("❌ Failed to create table {}: {:#}", table, e);
        }
    }

    match create_bucket(&s3, &bucket, &settings.aws_region).await {
        Ok(true) => println!("✅ Created bucket: {}", bucket),
        Ok(false) => println!("⏭️  Bucket already exists: {}", bucket),
        Err(e) => {
            failed = true;
            println!("❌ Failed to create bucket {}: {:#}", bucket, e);
        }
    }

    if failed {
        anyhow::bail!("Resource setup incomplete");
    }

    println!("\n✅ Resource setup complete!\n");

    Ok(())
}

async fn create_audit_table(client: &aws_sdk_dynamodb::Client, table_name: &str) -> Result<bool> {
    // Check if table already exists
    let tables = client.list_tables().send().await?;
    if tables.table_names().iter().any(|name| name == table_name) {
        return Ok(false);
    }

    client
        .create_table()
        .table_name(table_name)
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(AUDIT_PARTITION_KEY)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        )
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(AUDIT_PARTITION_KEY)
                .key_type(KeyType::Hash)
                .build()?,
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await?;

    Ok(true)
}

async fn create_bucket(client: &aws_sdk_s3::Client, bucket: &str, region: &str) -> Result<bool> {
    if client.head_bucket().bucket(bucket).send().await.is_ok() {
        return Ok(false);
    }

    let mut request = client.create_bucket().bucket(bucket);

    // us-east-1 rejects an explicit location constraint
    if region != "us-east-1" {
        request = request.create_bucket_configuration(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build(),
        );
    }

    request.send().await?;

    Ok(true)
}
