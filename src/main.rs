use lambda_http::{run, service_fn, Error};

use reqwest::Client as ReqwestClient;
use std::env;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use apis::GeminiClient;
use generation::run_generation;
use structs::ContentError;
use utils::parse_submission;

mod apis;
mod generation;
mod prompt;
mod structs;
mod utils;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .with_env_filter(EnvFilter::new("contentgen=debug"))
        .init();

    info!("Starting the content generator backend");

    // Setup the Gemini client (we do it here because this place is a cold start)
    let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY not set!");
    let gemini = GeminiClient::new(ReqwestClient::new(), api_key);
    info!("Gemini API client initialized");

    // Run the Lambda function
    info!("Starting Lambda function");
    run(service_fn(|req| handler(req, &gemini))).await
}

async fn handler(
    req: lambda_http::Request,
    gemini: &GeminiClient,
) -> Result<lambda_http::Response<String>, lambda_http::Error> {
    debug!("Received a new request");

    // Parse the form submission
    let request = match parse_submission(&req) {
        Ok(request) => {
            debug!("Successfully parsed submission");
            request
        }
        Err(e) => {
            error!("Failed to parse submission: {:?}", e);
            return Ok(lambda_http::Response::builder()
                .status(400)
                .header("content-type", "application/json")
                .body(serde_json::json!({ "error": "Invalid request body" }).to_string())
                .unwrap());
        }
    };

    // Send the request
    let res = run_generation(gemini, &request).await;

    match res {
        Ok(content) => {
            // Check if empty response
            let content = if content.is_empty() {
                warn!("Empty response from the provider");
                "No content generated.".to_string()
            } else {
                content
            };

            info!("Sending generated content ({} chars)", content.len());
            Ok(lambda_http::Response::builder()
                .status(200)
                .header("content-type", "application/json")
                .body(serde_json::json!({ "content": content }).to_string())
                .unwrap())
        }
        Err(ContentError::Validation(message)) => {
            warn!("Invalid submission: {message}");
            Ok(lambda_http::Response::builder()
                .status(400)
                .header("content-type", "application/json")
                .body(serde_json::json!({ "error": message }).to_string())
                .unwrap())
        }
        Err(e) => {
            // The caller only sees a generic failure, the detail stays in the logs
            error!("Generation failed: {e}");
            Ok(lambda_http::Response::builder()
                .status(500)
                .header("content-type", "application/json")
                .body(
                    serde_json::json!({ "error": "Failed to generate content." }).to_string(),
                )
                .unwrap())
        }
    }
}
