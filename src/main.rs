// src/main.rs

//! # NFT Certificate Viewer - Main Entry Point
//!
//! Fetches the certificate named on the command line, verifies its metadata
//! hash and prints the certificate card.
//!
//! ## Initialization Sequence
//! 1. Load `.env` into the environment
//! 2. Initialize logging (`RUST_LOG`, default `info`)
//! 3. Load settings (`NFT_CERT_*` variables)
//! 4. Fetch, verify and render
//!
//! ## Exit Codes
//! - `0`: certificate rendered (whatever its verification outcome)
//! - `1`: the certificate could not be fetched or exported
//! - `2`: no request id given

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use dotenv::dotenv;
use log::debug;
use nft_cert_viewer::api::cache::CertificateCache;
use nft_cert_viewer::api::client::CertificateClient;
use nft_cert_viewer::settings::Settings;
use nft_cert_viewer::storage::file_export::export_files;
use nft_cert_viewer::utils::serialization::to_pretty_json;
use nft_cert_viewer::view::card::render_certificate;
use nft_cert_viewer::view::error_display::{render_error, render_missing_request_id, ErrorInfo};
use nft_cert_viewer::VerificationSession;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "nft-cert-viewer", version, about = "Display and verify an NFT certificate")]
struct Cli {
    /// Request id of the certificate
    request_id: Option<String>,

    /// Print certificate and verification result as JSON
    #[arg(long)]
    json: bool,

    /// Write decoded attachments into this directory
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(request_id) = cli.request_id.filter(|id| !id.trim().is_empty()) else {
        eprint!("{}", render_missing_request_id());
        return Ok(ExitCode::from(2));
    };

    let settings = Settings::load().context("loading settings")?;
    debug!("settings: {:?}", settings);

    let cache = CertificateCache::new(settings.cache_policy());
    let client = CertificateClient::new(&settings, cache).context("building HTTP client")?;

    let certificate = match client.fetch_certificate(&request_id).await {
        Ok(certificate) => certificate,
        Err(e) => {
            let info = ErrorInfo::for_fetch_error(&e);
            debug!(
                "fetch error details: {}",
                json!({
                    "status": info.status,
                    "apiMessage": e.api_message(),
                    "requestId": request_id,
                    "error": e.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                })
            );
            eprint!("{}", render_error(&info, &request_id));
            return Ok(ExitCode::from(1));
        }
    };

    // One view, one session: the attempt is awaited before rendering.
    let session = VerificationSession::new();
    if let Some(handle) = session.observe(&certificate) {
        handle.await.context("verification task failed")?;
    }
    let state = session.state();
    let now = Utc::now();

    if cli.json {
        let report = json!({
            "certificate": certificate,
            "verification": state.result(),
            "expired": certificate.is_expired_at(now),
        });
        println!("{}", to_pretty_json(&report)?);
    } else {
        print!("{}", render_certificate(&certificate, &state, now));
    }

    if let Some(dir) = cli.export_dir {
        match export_files(&certificate.files, &dir) {
            Ok(paths) => eprintln!("Exported {} file(s) to {}", paths.len(), dir.display()),
            Err(e) => {
                eprintln!("Export failed: {}", e);
                return Ok(ExitCode::from(1));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
