//! # Fetch Subcommand
//!
//! Send one authenticated request and print what came back. JSON bodies are
//! pretty-printed; anything else is printed as status line plus text.

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::Method;

use otp_client::{Fetched, OtpClient, RequestOptions, ResponseBody, ResponseMode};

/// Arguments for the `otp fetch` subcommand.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Request path, relative to `OTP_API_HOST`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// HTTP method.
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Extra request header. Repeatable.
    #[arg(long = "header", short = 'H', value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Request body. Sent as `application/json` unless a content-type
    /// header is given.
    #[arg(long)]
    pub body: Option<String>,

    /// Print the raw response even when it is JSON.
    #[arg(long)]
    pub raw: bool,
}

/// Split a `NAME:VALUE` header argument.
pub fn parse_header(arg: &str) -> Result<(String, String)> {
    let Some((name, value)) = arg.split_once(':') else {
        bail!("header must be NAME:VALUE, got {arg:?}");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("header name is empty in {arg:?}");
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Translate command-line arguments into request options.
pub fn build_options(args: &FetchArgs) -> Result<RequestOptions> {
    let method = Method::from_bytes(args.method.to_ascii_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method: {}", args.method))?;

    let mut options = RequestOptions::new(method);
    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        options = options.header(name, value);
    }

    if let Some(body) = &args.body {
        let has_content_type = options
            .headers
            .keys()
            .any(|k| k.eq_ignore_ascii_case("content-type"));
        if !has_content_type {
            options = options.header("content-type", "application/json");
        }
        options = options.body(body.clone());
    }

    Ok(options)
}

/// Text printed for a response body.
pub async fn render_body(body: ResponseBody) -> Result<String> {
    match body {
        ResponseBody::Json(value) => {
            serde_json::to_string_pretty(&value).context("failed to format JSON response")
        }
        ResponseBody::Raw(response) => {
            let status = response.status();
            let text = response
                .text()
                .await
                .context("failed to read response body")?;
            Ok(format!("HTTP {status}\n{text}"))
        }
    }
}

/// Execute the fetch subcommand.
///
/// Returns exit code: 0 when a response was received, 1 when the session
/// has expired.
pub async fn run_fetch(args: &FetchArgs, client: &OtpClient) -> Result<u8> {
    let options = build_options(args)?;
    let mode = if args.raw {
        ResponseMode::Raw
    } else {
        ResponseMode::Parsed
    };

    let fetched = client
        .fetch(&args.path, options, mode)
        .await
        .with_context(|| format!("request to {} failed", args.path))?;

    match fetched {
        Fetched::Unauthorized => {
            eprintln!("Session expired. Run `otp login` and try again.");
            Ok(1)
        }
        Fetched::Body(body) => {
            println!("{}", render_body(body).await?);
            Ok(0)
        }
    }
}
