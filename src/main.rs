// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! LogMorph CLI - HTTP traffic logging demo
//!
//! Sends one request through an intercepted client, once per content
//! visibility mode, so the resulting records can be compared side by side.

use std::env;
use std::process::ExitCode;

use logmorph::{
    HttpClient, InterceptorConfig, LogContent, LogMorphBuilder, LogMorphInterceptor, Request,
};

const DEFAULT_URL: &str = "https://httpbin.org/get";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("logmorph=debug".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let url = args.get(2).map(String::as_str).unwrap_or(DEFAULT_URL);

    match args[1].as_str() {
        "all" => fetch(demo_interceptor("HttpBin_ALL", LogContent::All), url).await,
        "headers" => {
            fetch(demo_interceptor("HttpBin_HeadersOnly", LogContent::HeadersOnly), url).await
        }
        "body" => fetch(demo_interceptor("HttpBin_BodyOnly", LogContent::BodyOnly), url).await,
        "basic" => fetch(demo_interceptor("HttpBin_Basic", LogContent::Basic), url).await,
        "url-only" => {
            let interceptor = LogMorphInterceptor::builder()
                .add_replacement("httpbin", "***")
                .tag("HttpBin_UrlOnly")
                .redact_url_only(true)
                .build();
            fetch(interceptor, url).await
        }
        "legacy" => {
            let config = InterceptorConfig::legacy()
                .replacement("origin", "***")
                .tag("HttpBin_Legacy");
            fetch(LogMorphInterceptor::from_config(config), url).await
        }
        "post" => {
            if args.len() < 4 {
                eprintln!("Usage: logmorph post <url> <json>");
                return ExitCode::from(1);
            }
            post_json(&args[2], &args[3]).await
        }
        "config" => {
            if args.len() < 3 {
                eprintln!("Usage: logmorph config <file> [url]");
                return ExitCode::from(1);
            }
            let url = args.get(3).map(String::as_str).unwrap_or(DEFAULT_URL);
            match InterceptorConfig::from_file(&args[2]) {
                Ok(config) => fetch(LogMorphBuilder::from_config(config).build(), url).await,
                Err(e) => {
                    eprintln!("Failed to load config: {}", e);
                    ExitCode::from(1)
                }
            }
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("logmorph {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"LogMorph - HTTP traffic logging demo

USAGE:
    logmorph <COMMAND> [URL]

COMMANDS:
    all [url]               Log method, URL, headers and bodies
    headers [url]           Log headers only
    body [url]              Log bodies only
    basic [url]             Log method, URL, status and duration
    url-only [url]          Apply replacements to URLs only
    legacy [url]            Replace secrets outright, write line by line
    post <url> <json>       POST a JSON body with full logging
    config <file> [url]     Load interceptor settings from a JSON file
    help                    Show this help message
    version                 Show version information

URL defaults to {}. Records are written through `tracing`;
set RUST_LOG to adjust verbosity.

EXAMPLES:
    logmorph all
    logmorph basic https://httpbin.org/status/418
    logmorph post https://httpbin.org/post '{{"user":"alice"}}'
"#,
        DEFAULT_URL
    );
}

fn demo_interceptor(tag: &str, content: LogContent) -> LogMorphInterceptor {
    LogMorphInterceptor::builder()
        .add_replacement("origin", "***")
        .tag(tag)
        .content(content)
        .build()
}

fn client_with(interceptor: LogMorphInterceptor) -> Option<HttpClient> {
    match HttpClient::new() {
        Ok(client) => Some(client.with_interceptor(interceptor)),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            None
        }
    }
}

async fn fetch(interceptor: LogMorphInterceptor, url: &str) -> ExitCode {
    let Some(client) = client_with(interceptor) else {
        return ExitCode::from(1);
    };

    match client.get(url).await {
        Ok(response) => finish(response).await,
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn post_json(url: &str, json: &str) -> ExitCode {
    let Some(client) = client_with(demo_interceptor("HttpBin_Post", LogContent::All)) else {
        return ExitCode::from(1);
    };

    let request = match Request::post(url) {
        Ok(request) => request.header("content-type", "application/json").body(json.to_string()),
        Err(e) => {
            eprintln!("Invalid URL: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.execute(request).await {
        Ok(response) => finish(response).await,
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn finish(response: logmorph::Response) -> ExitCode {
    let status = response.status;
    match response.bytes().await {
        Ok(body) => {
            println!("{} ({} bytes)", status, body.len());
            if status.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            eprintln!("Failed to read body: {}", e);
            ExitCode::from(1)
        }
    }
}
