use crate::config::Config;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Student registry started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Backing file: {}", config.storage.db_path);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_store_loaded(count: usize, path: &Path) {
    println!("[Store] Loaded {count} student(s) from {}", path.display());
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_connection_timeout(secs: u64) {
    eprintln!("[WARN] Connection timeout after {secs} seconds");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!("[{}] [Request] {method} {uri} {version:?}", timestamp());
}

pub fn log_response(status: u16, size: u64) {
    println!("[{}] [Response] {status} ({size} bytes)\n", timestamp());
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
