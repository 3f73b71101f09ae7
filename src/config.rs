use std::path::PathBuf;

use clap::Parser;

/// Command-line and environment settings for the dashboard server.
#[derive(Parser, Debug, Clone)]
#[command(name = "student-support-dashboard")]
#[command(about = "Grade-filtered charts of student study habits and social support", long_about = None)]
pub struct Config {
    /// Survey CSV with studytime, G3, famsup, schoolsup and romantic columns
    #[arg(short, long, env = "DASHBOARD_DATA", default_value = "student-por.csv")]
    pub data: PathBuf,

    /// Field delimiter of the CSV file
    #[arg(long, env = "DASHBOARD_DELIMITER", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    #[arg(long, env = "DASHBOARD_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, env = "DASHBOARD_PORT", default_value_t = 8050)]
    pub port: u16,

    /// Page heading
    #[arg(long, env = "DASHBOARD_TITLE", default_value = "Social Support and Study Habits")]
    pub title: String,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    if s == "\\t" || s == "tab" {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {s:?}")),
    }
}
