use clap::Parser;
use mosaic_config::ServerConfig;

/// Mosaic: several chat conversations side by side in a tiled layout.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter directive override (e.g. `mosaic=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Server base URL, overriding `server.base_url`. Also moves the push
    /// channel to `ws(s)://<host>/push` unless `--push-url` is given.
    #[arg(long)]
    pub server: Option<String>,

    /// Push channel URL, overriding `server.push_url`.
    #[arg(long)]
    pub push_url: Option<String>,

    /// Conversations to open at startup.
    #[arg(long, num_args = 1..)]
    pub open: Vec<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

impl Args {
    /// Apply `--server` and `--push-url` to the loaded server section.
    pub fn apply_server_overrides(&self, server: &mut ServerConfig) {
        if let Some(base_url) = &self.server {
            server.set_base_url(base_url.as_str());
        }
        if let Some(push_url) = &self.push_url {
            server.push_url = push_url.clone();
        }
    }
}
