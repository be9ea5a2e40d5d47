use clap::Parser;
use poolpath_osm::InputFormat;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread;

/// HTTP routing service over a street graph built at startup.
#[derive(Parser, Debug, Clone)]
#[command(name = "poolpath-service", version, about)]
pub struct Config {
    /// Street data: cached element JSON, Overpass JSON or a PBF extract.
    #[arg(env = "POOLPATH_INPUT")]
    pub input: PathBuf,

    /// Input format, inferred from the file name when omitted.
    #[arg(short, long, value_enum, env = "POOLPATH_FORMAT")]
    pub format: Option<InputFormat>,

    #[arg(short, long, env = "POOLPATH_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Routing threads, one per available core when omitted.
    #[arg(short, long, env = "POOLPATH_WORKERS")]
    pub workers: Option<usize>,

    /// Route requests waiting for a free worker before new ones are held back.
    #[arg(long, env = "POOLPATH_QUEUE_CAPACITY", default_value_t = 64)]
    pub queue_capacity: usize,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`).
    #[arg(short, long, env = "POOLPATH_VERBOSITY", default_value = "info")]
    pub verbosity: String,
}

impl Config {
    pub fn worker_threads(&self) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        }
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity.max(1)
    }
}
