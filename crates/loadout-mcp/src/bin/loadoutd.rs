use std::io;

use loadout_mcp::{init_tracing, LoadoutServer};
use loadout_rank::EngineConfig;

fn main() -> io::Result<()> {
    init_tracing();
    let server = LoadoutServer::new(&EngineConfig::from_env())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    server.serve_stdio()
}
