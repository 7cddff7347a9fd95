// src/engine.rs
use anyhow::Context;
use log::debug;
use std::io::Write;

use crate::bencode::{bvalue_to_json, Decoder};
use crate::cli::Command;
use crate::config::Config;
use crate::torrent::Torrent;

/// Runs one CLI command, writing its report to `out`.
pub fn use_command<W: Write>(command: &Command, config: &Config, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Decode { value } => {
            debug!("decoding {} bytes from the command line", value.len());
            let mut decoder = Decoder::new(value.as_bytes()).with_max_depth(config.max_depth);
            let decoded = decoder
                .decode_next()
                .with_context(|| format!("failed to decode {:?}", value))?;
            if !decoder.remaining().is_empty() {
                debug!(
                    "{} bytes left after the value at byte {}",
                    decoder.remaining().len(),
                    decoder.position()
                );
            }
            let json_val = bvalue_to_json(&decoded);
            writeln!(out, "{}", serde_json::to_string(&json_val)?)?;
        }
        Command::Info { file } => {
            let torrent = Torrent::from_file(file, config.max_depth)
                .with_context(|| format!("failed to read torrent {}", file.display()))?;
            write_info(&torrent, config, out)?;
        }
    }
    Ok(())
}

fn write_info<W: Write>(torrent: &Torrent, config: &Config, out: &mut W) -> anyhow::Result<()> {
    if let Some(announce) = &torrent.announce {
        writeln!(out, "Tracker URL: {}", announce)?;
    }
    writeln!(out, "Length: {}", torrent.info.total_length())?;
    writeln!(out, "Info Hash: {}", hex::encode(torrent.info_hash))?;
    writeln!(out, "Piece Length: {}", torrent.info.piece_length)?;
    if config.show_piece_hashes {
        writeln!(out, "Piece Hashes:")?;
        for piece_hash in &torrent.info.pieces {
            writeln!(out, "{}", hex::encode(piece_hash))?;
        }
    }
    Ok(())
}
