//! Console rendering for search results, devices and album art, plus the
//! numeric prompt used to pick from a list.
//!
//! Every function takes its writer (and reader) explicitly so the output can
//! be captured in tests.

use std::io::{self, BufRead, Write};

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{
    Res,
    error::PlayError,
    types::{Device, Track},
};

/// Width used when drawing album art inline.
pub const COVER_WIDTH_PX: u32 = 200;

/// One line per track, `"{index} : {title} by {artist}"`, then a blank line.
pub fn render_tracks(out: &mut impl Write, tracks: &[Track]) -> io::Result<()> {
    for (index, track) in tracks.iter().enumerate() {
        writeln!(out, "{} : {} by {}", index, track.name, track.artist_name())?;
    }
    writeln!(out)
}

/// One line per device, `"{index} : {name}"`; the active one gets a `*`.
pub fn render_devices(out: &mut impl Write, devices: &[Device]) -> io::Result<()> {
    for (index, device) in devices.iter().enumerate() {
        if device.is_active {
            writeln!(out, "{} : {} *", index, device.name)?;
        } else {
            writeln!(out, "{} : {}", index, device.name)?;
        }
    }
    writeln!(out)
}

/// Prints `prompt`, reads one line and parses it as an index into a list
/// of `len` entries.
///
/// # Errors
///
/// [`PlayError::InvalidSelection`] for input that is not a number or is out
/// of range. `len` must be non-zero.
pub fn prompt_index(
    out: &mut impl Write,
    input: &mut impl BufRead,
    prompt: &str,
    len: usize,
) -> Res<usize> {
    write!(out, "{} -> ", prompt)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    parse_index(line.trim(), len)
}

pub fn parse_index(raw: &str, len: usize) -> Res<usize> {
    let invalid = || PlayError::InvalidSelection {
        input: raw.to_string(),
        max: len.saturating_sub(1),
    };

    let index: usize = raw.parse().map_err(|_| invalid())?;
    if index >= len {
        return Err(invalid());
    }
    Ok(index)
}

pub fn now_playing(track: &Track) -> String {
    format!(
        "♫ Playing {} by {} ({})",
        track.name,
        track.artist_name(),
        track.album.name
    )
}

/// Draws an image with the iTerm2 inline image protocol.
pub fn inline_image(out: &mut impl Write, name: &str, bytes: &[u8], width_px: u32) -> io::Result<()> {
    write!(
        out,
        "\x1b]1337;File=name={};size={};width={}px;inline=1:{}\x07",
        STANDARD.encode(name),
        bytes.len(),
        width_px,
        STANDARD.encode(bytes)
    )?;
    writeln!(out)?;
    out.flush()
}
