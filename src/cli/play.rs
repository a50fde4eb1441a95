use std::io::{BufRead, Write};

use crate::{
    Res,
    config::{SEARCH_LIMIT, Settings},
    presenter,
    spotify::Session,
    types::{SearchKind, Track},
    warning,
};

use super::spinner;

/// Searches for `query` and plays the top hit, or the one picked from the
/// listed results when `list` is set.
///
/// Only the search itself is fatal. A refused play request, missing album
/// art or a failed resume are reported and the flow carries on.
pub async fn search_and_play(
    settings: Settings,
    query: &str,
    list: bool,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Res<()> {
    let mut session = Session::restore(settings).await?;

    if query.trim().is_empty() {
        warning!("Nothing to search for. Usage: playcli [-l] <query>");
        return Ok(());
    }

    let pb = spinner(format!("Searching for \"{}\"...", query));
    let tracks = session.search(query, SearchKind::Track, SEARCH_LIMIT).await;
    pb.finish_and_clear();
    let tracks = tracks?;

    if tracks.is_empty() {
        warning!("No tracks found for \"{}\"", query);
        return Ok(());
    }

    let index = if list {
        presenter::render_tracks(out, &tracks)?;
        presenter::prompt_index(out, input, "Select Song", tracks.len())?
    } else {
        0
    };

    let track = &tracks[index];
    writeln!(out, "{}", presenter::now_playing(track))?;

    if let Err(e) = session.play(&[track.uri.clone()]).await {
        warning!("{}", e);
    }

    if let Err(e) = show_cover(&session, track, out).await {
        warning!("Cannot show album art: {}", e);
    }

    if let Err(e) = session.resume().await {
        tracing::debug!(error = %e, "resume request failed");
    }

    Ok(())
}

async fn show_cover(session: &Session, track: &Track, out: &mut impl Write) -> Res<()> {
    let Some(url) = track.cover_url() else {
        tracing::debug!(track = %track.name, "no album art");
        return Ok(());
    };

    let bytes = session.fetch_image(url).await?;
    presenter::inline_image(out, url, &bytes, presenter::COVER_WIDTH_PX)?;
    Ok(())
}
