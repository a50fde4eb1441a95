use std::io::{BufRead, Write};

use crate::{Res, config::Settings, presenter, spotify::Session, success, warning};

use super::spinner;

/// Lists the user's devices, asks for one and moves playback there.
pub async fn select_player(
    settings: Settings,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Res<()> {
    let mut session = Session::restore(settings).await?;

    let pb = spinner("Fetching devices...");
    let devices = session.devices().await;
    pb.finish_and_clear();
    let devices = devices?;

    if devices.is_empty() {
        warning!("No devices found. Open Spotify on the device you want to play on.");
        return Ok(());
    }

    presenter::render_devices(out, &devices)?;
    let index = presenter::prompt_index(out, input, "Select Player", devices.len())?;

    let device = &devices[index];
    let Some(device_id) = device.id.as_deref() else {
        warning!("{} cannot be controlled remotely.", device.name);
        return Ok(());
    };

    session.transfer_playback(device_id, true).await?;
    success!("Playing on {}", device.name);
    Ok(())
}
