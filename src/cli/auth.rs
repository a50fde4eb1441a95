use std::time::Duration;

use crate::{Res, config::Settings, info, spotify, success};

pub async fn login(settings: &Settings, timeout: Option<Duration>) -> Res<()> {
    info!("Regenerating token");
    spotify::auth::login(settings, timeout).await?;
    success!("🔑 Saved token to {}", settings.token_path.display());
    Ok(())
}
