//! Print the resolved decoration profile.

use anyhow::Result;
use serde_json::json;
use tp_core::DecorationProfile;

pub fn run(profile: &DecorationProfile) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&render(profile))?);
    Ok(())
}

fn render(profile: &DecorationProfile) -> serde_json::Value {
    json!({
        "mode": profile.mode.as_str(),
        "tick_interval_ms": u64::try_from(profile.tick_interval.as_millis()).unwrap_or(u64::MAX),
        "countdown": profile.countdown,
        "renders_final_frame": profile.renders_final_frame,
        "levels": profile.levels,
    })
}
