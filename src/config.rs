use crate::sponsor::SponsorConfig;

const DEFAULT_AD_FORMAT: &str = "auto";
const DEFAULT_MIN_HEIGHT: u32 = 90;

/// Settings read from the environment. The bot token itself is picked up by
/// `Bot::from_env` (`TELOXIDE_TOKEN`).
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    pub sponsor: Option<SponsorConfig>,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Sponsor slots are off unless a client id is configured.
        let sponsor = non_empty("SPONSOR_AD_CLIENT").map(|ad_client| {
            let min_height = match non_empty("SPONSOR_MIN_HEIGHT").map(|v| v.parse::<u32>()) {
                Some(Ok(height)) => height,
                Some(Err(e)) => {
                    log::warn!("ignoring SPONSOR_MIN_HEIGHT: {}", e);
                    DEFAULT_MIN_HEIGHT
                }
                None => DEFAULT_MIN_HEIGHT,
            };
            SponsorConfig {
                ad_client,
                ad_format: non_empty("SPONSOR_AD_FORMAT")
                    .unwrap_or_else(|| DEFAULT_AD_FORMAT.to_string()),
                min_height,
                intro_slot: non_empty("SPONSOR_SLOT_INTRO")
                    .unwrap_or_else(|| "YOUR-AD-SLOT-ID".to_string()),
                mid_quiz_slot: non_empty("SPONSOR_SLOT_MID_QUIZ")
                    .unwrap_or_else(|| "YOUR-AD-SLOT-ID-2".to_string()),
                result_slot: non_empty("SPONSOR_SLOT_RESULT")
                    .unwrap_or_else(|| "YOUR-AD-SLOT-ID-3".to_string()),
            }
        });

        Self { sponsor }
    }
}
