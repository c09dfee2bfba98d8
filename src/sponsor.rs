//! Sponsor slots shown next to the quiz.
//!
//! Slots are pushed onto a queue and delivered by a background task. Nothing
//! here reports back to the quiz: a failed or dropped slot is only logged.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Intro,
    MidQuiz,
    Result,
}

impl Placement {
    /// The mid-quiz slot goes along with the fifth question.
    pub const MID_QUIZ_QUESTION: usize = 4;

    pub fn for_question(index: usize) -> Option<Placement> {
        (index == Self::MID_QUIZ_QUESTION).then_some(Placement::MidQuiz)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStyle {
    pub display: String,
    pub min_height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdSlot {
    pub ad_client: String,
    pub ad_slot: String,
    pub ad_format: String,
    pub style: SlotStyle,
}

impl AdSlot {
    /// Message body for the slot (HTML parse mode).
    pub fn render(&self) -> String {
        format!(
            "📢 <i>광고</i>\n<code>{} · {} · {}</code>",
            self.ad_client, self.ad_slot, self.ad_format
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SponsorConfig {
    pub ad_client: String,
    pub ad_format: String,
    pub min_height: u32,
    pub intro_slot: String,
    pub mid_quiz_slot: String,
    pub result_slot: String,
}

impl SponsorConfig {
    pub fn slot(&self, placement: Placement) -> AdSlot {
        let ad_slot = match placement {
            Placement::Intro => &self.intro_slot,
            Placement::MidQuiz => &self.mid_quiz_slot,
            Placement::Result => &self.result_slot,
        };
        AdSlot {
            ad_client: self.ad_client.clone(),
            ad_slot: ad_slot.clone(),
            ad_format: self.ad_format.clone(),
            style: SlotStyle {
                display: "block".to_string(),
                min_height: self.min_height,
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdRequest {
    pub chat_id: ChatId,
    pub slot: AdSlot,
}

#[derive(Debug, Clone)]
pub struct AdQueue {
    inner: Option<(Arc<SponsorConfig>, mpsc::UnboundedSender<AdRequest>)>,
}

impl AdQueue {
    pub fn new(config: SponsorConfig) -> (Self, mpsc::UnboundedReceiver<AdRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                inner: Some((Arc::new(config), tx)),
            },
            rx,
        )
    }

    /// A queue that drops every slot, used when no sponsor is configured.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.is_some()
    }

    /// Fire-and-forget: never blocks and never fails the caller.
    pub fn push(&self, chat_id: ChatId, placement: Placement) {
        let Some((config, tx)) = &self.inner else {
            return;
        };
        let request = AdRequest {
            chat_id,
            slot: config.slot(placement),
        };
        if let Err(e) = tx.send(request) {
            log::error!("sponsor slot {:?} dropped: {}", placement, e);
        }
    }
}

/// Delivers queued slots until every [`AdQueue`] handle is gone.
pub async fn run_worker<F, Fut, E>(mut rx: mpsc::UnboundedReceiver<AdRequest>, mut deliver: F)
where
    F: FnMut(AdRequest) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    while let Some(request) = rx.recv().await {
        let slot = request.slot.ad_slot.clone();
        if let Err(e) = deliver(request).await {
            log::error!("sponsor slot {} failed: {}", slot, e);
        }
    }
    log::debug!("sponsor queue closed");
}
