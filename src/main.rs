mod config;
mod flow;
mod messages;
mod quiz;
mod sponsor;

use std::sync::Arc;

use dotenv::dotenv;
use flow::{Keyboard, Reply};
use quiz::{catalog::Catalog, session::QuizSession};
use sponsor::{AdQueue, AdRequest, Placement};
use teloxide::{
    dispatching::dialogue::InMemStorage,
    prelude::*,
    types::{KeyboardButton, KeyboardMarkup, ParseMode},
};

type QuizDialogue = Dialogue<State, InMemStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default)]
pub enum State {
    #[default]
    Start,
    Quiz {
        session: QuizSession,
    },
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenv();

    pretty_env_logger::init();
    log::info!("Starting teto-egen quiz bot...");
    if let Err(e) = dotenv_result {
        log::warn!("no .env loaded: {}", e);
    }

    let config = config::BotConfig::from_env();
    let catalog = Arc::new(Catalog::builtin().expect("built-in quiz catalog is malformed"));
    log::info!(
        "Catalog loaded: {} questions, {} personality types",
        catalog.question_count(),
        catalog.personality_types().count()
    );

    let bot = Bot::from_env();

    let ads = match config.sponsor {
        Some(sponsor) => {
            log::info!("Sponsor slots enabled for {}", sponsor.ad_client);
            let (queue, rx) = AdQueue::new(sponsor);
            let worker_bot = bot.clone();
            tokio::spawn(sponsor::run_worker(rx, move |request: AdRequest| {
                let bot = worker_bot.clone();
                async move {
                    bot.send_message(request.chat_id, request.slot.render())
                        .parse_mode(ParseMode::Html)
                        .await
                        .map(|_| ())
                }
            }));
            queue
        }
        None => AdQueue::disabled(),
    };
    if !ads.is_enabled() {
        log::info!("Sponsor slots disabled, SPONSOR_AD_CLIENT is not set");
    }

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, InMemStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz_step)),
    )
    .dependencies(dptree::deps![InMemStorage::<State>::new(), catalog, ads])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

fn keyboard(kind: Keyboard, session: &QuizSession) -> KeyboardMarkup {
    let single = |text: &str| KeyboardMarkup::new(vec![vec![KeyboardButton::new(text)]]);
    match kind {
        Keyboard::Start => single(messages::START_BUTTON),
        Keyboard::Restart => single(messages::RESTART_BUTTON),
        Keyboard::Gender => KeyboardMarkup::new(vec![
            vec![KeyboardButton::new(messages::MALE_BUTTON)],
            vec![KeyboardButton::new(messages::FEMALE_BUTTON)],
        ]),
        // One answer per row, in the shuffled order.
        Keyboard::Answers => KeyboardMarkup::new(
            session
                .displayed_answers()
                .iter()
                .map(|a| vec![KeyboardButton::new(a.text.clone())])
                .collect::<Vec<_>>(),
        ),
    }
}

fn render(session: &QuizSession, reply: Reply) -> Option<(String, Option<Keyboard>)> {
    match reply {
        Reply::Intro => Some((messages::intro_text(session.catalog()), Some(Keyboard::Start))),
        Reply::GenderPrompt => Some((messages::GENDER_PROMPT.to_string(), Some(Keyboard::Gender))),
        Reply::Question => {
            messages::question_text(session).map(|text| (text, Some(Keyboard::Answers)))
        }
        Reply::Result => session.result().map(|result| {
            (
                messages::result_text(session.catalog(), result),
                Some(Keyboard::Restart),
            )
        }),
        Reply::Hint(text, kind) => Some((text.to_string(), kind)),
    }
}

async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    session: &QuizSession,
    reply: Reply,
) -> HandlerResult {
    let Some((text, kind)) = render(session, reply) else {
        return Ok(());
    };
    let mut request = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
    if let Some(kind) = kind {
        request = request.reply_markup(keyboard(kind, session));
    }
    request.await?;
    Ok(())
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    catalog: Arc<Catalog>,
    ads: AdQueue,
) -> HandlerResult {
    log::debug!("new session for chat {:?}", msg.chat.id);
    let session = QuizSession::new(catalog);
    send_reply(&bot, msg.chat.id, &session, Reply::Intro).await?;
    ads.push(msg.chat.id, Placement::Intro);

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn quiz_step(
    bot: Bot,
    dialogue: QuizDialogue,
    mut session: QuizSession,
    msg: Message,
    ads: AdQueue,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let text = msg.text().unwrap_or_default();

    let outcome = flow::handle_text(&mut session, text, &mut rand::thread_rng())?;
    for reply in &outcome.replies {
        send_reply(&bot, chat_id, &session, *reply).await?;
    }
    for placement in &outcome.ads {
        ads.push(chat_id, *placement);
    }

    if outcome.advanced {
        dialogue.update(State::Quiz { session }).await?;
    }
    Ok(())
}
