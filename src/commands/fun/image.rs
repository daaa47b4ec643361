
use serenity::model::id::UserId;
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::middleware::NoOpMiddleware;
use governor::{Quota, RateLimiter};
use nonempty::nonempty;
use strum_macros::{Display, EnumIter};

use std::num::NonZeroU32;
use std::time::Duration;

use crate::commands::command::*;
use crate::utility::*;


pub const IMAGE_COOLDOWN: Duration = Duration::from_secs(5);

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMeme {
    Rip,
    Uwu,
    Flag,
}

impl ImageMeme {

    pub fn trigger(&self) -> &'static str {
        match self {
            ImageMeme::Rip  => "rip",
            ImageMeme::Uwu  => "uwu",
            ImageMeme::Flag => "flag",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ImageMeme::Rip  => "Rest in peace",
            ImageMeme::Uwu  => "uwu discord",
            ImageMeme::Flag => "Fight under this flag",
        }
    }

}

/// One use per user and period.
pub struct Cooldown<C: Clock = DefaultClock> {
    limiter: RateLimiter<UserId, DefaultKeyedStateStore<UserId>, C, NoOpMiddleware<C::Instant>>,
    clock: C,
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Cooldown::with_clock(period, DefaultClock::default())
    }
}

impl<C: Clock> Cooldown<C> {

    pub fn with_clock(period: Duration, clock: C) -> Self {
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN));
        Cooldown {
            limiter: RateLimiter::dashmap_with_clock(quota, &clock),
            clock,
        }
    }

    /// Records a use, or returns the time left if the user is still cooling down.
    pub fn try_use(&self, user: UserId) -> Result<(), Duration> {
        // users whose cooldown ran out are forgotten
        self.limiter.retain_recent();
        self.limiter.check_key(&user)
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    pub fn tracked_users(&self) -> usize {
        self.limiter.len()
    }

}

pub struct ImageCommand {
    meme: ImageMeme,
    cooldown: Cooldown,
}

impl ImageCommand {
    pub fn new(meme: ImageMeme) -> Self {
        ImageCommand { meme, cooldown: Cooldown::new(IMAGE_COOLDOWN) }
    }
}

impl Command for ImageCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty![self.meme.trigger().to_string()]
        )
            .add_optional("user")
            .add_constant("-url")
            .add_optional("image url")
            .example("@Friend")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let author = message.get_author();
                if let Err(left) = self.cooldown.try_use(author.id) {
                    message.reply_failure(&format!("Slow down! Try again in {:.1}s.", left.as_secs_f32())).await;
                    return;
                }

                let user_avatar = match message.word(0).and_then(parse_user_id) {
                    Some(user_id) => match message.get_resolver().resolve_user(user_id).await {
                        Some(user) => Some(user.face()),
                        None => {
                            message.reply_failure("Could not find that user.").await;
                            return;
                        }
                    },
                    None => None,
                };
                let attachment = message.get_attachments().first().map(|attachment| attachment.url.clone());
                let explicit_url = message.get_parameter("url");

                let source = match ImageSource::select(author.face(), user_avatar, attachment, explicit_url) {
                    Ok(source) => source,
                    Err(why) => {
                        message.reply_failure(&why.to_string()).await;
                        return;
                    }
                };

                let embed = MessageManager::create_embed(|embed| {
                    embed
                        .title(self.meme.title())
                        .image(source.url())
                }).await;
                let _ = message.reply(embed).await;
            }
        )
    }

}
