
use nonempty::nonempty;

use std::sync::Arc;

use crate::commands::command::*;
use crate::utility::*;


/// One command per [`ContentSource`]: fetch and post the documented field.
pub struct ContentCommand {
    client: Arc<ContentClient>,
    source: ContentSource,
}

impl ContentCommand {
    pub fn new(client: Arc<ContentClient>, source: ContentSource) -> Self {
        ContentCommand { client, source }
    }
}

impl Command for ContentCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty![self.source.trigger().to_string()]
        )
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                match self.client.fetch(self.source).await {
                    Ok(content) => {
                        let _ = message.reply(content).await;
                    }
                    Err(why) => {
                        Logger::err_long(&format!("Could not fetch {}", self.source), &format!("{:#}", why));
                        message.reply_failure("Something went wrong, please try again").await;
                    }
                }
            }
        )
    }

}
