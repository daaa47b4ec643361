
use nonempty::nonempty;

use std::sync::Arc;

use crate::commands::command::*;
use crate::utility::*;


pub struct WikipediaCommand {
    client: Arc<ContentClient>,
}

impl WikipediaCommand {
    pub fn new(client: Arc<ContentClient>) -> Self {
        WikipediaCommand { client }
    }
}

impl Command for WikipediaCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty!["wikipedia".to_string(), "wiki".to_string()]
        )
            .add_required("query")
            .example("Rust programming language")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let query = message.payload(None);
                if query.is_empty() {
                    self.invalid_usage(params).await;
                    return;
                }

                match self.client.wikipedia_summary(&query).await {
                    Ok(WikipediaLookup::Summary(summary)) => {
                        let _ = message.reply(summary).await;
                    }
                    Ok(WikipediaLookup::Ambiguous(options)) => {
                        message.reply_failure(&WikipediaLookup::ambiguity_message(&options)).await;
                    }
                    Err(why) => {
                        Logger::warn_long(&format!("Wikipedia lookup for {}", query), &format!("{:#}", why));
                        message.reply_failure(&why.to_string()).await;
                    }
                }
            }
        )
    }

}
