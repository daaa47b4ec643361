
use nonempty::nonempty;

use std::sync::Arc;

use crate::commands::command::*;
use crate::utility::*;


pub struct WordsCommand {
    client: Arc<ContentClient>,
    relation: WordRelation,
}

impl WordsCommand {

    pub fn new(client: Arc<ContentClient>, relation: WordRelation) -> Self {
        WordsCommand { client, relation }
    }

    fn trigger(&self) -> &'static str {
        match self.relation {
            WordRelation::Synonym => "synonym",
            WordRelation::Antonym => "antonym",
        }
    }

}

pub fn format_words(relation: WordRelation, word: &str, words: &[String]) -> String {
    match words.is_empty() {
        true  => format!("No {} found for {}", relation.to_string().to_lowercase(), word),
        false => format!("{} for {}:\n{}", relation, word, words.join(", ")),
    }
}

impl Command for WordsCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty![self.trigger().to_string()]
        )
            .add_required("word")
            .example("happy")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let word = match message.word(0) {
                    Some(word) => word.to_string(),
                    None => {
                        self.invalid_usage(params).await;
                        return;
                    }
                };

                match self.client.related_words(self.relation, &word).await {
                    Ok(words) => {
                        let _ = message.reply(format_words(self.relation, &word, &words)).await;
                    }
                    Err(why) => {
                        Logger::err_long(&format!("Could not look up {}", word), &format!("{:#}", why));
                        message.reply_failure("Something went wrong, please try again").await;
                    }
                }
            }
        )
    }

}
