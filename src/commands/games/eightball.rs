
use nonempty::nonempty;
use rand::Rng;

use crate::commands::command::*;
use crate::utility::*;


pub struct EightBallCommand;

impl EightBallCommand {

    pub const OPTIONS: [&'static str; 5] = [
        "indeed",
        "undoubtedly",
        "no",
        "dunno",
        "indecisive",
    ];

    fn random_option(rng: &mut impl Rng) -> &'static str {
        EightBallCommand::OPTIONS[rng.random_range(0..EightBallCommand::OPTIONS.len())]
    }

    fn answer(question: &str, option: &str) -> String {
        format!("> {}\n:8ball: {}", question, option)
    }

}

impl Command for EightBallCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Games,
            nonempty!["8ball".to_string(), "eightball".to_string()]
        )
            .add_required("question")
            .example("Will I get a promotion to moderator next week?")
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let question = message.payload(None);

                if question.is_empty() {
                    self.invalid_usage(params).await;
                    return;
                }

                let option = EightBallCommand::random_option(&mut rand::rng());
                let _ = message.reply(EightBallCommand::answer(&question, option)).await;
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn answers_quote_the_question() {
        let mut rng = StdRng::seed_from_u64(8);
        let option = EightBallCommand::random_option(&mut rng);
        assert!(EightBallCommand::OPTIONS.contains(&option));
        assert_eq!(EightBallCommand::answer("Is it Friday?", "no"), "> Is it Friday?\n:8ball: no");
    }
}
