
use nonempty::nonempty;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::commands::command::*;
use crate::utility::*;


const FIRST: [&str; 20] = [
    "artless", "bawdy", "beslubbering", "bootless", "churlish",
    "cockered", "clouted", "craven", "currish", "dankish",
    "dissembling", "droning", "errant", "fawning", "fobbing",
    "froward", "frothy", "gleeking", "goatish", "gorbellied",
];

const SECOND: [&str; 20] = [
    "base-court", "bat-fowling", "beef-witted", "beetle-headed", "boil-brained",
    "clapper-clawed", "clay-brained", "common-kissing", "crook-pated", "dismal-dreaming",
    "dizzy-eyed", "doghearted", "dread-bolted", "earth-vexing", "elf-skinned",
    "fat-kidneyed", "fen-sucked", "flap-mouthed", "fly-bitten", "folly-fallen",
];

const NOUN: [&str; 20] = [
    "apple-john", "baggage", "barnacle", "bladder", "boar-pig",
    "bugbear", "bum-bailey", "canker-blossom", "clack-dish", "clotpole",
    "coxcomb", "codpiece", "death-token", "dewberry", "flap-dragon",
    "flax-wench", "flirt-gill", "foot-licker", "fustilarian", "giglet",
];

/// One word from each column.
pub fn shakespearean_insult(rng: &mut impl Rng) -> String {
    let first = FIRST.choose(rng).unwrap_or(&FIRST[0]);
    let second = SECOND.choose(rng).unwrap_or(&SECOND[0]);
    let noun = NOUN.choose(rng).unwrap_or(&NOUN[0]);
    format!("Thou {} {} {}!", first, second, noun)
}

pub struct InsultCommand;

impl Command for InsultCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty!["shakespearean-insult".to_string(), "insult".to_string()]
        )
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {
                let insult = shakespearean_insult(&mut rand::rng());
                let _ = params.message.reply(insult).await;
            }
        )
    }

}
