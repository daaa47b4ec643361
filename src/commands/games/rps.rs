
use serenity::model::id::UserId;
use nonempty::nonempty;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum_macros::{Display, EnumIter};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::command::*;
use crate::utility::*;


pub const WIN_REWARD: i64 = 50;
pub const MOVE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Rock,
    Paper,
    Scissors,
}

impl Move {

    pub fn index(&self) -> usize {
        match self {
            Move::Rock     => 0,
            Move::Paper    => 1,
            Move::Scissors => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Move> {
        match index {
            0 => Some(Move::Rock),
            1 => Some(Move::Paper),
            2 => Some(Move::Scissors),
            _ => None,
        }
    }

    /// `r`, `p` or `s` in any case.
    pub fn parse(token: &str) -> Option<Move> {
        match token.trim().to_lowercase().as_str() {
            "r" => Some(Move::Rock),
            "p" => Some(Move::Paper),
            "s" => Some(Move::Scissors),
            _   => None,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Move::Rock     => ":rock:",
            Move::Paper    => ":scroll:",
            Move::Scissors => ":scissors:",
        }
    }

}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Draw,
}

/// Rows are the player's move, columns the computer's.
const PAYOFF: [[Outcome; 3]; 3] = [
    [Outcome::Draw, Outcome::Lose, Outcome::Win],
    [Outcome::Win, Outcome::Draw, Outcome::Lose],
    [Outcome::Lose, Outcome::Win, Outcome::Draw],
];

pub fn payoff(player: Move, computer: Move) -> Outcome {
    PAYOFF[player.index()][computer.index()]
}

/// Source of the computer's randomness.
pub trait Dice: Send {
    fn roll_move(&mut self) -> Move;
    /// Whether a drawn loss stands; otherwise the computer draws again.
    fn accept_loss(&mut self) -> bool;
}

pub struct RandomDice<R: Rng + Send> {
    rng: R,
}

impl<R: Rng + Send> RandomDice<R> {
    pub fn new(rng: R) -> Self {
        RandomDice { rng }
    }
}

impl<R: Rng + Send> Dice for RandomDice<R> {
    fn roll_move(&mut self) -> Move {
        Move::from_index(self.rng.random_range(0..3)).unwrap_or(Move::Rock)
    }

    fn accept_loss(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Round {
    pub player: Move,
    pub computer: Move,
    pub outcome: Outcome,
}

/// Draws computer moves until the result stands. Wins and draws stand at once,
/// a loss only when the dice accept it.
pub fn play_round(player: Move, dice: &mut impl Dice) -> Round {
    loop {
        let computer = dice.roll_move();
        let outcome = payoff(player, computer);
        if outcome != Outcome::Lose || dice.accept_loss() {
            return Round { player, computer, outcome };
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpsOutcome {
    /// No move arrived in time; nothing was credited.
    Expired,
    Resolved(Round),
}

pub struct RpsEngine<D: Dice> {
    dice: D,
    economy: Arc<dyn EconomyService>,
    timeout: Duration,
}

impl<D: Dice> RpsEngine<D> {

    pub fn new(dice: D, economy: Arc<dyn EconomyService>) -> Self {
        RpsEngine { dice, economy, timeout: MOVE_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Waits for the player's move, resolves the round and pays out wins.
    pub async fn play(&mut self, player: UserId, next_move: impl Future<Output = Option<Move>>) -> anyhow::Result<RpsOutcome> {
        let received = match tokio::time::timeout(self.timeout, next_move).await {
            Ok(Some(received)) => received,
            Ok(None) | Err(_)  => return Ok(RpsOutcome::Expired),
        };

        let round = play_round(received, &mut self.dice);
        if round.outcome == Outcome::Win {
            self.economy.add_currency(player, WIN_REWARD, Account::Wallet).await?;
        }
        Ok(RpsOutcome::Resolved(round))
    }

}

pub fn describe(outcome: &RpsOutcome) -> String {
    match outcome {
        RpsOutcome::Expired => "You took too long to pick a move.".to_string(),
        RpsOutcome::Resolved(round) => {
            let verdict = match round.outcome {
                Outcome::Win  => format!("You win! +{} beans", WIN_REWARD),
                Outcome::Lose => "I win!".to_string(),
                Outcome::Draw => "Draw!".to_string(),
            };
            format!("{} vs {}\n{}", round.player.emoji(), round.computer.emoji(), verdict)
        }
    }
}

pub struct RpsCommand {
    economy: Arc<dyn EconomyService>,
}

impl RpsCommand {
    pub fn new(economy: Arc<dyn EconomyService>) -> Self {
        RpsCommand { economy }
    }
}

impl Command for RpsCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Games,
            nonempty!["rps".to_string()]
        )
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {

                let message = &params.message;
                let prompt = "Send R for :rock:, send P for :scroll:, send S for :scissors:";
                if let Err(why) = message.reply(prompt).await {
                    Logger::warn_long("Could not start rps", &why);
                    return;
                }

                let collector = message.get_channel()
                    .await_reply(&message.get_resolver().ctx().shard)
                    .author_id(message.get_author().id)
                    .filter(|reply| Move::parse(&reply.content).is_some());
                let next_move = async move {
                    collector.await.and_then(|reply| Move::parse(&reply.content))
                };

                let mut engine = RpsEngine::new(
                    RandomDice::new(StdRng::from_os_rng()),
                    Arc::clone(&self.economy));
                match engine.play(message.get_author().id, next_move).await {
                    Ok(RpsOutcome::Expired) => message.reply_temporary(describe(&RpsOutcome::Expired)).await,
                    Ok(outcome) => {
                        let _ = message.reply(describe(&outcome)).await;
                    }
                    Err(why) => {
                        Logger::err_long("Could not credit rps win", &why.to_string());
                        message.reply_failure("Something went wrong, please try again").await;
                    }
                }
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::databases::*;
    use std::collections::VecDeque;

    struct ScriptedDice {
        moves: VecDeque<Move>,
        accepts: VecDeque<bool>,
        rolls: usize,
    }

    impl ScriptedDice {
        fn new(moves: Vec<Move>, accepts: Vec<bool>) -> Self {
            ScriptedDice { moves: moves.into(), accepts: accepts.into(), rolls: 0 }
        }
    }

    impl Dice for ScriptedDice {
        fn roll_move(&mut self) -> Move {
            self.rolls += 1;
            self.moves.pop_front().expect("script ran out of moves")
        }

        fn accept_loss(&mut self) -> bool {
            self.accepts.pop_front().expect("script ran out of loss decisions")
        }
    }

    fn balances() -> Arc<BalancesDB> {
        Arc::new(BalancesDB::with_database(Database::in_memory(DB::Balances)))
    }

    #[test]
    fn payoff_table() {
        assert_eq!(payoff(Move::Rock, Move::Scissors), Outcome::Win);
        assert_eq!(payoff(Move::Rock, Move::Paper), Outcome::Lose);
        assert_eq!(payoff(Move::Paper, Move::Rock), Outcome::Win);
        assert_eq!(payoff(Move::Scissors, Move::Rock), Outcome::Lose);
        assert_eq!(payoff(Move::Scissors, Move::Scissors), Outcome::Draw);
    }

    #[test]
    fn moves_parse_case_insensitively() {
        assert_eq!(Move::parse("R"), Some(Move::Rock));
        assert_eq!(Move::parse(" p "), Some(Move::Paper));
        assert_eq!(Move::parse("s"), Some(Move::Scissors));
        assert_eq!(Move::parse("rock"), None);
    }

    #[test]
    fn rejected_losses_are_redrawn() {
        let mut dice = ScriptedDice::new(vec![Move::Paper, Move::Paper, Move::Rock], vec![false, false]);
        let round = play_round(Move::Rock, &mut dice);
        assert_eq!(round.outcome, Outcome::Draw);
        assert_eq!(dice.rolls, 3);
    }

    #[test]
    fn losses_stand_only_when_accepted() {
        let mut dice = ScriptedDice::new(vec![Move::Paper], vec![true]);
        let round = play_round(Move::Rock, &mut dice);
        assert_eq!(round, Round { player: Move::Rock, computer: Move::Paper, outcome: Outcome::Lose });
        assert!(dice.accepts.is_empty());
    }

    #[test]
    fn wins_never_consult_the_dice() {
        let mut dice = ScriptedDice::new(vec![Move::Scissors], vec![]);
        assert_eq!(play_round(Move::Rock, &mut dice).outcome, Outcome::Win);
    }

    #[tokio::test]
    async fn win_credits_the_wallet() {
        let economy = balances();
        let player = UserId::new(9);
        let mut engine = RpsEngine::new(ScriptedDice::new(vec![Move::Scissors], vec![]), economy.clone());

        let outcome = engine.play(player, async { Some(Move::Rock) }).await.unwrap();

        assert!(matches!(outcome, RpsOutcome::Resolved(Round { outcome: Outcome::Win, .. })));
        assert_eq!(economy.balance(player, Account::Wallet).await.unwrap(), WIN_REWARD);
        assert!(describe(&outcome).ends_with("You win! +50 beans"));
    }

    #[tokio::test]
    async fn draw_and_loss_credit_nothing() {
        let economy = balances();
        let player = UserId::new(9);
        let mut engine = RpsEngine::new(
            ScriptedDice::new(vec![Move::Rock, Move::Paper], vec![true]),
            economy.clone());

        engine.play(player, async { Some(Move::Rock) }).await.unwrap();
        engine.play(player, async { Some(Move::Rock) }).await.unwrap();

        assert_eq!(economy.balance(player, Account::Wallet).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn silence_expires_without_credit() {
        let economy = balances();
        let player = UserId::new(9);
        let mut engine = RpsEngine::new(ScriptedDice::new(vec![], vec![]), economy.clone())
            .with_timeout(Duration::from_millis(20));

        let outcome = engine.play(player, std::future::pending::<Option<Move>>()).await.unwrap();

        assert_eq!(outcome, RpsOutcome::Expired);
        assert_eq!(economy.balance(player, Account::Wallet).await.unwrap(), 0);
        assert_eq!(describe(&outcome), "You took too long to pick a move.");
    }

    #[tokio::test]
    async fn closed_collector_expires() {
        let mut engine = RpsEngine::new(ScriptedDice::new(vec![], vec![]), balances());
        let outcome = engine.play(UserId::new(9), async { None }).await.unwrap();
        assert_eq!(outcome, RpsOutcome::Expired);
    }
}
