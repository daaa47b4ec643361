
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::name::en::Name;
use fake::Fake;
use nonempty::nonempty;
use rand::Rng;

use crate::commands::command::*;
use crate::utility::*;


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeIdentity {
    pub name: String,
    pub street: String,
    pub city: String,
}

impl FakeIdentity {

    pub fn generate(rng: &mut impl Rng) -> Self {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let state: String = StateAbbr().fake_with_rng(rng);
        let zip: String = ZipCode().fake_with_rng(rng);
        FakeIdentity {
            name: Name().fake_with_rng(rng),
            street: format!("{} {}", number, street),
            city: format!("{}, {} {}", city, state, zip),
        }
    }

    /// Name on the first line, a two line postal address below.
    pub fn render(&self) -> String {
        format!("{}\n{}\n{}", self.name, self.street, self.city)
    }

}

pub struct FakeInfoCommand;

impl Command for FakeInfoCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Fun,
            nonempty!["fake-info".to_string(), "fakeinfo".to_string()]
        )
    }

    fn run(&self, params: CommandParams) -> BoxedFuture<'_, ()> {
        Box::pin(
            async move {
                let identity = FakeIdentity::generate(&mut rand::rng());
                let _ = params.message.reply(identity.render()).await;
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
    fn identities_are_complete_and_reproducible() {
        let first = FakeIdentity::generate(&mut StdRng::seed_from_u64(42));
        let again = FakeIdentity::generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, again);

        assert!(!first.name.trim().is_empty());
        assert!(first.street.chars().next().map_or(false, |c| c.is_ascii_digit()));
        assert!(first.city.contains(", "));
        assert_eq!(first.render().lines().count(), 3);
    }
}
