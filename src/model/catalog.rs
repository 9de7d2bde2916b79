//! The fixed menu: drink and pastry names, modifier vocabularies and the
//! membership predicates the rest of the engine branches on.
//!
//! Every catalog-valued field on an order item is carried as a [`MenuToken`],
//! so a candidate order that names something off-menu still parses and the
//! rules engine (not the JSON layer) gets to report it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Common behaviour of every catalog enum.
pub trait CatalogEntry: Copy + Eq + 'static {
    /// Every entry, in menu order.
    const ALL: &'static [Self];

    /// The snake_case wire token.
    fn as_str(&self) -> &'static str;

    /// Looks a wire token up in the catalog.
    fn parse(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|entry| entry.as_str() == token)
    }
}

macro_rules! catalog {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $token)] $variant),+
        }

        impl CatalogEntry for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

catalog! {
    /// Every drink on the menu, coffee family first.
    DrinkName {
        Americano => "americano",
        Latte => "latte",
        ColdBrew => "cold_brew",
        Mocha => "mocha",
        Frappuccino => "frappuccino",
        BlackTea => "black_tea",
        JasmineTea => "jasmine_tea",
        LemonGreenTea => "lemon_green_tea",
        MatchaLatte => "matcha_latte",
    }
}

catalog! {
    PastryName {
        PlainCroissant => "plain_croissant",
        ChocolateCroissant => "chocolate_croissant",
        ChocolateChipCookie => "chocolate_chip_cookie",
        BananaBread => "banana_bread",
    }
}

catalog! {
    /// Cup size: small is 12oz, large is 16oz.
    Size {
        Small => "small",
        Large => "large",
    }
}

catalog! {
    Temperature {
        Hot => "hot",
        Iced => "iced",
    }
}

catalog! {
    Milk {
        Whole => "whole",
        Skim => "skim",
        Oat => "oat",
        Almond => "almond",
    }
}

catalog! {
    /// Sweetness; a null field means `Regular`.
    Sweetness {
        NoSugar => "no_sugar",
        LessSugar => "less_sugar",
        Regular => "regular",
        ExtraSugar => "extra_sugar",
    }
}

catalog! {
    /// Ice level; a null field means `Regular`. Only meaningful for iced drinks.
    IceLevel {
        NoIce => "no_ice",
        LessIce => "less_ice",
        Regular => "regular",
        ExtraIce => "extra_ice",
    }
}

catalog! {
    /// Add-on tokens. Repeats are meaningful: two `caramel_syrup` entries are two pumps.
    AddOn {
        ExtraEspressoShot => "extra_espresso_shot",
        ExtraMatchaShot => "extra_matcha_shot",
        CaramelSyrup => "caramel_syrup",
        HazelnutSyrup => "hazelnut_syrup",
    }
}

/// The two menu families drinks are partitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrinkFamily {
    Coffee,
    Tea,
}

impl DrinkName {
    pub fn family(&self) -> DrinkFamily {
        match self {
            DrinkName::Americano
            | DrinkName::Latte
            | DrinkName::ColdBrew
            | DrinkName::Mocha
            | DrinkName::Frappuccino => DrinkFamily::Coffee,
            DrinkName::BlackTea
            | DrinkName::JasmineTea
            | DrinkName::LemonGreenTea
            | DrinkName::MatchaLatte => DrinkFamily::Tea,
        }
    }

    pub fn is_coffee_family(&self) -> bool {
        self.family() == DrinkFamily::Coffee
    }

    pub fn is_tea_family(&self) -> bool {
        self.family() == DrinkFamily::Tea
    }

    /// Cold brew and frappuccino cannot be served hot.
    pub fn is_iced_only(&self) -> bool {
        matches!(self, DrinkName::ColdBrew | DrinkName::Frappuccino)
    }

    /// Drinks whose recipe is built on milk and therefore need a milk choice.
    pub fn is_milk_required(&self) -> bool {
        matches!(
            self,
            DrinkName::Latte | DrinkName::Mocha | DrinkName::MatchaLatte
        )
    }

    /// Teas with no espresso or matcha base. Espresso shots make no sense here.
    pub fn is_pure_tea(&self) -> bool {
        self.is_tea_family() && *self != DrinkName::MatchaLatte
    }
}

impl AddOn {
    /// Per-item cap on repeated entries of this token, if any.
    pub fn max_per_item(&self) -> Option<usize> {
        match self {
            AddOn::ExtraEspressoShot => Some(4),
            AddOn::CaramelSyrup | AddOn::HazelnutSyrup => Some(6),
            AddOn::ExtraMatchaShot => None,
        }
    }
}

pub fn is_drink_name(token: &str) -> bool {
    DrinkName::parse(token).is_some()
}

pub fn is_pastry_name(token: &str) -> bool {
    PastryName::parse(token).is_some()
}

// =============================================================================
// MENU TOKENS
// =============================================================================

/// A catalog value as received from an untrusted producer.
///
/// Deserialization tries the catalog first and falls back to keeping the raw
/// string, so `"pumpkin_spice"` parses as `Unrecognized("pumpkin_spice")`
/// instead of failing the whole order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuToken<T> {
    Known(T),
    Unrecognized(String),
}

impl<T: CatalogEntry> MenuToken<T> {
    /// Builds a token from a raw string, recognizing catalog entries.
    pub fn from_token(token: &str) -> Self {
        match T::parse(token) {
            Some(entry) => MenuToken::Known(entry),
            None => MenuToken::Unrecognized(token.to_string()),
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            MenuToken::Known(entry) => Some(*entry),
            MenuToken::Unrecognized(_) => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, MenuToken::Known(_))
    }

    pub fn is(&self, entry: T) -> bool {
        self.known() == Some(entry)
    }

    pub fn as_str(&self) -> &str {
        match self {
            MenuToken::Known(entry) => entry.as_str(),
            MenuToken::Unrecognized(raw) => raw,
        }
    }
}

impl<T> From<T> for MenuToken<T> {
    fn from(entry: T) -> Self {
        MenuToken::Known(entry)
    }
}

impl<T: CatalogEntry> Display for MenuToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drink_and_pastry_catalogs_are_disjoint() {
        for drink in DrinkName::ALL {
            assert!(!is_pastry_name(drink.as_str()));
        }
        for pastry in PastryName::ALL {
            assert!(!is_drink_name(pastry.as_str()));
        }
        assert!(is_drink_name("matcha_latte"));
        assert!(is_pastry_name("banana_bread"));
        assert!(!is_drink_name("pumpkin_spice_latte"));
    }

    #[test]
    fn test_families_partition_the_drinks() {
        let coffee: Vec<_> = DrinkName::ALL.iter().filter(|d| d.is_coffee_family()).collect();
        let tea: Vec<_> = DrinkName::ALL.iter().filter(|d| d.is_tea_family()).collect();
        assert_eq!(coffee.len(), 5);
        assert_eq!(tea.len(), 4);
        assert!(DrinkName::MatchaLatte.is_tea_family());
        assert!(!DrinkName::MatchaLatte.is_pure_tea());
        assert!(DrinkName::JasmineTea.is_pure_tea());
    }

    #[test]
    fn test_iced_only_and_milk_required_subsets() {
        let iced: Vec<_> = DrinkName::ALL.iter().filter(|d| d.is_iced_only()).copied().collect();
        assert_eq!(iced, vec![DrinkName::ColdBrew, DrinkName::Frappuccino]);

        let milk: Vec<_> = DrinkName::ALL.iter().filter(|d| d.is_milk_required()).copied().collect();
        assert_eq!(milk, vec![DrinkName::Latte, DrinkName::Mocha, DrinkName::MatchaLatte]);
    }

    #[test]
    fn test_menu_token_keeps_unrecognized_strings() {
        let known: MenuToken<Milk> = serde_json::from_str("\"oat\"").unwrap();
        assert_eq!(known, MenuToken::Known(Milk::Oat));

        let unknown: MenuToken<Milk> = serde_json::from_str("\"soy\"").unwrap();
        assert_eq!(unknown, MenuToken::Unrecognized("soy".to_string()));
        assert_eq!(unknown.as_str(), "soy");
        assert!(!unknown.is_known());

        assert_eq!(serde_json::to_string(&known).unwrap(), "\"oat\"");
    }

    #[test]
    fn test_from_token_matches_deserialization() {
        assert!(MenuToken::<AddOn>::from_token("caramel_syrup").is(AddOn::CaramelSyrup));
        assert!(!MenuToken::<AddOn>::from_token("whipped_cream").is_known());
    }
}
