//! Prices and display labels for line items.
//!
//! Both [`price`] and [`label`] are total: an item the catalog does not know
//! still gets a price (the generic fallback) and a label, because a receipt
//! must always print.

mod receipt;

pub use receipt::*;

use crate::model::{
    AddOn, CatalogEntry, DrinkItem, DrinkName, IceLevel, MenuToken, Milk, Money, OrderItem,
    OrderState, PastryItem, PastryName, Size, Sweetness,
};

/// `[small, large]` for a drink the catalog does not know.
pub const FALLBACK_DRINK_PRICES: [Money; 2] = [Money::from_cents(400), Money::from_cents(500)];

/// Unit price for a pastry the catalog does not know.
pub const FALLBACK_PASTRY_PRICE: Money = Money::from_cents(300);

/// `[small, large]` base price of a drink.
pub fn drink_prices(name: DrinkName) -> [Money; 2] {
    let (small, large) = match name {
        DrinkName::Americano => (300, 400),
        DrinkName::Latte => (400, 500),
        DrinkName::ColdBrew => (400, 500),
        DrinkName::Mocha => (450, 550),
        DrinkName::Frappuccino => (550, 600),
        DrinkName::BlackTea => (300, 375),
        DrinkName::JasmineTea => (300, 375),
        DrinkName::LemonGreenTea => (350, 425),
        DrinkName::MatchaLatte => (450, 525),
    };
    [Money::from_cents(small), Money::from_cents(large)]
}

pub fn milk_upcharge(milk: Milk) -> Money {
    match milk {
        Milk::Whole | Milk::Skim => Money::ZERO,
        Milk::Oat => Money::from_cents(50),
        Milk::Almond => Money::from_cents(75),
    }
}

pub fn add_on_price(add_on: AddOn) -> Money {
    match add_on {
        AddOn::ExtraEspressoShot | AddOn::ExtraMatchaShot => Money::from_cents(150),
        AddOn::CaramelSyrup | AddOn::HazelnutSyrup => Money::from_cents(50),
    }
}

/// Unit price of a pastry, before quantity.
pub fn pastry_unit_price(item: &PastryItem) -> Money {
    match item.name.known() {
        Some(PastryName::PlainCroissant) => Money::from_cents(350),
        Some(PastryName::ChocolateCroissant) => Money::from_cents(400),
        Some(PastryName::ChocolateChipCookie) => Money::from_cents(250),
        Some(PastryName::BananaBread) => Money::from_cents(300),
        None => FALLBACK_PASTRY_PRICE,
    }
}

fn drink_price(item: &DrinkItem) -> Money {
    let prices = item
        .name
        .known()
        .map(drink_prices)
        .unwrap_or(FALLBACK_DRINK_PRICES);

    // A missing or unrecognized size is charged as small.
    let base = match item.size.as_ref().and_then(MenuToken::known) {
        Some(Size::Large) => prices[1],
        Some(Size::Small) | None => prices[0],
    };

    let milk = item
        .milk
        .as_ref()
        .and_then(MenuToken::known)
        .map(milk_upcharge)
        .unwrap_or(Money::ZERO);

    let add_ons: Money = item
        .add_ons
        .iter()
        .filter_map(MenuToken::known)
        .map(add_on_price)
        .sum();

    base + milk + add_ons
}

/// Price of one line: base + milk upcharge + every add-on entry for a drink,
/// unit price times quantity for a pastry, zero for anything else.
pub fn price(item: &OrderItem) -> Money {
    match item {
        OrderItem::Drink(drink) => drink_price(drink),
        OrderItem::Pastry(pastry) => pastry_unit_price(pastry).times(i64::from(pastry.quantity)),
        OrderItem::Unrecognized => Money::ZERO,
    }
}

/// Sum of [`price`] over every line.
pub fn order_total(state: &OrderState) -> Money {
    state.items.iter().map(price).sum()
}

/// `"extra_espresso_shot"` becomes `"Extra Espresso Shot"`.
pub fn title_case(token: &str) -> String {
    token
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn add_on_label(add_on: &MenuToken<AddOn>) -> String {
    match add_on.known() {
        Some(AddOn::ExtraEspressoShot) => "Extra Shot".to_string(),
        Some(AddOn::ExtraMatchaShot) => "Extra Matcha".to_string(),
        Some(other) => title_case(other.as_str()),
        None => title_case(add_on.as_str()),
    }
}

fn drink_label(item: &DrinkItem) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(size) = &item.size {
        parts.push(title_case(size.as_str()));
    }
    if let Some(temperature) = &item.temperature {
        parts.push(title_case(temperature.as_str()));
    }
    parts.push(title_case(item.name.as_str()));
    if let Some(milk) = &item.milk {
        parts.push(format!("{} Milk", title_case(milk.as_str())));
    }
    if let Some(sweetness) = &item.sweetness {
        if !sweetness.is(Sweetness::Regular) {
            parts.push(title_case(sweetness.as_str()));
        }
    }
    if let Some(ice_level) = &item.ice_level {
        if item.is_iced() && !ice_level.is(IceLevel::Regular) {
            parts.push(title_case(ice_level.as_str()));
        }
    }
    for add_on in &item.add_ons {
        parts.push(format!("+ {}", add_on_label(add_on)));
    }
    parts.join(" · ")
}

/// Human-readable description of a line, e.g. `"Large · Iced · Latte · Oat Milk · + Extra Shot"`.
pub fn label(item: &OrderItem) -> String {
    match item {
        OrderItem::Drink(drink) => drink_label(drink),
        OrderItem::Pastry(pastry) => {
            let name = title_case(pastry.name.as_str());
            if pastry.quantity > 1 {
                format!("{} ×{}", name, pastry.quantity)
            } else {
                name
            }
        }
        OrderItem::Unrecognized => "Unknown item".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_drink_price_is_base_plus_milk_plus_add_ons() {
        for &name in DrinkName::ALL {
            for (idx, size) in [Size::Small, Size::Large].into_iter().enumerate() {
                let item: OrderItem = DrinkItem::new(name)
                    .with_size(size)
                    .with_milk(Milk::Almond)
                    .with_add_on(AddOn::CaramelSyrup)
                    .with_add_on(AddOn::ExtraEspressoShot)
                    .into();
                let expected = drink_prices(name)[idx] + cents(75) + cents(50) + cents(150);
                assert_eq!(price(&item), expected, "{name} {size}");
            }
        }
    }

    #[test]
    fn test_price_ignores_add_on_order_but_label_keeps_it() {
        let a: OrderItem = DrinkItem::new(DrinkName::Mocha)
            .with_add_on(AddOn::HazelnutSyrup)
            .with_add_on(AddOn::ExtraEspressoShot)
            .into();
        let b: OrderItem = DrinkItem::new(DrinkName::Mocha)
            .with_add_on(AddOn::ExtraEspressoShot)
            .with_add_on(AddOn::HazelnutSyrup)
            .into();
        assert_eq!(price(&a), price(&b));
        assert_eq!(label(&a), "Mocha · + Hazelnut Syrup · + Extra Shot");
        assert_eq!(label(&b), "Mocha · + Extra Shot · + Hazelnut Syrup");
    }

    #[test]
    fn test_repeated_add_ons_charge_each_entry() {
        let item: OrderItem = DrinkItem::new(DrinkName::Latte)
            .with_size(Size::Small)
            .with_add_on(AddOn::CaramelSyrup)
            .with_add_on(AddOn::CaramelSyrup)
            .into();
        assert_eq!(price(&item), cents(400 + 50 + 50));
    }

    #[test]
    fn test_missing_size_is_charged_as_small() {
        let item: OrderItem = DrinkItem::new(DrinkName::Frappuccino).into();
        assert_eq!(price(&item), cents(550));
    }

    #[test]
    fn test_unknown_names_use_fallback_prices() {
        let drink: OrderItem = DrinkItem::new(MenuToken::Unrecognized("pumpkin_spice".into()))
            .with_size(Size::Large)
            .into();
        assert_eq!(price(&drink), cents(500));

        let small: OrderItem = DrinkItem::new(MenuToken::Unrecognized("pumpkin_spice".into())).into();
        assert_eq!(price(&small), cents(400));

        let pastry: OrderItem = PastryItem::new(MenuToken::Unrecognized("scone".into()), 2).into();
        assert_eq!(price(&pastry), cents(600));

        assert_eq!(price(&OrderItem::Unrecognized), Money::ZERO);
    }

    #[test]
    fn test_pastry_price_multiplies_quantity() {
        let item: OrderItem = PastryItem::new(PastryName::ChocolateCroissant, 3).into();
        assert_eq!(price(&item), cents(1200));
    }

    #[test]
    fn test_whole_and_skim_milk_are_free() {
        let whole: OrderItem = DrinkItem::new(DrinkName::Latte).with_milk(Milk::Whole).into();
        let skim: OrderItem = DrinkItem::new(DrinkName::Latte).with_milk(Milk::Skim).into();
        let oat: OrderItem = DrinkItem::new(DrinkName::Latte).with_milk(Milk::Oat).into();
        assert_eq!(price(&whole), cents(400));
        assert_eq!(price(&skim), cents(400));
        assert_eq!(price(&oat), cents(450));
    }

    #[test]
    fn test_full_drink_label() {
        let item: OrderItem = DrinkItem::new(DrinkName::Latte)
            .with_size(Size::Large)
            .with_temperature(Temperature::Iced)
            .with_milk(Milk::Oat)
            .with_sweetness(Sweetness::LessSugar)
            .with_ice_level(IceLevel::ExtraIce)
            .with_add_on(AddOn::ExtraEspressoShot)
            .into();
        assert_eq!(
            label(&item),
            "Large · Iced · Latte · Oat Milk · Less Sugar · Extra Ice · + Extra Shot"
        );
    }

    #[test]
    fn test_label_hides_defaults_and_hot_ice_level() {
        let item: OrderItem = DrinkItem::new(DrinkName::Americano)
            .with_size(Size::Small)
            .with_temperature(Temperature::Hot)
            .with_sweetness(Sweetness::Regular)
            .with_ice_level(IceLevel::NoIce)
            .into();
        assert_eq!(label(&item), "Small · Hot · Americano");
    }

    #[test]
    fn test_pastry_label_quantity_suffix() {
        let one: OrderItem = PastryItem::new(PastryName::BananaBread, 1).into();
        let three: OrderItem = PastryItem::new(PastryName::ChocolateChipCookie, 3).into();
        assert_eq!(label(&one), "Banana Bread");
        assert_eq!(label(&three), "Chocolate Chip Cookie ×3");
        assert_eq!(label(&OrderItem::Unrecognized), "Unknown item");
    }

    #[test]
    fn test_order_total() {
        let state = OrderState::new(vec![
            DrinkItem::new(DrinkName::ColdBrew).with_size(Size::Large).into(),
            PastryItem::new(PastryName::PlainCroissant, 2).into(),
        ]);
        assert_eq!(order_total(&state), cents(500 + 700));
    }
}
