//! Menu and safety rules for an order.
//!
//! [`validate`] never fails: it returns every problem it finds, in item order,
//! and callers decide whether any error blocks completion. The only check that
//! stops early is the order-size ceiling, because an oversized order has to be
//! split by a person regardless of what its items say.

use serde::{Deserialize, Serialize};

use crate::model::{
    AddOn, CatalogEntry, DrinkItem, DrinkName, IceLevel, MenuToken, OrderItem, OrderState,
    PastryItem,
};

/// Most items a single self-service order may hold.
pub const MAX_ITEMS_PER_ORDER: usize = 15;

/// Most units of one pastry line.
pub const MAX_PASTRY_QUANTITY: i32 = 10;

/// Which family of rule an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Off-menu name or an item that is not a drink or pastry.
    Structural,
    /// A required field the conversation still has to ask for.
    MissingField,
    /// Fields that are fine alone but contradict each other or the menu.
    BusinessRule,
    /// Caps on counts and quantities; these point the customer elsewhere.
    Capacity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub message: String,
    /// `None` for an order-level error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    pub kind: ErrorKind,
}

impl ValidationError {
    fn order(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            item_index: None,
            kind,
        }
    }

    fn item(index: usize, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            item_index: Some(index),
            kind,
        }
    }

    pub fn is_order_level(&self) -> bool {
        self.item_index.is_none()
    }
}

/// Validates a whole order. Identical input always yields identical output.
pub fn validate(state: &OrderState) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if state.items.len() > MAX_ITEMS_PER_ORDER {
        errors.push(ValidationError::order(
            ErrorKind::Capacity,
            format!(
                "That's a lot! We can only handle up to {} items per order through voice ordering. \
                 For larger orders, please visit us in-store.",
                MAX_ITEMS_PER_ORDER
            ),
        ));
        return errors;
    }

    for (index, item) in state.items.iter().enumerate() {
        match item {
            OrderItem::Drink(drink) => validate_drink(index, drink, &mut errors),
            OrderItem::Pastry(pastry) => validate_pastry(index, pastry, &mut errors),
            OrderItem::Unrecognized => errors.push(ValidationError::item(
                index,
                ErrorKind::Structural,
                "Item must be a drink or pastry.",
            )),
        }
    }

    errors
}

fn is_valid<T: CatalogEntry>(field: &Option<MenuToken<T>>) -> bool {
    field.as_ref().is_some_and(MenuToken::is_known)
}

fn is_unrecognized<T: CatalogEntry>(field: &Option<MenuToken<T>>) -> bool {
    field.as_ref().is_some_and(|token| !token.is_known())
}

fn validate_drink(index: usize, drink: &DrinkItem, errors: &mut Vec<ValidationError>) {
    let push = |errors: &mut Vec<ValidationError>, kind, message: String| {
        errors.push(ValidationError::item(index, kind, message));
    };

    let Some(name) = drink.name.known() else {
        push(errors, ErrorKind::Structural, "That drink isn't on our menu.".into());
        return;
    };

    if !is_valid(&drink.size) {
        push(
            errors,
            ErrorKind::MissingField,
            "We need a size — small (12oz) or large (16oz).".into(),
        );
    }

    if !is_valid(&drink.temperature) {
        push(errors, ErrorKind::MissingField, "Hot or iced?".into());
    }

    if name.is_iced_only() && drink.is_hot() {
        let display = match name {
            DrinkName::ColdBrew => "Cold brew",
            _ => "Frappuccino",
        };
        push(
            errors,
            ErrorKind::BusinessRule,
            format!("{} is iced only — we can't make that hot.", display),
        );
    }

    if name.is_milk_required() && !is_valid(&drink.milk) {
        push(
            errors,
            ErrorKind::MissingField,
            "What kind of milk? Whole, skim, oat, or almond.".into(),
        );
    }

    if is_unrecognized(&drink.sweetness) {
        push(
            errors,
            ErrorKind::Structural,
            "Sweetness must be no sugar, less sugar, regular, or extra sugar.".into(),
        );
    }

    if is_unrecognized(&drink.ice_level) {
        push(
            errors,
            ErrorKind::Structural,
            "Ice level must be no ice, less ice, regular, or extra ice.".into(),
        );
    }

    let non_default_ice = drink
        .ice_level
        .as_ref()
        .is_some_and(|ice| !ice.is(IceLevel::Regular));
    if drink.is_hot() && non_default_ice {
        push(
            errors,
            ErrorKind::BusinessRule,
            "Ice level only applies to iced drinks.".into(),
        );
    }

    validate_add_ons(index, name, drink, errors);
}

fn validate_add_ons(
    index: usize,
    name: DrinkName,
    drink: &DrinkItem,
    errors: &mut Vec<ValidationError>,
) {
    for add_on in &drink.add_ons {
        if !add_on.is_known() {
            errors.push(ValidationError::item(
                index,
                ErrorKind::Structural,
                format!("\"{}\" isn't a valid add-on.", add_on.as_str()),
            ));
        }
    }

    if drink.add_on_count(AddOn::ExtraEspressoShot) > 0 && name.is_pure_tea() {
        errors.push(ValidationError::item(
            index,
            ErrorKind::BusinessRule,
            format!(
                "We can't add espresso shots to {} — that's a tea! Maybe try a latte or americano instead?",
                name.as_str().replace('_', " ")
            ),
        ));
    }

    if drink.add_on_count(AddOn::ExtraMatchaShot) > 0 && name != DrinkName::MatchaLatte {
        errors.push(ValidationError::item(
            index,
            ErrorKind::BusinessRule,
            "Extra matcha shot is only for the matcha latte.",
        ));
    }

    for add_on in AddOn::ALL {
        let count = drink.add_on_count(*add_on);
        let message = match (add_on, add_on.max_per_item()) {
            (_, Some(cap)) if count <= cap => continue,
            (AddOn::ExtraEspressoShot, Some(cap)) => format!(
                "We can add up to {} extra espresso shots — {} is too many! That much caffeine isn't safe.",
                cap, count
            ),
            (AddOn::CaramelSyrup, Some(cap)) => format!(
                "{} pumps of caramel is a bit much — we cap it at {} pumps.",
                count, cap
            ),
            (AddOn::HazelnutSyrup, Some(cap)) => format!(
                "{} pumps of hazelnut is a bit much — we cap it at {} pumps.",
                count, cap
            ),
            // uncapped
            _ => continue,
        };
        errors.push(ValidationError::item(index, ErrorKind::Capacity, message));
    }
}

fn validate_pastry(index: usize, pastry: &PastryItem, errors: &mut Vec<ValidationError>) {
    if !pastry.name.is_known() {
        errors.push(ValidationError::item(
            index,
            ErrorKind::Structural,
            "That pastry isn't on our menu.",
        ));
        return;
    }

    if pastry.quantity < 1 {
        errors.push(ValidationError::item(
            index,
            ErrorKind::Capacity,
            "Pastry quantity must be at least 1.",
        ));
    } else if pastry.quantity > MAX_PASTRY_QUANTITY {
        errors.push(ValidationError::item(
            index,
            ErrorKind::Capacity,
            format!(
                "We can do up to {} of any pastry per order. For larger quantities, please call ahead!",
                MAX_PASTRY_QUANTITY
            ),
        ));
    }
}

/// Required fields a drink is still missing, in the order a barista would ask.
pub fn missing_fields_for_drink(drink: &DrinkItem) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if drink.size.is_none() {
        missing.push("size");
    }
    if drink.temperature.is_none() {
        missing.push("temperature");
    }
    let needs_milk = drink.name.known().is_some_and(|n| n.is_milk_required());
    if needs_milk && drink.milk.is_none() {
        missing.push("milk");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Milk, PastryName, Size, Sweetness, Temperature};

    fn complete_latte() -> DrinkItem {
        DrinkItem::new(DrinkName::Latte)
            .with_size(Size::Small)
            .with_temperature(Temperature::Hot)
            .with_milk(Milk::Oat)
    }

    fn order(items: Vec<OrderItem>) -> OrderState {
        OrderState::new(items)
    }

    #[test]
    fn test_empty_order_has_no_errors() {
        assert!(validate(&OrderState::default()).is_empty());
    }

    #[test]
    fn test_complete_items_pass() {
        let state = order(vec![
            complete_latte().into(),
            PastryItem::new(PastryName::BananaBread, 2).into(),
        ]);
        assert_eq!(validate(&state), vec![]);
    }

    #[test]
    fn test_sixteen_items_yield_one_order_level_error() {
        // Every item here is also broken, and none of that may surface.
        let items = vec![OrderItem::from(DrinkItem::new(DrinkName::Latte)); 16];
        let errors = validate(&order(items));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].is_order_level());
        assert_eq!(errors[0].kind, ErrorKind::Capacity);
    }

    #[test]
    fn test_fifteen_items_validate_per_item() {
        let items = vec![OrderItem::from(DrinkItem::new(DrinkName::Americano)); 15];
        let errors = validate(&order(items));
        // size and temperature missing on each of the 15
        assert_eq!(errors.len(), 30);
        assert!(errors.iter().all(|e| !e.is_order_level()));
        assert_eq!(errors.last().unwrap().item_index, Some(14));
    }

    #[test]
    fn test_cold_brew_hot_reports_only_iced_only_violation() {
        let drink = DrinkItem::new(DrinkName::ColdBrew)
            .with_size(Size::Small)
            .with_temperature(Temperature::Hot);
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Cold brew is iced only — we can't make that hot.");
        assert_eq!(errors[0].kind, ErrorKind::BusinessRule);
        assert_eq!(errors[0].item_index, Some(0));
    }

    #[test]
    fn test_errors_accumulate_within_a_drink() {
        let mut drink = DrinkItem::new(DrinkName::Mocha);
        drink.add_ons.push(MenuToken::Unrecognized("whipped_cream".into()));
        let errors = validate(&order(vec![drink.into()]));
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "We need a size — small (12oz) or large (16oz).",
                "Hot or iced?",
                "What kind of milk? Whole, skim, oat, or almond.",
                "\"whipped_cream\" isn't a valid add-on.",
            ]
        );
    }

    #[test]
    fn test_unknown_drink_skips_remaining_checks() {
        let drink = DrinkItem::new(MenuToken::Unrecognized("pumpkin_spice".into()));
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
    }

    #[test]
    fn test_invalid_size_token_counts_as_missing() {
        let mut drink = complete_latte();
        drink.size = Some(MenuToken::Unrecognized("venti".into()));
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("We need a size"));
    }

    #[test]
    fn test_ice_level_on_hot_drink() {
        let drink = complete_latte().with_ice_level(IceLevel::LessIce);
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Ice level only applies to iced drinks.");

        let regular = complete_latte().with_ice_level(IceLevel::Regular);
        assert!(validate(&order(vec![regular.into()])).is_empty());
    }

    #[test]
    fn test_invalid_sweetness_token() {
        let mut drink = complete_latte().with_sweetness(Sweetness::ExtraSugar);
        assert!(validate(&order(vec![drink.clone().into()])).is_empty());
        drink.sweetness = Some(MenuToken::Unrecognized("honey".into()));
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Structural);
    }

    #[test]
    fn test_espresso_shot_on_pure_tea() {
        let drink = DrinkItem::new(DrinkName::JasmineTea)
            .with_size(Size::Large)
            .with_temperature(Temperature::Iced)
            .with_add_on(AddOn::ExtraEspressoShot);
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("jasmine tea"));
    }

    #[test]
    fn test_matcha_shot_only_on_matcha_latte() {
        let matcha = DrinkItem::new(DrinkName::MatchaLatte)
            .with_size(Size::Small)
            .with_temperature(Temperature::Iced)
            .with_milk(Milk::Almond)
            .with_add_on(AddOn::ExtraMatchaShot);
        assert!(validate(&order(vec![matcha.into()])).is_empty());

        let latte = complete_latte().with_add_on(AddOn::ExtraMatchaShot);
        let errors = validate(&order(vec![latte.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Extra matcha shot is only for the matcha latte.");
    }

    #[test]
    fn test_add_on_caps() {
        let mut drink = complete_latte();
        for _ in 0..4 {
            drink = drink.with_add_on(AddOn::ExtraEspressoShot);
        }
        for _ in 0..6 {
            drink = drink.with_add_on(AddOn::CaramelSyrup);
        }
        assert!(validate(&order(vec![drink.clone().into()])).is_empty());

        let drink = drink
            .with_add_on(AddOn::ExtraEspressoShot)
            .with_add_on(AddOn::CaramelSyrup);
        let errors = validate(&order(vec![drink.into()]));
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.kind == ErrorKind::Capacity));
        assert!(errors[0].message.contains("5 is too many"));
        assert!(errors[1].message.starts_with("7 pumps of caramel"));
    }

    #[test]
    fn test_matcha_shots_are_uncapped() {
        let mut matcha = DrinkItem::new(DrinkName::MatchaLatte)
            .with_size(Size::Large)
            .with_temperature(Temperature::Hot)
            .with_milk(Milk::Oat);
        for _ in 0..8 {
            matcha = matcha.with_add_on(AddOn::ExtraMatchaShot);
        }
        assert!(validate(&order(vec![matcha.into()])).is_empty());
    }

    #[test]
    fn test_pastry_rules() {
        let cases = [
            (0, Some("Pastry quantity must be at least 1.")),
            (-3, Some("Pastry quantity must be at least 1.")),
            (1, None),
            (10, None),
            (11, Some("We can do up to 10 of any pastry per order. For larger quantities, please call ahead!")),
        ];
        for (quantity, expected) in cases {
            let state = order(vec![PastryItem::new(PastryName::PlainCroissant, quantity).into()]);
            let errors = validate(&state);
            match expected {
                Some(message) => {
                    assert_eq!(errors.len(), 1, "quantity {quantity}");
                    assert_eq!(errors[0].message, message);
                }
                None => assert!(errors.is_empty(), "quantity {quantity}"),
            }
        }

        let unknown = PastryItem::new(MenuToken::Unrecognized("scone".into()), 0);
        let errors = validate(&order(vec![unknown.into()]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "That pastry isn't on our menu.");
    }

    #[test]
    fn test_unrecognized_item_kind() {
        let errors = validate(&order(vec![complete_latte().into(), OrderItem::Unrecognized]));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Item must be a drink or pastry.");
        assert_eq!(errors[0].item_index, Some(1));
    }

    #[test]
    fn test_validate_is_deterministic() {
        let state = order(vec![
            DrinkItem::new(DrinkName::Frappuccino).with_temperature(Temperature::Hot).into(),
            PastryItem::new(PastryName::BananaBread, 12).into(),
        ]);
        assert_eq!(validate(&state), validate(&state));
    }

    #[test]
    fn test_missing_fields_for_drink() {
        assert_eq!(
            missing_fields_for_drink(&DrinkItem::new(DrinkName::Latte)),
            vec!["size", "temperature", "milk"]
        );
        assert_eq!(
            missing_fields_for_drink(&DrinkItem::new(DrinkName::Americano).with_size(Size::Large)),
            vec!["temperature"]
        );
        assert!(missing_fields_for_drink(&complete_latte()).is_empty());
    }

    #[test]
    fn test_order_level_error_serializes_without_index() {
        let error = ValidationError::order(ErrorKind::Capacity, "too many");
        let json = serde_json::to_value(&error).unwrap();
        assert!(json.get("itemIndex").is_none());
        assert_eq!(json["kind"], "capacity");
    }
}
