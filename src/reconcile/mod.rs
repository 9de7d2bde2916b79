//! Repairs a candidate item list that restates drinks it already holds.
//!
//! The agent is asked to edit the current order in place, but during a
//! clarification turn it sometimes appends a partial copy of a drink instead
//! ("small americano" next to the bare "americano" it already had). A drink
//! that is strictly less complete than another with the same name is the same
//! drink; two equally complete drinks are two drinks.

use tracing::debug;

use crate::model::{DrinkItem, OrderItem, PastryItem};

/// Non-null scalar fields plus one per add-on entry.
pub fn filled_field_count(drink: &DrinkItem) -> usize {
    [
        drink.size.is_some(),
        drink.temperature.is_some(),
        drink.milk.is_some(),
        drink.sweetness.is_some(),
        drink.ice_level.is_some(),
    ]
    .into_iter()
    .filter(|filled| *filled)
    .count()
        + drink.add_ons.len()
}

fn agrees<T: PartialEq>(partial: &Option<T>, full: &Option<T>) -> bool {
    match partial {
        Some(value) => full.as_ref() == Some(value),
        None => true,
    }
}

/// True when `a` names the same drink as `b`, every field set on `a` matches
/// `b`, every add-on on `a` appears on `b`, and `a` has strictly fewer filled
/// fields.
pub fn is_partial_restatement_of(a: &DrinkItem, b: &DrinkItem) -> bool {
    a.name == b.name
        && agrees(&a.size, &b.size)
        && agrees(&a.temperature, &b.temperature)
        && agrees(&a.milk, &b.milk)
        && agrees(&a.sweetness, &b.sweetness)
        && agrees(&a.ice_level, &b.ice_level)
        && a.add_ons.iter().all(|add_on| b.add_ons.contains(add_on))
        && filled_field_count(a) < filled_field_count(b)
}

fn push_drink(output: &mut Vec<OrderItem>, drink: &DrinkItem) {
    let covered = output.iter().any(|existing| {
        existing
            .as_drink()
            .is_some_and(|kept| is_partial_restatement_of(drink, kept))
    });
    if covered {
        debug!(drink = %drink.name, "Dropped partial restatement");
        return;
    }

    let superseded = output.iter().position(|existing| {
        existing
            .as_drink()
            .is_some_and(|kept| is_partial_restatement_of(kept, drink))
    });
    match superseded {
        Some(index) => {
            debug!(drink = %drink.name, index, "Replaced less complete drink");
            output[index] = OrderItem::Drink(drink.clone());
            // Any other kept drink it also covers goes too, so the output
            // never holds a restatement of another of its drinks.
            let mut position = 0;
            output.retain(|existing| {
                let keep = position == index
                    || !existing
                        .as_drink()
                        .is_some_and(|kept| is_partial_restatement_of(kept, drink));
                position += 1;
                keep
            });
        }
        None => output.push(OrderItem::Drink(drink.clone())),
    }
}

fn push_pastry(output: &mut Vec<OrderItem>, pastry: &PastryItem) {
    let duplicate = output.iter().any(|existing| {
        existing
            .as_pastry()
            .is_some_and(|kept| kept.name == pastry.name && kept.quantity == pastry.quantity)
    });
    if duplicate {
        debug!(pastry = %pastry.name, quantity = pastry.quantity, "Dropped duplicate pastry");
        return;
    }
    output.push(OrderItem::Pastry(pastry.clone()));
}

/// Single pass over the candidate items, building a new list.
///
/// Pastries are dropped only as exact name-and-quantity duplicates. Items of
/// an unrecognized kind pass through untouched so validation can report them.
pub fn reconcile(candidate: &[OrderItem]) -> Vec<OrderItem> {
    let mut output = Vec::with_capacity(candidate.len());
    for item in candidate {
        match item {
            OrderItem::Drink(drink) => push_drink(&mut output, drink),
            OrderItem::Pastry(pastry) => push_pastry(&mut output, pastry),
            OrderItem::Unrecognized => output.push(OrderItem::Unrecognized),
        }
    }
    output
}
