//! Line items and the order state the conversation builds up.
//!
//! An [`OrderItem`] is a closed variant over drinks and pastries, tagged on
//! the wire by `"type"`. Items carry no identifier: two items are the same
//! item exactly when they are structurally equal.

use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::{
    AddOn, DrinkName, IceLevel, MenuToken, Milk, PastryName, Size, Sweetness, Temperature,
};

/// An explicit `null` reads the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A drink line item. Only `name` is mandatory while the conversation is still
/// going; `size` and `temperature` (and `milk`, for milk drinks) must be filled
/// before the order is complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkItem {
    pub name: MenuToken<DrinkName>,
    #[serde(default)]
    pub size: Option<MenuToken<Size>>,
    #[serde(default)]
    pub temperature: Option<MenuToken<Temperature>>,
    #[serde(default)]
    pub milk: Option<MenuToken<Milk>>,
    #[serde(default)]
    pub sweetness: Option<MenuToken<Sweetness>>,
    #[serde(default)]
    pub ice_level: Option<MenuToken<IceLevel>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub add_ons: Vec<MenuToken<AddOn>>,
}

impl DrinkItem {
    /// A bare drink with every modifier unset.
    pub fn new(name: impl Into<MenuToken<DrinkName>>) -> Self {
        Self {
            name: name.into(),
            size: None,
            temperature: None,
            milk: None,
            sweetness: None,
            ice_level: None,
            add_ons: Vec::new(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_temperature(mut self, temperature: Temperature) -> Self {
        self.temperature = Some(temperature.into());
        self
    }

    pub fn with_milk(mut self, milk: Milk) -> Self {
        self.milk = Some(milk.into());
        self
    }

    pub fn with_sweetness(mut self, sweetness: Sweetness) -> Self {
        self.sweetness = Some(sweetness.into());
        self
    }

    pub fn with_ice_level(mut self, ice_level: IceLevel) -> Self {
        self.ice_level = Some(ice_level.into());
        self
    }

    pub fn with_add_on(mut self, add_on: AddOn) -> Self {
        self.add_ons.push(add_on.into());
        self
    }

    pub fn is_iced(&self) -> bool {
        self.temperature
            .as_ref()
            .is_some_and(|t| t.is(Temperature::Iced))
    }

    pub fn is_hot(&self) -> bool {
        self.temperature.as_ref().is_some_and(|t| t.is(Temperature::Hot))
    }

    /// Number of entries of `add_on` on this drink.
    pub fn add_on_count(&self, add_on: AddOn) -> usize {
        self.add_ons.iter().filter(|a| a.is(add_on)).count()
    }

    /// True once every scalar modifier has a value.
    pub fn is_fully_filled(&self) -> bool {
        self.size.is_some()
            && self.temperature.is_some()
            && self.milk.is_some()
            && self.sweetness.is_some()
            && self.ice_level.is_some()
    }
}

/// A pastry line item. Quantity is signed so that a bad count from the agent
/// reaches validation instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PastryItem {
    pub name: MenuToken<PastryName>,
    /// Missing or null reads as 0, which validation refuses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: i32,
}

impl PastryItem {
    pub fn new(name: impl Into<MenuToken<PastryName>>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderItem {
    Drink(DrinkItem),
    Pastry(PastryItem),
    /// Anything tagged with a kind other than drink or pastry.
    #[serde(other)]
    Unrecognized,
}

impl OrderItem {
    pub fn as_drink(&self) -> Option<&DrinkItem> {
        match self {
            OrderItem::Drink(drink) => Some(drink),
            _ => None,
        }
    }

    pub fn as_pastry(&self) -> Option<&PastryItem> {
        match self {
            OrderItem::Pastry(pastry) => Some(pastry),
            _ => None,
        }
    }

    /// Units sold for this line: a pastry counts its quantity, a drink counts one.
    pub fn units(&self) -> u64 {
        match self {
            OrderItem::Drink(_) => 1,
            OrderItem::Pastry(pastry) => u64::try_from(pastry.quantity).unwrap_or(0),
            OrderItem::Unrecognized => 0,
        }
    }

    /// The raw catalog token naming this item.
    pub fn name(&self) -> &str {
        match self {
            OrderItem::Drink(drink) => drink.name.as_str(),
            OrderItem::Pastry(pastry) => pastry.name.as_str(),
            OrderItem::Unrecognized => "unknown",
        }
    }
}

impl From<DrinkItem> for OrderItem {
    fn from(drink: DrinkItem) -> Self {
        OrderItem::Drink(drink)
    }
}

impl From<PastryItem> for OrderItem {
    fn from(pastry: PastryItem) -> Self {
        OrderItem::Pastry(pastry)
    }
}

/// The order as a whole. Insertion order matters for receipts only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderState {
    pub fn new(items: Vec<OrderItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Compares two orders as multisets of items, ignoring line order.
    pub fn same_items_as(&self, other: &OrderState) -> bool {
        if self.items.len() != other.items.len() {
            return false;
        }
        let mut unmatched: Vec<&OrderItem> = other.items.iter().collect();
        for item in &self.items {
            match unmatched.iter().position(|candidate| *candidate == item) {
                Some(pos) => {
                    unmatched.swap_remove(pos);
                }
                None => return false,
            }
        }
        true
    }
}

impl FromIterator<OrderItem> for OrderState {
    fn from_iter<I: IntoIterator<Item = OrderItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
