use serde::Serialize;
use tracing::info;

use crate::witcher::Witcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WareKind {
    Provision,
    Sword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ware {
    pub name: &'static str,
    pub price: i32,
    pub kind: WareKind,
}

pub const STOCK: [Ware; 3] = [
    Ware { name: "Bread", price: 5, kind: WareKind::Provision },
    Ware { name: "Dwarven Spirit", price: 15, kind: WareKind::Provision },
    Ware { name: "Witcher Steel Sword", price: 100, kind: WareKind::Sword },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Purchase {
    Bought { item: &'static str, gold_left: i32 },
    NotEnoughGold { price: i32, gold: i32 },
    UnknownItem,
}

/// Buy the ware at `index` in [`STOCK`]. Provisions go to the inventory, a sword is equipped.
pub fn buy(witcher: &mut Witcher, index: usize) -> Purchase {
    let Some(ware) = STOCK.get(index) else {
        return Purchase::UnknownItem;
    };
    if witcher.gold < ware.price {
        return Purchase::NotEnoughGold { price: ware.price, gold: witcher.gold };
    }
    witcher.gold -= ware.price;
    match ware.kind {
        WareKind::Provision => witcher.inventory.push(ware.name.to_string()),
        WareKind::Sword => witcher.equipped_sword = ware.name.to_string(),
    }
    info!(item = ware.name, gold_left = witcher.gold, "merchant sale");
    Purchase::Bought { item: ware.name, gold_left: witcher.gold }
}
