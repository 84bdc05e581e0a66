use crate::models::additional_cost::AdditionalCost;
use crate::models::product::Product;

/// Anything that lives in an id-addressed, display-ordered collection.
pub trait LineItem {
    fn id(&self) -> u32;
}

impl LineItem for Product {
    fn id(&self) -> u32 {
        self.id
    }
}

impl LineItem for AdditionalCost {
    fn id(&self) -> u32 {
        self.id
    }
}

/// Move the item with `id` to `target_index`, shifting the items in
/// between by one position.
///
/// Order is significant only for display: no derived value changes.
/// No-op when the id is not found or the item is already at the target;
/// a target beyond the end clamps to the last position.
pub fn move_item<T: LineItem>(items: &mut Vec<T>, id: u32, target_index: usize) {
    let Some(current) = items.iter().position(|item| item.id() == id) else {
        return;
    };
    let target = target_index.min(items.len().saturating_sub(1));
    if current == target {
        return;
    }
    let item = items.remove(current);
    items.insert(target, item);
}
