use crate::core::{CartLine, CartSummary, CatalogLookup, ProductId, SessionState};
use crate::utils::error::{Result, ShopError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Records one "add to cart" action. Ids are not checked here; unknown ids
/// surface when the cart is aggregated.
pub fn add_to_cart(session: &mut SessionState, id: ProductId) {
    session.cart.push(id);
}

/// Folds the raw cart sequence into one line per distinct melon, in order of
/// first appearance, plus the order total.
///
/// Each distinct id is resolved against the catalog exactly once. An id the
/// catalog does not know fails the whole aggregation with `UnknownCartItem`.
pub fn aggregate<L>(cart: &[ProductId], catalog: &L) -> Result<CartSummary>
where
    L: CatalogLookup + ?Sized,
{
    let mut lines: Vec<CartLine> = Vec::new();
    let mut positions: HashMap<ProductId, usize> = HashMap::new();

    for &id in cart {
        if let Some(&position) = positions.get(&id) {
            lines[position].quantity += 1;
            continue;
        }

        let product = catalog.get_by_id(id).map_err(|_| {
            tracing::warn!(melon_id = id, "cart refers to a melon missing from the catalog");
            ShopError::UnknownCartItem { id }
        })?;

        positions.insert(id, lines.len());
        lines.push(CartLine {
            id,
            common_name: product.common_name.clone(),
            unit_price: product.price,
            quantity: 1,
            subtotal: Decimal::ZERO,
        });
    }

    let mut order_total = Decimal::ZERO;
    for line in &mut lines {
        line.subtotal = line.unit_price * Decimal::from(line.quantity);
        order_total += line.subtotal;
    }

    tracing::debug!(
        "Aggregated {} cart entries into {} lines, total {}",
        cart.len(),
        lines.len(),
        order_total
    );

    Ok(CartSummary { lines, order_total })
}
