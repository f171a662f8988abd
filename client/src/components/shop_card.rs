//! Card for one nearby-search result.

#[cfg(test)]
#[path = "shop_card_test.rs"]
mod shop_card_test;

use leptos::prelude::*;

use crate::net::types::SearchResult;

/// Price label in rupees, or a placeholder when the shop lists none.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(price) if price.fract().abs() < f64::EPSILON => format!("₹{price:.0}"),
        Some(price) => format!("₹{price:.2}"),
        None => "Price on request".to_owned(),
    }
}

pub fn item_label(item_name: Option<&str>) -> String {
    match item_name.map(str::trim) {
        Some(name) if !name.is_empty() => format!("Item: {name}"),
        _ => "Item: unavailable".to_owned(),
    }
}

#[component]
pub fn ShopCard(result: SearchResult) -> impl IntoView {
    let item = item_label(result.item_name.as_deref());
    let price = format!("Price: {}", format_price(result.price));

    view! {
        <article class="shop-card">
            <header class="shop-card__header">
                <h3 class="shop-card__name">{result.shop_name}</h3>
                <p class="shop-card__address">{result.address}</p>
            </header>
            <div class="shop-card__body">
                <p>{item}</p>
                <p>{price}</p>
            </div>
        </article>
    }
}
