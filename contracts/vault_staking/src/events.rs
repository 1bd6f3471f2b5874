use soroban_sdk::{Env, Symbol};

use crate::types::WagerCurrency;

fn publish_currency(e: &Env, name: &str, currency: &WagerCurrency) {
    let topics = (Symbol::new(e, name), currency.asset.clone());
    let data = (
        currency.id,
        currency.asset.clone(),
        currency.price_reference.clone(),
        currency.active,
    );
    e.events().publish(topics, data);
}

/// Emitted when a wager currency is registered.
///
/// # Topics
/// * `Symbol` - "currency_added"
/// * `Address` - The currency asset
///
/// # Data
/// * `u32` - Currency id
/// * `Address` - The currency asset
/// * `Address` - Price reference
/// * `bool` - Whether the currency is active
pub fn emit_currency_added(e: &Env, currency: &WagerCurrency) {
    publish_currency(e, "currency_added", currency);
}

/// Emitted when a wager currency is enabled or disabled.
///
/// # Topics
/// * `Symbol` - "currency_updated"
/// * `Address` - The currency asset
///
/// # Data
/// Same layout as `currency_added`, carrying the new active flag.
pub fn emit_currency_updated(e: &Env, currency: &WagerCurrency) {
    publish_currency(e, "currency_updated", currency);
}
