//! Cart mutation properties from the store surface.
//!
//! The pure merge rules have unit tests next to the `Cart` model; these
//! exercise the same properties through `AppState` with persistence in the
//! loop.

use kiosk_core::{Price, ProductId};
use kiosk_integration_tests::{snapshot, test_state, test_storage};

#[test]
fn repeated_adds_merge_into_one_line() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    for quantity in [1, 2, 3, 4] {
        state.cart_mut().add_item(snapshot(7, 1299), quantity);
    }

    let cart = state.cart();
    assert_eq!(cart.items().len(), 1, "one line per product id");
    assert_eq!(cart.item_count(), 10, "quantities sum");
}

#[test]
fn add_with_zero_quantity_clamps_to_one() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    state.cart_mut().add_item(snapshot(1, 500), 0);
    assert_eq!(state.cart().item_count(), 1);
}

#[test]
fn set_quantity_below_one_equals_remove() {
    let storage = test_storage();

    let mut removed = test_state(&storage);
    removed.cart_mut().add_item(snapshot(1, 500), 3);
    removed.cart_mut().remove_item(ProductId::new(1));

    let zeroed = test_storage();
    let mut state = test_state(&zeroed);
    state.cart_mut().add_item(snapshot(1, 500), 3);
    state.cart_mut().set_quantity(ProductId::new(1), 0);

    assert_eq!(removed.cart().items(), state.cart().items());
    assert!(state.cart().is_empty());
}

#[test]
fn set_quantity_on_absent_product_is_noop() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    state.cart_mut().add_item(snapshot(1, 1000), 1);
    let before: Vec<_> = state.cart().items().to_vec();

    state.cart_mut().set_quantity(ProductId::new(999), 5);

    assert_eq!(state.cart().items(), before, "cart unchanged");
}

#[test]
fn derived_totals_track_every_mutation() {
    let storage = test_storage();
    let mut state = test_state(&storage);

    state.cart_mut().add_item(snapshot(1, 1000), 1);
    state.cart_mut().add_item(snapshot(2, 2000), 2);
    assert_eq!(state.cart().total(), Price::from_cents(5000));
    assert_eq!(state.cart().item_count(), 3);

    state.cart_mut().set_quantity(ProductId::new(1), 4);
    assert_eq!(state.cart().total(), Price::from_cents(8000));
    assert_eq!(state.cart().item_count(), 6);

    state.cart_mut().remove_item(ProductId::new(2));
    assert_eq!(state.cart().total(), Price::from_cents(4000));

    state.cart_mut().clear();
    assert_eq!(state.cart().total(), Price::ZERO);
    assert_eq!(state.cart().item_count(), 0);
}

#[test]
fn cart_round_trips_through_storage() {
    let storage = test_storage();

    let mut state = test_state(&storage);
    state.cart_mut().add_item(snapshot(5, 1999), 2);
    state.cart_mut().add_item(snapshot(2, 350), 1);
    state.cart_mut().add_item(snapshot(9, 10000), 3);
    let items: Vec<_> = state.cart().items().to_vec();
    let total = state.cart().total();
    let count = state.cart().item_count();
    drop(state);

    // Reload: a second state over the same durable storage.
    let reloaded = test_state(&storage);
    assert_eq!(reloaded.cart().items(), items, "ordered sequence identical");
    assert_eq!(reloaded.cart().total(), total);
    assert_eq!(reloaded.cart().item_count(), count);
}
