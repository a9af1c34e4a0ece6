//! Property tests for the cart reducer and its derived queries.

use std::collections::BTreeSet;

use proptest::prelude::*;
use upenergy_commerce::prelude::*;

const IDS: [&str; 4] = ["T1", "T2", "T3", "T4"];

#[derive(Debug, Clone)]
enum Op {
    Add { id: usize, quantity: u32, cents: i64, forward: bool },
    Remove { id: usize },
    Set { id: usize, quantity: i64 },
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..IDS.len(), 0u32..20, 0i64..5_000, any::<bool>())
            .prop_map(|(id, quantity, cents, forward)| Op::Add { id, quantity, cents, forward }),
        1 => (0..IDS.len()).prop_map(|id| Op::Remove { id }),
        2 => (0..IDS.len(), -3i64..20).prop_map(|(id, quantity)| Op::Set { id, quantity }),
        1 => Just(Op::Clear),
    ]
}

fn descriptor(id: usize, cents: i64, forward: bool) -> TokenDescriptor {
    TokenDescriptor::new(IDS[id])
        .with_unit_price(Money::from_cents(cents))
        .with_forward_credit(forward)
}

fn apply(state: CartState, op: &Op) -> CartState {
    let action = match op {
        Op::Add { id, quantity, cents, forward } => CartAction::AddItem(
            CartLineItem::from_descriptor(descriptor(*id, *cents, *forward), *quantity),
        ),
        Op::Remove { id } => CartAction::RemoveItem(TokenId::new(IDS[*id])),
        Op::Set { id, quantity } => CartAction::UpdateQuantity {
            token_id: TokenId::new(IDS[*id]),
            quantity: *quantity,
        },
        Op::Clear => CartAction::ClearCart,
    };
    reduce(state, action)
}

fn run(ops: &[Op]) -> CartState {
    ops.iter().fold(CartState::default(), apply)
}

fn snapshot() -> impl Strategy<Value = Vec<CartLineItem>> {
    prop::collection::vec((1u32..50, 0i64..5_000, any::<bool>()), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (quantity, cents, forward))| {
                let token = TokenDescriptor::new(format!("0.0.{}", i))
                    .with_unit_price(Money::from_cents(cents))
                    .with_forward_credit(forward)
                    .with_vintage("2022");
                CartLineItem::from_descriptor(token, quantity)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn repeated_adds_sum_quantities(quantities in prop::collection::vec(1u32..100, 1..10)) {
        let mut state = CartState::default();
        for (n, q) in quantities.iter().enumerate() {
            let token = TokenDescriptor::new("T1").with_name(format!("name {}", n));
            state = reduce(state, CartAction::AddItem(CartLineItem::from_descriptor(token, *q)));
        }

        let item = state.get(&TokenId::new("T1")).unwrap();
        prop_assert_eq!(u64::from(item.quantity), quantities.iter().map(|q| u64::from(*q)).sum::<u64>());
        prop_assert_eq!(&item.name, "name 0");
        prop_assert_eq!(state.len(), 1);
    }

    #[test]
    fn non_positive_quantity_equals_remove(ops in prop::collection::vec(op(), 0..30), id in 0..IDS.len(), q in -10i64..=0) {
        let state = run(&ops);
        let token_id = TokenId::new(IDS[id]);

        let via_set = reduce(state.clone(), CartAction::UpdateQuantity { token_id: token_id.clone(), quantity: q });
        let via_remove = reduce(state, CartAction::RemoveItem(token_id));
        prop_assert_eq!(via_set, via_remove);
    }

    #[test]
    fn absent_token_ops_are_noops(ops in prop::collection::vec(op(), 0..30), q in -5i64..20) {
        let state = run(&ops);
        let absent = TokenId::new("not-in-cart");

        let after_remove = reduce(state.clone(), CartAction::RemoveItem(absent.clone()));
        prop_assert_eq!(&after_remove, &state);

        let after_set = reduce(state.clone(), CartAction::UpdateQuantity { token_id: absent, quantity: q });
        prop_assert_eq!(&after_set, &state);
    }

    #[test]
    fn invariants_hold_after_any_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let state = run(&ops);

        let mut seen = BTreeSet::new();
        for item in state.items() {
            prop_assert!(item.quantity > 0);
            prop_assert!(seen.insert(item.token_id.clone()));
        }
    }

    #[test]
    fn pricing_is_consistent(ops in prop::collection::vec(op(), 0..40)) {
        let state = run(&ops);

        let expected: Money = state.items().iter().map(|i| i.unit_price * i.quantity).sum();
        prop_assert_eq!(state.subtotal(), expected);
        prop_assert_eq!(state.fees().amount(), state.subtotal().amount() * PLATFORM_FEE_RATE);
        prop_assert_eq!(state.total(), state.subtotal() + state.fees());

        let pricing = state.pricing();
        prop_assert_eq!(pricing.total, state.total());
        prop_assert_eq!(pricing.forward_credit_subtotal() + pricing.verified_subtotal(), pricing.subtotal);
    }

    #[test]
    fn credit_partition_is_exact(ops in prop::collection::vec(op(), 0..40)) {
        let state = run(&ops);
        let forward = state.forward_credit_items();
        let verified = state.verified_items();

        prop_assert_eq!(forward.len() + verified.len(), state.len());
        prop_assert!(forward.iter().all(|i| i.is_forward_credit));
        prop_assert!(verified.iter().all(|i| !i.is_forward_credit));
        for item in state.items() {
            let in_forward = forward.iter().any(|f| f.token_id == item.token_id);
            let in_verified = verified.iter().any(|v| v.token_id == item.token_id);
            prop_assert!(in_forward != in_verified);
        }
    }

    #[test]
    fn hydrate_reproduces_snapshot(items in snapshot()) {
        let state = reduce(CartState::default(), CartAction::LoadCart(items.clone()));
        prop_assert_eq!(state.items(), items.as_slice());

        let mut cart = CartStore::open(upenergy_cache::MemoryStore::new());
        cart.add_one(TokenDescriptor::new("stale"));
        cart.hydrate(items.clone());
        prop_assert_eq!(cart.items(), items.as_slice());

        let json = serde_json::to_string(&items).unwrap();
        let mut restored = CartStore::open(upenergy_cache::MemoryStore::new());
        restored.hydrate_json(&json).unwrap();
        prop_assert_eq!(restored.items(), items.as_slice());
    }
}
