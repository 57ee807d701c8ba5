#![cfg(test)]

// Property tests for HashedTree, kept inside the crate alongside the
// unit suite.

use crate::{Handle, HashedTree, TreeEntry};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Node {
    due: u16,
    serial: u32,
}

impl TreeEntry for Node {
    type OrderKey = u16;
    fn order_key(&self) -> u16 {
        self.due
    }
}

// Ops address previously issued handles by index so that shrinking
// walks back to earlier, smaller scenarios.
#[derive(Clone, Debug)]
enum Op {
    Add(u16),
    Remove(usize),
    Pop,
    Top,
    Find(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        3 => any::<u16>().prop_map(Op::Add),
        2 => (0usize..64).prop_map(Op::Remove),
        2 => Just(Op::Pop),
        1 => Just(Op::Top),
        2 => (0usize..64).prop_map(Op::Find),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: state-machine equivalence against a model built from std
// collections. The model keeps the live set in a BTreeMap keyed by
// (due, handle), which is exactly the container's ordering contract:
// ascending due time, insertion order among ties.
//
// Invariants exercised across random operation sequences:
// - Handles are strictly increasing from 1 and never reused.
// - `find` resolves exactly the live handles, to the value added.
// - `remove` returns the model's value and invalidates the handle;
//   misses (stale or never-issued handles) leave the container alone.
// - `top`/`pop` always see the model's minimum; pop order over a full
//   drain is non-decreasing in due time.
// - `len`/`is_empty` parity with the model after every op, and stale
//   handles never resolve.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: HashedTree<Node> = HashedTree::new();
        let mut by_order: BTreeMap<(u16, u64), Node> = BTreeMap::new();
        let mut by_handle: HashMap<u64, Node> = HashMap::new();

        let mut issued: Vec<Handle> = Vec::new();
        let mut stale: Vec<Handle> = Vec::new();
        let mut serial = 0u32;

        for op in ops {
            match op {
                Op::Add(due) => {
                    serial += 1;
                    let node = Node { due, serial };
                    let h = sut.add(node.clone());
                    prop_assert_eq!(h.id(), issued.len() as u64 + 1,
                        "handles count up from 1");
                    by_order.insert((due, h.id()), node.clone());
                    by_handle.insert(h.id(), node);
                    issued.push(h);
                }
                Op::Remove(i) if i < issued.len() => {
                    let h = issued[i];
                    match sut.remove(h) {
                        Some(node) => {
                            let modeled = by_handle.remove(&h.id());
                            prop_assert_eq!(Some(&node), modeled.as_ref());
                            by_order.remove(&(node.due, h.id()));
                            stale.push(h);
                        }
                        None => {
                            prop_assert!(!by_handle.contains_key(&h.id()),
                                "remove may only miss on dead handles");
                        }
                    }
                }
                Op::Remove(_) | Op::Pop if by_handle.is_empty() => {
                    prop_assert!(sut.pop().is_none());
                }
                Op::Remove(_) => {} // index beyond issued handles: nothing to target
                Op::Pop => {
                    let popped = sut.pop();
                    let (&(due, id), _) = by_order.iter().next().expect("model non-empty");
                    let modeled = by_order.remove(&(due, id)).expect("present");
                    by_handle.remove(&id);
                    stale.push(Handle::new(id));
                    prop_assert_eq!(popped, Some(modeled));
                }
                Op::Top => {
                    let top = sut.top();
                    let modeled = by_order.values().next();
                    prop_assert_eq!(top, modeled);
                }
                Op::Find(i) => {
                    if let Some(&h) = issued.get(i) {
                        prop_assert_eq!(sut.find(h), by_handle.get(&h.id()));
                    }
                }
            }

            // Post-conditions after every op.
            prop_assert_eq!(sut.len(), by_handle.len());
            prop_assert_eq!(sut.is_empty(), by_handle.is_empty());
            for &h in &stale {
                prop_assert!(sut.find(h).is_none(), "stale handle must not resolve");
            }
        }

        // Drain: the survivors come out in (due, insertion) order.
        let expected: Vec<Node> = by_order.into_values().collect();
        let mut drained = Vec::new();
        while let Some(node) = sut.pop() {
            drained.push(node);
        }
        prop_assert_eq!(drained, expected);
        prop_assert!(sut.is_empty());
    }
}

// Property: a pure add/pop workload behaves as a stable priority
// queue: output is sorted by due time and preserves insertion order
// among equal keys.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_drain_is_stable_sort(dues in proptest::collection::vec(any::<u16>(), 0..64)) {
        let mut sut: HashedTree<Node> = HashedTree::new();
        for (i, due) in dues.iter().enumerate() {
            sut.add(Node { due: *due, serial: i as u32 });
        }

        let mut expected: Vec<(u16, u32)> =
            dues.iter().enumerate().map(|(i, d)| (*d, i as u32)).collect();
        expected.sort(); // serials are unique, so this matches a stable sort by due

        let mut drained = Vec::new();
        while let Some(node) = sut.pop() {
            drained.push((node.due, node.serial));
        }
        prop_assert_eq!(drained, expected);
    }
}
