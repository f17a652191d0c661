/// Random union sequences checked against a naive labelled partition.
use proptest::prelude::*;

use setforest::element::ElemId;
use setforest::forest::Forest;
use setforest::policy::{MergePolicy, Weighing};

#[derive(Debug, Clone)]
enum Op {
    Union(usize, usize),
    Policy(MergePolicy),
    Weighing(Weighing),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        8 => (0_usize..40, 0_usize..40).prop_map(|(a, b)| Op::Union(a, b)),
        1 => prop_oneof![Just(MergePolicy::ByHeight), Just(MergePolicy::BySize)].prop_map(Op::Policy),
        1 => prop_oneof![Just(Weighing::Operands), Just(Weighing::Roots)].prop_map(Op::Weighing),
    ]
}

/// Apply `ops` to a fresh forest of `n` elements and to a label vector.
fn run(n: usize, ops: &[Op]) -> (Forest, Vec<ElemId>, Vec<usize>) {
    let mut f = Forest::new();
    let e: Vec<ElemId> = (0..n).map(|_| f.register_new()).collect();
    let mut label: Vec<usize> = (0..n).collect();
    for op in ops {
        match *op {
            Op::Union(a, b) if a < n && b < n => {
                let joined = f.union(e[a], e[b]).unwrap();
                let (la, lb) = (label[a], label[b]);
                assert_eq!(joined, la != lb);
                for l in label.iter_mut() {
                    if *l == lb {
                        *l = la;
                    }
                }
            }
            Op::Union(..) => {}
            Op::Policy(p) => f.set_merge_policy(p),
            Op::Weighing(w) => f.set_weighing(w),
        }
    }
    (f, e, label)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn find_agrees_with_reference(
        n in 1_usize..40,
        ops in proptest::collection::vec(op(), 0..80),
    ) {
        let (f, e, label) = run(n, &ops);
        for a in 0..n {
            for b in 0..n {
                prop_assert_eq!(
                    f.connected(e[a], e[b]).unwrap(),
                    label[a] == label[b],
                    "elements {} and {}", a, b
                );
            }
        }
    }

    #[test]
    fn invariants_hold(
        n in 1_usize..40,
        ops in proptest::collection::vec(op(), 0..80),
    ) {
        let (f, e, _) = run(n, &ops);
        prop_assert!(f.verify().is_ok(), "{:?}", f.verify());
        for &x in &e {
            prop_assert_eq!(f.height(x).unwrap(), f.calc_height(x).unwrap());
            prop_assert_eq!(f.size(x).unwrap(), f.calc_size(x).unwrap());
        }
    }

    #[test]
    fn all_in_set_matches_root_size(
        n in 1_usize..40,
        ops in proptest::collection::vec(op(), 0..80),
    ) {
        let (f, e, label) = run(n, &ops);
        for (i, &x) in e.iter().enumerate() {
            let root = f.find(x).unwrap();
            let members = f.all_in_set(x).unwrap();
            prop_assert_eq!(members.len(), f.size(root).unwrap());
            prop_assert_eq!(members.len(), label.iter().filter(|&&l| l == label[i]).count());
            for &m in &members {
                prop_assert_eq!(f.find(m).unwrap(), root);
            }
        }
        let total: usize = f.sets().iter().map(Vec::len).sum();
        prop_assert_eq!(total, n);
    }

    #[test]
    fn repeated_union_is_noop(
        n in 2_usize..40,
        ops in proptest::collection::vec(op(), 0..60),
        a in 0_usize..40,
        b in 0_usize..40,
    ) {
        let (mut f, e, _) = run(n, &ops);
        let (a, b) = (a % n, b % n);
        f.union(e[a], e[b]).unwrap();
        let parents: Vec<_> = e.iter().map(|&x| f.parent(x).unwrap()).collect();
        let sizes: Vec<_> = e.iter().map(|&x| f.size(x).unwrap()).collect();
        prop_assert!(!f.union(e[a], e[b]).unwrap());
        prop_assert_eq!(parents, e.iter().map(|&x| f.parent(x).unwrap()).collect::<Vec<_>>());
        prop_assert_eq!(sizes, e.iter().map(|&x| f.size(x).unwrap()).collect::<Vec<_>>());
    }
}
