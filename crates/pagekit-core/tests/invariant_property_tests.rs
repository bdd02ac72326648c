//! Property: for any sequence of add/update/remove/reorder commands, the
//! page's components keep unique ids and unique orders.

use pagekit_core::rules::invariants::{find_duplicate_ids, find_duplicate_orders};
use pagekit_core::{apply, Command, ComponentKind, ComponentPatch, Page};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Step {
    Add { kind: usize, order: Option<u32> },
    Update { pick: usize, order: u32 },
    Remove { pick: usize },
    Reorder { picks: Vec<usize>, include_unknown: bool },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..8, proptest::option::of(0u32..8))
            .prop_map(|(kind, order)| Step::Add { kind, order }),
        (0usize..16, 0u32..8).prop_map(|(pick, order)| Step::Update { pick, order }),
        (0usize..16).prop_map(|pick| Step::Remove { pick }),
        (proptest::collection::vec(0usize..16, 0..5), any::<bool>())
            .prop_map(|(picks, include_unknown)| Step::Reorder {
                picks,
                include_unknown
            }),
    ]
}

/// Id of the n-th component (modulo count), or a dangling id on an empty page
fn pick_id(page: &Page, pick: usize) -> String {
    let components = page.components();
    if components.is_empty() {
        "missing".to_string()
    } else {
        components[pick % components.len()].id().to_string()
    }
}

fn to_command(page: &Page, step: &Step) -> Command {
    match step {
        Step::Add { kind, order } => Command::ComponentCreate {
            kind: ComponentKind::ALL[*kind],
            order: *order,
            payload: None,
        },
        Step::Update { pick, order } => Command::ComponentUpdate {
            component_id: pick_id(page, *pick),
            patch: ComponentPatch::order(*order),
        },
        Step::Remove { pick } => Command::ComponentRemove {
            component_id: pick_id(page, *pick),
        },
        Step::Reorder {
            picks,
            include_unknown,
        } => {
            let mut ids: Vec<String> = picks.iter().map(|p| pick_id(page, *p)).collect();
            ids.dedup();
            if *include_unknown {
                ids.push("unknown".to_string());
            }
            Command::ComponentReorder { ordered_ids: ids }
        }
    }
}

proptest! {
    #[test]
    fn prop_ids_and_orders_stay_unique(steps in proptest::collection::vec(step(), 1..40)) {
        let mut page = Page::new("tpl");

        for step in &steps {
            let cmd = to_command(&page, step);
            if let Ok(next) = apply(page.clone(), cmd) {
                page = next;
            }

            prop_assert!(find_duplicate_ids(page.components()).is_empty());
            prop_assert!(find_duplicate_orders(page.components()).is_empty());
        }
    }

    #[test]
    fn prop_reorder_numbers_from_one(count in 1usize..8, rotate in 0usize..8) {
        let mut page = Page::new("tpl");
        for _ in 0..count {
            page = apply(page, Command::ComponentCreate {
                kind: ComponentKind::Text,
                order: None,
                payload: None,
            }).unwrap();
        }
        let mut ids: Vec<String> = page.components().iter().map(|c| c.id().to_string()).collect();
        ids.rotate_left(rotate % count);
        let listed: Vec<String> = ids.iter().take(count / 2 + 1).cloned().collect();

        let page = apply(page, Command::ComponentReorder { ordered_ids: listed.clone() }).unwrap();

        let ordered = page.ordered_components();
        let orders: Vec<u32> = ordered.iter().map(|c| c.order()).collect();
        prop_assert_eq!(orders, (1..=count as u32).collect::<Vec<_>>());
        for (position, id) in listed.iter().enumerate() {
            prop_assert_eq!(ordered[position].id(), id.as_str());
        }
    }
}
