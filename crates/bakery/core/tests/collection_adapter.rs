use bakery_core::collection::{InvokeError, Method};
use bakery_core::{BoundedList, CollectionAdapter, CollectionError, CollectionShape, ErrorSeverity};
use bakery_core::BakeryError;

/// A host-style container exposing only `Add`, `Count` and `GetEnumerator`.
#[derive(Default)]
struct Inventory {
    names: Vec<String>,
}

fn inventory_shape() -> CollectionShape<Inventory, String> {
    CollectionShape::<Inventory, String>::new("Inventory")
        .with(
            "Add",
            Method::Add(|inventory: &mut Inventory, name: String| {
                if name.is_empty() {
                    return Err(InvokeError::new("empty name"));
                }
                inventory.names.push(name);
                Ok(())
            }),
        )
        .with("Count", Method::Count(|inventory: &Inventory| Ok(inventory.names.len())))
        .with(
            "GetEnumerator",
            Method::GetEnumerator(|inventory: &Inventory| Ok(inventory.names.clone())),
        )
}

#[test]
fn test_minimal_collection_supports_list_reads_and_add() {
    let shape = inventory_shape();
    let mut inventory = Inventory::default();
    let mut list = CollectionAdapter::wrap(&mut inventory, &shape).expect("Add and Count exist");

    assert_eq!(list.add("knife".to_owned()), Some(0));
    assert_eq!(list.add("rope".to_owned()), Some(1));
    assert_eq!(list.add(String::new()), None);

    assert_eq!(list.count(), 2);
    assert!(list.contains(&"rope".to_owned()));
    assert_eq!(list.index_of(&"rope".to_owned()), Some(1));
    assert_eq!(list.index_of(&"lamp".to_owned()), None);
    assert_eq!(list.get(1), Some("rope".to_owned()));
    assert_eq!(list.iter().collect::<Vec<_>>(), vec!["knife", "rope"]);
}

#[test]
fn test_index_writes_are_unsupported_and_leave_state_alone() {
    let shape = inventory_shape();
    let mut inventory = Inventory::default();
    {
        let mut list = CollectionAdapter::wrap(&mut inventory, &shape).expect("wrappable");
        list.add("knife".to_owned());

        let error = list.remove_at(0).expect_err("remove at index must fail");
        assert!(matches!(error, CollectionError::Unsupported { .. }));
        assert_eq!(error.severity(), ErrorSeverity::Unsupported);
        assert!(list.insert(0, "lamp".to_owned()).is_err());
        assert!(list.set(0, "lamp".to_owned()).is_err());

        // Missing Clear/Remove degrade to logged no-ops.
        list.clear();
        list.remove(&"knife".to_owned());
    }
    assert_eq!(inventory.names, vec!["knife".to_owned()]);
}

#[test]
fn test_wrap_requires_add_and_count() {
    let shape = CollectionShape::<Inventory, String>::new("Inventory")
        .with("Count", Method::Count(|inventory: &Inventory| Ok(inventory.names.len())));
    let mut inventory = Inventory::default();

    let error = CollectionAdapter::wrap(&mut inventory, &shape)
        .err()
        .expect("Add is missing");
    assert_eq!(
        error,
        CollectionError::MissingMethod {
            type_name: "Inventory",
            method: "Add"
        }
    );
}
