//! Tests for the tree update engine

use rstest::{fixture, rstest};

use rsledger::domain::{
    find_node, round2, subtotal, update_value, Node, TreeUpdateEngine, UpdateMode,
};
use rsledger::util::testing::init_test_setup;

#[fixture]
fn seed() -> Vec<Node> {
    vec![
        Node::parent(
            "electronics",
            "Electronics",
            vec![
                Node::leaf("phones", "Phones", 800.0),
                Node::leaf("laptops", "Laptops", 700.0),
            ],
        ),
        Node::parent(
            "furniture",
            "Furniture",
            vec![
                Node::leaf("tables", "Tables", 300.0),
                Node::leaf("chairs", "Chairs", 700.0),
            ],
        ),
    ]
}

/// Every parent's value must equal the rounded sum of its children.
///
/// Parents that were themselves the target of a redistribution may be off by
/// a cent (rounded children need not sum exactly to the rounded target), so
/// they can be exempted by id.
fn assert_subtotal_consistency(nodes: &[Node], exempt: &[&str]) {
    for node in nodes {
        if node.is_parent() {
            if !exempt.contains(&node.id.as_str()) {
                assert_eq!(
                    node.value,
                    round2(subtotal(&node.children)),
                    "subtotal mismatch at node {}",
                    node.id
                );
            }
            assert_subtotal_consistency(&node.children, exempt);
        }
    }
}

#[rstest]
fn given_parent_when_updated_directly_then_children_redistribute_proportionally(seed: Vec<Node>) {
    init_test_setup();

    // Act
    let updated = update_value(&seed, "electronics", 3000.0, UpdateMode::Direct);

    // Assert
    assert_eq!(find_node(&updated, "electronics").unwrap().value, 3000.0);
    assert_eq!(find_node(&updated, "phones").unwrap().value, 1600.0);
    assert_eq!(find_node(&updated, "laptops").unwrap().value, 1400.0);
    // Sibling root untouched
    assert_eq!(find_node(&updated, "furniture").unwrap().value, 1000.0);
    assert_subtotal_consistency(&updated, &["electronics"]);
}

#[rstest]
fn given_leaf_when_updated_then_ancestor_subtotals_recompute(seed: Vec<Node>) {
    init_test_setup();

    // Act
    let updated = update_value(&seed, "phones", 1000.0, UpdateMode::Direct);

    // Assert
    assert_eq!(find_node(&updated, "phones").unwrap().value, 1000.0);
    assert_eq!(find_node(&updated, "laptops").unwrap().value, 700.0);
    assert_eq!(find_node(&updated, "electronics").unwrap().value, 1700.0);
    assert_eq!(subtotal(&updated), 2700.0);
    assert_subtotal_consistency(&updated, &[]);
}

#[test]
fn given_zero_subtotal_parent_when_updated_then_children_become_zero() {
    // Arrange
    let forest = vec![Node::parent(
        "empty",
        "Empty",
        vec![
            Node::leaf("a", "A", 0.0),
            Node::leaf("b", "B", 0.0),
        ],
    )];

    // Act
    let updated = update_value(&forest, "empty", 500.0, UpdateMode::Direct);

    // Assert: prior proportions carry no information, so nothing distributes
    assert_eq!(find_node(&updated, "empty").unwrap().value, 500.0);
    assert_eq!(find_node(&updated, "a").unwrap().value, 0.0);
    assert_eq!(find_node(&updated, "b").unwrap().value, 0.0);
}

#[rstest]
fn given_unknown_id_when_updated_then_forest_unchanged(seed: Vec<Node>) {
    // Act
    let updated = update_value(&seed, "nonexistent", 999.0, UpdateMode::Direct);

    // Assert
    assert_eq!(updated, seed);
}

#[test]
fn given_three_level_tree_when_root_updated_then_redistribution_cascades() {
    // Arrange
    let forest = vec![Node::parent(
        "root",
        "Root",
        vec![
            Node::parent(
                "a",
                "A",
                vec![
                    Node::leaf("a1", "A1", 200.0),
                    Node::leaf("a2", "A2", 200.0),
                ],
            ),
            Node::leaf("b", "B", 600.0),
        ],
    )];
    assert_eq!(find_node(&forest, "root").unwrap().value, 1000.0);

    // Act
    let updated = update_value(&forest, "root", 2000.0, UpdateMode::Direct);

    // Assert: push-down reaches the grandchildren
    assert_eq!(find_node(&updated, "a").unwrap().value, 800.0);
    assert_eq!(find_node(&updated, "a1").unwrap().value, 400.0);
    assert_eq!(find_node(&updated, "a2").unwrap().value, 400.0);
    assert_eq!(find_node(&updated, "b").unwrap().value, 1200.0);
    assert_subtotal_consistency(&updated, &["root"]);
}

#[rstest]
fn given_update_sequence_then_subtotal_invariant_holds(seed: Vec<Node>) {
    init_test_setup();

    // Arrange
    let mut engine = TreeUpdateEngine::initialize(seed).unwrap();

    // Act & Assert after every step
    engine.update_value("phones", 1234.56, UpdateMode::Direct);
    assert_subtotal_consistency(engine.tree(), &[]);

    engine.update_value("electronics", 777.77, UpdateMode::Direct);
    assert_subtotal_consistency(engine.tree(), &["electronics"]);

    engine.update_value("chairs", 0.0, UpdateMode::Direct);
    assert_subtotal_consistency(engine.tree(), &["electronics"]);

    engine.update_value("furniture", 450.0, UpdateMode::Percentage);
    assert_subtotal_consistency(engine.tree(), &["electronics", "furniture"]);
}

#[test]
fn given_fractional_target_when_updated_then_values_round_to_two_decimals() {
    // Arrange
    let forest = vec![Node::parent(
        "root",
        "Root",
        vec![
            Node::leaf("x", "X", 1.0),
            Node::leaf("y", "Y", 2.0),
        ],
    )];

    // Act: 1/3 and 2/3 shares of 100
    let updated = update_value(&forest, "root", 100.0, UpdateMode::Direct);

    // Assert
    assert_eq!(find_node(&updated, "x").unwrap().value, 33.33);
    assert_eq!(find_node(&updated, "y").unwrap().value, 66.67);
    assert_eq!(find_node(&updated, "root").unwrap().value, 100.0);
}

#[rstest]
fn given_engine_when_updating_then_previous_snapshot_stays_valid(seed: Vec<Node>) {
    // Arrange
    let mut engine = TreeUpdateEngine::initialize(seed).unwrap();
    let snapshot = engine.tree().to_vec();

    // Act: updates replace the forest instead of mutating it
    engine.update_value("phones", 1.0, UpdateMode::Direct);

    // Assert
    assert_eq!(find_node(&snapshot, "phones").unwrap().value, 800.0);
    assert_eq!(find_node(engine.tree(), "phones").unwrap().value, 1.0);
}

#[test]
fn given_duplicate_ids_when_initializing_then_errors() {
    // Arrange
    let seed = vec![
        Node::leaf("dup", "First", 1.0),
        Node::leaf("dup", "Second", 2.0),
    ];

    // Act
    let result = TreeUpdateEngine::initialize(seed);

    // Assert
    assert!(result.is_err());
}

#[test]
fn given_non_finite_seed_value_when_initializing_then_errors() {
    let seed = vec![Node::leaf("bad", "Bad", f64::NAN)];
    assert!(TreeUpdateEngine::initialize(seed).is_err());
}
