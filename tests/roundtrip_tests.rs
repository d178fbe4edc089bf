//! Serializing a valid definition to text and passing it back through the
//! gate must yield a structurally identical tree.

use clinforms::*;
use serde_json::Value;

fn roundtrip(definition: &FormDefinition) -> FormDefinition {
    let text = definition.to_json_pretty().unwrap();
    let candidate: Value = serde_json::from_str(&text).unwrap();
    FormValidator::new().validate(&candidate).unwrap()
}

#[test]
fn seed_roundtrips_unchanged() {
    let seed = seeds::ahc_hrsn_screening();
    assert_eq!(roundtrip(&seed), seed);
}

#[test]
fn every_variant_roundtrips_with_all_optional_fields() {
    let definition = FormDefinition::new("Full coverage", "2.1", "Unit tests").with_item(
        FormItem::Section(
            ContainerItem::new("s1", "Section")
                .with_index("I.")
                .with_item(FormItem::Group(
                    ContainerItem::new("g1", "Group")
                        .with_item(FormItem::Text(
                            FieldItem::new("t1", "Text")
                                .with_index("1.")
                                .required()
                                .with_description("desc")
                                .with_placeholder("hint")
                                .with_loinc("8302-2"),
                        ))
                        .with_item(FormItem::Number(FieldItem::new("n1", "Number")))
                        .with_item(FormItem::Date(FieldItem::new("d1", "Date")))
                        .with_item(FormItem::Checkbox(FieldItem::new("c1", "Checkbox")))
                        .with_item(FormItem::Select(
                            ChoiceItem::new("sel1", "Select", ["a", "b"]).with_loinc("12345-6"),
                        ))
                        .with_item(FormItem::Radio(
                            ChoiceItem::new("r1", "Radio", ["x", "y", "z"]).required(),
                        )),
                )),
        ),
    );

    let back = roundtrip(&definition);
    assert_eq!(back, definition);
    assert_eq!(back.item_count(), definition.item_count());
    assert_eq!(back.counts_by_type(), definition.counts_by_type());
}

#[test]
fn child_order_is_the_authored_sequence() {
    let definition = FormDefinition::new("T", "1.0.0", "P").with_item(FormItem::Group(
        ContainerItem::new("g", "G")
            .with_item(FormItem::Text(FieldItem::new("first", "1")))
            .with_item(FormItem::Text(FieldItem::new("second", "2")))
            .with_item(FormItem::Text(FieldItem::new("third", "3"))),
    ));

    let back = roundtrip(&definition);
    let ids: Vec<&str> = back.leaf_fields().iter().map(|i| i.id()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn absent_optionals_stay_absent_in_the_textual_form() {
    let definition = FormDefinition::new("T", "1.0.0", "P")
        .with_item(FormItem::Text(FieldItem::new("q1", "Plain")));
    let value = serde_json::to_value(&definition).unwrap();
    let leaf = &value["items"][0];
    assert_eq!(leaf["type"], "TEXT");
    assert!(leaf.get("required").is_none());
    assert!(leaf.get("index").is_none());
    assert!(leaf.get("loincCode").is_none());
    assert!(leaf.get("items").is_none());
}
