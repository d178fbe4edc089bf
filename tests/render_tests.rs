use clinforms::*;

fn radio_definition() -> FormDefinition {
    FormDefinition::new("T", "1.0.0", "P").with_item(FormItem::Radio(
        ChoiceItem::new("q1", "Food security?", ["Often", "Sometimes", "Never"]).with_index("3."),
    ))
}

fn controls(body: &FormBody) -> &[Node] {
    match body {
        FormBody::Nodes(nodes) => nodes,
        FormBody::EmptyState { .. } => panic!("unexpected empty state"),
    }
}

#[test]
fn empty_definition_projects_the_explicit_empty_state() {
    let projection = FormRenderer::new().project(&FormDefinition::new("T", "1.0.0", "P"));
    match projection.body {
        FormBody::EmptyState { message, .. } => {
            assert!(message.contains("No fields"));
        }
        FormBody::Nodes(_) => panic!("expected the empty state, got nodes"),
    }
}

#[test]
fn rendering_is_idempotent() {
    let definition = seeds::ahc_hrsn_screening();
    let renderer = FormRenderer::new();
    assert_eq!(renderer.project(&definition), renderer.project(&definition));
}

#[test]
fn radio_projects_one_exclusive_group_with_prefixed_label() {
    let projection = FormRenderer::new().project(&radio_definition());
    let nodes = controls(&projection.body);
    assert_eq!(nodes.len(), 1);

    let Node::Control(control) = &nodes[0] else {
        panic!("expected a control node");
    };
    assert_eq!(control.display_label, "3. Food security?");
    assert!(!control.must_answer);
    match &control.contract {
        ControlContract::RadioGroup {
            name_group,
            options,
        } => {
            assert_eq!(name_group, "q1");
            assert_eq!(options, &["Often", "Sometimes", "Never"]);
        }
        other => panic!("expected a radio group, got {other:?}"),
    }
}

#[test]
fn select_carries_a_neutral_choice_distinct_from_real_options() {
    let definition = FormDefinition::new("T", "1.0.0", "P").with_item(FormItem::Select(
        ChoiceItem::new("living", "Living situation", ["Steady", "Not steady"]),
    ));

    let projection = FormRenderer::new().project(&definition);
    let Node::Control(control) = &controls(&projection.body)[0] else {
        panic!("expected a control node");
    };
    match &control.contract {
        ControlContract::SingleSelect {
            neutral_choice,
            options,
        } => {
            assert_eq!(neutral_choice, SELECT_NEUTRAL_CHOICE);
            assert!(!options.contains(neutral_choice));
            assert_eq!(options.len(), 2);
        }
        other => panic!("expected a select, got {other:?}"),
    }
}

#[test]
fn leaf_annotations_survive_projection() {
    let definition = FormDefinition::new("T", "1.0.0", "P").with_item(FormItem::Number(
        FieldItem::new("bmi", "Body mass index")
            .required()
            .with_description("Measured, not self-reported")
            .with_placeholder("kg/m2")
            .with_loinc("39156-5"),
    ));

    let projection = FormRenderer::new().project(&definition);
    let Node::Control(control) = &controls(&projection.body)[0] else {
        panic!("expected a control node");
    };
    assert!(control.must_answer);
    assert_eq!(control.loinc_annotation.as_deref(), Some("39156-5"));
    assert_eq!(
        control.description.as_deref(),
        Some("Measured, not self-reported")
    );
    match &control.contract {
        ControlContract::Input { kind, placeholder } => {
            assert_eq!(*kind, InputKind::Number);
            assert_eq!(placeholder.as_deref(), Some("kg/m2"));
        }
        other => panic!("expected an input, got {other:?}"),
    }
}

#[test]
fn label_without_index_is_untouched() {
    let definition = FormDefinition::new("T", "1.0.0", "P")
        .with_item(FormItem::Text(FieldItem::new("name", "Full name")));
    let projection = FormRenderer::new().project(&definition);
    let Node::Control(control) = &controls(&projection.body)[0] else {
        panic!("expected a control node");
    };
    assert_eq!(control.display_label, "Full name");
}

#[test]
fn checkbox_projects_a_boolean_contract() {
    let definition = FormDefinition::new("T", "1.0.0", "P")
        .with_item(FormItem::Checkbox(FieldItem::new("consent", "I consent")));
    let projection = FormRenderer::new().project(&definition);
    let Node::Control(control) = &controls(&projection.body)[0] else {
        panic!("expected a control node");
    };
    assert_eq!(control.contract, ControlContract::Checkbox);
}

#[test]
fn nesting_depth_is_informational_and_increments_per_level() {
    let projection = FormRenderer::new().project(&seeds::ahc_hrsn_screening());
    let nodes = controls(&projection.body);

    let Node::SectionHeader {
        depth, children, ..
    } = &nodes[0]
    else {
        panic!("expected a section at the root");
    };
    assert_eq!(*depth, 0);

    let Node::GroupBlock {
        depth, children, ..
    } = &children[0]
    else {
        panic!("expected a group under the section");
    };
    assert_eq!(*depth, 1);

    let Node::Control(control) = &children[0] else {
        panic!("expected a control under the group");
    };
    assert_eq!(control.depth, 2);
    assert_eq!(control.display_label, "1. What is your living situation today?");
}
