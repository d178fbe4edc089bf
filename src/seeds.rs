//! Built-in seed definitions.

use crate::types::{ChoiceItem, ContainerItem, FormDefinition, FormItem};

/// The AHC HRSN screening form the session starts with.
pub fn ahc_hrsn_screening() -> FormDefinition {
    FormDefinition::new("AHC HRSN Screening", "1.0.0", "Health Architect Suite").with_item(
        FormItem::Section(
            ContainerItem::new("core", "Part I: Core Health Questions")
                .with_item(FormItem::Group(
                    ContainerItem::new("living", "Living Situation")
                        .with_item(FormItem::Select(
                            ChoiceItem::new(
                                "q1",
                                "What is your living situation today?",
                                [
                                    "I have a steady place to live",
                                    "I don't have a steady place",
                                ],
                            )
                            .with_index("1."),
                        ))
                        .with_item(FormItem::Select(
                            ChoiceItem::new(
                                "q2",
                                "Think about the place you live. Do you have problems with any of the following?",
                                ["Pests", "Mold", "Lead paint"],
                            )
                            .with_index("2."),
                        )),
                ))
                .with_item(FormItem::Group(
                    ContainerItem::new("food", "Food Security").with_item(FormItem::Radio(
                        ChoiceItem::new(
                            "q3",
                            "Within the past 12 months, you worried that your food would run out before you got money to buy more.",
                            ["Often true", "Sometimes true", "Never true"],
                        )
                        .with_index("3."),
                    )),
                )),
        ),
    )
}
