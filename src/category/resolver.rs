use serde::Serialize;

/// Display text and disposal instruction for one class label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub title: &'static str,
    pub instruction: &'static str,
    pub style_tag: &'static str,
}

const CATEGORIES: &[(&str, CategoryInfo)] = &[
    (
        "Battery",
        CategoryInfo {
            title: "Hazardous Waste (E-Waste)",
            instruction: "Do not throw batteries in the regular bin. They contain hazardous chemicals; take them to the nearest e-waste collection point.",
            style_tag: "red",
        },
    ),
    (
        "Biological",
        CategoryInfo {
            title: "Organic Waste",
            instruction: "Compost it. Keep it separate from inorganic waste so it does not rot into odour and methane at the landfill.",
            style_tag: "orange",
        },
    ),
    (
        "Cardboard",
        CategoryInfo {
            title: "Recyclable (Paper)",
            instruction: "Keep cardboard dry and fold it flat to save space before handing it to a waste bank.",
            style_tag: "amber",
        },
    ),
    (
        "Clothes",
        CategoryInfo {
            title: "Textile Waste",
            instruction: "Donate clothes that are still wearable. Damaged textiles go to a textile recycler.",
            style_tag: "purple",
        },
    ),
    (
        "Glass",
        CategoryInfo {
            title: "Recyclable (Glass)",
            instruction: "Handle with care and keep it unbroken. Rinse off food or drink residue; glass can be recycled indefinitely.",
            style_tag: "blue",
        },
    ),
    (
        "Metal",
        CategoryInfo {
            title: "Recyclable (Metal)",
            instruction: "Rinse cans and metal packaging. Metal has a high resale value at waste banks.",
            style_tag: "slate",
        },
    ),
    (
        "Paper",
        CategoryInfo {
            title: "Recyclable (Paper)",
            instruction: "Make sure the paper is free of oil and food stains. Clean paper is easy to recycle.",
            style_tag: "sky",
        },
    ),
    (
        "Plastic",
        CategoryInfo {
            title: "Recyclable (Plastic)",
            instruction: "Rinse the bottle, remove the label if possible, and crush it to reduce its volume.",
            style_tag: "teal",
        },
    ),
    (
        "Shoe",
        CategoryInfo {
            title: "Non-Organic / Donation",
            instruction: "Shoes in good condition can be donated. Badly damaged pairs are residual waste or go to a footwear recycling program.",
            style_tag: "yellow",
        },
    ),
    (
        "Trash",
        CategoryInfo {
            title: "Residual Waste",
            instruction: "Hard to recycle items such as dirty tissues or cigarette butts. Put them in the general bin headed for landfill.",
            style_tag: "gray",
        },
    ),
];

/// Looks up the category for a class label. Unknown labels resolve to
/// `None`; no fallback category is ever returned.
pub fn resolve(class_name: &str) -> Option<&'static CategoryInfo> {
    CATEGORIES
        .iter()
        .find(|(name, _)| *name == class_name)
        .map(|(_, info)| info)
}

pub fn known_classes() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|(name, _)| *name)
}
