//! Fixed category and blessing tables.
//!
//! Everything the bot finally replies with comes from here. The classifier
//! may suggest a phrase, but [`coerce`] decides which one is sent.

use tracing::trace;

/// Sentinel meaning "no blessing applies".
pub const NO_BLESSING: &str = "—";

/// Marker the free-text contract uses for non-food input.
pub const NOT_FOOD_MARKER: &str = "לא מאכל";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Bread,
    GrainProduct,
    TreeFruit,
    GroundProduce,
    Wine,
    Generic,
    NotFood,
    Unknown,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Bread,
        Category::GrainProduct,
        Category::TreeFruit,
        Category::GroundProduce,
        Category::Wine,
        Category::Generic,
        Category::NotFood,
        Category::Unknown,
    ];

    /// Label requested from the classifier in the response schema.
    pub fn label(self) -> &'static str {
        match self {
            Category::Bread => "לחם",
            Category::GrainProduct => "מזונות",
            Category::TreeFruit => "פרי_עץ",
            Category::GroundProduce => "פרי_אדמה",
            Category::Wine => "יין",
            Category::Generic => "שהכל",
            Category::NotFood => "לא_מאכל",
            Category::Unknown => "לא_ידוע",
        }
    }

    pub fn english_label(self) -> &'static str {
        match self {
            Category::Bread => "bread",
            Category::GrainProduct => "grain-product",
            Category::TreeFruit => "tree-fruit",
            Category::GroundProduce => "ground-produce",
            Category::Wine => "wine",
            Category::Generic => "generic",
            Category::NotFood => "not-food",
            Category::Unknown => "unknown",
        }
    }

    /// Accepts both the Hebrew schema labels and the English names.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label || c.english_label().eq_ignore_ascii_case(label))
    }

    /// `None` for categories that carry no blessing.
    pub fn blessing(self) -> Option<Blessing> {
        match self {
            Category::Bread => Some(Blessing::HaMotzi),
            Category::GrainProduct => Some(Blessing::Mezonot),
            Category::TreeFruit => Some(Blessing::HaEtz),
            Category::GroundProduce => Some(Blessing::HaAdama),
            Category::Wine => Some(Blessing::HaGafen),
            Category::Generic => Some(Blessing::Shehakol),
            Category::NotFood | Category::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blessing {
    HaMotzi,
    Mezonot,
    HaEtz,
    HaAdama,
    HaGafen,
    Shehakol,
}

impl Blessing {
    /// Ordered by category priority.
    pub const ALL: [Blessing; 6] = [
        Blessing::HaMotzi,
        Blessing::Mezonot,
        Blessing::HaEtz,
        Blessing::HaAdama,
        Blessing::HaGafen,
        Blessing::Shehakol,
    ];

    /// Catch-all phrase used whenever classification fails.
    pub const FALLBACK: Blessing = Blessing::Shehakol;

    pub fn phrase(self) -> &'static str {
        match self {
            Blessing::HaMotzi => "המוציא לחם מן הארץ",
            Blessing::Mezonot => "בורא מיני מזונות",
            Blessing::HaEtz => "בורא פרי העץ",
            Blessing::HaAdama => "בורא פרי האדמה",
            Blessing::HaGafen => "בורא פרי הגפן",
            Blessing::Shehakol => "שהכל נהיה בדברו",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Blessing::HaMotzi => Category::Bread,
            Blessing::Mezonot => Category::GrainProduct,
            Blessing::HaEtz => Category::TreeFruit,
            Blessing::HaAdama => Category::GroundProduce,
            Blessing::HaGafen => Category::Wine,
            Blessing::Shehakol => Category::Generic,
        }
    }

    /// Exact match against the known phrases after trimming.
    pub fn from_phrase(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL.into_iter().find(|b| b.phrase() == text)
    }
}

/// Map a classifier category label to the final blessing.
///
/// Returns `None` for the `—` sentinel (not food or unknown). The suggested
/// phrase is only consulted when the label is outside the fixed set, and even
/// then only if it is one of the known phrases.
pub fn coerce(label: &str, suggested: &str) -> Option<Blessing> {
    match Category::from_label(label) {
        Some(category) => category.blessing(),
        None => {
            trace!(label, suggested, "unrecognized category label");
            Some(Blessing::from_phrase(suggested).unwrap_or(Blessing::FALLBACK))
        }
    }
}
