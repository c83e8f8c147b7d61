use std::fmt;

/// Closed set of feed categories shown in the Explore drawer.
///
/// Each category has a display name and the value the backend stores on
/// articles. `Top` is the wildcard and matches every article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Top,
    TechScience,
    Finance,
    ArtsCulture,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Top,
        Category::TechScience,
        Category::Finance,
        Category::ArtsCulture,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Top => "Top",
            Category::TechScience => "Tech & Science",
            Category::Finance => "Finance",
            Category::ArtsCulture => "Arts & Culture",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::TechScience => "techsci",
            Category::Finance => "finance",
            Category::ArtsCulture => "artcul",
        }
    }

    /// Look up a category by its display name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.display_name() == name)
    }

    /// Look up a category by its backend value.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.value() == value)
    }

    /// Whether an article carrying `category_value` belongs to this category.
    pub fn matches(self, category_value: &str) -> bool {
        self == Category::Top || self.value() == category_value
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
