//! Predefined covers and the starter catalog they belong to.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// One of the nine covers bundled with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cover {
    Book1,
    Book2,
    Book3,
    Book4,
    Book5,
    Book6,
    Book7,
    Book8,
    Book9,
}

impl Cover {
    /// Every cover, in picker order.
    pub const ALL: [Self; 9] = [
        Self::Book1,
        Self::Book2,
        Self::Book3,
        Self::Book4,
        Self::Book5,
        Self::Book6,
        Self::Book7,
        Self::Book8,
        Self::Book9,
    ];

    /// Cover used whenever a symbolic reference cannot be resolved.
    pub const DEFAULT: Self = Self::Book1;

    /// Symbolic key stored in `image_ref`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Book1 => "book1",
            Self::Book2 => "book2",
            Self::Book3 => "book3",
            Self::Book4 => "book4",
            Self::Book5 => "book5",
            Self::Book6 => "book6",
            Self::Book7 => "book7",
            Self::Book8 => "book8",
            Self::Book9 => "book9",
        }
    }

    /// 1-based number shown in pickers ("Book 3").
    #[must_use]
    pub const fn number(self) -> usize {
        self as usize + 1
    }

    /// Picker label.
    #[must_use]
    pub fn label(self) -> String {
        format!("Book {}", self.number())
    }

    /// Look up a cover by its 1-based picker number.
    #[must_use]
    pub fn from_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Look up a cover by its symbolic key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        cover_index().get(key).copied()
    }

    /// Bundled asset for this cover.
    #[must_use]
    pub fn asset(self) -> &'static CoverAsset {
        &STARTER_CATALOG[self as usize]
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Bundled cover asset together with the starter book it depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoverAsset {
    pub cover: Cover,
    pub title: &'static str,
    pub author: &'static str,
    pub link: &'static str,
}

/// The static in-app catalog, one book per bundled cover.
pub static STARTER_CATALOG: [CoverAsset; 9] = [
    CoverAsset {
        cover: Cover::Book1,
        title: "The Diary of a Young Girl",
        author: "Anne Frank",
        link: "https://www.goodreads.com/book/show/48855.The_Diary_of_a_Young_Girl",
    },
    CoverAsset {
        cover: Cover::Book2,
        title: "How to Win Friends and Influence People",
        author: "Dale Carnegie",
        link: "https://www.goodreads.com/book/show/4865.How_to_Win_Friends_and_Influence_People",
    },
    CoverAsset {
        cover: Cover::Book3,
        title: "The Alchemist",
        author: "Paulo Coelho",
        link: "https://www.goodreads.com/book/show/18144590-the-alchemist",
    },
    CoverAsset {
        cover: Cover::Book4,
        title: "Meditations",
        author: "Marcus Aurelius",
        link: "https://www.goodreads.com/book/show/30659.Meditations",
    },
    CoverAsset {
        cover: Cover::Book5,
        title: "The Monk Who Sold His Ferrari",
        author: "Robin Sharma",
        link: "https://www.goodreads.com/book/show/43877.The_Monk_Who_Sold_His_Ferrari",
    },
    CoverAsset {
        cover: Cover::Book6,
        title: "Tuesdays with Morrie",
        author: "Mitch Albom",
        link: "https://www.goodreads.com/book/show/6900.Tuesdays_with_Morrie",
    },
    CoverAsset {
        cover: Cover::Book7,
        title: "Beyond Good and Evil",
        author: "Friedrich Nietzsche",
        link: "https://www.goodreads.com/book/show/12321.Beyond_Good_and_Evil",
    },
    CoverAsset {
        cover: Cover::Book8,
        title: "Letters from a Stoic",
        author: "Seneca",
        link: "https://www.goodreads.com/book/show/97411.Letters_from_a_Stoic",
    },
    CoverAsset {
        cover: Cover::Book9,
        title: "Animal Farm",
        author: "George Orwell",
        link: "https://www.goodreads.com/book/show/170448.Animal_Farm",
    },
];

// Built once; lookups after that are plain map hits.
fn cover_index() -> &'static HashMap<&'static str, Cover> {
    static INDEX: OnceLock<HashMap<&'static str, Cover>> = OnceLock::new();
    INDEX.get_or_init(|| Cover::ALL.iter().map(|cover| (cover.key(), *cover)).collect())
}
