//! Taiwan history eras.

use serde::Serialize;

/// One era with its display style and year span (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Era {
    pub name: &'static str,
    pub slug: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub date_range: &'static str,
    pub start_year: i32,
    pub end_year: i32,
}

const ERAS: &[Era] = &[
    Era {
        name: "史前時代",
        slug: "prehistoric",
        icon: "🏺",
        color: "#8B4513",
        description: "台灣史前文化遺址與考古發現，包括長濱文化、圓山文化、卑南文化等",
        date_range: "~1624",
        start_year: -50000,
        end_year: 1624,
    },
    Era {
        name: "荷西時期",
        slug: "dutch-spanish",
        icon: "⚓",
        color: "#FF6B35",
        description: "荷蘭與西班牙殖民時期，大航海時代下的台灣",
        date_range: "1624-1662",
        start_year: 1624,
        end_year: 1662,
    },
    Era {
        name: "明鄭時期",
        slug: "koxinga",
        icon: "🏯",
        color: "#2E8B57",
        description: "鄭成功與明鄭政權統治時期，反清復明的歷史",
        date_range: "1662-1683",
        start_year: 1662,
        end_year: 1683,
    },
    Era {
        name: "清領時期",
        slug: "qing",
        icon: "🏛️",
        color: "#DAA520",
        description: "清朝統治下的台灣開發、移民社會與漢番關係",
        date_range: "1683-1895",
        start_year: 1683,
        end_year: 1895,
    },
    Era {
        name: "日治時期",
        slug: "japanese",
        icon: "🏭",
        color: "#DC143C",
        description: "日本統治時期的現代化建設、社會變遷與文化發展",
        date_range: "1895-1945",
        start_year: 1895,
        end_year: 1945,
    },
    Era {
        name: "戰後時期",
        slug: "postwar",
        icon: "🏢",
        color: "#4169E1",
        description: "二戰後台灣的政治發展、經濟奇蹟與民主化歷程",
        date_range: "1945-今",
        start_year: 1945,
        end_year: 2026,
    },
];

/// Era returned for names not in the table
const UNKNOWN_ERA: Era = Era {
    name: "台灣歷史",
    slug: "unknown",
    icon: "📚",
    color: "#78909C",
    description: "台灣歷史",
    date_range: "",
    start_year: 0,
    end_year: 2026,
};

/// Eras whose year does not fall in any span land here
const LATEST_ERA: &str = "戰後時期";

/// Ordered era table
#[derive(Debug, Clone)]
pub struct EraTable {
    eras: Vec<Era>,
}

impl Default for EraTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl EraTable {
    pub fn standard() -> Self {
        Self {
            eras: ERAS.to_vec(),
        }
    }

    /// All eras, oldest first
    pub fn eras(&self) -> &[Era] {
        &self.eras
    }

    /// Era by display name; unknown names get a neutral descriptor
    pub fn era_style(&self, name: &str) -> Era {
        self.eras
            .iter()
            .find(|e| e.name == name)
            .copied()
            .unwrap_or(UNKNOWN_ERA)
    }

    /// First era whose span contains `year`.
    ///
    /// Spans share their boundary years; the earlier era wins.
    pub fn era_by_year(&self, year: i32) -> &'static str {
        self.eras
            .iter()
            .find(|e| year >= e.start_year && year <= e.end_year)
            .map(|e| e.name)
            .unwrap_or(LATEST_ERA)
    }

    /// Slug for an era name, `unknown` if absent
    pub fn era_slug(&self, name: &str) -> &'static str {
        self.eras
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.slug)
            .unwrap_or(UNKNOWN_ERA.slug)
    }

    /// Era name for a slug
    pub fn era_name(&self, slug: &str) -> Option<&'static str> {
        self.eras.iter().find(|e| e.slug == slug).map(|e| e.name)
    }
}
