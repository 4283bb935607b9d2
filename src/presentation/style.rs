//! Display descriptors for categories, blog categories and history topics.
//!
//! `StyleBook::standard()` builds the tables once; callers hold it and pass
//! it by reference. Every lookup is total: unknown names get the default
//! entry of the relevant table.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::BLOG_CATEGORY_PREFIX;

/// Icon, color and blurb for a category or topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayStyle {
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// Display descriptor for a `blog-` category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlogCategoryStyle {
    pub icon: &'static str,
    pub color: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Navigation entry for a blog category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogCategoryLink {
    pub slug: String,
    pub name: &'static str,
    pub icon: &'static str,
}

const fn style(icon: &'static str, color: &'static str, description: &'static str) -> DisplayStyle {
    DisplayStyle {
        icon,
        color,
        description,
    }
}

const CATEGORY_STYLES: &[(&str, DisplayStyle)] = &[
    ("數位學習", style("📚", "#E57373", "免費的線上課程、電子書籍、數位雜誌等學習資源")),
    ("政府服務", style("🏛️", "#64B5F6", "各級政府機關提供的便民服務與線上申辦系統")),
    ("社會福利", style("🤝", "#81C784", "社會福利資源、補助計畫、弱勢關懷等相關服務")),
    ("技能培訓", style("💡", "#FFB74D", "職業訓練、技能認證、專業進修等培訓機會")),
    ("數位工具", style("🌐", "#BA68C8", "免費軟體、線上工具、數位服務等實用資源")),
    ("圖書館資源", style("📖", "#A5D6A7", "圖書館數位資源、免費借閱服務")),
    ("開放式課程", style("🎓", "#FFCC80", "大學開放式課程、免費學習平台")),
    ("創業經營", style("💼", "#F8BBD9", "創業資源、經營管理、商業服務")),
    ("職業訓練", style("🛠️", "#90CAF9", "政府職業訓練、進修課程、就業輔導")),
];

const DEFAULT_CATEGORY_STYLE: DisplayStyle = style("📋", "#78909C", "其他優質資源");

const BLOG_CATEGORY_STYLES: &[(&str, BlogCategoryStyle)] = &[
    (
        "blog-教學",
        BlogCategoryStyle {
            icon: "📖",
            color: "#4CAF50",
            name: "教學",
            description: "教學文章與實用指南",
        },
    ),
    (
        "blog-心得",
        BlogCategoryStyle {
            icon: "💭",
            color: "#2196F3",
            name: "心得",
            description: "使用心得與經驗分享",
        },
    ),
    (
        "blog-新聞",
        BlogCategoryStyle {
            icon: "📰",
            color: "#FF9800",
            name: "新聞",
            description: "最新消息與動態報導",
        },
    ),
    (
        "blog-資源介紹",
        BlogCategoryStyle {
            icon: "🔗",
            color: "#9C27B0",
            name: "資源介紹",
            description: "優質資源推薦與介紹",
        },
    ),
];

const DEFAULT_BLOG_CATEGORY_STYLE: BlogCategoryStyle = BlogCategoryStyle {
    icon: "📝",
    color: "#78909C",
    name: "文章",
    description: "部落格文章",
};

const TOPIC_STYLES: &[(&str, DisplayStyle)] = &[
    ("原住民族", style("🎭", "#8B008B", "台灣原住民族十六族的文化、語言、傳統與當代發展")),
    ("地方志書", style("📜", "#CD853F", "各縣市方志、鄉鎮志與地方歷史文獻")),
    ("歷史地圖", style("🗺️", "#20B2AA", "台灣歷史地圖、行政區劃變遷與地理資訊")),
    ("老照片", style("📷", "#696969", "珍貴歷史照片、影像資料與視覺記憶")),
    ("社會人文", style("👥", "#9370DB", "社會變遷、民俗信仰、日常生活與人文記錄")),
    ("經濟產業", style("🌾", "#228B22", "農業、工業、貿易發展與經濟史")),
    ("政治法律", style("⚖️", "#4682B4", "政治制度、法律沿革與治理歷史")),
    ("教育文化", style("🎓", "#FF8C00", "教育發展、文學藝術、文化運動與知識傳承")),
    ("建築古蹟", style("🏰", "#A0522D", "歷史建築、古蹟保存與建築文化資產")),
    ("交通發展", style("🚂", "#708090", "鐵路、公路、港口等交通建設史")),
    ("醫療衛生", style("🏥", "#3CB371", "醫療發展、公共衛生與疾病防治史")),
    ("宗教信仰", style("🛕", "#B8860B", "宗教發展、廟宇文化與民間信仰")),
];

const DEFAULT_TOPIC_STYLE: DisplayStyle = style("📚", "#78909C", "其他台灣歷史相關內容");

/// Immutable style lookup tables
#[derive(Debug, Clone)]
pub struct StyleBook {
    categories: HashMap<&'static str, DisplayStyle>,
    blog_categories: HashMap<&'static str, BlogCategoryStyle>,
    /// Slugs in navigation order
    blog_order: Vec<&'static str>,
    topics: HashMap<&'static str, DisplayStyle>,
    topic_order: Vec<&'static str>,
}

impl Default for StyleBook {
    fn default() -> Self {
        Self::standard()
    }
}

impl StyleBook {
    /// Build the site's tables
    pub fn standard() -> Self {
        Self {
            categories: CATEGORY_STYLES.iter().copied().collect(),
            blog_categories: BLOG_CATEGORY_STYLES.iter().copied().collect(),
            blog_order: BLOG_CATEGORY_STYLES.iter().map(|(slug, _)| *slug).collect(),
            topics: TOPIC_STYLES.iter().copied().collect(),
            topic_order: TOPIC_STYLES.iter().map(|(name, _)| *name).collect(),
        }
    }

    /// Style for a resource category name
    pub fn category_style(&self, name: &str) -> DisplayStyle {
        self.categories
            .get(name)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_STYLE)
    }

    /// Style for a blog category slug (`blog-教學`)
    pub fn blog_category_style(&self, slug: &str) -> BlogCategoryStyle {
        self.blog_categories
            .get(slug)
            .copied()
            .unwrap_or(DEFAULT_BLOG_CATEGORY_STYLE)
    }

    /// Style for a blog category name without the prefix (`教學`)
    pub fn blog_category_style_by_name(&self, name: &str) -> BlogCategoryStyle {
        self.blog_category_style(&format!("{}{}", BLOG_CATEGORY_PREFIX, name))
    }

    /// Known blog categories in navigation order
    pub fn blog_categories(&self) -> Vec<BlogCategoryLink> {
        self.blog_order
            .iter()
            .map(|slug| {
                let style = self.blog_category_style(slug);
                BlogCategoryLink {
                    slug: slug.to_string(),
                    name: style.name,
                    icon: style.icon,
                }
            })
            .collect()
    }

    /// Style for a history topic name
    pub fn topic_style(&self, name: &str) -> DisplayStyle {
        self.topics.get(name).copied().unwrap_or(DEFAULT_TOPIC_STYLE)
    }

    /// Known topics with their styles (the default entry excluded)
    pub fn topics(&self) -> Vec<(&'static str, DisplayStyle)> {
        self.topic_order
            .iter()
            .map(|name| (*name, self.topic_style(name)))
            .collect()
    }
}
