//! Static content served when the CMS cannot be reached.

use chrono::Utc;

use crate::domain::{Category, Resource, Tag};

/// Three sample resources, one per sample category
pub fn fallback_resources() -> Vec<Resource> {
    let now = Utc::now();

    let sample = |id: &str, title: &str, excerpt: &str, html: &str, slug: &str, tag: Tag| {
        let mut resource = Resource::new(id, title, slug)
            .with_excerpt(excerpt)
            .with_html(html)
            .with_primary_tag(tag);
        resource.created_at = now;
        resource.updated_at = Some(now);
        resource.published_at = Some(now);
        resource
    };

    vec![
        sample(
            "1",
            "台灣圖書館數位資源",
            "國家圖書館提供豐富的數位圖書、期刊和資料庫，完全免費使用",
            "<p>國家圖書館數位資源包含電子書、期刊、論文等豐富內容，提供民眾免費使用。</p>",
            "taiwan-library-digital-resources",
            Tag::new("1", "數位學習", "digital-learning"),
        )
        .featured(),
        sample(
            "2",
            "勞動部職業訓練課程",
            "政府提供的免費職業訓練課程，包含各種技能培訓和證照輔導",
            "<p>勞動部提供多元化的職業訓練課程，協助民眾提升就業技能。</p>",
            "labor-training-courses",
            Tag::new("2", "技能培訓", "skills-training"),
        ),
        sample(
            "3",
            "衛福部社會福利資源",
            "各項社會福利補助申請、長照服務和弱勢關懷資源整合",
            "<p>衛福部整合各項社會福利資源，提供民眾便利的申請管道。</p>",
            "social-welfare-resources",
            Tag::new("3", "社會福利", "social-welfare"),
        ),
    ]
}

/// Sample categories matching [`fallback_resources`]
pub fn fallback_categories() -> Vec<Category> {
    vec![
        Category::new("1", "數位學習", "digital-learning", "免費線上課程和學習資源").with_count(1),
        Category::new("2", "技能培訓", "skills-training", "職業訓練和技能認證").with_count(1),
        Category::new("3", "社會福利", "social-welfare", "社福資源和補助申請").with_count(1),
        Category::new("4", "政府服務", "government-services", "政府便民服務"),
    ]
}
