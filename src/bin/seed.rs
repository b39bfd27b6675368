use std::{sync::Arc, time::Duration as StdDuration};

use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::lorem::en::{Paragraph, Sentence},
    Fake,
};
use serde_json::json;
use sousse::cms::{CmsClient, HostResolver};

/// Fills an empty CMS with demo content for local development.
#[derive(Parser, Debug)]
#[command(name = "seed", about = "Seed the CMS with demo content")]
struct Args {
    /// Base URL of the CMS
    #[arg(long, env = "SOUSSE__CMS__INTERNAL_URL", default_value = "http://localhost:1337")]
    cms_url: String,

    /// API token with create permission on the seeded collections
    #[arg(long, env = "SOUSSE__CMS__API_TOKEN")]
    token: String,

    /// Number of articles to create
    #[arg(long, default_value_t = 6)]
    articles: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    println!("🌱 Seeding CMS at {}...", args.cms_url);

    let client = CmsClient::new(
        Arc::new(HostResolver::new(args.cms_url.clone(), args.cms_url.clone())),
        Some(args.token.clone()),
        StdDuration::from_secs(10),
    )?;

    // Announcements: one per priority, plus an expired and a scheduled one
    println!("📢 Creating announcements...");
    let now = Utc::now();
    let announcements = [
        ("Beach cleanup this Saturday", "event", "urgent", now - Duration::hours(6), Some(now + Duration::days(3))),
        ("Medina walking tour registrations", "news", "high", now - Duration::days(2), None),
        ("Water cut in Khezama", "alert", "normal", now - Duration::hours(1), Some(now + Duration::days(1))),
        ("New volunteer handbook", "update", "info", now - Duration::days(10), None),
        ("Spring festival wrap-up", "news", "normal", now - Duration::days(60), Some(now - Duration::days(30))),
        ("Summer camp opens", "event", "high", now + Duration::days(14), None),
    ];

    for (title, kind, priority, start, end) in announcements {
        let excerpt: String = Sentence(8..14).fake();
        let content: String = Paragraph(3..5).fake();
        client
            .create(
                "announcements",
                &json!({
                    "title": title,
                    "slug": slugify(title),
                    "excerpt": excerpt,
                    "content": content,
                    "type": kind,
                    "priority": priority,
                    "startDate": start.to_rfc3339(),
                    "endDate": end.map(|e| e.to_rfc3339()),
                    "showOnHomepage": priority != "info",
                }),
            )
            .await?;
    }
    println!("  ✅ Created {} announcements", announcements.len());

    // Articles across categories and kinds
    println!("📰 Creating articles...");
    let categories = ["news", "event", "project", "culture", "environment"];
    let kinds = ["article", "article", "video", "album"];
    for i in 0..args.articles {
        let title: String = Sentence(3..6).fake();
        let title = title.trim_end_matches('.').to_string();
        let kind = kinds[i % kinds.len()];
        client
            .create(
                "articles",
                &json!({
                    "title": title,
                    "slug": format!("{}-{}", slugify(&title), i),
                    "excerpt": Sentence(10..16).fake::<String>(),
                    "content": Paragraph(4..8).fake::<String>(),
                    "category": categories[i % categories.len()],
                    "kind": kind,
                    "videoUrl": (kind == "video").then_some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
                }),
            )
            .await?;
    }
    println!("  ✅ Created {} articles", args.articles);

    // Homepage figures
    println!("📊 Creating statistics...");
    let statistics = [
        ("Volunteers", 350.0, Some("+")),
        ("Cleanups organised", 42.0, None),
        ("Kilograms of waste collected", 12.5, Some("t")),
    ];
    for (order, (label, value, suffix)) in statistics.iter().enumerate() {
        client
            .create(
                "statistics",
                &json!({ "label": label, "value": value, "suffix": suffix, "order": order }),
            )
            .await?;
    }
    println!("  ✅ Created {} statistics", statistics.len());

    println!("\n✨ CMS seeding complete!");
    Ok(())
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
